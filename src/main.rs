use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use reviewdesk::app::AppContext;
use reviewdesk::config::{ClientConfig, ClientConfigError};
use reviewdesk::forms::{Form, SubmitOutcome};
use reviewdesk::net::api::AuthError;
use reviewdesk::state::auth_mode::AuthMode;
use reviewdesk::state::project_config::{ConfigError, ProjectConfiguration};
use reviewdesk::storage::StorageError;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ClientConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Project(#[from] ConfigError),
    #[error("could not read {path}: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("{0}")]
    Rejected(String),
    #[error("not signed in")]
    NotSignedIn,
}

#[derive(Parser, Debug)]
#[command(name = "reviewdesk", about = "Review dashboard client")]
struct Cli {
    #[arg(long, env = "REVIEWDESK_API_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "REVIEWDESK_STORE_PATH")]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the session.
    Login {
        #[arg(long)]
        login: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account and sign in.
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        login: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    /// Print the signed-in user.
    Whoami,
    /// Exchange the stored token for a fresh one.
    Refresh,
    Config(ConfigCommand),
}

#[derive(Args, Debug)]
struct ConfigCommand {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
enum ConfigSubcommand {
    /// Print the stored configuration (or the built-in default).
    Show {
        /// Print tokens unmasked.
        #[arg(long)]
        reveal: bool,
    },
    /// Validate and store the configuration in a JSON file.
    Save { file: PathBuf },
    Clear,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    reviewdesk::telemetry::init_native();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = cli.base_url {
        config.endpoints.base_url = base_url.trim_end_matches('/').to_owned();
    }
    if let Some(store) = cli.store {
        config.store_path = store;
    }
    // The CLI never waits on simulated repository delays.
    config.simulated_latency = false;

    let (app, _route) = AppContext::native(config)?;
    match cli.command {
        Command::Login { login, password } => run_login(&app, login, password).await,
        Command::Register { email, login, password } => run_register(&app, email, login, password).await,
        Command::Logout => {
            app.session.logout().await;
            println!("signed out");
            Ok(())
        }
        Command::Whoami => run_whoami(&app),
        Command::Refresh => {
            let response = app.session.refresh().await?;
            println!("refreshed session for {}", response.user.login);
            Ok(())
        }
        Command::Config(config) => run_config(&app, config).await,
    }
}

async fn run_login(app: &AppContext, login: String, password: String) -> Result<(), CliError> {
    use reviewdesk::forms::login::{LOGIN, PASSWORD};

    let mut card = app.auth_card();
    card.switch_to(AuthMode::Login);
    card.login.set_value(LOGIN, login);
    card.login.set_value(PASSWORD, password);
    match card.login.submit(&app.session, app.navigator.as_ref()).await {
        SubmitOutcome::Submitted => run_whoami(app),
        SubmitOutcome::Invalid => Err(CliError::Rejected(describe_errors(card.login.form()))),
        SubmitOutcome::Failed(message) => Err(CliError::Rejected(message)),
    }
}

async fn run_register(app: &AppContext, email: String, login: String, password: String) -> Result<(), CliError> {
    use reviewdesk::forms::register::{EMAIL, LOGIN, PASSWORD};

    let mut card = app.auth_card();
    card.switch_to(AuthMode::Register);
    card.register.set_value(EMAIL, email);
    card.register.set_value(LOGIN, login);
    card.register.set_value(PASSWORD, password);
    match card.register.submit(&app.session, app.navigator.as_ref()).await {
        SubmitOutcome::Submitted => run_whoami(app),
        SubmitOutcome::Invalid => Err(CliError::Rejected(describe_errors(card.register.form()))),
        SubmitOutcome::Failed(message) => Err(CliError::Rejected(message)),
    }
}

fn run_whoami(app: &AppContext) -> Result<(), CliError> {
    let user = app.session.current_user().ok_or(CliError::NotSignedIn)?;
    println!("{} <{}> (id {})", user.login, user.email, user.id);
    Ok(())
}

async fn run_config(app: &AppContext, config: ConfigCommand) -> Result<(), CliError> {
    match config.command {
        ConfigSubcommand::Show { reveal } => {
            let stored = app.projects.load().await?;
            let shown = if reveal { stored } else { stored.redacted() };
            println!("{}", serde_json::to_string_pretty(&shown)?);
            Ok(())
        }
        ConfigSubcommand::Save { file } => {
            let raw = std::fs::read_to_string(&file).map_err(|source| CliError::ReadFile { path: file, source })?;
            let parsed: ProjectConfiguration = serde_json::from_str(&raw)?;

            let mut form = app.project_setup();
            form.patch(&parsed);
            let notification = form.submit(&app.projects).await;
            if notification.is_error() {
                let details = describe_errors(form.form());
                let message =
                    if details.is_empty() { notification.message } else { format!("{}\n{details}", notification.message) };
                return Err(CliError::Rejected(message));
            }
            println!("{}", notification.message);
            Ok(())
        }
        ConfigSubcommand::Clear => {
            app.projects.clear().await?;
            println!("configuration cleared");
            Ok(())
        }
    }
}

/// One indented `field: message` line per visible field error.
fn describe_errors(form: &Form) -> String {
    let lines: Vec<String> = form
        .field_errors()
        .into_iter()
        .map(|(field, message)| format!("  {field}: {message}"))
        .collect();
    lines.join("\n")
}
