use std::collections::HashMap;

use super::*;

fn config_from(pairs: &[(&str, &str)]) -> Result<ClientConfig, ClientConfigError> {
    let env: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    ClientConfig::from_lookup(|key| env.get(key).cloned())
}

#[test]
fn empty_environment_gives_defaults() {
    assert_eq!(config_from(&[]).unwrap(), ClientConfig::default());
}

#[test]
fn endpoint_overrides_apply() {
    let config = config_from(&[
        ("REVIEWDESK_API_BASE_URL", "https://api.example.com/"),
        ("REVIEWDESK_LOGIN_PATH", "/auth/signin"),
    ])
    .unwrap();
    assert_eq!(config.endpoints.base_url, "https://api.example.com");
    assert_eq!(config.endpoints.login, "/auth/signin");
    assert_eq!(config.endpoints.register, DEFAULT_REGISTER_PATH);
}

#[test]
fn store_path_override() {
    let config = config_from(&[("REVIEWDESK_STORE_PATH", "/tmp/x.json")]).unwrap();
    assert_eq!(config.store_path, PathBuf::from("/tmp/x.json"));
}

#[test]
fn latency_flag_accepts_common_spellings() {
    for raw in ["0", "false", "No", "OFF"] {
        let config = config_from(&[("REVIEWDESK_SIMULATED_LATENCY", raw)]).unwrap();
        assert!(!config.simulated_latency, "{raw}");
        assert_eq!(config.latency(), SimulatedLatency::none());
    }
    let config = config_from(&[("REVIEWDESK_SIMULATED_LATENCY", "yes")]).unwrap();
    assert_eq!(config.latency(), SimulatedLatency::default());
}

#[test]
fn bad_latency_flag_is_error() {
    let err = config_from(&[("REVIEWDESK_SIMULATED_LATENCY", "sometimes")]).unwrap_err();
    assert_eq!(
        err,
        ClientConfigError::Invalid { var: "REVIEWDESK_SIMULATED_LATENCY", value: "sometimes".to_owned() }
    );
}

#[test]
fn initial_auth_form() {
    let config = config_from(&[("REVIEWDESK_INITIAL_AUTH_FORM", "register")]).unwrap();
    assert_eq!(config.initial_auth_mode, AuthMode::Register);
    assert!(config_from(&[("REVIEWDESK_INITIAL_AUTH_FORM", "signup")]).is_err());
}
