//! Utility helpers shared across client modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/native environment differences from the
//! session, repository, and form logic.

pub mod delay;
