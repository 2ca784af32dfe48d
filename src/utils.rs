//! Utility functions and helpers.

pub mod preflight;
pub mod settings;

pub use preflight::{
    check_platform_credentials, check_platform_credentials_with, platform_credential_status,
    platform_credential_status_with, PlatformCredential,
};
pub use settings::Settings;
