//! Preflight validation checks for early failure detection.
//!
//! Monitoring runs fan out many platform requests. These checks make sure
//! every requested platform has credentials before the first request is sent.

use anyhow::{bail, Result};

use crate::ai::Platform;
use crate::utils::settings::Settings;

/// Credential status for one platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformCredential {
    /// The platform checked.
    pub platform: Platform,
    /// Whether an API key was found in the environment or settings.
    pub available: bool,
}

/// Reports which platforms have an API key configured.
pub fn platform_credential_status(platforms: &[Platform]) -> Vec<PlatformCredential> {
    platform_credential_status_with(&Settings::load_or_default(), platforms)
}

/// Like [`platform_credential_status`], resolving keys against `settings`.
pub fn platform_credential_status_with(
    settings: &Settings,
    platforms: &[Platform],
) -> Vec<PlatformCredential> {
    platforms
        .iter()
        .map(|&platform| PlatformCredential {
            platform,
            available: settings.get_env_vars(platform.api_key_vars()).is_some(),
        })
        .collect()
}

/// Fails fast when any requested platform is missing credentials.
pub fn check_platform_credentials(platforms: &[Platform]) -> Result<Vec<PlatformCredential>> {
    check_platform_credentials_with(&Settings::load_or_default(), platforms)
}

/// Like [`check_platform_credentials`], resolving keys against `settings`.
pub fn check_platform_credentials_with(
    settings: &Settings,
    platforms: &[Platform],
) -> Result<Vec<PlatformCredential>> {
    if platforms.is_empty() {
        bail!("No platforms selected for monitoring");
    }

    let status = platform_credential_status_with(settings, platforms);
    let missing: Vec<String> = status
        .iter()
        .filter(|s| !s.available)
        .map(|s| {
            format!(
                " - {}: set {}",
                s.platform,
                s.platform.api_key_vars().join(" or ")
            )
        })
        .collect();

    if !missing.is_empty() {
        bail!(
            "API credentials missing for {} platform(s):\n{}",
            missing.len(),
            missing.join("\n")
        );
    }

    Ok(status)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::collections::HashMap;
    use std::env;

    use super::*;

    fn clear_gemini_keys() {
        for var in Platform::Gemini.api_key_vars() {
            env::remove_var(var);
        }
    }

    #[test]
    fn empty_platform_list_is_rejected() {
        let err = check_platform_credentials(&[]).unwrap_err();
        assert!(err.to_string().contains("No platforms selected"));
    }

    #[test]
    fn present_key_passes() {
        std::env::set_var("GROK_API_KEY", "xai-test");
        let status = check_platform_credentials(&[Platform::Grok]).unwrap();
        std::env::remove_var("GROK_API_KEY");
        assert_eq!(
            status,
            vec![PlatformCredential {
                platform: Platform::Grok,
                available: true
            }]
        );
    }

    #[test]
    fn missing_key_lists_variables_to_set() {
        clear_gemini_keys();
        let err = check_platform_credentials_with(&Settings::default(), &[Platform::Gemini])
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("API credentials missing for 1 platform(s)"));
        assert!(message.contains(" - Gemini: set GEMINI_API_KEY or GOOGLE_API_KEY"));
    }

    #[test]
    fn settings_key_counts_as_available() {
        clear_gemini_keys();
        let settings = Settings {
            env: HashMap::from([("GOOGLE_API_KEY".to_string(), "g-test".to_string())]),
        };
        let status = check_platform_credentials_with(&settings, &[Platform::Gemini]).unwrap();
        assert!(status[0].available);
        assert!(!platform_credential_status_with(&Settings::default(), &[Platform::Gemini])[0]
            .available);
    }
}
