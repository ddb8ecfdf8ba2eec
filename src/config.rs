// Connection configuration: base URL, account id and API token.
// Each value is resolved with the same precedence: command-line flag,
// then environment variable, then an interactive prompt (the base URL
// never prompts because it has a default).

use anyhow::Result;
use dialoguer::{Input, Password};

/// Public endpoint of the hosted service.
pub const DEFAULT_MSRD_URL: &str = "https://microsoftsecurityriskdetection.com";

/// Everything a client needs to talk to the service. Passed explicitly
/// into `ApiClient::new`; nothing here lives in global state.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub account_id: String,
    pub api_token: String,
}

impl ClientConfig {
    /// Resolve the configuration from the parsed flags, falling back to
    /// `MSRD_URL` / `MSRD_ACCOUNT` / `MSRD_TOKEN` and finally to an
    /// interactive prompt for the account and token.
    pub fn resolve(
        url: Option<String>,
        account: Option<String>,
        token: Option<String>,
    ) -> Result<Self> {
        let base_url = resolve_base_url(url, env_var("MSRD_URL"));

        let account_id = match pick(account, env_var("MSRD_ACCOUNT")) {
            Some(v) => v,
            None => Input::new().with_prompt("Account ID").interact_text()?,
        };

        let api_token = match pick(token, env_var("MSRD_TOKEN")) {
            Some(v) => v,
            None => Password::new().with_prompt("API token").interact()?,
        };

        Ok(ClientConfig {
            base_url,
            account_id,
            api_token,
        })
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Flag wins over environment.
fn pick(flag: Option<String>, env: Option<String>) -> Option<String> {
    flag.or(env)
}

fn resolve_base_url(flag: Option<String>, env: Option<String>) -> String {
    pick(flag, env).unwrap_or_else(|| DEFAULT_MSRD_URL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_beats_environment() {
        assert_eq!(
            pick(Some("from-flag".into()), Some("from-env".into())),
            Some("from-flag".to_string())
        );
        assert_eq!(
            pick(None, Some("from-env".into())),
            Some("from-env".to_string())
        );
        assert_eq!(pick(None, None), None);
    }

    #[test]
    fn base_url_defaults_when_unset() {
        assert_eq!(resolve_base_url(None, None), DEFAULT_MSRD_URL);
        assert_eq!(
            resolve_base_url(Some("https://staging.local".into()), None),
            "https://staging.local"
        );
    }
}
