use std::time::Duration;

use clap::Parser;

use crate::prompt::PromptStyle;
use crate::provider::ProviderKind;

/// Rebus puzzle API: relays templated prompts to a text-generation provider.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Config {
    /// Listen address (e.g. ":8000" or "0.0.0.0:8000")
    #[arg(long, default_value = ":8000", env = "ADDR")]
    pub addr: String,

    /// Log format: "text" or "json"
    #[arg(long, default_value = "text", env = "LOG_FORMAT")]
    pub log_format: String,

    /// Text-generation provider to call
    #[arg(long, value_enum, default_value_t = ProviderKind::Gemini, env = "PUZZLE_PROVIDER")]
    pub provider: ProviderKind,

    /// Provider API key (falls back to GOOGLE_API_KEY or OPENAI_API_KEY)
    #[arg(long, env = "PROVIDER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Provider base URL (defaults to the provider's public endpoint)
    #[arg(long, env = "PROVIDER_BASE_URL")]
    pub base_url: Option<String>,

    /// Model identifier (defaults to the provider's built-in model)
    #[arg(long, env = "PROVIDER_MODEL")]
    pub model: Option<String>,

    /// Prompt template family
    #[arg(long, value_enum, default_value_t = PromptStyle::Rebus, env = "PROMPT_STYLE")]
    pub prompt_style: PromptStyle,

    /// Overall timeout for one provider call, in seconds
    #[arg(
        long,
        default_value_t = 60,
        env = "REQUEST_TIMEOUT_SECS",
        value_parser = clap::value_parser!(u64).range(1..=600)
    )]
    pub request_timeout_secs: u64,

    /// TCP connect timeout for provider calls, in seconds
    #[arg(
        long,
        default_value_t = 10,
        env = "CONNECT_TIMEOUT_SECS",
        value_parser = clap::value_parser!(u64).range(1..=120)
    )]
    pub connect_timeout_secs: u64,
}

/// Provider settings resolved once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub api_key: Option<String>,
    pub base_url: String,
    pub model_name: String,
}

impl ProviderConfig {
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Resolve provider settings. `lookup` reads the provider-specific key
    /// variable when no generic key was given.
    pub fn provider_config<F>(&self, lookup: F) -> ProviderConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        let kind = self.provider;
        let api_key = non_blank(self.api_key.clone())
            .or_else(|| non_blank(lookup(kind.api_key_env())));

        ProviderConfig {
            kind,
            api_key,
            base_url: non_blank(self.base_url.clone())
                .unwrap_or_else(|| kind.default_base_url().to_string()),
            model_name: non_blank(self.model.clone())
                .unwrap_or_else(|| kind.default_model().to_string()),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Convert Go-style ":8000" to "0.0.0.0:8000".
pub fn normalize_addr(addr: &str) -> String {
    if addr.starts_with(':') {
        format!("0.0.0.0{addr}")
    } else {
        addr.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["rebus-api"];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv).unwrap()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults_follow_provider_kind() {
        let config = parse(&["--provider", "chat", "--api-key", "sk-test"]);
        let resolved = config.provider_config(no_env);

        assert_eq!(resolved.kind, ProviderKind::Chat);
        assert_eq!(resolved.base_url, "https://api.openai.com/v1");
        assert_eq!(resolved.model_name, "gpt-4o-mini");
        assert_eq!(resolved.api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn test_explicit_values_override_defaults() {
        let config = parse(&[
            "--api-key",
            "k",
            "--base-url",
            "http://localhost:9000/v1beta",
            "--model",
            "gemini-2.5-flash",
        ]);
        let resolved = config.provider_config(no_env);

        assert_eq!(resolved.kind, ProviderKind::Gemini);
        assert_eq!(resolved.base_url, "http://localhost:9000/v1beta");
        assert_eq!(resolved.model_name, "gemini-2.5-flash");
    }

    #[test]
    fn test_falls_back_to_provider_key_variable() {
        let config = parse(&[]);
        let resolved = config.provider_config(|name| {
            (name == "GOOGLE_API_KEY").then(|| "google-key".to_string())
        });

        assert_eq!(resolved.api_key.as_deref(), Some("google-key"));
        assert!(resolved.has_credential());
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let config = parse(&["--api-key", "   "]);
        let resolved = config.provider_config(|_| Some(String::new()));

        assert!(resolved.api_key.is_none());
        assert!(!resolved.has_credential());
    }

    #[test]
    fn test_rejects_out_of_range_timeout() {
        let result = Config::try_parse_from(["rebus-api", "--request-timeout-secs", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_prompt_style_flag() {
        let config = parse(&["--prompt-style", "surprise"]);
        assert_eq!(config.prompt_style, PromptStyle::Surprise);
    }

    #[test]
    fn test_normalize_addr() {
        assert_eq!(normalize_addr(":8000"), "0.0.0.0:8000");
        assert_eq!(normalize_addr("127.0.0.1:9000"), "127.0.0.1:9000");
    }
}
