use crate::error::ConfigError;
use secrecy::SecretString;
use std::path::PathBuf;

pub const DEFAULT_COMPLETIONS_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "openai/gpt-oss-20b";

#[derive(Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub ai: AiConfig,
    pub reports: ReportsConfig,
    pub tools: ToolchainConfig,
}

#[derive(Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone)]
pub struct AiConfig {
    /// Absence degrades AI review to a fixed error text; it never fails startup.
    pub api_key: Option<SecretString>,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Clone)]
pub struct ReportsConfig {
    pub dir: PathBuf,
}

/// External tool invocation. Binary names are plain fields rather than
/// hardcoded so tests can point an adapter at a nonexistent binary.
#[derive(Clone)]
pub struct ToolchainConfig {
    pub flake8_bin: String,
    pub radon_bin: String,
    pub black_bin: String,
    pub eslint_bin: String,
    pub prettier_bin: String,
    pub cpplint_bin: String,
    pub lizard_bin: String,
    pub eslint_config: String,
    pub timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            server: ServerConfig {
                host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("PORT".into()))?,
            },
            ai: AiConfig {
                api_key: std::env::var("OPENROUTER_API_KEY")
                    .ok()
                    .map(SecretString::from),
                base_url: std::env::var("OPENROUTER_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_COMPLETIONS_URL.to_string()),
                model: std::env::var("OPENROUTER_MODEL")
                    .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
                timeout_secs: std::env::var("AI_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "120".to_string())
                    .parse()
                    .unwrap_or(120),
            },
            reports: ReportsConfig {
                dir: std::env::var("REPORTS_DIR")
                    .unwrap_or_else(|_| "reports".to_string())
                    .into(),
            },
            tools: ToolchainConfig {
                eslint_config: std::env::var("ESLINT_CONFIG")
                    .unwrap_or_else(|_| "eslint.config.mjs".to_string()),
                timeout_secs: std::env::var("TOOL_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "60".to_string())
                    .parse()
                    .unwrap_or(60),
                ..ToolchainConfig::default()
            },
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_COMPLETIONS_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: 120,
        }
    }
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("reports"),
        }
    }
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            flake8_bin: "flake8".to_string(),
            radon_bin: "radon".to_string(),
            black_bin: "black".to_string(),
            eslint_bin: "eslint".to_string(),
            prettier_bin: "prettier".to_string(),
            cpplint_bin: "cpplint".to_string(),
            lizard_bin: "lizard".to_string(),
            eslint_config: "eslint.config.mjs".to_string(),
            timeout_secs: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_server_config() {
        let server = ServerConfig::default();
        assert_eq!(server.port, 8080);
        assert_eq!(server.host, "0.0.0.0");
    }

    #[test]
    fn test_default_ai_config() {
        let ai = AiConfig::default();
        assert!(ai.api_key.is_none());
        assert_eq!(ai.base_url, DEFAULT_COMPLETIONS_URL);
        assert_eq!(ai.model, DEFAULT_MODEL);
        assert_eq!(ai.timeout_secs, 120);
    }

    #[test]
    fn test_default_toolchain_config() {
        let tools = ToolchainConfig::default();
        assert_eq!(tools.flake8_bin, "flake8");
        assert_eq!(tools.eslint_config, "eslint.config.mjs");
        assert_eq!(tools.timeout_secs, 60);
    }
}
