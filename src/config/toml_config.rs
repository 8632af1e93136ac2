use crate::core::query::DEFAULT_PRICE_CEILING;
use crate::utils::error::{MarketError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_range,
    validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageSettings,
    pub marketplace: MarketplaceSettings,
    pub auth: AuthSettings,
    pub assistant: AssistantSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub path: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            path: "./.kaamkhoj".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketplaceSettings {
    pub default_price_ceiling: u64,
    pub prefers_dark: bool,
}

impl Default for MarketplaceSettings {
    fn default() -> Self {
        Self {
            default_price_ceiling: DEFAULT_PRICE_CEILING,
            prefers_dark: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    pub simulated_delay_ms: u64,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            simulated_delay_ms: 1500,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantSettings {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-3-flash-preview".to_string(),
            api_key: None,
            timeout_seconds: 30,
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MarketError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 檔案不存在時使用預設值
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            tracing::debug!(
                "Config file {} not found, using defaults",
                path.as_ref().display()
            );
            Ok(Self::default())
        }
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| MarketError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GEMINI_API_KEY})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| MarketError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 設定檔的 key 優先，其次是環境變數；未替換的佔位符視為未設定
    pub fn api_key(&self) -> Option<String> {
        self.assistant
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty() && !key.starts_with("${"))
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_path("storage.path", &self.storage.path)?;
        validate_positive_number(
            "marketplace.default_price_ceiling",
            self.marketplace.default_price_ceiling,
            1,
        )?;
        validate_url("assistant.endpoint", &self.assistant.endpoint)?;
        validate_non_empty_string("assistant.model", &self.assistant.model)?;
        validate_range(
            "assistant.timeout_seconds",
            self.assistant.timeout_seconds,
            1,
            300,
        )?;
        validate_range("auth.simulated_delay_ms", self.auth.simulated_delay_ms, 0, 10_000)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.marketplace.default_price_ceiling, 100_000);
        assert_eq!(config.auth.simulated_delay_ms, 1500);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
[marketplace]
default_price_ceiling = 20000

[assistant]
model = "gemini-2.5-flash"
"#,
        )
        .unwrap();

        assert_eq!(config.marketplace.default_price_ceiling, 20_000);
        assert_eq!(config.assistant.model, "gemini-2.5-flash");
        assert_eq!(config.assistant.timeout_seconds, 30);
        assert_eq!(config.storage.path, "./.kaamkhoj");
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("KAAMKHOJ_TEST_STORAGE_DIR", "/tmp/kk-test");
        let config = AppConfig::from_toml_str(
            r#"
[storage]
path = "${KAAMKHOJ_TEST_STORAGE_DIR}/state"
"#,
        )
        .unwrap();
        assert_eq!(config.storage.path, "/tmp/kk-test/state");
    }

    // GEMINI_API_KEY 只在這個測試裡修改，避免平行測試互相干擾
    #[test]
    fn test_api_key_resolution() {
        std::env::remove_var(API_KEY_ENV);

        let config = AppConfig::from_toml_str(
            r#"
[assistant]
api_key = "${KAAMKHOJ_TEST_UNSET_VARIABLE}"
"#,
        )
        .unwrap();
        assert_eq!(
            config.assistant.api_key.as_deref(),
            Some("${KAAMKHOJ_TEST_UNSET_VARIABLE}")
        );
        assert!(config.api_key().is_none());

        // 未替換的佔位符改用環境變數
        std::env::set_var(API_KEY_ENV, "env-key");
        assert_eq!(config.api_key().as_deref(), Some("env-key"));

        // 設定檔的 key 優先
        let explicit = AppConfig::from_toml_str("[assistant]\napi_key = \"file-key\"").unwrap();
        assert_eq!(explicit.api_key().as_deref(), Some("file-key"));

        std::env::set_var(API_KEY_ENV, "   ");
        assert!(AppConfig::default().api_key().is_none());

        std::env::remove_var(API_KEY_ENV);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = AppConfig::default();
        config.assistant.endpoint = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.marketplace.default_price_ceiling = 0;
        assert!(config.validate().is_err());

        assert!(AppConfig::from_toml_str("[auth]\nsimulated_delay_ms = \"soon\"").is_err());
    }
}
