use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Per-file upload bound (10 MiB). Oversized images are rejected at the
/// HTTP boundary, before prompt composition.
const DEFAULT_MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct VerdictConfig {
    pub common: core_config::Config,
    pub anthropic: AnthropicSettings,
    pub uploads: UploadSettings,
}

#[derive(Debug, Clone)]
pub struct AnthropicSettings {
    pub api_key: String,
    pub base_url: String,
    /// Model for the question-generation phase.
    pub analyze_model: String,
    /// Model for the verdict phase.
    pub verdict_model: String,
}

#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub max_image_bytes: usize,
}

impl VerdictConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(VerdictConfig {
            common,
            anthropic: AnthropicSettings {
                api_key: get_env("ANTHROPIC_API_KEY", None, is_prod)?,
                base_url: get_env(
                    "ANTHROPIC_BASE_URL",
                    Some("https://api.anthropic.com"),
                    is_prod,
                )?,
                analyze_model: get_env(
                    "VERDICT_ANALYZE_MODEL",
                    Some("claude-sonnet-4-20250514"),
                    is_prod,
                )?,
                verdict_model: get_env(
                    "VERDICT_VERDICT_MODEL",
                    Some("claude-sonnet-4-20250514"),
                    is_prod,
                )?,
            },
            uploads: UploadSettings {
                max_image_bytes: parse_byte_limit(&get_env(
                    "VERDICT_MAX_IMAGE_BYTES",
                    Some(&DEFAULT_MAX_IMAGE_BYTES.to_string()),
                    is_prod,
                )?)?,
            },
        })
    }
}

fn parse_byte_limit(raw: &str) -> Result<usize, AppError> {
    raw.parse().map_err(|_| {
        AppError::ConfigError(anyhow::anyhow!(
            "VERDICT_MAX_IMAGE_BYTES must be a byte count, got {raw:?}"
        ))
    })
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
