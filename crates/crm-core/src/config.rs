//! Configuration types and loading
//!
//! Values come from the environment (optionally seeded by a `.env` file in the
//! binary). Every section has a usable default so the library runs unconfigured.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::types::DEFAULT_COMMISSION_RATE;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// Durable storage for the quotation-module catalog
    pub storage: StorageConfig,

    /// Generative-language advisor
    pub advisor: AdvisorConfig,

    /// Access policy and business rules
    pub policy: PolicyConfig,

    /// Instance-specific settings
    pub instance: InstanceConfig,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    Memory,
    File,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Directory holding one JSON document per key (file backend)
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            data_dir: PathBuf::from(".crm-data"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdvisorConfig {
    /// API key; the advisor is disabled when absent
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub endpoint: String,
    pub text_model: String,
    pub image_model: String,
    pub request_timeout_seconds: u64,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            text_model: "gemini-1.5-flash".to_string(),
            image_model: "gemini-2.0-flash-exp".to_string(),
            request_timeout_seconds: 30,
        }
    }
}

impl AdvisorConfig {
    pub fn is_enabled(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

/// Which route-guard table is authoritative
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RouteGuardMode {
    /// A route is reachable iff its navigation entry is visible
    #[default]
    Navigation,
    /// The narrower per-route checks observed in the legacy dashboard
    Legacy,
}

/// Longest accepted follow-up horizon
pub const MAX_FOLLOW_UP_HORIZON_DAYS: i64 = 365;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PolicyConfig {
    /// Commission rate (percent) given to promoted candidates
    pub default_commission_rate: f64,
    pub route_guard: RouteGuardMode,
    /// Days ahead of today that count as an approaching follow-up
    pub follow_up_horizon_days: i64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            default_commission_rate: DEFAULT_COMMISSION_RATE,
            route_guard: RouteGuardMode::Navigation,
            follow_up_horizon_days: 2,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InstanceConfig {
    pub app_title: String,
    /// Currency symbol used when rendering amounts
    pub currency: String,
}

impl Default for InstanceConfig {
    fn default() -> Self {
        Self {
            app_title: "Agency CRM".to_string(),
            currency: "₹".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

impl ConfigError {
    fn invalid(key: &str, message: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        // Storage
        if let Some(backend) = lookup("CRM_STORAGE_BACKEND") {
            config.storage.backend = match backend.to_ascii_lowercase().as_str() {
                "memory" => StorageBackend::Memory,
                "file" => StorageBackend::File,
                other => {
                    return Err(ConfigError::invalid(
                        "CRM_STORAGE_BACKEND",
                        format!("unknown backend '{}'", other),
                    ))
                }
            };
        }
        if let Some(dir) = lookup("CRM_DATA_DIR") {
            config.storage.data_dir = PathBuf::from(dir);
        }

        // Advisor
        config.advisor.api_key = lookup("CRM_ADVISOR_API_KEY").or_else(|| lookup("GEMINI_API_KEY"));
        if let Some(endpoint) = lookup("CRM_ADVISOR_ENDPOINT") {
            config.advisor.endpoint = endpoint.trim_end_matches('/').to_string();
        }
        if let Some(model) = lookup("CRM_ADVISOR_MODEL") {
            config.advisor.text_model = model;
        }
        if let Some(model) = lookup("CRM_ADVISOR_IMAGE_MODEL") {
            config.advisor.image_model = model;
        }
        if let Some(timeout) = lookup("CRM_ADVISOR_TIMEOUT_SECONDS") {
            config.advisor.request_timeout_seconds = timeout
                .parse()
                .map_err(|_| ConfigError::invalid("CRM_ADVISOR_TIMEOUT_SECONDS", "expected seconds"))?;
        }

        // Policy
        if let Some(rate) = lookup("CRM_DEFAULT_COMMISSION_RATE") {
            let rate: f64 = rate
                .parse()
                .map_err(|_| ConfigError::invalid("CRM_DEFAULT_COMMISSION_RATE", "expected a number"))?;
            if !(0.0..=100.0).contains(&rate) {
                return Err(ConfigError::invalid(
                    "CRM_DEFAULT_COMMISSION_RATE",
                    "must be between 0 and 100",
                ));
            }
            config.policy.default_commission_rate = rate;
        }
        if let Some(mode) = lookup("CRM_ROUTE_GUARD") {
            config.policy.route_guard = match mode.to_ascii_lowercase().as_str() {
                "navigation" => RouteGuardMode::Navigation,
                "legacy" => RouteGuardMode::Legacy,
                other => {
                    return Err(ConfigError::invalid(
                        "CRM_ROUTE_GUARD",
                        format!("unknown mode '{}'", other),
                    ))
                }
            };
        }
        if let Some(days) = lookup("CRM_FOLLOW_UP_HORIZON_DAYS") {
            let days: i64 = days
                .parse()
                .map_err(|_| ConfigError::invalid("CRM_FOLLOW_UP_HORIZON_DAYS", "expected days"))?;
            if !(0..=MAX_FOLLOW_UP_HORIZON_DAYS).contains(&days) {
                return Err(ConfigError::invalid(
                    "CRM_FOLLOW_UP_HORIZON_DAYS",
                    format!("must be between 0 and {}", MAX_FOLLOW_UP_HORIZON_DAYS),
                ));
            }
            config.policy.follow_up_horizon_days = days;
        }

        // Instance
        if let Some(title) = lookup("CRM_APP_TITLE") {
            config.instance.app_title = title;
        }
        if let Some(currency) = lookup("CRM_CURRENCY") {
            config.instance.currency = currency;
        }

        Ok(config)
    }
}
