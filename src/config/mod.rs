use std::env;
use std::fmt;

/// Which store backend the core runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// In-process store, for tests and demo deployments.
    Memory,
    /// Degraded mode when no store is configured: reads empty, writes
    /// synthesized locally.
    Offline,
}

/// Top-level configuration for the core.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let backend = match env::var("FLEXPOOL_STORE") {
            Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
                "memory" => StoreBackend::Memory,
                "" | "offline" => StoreBackend::Offline,
                _ => return Err(ConfigError::UnknownStoreBackend { value }),
            },
            Err(_) => StoreBackend::Offline,
        };

        let log_level = env::var("FLEXPOOL_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            store: StoreConfig { backend },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    UnknownStoreBackend { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownStoreBackend { value } => {
                write!(f, "FLEXPOOL_STORE must be 'memory' or 'offline', got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("FLEXPOOL_STORE");
        env::remove_var("FLEXPOOL_LOG_LEVEL");
    }

    #[test]
    fn defaults_to_offline_store_and_info_logging() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.store.backend, StoreBackend::Offline);
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn memory_backend_is_selectable() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("FLEXPOOL_STORE", "Memory");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.store.backend, StoreBackend::Memory);
        reset_env();
    }

    #[test]
    fn unknown_backend_is_rejected() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("FLEXPOOL_STORE", "oracle");
        assert!(AppConfig::load().is_err());
        reset_env();
    }
}
