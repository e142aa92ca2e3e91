use crate::migrate::FailurePolicy;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub init_on_start: bool,
    pub failure_policy: FailurePolicy,
    pub max_attempts: u32,
    pub request_timeout_ms: Option<u64>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let supabase_url = required(&env_map, "SUPABASE_URL")?
            .trim_end_matches('/')
            .to_string();
        let supabase_anon_key = required(&env_map, "SUPABASE_ANON_KEY")?.to_string();

        let init_on_start = match env_map
            .get("INIT_ON_START")
            .map(|s| s.as_str())
            .unwrap_or("true")
        {
            "true" | "1" => true,
            "false" | "0" => false,
            other => {
                return Err(ConfigError::InvalidValue(
                    "INIT_ON_START".to_string(),
                    format!("must be true or false, got {}", other),
                ))
            }
        };

        let failure_policy = match env_map
            .get("MIGRATION_FAILURE_POLICY")
            .map(|s| s.as_str())
            .unwrap_or("continue")
        {
            "continue" => FailurePolicy::Continue,
            "abort" => FailurePolicy::Abort,
            other => {
                return Err(ConfigError::InvalidValue(
                    "MIGRATION_FAILURE_POLICY".to_string(),
                    format!("must be continue or abort, got {}", other),
                ))
            }
        };

        let max_attempts = env_map
            .get("MIGRATION_MAX_ATTEMPTS")
            .map(|s| s.as_str())
            .unwrap_or("1")
            .parse::<u32>()
            .ok()
            .filter(|n| *n >= 1)
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "MIGRATION_MAX_ATTEMPTS".to_string(),
                    "must be an integer >= 1".to_string(),
                )
            })?;

        let request_timeout_ms = env_map
            .get("REQUEST_TIMEOUT_MS")
            .map(|s| {
                s.parse::<u64>().map_err(|_| {
                    ConfigError::InvalidValue(
                        "REQUEST_TIMEOUT_MS".to_string(),
                        "must be a valid u64".to_string(),
                    )
                })
            })
            .transpose()?;

        Ok(Config {
            port,
            supabase_url,
            supabase_anon_key,
            init_on_start,
            failure_policy,
            max_attempts,
            request_timeout_ms,
        })
    }
}

fn required<'a>(env_map: &'a HashMap<String, String>, key: &str) -> Result<&'a str, ConfigError> {
    env_map
        .get(key)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ConfigError::MissingEnv(key.to_string()))
}
