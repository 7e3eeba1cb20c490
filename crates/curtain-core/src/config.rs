use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so only malformed values fail.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_decimal = |var: &str, default: &str| -> Result<Decimal, ConfigError> {
        let raw = or_default(var, default);
        Decimal::from_str(raw.trim()).map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("CURTAIN_ENV", "development"))?;
    let log_level = or_default("CURTAIN_LOG_LEVEL", "info");
    let catalog_path = PathBuf::from(or_default("CURTAIN_CATALOG_PATH", "./config/catalog.json"));

    let installation_fee = parse_decimal("CURTAIN_INSTALLATION_FEE", "0")?;
    if installation_fee < Decimal::ZERO {
        return Err(ConfigError::InvalidEnvVar {
            var: "CURTAIN_INSTALLATION_FEE".to_string(),
            reason: "must not be negative".to_string(),
        });
    }

    let rounding_step = parse_decimal("CURTAIN_ROUNDING_STEP", "1000")?;
    if rounding_step <= Decimal::ZERO {
        return Err(ConfigError::InvalidEnvVar {
            var: "CURTAIN_ROUNDING_STEP".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    let currency_symbol = or_default("CURTAIN_CURRENCY_SYMBOL", "$");

    Ok(AppConfig {
        env,
        log_level,
        catalog_path,
        installation_fee,
        rounding_step,
        currency_symbol,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "CURTAIN_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
