//! Configuration system for kubescribe
//!
//! Layered YAML configuration: built-in defaults, the root config file, then
//! environment overrides.

mod defaults;
pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::Config;

/// Get a configuration value by key (dot notation)
pub fn get_config_value(config: &schema::Config, key: &str) -> anyhow::Result<String> {
    match key {
        "kubectl" => Ok(config.kubectl.clone()),
        "timeouts.defaultSeconds" => Ok(config.timeouts.default_seconds.to_string()),
        "timeouts.logsSeconds" => Ok(config.timeouts.logs_seconds.to_string()),
        "transcript.capacity" => Ok(config.transcript.capacity.to_string()),
        "logs.defaultTail" => Ok(config.logs.default_tail.to_string()),
        _ => Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }
}

/// Set a configuration value by key (dot notation)
pub fn set_config_value(config: &mut schema::Config, key: &str, value: &str) -> anyhow::Result<()> {
    use anyhow::Context;
    match key {
        "kubectl" => {
            config.kubectl = value.to_string();
        }
        "timeouts.defaultSeconds" => {
            config.timeouts.default_seconds = value
                .parse()
                .context("timeouts.defaultSeconds must be a number")?;
        }
        "timeouts.logsSeconds" => {
            config.timeouts.logs_seconds = value
                .parse()
                .context("timeouts.logsSeconds must be a number")?;
        }
        "transcript.capacity" => {
            config.transcript.capacity = value
                .parse()
                .context("transcript.capacity must be a number")?;
        }
        "logs.defaultTail" => {
            config.logs.default_tail = value
                .parse()
                .context("logs.defaultTail must be a number")?;
        }
        _ => return Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_round_trip() {
        let mut config = Config::default();
        set_config_value(&mut config, "timeouts.logsSeconds", "45").unwrap();
        assert_eq!(
            get_config_value(&config, "timeouts.logsSeconds").unwrap(),
            "45"
        );
    }

    #[test]
    fn test_set_rejects_non_numeric() {
        let mut config = Config::default();
        let err = set_config_value(&mut config, "logs.defaultTail", "lots").unwrap_err();
        assert!(err.to_string().contains("logs.defaultTail must be a number"));
    }

    #[test]
    fn test_unknown_key() {
        let config = Config::default();
        assert!(get_config_value(&config, "ui.skin").is_err());
    }
}
