//! Configuration CLI commands
//!
//! These never touch the network.

use clap::Subcommand;

use crate::config::{Settings, TrackerPaths};
use crate::error::{TrackerError, TrackerResult};

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the config location and current settings
    Show,
    /// Point the client at a different API root
    SetUrl {
        /// Base URL (e.g., "http://localhost:5000/api/v1/")
        url: String,
    },
    /// Change the per-request timeout
    SetTimeout {
        /// Timeout in seconds
        secs: u64,
    },
}

/// Handle a config command
pub fn handle_config_command(
    paths: &TrackerPaths,
    settings: &mut Settings,
    cmd: ConfigCommands,
) -> TrackerResult<()> {
    match cmd {
        ConfigCommands::Show => {
            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Config file:     {}", paths.settings_file().display());
            if !paths.is_initialized() {
                println!("                 (not yet written, showing defaults)");
            }
            println!();
            println!("API base URL:    {}", settings.base_url);
            println!("Timeout:         {}s", settings.request_timeout_secs);
            println!("Currency symbol: {}", settings.currency_symbol);
            println!("Date format:     {}", settings.date_format);
        }

        ConfigCommands::SetUrl { url } => {
            settings.set_base_url(&url)?;
            settings.save(paths)?;
            println!("API base URL set to {}", settings.base_url);
        }

        ConfigCommands::SetTimeout { secs } => {
            if secs == 0 {
                return Err(TrackerError::Validation(
                    "Timeout must be at least one second".into(),
                ));
            }
            settings.request_timeout_secs = secs;
            settings.save(paths)?;
            println!("Request timeout set to {}s", secs);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_url_persists() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut settings = Settings::default();

        handle_config_command(
            &paths,
            &mut settings,
            ConfigCommands::SetUrl {
                url: "http://localhost:5000/api/v1".into(),
            },
        )
        .unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.base_url, "http://localhost:5000/api/v1/");
    }

    #[test]
    fn test_set_url_rejects_garbage_without_saving() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut settings = Settings::default();

        let result = handle_config_command(
            &paths,
            &mut settings,
            ConfigCommands::SetUrl {
                url: "::nope::".into(),
            },
        );

        assert!(matches!(result, Err(TrackerError::InvalidUrl(_))));
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut settings = Settings::default();

        let result =
            handle_config_command(&paths, &mut settings, ConfigCommands::SetTimeout { secs: 0 });
        assert!(result.unwrap_err().is_validation());
    }
}
