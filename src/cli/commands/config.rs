//! Config command - show or locate configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager};
use crate::error::WaymarkResult;
use std::path::PathBuf;

/// Execute the config command
pub async fn execute(
    args: ConfigArgs,
    config: &Config,
    config_path: Option<&PathBuf>,
) -> WaymarkResult<()> {
    match args.action {
        ConfigAction::Show => {
            println!("{}", toml::to_string_pretty(config)?);
            Ok(())
        }
        ConfigAction::Path => {
            let path = config_path
                .cloned()
                .unwrap_or_else(ConfigManager::default_config_path);
            println!("{}", path.display());
            Ok(())
        }
    }
}
