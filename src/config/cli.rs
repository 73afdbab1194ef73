use super::toml_config::TomlConfig;
use super::SchedulerConfig;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "hospital-dispatch")]
#[command(about = "Emergency/regular patient queues with a shared pool of doctors")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Doctors on duty at start (overrides the config file)
    #[arg(long)]
    pub initial_units: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    /// 載入配置檔 (如果有指定)
    pub fn load_file(&self) -> Result<Option<TomlConfig>> {
        match &self.config {
            Some(path) => {
                validate_path("config", path)?;
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                Ok(Some(file))
            }
            None => Ok(None),
        }
    }

    /// Command line values win over the file, the file wins over defaults.
    pub fn resolve(&self, file: Option<&TomlConfig>) -> SchedulerConfig {
        let base = file.map(|f| f.scheduler.clone()).unwrap_or_default();

        match self.initial_units {
            Some(units) => base.with_initial_units(units),
            None => base,
        }
    }
}
