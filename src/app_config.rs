use fno_analyzer::commands::RunSettings;
use fno_analyzer::config;
use anyhow::{anyhow, Context, Result};
use chrono::{Local, NaiveDate};
use std::path::PathBuf;

/// Application configuration handler
pub struct AppConfig {
    pub mode: String,
    pub input: String,
    pub output: String,
    pub lot_size: Option<f64>,
    pub condor_width: f64,
    pub log_dir: String,
    pub as_of: Option<String>,
}

impl AppConfig {
    /// Create new configuration from environment variables
    pub fn from_env() -> Self {
        let mode = config::get_execution_mode();
        Self {
            input: config::get_input_path(&mode),
            output: config::get_output_path(&mode),
            lot_size: config::get_lot_size(),
            condor_width: config::get_condor_width(),
            log_dir: config::get_log_dir(),
            as_of: config::get_as_of(),
            mode,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.mode.as_str(), "single" | "batch" | "strategies") {
            return Err(anyhow!("Invalid mode '{}'. Use 'single', 'batch', or 'strategies'", self.mode));
        }
        if !self.condor_width.is_finite() {
            return Err(anyhow!("FNO_CONDOR_WIDTH must be a number"));
        }
        self.reference_date()?;
        Ok(())
    }

    /// Reference date for days-to-expiry, today unless FNO_AS_OF is set
    pub fn reference_date(&self) -> Result<NaiveDate> {
        match &self.as_of {
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .with_context(|| format!("FNO_AS_OF '{}' is not YYYY-MM-DD", raw)),
            None => Ok(Local::now().date_naive()),
        }
    }

    pub fn run_settings(&self) -> Result<RunSettings> {
        Ok(RunSettings {
            input: PathBuf::from(&self.input),
            output: PathBuf::from(&self.output),
            lot_size: self.lot_size,
            condor_width: self.condor_width,
            as_of: self.reference_date()?,
        })
    }
}
