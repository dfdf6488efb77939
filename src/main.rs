mod app_config;

use anyhow::Result;
use app_config::AppConfig;
use fno_analyzer::commands::AnalyzerCommands;
use fno_analyzer::logging;

fn main() -> Result<()> {
    let app_config = AppConfig::from_env();

    if let Err(e) = app_config.validate() {
        eprintln!("{}", e);
        AnalyzerCommands::print_usage();
        std::process::exit(1);
    }

    logging::init_logging(&app_config.log_dir)?;

    let settings = app_config.run_settings()?;

    match app_config.mode.as_str() {
        "batch" => AnalyzerCommands::run_batch(&settings)?,
        "strategies" => AnalyzerCommands::run_strategies(&settings)?,
        _ => AnalyzerCommands::run_single(&settings)?,
    }

    Ok(())
}
