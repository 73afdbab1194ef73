use anyhow::Context;
use clap::Parser;
use hospital_dispatch::utils::logger;
use hospital_dispatch::{CliConfig, HospitalScheduler, Menu, SharedScheduler};
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入配置檔
    let file_config = match cli.load_file() {
        Ok(file_config) => file_config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    let verbose = cli.verbose || file_config.as_ref().is_some_and(|f| f.verbose());
    let json_logs = cli.json_logs || file_config.as_ref().is_some_and(|f| f.json_logs());
    let filter = file_config.as_ref().and_then(|f| f.log_filter());
    if json_logs {
        logger::init_json_logger(verbose, filter);
    } else {
        logger::init_cli_logger(verbose, filter);
    }

    let config = cli.resolve(file_config.as_ref());
    tracing::info!(initial_units = config.initial_units, "Starting hospital-dispatch");
    if verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let scheduler = SharedScheduler::new(HospitalScheduler::new(&config));
    let mut menu = Menu::new(
        scheduler,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    );

    menu.run().await.context("menu session failed")?;

    tracing::info!(assigned = menu.history().len(), "Session finished");
    Ok(())
}
