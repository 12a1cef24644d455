use env_logger::{Builder, WriteStyle};
use hadisplay::config::{AppConfig, DEFAULT_CONFIG_FILE};
use log::{error, LevelFilter};

fn init_logger(level: LevelFilter) {
    Builder::new()
        .filter_level(level)
        .write_style(WriteStyle::Always)
        .format_timestamp_secs()
        .init();
}

fn log_error_chain(e: &anyhow::Error) {
    error!("Application error: {e:#}");
    // Print chain of error causes
    let mut source = e.source();
    while let Some(e) = source {
        error!("Caused by: {e}");
        source = e.source();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());

    // Logger level comes from the config, so load it first
    let config = match AppConfig::from_file(&config_path) {
        Ok(config) => config,
        Err(e) => {
            init_logger(LevelFilter::Info);
            log_error_chain(&e);
            return Err(e);
        }
    };

    init_logger(config.get_log_level());

    if let Err(e) = hadisplay::run(config).await {
        log_error_chain(&e);
        return Err(e);
    }
    Ok(())
}
