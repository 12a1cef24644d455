pub mod client;
pub mod collectors;
pub mod config;
pub mod models;
pub mod poller;
pub mod renderer;

#[cfg(test)]
pub(crate) mod testing;

use crate::client::{HomeAssistantClient, PngPanel};
use crate::collectors::collector::error_chain;
use crate::config::AppConfig;
use crate::models::SensorSpec;
use crate::poller::PollingLoop;
use crate::renderer::{CanvasRenderer, ConsoleRenderer, RenderStyle};
use anyhow::Context;
use log::{error, info, warn};

fn build_canvas(config: &AppConfig) -> CanvasRenderer<PngPanel> {
    if !config.panel.enabled {
        info!("No display configured");
        return CanvasRenderer::disabled();
    }

    match RenderStyle::from_config(&config.style) {
        Ok(style) => {
            let panel = PngPanel::new(&config.panel.file, config.panel.width, config.panel.height);
            CanvasRenderer::new(panel, style)
        }
        Err(e) => {
            error!(
                "Display disabled, failed to load render style: {}",
                error_chain(&e)
            );
            CanvasRenderer::disabled()
        }
    }
}

pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    info!("Starting Home Assistant display");
    info!("Loaded config: {}", config.summary());

    let source = HomeAssistantClient::new(&config.homeassistant)
        .context("Failed to create Home Assistant client")?;

    let sensors: Vec<SensorSpec> = config.display.iter().map(SensorSpec::from).collect();
    if sensors.is_empty() {
        warn!("No sensors configured, only the timestamp will be shown");
    }

    let mut poller = PollingLoop::new(
        sensors,
        source,
        ConsoleRenderer::stdout(),
        build_canvas(&config),
        config.update_interval(),
    );

    tokio::select! {
        _ = poller.run() => {}
        result = tokio::signal::ctrl_c() => {
            result.context("Failed to listen for shutdown signal")?;
            info!("Shutting down");
        }
    }

    Ok(())
}
