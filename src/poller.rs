use crate::client::{DataSource, Display};
use crate::collectors::collector::{self, error_chain, CycleOutcome};
use crate::models::SensorSpec;
use crate::renderer::{CanvasRenderer, ConsoleRenderer};
use log::{debug, error};
use std::io::Write;
use std::time::Duration;

/// Read all sensors, render the snapshot, sleep, repeat.
pub struct PollingLoop<D: DataSource, P: Display, W: Write> {
    sensors: Vec<SensorSpec>,
    source: D,
    console: ConsoleRenderer<W>,
    canvas: CanvasRenderer<P>,
    interval: Duration,
}

impl<D: DataSource, P: Display, W: Write> PollingLoop<D, P, W> {
    pub fn new(
        sensors: Vec<SensorSpec>,
        source: D,
        console: ConsoleRenderer<W>,
        canvas: CanvasRenderer<P>,
        interval: Duration,
    ) -> Self {
        Self {
            sensors,
            source,
            console,
            canvas,
            interval,
        }
    }

    pub fn console(&self) -> &ConsoleRenderer<W> {
        &self.console
    }

    pub fn canvas(&self) -> &CanvasRenderer<P> {
        &self.canvas
    }

    /// One poll cycle. Sensor and sink failures are logged, never returned.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let outcome = collector::collect_snapshot(&self.sensors, &self.source).await;

        if let Err(e) = self.console.render(&outcome.snapshot) {
            error!("Failed to write readings to console: {}", e);
        }
        if let Err(e) = self.canvas.render(&outcome.snapshot) {
            error!("Failed to update display: {}", error_chain(&e));
        }

        outcome
    }

    /// Polls until the surrounding task is dropped. The interval is the gap
    /// between the end of one cycle and the start of the next.
    pub async fn run(&mut self) {
        loop {
            self.run_cycle().await;
            debug!("Sleeping for {:?}", self.interval);
            tokio::time::sleep(self.interval).await;
        }
    }
}
