use crate::client::DataSource;
use crate::collectors::reader::{self, ExtractionError};
use crate::models::{SensorSpec, Snapshot};
use chrono::Local;
use log::{debug, error};
use std::error::Error;
use std::time::Instant;

#[derive(Debug)]
pub struct SensorFailure {
    pub sensor: String,
    pub entity_id: String,
    pub error: ExtractionError,
}

#[derive(Debug)]
pub struct CycleOutcome {
    pub snapshot: Snapshot,
    pub failures: Vec<SensorFailure>,
}

/// `err` followed by each of its causes, separated by `: `.
pub(crate) fn error_chain(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Read every sensor in order. A failing sensor is logged and left out of
/// the snapshot; the rest of the batch carries on.
pub(crate) async fn collect_snapshot<D: DataSource>(sensors: &[SensorSpec], source: &D) -> CycleOutcome {
    let start = Instant::now();
    let mut readings = Vec::with_capacity(sensors.len());
    let mut failures = Vec::new();

    for spec in sensors {
        match reader::read(spec, source).await {
            Ok(reading) => readings.push(reading),
            Err(e) => {
                error!(
                    "Update error for {} ({}): {}",
                    spec.display_name,
                    spec.id,
                    error_chain(&e)
                );
                failures.push(SensorFailure {
                    sensor: spec.display_name.clone(),
                    entity_id: spec.id.clone(),
                    error: e,
                });
            }
        }
    }

    let snapshot = Snapshot::new(Local::now(), readings);
    debug!(
        "collect_snapshot: {} ok, {} failed, took: {} ms",
        snapshot.readings.len(),
        failures.len(),
        start.elapsed().as_millis()
    );

    CycleOutcome { snapshot, failures }
}
