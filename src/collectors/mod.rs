pub(crate) mod collector;
pub mod reader;

pub use collector::{CycleOutcome, SensorFailure};
pub use reader::{read, try_format_numeric, ExtractionError};
