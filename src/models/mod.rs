pub mod entity;
pub mod reading;
pub mod sensor;

pub use entity::{EntityState, ServiceResponse};
pub use reading::{Reading, Snapshot};
pub use sensor::{Extraction, SensorSpec};
