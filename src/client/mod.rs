pub mod homeassistant;
pub mod panel;

pub use homeassistant::{DataSource, DataSourceError, HomeAssistantClient};
pub use panel::{Display, PngPanel};
