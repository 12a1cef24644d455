use crate::config::SensorEntry;

/// How the displayed value is pulled out of an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// Entity state plus its `unit_of_measurement` attribute.
    Direct,
    /// One attribute of the `index`-th entry in the daily forecast.
    Forecast { attribute: String, index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorSpec {
    pub id: String,
    pub display_name: String,
    pub extraction: Extraction,
    pub decimals: Option<u32>,
}

impl SensorSpec {
    pub fn direct(id: &str, display_name: &str) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            extraction: Extraction::Direct,
            decimals: None,
        }
    }

    pub fn forecast(id: &str, display_name: &str, attribute: &str, index: usize) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            extraction: Extraction::Forecast {
                attribute: attribute.to_string(),
                index,
            },
            decimals: None,
        }
    }

    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = Some(decimals);
        self
    }
}

impl From<&SensorEntry> for SensorSpec {
    fn from(entry: &SensorEntry) -> Self {
        let options = entry.config.clone().unwrap_or_default();
        let extraction = match options.forecast {
            Some(forecast) => Extraction::Forecast {
                attribute: forecast.attribute,
                index: forecast.index,
            },
            None => Extraction::Direct,
        };

        Self {
            id: entry.entity_id.clone(),
            display_name: entry.name.clone(),
            extraction,
            decimals: options.decimals,
        }
    }
}
