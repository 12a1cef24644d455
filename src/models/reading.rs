use chrono::{DateTime, Local};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    pub name: String,
    pub value: String,
    pub unit: String,
    pub extra: Option<String>,
}

impl Reading {
    pub fn new(name: &str, value: &str, unit: &str, extra: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            unit: unit.to_string(),
            extra,
        }
    }

    pub fn formatted_value(&self) -> String {
        format!("{} {}", self.value, self.unit)
    }
}

/// Readings of one poll cycle, in sensor declaration order.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub timestamp: DateTime<Local>,
    pub readings: Vec<Reading>,
}

impl Snapshot {
    pub fn new(timestamp: DateTime<Local>, readings: Vec<Reading>) -> Self {
        Self { timestamp, readings }
    }

    pub fn updated_at_display(&self) -> String {
        format!("Updated at: {}", self.timestamp.format("%H:%M"))
    }
}
