//! In-memory stand-ins for the data source and the display.

use crate::client::{DataSource, DataSourceError, Display};
use crate::models::{EntityState, ServiceResponse};
use crate::renderer::RenderError;
use image::DynamicImage;
use indexmap::IndexMap;
use serde_json::{json, Map, Value};
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Default)]
pub struct FakeSource {
    entities: HashMap<String, EntityState>,
    forecasts: HashMap<String, Value>,
    service_responses: HashMap<String, IndexMap<String, Value>>,
    pub calls: RefCell<Vec<String>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entity(mut self, entity_id: &str, state: &str, attributes: Value) -> Self {
        let attributes: IndexMap<String, Value> = match attributes {
            Value::Object(map) => map.into_iter().collect(),
            _ => IndexMap::new(),
        };
        self.entities.insert(
            entity_id.to_string(),
            EntityState {
                entity_id: entity_id.to_string(),
                state: state.to_string(),
                attributes,
            },
        );
        self
    }

    /// Answer actions on `entity_id` with `service_response` verbatim.
    pub fn with_service_response(mut self, entity_id: &str, service_response: Value) -> Self {
        let service_response = match service_response {
            Value::Object(map) => map.into_iter().collect(),
            _ => IndexMap::new(),
        };
        self.service_responses.insert(entity_id.to_string(), service_response);
        self
    }

    pub fn with_forecast(mut self, entity_id: &str, forecast: Value) -> Self {
        self.forecasts.insert(entity_id.to_string(), forecast);
        self
    }
}

fn not_found(path: &str) -> DataSourceError {
    DataSourceError::Status {
        url: format!("fake://{}", path),
        status: 404,
    }
}

impl DataSource for FakeSource {
    async fn get_entity(&self, entity_id: &str) -> Result<EntityState, DataSourceError> {
        self.calls.borrow_mut().push(format!("get {}", entity_id));
        self.entities
            .get(entity_id)
            .cloned()
            .ok_or_else(|| not_found(&format!("api/states/{}", entity_id)))
    }

    async fn trigger_action_with_response(
        &self,
        domain: &str,
        action: &str,
        entity_id: &str,
        params: &Map<String, Value>,
    ) -> Result<ServiceResponse, DataSourceError> {
        self.calls.borrow_mut().push(format!(
            "{}.{} {} {}",
            domain,
            action,
            entity_id,
            Value::Object(params.clone())
        ));
        if let Some(service_response) = self.service_responses.get(entity_id) {
            return Ok(ServiceResponse {
                changed_states: Vec::new(),
                service_response: service_response.clone(),
            });
        }

        let forecast = self
            .forecasts
            .get(entity_id)
            .ok_or_else(|| not_found(&format!("api/services/{}/{}", domain, action)))?;

        let mut service_response = IndexMap::new();
        service_response.insert(entity_id.to_string(), json!({ "forecast": forecast }));
        Ok(ServiceResponse {
            changed_states: Vec::new(),
            service_response,
        })
    }
}

pub struct FakeDisplay {
    pub width: u32,
    pub height: u32,
    pub image: Option<DynamicImage>,
    pub shown: Vec<bool>,
    pub fail_show: bool,
}

impl FakeDisplay {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            image: None,
            shown: Vec::new(),
            fail_show: false,
        }
    }
}

impl Display for FakeDisplay {
    fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_image(&mut self, image: &DynamicImage) -> Result<(), RenderError> {
        self.image = Some(image.clone());
        Ok(())
    }

    fn show(&mut self, busy_wait: bool) -> Result<(), RenderError> {
        if self.fail_show {
            return Err(RenderError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "panel unplugged",
            )));
        }
        self.shown.push(busy_wait);
        Ok(())
    }
}
