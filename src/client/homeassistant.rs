use crate::config::HomeAssistantConfig;
use crate::models::{EntityState, ServiceResponse};
use log::debug;
use reqwest::Client;
use serde_json::{Map, Value};
use std::time::{Duration, Instant};
use thiserror::Error;

/// # Home Assistant REST API
///
/// Only two endpoints are used, both authenticated with a long-lived access
/// token sent as `Authorization: Bearer <token>`:
///
/// | Method | Path                                              | Body                              |
/// |--------|---------------------------------------------------|-----------------------------------|
/// | GET    | `/api/states/<entity_id>`                         | none                              |
/// | POST   | `/api/services/<domain>/<action>?return_response` | `{"entity_id": ..., <params>...}` |
///
/// The state endpoint answers with `{"entity_id", "state", "attributes", ...}`.
/// The service endpoint answers with `{"changed_states": [...], "service_response": {...}}`,
/// where `service_response` is keyed by entity id. For `weather.get_forecasts`
/// each entry holds a `forecast` array of objects carrying a `datetime` field
/// plus one field per forecast attribute.

#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },
}

/// Request/response access to remote entity state.
#[allow(async_fn_in_trait)]
pub trait DataSource {
    async fn get_entity(&self, entity_id: &str) -> Result<EntityState, DataSourceError>;

    async fn trigger_action_with_response(
        &self,
        domain: &str,
        action: &str,
        entity_id: &str,
        params: &Map<String, Value>,
    ) -> Result<ServiceResponse, DataSourceError>;
}

pub struct HomeAssistantClient {
    http: Client,
    base_url: String,
    access_token: String,
}

impl HomeAssistantClient {
    pub fn new(config: &HomeAssistantConfig) -> Result<Self, DataSourceError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_sec))
            .build()?;

        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
        })
    }

    fn state_url(&self, entity_id: &str) -> String {
        format!("{}/api/states/{}", self.base_url, entity_id)
    }

    fn service_url(&self, domain: &str, action: &str) -> String {
        format!(
            "{}/api/services/{}/{}?return_response",
            self.base_url, domain, action
        )
    }
}

fn service_body(entity_id: &str, params: &Map<String, Value>) -> Value {
    let mut body = params.clone();
    body.insert("entity_id".to_string(), Value::String(entity_id.to_string()));
    Value::Object(body)
}

impl DataSource for HomeAssistantClient {
    async fn get_entity(&self, entity_id: &str) -> Result<EntityState, DataSourceError> {
        let start = Instant::now();
        let url = self.state_url(entity_id);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DataSourceError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let entity = response.json::<EntityState>().await?;
        debug!("get_entity {} took: {} ms", entity_id, start.elapsed().as_millis());
        Ok(entity)
    }

    async fn trigger_action_with_response(
        &self,
        domain: &str,
        action: &str,
        entity_id: &str,
        params: &Map<String, Value>,
    ) -> Result<ServiceResponse, DataSourceError> {
        let start = Instant::now();
        let url = self.service_url(domain, action);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&service_body(entity_id, params))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DataSourceError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.json::<ServiceResponse>().await?;
        debug!(
            "{}.{} for {} took: {} ms",
            domain,
            action,
            entity_id,
            start.elapsed().as_millis()
        );
        Ok(body)
    }
}
