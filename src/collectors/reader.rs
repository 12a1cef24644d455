use crate::client::{DataSource, DataSourceError};
use crate::models::entity::value_text;
use crate::models::{Extraction, Reading, SensorSpec};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde_json::{Map, Value};
use thiserror::Error;

const UNIT_ATTRIBUTE: &str = "unit_of_measurement";
const FORECAST_DOMAIN: &str = "weather";
const FORECAST_ACTION: &str = "get_forecasts";
const FORECAST_TYPE: &str = "daily";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error(transparent)]
    DataSource(#[from] DataSourceError),

    #[error("attribute `{attribute}` missing on {entity_id}")]
    MissingAttribute { entity_id: String, attribute: String },

    #[error("forecast index {index} out of range, {len} entries available")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

fn missing(entity_id: &str, attribute: &str) -> ExtractionError {
    ExtractionError::MissingAttribute {
        entity_id: entity_id.to_string(),
        attribute: attribute.to_string(),
    }
}

/// Reformat `value` with `decimals` fractional digits if it parses as a
/// finite number; anything else comes back unchanged.
pub fn try_format_numeric(value: &str, decimals: u32) -> String {
    match value.trim().parse::<f64>() {
        Ok(number) if number.is_finite() => format!("{:.*}", decimals as usize, number),
        _ => value.to_string(),
    }
}

/// Forecast timestamp as local `YYYY-MM-DD HH:MM`.
///
/// Timestamps without an offset are taken to be local already.
pub fn format_forecast_time(raw: &str) -> Result<String, ExtractionError> {
    let local = match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => parsed.with_timezone(&Local),
        Err(_) => {
            let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
                .map_err(|e| {
                    ExtractionError::MalformedResponse(format!("bad forecast datetime {:?}: {}", raw, e))
                })?;
            Local.from_local_datetime(&naive).earliest().ok_or_else(|| {
                ExtractionError::MalformedResponse(format!("forecast datetime {:?} does not exist locally", raw))
            })?
        }
    };
    Ok(local.format("%Y-%m-%d %H:%M").to_string())
}

pub async fn read<D: DataSource>(spec: &SensorSpec, source: &D) -> Result<Reading, ExtractionError> {
    // Always fetched: forecast units live on the entity, not in the forecast.
    let entity = source.get_entity(&spec.id).await?;

    let (value, unit, extra) = match &spec.extraction {
        Extraction::Forecast { attribute, index } => {
            let unit_key = format!("{}_unit", attribute);
            let unit = entity
                .attribute_text(&unit_key)
                .ok_or_else(|| missing(&spec.id, &unit_key))?;

            let mut params = Map::new();
            params.insert("type".to_string(), Value::String(FORECAST_TYPE.to_string()));
            let response = source
                .trigger_action_with_response(FORECAST_DOMAIN, FORECAST_ACTION, &spec.id, &params)
                .await?;

            let series = response
                .service_response
                .get(&spec.id)
                .and_then(|entry| entry.get("forecast"))
                .and_then(Value::as_array)
                .ok_or_else(|| {
                    ExtractionError::MalformedResponse(format!("no forecast list for {}", spec.id))
                })?;

            let forecast = series.get(*index).ok_or(ExtractionError::IndexOutOfRange {
                index: *index,
                len: series.len(),
            })?;

            let value = forecast
                .get(attribute)
                .and_then(value_text)
                .ok_or_else(|| missing(&spec.id, attribute))?;
            let datetime = forecast
                .get("datetime")
                .and_then(Value::as_str)
                .ok_or_else(|| missing(&spec.id, "datetime"))?;

            (value, unit, Some(format_forecast_time(datetime)?))
        }
        Extraction::Direct => {
            let unit = entity
                .attribute_text(UNIT_ATTRIBUTE)
                .ok_or_else(|| missing(&spec.id, UNIT_ATTRIBUTE))?;
            (entity.state.clone(), unit, None)
        }
    };

    let value = match spec.decimals {
        Some(decimals) => try_format_numeric(&value, decimals),
        None => value,
    };

    Ok(Reading::new(&spec.display_name, &value, &unit, extra))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeSource;
    use serde_json::json;

    fn weather_source() -> FakeSource {
        FakeSource::new()
            .with_entity(
                "weather.home",
                "sunny",
                json!({"temperature": 17, "temperature_unit": "°C", "wind_speed_unit": "km/h"}),
            )
            .with_forecast(
                "weather.home",
                json!([
                    {"datetime": "2024-03-10T11:00:00", "temperature": 18.27, "condition": "sunny"},
                    {"datetime": "2024-03-11T11:00:00", "temperature": 12.5, "condition": "rainy"}
                ]),
            )
    }

    #[test]
    fn test_try_format_numeric() {
        assert_eq!(try_format_numeric("3.14159", 2), "3.14");
        assert_eq!(try_format_numeric("21", 1), "21.0");
        assert_eq!(try_format_numeric("2.6", 0), "3");
        assert_eq!(try_format_numeric(" 48.04 ", 1), "48.0");
        assert_eq!(try_format_numeric("unavailable", 2), "unavailable");
        assert_eq!(try_format_numeric("", 2), "");
    }

    #[test]
    fn test_try_format_numeric_keeps_non_finite_text() {
        assert_eq!(try_format_numeric("nan", 2), "nan");
        assert_eq!(try_format_numeric("inf", 1), "inf");
        assert_eq!(try_format_numeric("-Infinity", 0), "-Infinity");
    }

    #[test]
    fn test_format_forecast_time_naive_is_local() {
        assert_eq!(format_forecast_time("2024-03-10T11:00:00").unwrap(), "2024-03-10 11:00");
    }

    #[test]
    fn test_format_forecast_time_with_offset() {
        let raw = "2024-03-10T11:00:00+00:00";
        let expected = DateTime::parse_from_rfc3339(raw)
            .unwrap()
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string();
        assert_eq!(format_forecast_time(raw).unwrap(), expected);
    }

    #[test]
    fn test_format_forecast_time_rejects_garbage() {
        assert!(matches!(
            format_forecast_time("tomorrow"),
            Err(ExtractionError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_direct_reading() {
        let source = FakeSource::new().with_entity(
            "sensor.outside",
            "21.5",
            json!({"unit_of_measurement": "°C", "device_class": "temperature"}),
        );
        let spec = SensorSpec::direct("sensor.outside", "Temperature");

        let reading = read(&spec, &source).await.unwrap();
        assert_eq!(reading, Reading::new("Temperature", "21.5", "°C", None));
    }

    #[tokio::test]
    async fn test_direct_reading_without_unit() {
        let source = FakeSource::new().with_entity("binary_sensor.door", "off", json!({}));
        let spec = SensorSpec::direct("binary_sensor.door", "Door");

        let err = read(&spec, &source).await.unwrap_err();
        match err {
            ExtractionError::MissingAttribute { entity_id, attribute } => {
                assert_eq!(entity_id, "binary_sensor.door");
                assert_eq!(attribute, "unit_of_measurement");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_direct_reading_rounds_and_passes_through() {
        let source = FakeSource::new()
            .with_entity("sensor.pi", "3.14159", json!({"unit_of_measurement": "rad"}))
            .with_entity("sensor.down", "unavailable", json!({"unit_of_measurement": "W"}));

        let pi = read(&SensorSpec::direct("sensor.pi", "Pi").with_decimals(2), &source)
            .await
            .unwrap();
        assert_eq!(pi.value, "3.14");

        let down = read(&SensorSpec::direct("sensor.down", "Power").with_decimals(2), &source)
            .await
            .unwrap();
        assert_eq!(down.value, "unavailable");
    }

    #[tokio::test]
    async fn test_unknown_entity_is_data_source_error() {
        let source = FakeSource::new();
        let err = read(&SensorSpec::direct("sensor.gone", "Gone"), &source)
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::DataSource(_)));
    }

    #[tokio::test]
    async fn test_forecast_reading() {
        let source = weather_source();
        let spec = SensorSpec::forecast("weather.home", "Tomorrow", "temperature", 1);

        let reading = read(&spec, &source).await.unwrap();
        assert_eq!(
            reading,
            Reading::new("Tomorrow", "12.5", "°C", Some("2024-03-11 11:00".to_string()))
        );
        assert_eq!(
            *source.calls.borrow(),
            vec![
                "get weather.home".to_string(),
                r#"weather.get_forecasts weather.home {"type":"daily"}"#.to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_forecast_reading_with_decimals() {
        let source = weather_source();
        let spec = SensorSpec::forecast("weather.home", "Today", "temperature", 0).with_decimals(1);

        let reading = read(&spec, &source).await.unwrap();
        assert_eq!(reading.value, "18.3");
        assert_eq!(reading.formatted_value(), "18.3 °C");
    }

    #[tokio::test]
    async fn test_forecast_index_out_of_range() {
        let source = weather_source();
        let spec = SensorSpec::forecast("weather.home", "Later", "temperature", 2);

        let err = read(&spec, &source).await.unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::IndexOutOfRange { index: 2, len: 2 }
        ));
    }

    #[tokio::test]
    async fn test_forecast_missing_unit_skips_action_call() {
        let source = weather_source();
        let spec = SensorSpec::forecast("weather.home", "Rain", "precipitation", 0);

        let err = read(&spec, &source).await.unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::MissingAttribute { ref attribute, .. } if attribute == "precipitation_unit"
        ));
        assert_eq!(source.calls.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_forecast_action_failure_is_data_source_error() {
        let source = FakeSource::new().with_entity(
            "weather.home",
            "sunny",
            json!({"temperature_unit": "°C"}),
        );
        let spec = SensorSpec::forecast("weather.home", "Tomorrow", "temperature", 1);

        let err = read(&spec, &source).await.unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::DataSource(DataSourceError::Status { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn test_forecast_response_without_entity_is_malformed() {
        let source = FakeSource::new()
            .with_entity("weather.home", "sunny", json!({"temperature_unit": "°C"}))
            .with_service_response("weather.home", json!({"weather.other": {"forecast": []}}));
        let spec = SensorSpec::forecast("weather.home", "Tomorrow", "temperature", 0);

        let err = read(&spec, &source).await.unwrap_err();
        assert!(matches!(err, ExtractionError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_forecast_response_without_forecast_list_is_malformed() {
        let source = FakeSource::new()
            .with_entity("weather.home", "sunny", json!({"temperature_unit": "°C"}))
            .with_service_response("weather.home", json!({"weather.home": {"forecast": "none"}}));
        let spec = SensorSpec::forecast("weather.home", "Tomorrow", "temperature", 0);

        let err = read(&spec, &source).await.unwrap_err();
        assert!(matches!(err, ExtractionError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_forecast_entry_missing_attribute() {
        let source = weather_source();
        let spec = SensorSpec::forecast("weather.home", "Wind", "wind_speed", 0);

        let err = read(&spec, &source).await.unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::MissingAttribute { ref attribute, .. } if attribute == "wind_speed"
        ));
    }
}
