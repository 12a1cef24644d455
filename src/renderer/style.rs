use crate::config::StyleConfig;
use crate::renderer::drawing;
use crate::renderer::fonts::{self, FontConfig};
use crate::renderer::layout::{TextMeasure, TextRole};
use crate::renderer::RenderError;
use image::Rgba;

#[derive(Clone)]
pub struct TextStyle {
    pub(crate) font: FontConfig,
    pub colour: Rgba<u8>,
}

/// Fonts, colours and margins of the panel, fixed at startup.
#[derive(Clone)]
pub struct RenderStyle {
    pub updated_at: TextStyle,
    pub sensor_name: TextStyle,
    pub sensor_value: TextStyle,
    pub annotation: TextStyle,
    pub margin: (i32, i32),
    pub background: Rgba<u8>,
}

fn rgba([r, g, b]: [u8; 3]) -> Rgba<u8> {
    Rgba([r, g, b, 255])
}

impl RenderStyle {
    pub fn from_config(config: &StyleConfig) -> Result<Self, RenderError> {
        let font = fonts::load_font(&config.font)?;

        let updated_at = TextStyle {
            font: FontConfig::new(&font, config.updated_at_size),
            colour: rgba(config.updated_at_colour),
        };
        let sensor_name = TextStyle {
            font: FontConfig::new(&font, config.sensor_name_size),
            colour: rgba(config.sensor_name_colour),
        };
        let sensor_value = TextStyle {
            font: FontConfig::new(&font, config.sensor_value_size),
            colour: rgba(config.sensor_value_colour),
        };
        // Annotations use the small name font but the value colour.
        let annotation = TextStyle {
            font: sensor_name.font.clone(),
            colour: sensor_value.colour,
        };

        Ok(Self {
            updated_at,
            sensor_name,
            sensor_value,
            annotation,
            margin: (config.margin[0] as i32, config.margin[1] as i32),
            background: rgba(config.background),
        })
    }

    pub fn text_style(&self, role: TextRole) -> &TextStyle {
        match role {
            TextRole::UpdatedAt => &self.updated_at,
            TextRole::SensorName => &self.sensor_name,
            TextRole::SensorValue => &self.sensor_value,
            TextRole::Annotation => &self.annotation,
        }
    }
}

impl TextMeasure for RenderStyle {
    fn text_bottom(&self, role: TextRole, text: &str) -> i32 {
        drawing::text_bottom(&self.text_style(role).font, text)
    }
}
