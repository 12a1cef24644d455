use crate::renderer::RenderError;
use rusttype::{Font, Scale};
use std::fs;

#[derive(Clone)]
pub(crate) struct FontConfig {
    pub font: Font<'static>,
    pub scale: Scale,
}

impl FontConfig {
    pub fn new(font: &Font<'static>, size: f32) -> Self {
        FontConfig {
            font: font.clone(),
            scale: Scale::uniform(size),
        }
    }
}

pub fn load_font(path: &str) -> Result<Font<'static>, RenderError> {
    let bytes = fs::read(path).map_err(|source| RenderError::FontFile {
        path: path.to_string(),
        source,
    })?;
    Font::try_from_vec(bytes).ok_or_else(|| RenderError::InvalidFont(path.to_string()))
}
