use crate::renderer::fonts::FontConfig;
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use rusttype::point;

pub fn text(
    image: &mut RgbaImage,
    colour: Rgba<u8>,
    x: i32,
    y: i32,
    font_config: &FontConfig,
    text: &str,
) {
    draw_text_mut(
        image,
        colour,
        x,
        y,
        font_config.scale,
        &font_config.font,
        text,
    );
}

/// Bottom edge of `text` when drawn with its top at y = 0.
///
/// Glyphs are laid out the same way `draw_text_mut` places them (baseline at
/// the font ascent), so this is the ink bottom of what `text` draws. Text
/// without ink (empty or blank) falls back to the font's line height.
pub fn text_bottom(font_config: &FontConfig, text: &str) -> i32 {
    let v_metrics = font_config.font.v_metrics(font_config.scale);
    font_config
        .font
        .layout(text, font_config.scale, point(0.0, v_metrics.ascent))
        .filter_map(|glyph| glyph.pixel_bounding_box())
        .map(|bb| bb.max.y)
        .max()
        .unwrap_or_else(|| (v_metrics.ascent - v_metrics.descent).ceil() as i32)
}
