use crate::client::Display;
use crate::models::Snapshot;
use crate::renderer::layout::layout_snapshot;
use crate::renderer::{drawing, RenderError, RenderStyle};
use image::{DynamicImage, RgbaImage};
use log::debug;
use std::time::Instant;

// Draw the snapshot onto a fresh canvas of the given size
pub fn create_image(style: &RenderStyle, snapshot: &Snapshot, width: u32, height: u32) -> DynamicImage {
    let mut image = RgbaImage::from_pixel(width, height, style.background);

    for line in layout_snapshot(snapshot, height, style.margin, style) {
        let text_style = style.text_style(line.role);
        drawing::text(
            &mut image,
            text_style.colour,
            line.x,
            line.y,
            &text_style.font,
            &line.text,
        );
    }

    DynamicImage::ImageRgba8(image)
}

/// Renders snapshots onto an optional bitmap display.
pub struct CanvasRenderer<P: Display> {
    target: Option<(P, RenderStyle)>,
}

impl<P: Display> CanvasRenderer<P> {
    pub fn new(display: P, style: RenderStyle) -> Self {
        Self {
            target: Some((display, style)),
        }
    }

    /// Renderer without a display; every render is a no-op.
    pub fn disabled() -> Self {
        Self { target: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.target.is_some()
    }

    pub fn display(&self) -> Option<&P> {
        self.target.as_ref().map(|(display, _)| display)
    }

    pub fn render(&mut self, snapshot: &Snapshot) -> Result<(), RenderError> {
        let Some((display, style)) = self.target.as_mut() else {
            return Ok(());
        };

        let start = Instant::now();
        let (width, height) = display.resolution();
        let image = create_image(style, snapshot, width, height);

        display.set_image(&image)?;
        display.show(false)?;

        debug!("canvas render took: {} ms", start.elapsed().as_millis());
        Ok(())
    }
}
