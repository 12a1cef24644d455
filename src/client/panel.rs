use crate::renderer::RenderError;
use image::{DynamicImage, ImageFormat};
use log::{debug, info};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

/// A fixed-resolution bitmap display.
pub trait Display {
    fn resolution(&self) -> (u32, u32);

    fn set_image(&mut self, image: &DynamicImage) -> Result<(), RenderError>;

    fn show(&mut self, busy_wait: bool) -> Result<(), RenderError>;
}

/// Panel that "shows" each frame by writing it to a PNG file.
///
/// The frame is written next to the target and renamed into place, so a
/// viewer polling the file never sees a partial image.
pub struct PngPanel {
    path: PathBuf,
    width: u32,
    height: u32,
    frame: Option<DynamicImage>,
}

impl PngPanel {
    pub fn new<P: Into<PathBuf>>(path: P, width: u32, height: u32) -> Self {
        let path = path.into();
        info!("PngPanel: {}x{} -> {}", width, height, path.display());
        Self {
            path,
            width,
            height,
            frame: None,
        }
    }

    fn staging_path(&self) -> PathBuf {
        let mut staging = self.path.clone().into_os_string();
        staging.push(".part");
        PathBuf::from(staging)
    }
}

impl Display for PngPanel {
    fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_image(&mut self, image: &DynamicImage) -> Result<(), RenderError> {
        let frame = if image.width() == self.width && image.height() == self.height {
            image.clone()
        } else {
            image.resize_exact(self.width, self.height, image::imageops::FilterType::Nearest)
        };
        self.frame = Some(frame);
        Ok(())
    }

    // Writes are synchronous, so busy_wait changes nothing here.
    fn show(&mut self, _busy_wait: bool) -> Result<(), RenderError> {
        let start = Instant::now();
        let frame = self.frame.as_ref().ok_or(RenderError::NoImage)?;

        let staging = self.staging_path();
        frame.save_with_format(&staging, ImageFormat::Png)?;
        fs::rename(&staging, &self.path)?;

        debug!("PngPanel show took: {} ms", start.elapsed().as_millis());
        Ok(())
    }
}
