use thiserror::Error;

pub mod canvas;
pub mod console;
pub(crate) mod drawing;
pub(crate) mod fonts;
pub mod layout;
pub mod style;

pub use canvas::CanvasRenderer;
pub use console::ConsoleRenderer;
pub use style::RenderStyle;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to read font {path}")]
    FontFile {
        path: String,
        source: std::io::Error,
    },

    #[error("Not a usable font: {0}")]
    InvalidFont(String),

    #[error("Image error")]
    Image(#[from] image::ImageError),

    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("No image has been set on the display")]
    NoImage,
}
