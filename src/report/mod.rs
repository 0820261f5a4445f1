//! Dashboard rendering for the terminal and for JSON consumers

mod json;
mod style;
mod text;

pub use json::render_json;
pub use style::{paint, Rgb, Shade, Theme};
pub use text::{write_text, TextOptions};
