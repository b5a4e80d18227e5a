// Report renderers: markdown export, HTML report and dashboard, console summary.

pub mod console;
mod format;
pub mod html;
pub mod markdown;

pub use format::{format_bytes, format_uptime};
