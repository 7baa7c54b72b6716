pub mod config;
pub mod error;
pub mod escape;
pub mod types;

pub use config::StudioConfig;
pub use error::{Result, StudioError};
pub use escape::{escape_html, single_line, truncate_chars};
pub use types::*;
