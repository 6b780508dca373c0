pub mod config;
pub mod errors;
pub mod logging;
pub mod text;

pub use crate::config::{AppConfig, ConfigOverrides, ReportConfig};
pub use crate::errors::AppError;
