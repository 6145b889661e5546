//! CVSift Core — error taxonomy, configuration, candidate record model.

pub mod config;
pub mod error;
pub mod record;

pub use config::{CvsiftConfig, DataPaths};
pub use error::{Error, Result};
pub use record::{BatchStatistics, FailedFile, ParsedRecord};
