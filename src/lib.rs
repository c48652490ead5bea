pub mod chart;
pub mod clients;
pub mod config;
pub mod data;
pub mod download;
pub mod error;
pub mod fonts;
pub mod image_codec;
pub mod insights;
pub mod options;
pub mod prompts;
pub mod render;

pub use chart::{Chart, ChartKind, Series, SeriesKind};
pub use clients::{SummaryClient, SummaryRequest, SummaryResult, create_client};
pub use error::{GraphNarratorError, Result};
pub use options::{ClientKind, DetailLevel, Language};
