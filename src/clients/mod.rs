pub mod gemini;
pub mod mock;
pub mod traits;

pub use gemini::{GeminiApi, GeminiClient};
pub use mock::MockClient;
pub use traits::{ContentGenerator, SummaryClient, SummaryRequest, SummaryResult};

use tracing::info;

use crate::config::Config;
use crate::error::{GraphNarratorError, Result};
use crate::options::ClientKind;

/// Build the summarization client for `api_type` ("remote" or "mock").
pub fn create_client(
    api_type: &str,
    api_key: Option<&str>,
    config: &Config,
) -> Result<Box<dyn SummaryClient>> {
    match ClientKind::parse(api_type) {
        Some(ClientKind::Remote) => Ok(Box::new(GeminiClient::new(api_key, config)?)),
        Some(ClientKind::Mock) => {
            info!("Using offline mock summaries");
            Ok(Box::new(MockClient::new()))
        }
        None => Err(GraphNarratorError::unsupported(format!(
            "api type '{}'",
            api_type
        ))),
    }
}
