pub mod error;
pub mod prompts;
pub mod registry;
pub mod runner;
pub mod services;
pub mod stages;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{EngineError, Result};
pub use registry::ProviderRegistry;
pub use runner::PipelineRunner;
pub use services::evaluator::{Evaluator, KeywordEvaluator};
pub use services::gemini_client::GeminiClient;
pub use services::provider::{CapabilityProvider, McpProvider};
pub use stages::{StageExecutor, StageKind};
