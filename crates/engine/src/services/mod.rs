pub mod evaluator;
pub mod gemini_client;
pub mod provider;
pub mod response_parser;

pub use evaluator::{Evaluator, KeywordEvaluator};
pub use gemini_client::GeminiClient;
pub use provider::{CapabilityProvider, McpProvider};
pub use response_parser::ResponseParser;
