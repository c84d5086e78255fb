pub mod domain;
pub mod error;

pub use domain::ability::{AbilityCall, AbilityResult, ProviderKey};
pub use domain::payload::{merge_payload, Payload};
pub use domain::pipeline::PipelineSpec;
pub use domain::stage::{StageConfig, StageMode};
pub use domain::state::PipelineState;
pub use error::CoreError;
