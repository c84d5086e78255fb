pub mod ability;
pub mod payload;
pub mod pipeline;
pub mod stage;
pub mod state;
