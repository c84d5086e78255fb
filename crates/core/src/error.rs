use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Unknown provider key: {0}")]
    UnknownProviderKey(String),
}
