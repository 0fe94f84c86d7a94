use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Unknown scenario preset: {0}")]
    UnknownPreset(String),
}
