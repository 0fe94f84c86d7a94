use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Scenario error: {0}")]
    Scenario(#[from] core_types::CoreError),

    #[error("The dashboard has been shut down.")]
    ShutDown,
}
