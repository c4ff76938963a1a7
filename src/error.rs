use crate::config::ConfigurationError;
use crate::execution::CompletionError;
use crate::state_machine::StateMachineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JobError {
    #[error("Completion handle failed: {0}")]
    Completion(#[from] CompletionError),

    #[error("State machine error: {0}")]
    StateMachine(#[from] StateMachineError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

pub type Result<T> = std::result::Result<T, JobError>;
