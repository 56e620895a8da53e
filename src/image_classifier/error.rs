use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassifierError {
    #[error("failed to load model `{path}`: {message}")]
    ModelLoad { path: String, message: String },

    #[error("inference failed: {0}")]
    Inference(String),

    #[error("invalid frame: {0}")]
    InvalidFrame(String),
}
