use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleError {
    #[error("Unknown style profile '{requested}'. Valid options are: {valid}")]
    UnknownStyle { requested: String, valid: String },

    #[error("Unknown font choice '{0}'. Valid options are: serif, sans, monospace")]
    UnknownFont(String),

    #[error("Invalid length '{value}': {message}")]
    InvalidLength { value: String, message: String },
}
