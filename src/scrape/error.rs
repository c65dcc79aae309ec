use thiserror::Error;

/// Transport failures. Any of these ends the check without a default.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),
}

#[derive(Debug, Error, PartialEq)]
pub enum ValueError {
    #[error("could not convert string to float: {text}")]
    NotANumber { text: String },

    #[error("{0}")]
    InvalidXPath(String),
}
