//! Errors and error-related utilities.

use std::{error, fmt, result};

/// The result type used throughout this library.
pub type Result<T> = result::Result<T, Box<dyn error::Error>>;

/// Invalid input.
#[derive(Debug)]
pub struct InvalidInput(pub String);

/// AnkiConnect reported a failure or returned an unusable response.
#[derive(Debug)]
pub struct ApiFailure(pub String);

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid input: {}", self.0)
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "AnkiConnect failure: {}", self.0)
    }
}

impl error::Error for InvalidInput {}

impl error::Error for ApiFailure {}

/// A helper for constructing [InvalidInput].
pub fn invalid_input(s: String) -> Box<dyn error::Error> {
    InvalidInput(s).into()
}

/// A helper for constructing [ApiFailure].
pub fn api_failure(s: String) -> Box<dyn error::Error> {
    ApiFailure(s).into()
}
