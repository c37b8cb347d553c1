//! Query expansion through an external text-generation service.
//!
//! The expander receives the user's raw query and returns a replacement
//! query string, typically the original words plus synonyms. The returned
//! text is used verbatim; word counts are not checked.
//!
//! - [`openai::OpenAiExpander`] - Chat completions over HTTP
//!
//! Closures implement [`QueryExpander`] too, which keeps tests offline:
//!
//! ```
//! use newsrank::expansion::{ExpansionError, QueryExpander};
//!
//! let expander = |query: &str| -> Result<String, ExpansionError> {
//!     Ok(format!("{query} feline kitten"))
//! };
//! assert_eq!(expander.expand("cats").unwrap(), "cats feline kitten");
//! ```

use thiserror::Error;

pub mod openai;

pub use openai::OpenAiExpander;

/// System instruction sent with every expansion request.
pub const SYSTEM_PROMPT: &str =
    "You find additional synonymes and words to improve a news article search";

/// The user instruction for a query.
pub fn user_prompt(query: &str) -> String {
    format!(
        "Give me additional words and synonyms that improve a keyword search for {query}. \
         Just return between 5 and 10 words as a string with no bulletpoints or similar. \
         Return only words no phrases."
    )
}

/// Failures of the expansion service.
#[derive(Error, Debug)]
pub enum ExpansionError {
    /// The credential environment variable is unset or empty.
    #[error("environment variable {0} is not set")]
    MissingCredential(String),

    /// The request could not be sent or the response not read.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("service returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body is not a usable completion.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Expands a query into a richer search string.
pub trait QueryExpander: Send + Sync {
    /// Return the expanded query text.
    fn expand(&self, query: &str) -> Result<String, ExpansionError>;

    /// Get the name of this expander for debugging and logging.
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> QueryExpander for F
where
    F: Fn(&str) -> Result<String, ExpansionError> + Send + Sync,
{
    fn expand(&self, query: &str) -> Result<String, ExpansionError> {
        self(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_prompt() {
        assert_eq!(
            user_prompt("climate"),
            "Give me additional words and synonyms that improve a keyword search for climate. \
             Just return between 5 and 10 words as a string with no bulletpoints or similar. \
             Return only words no phrases."
        );
    }

    #[test]
    fn test_closure_expander() {
        let failing = |_: &str| -> Result<String, ExpansionError> {
            Err(ExpansionError::MalformedResponse("empty".into()))
        };

        assert!(failing.expand("cats").is_err());
        assert_eq!(failing.name(), "custom");
    }

    #[test]
    fn test_error_messages() {
        let error = ExpansionError::Status {
            status: 401,
            body: "invalid key".into(),
        };
        assert_eq!(error.to_string(), "service returned status 401: invalid key");

        let error = ExpansionError::MissingCredential("OPENAI_API_KEY".into());
        assert_eq!(error.to_string(), "environment variable OPENAI_API_KEY is not set");
    }
}
