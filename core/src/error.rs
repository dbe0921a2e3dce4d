//! Parse outcomes for command line option matching.
//!
//! [`CommandLineOptions::parse`](crate::CommandLineOptions::parse) reports a
//! closed set of outcomes. Anything other than success is a [`ParseError`],
//! which carries the index of the offending token in the original argument
//! vector so the caller can print a precise diagnostic. [`ParseStatus`] is the
//! flat result-code view of the same outcomes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons parsing stopped before consuming every token.
///
/// [`HelpRequested`](ParseError::HelpRequested) is not a failure: callers
/// are expected to print usage and exit successfully. The library itself
/// never prints or terminates the process.
///
/// # Examples
///
/// ```
/// use clover_core::{CommandLineOptions, ParseError};
///
/// let mut verbose = false;
/// let mut opts = CommandLineOptions::new();
/// opts.add_flag(&mut verbose, "verbose", "Enable verbose output");
///
/// let err = opts.parse(&["app", "--nope"]).unwrap_err();
/// assert_eq!(err.index(), 1);
/// assert_eq!(err.to_string(), "unrecognised command line argument: --nope");
/// assert!(matches!(err, ParseError::UnrecognisedArgument { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A `-h`, `-?`, `--help` (or `/`-prefixed equivalent) token was seen.
    #[error("help requested")]
    HelpRequested {
        /// Index of the help token.
        index: usize,
    },
    /// A value-bearing option matched by name but had no `=value` part.
    #[error("command line argument expecting value: {argument}")]
    ArgumentExpectingValue {
        /// Index of the offending token.
        index: usize,
        /// The raw token text.
        argument: String,
    },
    /// A numeric option's value was not a complete unsigned integer.
    #[error("invalid command line argument value: {argument}")]
    ArgumentValueInvalid {
        /// Index of the offending token.
        index: usize,
        /// The raw token text.
        argument: String,
    },
    /// The token matched no registered option.
    #[error("unrecognised command line argument: {argument}")]
    UnrecognisedArgument {
        /// Index of the offending token.
        index: usize,
        /// The raw token text.
        argument: String,
    },
}

impl ParseError {
    /// Index into the argument vector of the token that stopped parsing.
    pub fn index(&self) -> usize {
        match self {
            Self::HelpRequested { index }
            | Self::ArgumentExpectingValue { index, .. }
            | Self::ArgumentValueInvalid { index, .. }
            | Self::UnrecognisedArgument { index, .. } => *index,
        }
    }

    /// Returns `true` for the help outcome, which is not a failure.
    pub fn is_help(&self) -> bool {
        matches!(self, Self::HelpRequested { .. })
    }

    /// Result code for this outcome.
    pub fn status(&self) -> ParseStatus {
        match self {
            Self::HelpRequested { .. } => ParseStatus::HelpRequested,
            Self::ArgumentExpectingValue { .. } => ParseStatus::ErrorArgumentExpectingValue,
            Self::ArgumentValueInvalid { .. } => ParseStatus::ErrorArgumentValueInvalid,
            Self::UnrecognisedArgument { .. } => ParseStatus::ErrorUnrecognisedArgument,
        }
    }
}

/// Flat result code of a parse.
///
/// # Examples
///
/// ```
/// use clover_core::{CommandLineOptions, ParseStatus};
///
/// let mut opts = CommandLineOptions::new();
/// let result = opts.parse(&["app", "-h"]);
/// assert_eq!(ParseStatus::of(&result), ParseStatus::HelpRequested);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParseStatus {
    /// Every token was consumed.
    Ok,
    /// A help token was seen.
    HelpRequested,
    /// A value-bearing option had no `=value`.
    ErrorArgumentExpectingValue,
    /// A numeric value failed to parse.
    ErrorArgumentValueInvalid,
    /// A token matched nothing.
    ErrorUnrecognisedArgument,
}

impl ParseStatus {
    /// Result code for a completed parse.
    pub fn of(result: &Result<()>) -> Self {
        match result {
            Ok(()) => Self::Ok,
            Err(e) => e.status(),
        }
    }

    /// Returns `true` when the caller should exit successfully.
    pub fn is_success(self) -> bool {
        matches!(self, Self::Ok | Self::HelpRequested)
    }
}

/// Convenience alias for results with [`ParseError`].
pub type Result<T> = std::result::Result<T, ParseError>;
