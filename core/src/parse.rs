//! Argument vector matching.
//!
//! Tokens are consumed left to right starting after the program name. A token
//! beginning with `/`, `-` or `--` references an option by name; anything else
//! is a positional value. Each token is offered to the descriptors in
//! registration order and the first one that accepts it wins. Parsing stops at
//! the first token nothing accepts.

use std::ffi::OsString;

use tracing::debug;

use crate::error::{ParseError, Result};
use crate::registry::CommandLineOptions;
use crate::types::{OptionEntry, Target};

/// Stripped token text names that request usage.
const HELP_NAMES: [&str; 3] = ["?", "h", "help"];

/// A token after prefix classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'t> {
    /// Prefixed token with the prefix removed.
    Named(&'t str),
    /// Unprefixed token.
    Bare(&'t str),
}

impl<'t> Token<'t> {
    fn classify(arg: &'t str) -> Self {
        if let Some(rest) = arg.strip_prefix('/') {
            Self::Named(rest)
        } else if let Some(rest) = arg.strip_prefix('-') {
            Self::Named(rest.strip_prefix('-').unwrap_or(rest))
        } else {
            Self::Bare(arg)
        }
    }

    fn is_help(self) -> bool {
        match self {
            Self::Named(text) => HELP_NAMES.iter().any(|h| text.eq_ignore_ascii_case(h)),
            Self::Bare(_) => false,
        }
    }
}

/// Why a descriptor that matched by name refused the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    MissingValue,
    InvalidValue,
}

impl CommandLineOptions<'_> {
    /// Parses an argument vector, writing matched values into the registered
    /// output variables.
    ///
    /// `args[0]` is the program's invocation name and is skipped. Parsing
    /// stops at the first token that requests help or cannot be consumed; the
    /// returned error carries that token's index. Values written before the
    /// stop are kept.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::HelpRequested`] for `-h`, `-?`, `--help` and
    /// their `/` forms, [`ParseError::ArgumentExpectingValue`] when a
    /// value-bearing option has no `=value`,
    /// [`ParseError::ArgumentValueInvalid`] when a numeric value does not
    /// parse, and [`ParseError::UnrecognisedArgument`] when nothing matches.
    ///
    /// # Examples
    ///
    /// ```
    /// use clover_core::{CommandLineOptions, ParseError};
    ///
    /// let mut count = 0u32;
    /// let mut opts = CommandLineOptions::new();
    /// opts.add_uint(&mut count, "count", "N", "Number of runs");
    ///
    /// let err = opts.parse(&["app", "--count"]).unwrap_err();
    /// assert!(matches!(err, ParseError::ArgumentExpectingValue { index: 1, .. }));
    ///
    /// opts.parse(&["app", "/COUNT=0x10"]).unwrap();
    /// drop(opts);
    /// assert_eq!(count, 16);
    /// ```
    pub fn parse<S: AsRef<str>>(&mut self, args: &[S]) -> Result<()> {
        for (index, arg) in args.iter().enumerate().skip(1) {
            let arg = arg.as_ref();
            let token = Token::classify(arg);

            if token.is_help() {
                debug!(index, argument = arg, "Help requested");
                return Err(ParseError::HelpRequested { index });
            }

            let mut matched = false;
            for entry in &mut self.entries {
                match entry.accept(token) {
                    Ok(false) => continue,
                    Ok(true) => {
                        debug!(index, argument = arg, option = ?entry.name, "Matched command line argument");
                        matched = true;
                        break;
                    }
                    Err(rejection) => {
                        debug!(index, argument = arg, option = ?entry.name, ?rejection, "Rejected command line argument");
                        let argument = arg.to_string();
                        return Err(match rejection {
                            Rejection::MissingValue => {
                                ParseError::ArgumentExpectingValue { index, argument }
                            }
                            Rejection::InvalidValue => {
                                ParseError::ArgumentValueInvalid { index, argument }
                            }
                        });
                    }
                }
            }

            if !matched {
                debug!(index, argument = arg, "Unrecognised command line argument");
                return Err(ParseError::UnrecognisedArgument {
                    index,
                    argument: arg.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Parses OS-encoded arguments, converting any non-UTF-8 text lossily.
    pub fn parse_os<I>(&mut self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = OsString>,
    {
        let args: Vec<String> = args
            .into_iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        self.parse(args.as_slice())
    }

    /// Parses the current process's arguments.
    pub fn parse_env(&mut self) -> Result<()> {
        self.parse_os(std::env::args_os())
    }
}

impl OptionEntry<'_> {
    /// Offers a token to this descriptor, writing the value on a match.
    fn accept(&mut self, token: Token<'_>) -> std::result::Result<bool, Rejection> {
        let name = self.name.as_deref().unwrap_or_default();
        match (&mut self.target, token) {
            (Target::Positional(slot), Token::Bare(text)) if !self.found => {
                **slot = text.to_string();
            }
            (Target::Flag(slot), Token::Named(text)) if text.eq_ignore_ascii_case(name) => {
                **slot = true;
            }
            (Target::UInt(slot), Token::Named(text)) => match value_for(text, name)? {
                Some(value) => **slot = parse_uint(value).ok_or(Rejection::InvalidValue)?,
                None => return Ok(false),
            },
            (Target::String(slot), Token::Named(text)) => match value_for(text, name)? {
                Some(value) => **slot = value.to_string(),
                None => return Ok(false),
            },
            _ => return Ok(false),
        }
        self.found = true;
        Ok(true)
    }
}

/// Splits `name=value` out of stripped token text.
///
/// `Ok(None)` means the token is for some other option.
fn value_for<'t>(text: &'t str, name: &str) -> std::result::Result<Option<&'t str>, Rejection> {
    let Some(head) = text.get(..name.len()) else {
        return Ok(None);
    };
    if !head.eq_ignore_ascii_case(name) {
        return Ok(None);
    }
    let rest = &text[name.len()..];
    if rest.is_empty() {
        return Err(Rejection::MissingValue);
    }
    Ok(rest.strip_prefix('='))
}

/// Parses an unsigned integer with C-style radix detection.
///
/// `0x`/`0X` selects hexadecimal and a leading `0` selects octal. The whole
/// string must be consumed and the value must fit in `u32`.
fn parse_uint(value: &str) -> Option<u32> {
    let digits = value.strip_prefix('+').unwrap_or(value);
    let (radix, digits) = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        (16, hex)
    } else if digits.len() > 1 && digits.starts_with('0') {
        (8, &digits[1..])
    } else {
        (10, digits)
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u32::from_str_radix(digits, radix).ok()
}
