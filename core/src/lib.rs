//! Declarative command line option parsing and usage formatting.
//!
//! This crate provides [`CommandLineOptions`], an ordered table of option
//! descriptors that parses an argument vector in a single pass and renders
//! usage text from the same table:
//!
//! - [`add_flag`](CommandLineOptions::add_flag) — boolean switch
//!   (`--verbose`).
//! - [`add_uint`](CommandLineOptions::add_uint) — unsigned integer
//!   (`--count=42`, `--count=0x2a`).
//! - [`add_string`](CommandLineOptions::add_string) — string value
//!   (`--output=out.txt`), or a positional argument when it has no value
//!   description.
//! - [`add_usage_newline`](CommandLineOptions::add_usage_newline) — blank line
//!   in the usage option list.
//!
//! Option names match case-insensitively after a `-`, `--` or `/` prefix.
//! Parsed values are written into variables the caller owns; the table only
//! borrows them. Parse outcomes other than success are reported as a
//! [`ParseError`] carrying the offending token's index.
//!
//! # Example
//!
//! ```
//! use clover_core::*;
//!
//! let mut verbose = false;
//! let mut jobs = 4u32;
//! let mut target = String::new();
//!
//! let mut opts = CommandLineOptions::new();
//! opts.add_flag(&mut verbose, "verbose", "Enable verbose output");
//! opts.add_uint(&mut jobs, "jobs", "N", "Number of parallel jobs");
//! opts.add_positional(&mut target, "target", "Build target");
//!
//! match opts.parse(&["build", "-v", "release"]) {
//!     Err(ParseError::UnrecognisedArgument { index, argument }) => {
//!         assert_eq!(index, 1);
//!         assert_eq!(argument, "-v");
//!     }
//!     other => panic!("unexpected result: {other:?}"),
//! }
//!
//! opts.reset();
//! assert_eq!(opts.parse(&["build", "--jobs=8", "release", "--verbose"]), Ok(()));
//! assert!(opts.render_usage("build", DEFAULT_TARGET_WIDTH).starts_with("usage: build [options] target\n"));
//! drop(opts);
//!
//! assert!(verbose);
//! assert_eq!(jobs, 8);
//! assert_eq!(target, "release");
//! ```

mod error;
mod parse;
mod registry;
mod types;
mod usage;

pub use error::{ParseError, ParseStatus, Result};
pub use registry::CommandLineOptions;
pub use types::{OptionInfo, OptionKind, Registered};
pub use usage::{COLUMN_GUTTER, DEFAULT_TARGET_WIDTH, program_name, program_name_from_path};
