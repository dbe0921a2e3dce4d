//! Option descriptor types.
//!
//! Every registration appends one descriptor to a
//! [`CommandLineOptions`](crate::CommandLineOptions) table. A descriptor pairs
//! its matching text and usage metadata with an output slot borrowed from the
//! caller: the registry writes parsed values through the slot but never owns
//! the storage.

use serde::{Deserialize, Serialize};

/// Kind of a registered descriptor.
///
/// # Examples
///
/// ```
/// use clover_core::OptionKind;
///
/// assert!(OptionKind::UInt.takes_value());
/// assert!(!OptionKind::Flag.takes_value());
/// assert!(OptionKind::Flag.is_named());
/// assert!(!OptionKind::Positional.is_named());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionKind {
    /// Usage formatting directive; never matches a token.
    Newline,
    /// String value matched by position among unprefixed tokens.
    Positional,
    /// Boolean switch (`--name`).
    Flag,
    /// Unsigned integer value (`--name=42`, `--name=0x2a`).
    UInt,
    /// Arbitrary string value (`--name=text`).
    String,
}

impl OptionKind {
    /// Whether tokens reference this kind with a `-`, `--` or `/` prefix.
    pub fn is_named(self) -> bool {
        matches!(self, Self::Flag | Self::UInt | Self::String)
    }

    /// Whether a named token for this kind must carry `=value`.
    pub fn takes_value(self) -> bool {
        matches!(self, Self::UInt | Self::String)
    }
}

/// Caller-owned storage written during parsing.
#[derive(Debug)]
pub(crate) enum Target<'a> {
    Newline,
    Positional(&'a mut String),
    Flag(&'a mut bool),
    UInt(&'a mut u32),
    String(&'a mut String),
}

impl Target<'_> {
    pub(crate) fn kind(&self) -> OptionKind {
        match self {
            Self::Newline => OptionKind::Newline,
            Self::Positional(_) => OptionKind::Positional,
            Self::Flag(_) => OptionKind::Flag,
            Self::UInt(_) => OptionKind::UInt,
            Self::String(_) => OptionKind::String,
        }
    }
}

/// One registered option or formatting directive.
#[derive(Debug)]
pub(crate) struct OptionEntry<'a> {
    pub(crate) name: Option<String>,
    pub(crate) value_desc: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) target: Target<'a>,
    pub(crate) include_in_usage: bool,
    pub(crate) found: bool,
}

impl<'a> OptionEntry<'a> {
    pub(crate) fn new(
        target: Target<'a>,
        name: Option<&str>,
        value_desc: Option<&str>,
        description: Option<&str>,
    ) -> Self {
        Self {
            name: name.map(String::from),
            value_desc: value_desc.map(String::from),
            description: description.map(String::from),
            target,
            include_in_usage: true,
            found: false,
        }
    }

    pub(crate) fn kind(&self) -> OptionKind {
        self.target.kind()
    }

    pub(crate) fn has_name(&self, name: &str) -> bool {
        self.name
            .as_deref()
            .is_some_and(|own| own.eq_ignore_ascii_case(name))
    }

    pub(crate) fn info(&self) -> OptionInfo {
        OptionInfo {
            name: self.name.clone(),
            value_desc: self.value_desc.clone(),
            description: self.description.clone(),
            kind: self.kind(),
            include_in_usage: self.include_in_usage,
            found: self.found,
        }
    }
}

/// Read-only snapshot of a registered descriptor.
///
/// Returned by [`CommandLineOptions::options`](crate::CommandLineOptions::options)
/// in registration order. Serializable for tooling that wants to dump the
/// option table.
///
/// # Examples
///
/// ```
/// use clover_core::{CommandLineOptions, OptionKind};
///
/// let mut count = 0u32;
/// let mut opts = CommandLineOptions::new();
/// opts.add_uint(&mut count, "count", "N", "Number of runs");
///
/// let info = &opts.options()[0];
/// assert_eq!(info.kind, OptionKind::UInt);
/// assert_eq!(info.value_desc.as_deref(), Some("N"));
/// assert!(!info.found);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionInfo {
    /// Matching text (absent for newline directives).
    pub name: Option<String>,
    /// Value placeholder shown in usage.
    pub value_desc: Option<String>,
    /// Help text.
    pub description: Option<String>,
    /// Descriptor kind.
    pub kind: OptionKind,
    /// Whether the usage printer lists this descriptor.
    pub include_in_usage: bool,
    /// Whether a token matched this descriptor.
    pub found: bool,
}

/// Handle to a just-registered descriptor.
///
/// Registration methods return this so the caller can adjust the new entry;
/// dropping it leaves the defaults in place.
///
/// # Examples
///
/// ```
/// use clover_core::CommandLineOptions;
///
/// let mut debug = false;
/// let mut opts = CommandLineOptions::new();
/// opts.add_flag(&mut debug, "debug", "Internal diagnostics").hidden();
///
/// assert!(!opts.options()[0].include_in_usage);
/// ```
#[derive(Debug)]
pub struct Registered<'r, 'a> {
    pub(crate) entry: &'r mut OptionEntry<'a>,
}

impl Registered<'_, '_> {
    /// Leaves the descriptor out of the usage text. It still matches tokens.
    pub fn hidden(self) {
        self.include_in_usage(false);
    }

    /// Sets whether the usage printer lists this descriptor.
    pub fn include_in_usage(self, include: bool) {
        self.entry.include_in_usage = include;
    }
}
