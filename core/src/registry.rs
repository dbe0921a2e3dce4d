//! The option table: registration and query.

use tracing::trace;

use crate::types::{OptionEntry, OptionInfo, OptionKind, Registered, Target};

/// Ordered table of option descriptors.
///
/// Options are registered up front, then a single call to
/// [`parse`](Self::parse) consumes the argument vector and writes parsed
/// values into the caller's variables. The same table renders the usage text
/// (see [`render_usage`](Self::render_usage)).
///
/// Registration order matters: it is the order options are listed in usage
/// output and the order positional arguments are filled in.
///
/// `found` flags accumulate across parses. Call [`reset`](Self::reset) before
/// reusing a table for another argument vector.
///
/// # Examples
///
/// ```
/// use clover_core::CommandLineOptions;
///
/// let mut verbose = false;
/// let mut count = 1u32;
/// let mut input = String::new();
///
/// let mut opts = CommandLineOptions::new();
/// opts.add_flag(&mut verbose, "verbose", "Enable verbose output");
/// opts.add_uint(&mut count, "count", "N", "Number of runs");
/// opts.add_positional(&mut input, "input", "Input file");
///
/// opts.parse(&["app", "--count=3", "data.txt", "-VERBOSE"]).unwrap();
/// assert!(opts.was_found("count"));
/// drop(opts);
///
/// assert!(verbose);
/// assert_eq!(count, 3);
/// assert_eq!(input, "data.txt");
/// ```
#[derive(Debug, Default)]
pub struct CommandLineOptions<'a> {
    pub(crate) entries: Vec<OptionEntry<'a>>,
}

impl<'a> CommandLineOptions<'a> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a boolean switch matched by `-name`, `--name` or `/name`.
    ///
    /// `value` is set to `true` when the switch is present and left untouched
    /// otherwise. Names match ignoring ASCII case only; non-ASCII letters
    /// must match exactly.
    pub fn add_flag<'d>(
        &mut self,
        value: &'a mut bool,
        name: &str,
        description: impl Into<Option<&'d str>>,
    ) -> Registered<'_, 'a> {
        self.push(OptionEntry::new(
            Target::Flag(value),
            Some(name),
            None,
            description.into(),
        ))
    }

    /// Registers an unsigned integer option matched by `--name=VALUE`.
    ///
    /// The value accepts decimal, `0x`-prefixed hexadecimal and `0`-prefixed
    /// octal forms. Leading whitespace, a sign other than `+`, trailing text
    /// and values above `u32::MAX` are rejected with
    /// [`ParseError::ArgumentValueInvalid`](crate::ParseError::ArgumentValueInvalid)
    /// and `value` is left untouched.
    pub fn add_uint<'d>(
        &mut self,
        value: &'a mut u32,
        name: &str,
        value_desc: &str,
        description: impl Into<Option<&'d str>>,
    ) -> Registered<'_, 'a> {
        self.push(OptionEntry::new(
            Target::UInt(value),
            Some(name),
            Some(value_desc),
            description.into(),
        ))
    }

    /// Registers a string option matched by `--name=VALUE`.
    ///
    /// Without a `value_desc` the option is positional instead: it takes the
    /// next unprefixed token not already claimed by an earlier positional,
    /// and `name` is only used for usage text and [`was_found`](Self::was_found).
    ///
    /// # Examples
    ///
    /// ```
    /// use clover_core::{CommandLineOptions, OptionKind};
    ///
    /// let mut output = String::new();
    /// let mut input = String::new();
    /// let mut opts = CommandLineOptions::new();
    /// opts.add_string(&mut output, "output", "PATH", "Output file");
    /// opts.add_string(&mut input, "input", None, "Input file");
    ///
    /// let kinds: Vec<_> = opts.options().iter().map(|o| o.kind).collect();
    /// assert_eq!(kinds, vec![OptionKind::String, OptionKind::Positional]);
    /// ```
    pub fn add_string<'v, 'd>(
        &mut self,
        value: &'a mut String,
        name: &str,
        value_desc: impl Into<Option<&'v str>>,
        description: impl Into<Option<&'d str>>,
    ) -> Registered<'_, 'a> {
        let value_desc = value_desc.into();
        let target = match value_desc {
            Some(_) => Target::String(value),
            None => Target::Positional(value),
        };
        self.push(OptionEntry::new(
            target,
            Some(name),
            value_desc,
            description.into(),
        ))
    }

    /// Registers a positional argument. Same as [`add_string`](Self::add_string)
    /// with no value description.
    pub fn add_positional<'d>(
        &mut self,
        value: &'a mut String,
        name: &str,
        description: impl Into<Option<&'d str>>,
    ) -> Registered<'_, 'a> {
        self.add_string(value, name, None::<&str>, description)
    }

    /// Inserts a blank line into the usage option list at this position.
    pub fn add_usage_newline(&mut self) {
        self.push(OptionEntry::new(Target::Newline, None, None, None));
    }

    fn push(&mut self, entry: OptionEntry<'a>) -> Registered<'_, 'a> {
        trace!(name = ?entry.name, kind = ?entry.kind(), "Registered command line option");
        self.entries.push(entry);
        let index = self.entries.len() - 1;
        Registered {
            entry: &mut self.entries[index],
        }
    }

    /// Number of registered descriptors, optionally counting usage newlines.
    ///
    /// # Examples
    ///
    /// ```
    /// use clover_core::CommandLineOptions;
    ///
    /// let mut quiet = false;
    /// let mut opts = CommandLineOptions::new();
    /// opts.add_flag(&mut quiet, "quiet", None);
    /// opts.add_usage_newline();
    ///
    /// assert_eq!(opts.option_count(false), 1);
    /// assert_eq!(opts.option_count(true), 2);
    /// ```
    pub fn option_count(&self, include_newlines: bool) -> usize {
        self.entries
            .iter()
            .filter(|e| include_newlines || e.kind() != OptionKind::Newline)
            .count()
    }

    /// Whether the option named `name` matched a token.
    ///
    /// Lookup ignores ASCII case only, the same as matching during
    /// [`parse`](Self::parse): `"über"` and `"ÜBER"` are different names.
    /// Unknown names report `false`.
    pub fn was_found(&self, name: &str) -> bool {
        self.entries
            .iter()
            .find(|e| e.has_name(name))
            .is_some_and(|e| e.found)
    }

    /// Clears every `found` flag so the table can parse another argument
    /// vector. Output values are left as they are.
    pub fn reset(&mut self) {
        for entry in &mut self.entries {
            entry.found = false;
        }
    }

    /// Snapshot of the table in registration order.
    pub fn options(&self) -> Vec<OptionInfo> {
        self.entries.iter().map(OptionEntry::info).collect()
    }

    /// Names of the positional arguments in the order they are filled.
    pub fn positional_names(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.kind() == OptionKind::Positional)
            .filter_map(|e| e.name.as_deref())
            .collect()
    }
}
