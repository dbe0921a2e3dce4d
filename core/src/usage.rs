//! Usage text rendering.
//!
//! The layout is:
//!
//! ```text
//! usage: PROGRAM [options] ARG ARG ...
//! options:
//!     --NAME=VALUEDESC    DESCRIPTION
//!     ...
//! ```
//!
//! Descriptions start at a shared column, eight characters past the widest
//! `NAME=VALUEDESC`, and wrap at the first space once a line runs past the
//! target width. Continuation lines are indented to the description column.

use std::fmt::Write as _;
use std::io::{self, Write};

use crate::registry::CommandLineOptions;
use crate::types::{OptionEntry, OptionKind};

/// Default wrap width for option descriptions.
pub const DEFAULT_TARGET_WIDTH: usize = 100;

/// Spacing added past the widest option label to find the description column.
pub const COLUMN_GUTTER: usize = 8;

impl CommandLineOptions<'_> {
    /// Renders the usage text for `program`.
    ///
    /// Rendering only reads the table. Hidden options are left out of the
    /// option list, but still count towards the description column.
    ///
    /// # Examples
    ///
    /// ```
    /// use clover_core::CommandLineOptions;
    ///
    /// let mut verbose = false;
    /// let mut level = 0u32;
    /// let mut input = String::new();
    /// let mut opts = CommandLineOptions::new();
    /// opts.add_flag(&mut verbose, "verbose", "be verbose");
    /// opts.add_uint(&mut level, "level", "N", "compression level");
    /// opts.add_positional(&mut input, "input", None).hidden();
    ///
    /// let expected = "\
    /// usage: packer [options] input
    /// options:
    ///     --verbose  be verbose
    ///     --level=N  compression level
    /// ";
    /// assert_eq!(opts.render_usage("packer", 100), expected);
    /// ```
    pub fn render_usage(&self, program: &str, target_width: usize) -> String {
        let labels = self.entries.iter().filter(|e| e.kind().is_named());
        let has_options = labels.clone().next().is_some();
        let col_width = COLUMN_GUTTER + labels.map(label_width).max().unwrap_or(0);

        let mut out = format!("usage: {program}");
        if has_options {
            out.push_str(" [options]");
        }
        for name in self.positional_names() {
            let _ = write!(out, " {name}");
        }
        out.push('\n');

        if has_options {
            out.push_str("options:\n");
            for entry in self.entries.iter().filter(|e| e.include_in_usage) {
                render_entry(&mut out, entry, col_width, target_width);
                out.push('\n');
            }
        }

        out
    }

    /// Writes the usage text to `writer`.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn print_usage<W: Write>(
        &self,
        writer: &mut W,
        program: &str,
        target_width: usize,
    ) -> io::Result<()> {
        writer.write_all(self.render_usage(program, target_width).as_bytes())?;
        writer.flush()
    }

    /// Writes the usage text for the running executable to standard error at
    /// the default width.
    ///
    /// # Errors
    ///
    /// Returns any error writing to standard error.
    pub fn print_usage_stderr(&self) -> io::Result<()> {
        self.print_usage(&mut io::stderr().lock(), &program_name(), DEFAULT_TARGET_WIDTH)
    }
}

/// Width of `NAME` plus `=VALUEDESC` when present.
fn label_width(entry: &OptionEntry<'_>) -> usize {
    let name = entry.name.as_deref().map_or(0, |n| n.chars().count());
    let value = entry
        .value_desc
        .as_deref()
        .map_or(0, |v| v.chars().count() + 1);
    name + value
}

fn render_entry(out: &mut String, entry: &OptionEntry<'_>, col_width: usize, target_width: usize) {
    let mut line = String::new();
    match (entry.kind(), entry.name.as_deref()) {
        (OptionKind::Newline, _) | (_, None) => {}
        (_, Some(name)) => {
            let _ = write!(line, "    --{name}");
        }
    }
    if let Some(value_desc) = entry.value_desc.as_deref() {
        let _ = write!(line, "={value_desc}");
    }

    if let Some(description) = entry.description.as_deref() {
        line.push(' ');
        let mut x = line.chars().count();
        while x < col_width {
            line.push(' ');
            x += 1;
        }
        for c in description.chars() {
            if x > target_width && c == ' ' {
                line.push('\n');
                line.extend(std::iter::repeat_n(' ', col_width));
                x = col_width;
            } else {
                line.push(c);
                x += 1;
            }
        }
    }

    out.push_str(&line);
}

/// Base name of the running executable, for the usage header.
///
/// Falls back to the first process argument, then to `"program"`.
pub fn program_name() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|path| path.to_str().map(program_name_from_path))
        .or_else(|| std::env::args().next().map(|arg| program_name_from_path(&arg)))
        .unwrap_or_else(|| "program".to_string())
}

/// Strips directories (`/` or `\`) and a trailing `.exe` (any case) from an
/// executable path.
///
/// # Examples
///
/// ```
/// use clover_core::program_name_from_path;
///
/// assert_eq!(program_name_from_path("/usr/local/bin/tool"), "tool");
/// assert_eq!(program_name_from_path(r"C:\Tools\Tool.EXE"), "Tool");
/// assert_eq!(program_name_from_path(".exe"), ".exe");
/// ```
pub fn program_name_from_path(path: &str) -> String {
    let base = path.rsplit(['/', '\\']).next().unwrap_or(path);
    let stem = base
        .len()
        .checked_sub(4)
        .filter(|&cut| cut > 0 && base.is_char_boundary(cut))
        .filter(|&cut| base[cut..].eq_ignore_ascii_case(".exe"))
        .map_or(base, |cut| &base[..cut]);
    stem.to_string()
}
