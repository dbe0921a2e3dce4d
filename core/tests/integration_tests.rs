//! End-to-end tests for option registration, parsing, and usage output.

use clover_core::{CommandLineOptions, OptionKind, ParseError, ParseStatus};

/// Output variables for a typical tool.
#[derive(Debug, Default)]
struct Settings {
    verbose: bool,
    count: u32,
    output: String,
    input: String,
    extra: String,
}

fn register<'a>(opts: &mut CommandLineOptions<'a>, settings: &'a mut Settings) {
    opts.add_flag(&mut settings.verbose, "verbose", "Enable verbose output");
    opts.add_uint(&mut settings.count, "count", "N", "Number of iterations");
    opts.add_string(&mut settings.output, "output", "PATH", "Where to write results");
    opts.add_usage_newline();
    opts.add_positional(&mut settings.input, "input", "File to read");
    opts.add_positional(&mut settings.extra, "extra", None);
}

fn parse(args: &[&str]) -> (Result<(), ParseError>, Settings, Vec<bool>) {
    let mut settings = Settings::default();
    let (result, found) = {
        let mut opts = CommandLineOptions::new();
        register(&mut opts, &mut settings);
        let result = opts.parse(args);
        let found = opts.options().iter().map(|o| o.found).collect();
        (result, found)
    };
    (result, settings, found)
}

// ---------------------------------------------------------------------------
// Named options
// ---------------------------------------------------------------------------

#[test]
fn uint_option_round_trip() {
    let mut count = 0u32;
    let mut opts = CommandLineOptions::new();
    opts.add_uint(&mut count, "count", "N", None);

    assert_eq!(opts.parse(&["app", "--count=42"]), Ok(()));
    assert!(opts.was_found("count"));
    assert!(opts.was_found("COUNT"));
    drop(opts);
    assert_eq!(count, 42);
}

#[test]
fn prefixes_and_case_are_equivalent() {
    for arg in ["--COUNT=7", "-count=7", "/Count=7", "--count=7"] {
        let (result, settings, _) = parse(&["app", arg]);
        assert_eq!(result, Ok(()), "{arg}");
        assert_eq!(settings.count, 7, "{arg}");
    }
}

#[test]
fn missing_value_reports_token_index() {
    for arg in ["--count", "--output"] {
        let (result, _, _) = parse(&["app", "--verbose", arg, "file"]);
        assert_eq!(
            result,
            Err(ParseError::ArgumentExpectingValue {
                index: 2,
                argument: arg.to_string(),
            })
        );
    }
}

#[test]
fn invalid_number_is_rejected() {
    for arg in ["--count=abc", "--count=12x", "--count=", "--count=-3", "--count=99999999999"] {
        let (result, settings, _) = parse(&["app", arg]);
        let err = result.unwrap_err();
        assert_eq!(err.status(), ParseStatus::ErrorArgumentValueInvalid, "{arg}");
        assert_eq!(err.index(), 1);
        assert_eq!(settings.count, 0, "{arg}");
    }
}

#[test]
fn overflow_and_leading_whitespace_are_invalid_values() {
    for arg in ["--count=4294967296", "--count=0x100000000", "--count= 1", "--count=\t7"] {
        let (result, settings, found) = parse(&["app", "--verbose", arg]);
        assert_eq!(
            result,
            Err(ParseError::ArgumentValueInvalid {
                index: 2,
                argument: arg.to_string(),
            }),
            "{arg}"
        );
        assert_eq!(settings.count, 0, "{arg}");
        assert!(!found[1], "{arg}");
    }

    let (result, settings, _) = parse(&["app", "--count=4294967295"]);
    assert_eq!(result, Ok(()));
    assert_eq!(settings.count, u32::MAX);
}

#[test]
fn numeric_bases_are_detected() {
    let cases = [("--count=0x20", 32), ("--count=020", 16), ("--count=20", 20)];
    for (arg, expected) in cases {
        let (result, settings, _) = parse(&["app", arg]);
        assert_eq!(result, Ok(()));
        assert_eq!(settings.count, expected, "{arg}");
    }
}

#[test]
fn string_value_is_stored_verbatim() {
    let (result, settings, _) = parse(&["app", "--output=C:\\out dir\\x=1.txt"]);
    assert_eq!(result, Ok(()));
    assert_eq!(settings.output, "C:\\out dir\\x=1.txt");
}

#[test]
fn flag_does_not_accept_a_value() {
    let (result, settings, _) = parse(&["app", "--verbose=yes"]);
    assert_eq!(
        result,
        Err(ParseError::UnrecognisedArgument {
            index: 1,
            argument: "--verbose=yes".to_string(),
        })
    );
    assert!(!settings.verbose);
}

#[test]
fn name_prefix_followed_by_other_text_does_not_match() {
    let (result, _, _) = parse(&["app", "--counter=3"]);
    assert!(matches!(
        result,
        Err(ParseError::UnrecognisedArgument { index: 1, .. })
    ));
}

#[test]
fn first_registered_match_wins() {
    let mut short = String::new();
    let mut long = String::new();
    let mut opts = CommandLineOptions::new();
    opts.add_string(&mut short, "out", "PATH", None);
    opts.add_string(&mut long, "output", "PATH", None);

    // "output=x" starts with "out" but the next character is neither '=' nor
    // the end, so the search moves on to "output".
    assert_eq!(opts.parse(&["app", "--output=x", "--out=y"]), Ok(()));
    drop(opts);
    assert_eq!(short, "y");
    assert_eq!(long, "x");
}

#[test]
fn repeated_named_option_keeps_last_value() {
    let (result, settings, _) = parse(&["app", "--count=1", "--count=2"]);
    assert_eq!(result, Ok(()));
    assert_eq!(settings.count, 2);
}

// ---------------------------------------------------------------------------
// Positional arguments
// ---------------------------------------------------------------------------

#[test]
fn positionals_fill_in_registration_order() {
    let (result, settings, _) = parse(&["app", "first", "--verbose", "second"]);
    assert_eq!(result, Ok(()));
    assert_eq!(settings.input, "first");
    assert_eq!(settings.extra, "second");
    assert!(settings.verbose);
}

#[test]
fn surplus_positional_is_unrecognised() {
    let (result, settings, _) = parse(&["app", "a", "b", "c", "d"]);
    assert_eq!(
        result,
        Err(ParseError::UnrecognisedArgument {
            index: 3,
            argument: "c".to_string(),
        })
    );
    assert_eq!(settings.input, "a");
    assert_eq!(settings.extra, "b");
}

#[test]
fn parsing_stops_at_first_failure() {
    let (result, settings, _) = parse(&["app", "--count=5", "--bogus", "--verbose"]);
    assert_eq!(result.unwrap_err().index(), 2);
    assert_eq!(settings.count, 5);
    assert!(!settings.verbose);
}

#[test]
fn program_name_is_skipped() {
    let (result, settings, _) = parse(&["--verbose"]);
    assert_eq!(result, Ok(()));
    assert!(!settings.verbose);

    let (result, _, _) = parse(&[]);
    assert_eq!(result, Ok(()));
}

// ---------------------------------------------------------------------------
// Help
// ---------------------------------------------------------------------------

#[test]
fn help_short_circuits_anywhere() {
    for help in ["-h", "-?", "--help", "/help", "/?", "--H"] {
        let (result, settings, _) = parse(&["app", "--count=3", help, "--count=bad", "--nope"]);
        assert_eq!(result, Err(ParseError::HelpRequested { index: 2 }), "{help}");
        assert!(result.unwrap_err().is_help());
        assert_eq!(settings.count, 3);
    }
}

#[test]
fn bare_help_word_is_a_positional() {
    let (result, settings, _) = parse(&["app", "help"]);
    assert_eq!(result, Ok(()));
    assert_eq!(settings.input, "help");
}

// ---------------------------------------------------------------------------
// Found flags and queries
// ---------------------------------------------------------------------------

#[test]
fn found_flags_track_matched_tokens() {
    let (result, _, found) = parse(&["app", "--output=x", "in.txt"]);
    assert_eq!(result, Ok(()));
    // verbose, count, output, newline, input, extra
    assert_eq!(found, vec![false, false, true, false, true, false]);
}

#[test]
fn found_flags_survive_partial_parse() {
    let (result, _, found) = parse(&["app", "--verbose", "--count=x"]);
    assert!(result.is_err());
    assert_eq!(found, vec![true, false, false, false, false, false]);
}

#[test]
fn reset_allows_reuse() {
    let mut input = String::new();
    let mut opts = CommandLineOptions::new();
    opts.add_positional(&mut input, "input", None);

    assert_eq!(opts.parse(&["app", "one"]), Ok(()));
    assert!(opts.parse(&["app", "two"]).is_err());
    opts.reset();
    assert!(!opts.was_found("input"));
    assert_eq!(opts.parse(&["app", "two"]), Ok(()));
    drop(opts);
    assert_eq!(input, "two");
}

#[test]
fn option_count_is_unaffected_by_parse_and_usage() {
    let mut settings = Settings::default();
    let mut opts = CommandLineOptions::new();
    register(&mut opts, &mut settings);

    assert_eq!(opts.option_count(false), 5);
    assert_eq!(opts.option_count(true), 6);
    let _ = opts.parse(&["app", "--verbose", "x"]);
    let _ = opts.render_usage("app", 100);
    assert_eq!(opts.option_count(false), 5);
    assert_eq!(opts.option_count(true), 6);
}

#[test]
fn parse_os_accepts_os_strings() {
    let mut verbose = false;
    let mut opts = CommandLineOptions::new();
    opts.add_flag(&mut verbose, "verbose", None);

    let args = ["app", "--verbose"].map(std::ffi::OsString::from);
    assert_eq!(opts.parse_os(args), Ok(()));
    drop(opts);
    assert!(verbose);
}

// ---------------------------------------------------------------------------
// Usage
// ---------------------------------------------------------------------------

#[test]
fn usage_lists_options_in_registration_order() {
    let mut settings = Settings::default();
    let mut opts = CommandLineOptions::new();
    register(&mut opts, &mut settings);

    // Widest label is "output=PATH" (11), so descriptions start at column 19.
    let expected = "\
usage: tool [options] input extra
options:
    --verbose      Enable verbose output
    --count=N      Number of iterations
    --output=PATH  Where to write results

    --input        File to read
    --extra
";
    assert_eq!(opts.render_usage("tool", 100), expected);

    let kinds: Vec<OptionKind> = opts.options().iter().map(|o| o.kind).collect();
    assert_eq!(kinds[3], OptionKind::Newline);
}

#[test]
fn usage_wraps_long_descriptions_at_column() {
    let mut flag = false;
    let description = "one two three four five six seven eight nine ten eleven twelve";
    let mut opts = CommandLineOptions::new();
    opts.add_flag(&mut flag, "flag", description);

    let usage = opts.render_usage("app", 40);
    let body: Vec<&str> = usage.lines().skip(2).collect();
    assert!(body.len() > 1, "{usage}");
    for line in &body[1..] {
        assert_eq!(&line[..12], " ".repeat(12));
        assert_ne!(line.as_bytes()[12], b' ');
    }
    for line in &body {
        // Lines only break at the first space past the width, so no line
        // overshoots by more than one word.
        let last_space = line.rfind(' ').unwrap_or(0);
        assert!(last_space <= 41, "{line}");
    }
}
