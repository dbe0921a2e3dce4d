use std::io::{self, Write};
use std::process::ExitCode;

use clover_core::{
    CommandLineOptions, DEFAULT_TARGET_WIDTH, OptionInfo, ParseError, ParseStatus, program_name,
};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Values filled in by the command line.
#[derive(Debug, Serialize)]
struct Settings {
    verbose: bool,
    json: bool,
    retries: u32,
    block_size: u32,
    width: u32,
    mode: String,
    source: String,
    dest: String,
    dry_run: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            verbose: false,
            json: false,
            retries: 3,
            block_size: 4096,
            width: DEFAULT_TARGET_WIDTH as u32,
            mode: "copy".to_string(),
            source: String::new(),
            dest: String::new(),
            dry_run: false,
        }
    }
}

/// JSON document printed by `--json`.
#[derive(Debug, Serialize)]
struct Report<'s> {
    status: ParseStatus,
    settings: &'s Settings,
    options: Vec<OptionInfo>,
}

fn register<'a>(opts: &mut CommandLineOptions<'a>, settings: &'a mut Settings) {
    opts.add_flag(&mut settings.verbose, "verbose", "Print each block as it is transferred.");
    opts.add_flag(&mut settings.json, "json", "Print the parsed settings and option table as JSON.");
    opts.add_uint(
        &mut settings.retries,
        "retries",
        "N",
        "Number of times a failed block is retried before the transfer is abandoned. \
         Accepts decimal, octal (leading 0) and hexadecimal (leading 0x) values.",
    );
    opts.add_uint(&mut settings.block_size, "block-size", "BYTES", "Transfer block size.");
    opts.add_string(&mut settings.mode, "mode", "NAME", "Transfer mode: copy, move or verify.");
    opts.add_uint(&mut settings.width, "width", "COLUMNS", "Wrap width for this usage text.");
    opts.add_flag(&mut settings.dry_run, "dry-run", None).hidden();
    opts.add_usage_newline();
    opts.add_positional(&mut settings.source, "source", "File to read.");
    opts.add_positional(&mut settings.dest, "dest", "File to write.");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = std::env::args_os()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> io::Result<ExitCode> {
    let mut settings = Settings::default();

    let (result, options) = {
        let mut opts = CommandLineOptions::new();
        register(&mut opts, &mut settings);
        let result = opts.parse(args);
        (result, opts.options())
    };

    debug!(status = ?ParseStatus::of(&result), "Parsed command line");

    let stderr = &mut io::stderr().lock();
    match result {
        Ok(()) => {}
        Err(ParseError::HelpRequested { .. }) => {
            stderr.write_all(usage(settings.width).as_bytes())?;
            return Ok(ExitCode::SUCCESS);
        }
        Err(e) => {
            debug!(index = e.index(), error = %e, "Rejected command line");
            writeln!(stderr, "error: {e}.")?;
            stderr.write_all(usage(DEFAULT_TARGET_WIDTH as u32).as_bytes())?;
            return Ok(ExitCode::FAILURE);
        }
    }

    let stdout = &mut io::stdout().lock();
    if settings.json {
        let report = Report {
            status: ParseStatus::Ok,
            settings: &settings,
            options,
        };
        serde_json::to_writer_pretty(&mut *stdout, &report).map_err(io::Error::other)?;
        writeln!(stdout)?;
    } else {
        print_summary(stdout, &settings, &options)?;
    }

    Ok(ExitCode::SUCCESS)
}

/// Usage text for the option table, wrapped at `width`.
fn usage(width: u32) -> String {
    let mut scratch = Settings::default();
    let mut opts = CommandLineOptions::new();
    register(&mut opts, &mut scratch);
    opts.render_usage(&program_name(), width as usize)
}

fn print_summary(out: &mut impl Write, settings: &Settings, options: &[OptionInfo]) -> io::Result<()> {
    writeln!(out, "mode:       {}", settings.mode)?;
    writeln!(out, "source:     {}", display_or_unset(&settings.source))?;
    writeln!(out, "dest:       {}", display_or_unset(&settings.dest))?;
    writeln!(out, "retries:    {}", settings.retries)?;
    writeln!(out, "block size: {}", settings.block_size)?;
    writeln!(out, "verbose:    {}", settings.verbose)?;
    if settings.dry_run {
        writeln!(out, "dry run:    true")?;
    }

    let given: Vec<&str> = options
        .iter()
        .filter(|o| o.found)
        .filter_map(|o| o.name.as_deref())
        .collect();
    writeln!(out, "given:      {}", given.join(", "))
}

fn display_or_unset(value: &str) -> &str {
    if value.is_empty() { "(unset)" } else { value }
}
