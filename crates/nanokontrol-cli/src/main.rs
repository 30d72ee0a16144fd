use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use glob::glob;
use nanokontrol_core::protocols::{bitpack, frame};
use nanokontrol_core::{
    DecodeOptions, DumpError, FrameError, GlobalChannel, IoSink, IoSource, RecordError,
    SettingsDocument, format_hex_bytes, hexdump,
};
use nanokontrol_core::{DumpSource, decode_dump_file, write_document};
use tracing::Level;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("NANOKONTROL_BUILD_COMMIT"),
    " ",
    env!("NANOKONTROL_BUILD_DATE"),
    ")"
);

const DUMP_EXTENSIONS: [&str; 3] = ["syx", "data", "bin"];

#[derive(Parser, Debug)]
#[command(name = "nanokontrol")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Decode and encode nanoKONTROL2 scene data dumps (SysEx).",
    long_about = None,
    after_help = "Examples:\n  nanokontrol dump request\n  nanokontrol dump decode scene.syx -o scene.json\n  nanokontrol dump encode scene.json -o restore.syx"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on scene data dump captures.
    Dump {
        #[command(subcommand)]
        command: DumpCommands,
    },
}

#[derive(Subcommand, Debug)]
enum DumpCommands {
    /// Decode a 402-byte scene dump into a versioned JSON settings document.
    #[command(alias = "read")]
    #[command(
        after_help = "Examples:\n  nanokontrol dump decode scene.syx -o scene.json\n  nanokontrol dump read scene.syx --stdout --pretty"
    )]
    Decode {
        /// Path to a .syx, .data or .bin capture
        input: PathBuf,

        /// Output document path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        output: Option<PathBuf>,

        /// Write the JSON document to stdout
        #[arg(long, conflicts_with = "output")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,

        /// Reject unrecognized enumeration values instead of keeping them
        #[arg(long, conflicts_with = "lenient")]
        strict: bool,

        /// Report nonzero reserved bytes instead of rejecting the dump
        #[arg(long)]
        lenient: bool,

        /// List decode issues after decoding
        #[arg(long)]
        list_issues: bool,
    },
    /// Encode a JSON settings document into a device-writable scene dump.
    #[command(alias = "write")]
    Encode {
        /// Path to a JSON settings document
        input: PathBuf,

        /// Output dump path
        #[arg(short = 'o', long)]
        output: PathBuf,

        /// Encode unrecognized enumeration values verbatim
        #[arg(long)]
        allow_unrecognized: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },
    /// Print a capture as hex rows at a given decode stage.
    Hexdump {
        /// Path to a .syx, .data or .bin capture
        input: PathBuf,

        /// Stage to print
        #[arg(long, value_enum, default_value_t = Stage::Frame)]
        stage: Stage,

        /// Bytes per row
        #[arg(long, default_value_t = 8, value_parser = clap::value_parser!(u16).range(1..))]
        stride: u16,
    },
    /// Print the SysEx message that requests the current scene dump.
    Request {
        /// Global MIDI channel of the device (0-15)
        #[arg(long, default_value_t = GlobalChannel::default(), value_parser = parse_global_channel)]
        global_channel: GlobalChannel,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Stage {
    /// Raw 402-byte frame
    Frame,
    /// 388-byte 7-bit packed payload
    Packed,
    /// 339-byte unpacked scene record
    Natural,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Dump { command } => match command {
            DumpCommands::Decode {
                input,
                output,
                stdout,
                pretty,
                compact,
                quiet,
                strict,
                lenient,
                list_issues,
            } => cmd_dump_decode(
                input,
                output,
                DecodeFlags {
                    stdout,
                    pretty,
                    compact,
                    quiet,
                    strict,
                    lenient,
                    list_issues,
                },
            ),
            DumpCommands::Encode {
                input,
                output,
                allow_unrecognized,
                quiet,
            } => cmd_dump_encode(input, output, allow_unrecognized, quiet),
            DumpCommands::Hexdump {
                input,
                stage,
                stride,
            } => cmd_dump_hexdump(input, stage, stride as usize),
            DumpCommands::Request { global_channel } => cmd_dump_request(global_channel),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err), None)
    }
}

#[derive(Debug, Clone, Copy)]
struct DecodeFlags {
    stdout: bool,
    pretty: bool,
    compact: bool,
    quiet: bool,
    strict: bool,
    lenient: bool,
    list_issues: bool,
}

impl DecodeFlags {
    fn options(&self) -> DecodeOptions {
        if self.strict {
            DecodeOptions::strict()
        } else if self.lenient {
            DecodeOptions::lenient()
        } else {
            DecodeOptions::default()
        }
    }
}

fn cmd_dump_decode(
    input: PathBuf,
    output: Option<PathBuf>,
    flags: DecodeFlags,
) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&input)?;
    validate_dump_file(&resolved_input)?;
    let output = if flags.stdout {
        None
    } else {
        let output = output.ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--output or --stdout".to_string()),
            )
        })?;
        ensure_distinct_output(&resolved_input, &output)?;
        Some(output)
    };

    let document = decode_dump_file(&resolved_input, &flags.options()).map_err(|err| {
        let hint = match &err {
            DumpError::Frame(FrameError::Record(RecordError::ReservedByte { .. })) => Some(
                "use --lenient to report reserved bytes instead of rejecting".to_string(),
            ),
            _ => None,
        };
        CliError::new(format!("scene dump decode failed: {err}"), hint)
    })?;
    let json = serialize_document(&document, flags.pretty, flags.compact)?;

    match output {
        None => {
            println!("{}", json);
        }
        Some(output) => {
            create_parent_dir(&output)?;
            fs::write(&output, json)
                .with_context(|| format!("Failed to write document: {}", output.display()))?;
            if !flags.quiet {
                eprintln!("OK: document written -> {}", output.display());
            }
        }
    }

    if flags.list_issues && !flags.quiet {
        print_issues(&document);
    }
    Ok(())
}

fn cmd_dump_encode(
    input: PathBuf,
    output: PathBuf,
    allow_unrecognized: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&input)?;
    if !resolved_input.is_file() {
        return Err(CliError::new(
            format!("input file not found: {}", resolved_input.display()),
            Some("pass a JSON document written by `nanokontrol dump decode`".to_string()),
        ));
    }
    ensure_distinct_output(&resolved_input, &output)?;

    let json = fs::read_to_string(&resolved_input)
        .with_context(|| format!("Failed to read document: {}", resolved_input.display()))?;
    let document: SettingsDocument = serde_json::from_str(&json).map_err(|err| {
        CliError::new(
            format!("invalid settings document: {err}"),
            Some("compare the document with `nanokontrol dump decode` output".to_string()),
        )
    })?;

    if !allow_unrecognized {
        document.settings.require_known().map_err(|err| {
            CliError::new(
                err.to_string(),
                Some("fix the value or pass --allow-unrecognized".to_string()),
            )
        })?;
    }

    create_parent_dir(&output)?;
    let mut sink = IoSink::create(&output)
        .with_context(|| format!("Failed to create output: {}", output.display()))?;
    let written = write_document(&document, &mut sink)
        .with_context(|| format!("Failed to write dump: {}", output.display()))?;
    if !quiet {
        eprintln!("OK: {} bytes written -> {}", written, output.display());
    }
    Ok(())
}

fn cmd_dump_hexdump(input: PathBuf, stage: Stage, stride: usize) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&input)?;
    validate_dump_file(&resolved_input)?;
    let raw = IoSource::open(&resolved_input)
        .and_then(|mut source| source.read_dump())
        .with_context(|| format!("Failed to read capture: {}", resolved_input.display()))?;

    let bytes = match stage {
        Stage::Frame => raw,
        Stage::Packed | Stage::Natural => {
            let parts = frame::split_frame(&raw).context("invalid scene dump frame")?;
            if stage == Stage::Packed {
                parts.packed.to_vec()
            } else {
                bitpack::unpack(parts.packed)
            }
        }
    };
    print!("{}", hexdump(&bytes, stride));
    Ok(())
}

fn cmd_dump_request(global_channel: GlobalChannel) -> Result<(), CliError> {
    let message = frame::dump_request(global_channel);
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", format_hex_bytes(&message)).context("Failed to write to stdout")?;
    Ok(())
}

fn parse_global_channel(value: &str) -> Result<GlobalChannel, String> {
    let value: u8 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a channel number"))?;
    GlobalChannel::new(value).map_err(|err| err.to_string())
}

fn serialize_document(
    document: &SettingsDocument,
    pretty: bool,
    compact: bool,
) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(document)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(document)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn print_issues(document: &SettingsDocument) {
    if document.issues.is_empty() {
        eprintln!("No decode issues.");
        return;
    }
    eprintln!("Decode issues:");
    for issue in &document.issues {
        eprintln!("  {} {} ({})", issue.id, issue.severity, issue.message);
    }
}

fn create_parent_dir(output: &Path) -> Result<(), CliError> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    Ok(())
}

fn ensure_distinct_output(input: &Path, output: &Path) -> Result<(), CliError> {
    let input_abs = fs::canonicalize(input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    let output_dir = output
        .parent()
        .map(|parent| {
            if parent.as_os_str().is_empty() {
                fs::canonicalize(".")
            } else {
                fs::canonicalize(parent)
            }
        })
        .transpose();
    // A missing output directory cannot contain the input.
    let Ok(Some(output_dir)) = output_dir else {
        return Ok(());
    };
    let file_name = output
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid output path"))?;
    if output_dir.join(file_name) == input_abs {
        return Err(CliError::new(
            format!("output path must differ from input: {}", output.display()),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn validate_dump_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("capture one with `amidi -S \"$(nanokontrol dump request)\" -r scene.syx`".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("use a .syx, .data or .bin capture".to_string()),
        ));
    }
    let ext = input
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if !DUMP_EXTENSIONS.contains(&ext.as_str()) {
        return Err(CliError::new(
            format!("unsupported input format '{}'", input.display()),
            Some("expected a .syx, .data or .bin capture".to_string()),
        ));
    }
    Ok(())
}

/// Expand a quoted pattern such as `captures/scene-*.syx` to exactly one file.
fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !pattern.contains(['*', '?', '[']) {
        return Ok(input.to_path_buf());
    }

    let mut matches = glob(&pattern)
        .map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err.msg)),
            )
        })?
        .filter_map(Result::ok)
        .filter(|path| path.is_file());

    let first = matches.next().ok_or_else(|| {
        CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        )
    })?;
    if let Some(second) = matches.next() {
        return Err(CliError::new(
            format!(
                "pattern '{}' matches more than one capture ({}, {}, ...)",
                pattern,
                first.display(),
                second.display()
            ),
            Some("pass a single capture".to_string()),
        ));
    }
    Ok(first)
}
