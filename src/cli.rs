//! Command-line interface definition using clap.
//!
//! - [`Args`] - CLI argument structure
//! - [`OutputFormat`] - output format as a clap value enum

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, ValueEnum};

use crate::config::{OutputConfig, ParserConfig, TrimMode};

/// Default output file stem when `--output` is not given.
pub const DEFAULT_OUTPUT_STEM: &str = "chat";

/// Convert WhatsApp chat exports (.zip or _chat.txt) into JSON, JSONL or CSV
/// and extract their media.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatzip")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatzip \"WhatsApp Chat - Ann.zip\"
    chatzip export.zip -o messages.csv
    chatzip _chat.txt -f jsonl --legacy-trim --skip-empty
    chatzip export.zip --participants
    chatzip export.zip --extract media/ --you \"Ann\"")]
pub struct Args {
    /// Path to a .zip export or a bare .txt transcript
    pub input: PathBuf,

    /// Path to output file [default: chat.<format extension>]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format [default: from --output extension, else json]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Treat this participant as the viewer instead of guessing
    #[arg(long, value_name = "NAME")]
    pub you: Option<String>,

    /// Print participants and exit without writing output
    #[arg(long)]
    pub participants: bool,

    /// Write every resolvable attachment into this directory
    #[arg(long, value_name = "DIR")]
    pub extract: Option<PathBuf>,

    /// Detect system notifications and include them in the output
    #[arg(long)]
    pub system: bool,

    /// Leave out messages with no text and no attachments
    #[arg(long)]
    pub skip_empty: bool,

    /// Trim message text like the original viewer did (drops a trailing '%')
    #[arg(long)]
    pub legacy_trim: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Output configuration selected by the flags.
    pub fn output_config(&self) -> OutputConfig {
        let mut config = OutputConfig::new();
        if self.system {
            config = config.with_system();
        }
        if self.skip_empty {
            config = config.with_skip_empty();
        }
        config
    }

    /// Parser configuration selected by the flags.
    pub fn parser_config(&self) -> ParserConfig {
        let trim_mode = if self.legacy_trim {
            TrimMode::Sentinel
        } else {
            TrimMode::Plain
        };

        ParserConfig::new()
            .with_trim_mode(trim_mode)
            .with_detect_system_messages(self.system)
    }

    /// Output format: explicit flag, then output extension, then JSON.
    pub fn output_format(&self) -> crate::format::OutputFormat {
        if let Some(format) = self.format {
            return format.into();
        }
        self.output
            .as_deref()
            .and_then(|p| crate::format::OutputFormat::from_path(p).ok())
            .unwrap_or_default()
    }

    /// Output path, defaulting to `chat.<ext>` in the working directory.
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            PathBuf::from(format!(
                "{DEFAULT_OUTPUT_STEM}.{}",
                self.output_format().extension()
            ))
        })
    }

    /// Returns `true` if the input looks like a bare transcript.
    pub fn is_transcript_input(&self) -> bool {
        is_txt(&self.input)
    }
}

fn is_txt(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum OutputFormat {
    /// JSON array of messages
    Json,

    /// JSON Lines - one JSON object per line
    #[value(alias = "ndjson")]
    Jsonl,

    /// CSV with semicolon delimiter
    Csv,
}

impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
        }
    }
}
