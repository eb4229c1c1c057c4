//! # chatzip CLI
//!
//! Command-line interface for the chatzip library.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use chatzip::cli::Args;
use chatzip::export::{ChatExport, export_name, status_line};
use chatzip::format::write_to_format;
use chatzip::parser::ChatParser;
use chatzip::{ChatzipError, ParsedChat};

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("chatzip=debug"),
        _ => EnvFilter::new("chatzip=trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> Result<(), ChatzipError> {
    let total_start = Instant::now();
    let format = args.output_format();
    let output_path = args.output_path();

    println!("📦 chatzip v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input.display());
    if !args.participants {
        println!("💾 Output:  {}", output_path.display());
        println!("📄 Format:  {}", format);
    }
    println!();

    println!("⏳ Parsing {}...", args.input.display());
    let parse_start = Instant::now();
    let (name, chat, you, export) = load(args)?;
    println!("   {} ({:.2}s)", status_line(&chat), parse_start.elapsed().as_secs_f64());

    match &you {
        Some(you) if args.you.is_some() => println!("👤 You:     {}", you),
        Some(you) => println!("👤 You:     {} (guessed)", you),
        None => println!("👤 You:     —"),
    }

    if args.participants {
        println!();
        println!("👥 Participants in {}:", name);
        for p in &chat.participants {
            let marker = if you.as_deref() == Some(p.as_str()) { " (you)" } else { "" };
            println!("   {}{}", p, marker);
        }
        return Ok(());
    }

    if let Some(dir) = &args.extract {
        match &export {
            Some(export) => extract_media(export, dir)?,
            None => warn!("--extract needs a .zip export; a bare transcript has no media"),
        }
    }

    let output_config = args.output_config();

    println!("💾 Writing {}...", format);
    let write_start = Instant::now();
    write_to_format(&chat.messages, &output_path, format, &output_config)?;
    println!("   Written in {:.2}s", write_start.elapsed().as_secs_f64());

    println!();
    println!("✅ Done! Output saved to {}", output_path.display());
    println!("⚡ Total time: {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}

type Loaded = (String, ParsedChat, Option<String>, Option<ChatExport>);

/// Parses the input as a bare transcript or a zip export.
fn load(args: &Args) -> Result<Loaded, ChatzipError> {
    if args.is_transcript_input() {
        let chat = ChatParser::with_config(args.parser_config()).parse(&args.input)?;
        let you = args
            .you
            .clone()
            .or_else(|| chat.guess_you().map(str::to_string));
        let name = args
            .input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        return Ok((name, chat, you, None));
    }

    let mut export = ChatExport::open(&args.input, args.parser_config())?;
    if let Some(you) = &args.you {
        export = export.with_you(you.clone());
    }
    if export.name.is_empty() {
        export.name = export_name(&args.input.to_string_lossy()).to_string();
    }

    Ok((
        export.name.clone(),
        export.chat.clone(),
        export.you.clone(),
        Some(export),
    ))
}

/// Writes every resolvable attachment into `dir`.
///
/// Missing or unreadable attachments are logged and skipped. Each token is
/// written once; an entry whose file name is already taken by a different
/// entry is skipped with a warning instead of overwriting it.
fn extract_media(export: &ChatExport, dir: &Path) -> Result<(), ChatzipError> {
    println!("🖼️  Extracting media to {}...", dir.display());
    fs::create_dir_all(dir)?;

    let mut seen: HashSet<&str> = HashSet::new();
    let mut targets: HashMap<PathBuf, String> = HashMap::new();
    let mut written = 0usize;
    let mut missing = 0usize;
    let mut skipped = 0usize;

    for token in export.chat.attachments() {
        if !seen.insert(token) {
            continue;
        }

        let resolved = match export.resolve(token) {
            Ok(resolved) => resolved,
            Err(e) if e.is_attachment_error() => {
                warn!(attachment = token, error = %e, "attachment missing");
                missing += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        let Some(target) = target_path(dir, &resolved.entry) else {
            warn!(entry = %resolved.entry, "skipping entry without a file name");
            missing += 1;
            continue;
        };

        match targets.get(&target) {
            Some(entry) if *entry == resolved.entry => continue,
            Some(entry) => {
                warn!(
                    entry = %resolved.entry,
                    existing = %entry,
                    target = %target.display(),
                    "file name already extracted from another entry, skipping"
                );
                skipped += 1;
                continue;
            }
            None => {}
        }

        fs::write(&target, &resolved.bytes)?;
        targets.insert(target, resolved.entry);
        written += 1;
    }

    println!("   {} files written, {} missing", written, missing);
    if skipped > 0 {
        println!("   {} skipped (file name already used)", skipped);
    }
    Ok(())
}

/// Destination for an archive entry: its last path component inside `dir`.
fn target_path(dir: &Path, entry: &str) -> Option<PathBuf> {
    let file_name = Path::new(entry).file_name()?;
    Some(dir.join(file_name))
}
