//! JSON Lines (JSONL) output writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::MessageRecord;
use crate::Message;
use crate::config::OutputConfig;
use crate::error::Result;

/// Writes messages to a JSONL file, one JSON object per line.
pub fn write_jsonl(
    messages: &[Message],
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_lines(&mut writer, messages, config)?;
    writer.flush()?;
    Ok(())
}

/// Converts messages to a JSONL string. Every line, including the last,
/// ends with `\n`.
pub fn to_jsonl(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let mut buf = Vec::new();
    write_lines(&mut buf, messages, config)?;
    Ok(String::from_utf8(buf)?)
}

fn write_lines<W: Write>(writer: &mut W, messages: &[Message], config: &OutputConfig) -> Result<()> {
    for msg in messages.iter().filter(|m| config.includes(m)) {
        serde_json::to_writer(&mut *writer, &MessageRecord::from(msg))?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}
