//! JSON output writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::MessageRecord;
use crate::Message;
use crate::config::OutputConfig;
use crate::error::Result;

/// Writes messages to a JSON file as a pretty-printed array.
///
/// # Format
/// ```json
/// [
///   {"date": "1/1/20", "time": "1:00 AM", "sender": "Ann", "text": "hi"},
///   {"date": "1/1/20", "time": "1:01 AM", "sender": "Bob", "text": "", "attachments": ["a.jpg"]}
/// ]
/// ```
pub fn write_json(
    messages: &[Message],
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<()> {
    let json = to_json(messages, config)?;
    let mut writer = BufWriter::new(File::create(output_path)?);
    writer.write_all(json.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Converts messages to a JSON array string.
pub fn to_json(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let records: Vec<MessageRecord<'_>> = messages
        .iter()
        .filter(|m| config.includes(m))
        .map(MessageRecord::from)
        .collect();

    Ok(serde_json::to_string_pretty(&records)?)
}
