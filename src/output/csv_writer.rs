//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::Message;
use crate::config::OutputConfig;
use crate::error::Result;

const HEADER: [&str; 6] = ["Date", "Time", "Sender", "Text", "Attachments", "Edited"];

/// Writes messages to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `Date`, `Time`, `Sender`, `Text`, `Attachments`, `Edited`
/// - Attachments are joined with `|`; `Edited` is `true` or `false`
/// - Encoding: UTF-8
pub fn write_csv(
    messages: &[Message],
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(file, messages, config)
}

/// Converts messages to a CSV string.
pub fn to_csv(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let mut buf = Vec::new();
    write_records(&mut buf, messages, config)?;
    Ok(String::from_utf8(buf)?)
}

fn write_records<W: Write>(out: W, messages: &[Message], config: &OutputConfig) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(out);

    writer.write_record(HEADER)?;
    for msg in messages.iter().filter(|m| config.includes(m)) {
        let attachments = msg.attachments.join("|");
        writer.write_record([
            msg.date.as_str(),
            msg.time.as_str(),
            msg.sender.as_str(),
            msg.text.as_str(),
            attachments.as_str(),
            if msg.edited { "true" } else { "false" },
        ])?;
    }

    writer.flush()?;
    Ok(())
}
