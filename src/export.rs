//! Loading a complete WhatsApp export.
//!
//! An export archive holds one transcript (`_chat.txt`, or any other `.txt`
//! at the archive root) next to the media files it references. [`ChatExport`]
//! locates and parses the transcript up front and keeps the archive open so
//! attachments can be resolved lazily.

use std::sync::Arc;

use tracing::debug;

use crate::archive::{Archive, ArchiveEntry};
use crate::attachment::{ResolvedAttachment, resolve_attachment};
use crate::chat::ParsedChat;
use crate::config::ParserConfig;
use crate::error::{ChatzipError, Result};
use crate::parser::ChatParser;

/// Returns the transcript entry: the first root-level entry ending in `.txt`
/// (case-insensitive).
///
/// ```
/// use chatzip::archive::MemoryArchive;
/// use chatzip::export::find_transcript_entry;
///
/// let archive = MemoryArchive::new()
///     .with_entry("media/notes.txt", "")
///     .with_entry("_chat.TXT", "");
///
/// assert_eq!(find_transcript_entry(&archive).unwrap().name, "_chat.TXT");
/// ```
pub fn find_transcript_entry<A>(archive: &A) -> Option<&ArchiveEntry>
where
    A: Archive + ?Sized,
{
    archive.entries().iter().find(|e| {
        let name = e.name.as_str();
        e.is_root()
            && name.len() > ".txt".len()
            && name
                .get(name.len() - 4..)
                .is_some_and(|ext| ext.eq_ignore_ascii_case(".txt"))
    })
}

/// Display name for an export file: the file name without a `.zip` suffix.
///
/// ```
/// use chatzip::export::export_name;
///
/// assert_eq!(export_name("WhatsApp Chat - Ann.ZIP"), "WhatsApp Chat - Ann");
/// assert_eq!(export_name("chat.tar"), "chat.tar");
/// ```
pub fn export_name(file_name: &str) -> &str {
    let cut = file_name.len().saturating_sub(4);
    match file_name.get(cut..) {
        Some(ext) if cut > 0 && ext.eq_ignore_ascii_case(".zip") => &file_name[..cut],
        _ => file_name,
    }
}

/// A parsed chat together with the archive it came from.
pub struct ChatExport {
    /// Display name, usually the archive file name without `.zip`.
    pub name: String,
    pub chat: ParsedChat,
    /// The viewer, guessed from participant names unless set explicitly.
    pub you: Option<String>,
    archive: Arc<dyn Archive>,
}

impl ChatExport {
    /// Opens a `.zip` export from disk.
    ///
    /// # Errors
    ///
    /// - [`ChatzipError::Io`] / [`ChatzipError::Zip`] if the file is not a
    ///   readable zip
    /// - [`ChatzipError::MissingTranscript`] if there is no root `.txt`
    #[cfg(feature = "zip-archive")]
    pub fn open(path: impl AsRef<std::path::Path>, config: ParserConfig) -> Result<Self> {
        let path = path.as_ref();
        let archive = crate::archive::ZipArchive::open(path)?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self::from_archive(archive, export_name(&file_name), config).map_err(|e| match e {
            ChatzipError::MissingTranscript { .. } => ChatzipError::missing_transcript(path),
            other => other,
        })
    }

    /// Parses the transcript found in `archive`.
    pub fn from_archive<A>(archive: A, name: impl Into<String>, config: ParserConfig) -> Result<Self>
    where
        A: Archive + 'static,
    {
        let name = name.into();
        let entry = find_transcript_entry(&archive)
            .ok_or_else(|| ChatzipError::missing_transcript(&name))?
            .name
            .clone();

        let text = archive.read_text(&entry)?;
        let chat = ChatParser::with_config(config).parse_str(&text);
        let you = chat.guess_you().map(str::to_string);

        debug!(
            export = %name,
            transcript = %entry,
            messages = chat.len(),
            participants = chat.participants.len(),
            "loaded chat export"
        );

        Ok(Self {
            name,
            chat,
            you,
            archive: Arc::new(archive),
        })
    }

    /// Overrides the guessed viewer.
    #[must_use]
    pub fn with_you(mut self, you: impl Into<String>) -> Self {
        self.you = Some(you.into());
        self
    }

    /// The underlying archive, shareable across threads.
    pub fn archive(&self) -> Arc<dyn Archive> {
        Arc::clone(&self.archive)
    }

    /// Resolves one attachment token against the export archive.
    pub fn resolve(&self, token: &str) -> Result<ResolvedAttachment> {
        resolve_attachment(self.archive.as_ref(), token)
    }

    /// One-line summary, e.g. `Loaded 3 messages. Participants: Ann, Bob`.
    pub fn status_line(&self) -> String {
        status_line(&self.chat)
    }
}

impl std::fmt::Debug for ChatExport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatExport")
            .field("name", &self.name)
            .field("messages", &self.chat.len())
            .field("participants", &self.chat.participants)
            .field("you", &self.you)
            .field("entries", &self.archive.len())
            .finish()
    }
}

/// Summary line for a parsed chat. An empty participant list shows as `—`.
pub fn status_line(chat: &ParsedChat) -> String {
    let participants = if chat.participants.is_empty() {
        "—".to_string()
    } else {
        chat.participants.join(", ")
    };
    format!("Loaded {} messages. Participants: {}", chat.len(), participants)
}
