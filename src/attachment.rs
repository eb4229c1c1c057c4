//! Attachment resolution against an export archive.
//!
//! A transcript refers to media by filename token (`<attached: IMG_001.jpg>`).
//! The archive may store the file at its root or under a directory, so a
//! token matches an entry whose name is exactly the token or ends with
//! `/token`. The first match in archive enumeration order wins.
//!
//! Resolution fails per attachment. A missing or unreadable file never
//! affects the rest of the chat.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::Message;
use crate::archive::{Archive, ArchiveEntry};
use crate::error::{ChatzipError, Result};

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov", "m4v"];

/// Media category derived from a filename extension.
///
/// No content sniffing is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    /// Anything else, offered as a download.
    File,
}

impl MediaKind {
    /// Classifies `name` by the text after its last `.`, case-insensitively.
    ///
    /// ```
    /// use chatzip::attachment::MediaKind;
    ///
    /// assert_eq!(MediaKind::from_filename("IMG_001.JPG"), MediaKind::Image);
    /// assert_eq!(MediaKind::from_filename("VID.m4v"), MediaKind::Video);
    /// assert_eq!(MediaKind::from_filename("notes.pdf"), MediaKind::File);
    /// assert_eq!(MediaKind::from_filename("README"), MediaKind::File);
    /// ```
    pub fn from_filename(name: &str) -> Self {
        let Some((_, ext)) = name.rsplit_once('.') else {
            return MediaKind::File;
        };
        let ext = ext.to_ascii_lowercase();

        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            MediaKind::Image
        } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            MediaKind::Video
        } else {
            MediaKind::File
        }
    }

    pub fn is_image(self) -> bool {
        self == MediaKind::Image
    }

    pub fn is_video(self) -> bool {
        self == MediaKind::Video
    }

    /// A MIME type suitable for a data URL or `Content-Type` header.
    pub fn mime_type(self, name: &str) -> &'static str {
        let ext = name
            .rsplit_once('.')
            .map(|(_, e)| e.to_ascii_lowercase())
            .unwrap_or_default();

        match (self, ext.as_str()) {
            (MediaKind::Image, "jpg" | "jpeg") => "image/jpeg",
            (MediaKind::Image, "png") => "image/png",
            (MediaKind::Image, "gif") => "image/gif",
            (MediaKind::Image, "webp") => "image/webp",
            (MediaKind::Image, "bmp") => "image/bmp",
            (MediaKind::Video, "mp4" | "m4v") => "video/mp4",
            (MediaKind::Video, "webm") => "video/webm",
            (MediaKind::Video, "mov") => "video/quicktime",
            _ => "application/octet-stream",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Image => write!(f, "image"),
            MediaKind::Video => write!(f, "video"),
            MediaKind::File => write!(f, "file"),
        }
    }
}

/// An attachment token matched to archive bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAttachment {
    /// The token as written in the transcript.
    pub name: String,
    /// Name of the matching archive entry.
    pub entry: String,
    pub kind: MediaKind,
    pub bytes: Vec<u8>,
}

impl ResolvedAttachment {
    pub fn mime_type(&self) -> &'static str {
        self.kind.mime_type(&self.name)
    }
}

/// Finds the archive entry for an attachment token, without reading it.
///
/// ```
/// use chatzip::archive::MemoryArchive;
/// use chatzip::attachment::find_attachment_entry;
///
/// let archive = MemoryArchive::new().with_entry("media/IMG_001.jpg", vec![1]);
///
/// let entry = find_attachment_entry(&archive, "IMG_001.jpg").unwrap();
/// assert_eq!(entry.name, "media/IMG_001.jpg");
/// assert!(find_attachment_entry(&archive, "missing.jpg").is_none());
/// ```
pub fn find_attachment_entry<'a, A>(archive: &'a A, token: &str) -> Option<&'a ArchiveEntry>
where
    A: Archive + ?Sized,
{
    if token.is_empty() {
        return None;
    }

    archive.entries().iter().find(|e| {
        e.name == token
            || e.name
                .strip_suffix(token)
                .is_some_and(|prefix| prefix.ends_with('/'))
    })
}

/// Resolves an attachment token to its archive bytes.
///
/// # Errors
///
/// - [`ChatzipError::AttachmentNotFound`] when no entry matches
/// - [`ChatzipError::Archive`] when the entry cannot be read
pub fn resolve_attachment<A>(archive: &A, token: &str) -> Result<ResolvedAttachment>
where
    A: Archive + ?Sized,
{
    let entry = find_attachment_entry(archive, token)
        .ok_or_else(|| ChatzipError::attachment_not_found(token))?;

    let bytes = archive.read_bytes(&entry.name)?;
    trace!(token, entry = %entry.name, bytes = bytes.len(), "resolved attachment");

    Ok(ResolvedAttachment {
        name: token.to_string(),
        entry: entry.name.clone(),
        kind: MediaKind::from_filename(token),
        bytes,
    })
}

/// Resolves every attachment of `msg`, one result per token in order.
pub fn resolve_all<A>(archive: &A, msg: &Message) -> Vec<Result<ResolvedAttachment>>
where
    A: Archive + ?Sized,
{
    msg.attachments
        .iter()
        .map(|token| resolve_attachment(archive, token))
        .collect()
}
