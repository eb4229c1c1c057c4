//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

/// A small one-to-one chat with media, an edited message and a multi-line body.
pub const TRANSCRIPT: &str = "\u{feff}[8/20/25, 4:44:08 PM] Ann: Hello
[8/20/25, 4:45:10 PM] Bob 💕: look at this <attached: 00000003-PHOTO-2025-08-20-16-45-10.jpg>
[8/20/25, 4:46:00 PM] Ann: \u{200e}<attached: 00000004-VIDEO-2025-08-20-16-46-00.mp4>
[8/20/25, 4:47:30 PM] Bob 💕: first line
second line

third line
[8/21/25, 9:00:00 AM] Ann: typo fixed <This message was edited>
[8/21/25, 9:01:00 AM] Bob 💕: <attached: 00000007-notes.pdf>
";

pub const PHOTO: &[u8] = &[0xff, 0xd8, 0xff, 0xe0, 1, 2, 3];
pub const VIDEO: &[u8] = &[0, 0, 0, 0x18, b'f', b't', b'y', b'p'];

/// Builds a zip in memory from `(name, bytes)` pairs, in order.
pub fn zip_bytes(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, data) in files {
        if name.ends_with('/') {
            writer.add_directory(*name, options).unwrap();
        } else {
            writer.start_file(*name, options).unwrap();
            writer.write_all(data).unwrap();
        }
    }
    writer.finish().unwrap().into_inner()
}

/// Writes the standard export (transcript at the root, media in `media/`).
/// `notes.pdf` is referenced by the transcript but deliberately absent.
pub fn write_export(dir: &Path, file_name: &str) -> PathBuf {
    let bytes = zip_bytes(&[
        ("_chat.txt", TRANSCRIPT.as_bytes()),
        ("media/", b"".as_slice()),
        ("media/00000003-PHOTO-2025-08-20-16-45-10.jpg", PHOTO),
        ("00000004-VIDEO-2025-08-20-16-46-00.mp4", VIDEO),
    ]);
    let path = dir.join(file_name);
    std::fs::write(&path, bytes).unwrap();
    path
}
