//! Audio file intake
//!
//! The alternative to recording: the user selects an existing audio file.
//! Intake only reads bytes and classifies the MIME type; whether a file
//! may be selected while a recording exists is decided by the wizard.

use crate::error::{CaptureError, Result};
use std::path::Path;

/// Extensions the intake path accepts for display purposes. Anything
/// readable is still ingested, with a generic MIME fallback.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["wav", "mp3", "ogg", "webm"];

/// A user-selected audio file, fully read into memory.
#[derive(Debug, Clone)]
pub struct AudioFile {
    pub file_name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl AudioFile {
    /// Read an audio file from disk. Empty files are rejected.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| CaptureError::InvalidFile("File has no usable name".into()))?
            .to_string();

        let data = std::fs::read(path)?;
        Self::from_bytes(file_name, data)
    }

    /// Build an audio file from an already-loaded byte buffer.
    pub fn from_bytes(file_name: String, data: Vec<u8>) -> Result<Self> {
        if data.is_empty() {
            return Err(CaptureError::InvalidFile(format!(
                "Audio file '{}' is empty",
                file_name
            )));
        }
        let mime_type = mime_for(&file_name).to_string();
        Ok(Self {
            file_name,
            mime_type,
            data,
        })
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, e)| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "wav" => "audio/wav",
        "mp3" => "audio/mpeg",
        "ogg" => "audio/ogg",
        "webm" => "audio/webm",
        "m4a" => "audio/mp4",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_file_and_infers_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.wav");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"RIFF....WAVE").unwrap();

        let audio = AudioFile::load(&path).unwrap();
        assert_eq!(audio.file_name, "sample.wav");
        assert_eq!(audio.mime_type, "audio/wav");
        assert_eq!(audio.size(), 12);
    }

    #[test]
    fn rejects_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.mp3");
        std::fs::File::create(&path).unwrap();

        assert!(matches!(
            AudioFile::load(&path),
            Err(CaptureError::InvalidFile(_))
        ));
    }

    #[test]
    fn unknown_extension_falls_back_to_octet_stream() {
        let audio = AudioFile::from_bytes("take1.raw".into(), vec![1, 2, 3]).unwrap();
        assert_eq!(audio.mime_type, "application/octet-stream");
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(AudioFile::load("/definitely/not/here.wav").is_err());
    }
}
