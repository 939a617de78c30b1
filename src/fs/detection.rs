// src/fs/detection.rs
//! File type detection using magic numbers and extension-based fallback.

use std::{fmt, path::Path};

use anyhow::{Result, bail};
use infer::{Infer, MatcherType};
use mime_guess::MimeGuess;

/// High-level file categories.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum FileCategory {
    Image,
    Audio,
    Video,
    Document,
    Binary,
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FileCategory::Image => "image",
            FileCategory::Audio => "audio",
            FileCategory::Video => "video",
            FileCategory::Document => "document",
            FileCategory::Binary => "binary",
        };
        write!(f, "{}", s)
    }
}

/// Holds a detected MIME type + category.
#[derive(Debug)]
pub struct FileType {
    pub mime: String,
    pub category: FileCategory,
}

/// Detect MIME type & category for a given file path.
pub fn detect_file_type(path: &Path) -> Result<FileType> {
    // 1. Try magic-number sniffing
    if let Some(kind) = Infer::new().get_from_path(path)? {
        let mime = kind.mime_type().to_string();
        let category = match kind.matcher_type() {
            MatcherType::Image => FileCategory::Image,
            MatcherType::Audio => FileCategory::Audio,
            MatcherType::Video => FileCategory::Video,
            _ => FileCategory::Binary,
        };
        return Ok(FileType { mime, category });
    }

    // 2. Fallback to extension-based lookup
    let mime = MimeGuess::from_path(path).first_or_octet_stream().to_string();

    // 3. Map top-level type to category
    let category = match mime.split('/').next().unwrap_or("application") {
        "image" => FileCategory::Image,
        "audio" => FileCategory::Audio,
        "video" => FileCategory::Video,
        "text" | "application" => FileCategory::Document,
        _ => FileCategory::Binary,
    };

    Ok(FileType { mime, category })
}

/// Check that `path` is a readable audio file before handing it to the player.
pub fn ensure_audio(path: &Path) -> Result<FileType> {
    if !path.is_file() {
        bail!("{} is not a file", path.display());
    }
    let file_type = detect_file_type(path)?;
    if file_type.category != FileCategory::Audio {
        bail!(
            "{} looks like {} ({}), not audio",
            path.display(),
            file_type.category,
            file_type.mime
        );
    }
    Ok(file_type)
}
