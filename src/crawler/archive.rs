//! Archive decoding for compressed sitemaps
//!
//! Sitemaps are served plain, gzip-compressed (`.gz`), or zipped (`.zip`).
//! Detection looks at magic bytes first, then the URL suffix, then the
//! Content-Type header. Decoding is pure: no I/O beyond the in-memory buffer.

use flate2::read::GzDecoder;
use std::io::{Cursor, Read};
use thiserror::Error;
use zip::ZipArchive;

const GZIP_MAGIC: &[u8] = &[0x1F, 0x8B];
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Largest decompressed size accepted for one archive (the sitemaps.org limit)
pub const MAX_DECODED_BYTES: u64 = 50 * 1024 * 1024;

/// Compression format of a sitemap body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    Gzip,
    Zip,
}

/// Errors from decompressing an archive
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("decompress-error: {0}")]
    Decompress(String),

    #[error("empty-archive: archive contains no files")]
    EmptyArchive,

    #[error("decompress-error: archive inflates past {limit} bytes")]
    TooLarge { limit: u64 },
}

/// One file recovered from an archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveDocument {
    /// Entry name inside the archive (the URL for gzip bodies)
    pub name: String,
    pub text: String,
}

/// Textual content recovered from a response body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedContent {
    /// The body was not an archive and is returned as text
    NotArchive(String),
    /// Every document recovered from the archive
    Archive {
        kind: ArchiveKind,
        documents: Vec<ArchiveDocument>,
    },
}

impl DecodedContent {
    /// Iterates the text of every recovered document
    pub fn texts(&self) -> Vec<&str> {
        match self {
            Self::NotArchive(text) => vec![text.as_str()],
            Self::Archive { documents, .. } => documents.iter().map(|d| d.text.as_str()).collect(),
        }
    }

    pub fn is_archive(&self) -> bool {
        matches!(self, Self::Archive { .. })
    }
}

/// Determines whether a body should be treated as an archive
///
/// Magic bytes win. Otherwise a `.gz`/`.zip` URL suffix or a gzip/zip
/// Content-Type is a hint, except when the body already reads as markup
/// (the HTTP layer may have removed a transfer encoding).
pub fn detect_archive(bytes: &[u8], url: &str, content_type: Option<&str>) -> Option<ArchiveKind> {
    if bytes.starts_with(GZIP_MAGIC) {
        return Some(ArchiveKind::Gzip);
    }
    if bytes.starts_with(ZIP_MAGIC) {
        return Some(ArchiveKind::Zip);
    }

    let hinted = hint_from_url(url).or_else(|| content_type.and_then(hint_from_content_type))?;

    if looks_like_markup(bytes) {
        return None;
    }

    Some(hinted)
}

/// Decodes a response body into one or more text documents
///
/// # Arguments
///
/// * `bytes` - The raw response body
/// * `url` - The URL the body was fetched from (suffix hint)
/// * `content_type` - The Content-Type header, if any
pub fn decode(
    bytes: &[u8],
    url: &str,
    content_type: Option<&str>,
) -> Result<DecodedContent, DecodeError> {
    decode_with_limit(bytes, url, content_type, MAX_DECODED_BYTES)
}

fn decode_with_limit(
    bytes: &[u8],
    url: &str,
    content_type: Option<&str>,
    limit: u64,
) -> Result<DecodedContent, DecodeError> {
    match detect_archive(bytes, url, content_type) {
        None => Ok(DecodedContent::NotArchive(bytes_to_text(bytes))),
        Some(ArchiveKind::Gzip) => {
            let text = gunzip(bytes, limit)?;
            Ok(DecodedContent::Archive {
                kind: ArchiveKind::Gzip,
                documents: vec![ArchiveDocument {
                    name: url.to_string(),
                    text,
                }],
            })
        }
        Some(ArchiveKind::Zip) => Ok(DecodedContent::Archive {
            kind: ArchiveKind::Zip,
            documents: unzip(bytes, limit)?,
        }),
    }
}

/// Inflates a single-member gzip stream, at most `limit` bytes
fn gunzip(bytes: &[u8], limit: u64) -> Result<String, DecodeError> {
    let mut out = Vec::new();
    GzDecoder::new(bytes)
        .take(limit + 1)
        .read_to_end(&mut out)
        .map_err(|e| DecodeError::Decompress(format!("invalid gzip stream: {}", e)))?;

    if out.len() as u64 > limit {
        return Err(DecodeError::TooLarge { limit });
    }
    Ok(bytes_to_text(&out))
}

/// Reads every file entry of a zip archive; `limit` bounds the total inflated size
fn unzip(bytes: &[u8], limit: u64) -> Result<Vec<ArchiveDocument>, DecodeError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| DecodeError::Decompress(format!("invalid zip archive: {}", e)))?;

    let mut documents = Vec::with_capacity(archive.len());
    let mut remaining = limit;
    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| DecodeError::Decompress(format!("unreadable zip entry: {}", e)))?;

        if entry.is_dir() {
            continue;
        }

        let name = entry.name().to_string();
        let mut out = Vec::new();
        (&mut entry)
            .take(remaining + 1)
            .read_to_end(&mut out)
            .map_err(|e| DecodeError::Decompress(format!("failed to inflate {}: {}", name, e)))?;

        if out.len() as u64 > remaining {
            return Err(DecodeError::TooLarge { limit });
        }
        remaining -= out.len() as u64;

        documents.push(ArchiveDocument {
            name,
            text: bytes_to_text(&out),
        });
    }

    if documents.is_empty() {
        return Err(DecodeError::EmptyArchive);
    }

    Ok(documents)
}

fn hint_from_url(url: &str) -> Option<ArchiveKind> {
    let path = url.split(['?', '#']).next().unwrap_or(url).to_ascii_lowercase();
    if path.ends_with(".gz") {
        Some(ArchiveKind::Gzip)
    } else if path.ends_with(".zip") {
        Some(ArchiveKind::Zip)
    } else {
        None
    }
}

fn hint_from_content_type(content_type: &str) -> Option<ArchiveKind> {
    let content_type = content_type.to_ascii_lowercase();
    // "gzip" contains "zip", so order matters
    if content_type.contains("gzip") {
        Some(ArchiveKind::Gzip)
    } else if content_type.contains("zip") {
        Some(ArchiveKind::Zip)
    } else {
        None
    }
}

fn looks_like_markup(bytes: &[u8]) -> bool {
    let text = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    text.iter()
        .find(|b| !b.is_ascii_whitespace())
        .is_some_and(|b| *b == b'<')
}

fn bytes_to_text(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    text.strip_prefix('\u{FEFF}').unwrap_or(&text).to_string()
}
