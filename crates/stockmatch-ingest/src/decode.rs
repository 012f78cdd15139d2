//! Byte-to-text decoding for store exports.
//!
//! Exports arrive in whatever encoding the store's back-office system writes,
//! usually Shift_JIS. Detection runs first; when it has nothing to go on the
//! configured fallback encoding is used instead.

use std::path::PathBuf;

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, WINDOWS_1252};

use crate::error::IngestError;

/// Where a source file's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileBody {
    /// Bytes already in memory, e.g. from an upload.
    Loaded(Vec<u8>),
    /// Bytes read lazily from disk when the folder is ingested.
    OnDisk(PathBuf),
}

/// One file of an upload batch, identified by its slash-separated path
/// relative to the upload root (`"AllStores/Sano/ZaikoKin.csv"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub relative_path: String,
    pub body: FileBody,
}

impl SourceFile {
    #[must_use]
    pub fn loaded(relative_path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            relative_path: relative_path.into(),
            body: FileBody::Loaded(bytes.into()),
        }
    }

    #[must_use]
    pub fn on_disk(relative_path: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            relative_path: relative_path.into(),
            body: FileBody::OnDisk(path.into()),
        }
    }

    /// The final path segment.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.relative_path
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.relative_path)
    }

    /// Returns the file's raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Decode`] if an on-disk file cannot be read.
    pub async fn read_bytes(&self) -> Result<Vec<u8>, IngestError> {
        match &self.body {
            FileBody::Loaded(bytes) => Ok(bytes.clone()),
            FileBody::OnDisk(path) => {
                tokio::fs::read(path)
                    .await
                    .map_err(|source| IngestError::Decode {
                        path: self.relative_path.clone(),
                        source,
                    })
            }
        }
    }
}

/// Text produced by [`decode_bytes`] along with how it was decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    pub encoding: &'static Encoding,
    /// `true` when detection was inconclusive and the fallback was applied.
    pub used_fallback: bool,
}

/// Resolves a WHATWG encoding label such as `"Shift_JIS"` or `"euc-jp"`.
///
/// # Errors
///
/// Returns [`IngestError::UnknownEncoding`] if the label is not recognized.
pub fn resolve_encoding(label: &str) -> Result<&'static Encoding, IngestError> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| IngestError::UnknownEncoding(label.to_string()))
}

/// Decodes `bytes` into a string. Never fails; in the worst case the text is
/// mis-decoded with replacement characters.
///
/// Order of precedence:
/// 1. A byte-order mark.
/// 2. The detector's guess, unless it is the detector's generic
///    `windows-1252` default or decoding with it hits malformed sequences.
/// 3. `fallback`.
#[must_use]
pub fn decode_bytes(bytes: &[u8], fallback: &'static Encoding) -> DecodedText {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return DecodedText {
            text: text.into_owned(),
            encoding,
            used_fallback: false,
        };
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let guess = detector.guess(None, true);

    if guess != WINDOWS_1252 {
        let (text, had_errors) = guess.decode_without_bom_handling(bytes);
        if !had_errors {
            return DecodedText {
                text: text.into_owned(),
                encoding: guess,
                used_fallback: false,
            };
        }
        tracing::debug!(
            guess = guess.name(),
            fallback = fallback.name(),
            "detected encoding produced malformed sequences; using fallback"
        );
    }

    let (text, had_errors) = fallback.decode_without_bom_handling(bytes);
    if had_errors {
        tracing::debug!(
            encoding = fallback.name(),
            "fallback decoding replaced malformed sequences"
        );
    }
    DecodedText {
        text: text.into_owned(),
        encoding: fallback,
        used_fallback: true,
    }
}

/// Reads and decodes one source file.
///
/// # Errors
///
/// Returns [`IngestError::Decode`] if the bytes cannot be read.
pub async fn decode_file(
    file: &SourceFile,
    fallback: &'static Encoding,
) -> Result<String, IngestError> {
    let bytes = file.read_bytes().await?;
    let decoded = decode_bytes(&bytes, fallback);
    tracing::debug!(
        path = %file.relative_path,
        encoding = decoded.encoding.name(),
        used_fallback = decoded.used_fallback,
        "decoded source file"
    );
    Ok(decoded.text)
}
