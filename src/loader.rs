//! Loading CSV text from a file URL
//!
//! The viewer is handed an opaque, possibly percent-encoded `fileUrl`. This
//! module resolves it to text (one attempt, no retry) and classifies the
//! result into what the viewer should show.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use url::Url;

use crate::csv::{parse_csv, CsvData};

/// Errors that can occur when fetching file text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// No file URL was provided
    MissingUrl,
    /// The URL could not be turned into a local path
    InvalidUrl(String),
    /// File does not exist
    NotFound(PathBuf),
    /// Permission denied to read file
    PermissionDenied(PathBuf),
    /// Path is a directory, not a file
    IsDirectory(PathBuf),
    /// Other I/O error
    Io(String),
}

impl LoadError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingUrl => "No file URL specified.".to_string(),
            Self::InvalidUrl(url) => format!("Not a valid file URL: {}", url),
            Self::NotFound(path) => format!("File not found: {}", path.display()),
            Self::PermissionDenied(path) => format!("Permission denied: {}", path.display()),
            Self::IsDirectory(path) => format!("Cannot open directory: {}", path.display()),
            Self::Io(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingUrl => write!(f, "missing file URL"),
            Self::InvalidUrl(url) => write!(f, "invalid file URL: {}", url),
            Self::NotFound(path) => write!(f, "file not found: {}", path.display()),
            Self::PermissionDenied(path) => write!(f, "permission denied: {}", path.display()),
            Self::IsDirectory(path) => write!(f, "is a directory: {}", path.display()),
            Self::Io(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for LoadError {}

/// Something that can turn a file URL into decoded text
pub trait TextSource {
    fn fetch_text(&self, file_url: &str) -> Result<String, LoadError>;
}

/// Reads local files named by `file://` URLs or plain paths
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSource;

impl TextSource for FileSource {
    fn fetch_text(&self, file_url: &str) -> Result<String, LoadError> {
        let path = resolve_path(file_url)?;
        tracing::info!("Fetching file content from {}", path.display());

        if path.is_dir() {
            return Err(LoadError::IsDirectory(path));
        }

        let bytes = fs::read(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => LoadError::NotFound(path.clone()),
            std::io::ErrorKind::PermissionDenied => LoadError::PermissionDenied(path.clone()),
            _ => LoadError::Io(format!("Error reading {}: {}", path.display(), e)),
        })?;

        let text = decode_text(bytes, &path);
        tracing::info!("Fetched {} characters", text.chars().count());
        Ok(text)
    }
}

/// UTF-8 text with any BOM removed; invalid sequences are replaced
fn decode_text(bytes: Vec<u8>, path: &Path) -> String {
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(
                "{} is not valid UTF-8, replacing invalid sequences",
                path.display()
            );
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    };
    match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    }
}

/// Percent-decode, keeping the input when it is not valid encoding
fn percent_decode(s: &str) -> Cow<'_, str> {
    urlencoding::decode(s).unwrap_or(Cow::Borrowed(s))
}

/// Resolve a file URL (or path) to a local path
///
/// Accepts `file://` URLs, a percent-encoded `file://` URL (as passed through
/// a query parameter), or a plain filesystem path.
pub fn resolve_path(file_url: &str) -> Result<PathBuf, LoadError> {
    let trimmed = file_url.trim();
    if trimmed.is_empty() {
        return Err(LoadError::MissingUrl);
    }

    if trimmed.starts_with("file:") {
        let url = Url::parse(trimmed).map_err(|_| LoadError::InvalidUrl(trimmed.to_string()))?;
        return url
            .to_file_path()
            .map_err(|_| LoadError::InvalidUrl(trimmed.to_string()));
    }

    if Path::new(trimmed).exists() {
        return Ok(PathBuf::from(trimmed));
    }

    let decoded = percent_decode(trimmed);
    if decoded.starts_with("file:") {
        return resolve_path(&decoded);
    }
    Ok(PathBuf::from(decoded.into_owned()))
}

/// File name shown as window title and in panels
pub fn display_name(file_url: &str) -> String {
    let decoded = percent_decode(file_url.trim());
    let name = decoded
        .trim_end_matches(['/', '\\'])
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or("");
    // A second decode handles names encoded inside an encoded URL
    let name = percent_decode(name);
    if name.is_empty() {
        "CSV QuickView".to_string()
    } else {
        name.into_owned()
    }
}

/// What the viewer should display for a file's text
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    /// Blank or whitespace-only content
    Empty,
    /// Content that produced no rows
    Unparsable,
    /// Rows to show
    Ready(CsvData),
}

/// Parse text and decide how to present it
///
/// A file holding only a header row is still `Ready`: whether it shows as a
/// table depends on the header toggle, which can change after loading.
pub fn classify(text: &str) -> LoadOutcome {
    if text.trim().is_empty() {
        tracing::warn!("File is empty");
        return LoadOutcome::Empty;
    }

    let data = parse_csv(text);
    if data.is_empty() {
        tracing::error!("Content could not be parsed as CSV");
        return LoadOutcome::Unparsable;
    }

    LoadOutcome::Ready(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_plain_path() {
        assert_eq!(
            resolve_path("/tmp/data.csv").unwrap(),
            PathBuf::from("/tmp/data.csv")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_file_url() {
        assert_eq!(
            resolve_path("file:///tmp/My%20Data.csv").unwrap(),
            PathBuf::from("/tmp/My Data.csv")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_encoded_file_url() {
        assert_eq!(
            resolve_path("file%3A%2F%2F%2Ftmp%2FMy%2520Data.csv").unwrap(),
            PathBuf::from("/tmp/My Data.csv")
        );
    }

    #[test]
    fn test_resolve_empty_is_missing() {
        assert_eq!(resolve_path("  "), Err(LoadError::MissingUrl));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("file:///home/u/sales%202024.csv"), "sales 2024.csv");
        assert_eq!(display_name("file%3A%2F%2F%2Fhome%2Fu%2Fa.csv"), "a.csv");
        assert_eq!(display_name("C:\\data\\b.csv"), "b.csv");
        assert_eq!(display_name(""), "CSV QuickView");
    }

    #[test]
    fn test_classify_empty() {
        assert!(matches!(classify("  \n\t"), LoadOutcome::Empty));
    }

    #[test]
    fn test_classify_header_only() {
        match classify("a,b,c\n") {
            LoadOutcome::Ready(data) => assert_eq!(data.row_count(), 1),
            other => panic!("Expected Ready, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_ready() {
        match classify("a,b\n1,2\n") {
            LoadOutcome::Ready(data) => assert_eq!(data.row_count(), 2),
            other => panic!("Expected Ready, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_blank_rows_only_is_unparsable() {
        // Quoted empty fields on their own lines scan to blank rows
        assert!(matches!(classify("\"\"\n\"\""), LoadOutcome::Unparsable));
    }

    #[test]
    fn test_decode_text_strips_bom() {
        let text = decode_text(b"\xEF\xBB\xBFa,b".to_vec(), Path::new("x.csv"));
        assert_eq!(text, "a,b");
    }

    #[test]
    fn test_decode_text_lossy() {
        let text = decode_text(b"a,\xFF".to_vec(), Path::new("x.csv"));
        assert!(text.starts_with("a,"));
    }
}
