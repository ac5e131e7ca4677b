//! YAML manifest loading.
//!
//! This module reads YAML streams from files or stdin and parses them into a
//! [`DocumentSet`]. Gzip-compressed input is recognised by a `.gz` extension
//! for files and by the gzip magic bytes for stdin.

use crate::document::parser::parse_documents;
use crate::document::tree::DocumentSet;
use std::fmt;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::string::FromUtf8Error;
use yaml_rust2::ScanError;

/// Errors that can occur while loading a YAML stream.
#[derive(Debug)]
pub enum LoadError {
    /// The source could not be opened, read or decompressed.
    Io(io::Error),
    /// The source bytes are not UTF-8.
    Utf8(FromUtf8Error),
    /// The YAML scanner rejected a document.
    Parse(ScanError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(err) => write!(f, "{}", err),
            LoadError::Utf8(err) => write!(f, "{}", err),
            LoadError::Parse(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(err) => Some(err),
            LoadError::Utf8(err) => Some(err),
            LoadError::Parse(err) => Some(err),
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        LoadError::Io(err)
    }
}

impl From<FromUtf8Error> for LoadError {
    fn from(err: FromUtf8Error) -> Self {
        LoadError::Utf8(err)
    }
}

impl From<ScanError> for LoadError {
    fn from(err: ScanError) -> Self {
        LoadError::Parse(err)
    }
}

/// Loads and parses a YAML file from the filesystem.
///
/// Files ending in `.gz` are decompressed first. The file handle is closed
/// before this function returns, whether parsing succeeds or not.
///
/// # Examples
///
/// ```no_run
/// use fixpath_locator::file::loader::load_yaml_file;
///
/// let documents = load_yaml_file("deployment.yaml").unwrap();
/// println!("{} document(s)", documents.len());
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The file does not exist or cannot be read
/// - A gzipped file is corrupted
/// - The contents are not UTF-8
/// - Any document in the file is not valid YAML
pub fn load_yaml_file<P: AsRef<Path>>(path: P) -> Result<DocumentSet, LoadError> {
    let path_ref = path.as_ref();

    let is_gzipped = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let content = if is_gzipped {
        read_gzipped_file(path_ref)?
    } else {
        fs::read_to_string(path_ref)?
    };

    log::debug!("loaded {} bytes from {}", content.len(), path_ref.display());
    Ok(parse_documents(&content)?)
}

/// Loads and parses a YAML stream from standard input.
///
/// Input starting with the gzip magic bytes (`0x1f 0x8b`) is decompressed.
///
/// ```no_run
/// use fixpath_locator::file::loader::load_yaml_from_stdin;
///
/// // Usage: cat deployment.yaml | fixpath-locator - spec.replicas
/// let documents = load_yaml_from_stdin().unwrap();
/// ```
pub fn load_yaml_from_stdin() -> Result<DocumentSet, LoadError> {
    let mut buffer = Vec::new();
    io::stdin().read_to_end(&mut buffer)?;
    load_yaml_bytes(buffer)
}

/// Parses an in-memory YAML stream, decompressing it if it is gzipped.
pub fn load_yaml_bytes(bytes: Vec<u8>) -> Result<DocumentSet, LoadError> {
    let content = if bytes.starts_with(&[0x1f, 0x8b]) {
        decompress_gzip_bytes(&bytes)?
    } else {
        String::from_utf8(bytes)?
    };

    Ok(parse_documents(&content)?)
}

/// Reads and decompresses a gzipped file.
fn read_gzipped_file<P: AsRef<Path>>(path: P) -> io::Result<String> {
    use flate2::read::GzDecoder;

    let file = fs::File::open(path)?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder.read_to_string(&mut content)?;
    Ok(content)
}

/// Decompresses gzip-encoded bytes to a UTF-8 string.
fn decompress_gzip_bytes(bytes: &[u8]) -> io::Result<String> {
    use flate2::read::GzDecoder;

    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder.read_to_string(&mut content)?;
    Ok(content)
}
