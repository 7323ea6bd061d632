use std::io;
use std::path::PathBuf;

/// Reasons a post file name does not yield a slug
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlugError {
    #[error("file name does not start with a YYYY-MM-DD- date prefix")]
    MissingDatePrefix,

    #[error("date prefix {0} is not a calendar date")]
    InvalidDate(String),

    #[error("extension .{0} is not a post extension")]
    UnsupportedExtension(String),

    #[error("file name has no extension")]
    MissingExtension,

    #[error("slug is empty after removing date prefix and extension")]
    EmptySlug,

    #[error("file name too short to strip an 11-character prefix and 3-character suffix")]
    TooShort,
}

/// Why a file was left untouched
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    #[error("invalid post name: {0}")]
    InvalidName(#[from] SlugError),

    #[error("no metadata start")]
    NoMetadataStart,

    #[error("no metadata end")]
    NoMetadataEnd,

    #[error("slug already set")]
    SlugAlreadySet,
}

/// I/O failure while processing a single file
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("error reading file: {0}")]
    Read(#[source] io::Error),

    #[error("error writing file: {0}")]
    Write(#[source] io::Error),
}

/// Failures that abort the whole run
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("cannot read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
