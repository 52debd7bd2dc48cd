use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Unable to read input: {0}")]
    Input(#[source] io::Error),
    #[error("Unable to read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid JSON input: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Expected an object of languages at the top level, found {0}")]
    NotAnObject(&'static str),
    #[error("Invalid language code {code:?}: {reason}")]
    InvalidLanguageCode { code: String, reason: String },
    #[error("Output directory {} does not exist (use --create to create it)", .0.display())]
    MissingOutputDir(PathBuf),
    #[error("Output path {} is not a directory", .0.display())]
    NotADirectory(PathBuf),
    #[error("Unable to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Unable to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
