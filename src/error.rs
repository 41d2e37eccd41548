use std::io;
use std::num::ParseFloatError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Could not read source file {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("Could not write output file {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("Entry {entry} has no field at index {index}")]
    MissingField { entry: usize, index: usize },
    #[error("Entry {entry}: invalid coordinate {token}: {source}")]
    InvalidCoordinate {
        entry: usize,
        token: String,
        source: ParseFloatError,
    },
    #[error("Not implemented: {0}")]
    Unsupported(&'static str),
}
