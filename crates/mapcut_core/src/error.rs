use std::fmt;
use std::path::PathBuf;

use mapcut_script::ParseError;

#[derive(Debug)]
pub enum Error {
    TitleNotFound(String),
    NotACuttableTitle(String),
    CountyUnassigned(String),
    AmbiguousCounty {
        county: String,
        first: u32,
        second: u32,
    },
    DefinitionRowMissing(u32),
    Parse(ParseError),
    Data {
        path: PathBuf,
        message: String,
    },
    Table {
        path: PathBuf,
        line: usize,
        message: String,
    },
    Io {
        path: PathBuf,
        message: String,
    },
    FileNotFound(PathBuf),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::TitleNotFound(t) => {
                write!(f, "Top de jure title '{}' not found!", t)
            }
            Error::NotACuttableTitle(t) => {
                write!(f, "'{}' is not a county-or-higher de jure title", t)
            }
            Error::CountyUnassigned(t) => {
                write!(f, "County not assigned in province history: {}", t)
            }
            Error::AmbiguousCounty {
                county,
                first,
                second,
            } => {
                write!(
                    f,
                    "County '{}' maps to both province {} and {} (at the least)!",
                    county, first, second
                )
            }
            Error::DefinitionRowMissing(id) => {
                write!(f, "Province {} has no row in the definitions table", id)
            }
            Error::Parse(e) => write!(f, "parse error: {}", e),
            Error::Data { path, message } => {
                write!(f, "{}: {}", path.display(), message)
            }
            Error::Table {
                path,
                line,
                message,
            } => {
                write!(f, "{}:{}: {}", path.display(), line, message)
            }
            Error::Io { path, message } => {
                write!(f, "{}: {}", path.display(), message)
            }
            Error::FileNotFound(path) => {
                write!(f, "File not found in any layer: {}", path.display())
            }
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }
}
