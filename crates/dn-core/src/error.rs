//! Error types for document navigation and editing.

use std::path::PathBuf;

use thiserror::Error;

use crate::value::Kind;

#[derive(Error, Debug)]
pub enum Error {
    /// Address walking stopped at the named segment.
    #[error("cannot resolve `{segment}`: {detail}")]
    Navigation { segment: String, detail: String },

    /// Operand shapes that `append` cannot combine.
    #[error("cannot append {input} to {target}")]
    Append { target: Kind, input: Kind },

    /// Unknown flag name, or one that is not boolean-valued.
    #[error("no boolean flag named `{0}`")]
    Flag(String),

    /// File extension outside the supported set.
    #[error("unsupported file format `{0}`")]
    Format(String),

    #[error("file `{}` does not exist", .0.display())]
    MissingFile(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    pub(crate) fn nav(segment: impl Into<String>, detail: impl Into<String>) -> Self {
        Error::Navigation {
            segment: segment.into(),
            detail: detail.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
