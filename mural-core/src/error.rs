use std::path::PathBuf;

/// Failures of the asset pipeline, the descriptor documents and the UI save codec.
#[derive(Debug, thiserror::Error)]
pub enum MuralError {
    #[error("unable to open archive {path:?}: {reason}")]
    ArchiveOpen { path: PathBuf, reason: String },

    #[error("unable to read entry {entry:?} of {archive:?}: {reason}")]
    EntryIo {
        archive: PathBuf,
        entry: String,
        reason: String,
    },

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("unable to decode {name:?}: {reason}")]
    Decode { name: String, reason: String },

    #[error("invalid {document} document: {reason}")]
    Parse { document: String, reason: String },

    #[error("{kind} {name:?} not found")]
    MissingReference { kind: &'static str, name: String },

    #[error("i/o failed on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("save i/o failed on {path:?}: {source}")]
    SaveIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse save {path:?}: {reason}")]
    SaveParse { path: PathBuf, reason: String },

    #[error("invalid file name {0:?}")]
    InvalidName(String),
}

impl MuralError {
    pub fn parse(document: &str, reason: impl ToString) -> Self {
        Self::Parse {
            document: document.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn decode(name: &str, reason: impl ToString) -> Self {
        Self::Decode {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T, E = MuralError> = std::result::Result<T, E>;
