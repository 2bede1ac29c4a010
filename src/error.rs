use std::path::PathBuf;
use thiserror::Error;

/// Fatal problems with the input table or the fixups file.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// Neither of the first two lines looks like a header.
    #[error("no header row containing `{column}` in the first two lines")]
    MissingHeader { column: String },

    #[error("expected column `{column}` not found in header")]
    MissingColumn { column: String },

    #[error("parsing fixups {path:?}: {source}")]
    Fixups {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Following the fixups from `name` leads back to a name already visited.
    #[error("name fixups loop back on themselves from `{name}`")]
    FixupCycle { name: String },
}
