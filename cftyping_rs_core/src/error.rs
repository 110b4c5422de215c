use thiserror::Error;

#[derive(Error, Debug)]
pub enum TypingError {
    #[error("No axis named {axis} for object type {object}")]
    InvalidAxis { axis: String, object: &'static str },

    #[error("The name {0} occurs multiple times, use a level number")]
    AmbiguousLevel(String),

    #[error("Level {0} not found")]
    LevelNotFound(String),

    #[error("Too many levels: Index has only {nlevels} levels, {level} is not a valid level number")]
    InvalidLevel { level: i64, nlevels: usize },

    #[error("data type '{0}' not understood")]
    UnknownDtype(String),

    #[error("Unrecognized compression type: {0}")]
    UnknownCompression(String),

    #[error("compression method '{0}' is not available in this build")]
    UnsupportedCompression(String),

    #[error("If mapping, compression must have key 'method'")]
    MissingCompressionMethod,

    #[error("storage_options passed with file object or non-fsspec file path")]
    UnexpectedStorageOptions,

    #[error("could not convert {input:?} to {target}")]
    Parse { input: String, target: &'static str },

    #[error("Out of bounds nanosecond {0}")]
    OutOfBounds(&'static str),

    #[error("Unknown timezone '{0}'")]
    UnknownTimezone(String),

    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),

    #[error("left side of interval must be <= right side")]
    InvalidInterval,

    #[error("{what} length({got}) should match DataFrame number of columns({expected})")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Col_space is defined for an unknown column: {0}")]
    UnknownColspaceColumn(String),

    /// holds the python reprs of the missing columns
    #[error("Column(s) [{}] do not exist", .0.join(", "))]
    UnknownColumns(Vec<String>),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TypingError>;

impl TypingError {
    pub(crate) fn parse(input: impl Into<String>, target: &'static str) -> Self {
        TypingError::Parse {
            input: input.into(),
            target,
        }
    }
}
