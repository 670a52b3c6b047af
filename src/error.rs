use thiserror::Error;

/// The four error kinds from the external interface contract, plus the
/// internal-consistency class raised only by engine bugs.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("argument error: {0}")]
    Argument(#[from] ArgumentError),

    #[error("resource error: {0}")]
    Resource(#[from] ResourceError),

    #[error("capacity error: {0}")]
    Capacity(#[from] CapacityError),

    #[error("internal consistency error: {0}")]
    Internal(#[from] InternalError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("line {line}: {message}")]
    MalformedLine { line: usize, message: String },

    #[error("key '{base}' failed validation: {reason}")]
    InvalidKey { base: char, reason: String },

    #[error("keys '{a}' and '{b}' share at least one character")]
    NotDisjoint { a: char, b: char },

    #[error("start key '{0}' is not on the keyboard")]
    UnknownStartKey(char),

    #[error("start key '{0}' is not active")]
    InactiveStartKey(char),

    #[error("restart string has an invalid character '{0}'")]
    UnknownRestartChar(char),

    #[error("restart string steps from '{from}' to '{to}', which are not adjacent")]
    NonAdjacentRestartStep { from: char, to: char },

    #[error("adjacency line names unknown neighbor '{0}'")]
    UnknownNeighbor(char),

    #[error("adjacency for key '{0}' was defined more than once")]
    RepeatedAdjacency(char),

    #[error("--restart's first character '{0}' does not match any requested start key")]
    RestartDoesNotMatchAnyStartKey(char),
}

#[derive(Debug, Error)]
pub enum ArgumentError {
    #[error("missing required flag --{0}")]
    MissingFlag(&'static str),

    #[error("--min must be > 0, got {0}")]
    MinNotPositive(u32),

    #[error("--max ({max}) must be >= --min ({min})")]
    MaxLessThanMin { min: u32, max: u32 },

    #[error("--restart string has length {len}, expected between {min} and {max}")]
    RestartLengthOutOfRange { len: usize, min: u32, max: u32 },

    #[error("start key '{0}' was repeated in --keys")]
    RepeatedStartKey(char),

    #[error("--stop must be a positive number of seconds, got {0}")]
    StopNotPositive(u32),
}

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("could not open configuration file {path}: {source}")]
    OpenConfig {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not open log file {path}: {source}")]
    OpenLog {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("write to output failed: {0}")]
    OutputWrite(#[source] std::io::Error),
}

#[derive(Debug, Error)]
pub enum CapacityError {
    #[error("traversal stack exceeded the {0}-frame ceiling")]
    StackCeilingExceeded(usize),
}

#[derive(Debug, Error)]
pub enum InternalError {
    #[error("memo for key '{base}' at depth {depth} was zero where a positive count was expected")]
    ZeroMemo { base: char, depth: usize },

    #[error("stack element had an invalid choice code {0}")]
    InvalidChoiceCode(i32),
}
