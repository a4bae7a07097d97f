/// An evaluation failure with its source position.
///
/// Runtime errors are plain values: once any sub-evaluation produces one, the
/// containing evaluation short-circuits and returns it unchanged, all the way
/// to the driver. They are not catchable from user code; the recoverable path
/// is the `{:error, reason}` tuple convention, which is ordinary data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeError {
    pub message: String,
    pub file:    String,
    pub line:    usize,
    pub column:  usize,
}

impl RuntimeError {
    #[must_use]
    pub fn new(message: impl Into<String>, file: &str, line: usize, column: usize) -> Self {
        Self { message: message.into(),
               file: file.to_string(),
               line,
               column }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Line: {}, Column {}: ERROR: {}", self.line, self.column, self.message)
    }
}

impl std::error::Error for RuntimeError {}
