/// Failure classes that escape the pipeline.
///
/// Cell-level parse problems never become an `AppError`; they are absorbed as
/// absent values and only show up in dataset metadata counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input files cannot be located at all. Fatal at startup.
    Configuration,
    /// A dataset selector outside `{gdp, inflation}`.
    UnknownTarget,
    /// Inputs loaded but nothing overlapped.
    EmptyResult,
    /// Reading or writing a file failed.
    Io,
}

#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    pub fn unknown_target(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownTarget, message)
    }

    pub fn empty_result(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::EmptyResult, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn exit_code(&self) -> u8 {
        match self.kind {
            ErrorKind::Configuration | ErrorKind::UnknownTarget => 2,
            ErrorKind::EmptyResult => 3,
            ErrorKind::Io => 4,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_kind() {
        assert_eq!(AppError::configuration("x").exit_code(), 2);
        assert_eq!(AppError::unknown_target("x").exit_code(), 2);
        assert_eq!(AppError::empty_result("x").exit_code(), 3);
        assert_eq!(AppError::io("x").exit_code(), 4);
    }
}
