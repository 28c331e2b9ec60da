use super::{Error, ErrorKind};

/// The container has no way to produce the requested key.
#[derive(Debug)]
pub(super) struct ResolutionError {
    key: Box<str>,
    reason: Box<str>,
}

impl std::error::Error for ResolutionError {}

impl core::fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "cannot resolve `{}`: {}", self.key, self.reason)
    }
}

impl Error {
    /// Creates a resolution error for the given container key.
    pub fn resolution(key: impl Into<String>, reason: impl Into<String>) -> Error {
        Error::from(ErrorKind::Resolution(ResolutionError {
            key: key.into().into_boxed_str(),
            reason: reason.into().into_boxed_str(),
        }))
    }

    /// Returns `true` if this error is a resolution error.
    pub fn is_resolution(&self) -> bool {
        matches!(self.kind(), ErrorKind::Resolution(_))
    }
}
