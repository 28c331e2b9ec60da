use super::{Error, ErrorKind};

/// A constructor parameter of a built-in type has neither a supplied value
/// nor a default.
#[derive(Debug)]
pub(super) struct UnresolvableDependencyError {
    parameter: Box<str>,
    class: Box<str>,
}

impl std::error::Error for UnresolvableDependencyError {}

impl core::fmt::Display for UnresolvableDependencyError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unresolvable dependency: parameter `{}` of `{}` has no binding and no default value",
            self.parameter, self.class
        )
    }
}

impl Error {
    /// Creates an unresolvable dependency error naming the parameter and the
    /// type declaring it.
    pub fn unresolvable_dependency(parameter: impl Into<String>, class: impl Into<String>) -> Error {
        Error::from(ErrorKind::UnresolvableDependency(
            UnresolvableDependencyError {
                parameter: parameter.into().into_boxed_str(),
                class: class.into().into_boxed_str(),
            },
        ))
    }

    /// Returns `true` if this error is an unresolvable dependency error.
    pub fn is_unresolvable_dependency(&self) -> bool {
        matches!(self.kind(), ErrorKind::UnresolvableDependency(_))
    }
}
