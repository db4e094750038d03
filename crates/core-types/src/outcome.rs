use crate::error::DomainError;

/// The uniform success/failure envelope returned by every orchestration
/// call.
///
/// Exactly one variant is populated. The failure side carries the full
/// [`DomainError`] value (kind, message, detail map) so the transport
/// boundary can map a status code without re-parsing strings. A
/// `Failure` can never be built without a message because the error
/// type always carries one.
///
/// The accessors fail fast when called on the wrong variant. That is a
/// programmer error, not a domain error, and it panics rather than
/// producing a bogus value.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success { data: T },
    Failure { error: DomainError },
}

impl<T> Outcome<T> {
    /// Wraps a successful payload. Ownership of `data` transfers to the
    /// caller when the envelope is unwrapped.
    pub fn ok(data: T) -> Self {
        Outcome::Success { data }
    }

    /// Wraps a domain failure.
    pub fn fail(error: DomainError) -> Self {
        Outcome::Failure { error }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    /// Consumes the envelope and returns the success payload.
    ///
    /// # Panics
    ///
    /// Panics if the outcome is a failure.
    pub fn into_data(self) -> T {
        match self {
            Outcome::Success { data } => data,
            Outcome::Failure { error } => {
                panic!("into_data() called on a failed outcome: {error}")
            }
        }
    }

    /// Returns the failure value.
    ///
    /// # Panics
    ///
    /// Panics if the outcome is a success.
    pub fn error(&self) -> &DomainError {
        match self {
            Outcome::Failure { error } => error,
            Outcome::Success { .. } => {
                panic!("error() called on a successful outcome")
            }
        }
    }
}
