//! Outcome of collecting a result sequence.

/// Successes gathered before the first error, plus that error if any.
///
/// Produced by [`ResultSeq::collect`](crate::ResultSeq::collect). The error is
/// never dropped: use [`into_result`](Partial::into_result) when partial
/// values are not interesting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partial<C, E> {
    values: C,
    error: Option<E>,
}

impl<C, E> Partial<C, E> {
    pub(crate) fn new(values: C, error: Option<E>) -> Self {
        Self { values, error }
    }

    /// Successful values seen before the first error.
    pub fn ok(&self) -> &C {
        &self.values
    }

    /// The first error, if one stopped the sequence.
    pub fn err(&self) -> Option<&E> {
        self.error.as_ref()
    }

    /// True if no error was encountered.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// `Ok(values)` without an error, `Err(error)` otherwise.
    pub fn into_result(self) -> Result<C, E> {
        match self.error {
            None => Ok(self.values),
            Some(e) => Err(e),
        }
    }

    /// Consumes into the successful values.
    pub fn values(self) -> C {
        self.values
    }

    /// Consumes into the error.
    pub fn error(self) -> Option<E> {
        self.error
    }

    /// Splits into both parts.
    pub fn into_parts(self) -> (C, Option<E>) {
        (self.values, self.error)
    }
}
