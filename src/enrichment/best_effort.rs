//! Values that are always produced, possibly in a degraded form.

/// How a [`BestEffort`] value was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// The operation succeeded
    Complete,
    /// The operation was intentionally not attempted
    Skipped,
    /// The operation failed and a fallback value was used
    Degraded(String),
}

/// A value paired with the status of the operation that produced it.
///
/// Used where a failure must not stop the run: a failed catalog download
/// still yields an (empty) catalog, a failed translation still yields text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestEffort<T> {
    pub value: T,
    pub status: Status,
}

impl<T> BestEffort<T> {
    pub const fn complete(value: T) -> Self {
        Self {
            value,
            status: Status::Complete,
        }
    }

    pub const fn skipped(value: T) -> Self {
        Self {
            value,
            status: Status::Skipped,
        }
    }

    pub fn degraded(value: T, reason: impl Into<String>) -> Self {
        Self {
            value,
            status: Status::Degraded(reason.into()),
        }
    }

    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        matches!(self.status, Status::Degraded(_))
    }

    /// Reason for degradation, if any.
    #[must_use]
    pub fn degraded_reason(&self) -> Option<&str> {
        match &self.status {
            Status::Degraded(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> BestEffort<U> {
        BestEffort {
            value: f(self.value),
            status: self.status,
        }
    }

    pub fn into_value(self) -> T {
        self.value
    }
}
