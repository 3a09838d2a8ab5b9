//! This module provides the status of a single probe.
use std::fmt;

/// Represents the kind of status.
///
/// The classification is purely numeric, see [`Status::kind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatusKind {
    /// The probe completed with a code in `[200, 500)`.
    Success,
    /// The probe completed with any other non-negative code.
    Error,
    /// The probe never produced a response (transport or construction failure).
    Failed,
}

/// The probe status, carrying the raw status code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Status {
    code: i32,
}

impl Status {
    /// Sentinel code of a probe that failed before receiving a response.
    pub const FAILED_CODE: i32 = -1;

    /// Creates a status from a raw code.
    pub fn new(code: i32) -> Self {
        Self { code }
    }

    /// Creates the failure status.
    pub fn failed() -> Self {
        Self::new(Self::FAILED_CODE)
    }

    /// Returns the kind of the status.
    ///
    /// Codes that are neither negative nor in `[200, 500)`, including `0`,
    /// are reported as [`StatusKind::Error`].
    pub fn kind(&self) -> StatusKind {
        match self.code {
            c if c < 0 => StatusKind::Failed,
            200..500 => StatusKind::Success,
            _ => StatusKind::Error,
        }
    }

    /// Returns the code of the status.
    pub fn code(&self) -> i32 {
        self.code
    }
}

impl From<u16> for Status {
    fn from(code: u16) -> Self {
        Self::new(code.into())
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "Success"),
            Self::Error => write!(f, "Error"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind(), self.code)
    }
}
