use thiserror::Error;

use crate::common::types::LinkStatus;

/// Failure taxonomy for link operations.
///
/// Variants raised by a native call keep the platform status code that
/// caused them. None of them are retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LinkError {
    #[error("cannot query attributes of `{path}` (native error {code})")]
    Lookup { path: String, code: u32 },
    #[error("cannot open `{path}` for metadata access (native error {code})")]
    Open { path: String, code: u32 },
    #[error("reparse point request on `{path}` failed (native error {code})")]
    Control { path: String, code: u32 },
    #[error("unsupported reparse tag {tag:#010x}")]
    UnsupportedLinkKind { tag: u32 },
    #[error("malformed reparse buffer: {reason}")]
    MalformedBuffer { reason: &'static str },
    #[error("more than {limit} links followed while resolving `{path}`")]
    TooManyHops { path: String, limit: usize },
    #[error("invalid path: {reason}")]
    InvalidPath { reason: &'static str },
}

impl LinkError {
    pub(crate) fn malformed(reason: &'static str) -> Self {
        LinkError::MalformedBuffer { reason }
    }

    /// Native status code preserved from the failing call, if any.
    pub fn native_code(&self) -> Option<u32> {
        match self {
            LinkError::Lookup { code, .. }
            | LinkError::Open { code, .. }
            | LinkError::Control { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn status(&self) -> LinkStatus {
        match self {
            LinkError::Lookup { .. } => LinkStatus::LookupError,
            LinkError::Open { .. } => LinkStatus::OpenError,
            LinkError::Control { .. } => LinkStatus::ControlError,
            LinkError::UnsupportedLinkKind { .. } => LinkStatus::UnsupportedLinkKind,
            LinkError::MalformedBuffer { .. } => LinkStatus::MalformedBuffer,
            LinkError::TooManyHops { .. } => LinkStatus::TooManyHops,
            LinkError::InvalidPath { .. } => LinkStatus::InvalidPath,
        }
    }
}
