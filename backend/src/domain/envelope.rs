//! Uniform result envelope returned by every intent handler.
//!
//! An [`Envelope`] can only be built through [`Envelope::ok`] or
//! [`Envelope::fail`], so its invariants hold by construction:
//!
//! - a failure never carries data;
//! - a 2xx status code is only ever paired with `success == true`, because
//!   [`FailureStatus`] has no 2xx members.
//!
//! The transport boundary copies `statusCode` onto the response status and
//! serialises the envelope as the body.

use std::fmt;

use serde::Serialize;

use crate::domain::{Error, ErrorCode};

/// Status code attached to every successful envelope.
pub const OK_STATUS: u16 = 200;

/// Status codes a failure envelope may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureStatus {
    /// 400: the intent was malformed or broke a validation rule.
    BadRequest,
    /// 401: no authenticated caller.
    Unauthorized,
    /// 403: the caller lacks a role or does not own the resource.
    Forbidden,
    /// 404: a referenced entity does not exist.
    NotFound,
    /// 409: a business rule rejected the change.
    Conflict,
    /// 500: an unexpected fault, only produced at the boundary.
    Internal,
    /// 503: a dependency was unavailable.
    ServiceUnavailable,
}

impl FailureStatus {
    /// Numeric transport status.
    pub fn code(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::Internal => 500,
            Self::ServiceUnavailable => 503,
        }
    }
}

impl From<ErrorCode> for FailureStatus {
    fn from(code: ErrorCode) -> Self {
        match code {
            ErrorCode::InvalidRequest => Self::BadRequest,
            ErrorCode::Unauthorized => Self::Unauthorized,
            ErrorCode::Forbidden => Self::Forbidden,
            ErrorCode::NotFound => Self::NotFound,
            ErrorCode::Conflict => Self::Conflict,
            ErrorCode::ServiceUnavailable => Self::ServiceUnavailable,
            ErrorCode::InternalError => Self::Internal,
        }
    }
}

impl fmt::Display for FailureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Outcome of a handled intent.
///
/// Serialises as `{"success", "statusCode", "message", "data"}`; `data` is
/// omitted on failure.
///
/// # Examples
/// ```
/// use school_backend::domain::{Envelope, FailureStatus};
///
/// let ok = Envelope::ok(42, "found");
/// assert!(ok.is_success());
/// assert_eq!(ok.status_code(), 200);
///
/// let failed: Envelope<i32> = Envelope::fail(FailureStatus::Conflict, "already enrolled");
/// assert_eq!(failed.status_code(), 409);
/// assert!(failed.data().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    success: bool,
    status_code: u16,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl<T> Envelope<T> {
    /// Successful outcome carrying `data` with status 200.
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            status_code: OK_STATUS,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Failed outcome with no data.
    pub fn fail(status: FailureStatus, message: impl Into<String>) -> Self {
        Self {
            success: false,
            status_code: status.code(),
            message: message.into(),
            data: None,
        }
    }

    /// Failure envelope describing `error`.
    ///
    /// This is a shorthand for [`Self::fail`] with the status derived from
    /// the error code.
    pub fn from_error(error: &Error) -> Self {
        Self::fail(error.code().into(), error.message())
    }

    /// Whether the operation succeeded.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Transport-facing status code.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Human-readable summary.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Payload of a successful envelope.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Consume the envelope, returning its payload.
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Transform the payload of a successful envelope.
    pub fn map<U, F>(self, f: F) -> Envelope<U>
    where
        F: FnOnce(T) -> U,
    {
        Envelope {
            success: self.success,
            status_code: self.status_code,
            message: self.message,
            data: self.data.map(f),
        }
    }
}
