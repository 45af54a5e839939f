//! Domain core and feature services.
//!
//! Purpose: model every school operation as an [`intent::Intent`] routed
//! through a [`dispatch::Dispatcher`] to exactly one handler, and return every
//! outcome inside an [`Envelope`]. Types here stay transport agnostic; the
//! inbound HTTP adapter maps envelopes onto responses and the outbound
//! adapters implement the ports.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failures and their categories.
//! - Envelope / FailureStatus: the uniform result wrapper.
//! - IdentityContext / Principal: the per-request caller.
//! - Dispatcher / RegistryBuilder: the frozen intent-to-handler table.
//! - One module per feature holding its entities, intents and service.

pub mod auth;
pub mod dispatch;
pub mod envelope;
pub mod error;
pub mod identity;
pub mod intent;
pub mod ports;
pub mod registration;
pub mod trace_id;
pub mod user;
mod validation;

pub mod attendance;
pub mod categories;
pub mod enrollment;
pub mod grading;
pub mod notifications;
pub mod parents;
pub mod profiles;
pub mod students;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::envelope::{Envelope, FailureStatus, OK_STATUS};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{DisplayName, UserId, UserValidationError};
pub use pagination::{PageLimits, PageQuery, PageRequest, Paged};
