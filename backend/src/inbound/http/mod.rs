//! HTTP inbound adapter exposing the school API.
//!
//! Each feature module turns requests into intents and hands them to the
//! dispatcher through [`dispatch::dispatch_intent`]; the envelope that comes
//! back is the response body.

pub mod attendance;
pub mod auth;
pub mod categories;
pub mod dispatch;
pub mod enrollment;
pub mod error;
pub mod grading;
pub mod health;
pub mod identity;
pub mod notifications;
pub mod parents;
pub mod profiles;
pub mod routes;
pub mod session;
pub mod session_config;
pub mod state;
pub mod students;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;
