//! School management backend: intents, the dispatcher and its adapters.
//!
//! - [`domain`]: intents, envelopes, identity and the feature services.
//! - [`inbound`]: the HTTP boundary that turns requests into intents.
//! - [`outbound`]: storage adapters implementing the domain ports.
//! - [`middleware`]: request lifecycle concerns such as trace correlation.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use middleware::Trace;
