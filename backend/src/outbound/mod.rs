//! Outbound adapters implementing domain ports.
//!
//! - **memory**: process-local repositories and the account directory,
//!   plus the demo seed.
//!
//! Adapters are thin translators between domain types and their storage.
//! They contain no business logic beyond the atomic conflict checks the
//! ports require.

pub mod memory;
