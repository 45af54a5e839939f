//! Inbound adapters that translate external requests into intents while
//! keeping framework details at the edge.
//!
//! HTTP handlers live under [`http`].

pub mod http;
