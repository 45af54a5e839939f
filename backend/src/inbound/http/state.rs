//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the dispatcher and the login port and remain testable without
//! I/O.

use std::sync::Arc;

use crate::domain::dispatch::Dispatcher;
use crate::domain::ports::LoginService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub dispatcher: Dispatcher,
    pub login: Arc<dyn LoginService>,
}

impl HttpState {
    /// Bundle the frozen dispatcher with the credential checker.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use school_backend::domain::dispatch::Dispatcher;
    /// use school_backend::inbound::http::state::HttpState;
    /// use school_backend::outbound::memory::MemoryAccountDirectory;
    ///
    /// let dispatcher = Dispatcher::builder().build().expect("empty table");
    /// let state = HttpState::new(dispatcher, Arc::new(MemoryAccountDirectory::default()));
    /// assert!(state.dispatcher.is_empty());
    /// ```
    pub fn new(dispatcher: Dispatcher, login: Arc<dyn LoginService>) -> Self {
        Self { dispatcher, login }
    }
}
