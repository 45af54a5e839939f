//! HTTP server configuration object.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};

use school_backend::domain::PageLimits;

/// Everything [`super::create_server`] needs besides the health state.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) page_limits: PageLimits,
    pub(crate) seed_demo_data: bool,
}

impl ServerConfig {
    /// Construct a server configuration from session and listener settings.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            page_limits: PageLimits::DEFAULT,
            seed_demo_data: false,
        }
    }

    /// Apply paging bounds to every listing handler.
    #[must_use]
    pub fn with_page_limits(mut self, page_limits: PageLimits) -> Self {
        self.page_limits = page_limits;
        self
    }

    /// Load demo data into the in-memory store before serving.
    #[must_use]
    pub fn with_demo_data(mut self, seed_demo_data: bool) -> Self {
        self.seed_demo_data = seed_demo_data;
        self
    }
}
