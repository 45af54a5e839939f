//! Application settings loaded via OrthoConfig.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use pagination::{PageLimits, PageLimitsError};
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Listener, paging and seeding settings, read from `SCHOOL_*` variables,
/// configuration files and the command line.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SCHOOL")]
pub struct SchoolSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Page size used when a listing request omits one.
    pub default_page_size: Option<u32>,
    /// Largest page size a listing may return.
    pub max_page_size: Option<u32>,
    /// Load demo accounts, students and categories at startup.
    #[ortho_config(default = false)]
    pub seed_demo_data: bool,
}

/// Invalid values in [`SchoolSettings`].
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid page limits: {0}")]
    PageLimits(#[from] PageLimitsError),
}

impl SchoolSettings {
    /// Configured bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Validated paging bounds, falling back to [`PageLimits::DEFAULT`].
    pub fn page_limits(&self) -> Result<PageLimits, SettingsError> {
        let default_size = self
            .default_page_size
            .unwrap_or(PageLimits::DEFAULT.default_size());
        let max_size = self
            .max_page_size
            .unwrap_or(PageLimits::DEFAULT.max_size());
        Ok(PageLimits::try_new(default_size, max_size)?)
    }
}
