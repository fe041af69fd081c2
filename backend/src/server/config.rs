//! HTTP server configuration object.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use camino::{Utf8Path, Utf8PathBuf};

use super::session_config::SessionSettings;

/// Everything [`create_server`](super::create_server) needs to start.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) data_dir: Utf8PathBuf,
}

impl ServerConfig {
    /// Combine validated session settings with the listen address and the
    /// record directory.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr, data_dir: Utf8PathBuf) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            data_dir,
        }
    }

    /// Socket address the server binds to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Directory holding the record blobs.
    #[must_use]
    pub fn data_dir(&self) -> &Utf8Path {
        &self.data_dir
    }
}
