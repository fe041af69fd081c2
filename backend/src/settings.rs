//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `SYNDICATE_DESK_*` environment variables and
//! an optional configuration file, in OrthoConfig's usual precedence.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";

/// Server, storage and session settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SYNDICATE_DESK")]
pub struct AppSettings {
    /// Listen address.
    pub host: Option<IpAddr>,
    /// Listen port.
    pub port: Option<u16>,
    /// Directory holding the JSON record blobs.
    pub data_dir: Option<PathBuf>,
    /// File whose bytes derive the session cookie key.
    pub session_key_file: Option<PathBuf>,
    /// Mark the session cookie `Secure`; on unless set to `false`.
    pub cookie_secure: Option<bool>,
    /// `SameSite` policy: `Strict`, `Lax` or `None`.
    pub same_site: Option<String>,
    /// Allow a random session key when the key file cannot be read.
    pub allow_ephemeral_key: Option<bool>,
}

impl AppSettings {
    /// Socket address to bind.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Data directory, defaulting to `./data`.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }

    /// Session key path, defaulting to the mounted secret location.
    #[must_use]
    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }

    /// Whether the session cookie carries `Secure`, defaulting to `true`.
    #[must_use]
    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure.unwrap_or(true)
    }

    /// Whether a missing key file may fall back to a random key.
    #[must_use]
    pub fn allow_ephemeral_key(&self) -> bool {
        self.allow_ephemeral_key.unwrap_or(false)
    }
}
