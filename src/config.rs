//! Configuration for wirekv
//!
//! Centralized configuration with sensible defaults.

use crate::transport::TransportKind;

/// Main configuration for a wirekv server or client
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// Address to bind (server) or connect to (client), `host:port`
    pub addr: String,

    /// Which transport carries the protocol
    pub transport: TransportKind,

    // -------------------------------------------------------------------------
    // Client Configuration
    // -------------------------------------------------------------------------
    /// How long a client waits for a response before declaring a timeout
    /// (milliseconds)
    pub request_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:6400".to_string(),
            transport: TransportKind::Tcp,
            request_timeout_ms: 60_000,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// The request timeout as a [`std::time::Duration`]
    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.request_timeout_ms)
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the bind/connect address (`host:port`)
    pub fn addr(mut self, addr: impl Into<String>) -> Self {
        self.config.addr = addr.into();
        self
    }

    /// Set the transport kind
    pub fn transport(mut self, kind: TransportKind) -> Self {
        self.config.transport = kind;
        self
    }

    /// Set the client request timeout (in milliseconds)
    pub fn request_timeout_ms(mut self, ms: u64) -> Self {
        self.config.request_timeout_ms = ms;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
