//! Listener Config

use clap::Args;

/// Address the promo codes API listens on.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Interface to bind, all interfaces by default
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// TCP port to bind
    #[arg(short, long, env = "SERVER_PORT", default_value_t = 8080)]
    pub port: u16,
}

impl ServerRuntimeConfig {
    /// `host:port` as accepted by salvo's `TcpListener`.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn socket_addr_joins_host_and_port() {
        let config = ServerRuntimeConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        };

        assert_eq!(config.socket_addr(), "127.0.0.1:3000");
    }
}
