use std::net::SocketAddr;

use crate::net;

/// Runtime configuration for the manager.
///
/// Resolved once at startup from CLI flags and `PLOTDECK_*` environment
/// variables; held behind an `Arc` for the life of the process.
#[derive(Clone, Debug)]
pub struct ManagerConfig {
    /// Host/interface both listeners bind to
    pub bind_host: String,
    /// Pages are served on this port; the control channel on base + 1
    pub base_port: u16,
    /// Address clients are told to browse to (and that the viewer
    /// script dials the control channel on)
    pub advertised_ip: String,
}

impl ManagerConfig {
    pub fn new(bind_host: impl Into<String>, base_port: u16) -> Self {
        Self {
            bind_host: bind_host.into(),
            base_port,
            advertised_ip: net::advertised_ip().to_string(),
        }
    }

    /// Build from `PLOTDECK_HOST` / `PLOTDECK_PORT`, with defaults of
    /// all interfaces and port 8891.
    pub fn from_env() -> Self {
        let bind_host = std::env::var("PLOTDECK_HOST")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "0.0.0.0".to_string());
        let base_port = std::env::var("PLOTDECK_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8891);
        Self::new(bind_host, base_port)
    }

    /// URL clients should browse to
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.advertised_ip, self.base_port)
    }

    pub fn control_port(&self) -> u16 {
        self.base_port + 1
    }

    pub fn page_addr(&self) -> SocketAddr {
        self.addr(self.base_port)
    }

    pub fn control_addr(&self) -> SocketAddr {
        self.addr(self.control_port())
    }

    fn addr(&self, port: u16) -> SocketAddr {
        format!("{}:{}", self.bind_host, port)
            .parse()
            .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], port)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_channel_is_base_port_plus_one() {
        let config = ManagerConfig::new("127.0.0.1", 8891);
        assert_eq!(config.control_port(), 8892);
        assert_eq!(config.page_addr().port(), 8891);
        assert_eq!(config.control_addr().port(), 8892);
    }

    #[test]
    fn url_uses_advertised_ip_and_base_port() {
        let mut config = ManagerConfig::new("0.0.0.0", 9000);
        config.advertised_ip = "10.0.0.5".to_string();
        assert_eq!(config.url(), "http://10.0.0.5:9000");
    }

    #[test]
    fn bad_bind_host_falls_back_to_all_interfaces() {
        let config = ManagerConfig::new("not a host", 9000);
        assert_eq!(config.page_addr(), SocketAddr::from(([0, 0, 0, 0], 9000)));
    }
}
