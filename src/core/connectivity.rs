//! Network reachability signal

use async_trait::async_trait;
use std::time::Duration;
use tokio::net::TcpStream;
use tracing::debug;

/// Reports whether the network is currently reachable.
///
/// This only lets callers skip remote work early; a wrong answer is covered
/// by per-source failure handling.
#[async_trait]
pub trait Connectivity: Send + Sync {
    async fn is_online(&self) -> bool;
}

/// Fixed answer, e.g. for `--offline` or tests.
#[derive(Debug, Clone, Copy)]
pub struct StaticConnectivity(pub bool);

impl StaticConnectivity {
    pub fn online() -> Self {
        Self(true)
    }

    pub fn offline() -> Self {
        Self(false)
    }
}

#[async_trait]
impl Connectivity for StaticConnectivity {
    async fn is_online(&self) -> bool {
        self.0
    }
}

/// Considers the network reachable when a TCP connection to `addr` opens
/// within `timeout`.
#[derive(Debug, Clone)]
pub struct TcpProbe {
    addr: String,
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(addr: &str, timeout: Duration) -> Self {
        Self {
            addr: addr.to_string(),
            timeout,
        }
    }
}

#[async_trait]
impl Connectivity for TcpProbe {
    async fn is_online(&self) -> bool {
        let online = matches!(
            tokio::time::timeout(self.timeout, TcpStream::connect(&self.addr)).await,
            Ok(Ok(_))
        );
        debug!(addr = %self.addr, online, "Connectivity probe");
        online
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_static_connectivity() {
        assert!(StaticConnectivity::online().is_online().await);
        assert!(!StaticConnectivity::offline().is_online().await);
    }

    #[tokio::test]
    async fn test_tcp_probe_reachable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();

        let probe = TcpProbe::new(&addr, Duration::from_secs(1));
        assert!(probe.is_online().await);
    }

    #[tokio::test]
    async fn test_tcp_probe_unreachable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        drop(listener);

        let probe = TcpProbe::new(&addr, Duration::from_millis(500));
        assert!(!probe.is_online().await);
    }
}
