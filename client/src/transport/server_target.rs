/// Where the client connects to: an address that may still need resolving,
/// and a port
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServerTarget {
    pub host: String,
    pub port: u16,
}

impl ServerTarget {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl std::fmt::Display for ServerTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
