use crate::error::{ServerError, ServerResult};
use schema::SchemaOptions;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: IpAddr,
    pub port: u16,
    pub dataset_path: PathBuf,
    /// Serve the GraphiQL explorer on plain GET requests
    pub graphiql: bool,
    /// Answer `__schema` and `__type` queries
    pub introspection: bool,
    pub request_timeout_secs: u64,
    pub max_query_depth: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 4000,
            dataset_path: PathBuf::from("data/world-cup.json"),
            graphiql: true,
            introspection: true,
            request_timeout_secs: 30,
            max_query_depth: 15,
        }
    }
}

impl ServerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a TOML file; keys it omits keep their defaults
    pub fn from_toml_file(path: impl AsRef<Path>) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&text)?)
    }

    pub fn with_bind_address(mut self, bind_address: IpAddr) -> Self {
        self.bind_address = bind_address;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_dataset_path(mut self, dataset_path: impl Into<PathBuf>) -> Self {
        self.dataset_path = dataset_path.into();
        self
    }

    pub fn with_graphiql(mut self, graphiql: bool) -> Self {
        self.graphiql = graphiql;
        self
    }

    pub fn with_introspection(mut self, introspection: bool) -> Self {
        self.introspection = introspection;
        self
    }

    /// Whole seconds, rounded up so a sub-second timeout never becomes zero
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_secs = timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0);
        self
    }

    pub fn with_max_query_depth(mut self, depth: usize) -> Self {
        self.max_query_depth = depth;
        self
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn schema_options(&self) -> SchemaOptions {
        SchemaOptions {
            max_depth: Some(self.max_query_depth),
            introspection: self.introspection,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("Port must be greater than 0".to_string());
        }

        if self.dataset_path.as_os_str().is_empty() {
            return Err("Dataset path cannot be empty".to_string());
        }

        if self.request_timeout_secs == 0 {
            return Err("Request timeout must be greater than 0".to_string());
        }

        if self.max_query_depth == 0 {
            return Err("Max query depth must be greater than 0".to_string());
        }

        Ok(())
    }

    pub fn validated(self) -> ServerResult<Self> {
        self.validate()
            .map_err(|message| ServerError::Config { message })?;
        Ok(self)
    }
}
