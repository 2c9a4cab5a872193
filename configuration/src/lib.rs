use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use serde::Deserialize;

pub fn get_config<T: for<'de> Deserialize<'de>>(config_path: PathBuf) -> Result<T, config::ConfigError> {
    let f = config::File::from(config_path);
    let config = config::Config::builder()
        .add_source(f)
        .build()?;
    config.try_deserialize::<T>()
}

#[derive(Debug, Deserialize)]
pub struct StubServerConfiguration {
    pub server: ServerConfiguration,
    pub answer: AnswerConfiguration,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfiguration {
    ip_address: IpAddr,
    port: u16,
    // https://datatracker.ietf.org/doc/html/rfc1035#section-4.2.1
    #[serde(default = "default_max_datagram_size")]
    pub max_datagram_size: usize,
}

fn default_max_datagram_size() -> usize {
    512
}

impl ServerConfiguration {
    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::new(self.ip_address, self.port)
    }
}

/// What the stub responder puts in every A answer.
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerConfiguration {
    pub address: Ipv4Addr,
    pub ttl: u32,
}
