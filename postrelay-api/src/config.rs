use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use thiserror::Error;
use tracing::debug;
use url::Url;

pub const DEFAULT_SERVER_PORT: u16 = 8080;
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Error parsing .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
    #[error("Error parsing environment: {0}")]
    Envy(#[from] envy::Error),
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize)]
pub struct Env {
    #[serde(default = "default_server_address")]
    pub server_address: IpAddr,
    #[serde(default = "default_server_port")]
    pub server_port: u16,
    #[serde(default = "default_upstream_base_url")]
    pub upstream_base_url: Url,
}

fn default_server_address() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_server_port() -> u16 {
    DEFAULT_SERVER_PORT
}

fn default_upstream_base_url() -> Url {
    Url::parse(DEFAULT_UPSTREAM_BASE_URL).expect("Default upstream URL is valid")
}

/// Reads the environment, after loading a `.env` file if one is present.
pub fn get_env() -> Result<Env, ConfigError> {
    if let Err(e) = dotenvy::dotenv() {
        if e.not_found() {
            debug!("No .dotenv file found");
        } else {
            return Err(e.into());
        }
    }

    envy::from_env().map_err(ConfigError::from)
}
