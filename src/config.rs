//! Runtime configuration from flags and environment variables.
//!
//! Every flag has an environment fallback so a PaaS can configure the
//! service without a command line. `PORT` follows the convention those
//! platforms use to hand out the listening port.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::{Parser, ValueEnum};

use crate::error::Error;
use crate::store::StoreUrl;

/// Log output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable single-line events.
    #[default]
    Compact,
    /// One JSON object per event, for log aggregators.
    Json,
}

#[derive(Clone, Debug, Parser)]
#[command(name = "registrar", version, about = "Student records JSON API")]
pub struct Config {
    /// Address to listen on.
    #[arg(long, env = "REGISTRAR_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Document store connection string: `memory://` or `mongodb://...`.
    #[arg(long, env = "MONGO_DETAILS", default_value = "memory://")]
    pub database_url: String,

    /// Database holding the student collection.
    #[arg(long, env = "REGISTRAR_DATABASE", default_value = "students")]
    pub database: String,

    /// Collection holding student documents.
    #[arg(long, env = "REGISTRAR_COLLECTION", default_value = "students_collection")]
    pub collection: String,

    #[arg(long, env = "REGISTRAR_LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl Config {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn store_url(&self) -> Result<StoreUrl, Error> {
        StoreUrl::parse(&self.database_url)
    }
}
