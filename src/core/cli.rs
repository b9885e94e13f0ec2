//! Command-line arguments.
//!
//! Flags are applied on top of the environment-derived [`Config`]. `--host`,
//! `--port` and `--log-level` also read `HOST`, `PORT` and `LOG_LEVEL`.
//! Giving a host or port selects the HTTP transport.

use clap::{Parser, ValueEnum};

use super::config::Config;
use super::transport::TransportConfig;

#[cfg(feature = "http")]
use super::transport::HttpConfig;

/// Transport selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TransportKind {
    Stdio,
    Http,
}

/// Log levels accepted by `--log-level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    /// Level name understood by the tracing filter.
    pub fn as_filter(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warn",
            Self::Error | Self::Critical => "error",
        }
    }
}

/// Launch the MCP server with Cisco news and Webex tools.
#[derive(Debug, Parser)]
#[command(name = "webex-news-mcp-server", version, about)]
pub struct Cli {
    /// Transport to serve on. Defaults to MCP_TRANSPORT, then STDIO.
    #[arg(long, value_enum)]
    pub transport: Option<TransportKind>,

    /// Server host address (HTTP transport).
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    /// Server port number (HTTP transport).
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Set the logging level.
    #[arg(long, env = "LOG_LEVEL", value_enum, ignore_case = true)]
    pub log_level: Option<LogLevel>,
}

impl Cli {
    /// Override `config` with the values given on the command line.
    pub fn apply(&self, config: &mut Config) {
        if let Some(level) = self.log_level {
            config.logging.level = level.as_filter().to_string();
        }
        config.transport = self.transport_config(config.transport.clone());
    }

    #[cfg(feature = "http")]
    fn transport_config(&self, current: TransportConfig) -> TransportConfig {
        #[cfg(feature = "stdio")]
        {
            if self.transport == Some(TransportKind::Stdio) {
                return TransportConfig::Stdio;
            }
        }

        let explicit_http = self.transport == Some(TransportKind::Http)
            || self.host.is_some()
            || self.port.is_some();

        let mut http = match current {
            TransportConfig::Http(cfg) => cfg,
            #[cfg(feature = "stdio")]
            TransportConfig::Stdio if !explicit_http => return TransportConfig::Stdio,
            #[cfg(feature = "stdio")]
            TransportConfig::Stdio => HttpConfig::default(),
        };

        if let Some(host) = &self.host {
            http.host = host.clone();
        }
        if let Some(port) = self.port {
            http.port = port;
        }
        TransportConfig::Http(http)
    }

    #[cfg(not(feature = "http"))]
    fn transport_config(&self, current: TransportConfig) -> TransportConfig {
        current
    }
}
