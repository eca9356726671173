//! Target configuration
//!
//! Which server to poll and which management API flavor it speaks.

use serde::Deserialize;

/// Management API flavor exposed by the monitored server
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// JMX REST connector: HTTPS, basic auth, attribute-list payloads (default)
    #[default]
    Jmx,
    /// MicroProfile Metrics: plain HTTP `/metrics`, category/key payloads
    MpMetrics,
}

impl BackendKind {
    /// Default management port for this backend
    pub fn default_port(&self) -> u16 {
        match self {
            Self::Jmx => 9443,
            Self::MpMetrics => 9080,
        }
    }

    /// URL scheme this backend speaks
    pub fn scheme(&self) -> &'static str {
        match self {
            Self::Jmx => "https",
            Self::MpMetrics => "http",
        }
    }

    /// Backend name as used on the CLI and in config files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jmx => "jmx",
            Self::MpMetrics => "mp-metrics",
        }
    }
}

impl std::str::FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jmx" => Ok(Self::Jmx),
            "mp-metrics" | "mpmetrics" | "metrics" => Ok(Self::MpMetrics),
            other => Err(format!(
                "unknown backend: {} (expected jmx or mp-metrics)",
                other
            )),
        }
    }
}

/// Target configuration
///
/// # Example
///
/// ```toml
/// [target]
/// host = "appserver.internal"
/// backend = "jmx"
/// port = 9443            # optional, default follows backend
/// insecure_tls = true    # optional, default follows backend
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TargetConfig {
    /// Hostname of the monitored server
    /// Default: localhost
    pub host: String,

    /// Management port. Default: 9443 for jmx, 9080 for mp-metrics
    pub port: Option<u16>,

    /// Management API flavor (jmx, mp-metrics)
    /// Default: jmx
    pub backend: BackendKind,

    /// Skip TLS certificate verification. Management endpoints commonly
    /// run with self-signed certificates, so this defaults to true for
    /// the jmx backend. TLS itself is still negotiated.
    pub insecure_tls: Option<bool>,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: None,
            backend: BackendKind::Jmx,
            insecure_tls: None,
        }
    }
}

impl TargetConfig {
    /// Effective port: explicit value or the backend's default
    pub fn port(&self) -> u16 {
        self.port.unwrap_or_else(|| self.backend.default_port())
    }

    /// Effective TLS verification policy: explicit value, or disabled for
    /// the jmx backend (self-signed certs are the norm there)
    pub fn insecure_tls(&self) -> bool {
        self.insecure_tls
            .unwrap_or(self.backend == BackendKind::Jmx)
    }

    /// Base URL of the management endpoint
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.backend.scheme(), self.host, self.port())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TargetConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.backend, BackendKind::Jmx);
        assert_eq!(config.port(), 9443);
        assert!(config.insecure_tls());
        assert_eq!(config.base_url(), "https://localhost:9443");
    }

    #[test]
    fn test_mp_metrics_defaults() {
        let config: TargetConfig = toml::from_str("backend = \"mp-metrics\"").unwrap();
        assert_eq!(config.backend, BackendKind::MpMetrics);
        assert_eq!(config.port(), 9080);
        assert!(!config.insecure_tls());
        assert_eq!(config.base_url(), "http://localhost:9080");
    }

    #[test]
    fn test_explicit_port_wins() {
        let config: TargetConfig = toml::from_str("port = 8443").unwrap();
        assert_eq!(config.port(), 8443);
    }

    #[test]
    fn test_explicit_tls_wins() {
        let config: TargetConfig = toml::from_str("insecure_tls = false").unwrap();
        assert!(!config.insecure_tls());
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("jmx".parse::<BackendKind>().unwrap(), BackendKind::Jmx);
        assert_eq!(
            "mp-metrics".parse::<BackendKind>().unwrap(),
            BackendKind::MpMetrics
        );
        assert_eq!(
            "mpmetrics".parse::<BackendKind>().unwrap(),
            BackendKind::MpMetrics
        );
        assert!("liberty".parse::<BackendKind>().is_err());
    }
}
