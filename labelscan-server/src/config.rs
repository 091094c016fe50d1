use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration resolved from CLI flags and environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Interface to bind, e.g. `0.0.0.0`.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Directory for transient scan payloads.
    pub temp_dir: PathBuf,
    /// Upper bound on one scan, decode included.
    pub scan_timeout: Duration,
    /// Largest accepted image payload after base64 decoding.
    pub max_image_bytes: usize,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            temp_dir: std::env::temp_dir(),
            scan_timeout: Duration::from_secs(30),
            max_image_bytes: 10 * 1024 * 1024,
        }
    }
}
