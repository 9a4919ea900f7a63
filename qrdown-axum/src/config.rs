//! Server settings, read from the environment.
//!
//! | Variable                | Default   |
//! |-------------------------|-----------|
//! | `HOST`                  | `0.0.0.0` |
//! | `PORT`                  | `3002`    |
//! | `MAX_UPLOAD_BYTES`      | 10 MiB    |
//! | `LOGO_PROBE_EXTENSIONS` | `jpg`     |
//!
//! Bucket settings live in [`qrdown_blob::S3Config::from_env`].

use qrdown_blob::BlobConfig;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Request body cap, applied to uploads and JSON alike
    pub max_upload_bytes: usize,
    /// Comma separated list, tried in order by the logo lookup
    pub logo_probe_extensions: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3002,
            max_upload_bytes: 10 * 1024 * 1024,
            logo_probe_extensions: vec!["jpg".to_string()],
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env_var_or("HOST", defaults.host),
            port: env_var_or("PORT", defaults.port),
            max_upload_bytes: env_var_or("MAX_UPLOAD_BYTES", defaults.max_upload_bytes),
            logo_probe_extensions: std::env::var("LOGO_PROBE_EXTENSIONS")
                .map(|v| parse_list(&v))
                .ok()
                .filter(|list| !list.is_empty())
                .unwrap_or(defaults.logo_probe_extensions),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn blob_config(&self) -> BlobConfig {
        BlobConfig::default().with_logo_probe_extensions(self.logo_probe_extensions.iter().cloned())
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn env_var_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
    T::Err: std::fmt::Debug,
{
    std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .unwrap_or(default)
}
