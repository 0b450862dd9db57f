use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::utils::{DEFAULT_HOST, DEFAULT_MODELS_DIR, DEFAULT_PORT};

/// Serving configuration, layered from defaults, an optional TOML file,
/// and `VAYU_*` environment variables. CLI flags are applied on top by the
/// caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServeConfig {
    pub host: String,
    pub port: u16,
    pub models_dir: PathBuf,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            models_dir: PathBuf::from(DEFAULT_MODELS_DIR),
        }
    }
}

impl ServeConfig {
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("host", DEFAULT_HOST)?
            .set_default("port", DEFAULT_PORT as i64)?
            .set_default("models_dir", DEFAULT_MODELS_DIR)?;

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }

        let settings = builder
            .add_source(Environment::with_prefix("VAYU"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// CLI flags win over every other source.
    pub fn apply_overrides(
        &mut self,
        host: Option<String>,
        port: Option<u16>,
        models_dir: Option<PathBuf>,
    ) {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        if let Some(models_dir) = models_dir {
            self.models_dir = models_dir;
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
