//! Server Configuration
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Command line: `--port 9000 --host 0.0.0.0 --scene scenes/main.json`
//! 2. Environment variables: `VOID_SCENE_PORT=9000`
//! 3. Config file: `--config path` or `VOID_SCENE_CONFIG=path`
//! 4. Built-in defaults
//!
//! # Example Config File
//!
//! ```toml
//! host = "127.0.0.1"
//! port = 8080
//! tick_rate_hz = 60
//! project_dir = "."
//! startup_scene = "scenes/main.json"
//! build_list_file = "build_scenes.json"
//! cors = true
//! worker_threads = 2
//! ```

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const ENV_CONFIG: &str = "VOID_SCENE_CONFIG";
pub const ENV_HOST: &str = "VOID_SCENE_HOST";
pub const ENV_PORT: &str = "VOID_SCENE_PORT";
pub const ENV_TICK_HZ: &str = "VOID_SCENE_TICK_HZ";
pub const ENV_PROJECT_DIR: &str = "VOID_SCENE_PROJECT_DIR";
pub const ENV_STARTUP_SCENE: &str = "VOID_SCENE_STARTUP_SCENE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    pub host: String,
    pub port: u16,
    /// Owner loop drains per second
    pub tick_rate_hz: u32,
    /// Directory scene and build list paths are relative to
    pub project_dir: PathBuf,
    /// Scene opened before the server starts accepting requests
    pub startup_scene: Option<String>,
    pub build_list_file: String,
    /// Allow cross-origin callers
    pub cors: bool,
    /// HTTP runtime worker threads
    pub worker_threads: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            tick_rate_hz: 60,
            project_dir: PathBuf::from("."),
            startup_scene: None,
            build_list_file: "build_scenes.json".to_string(),
            cors: true,
            worker_threads: 2,
        }
    }
}

impl ServerConfig {
    /// Local development preset: slower tick, single HTTP worker
    pub fn development() -> Self {
        Self {
            tick_rate_hz: 30,
            worker_threads: 1,
            ..Self::default()
        }
    }

    /// Load with full layering: defaults, file, environment, arguments
    pub fn load(args: &[String]) -> ConfigResult<Self> {
        let file = arg_value(args, "--config")
            .map(PathBuf::from)
            .or_else(|| std::env::var(ENV_CONFIG).ok().map(PathBuf::from));

        let mut config = match file {
            Some(path) => {
                log::info!("Loading config from {}", path.display());
                Self::from_file(&path)?
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        config.apply_args(args)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Override fields from environment variables read through `lookup`.
    ///
    /// Unparseable numbers are logged and ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            self.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(_) => log::warn!("Ignoring invalid {}: {}", ENV_PORT, port),
            }
        }
        if let Some(hz) = lookup(ENV_TICK_HZ) {
            match hz.parse() {
                Ok(hz) => self.tick_rate_hz = hz,
                Err(_) => log::warn!("Ignoring invalid {}: {}", ENV_TICK_HZ, hz),
            }
        }
        if let Some(dir) = lookup(ENV_PROJECT_DIR) {
            self.project_dir = PathBuf::from(dir);
        }
        if let Some(scene) = lookup(ENV_STARTUP_SCENE) {
            self.startup_scene = Some(scene);
        }
    }

    /// Override fields from command line arguments (program name excluded)
    pub fn apply_args(&mut self, args: &[String]) -> ConfigResult<()> {
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--host" => self.host = required(&mut iter, arg)?,
                "--port" => {
                    let port = required(&mut iter, arg)?;
                    self.port = port
                        .parse()
                        .map_err(|_| ConfigError::Invalid(format!("bad --port: {}", port)))?;
                }
                "--scene" => self.startup_scene = Some(required(&mut iter, arg)?),
                "--project" => self.project_dir = PathBuf::from(required(&mut iter, arg)?),
                "--config" => {
                    required(&mut iter, arg)?;
                }
                other => log::warn!("Ignoring unknown argument: {}", other),
            }
        }
        Ok(())
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.port == 0 {
            return Err(ConfigError::Invalid("port must be non-zero".into()));
        }
        if self.tick_rate_hz == 0 {
            return Err(ConfigError::Invalid("tick_rate_hz must be non-zero".into()));
        }
        if self.worker_threads == 0 {
            return Err(ConfigError::Invalid("worker_threads must be non-zero".into()));
        }
        self.host
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::Invalid(format!("bad host address: {}", self.host)))?;
        Ok(())
    }

    pub fn socket_addr(&self) -> ConfigResult<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("bad host address: {}", self.host)))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Time between owner loop drains
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate_hz.max(1) as f64)
    }

    pub fn build_list_path(&self) -> PathBuf {
        self.project_dir.join(&self.build_list_file)
    }
}

fn arg_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn required<'a>(iter: &mut impl Iterator<Item = &'a String>, flag: &str) -> ConfigResult<String> {
    iter.next()
        .cloned()
        .ok_or_else(|| ConfigError::Invalid(format!("{} needs a value", flag)))
}
