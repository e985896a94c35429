use std::{fmt::Display, path::Path, time::Duration};

use log::debug;
use serde::Deserialize;
use tokio::{fs::File, io::AsyncReadExt};

use crate::core::{
    authenticator::password_provider::{FileSystemProvider, PasswordProvider, StaticProvider},
    client::DEFAULT_HOST,
};

pub mod sections;
pub use sections::{ApiConfiguration, LogConfiguration, ModemConfiguration};


pub const DEFAULT_USERNAME: &str = "admin";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_RETENTION: usize = 7;

#[derive(Deserialize, Clone, Debug, Default)]
pub struct Configuration {
    #[serde(default)]
    pub modem: ModemConfiguration,
    #[serde(default)]
    pub api: ApiConfiguration,
    #[serde(default)]
    pub log: LogConfiguration,
}

impl Configuration {
    pub fn host(&self) -> String {
        self.modem
            .host
            .clone()
            .unwrap_or_else(|| DEFAULT_HOST.to_string())
    }

    pub fn username(&self) -> String {
        self.modem
            .username
            .clone()
            .unwrap_or_else(|| DEFAULT_USERNAME.to_string())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Password source: an inline password wins over a password file.
    pub fn password_provider(
        &self,
    ) -> Result<Box<dyn PasswordProvider>, ConfigurationError> {
        match (&self.modem.password, &self.modem.password_file) {
            (Some(p), _) => Ok(Box::new(StaticProvider::new(p.to_owned()))),
            (None, Some(f)) => Ok(Box::new(FileSystemProvider::new(f.to_owned()))),
            (None, None) => Err(ConfigurationError::new(
                "no password configured, set modem.password or modem.password_file".to_string(),
            )),
        }
    }

    /// Applies command line values over the file values.
    pub fn merge(
        mut self,
        host: Option<String>,
        username: Option<String>,
        password: Option<String>,
    ) -> Self {
        if host.is_some() {
            self.modem.host = host;
        }
        if username.is_some() {
            self.modem.username = username;
        }
        if password.is_some() {
            self.modem.password = password;
        }
        self
    }
}

#[derive(Debug)]
pub struct ConfigurationError {
    reason: String,
}

impl ConfigurationError {
    pub fn new(reason: String) -> Self {
        Self { reason }
    }
}

impl Display for ConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason)
    }
}

impl std::error::Error for ConfigurationError {}

pub async fn get_configuration(
    file_path: String,
) -> Result<Configuration, Box<dyn std::error::Error + Send + Sync>> {
    debug!("loading configuration from {file_path}");

    let path = Path::new(&file_path);

    if !path.exists() {
        return Err(Box::new(ConfigurationError::new(format!(
            "configuration file {file_path} is missing"
        ))));
    }

    let mut file = File::open(path).await?;
    let mut buffer = vec![];

    file.read_to_end(&mut buffer).await?;

    let result = String::from_utf8(buffer)?;

    match toml::from_str::<Configuration>(&result) {
        Ok(c) => Ok(c),
        Err(e) => Err(Box::new(ConfigurationError::new(format!(
            "configuration file is corrupted: {e}"
        )))),
    }
}
