use serde::Deserialize;

#[derive(Deserialize, Clone, Debug, Default)]
pub struct ModemConfiguration {
    pub host: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub password_file: Option<String>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct ApiConfiguration {
    /// request timeout in seconds
    pub timeout: Option<u64>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct LogConfiguration {
    pub level: Option<String>,
    pub directory: Option<String>,
    pub retention: Option<usize>,
}
