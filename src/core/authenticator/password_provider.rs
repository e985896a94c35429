use std::path::Path;

use async_trait::async_trait;
use log::error;
use mockall::automock;
use tokio::{fs::File, io::AsyncReadExt};

#[automock]
#[async_trait]
pub trait PasswordProvider: Send + Sync {
    async fn get(&self) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}

/// Password given in the configuration or on the command line.
#[derive(Clone)]
pub struct StaticProvider {
    password: String,
}

impl StaticProvider {
    pub fn new(password: String) -> Self {
        Self { password }
    }
}

#[async_trait]
impl PasswordProvider for StaticProvider {
    async fn get(&self) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.password.clone())
    }
}

/// Password read from a file, surrounding whitespace trimmed.
#[derive(Clone)]
pub struct FileSystemProvider {
    path: String,
}

impl FileSystemProvider {
    pub fn new(path: String) -> Self {
        Self { path }
    }
}

#[async_trait]
impl PasswordProvider for FileSystemProvider {
    async fn get(&self) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let path = Path::new(self.path.as_str());

        if !path.exists() {
            error!("password file does not exist {}", self.path);
            return Err(Box::new(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("file does not exist {}", self.path),
            )));
        }

        let mut file = File::open(path).await?;
        let mut buffer = vec![];

        file.read_to_end(&mut buffer).await?;

        let password = String::from_utf8(buffer)?;

        Ok(password.trim().to_string())
    }
}
