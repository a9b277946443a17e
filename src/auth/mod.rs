// file: src/auth/mod.rs
// version: 1.0.0
// guid: c95e2f07-4b81-4d3a-96c7-1a80d4e6b529

//! Encrypted credential storage for the MAAS API key
//!
//! The API key never sits on disk in plaintext. A key file holds a
//! urlsafe-base64 Fernet key and a second file holds the Fernet token that
//! encrypts the API key string. Both are read and decrypted at startup.

use crate::Result;
use fernet::Fernet;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// A MAAS API key, made of the three OAuth credential parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKey {
    pub consumer_key: String,
    pub token_key: String,
    pub token_secret: String,
}

impl FromStr for ApiKey {
    type Err = crate::error::ReimageError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
            return Err(crate::error::ReimageError::credential(
                "API key must have the form '<consumer>:<token>:<secret>'",
            ));
        }

        Ok(Self {
            consumer_key: parts[0].to_string(),
            token_key: parts[1].to_string(),
            token_secret: parts[2].to_string(),
        })
    }
}

/// Reads and writes the encrypted API key files
pub struct CredentialStore {
    key_file: PathBuf,
    credentials_file: PathBuf,
}

impl CredentialStore {
    /// Create a store over the given key and credentials file paths
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(key_file: P, credentials_file: Q) -> Self {
        Self {
            key_file: key_file.as_ref().to_path_buf(),
            credentials_file: credentials_file.as_ref().to_path_buf(),
        }
    }

    /// Decrypt and parse the stored API key
    pub fn load(&self) -> Result<ApiKey> {
        let fernet = self.open_fernet()?;

        let token = read_required(&self.credentials_file)?;
        let plaintext = fernet.decrypt(token.trim()).map_err(|_| {
            crate::error::ReimageError::credential(format!(
                "Failed to decrypt {}: token is malformed or the key does not match",
                self.credentials_file.display()
            ))
        })?;

        let api_key = String::from_utf8(plaintext).map_err(|_| {
            crate::error::ReimageError::credential("Decrypted API key is not valid UTF-8")
        })?;

        debug!("Decrypted API key from {}", self.credentials_file.display());
        api_key.parse()
    }

    /// Generate a fresh key and write both files, encrypting `api_key`
    ///
    /// Validates the API key shape before anything touches the disk, so a
    /// bad key never leaves partial state behind.
    pub fn init(&self, api_key: &str) -> Result<ApiKey> {
        let parsed: ApiKey = api_key.parse()?;

        let key = Fernet::generate_key();
        let fernet = Fernet::new(&key).ok_or_else(|| {
            crate::error::ReimageError::credential("Generated encryption key was rejected")
        })?;
        let token = fernet.encrypt(api_key.trim().as_bytes());

        write_private(&self.key_file, key.as_bytes())?;
        write_private(&self.credentials_file, token.as_bytes())?;

        debug!(
            "Wrote {} and {}",
            self.key_file.display(),
            self.credentials_file.display()
        );
        Ok(parsed)
    }

    fn open_fernet(&self) -> Result<Fernet> {
        let key = read_required(&self.key_file)?;
        Fernet::new(key.trim()).ok_or_else(|| {
            crate::error::ReimageError::credential(format!(
                "{} does not contain a valid urlsafe-base64 key",
                self.key_file.display()
            ))
        })
    }
}

fn read_required(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(crate::error::ReimageError::file_not_found(
            path.display().to_string(),
        ));
    }
    Ok(fs::read_to_string(path)?)
}

fn write_private(path: &Path, contents: &[u8]) -> Result<()> {
    fs::write(path, contents)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(path, perms)?;
    }

    Ok(())
}
