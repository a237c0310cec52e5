//! API credentials for Independent Reserve private endpoints
//!
//! # Security
//!
//! The API secret is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use secrecy::{ExposeSecret, SecretBox};
use tracing::debug;

use crate::error::{AuthError, AuthResult};
use crate::signer::sign;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "IR_API_KEY";
/// Environment variable holding the API secret
pub const API_SECRET_ENV: &str = "IR_API_SECRET";

/// API credentials for authenticated requests
pub struct Credentials {
    /// API key (sent in clear with every private request)
    api_key: String,
    /// API secret as UTF-8 bytes, zeroized on drop
    api_secret: SecretBox<Vec<u8>>,
}

impl Credentials {
    /// Create new credentials from an API key and secret
    ///
    /// The secret is used as the HMAC key exactly as given (its UTF-8 bytes).
    ///
    /// # Errors
    /// Returns [`AuthError::InvalidCredentials`] if either value is empty,
    /// so bad key material is caught here rather than on the first call.
    pub fn new(api_key: impl Into<String>, api_secret: impl AsRef<str>) -> AuthResult<Self> {
        let api_key = api_key.into();
        let api_secret = api_secret.as_ref();

        if api_key.trim().is_empty() {
            return Err(AuthError::InvalidCredentials("API key is empty".to_string()));
        }
        if api_secret.is_empty() {
            return Err(AuthError::InvalidCredentials("API secret is empty".to_string()));
        }

        Ok(Self {
            api_key,
            api_secret: SecretBox::new(Box::new(api_secret.as_bytes().to_vec())),
        })
    }

    /// Create credentials from environment variables
    ///
    /// Reads `IR_API_KEY` and `IR_API_SECRET` from the environment.
    pub fn from_env() -> AuthResult<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(API_KEY_ENV.to_string()))?;
        let api_secret = std::env::var(API_SECRET_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(API_SECRET_ENV.to_string()))?;

        debug!("Loaded API credentials from environment");
        Self::new(api_key, api_secret)
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Sign a canonical message with the API secret
    pub fn sign(&self, message: &str) -> String {
        sign(self.api_secret.expose_secret(), message)
    }
}

impl Clone for Credentials {
    /// Clone credentials (creates new SecretBox with same content)
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            api_secret: SecretBox::new(Box::new(self.api_secret.expose_secret().clone())),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let visible: String = self.api_key.chars().take(8).collect();
        f.debug_struct("Credentials")
            .field("api_key", &format!("{}...", visible))
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}
