//! Request signing and nonce management for the Independent Reserve API
//!
//! Private endpoints authenticate every call with an HMAC-SHA256 signature
//! over a canonical message that includes a strictly increasing nonce. This
//! crate provides the three pieces a client needs for that:
//!
//! - [`sign`]: uppercase hex HMAC-SHA256 of a message
//! - [`NonceSource`]: per-client monotonic nonce counter
//! - [`Credentials`]: API key and secret, with the secret zeroized on drop
//!
//! # Example
//!
//! ```
//! use ir_auth::{Credentials, NonceSource};
//!
//! let creds = Credentials::new("my-api-key", "my-api-secret").unwrap();
//! let nonces = NonceSource::starting_at(1000);
//!
//! let nonce = nonces.next();
//! let message = format!(
//!     "https://api.independentreserve.com/Private/GetAccounts,apiKey={},nonce={}",
//!     creds.api_key(),
//!     nonce
//! );
//! let signature = creds.sign(&message);
//! assert_eq!(signature.len(), 64);
//! ```

mod credentials;
mod error;
mod nonce;
mod signer;

pub use credentials::{Credentials, API_KEY_ENV, API_SECRET_ENV};
pub use error::{AuthError, AuthResult};
pub use nonce::NonceSource;
pub use signer::sign;
