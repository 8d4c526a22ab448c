//! Request signing for the Marvel API.
//!
//! Every request must carry a `ts`/`apikey`/`hash` query triplet where
//! `hash = md5(ts + private_key + public_key)`, lowercase hex. The server
//! accepts a timestamp only within a narrow window, so the triplet is
//! derived fresh for every transport attempt, retries included.

use md5::{Digest, Md5};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// API key pair, bound once at client construction and shared read-only by
/// all calls on the instance.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    public_key: String,
    private_key: String,
}

impl Credentials {
    /// Creates a new credential pair.
    #[must_use]
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: private_key.into(),
        }
    }

    /// Returns the public key.
    #[must_use]
    pub fn public_key(&self) -> &str {
        &self.public_key
    }
}

// The private key never appears in logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Authentication parameters for one transport attempt.
///
/// Never persisted; the lifetime of a value is a single attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedParams {
    /// Unix timestamp in seconds, as sent in the `ts` query parameter.
    pub ts: String,
    /// Public key, as sent in the `apikey` query parameter.
    pub apikey: String,
    /// Lowercase hex MD5 digest, as sent in the `hash` query parameter.
    pub hash: String,
}

impl SignedParams {
    /// Returns the parameters as query key/value pairs.
    #[must_use]
    pub fn pairs(self) -> [(String, String); 3] {
        [
            ("ts".to_string(), self.ts),
            ("apikey".to_string(), self.apikey),
            ("hash".to_string(), self.hash),
        ]
    }
}

/// Derives per-attempt authentication parameters from stored credentials
/// and the current wall clock.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credentials: Credentials,
}

impl RequestSigner {
    /// Creates a new signer.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// Signs with the current wall-clock second.
    ///
    /// Must be invoked anew for each transport attempt; reusing a signature
    /// across attempts risks falling outside the server's time window.
    #[must_use]
    pub fn sign(&self) -> SignedParams {
        self.sign_at(unix_seconds())
    }

    /// Signs with an explicit timestamp. Pure function of its inputs.
    #[must_use]
    pub fn sign_at(&self, ts: u64) -> SignedParams {
        let mut hasher = Md5::new();
        hasher.update(ts.to_string().as_bytes());
        hasher.update(self.credentials.private_key.as_bytes());
        hasher.update(self.credentials.public_key.as_bytes());

        SignedParams {
            ts: ts.to_string(),
            apikey: self.credentials.public_key.clone(),
            hash: hex::encode(hasher.finalize()),
        }
    }
}

/// Returns the current Unix timestamp in whole seconds.
#[must_use]
fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}
