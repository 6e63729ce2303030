//! Provide Credential for the product advertising service.

use std::fmt::{Debug, Formatter};

use crate::config::Config;
use crate::error::{Error, ErrorKind, Result};

/// Credential that holds the access_key, secret_key and associate_tag.
#[derive(Default, Clone)]
pub struct Credential {
    access_key: String,
    secret_key: String,
    associate_tag: String,
}

impl Credential {
    /// Create a new Credential.
    pub fn new(access_key: &str, secret_key: &str, associate_tag: &str) -> Self {
        Credential {
            access_key: access_key.to_string(),
            secret_key: secret_key.to_string(),
            associate_tag: associate_tag.to_string(),
        }
    }

    /// Get access_key
    pub fn access_key(&self) -> &str {
        &self.access_key
    }
    /// Set access_key
    pub fn set_access_key(&mut self, access_key: &str) -> &mut Self {
        self.access_key = access_key.to_string();
        self
    }

    /// Get secret_key
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }
    /// Set secret_key
    pub fn set_secret_key(&mut self, secret_key: &str) -> &mut Self {
        self.secret_key = secret_key.to_string();
        self
    }

    /// Get associate_tag
    pub fn associate_tag(&self) -> &str {
        &self.associate_tag
    }
    /// Set associate_tag
    pub fn set_associate_tag(&mut self, associate_tag: &str) -> &mut Self {
        self.associate_tag = associate_tag.to_string();
        self
    }

    /// is current cred is valid?
    pub fn is_valid(&self) -> bool {
        !(self.access_key.is_empty() || self.secret_key.is_empty() || self.associate_tag.is_empty())
    }

    /// Check if current credential is valid.
    pub fn check(&self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(Error::new(ErrorKind::ConfigInvalid, "credential is invalid")
                .with_operation("Credential::check"))
        }
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Credential {{ access_key: {}, secret_key: {}, associate_tag: {} }}",
            redact(&self.access_key),
            redact(&self.secret_key),
            redact(&self.associate_tag)
        )
    }
}

/// Loader trait will try to load credential from different sources.
pub trait CredentialLoad: Send + Sync {
    /// Load credential from sources.
    ///
    /// - If succeed, return `Ok(Some(cred))`
    /// - If not found, return `Ok(None)`
    /// - If unexpected errors happened, return `Err(err)`
    fn load_credential(&self) -> Result<Option<Credential>>;
}

/// CredentialLoadChain will try to load credential via the insert order.
///
/// - If found, return directly.
/// - If not found, keep going and try next one.
/// - If meeting error, return directly.
#[derive(Default)]
pub struct CredentialLoadChain {
    loaders: Vec<Box<dyn CredentialLoad>>,
}

impl CredentialLoadChain {
    /// Check if this chain is empty.
    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }

    /// Insert new loaders into chain.
    pub fn push(&mut self, l: impl CredentialLoad + 'static) -> &mut Self {
        self.loaders.push(Box::new(l));

        self
    }
}

impl CredentialLoad for CredentialLoadChain {
    fn load_credential(&self) -> Result<Option<Credential>> {
        for l in self.loaders.iter() {
            if let Some(c) = l.load_credential()? {
                return Ok(Some(c));
            }
        }

        Ok(None)
    }
}

/// Load credential from env values
///
/// - `AMAZON_ACCESS_KEY`
/// - `AMAZON_SECRET_KEY`
/// - `AMAZON_ASSOCIATE_TAG`
#[derive(Default, Clone, Debug)]
pub struct EnvLoader {}

impl CredentialLoad for EnvLoader {
    fn load_credential(&self) -> Result<Option<Credential>> {
        let config = Config::default().from_env()?;

        if let (Some(ak), Some(sk), Some(tag)) = (
            &config.access_key,
            &config.secret_key,
            &config.associate_tag,
        ) {
            Ok(Some(Credential::new(ak, sk, tag)))
        } else {
            Ok(None)
        }
    }
}

fn redact(v: &str) -> &str {
    if v.is_empty() {
        "<empty>"
    } else {
        "<redacted>"
    }
}
