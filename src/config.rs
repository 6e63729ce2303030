use std::env;
use std::env::VarError;

use crate::constants::*;
use crate::error::{Error, ErrorKind, Result};

/// Config for the product advertising service.
#[derive(Clone, Default)]
#[cfg_attr(test, derive(Debug))]
pub struct Config {
    /// `access_key` will be loaded from:
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AMAZON_ACCESS_KEY`]
    pub access_key: Option<String>,
    /// `secret_key` will be loaded from:
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AMAZON_SECRET_KEY`]
    pub secret_key: Option<String>,
    /// `associate_tag` will be loaded from:
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AMAZON_ASSOCIATE_TAG`]
    pub associate_tag: Option<String>,
}

impl Config {
    /// Load config from env.
    ///
    /// Values already set on the config are kept when the matching env
    /// value is absent.
    pub fn from_env(mut self) -> Result<Self> {
        if let Some(v) = read_env(AMAZON_ACCESS_KEY)? {
            self.access_key = Some(v);
        }
        if let Some(v) = read_env(AMAZON_SECRET_KEY)? {
            self.secret_key = Some(v);
        }
        if let Some(v) = read_env(AMAZON_ASSOCIATE_TAG)? {
            self.associate_tag = Some(v);
        }
        Ok(self)
    }
}

fn read_env(key: &'static str) -> Result<Option<String>> {
    match env::var(key) {
        Ok(v) => Ok(Some(v)),
        Err(VarError::NotPresent) => Ok(None),
        Err(err @ VarError::NotUnicode(_)) => Err(Error::new(
            ErrorKind::Encoding,
            &format!("env value {key} is not valid UTF-8"),
        )
        .with_operation("Config::from_env")
        .set_source(err)),
    }
}
