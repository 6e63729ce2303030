//! Product Advertising API request signer.

use std::collections::HashMap;
use std::fmt::Write;
use std::fmt::{Debug, Formatter};

use log::debug;

use crate::constants::*;
use crate::credential::{Credential, CredentialLoad, CredentialLoadChain, EnvLoader};
use crate::error::{Error, ErrorKind, Result};
use crate::hash::base64_hmac_sha256;
use crate::time::{self, format_timestamp, DateTime};

/// Builder for `Signer`.
#[derive(Default)]
pub struct Builder {
    credential: Credential,
    credential_load: CredentialLoadChain,

    endpoint: Option<String>,
    uri: Option<String>,
    time: Option<DateTime>,
}

impl Builder {
    /// Specify access key.
    pub fn access_key(&mut self, access_key: &str) -> &mut Self {
        self.credential.set_access_key(access_key);
        self
    }

    /// Specify secret key.
    pub fn secret_key(&mut self, secret_key: &str) -> &mut Self {
        self.credential.set_secret_key(secret_key);
        self
    }

    /// Specify associate tag.
    pub fn associate_tag(&mut self, associate_tag: &str) -> &mut Self {
        self.credential.set_associate_tag(associate_tag);
        self
    }

    /// Specify credential load behavior
    ///
    /// If not set, we will use the default credential loader.
    pub fn credential_loader(&mut self, credential_load: CredentialLoadChain) -> &mut Self {
        self.credential_load = credential_load;
        self
    }

    /// Specify the endpoint host.
    ///
    /// Defaults to `webservices.amazon.com`. Other marketplaces use their
    /// own hosts, e.g. `webservices.amazon.co.uk`.
    pub fn endpoint(&mut self, endpoint: &str) -> &mut Self {
        self.endpoint = Some(endpoint.to_string());
        self
    }

    /// Specify the resource path.
    ///
    /// Defaults to `/onca/xml`.
    pub fn uri(&mut self, uri: &str) -> &mut Self {
        self.uri = Some(uri.to_string());
        self
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn time(&mut self, time: DateTime) -> &mut Self {
        self.time = Some(time);
        self
    }

    /// Use exising information to build a new signer.
    ///
    /// The builder should not be used anymore.
    pub fn build(&mut self) -> Result<Signer> {
        let credential = if self.credential.is_valid() {
            Some(self.credential.clone())
        } else {
            if self.credential_load.is_empty() {
                self.credential_load.push(EnvLoader::default());
            }
            self.credential_load.load_credential()?
        };

        debug!("signer credential: {:?}", &credential);

        let credential = credential.ok_or_else(|| {
            Error::new(ErrorKind::ConfigInvalid, "credential not found")
                .with_operation("Builder::build")
        })?;
        credential.check()?;

        Ok(Signer {
            credential,
            endpoint: self
                .endpoint
                .clone()
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            uri: self.uri.clone().unwrap_or_else(|| DEFAULT_URI.to_string()),
            time: self.time,
        })
    }
}

/// Signer that implements the product advertising request signing scheme.
///
/// Every request carries its authentication in the query: the signer injects
/// the service and account fields, canonicalizes the full parameter set and
/// signs it with HMAC-SHA256, producing a ready-to-send URL.
pub struct Signer {
    credential: Credential,
    endpoint: String,
    uri: String,

    time: Option<DateTime>,
}

impl Signer {
    /// Create a builder.
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// String to sign:
    ///
    /// ```text
    /// GET + "\n" +
    /// EndpointHost + "\n" +
    /// UriPath + "\n" +
    /// CanonicalizedQuery;
    /// ```
    fn string_to_sign(&self, canonical_query: &str) -> Result<String> {
        let mut s = String::new();

        writeln!(&mut s, "GET")?;
        writeln!(&mut s, "{}", self.endpoint)?;
        writeln!(&mut s, "{}", self.uri)?;
        write!(&mut s, "{canonical_query}")?;

        debug!("string to sign: {}", &s);

        Ok(s)
    }

    /// Sign the parameter set and produce the request URL.
    ///
    /// The signer injects `Service`, `AWSAccessKeyId`, `AssociateTag` and
    /// `Timestamp` into `params`, overwriting caller-supplied entries with
    /// the same keys, then appends the computed `Signature`. The signature
    /// covers every parameter present at signing time except `Signature`
    /// itself.
    ///
    /// # Notes
    ///
    /// Values are signed and joined verbatim; callers supply url-safe
    /// values.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::collections::HashMap;
    ///
    /// use paapi::Signer;
    ///
    /// fn main() -> paapi::Result<()> {
    ///     // Signer can load the credential from environment by default.
    ///     let signer = Signer::builder()
    ///         .access_key("access_key")
    ///         .secret_key("secret_key")
    ///         .associate_tag("associate_tag")
    ///         .build()?;
    ///     let mut params = HashMap::from([
    ///         ("Operation".to_string(), "ItemSearch".to_string()),
    ///         ("SearchIndex".to_string(), "All".to_string()),
    ///         ("Keywords".to_string(), "rust".to_string()),
    ///     ]);
    ///     let url = signer.sign(&mut params)?;
    ///     println!("signed request url: {url}");
    ///     Ok(())
    /// }
    /// ```
    pub fn sign(&self, params: &mut HashMap<String, String>) -> Result<String> {
        // A stale signature must never become part of the signed content.
        if params.remove(SIGNATURE).is_some() {
            debug!("caller-supplied {SIGNATURE} dropped before signing");
        }

        let now = self.time.unwrap_or_else(time::now);
        insert_param(params, SERVICE, AWS_ECOMMERCE_SERVICE);
        insert_param(params, AWS_ACCESS_KEY_ID, self.credential.access_key());
        insert_param(params, ASSOCIATE_TAG, self.credential.associate_tag());
        insert_param(params, TIMESTAMP, &format_timestamp(now));

        let canonical_query = canonicalize(params);
        let string_to_sign = self.string_to_sign(&canonical_query)?;
        let signature = base64_hmac_sha256(
            self.credential.secret_key().as_bytes(),
            string_to_sign.as_bytes(),
        );
        params.insert(SIGNATURE.to_string(), signature.clone());

        Ok(format!(
            "http://{}{}?{canonical_query}&{SIGNATURE}={signature}",
            self.endpoint, self.uri
        ))
    }
}

impl Debug for Signer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Signer {{ endpoint: {}, uri: {} }}",
            self.endpoint, self.uri
        )
    }
}

fn insert_param(params: &mut HashMap<String, String>, key: &str, value: &str) {
    if let Some(old) = params.insert(key.to_string(), value.to_string()) {
        if old != value {
            debug!("caller-supplied {key} overwritten while signing");
        }
    }
}

/// Canonicalize the parameter set: `key=value` pairs in byte-wise ascending
/// key order, joined by `&`, values taken verbatim.
fn canonicalize(params: &HashMap<String, String>) -> String {
    let mut entries: Vec<_> = params.iter().collect();
    entries.sort_unstable_by(|(lk, _), (rk, _)| lk.as_bytes().cmp(rk.as_bytes()));

    entries
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<String>>()
        .join("&")
}
