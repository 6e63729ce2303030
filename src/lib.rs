//! Signing and searching the Amazon Product Advertising API without effort.
//!
//! Every request to the product advertising service carries its
//! authentication in the query string: the service, account and timestamp
//! fields are injected into the caller's parameters, the full set is
//! canonicalized in byte-wise key order and signed with HMAC-SHA256, and the
//! base64 signature is appended to produce a ready-to-send URL.
//!
//! # Example
//!
//! ```no_run
//! use paapi::Client;
//! use paapi::Signer;
//!
//! #[tokio::main]
//! async fn main() -> paapi::Result<()> {
//!     // Signer can load the credential from environment by default.
//!     let signer = Signer::builder()
//!         .access_key("access_key")
//!         .secret_key("secret_key")
//!         .associate_tag("associate_tag")
//!         .build()?;
//!     let client = Client::new(signer);
//!     // Search items and read back the first matching title.
//!     match client.item_search("rust programming").await? {
//!         Some(title) => println!("first matching title: {title}"),
//!         None => println!("no title found"),
//!     }
//!     Ok(())
//! }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod credential;
pub use credential::Credential;

mod client;
pub use client::Client;

mod config;
pub use config::Config;

mod error;
pub use error::Error;
pub use error::ErrorKind;
pub use error::Result;

mod signer;
pub use signer::Builder;
pub use signer::Signer;

mod constants;
mod hash;
mod time;
