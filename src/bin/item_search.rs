//! Search the product advertising service and print the first matching
//! title.
//!
//! Credential is read from the environment (or a `.env` file):
//! `AMAZON_ACCESS_KEY`, `AMAZON_SECRET_KEY`, `AMAZON_ASSOCIATE_TAG`.

use std::env;
use std::process::exit;

use paapi::Client;
use paapi::Signer;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    let keywords = env::args().skip(1).collect::<Vec<_>>().join(" ");
    if keywords.is_empty() {
        eprintln!("usage: item_search <keywords>...");
        exit(2);
    }

    let signer = match Signer::builder().build() {
        Ok(signer) => signer,
        Err(err) => {
            eprintln!("building signer failed: {err}");
            exit(1);
        }
    };

    match Client::new(signer).item_search(&keywords).await {
        Ok(Some(title)) => println!("{title}"),
        Ok(None) => {
            eprintln!("no title found in the response");
            exit(1);
        }
        Err(err) => {
            eprintln!("searching items failed: {err}");
            exit(1);
        }
    }
}
