use std::env;

use log::debug;
use log::warn;
use paapi::Client;
use paapi::Signer;

fn init_client() -> Option<Client> {
    let _ = env_logger::builder().is_test(true).try_init();

    dotenv::from_filename(".env").ok();

    if env::var("PAAPI_TEST").is_err() || env::var("PAAPI_TEST").unwrap() != "on" {
        return None;
    }

    let signer = Signer::builder().build().expect("signer must be valid");

    Some(Client::new(signer))
}

#[tokio::test]
async fn test_item_search() -> paapi::Result<()> {
    let client = init_client();
    if client.is_none() {
        warn!("PAAPI_TEST is not set, skipped");
        return Ok(());
    }
    let client = client.unwrap();

    let title = client.item_search("rust programming").await?;
    debug!("got title: {title:?}");

    Ok(())
}
