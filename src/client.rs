//! Product Advertising API search client.

use std::collections::HashMap;

use http::StatusCode;
use log::debug;
use quick_xml::de;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Deserialize;

use crate::constants::*;
use crate::error::{Error, ErrorKind, Result};
use crate::signer::Signer;

/// Client that searches items on the product advertising service.
pub struct Client {
    signer: Signer,
    client: reqwest::Client,
}

impl Client {
    /// Create a new client with the default HTTP transport.
    pub fn new(signer: Signer) -> Self {
        Self {
            signer,
            client: reqwest::Client::new(),
        }
    }

    /// Create a new client with a user-provided HTTP transport.
    pub fn with_client(signer: Signer, client: reqwest::Client) -> Self {
        Self { signer, client }
    }

    /// Search items that match the given keywords and return the title of
    /// the first matching item.
    ///
    /// - If the response carries a title, return `Ok(Some(title))`
    /// - If the response carries no title, return `Ok(None)`
    /// - If the provider rejects the request, return `Err(err)` carrying
    ///   the matching [`ErrorKind`][crate::ErrorKind]
    ///
    /// Throttled requests are not retried; callers should wait and try
    /// again.
    ///
    /// # Notes
    ///
    /// Parameter values are signed and sent verbatim; callers supply
    /// url-safe keywords.
    pub async fn item_search(&self, keywords: &str) -> Result<Option<String>> {
        let mut params = HashMap::from([
            ("Operation".to_string(), "ItemSearch".to_string()),
            ("SearchIndex".to_string(), "All".to_string()),
            ("Keywords".to_string(), keywords.to_string()),
            (
                "ResponseGroup".to_string(),
                "ItemAttributes,Offers".to_string(),
            ),
        ]);

        let url = self.signer.sign(&mut params)?;
        debug!("signed request url: {url}");

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        let content = resp.text().await?;

        if status != StatusCode::OK {
            return Err(parse_error_response(status, &content));
        }

        let title = first_element_text(&content, "Title");
        if title.is_none() {
            debug!("response carries no Title element");
        }

        Ok(title)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").field("signer", &self.signer).finish()
    }
}

/// Map a provider error document onto an error kind.
///
/// - `RequestThrottled`: the rate limit was hit
/// - `AWS.InvalidAccount` / `AWS.MissingParameters`: the credential is wrong
/// - everything else carries the raw provider message
fn parse_error_response(status: StatusCode, content: &str) -> Error {
    let resp: ErrorResponse = match de::from_str(content) {
        Ok(v) => v,
        Err(err) => {
            return Error::new(
                ErrorKind::Unexpected,
                &format!("provider returned {status} with an unrecognized body: {content}"),
            )
            .with_operation("Client::item_search")
            .set_source(err)
        }
    };

    let ErrorEntry { code, message } = resp.error;
    let err = match code.as_str() {
        REQUEST_THROTTLED => Error::new(
            ErrorKind::RateLimited,
            "rate limit exceeded, please wait and try again",
        ),
        INVALID_ACCOUNT | MISSING_PARAMETERS => Error::new(
            ErrorKind::ConfigInvalid,
            "authentication rejected, please check access key, secret key and associate tag",
        ),
        "" => Error::new(
            ErrorKind::Unexpected,
            &format!("provider returned {status}: {content}"),
        ),
        _ => Error::new(ErrorKind::Unexpected, &format!("{code}: {message}")),
    };

    err.with_operation("Client::item_search")
}

/// Extract the text of the first element named `name`, wherever it appears
/// in the document.
fn first_element_text(xml: &str, name: &str) -> Option<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut inside = false;
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == name.as_bytes() => inside = true,
            Ok(Event::Text(text)) if inside => {
                return text.unescape().ok().map(|v| v.into_owned());
            }
            // The first match is authoritative: an empty element ends the
            // scan with no text.
            Ok(Event::End(_)) if inside => return None,
            Ok(Event::Eof) => return None,
            Err(err) => {
                debug!("malformed response document: {err:?}");
                return None;
            }
            _ => (),
        }
    }
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct ErrorResponse {
    error: ErrorEntry,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct ErrorEntry {
    code: String,
    message: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_error_response_throttled() {
        let _ = env_logger::builder().is_test(true).try_init();

        let content = r#"<?xml version="1.0"?>
<ItemSearchErrorResponse xmlns="http://ecs.amazonaws.com/doc/2013-08-01/">
  <Error>
    <Code>RequestThrottled</Code>
    <Message>AWS Access Key ID: AKIDEXAMPLE. You are submitting requests too quickly.</Message>
  </Error>
  <RequestId>b1663ad1-23ab-45e9-b465-9af30b202eba</RequestId>
</ItemSearchErrorResponse>"#;

        let err = parse_error_response(StatusCode::SERVICE_UNAVAILABLE, content);
        assert_eq!(ErrorKind::RateLimited, err.kind());
    }

    #[test]
    fn test_parse_error_response_invalid_account() {
        let _ = env_logger::builder().is_test(true).try_init();

        let content = r#"<?xml version="1.0"?>
<ItemSearchErrorResponse xmlns="http://ecs.amazonaws.com/doc/2013-08-01/">
  <Error>
    <Code>AWS.InvalidAccount</Code>
    <Message>Your AccessKey Id is not registered for Product Advertising API.</Message>
  </Error>
  <RequestId>c6104cbe-af31-11e0-8154-cbc7ccf896c7</RequestId>
</ItemSearchErrorResponse>"#;

        let err = parse_error_response(StatusCode::FORBIDDEN, content);
        assert_eq!(ErrorKind::ConfigInvalid, err.kind());
    }

    #[test]
    fn test_parse_error_response_missing_parameters() {
        let _ = env_logger::builder().is_test(true).try_init();

        let content = r#"<?xml version="1.0"?>
<ItemSearchErrorResponse xmlns="http://ecs.amazonaws.com/doc/2013-08-01/">
  <Error>
    <Code>AWS.MissingParameters</Code>
    <Message>Your request is missing required parameters.</Message>
  </Error>
  <RequestId>c6104cbe-af31-11e0-8154-cbc7ccf896c7</RequestId>
</ItemSearchErrorResponse>"#;

        let err = parse_error_response(StatusCode::BAD_REQUEST, content);
        assert_eq!(ErrorKind::ConfigInvalid, err.kind());
    }

    #[test]
    fn test_parse_error_response_other_code_carries_provider_message() {
        let _ = env_logger::builder().is_test(true).try_init();

        let content = r#"<?xml version="1.0"?>
<ItemSearchErrorResponse xmlns="http://ecs.amazonaws.com/doc/2013-08-01/">
  <Error>
    <Code>AWS.InvalidParameterValue</Code>
    <Message>XXX is not a valid value for SearchIndex.</Message>
  </Error>
  <RequestId>c6104cbe-af31-11e0-8154-cbc7ccf896c7</RequestId>
</ItemSearchErrorResponse>"#;

        let err = parse_error_response(StatusCode::BAD_REQUEST, content);
        assert_eq!(ErrorKind::Unexpected, err.kind());
        assert!(err.to_string().contains("AWS.InvalidParameterValue"));
        assert!(err
            .to_string()
            .contains("XXX is not a valid value for SearchIndex."));
    }

    #[test]
    fn test_parse_error_response_with_unrecognized_body() {
        let _ = env_logger::builder().is_test(true).try_init();

        let err = parse_error_response(StatusCode::BAD_GATEWAY, "<html>Bad Gateway</html>");
        assert_eq!(ErrorKind::Unexpected, err.kind());
        assert!(err.to_string().contains("502"));
    }

    #[test]
    fn test_first_element_text() {
        let _ = env_logger::builder().is_test(true).try_init();

        let content = r#"<?xml version="1.0"?>
<ItemSearchResponse xmlns="http://ecs.amazonaws.com/doc/2013-08-01/">
  <Items>
    <Request>
      <IsValid>True</IsValid>
    </Request>
    <TotalResults>2</TotalResults>
    <Item>
      <ASIN>1593278284</ASIN>
      <ItemAttributes>
        <Title>The Rust Programming Language</Title>
      </ItemAttributes>
    </Item>
    <Item>
      <ASIN>1718503105</ASIN>
      <ItemAttributes>
        <Title>Rust for Rustaceans</Title>
      </ItemAttributes>
    </Item>
  </Items>
</ItemSearchResponse>"#;

        assert_eq!(
            Some("The Rust Programming Language".to_string()),
            first_element_text(content, "Title")
        );
    }

    #[test]
    fn test_first_element_text_unescapes() {
        let _ = env_logger::builder().is_test(true).try_init();

        let content = "<Item><Title>Fish &amp; Chips</Title></Item>";

        assert_eq!(
            Some("Fish & Chips".to_string()),
            first_element_text(content, "Title")
        );
    }

    #[test]
    fn test_first_element_text_without_match() {
        let _ = env_logger::builder().is_test(true).try_init();

        let content = r#"<?xml version="1.0"?>
<ItemSearchResponse xmlns="http://ecs.amazonaws.com/doc/2013-08-01/">
  <Items>
    <TotalResults>0</TotalResults>
  </Items>
</ItemSearchResponse>"#;

        assert_eq!(None, first_element_text(content, "Title"));
    }

    #[test]
    fn test_first_element_text_with_empty_element() {
        let _ = env_logger::builder().is_test(true).try_init();

        let content = "<Item><Title></Title></Item>";

        assert_eq!(None, first_element_text(content, "Title"));
    }

    #[test]
    fn test_first_element_text_with_malformed_document() {
        let _ = env_logger::builder().is_test(true).try_init();

        assert_eq!(None, first_element_text("<Item><Tit", "Title"));
    }
}
