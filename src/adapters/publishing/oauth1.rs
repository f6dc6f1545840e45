//! OAuth 1.0a request signing (HMAC-SHA1, user context).
//!
//! Only the pieces the publisher needs: percent-encoding, the signature base
//! string, the signature itself and the `Authorization` header. JSON request
//! bodies are not part of the signature, so callers pass only query
//! parameters (usually none).

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use secrecy::ExposeSecret;
use sha1::Sha1;

use crate::ports::{PublishError, PublishingCredentials};

type HmacSha1 = Hmac<Sha1>;

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";

/// RFC 3986 percent-encoding: everything except `A-Z a-z 0-9 - . _ ~`.
pub fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Builds `METHOD&enc(url)&enc(sorted params)`.
pub fn signature_base_string(method: &str, url: &str, params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();

    let normalized = encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        percent_encode(url),
        percent_encode(&normalized)
    )
}

/// Base64 HMAC-SHA1 of `data` under `key`.
pub fn hmac_sha1_base64(key: &str, data: &str) -> Result<String, PublishError> {
    let mut mac = HmacSha1::new_from_slice(key.as_bytes())
        .map_err(|e| PublishError::Signing(e.to_string()))?;
    mac.update(data.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Signs a base string with the consumer and token secrets.
pub fn sign(
    base_string: &str,
    consumer_secret: &str,
    token_secret: &str,
) -> Result<String, PublishError> {
    let key = format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    );
    hmac_sha1_base64(&key, base_string)
}

/// Builds the `Authorization: OAuth ...` header value for one request.
///
/// `extra_params` are the request's query parameters; they are signed but
/// not repeated in the header.
pub fn authorization_header(
    method: &str,
    url: &str,
    extra_params: &[(String, String)],
    credentials: &PublishingCredentials,
    nonce: &str,
    timestamp: i64,
) -> Result<String, PublishError> {
    let mut oauth_params = vec![
        (
            "oauth_consumer_key".to_string(),
            credentials.consumer_key.expose_secret().clone(),
        ),
        ("oauth_nonce".to_string(), nonce.to_string()),
        (
            "oauth_signature_method".to_string(),
            SIGNATURE_METHOD.to_string(),
        ),
        ("oauth_timestamp".to_string(), timestamp.to_string()),
        (
            "oauth_token".to_string(),
            credentials.access_token.expose_secret().clone(),
        ),
        ("oauth_version".to_string(), OAUTH_VERSION.to_string()),
    ];

    let mut all_params = oauth_params.clone();
    all_params.extend_from_slice(extra_params);

    let base = signature_base_string(method, url, &all_params);
    let signature = sign(
        &base,
        credentials.consumer_secret.expose_secret(),
        credentials.access_token_secret.expose_secret(),
    )?;
    oauth_params.push(("oauth_signature".to_string(), signature));

    let fields = oauth_params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join(", ");

    Ok(format!("OAuth {}", fields))
}
