//! HTTP transport used by the delivery client.

use color_eyre::eyre::WrapErr as _;

/// Status and body of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body, already decompressed.
    pub body: Vec<u8>,
}

/// Low-level request sender.
#[trait_variant::make(Send)]
pub trait Transport: Send + Sync {
    /// POST a JSON document and return the raw response.
    async fn post_json(&self, url: &str, body: Vec<u8>) -> color_eyre::eyre::Result<RawResponse>;
}

/// Transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport that accepts gzip and deflate encoded responses.
    pub fn new() -> color_eyre::eyre::Result<Self> {
        let client = reqwest::Client::builder()
            .gzip(true)
            .deflate(true)
            .build()
            .wrap_err("failed to create HTTP client")?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn post_json(&self, url: &str, body: Vec<u8>) -> color_eyre::eyre::Result<RawResponse> {
        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json; charset=utf-8")
            .body(body)
            .send()
            .await
            .wrap_err_with(|| format!("request to {} failed", url))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .wrap_err("failed to read response body")?;

        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }
}
