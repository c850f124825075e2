// API client module: a small blocking HTTP client that sends the single
// request a command maps to and turns Pixela's answer into a result.

use crate::command::PixelaRequest;
use crate::error::{Error, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

pub const TOKEN_HEADER: &str = "x-user-token";
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(15);

/// Blocking client holding the reqwest client and the user's token.
#[derive(Clone)]
pub struct PixelaClient {
    client: Client,
    token: String,
}

/// Pixela answers every call with `{"message": ..., "isSuccess": ...}`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PixelaResponse {
    pub message: String,
    #[serde(default = "assume_success")]
    pub is_success: bool,
}

fn assume_success() -> bool {
    true
}

impl PixelaClient {
    /// Build a client that authenticates with `token` where a request asks for it.
    pub fn new(token: &str) -> Result<Self> {
        let client = build_client(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))?;
        Ok(PixelaClient {
            client,
            token: token.to_string(),
        })
    }

    fn auth_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let val = HeaderValue::from_str(&self.token)
            .map_err(|_| Error::config("TOKEN contains characters not allowed in an HTTP header"))?;
        headers.insert(TOKEN_HEADER, val);
        Ok(headers)
    }

    /// Send one request. Non-success statuses become `Error::Remote` with the
    /// message Pixela gave, or the raw body when it is not Pixela's JSON.
    pub fn send(&self, req: &PixelaRequest) -> Result<PixelaResponse> {
        debug!(method = %req.method, url = %req.url, "sending request");
        let mut builder = self.client.request(req.method.clone(), req.url.clone());
        if req.authenticated {
            builder = builder.headers(self.auth_headers()?);
        }
        if let Some(body) = &req.body {
            builder = builder.json(body);
        }

        let res = builder.send()?;
        let status = res.status();
        let text = res.text()?;
        debug!(%status, "received response");

        if !status.is_success() {
            warn!(%status, "request rejected");
            return Err(Error::Remote {
                status,
                message: remote_message(&text),
            });
        }
        let parsed = parse_response(&text);
        // Pixela can answer 200 while reporting failure in the body.
        if !parsed.is_success {
            warn!(%status, "request reported failure");
            return Err(Error::Remote {
                status,
                message: parsed.message,
            });
        }
        Ok(parsed)
    }
}

// A client that cannot be built is a local setup problem, not a network one.
fn build_client(user_agent: &str) -> Result<Client> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(|e| Error::config(format!("cannot build HTTP client: {}", e)))
}

/// Pull Pixela's `message` out of a body, falling back to the body itself.
pub fn remote_message(body: &str) -> String {
    match serde_json::from_str::<PixelaResponse>(body) {
        Ok(r) => r.message,
        Err(_) if body.trim().is_empty() => "(empty response body)".into(),
        Err(_) => body.trim().to_string(),
    }
}

fn parse_response(body: &str) -> PixelaResponse {
    serde_json::from_str(body).unwrap_or_else(|_| PixelaResponse {
        message: body.trim().to_string(),
        is_success: true,
    })
}
