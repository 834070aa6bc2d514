//! Delivery client for the `createMessage` API method.

use std::time::{Duration, Instant};

use color_eyre::eyre::WrapErr as _;
use pushwoosh_core::{Device, Message};
use serde_json::Value;

use crate::{ClientConfig, HttpTransport, Transport};

/// Base URL of the Pushwoosh JSON API.
pub const DEFAULT_BASE_URL: &str = "https://cp.pushwoosh.com/json/1.3/";

const CREATE_MESSAGE: &str = "createMessage";

/// Decoded response of an API call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response document, or `None` if the body was not valid JSON.
    pub body: Option<Value>,
}

/// Result of a push.
#[derive(Debug, Clone, PartialEq)]
pub enum PushOutcome {
    /// The request was sent and a response received.
    Delivered(ApiResponse),
    /// There were no notifications, so no request was made.
    NothingToSend,
}

impl PushOutcome {
    /// Response of the call, if one was made.
    pub fn response(&self) -> Option<&ApiResponse> {
        match self {
            Self::Delivered(response) => Some(response),
            Self::NothingToSend => None,
        }
    }
}

/// Diagnostic snapshot of the most recent API call.
#[derive(Debug, Clone)]
pub struct CallLog {
    /// API method name.
    pub method: String,
    /// Full request URL.
    pub url: String,
    /// Contents of the `request` envelope.
    pub request: Value,
    /// HTTP status, if a response was received.
    pub status: Option<u16>,
    /// Time spent waiting for the transport.
    pub elapsed: Duration,
    /// Transport error, if the call failed.
    pub error: Option<String>,
}

#[derive(serde::Serialize)]
struct Envelope<'a> {
    request: &'a Value,
}

/// Client that sends messages on behalf of one application.
pub struct DeliveryClient<T = HttpTransport> {
    application: Option<String>,
    application_group: Option<String>,
    access_token: Option<String>,
    base_url: String,
    transport: T,
    last_call: Option<CallLog>,
}

impl DeliveryClient<HttpTransport> {
    /// Create a client using the default HTTP transport.
    pub fn new() -> color_eyre::eyre::Result<Self> {
        Ok(Self::with_transport(HttpTransport::new()?))
    }

    /// Create a client from configuration.
    pub fn from_config(config: &ClientConfig) -> color_eyre::eyre::Result<Self> {
        let mut client = Self::new()?;
        client.apply_config(config);
        Ok(client)
    }
}

impl<T: Transport> DeliveryClient<T> {
    /// Create a client over a custom transport.
    pub fn with_transport(transport: T) -> Self {
        Self {
            application: None,
            application_group: None,
            access_token: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            transport,
            last_call: None,
        }
    }

    /// Copy credentials and endpoint from configuration.
    pub fn apply_config(&mut self, config: &ClientConfig) {
        self.application = config.application.clone();
        self.application_group = config.application_group.clone();
        self.access_token = config.access_token.clone();
        self.base_url = config.base_url.clone();
    }

    /// Set the application code.
    pub fn set_application_code(&mut self, code: impl Into<String>) {
        self.application = Some(code.into());
    }

    /// Set the application group code, used when no application code is set.
    pub fn set_application_group(&mut self, code: impl Into<String>) {
        self.application_group = Some(code.into());
    }

    /// Set the API access token.
    pub fn set_access_token(&mut self, token: impl Into<String>) {
        self.access_token = Some(token.into());
    }

    /// Set the API base URL.
    pub fn set_base_url(&mut self, url: impl Into<String>) {
        self.base_url = url.into();
    }

    /// Snapshot of the most recent call, overwritten on every call.
    pub fn last_call(&self) -> Option<&CallLog> {
        self.last_call.as_ref()
    }

    /// Push a single message.
    pub async fn push(&mut self, message: &Message) -> color_eyre::eyre::Result<PushOutcome> {
        self.push_batch([message]).await
    }

    /// Push several messages in one request.
    ///
    /// Returns [`PushOutcome::NothingToSend`] without a network call when
    /// `messages` is empty.
    pub async fn push_batch<'m, I>(&mut self, messages: I) -> color_eyre::eyre::Result<PushOutcome>
    where
        I: IntoIterator<Item = &'m Message>,
    {
        let notifications: Vec<Value> = messages
            .into_iter()
            .map(|message| Value::Object(message.serialize()))
            .collect();

        if notifications.is_empty() {
            tracing::debug!("no notifications to push");
            return Ok(PushOutcome::NothingToSend);
        }

        let request = self.request_data(notifications);
        let response = self.call_api(CREATE_MESSAGE, request).await?;

        Ok(PushOutcome::Delivered(response))
    }

    /// Push a message to specific devices.
    ///
    /// The message's device list is cleared afterwards whether or not the
    /// push succeeded, so the same message can be reused.
    pub async fn push_to_devices<I>(
        &mut self,
        message: &mut Message,
        devices: I,
    ) -> color_eyre::eyre::Result<PushOutcome>
    where
        I: IntoIterator,
        I::Item: Into<Device>,
    {
        message.add_devices(devices);
        let result = self.push(message).await;
        message.clear_devices();
        result
    }

    fn request_data(&self, notifications: Vec<Value>) -> Value {
        let mut data = serde_json::Map::new();

        match (&self.application, &self.application_group) {
            (None, Some(group)) => {
                data.insert("applications_group".into(), Value::String(group.clone()));
            }
            (application, _) => {
                data.insert("application".into(), optional_string(application));
            }
        }

        data.insert("auth".into(), optional_string(&self.access_token));
        data.insert("notifications".into(), Value::Array(notifications));

        Value::Object(data)
    }

    async fn call_api(&mut self, method: &str, data: Value) -> color_eyre::eyre::Result<ApiResponse> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), method);
        let body = serde_json::to_vec(&Envelope { request: &data })
            .wrap_err("failed to encode request")?;

        tracing::debug!(url = %url, bytes = body.len(), "calling Pushwoosh API");

        let started = Instant::now();
        let result = self.transport.post_json(&url, body).await;
        let elapsed = started.elapsed();

        self.last_call = Some(CallLog {
            method: method.to_string(),
            url: url.clone(),
            request: data,
            status: result.as_ref().ok().map(|raw| raw.status),
            elapsed,
            error: result.as_ref().err().map(|e| format!("{:#}", e)),
        });

        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(url = %url, error = %e, "Pushwoosh API call failed");
                return Err(e.wrap_err(format!("{} call failed", method)));
            }
        };

        let body = match serde_json::from_slice(&raw.body) {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::warn!(status = raw.status, error = %e, "response is not valid JSON");
                None
            }
        };

        tracing::info!(
            method,
            status = raw.status,
            elapsed_ms = elapsed.as_millis() as u64,
            "Pushwoosh API call complete"
        );

        Ok(ApiResponse {
            status: raw.status,
            body,
        })
    }
}

fn optional_string(value: &Option<String>) -> Value {
    value.clone().map_or(Value::Null, Value::String)
}
