//! Internal HTTP client bound to a single SMD instance.

use crate::core::{
    config::ClientConfig,
    domain::{
        error::{SmdError, SmdResult, ValidationError},
        model::smd_connection::SmdConnection,
    },
};
use governor::{DefaultDirectRateLimiter, Quota};
use reqwest::{Client, Method, StatusCode};
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::debug;

/// Internal HTTP client that sends JSON requests to one SMD instance.
///
/// Every request is built from the connection's base URL plus an API path.
/// Responses are buffered in full so that failures can report the URL,
/// status code and body together.
#[derive(Debug)]
pub struct ApiClient {
    http_client: Client,
    connection: Arc<SmdConnection>,
    rate_limiter: Option<Arc<DefaultDirectRateLimiter>>,
}

/// A fully buffered response.
#[derive(Debug, Clone)]
pub(crate) struct RawResponse {
    pub url: String,
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    /// Turns a non-success status into `SmdError::Api`.
    pub fn error_for_status(self) -> SmdResult<Self> {
        if self.status.is_success() {
            Ok(self)
        } else {
            Err(SmdError::Api {
                url: self.url,
                status: self.status.as_u16(),
                body: self.body,
            })
        }
    }

    /// Parses the body as JSON.
    pub fn json<T>(&self) -> SmdResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        serde_json::from_str(&self.body).map_err(|e| SmdError::Decode {
            url: self.url.clone(),
            message: e.to_string(),
            body: self.body.clone(),
        })
    }
}

impl ApiClient {
    /// Creates a new `ApiClient`.
    ///
    /// # Errors
    /// Returns `SmdError::Connection` if the HTTP client cannot be built and
    /// `SmdError::Validation` if the rate limit is zero.
    pub fn new(connection: SmdConnection, config: &ClientConfig) -> SmdResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| SmdError::Connection(e.to_string()))?;

        let rate_limiter = match config.rate_limit {
            Some(rl) => {
                let per_second = non_zero("requests_per_second", rl.requests_per_second)?;
                let burst = non_zero("burst_size", rl.burst_size)?;
                let quota = Quota::per_second(per_second).allow_burst(burst);
                Some(Arc::new(DefaultDirectRateLimiter::direct(quota)))
            }
            None => None,
        };

        Ok(Self {
            http_client,
            connection: Arc::new(connection),
            rate_limiter,
        })
    }

    /// Returns a reference to the underlying connection details.
    pub fn connection(&self) -> &SmdConnection {
        &self.connection
    }

    /// Performs a GET request and parses the JSON body.
    ///
    /// # Errors
    /// Returns `SmdError::Api` on a non-success status and
    /// `SmdError::Decode` if the body is not the expected JSON.
    pub async fn get<T>(&self, path: &str) -> SmdResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.send(Method::GET, path, None::<&()>)
            .await?
            .error_for_status()?
            .json()
    }

    /// Performs a POST request with a JSON body, returning the status code.
    /// The response body is not interpreted.
    ///
    /// # Errors
    /// Returns `SmdError::Api` on a non-success status.
    pub async fn post<B>(&self, path: &str, body: &B) -> SmdResult<StatusCode>
    where
        B: serde::Serialize,
    {
        let response = self.send(Method::POST, path, Some(body)).await?;
        Ok(response.error_for_status()?.status)
    }

    /// Performs a PUT request with a JSON body and parses the JSON reply.
    ///
    /// # Errors
    /// Returns `SmdError::Api` on a non-success status and
    /// `SmdError::Decode` if the body is not the expected JSON.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> SmdResult<T>
    where
        B: serde::Serialize,
        T: serde::de::DeserializeOwned,
    {
        self.send(Method::PUT, path, Some(body))
            .await?
            .error_for_status()?
            .json()
    }

    /// Performs a DELETE request and parses the JSON body.
    pub async fn delete<T>(&self, path: &str) -> SmdResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.send(Method::DELETE, path, None::<&()>)
            .await?
            .error_for_status()?
            .json()
    }

    /// Core request execution. Applies rate limiting, sends the request and
    /// buffers the response without judging its status.
    pub(crate) async fn send<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> SmdResult<RawResponse>
    where
        B: serde::Serialize,
    {
        if let Some(limiter) = &self.rate_limiter {
            limiter.until_ready().await;
        }

        let url = self.connection.url().join(path);
        debug!(instance = self.connection.name(), %method, %url, "sending request");

        let mut req_builder = self.http_client.request(method, &url);
        if let Some(body) = body {
            req_builder = req_builder.json(body);
        }

        let response = req_builder
            .send()
            .await
            .map_err(|e| SmdError::Connection(format!("HTTP request to {} failed: {}", url, e)))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            SmdError::Connection(format!("Failed to read response from {}: {}", url, e))
        })?;

        debug!(instance = self.connection.name(), %url, status = status.as_u16(), "received response");

        Ok(RawResponse { url, status, body })
    }
}

fn non_zero(field: &str, value: u32) -> SmdResult<NonZeroU32> {
    NonZeroU32::new(value).ok_or_else(|| {
        SmdError::Validation(ValidationError::Field {
            field: field.to_string(),
            message: "Rate limit values must be greater than zero".to_string(),
        })
    })
}
