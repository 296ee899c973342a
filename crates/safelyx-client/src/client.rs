// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Safelyx API client
//!
//! [`SafelyxClient`] holds the credential and an HTTP transport. Each check is
//! a single POST of a JSON payload to the kind's endpoint followed by decoding
//! the JSON reply. The client performs no retries and does not branch on the
//! HTTP status: a non-success reply either fails to decode or decodes into a
//! result, typically with a [`Verdict::UNEVALUATED`](safelyx_types::Verdict::UNEVALUATED)
//! verdict.

use std::{
    fmt,
    time::{Duration, Instant},
};

use reqwest::{
    Client, Response,
    header::{ACCEPT, CONTENT_TYPE, USER_AGENT},
};
use safelyx_types::{
    CheckKind, CheckResponse, EmailCheckResult, ImageCheckResult, LinkCheckResult,
    MessageCheckResult,
};
use serde::Serialize;
use tracing::{Span, debug, info, instrument, warn};
use url::Url;
use uuid::Uuid;

use crate::{
    check::{EmailCheck, ImageCheck, LinkCheck, MessageCheck, SafetyCheck, SignedPayload},
    config::{ClientConfig, DEFAULT_TIMEOUT_SECONDS, DEFAULT_USER_AGENT, default_base_url},
    error::{SafelyxError, SafelyxResult},
};

const JSON_UTF8: &str = "application/json; charset=utf-8";

/// Client for the Safelyx safety checks
///
/// The client is immutable after construction and cheap to clone: clones
/// share the same connection pool, so one instance can serve any number of
/// concurrent checks.
#[derive(Clone)]
pub struct SafelyxClient {
    http: Client,
    key_code: String,
    base_url: Url,
    timeout: Duration,
    user_agent: String,
}

impl fmt::Debug for SafelyxClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SafelyxClient")
            .field("key_code", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

impl SafelyxClient {
    /// Create a client for the hosted service with the default 10 second timeout
    ///
    /// The key code is stored as given. An invalid key is only discovered
    /// when the service rejects a check. No network I/O happens here.
    pub fn new(key_code: impl Into<String>) -> Self {
        Self::with_timeout(key_code, Duration::from_secs(DEFAULT_TIMEOUT_SECONDS))
    }

    /// Create a client for the hosted service with a custom timeout
    pub fn with_timeout(key_code: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http: Client::new(),
            key_code: key_code.into(),
            base_url: default_base_url(),
            timeout,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Create a client from a configuration
    ///
    /// # Errors
    ///
    /// Returns `SafelyxError::Configuration` if the configuration is invalid
    pub fn from_config(config: ClientConfig) -> SafelyxResult<Self> {
        config.validate()?;

        let timeout = config.timeout();
        let client = Self {
            http: Client::new(),
            key_code: config.key_code,
            base_url: with_trailing_slash(config.base_url),
            timeout,
            user_agent: config.user_agent,
        };

        info!(
            "Created Safelyx client with base URL: {} and timeout: {}s",
            client.base_url,
            timeout.as_secs()
        );

        Ok(client)
    }

    /// Use a different service root, e.g. a gateway or a test server
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = with_trailing_slash(base_url);
        self
    }

    /// Use a preconfigured HTTP client, e.g. one with a proxy
    ///
    /// The configured request timeout still applies to every check.
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    /// Service root the endpoints are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Timeout applied to every check
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Check whether a link is safe to click or visit
    ///
    /// The returned URL is the one the service checked, which may be a
    /// normalized form of `url` (`example.com` becomes `https://example.com`).
    pub async fn check_link(&self, url: &str) -> SafelyxResult<LinkCheckResult> {
        self.check(&LinkCheck { link: url }).await
    }

    /// Check whether an email address is legitimate
    pub async fn check_email(&self, email: &str) -> SafelyxResult<EmailCheckResult> {
        self.check(&EmailCheck { email }).await
    }

    /// Check whether a message's content is safe
    ///
    /// With `skip_link_and_email_checks` set the service is expected to leave
    /// the embedded link and email findings empty. The client relays whatever
    /// the service returns.
    pub async fn check_message(
        &self,
        message: &str,
        skip_link_and_email_checks: bool,
    ) -> SafelyxResult<MessageCheckResult> {
        self.check(&MessageCheck {
            message,
            skip_link_and_email_checks,
        })
        .await
    }

    /// Check whether an image is safe
    ///
    /// The service also runs a link check against the image URL and reports it
    /// in `analysis.link`.
    pub async fn check_image(&self, image_url: &str) -> SafelyxResult<ImageCheckResult> {
        self.check(&ImageCheck { image_url }).await
    }

    /// Run any check: sign and POST the payload, decode and validate the reply
    ///
    /// # Errors
    ///
    /// - `Encode` if the payload cannot be serialized
    /// - `Transport` or `Timeout` if no response was received
    /// - `Decode` if the body is not the expected JSON
    /// - `ContractViolation` if a verdict lies outside the defined value space
    #[instrument(skip_all, fields(kind = %C::KIND, request_id))]
    pub async fn check<C: SafetyCheck>(&self, check: &C) -> SafelyxResult<C::Output> {
        let kind = C::KIND;
        let request_id = Uuid::new_v4();
        Span::current().record("request_id", request_id.to_string());

        debug!(
            subject_len = check.subject().len(),
            "Starting {kind} check request"
        );

        let endpoint = self.endpoint(kind)?;
        let payload = SignedPayload {
            check,
            key_code: &self.key_code,
        };

        let start_time = Instant::now();
        let response = self.post_json(kind, endpoint, &payload).await?;
        let status = response.status();

        if !status.is_success() {
            warn!(
                status = status.as_u16(),
                "Safelyx answered {kind} check with non-success status"
            );
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| self.transport_error(kind, source))?;

        debug!(
            status = status.as_u16(),
            body_len = body.len(),
            duration_ms = start_time.elapsed().as_millis(),
            "Received {kind} check response"
        );

        let output: C::Output = serde_json::from_slice(&body).map_err(|source| {
            warn!(
                status = status.as_u16(),
                error = %source,
                "Failed to decode {kind} check response"
            );
            SafelyxError::Decode {
                kind,
                status: status.as_u16(),
                source,
            }
        })?;

        output.validate().map_err(|source| {
            warn!(
                field = %source.field,
                value = source.value,
                "Undefined verdict in {kind} check response"
            );
            SafelyxError::ContractViolation { kind, source }
        })?;

        info!(
            verdict = output.verdict().value(),
            checks_remaining = output.checks_remaining(),
            "Completed {kind} check"
        );

        Ok(output)
    }

    /// POST `payload` as JSON to `endpoint` and return the raw response
    async fn post_json<P>(
        &self,
        kind: CheckKind,
        endpoint: Url,
        payload: &P,
    ) -> SafelyxResult<Response>
    where
        P: Serialize + ?Sized,
    {
        let body =
            serde_json::to_vec(payload).map_err(|source| SafelyxError::Encode { kind, source })?;

        debug!(url = %endpoint, body_len = body.len(), "Sending check request");

        self.http
            .post(endpoint)
            .timeout(self.timeout)
            .header(CONTENT_TYPE, JSON_UTF8)
            .header(ACCEPT, JSON_UTF8)
            .header(USER_AGENT, self.user_agent.as_str())
            .body(body)
            .send()
            .await
            .map_err(|source| self.transport_error(kind, source))
    }

    fn endpoint(&self, kind: CheckKind) -> SafelyxResult<Url> {
        self.base_url.join(kind.endpoint()).map_err(|e| {
            SafelyxError::config(format!(
                "cannot resolve {kind} endpoint against {}: {e}",
                self.base_url
            ))
        })
    }

    fn transport_error(&self, kind: CheckKind, source: reqwest::Error) -> SafelyxError {
        if source.is_timeout() {
            warn!(timeout_ms = self.timeout.as_millis(), "{kind} check timed out");
            SafelyxError::Timeout {
                kind,
                timeout: self.timeout,
                source,
            }
        } else {
            warn!(error = %source, "{kind} check request failed");
            SafelyxError::Transport { kind, source }
        }
    }
}

/// Endpoints are joined as relative paths, which needs a trailing slash on the base
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
