// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Request side of the check contract
//!
//! Every check is a flat JSON object holding the subject fields. The client
//! adds the credential as `key_code` when the request is sent, so request values
//! never carry it themselves.

use safelyx_types::{
    CheckKind, CheckResponse, EmailCheckResult, ImageCheckResult, LinkCheckResult,
    MessageCheckResult,
};
use serde::Serialize;

/// A request the service can answer with a typed result
///
/// Implementors serialize to the check's payload fields. The endpoint is
/// determined by the output type's [`CheckResponse::KIND`].
pub trait SafetyCheck: Serialize + Send + Sync {
    /// Result type the service answers with
    type Output: CheckResponse;

    /// Kind of check, which selects the endpoint
    const KIND: CheckKind = <Self::Output as CheckResponse>::KIND;

    /// The subject being checked
    fn subject(&self) -> &str;
}

/// Check whether a link is safe to visit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LinkCheck<'a> {
    /// URL to check; the service normalizes it, e.g. by adding a scheme
    pub link: &'a str,
}

/// Check whether an email address is legitimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmailCheck<'a> {
    /// Address to check
    pub email: &'a str,
}

/// Check whether a message's content is safe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MessageCheck<'a> {
    /// Message text
    pub message: &'a str,
    /// Ask the service not to check the links and addresses found in the message
    pub skip_link_and_email_checks: bool,
}

/// Check whether an image is safe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImageCheck<'a> {
    /// URL the image is served from
    pub image_url: &'a str,
}

impl SafetyCheck for LinkCheck<'_> {
    type Output = LinkCheckResult;

    fn subject(&self) -> &str {
        self.link
    }
}

impl SafetyCheck for EmailCheck<'_> {
    type Output = EmailCheckResult;

    fn subject(&self) -> &str {
        self.email
    }
}

impl SafetyCheck for MessageCheck<'_> {
    type Output = MessageCheckResult;

    fn subject(&self) -> &str {
        self.message
    }
}

impl SafetyCheck for ImageCheck<'_> {
    type Output = ImageCheckResult;

    fn subject(&self) -> &str {
        self.image_url
    }
}

/// Request body as sent on the wire: the check's fields plus the credential
#[derive(Serialize)]
pub(crate) struct SignedPayload<'a, C> {
    #[serde(flatten)]
    pub(crate) check: &'a C,
    pub(crate) key_code: &'a str,
}
