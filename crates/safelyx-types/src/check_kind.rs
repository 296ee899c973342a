// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Kinds of subject the service can check
//!
//! Each kind maps to one fixed endpoint below the service base URL.

use std::fmt;

/// The four supported checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    /// A URL to visit or click
    Link,
    /// An email address
    Email,
    /// Free-text message content
    Message,
    /// An image reachable by URL
    Image,
}

impl CheckKind {
    /// Endpoint path relative to the service base URL
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Link => "safe-link-checker",
            Self::Email => "safe-email-checker",
            Self::Message => "safe-message-checker",
            Self::Image => "safe-image-checker",
        }
    }

    /// Lowercase identifier
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Link => "link",
            Self::Email => "email",
            Self::Message => "message",
            Self::Image => "image",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
