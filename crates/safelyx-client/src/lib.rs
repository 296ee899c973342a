// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Async client for the Safelyx safety checks
//!
//! Safelyx evaluates links, email addresses, messages and images server-side
//! and answers with a verdict plus a prose analysis. This crate signs each
//! request with the caller's key code, POSTs it as JSON and decodes the reply
//! into the typed results from [`safelyx_types`].
//!
//! # Architecture
//!
//! - [`client`]: [`SafelyxClient`] and the shared JSON round trip
//! - [`check`]: the [`SafetyCheck`] request contract and the four requests
//! - [`config`]: [`ClientConfig`] with file and environment loading
//! - [`error`]: [`SafelyxError`] and its classification helpers
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use safelyx_client::SafelyxClient;
//!
//! # async fn example() -> Result<(), safelyx_client::SafelyxError> {
//! let client = SafelyxClient::new("your-key-code");
//!
//! let link = client.check_link("example.com").await?;
//! if link.result.is_unevaluated() {
//!     println!("{} could not be evaluated: {}", link.url, link.result_text);
//! } else {
//!     println!("{}: {} ({})", link.url, link.result, link.result_text);
//! }
//! println!("{} checks remaining", link.checks_remaining);
//! # Ok(())
//! # }
//! ```

pub mod check;
pub mod client;
pub mod config;
pub mod error;

pub use check::{EmailCheck, ImageCheck, LinkCheck, MessageCheck, SafetyCheck};
pub use client::SafelyxClient;
pub use config::ClientConfig;
pub use error::{SafelyxError, SafelyxResult};
pub use safelyx_types::*;
