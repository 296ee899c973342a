// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Data model for the Safelyx safety checks
//!
//! This crate holds the types shared between the HTTP client and anything that
//! consumes its results, so that consumers do not need to depend on the
//! transport stack.
//!
//! - [`verdict`]: the integer safety score and its defined value space
//! - [`check_kind`]: the four kinds of subject and their endpoints
//! - [`analysis`]: the per-kind analysis records
//! - [`results`]: the full and simplified check results

pub mod analysis;
pub mod check_kind;
pub mod results;
pub mod verdict;

pub use analysis::{EmailAnalysis, ImageAnalysis, LinkAnalysis, MessageAnalysis};
pub use check_kind::CheckKind;
pub use results::{
    CheckResponse, EmailCheckResult, ImageCheckResult, LinkCheckResult, MessageCheckResult,
    SimplifiedEmailResult, SimplifiedLinkResult,
};
pub use verdict::{Verdict, VerdictError};
