// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Per-kind analysis records
//!
//! Every string here is prose written by the service. The client only ever
//! distinguishes empty from non-empty; values such as `"N/A"` are passed
//! through untouched.

use serde::{Deserialize, Deserializer, Serialize};

use crate::results::{SimplifiedEmailResult, SimplifiedLinkResult};

/// Analysis attached to a link check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkAnalysis {
    /// Whether the domain shows up in known malicious lists
    #[serde(deserialize_with = "null_as_default")]
    pub domain_reputation: String,
    /// Summary of the page source
    #[serde(deserialize_with = "null_as_default")]
    pub source_code: String,
    /// Summary of the anti-virus scan
    #[serde(deserialize_with = "null_as_default")]
    pub anti_virus: String,
}

impl LinkAnalysis {
    /// All three summaries are present
    pub fn is_complete(&self) -> bool {
        !self.domain_reputation.is_empty()
            && !self.source_code.is_empty()
            && !self.anti_virus.is_empty()
    }
}

/// Analysis attached to an email check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailAnalysis {
    /// Validity of the address itself
    #[serde(deserialize_with = "null_as_default")]
    pub address: String,
    /// Whether the domain shows up in known malicious lists
    #[serde(deserialize_with = "null_as_default")]
    pub domain_reputation: String,
    /// Summary of the domain's MX records
    #[serde(deserialize_with = "null_as_default")]
    pub mx_records: String,
}

impl EmailAnalysis {
    /// All three summaries are present
    pub fn is_complete(&self) -> bool {
        !self.address.is_empty()
            && !self.domain_reputation.is_empty()
            && !self.mx_records.is_empty()
    }
}

/// Analysis attached to a message check
///
/// `links` and `emails` hold the findings for every link and address found in
/// the message, in the order the service reports them. They are empty when the
/// message contains none, or when the check was requested with
/// `skip_link_and_email_checks`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageAnalysis {
    /// Summary of the message content
    #[serde(deserialize_with = "null_as_default")]
    pub content: String,
    /// Sentiment of the message, e.g. `"positive"`
    #[serde(deserialize_with = "null_as_default")]
    pub sentiment: String,
    /// Embedded link findings
    #[serde(deserialize_with = "null_as_default")]
    pub links: Vec<SimplifiedLinkResult>,
    /// Embedded email findings
    #[serde(deserialize_with = "null_as_default")]
    pub emails: Vec<SimplifiedEmailResult>,
}

/// Analysis attached to an image check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageAnalysis {
    /// Description of what the image shows
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// Link check the service ran against the image's hosting URL
    ///
    /// `None` when the service did not report one.
    pub link: Option<SimplifiedLinkResult>,
}

/// Decodes `null` like a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn link_analysis_completeness() {
        let analysis: LinkAnalysis = serde_json::from_value(json!({
            "domain_reputation": "This domain wasn't found in any malicious lists.",
            "source_code": "This website appears to have basic HTML.",
            "anti_virus": "N/A"
        }))
        .unwrap();
        assert!(analysis.is_complete());

        let partial: LinkAnalysis =
            serde_json::from_value(json!({ "domain_reputation": "ok" })).unwrap();
        assert!(!partial.is_complete());
        assert!(partial.source_code.is_empty());
    }

    #[test]
    fn email_analysis_field_names() {
        let analysis: EmailAnalysis = serde_json::from_value(json!({
            "address": "This email address is valid.",
            "domain_reputation": "This domain wasn't found in any malicious lists.",
            "mx_records": "This domain has valid MX records."
        }))
        .unwrap();
        assert!(analysis.is_complete());
        assert_eq!(analysis.mx_records, "This domain has valid MX records.");
    }

    #[test]
    fn message_analysis_null_sequences() {
        let analysis: MessageAnalysis = serde_json::from_value(json!({
            "content": "A friendly greeting.",
            "sentiment": "positive",
            "links": null
        }))
        .unwrap();
        assert!(analysis.links.is_empty());
        assert!(analysis.emails.is_empty());
        assert_eq!(analysis.sentiment, "positive");
    }

    #[test]
    fn null_prose_decodes_empty() {
        let analysis: EmailAnalysis = serde_json::from_value(json!({
            "address": null,
            "domain_reputation": "ok",
            "mx_records": null
        }))
        .unwrap();
        assert!(analysis.address.is_empty());
        assert!(analysis.mx_records.is_empty());
        assert!(!analysis.is_complete());

        let analysis: MessageAnalysis =
            serde_json::from_value(json!({ "content": null, "sentiment": null })).unwrap();
        assert!(analysis.content.is_empty());
        assert!(analysis.sentiment.is_empty());
    }

    #[test]
    fn image_analysis_without_link() {
        let analysis: ImageAnalysis =
            serde_json::from_value(json!({ "description": "A cat.", "link": null })).unwrap();
        assert_eq!(analysis.description, "A cat.");
        assert!(analysis.link.is_none());
    }
}
