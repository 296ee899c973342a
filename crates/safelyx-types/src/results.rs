// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Check results as returned by the service
//!
//! The full results carry the verdict text and the remaining quota. The
//! simplified results appear nested inside message and image results, where the
//! quota is charged once for the outer check.
//!
//! Decoding is lenient about missing prose fields, which decode as empty
//! strings, but the verdict (`result`) is always required: a result without a
//! verdict is a decode error rather than a fabricated score.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    analysis::{EmailAnalysis, ImageAnalysis, LinkAnalysis, MessageAnalysis, null_as_default},
    check_kind::CheckKind,
    verdict::{Verdict, VerdictError},
};

/// Common view over the four full check results
pub trait CheckResponse: DeserializeOwned + Send {
    /// Kind of check that produces this result
    const KIND: CheckKind;

    /// The checked subject as echoed (and possibly normalized) by the service
    fn subject(&self) -> &str;

    /// Safety verdict
    fn verdict(&self) -> Verdict;

    /// Human-readable verdict
    fn result_text(&self) -> &str;

    /// Date of the check as sent by the service
    fn date(&self) -> &str;

    /// Checks left for the credential
    fn checks_remaining(&self) -> i64;

    /// Verify every verdict in the result, nested ones included
    fn validate(&self) -> Result<(), VerdictError>;

    /// Date of the check, if the service sent a parseable one
    fn checked_on(&self) -> Option<NaiveDate> {
        parse_date(self.date())
    }
}

/// Result of a link check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkCheckResult {
    /// The checked URL, e.g. `https://example.com` for input `example.com`
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    /// Safety verdict
    pub result: Verdict,
    /// Human-readable verdict
    #[serde(default, deserialize_with = "null_as_default")]
    pub result_text: String,
    /// Date of the check
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    /// Detailed findings
    #[serde(default, deserialize_with = "null_as_default")]
    pub analysis: LinkAnalysis,
    /// Checks left for the credential
    #[serde(default, deserialize_with = "null_as_default")]
    pub checks_remaining: i64,
}

/// Result of an email check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailCheckResult {
    /// The checked address
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    /// Safety verdict
    pub result: Verdict,
    /// Human-readable verdict
    #[serde(default, deserialize_with = "null_as_default")]
    pub result_text: String,
    /// Date of the check
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    /// Detailed findings
    #[serde(default, deserialize_with = "null_as_default")]
    pub analysis: EmailAnalysis,
    /// Checks left for the credential
    #[serde(default, deserialize_with = "null_as_default")]
    pub checks_remaining: i64,
}

/// Result of a message check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageCheckResult {
    /// The checked message text
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    /// Safety verdict
    pub result: Verdict,
    /// Human-readable verdict
    #[serde(default, deserialize_with = "null_as_default")]
    pub result_text: String,
    /// Date of the check
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    /// Detailed findings, including embedded links and emails
    #[serde(default, deserialize_with = "null_as_default")]
    pub analysis: MessageAnalysis,
    /// Checks left for the credential
    #[serde(default, deserialize_with = "null_as_default")]
    pub checks_remaining: i64,
}

/// Result of an image check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageCheckResult {
    /// The checked image URL
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
    /// Safety verdict
    pub result: Verdict,
    /// Human-readable verdict
    #[serde(default, deserialize_with = "null_as_default")]
    pub result_text: String,
    /// Date of the check
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    /// Detailed findings, including the link check on the hosting URL
    #[serde(default, deserialize_with = "null_as_default")]
    pub analysis: ImageAnalysis,
    /// Checks left for the credential
    #[serde(default, deserialize_with = "null_as_default")]
    pub checks_remaining: i64,
}

/// Link finding nested in a message or image result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifiedLinkResult {
    /// The checked URL
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    /// Safety verdict
    pub result: Verdict,
    /// Date of the check
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    /// Detailed findings
    #[serde(default, deserialize_with = "null_as_default")]
    pub analysis: LinkAnalysis,
}

/// Email finding nested in a message result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifiedEmailResult {
    /// The checked address
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    /// Safety verdict
    pub result: Verdict,
    /// Date of the check
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    /// Detailed findings
    #[serde(default, deserialize_with = "null_as_default")]
    pub analysis: EmailAnalysis,
}

impl SimplifiedLinkResult {
    /// Date of the check, if the service sent a parseable one
    pub fn checked_on(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }
}

impl SimplifiedEmailResult {
    /// Date of the check, if the service sent a parseable one
    pub fn checked_on(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }
}

impl CheckResponse for LinkCheckResult {
    const KIND: CheckKind = CheckKind::Link;

    fn subject(&self) -> &str {
        &self.url
    }

    fn verdict(&self) -> Verdict {
        self.result
    }

    fn result_text(&self) -> &str {
        &self.result_text
    }

    fn date(&self) -> &str {
        &self.date
    }

    fn checks_remaining(&self) -> i64 {
        self.checks_remaining
    }

    fn validate(&self) -> Result<(), VerdictError> {
        self.result.validate("result").map(drop)
    }
}

impl CheckResponse for EmailCheckResult {
    const KIND: CheckKind = CheckKind::Email;

    fn subject(&self) -> &str {
        &self.email
    }

    fn verdict(&self) -> Verdict {
        self.result
    }

    fn result_text(&self) -> &str {
        &self.result_text
    }

    fn date(&self) -> &str {
        &self.date
    }

    fn checks_remaining(&self) -> i64 {
        self.checks_remaining
    }

    fn validate(&self) -> Result<(), VerdictError> {
        self.result.validate("result").map(drop)
    }
}

impl CheckResponse for MessageCheckResult {
    const KIND: CheckKind = CheckKind::Message;

    fn subject(&self) -> &str {
        &self.message
    }

    fn verdict(&self) -> Verdict {
        self.result
    }

    fn result_text(&self) -> &str {
        &self.result_text
    }

    fn date(&self) -> &str {
        &self.date
    }

    fn checks_remaining(&self) -> i64 {
        self.checks_remaining
    }

    fn validate(&self) -> Result<(), VerdictError> {
        self.result.validate("result")?;
        for (index, link) in self.analysis.links.iter().enumerate() {
            link.result
                .validate(format!("analysis.links[{index}].result"))?;
        }
        for (index, email) in self.analysis.emails.iter().enumerate() {
            email
                .result
                .validate(format!("analysis.emails[{index}].result"))?;
        }
        Ok(())
    }
}

impl CheckResponse for ImageCheckResult {
    const KIND: CheckKind = CheckKind::Image;

    fn subject(&self) -> &str {
        &self.image_url
    }

    fn verdict(&self) -> Verdict {
        self.result
    }

    fn result_text(&self) -> &str {
        &self.result_text
    }

    fn date(&self) -> &str {
        &self.date
    }

    fn checks_remaining(&self) -> i64 {
        self.checks_remaining
    }

    fn validate(&self) -> Result<(), VerdictError> {
        self.result.validate("result")?;
        if let Some(link) = &self.analysis.link {
            link.result.validate("analysis.link.result")?;
        }
        Ok(())
    }
}

/// Accepts plain dates (`2025-01-01`) and RFC 3339 timestamps
fn parse_date(date: &str) -> Option<NaiveDate> {
    let date = date.trim();
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(date)
                .ok()
                .map(|timestamp| timestamp.date_naive())
        })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn link_json(result: i32) -> serde_json::Value {
        json!({
            "url": "https://example.com",
            "result": result,
            "date": "2025-01-01",
            "analysis": {
                "domain_reputation": "This domain wasn't found in any malicious lists.",
                "source_code": "This website appears to have basic HTML.",
                "anti_virus": "N/A"
            }
        })
    }

    #[test]
    fn link_result_decodes() {
        let result: LinkCheckResult = serde_json::from_value(json!({
            "url": "https://example.com",
            "result": 8,
            "result_text": "This link looks safe.",
            "date": "2025-01-01",
            "analysis": {
                "domain_reputation": "This domain wasn't found in any malicious lists.",
                "source_code": "This website appears to have basic HTML.",
                "anti_virus": "N/A"
            },
            "checks_remaining": 1000
        }))
        .unwrap();

        assert_eq!(result.subject(), "https://example.com");
        assert_eq!(result.verdict(), Verdict::new(8));
        assert_eq!(result.checks_remaining(), 1000);
        assert!(result.analysis.is_complete());
        assert_eq!(result.checked_on(), NaiveDate::from_ymd_opt(2025, 1, 1));
        assert!(result.validate().is_ok());
    }

    #[test]
    fn missing_verdict_is_rejected() {
        let decoded = serde_json::from_value::<EmailCheckResult>(json!({
            "email": "help@safelyx.com",
            "result_text": "Looks fine"
        }));
        assert!(decoded.is_err());
    }

    #[test]
    fn missing_prose_fields_decode_empty() {
        let result: EmailCheckResult = serde_json::from_value(json!({ "result": -2 })).unwrap();
        assert!(result.email.is_empty());
        assert!(result.result_text.is_empty());
        assert_eq!(result.checks_remaining, 0);
        assert!(result.verdict().is_unevaluated());
        assert!(result.checked_on().is_none());
        assert!(result.validate().is_ok());
    }

    #[test]
    fn null_prose_fields_decode_empty() {
        let result: LinkCheckResult = serde_json::from_value(json!({
            "url": null,
            "result": 8,
            "result_text": null,
            "date": null,
            "analysis": {
                "domain_reputation": null,
                "source_code": "ok",
                "anti_virus": null
            },
            "checks_remaining": null
        }))
        .unwrap();
        assert!(result.url.is_empty());
        assert!(result.result_text.is_empty());
        assert!(result.date.is_empty());
        assert_eq!(result.checks_remaining, 0);
        assert_eq!(result.analysis.source_code, "ok");
        assert!(!result.analysis.is_complete());
        assert!(result.validate().is_ok());
    }

    #[test]
    fn null_verdict_is_rejected() {
        let decoded = serde_json::from_value::<LinkCheckResult>(json!({
            "url": "https://example.com",
            "result": null
        }));
        assert!(decoded.is_err());
    }

    #[test]
    fn null_analysis_decodes_empty() {
        let result: MessageCheckResult = serde_json::from_value(json!({
            "message": "",
            "result": -2,
            "analysis": null
        }))
        .unwrap();
        assert!(result.analysis.links.is_empty());
        assert!(result.analysis.content.is_empty());
    }

    #[test]
    fn message_validation_covers_nested_findings() {
        let mut value = json!({
            "message": "see https://example.com",
            "result": 9,
            "result_text": "This message looks safe.",
            "date": "2025-01-01",
            "analysis": {
                "content": "A link to a website.",
                "sentiment": "neutral",
                "links": [link_json(8), link_json(3)],
                "emails": []
            },
            "checks_remaining": 10
        });

        let result: MessageCheckResult = serde_json::from_value(value.clone()).unwrap();
        let error = result.validate().unwrap_err();
        assert_eq!(error.field, "analysis.links[1].result");
        assert_eq!(error.value, 3);

        value["analysis"]["links"][1]["result"] = json!(10);
        let result: MessageCheckResult = serde_json::from_value(value).unwrap();
        assert!(result.validate().is_ok());
        assert_eq!(result.analysis.links.len(), 2);
        assert_eq!(result.analysis.links[0].checked_on(), NaiveDate::from_ymd_opt(2025, 1, 1));
    }

    #[test]
    fn image_validation_covers_nested_link() {
        let result: ImageCheckResult = serde_json::from_value(json!({
            "image_url": "https://example.com/cat.png",
            "result": 10,
            "result_text": "This image looks safe.",
            "date": "2025-01-01T10:00:00Z",
            "analysis": {
                "description": "A cat sitting on a sofa.",
                "link": link_json(11)
            },
            "checks_remaining": 5
        }))
        .unwrap();

        assert_eq!(result.checked_on(), NaiveDate::from_ymd_opt(2025, 1, 1));
        let error = result.validate().unwrap_err();
        assert_eq!(error.field, "analysis.link.result");
        assert_eq!(error.value, 11);
    }

    #[test]
    fn top_level_verdict_checked_first() {
        let result: LinkCheckResult = serde_json::from_value(link_json(0)).unwrap();
        assert_eq!(result.validate().unwrap_err().field, "result");
    }
}
