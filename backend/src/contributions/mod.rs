//! Contribution fact extraction from verified payloads.
//!
//! After verification the envelope body is a JSON array of contributor
//! records as GitHub's `graphs/contributors-data` endpoint serves them. This
//! module locates the record for a requested login and projects it into a
//! minimal fact. It runs only on already-verified data and performs no I/O.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::webproof::VerifiedEnvelope;

const HTTP_ACCEPTED: u16 = 202;

/// One entry of the verified contributors payload
#[derive(Debug, Clone, Deserialize)]
pub struct ContributorRecord {
    /// The contributing account; null for commits GitHub cannot attribute
    #[serde(default)]
    pub author: Option<ContributorAuthor>,
    /// Aggregate commit count for this contributor
    pub total: u64,
}

/// The account a contributor record belongs to
#[derive(Debug, Clone, Deserialize)]
pub struct ContributorAuthor {
    /// GitHub login, in the casing GitHub stores
    pub login: String,
    /// Avatar image reference
    #[serde(default)]
    pub avatar: String,
}

/// The extracted fact: one identity's verified contribution count.
///
/// Derived, never persisted; lives for one prove/verify cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ContributionFact {
    /// Matched login in its original casing
    pub username: String,
    /// Verified commit count
    pub total: u64,
    /// Avatar image reference
    pub avatar: String,
}

/// Failures while extracting a fact from a verified envelope
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The upstream accepted the proved request but has not produced a body
    /// yet (202) — typically rate limiting or asynchronous aggregation;
    /// worth retrying later
    #[error("upstream accepted the request but has not produced a body yet")]
    AsyncPending,

    /// The response carries no body for a non-202 status
    #[error("verified response contains no body")]
    NoBody,

    /// The body is not a JSON contributor array
    #[error("verified response body is not a contributor list: {0}")]
    MalformedBody(#[from] serde_json::Error),

    /// No record matched the requested identity
    #[error("no contributor named `{identity}`; available: [{}]", available.join(", "))]
    IdentityNotFound {
        /// The identity that was looked up
        identity: String,
        /// All non-null logins encountered, in original array order
        available: Vec<String>,
    },
}

/// Extracts the contribution fact for `identity` from a verified envelope.
///
/// The scan is ordered and stable: the first record whose `author.login`
/// equals `identity` case-insensitively wins; records with a null author are
/// skipped and never matched. Duplicate logins are not aggregated.
/// Deterministic — the same envelope and identity always yield the same fact
/// or the same failure kind.
///
/// # Errors
///
/// See [`ExtractError`] for the distinct failure outcomes.
pub fn extract_contribution(
    envelope: &VerifiedEnvelope,
    identity: &str,
) -> Result<ContributionFact, ExtractError> {
    let status = envelope.response.status;
    let body = envelope.response.body.as_deref();

    if status == HTTP_ACCEPTED && body.is_none_or(str::is_empty) {
        return Err(ExtractError::AsyncPending);
    }
    let Some(body) = body else {
        return Err(ExtractError::NoBody);
    };

    let records: Vec<ContributorRecord> = serde_json::from_str(body)?;

    let wanted = identity.to_lowercase();
    let mut available = Vec::new();
    for record in records {
        let Some(author) = record.author else {
            continue;
        };
        if author.login.to_lowercase() == wanted {
            return Ok(ContributionFact {
                username: author.login,
                total: record.total,
                avatar: author.avatar,
            });
        }
        available.push(author.login);
    }

    Err(ExtractError::IdentityNotFound {
        identity: identity.to_string(),
        available,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::webproof::ProvenResponse;

    fn envelope(status: u16, body: Option<&str>) -> VerifiedEnvelope {
        VerifiedEnvelope {
            response: ProvenResponse {
                status,
                body: body.map(ToString::to_string),
                headers: None,
            },
        }
    }

    #[test]
    fn test_matches_case_insensitively_preserving_original_casing() {
        let envelope = envelope(
            200,
            Some(r#"[{"author":{"login":"bob","avatar":"x"},"total":5}]"#),
        );

        let fact = extract_contribution(&envelope, "BOB").unwrap();
        assert_eq!(
            fact,
            ContributionFact {
                username: "bob".to_string(),
                total: 5,
                avatar: "x".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_array_reports_not_found_with_empty_available() {
        let envelope = envelope(200, Some("[]"));

        match extract_contribution(&envelope, "bob") {
            Err(ExtractError::IdentityNotFound {
                identity,
                available,
            }) => {
                assert_eq!(identity, "bob");
                assert!(available.is_empty());
            }
            other => panic!("expected IdentityNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_not_found_lists_available_logins_in_order() {
        let envelope = envelope(
            200,
            Some(
                r#"[
                    {"author":{"login":"Carol","avatar":"c"},"total":9},
                    {"author":null,"total":1},
                    {"author":{"login":"dave","avatar":"d"},"total":2}
                ]"#,
            ),
        );

        match extract_contribution(&envelope, "erin") {
            Err(ExtractError::IdentityNotFound { available, .. }) => {
                assert_eq!(available, vec!["Carol".to_string(), "dave".to_string()]);
            }
            other => panic!("expected IdentityNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_accepted_without_body_is_async_pending() {
        assert!(matches!(
            extract_contribution(&envelope(202, None), "bob"),
            Err(ExtractError::AsyncPending)
        ));
        // An empty body counts the same as an absent one for 202
        assert!(matches!(
            extract_contribution(&envelope(202, Some("")), "bob"),
            Err(ExtractError::AsyncPending)
        ));
    }

    #[test]
    fn test_missing_body_for_other_status_is_no_body() {
        assert!(matches!(
            extract_contribution(&envelope(200, None), "bob"),
            Err(ExtractError::NoBody)
        ));
    }

    #[test]
    fn test_non_json_body_is_malformed() {
        assert!(matches!(
            extract_contribution(&envelope(200, Some("not json")), "bob"),
            Err(ExtractError::MalformedBody(_))
        ));
        // A JSON body of the wrong shape is malformed too
        assert!(matches!(
            extract_contribution(&envelope(200, Some(r#"{"total":5}"#)), "bob"),
            Err(ExtractError::MalformedBody(_))
        ));
    }

    #[test]
    fn test_duplicate_logins_first_occurrence_wins() {
        let envelope = envelope(
            200,
            Some(
                r#"[
                    {"author":{"login":"bob","avatar":"first"},"total":5},
                    {"author":{"login":"BOB","avatar":"second"},"total":9}
                ]"#,
            ),
        );

        let fact = extract_contribution(&envelope, "bob").unwrap();
        assert_eq!(fact.total, 5);
        assert_eq!(fact.avatar, "first");
    }

    #[test]
    fn test_null_authors_are_skipped_not_matched() {
        let envelope = envelope(
            200,
            Some(
                r#"[
                    {"author":null,"total":100},
                    {"author":{"login":"alice","avatar":"a"},"total":3}
                ]"#,
            ),
        );

        let fact = extract_contribution(&envelope, "Alice").unwrap();
        assert_eq!(fact.username, "alice");
        assert_eq!(fact.total, 3);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let envelope = envelope(
            200,
            Some(r#"[{"author":{"login":"bob","avatar":"x"},"total":5}]"#),
        );

        let first = extract_contribution(&envelope, "bob").unwrap();
        let second = extract_contribution(&envelope, "bob").unwrap();
        assert_eq!(first, second);
    }
}
