//! Records built from lobbying API replies.
//!
//! Each record has a `from_json` constructor that copies its declared
//! attributes out of a JSON object one by one. Keys the record does not
//! declare are never looked at, so new fields in the API do not break the
//! client. Nothing here fails: a missing or oddly-typed value just leaves the
//! attribute unset.

use std::ops::Deref;

use serde::Serialize;
use serde_json::{Map, Value};

/// A JSON object as produced by `serde_json`.
pub type JsonObject = Map<String, Value>;

/// Read a scalar attribute as text.
///
/// The API quotes most values but not all of them (years and amounts show up
/// both ways), so numbers and booleans are rendered to text too.
fn text(map: &JsonObject, key: &str) -> Option<String> {
    match map.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Build records from a list of single-key wrappers such as
/// `[{"lobbyist": {...}}, {"lobbyist": {...}}]`.
///
/// Elements without an object under `wrapper` are skipped.
fn unwrap_each<T>(
    map: &JsonObject,
    key: &str,
    wrapper: &str,
    build: impl Fn(&JsonObject) -> T,
) -> Vec<T> {
    map.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get(wrapper)?.as_object())
                .map(&build)
                .collect()
        })
        .unwrap_or_default()
}

/// Parse a JSON number or numeric string.
pub(crate) fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// A lobbying-disclosure filing tying a client to a registrant for a period.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Filing {
    pub filing_id: Option<String>,
    pub filing_period: Option<String>,
    pub filing_date: Option<String>,
    /// Reported amount, as sent by the API. See [`Filing::amount`].
    pub filing_amount: Option<String>,
    pub filing_year: Option<String>,
    pub filing_type: Option<String>,
    /// Link to the scanned filing.
    pub filing_pdf: Option<String>,
    pub client_senate_id: Option<String>,
    pub client_name: Option<String>,
    pub client_country: Option<String>,
    pub client_state: Option<String>,
    /// Client principal place of business.
    pub client_ppb_country: Option<String>,
    pub client_ppb_state: Option<String>,
    pub client_description: Option<String>,
    pub client_contact_firstname: Option<String>,
    pub client_contact_middlename: Option<String>,
    pub client_contact_lastname: Option<String>,
    pub client_contact_suffix: Option<String>,
    pub registrant_senate_id: Option<String>,
    pub registrant_name: Option<String>,
    pub registrant_address: Option<String>,
    pub registrant_description: Option<String>,
    pub registrant_country: Option<String>,
    pub registrant_ppb_country: Option<String>,
    pub lobbyists: Vec<Lobbyist>,
    pub issues: Vec<Issue>,
}

impl Filing {
    /// Build a filing, unwrapping the nested `lobbyists` and `issues` lists.
    #[must_use]
    pub fn from_json(map: &JsonObject) -> Self {
        Self {
            filing_id: text(map, "filing_id"),
            filing_period: text(map, "filing_period"),
            filing_date: text(map, "filing_date"),
            filing_amount: text(map, "filing_amount"),
            filing_year: text(map, "filing_year"),
            filing_type: text(map, "filing_type"),
            filing_pdf: text(map, "filing_pdf"),
            client_senate_id: text(map, "client_senate_id"),
            client_name: text(map, "client_name"),
            client_country: text(map, "client_country"),
            client_state: text(map, "client_state"),
            client_ppb_country: text(map, "client_ppb_country"),
            client_ppb_state: text(map, "client_ppb_state"),
            client_description: text(map, "client_description"),
            client_contact_firstname: text(map, "client_contact_firstname"),
            client_contact_middlename: text(map, "client_contact_middlename"),
            client_contact_lastname: text(map, "client_contact_lastname"),
            client_contact_suffix: text(map, "client_contact_suffix"),
            registrant_senate_id: text(map, "registrant_senate_id"),
            registrant_name: text(map, "registrant_name"),
            registrant_address: text(map, "registrant_address"),
            registrant_description: text(map, "registrant_description"),
            registrant_country: text(map, "registrant_country"),
            registrant_ppb_country: text(map, "registrant_ppb_country"),
            lobbyists: unwrap_each(map, "lobbyists", "lobbyist", Lobbyist::from_json),
            issues: unwrap_each(map, "issues", "issue", Issue::from_json),
        }
    }

    /// The filing amount as a number, if it parses.
    #[must_use]
    pub fn amount(&self) -> Option<f64> {
        self.filing_amount.as_deref()?.trim().parse().ok()
    }
}

/// An individual registered as lobbying on one or more filings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Lobbyist {
    pub firstname: Option<String>,
    pub middlename: Option<String>,
    pub lastname: Option<String>,
    pub suffix: Option<String>,
    pub official_position: Option<String>,
    /// Filings the API listed alongside the lobbyist, if any.
    pub filings: Vec<Filing>,
    /// Match confidence, only set on fuzzy search results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuzzy_score: Option<f64>,
}

impl Lobbyist {
    /// Build a lobbyist. `fuzzy_score` is never read from the map.
    #[must_use]
    pub fn from_json(map: &JsonObject) -> Self {
        Self {
            firstname: text(map, "firstname"),
            middlename: text(map, "middlename"),
            lastname: text(map, "lastname"),
            suffix: text(map, "suffix"),
            official_position: text(map, "official_position"),
            filings: unwrap_each(map, "filings", "filing", Filing::from_json),
            fuzzy_score: None,
        }
    }

    /// Name parts joined with single spaces, skipping the missing ones.
    #[must_use]
    pub fn full_name(&self) -> String {
        [
            &self.firstname,
            &self.middlename,
            &self.lastname,
            &self.suffix,
        ]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// A topic classification attached to a filing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub code: Option<String>,
    pub specific_issue: Option<String>,
}

impl Issue {
    #[must_use]
    pub fn from_json(map: &JsonObject) -> Self {
        Self {
            code: text(map, "code"),
            specific_issue: text(map, "specific_issue"),
        }
    }
}

/// A sequence with at least one element.
///
/// Lookups that can return several records return `Option<NonEmpty<T>>`, so
/// "no results" is always `None` and never an empty list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NonEmpty<T>(Vec<T>);

impl<T> NonEmpty<T> {
    /// Wrap `items`, or return `None` if it is empty.
    #[must_use]
    pub fn from_vec(items: Vec<T>) -> Option<Self> {
        if items.is_empty() {
            None
        } else {
            Some(Self(items))
        }
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<T> Deref for NonEmpty<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T> IntoIterator for NonEmpty<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a NonEmpty<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> JsonObject {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_filing_from_parser_hash() {
        let filing = Filing::from_json(&object(json!({
            "client_name": "SUNLIGHT FOUNDATION",
            "filing_year": "2007"
        })));

        assert_eq!(filing.client_name.as_deref(), Some("SUNLIGHT FOUNDATION"));
        assert_eq!(filing.filing_year.as_deref(), Some("2007"));
        assert!(filing.registrant_name.is_none());
        assert!(filing.lobbyists.is_empty());
        assert!(filing.issues.is_empty());
    }

    #[test]
    fn test_filing_unwraps_nested_records() {
        let filing = Filing::from_json(&object(json!({
            "client_name": "ABC",
            "lobbyists": [
                {"lobbyist": {"firstname": "Bob", "lastname": "Smith"}},
                {"lobbyist": {"firstname": "Ann"}}
            ],
            "issues": [{"issue": {"code": "TAX", "specific_issue": "Issue"}}]
        })));

        assert_eq!(filing.lobbyists.len(), 2);
        assert_eq!(filing.lobbyists[0].firstname.as_deref(), Some("Bob"));
        assert_eq!(filing.lobbyists[0].lastname.as_deref(), Some("Smith"));
        assert_eq!(filing.lobbyists[1].firstname.as_deref(), Some("Ann"));
        assert_eq!(filing.issues.len(), 1);
        assert_eq!(filing.issues[0].code.as_deref(), Some("TAX"));
        assert_eq!(filing.issues[0].specific_issue.as_deref(), Some("Issue"));
    }

    #[test]
    fn test_filing_skips_malformed_wrappers() {
        let filing = Filing::from_json(&object(json!({
            "lobbyists": [
                {"firstname": "Unwrapped"},
                null,
                {"lobbyist": "not an object"},
                {"lobbyist": {"firstname": "Kept"}}
            ],
            "issues": "not a list"
        })));

        assert_eq!(filing.lobbyists.len(), 1);
        assert_eq!(filing.lobbyists[0].firstname.as_deref(), Some("Kept"));
        assert!(filing.issues.is_empty());
    }

    #[test]
    fn test_unquoted_scalars_become_text() {
        let filing = Filing::from_json(&object(json!({
            "filing_year": 2007,
            "filing_amount": 20000,
            "client_state": null,
            "client_name": ["not", "scalar"]
        })));

        assert_eq!(filing.filing_year.as_deref(), Some("2007"));
        assert_eq!(filing.filing_amount.as_deref(), Some("20000"));
        assert_eq!(filing.amount(), Some(20000.0));
        assert!(filing.client_state.is_none());
        assert!(filing.client_name.is_none());
    }

    #[test]
    fn test_amount_ignores_non_numeric_text() {
        let filing = Filing {
            filing_amount: Some("n/a".into()),
            ..Filing::default()
        };
        assert_eq!(filing.amount(), None);
    }

    #[test]
    fn test_issue_from_parser_hash() {
        let issue = Issue::from_json(&object(json!({
            "code": "123",
            "specific_issue": "Important Stuff"
        })));

        assert_eq!(issue.code.as_deref(), Some("123"));
        assert_eq!(issue.specific_issue.as_deref(), Some("Important Stuff"));
    }

    #[test]
    fn test_lobbyist_from_parser_hash() {
        let bob = Lobbyist::from_json(&object(json!({
            "firstname": "Bob",
            "middlename": "J.",
            "lastname": "Smith",
            "suffix": "Jr."
        })));

        assert_eq!(bob.firstname.as_deref(), Some("Bob"));
        assert_eq!(bob.full_name(), "Bob J. Smith Jr.");
        assert!(bob.fuzzy_score.is_none());
    }

    #[test]
    fn test_lobbyist_ignores_fuzzy_score_key() {
        let lobbyist = Lobbyist::from_json(&object(json!({
            "firstname": "Edward",
            "fuzzy_score": 0.99
        })));
        assert!(lobbyist.fuzzy_score.is_none());
    }

    #[test]
    fn test_lobbyist_unwraps_filings() {
        let lobbyist = Lobbyist::from_json(&object(json!({
            "firstname": "Edward",
            "filings": [{"filing": {"filing_id": "F-1", "client_name": "ABC"}}]
        })));

        assert_eq!(lobbyist.filings.len(), 1);
        assert_eq!(lobbyist.filings[0].filing_id.as_deref(), Some("F-1"));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let issue = Issue::from_json(&object(json!({
            "code": "ENV",
            "foo": "bar",
            "lobbyists": [{"lobbyist": {"firstname": "Bob"}}]
        })));

        assert_eq!(
            issue,
            Issue {
                code: Some("ENV".into()),
                specific_issue: None,
            }
        );
    }

    #[test]
    fn test_full_name_skips_missing_parts() {
        let lobbyist = Lobbyist {
            firstname: Some("Nisha".into()),
            middlename: Some(String::new()),
            lastname: Some("Thompsen".into()),
            ..Lobbyist::default()
        };
        assert_eq!(lobbyist.full_name(), "Nisha Thompsen");
    }

    #[test]
    fn test_number_parses_strings_and_numbers() {
        assert_eq!(number(&json!("0.91")), Some(0.91));
        assert_eq!(number(&json!(" 0.5 ")), Some(0.5));
        assert_eq!(number(&json!(0.75)), Some(0.75));
        assert_eq!(number(&json!("high")), None);
        assert_eq!(number(&json!(null)), None);
    }

    #[test]
    fn test_non_empty_rejects_empty_vec() {
        assert!(NonEmpty::<u8>::from_vec(Vec::new()).is_none());

        let items = NonEmpty::from_vec(vec![1, 2, 3]).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items.first(), Some(&1));
        assert_eq!(items.iter().sum::<i32>(), 6);
        assert_eq!(items.into_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_non_empty_serializes_as_list() {
        let items = NonEmpty::from_vec(vec!["a", "b"]).unwrap();
        assert_eq!(serde_json::to_value(&items).unwrap(), json!(["a", "b"]));
    }
}
