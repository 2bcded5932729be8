//! Recognition result shapes and the typed intents they map to
//!
//! The recognizer posts an array of hypotheses, each wrapping an
//! `interpretation` object whose fields are loosely typed (numbers and
//! strings arrive interchangeably). The first hypothesis wins; anything
//! the vocabulary does not cover is a recognition error.

use bankdemo_core::{FilterKind, SortColumn, SortDirection};
use serde::de::Deserializer;
use serde::Deserialize;

/// Accept either a JSON string or a bare number for loosely typed fields.
fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        String(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::String(s) => s,
        Raw::Number(n) => n.to_string(),
    }))
}

/// One interpretation as the recognizer reports it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Interpretation {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub value: Option<String>,
    #[serde(default)]
    pub comparison: Option<String>,
    #[serde(default)]
    pub order: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub idx: Option<String>,
}

/// One recognition hypothesis.
#[derive(Debug, Clone, Deserialize)]
pub struct RecognitionHit {
    pub interpretation: Interpretation,
}

/// What the spoken command asks the recent-transactions page to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Sort {
        column: SortColumn,
        direction: SortDirection,
    },
    Filter {
        kind: FilterKind,
        value: String,
        comparison: String,
    },
    Detail {
        index: usize,
    },
    Chat,
    MakePayment,
    MainMenu,
    RecentTransactions,
}

impl Intent {
    /// Map an interpretation to a typed intent. `None` means the action
    /// or its arguments are outside the vocabulary.
    pub fn from_interpretation(interp: &Interpretation) -> Option<Intent> {
        match interp.action.trim().to_lowercase().as_str() {
            "sort" => {
                let column: SortColumn = interp.field.as_deref()?.parse().ok()?;
                let direction =
                    SortDirection::from_phrase(interp.order.as_deref().unwrap_or(""));
                Some(Intent::Sort { column, direction })
            }
            "filter" => {
                let kind: FilterKind = interp.field.as_deref()?.parse().ok()?;
                if kind == FilterKind::Sort {
                    return None;
                }
                Some(Intent::Filter {
                    kind,
                    value: interp.value.clone()?,
                    comparison: interp
                        .comparison
                        .clone()
                        .unwrap_or_default()
                        .to_lowercase(),
                })
            }
            "detail" => {
                let index = interp.idx.as_deref()?.trim().parse().ok()?;
                Some(Intent::Detail { index })
            }
            "chat" => Some(Intent::Chat),
            "make payment" => Some(Intent::MakePayment),
            "main menu" | "go back" => Some(Intent::MainMenu),
            "recent transactions" => Some(Intent::RecentTransactions),
            _ => None,
        }
    }

    /// The winning intent of a recognition result, if any.
    pub fn from_result(result: &[RecognitionHit]) -> Option<Intent> {
        Intent::from_interpretation(&result.first()?.interpretation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(json: &str) -> RecognitionHit {
        serde_json::from_str(&format!("{{\"interpretation\": {}}}", json)).unwrap()
    }

    #[test]
    fn test_sort_intent() {
        let hit = hit(r#"{"action": "sort", "field": "amount", "order": "desc"}"#);
        assert_eq!(
            Intent::from_result(&[hit]),
            Some(Intent::Sort {
                column: SortColumn::Amount,
                direction: SortDirection::Descending,
            })
        );
    }

    #[test]
    fn test_filter_intent_with_numeric_value() {
        let hit = hit(
            r#"{"action": "filter", "field": "amount", "value": 10.5, "comparison": "Over"}"#,
        );
        assert_eq!(
            Intent::from_result(&[hit]),
            Some(Intent::Filter {
                kind: FilterKind::Amount,
                value: "10.5".to_string(),
                comparison: "over".to_string(),
            })
        );
    }

    #[test]
    fn test_detail_intent_accepts_string_index() {
        let hit = hit(r#"{"action": "detail", "idx": "3"}"#);
        assert_eq!(Intent::from_result(&[hit]), Some(Intent::Detail { index: 3 }));
    }

    #[test]
    fn test_navigation_intents() {
        assert_eq!(
            Intent::from_result(&[hit(r#"{"action": "go back"}"#)]),
            Some(Intent::MainMenu)
        );
        assert_eq!(
            Intent::from_result(&[hit(r#"{"action": "make payment"}"#)]),
            Some(Intent::MakePayment)
        );
        assert_eq!(
            Intent::from_result(&[hit(r#"{"action": "recent transactions"}"#)]),
            Some(Intent::RecentTransactions)
        );
    }

    #[test]
    fn test_unknown_action_is_none() {
        assert_eq!(Intent::from_result(&[hit(r#"{"action": "warp ten"}"#)]), None);
        assert_eq!(Intent::from_result(&[]), None);
    }

    #[test]
    fn test_unknown_filter_field_is_none() {
        let hit = hit(r#"{"action": "filter", "field": "color", "value": "red"}"#);
        assert_eq!(Intent::from_result(&[hit]), None);
    }
}
