//! Result aggregation and the final-answer boundary.
//!
//! `AggregateResult` collects every record the agent's tool calls produced, in
//! call order. `parse_final_answer` turns the agent's terminal text into table
//! rows; anything that is not a JSON list of `Title/Company/Location/Link`
//! objects ends the query with an error.

pub mod table;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::listings::ResultRecord;
use crate::llm_client::strip_json_fences;

pub use table::ResultsTable;

/// Column keys of the final answer, in display order.
pub const COLUMNS: [&str; 4] = ["Title", "Company", "Location", "Link"];

/// Every record returned during one query: invocation order, then provider order.
/// Duplicates across sources are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AggregateResult {
    records: Vec<ResultRecord>,
}

impl AggregateResult {
    /// Appends the output of one adapter invocation.
    pub fn record_invocation(&mut self, records: &[ResultRecord]) {
        self.records.extend_from_slice(records);
    }

    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_error()).count()
    }
}

/// One row of the agent's final answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobRow {
    #[serde(rename = "Title")]
    pub title: Option<String>,
    #[serde(rename = "Company")]
    pub company: Option<String>,
    #[serde(rename = "Location")]
    pub location: Option<String>,
    #[serde(rename = "Link")]
    pub link: Option<String>,
}

#[derive(Debug, Error)]
pub enum FinalAnswerError {
    #[error("final answer is not valid JSON ({source}): {answer}")]
    InvalidJson {
        answer: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("final answer must be a JSON list of rows: {0}")]
    NotAList(String),

    #[error("final answer row {index} is not an object")]
    RowNotObject { index: usize },

    #[error("final answer row {index} is missing the '{column}' column")]
    MissingColumn { index: usize, column: &'static str },
}

/// Parses the agent's final answer into rows. An empty list is a valid, empty result.
pub fn parse_final_answer(answer: &str) -> Result<Vec<JobRow>, FinalAnswerError> {
    let value: Value = serde_json::from_str(strip_json_fences(answer)).map_err(|source| {
        FinalAnswerError::InvalidJson {
            answer: answer.to_string(),
            source,
        }
    })?;

    let Value::Array(items) = value else {
        return Err(FinalAnswerError::NotAList(answer.to_string()));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let Value::Object(mut object) = item else {
                return Err(FinalAnswerError::RowNotObject { index });
            };
            let mut cell = |column: &'static str| {
                object
                    .remove(column)
                    .map(cell_text)
                    .ok_or(FinalAnswerError::MissingColumn { index, column })
            };
            Ok(JobRow {
                title: cell(COLUMNS[0])?,
                company: cell(COLUMNS[1])?,
                location: cell(COLUMNS[2])?,
                link: cell(COLUMNS[3])?,
            })
        })
        .collect()
}

fn cell_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::{ErrorRecord, ListingRecord, ListingSource};

    fn listing(title: &str, source: ListingSource) -> ResultRecord {
        ResultRecord::Listing(ListingRecord {
            source,
            title: Some(title.to_string()),
            company: Some("Acme".to_string()),
            location: None,
            link: None,
        })
    }

    #[test]
    fn test_aggregate_keeps_invocation_order() {
        let a = listing("A", ListingSource::ActiveJobsDb);
        let b = listing("B", ListingSource::ActiveJobsDb);
        let c = listing("C", ListingSource::LinkedIn);

        let mut aggregate = AggregateResult::default();
        aggregate.record_invocation(&[a.clone(), b.clone()]);
        aggregate.record_invocation(&[c.clone()]);

        assert_eq!(aggregate.records(), &[a, b, c]);
    }

    #[test]
    fn test_aggregate_keeps_duplicates_and_errors() {
        let a = listing("Same", ListingSource::ActiveJobsDb);
        let error = ResultRecord::Error(ErrorRecord {
            error: "LinkedIn API Error 500".to_string(),
        });

        let mut aggregate = AggregateResult::default();
        aggregate.record_invocation(&[a.clone()]);
        aggregate.record_invocation(&[a.clone()]);
        aggregate.record_invocation(&[error]);

        assert_eq!(aggregate.len(), 3);
        assert_eq!(aggregate.error_count(), 1);
        assert_eq!(aggregate.records()[0], aggregate.records()[1]);
    }

    #[test]
    fn test_aggregate_serializes_as_plain_list() {
        let mut aggregate = AggregateResult::default();
        aggregate.record_invocation(&[ResultRecord::Error(ErrorRecord {
            error: "Active Jobs API Error 500".to_string(),
        })]);
        assert_eq!(
            serde_json::to_string(&aggregate).unwrap(),
            r#"[{"error":"Active Jobs API Error 500"}]"#
        );
    }

    #[test]
    fn test_parse_final_answer_single_row() {
        let rows = parse_final_answer(
            r#"[{"Title":"Python Developer","Company":"Acme","Location":"Remote","Link":"http://x/1"}]"#,
        )
        .unwrap();
        assert_eq!(
            rows,
            vec![JobRow {
                title: Some("Python Developer".to_string()),
                company: Some("Acme".to_string()),
                location: Some("Remote".to_string()),
                link: Some("http://x/1".to_string()),
            }]
        );
    }

    #[test]
    fn test_parse_final_answer_accepts_fenced_json_and_nulls() {
        let rows = parse_final_answer(
            "```json\n[{\"Title\":\"SRE\",\"Company\":null,\"Location\":\"Berlin\",\"Link\":null}]\n```",
        )
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].company.is_none());
        assert!(rows[0].link.is_none());
    }

    #[test]
    fn test_parse_final_answer_empty_list() {
        assert!(parse_final_answer("[]").unwrap().is_empty());
    }

    #[test]
    fn test_non_json_answer_is_rejected_with_detail() {
        let err = parse_final_answer("I don't know").unwrap_err();
        assert!(matches!(err, FinalAnswerError::InvalidJson { .. }));
        assert!(err.to_string().contains("I don't know"));
    }

    #[test]
    fn test_object_answer_is_not_a_list() {
        let err = parse_final_answer(r#"{"Title":"x"}"#).unwrap_err();
        assert!(matches!(err, FinalAnswerError::NotAList(_)));
    }

    #[test]
    fn test_row_missing_link_column() {
        let err =
            parse_final_answer(r#"[{"Title":"x","Company":"y","Location":"z"}]"#).unwrap_err();
        assert!(matches!(
            err,
            FinalAnswerError::MissingColumn {
                index: 0,
                column: "Link"
            }
        ));
    }

    #[test]
    fn test_row_that_is_not_an_object() {
        let err = parse_final_answer(r#"["just text"]"#).unwrap_err();
        assert!(matches!(err, FinalAnswerError::RowNotObject { index: 0 }));
    }
}
