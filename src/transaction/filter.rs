//! The search filter for transactions and the SQL restrictions it compiles to.

use rusqlite::types::Value;
use serde::Deserialize;
use time::Date;

use crate::{db::UNICODE_LOWER, query_params::empty_as_none_date};

/// Optional criteria for searching transactions, read from the query string.
///
/// Every criterion that is set must hold for a transaction to match.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct TransactionFilter {
    /// Case-insensitive substring of the description.
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    /// Inclusive lower bound on the due date.
    #[serde(
        rename = "dataVencimentoDe",
        default,
        deserialize_with = "empty_as_none_date"
    )]
    pub due_date_from: Option<Date>,
    /// Inclusive upper bound on the due date.
    #[serde(
        rename = "dataVencimentoAte",
        default,
        deserialize_with = "empty_as_none_date"
    )]
    pub due_date_to: Option<Date>,
}

/// A single condition on transactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Restriction {
    /// The lowercased description contains this already lowercased text.
    DescriptionContains(String),
    /// The due date is on or after this date.
    DueDateFrom(Date),
    /// The due date is on or before this date.
    DueDateTo(Date),
}

impl Restriction {
    /// The SQL condition for this restriction, using `?{index}` as its only parameter.
    ///
    /// The text is matched with `instr` rather than `LIKE` so that `%` and `_`
    /// in the search text are taken literally.
    pub(crate) fn to_sql(&self, index: usize) -> String {
        match self {
            Restriction::DescriptionContains(_) => {
                format!("instr({UNICODE_LOWER}(description), ?{index}) > 0")
            }
            Restriction::DueDateFrom(_) => format!("due_date >= ?{index}"),
            Restriction::DueDateTo(_) => format!("due_date <= ?{index}"),
        }
    }

    /// The value to bind to the parameter in [Restriction::to_sql].
    pub(crate) fn param(&self) -> Value {
        match self {
            Restriction::DescriptionContains(text) => Value::Text(text.clone()),
            Restriction::DueDateFrom(date) | Restriction::DueDateTo(date) => {
                Value::Text(date.to_string())
            }
        }
    }
}

/// Turn `filter` into the list of restrictions that a matching transaction must satisfy.
///
/// Unset criteria and an empty description produce no restriction. The
/// description is not trimmed, so whitespace is searched for literally.
pub fn build_restrictions(filter: &TransactionFilter) -> Vec<Restriction> {
    let mut restrictions = Vec::new();

    if let Some(description) = filter.description.as_deref().filter(|text| !text.is_empty()) {
        restrictions.push(Restriction::DescriptionContains(description.to_lowercase()));
    }

    if let Some(from) = filter.due_date_from {
        restrictions.push(Restriction::DueDateFrom(from));
    }

    if let Some(to) = filter.due_date_to {
        restrictions.push(Restriction::DueDateTo(to));
    }

    restrictions
}

/// Join the restrictions into a `WHERE` clause, or an empty string when there are none.
///
/// Parameters are numbered from 1 in the same order as `restrictions`.
pub(crate) fn where_clause(restrictions: &[Restriction]) -> String {
    if restrictions.is_empty() {
        return String::new();
    }

    let parts: Vec<String> = restrictions
        .iter()
        .enumerate()
        .map(|(i, restriction)| restriction.to_sql(i + 1))
        .collect();

    format!("WHERE {}", parts.join(" AND "))
}
