//! Filtered, paginated search over transactions.

use rusqlite::{Connection, params_from_iter, types::Value};

use crate::{
    Error,
    pagination::{Page, PageRequest},
};

use super::{
    core::{SELECT_TRANSACTION, Transaction, map_transaction_row},
    filter::{TransactionFilter, build_restrictions, where_clause},
};

fn to_sql_integer(value: u64) -> Value {
    Value::Integer(i64::try_from(value).unwrap_or(i64::MAX))
}

/// Get one page of the transactions matching `filter`, ordered by ID.
///
/// The page's total counts every matching transaction, not just those on the page.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn search_transactions(
    filter: &TransactionFilter,
    page_request: PageRequest,
    connection: &Connection,
) -> Result<Page<Transaction>, Error> {
    let restrictions = build_restrictions(filter);
    let limit_index = restrictions.len() + 1;
    let offset_index = restrictions.len() + 2;

    let query = format!(
        "{SELECT_TRANSACTION} {} ORDER BY id ASC LIMIT ?{limit_index} OFFSET ?{offset_index}",
        where_clause(&restrictions)
    );

    let params = restrictions
        .iter()
        .map(|restriction| restriction.param())
        .chain([
            to_sql_integer(page_request.limit()),
            to_sql_integer(page_request.offset()),
        ]);

    let content = connection
        .prepare(&query)?
        .query_map(params_from_iter(params), map_transaction_row)?
        .collect::<Result<Vec<_>, _>>()?;

    let total = count_transactions(filter, connection)?;

    Ok(Page::new(content, page_request, total))
}

/// Count every transaction matching `filter`, ignoring pagination.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn count_transactions(
    filter: &TransactionFilter,
    connection: &Connection,
) -> Result<u64, Error> {
    let restrictions = build_restrictions(filter);
    let query = format!(
        "SELECT COUNT(*) FROM \"transaction\" {}",
        where_clause(&restrictions)
    );

    let count: i64 = connection.query_row(
        &query,
        params_from_iter(restrictions.iter().map(|restriction| restriction.param())),
        |row| row.get(0),
    )?;

    Ok(count.try_into().unwrap_or_default())
}
