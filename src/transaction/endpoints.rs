//! Route handlers for transactions.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{
        FromRef, Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error, Locale,
    db::lock_connection,
    endpoints,
    pagination::{PageQuery, PaginationConfig},
    resource_created::resource_created,
    transaction::{
        NewTransaction, TransactionFilter, TransactionId, create_transaction, delete_transaction,
        get_transaction, search_transactions, update_transaction,
    },
};

/// The state needed for the transaction endpoints.
#[derive(Debug, Clone)]
pub struct TransactionState {
    /// The shared database connection.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The page and page size used when a search does not specify them.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for TransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// Search transactions and respond with one page of the results.
///
/// The filter and paging parameters both come from the query string, e.g.
/// `/lancamentos?descricao=luz&dataVencimentoDe=2024-01-01&page=0&size=10`.
pub async fn search_transactions_endpoint(
    State(state): State<TransactionState>,
    locale: Locale,
    filter: Result<Query<TransactionFilter>, QueryRejection>,
    page_query: Result<Query<PageQuery>, QueryRejection>,
) -> Response {
    let result = filter
        .and_then(|Query(filter)| page_query.map(|Query(page_query)| (filter, page_query)))
        .map_err(|rejection| Error::InvalidMessage(rejection.body_text()))
        .and_then(|(filter, page_query)| {
            let page_request = page_query.resolve(&state.pagination_config);
            let connection = lock_connection(&state.db_connection)?;
            search_transactions(&filter, page_request, &connection)
        });

    match result {
        Ok(page) => Json(page).into_response(),
        Err(error) => error.into_localized_response(locale),
    }
}

/// Get a single transaction, or 404 if it does not exist.
pub async fn get_transaction_endpoint(
    State(state): State<TransactionState>,
    Path(transaction_id): Path<TransactionId>,
    locale: Locale,
) -> Response {
    let result = lock_connection(&state.db_connection)
        .and_then(|connection| get_transaction(transaction_id, &connection));

    match result {
        Ok(transaction) => Json(transaction).into_response(),
        Err(error) => error.into_localized_response(locale),
    }
}

/// Create a transaction and respond with 201 Created and its location.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionState>,
    locale: Locale,
    payload: Result<Json<NewTransaction>, JsonRejection>,
) -> Response {
    let result = payload
        .map_err(|rejection| Error::InvalidMessage(rejection.body_text()))
        .and_then(|Json(new_transaction)| {
            let connection = lock_connection(&state.db_connection)?;
            create_transaction(new_transaction, &connection)
        });

    match result {
        Ok(transaction) => resource_created(endpoints::TRANSACTION, transaction.id, transaction),
        Err(error) => error.into_localized_response(locale),
    }
}

/// Replace a transaction's data and respond with the updated transaction.
pub async fn update_transaction_endpoint(
    State(state): State<TransactionState>,
    Path(transaction_id): Path<TransactionId>,
    locale: Locale,
    payload: Result<Json<NewTransaction>, JsonRejection>,
) -> Response {
    let result = payload
        .map_err(|rejection| Error::InvalidMessage(rejection.body_text()))
        .and_then(|Json(new_transaction)| {
            let connection = lock_connection(&state.db_connection)?;
            update_transaction(transaction_id, new_transaction, &connection)
        });

    match result {
        Ok(transaction) => Json(transaction).into_response(),
        Err(error) => error.into_localized_response(locale),
    }
}

/// Delete a transaction and respond with 204 No Content.
pub async fn delete_transaction_endpoint(
    State(state): State<TransactionState>,
    Path(transaction_id): Path<TransactionId>,
    locale: Locale,
) -> Response {
    let result = lock_connection(&state.db_connection)
        .and_then(|connection| delete_transaction(transaction_id, &connection));

    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error.into_localized_response(locale),
    }
}
