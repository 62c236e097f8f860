//! Algamoney is a bookkeeping backend for categories, people and financial
//! transactions ("lançamentos").
//!
//! This library provides a JSON REST API backed by a SQLite database.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::response::{IntoResponse, Response};
use axum_server::Handle;
use tokio::signal;

mod app_state;
mod category;
mod database_id;
mod db;
mod endpoints;
mod error_message;
mod logging;
mod messages;
mod not_found;
mod pagination;
mod person;
mod query_params;
mod resource_created;
mod routing;
mod transaction;
mod validation;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use category::{Category, CategoryName, create_category};
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use messages::Locale;
pub use pagination::PaginationConfig;
pub use person::{Address, NewPerson, Person, PersonName, create_person};
pub use routing::build_router;
pub use transaction::{NewTransaction, Transaction, TransactionType, create_transaction};

use crate::{
    error_message::ErrorMessage, messages::MessageKey, not_found::get_404_not_found_response,
    person::PersonId,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The request body or query string could not be read as the expected type.
    ///
    /// Callers should pass in the text of the original rejection.
    #[error("the message could not be read: {0}")]
    InvalidMessage(String),

    /// A field failed validation.
    #[error("invalid value for field \"{field}\": {reason}")]
    InvalidField {
        /// The wire name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A transaction referenced a person that does not exist or is inactive.
    ///
    /// Transactions may only be recorded against active people.
    #[error("the person {0} does not exist or is inactive")]
    PersonMissingOrInactive(PersonId),

    /// The operation violated a foreign key, e.g. a transaction pointing at a
    /// missing category, or deleting a category that is still in use.
    #[error("the operation is not allowed: {0}")]
    OperationNotAllowed(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                description,
            ) => Error::OperationNotAllowed(
                description.unwrap_or_else(|| "FOREIGN KEY constraint failed".to_owned()),
            ),
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        self.into_localized_response(Locale::default())
    }
}

impl Error {
    /// The message shown to the client for this error.
    fn message_key(&self) -> MessageKey {
        match self {
            Error::NotFound => MessageKey::ResourceNotFound,
            Error::InvalidMessage(_) => MessageKey::InvalidMessage,
            Error::InvalidField { .. } => MessageKey::InvalidField,
            Error::PersonMissingOrInactive(_) => MessageKey::PersonMissingOrInactive,
            Error::OperationNotAllowed(_) => MessageKey::OperationNotAllowed,
            Error::SqlError(_) | Error::DatabaseLockError => MessageKey::InternalError,
        }
    }

    /// Render the error as a response with the user facing message in `locale`.
    ///
    /// Not found errors have an empty body, every other error renders a list
    /// with a single [ErrorMessage].
    pub(crate) fn into_localized_response(self, locale: Locale) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidMessage(_)
            | Error::InvalidField { .. }
            | Error::PersonMissingOrInactive(_)
            | Error::OperationNotAllowed(_) => {
                tracing::debug!("rejecting request: {self}");
                ErrorMessage::bad_request(locale.message(self.message_key()), &self)
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                ErrorMessage::internal_server_error(locale.message(error.message_key()), &error)
            }
        }
    }
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{
        Error, Locale,
        test_utils::{assert_empty_body, parse_json_body},
    };

    #[test]
    fn maps_foreign_key_failure_to_operation_not_allowed() {
        let error = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error {
                code: rusqlite::ffi::ErrorCode::ConstraintViolation,
                extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
            },
            Some("FOREIGN KEY constraint failed".to_owned()),
        );

        assert_eq!(
            Error::from(error),
            Error::OperationNotAllowed("FOREIGN KEY constraint failed".to_owned())
        );
    }

    #[test]
    fn maps_no_rows_to_not_found() {
        assert_eq!(
            Error::from(rusqlite::Error::QueryReturnedNoRows),
            Error::NotFound
        );
    }

    #[tokio::test]
    async fn not_found_has_empty_body() {
        let response = Error::NotFound.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_empty_body(response).await;
    }

    #[tokio::test]
    async fn person_error_renders_localized_message_and_diagnostic() {
        let response = Error::PersonMissingOrInactive(7).into_localized_response(Locale::English);

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = parse_json_body(response).await;
        assert_eq!(body[0]["msgView"], "Person does not exist or is inactive");
        assert_eq!(
            body[0]["msgStackTrace"],
            "the person 7 does not exist or is inactive"
        );
    }

    #[tokio::test]
    async fn lock_error_is_internal_server_error() {
        let response = Error::DatabaseLockError.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = parse_json_body(response).await;
        assert_eq!(body[0]["msgView"], "Erro interno do servidor");
    }
}
