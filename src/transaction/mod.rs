//! Transactions ("lançamentos"): money that is due to be paid or received.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `NewTransaction` for creating transactions
//! - The search filter and the restrictions it compiles to
//! - Paginated search and the other database functions
//! - Route handlers for the transaction endpoints

mod core;
mod endpoints;
mod filter;
mod query;

pub use core::{
    NewTransaction, Transaction, TransactionId, TransactionType, create_transaction,
    create_transaction_table, delete_transaction, get_transaction, update_transaction,
};
pub use endpoints::{
    create_transaction_endpoint, delete_transaction_endpoint, get_transaction_endpoint,
    search_transactions_endpoint, update_transaction_endpoint,
};
pub use filter::TransactionFilter;
pub use query::search_transactions;
