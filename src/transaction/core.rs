//! Defines the core data models and database queries for transactions.

use rusqlite::{
    Connection, Row, ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    category::CategoryId,
    database_id::DatabaseId,
    person::{PersonId, get_person},
    validation::validate_not_blank,
};

// ============================================================================
// MODELS
// ============================================================================

/// Database identifier for a transaction.
pub type TransactionId = DatabaseId;

/// Whether money comes in or goes out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum TransactionType {
    /// Money received.
    #[serde(rename = "RECEITA")]
    Income,
    /// Money spent.
    #[serde(rename = "DESPESA")]
    Expense,
}

impl TransactionType {
    fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "RECEITA",
            TransactionType::Expense => "DESPESA",
        }
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "RECEITA" => Ok(TransactionType::Income),
            "DESPESA" => Ok(TransactionType::Expense),
            _ => Err(FromSqlError::InvalidType),
        }
    }
}

/// A reference to another resource by its ID, serialized as `{"codigo": id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Reference {
    /// The ID of the referenced resource.
    #[serde(rename = "codigo")]
    pub id: DatabaseId,
}

/// An amount of money due to be paid or received.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    #[serde(rename = "codigo")]
    pub id: TransactionId,
    /// A text description of what the transaction is for.
    #[serde(rename = "descricao")]
    pub description: String,
    /// When the money is due.
    #[serde(rename = "dataVencimento")]
    pub due_date: Date,
    /// When the money was actually paid, if it has been.
    #[serde(rename = "dataPagamento")]
    pub payment_date: Option<Date>,
    /// The amount of money.
    #[serde(rename = "valor")]
    pub amount: f64,
    /// Free text notes.
    #[serde(rename = "observacao")]
    pub notes: Option<String>,
    /// Whether this is income or an expense.
    #[serde(rename = "tipo")]
    pub kind: TransactionType,
    /// The category the transaction belongs to.
    #[serde(rename = "categoria")]
    pub category: Reference,
    /// The person who pays or receives the money.
    #[serde(rename = "pessoa")]
    pub person: Reference,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [NewTransaction] for discoverability.
    pub fn build(
        description: &str,
        due_date: Date,
        amount: f64,
        kind: TransactionType,
        category_id: CategoryId,
        person_id: PersonId,
    ) -> NewTransaction {
        NewTransaction {
            description: description.to_owned(),
            due_date,
            payment_date: None,
            amount,
            notes: None,
            kind,
            category: Reference { id: category_id },
            person: Reference { id: person_id },
        }
    }
}

/// The data for creating a transaction, or replacing an existing one.
///
/// This is also the request body of the create and update endpoints.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    /// Must not be blank.
    #[serde(rename = "descricao")]
    pub description: String,
    /// When the money is due.
    #[serde(rename = "dataVencimento")]
    pub due_date: Date,
    /// When the money was paid, if it has been.
    #[serde(rename = "dataPagamento", default)]
    pub payment_date: Option<Date>,
    /// The amount of money.
    #[serde(rename = "valor")]
    pub amount: f64,
    /// Free text notes.
    #[serde(rename = "observacao", default)]
    pub notes: Option<String>,
    /// Whether this is income or an expense.
    #[serde(rename = "tipo")]
    pub kind: TransactionType,
    /// Must refer to an existing category.
    #[serde(rename = "categoria")]
    pub category: Reference,
    /// The person must exist and be active when the transaction is saved.
    #[serde(rename = "pessoa")]
    pub person: Reference,
}

impl NewTransaction {
    /// Set the date the transaction was paid.
    pub fn payment_date(mut self, payment_date: Option<Date>) -> Self {
        self.payment_date = payment_date;
        self
    }

    /// Set the notes for the transaction.
    pub fn notes(mut self, notes: Option<&str>) -> Self {
        self.notes = notes.map(str::to_owned);
        self
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

pub(super) const SELECT_TRANSACTION: &str = "SELECT id, description, due_date, payment_date, \
    amount, notes, kind, category_id, person_id FROM \"transaction\"";

/// Check the parts of `new_transaction` that the database cannot.
///
/// # Errors
/// Returns [Error::InvalidField] if the description is blank, or
/// [Error::PersonMissingOrInactive] if the person does not exist or is inactive.
fn validate(new_transaction: &NewTransaction, connection: &Connection) -> Result<(), Error> {
    validate_not_blank("descricao", &new_transaction.description)?;

    let person_id = new_transaction.person.id;
    match get_person(person_id, connection) {
        Ok(person) if person.active => Ok(()),
        Ok(_) | Err(Error::NotFound) => Err(Error::PersonMissingOrInactive(person_id)),
        Err(error) => Err(error),
    }
}

/// Create a new transaction in the database.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidField] if the description is blank,
/// - or [Error::PersonMissingOrInactive] if the person does not exist or is inactive,
/// - or [Error::OperationNotAllowed] if the category does not exist,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    validate(&new_transaction, connection)?;

    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (description, due_date, payment_date, amount, notes, kind, category_id, person_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             RETURNING id, description, due_date, payment_date, amount, notes, kind, category_id, person_id",
        )?
        .query_row(
            (
                &new_transaction.description,
                new_transaction.due_date,
                new_transaction.payment_date,
                new_transaction.amount,
                &new_transaction.notes,
                new_transaction.kind,
                new_transaction.category.id,
                new_transaction.person.id,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Replace all of a transaction's data, keeping its ID.
///
/// # Errors
/// Returns [Error::NotFound] if the transaction does not exist, otherwise the
/// same errors as [create_transaction].
pub fn update_transaction(
    id: TransactionId,
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    get_transaction(id, connection)?;
    validate(&new_transaction, connection)?;

    let transaction = connection
        .prepare(
            "UPDATE \"transaction\" SET description = ?1, due_date = ?2, payment_date = ?3,
             amount = ?4, notes = ?5, kind = ?6, category_id = ?7, person_id = ?8
             WHERE id = ?9
             RETURNING id, description, due_date, payment_date, amount, notes, kind, category_id, person_id",
        )?
        .query_row(
            (
                &new_transaction.description,
                new_transaction.due_date,
                new_transaction.payment_date,
                new_transaction.amount,
                &new_transaction.notes,
                new_transaction.kind,
                new_transaction.category.id,
                new_transaction.person.id,
                id,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(&format!("{SELECT_TRANSACTION} WHERE id = :id"))?
        .query_row(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Delete a transaction by its `id`.
///
/// # Errors
/// Returns [Error::NotFound] if the transaction does not exist.
pub fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM \"transaction\" WHERE id = ?1", [id])?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            description TEXT NOT NULL,
            due_date TEXT NOT NULL,
            payment_date TEXT,
            amount REAL NOT NULL,
            notes TEXT,
            kind TEXT NOT NULL CHECK (kind IN ('RECEITA', 'DESPESA')),
            category_id INTEGER NOT NULL,
            person_id INTEGER NOT NULL,
            FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE,
            FOREIGN KEY(person_id) REFERENCES person(id) ON UPDATE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_transaction_due_date ON \"transaction\"(due_date);",
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
///
/// The row must have the columns of [SELECT_TRANSACTION] in the same order.
pub(super) fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        description: row.get(1)?,
        due_date: row.get(2)?,
        payment_date: row.get(3)?,
        amount: row.get(4)?,
        notes: row.get(5)?,
        kind: row.get(6)?,
        category: Reference { id: row.get(7)? },
        person: Reference { id: row.get(8)? },
    })
}

// ============================================================================
// TESTS
// ============================================================================
