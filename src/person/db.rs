//! Database operations for people.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    person::{Address, NewPerson, Person, PersonId, PersonName},
};

const SELECT_PERSON: &str = "SELECT id, name, active, street, number, complement, district, \
    postal_code, city, state FROM person";

/// Create a person and return it with its generated ID.
///
/// # Errors
/// Returns [Error::InvalidField] if the name is invalid, or [Error::SqlError]
/// if there is some other SQL error.
pub fn create_person(new_person: NewPerson, connection: &Connection) -> Result<Person, Error> {
    let (name, active, address) = new_person.validate()?;

    connection
        .prepare(
            "INSERT INTO person (name, active, street, number, complement, district, postal_code, city, state)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             RETURNING id, name, active, street, number, complement, district, postal_code, city, state",
        )?
        .query_row(
            (
                name.as_ref(),
                active,
                &address.street,
                &address.number,
                &address.complement,
                &address.district,
                &address.postal_code,
                &address.city,
                &address.state,
            ),
            map_row,
        )
        .map_err(|error| error.into())
}

/// Retrieve a single person by ID.
pub fn get_person(person_id: PersonId, connection: &Connection) -> Result<Person, Error> {
    connection
        .prepare(&format!("{SELECT_PERSON} WHERE id = :id;"))?
        .query_row(&[(":id", &person_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all people ordered by ID.
pub fn get_all_people(connection: &Connection) -> Result<Vec<Person>, Error> {
    connection
        .prepare(&format!("{SELECT_PERSON} ORDER BY id ASC;"))?
        .query_map([], map_row)?
        .map(|maybe_person| maybe_person.map_err(|error| error.into()))
        .collect()
}

/// Replace all of a person's data, keeping their ID.
///
/// # Errors
/// Returns [Error::NotFound] if the person doesn't exist, or
/// [Error::InvalidField] if the new name is invalid.
pub fn update_person(
    person_id: PersonId,
    new_person: NewPerson,
    connection: &Connection,
) -> Result<Person, Error> {
    let (name, active, address) = new_person.validate()?;

    connection
        .prepare(
            "UPDATE person SET name = ?1, active = ?2, street = ?3, number = ?4, complement = ?5,
             district = ?6, postal_code = ?7, city = ?8, state = ?9
             WHERE id = ?10
             RETURNING id, name, active, street, number, complement, district, postal_code, city, state",
        )?
        .query_row(
            (
                name.as_ref(),
                active,
                &address.street,
                &address.number,
                &address.complement,
                &address.district,
                &address.postal_code,
                &address.city,
                &address.state,
                person_id,
            ),
            map_row,
        )
        .map_err(|error| error.into())
}

/// Set whether a person is active.
///
/// # Errors
/// Returns [Error::NotFound] if the person doesn't exist.
pub fn set_person_active(
    person_id: PersonId,
    active: bool,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE person SET active = ?1 WHERE id = ?2",
        (active, person_id),
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Delete a person by ID.
///
/// # Errors
/// Returns [Error::NotFound] if the person doesn't exist, or
/// [Error::OperationNotAllowed] if a transaction still refers to them.
pub fn delete_person(person_id: PersonId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM person WHERE id = ?1", [person_id])?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Initialize the person table.
pub fn create_person_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS person (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            active INTEGER NOT NULL,
            street TEXT,
            number TEXT,
            complement TEXT,
            district TEXT,
            postal_code TEXT,
            city TEXT,
            state TEXT
        );",
        (),
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Person, rusqlite::Error> {
    let raw_name: String = row.get(1)?;

    Ok(Person {
        id: row.get(0)?,
        name: PersonName::new_unchecked(&raw_name),
        active: row.get(2)?,
        address: Address {
            street: row.get(3)?,
            number: row.get(4)?,
            complement: row.get(5)?,
            district: row.get(6)?,
            postal_code: row.get(7)?,
            city: row.get(8)?,
            state: row.get(9)?,
        },
    })
}
