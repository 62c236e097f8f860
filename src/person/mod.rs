//! People that transactions are recorded against.

mod db;
mod domain;
mod endpoints;

pub use db::{
    create_person, create_person_table, delete_person, get_all_people, get_person,
    set_person_active, update_person,
};
pub use domain::{Address, NewPerson, Person, PersonId, PersonName};
pub use endpoints::{
    create_person_endpoint, delete_person_endpoint, get_person_endpoint, list_people_endpoint,
    set_person_active_endpoint, update_person_endpoint,
};
