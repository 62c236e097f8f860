//! Route handlers for people.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error, Locale,
    db::lock_connection,
    endpoints,
    person::{
        NewPerson, PersonId, create_person, delete_person, get_all_people, get_person,
        set_person_active, update_person,
    },
    resource_created::resource_created,
};

/// The state needed for the person endpoints.
#[derive(Debug, Clone)]
pub struct PersonState {
    /// The shared database connection.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for PersonState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// List every person.
pub async fn list_people_endpoint(State(state): State<PersonState>, locale: Locale) -> Response {
    let result =
        lock_connection(&state.db_connection).and_then(|connection| get_all_people(&connection));

    match result {
        Ok(people) => Json(people).into_response(),
        Err(error) => error.into_localized_response(locale),
    }
}

/// Get a single person, or 404 if they do not exist.
pub async fn get_person_endpoint(
    State(state): State<PersonState>,
    Path(person_id): Path<PersonId>,
    locale: Locale,
) -> Response {
    let result = lock_connection(&state.db_connection)
        .and_then(|connection| get_person(person_id, &connection));

    match result {
        Ok(person) => Json(person).into_response(),
        Err(error) => error.into_localized_response(locale),
    }
}

/// Create a person and respond with 201 Created and their location.
pub async fn create_person_endpoint(
    State(state): State<PersonState>,
    locale: Locale,
    payload: Result<Json<NewPerson>, JsonRejection>,
) -> Response {
    let result = payload
        .map_err(|rejection| Error::InvalidMessage(rejection.body_text()))
        .and_then(|Json(new_person)| {
            let connection = lock_connection(&state.db_connection)?;
            create_person(new_person, &connection)
        });

    match result {
        Ok(person) => resource_created(endpoints::PERSON, person.id, person),
        Err(error) => error.into_localized_response(locale),
    }
}

/// Replace a person's data. The ID in the path wins over anything in the body.
pub async fn update_person_endpoint(
    State(state): State<PersonState>,
    Path(person_id): Path<PersonId>,
    locale: Locale,
    payload: Result<Json<NewPerson>, JsonRejection>,
) -> Response {
    let result = payload
        .map_err(|rejection| Error::InvalidMessage(rejection.body_text()))
        .and_then(|Json(new_person)| {
            let connection = lock_connection(&state.db_connection)?;
            update_person(person_id, new_person, &connection)
        });

    match result {
        Ok(person) => Json(person).into_response(),
        Err(error) => error.into_localized_response(locale),
    }
}

/// Set whether a person is active. The body is a bare JSON boolean.
pub async fn set_person_active_endpoint(
    State(state): State<PersonState>,
    Path(person_id): Path<PersonId>,
    locale: Locale,
    payload: Result<Json<bool>, JsonRejection>,
) -> Response {
    let result = payload
        .map_err(|rejection| Error::InvalidMessage(rejection.body_text()))
        .and_then(|Json(active)| {
            let connection = lock_connection(&state.db_connection)?;
            set_person_active(person_id, active, &connection)
        });

    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error.into_localized_response(locale),
    }
}

/// Delete a person and respond with 204 No Content.
pub async fn delete_person_endpoint(
    State(state): State<PersonState>,
    Path(person_id): Path<PersonId>,
    locale: Locale,
) -> Response {
    let result = lock_connection(&state.db_connection)
        .and_then(|connection| delete_person(person_id, &connection));

    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error.into_localized_response(locale),
    }
}

#[cfg(test)]
mod person_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Json,
        extract::{Path, State},
        http::StatusCode,
    };

    use time::macros::date;

    use crate::{
        Locale,
        category::{CategoryName, create_category},
        db::get_test_connection,
        person::{NewPerson, Person, create_person, get_person},
        test_utils::{assert_empty_body, get_header, parse_json_body},
        transaction::{Transaction, TransactionType, create_transaction},
    };

    use super::{
        PersonState, create_person_endpoint, delete_person_endpoint, get_person_endpoint,
        list_people_endpoint, set_person_active_endpoint, update_person_endpoint,
    };

    fn get_person_state() -> PersonState {
        PersonState {
            db_connection: Arc::new(Mutex::new(get_test_connection())),
        }
    }

    #[tokio::test]
    async fn create_then_get_returns_identical_person() {
        let state = get_person_state();

        let response = create_person_endpoint(
            State(state.clone()),
            Locale::default(),
            Ok(Json(NewPerson::build("Maria Silva", true))),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(get_header(&response, "location"), "/pessoas/1");
        let created: Person = serde_json::from_value(parse_json_body(response).await).unwrap();

        let response =
            get_person_endpoint(State(state), Path(created.id), Locale::default()).await;
        assert_eq!(response.status(), StatusCode::OK);
        let fetched: Person = serde_json::from_value(parse_json_body(response).await).unwrap();
        assert_eq!(created, fetched);
    }

    #[tokio::test]
    async fn update_missing_person_is_not_found() {
        let response = update_person_endpoint(
            State(get_person_state()),
            Path(3),
            Locale::default(),
            Ok(Json(NewPerson::build("Maria Silva", true))),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_returns_updated_person() {
        let state = get_person_state();
        let person = create_person(
            NewPerson::build("Maria Silva", true),
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();

        let response = update_person_endpoint(
            State(state),
            Path(person.id),
            Locale::default(),
            Ok(Json(NewPerson::build("Maria Souza", true))),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = parse_json_body(response).await;
        assert_eq!(body["codigo"], person.id);
        assert_eq!(body["nome"], "Maria Souza");
    }

    #[tokio::test]
    async fn set_active_returns_no_content() {
        let state = get_person_state();
        let person = create_person(
            NewPerson::build("Maria Silva", true),
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();

        let response = set_person_active_endpoint(
            State(state.clone()),
            Path(person.id),
            Locale::default(),
            Ok(Json(false)),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let got = get_person(person.id, &state.db_connection.lock().unwrap()).unwrap();
        assert!(!got.active);
    }

    #[tokio::test]
    async fn set_active_on_missing_person_is_not_found() {
        let response = set_person_active_endpoint(
            State(get_person_state()),
            Path(1),
            Locale::default(),
            Ok(Json(true)),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_returns_all_people() {
        let state = get_person_state();
        {
            let connection = state.db_connection.lock().unwrap();
            create_person(NewPerson::build("Maria Silva", true), &connection).unwrap();
            create_person(NewPerson::build("Pedro Santos", false), &connection).unwrap();
        }

        let response = list_people_endpoint(State(state), Locale::default()).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = parse_json_body(response).await;
        assert_eq!(body.as_array().map(Vec::len), Some(2));
        assert_eq!(body[1]["nome"], "Pedro Santos");
        assert_eq!(body[1]["ativo"], false);
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let state = get_person_state();
        let person = create_person(
            NewPerson::build("Maria Silva", true),
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();

        let response =
            delete_person_endpoint(State(state.clone()), Path(person.id), Locale::default()).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = get_person_endpoint(State(state), Path(person.id), Locale::default()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_empty_body(response).await;
    }

    #[tokio::test]
    async fn delete_missing_person_is_not_found() {
        let response =
            delete_person_endpoint(State(get_person_state()), Path(7), Locale::default()).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_person_with_transactions_is_bad_request() {
        let state = get_person_state();
        let person = {
            let connection = state.db_connection.lock().unwrap();
            let category =
                create_category(CategoryName::new_unchecked("Lazer"), &connection).unwrap();
            let person = create_person(NewPerson::build("Maria Silva", true), &connection).unwrap();
            create_transaction(
                Transaction::build(
                    "Cinema",
                    date!(2024 - 03 - 01),
                    30.0,
                    TransactionType::Expense,
                    category.id,
                    person.id,
                ),
                &connection,
            )
            .unwrap();
            person
        };

        let response =
            delete_person_endpoint(State(state), Path(person.id), Locale::default()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = parse_json_body(response).await;
        assert_eq!(body[0]["msgView"], "Operação não permitida");
    }
}
