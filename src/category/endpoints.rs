//! Route handlers for categories.

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
    category::{
        CategoryForm, CategoryId, CategoryName, create_category, delete_category,
        get_all_categories, get_category,
    },
    db::lock_connection,
    endpoints,
    resource_created::resource_created,
};

/// The state needed for the category endpoints.
#[derive(Debug, Clone)]
pub struct CategoryState {
    /// The shared database connection.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// List every category.
pub async fn list_categories_endpoint(
    State(state): State<CategoryState>,
    locale: Locale,
) -> Response {
    let result = lock_connection(&state.db_connection)
        .and_then(|connection| get_all_categories(&connection));

    match result {
        Ok(categories) => Json(categories).into_response(),
        Err(error) => error.into_localized_response(locale),
    }
}

/// Get a single category, or 404 if it does not exist.
pub async fn get_category_endpoint(
    State(state): State<CategoryState>,
    Path(category_id): Path<CategoryId>,
    locale: Locale,
) -> Response {
    let result = lock_connection(&state.db_connection)
        .and_then(|connection| get_category(category_id, &connection));

    match result {
        Ok(category) => Json(category).into_response(),
        Err(error) => error.into_localized_response(locale),
    }
}

/// Create a category and respond with 201 Created and its location.
pub async fn create_category_endpoint(
    State(state): State<CategoryState>,
    locale: Locale,
    payload: Result<Json<CategoryForm>, JsonRejection>,
) -> Response {
    let result = payload
        .map_err(|rejection| Error::InvalidMessage(rejection.body_text()))
        .and_then(|Json(form)| CategoryName::new(&form.name))
        .and_then(|name| {
            let connection = lock_connection(&state.db_connection)?;
            create_category(name, &connection)
        });

    match result {
        Ok(category) => resource_created(endpoints::CATEGORY, category.id, category),
        Err(error) => error.into_localized_response(locale),
    }
}

/// Delete a category and respond with 204 No Content.
pub async fn delete_category_endpoint(
    State(state): State<CategoryState>,
    Path(category_id): Path<CategoryId>,
    locale: Locale,
) -> Response {
    let result = lock_connection(&state.db_connection)
        .and_then(|connection| delete_category(category_id, &connection));

    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error.into_localized_response(locale),
    }
}

#[cfg(test)]
mod category_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Json,
        extract::{Path, State},
        http::StatusCode,
    };

    use crate::{
        Locale,
        category::{Category, CategoryForm, CategoryName, create_category, get_category},
        db::get_test_connection,
        test_utils::{assert_empty_body, get_header, parse_json_body},
    };

    use super::{
        CategoryState, create_category_endpoint, delete_category_endpoint,
        get_category_endpoint, list_categories_endpoint,
    };

    fn get_category_state() -> CategoryState {
        CategoryState {
            db_connection: Arc::new(Mutex::new(get_test_connection())),
        }
    }

    #[tokio::test]
    async fn create_returns_created_with_location() {
        let state = get_category_state();

        let response = create_category_endpoint(
            State(state.clone()),
            Locale::default(),
            Ok(Json(CategoryForm {
                name: "Supermercado".to_owned(),
            })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(get_header(&response, "location"), "/categorias/1");
        let body = parse_json_body(response).await;
        let category: Category = serde_json::from_value(body).unwrap();
        assert_eq!(category.name.as_ref(), "Supermercado");
        assert_eq!(
            get_category(category.id, &state.db_connection.lock().unwrap()),
            Ok(category)
        );
    }

    #[tokio::test]
    async fn create_with_short_name_is_bad_request() {
        let state = get_category_state();

        let response = create_category_endpoint(
            State(state),
            Locale::default(),
            Ok(Json(CategoryForm {
                name: "ab".to_owned(),
            })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = parse_json_body(response).await;
        assert_eq!(body[0]["msgView"], "Campo inválido");
    }

    #[tokio::test]
    async fn get_missing_category_is_not_found() {
        let response =
            get_category_endpoint(State(get_category_state()), Path(42), Locale::default()).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_empty_body(response).await;
    }

    #[tokio::test]
    async fn list_returns_all_categories() {
        let state = get_category_state();
        {
            let connection = state.db_connection.lock().unwrap();
            create_category(CategoryName::new_unchecked("Lazer"), &connection).unwrap();
            create_category(CategoryName::new_unchecked("Outros"), &connection).unwrap();
        }

        let response = list_categories_endpoint(State(state), Locale::default()).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = parse_json_body(response).await;
        assert_eq!(body.as_array().map(Vec::len), Some(2));
        assert_eq!(body[1]["nome"], "Outros");
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let state = get_category_state();
        let category = create_category(
            CategoryName::new_unchecked("Lazer"),
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();

        let response =
            delete_category_endpoint(State(state.clone()), Path(category.id), Locale::default())
                .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response =
            get_category_endpoint(State(state), Path(category.id), Locale::default()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_missing_category_is_not_found() {
        let response =
            delete_category_endpoint(State(get_category_state()), Path(7), Locale::default())
                .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
