//! Application router configuration.

use axum::{
    Router,
    routing::{get, put},
};

use crate::{
    AppState,
    category::{
        create_category_endpoint, delete_category_endpoint, get_category_endpoint,
        list_categories_endpoint,
    },
    endpoints,
    not_found::get_404_not_found,
    person::{
        create_person_endpoint, delete_person_endpoint, get_person_endpoint, list_people_endpoint,
        set_person_active_endpoint, update_person_endpoint,
    },
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_transaction_endpoint,
        search_transactions_endpoint, update_transaction_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            endpoints::CATEGORIES,
            get(list_categories_endpoint).post(create_category_endpoint),
        )
        .route(
            endpoints::CATEGORY,
            get(get_category_endpoint).delete(delete_category_endpoint),
        )
        .route(
            endpoints::PEOPLE,
            get(list_people_endpoint).post(create_person_endpoint),
        )
        .route(
            endpoints::PERSON,
            get(get_person_endpoint)
                .put(update_person_endpoint)
                .delete(delete_person_endpoint),
        )
        .route(endpoints::PERSON_ACTIVE, put(set_person_active_endpoint))
        .route(
            endpoints::TRANSACTIONS,
            get(search_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            get(get_transaction_endpoint)
                .put(update_transaction_endpoint)
                .delete(delete_transaction_endpoint),
        )
        .fallback(get_404_not_found)
        .with_state(state)
}
