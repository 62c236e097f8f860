//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/pessoas/{person_id}', use [format_endpoint].

/// The route to access categories.
pub const CATEGORIES: &str = "/categorias";
/// The route to access a single category.
pub const CATEGORY: &str = "/categorias/{category_id}";
/// The route to access people.
pub const PEOPLE: &str = "/pessoas";
/// The route to access a single person.
pub const PERSON: &str = "/pessoas/{person_id}";
/// The route to set whether a person is active.
pub const PERSON_ACTIVE: &str = "/pessoas/{person_id}/ativo";
/// The route to search and create transactions.
pub const TRANSACTIONS: &str = "/lancamentos";
/// The route to access a single transaction.
pub const TRANSACTION: &str = "/lancamentos/{transaction_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/pessoas/{person_id}', '{person_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map_or(endpoint_path.len(), |end| param_start + end + 1);

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
