//! Deserializers for optional query string parameters.
//!
//! HTML forms and hand-written URLs often send a parameter with no value,
//! e.g. `?page=&size=10`. These helpers treat such a parameter the same as a
//! missing one.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, de::Error as _};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Read an optional parameter, mapping an empty value to `None` and parsing
/// anything else with `parse`.
fn deserialize_non_empty<'de, D, T, E>(
    deserializer: D,
    parse: impl FnOnce(&str) -> Result<T, E>,
) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    E: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;

    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(text) => parse(text).map(Some).map_err(D::Error::custom),
    }
}

/// An optional value parsed with [FromStr], e.g. a page number.
pub(crate) fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    deserialize_non_empty(deserializer, |text| text.parse::<T>())
}

/// An optional date in the format `YYYY-MM-DD`.
pub(crate) fn empty_as_none_date<'de, D>(deserializer: D) -> Result<Option<Date>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_non_empty(deserializer, |text| Date::parse(text, DATE_FORMAT))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;
    use time::{Date, macros::date};

    use super::{empty_as_none, empty_as_none_date};

    #[derive(Debug, Deserialize)]
    struct Params {
        #[serde(default, deserialize_with = "empty_as_none")]
        size: Option<u64>,
        #[serde(default, deserialize_with = "empty_as_none_date")]
        from: Option<Date>,
    }

    #[test]
    fn empty_values_are_missing() {
        let got: Params = serde_json::from_value(json!({ "size": "", "from": "" })).unwrap();

        assert_eq!(got.size, None);
        assert_eq!(got.from, None);
    }

    #[test]
    fn absent_values_are_missing() {
        let got: Params = serde_json::from_value(json!({})).unwrap();

        assert_eq!(got.size, None);
        assert_eq!(got.from, None);
    }

    #[test]
    fn parses_present_values() {
        let got: Params =
            serde_json::from_value(json!({ "size": "15", "from": "2024-03-01" })).unwrap();

        assert_eq!(got.size, Some(15));
        assert_eq!(got.from, Some(date!(2024 - 03 - 01)));
    }

    #[test]
    fn rejects_garbage() {
        assert!(serde_json::from_value::<Params>(json!({ "size": "ten" })).is_err());
        assert!(serde_json::from_value::<Params>(json!({ "from": "01/03/2024" })).is_err());
    }
}
