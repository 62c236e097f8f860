//! Validation rules shared by the domain models.

use crate::Error;

/// The fewest characters allowed in a name.
pub const NAME_MIN_LENGTH: usize = 3;
/// The most characters allowed in a name.
pub const NAME_MAX_LENGTH: usize = 50;

/// Trim `raw` and check that it is between [NAME_MIN_LENGTH] and
/// [NAME_MAX_LENGTH] characters long.
///
/// # Errors
/// Returns [Error::InvalidField] naming `field` if the length is out of range.
pub fn validate_name(field: &'static str, raw: &str) -> Result<String, Error> {
    let name = raw.trim();
    let length = name.chars().count();

    if (NAME_MIN_LENGTH..=NAME_MAX_LENGTH).contains(&length) {
        Ok(name.to_owned())
    } else {
        Err(Error::InvalidField {
            field,
            reason: format!(
                "length must be between {NAME_MIN_LENGTH} and {NAME_MAX_LENGTH} characters, got {length}"
            ),
        })
    }
}

/// Check that `raw` contains something other than whitespace.
///
/// # Errors
/// Returns [Error::InvalidField] naming `field` if `raw` is blank.
pub fn validate_not_blank(field: &'static str, raw: &str) -> Result<(), Error> {
    if raw.trim().is_empty() {
        Err(Error::InvalidField {
            field,
            reason: "must not be blank".to_owned(),
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::Error;

    use super::{validate_name, validate_not_blank};

    #[test]
    fn trims_name() {
        assert_eq!(validate_name("nome", "  Lazer \n"), Ok("Lazer".to_owned()));
    }

    #[test]
    fn rejects_short_name() {
        let got = validate_name("nome", " ab ");

        assert!(matches!(got, Err(Error::InvalidField { field: "nome", .. })));
    }

    #[test]
    fn rejects_long_name() {
        let got = validate_name("nome", &"a".repeat(51));

        assert!(matches!(got, Err(Error::InvalidField { field: "nome", .. })));
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert!(validate_name("nome", "Ñoé").is_ok());
        assert!(validate_name("nome", &"ç".repeat(50)).is_ok());
    }

    #[test]
    fn rejects_blank_text() {
        assert!(validate_not_blank("descricao", " \t").is_err());
        assert_eq!(validate_not_blank("descricao", "Salário"), Ok(()));
    }
}
