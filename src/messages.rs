//! User facing messages and the locale they are rendered in.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header::ACCEPT_LANGUAGE, request::Parts},
};

/// The language used for messages shown to the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    /// Brazilian Portuguese, used when the client does not ask for anything else.
    #[default]
    BrazilianPortuguese,
    /// English.
    English,
}

/// Identifies a user facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MessageKey {
    ResourceNotFound,
    InvalidMessage,
    InvalidField,
    PersonMissingOrInactive,
    OperationNotAllowed,
    InternalError,
}

impl Locale {
    /// Pick a locale from the value of an `Accept-Language` header.
    ///
    /// Only the first language range is considered. Anything that is not
    /// English falls back to the default locale.
    pub fn from_accept_language(header_value: &str) -> Self {
        let first_range = header_value
            .split(',')
            .next()
            .and_then(|range| range.split(';').next())
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if first_range == "en" || first_range.starts_with("en-") {
            Locale::English
        } else {
            Locale::default()
        }
    }

    /// Look up the text for `key` in this locale.
    pub(crate) fn message(self, key: MessageKey) -> &'static str {
        match (self, key) {
            (Locale::BrazilianPortuguese, MessageKey::ResourceNotFound) => "Recurso não encontrado",
            (Locale::BrazilianPortuguese, MessageKey::InvalidMessage) => "Mensagem inválida",
            (Locale::BrazilianPortuguese, MessageKey::InvalidField) => "Campo inválido",
            (Locale::BrazilianPortuguese, MessageKey::PersonMissingOrInactive) => {
                "Pessoa inexistente ou inativa"
            }
            (Locale::BrazilianPortuguese, MessageKey::OperationNotAllowed) => {
                "Operação não permitida"
            }
            (Locale::BrazilianPortuguese, MessageKey::InternalError) => "Erro interno do servidor",
            (Locale::English, MessageKey::ResourceNotFound) => "Resource not found",
            (Locale::English, MessageKey::InvalidMessage) => "Invalid message",
            (Locale::English, MessageKey::InvalidField) => "Invalid field",
            (Locale::English, MessageKey::PersonMissingOrInactive) => {
                "Person does not exist or is inactive"
            }
            (Locale::English, MessageKey::OperationNotAllowed) => "Operation not allowed",
            (Locale::English, MessageKey::InternalError) => "Internal server error",
        }
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let locale = parts
            .headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .map(Locale::from_accept_language)
            .unwrap_or_default();

        Ok(locale)
    }
}

#[cfg(test)]
mod tests {
    use super::{Locale, MessageKey};

    #[test]
    fn defaults_to_brazilian_portuguese() {
        assert_eq!(Locale::from_accept_language(""), Locale::BrazilianPortuguese);
        assert_eq!(
            Locale::from_accept_language("pt-BR,pt;q=0.9"),
            Locale::BrazilianPortuguese
        );
        assert_eq!(Locale::from_accept_language("de"), Locale::BrazilianPortuguese);
    }

    #[test]
    fn picks_english_from_first_range() {
        assert_eq!(Locale::from_accept_language("en-US,en;q=0.5"), Locale::English);
        assert_eq!(Locale::from_accept_language("EN"), Locale::English);
        assert_eq!(
            Locale::from_accept_language("pt-BR, en;q=0.8"),
            Locale::BrazilianPortuguese
        );
    }

    #[test]
    fn english_is_not_a_prefix_match() {
        assert_eq!(Locale::from_accept_language("eng"), Locale::BrazilianPortuguese);
    }

    #[test]
    fn looks_up_person_message() {
        assert_eq!(
            Locale::BrazilianPortuguese.message(MessageKey::PersonMissingOrInactive),
            "Pessoa inexistente ou inativa"
        );
    }
}
