//! Request field extraction shared by the JSON handlers.
//!
//! Clients send loosely typed bodies: any field may be absent, and numeric
//! fields may arrive as numbers or strings.

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use coinhall_core::{Coins, Email};

use crate::services::ServiceError;

/// JSON body extractor that never rejects.
///
/// A missing content type, malformed JSON or a wrongly typed field yields
/// `T::default()`, so the handler sees every field as absent and answers
/// with the usual `{"success": false}` envelope.
#[derive(Debug, Default)]
pub struct LenientJson<T>(pub T);

impl<T, S> FromRequest<S> for LenientJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(%rejection, "Unusable request body");
                Ok(Self(T::default()))
            }
        }
    }
}

/// Require the `email` field.
pub fn email(value: Option<&str>) -> Result<Email, ServiceError> {
    let raw = value.ok_or(ServiceError::MissingField("email"))?;
    Ok(Email::parse(raw)?)
}

/// Require a non-empty text field.
pub fn text<'a>(field: &'static str, value: Option<&'a str>) -> Result<&'a str, ServiceError> {
    value
        .filter(|s| !s.is_empty())
        .ok_or(ServiceError::MissingField(field))
}

/// Read an integer from a JSON number or string.
///
/// Strings take their leading integer (`"25abc"` is 25, `" -7"` is -7) and
/// are rejected when no digit leads. Fractional numbers truncate toward zero.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                // Saturating cast; truncates toward zero.
                .map(|f| f as i64)
        }),
        Value::String(s) => leading_integer(s),
        _ => None,
    }
}

/// Read a coin amount, see [`integer`].
#[must_use]
pub fn coins(value: &Value) -> Option<Coins> {
    integer(value).map(Coins::new)
}

fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = s.strip_prefix('-').map_or_else(
        || (false, s.strip_prefix('+').unwrap_or(s)),
        |rest| (true, rest),
    );
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let (digits, _) = rest.split_at(digits_end);
    if digits.is_empty() {
        return None;
    }

    let magnitude: i128 = digits.parse().ok()?;
    i64::try_from(if negative { -magnitude } else { magnitude }).ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_integer_from_numbers() {
        assert_eq!(integer(&json!(50)), Some(50));
        assert_eq!(integer(&json!(-50)), Some(-50));
        assert_eq!(integer(&json!(12.9)), Some(12));
        assert_eq!(integer(&json!(-12.9)), Some(-12));
    }

    #[test]
    fn test_integer_from_strings() {
        assert_eq!(integer(&json!("25")), Some(25));
        assert_eq!(integer(&json!("25abc")), Some(25));
        assert_eq!(integer(&json!("  -7")), Some(-7));
        assert_eq!(integer(&json!("+3")), Some(3));
        assert_eq!(integer(&json!("3.75")), Some(3));
    }

    #[test]
    fn test_integer_rejects_non_numeric() {
        assert_eq!(integer(&json!("abc")), None);
        assert_eq!(integer(&json!("")), None);
        assert_eq!(integer(&json!("-")), None);
        assert_eq!(integer(&json!(null)), None);
        assert_eq!(integer(&json!(true)), None);
        assert_eq!(integer(&json!([1])), None);
    }

    #[test]
    fn test_integer_rejects_overflowing_string() {
        assert_eq!(integer(&json!("99999999999999999999999")), None);
        assert_eq!(integer(&json!("9223372036854775808")), None);
    }

    #[test]
    fn test_integer_string_bounds() {
        assert_eq!(integer(&json!("-9223372036854775808")), Some(i64::MIN));
        assert_eq!(integer(&json!("9223372036854775807")), Some(i64::MAX));
    }

    #[test]
    fn test_email_presence() {
        assert_eq!(
            email(None),
            Err(ServiceError::MissingField("email"))
        );
        assert!(email(Some("")).is_err());
        assert_eq!(email(Some("a@b.c")).unwrap().as_str(), "a@b.c");
    }

    #[test]
    fn test_text_presence() {
        assert_eq!(text("message", Some("hi")), Ok("hi"));
        assert_eq!(
            text("message", Some("")),
            Err(ServiceError::MissingField("message"))
        );
        assert!(text("answer", None).is_err());
    }
}
