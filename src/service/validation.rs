//! Request validation against a declarative payload schema.

use crate::error::AppError;
use serde_json::{Number, Value};

/// JSON type a field must carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    String,
    /// Whole number that fits a 32-bit signed integer (`100` and `100.0` both pass).
    Integer,
}

#[derive(Clone, Copy, Debug)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldRule {
    pub const fn string(name: &'static str) -> Self {
        FieldRule { name, kind: FieldKind::String }
    }

    pub const fn integer(name: &'static str) -> Self {
        FieldRule { name, kind: FieldKind::Integer }
    }
}

/// Fixed set of required fields. Fields not listed are ignored.
#[derive(Clone, Copy, Debug)]
pub struct Schema {
    pub fields: &'static [FieldRule],
}

pub struct RequestValidator;

impl RequestValidator {
    /// Check every rule in schema order; at most one error per field.
    pub fn check(body: &Value, schema: &Schema) -> Result<(), Vec<String>> {
        let obj = match body {
            Value::Object(m) => m,
            _ => return Err(vec!["body must be a JSON object".to_string()]),
        };
        let errors: Vec<String> = schema
            .fields
            .iter()
            .filter_map(|rule| match obj.get(rule.name) {
                None => Some(format!("{} is required", rule.name)),
                Some(v) => check_kind(rule, v),
            })
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn validate(body: &Value, schema: &Schema) -> Result<(), AppError> {
        Self::check(body, schema).map_err(AppError::Validation)
    }
}

fn check_kind(rule: &FieldRule, v: &Value) -> Option<String> {
    match rule.kind {
        FieldKind::String if !v.is_string() => Some(format!("{} must be a string", rule.name)),
        FieldKind::Integer => match v {
            Value::Number(n) if whole_i32(n).is_some() => None,
            _ => Some(format!("{} must be an integer", rule.name)),
        },
        _ => None,
    }
}

/// Integral value of a JSON number if it has no fractional part and fits `i32`.
pub fn whole_i32(n: &Number) -> Option<i32> {
    if let Some(i) = n.as_i64() {
        return i32::try_from(i).ok();
    }
    let f = n.as_f64()?;
    if f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 {
        Some(f as i32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SCHEMA: Schema = Schema {
        fields: &[
            FieldRule::string("isbn"),
            FieldRule::string("title"),
            FieldRule::integer("pages"),
        ],
    };

    #[test]
    fn accepts_complete_payload_and_ignores_extra_fields() {
        let body = json!({"isbn": "1", "title": "t", "pages": 10, "extra": [1, 2]});
        assert!(RequestValidator::check(&body, &SCHEMA).is_ok());
    }

    #[test]
    fn reports_errors_in_schema_order() {
        let body = json!({"title": 5, "pages": "many"});
        let errors = RequestValidator::check(&body, &SCHEMA).unwrap_err();
        assert_eq!(
            errors,
            vec![
                "isbn is required".to_string(),
                "title must be a string".to_string(),
                "pages must be an integer".to_string(),
            ]
        );
    }

    #[test]
    fn null_is_a_type_error() {
        let body = json!({"isbn": null, "title": "t", "pages": 1});
        let errors = RequestValidator::check(&body, &SCHEMA).unwrap_err();
        assert_eq!(errors, vec!["isbn must be a string".to_string()]);
    }

    #[test]
    fn integer_fields_reject_fractions_and_overflow() {
        for pages in [json!(1.5), json!(4_294_967_296i64), json!(true)] {
            let body = json!({"isbn": "1", "title": "t", "pages": pages.clone()});
            assert!(RequestValidator::check(&body, &SCHEMA).is_err(), "{pages} should fail");
        }
        let body = json!({"isbn": "1", "title": "t", "pages": 100.0});
        assert!(RequestValidator::check(&body, &SCHEMA).is_ok());
    }

    #[test]
    fn non_object_body_is_rejected() {
        let errors = RequestValidator::check(&json!([1, 2]), &SCHEMA).unwrap_err();
        assert_eq!(errors, vec!["body must be a JSON object".to_string()]);
    }

    #[test]
    fn validate_wraps_errors() {
        let err = RequestValidator::validate(&json!({}), &SCHEMA).unwrap_err();
        match err {
            AppError::Validation(errors) => assert_eq!(errors.len(), 3),
            other => panic!("unexpected error: {other}"),
        }
    }
}
