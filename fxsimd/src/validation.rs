//! Field-level validation for order submissions.
//!
//! Both transports accept the same JSON body (`{"stocks": "...",
//! "quantity": ...}`) and report malformed submissions as a list of
//! per-field error records: `{message, input, localization, type}`,
//! omitting unset optional fields. The HTTP layer wraps the list in a
//! 400 response; the WebSocket layer folds it into an error frame on the
//! same connection.

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{json, Value};
use std::str::FromStr;

/// One validation error record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestError {
    /// Optional numeric error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// Human-readable reason
    pub message: String,
    /// The offending input value, when one exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
    /// Path of field names locating the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localization: Option<Vec<Value>>,
    /// Machine-readable error tag
    #[serde(rename = "type")]
    pub kind: String,
}

impl RequestError {
    fn new(message: &str, input: Option<Value>, path: Vec<Value>, kind: &str) -> Self {
        Self {
            code: None,
            message: message.to_string(),
            input,
            localization: Some(path),
            kind: kind.to_string(),
        }
    }

    fn for_field(message: &str, input: Option<Value>, field: &str, kind: &str) -> Self {
        Self::new(message, input, vec![json!("body"), json!(field)], kind)
    }
}

/// A submission that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    /// Currency pair name
    pub stocks: String,
    /// Order size, strictly positive
    pub quantity: Decimal,
}

/// Parse and validate a raw request body.
///
/// A body that is not valid JSON yields a single `json_invalid` record
/// locating the decode failure by column.
pub fn parse_order(raw: &[u8]) -> Result<OrderDraft, Vec<RequestError>> {
    let body: Value = serde_json::from_slice(raw).map_err(|e| {
        vec![RequestError::new(
            "JSON decode error",
            Some(json!({})),
            vec![json!("body"), json!(e.column())],
            "json_invalid",
        )]
    })?;
    validate_order(&body)
}

/// Validate an already-decoded JSON body.
///
/// Collects one error per invalid field rather than stopping at the
/// first problem.
pub fn validate_order(body: &Value) -> Result<OrderDraft, Vec<RequestError>> {
    let Some(fields) = body.as_object() else {
        return Err(vec![RequestError::new(
            "Input should be a valid object",
            Some(body.clone()),
            vec![json!("body")],
            "model_type",
        )]);
    };

    let mut errors = Vec::new();

    let stocks = match fields.get("stocks") {
        None => {
            errors.push(RequestError::for_field(
                "Field required",
                Some(body.clone()),
                "stocks",
                "missing",
            ));
            None
        }
        Some(Value::String(s)) if s.trim().is_empty() => {
            errors.push(RequestError::for_field(
                "String should have at least 1 character",
                Some(json!(s)),
                "stocks",
                "string_too_short",
            ));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Null) => {
            errors.push(RequestError::for_field(
                "Input should be a valid string",
                None,
                "stocks",
                "string_type",
            ));
            None
        }
        Some(other) => {
            errors.push(RequestError::for_field(
                "Input should be a valid string",
                Some(other.clone()),
                "stocks",
                "string_type",
            ));
            None
        }
    };

    let quantity = match fields.get("quantity") {
        None => {
            errors.push(RequestError::for_field(
                "Field required",
                Some(body.clone()),
                "quantity",
                "missing",
            ));
            None
        }
        Some(Value::Null) => {
            errors.push(RequestError::for_field(
                "Input should be a valid number",
                None,
                "quantity",
                "float_type",
            ));
            None
        }
        Some(value @ Value::Number(n)) => match Decimal::from_str(&n.to_string()) {
            Ok(quantity) => check_positive(quantity, value, &mut errors),
            Err(_) => {
                errors.push(RequestError::for_field(
                    "Input should be a valid number",
                    Some(value.clone()),
                    "quantity",
                    "float_parsing",
                ));
                None
            }
        },
        // Numeric strings are coerced, everything else is rejected
        Some(value @ Value::String(s)) => match Decimal::from_str(s.trim()) {
            Ok(quantity) => check_positive(quantity, value, &mut errors),
            Err(_) => {
                errors.push(RequestError::for_field(
                    "Input should be a valid number, unable to parse string as a number",
                    Some(value.clone()),
                    "quantity",
                    "float_parsing",
                ));
                None
            }
        },
        Some(other) => {
            errors.push(RequestError::for_field(
                "Input should be a valid number",
                Some(other.clone()),
                "quantity",
                "float_type",
            ));
            None
        }
    };

    match (stocks, quantity) {
        (Some(stocks), Some(quantity)) if errors.is_empty() => {
            Ok(OrderDraft { stocks, quantity })
        }
        _ => Err(errors),
    }
}

fn check_positive(
    quantity: Decimal,
    raw: &Value,
    errors: &mut Vec<RequestError>,
) -> Option<Decimal> {
    if quantity <= Decimal::ZERO {
        errors.push(RequestError::for_field(
            "Input should be greater than 0",
            Some(raw.clone()),
            "quantity",
            "greater_than",
        ));
        None
    } else {
        Some(quantity)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn kinds_for(body: Value) -> Vec<(String, Vec<Value>)> {
        validate_order(&body)
            .unwrap_err()
            .into_iter()
            .map(|e| (e.kind, e.localization.unwrap()))
            .collect()
    }

    #[test]
    fn test_valid_order() {
        let draft = validate_order(&json!({"stocks": "EURUSD", "quantity": 100})).unwrap();
        assert_eq!(draft.stocks, "EURUSD");
        assert_eq!(draft.quantity, dec!(100));
    }

    #[test]
    fn test_valid_fractional_quantity() {
        let draft = validate_order(&json!({"stocks": "USDPLN", "quantity": 12.52})).unwrap();
        assert_eq!(draft.quantity, dec!(12.52));
    }

    #[test]
    fn test_empty_body_reports_both_fields_missing() {
        let kinds = kinds_for(json!({}));
        assert_eq!(
            kinds,
            vec![
                ("missing".to_string(), vec![json!("body"), json!("stocks")]),
                ("missing".to_string(), vec![json!("body"), json!("quantity")]),
            ]
        );
    }

    #[test]
    fn test_missing_error_carries_whole_body_as_input() {
        let body = json!({"any": "other"});
        let errors = validate_order(&body).unwrap_err();
        assert_eq!(errors.len(), 2);
        for error in errors {
            assert_eq!(error.message, "Field required");
            assert_eq!(error.input, Some(body.clone()));
        }
    }

    #[test]
    fn test_null_fields() {
        let errors = validate_order(&json!({"stocks": null, "quantity": null})).unwrap_err();

        assert_eq!(errors[0].kind, "string_type");
        assert_eq!(errors[0].message, "Input should be a valid string");
        assert!(errors[0].input.is_none());

        assert_eq!(errors[1].kind, "float_type");
        assert_eq!(errors[1].message, "Input should be a valid number");
        assert!(errors[1].input.is_none());
    }

    #[test]
    fn test_stocks_wrong_type() {
        let errors = validate_order(&json!({"stocks": 123, "quantity": 12.42})).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, "string_type");
        assert_eq!(errors[0].input, Some(json!(123)));
    }

    #[test]
    fn test_stocks_empty_string() {
        let errors = validate_order(&json!({"stocks": "", "quantity": 1})).unwrap_err();
        assert_eq!(errors[0].kind, "string_too_short");
    }

    #[test]
    fn test_quantity_unparseable_string() {
        let errors = validate_order(&json!({"stocks": "EURPLN", "quantity": "test"})).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, "float_parsing");
        assert_eq!(
            errors[0].message,
            "Input should be a valid number, unable to parse string as a number"
        );
        assert_eq!(errors[0].input, Some(json!("test")));
    }

    #[test]
    fn test_quantity_numeric_string_is_coerced() {
        let draft = validate_order(&json!({"stocks": "EURUSD", "quantity": "12.5"})).unwrap();
        assert_eq!(draft.quantity, dec!(12.5));
    }

    #[test]
    fn test_quantity_must_be_greater_than_zero() {
        for quantity in [json!(0), json!(0.000), json!(-100), json!(-0.242)] {
            let errors =
                validate_order(&json!({"stocks": "EURUSD", "quantity": quantity})).unwrap_err();
            assert_eq!(errors.len(), 1, "quantity {} must be rejected", quantity);
            assert_eq!(errors[0].kind, "greater_than");
            assert_eq!(errors[0].message, "Input should be greater than 0");
            assert_eq!(errors[0].input, Some(quantity));
        }
    }

    #[test]
    fn test_non_object_body() {
        let errors = validate_order(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, "model_type");
    }

    #[test]
    fn test_invalid_json_locates_column() {
        let errors = parse_order(br#"{"stocks": "EURPLN" "quantity": 10}"#).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, "json_invalid");
        assert_eq!(errors[0].message, "JSON decode error");
        let path = errors[0].localization.as_ref().unwrap();
        assert_eq!(path[0], json!("body"));
        assert!(path[1].is_number());
    }

    #[test]
    fn test_serialized_shape_omits_unset_fields() {
        let errors = validate_order(&json!({"stocks": null, "quantity": 1})).unwrap_err();
        let value = serde_json::to_value(&errors[0]).unwrap();
        let object = value.as_object().unwrap();

        assert!(!object.contains_key("code"));
        assert!(!object.contains_key("input"));
        assert_eq!(object["type"], json!("string_type"));
        assert_eq!(object["localization"], json!(["body", "stocks"]));
    }
}
