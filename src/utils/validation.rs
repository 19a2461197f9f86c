use serde::Serialize;
use validator::{Validate, ValidationErrors};
use crate::errors::AppError;
use crate::models::employee::FIELD_PARAM;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate()
        .map_err(|err| AppError::Validation(field_errors(&err)))
}

/// Flattens validator output into `(field, message)` pairs. The field is the JSON
/// name recorded on the error, falling back to the struct field name.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut pairs: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| FieldError {
                field: err
                    .params
                    .get(FIELD_PARAM)
                    .and_then(|name| name.as_str())
                    .unwrap_or(field)
                    .to_string(),
                message: err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string()),
            })
        })
        .collect();

    pairs.sort_by(|a, b| a.field.cmp(&b.field));
    pairs
}
