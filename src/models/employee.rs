use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// Name of the parameter carrying the JSON field name on every validation error.
pub const FIELD_PARAM: &str = "field";

#[derive(sqlx::FromRow, Serialize, Deserialize, Validate, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_blank")]
    #[validate(custom = "validate_name")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_blank")]
    #[validate(custom = "validate_email")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_blank")]
    #[validate(custom = "validate_job_title")]
    pub job_title: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

impl Employee {
    pub fn new(name: &str, email: &str, job_title: &str, profile_picture: Option<&str>) -> Self {
        Employee {
            id: None,
            name: name.to_string(),
            email: email.to_string(),
            job_title: job_title.to_string(),
            profile_picture: profile_picture.map(str::to_string),
        }
    }
}

// `null` reaches validation as a blank value, same as an omitted field.
fn null_as_blank<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn field_error(field: &'static str, code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err.add_param(Cow::Borrowed(FIELD_PARAM), &field);
    err
}

fn require_not_blank(value: &str, field: &'static str, message: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(field_error(field, "required", message));
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    require_not_blank(name, "name", "Name is required")
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    require_not_blank(email, "email", "Email is required")?;
    if !validator::validate_email(email) {
        return Err(field_error("email", "email", "Email should be valid"));
    }
    Ok(())
}

fn validate_job_title(job_title: &str) -> Result<(), ValidationError> {
    require_not_blank(job_title, "jobTitle", "Job title is required")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages_for(employee: &Employee, field: &str) -> Vec<String> {
        match employee.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => errors
                .field_errors()
                .get(field)
                .map(|errs| {
                    errs.iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect()
                })
                .unwrap_or_default(),
        }
    }

    #[test]
    fn valid_employee_passes() {
        let employee = Employee::new("Ann Lee", "ann@x.com", "Engineer", None);
        assert!(employee.validate().is_ok());
    }

    #[test]
    fn whitespace_name_is_blank() {
        let employee = Employee::new("   ", "ann@x.com", "Engineer", None);
        assert_eq!(messages_for(&employee, "name"), vec!["Name is required"]);
    }

    #[test]
    fn malformed_email_is_rejected() {
        let employee = Employee::new("Ann Lee", "not-an-email", "Engineer", None);
        assert_eq!(messages_for(&employee, "email"), vec!["Email should be valid"]);
    }

    #[test]
    fn blank_email_only_reports_required() {
        let employee = Employee::new("Ann Lee", "", "Engineer", None);
        assert_eq!(messages_for(&employee, "email"), vec!["Email is required"]);
    }

    #[test]
    fn missing_fields_deserialize_as_blank() {
        let employee: Employee = serde_json::from_str(r#"{"email":"ann@x.com"}"#).unwrap();
        assert_eq!(employee.id, None);
        assert_eq!(messages_for(&employee, "name"), vec!["Name is required"]);
        assert_eq!(messages_for(&employee, "job_title"), vec!["Job title is required"]);
    }

    #[test]
    fn null_required_fields_deserialize_as_blank() {
        let employee: Employee =
            serde_json::from_str(r#"{"name":null,"email":null,"jobTitle":null}"#).unwrap();
        assert_eq!(employee.name, "");
        assert_eq!(messages_for(&employee, "name"), vec!["Name is required"]);
        assert_eq!(messages_for(&employee, "email"), vec!["Email is required"]);
        assert_eq!(messages_for(&employee, "job_title"), vec!["Job title is required"]);
    }

    #[test]
    fn errors_carry_json_field_name() {
        let employee = Employee::new("Ann Lee", "ann@x.com", "", None);
        let errors = employee.validate().unwrap_err();
        let field_errors = errors.field_errors();
        let param = field_errors["job_title"][0].params.get(FIELD_PARAM).cloned();
        assert_eq!(param, Some(serde_json::json!("jobTitle")));
    }

    #[test]
    fn serializes_with_camel_case_and_nulls() {
        let mut employee = Employee::new("Ann Lee", "ann@x.com", "Engineer", None);
        employee.id = Some(7);
        let value = serde_json::to_value(&employee).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": 7,
                "name": "Ann Lee",
                "email": "ann@x.com",
                "jobTitle": "Engineer",
                "profilePicture": null
            })
        );
    }
}
