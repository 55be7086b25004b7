//! Declarative request validation.
//!
//! A [`Schema`] is an ordered list of [`FieldRule`]s applied to a JSON object
//! before it is deserialized into a DTO. For every field the first failing
//! check wins; collection then continues with the next field, so a response
//! carries at most one [`Violation`] per field, in declaration order.
//!
//! ```ignore
//! let schema = Schema::new()
//!     .field(FieldRule::string("email").required().lowercase().email())
//!     .field(FieldRule::string("password").required().min_length(8));
//!
//! let mut body = serde_json::json!({ "email": "JOE@wolox.com.ar" });
//! let violations = schema.check(body.as_object_mut().unwrap()).unwrap_err();
//! assert_eq!(violations[0].message, "\"password\" is required");
//! ```
//!
//! Strings are normalised in place (e.g. lowercased) and integer fields accept
//! numeric strings, which is what query strings deliver.

use regex::Regex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidateEmail;

use crate::errors::AppError;

#[derive(Debug, Error)]
pub enum ValidationRuleError {
    #[error("invalid `{name}` pattern: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },
}

/// One failed check, rendered inside the `message` array of a 400 response.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Violation {
    /// Human-readable description, e.g. `"password" is required`
    pub message: String,
    /// Path of the offending field
    pub path: Vec<String>,
    /// Violated rule, e.g. `string.min`
    #[serde(rename = "type")]
    pub kind: String,
    /// Rule parameters and the offending value
    #[schema(value_type = Object)]
    pub context: Value,
}

impl Violation {
    fn new(field: &str, kind: &str, message: String, context: Value) -> Self {
        Self {
            message,
            path: vec![field.to_string()],
            kind: kind.to_string(),
            context,
        }
    }

    pub fn required(field: &str) -> Self {
        Self::new(
            field,
            "any.required",
            format!("\"{field}\" is required"),
            json!({ "key": field, "label": field }),
        )
    }

    pub fn not_a_string(field: &str, value: &Value) -> Self {
        Self::new(
            field,
            "string.base",
            format!("\"{field}\" must be a string"),
            json!({ "key": field, "label": field, "value": value }),
        )
    }

    pub fn not_an_integer(field: &str, value: &Value) -> Self {
        Self::new(
            field,
            "number.base",
            format!("\"{field}\" must be an integer"),
            json!({ "key": field, "label": field, "value": value }),
        )
    }

    pub fn empty(field: &str) -> Self {
        Self::new(
            field,
            "any.empty",
            format!("\"{field}\" is not allowed to be empty"),
            json!({ "key": field, "label": field, "value": "" }),
        )
    }

    pub fn invalid_email(field: &str, value: &str) -> Self {
        Self::new(
            field,
            "string.email",
            format!("\"{field}\" must be a valid email"),
            json!({ "key": field, "label": field, "value": value }),
        )
    }

    pub fn pattern_mismatch(field: &str, value: &str, pattern_name: &str) -> Self {
        Self::new(
            field,
            "string.regex.name",
            format!("\"{field}\" with value \"{value}\" fails to match the {pattern_name} pattern"),
            json!({ "key": field, "label": field, "value": value, "name": pattern_name }),
        )
    }

    pub fn too_short(field: &str, value: &str, limit: usize) -> Self {
        Self::new(
            field,
            "string.min",
            format!("\"{field}\" length must be at least {limit} characters long"),
            json!({ "key": field, "label": field, "value": value, "limit": limit }),
        )
    }

    pub fn below_min(field: &str, value: i64, limit: i64) -> Self {
        Self::new(
            field,
            "number.min",
            format!("\"{field}\" must be larger than or equal to {limit}"),
            json!({ "key": field, "label": field, "value": value, "limit": limit }),
        )
    }

    pub fn above_max(field: &str, value: i64, limit: i64) -> Self {
        Self::new(
            field,
            "number.max",
            format!("\"{field}\" must be less than or equal to {limit}"),
            json!({ "key": field, "label": field, "value": value, "limit": limit }),
        )
    }

    /// The body could not be read as JSON at all.
    pub fn unreadable_body(detail: &str) -> Self {
        Self {
            message: format!("Invalid request body: {detail}"),
            path: Vec::new(),
            kind: "any.invalid".to_string(),
            context: json!({ "key": "value", "label": "value" }),
        }
    }

    pub fn invalid_body(detail: &str) -> Self {
        Self {
            message: format!("\"value\" must be an object ({detail})"),
            path: Vec::new(),
            kind: "object.base".to_string(),
            context: json!({ "key": "value", "label": "value" }),
        }
    }
}

/// A display name plus one or more regexes that must all match.
///
/// Several regexes stand in for lookaheads, which the `regex` crate does not
/// support.
#[derive(Debug, Clone)]
pub struct NamedPattern {
    name: String,
    regexes: Vec<Regex>,
}

impl NamedPattern {
    pub fn new(name: impl Into<String>, patterns: &[&str]) -> Result<Self, ValidationRuleError> {
        let name = name.into();
        let regexes = patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| ValidationRuleError::InvalidPattern {
                name: name.clone(),
                source,
            })?;

        Ok(Self { name, regexes })
    }

    /// Letters and digits only, with at least one of each.
    pub fn alphanumeric() -> Self {
        Self {
            name: "Alphanumeric".to_string(),
            regexes: vec![
                Regex::new(r"^[A-Za-z0-9]+$").expect("static regex"),
                Regex::new(r"[A-Za-z]").expect("static regex"),
                Regex::new(r"[0-9]").expect("static regex"),
            ],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regexes.iter().all(|re| re.is_match(value))
    }
}

/// Compiled, startup-configured rules shared by all request schemas.
#[derive(Debug, Clone)]
pub struct ValidationRules {
    pub email_domain: NamedPattern,
    pub password: NamedPattern,
    pub password_min_length: usize,
}

impl ValidationRules {
    pub const DEFAULT_PASSWORD_MIN_LENGTH: usize = 8;

    pub fn new(email_domain_pattern: &str, email_pattern_name: &str) -> Result<Self, ValidationRuleError> {
        Ok(Self {
            email_domain: NamedPattern::new(email_pattern_name, &[email_domain_pattern])?,
            password: NamedPattern::alphanumeric(),
            password_min_length: Self::DEFAULT_PASSWORD_MIN_LENGTH,
        })
    }

    /// `email` as every endpoint expects it: lowercased, syntactically valid,
    /// and on the organisation's domain.
    pub fn email_field(&self) -> FieldRule {
        FieldRule::string("email")
            .required()
            .lowercase()
            .email()
            .pattern(self.email_domain.clone())
    }

    pub fn password_field(&self) -> FieldRule {
        FieldRule::string("password")
            .required()
            .min_length(self.password_min_length)
            .pattern(self.password.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
}

#[derive(Debug, Clone)]
pub enum Check {
    Email,
    Pattern(NamedPattern),
    MinLength(usize),
    Min(i64),
    Max(i64),
}

#[derive(Debug, Clone)]
pub struct FieldRule {
    name: String,
    kind: FieldKind,
    required: bool,
    lowercase: bool,
    checks: Vec<Check>,
}

impl FieldRule {
    fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            required: false,
            lowercase: false,
            checks: Vec::new(),
        }
    }

    pub fn string(name: &str) -> Self {
        Self::new(name, FieldKind::String)
    }

    pub fn integer(name: &str) -> Self {
        Self::new(name, FieldKind::Integer)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn lowercase(mut self) -> Self {
        self.lowercase = true;
        self
    }

    pub fn email(mut self) -> Self {
        self.checks.push(Check::Email);
        self
    }

    pub fn pattern(mut self, pattern: NamedPattern) -> Self {
        self.checks.push(Check::Pattern(pattern));
        self
    }

    pub fn min_length(mut self, limit: usize) -> Self {
        self.checks.push(Check::MinLength(limit));
        self
    }

    pub fn min(mut self, limit: i64) -> Self {
        self.checks.push(Check::Min(limit));
        self
    }

    pub fn max(mut self, limit: i64) -> Self {
        self.checks.push(Check::Max(limit));
        self
    }

    /// Checks one field of `input`, normalising it in place.
    fn apply(&self, input: &mut Map<String, Value>) -> Option<Violation> {
        // Empty query values count as absent.
        if self.kind == FieldKind::Integer
            && matches!(input.get(&self.name), Some(Value::String(s)) if s.is_empty())
        {
            input.remove(&self.name);
        }

        let Some(value) = input.get_mut(&self.name) else {
            return self.required.then(|| Violation::required(&self.name));
        };

        match self.kind {
            FieldKind::String => {
                let Value::String(s) = value else {
                    return Some(Violation::not_a_string(&self.name, value));
                };
                if self.lowercase {
                    *s = s.to_lowercase();
                }
                let s = s.as_str();
                if s.is_empty() {
                    return Some(Violation::empty(&self.name));
                }
                self.checks.iter().find_map(|check| self.check_str(check, s))
            }
            FieldKind::Integer => {
                let parsed = match value {
                    Value::Number(n) => n.as_i64(),
                    Value::String(s) => s.trim().parse::<i64>().ok(),
                    _ => None,
                };
                let Some(n) = parsed else {
                    return Some(Violation::not_an_integer(&self.name, value));
                };
                *value = Value::from(n);
                self.checks.iter().find_map(|check| self.check_int(check, n))
            }
        }
    }

    fn check_str(&self, check: &Check, value: &str) -> Option<Violation> {
        match check {
            Check::Email if !value.validate_email() => {
                Some(Violation::invalid_email(&self.name, value))
            }
            Check::Pattern(pattern) if !pattern.is_match(value) => Some(
                Violation::pattern_mismatch(&self.name, value, pattern.name()),
            ),
            Check::MinLength(limit) if value.chars().count() < *limit => {
                Some(Violation::too_short(&self.name, value, *limit))
            }
            _ => None,
        }
    }

    fn check_int(&self, check: &Check, value: i64) -> Option<Violation> {
        match check {
            Check::Min(limit) if value < *limit => {
                Some(Violation::below_min(&self.name, value, *limit))
            }
            Check::Max(limit) if value > *limit => {
                Some(Violation::above_max(&self.name, value, *limit))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<FieldRule>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, rule: FieldRule) -> Self {
        self.fields.push(rule);
        self
    }

    /// Runs every field rule; keys the schema does not name are left alone.
    pub fn check(&self, input: &mut Map<String, Value>) -> Result<(), Vec<Violation>> {
        let violations: Vec<Violation> = self
            .fields
            .iter()
            .filter_map(|rule| rule.apply(input))
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }

    /// Validates `value` and deserializes the normalised result into `T`.
    pub fn parse<T: DeserializeOwned>(&self, value: Value) -> Result<T, AppError> {
        let mut object = match value {
            Value::Object(map) => map,
            other => {
                let detail = match other {
                    Value::Null => "got null",
                    Value::Array(_) => "got an array",
                    _ => "got a scalar",
                };
                return Err(AppError::validation(vec![Violation::invalid_body(detail)]));
            }
        };

        self.check(&mut object).map_err(AppError::validation)?;

        serde_json::from_value(Value::Object(object)).map_err(AppError::bad_request)
    }
}

/// Implemented by every request DTO that goes through the pipeline.
pub trait RequestSchema: DeserializeOwned {
    fn schema(rules: &ValidationRules) -> Schema;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> ValidationRules {
        ValidationRules::new(r"@wolox\.com\.ar$", "Wolox e-mail").unwrap()
    }

    fn user_schema() -> Schema {
        let rules = rules();
        Schema::new()
            .field(FieldRule::string("firstName").required())
            .field(FieldRule::string("lastName").required())
            .field(rules.email_field())
            .field(rules.password_field())
    }

    fn violations(schema: &Schema, mut body: Value) -> Vec<Violation> {
        schema
            .check(body.as_object_mut().unwrap())
            .err()
            .unwrap_or_default()
    }

    #[test]
    fn test_valid_payload_passes() {
        let body = json!({
            "firstName": "Joe",
            "lastName": "Doe",
            "email": "joe.doe@wolox.com.ar",
            "password": "password1234"
        });
        assert!(violations(&user_schema(), body).is_empty());
    }

    #[test]
    fn test_empty_string_is_rejected() {
        let body = json!({
            "firstName": "",
            "lastName": "Doe",
            "email": "joe.doe@wolox.com.ar",
            "password": "password1234"
        });
        let found = violations(&user_schema(), body);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].message, "\"firstName\" is not allowed to be empty");
        assert_eq!(found[0].kind, "any.empty");
    }

    #[test]
    fn test_missing_password_is_required() {
        let body = json!({
            "firstName": "firstName",
            "lastName": "lastName",
            "username": "username",
            "email": "user@wolox.com.ar"
        });
        let found = violations(&user_schema(), body);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].message, "\"password\" is required");
        assert_eq!(found[0].path, vec!["password".to_string()]);
    }

    #[test]
    fn test_invalid_email_syntax_stops_before_domain_check() {
        let body = json!({
            "firstName": "firstName",
            "lastName": "lastName",
            "password": "password123",
            "email": "email"
        });
        let found = violations(&user_schema(), body);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].message, "\"email\" must be a valid email");
    }

    #[test]
    fn test_foreign_domain_fails_named_pattern() {
        let body = json!({
            "firstName": "firstName",
            "lastName": "lastName",
            "password": "password123",
            "email": "email@other.com.ar"
        });
        let found = violations(&user_schema(), body);
        assert_eq!(
            found[0].message,
            "\"email\" with value \"email@other.com.ar\" fails to match the Wolox e-mail pattern"
        );
        assert_eq!(found[0].context["value"], "email@other.com.ar");
    }

    #[test]
    fn test_letters_only_password_fails_alphanumeric() {
        let body = json!({
            "firstName": "firstName",
            "lastName": "lastName",
            "password": "password",
            "email": "email@wolox.com.ar"
        });
        let found = violations(&user_schema(), body);
        assert_eq!(
            found[0].message,
            "\"password\" with value \"password\" fails to match the Alphanumeric pattern"
        );
    }

    #[test]
    fn test_short_password_reports_length_only() {
        let body = json!({
            "firstName": "firstName",
            "lastName": "lastName",
            "password": "123abc",
            "email": "email@wolox.com.ar"
        });
        let found = violations(&user_schema(), body);
        assert_eq!(found.len(), 1);
        assert_eq!(
            found[0].message,
            "\"password\" length must be at least 8 characters long"
        );
    }

    #[test]
    fn test_one_violation_per_field_in_declaration_order() {
        let body = json!({ "password": "ab", "email": "nope" });
        let found = violations(&user_schema(), body);
        let paths: Vec<&str> = found.iter().map(|v| v.path[0].as_str()).collect();
        assert_eq!(paths, vec!["firstName", "lastName", "email", "password"]);
    }

    #[test]
    fn test_non_string_value_is_rejected() {
        let body = json!({
            "firstName": 42,
            "lastName": "Doe",
            "email": "joe@wolox.com.ar",
            "password": "password1234"
        });
        let found = violations(&user_schema(), body);
        assert_eq!(found[0].message, "\"firstName\" must be a string");
    }

    #[test]
    fn test_email_is_lowercased_in_place() {
        let schema = Schema::new().field(rules().email_field());
        let mut body = json!({ "email": "Joe.Doe@WOLOX.com.ar" });
        schema.check(body.as_object_mut().unwrap()).unwrap();
        assert_eq!(body["email"], "joe.doe@wolox.com.ar");
    }

    #[test]
    fn test_integer_fields_coerce_query_strings() {
        let schema = Schema::new()
            .field(FieldRule::integer("limit").min(1).max(100))
            .field(FieldRule::integer("offset").min(0));
        let mut body = json!({ "limit": "20", "offset": "" });
        schema.check(body.as_object_mut().unwrap()).unwrap();
        assert_eq!(body["limit"], 20);
        assert!(body.get("offset").is_none());
    }

    #[test]
    fn test_integer_bounds() {
        let schema = Schema::new().field(FieldRule::integer("limit").min(1).max(100));

        let found = violations(&schema, json!({ "limit": 0 }));
        assert_eq!(found[0].message, "\"limit\" must be larger than or equal to 1");

        let found = violations(&schema, json!({ "limit": "500" }));
        assert_eq!(found[0].message, "\"limit\" must be less than or equal to 100");

        let found = violations(&schema, json!({ "limit": "ten" }));
        assert_eq!(found[0].message, "\"limit\" must be an integer");
    }

    #[test]
    fn test_parse_rejects_non_object_body() {
        let err = Schema::new().parse::<Value>(json!([1, 2])).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].kind, "object.base");
    }

    #[test]
    fn test_invalid_domain_pattern_is_reported() {
        let result = ValidationRules::new("(unclosed", "Broken");
        assert!(matches!(
            result,
            Err(ValidationRuleError::InvalidPattern { ref name, .. }) if name == "Broken"
        ));
    }

    #[test]
    fn test_alphanumeric_requires_letter_and_digit() {
        let pattern = NamedPattern::alphanumeric();
        assert!(pattern.is_match("pass1234"));
        assert!(!pattern.is_match("password"));
        assert!(!pattern.is_match("12345678"));
        assert!(!pattern.is_match("pass 1234"));
    }
}
