//! Form validation.
//!
//! Each form is declared once with [`form_schema!`]: the declaration
//! produces the typed input struct (also used as the request body) and the
//! field rules it is checked against. [`FormSchema::validate`] takes the raw
//! submitted record, runs every field's rules, coerces numeric strings, and
//! returns either the typed value or a [`FieldErrors`] map.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use std::fmt;

pub const REQUIRED: &str = "Required";
pub const INVALID_EMAIL: &str = "Invalid email address";
pub const INVALID_URL: &str = "Invalid URL";
pub const EXPECTED_TEXT: &str = "Expected text";
pub const EXPECTED_NUMBER: &str = "Expected number";
pub const EXPECTED_BOOLEAN: &str = "Expected true or false";
pub const EXPECTED_LIST: &str = "Expected a list of values";

/// Key used for errors that belong to the record rather than one field
pub const FORM_KEY: &str = "_form";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("email regex is valid")
});

/// Field-keyed validation messages, in field order of the map keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single record-level error
    pub fn form(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(FORM_KEY, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of fields with at least one error
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.errors.get(field).map(Vec::as_slice)
    }

    pub fn first(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(|m| m.first()).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(&self.errors).unwrap_or(Value::Null)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

/// Shape a raw value must have before its rules run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Numbers, with numeric strings coerced
    Number,
    Boolean,
    /// List of strings; a comma-separated string is split
    List,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    MinLen(usize, &'static str),
    MaxLen(usize, &'static str),
    Email(&'static str),
    Url(&'static str),
    Digits(usize, &'static str),
    OneOf(&'static [&'static str], &'static str),
    Min(f64, &'static str),
    Max(f64, &'static str),
    GreaterThan(f64, &'static str),
}

/// Rules for one field of a form
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub kind: FieldKind,
    pub required: bool,
    pub rules: Vec<Rule>,
}

impl FieldSpec {
    fn of(kind: FieldKind) -> Self {
        Self {
            kind,
            required: true,
            rules: Vec::new(),
        }
    }

    pub fn text() -> Self {
        Self::of(FieldKind::Text)
    }

    pub fn number() -> Self {
        Self::of(FieldKind::Number)
    }

    pub fn boolean() -> Self {
        Self::of(FieldKind::Boolean)
    }

    pub fn list() -> Self {
        Self::of(FieldKind::List)
    }

    /// Absent, null, and empty-string values are accepted and left out
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn min_len(self, len: usize, message: &'static str) -> Self {
        self.rule(Rule::MinLen(len, message))
    }

    pub fn max_len(self, len: usize, message: &'static str) -> Self {
        self.rule(Rule::MaxLen(len, message))
    }

    pub fn email(self, message: &'static str) -> Self {
        self.rule(Rule::Email(message))
    }

    pub fn url(self, message: &'static str) -> Self {
        self.rule(Rule::Url(message))
    }

    pub fn digits(self, len: usize, message: &'static str) -> Self {
        self.rule(Rule::Digits(len, message))
    }

    pub fn one_of(self, options: &'static [&'static str], message: &'static str) -> Self {
        self.rule(Rule::OneOf(options, message))
    }

    pub fn min(self, value: f64, message: &'static str) -> Self {
        self.rule(Rule::Min(value, message))
    }

    pub fn max(self, value: f64, message: &'static str) -> Self {
        self.rule(Rule::Max(value, message))
    }

    pub fn greater_than(self, value: f64, message: &'static str) -> Self {
        self.rule(Rule::GreaterThan(value, message))
    }

    fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Check one raw value. `Ok(None)` means an optional field was left empty.
    pub fn check(&self, raw: Option<&Value>) -> Result<Option<Value>, Vec<String>> {
        let value = match coerce(self.kind, raw) {
            Coerced::Missing if self.required => return Err(vec![REQUIRED.to_string()]),
            Coerced::Missing => return Ok(None),
            Coerced::Invalid(message) => return Err(vec![message.to_string()]),
            Coerced::Value(value) => value,
        };

        // Untouched optional inputs are submitted as ""
        if !self.required && value.as_str() == Some("") {
            return Ok(None);
        }

        let messages: Vec<String> = self
            .rules
            .iter()
            .filter(|rule| !rule_passes(rule, &value))
            .map(|rule| rule_message(rule).to_string())
            .collect();

        if messages.is_empty() {
            Ok(Some(value))
        } else {
            Err(messages)
        }
    }
}

enum Coerced {
    Missing,
    Invalid(&'static str),
    Value(Value),
}

fn coerce(kind: FieldKind, raw: Option<&Value>) -> Coerced {
    let raw = match raw {
        None | Some(Value::Null) => return Coerced::Missing,
        Some(v) => v,
    };

    match (kind, raw) {
        // Required text keeps "" so its own rules report it
        (FieldKind::Text, Value::String(_)) => Coerced::Value(raw.clone()),
        (FieldKind::Text, _) => Coerced::Invalid(EXPECTED_TEXT),

        (FieldKind::Number, Value::Number(n)) => match n.as_f64() {
            Some(f) if f.is_finite() => Coerced::Value(raw.clone()),
            _ => Coerced::Invalid(EXPECTED_NUMBER),
        },
        (FieldKind::Number, Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Coerced::Missing;
            }
            match s.parse::<f64>().ok().filter(|f| f.is_finite()).and_then(Number::from_f64) {
                Some(n) => Coerced::Value(Value::Number(n)),
                None => Coerced::Invalid(EXPECTED_NUMBER),
            }
        }
        (FieldKind::Number, _) => Coerced::Invalid(EXPECTED_NUMBER),

        (FieldKind::Boolean, Value::Bool(_)) => Coerced::Value(raw.clone()),
        (FieldKind::Boolean, Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "on" | "1" => Coerced::Value(Value::Bool(true)),
            "false" | "off" | "0" => Coerced::Value(Value::Bool(false)),
            "" => Coerced::Missing,
            _ => Coerced::Invalid(EXPECTED_BOOLEAN),
        },
        (FieldKind::Boolean, _) => Coerced::Invalid(EXPECTED_BOOLEAN),

        (FieldKind::List, Value::Array(items)) => {
            if items.iter().all(Value::is_string) {
                Coerced::Value(raw.clone())
            } else {
                Coerced::Invalid(EXPECTED_LIST)
            }
        }
        (FieldKind::List, Value::String(s)) => {
            let items: Vec<Value> = s
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(|item| Value::String(item.to_string()))
                .collect();
            Coerced::Value(Value::Array(items))
        }
        (FieldKind::List, _) => Coerced::Invalid(EXPECTED_LIST),
    }
}

fn rule_passes(rule: &Rule, value: &Value) -> bool {
    match rule {
        Rule::MinLen(len, _) => measure(value) >= *len,
        Rule::MaxLen(len, _) => measure(value) <= *len,
        Rule::Email(_) => value.as_str().is_some_and(is_email),
        Rule::Url(_) => value.as_str().is_some_and(is_http_url),
        Rule::Digits(len, _) => value
            .as_str()
            .is_some_and(|s| s.len() == *len && s.chars().all(|c| c.is_ascii_digit())),
        Rule::OneOf(options, _) => value.as_str().is_some_and(|s| options.contains(&s)),
        Rule::Min(min, _) => value.as_f64().is_some_and(|n| n >= *min),
        Rule::Max(max, _) => value.as_f64().is_some_and(|n| n <= *max),
        Rule::GreaterThan(bound, _) => value.as_f64().is_some_and(|n| n > *bound),
    }
}

fn rule_message(rule: &Rule) -> &'static str {
    match rule {
        Rule::MinLen(_, m)
        | Rule::MaxLen(_, m)
        | Rule::Email(m)
        | Rule::Url(m)
        | Rule::Digits(_, m)
        | Rule::OneOf(_, m)
        | Rule::Min(_, m)
        | Rule::Max(_, m)
        | Rule::GreaterThan(_, m) => m,
    }
}

/// Characters for text, items for lists
fn measure(value: &Value) -> usize {
    match value {
        Value::String(s) => s.chars().count(),
        Value::Array(items) => items.len(),
        _ => 0,
    }
}

pub fn is_email(s: &str) -> bool {
    !s.starts_with('.') && !s.contains("..") && EMAIL_RE.is_match(s)
}

pub fn is_http_url(s: &str) -> bool {
    url::Url::parse(s)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host().is_some())
        .unwrap_or(false)
}

/// Run every field spec against a raw record and return the normalized
/// record (coerced values, empty optionals dropped) or all field errors.
pub fn validate_record(
    input: &Value,
    fields: &[(&'static str, FieldSpec)],
) -> Result<Value, FieldErrors> {
    let object = input
        .as_object()
        .ok_or_else(|| FieldErrors::form("Expected a record of field values"))?;

    let mut errors = FieldErrors::new();
    let mut normalized = Map::new();

    for (key, spec) in fields {
        match spec.check(object.get(*key)) {
            Ok(Some(value)) => {
                normalized.insert((*key).to_string(), value);
            }
            Ok(None) => {}
            Err(messages) => {
                for message in messages {
                    errors.add(*key, message);
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(Value::Object(normalized))
    } else {
        Err(errors)
    }
}

/// A form whose typed input and field rules come from one declaration
pub trait FormSchema: DeserializeOwned {
    fn fields() -> Vec<(&'static str, FieldSpec)>;

    fn validate(input: &Value) -> Result<Self, FieldErrors> {
        let normalized = validate_record(input, &Self::fields())?;
        serde_json::from_value(normalized).map_err(|e| FieldErrors::form(e.to_string()))
    }
}

/// Declare a form input struct together with its field rules.
///
/// ```ignore
/// form_schema! {
///     pub struct LoginInput {
///         email: String as "email" => FieldSpec::text().email(INVALID_EMAIL),
///     }
/// }
/// ```
macro_rules! form_schema {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $field:ident : $ty:ty as $key:literal => $spec:expr
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        $vis struct $name {
            $(
                $(#[$fmeta])*
                #[serde(rename = $key)]
                pub $field: $ty,
            )*
        }

        impl $crate::validation::FormSchema for $name {
            fn fields() -> Vec<(&'static str, $crate::validation::FieldSpec)> {
                vec![$(($key, $spec)),*]
            }
        }
    };
}

pub mod admin_plan;
pub mod apply_project;
pub mod login;
pub mod onboarding;
pub mod password;
pub mod signup;

pub use admin_plan::AdminPlanInput;
pub use apply_project::ApplyProjectInput;
pub use login::LoginInput;
pub use onboarding::OnboardingInput;
pub use password::{ForgotPasswordInput, ResetPasswordInput, VerifyOtpInput};
pub use signup::SignupInput;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn email_shapes() {
        assert!(is_email("a@b.com"));
        assert!(is_email("first.last+tag@mail.example.org"));
        assert!(!is_email("not-an-email"));
        assert!(!is_email("a@b"));
        assert!(!is_email(".a@b.com"));
        assert!(!is_email("a..b@c.com"));
    }

    #[test]
    fn url_shapes() {
        assert!(is_http_url("https://portfolio.example.com/me"));
        assert!(!is_http_url("portfolio.example.com"));
        assert!(!is_http_url("mailto:me@example.com"));
    }

    #[test]
    fn missing_required_field_reports_required() {
        let spec = FieldSpec::text().min_len(2, "Too short");
        assert_eq!(spec.check(None), Err(vec![REQUIRED.to_string()]));
        assert_eq!(spec.check(Some(&Value::Null)), Err(vec![REQUIRED.to_string()]));
    }

    #[test]
    fn empty_optional_text_is_dropped() {
        let spec = FieldSpec::text().optional().url(INVALID_URL);
        assert_eq!(spec.check(Some(&json!(""))), Ok(None));
    }

    #[test]
    fn number_strings_are_coerced_before_range_checks() {
        let spec = FieldSpec::number().min(0.0, "Must be positive");
        assert_eq!(spec.check(Some(&json!(" 12.5 "))), Ok(Some(json!(12.5))));
        assert_eq!(spec.check(Some(&json!("-1"))), Err(vec!["Must be positive".to_string()]));
        assert_eq!(spec.check(Some(&json!("abc"))), Err(vec![EXPECTED_NUMBER.to_string()]));
        assert_eq!(spec.check(Some(&json!(true))), Err(vec![EXPECTED_NUMBER.to_string()]));
    }

    #[test]
    fn list_from_comma_separated_string() {
        let spec = FieldSpec::list().min_len(1, "Pick one");
        assert_eq!(spec.check(Some(&json!("rust, go,,"))), Ok(Some(json!(["rust", "go"]))));
        assert_eq!(spec.check(Some(&json!(""))), Err(vec!["Pick one".to_string()]));
        assert_eq!(spec.check(Some(&json!([1, 2]))), Err(vec![EXPECTED_LIST.to_string()]));
    }

    #[test]
    fn boolean_strings_are_coerced() {
        let spec = FieldSpec::boolean();
        assert_eq!(spec.check(Some(&json!("on"))), Ok(Some(json!(true))));
        assert_eq!(spec.check(Some(&json!("false"))), Ok(Some(json!(false))));
        assert!(spec.check(Some(&json!("maybe"))).is_err());
    }

    #[test]
    fn every_failing_rule_is_reported() {
        let spec = FieldSpec::text().min_len(8, "Too short").email(INVALID_EMAIL);
        assert_eq!(
            spec.check(Some(&json!("x"))),
            Err(vec!["Too short".to_string(), INVALID_EMAIL.to_string()])
        );
    }

    #[test]
    fn non_object_record_is_a_form_error() {
        let errors = validate_record(&json!(["a"]), &[("a", FieldSpec::text())]).unwrap_err();
        assert!(errors.contains(FORM_KEY));
    }

    #[test]
    fn field_errors_display_and_json() {
        let mut errors = FieldErrors::new();
        errors.add("email", INVALID_EMAIL);
        errors.add("password", "Too short");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.to_string(), "email: Invalid email address; password: Too short");
        assert_eq!(errors.to_json()["email"], json!([INVALID_EMAIL]));
    }
}
