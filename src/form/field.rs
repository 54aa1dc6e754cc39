use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9\s()-]{10,}$").expect("phone pattern compiles"));

pub const INVALID_EMAIL: &str = "Please enter a valid email address";
pub const INVALID_PHONE: &str = "Please enter a valid phone number";
pub const DEFAULT_LABEL: &str = "This field";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Select,
    Textarea,
}

impl FieldKind {
    /// Maps an element's tag name and `type` attribute to a kind. Input types
    /// we have no rule for are treated as plain text.
    pub fn from_element(tag_name: &str, input_type: Option<&str>) -> Self {
        match tag_name.to_ascii_lowercase().as_str() {
            "select" => FieldKind::Select,
            "textarea" => FieldKind::Textarea,
            _ => match input_type.map(|t| t.to_ascii_lowercase()).as_deref() {
                Some("email") => FieldKind::Email,
                Some("tel") => FieldKind::Tel,
                _ => FieldKind::Text,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub name: String,
    /// Shown in the "is required" message.
    pub label: String,
    pub value: String,
    pub required: bool,
    pub kind: FieldKind,
}

impl Field {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: DEFAULT_LABEL.to_string(),
            value: String::new(),
            required: false,
            kind,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn labelled(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ValidationResult {
    pub field_name: String,
    pub valid: bool,
    pub message: Option<String>,
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

pub fn is_valid_phone(value: &str) -> bool {
    PHONE_PATTERN.is_match(value)
}

pub fn check(field: &Field) -> ValidationResult {
    let value = field.value.trim();

    let message = if field.required && value.is_empty() {
        Some(format!("{} is required", field.label))
    } else if field.kind == FieldKind::Email && !value.is_empty() && !is_valid_email(value) {
        Some(INVALID_EMAIL.to_string())
    } else if field.kind == FieldKind::Tel && !value.is_empty() && !is_valid_phone(value) {
        Some(INVALID_PHONE.to_string())
    } else {
        None
    };

    ValidationResult {
        field_name: field.name.clone(),
        valid: message.is_none(),
        message,
    }
}
