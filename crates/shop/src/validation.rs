//! Rule-driven field validation.
//!
//! Validation is configuration, not code: one evaluator serves every checkout
//! field, and a new field needs only a new rule entry. Failures are data
//! (messages handed back to the caller), never errors.

use core::str::FromStr;
use std::collections::BTreeMap;

use regex::Regex;

use storefront_core::{DomainError, DomainResult};

/// The checkout's recognized fields, a closed set.
///
/// Unknown field names are rejected at the parse boundary instead of being
/// silently ignored.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Payment,
    Email,
    Phone,
    Address,
}

impl Field {
    pub const fn as_str(self) -> &'static str {
        match self {
            Field::Payment => "payment",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Address => "address",
        }
    }
}

impl core::fmt::Display for Field {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "payment" => Ok(Field::Payment),
            "email" => Ok(Field::Email),
            "phone" => Ok(Field::Phone),
            "address" => Ok(Field::Address),
            other => Err(DomainError::validation(format!(
                "unrecognized field name: {other}"
            ))),
        }
    }
}

/// Failing fields mapped to their messages; empty means the set is valid.
pub type ValidationErrors = BTreeMap<Field, String>;

/// A single field's rule: required flag, optional pattern, failure message.
///
/// Rules are loaded once and immutable for the process lifetime.
#[derive(Debug, Clone)]
pub struct ValidationRule {
    required: bool,
    pattern: Option<Regex>,
    message: String,
}

impl ValidationRule {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            required: false,
            pattern: None,
            message: message.into(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Attach a pattern; compilation failures propagate as configuration
    /// errors.
    pub fn pattern(mut self, pattern: &str) -> DomainResult<Self> {
        let compiled = Regex::new(pattern).map_err(|e| {
            DomainError::validation(format!("invalid rule pattern {pattern:?}: {e}"))
        })?;
        self.pattern = Some(compiled);
        Ok(self)
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// The full rule set, total over [`Field`].
#[derive(Debug, Clone)]
pub struct ValidationRules {
    payment: ValidationRule,
    email: ValidationRule,
    phone: ValidationRule,
    address: ValidationRule,
}

impl ValidationRules {
    pub fn new(
        payment: ValidationRule,
        email: ValidationRule,
        phone: ValidationRule,
        address: ValidationRule,
    ) -> Self {
        Self {
            payment,
            email,
            phone,
            address,
        }
    }

    /// The storefront's standard checkout rules.
    pub fn standard() -> DomainResult<Self> {
        Ok(Self::new(
            ValidationRule::new("Select a payment method").required(),
            ValidationRule::new("Enter a valid email")
                .required()
                .pattern(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")?,
            ValidationRule::new("Enter a valid phone number")
                .required()
                .pattern(r"^\+?[78][-(]?\d{3}\)?-?\d{3}-?\d{2}-?\d{2}$")?,
            ValidationRule::new("Enter a delivery address").required(),
        ))
    }

    pub fn rule(&self, field: Field) -> &ValidationRule {
        match field {
            Field::Payment => &self.payment,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Address => &self.address,
        }
    }
}

/// Stateless rule evaluator.
#[derive(Debug, Clone)]
pub struct Validator {
    rules: ValidationRules,
}

impl Validator {
    pub fn new(rules: ValidationRules) -> Self {
        Self { rules }
    }

    /// Evaluator over the standard rule set.
    pub fn standard() -> DomainResult<Self> {
        Ok(Self::new(ValidationRules::standard()?))
    }

    /// Evaluate one field. `None` means the value passes.
    ///
    /// Precedence: the required check sees the trimmed value; the pattern
    /// check applies only to non-empty values.
    pub fn validate_field(&self, field: Field, value: &str) -> Option<&str> {
        let rule = self.rules.rule(field);
        if rule.required && value.trim().is_empty() {
            return Some(rule.message());
        }
        if let Some(pattern) = &rule.pattern {
            if !value.is_empty() && !pattern.is_match(value) {
                return Some(rule.message());
            }
        }
        None
    }

    /// Evaluate a field set; only failing entries are returned, so emptiness
    /// is the validity predicate.
    pub fn validate_form(&self, fields: &[(Field, String)]) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for (field, value) in fields {
            if let Some(message) = self.validate_field(*field, value) {
                errors.insert(*field, message.to_string());
            }
        }
        errors
    }
}
