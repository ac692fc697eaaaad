//! Operator-facing task form and its validation.

use super::{BoardDomainError, Urgency};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Field the task form cannot be submitted without.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredField {
    /// Customer name.
    Name,
    /// Device category.
    DeviceType,
    /// Problem description.
    ProblemDescription,
}

impl RequiredField {
    /// Returns the wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::DeviceType => "device_type",
            Self::ProblemDescription => "problem_description",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content fields shared by every task record, whatever its origin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskDetails {
    /// Customer name.
    pub name: String,
    /// Customer phone number.
    pub phone: String,
    /// Customer email address.
    pub email: String,
    /// Device category.
    pub device_type: String,
    /// Problem description.
    pub problem_description: String,
    /// Requested urgency.
    pub urgency: Urgency,
    /// Price estimate.
    pub price: Option<f64>,
}

/// Task form filled in by an operator to create or edit a task.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskForm {
    name: String,
    phone: String,
    email: String,
    device_type: String,
    problem_description: String,
    urgency: Option<Urgency>,
    price: Option<f64>,
}

impl TaskForm {
    /// Creates a form with the required fields.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        device_type: impl Into<String>,
        problem_description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            device_type: device_type.into(),
            problem_description: problem_description.into(),
            ..Self::default()
        }
    }

    /// Sets the phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    /// Sets the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Sets the urgency.
    #[must_use]
    pub const fn with_urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = Some(urgency);
        self
    }

    /// Sets the price estimate.
    #[must_use]
    pub const fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Lists the required fields that are blank after trimming.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<RequiredField> {
        [
            (RequiredField::Name, &self.name),
            (RequiredField::DeviceType, &self.device_type),
            (RequiredField::ProblemDescription, &self.problem_description),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    /// Validates the form and converts it into task details.
    ///
    /// Text fields are trimmed and an unset urgency becomes
    /// [`Urgency::Medium`]. The email is left as entered; callers decide how
    /// to fill a blank one.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::MissingFields`] naming every blank
    /// required field.
    pub fn into_details(self) -> Result<TaskDetails, BoardDomainError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(BoardDomainError::MissingFields(missing));
        }
        Ok(TaskDetails {
            name: self.name.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
            email: self.email.trim().to_owned(),
            device_type: self.device_type.trim().to_owned(),
            problem_description: self.problem_description.trim().to_owned(),
            urgency: self.urgency.unwrap_or_default(),
            price: self.price,
        })
    }
}

/// Builds the placeholder email used when a manual task has none.
///
/// The name is lower-cased and whitespace runs become `.`.
#[must_use]
pub fn placeholder_email(name: &str) -> String {
    let local_part = name
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(".");
    format!("{local_part}@manual.local")
}
