//! The school entity and its submission shapes.
//!
//! - [`SchoolForm`] holds raw, unvalidated text as typed into a form or
//!   received from a multipart body.
//! - [`NewSchool`] is a validated, trimmed submission ready for insertion.
//! - [`School`] is a stored row, as returned by the list operation.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::SchoolId;

/// A registered school, as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct School {
    pub id: SchoolId,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub contact: String,
    /// Stored filename under the upload directory, if an image was sent.
    pub image: Option<String>,
    pub email_id: String,
    pub created_at: DateTime<Utc>,
}

/// Form fields of a school submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Address,
    City,
    State,
    Contact,
    EmailId,
    Image,
}

impl Field {
    /// Text fields that every submission must carry, in form order.
    pub const REQUIRED: [Field; 6] = [
        Field::Name,
        Field::Address,
        Field::City,
        Field::State,
        Field::Contact,
        Field::EmailId,
    ];

    /// Wire name used in multipart bodies and JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Address => "address",
            Self::City => "city",
            Self::State => "state",
            Self::Contact => "contact",
            Self::EmailId => "email_id",
            Self::Image => "image",
        }
    }

    /// Look up a field by its wire name.
    #[must_use]
    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "name" => Some(Self::Name),
            "address" => Some(Self::Address),
            "city" => Some(Self::City),
            "state" => Some(Self::State),
            "contact" => Some(Self::Contact),
            "email_id" => Some(Self::EmailId),
            "image" => Some(Self::Image),
            _ => None,
        }
    }

    /// Message shown when the field is left blank.
    #[must_use]
    pub const fn required_message(self) -> &'static str {
        match self {
            Self::Name => "School name is required",
            Self::Address => "Address is required",
            Self::City => "City is required",
            Self::State => "State is required",
            Self::Contact => "Contact number is required",
            Self::EmailId => "Email is required",
            Self::Image => "Image is required",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw text of a school submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolForm {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub contact: String,
    pub email_id: String,
}

impl SchoolForm {
    /// Value of a text field. The image field has no text and reads as empty.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Address => &self.address,
            Field::City => &self.city,
            Field::State => &self.state,
            Field::Contact => &self.contact,
            Field::EmailId => &self.email_id,
            Field::Image => "",
        }
    }

    /// Set a text field. Setting the image field is a no-op.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Address => &mut self.address,
            Field::City => &mut self.city,
            Field::State => &mut self.state,
            Field::Contact => &mut self.contact,
            Field::EmailId => &mut self.email_id,
            Field::Image => return,
        };
        *slot = value.into();
    }

    /// Copy with surrounding whitespace removed from every field.
    #[must_use]
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            contact: self.contact.trim().to_string(),
            email_id: self.email_id.trim().to_string(),
        }
    }

    /// Fields that are blank after trimming.
    #[must_use]
    pub fn missing(&self) -> Vec<Field> {
        Field::REQUIRED
            .into_iter()
            .filter(|field| self.get(*field).trim().is_empty())
            .collect()
    }
}

/// A validated submission, ready to insert.
///
/// Built through [`validate`](super::validate); the text is trimmed and has
/// passed every field rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSchool {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub contact: String,
    pub email_id: String,
    pub image: Option<String>,
}

impl NewSchool {
    pub(crate) fn from_trimmed(form: SchoolForm) -> Self {
        Self {
            name: form.name,
            address: form.address,
            city: form.city,
            state: form.state,
            contact: form.contact,
            email_id: form.email_id,
            image: None,
        }
    }

    /// Attach the stored image filename.
    #[must_use]
    pub fn with_image(mut self, image: Option<String>) -> Self {
        self.image = image;
        self
    }

    /// Build the stored row for this submission.
    #[must_use]
    pub fn into_school(self, id: SchoolId, created_at: DateTime<Utc>) -> School {
        School {
            id,
            name: self.name,
            address: self.address,
            city: self.city,
            state: self.state,
            contact: self.contact,
            image: self.image,
            email_id: self.email_id,
            created_at,
        }
    }
}
