use serde::Deserialize;
use std::collections::BTreeMap;

use crate::domain::lead_email::LeadEmail;
use crate::domain::lead_name::LeadName;
use crate::domain::lead_phone::LeadPhone;

/// Raw capture-form payload. Every field is optional so that a missing field
/// surfaces as a field-level error instead of a body deserialization failure.
#[derive(Deserialize, Debug)]
pub struct LeadBody {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug)]
pub struct NewLead {
    pub email: LeadEmail,
    pub full_name: LeadName,
    pub phone_number: LeadPhone,
}

/// Field name -> list of error messages, serialized as a plain JSON object.
#[derive(Debug, Default, serde::Serialize)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn push(&mut self, field: &str, message: String) {
        self.0.entry(field.to_string()).or_default().push(message);
    }

    pub fn single(field: &str, message: &str) -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        errors.push(field, message.to_string());

        errors
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn field_messages(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(|messages| messages.as_slice())
    }
}

impl NewLead {
    /// Validates all three fields independently and reports every failure at
    /// once, keyed by field name. No short-circuit on the first error.
    pub fn parse(body: LeadBody) -> Result<NewLead, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let full_name = match body.name {
            Some(name) => LeadName::parse(name)
                .map_err(|message| errors.push("name", message))
                .ok(),
            None => {
                errors.push("name", String::from("Name is required."));
                None
            }
        };
        let email = match body.email {
            Some(email) => LeadEmail::parse(email)
                .map_err(|message| errors.push("email", message))
                .ok(),
            None => {
                errors.push("email", String::from("Email is required."));
                None
            }
        };
        let phone_number = match body.phone {
            Some(phone) => LeadPhone::parse(phone)
                .map_err(|message| errors.push("phone", message))
                .ok(),
            None => {
                errors.push("phone", String::from("Phone number is required."));
                None
            }
        };

        match (full_name, email, phone_number) {
            (Some(full_name), Some(email), Some(phone_number)) => Ok(NewLead {
                email,
                full_name,
                phone_number,
            }),
            _ => Err(errors),
        }
    }
}
