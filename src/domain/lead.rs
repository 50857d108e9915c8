use chrono::{DateTime, Utc};

use crate::domain::lead_email::LeadEmail;
use crate::domain::lead_name::LeadName;
use crate::domain::lead_phone::LeadPhone;

/// A persisted lead. Append-only: once created the record is never mutated
/// or deleted by the application.
#[derive(Debug, serde::Serialize)]
pub struct Lead {
    pub email: LeadEmail,
    pub full_name: LeadName,
    pub phone_number: LeadPhone,
    pub created_at: DateTime<Utc>,
}
