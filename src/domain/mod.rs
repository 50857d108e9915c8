pub mod lead;
pub mod lead_email;
pub mod lead_name;
pub mod lead_phone;
pub mod new_lead;
