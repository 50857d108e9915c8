use validator::validate_email;

#[derive(Debug, Clone, serde::Serialize)]
pub struct LeadEmail(String);

impl LeadEmail {
    /// Trims and lowercases the address before validating it. The lowercase
    /// form is what gets stored, so case-variants of the same address collide
    /// on the primary key.
    pub fn parse(email: String) -> Result<LeadEmail, String> {
        let email = email.trim().to_lowercase();

        if email.is_empty() {
            return Err(String::from("Email is required."));
        }

        // validate_email accepts dotless domains (eg: user@localhost), which
        // we do not want for a public capture form
        let has_tld = email
            .rsplit_once('@')
            .map(|(_, domain)| domain.contains('.'))
            .unwrap_or(false);

        if !validate_email(&email) || !has_tld {
            return Err(String::from("Invalid email format."));
        }

        Ok(Self(email))
    }
}

impl AsRef<str> for LeadEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
