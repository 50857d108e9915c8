const COUNTRY_PREFIX: &str = "+91";
const NATIONAL_DIGITS: usize = 10;

#[derive(Debug, Clone, serde::Serialize)]
pub struct LeadPhone(String);

impl LeadPhone {
    /// Indian mobile format only: the literal `+91` prefix followed by exactly
    /// 10 digits, 13 characters total.
    pub fn parse(phone: String) -> Result<LeadPhone, String> {
        let phone = phone.trim();

        if phone.is_empty() {
            return Err(String::from("Phone number is required."));
        }

        let digits = match phone.strip_prefix(COUNTRY_PREFIX) {
            Some(digits) => digits,
            None => {
                return Err(String::from(
                    "Phone number must be in Indian format: +91 followed by 10 digits. \
                     Example: +919876543210",
                ))
            }
        };

        if digits.is_empty() || !digits.chars().all(|char| char.is_ascii_digit()) {
            return Err(String::from(
                "Phone number must contain only digits after +91.",
            ));
        }

        if digits.len() != NATIONAL_DIGITS {
            return Err(String::from(
                "Phone number must have exactly 10 digits after +91.",
            ));
        }

        Ok(Self(phone.to_string()))
    }
}

impl AsRef<str> for LeadPhone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
