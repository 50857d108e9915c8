use unicode_segmentation::UnicodeSegmentation;

const MIN_CHAR_LENGTH: usize = 2;
const MAX_CHAR_LENGTH: usize = 150;

#[derive(Debug, serde::Serialize)]
pub struct LeadName(String);

impl LeadName {
    /// The stored value is the trimmed one; length limits apply after trimming.
    pub fn parse(name: String) -> Result<LeadName, String> {
        let name = name.trim();

        if name.is_empty() {
            return Err(String::from("Name is required."));
        }

        let length = name.graphemes(true).count();

        if length < MIN_CHAR_LENGTH {
            return Err(String::from("Name must be at least 2 characters."));
        }

        if length > MAX_CHAR_LENGTH {
            return Err(String::from("Name must be at most 150 characters."));
        }

        Ok(Self(name.to_string()))
    }
}

impl AsRef<str> for LeadName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
