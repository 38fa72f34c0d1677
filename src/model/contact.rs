use std::fmt;

use serde::Deserialize;
use sqlx::FromRow;

/// Surrogate key of the `contact` table. The column itself is named
/// `user_id` in the schema.
pub type ContactId = i32;

#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct Contact {
    #[sqlx(rename = "user_id")]
    pub contact_id: ContactId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub contact_number: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewContact {
    pub first_name: String,
    pub last_name: String,
    pub contact_number: String,
    pub email: String,
}

/// The projection shown in a user's contact list.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ContactSummary {
    pub first_name: String,
    pub last_name: String,
    pub contact_number: String,
}

impl fmt::Display for ContactSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.first_name, self.last_name, self.contact_number)
    }
}

impl From<&NewContact> for ContactSummary {
    fn from(contact: &NewContact) -> Self {
        Self {
            first_name: contact.first_name.clone(),
            last_name: contact.last_name.clone(),
            contact_number: contact.contact_number.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Ana", "Horvat", "+385 91 555 0101", "Ana Horvat: +385 91 555 0101")]
    #[case("", "", "", " : ")]
    fn summary_renders_name_then_number(
        #[case] first: &str,
        #[case] last: &str,
        #[case] phone: &str,
        #[case] expected: &str,
    ) {
        let summary = ContactSummary {
            first_name: first.to_owned(),
            last_name: last.to_owned(),
            contact_number: phone.to_owned(),
        };
        assert_eq!(summary.to_string(), expected);
    }

    #[test]
    fn summary_from_new_contact_drops_email() {
        let contact = NewContact {
            first_name: "Ivo".into(),
            last_name: "Kovac".into(),
            contact_number: "555-0199".into(),
            email: "ivo@example.com".into(),
        };
        assert_eq!(ContactSummary::from(&contact).to_string(), "Ivo Kovac: 555-0199");
    }
}
