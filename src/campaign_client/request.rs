use serde::Serialize;

/// The `contactinfo` object embedded in the form-encoded subscribe call.
///
/// The provider expects the field names with spaces; the name fields are
/// fixed to empty strings because the signup form only collects an email.
#[derive(Serialize)]
pub struct ContactInfo<'a> {
    #[serde(rename = "Contact Email")]
    pub contact_email: &'a str,
    #[serde(rename = "First Name")]
    pub first_name: &'a str,
    #[serde(rename = "Last Name")]
    pub last_name: &'a str,
}

impl<'a> ContactInfo<'a> {
    pub fn new(contact_email: &'a str) -> Self {
        Self {
            contact_email,
            first_name: "",
            last_name: "",
        }
    }
}
