use std::convert::TryFrom;

use crate::domain::errors::MalformedInput;

/// An email address that is safe to forward upstream.
///
/// The check is deliberately simple: ASCII `local@domain.tld` with a
/// single `@`, a dotted domain and no whitespace. The upstream provider
/// performs its own, stricter validation.
#[derive(Clone, Debug)]
pub struct SubscriberEmail(String);

impl TryFrom<String> for SubscriberEmail {
    type Error = MalformedInput;

    fn try_from(email: String) -> Result<Self, Self::Error> {
        let is_plain_ascii = email.is_ascii() && !email.chars().any(char::is_whitespace);
        let has_single_at = email.matches('@').count() == 1;

        let is_well_formed = is_plain_ascii
            && has_single_at
            && match email.split_once('@') {
                Some((local, domain)) => {
                    !local.is_empty()
                        && domain.contains('.')
                        && !domain.starts_with('.')
                        && !domain.ends_with('.')
                }
                None => false,
            };

        if is_well_formed {
            Ok(Self(email))
        } else {
            Err(MalformedInput::InvalidEmail { email })
        }
    }
}

impl AsRef<str> for SubscriberEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
