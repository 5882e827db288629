pub use errors::MalformedInput;
pub use subscriber_email::SubscriberEmail;

mod errors;
mod subscriber_email;
