use custom_error::custom_error;

custom_error! {
///! Custom error for malformed inbound data.
pub MalformedInput
    InvalidEmail{email:String} = "Invalid email: {email}",
}
