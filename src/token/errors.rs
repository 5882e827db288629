use custom_error::custom_error;

custom_error! {
///! Custom error for the OAuth token lifecycle.
pub AuthError
    Http{status:u16} = "token endpoint responded with status: {status}",
    MalformedResponse = "token endpoint response is missing `access_token`",
    RefreshUnsupported = "no refresh credentials are configured",
    Unconfigured = "no token source is configured",
    Request{source:reqwest::Error} = "{source}",
}
