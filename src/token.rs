pub use errors::AuthError;
pub use manager::{
    AccessToken,
    TokenManager,
    TokenSource,
};

mod errors;
mod manager;
