pub use health_check::health_check;
pub use subscriptions::subscribe;
pub use token_refresh::refresh_token;

mod health_check;
mod subscriptions;
mod token_refresh;
