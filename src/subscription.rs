pub use forwarder::SubscriptionForwarder;
pub use result::{
    FailureKind,
    SubscriptionResult,
};

mod forwarder;
mod result;
