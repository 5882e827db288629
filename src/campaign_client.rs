pub use client::{
    CampaignClient,
    RawResponse,
};
pub use response::UpstreamBody;

mod client;
mod request;
mod response;
