//! A relay between a newsletter signup form and the Zoho Campaigns API.
//!
//! The crate forwards one subscription at a time to the upstream
//! list-subscribe endpoint and keeps the OAuth access token used to
//! authenticate those calls fresh.

pub mod app;
pub mod campaign_client;
pub mod domain;
pub mod routes;
pub mod subscription;
pub mod token;
