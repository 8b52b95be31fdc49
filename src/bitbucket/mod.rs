pub mod client;
pub mod models;

pub use client::{BitbucketClient, PageControl};
pub use models::*;
