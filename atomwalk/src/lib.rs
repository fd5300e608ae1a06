mod atomwalk_url;
mod auth;
mod client;
pub mod domain;

pub use atomwalk_url::*;
pub use auth::*;
pub use client::*;
pub use domain::*;
