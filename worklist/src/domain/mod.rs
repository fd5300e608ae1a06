mod activity_status;
mod completion;
mod error;
mod filter_engine;
pub mod models;
mod normalizer;
pub mod ports;
pub mod services;
mod session;

pub use activity_status::*;
pub use completion::*;
pub use error::*;
pub use filter_engine::*;
pub use normalizer::*;
pub use session::*;
