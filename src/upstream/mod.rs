pub mod client;
pub mod sanitize;
pub mod types;

pub use client::*;
pub use types::*;
