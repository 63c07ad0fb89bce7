pub mod client;
pub mod dto;
pub mod gateway;

pub use client::*;
pub use dto::*;
pub use gateway::*;
