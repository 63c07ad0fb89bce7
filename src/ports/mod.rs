pub mod config_store;
pub mod gateway;

pub use config_store::*;
pub use gateway::*;
