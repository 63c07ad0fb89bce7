pub mod controller;
pub mod error;
pub mod session;
pub mod todo_store;

pub use controller::*;
pub use error::*;
pub use session::*;
pub use todo_store::*;
