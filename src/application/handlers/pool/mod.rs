//! Custom pool handlers.

mod create_pool;
mod get_pool;

pub use create_pool::{CreateCustomPoolCommand, CreateCustomPoolHandler, CreateCustomPoolResult};
pub use get_pool::{CustomPoolView, GetCustomPoolHandler, GetCustomPoolQuery};
