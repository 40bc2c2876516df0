//! 持久化实现

mod memory;
mod migrations;
mod postgres;
mod rows;

pub use memory::InMemorySweetRepository;
pub use migrations::migrations;
pub use postgres::PostgresSweetRepository;
