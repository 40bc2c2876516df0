//! 实体

mod sweet;
mod sweet_query;

pub use sweet::*;
pub use sweet_query::*;
