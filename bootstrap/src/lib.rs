//! sweetshop-bootstrap - 统一服务启动骨架
//!
//! 配置加载、日志初始化、数据库连接、迁移、健康检查与 HTTP 服务启动

mod cors;
mod health;
mod infrastructure;
mod runtime;
mod starter;

pub use cors::*;
pub use health::*;
pub use infrastructure::*;
pub use runtime::*;
pub use starter::*;
