//! sweet-inventory - 糖果店库存服务
//!
//! 分层结构：domain（实体与仓储接口）、application（命令/查询与业务处理）、
//! infrastructure（PostgreSQL/内存仓储、迁移、指标）、api（axum 路由）

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
