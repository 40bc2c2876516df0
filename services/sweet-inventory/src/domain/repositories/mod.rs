//! 仓储接口模块

mod sweet_repository;

pub use sweet_repository::SweetRepository;
