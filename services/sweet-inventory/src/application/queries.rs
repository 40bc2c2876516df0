//! Sweet queries

use crate::domain::entities::{SweetFilter, SweetSort};
use crate::domain::value_objects::SweetId;

/// 获取单个糖果
#[derive(Debug, Clone, Copy)]
pub struct GetSweetQuery {
    pub id: SweetId,
}

/// 列表查询
#[derive(Debug, Clone, Default)]
pub struct ListSweetsQuery {
    pub filter: SweetFilter,
    pub sort: Option<SweetSort>,
}
