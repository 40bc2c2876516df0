//! 糖果仓储接口

use async_trait::async_trait;
use sweetshop_errors::AppResult;

use crate::domain::entities::{NewSweet, Sweet, SweetFilter, SweetPatch, SweetSort};
use crate::domain::value_objects::SweetId;

/// 糖果仓储接口
///
/// 库存扣减与补货必须是单步原子操作，实现不得先读后写
#[async_trait]
pub trait SweetRepository: Send + Sync {
    /// 根据 ID 查找
    async fn find_by_id(&self, id: SweetId) -> AppResult<Option<Sweet>>;

    /// 列表查询，未指定排序时按存储顺序（ID 升序）
    async fn list(&self, filter: &SweetFilter, sort: Option<SweetSort>) -> AppResult<Vec<Sweet>>;

    /// 新建，返回带 ID 的记录
    async fn insert(&self, sweet: &NewSweet) -> AppResult<Sweet>;

    /// 部分更新，不存在返回 None
    async fn update(&self, id: SweetId, patch: &SweetPatch) -> AppResult<Option<Sweet>>;

    /// 删除，返回删除前的记录
    async fn delete(&self, id: SweetId) -> AppResult<Option<Sweet>>;

    /// 条件扣减库存
    ///
    /// 不存在返回 `NotFound`，库存不足返回 `InsufficientStock` 且数量不变
    async fn decrement_quantity(&self, id: SweetId, amount: i64) -> AppResult<Sweet>;

    /// 增加库存，不存在返回 `NotFound`
    async fn increment_quantity(&self, id: SweetId, amount: i64) -> AppResult<Sweet>;
}
