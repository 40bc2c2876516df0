//! Business logic handler

use std::sync::Arc;

use sweetshop_errors::{AppError, AppResult};
use tracing::{info, warn};

use crate::domain::entities::{Sweet, sweet_not_found};
use crate::domain::repositories::SweetRepository;
use crate::domain::value_objects::SweetId;
use crate::infrastructure::observability::{
    record_purchase_rejected, record_sweet_created, record_sweet_purchased,
    record_sweet_restocked,
};

use super::commands::*;
use super::queries::*;

/// 库存服务
///
/// 持有仓储的共享引用，不缓存任何记录
pub struct SweetService {
    repo: Arc<dyn SweetRepository>,
}

impl SweetService {
    pub fn new(repo: Arc<dyn SweetRepository>) -> Self {
        Self { repo }
    }

    // ========== 查询 ==========

    /// 列表（筛选 + 排序），无匹配返回空列表
    pub async fn list_sweets(&self, query: ListSweetsQuery) -> AppResult<Vec<Sweet>> {
        let filter = query.filter.normalized();
        let sweets = self.repo.list(&filter, query.sort).await?;
        info!(count = sweets.len(), "Listed sweets");
        Ok(sweets)
    }

    /// 根据 ID 获取
    pub async fn get_sweet(&self, query: GetSweetQuery) -> AppResult<Sweet> {
        self.repo
            .find_by_id(query.id)
            .await?
            .ok_or_else(|| sweet_not_found(query.id))
    }

    // ========== 命令 ==========

    /// 创建糖果
    pub async fn create_sweet(&self, cmd: CreateSweetCommand) -> AppResult<Sweet> {
        if let Err(e) = cmd.validate() {
            warn!(error = %e, "Rejected sweet creation");
            return Err(e);
        }

        let sweet = self.repo.insert(&cmd.into_new_sweet()).await?;
        record_sweet_created(&sweet.category);
        info!(
            sweet_id = %sweet.id,
            name = %sweet.name,
            category = %sweet.category,
            "Sweet created"
        );
        Ok(sweet)
    }

    /// 部分更新
    pub async fn update_sweet(&self, cmd: UpdateSweetCommand) -> AppResult<Sweet> {
        cmd.validate()?;

        let sweet = self
            .repo
            .update(cmd.id, &cmd.patch)
            .await?
            .ok_or_else(|| sweet_not_found(cmd.id))?;
        info!(sweet_id = %sweet.id, "Sweet updated");
        Ok(sweet)
    }

    /// 删除，返回删除前的记录
    pub async fn delete_sweet(&self, id: SweetId) -> AppResult<Sweet> {
        let sweet = self
            .repo
            .delete(id)
            .await?
            .ok_or_else(|| sweet_not_found(id))?;
        info!(sweet_id = %sweet.id, name = %sweet.name, "Sweet deleted");
        Ok(sweet)
    }

    /// 购买
    ///
    /// 库存检查与扣减由仓储在一次原子操作中完成
    pub async fn purchase_sweet(&self, cmd: PurchaseSweetCommand) -> AppResult<Sweet> {
        cmd.validate()?;

        match self.repo.decrement_quantity(cmd.id, cmd.quantity).await {
            Ok(sweet) => {
                record_sweet_purchased(cmd.quantity);
                info!(
                    sweet_id = %sweet.id,
                    purchased = cmd.quantity,
                    remaining = sweet.quantity,
                    "Sweet purchased"
                );
                Ok(sweet)
            }
            Err(e @ AppError::InsufficientStock { .. }) => {
                record_purchase_rejected("insufficient_stock");
                warn!(sweet_id = %cmd.id, error = %e, "Purchase rejected");
                Err(e)
            }
            Err(e @ AppError::NotFound(_)) => {
                record_purchase_rejected("not_found");
                warn!(sweet_id = %cmd.id, "Purchase of unknown sweet");
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// 补货
    pub async fn restock_sweet(&self, cmd: RestockSweetCommand) -> AppResult<Sweet> {
        cmd.validate()?;

        let sweet = self.repo.increment_quantity(cmd.id, cmd.quantity).await?;
        record_sweet_restocked(cmd.quantity);
        info!(
            sweet_id = %sweet.id,
            restocked = cmd.quantity,
            quantity = sweet.quantity,
            "Sweet restocked"
        );
        Ok(sweet)
    }
}
