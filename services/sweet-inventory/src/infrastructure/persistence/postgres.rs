//! PostgreSQL repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use sweetshop_errors::{AppError, AppResult};

use crate::domain::entities::{
    NewSweet, Sweet, SweetFilter, SweetPatch, SweetSort, sweet_not_found,
};
use crate::domain::repositories::SweetRepository;
use crate::domain::value_objects::SweetId;

use super::rows::SweetRow;

const SWEET_COLUMNS: &str = "id, name, category, price, quantity";

pub struct PostgresSweetRepository {
    pool: PgPool,
}

impl PostgresSweetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 清空表并写入给定记录（ID 从 1 重新分配），在同一事务内完成
    pub async fn replace_all(&self, sweets: &[NewSweet]) -> AppResult<Vec<Sweet>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("开启事务失败: {}", e)))?;

        sqlx::query("TRUNCATE TABLE sweets RESTART IDENTITY")
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("清空糖果表失败: {}", e)))?;

        let mut inserted = Vec::with_capacity(sweets.len());
        for sweet in sweets {
            let row = sqlx::query_as::<_, SweetRow>(&format!(
                "INSERT INTO sweets (name, category, price, quantity) VALUES ($1, $2, $3, $4) RETURNING {}",
                SWEET_COLUMNS
            ))
            .bind(&sweet.name)
            .bind(&sweet.category)
            .bind(sweet.price)
            .bind(sweet.quantity)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("写入糖果失败: {}", e)))?;
            inserted.push(row.into());
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("提交事务失败: {}", e)))?;

        Ok(inserted)
    }

    /// 条件更新未命中后的慢路径
    ///
    /// 行锁内重新读取库存，返回的 `available` 与判断所用的值一致；
    /// 若期间已有补货则在同一事务内完成扣减
    async fn decrement_locked(&self, id: SweetId, amount: i64) -> AppResult<Sweet> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("开启事务失败: {}", e)))?;

        let current = sqlx::query_as::<_, SweetRow>(&format!(
            "SELECT {} FROM sweets WHERE id = $1 FOR UPDATE",
            SWEET_COLUMNS
        ))
        .bind(id.0)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("查询库存失败: {}", e)))?
        .map(Sweet::from)
        .ok_or_else(|| sweet_not_found(id))?;

        if !current.has_stock_for(amount) {
            return Err(AppError::insufficient_stock(amount, current.quantity));
        }

        let row = sqlx::query_as::<_, SweetRow>(&format!(
            "UPDATE sweets SET quantity = quantity - $2 WHERE id = $1 RETURNING {}",
            SWEET_COLUMNS
        ))
        .bind(id.0)
        .bind(amount)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("扣减库存失败: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("提交事务失败: {}", e)))?;

        Ok(row.into())
    }
}

#[async_trait]
impl SweetRepository for PostgresSweetRepository {
    async fn find_by_id(&self, id: SweetId) -> AppResult<Option<Sweet>> {
        let row = sqlx::query_as::<_, SweetRow>(&format!(
            "SELECT {} FROM sweets WHERE id = $1",
            SWEET_COLUMNS
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("查询糖果失败: {}", e)))?;

        Ok(row.map(Into::into))
    }

    async fn list(&self, filter: &SweetFilter, sort: Option<SweetSort>) -> AppResult<Vec<Sweet>> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {} FROM sweets WHERE TRUE",
            SWEET_COLUMNS
        ));

        if let Some(name) = &filter.name {
            qb.push(" AND strpos(lower(name), lower(")
                .push_bind(name.clone())
                .push(")) > 0");
        }
        if let Some(category) = &filter.category {
            qb.push(" AND category = ").push_bind(category.clone());
        }
        if let Some(min) = filter.min_price {
            qb.push(" AND price >= ").push_bind(min);
        }
        if let Some(max) = filter.max_price {
            qb.push(" AND price <= ").push_bind(max);
        }

        // 列名和方向只来自枚举
        match sort {
            Some(sort) => qb.push(format!(
                " ORDER BY {} {}, id ASC",
                sort.field.column(),
                sort.order.keyword()
            )),
            None => qb.push(" ORDER BY id ASC"),
        };

        let rows = qb
            .build_query_as::<SweetRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("查询糖果列表失败: {}", e)))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, sweet: &NewSweet) -> AppResult<Sweet> {
        let row = sqlx::query_as::<_, SweetRow>(&format!(
            "INSERT INTO sweets (name, category, price, quantity) VALUES ($1, $2, $3, $4) RETURNING {}",
            SWEET_COLUMNS
        ))
        .bind(&sweet.name)
        .bind(&sweet.category)
        .bind(sweet.price)
        .bind(sweet.quantity)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("保存糖果失败: {}", e)))?;

        Ok(row.into())
    }

    async fn update(&self, id: SweetId, patch: &SweetPatch) -> AppResult<Option<Sweet>> {
        let row = sqlx::query_as::<_, SweetRow>(&format!(
            r#"
            UPDATE sweets SET
                name = COALESCE($2, name),
                category = COALESCE($3, category),
                price = COALESCE($4, price),
                quantity = COALESCE($5, quantity)
            WHERE id = $1
            RETURNING {}
            "#,
            SWEET_COLUMNS
        ))
        .bind(id.0)
        .bind(patch.name.as_deref())
        .bind(patch.category.as_deref())
        .bind(patch.price)
        .bind(patch.quantity)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("更新糖果失败: {}", e)))?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: SweetId) -> AppResult<Option<Sweet>> {
        let row = sqlx::query_as::<_, SweetRow>(&format!(
            "DELETE FROM sweets WHERE id = $1 RETURNING {}",
            SWEET_COLUMNS
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("删除糖果失败: {}", e)))?;

        Ok(row.map(Into::into))
    }

    async fn decrement_quantity(&self, id: SweetId, amount: i64) -> AppResult<Sweet> {
        let row = sqlx::query_as::<_, SweetRow>(&format!(
            "UPDATE sweets SET quantity = quantity - $2 WHERE id = $1 AND quantity >= $2 RETURNING {}",
            SWEET_COLUMNS
        ))
        .bind(id.0)
        .bind(amount)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("扣减库存失败: {}", e)))?;

        if let Some(row) = row {
            return Ok(row.into());
        }

        self.decrement_locked(id, amount).await
    }

    async fn increment_quantity(&self, id: SweetId, amount: i64) -> AppResult<Sweet> {
        let row = sqlx::query_as::<_, SweetRow>(&format!(
            "UPDATE sweets SET quantity = quantity + $2 WHERE id = $1 RETURNING {}",
            SWEET_COLUMNS
        ))
        .bind(id.0)
        .bind(amount)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("增加库存失败: {}", e)))?;

        row.map(Into::into).ok_or_else(|| sweet_not_found(id))
    }
}
