//! 糖果实体

use rust_decimal::Decimal;
use sweetshop_errors::{AppError, AppResult};

use crate::domain::value_objects::SweetId;

/// 名称最短字符数
pub const NAME_MIN_CHARS: usize = 2;
/// 分类最短字符数
pub const CATEGORY_MIN_CHARS: usize = 3;
/// 价格最多小数位
pub const PRICE_MAX_SCALE: u32 = 2;
/// 价格上限（不含），与 NUMERIC(12, 2) 的整数位数一致
pub const PRICE_UPPER_BOUND: i64 = 10_000_000_000;

/// 糖果（库存中的一种商品）
#[derive(Debug, Clone, PartialEq)]
pub struct Sweet {
    pub id: SweetId,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    /// 库存数量，始终 >= 0
    pub quantity: i64,
}

impl Sweet {
    /// 库存是否足够
    pub fn has_stock_for(&self, amount: i64) -> bool {
        amount <= self.quantity
    }

    /// 购买扣减库存
    pub fn purchase(&mut self, amount: i64) -> AppResult<()> {
        if !self.has_stock_for(amount) {
            return Err(AppError::insufficient_stock(amount, self.quantity));
        }
        self.quantity -= amount;
        Ok(())
    }

    /// 补货
    pub fn restock(&mut self, amount: i64) -> AppResult<()> {
        self.quantity = self
            .quantity
            .checked_add(amount)
            .ok_or_else(|| AppError::database("quantity out of range"))?;
        Ok(())
    }

    /// 应用部分更新
    pub fn apply_patch(&mut self, patch: &SweetPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
    }
}

/// 待创建的糖果（ID 由存储分配）
#[derive(Debug, Clone, PartialEq)]
pub struct NewSweet {
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub quantity: i64,
}

/// 部分更新，`None` 表示保持原值
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweetPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<i64>,
}

impl SweetPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.price.is_none()
            && self.quantity.is_none()
    }
}

/// 糖果不存在
pub fn sweet_not_found(id: SweetId) -> AppError {
    AppError::not_found(format!("Sweet with id {} not found", id))
}

// ========== 字段约束 ==========

pub fn name_violation(name: &str) -> Option<String> {
    (name.chars().count() < NAME_MIN_CHARS)
        .then(|| format!("name: must be at least {} characters long", NAME_MIN_CHARS))
}

pub fn category_violation(category: &str) -> Option<String> {
    (category.chars().count() < CATEGORY_MIN_CHARS).then(|| {
        format!(
            "category: must be at least {} characters long",
            CATEGORY_MIN_CHARS
        )
    })
}

pub fn price_violation(price: Decimal) -> Option<String> {
    if price <= Decimal::ZERO {
        return Some("price: must be a positive number".to_string());
    }
    if price >= Decimal::from(PRICE_UPPER_BOUND) {
        return Some(format!("price: must be less than {}", PRICE_UPPER_BOUND));
    }
    if price.normalize().scale() > PRICE_MAX_SCALE {
        return Some(format!(
            "price: must have at most {} decimal places",
            PRICE_MAX_SCALE
        ));
    }
    None
}

pub fn quantity_violation(quantity: i64) -> Option<String> {
    (quantity < 0).then(|| "quantity: must be a non-negative integer".to_string())
}

/// 购买/补货数量必须为正整数
pub fn stock_amount_violation(amount: i64) -> Option<String> {
    (amount <= 0).then(|| "quantity: must be a positive integer".to_string())
}

/// 汇总所有违反的约束
pub fn ensure_valid(violations: impl IntoIterator<Item = Option<String>>) -> AppResult<()> {
    let messages: Vec<String> = violations.into_iter().flatten().collect();
    if messages.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation(messages.join("; ")))
    }
}
