//! 数据库行映射结构

use rust_decimal::Decimal;
use sqlx::FromRow;

use crate::domain::entities::Sweet;
use crate::domain::value_objects::SweetId;

/// 糖果数据库行
#[derive(Debug, FromRow)]
pub struct SweetRow {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub quantity: i64,
}

impl From<SweetRow> for Sweet {
    fn from(row: SweetRow) -> Self {
        Self {
            id: SweetId(row.id),
            name: row.name,
            category: row.category,
            price: row.price,
            quantity: row.quantity,
        }
    }
}
