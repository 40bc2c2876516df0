//! 请求/响应数据结构

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sweetshop_errors::{AppError, AppResult};

use crate::application::{
    CreateSweetCommand, ListSweetsQuery, PurchaseSweetCommand, RestockSweetCommand,
    UpdateSweetCommand,
};
use crate::domain::entities::{SortField, SortOrder, Sweet, SweetFilter, SweetPatch, SweetSort};
use crate::domain::value_objects::SweetId;

/// 创建请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSweetRequest {
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub quantity: i64,
}

impl From<CreateSweetRequest> for CreateSweetCommand {
    fn from(req: CreateSweetRequest) -> Self {
        Self {
            name: req.name,
            category: req.category,
            price: req.price,
            quantity: req.quantity,
        }
    }
}

/// 部分更新请求
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSweetRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<i64>,
}

impl UpdateSweetRequest {
    pub fn into_command(self, id: SweetId) -> UpdateSweetCommand {
        UpdateSweetCommand {
            id,
            patch: SweetPatch {
                name: self.name,
                category: self.category,
                price: self.price,
                quantity: self.quantity,
            },
        }
    }
}

/// 购买/补货请求
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct StockRequest {
    pub quantity: i64,
}

impl StockRequest {
    pub fn into_purchase(self, id: SweetId) -> PurchaseSweetCommand {
        PurchaseSweetCommand {
            id,
            quantity: self.quantity,
        }
    }

    pub fn into_restock(self, id: SweetId) -> RestockSweetCommand {
        RestockSweetCommand {
            id,
            quantity: self.quantity,
        }
    }
}

/// 列表查询参数
///
/// 价格与排序先按字符串接收，解析失败时返回带字段名的 400
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSweetsParams {
    pub name: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

impl ListSweetsParams {
    pub fn into_query(self) -> AppResult<ListSweetsQuery> {
        let filter = SweetFilter {
            name: self.name,
            category: self.category,
            min_price: parse_price_bound("minPrice", self.min_price)?,
            max_price: parse_price_bound("maxPrice", self.max_price)?,
        };

        let sort = match non_empty(self.sort_by) {
            Some(field) => {
                let order = match non_empty(self.order) {
                    Some(order) => order.parse::<SortOrder>()?,
                    None => SortOrder::default(),
                };
                Some(SweetSort::new(field.parse::<SortField>()?, order))
            }
            None => None,
        };

        Ok(ListSweetsQuery { filter, sort })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_price_bound(field: &str, raw: Option<String>) -> AppResult<Option<Decimal>> {
    non_empty(raw)
        .map(|value| {
            Decimal::from_str(value.trim())
                .map_err(|_| AppError::validation(format!("{}: must be a number", field)))
        })
        .transpose()
}

/// 糖果响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweetResponse {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub quantity: i64,
}

impl From<Sweet> for SweetResponse {
    fn from(sweet: Sweet) -> Self {
        Self {
            id: sweet.id.value(),
            name: sweet.name,
            category: sweet.category,
            price: sweet.price,
            quantity: sweet.quantity,
        }
    }
}
