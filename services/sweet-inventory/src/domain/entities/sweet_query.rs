//! 列表查询条件

use std::cmp::Ordering;
use std::str::FromStr;

use rust_decimal::Decimal;
use sweetshop_errors::AppError;

use super::Sweet;

/// 列表筛选条件，所有条件为 AND 关系
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweetFilter {
    /// 名称子串，不区分大小写
    pub name: Option<String>,
    /// 分类，精确匹配
    pub category: Option<String>,
    /// 价格下限（含）
    pub min_price: Option<Decimal>,
    /// 价格上限（含）
    pub max_price: Option<Decimal>,
}

impl SweetFilter {
    /// 空字符串视为未设置
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.filter(|s| !s.is_empty()),
            category: self.category.filter(|s| !s.is_empty()),
            ..self
        }
    }

    pub fn matches(&self, sweet: &Sweet) -> bool {
        if let Some(name) = &self.name {
            if !sweet.name.to_lowercase().contains(&name.to_lowercase()) {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if sweet.category != *category {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if sweet.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if sweet.price > max {
                return false;
            }
        }
        true
    }
}

/// 排序字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Price,
}

impl SortField {
    /// 排序表达式（只来自此枚举，不拼接外部输入）
    ///
    /// 名称按小写后的码点顺序比较，与内存实现的 `compare` 一致
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Name => "lower(name) COLLATE \"C\"",
            SortField::Price => "price",
        }
    }
}

impl FromStr for SortField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortField::Name),
            "price" => Ok(SortField::Price),
            _ => Err(AppError::validation("sortBy: must be one of name, price")),
        }
    }
}

/// 排序方向
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn keyword(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(AppError::validation("order: must be one of asc, desc")),
        }
    }
}

/// 排序选项，相同值按 ID 升序
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweetSort {
    pub field: SortField,
    pub order: SortOrder,
}

impl SweetSort {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    pub fn compare(&self, a: &Sweet, b: &Sweet) -> Ordering {
        let primary = match self.field {
            SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortField::Price => a.price.cmp(&b.price),
        };
        let primary = match self.order {
            SortOrder::Asc => primary,
            SortOrder::Desc => primary.reverse(),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}
