//! 标识符

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use sweetshop_errors::{AppError, AppResult};

/// 糖果 ID（由数据库分配，正整数）
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From,
)]
#[display("{_0}")]
pub struct SweetId(pub i64);

impl SweetId {
    /// 校验外部输入的 ID
    pub fn parse(raw: &str) -> AppResult<Self> {
        let value: i64 = raw
            .trim()
            .parse()
            .map_err(|_| AppError::validation("Invalid ID format"))?;
        Self::try_from_i64(value)
    }

    pub fn try_from_i64(value: i64) -> AppResult<Self> {
        if value <= 0 {
            return Err(AppError::validation(
                "Invalid ID format: id must be a positive integer",
            ));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
