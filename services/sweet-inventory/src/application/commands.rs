//! Sweet commands

use rust_decimal::Decimal;
use sweetshop_errors::{AppError, AppResult};

use crate::domain::entities::{
    NewSweet, SweetPatch, category_violation, ensure_valid, name_violation, price_violation,
    quantity_violation, stock_amount_violation,
};
use crate::domain::value_objects::SweetId;

/// 创建糖果命令
#[derive(Debug, Clone)]
pub struct CreateSweetCommand {
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub quantity: i64,
}

impl CreateSweetCommand {
    /// 一次性报告所有违反的字段
    pub fn validate(&self) -> AppResult<()> {
        ensure_valid([
            name_violation(&self.name),
            category_violation(&self.category),
            price_violation(self.price),
            quantity_violation(self.quantity),
        ])
    }

    pub fn into_new_sweet(self) -> NewSweet {
        NewSweet {
            name: self.name,
            category: self.category,
            price: self.price,
            quantity: self.quantity,
        }
    }
}

/// 更新糖果命令（部分字段）
#[derive(Debug, Clone)]
pub struct UpdateSweetCommand {
    pub id: SweetId,
    pub patch: SweetPatch,
}

impl UpdateSweetCommand {
    pub fn validate(&self) -> AppResult<()> {
        if self.patch.is_empty() {
            return Err(AppError::validation(
                "at least one of name, category, price, quantity must be provided",
            ));
        }
        ensure_valid([
            self.patch.name.as_deref().and_then(name_violation),
            self.patch.category.as_deref().and_then(category_violation),
            self.patch.price.and_then(price_violation),
            self.patch.quantity.and_then(quantity_violation),
        ])
    }
}

/// 购买命令
#[derive(Debug, Clone, Copy)]
pub struct PurchaseSweetCommand {
    pub id: SweetId,
    pub quantity: i64,
}

impl PurchaseSweetCommand {
    pub fn validate(&self) -> AppResult<()> {
        ensure_valid([stock_amount_violation(self.quantity)])
    }
}

/// 补货命令
#[derive(Debug, Clone, Copy)]
pub struct RestockSweetCommand {
    pub id: SweetId,
    pub quantity: i64,
}

impl RestockSweetCommand {
    pub fn validate(&self) -> AppResult<()> {
        ensure_valid([stock_amount_violation(self.quantity)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: &str, category: &str, price: Decimal, quantity: i64) -> CreateSweetCommand {
        CreateSweetCommand {
            name: name.to_string(),
            category: category.to_string(),
            price,
            quantity,
        }
    }

    #[test]
    fn test_create_command_valid() {
        assert!(create("Chocolate Bar", "Chocolate", Decimal::new(250, 2), 10)
            .validate()
            .is_ok());
        assert!(create("Ab", "Pie", Decimal::new(1, 2), 0).validate().is_ok());
    }

    #[test]
    fn test_create_command_reports_all_fields() {
        let err = create("A", "Ca", Decimal::ZERO, -1).validate().unwrap_err();
        let AppError::Validation(message) = err else {
            panic!("expected validation error");
        };
        for field in ["name:", "category:", "price:", "quantity:"] {
            assert!(message.contains(field), "missing {field} in {message}");
        }
    }

    #[test]
    fn test_update_command_rejects_empty_patch() {
        let cmd = UpdateSweetCommand {
            id: SweetId(1),
            patch: SweetPatch::default(),
        };
        assert!(matches!(cmd.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_update_command_checks_present_fields_only() {
        let ok = UpdateSweetCommand {
            id: SweetId(1),
            patch: SweetPatch {
                quantity: Some(0),
                ..Default::default()
            },
        };
        assert!(ok.validate().is_ok());

        let bad = UpdateSweetCommand {
            id: SweetId(1),
            patch: SweetPatch {
                name: Some("X".to_string()),
                ..Default::default()
            },
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_stock_commands_require_positive_quantity() {
        for quantity in [0, -5] {
            let purchase = PurchaseSweetCommand {
                id: SweetId(1),
                quantity,
            };
            let restock = RestockSweetCommand {
                id: SweetId(1),
                quantity,
            };
            assert!(purchase.validate().is_err());
            assert!(restock.validate().is_err());
        }
    }
}
