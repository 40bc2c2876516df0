//! 示例数据

use rust_decimal::Decimal;

use crate::domain::entities::NewSweet;

/// 默认示例目录
pub fn sample_catalogue() -> Vec<NewSweet> {
    [
        ("Chocolate Fudge", "Chocolate", 250, 50),
        ("Vanilla Caramel", "Caramel", 225, 40),
        ("Strawberry Delight", "Fruit", 195, 35),
        ("Mint Chocolate", "Chocolate", 275, 30),
        ("Honey Almond", "Nuts", 320, 25),
    ]
    .into_iter()
    .map(|(name, category, cents, quantity)| NewSweet {
        name: name.to_string(),
        category: category.to_string(),
        price: Decimal::new(cents, 2),
        quantity,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{
        category_violation, ensure_valid, name_violation, price_violation, quantity_violation,
    };

    #[test]
    fn test_sample_catalogue_is_valid() {
        let catalogue = sample_catalogue();
        assert_eq!(catalogue.len(), 5);
        for sweet in &catalogue {
            ensure_valid([
                name_violation(&sweet.name),
                category_violation(&sweet.category),
                price_violation(sweet.price),
                quantity_violation(sweet.quantity),
            ])
            .unwrap();
        }
    }
}
