//! 库存业务指标

use metrics::counter;

/// 记录新建糖果
pub fn record_sweet_created(category: &str) {
    let labels = [("category", category.to_string())];
    counter!("sweets_created_total", &labels).increment(1);
}

/// 记录成功购买（件数）
pub fn record_sweet_purchased(quantity: i64) {
    counter!("sweets_purchased_total").increment(quantity.unsigned_abs());
}

/// 记录补货（件数）
pub fn record_sweet_restocked(quantity: i64) {
    counter!("sweets_restocked_total").increment(quantity.unsigned_abs());
}

/// 记录被拒绝的购买
pub fn record_purchase_rejected(reason: &'static str) {
    counter!("sweet_purchase_rejected_total", "reason" => reason).increment(1);
}
