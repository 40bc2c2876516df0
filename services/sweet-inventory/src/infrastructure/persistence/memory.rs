//! 内存仓储
//!
//! 检查与修改在同一把锁内完成，行为与 PostgreSQL 条件更新一致

use async_trait::async_trait;
use sweetshop_errors::AppResult;
use tokio::sync::Mutex;

use crate::domain::entities::{
    NewSweet, Sweet, SweetFilter, SweetPatch, SweetSort, sweet_not_found,
};
use crate::domain::repositories::SweetRepository;
use crate::domain::value_objects::SweetId;

#[derive(Debug)]
struct Store {
    next_id: i64,
    /// 按插入顺序（即 ID 升序）保存
    sweets: Vec<Sweet>,
}

#[derive(Debug)]
pub struct InMemorySweetRepository {
    store: Mutex<Store>,
}

impl InMemorySweetRepository {
    pub fn new() -> Self {
        Self {
            store: Mutex::new(Store {
                next_id: 1,
                sweets: Vec::new(),
            }),
        }
    }
}

impl Default for InMemorySweetRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    fn get_mut(&mut self, id: SweetId) -> Option<&mut Sweet> {
        self.sweets.iter_mut().find(|s| s.id == id)
    }
}

#[async_trait]
impl SweetRepository for InMemorySweetRepository {
    async fn find_by_id(&self, id: SweetId) -> AppResult<Option<Sweet>> {
        let store = self.store.lock().await;
        Ok(store.sweets.iter().find(|s| s.id == id).cloned())
    }

    async fn list(&self, filter: &SweetFilter, sort: Option<SweetSort>) -> AppResult<Vec<Sweet>> {
        let store = self.store.lock().await;
        let mut sweets: Vec<Sweet> = store
            .sweets
            .iter()
            .filter(|s| filter.matches(s))
            .cloned()
            .collect();
        if let Some(sort) = sort {
            sweets.sort_by(|a, b| sort.compare(a, b));
        }
        Ok(sweets)
    }

    async fn insert(&self, sweet: &NewSweet) -> AppResult<Sweet> {
        let mut store = self.store.lock().await;
        let sweet = Sweet {
            id: SweetId(store.next_id),
            name: sweet.name.clone(),
            category: sweet.category.clone(),
            price: sweet.price,
            quantity: sweet.quantity,
        };
        store.next_id += 1;
        store.sweets.push(sweet.clone());
        Ok(sweet)
    }

    async fn update(&self, id: SweetId, patch: &SweetPatch) -> AppResult<Option<Sweet>> {
        let mut store = self.store.lock().await;
        Ok(store.get_mut(id).map(|sweet| {
            sweet.apply_patch(patch);
            sweet.clone()
        }))
    }

    async fn delete(&self, id: SweetId) -> AppResult<Option<Sweet>> {
        let mut store = self.store.lock().await;
        let position = store.sweets.iter().position(|s| s.id == id);
        Ok(position.map(|index| store.sweets.remove(index)))
    }

    async fn decrement_quantity(&self, id: SweetId, amount: i64) -> AppResult<Sweet> {
        let mut store = self.store.lock().await;
        let sweet = store.get_mut(id).ok_or_else(|| sweet_not_found(id))?;
        sweet.purchase(amount)?;
        Ok(sweet.clone())
    }

    async fn increment_quantity(&self, id: SweetId, amount: i64) -> AppResult<Sweet> {
        let mut store = self.store.lock().await;
        let sweet = store.get_mut(id).ok_or_else(|| sweet_not_found(id))?;
        sweet.restock(amount)?;
        Ok(sweet.clone())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn new_sweet(name: &str) -> NewSweet {
        NewSweet {
            name: name.to_string(),
            category: "Candy".to_string(),
            price: Decimal::ONE,
            quantity: 5,
        }
    }

    #[tokio::test]
    async fn test_ids_are_never_reused() {
        let repo = InMemorySweetRepository::new();
        let first = repo.insert(&new_sweet("Lollipop")).await.unwrap();
        repo.delete(first.id).await.unwrap();
        let second = repo.insert(&new_sweet("Toffee")).await.unwrap();
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_decrement_failure_leaves_quantity() {
        let repo = InMemorySweetRepository::new();
        let sweet = repo.insert(&new_sweet("Lollipop")).await.unwrap();
        assert!(repo.decrement_quantity(sweet.id, 6).await.is_err());
        let current = repo.find_by_id(sweet.id).await.unwrap().unwrap();
        assert_eq!(current.quantity, 5);
    }
}
