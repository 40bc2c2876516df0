//! 库存服务行为测试（内存仓储）

use std::collections::HashSet;
use std::sync::Arc;

use rust_decimal::Decimal;
use sweet_inventory::application::{
    CreateSweetCommand, GetSweetQuery, ListSweetsQuery, PurchaseSweetCommand,
    RestockSweetCommand, SweetService,
};
use sweet_inventory::domain::entities::{SortField, SortOrder, SweetFilter, SweetSort};
use sweet_inventory::domain::value_objects::SweetId;
use sweet_inventory::infrastructure::persistence::InMemorySweetRepository;
use sweetshop_errors::AppError;

fn new_service() -> SweetService {
    SweetService::new(Arc::new(InMemorySweetRepository::new()))
}

fn cmd(name: &str, category: &str, price: Decimal, quantity: i64) -> CreateSweetCommand {
    CreateSweetCommand {
        name: name.to_string(),
        category: category.to_string(),
        price,
        quantity,
    }
}

/// 搜索/排序用的固定数据
async fn seeded_service() -> SweetService {
    let service = new_service();
    for c in [
        cmd("Gummy Worms", "Candy", Decimal::new(25, 1), 100),
        cmd("Chocolate Bar", "Chocolate", Decimal::new(15, 0), 200),
        cmd("Apple Tart", "Pastry", Decimal::new(40, 0), 30),
        cmd("Caramel Chew", "Candy", Decimal::new(30, 0), 150),
    ] {
        service.create_sweet(c).await.unwrap();
    }
    service
}

#[tokio::test]
async fn test_creates_assign_unique_ids() {
    let service = new_service();
    let mut ids = HashSet::new();
    for i in 0..5 {
        let sweet = service
            .create_sweet(cmd(&format!("Sweet {}", i), "Candy", Decimal::ONE, 1))
            .await
            .unwrap();
        assert!(ids.insert(sweet.id), "id {} assigned twice", sweet.id);
    }
}

#[tokio::test]
async fn test_create_rejects_invalid_fields() {
    let service = new_service();
    let cases = [
        cmd("A", "Candy", Decimal::ONE, 1),
        cmd("Lollipop", "Ca", Decimal::ONE, 1),
        cmd("Lollipop", "Candy", Decimal::ZERO, 1),
        cmd("Lollipop", "Candy", Decimal::new(-5, 0), 1),
        cmd("Lollipop", "Candy", Decimal::ONE, -1),
    ];
    for case in cases {
        let result = service.create_sweet(case.clone()).await;
        assert!(
            matches!(result, Err(AppError::Validation(_))),
            "{:?} should be rejected",
            case
        );
    }
}

#[tokio::test]
async fn test_purchase_exact_stock_yields_zero() {
    let service = new_service();
    let sweet = service
        .create_sweet(cmd("Chocolate Fudge", "Special", Decimal::new(5, 0), 20))
        .await
        .unwrap();

    let updated = service
        .purchase_sweet(PurchaseSweetCommand {
            id: sweet.id,
            quantity: 20,
        })
        .await
        .unwrap();
    assert_eq!(updated.quantity, 0);
}

#[tokio::test]
async fn test_purchase_over_stock_leaves_quantity_unchanged() {
    let service = new_service();
    let sweet = service
        .create_sweet(cmd("Chocolate Fudge", "Special", Decimal::new(5, 0), 20))
        .await
        .unwrap();

    let result = service
        .purchase_sweet(PurchaseSweetCommand {
            id: sweet.id,
            quantity: 25,
        })
        .await;
    assert!(matches!(
        result,
        Err(AppError::InsufficientStock {
            requested: 25,
            available: 20
        })
    ));

    let current = service.get_sweet(GetSweetQuery { id: sweet.id }).await.unwrap();
    assert_eq!(current.quantity, 20);
}

#[tokio::test]
async fn test_restock_adds_exact_amount() {
    let service = new_service();
    let sweet = service
        .create_sweet(cmd("Chocolate Fudge", "Special", Decimal::new(5, 0), 0))
        .await
        .unwrap();

    let updated = service
        .restock_sweet(RestockSweetCommand {
            id: sweet.id,
            quantity: 25,
        })
        .await
        .unwrap();
    assert_eq!(updated.quantity, 25);
}

#[tokio::test]
async fn test_restock_unknown_is_not_found() {
    let service = new_service();
    let result = service
        .restock_sweet(RestockSweetCommand {
            id: SweetId(999),
            quantity: 5,
        })
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let service = new_service();
    let sweet = service
        .create_sweet(cmd("Lollipop", "Candy", Decimal::ONE, 3))
        .await
        .unwrap();

    let deleted = service.delete_sweet(sweet.id).await.unwrap();
    assert_eq!(deleted, sweet);

    let result = service.get_sweet(GetSweetQuery { id: sweet.id }).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    let again = service.delete_sweet(sweet.id).await;
    assert!(matches!(again, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_get_on_empty_store_is_not_found() {
    let service = new_service();
    let result = service.get_sweet(GetSweetQuery { id: SweetId(999) }).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_category_filter_returns_only_matching() {
    let service = seeded_service().await;
    let sweets = service
        .list_sweets(ListSweetsQuery {
            filter: SweetFilter {
                category: Some("Candy".to_string()),
                ..Default::default()
            },
            sort: None,
        })
        .await
        .unwrap();

    assert_eq!(sweets.len(), 2);
    assert!(sweets.iter().all(|s| s.category == "Candy"));
}

#[tokio::test]
async fn test_name_filter_is_case_insensitive() {
    let service = seeded_service().await;
    let sweets = service
        .list_sweets(ListSweetsQuery {
            filter: SweetFilter {
                name: Some("BAR".to_string()),
                ..Default::default()
            },
            sort: None,
        })
        .await
        .unwrap();

    assert_eq!(sweets.len(), 1);
    assert_eq!(sweets[0].name, "Chocolate Bar");
}

#[tokio::test]
async fn test_price_range_is_inclusive() {
    let service = seeded_service().await;
    let sweets = service
        .list_sweets(ListSweetsQuery {
            filter: SweetFilter {
                min_price: Some(Decimal::new(15, 0)),
                max_price: Some(Decimal::new(30, 0)),
                ..Default::default()
            },
            sort: None,
        })
        .await
        .unwrap();

    let names: Vec<&str> = sweets.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Chocolate Bar", "Caramel Chew"]);
}

#[tokio::test]
async fn test_sort_by_price_desc() {
    let service = seeded_service().await;
    let sweets = service
        .list_sweets(ListSweetsQuery {
            filter: SweetFilter::default(),
            sort: Some(SweetSort::new(SortField::Price, SortOrder::Desc)),
        })
        .await
        .unwrap();

    let prices: Vec<Decimal> = sweets.iter().map(|s| s.price).collect();
    assert_eq!(
        prices,
        vec![
            Decimal::new(40, 0),
            Decimal::new(30, 0),
            Decimal::new(15, 0),
            Decimal::new(25, 1),
        ]
    );
}

#[tokio::test]
async fn test_no_match_is_empty_not_error() {
    let service = seeded_service().await;
    let sweets = service
        .list_sweets(ListSweetsQuery {
            filter: SweetFilter {
                min_price: Some(Decimal::new(100, 0)),
                max_price: Some(Decimal::new(1, 0)),
                ..Default::default()
            },
            sort: None,
        })
        .await
        .unwrap();
    assert!(sweets.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_purchases_never_oversell() {
    let service = Arc::new(new_service());
    let sweet = service
        .create_sweet(cmd("Chocolate Fudge", "Special", Decimal::new(5, 0), 20))
        .await
        .unwrap();

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                service
                    .purchase_sweet(PurchaseSweetCommand {
                        id: sweet.id,
                        quantity: 3,
                    })
                    .await
            })
        })
        .collect();

    let mut succeeded = 0;
    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => succeeded += 1,
            Err(AppError::InsufficientStock { .. }) => rejected += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(succeeded, 6);
    assert_eq!(rejected, 4);
    let current = service.get_sweet(GetSweetQuery { id: sweet.id }).await.unwrap();
    assert_eq!(current.quantity, 2);
}

#[tokio::test]
async fn test_sort_by_name_ignores_case() {
    let service = new_service();
    for name in ["apple pie", "Banana Split", "cherry tart"] {
        service
            .create_sweet(cmd(name, "Dessert", Decimal::ONE, 1))
            .await
            .unwrap();
    }

    let sweets = service
        .list_sweets(ListSweetsQuery {
            filter: SweetFilter::default(),
            sort: Some(SweetSort::new(SortField::Name, SortOrder::Asc)),
        })
        .await
        .unwrap();
    let names: Vec<&str> = sweets.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["apple pie", "Banana Split", "cherry tart"]);
}
