// ==========================================
// 拣选清单富化引擎集成测试
// ==========================================
// 测试目标: 验证 FEFO 选位、部分履约降级、坐标解析与优先级评分
// 存储: 临时 SQLite (StockRepository / LocationRepository)
// ==========================================


use chrono::{Duration, Local};
use test_helpers::{create_test_db, insert_location, insert_stock};
use wms_pick_optimizer::domain::pick::{PickRequestItem, Position};
use wms_pick_optimizer::domain::weight_model::WeightModel;
use wms_pick_optimizer::engine::{LayoutEngine, PickListEnricher};
use wms_pick_optimizer::repository::{LocationRepository, StockRepository};

fn days_from_now(offset: i64) -> String {
    (Local::now().date_naive() + Duration::days(offset))
        .format("%Y-%m-%d")
        .to_string()
}

// ==========================================
// 测试用例 1: FEFO 选位 - 效期最早优先
// ==========================================

#[test]
fn test_enrich_picks_earliest_expiry_first() {
    let (_tmp, conn) = create_test_db().unwrap();
    insert_location(&conn, "A-01", "A-Zone", Some((5.0, 5.0, 0.0)));
    insert_location(&conn, "A-02", "A-Zone", Some((50.0, 5.0, 0.0)));

    // 同 SKU 两个库位: A-02 效期更早
    insert_stock(&conn, "S1", "A-01", "SKU-1", 30.0, 1.0, Some(&days_from_now(60)), "OCCUPIED");
    insert_stock(&conn, "S2", "A-02", "SKU-1", 30.0, 1.0, Some(&days_from_now(10)), "OCCUPIED");

    let stock = StockRepository::new(conn.clone());
    let locations = LocationRepository::new(conn);
    let outcome = PickListEnricher::new()
        .enrich(
            &[PickRequestItem::new("SKU-1", 5.0)],
            &stock,
            &LayoutEngine::default(),
            &locations,
            &WeightModel::default(),
            Local::now().date_naive(),
        )
        .unwrap();

    assert_eq!(outcome.items.len(), 1);
    assert!(outcome.unfulfilled_skus.is_empty());
    assert_eq!(outcome.items[0].location_id, "A-02");
}

// ==========================================
// 测试用例 2: 同效期 - 可用数量大者优先(整托整合)
// ==========================================

#[test]
fn test_enrich_prefers_fuller_pallet_on_equal_expiry() {
    let (_tmp, conn) = create_test_db().unwrap();
    insert_location(&conn, "B-01", "B-Zone", Some((1.0, 0.0, 0.0)));
    insert_location(&conn, "B-02", "B-Zone", Some((2.0, 0.0, 0.0)));

    let expiry = days_from_now(30);
    insert_stock(&conn, "S1", "B-01", "SKU-2", 8.0, 1.0, Some(&expiry), "OCCUPIED");
    insert_stock(&conn, "S2", "B-02", "SKU-2", 40.0, 1.0, Some(&expiry), "OCCUPIED");

    let stock = StockRepository::new(conn.clone());
    let locations = LocationRepository::new(conn);
    let outcome = PickListEnricher::new()
        .enrich(
            &[PickRequestItem::new("SKU-2", 5.0)],
            &stock,
            &LayoutEngine::default(),
            &locations,
            &WeightModel::default(),
            Local::now().date_naive(),
        )
        .unwrap();

    assert_eq!(outcome.items[0].location_id, "B-02");
    assert_eq!(outcome.items[0].available_quantity, 40.0);
}

// ==========================================
// 测试用例 3: 资格过滤 - 数量不足/非 OCCUPIED 排除
// ==========================================

#[test]
fn test_enrich_filters_ineligible_stock() {
    let (_tmp, conn) = create_test_db().unwrap();
    insert_location(&conn, "C-01", "C-Zone", Some((1.0, 0.0, 0.0)));
    insert_location(&conn, "C-02", "C-Zone", Some((2.0, 0.0, 0.0)));
    insert_location(&conn, "C-03", "C-Zone", Some((3.0, 0.0, 0.0)));

    // 数量不足
    insert_stock(&conn, "S1", "C-01", "SKU-3", 2.0, 1.0, Some(&days_from_now(5)), "OCCUPIED");
    // 已预留
    insert_stock(&conn, "S2", "C-02", "SKU-3", 50.0, 1.0, Some(&days_from_now(8)), "RESERVED");
    // 合格
    insert_stock(&conn, "S3", "C-03", "SKU-3", 50.0, 1.0, Some(&days_from_now(90)), "OCCUPIED");

    let stock = StockRepository::new(conn.clone());
    let locations = LocationRepository::new(conn);
    let outcome = PickListEnricher::new()
        .enrich(
            &[PickRequestItem::new("SKU-3", 10.0)],
            &stock,
            &LayoutEngine::default(),
            &locations,
            &WeightModel::default(),
            Local::now().date_naive(),
        )
        .unwrap();

    assert_eq!(outcome.items.len(), 1);
    assert_eq!(outcome.items[0].location_id, "C-03");
}

// ==========================================
// 测试用例 4: 无可拣库存 - 部分履约降级
// ==========================================

#[test]
fn test_enrich_drops_unfulfillable_items() {
    let (_tmp, conn) = create_test_db().unwrap();
    insert_location(&conn, "A-01", "A-Zone", Some((1.0, 0.0, 0.0)));
    insert_stock(&conn, "S1", "A-01", "SKU-OK", 20.0, 1.0, None, "OCCUPIED");

    let stock = StockRepository::new(conn.clone());
    let locations = LocationRepository::new(conn);
    let outcome = PickListEnricher::new()
        .enrich(
            &[
                PickRequestItem::new("SKU-OK", 5.0),
                PickRequestItem::new("SKU-GHOST", 1.0),
            ],
            &stock,
            &LayoutEngine::default(),
            &locations,
            &WeightModel::default(),
            Local::now().date_naive(),
        )
        .unwrap();

    assert_eq!(outcome.items.len(), 1);
    assert_eq!(outcome.items[0].sku, "SKU-OK");
    assert_eq!(outcome.unfulfilled_skus, vec!["SKU-GHOST".to_string()]);
}

// ==========================================
// 测试用例 5: 坐标解析 - 显式坐标缺失时走合成布局
// ==========================================

#[test]
fn test_enrich_synthetic_positions_when_coordinates_missing() {
    let (_tmp, conn) = create_test_db().unwrap();
    // 无显式坐标 → 合成网格: Premium Zone 基准 (60,0),首位库位落 (60,0,0)
    insert_location(&conn, "P-01", "Premium Zone", None);
    insert_location(&conn, "P-02", "Premium Zone", None);
    insert_stock(&conn, "S1", "P-02", "SKU-4", 10.0, 1.0, None, "OCCUPIED");

    let stock = StockRepository::new(conn.clone());
    let locations = LocationRepository::new(conn);
    let outcome = PickListEnricher::new()
        .enrich(
            &[PickRequestItem::new("SKU-4", 1.0)],
            &stock,
            &LayoutEngine::default(),
            &locations,
            &WeightModel::default(),
            Local::now().date_naive(),
        )
        .unwrap();

    // P-02 是 Premium Zone 列出的第二个库位 → (65, 0, 0)
    assert_eq!(outcome.items[0].position, Position::new(65.0, 0.0, 0.0));
}

// ==========================================
// 测试用例 6: 优先级分 - 效期紧迫度 + 库区加成
// ==========================================

#[test]
fn test_enrich_priority_score() {
    let (_tmp, conn) = create_test_db().unwrap();
    insert_location(&conn, "PF-01", "PF-Zone", Some((1.0, 0.0, 0.0)));
    // 距效期 3 天,PF-Zone rank=1: 100 + 50 + (6-1)*10 = 200
    insert_stock(&conn, "S1", "PF-01", "SKU-5", 10.0, 1.0, Some(&days_from_now(3)), "OCCUPIED");

    let stock = StockRepository::new(conn.clone());
    let locations = LocationRepository::new(conn);
    let outcome = PickListEnricher::new()
        .enrich(
            &[PickRequestItem::new("SKU-5", 1.0)],
            &stock,
            &LayoutEngine::default(),
            &locations,
            &WeightModel::default(),
            Local::now().date_naive(),
        )
        .unwrap();

    assert!((outcome.items[0].priority_score - 200.0).abs() < 1e-12);
}
