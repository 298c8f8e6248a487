// ==========================================
// 导入层集成测试
// ==========================================
// 测试目标: 验证 CSV 输入表加载、可选表缺省与错误路径
// ==========================================

use chrono::NaiveDate;
use procure_aps::domain::SiteType;
use procure_aps::importer::{load_planning_input, ImportError};
use std::fs;
use std::path::Path;

fn write_required_tables(dir: &Path) {
    fs::write(
        dir.join("time_periods.csv"),
        "Period ID,Start Date,End Date\n\
         1,2026-03-02,2026-03-08\n\
         2,2026-03-09,2026-03-15\n",
    )
    .unwrap();
    fs::write(
        dir.join("sites.csv"),
        "Site ID,Site Name,Site Type\n\
         SUP,华东供应商,Supplier\n\
         WH,区域配送仓,Warehouse\n",
    )
    .unwrap();
    fs::write(
        dir.join("items.csv"),
        "Item ID,Item Name,Min Order Qty.,Max Order Qty.,Min Transfer Qty.\n\
         A01,罐装咖啡豆,50,5000,20\n",
    )
    .unwrap();
    fs::write(
        dir.join("procurement_costs.csv"),
        "Item ID,Period ID,Unit Cost\n\
         A01,1,2.5\n\
         A01,2,2.6\n",
    )
    .unwrap();
    fs::write(
        dir.join("inventory.csv"),
        "Item ID,Site ID,Opening Inventory,Unit Holding Cost\n\
         A01,SUP,200,0.02\n\
         A01,WH,150,0.05\n",
    )
    .unwrap();
}

#[test]
fn loads_all_input_tables() {
    let dir = tempfile::tempdir().unwrap();
    write_required_tables(dir.path());
    fs::write(
        dir.path().join("demand.csv"),
        "Item ID,Period ID,Demand Qty.,Min Inventory\n\
         A01,1,120,30\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("parameters.csv"),
        "Name,Value\n\
         Max Aging Time,4\n",
    )
    .unwrap();

    let input = load_planning_input(dir.path()).unwrap();

    assert_eq!(input.time_periods.len(), 2);
    assert_eq!(
        input.time_periods[0].start_date,
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    );
    assert_eq!(input.sites.len(), 2);
    assert_eq!(input.sites[0].site_type, SiteType::Supplier);
    assert_eq!(input.items.len(), 1);
    assert_eq!(input.items[0].max_order_qty, 5000.0);
    assert_eq!(input.procurement_costs.len(), 2);
    assert_eq!(input.demand.len(), 1);
    assert_eq!(input.demand[0].min_inventory, 30.0);
    assert_eq!(input.inventory.len(), 2);
    assert_eq!(input.parameters.len(), 1);

    // 加载后的数据可直接通过校验
    input.validate().unwrap();
}

#[test]
fn optional_tables_default_when_absent() {
    let dir = tempfile::tempdir().unwrap();
    write_required_tables(dir.path());
    // 不写 demand.csv 与 parameters.csv

    let input = load_planning_input(dir.path()).unwrap();
    assert!(input.demand.is_empty());
    assert!(input.parameters.is_empty());
}

#[test]
fn missing_required_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    write_required_tables(dir.path());
    fs::remove_file(dir.path().join("items.csv")).unwrap();

    let err = load_planning_input(dir.path()).unwrap_err();
    match err {
        ImportError::FileNotFound(path) => assert!(path.ends_with("items.csv")),
        other => panic!("期望文件缺失错误, 实际 {:?}", other),
    }
}

#[test]
fn malformed_numeric_field_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    write_required_tables(dir.path());
    fs::write(
        dir.path().join("items.csv"),
        "Item ID,Item Name,Min Order Qty.,Max Order Qty.,Min Transfer Qty.\n\
         A01,罐装咖啡豆,abc,5000,20\n",
    )
    .unwrap();

    let err = load_planning_input(dir.path()).unwrap_err();
    assert!(matches!(err, ImportError::CsvParseError { .. }));
}

#[test]
fn header_whitespace_is_tolerated() {
    let dir = tempfile::tempdir().unwrap();
    write_required_tables(dir.path());
    fs::write(
        dir.path().join("procurement_costs.csv"),
        "Item ID, Period ID, Unit Cost\n\
         A01, 1, 2.5\n\
         A01, 2, 2.6\n",
    )
    .unwrap();

    let input = load_planning_input(dir.path()).unwrap();
    assert_eq!(input.procurement_costs[1].unit_cost, 2.6);
}
