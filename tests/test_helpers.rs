// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 构造各集成测试共用的输入数据集
// ==========================================

#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use procure_aps::domain::{
    DemandRow, InventoryRow, ItemRow, ParameterRow, PlanningInput, ProcurementCostRow, SiteRow,
    SiteType, TimePeriodRow,
};

pub const SUPPLIER_ID: &str = "SUP";
pub const WAREHOUSE_ID: &str = "WH";

/// 创建连续周期 1..=n (每周期一周)
pub fn make_periods(n: i64) -> Vec<TimePeriodRow> {
    let horizon_start = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    (1..=n)
        .map(|t| {
            let start = horizon_start + Duration::weeks(t - 1);
            TimePeriodRow {
                period_id: t,
                start_date: start,
                end_date: start + Duration::days(6),
            }
        })
        .collect()
}

/// 创建标准的单供应商+单仓库站点表
pub fn make_sites() -> Vec<SiteRow> {
    vec![
        SiteRow {
            site_id: SUPPLIER_ID.to_string(),
            site_name: "测试供应商".to_string(),
            site_type: SiteType::Supplier,
        },
        SiteRow {
            site_id: WAREHOUSE_ID.to_string(),
            site_name: "测试仓库".to_string(),
            site_type: SiteType::Warehouse,
        },
    ]
}

/// 创建测试用的物料行
pub fn make_item(item_id: &str, moq: f64, maxoq: f64, mtq: f64) -> ItemRow {
    ItemRow {
        item_id: item_id.to_string(),
        item_name: format!("物料{}", item_id),
        min_order_qty: moq,
        max_order_qty: maxoq,
        min_transfer_qty: mtq,
    }
}

/// 创建测试用的需求行
pub fn make_demand(item_id: &str, period_id: i64, qty: f64, min_inventory: f64) -> DemandRow {
    DemandRow {
        item_id: item_id.to_string(),
        period_id,
        demand_qty: qty,
        min_inventory,
    }
}

/// 创建测试用的期初库存行
pub fn make_inventory(
    item_id: &str,
    site_id: &str,
    opening: f64,
    holding_cost: f64,
) -> InventoryRow {
    InventoryRow {
        item_id: item_id.to_string(),
        site_id: site_id.to_string(),
        opening_inventory: opening,
        unit_holding_cost: holding_cost,
    }
}

/// 创建测试用的标量参数行
pub fn make_parameter(name: &str, value: &str) -> ParameterRow {
    ParameterRow {
        name: name.to_string(),
        value: value.to_string(),
    }
}

/// 为全部 物料×周期 覆盖统一采购单价
pub fn full_cost_coverage(
    items: &[ItemRow],
    periods: &[TimePeriodRow],
    unit_cost: f64,
) -> Vec<ProcurementCostRow> {
    let mut rows = Vec::new();
    for item in items {
        for period in periods {
            rows.push(ProcurementCostRow {
                item_id: item.item_id.clone(),
                period_id: period.period_id,
                unit_cost,
            });
        }
    }
    rows
}

/// 创建基础输入数据集: 给定物料与周期数, 成本全覆盖,
/// 需求/期初库存/参数留空由各测试自行补充
pub fn base_input(items: Vec<ItemRow>, num_periods: i64, unit_cost: f64) -> PlanningInput {
    let time_periods = make_periods(num_periods);
    let procurement_costs = full_cost_coverage(&items, &time_periods, unit_cost);
    PlanningInput {
        time_periods,
        sites: make_sites(),
        items,
        procurement_costs,
        demand: vec![],
        inventory: vec![],
        parameters: vec![],
    }
}
