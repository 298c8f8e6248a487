// ==========================================
// 采购调拨计划系统 - 解码引擎
// ==========================================
// 依据: Procure_Model_Specs_v0.2.md - 5. 结果解码
// 职责: 把原始解快照还原为六张领域报表与 KPI 汇总
// 红线: 非最优状态不产出任何报表; 解码为纯函数, 可重复执行
// ==========================================

use crate::domain::report::{
    KpiRow, OrderRow, PlanningReports, ShipmentRow, SupplierFlowRow, TotalInventoryRow,
    WarehouseFlowRow,
};
use crate::domain::types::{ItemPeriod, SolveStatus};
use crate::engine::error::EngineError;
use crate::engine::model_data::ModelData;
use crate::engine::opt_model::{SolutionValues, SolveOutcome};
use std::collections::HashMap;
use tracing::info;

/// 数值噪声阈值: 采购/调拨量不超过该值视为零
///
/// 仅作用于订单/发运类数量; 库存水平全精度上报。
pub const NOISE_THRESHOLD: f64 = 1e-2;

/// 把求解输出解码为结果报表
///
/// 任何非最优终态立即以坏解错误终止, 不产出部分报表。
/// 同一 `SolveOutcome` 重复解码得到相同的报表集合。
pub fn decode_solution(
    data: &ModelData,
    outcome: &SolveOutcome,
) -> Result<PlanningReports, EngineError> {
    if outcome.status != SolveStatus::Optimal {
        return Err(EngineError::BadSolution {
            status: outcome.status.clone(),
        });
    }
    let values = outcome.values.as_ref().ok_or(EngineError::BadSolution {
        status: outcome.status.clone(),
    })?;

    let orders = build_orders(data, values);
    let shipments = build_shipments(data, values);
    let flow_supplier = build_flow_supplier(data, values);
    let flow_warehouse = build_flow_warehouse(data, values);
    let total_inventory = build_total_inventory(data, &flow_supplier, &flow_warehouse);
    let kpis = build_kpis(data, values);

    info!(
        orders = orders.len(),
        shipments = shipments.len(),
        "解码完成"
    );

    Ok(PlanningReports {
        kpis,
        flow_supplier,
        flow_warehouse,
        orders,
        shipments,
        total_inventory,
    })
}

// 数量噪声抑制
fn material(qty: f64) -> f64 {
    if qty > NOISE_THRESHOLD {
        qty
    } else {
        0.0
    }
}

fn value_at(map: &HashMap<ItemPeriod, f64>, item: &str, period: i64) -> f64 {
    map.get(&ItemPeriod::new(item, period))
        .copied()
        .unwrap_or(0.0)
}

/// 采购订单表: 仅实质非零订单, 按输入物料/周期顺序编号
fn build_orders(data: &ModelData, values: &SolutionValues) -> Vec<OrderRow> {
    let mut rows = Vec::new();
    for item in &data.items {
        for &t in &data.periods {
            let qty = value_at(&values.order_qty, item, t);
            if qty <= NOISE_THRESHOLD {
                continue;
            }
            let unit_cost = data.unit_cost_of(item, t);
            rows.push(OrderRow {
                order_id: (rows.len() + 1).to_string(),
                item_id: item.clone(),
                period_id: t,
                order_qty: qty,
                min_order_qty: data.min_order(item),
                max_order_qty: data.max_order(item),
                unit_cost,
                order_cost: qty * unit_cost,
            });
        }
    }
    rows
}

/// 调拨发运表: 仅实质非零发运, 按输入物料/周期顺序编号
fn build_shipments(data: &ModelData, values: &SolutionValues) -> Vec<ShipmentRow> {
    let mut rows = Vec::new();
    for item in &data.items {
        for &t in &data.periods {
            let qty = value_at(&values.transfer_qty, item, t);
            if qty <= NOISE_THRESHOLD {
                continue;
            }
            rows.push(ShipmentRow {
                shipment_id: (rows.len() + 1).to_string(),
                item_id: item.clone(),
                period_id: t,
                transferred_qty: qty,
                min_transfer_qty: data.min_transfer(item),
            });
        }
    }
    rows
}

/// 供应商流量表: 物料×周期 全网格
///
/// 期初库存通过显式的上一周期查找重建: 首周期取期初在库量
/// (即期前槽取值), 其余周期取上一周期的期末库存。
fn build_flow_supplier(data: &ModelData, values: &SolutionValues) -> Vec<SupplierFlowRow> {
    let mut rows = Vec::new();
    for item in &data.items {
        for &t in &data.periods {
            let initial = values
                .supplier_stock
                .get(&ItemPeriod::new(item.clone(), t - 1))
                .copied()
                .unwrap_or_else(|| data.opening_supplier(item));
            let final_inventory = value_at(&values.supplier_stock, item, t);
            let unit_holding_cost = data.supplier_holding(item);
            rows.push(SupplierFlowRow {
                item_id: item.clone(),
                period_id: t,
                initial_inventory: initial,
                order_qty: material(value_at(&values.order_qty, item, t)),
                transferred_qty: material(value_at(&values.transfer_qty, item, t)),
                final_inventory,
                unit_holding_cost,
                holding_cost: final_inventory * unit_holding_cost,
            });
        }
    }
    rows
}

/// 仓库流量表: 物料×周期 全网格
fn build_flow_warehouse(data: &ModelData, values: &SolutionValues) -> Vec<WarehouseFlowRow> {
    let mut rows = Vec::new();
    for item in &data.items {
        for &t in &data.periods {
            let initial = values
                .warehouse_stock
                .get(&ItemPeriod::new(item.clone(), t - 1))
                .copied()
                .unwrap_or_else(|| data.opening_warehouse(item));
            let final_inventory = value_at(&values.warehouse_stock, item, t);
            let unit_holding_cost = data.warehouse_holding(item);
            rows.push(WarehouseFlowRow {
                item_id: item.clone(),
                period_id: t,
                initial_inventory: initial,
                received_qty: material(value_at(&values.transfer_qty, item, t)),
                demand_qty: data.demand_or_zero(item, t),
                final_inventory,
                min_inventory: data.min_inventory_or_zero(item, t),
                unit_holding_cost,
                holding_cost: final_inventory * unit_holding_cost,
            });
        }
    }
    rows
}

/// 站点总库存表: 各站点各周期的总期末库存对照容量, 按站点/周期排序
fn build_total_inventory(
    data: &ModelData,
    flow_supplier: &[SupplierFlowRow],
    flow_warehouse: &[WarehouseFlowRow],
) -> Vec<TotalInventoryRow> {
    let mut rows = Vec::new();

    for site_id in &data.supplier_ids {
        for &t in &data.periods {
            let total: f64 = flow_supplier
                .iter()
                .filter(|r| r.period_id == t)
                .map(|r| r.final_inventory)
                .sum();
            rows.push(TotalInventoryRow {
                site_id: site_id.clone(),
                period_id: t,
                final_inventory: total,
                inventory_capacity: data.params.supplier_inventory_capacity,
            });
        }
    }

    for site_id in &data.warehouse_ids {
        for &t in &data.periods {
            let total: f64 = flow_warehouse
                .iter()
                .filter(|r| r.period_id == t)
                .map(|r| r.final_inventory)
                .sum();
            rows.push(TotalInventoryRow {
                site_id: site_id.clone(),
                period_id: t,
                final_inventory: total,
                inventory_capacity: data.params.warehouse_inventory_capacity,
            });
        }
    }

    rows.sort_by(|a, b| (&a.site_id, a.period_id).cmp(&(&b.site_id, b.period_id)));
    rows
}

/// KPI 汇总: 成本项按全精度取值计算, 总成本含多样性惩罚
fn build_kpis(data: &ModelData, values: &SolutionValues) -> Vec<KpiRow> {
    let mut purchase_cost = 0.0;
    for key in &data.order_keys {
        purchase_cost += data.unit_cost_of(&key.item_id, key.period_id)
            * value_at(&values.order_qty, &key.item_id, key.period_id);
    }

    // 持有成本只累计计划期内周期, 期前槽为边界常量不计费
    let mut supplier_holding = 0.0;
    let mut warehouse_holding = 0.0;
    for item in &data.items {
        for &t in &data.periods {
            supplier_holding +=
                data.supplier_holding(item) * value_at(&values.supplier_stock, item, t);
            warehouse_holding +=
                data.warehouse_holding(item) * value_at(&values.warehouse_stock, item, t);
        }
    }

    let total_cost =
        purchase_cost + supplier_holding + warehouse_holding + values.diversity_penalty;

    vec![
        KpiRow {
            kpi: "Total Cost".to_string(),
            value: total_cost,
        },
        KpiRow {
            kpi: "Total Procurement Cost".to_string(),
            value: purchase_cost,
        },
        KpiRow {
            kpi: "Total Inventory Holding Cost (supplier)".to_string(),
            value: supplier_holding,
        },
        KpiRow {
            kpi: "Total Inventory Holding Cost (warehouse)".to_string(),
            value: warehouse_holding,
        },
    ]
}
