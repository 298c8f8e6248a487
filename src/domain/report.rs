// ==========================================
// 采购调拨计划系统 - 输出报表结构
// ==========================================
// 依据: Procure_Model_Specs_v0.2.md - 6. 输出数据模式
// 职责: 定义六张结果报表的行结构
// ==========================================

use crate::domain::types::{ItemId, PeriodId, SiteId};
use serde::{Deserialize, Serialize};

/// KPI 汇总行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiRow {
    #[serde(rename = "KPI")]
    pub kpi: String,
    #[serde(rename = "Value")]
    pub value: f64,
}

/// 供应商流量行: 物料×周期 全网格, 含期初/期末库存推导
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierFlowRow {
    #[serde(rename = "Item ID")]
    pub item_id: ItemId,
    #[serde(rename = "Period ID")]
    pub period_id: PeriodId,
    #[serde(rename = "Initial Inventory")]
    pub initial_inventory: f64,
    #[serde(rename = "Order Qty.")]
    pub order_qty: f64,
    #[serde(rename = "Transferred Qty.")]
    pub transferred_qty: f64,
    #[serde(rename = "Final Inventory")]
    pub final_inventory: f64,
    #[serde(rename = "Unit Holding Cost")]
    pub unit_holding_cost: f64,
    #[serde(rename = "Holding Cost")]
    pub holding_cost: f64,
}

/// 仓库流量行: 物料×周期 全网格
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehouseFlowRow {
    #[serde(rename = "Item ID")]
    pub item_id: ItemId,
    #[serde(rename = "Period ID")]
    pub period_id: PeriodId,
    #[serde(rename = "Initial Inventory")]
    pub initial_inventory: f64,
    #[serde(rename = "Received Qty.")]
    pub received_qty: f64,
    #[serde(rename = "Demand Qty.")]
    pub demand_qty: f64,
    #[serde(rename = "Final Inventory")]
    pub final_inventory: f64,
    #[serde(rename = "Min Inventory")]
    pub min_inventory: f64,
    #[serde(rename = "Unit Holding Cost")]
    pub unit_holding_cost: f64,
    #[serde(rename = "Holding Cost")]
    pub holding_cost: f64,
}

/// 采购订单行: 仅列出数量实质非零的订单
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRow {
    #[serde(rename = "Order ID")]
    pub order_id: String,
    #[serde(rename = "Item ID")]
    pub item_id: ItemId,
    #[serde(rename = "Period ID")]
    pub period_id: PeriodId,
    #[serde(rename = "Order Qty.")]
    pub order_qty: f64,
    #[serde(rename = "Min Order Qty.")]
    pub min_order_qty: f64,
    #[serde(rename = "Max Order Qty.")]
    pub max_order_qty: f64,
    #[serde(rename = "Unit Cost")]
    pub unit_cost: f64,
    #[serde(rename = "Order Cost")]
    pub order_cost: f64,
}

/// 调拨发运行: 仅列出数量实质非零的发运
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRow {
    #[serde(rename = "Shipment ID")]
    pub shipment_id: String,
    #[serde(rename = "Item ID")]
    pub item_id: ItemId,
    #[serde(rename = "Period ID")]
    pub period_id: PeriodId,
    #[serde(rename = "Transferred Qty.")]
    pub transferred_qty: f64,
    #[serde(rename = "Min Transfer Qty.")]
    pub min_transfer_qty: f64,
}

/// 站点总库存行: 容量利用率报表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalInventoryRow {
    #[serde(rename = "Site ID")]
    pub site_id: SiteId,
    #[serde(rename = "Period ID")]
    pub period_id: PeriodId,
    #[serde(rename = "Final Inventory")]
    pub final_inventory: f64,
    #[serde(rename = "Inventory Capacity")]
    pub inventory_capacity: f64,
}

// ==========================================
// PlanningReports - 解码产出的报表集合
// ==========================================

/// 一次求解的全部结果报表
///
/// 由解码器一次性构造; 同一原始解重复解码得到逐字节相同的报表。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlanningReports {
    pub kpis: Vec<KpiRow>,
    pub flow_supplier: Vec<SupplierFlowRow>,
    pub flow_warehouse: Vec<WarehouseFlowRow>,
    pub orders: Vec<OrderRow>,
    pub shipments: Vec<ShipmentRow>,
    pub total_inventory: Vec<TotalInventoryRow>,
}
