// ==========================================
// 采购调拨计划系统 - 输入表结构
// ==========================================
// 依据: Procure_Model_Specs_v0.2.md - 1. 输入数据模式
// 职责: 定义输入表行结构与行级/表级校验
// 红线: 校验未通过的数据不得进入建模阶段
// ==========================================

use crate::domain::error::DataError;
use crate::domain::types::{ItemId, PeriodId, SiteId, SiteType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ==========================================
// 输入表行结构
// ==========================================
// serde 重命名与 CSV 表头一致

/// 时间周期表行: 每行一个离散计划周期
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimePeriodRow {
    #[serde(rename = "Period ID")]
    pub period_id: PeriodId,
    #[serde(rename = "Start Date")]
    pub start_date: NaiveDate,
    #[serde(rename = "End Date")]
    pub end_date: NaiveDate,
}

/// 站点表行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteRow {
    #[serde(rename = "Site ID")]
    pub site_id: SiteId,
    #[serde(rename = "Site Name")]
    pub site_name: String,
    #[serde(rename = "Site Type")]
    pub site_type: SiteType,
}

/// 物料主数据表行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRow {
    #[serde(rename = "Item ID")]
    pub item_id: ItemId,
    #[serde(rename = "Item Name")]
    pub item_name: String,
    #[serde(rename = "Min Order Qty.")]
    pub min_order_qty: f64,
    #[serde(rename = "Max Order Qty.")]
    pub max_order_qty: f64,
    #[serde(rename = "Min Transfer Qty.")]
    pub min_transfer_qty: f64,
}

/// 采购成本表行: 每 (物料, 周期) 一个采购单价
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcurementCostRow {
    #[serde(rename = "Item ID")]
    pub item_id: ItemId,
    #[serde(rename = "Period ID")]
    pub period_id: PeriodId,
    #[serde(rename = "Unit Cost")]
    pub unit_cost: f64,
}

/// 需求表行: 缺行表示该 (物料, 周期) 无需求且无安全库存下限
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandRow {
    #[serde(rename = "Item ID")]
    pub item_id: ItemId,
    #[serde(rename = "Period ID")]
    pub period_id: PeriodId,
    #[serde(rename = "Demand Qty.")]
    pub demand_qty: f64,
    #[serde(rename = "Min Inventory")]
    pub min_inventory: f64,
}

/// 期初库存表行: 计划期开始 (t0-1) 时各站点的在库量与持有成本
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRow {
    #[serde(rename = "Item ID")]
    pub item_id: ItemId,
    #[serde(rename = "Site ID")]
    pub site_id: SiteId,
    #[serde(rename = "Opening Inventory")]
    pub opening_inventory: f64,
    #[serde(rename = "Unit Holding Cost")]
    pub unit_holding_cost: f64,
}

/// 标量参数表行 (Name, Value 键值对)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Value")]
    pub value: String,
}

// ==========================================
// PlanningInput - 校验后的输入数据集
// ==========================================

/// 一次求解调用的全部输入表
///
/// 行之间相互独立; `validate()` 通过后引用完整性成立,
/// 后续阶段只读不写。
#[derive(Debug, Clone, Default)]
pub struct PlanningInput {
    pub time_periods: Vec<TimePeriodRow>,
    pub sites: Vec<SiteRow>,
    pub items: Vec<ItemRow>,
    pub procurement_costs: Vec<ProcurementCostRow>,
    pub demand: Vec<DemandRow>,
    pub inventory: Vec<InventoryRow>,
    pub parameters: Vec<ParameterRow>,
}

impl PlanningInput {
    /// 输入数据校验
    ///
    /// 检查顺序: 主键唯一 → 行级谓词 → 外键 → 采购成本覆盖。
    /// 任一失败立即终止, 错误向上传播。
    pub fn validate(&self) -> Result<(), DataError> {
        self.check_primary_keys()?;
        self.check_row_predicates()?;
        self.check_foreign_keys()?;
        self.check_cost_coverage()?;
        Ok(())
    }

    fn check_primary_keys(&self) -> Result<(), DataError> {
        let mut periods = HashSet::new();
        for row in &self.time_periods {
            if !periods.insert(row.period_id) {
                return Err(duplicate("time_periods", row.period_id.to_string()));
            }
        }

        let mut sites = HashSet::new();
        for row in &self.sites {
            if !sites.insert(row.site_id.clone()) {
                return Err(duplicate("sites", row.site_id.clone()));
            }
        }

        let mut items = HashSet::new();
        for row in &self.items {
            if !items.insert(row.item_id.clone()) {
                return Err(duplicate("items", row.item_id.clone()));
            }
        }

        let mut costs = HashSet::new();
        for row in &self.procurement_costs {
            if !costs.insert((row.item_id.clone(), row.period_id)) {
                return Err(duplicate(
                    "procurement_costs",
                    format!("({}, {})", row.item_id, row.period_id),
                ));
            }
        }

        let mut demands = HashSet::new();
        for row in &self.demand {
            if !demands.insert((row.item_id.clone(), row.period_id)) {
                return Err(duplicate(
                    "demand",
                    format!("({}, {})", row.item_id, row.period_id),
                ));
            }
        }

        let mut inventory = HashSet::new();
        for row in &self.inventory {
            if !inventory.insert((row.item_id.clone(), row.site_id.clone())) {
                return Err(duplicate(
                    "inventory",
                    format!("({}, {})", row.item_id, row.site_id),
                ));
            }
        }

        Ok(())
    }

    fn check_row_predicates(&self) -> Result<(), DataError> {
        for row in &self.time_periods {
            if row.start_date > row.end_date {
                return Err(DataError::PredicateViolation {
                    table: "time_periods".to_string(),
                    message: format!(
                        "周期 {} 的 Start Date {} 晚于 End Date {}",
                        row.period_id, row.start_date, row.end_date
                    ),
                });
            }
        }

        for row in &self.items {
            non_negative("items", "Min Order Qty.", row.min_order_qty)?;
            non_negative("items", "Max Order Qty.", row.max_order_qty)?;
            non_negative("items", "Min Transfer Qty.", row.min_transfer_qty)?;
            if row.min_order_qty > row.max_order_qty {
                return Err(DataError::PredicateViolation {
                    table: "items".to_string(),
                    message: format!(
                        "物料 {} 的 Min Order Qty. {} 大于 Max Order Qty. {}",
                        row.item_id, row.min_order_qty, row.max_order_qty
                    ),
                });
            }
        }

        for row in &self.procurement_costs {
            non_negative("procurement_costs", "Unit Cost", row.unit_cost)?;
        }
        for row in &self.demand {
            non_negative("demand", "Demand Qty.", row.demand_qty)?;
            non_negative("demand", "Min Inventory", row.min_inventory)?;
        }
        for row in &self.inventory {
            non_negative("inventory", "Opening Inventory", row.opening_inventory)?;
            non_negative("inventory", "Unit Holding Cost", row.unit_holding_cost)?;
        }

        Ok(())
    }

    fn check_foreign_keys(&self) -> Result<(), DataError> {
        let item_ids: HashSet<&str> = self.items.iter().map(|r| r.item_id.as_str()).collect();
        let period_ids: HashSet<PeriodId> =
            self.time_periods.iter().map(|r| r.period_id).collect();
        let site_ids: HashSet<&str> = self.sites.iter().map(|r| r.site_id.as_str()).collect();

        for row in &self.procurement_costs {
            fk_item("procurement_costs", &item_ids, &row.item_id)?;
            fk_period("procurement_costs", &period_ids, row.period_id)?;
        }
        for row in &self.demand {
            fk_item("demand", &item_ids, &row.item_id)?;
            fk_period("demand", &period_ids, row.period_id)?;
        }
        for row in &self.inventory {
            fk_item("inventory", &item_ids, &row.item_id)?;
            if !site_ids.contains(row.site_id.as_str()) {
                return Err(DataError::ForeignKeyViolation {
                    table: "inventory".to_string(),
                    message: format!("站点 {} 不在 sites 表中", row.site_id),
                });
            }
        }

        Ok(())
    }

    // 采购单价必须覆盖 物料×周期 全网格
    fn check_cost_coverage(&self) -> Result<(), DataError> {
        let covered: HashSet<(&str, PeriodId)> = self
            .procurement_costs
            .iter()
            .map(|r| (r.item_id.as_str(), r.period_id))
            .collect();

        for item in &self.items {
            for period in &self.time_periods {
                if !covered.contains(&(item.item_id.as_str(), period.period_id)) {
                    return Err(DataError::MissingProcurementCost {
                        item_id: item.item_id.clone(),
                        period_id: period.period_id,
                    });
                }
            }
        }

        Ok(())
    }
}

fn duplicate(table: &str, key: String) -> DataError {
    DataError::DuplicateKey {
        table: table.to_string(),
        key,
    }
}

fn non_negative(table: &str, field: &str, value: f64) -> Result<(), DataError> {
    if !value.is_finite() || value < 0.0 {
        return Err(DataError::FieldValueError {
            table: table.to_string(),
            field: field.to_string(),
            message: format!("取值 {} 非法, 要求非负有限数", value),
        });
    }
    Ok(())
}

fn fk_item(table: &str, item_ids: &HashSet<&str>, item_id: &str) -> Result<(), DataError> {
    if !item_ids.contains(item_id) {
        return Err(DataError::ForeignKeyViolation {
            table: table.to_string(),
            message: format!("物料 {} 不在 items 表中", item_id),
        });
    }
    Ok(())
}

fn fk_period(
    table: &str,
    period_ids: &HashSet<PeriodId>,
    period_id: PeriodId,
) -> Result<(), DataError> {
    if !period_ids.contains(&period_id) {
        return Err(DataError::ForeignKeyViolation {
            table: table.to_string(),
            message: format!("周期 {} 不在 time_periods 表中", period_id),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, day).unwrap()
    }

    fn minimal_input() -> PlanningInput {
        PlanningInput {
            time_periods: vec![TimePeriodRow {
                period_id: 1,
                start_date: date(1),
                end_date: date(7),
            }],
            sites: vec![
                SiteRow {
                    site_id: "S".to_string(),
                    site_name: "供应商".to_string(),
                    site_type: SiteType::Supplier,
                },
                SiteRow {
                    site_id: "W".to_string(),
                    site_name: "仓库".to_string(),
                    site_type: SiteType::Warehouse,
                },
            ],
            items: vec![ItemRow {
                item_id: "A".to_string(),
                item_name: "物料A".to_string(),
                min_order_qty: 0.0,
                max_order_qty: 100.0,
                min_transfer_qty: 0.0,
            }],
            procurement_costs: vec![ProcurementCostRow {
                item_id: "A".to_string(),
                period_id: 1,
                unit_cost: 2.5,
            }],
            demand: vec![],
            inventory: vec![],
            parameters: vec![],
        }
    }

    #[test]
    fn minimal_input_passes_validation() {
        minimal_input().validate().unwrap();
    }

    #[test]
    fn duplicate_item_id_is_rejected() {
        let mut input = minimal_input();
        input.items.push(input.items[0].clone());
        // 补齐成本覆盖不影响主键检查先行失败
        let err = input.validate().unwrap_err();
        assert!(matches!(err, DataError::DuplicateKey { .. }));
    }

    #[test]
    fn start_after_end_is_rejected() {
        let mut input = minimal_input();
        input.time_periods[0].start_date = date(10);
        let err = input.validate().unwrap_err();
        assert!(matches!(err, DataError::PredicateViolation { .. }));
    }

    #[test]
    fn min_order_above_max_is_rejected() {
        let mut input = minimal_input();
        input.items[0].min_order_qty = 200.0;
        let err = input.validate().unwrap_err();
        assert!(matches!(err, DataError::PredicateViolation { .. }));
    }

    #[test]
    fn demand_for_unknown_item_is_rejected() {
        let mut input = minimal_input();
        input.demand.push(DemandRow {
            item_id: "B".to_string(),
            period_id: 1,
            demand_qty: 5.0,
            min_inventory: 0.0,
        });
        let err = input.validate().unwrap_err();
        assert!(matches!(err, DataError::ForeignKeyViolation { .. }));
    }

    #[test]
    fn missing_unit_cost_is_rejected() {
        let mut input = minimal_input();
        input.procurement_costs.clear();
        let err = input.validate().unwrap_err();
        assert!(matches!(err, DataError::MissingProcurementCost { .. }));
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let mut input = minimal_input();
        input.inventory.push(InventoryRow {
            item_id: "A".to_string(),
            site_id: "W".to_string(),
            opening_inventory: -3.0,
            unit_holding_cost: 0.1,
        });
        let err = input.validate().unwrap_err();
        assert!(matches!(err, DataError::FieldValueError { .. }));
    }
}
