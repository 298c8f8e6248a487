// ==========================================
// 采购调拨计划系统 - 标量参数
// ==========================================
// 依据: Procure_Model_Specs_v0.2.md - 0.3 标量参数表
// 参数表为 (Name, Value) 键值对, 缺失项取默认值
// ==========================================

use crate::domain::error::DataError;
use crate::domain::tables::ParameterRow;

pub const PARAM_MAX_AGING_TIME: &str = "Max Aging Time";
pub const PARAM_EXPEDITION_CAPACITY: &str = "Supplier Expedition Capacity";
pub const PARAM_RECEIVING_CAPACITY: &str = "Warehouse Receiving Capacity";
pub const PARAM_SUPPLIER_INVENTORY_CAPACITY: &str = "Supplier Inventory Capacity";
pub const PARAM_WAREHOUSE_INVENTORY_CAPACITY: &str = "Warehouse Inventory Capacity";

// ==========================================
// ScalarParams - 运营限额参数
// ==========================================

/// 运营限额标量参数
///
/// - `max_aging_time`: 物料在供应商库存中允许滞留的最大周期数
/// - `expedition_capacity`: 供应商每周期发运量上限 (体积)
/// - `receiving_capacity`: 仓库每周期可接收的不同物料种数上限
/// - `supplier_inventory_capacity` / `warehouse_inventory_capacity`:
///   各站点每周期总库存容量
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarParams {
    pub max_aging_time: i64,
    pub expedition_capacity: f64,
    pub receiving_capacity: f64,
    pub supplier_inventory_capacity: f64,
    pub warehouse_inventory_capacity: f64,
}

impl Default for ScalarParams {
    fn default() -> Self {
        Self {
            max_aging_time: 7,
            expedition_capacity: 6_000.0,
            receiving_capacity: 20.0,
            supplier_inventory_capacity: 1_000_000.0,
            warehouse_inventory_capacity: 550_000.0,
        }
    }
}

impl ScalarParams {
    /// 从参数表行解析标量参数
    ///
    /// 未出现的参数取默认值; 未知参数名、无法解析或为负的取值为致命错误。
    pub fn from_rows(rows: &[ParameterRow]) -> Result<Self, DataError> {
        let mut params = Self::default();

        for row in rows {
            let name = row.name.trim();
            match name {
                PARAM_MAX_AGING_TIME => {
                    params.max_aging_time = parse_non_negative_int(name, &row.value)?;
                }
                PARAM_EXPEDITION_CAPACITY => {
                    params.expedition_capacity = parse_non_negative(name, &row.value)?;
                }
                PARAM_RECEIVING_CAPACITY => {
                    params.receiving_capacity = parse_non_negative(name, &row.value)?;
                }
                PARAM_SUPPLIER_INVENTORY_CAPACITY => {
                    params.supplier_inventory_capacity = parse_non_negative(name, &row.value)?;
                }
                PARAM_WAREHOUSE_INVENTORY_CAPACITY => {
                    params.warehouse_inventory_capacity = parse_non_negative(name, &row.value)?;
                }
                unknown => {
                    return Err(DataError::UnknownParameter {
                        name: unknown.to_string(),
                    });
                }
            }
        }

        Ok(params)
    }
}

fn parse_non_negative(name: &str, value: &str) -> Result<f64, DataError> {
    let parsed: f64 = value
        .trim()
        .parse()
        .map_err(|_| DataError::ParameterValueError {
            name: name.to_string(),
            value: value.to_string(),
        })?;
    if !parsed.is_finite() || parsed < 0.0 {
        return Err(DataError::ParameterValueError {
            name: name.to_string(),
            value: value.to_string(),
        });
    }
    Ok(parsed)
}

fn parse_non_negative_int(name: &str, value: &str) -> Result<i64, DataError> {
    let parsed: i64 = value
        .trim()
        .parse()
        .map_err(|_| DataError::ParameterValueError {
            name: name.to_string(),
            value: value.to_string(),
        })?;
    if parsed < 0 {
        return Err(DataError::ParameterValueError {
            name: name.to_string(),
            value: value.to_string(),
        });
    }
    Ok(parsed)
}
