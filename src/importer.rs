// ==========================================
// 采购调拨计划系统 - 输入数据导入层
// ==========================================
// 支持: CSV (.csv), 表头与输入模式列名一致
// 约定: demand / parameters 两表可缺省, 其余表必须存在
// ==========================================

use crate::domain::tables::{
    DemandRow, InventoryRow, ItemRow, ParameterRow, PlanningInput, ProcurementCostRow, SiteRow,
    TimePeriodRow,
};
use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

pub const TIME_PERIODS_FILE: &str = "time_periods.csv";
pub const SITES_FILE: &str = "sites.csv";
pub const ITEMS_FILE: &str = "items.csv";
pub const PROCUREMENT_COSTS_FILE: &str = "procurement_costs.csv";
pub const DEMAND_FILE: &str = "demand.csv";
pub const INVENTORY_FILE: &str = "inventory.csv";
pub const PARAMETERS_FILE: &str = "parameters.csv";

/// 导入层错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("CSV 解析失败 ({file}): {source}")]
    CsvParseError {
        file: String,
        #[source]
        source: csv::Error,
    },
}

/// 从目录加载全部输入表
///
/// 每张表一个 CSV 文件, 文件名与表名一致。
/// 这里只做文件到行结构的转换, 引用完整性等校验在引擎入口执行。
pub fn load_planning_input(dir: &Path) -> Result<PlanningInput, ImportError> {
    info!(dir = %dir.display(), "加载输入数据");

    let input = PlanningInput {
        time_periods: read_table::<TimePeriodRow>(&dir.join(TIME_PERIODS_FILE))?,
        sites: read_table::<SiteRow>(&dir.join(SITES_FILE))?,
        items: read_table::<ItemRow>(&dir.join(ITEMS_FILE))?,
        procurement_costs: read_table::<ProcurementCostRow>(
            &dir.join(PROCUREMENT_COSTS_FILE),
        )?,
        demand: read_optional_table::<DemandRow>(&dir.join(DEMAND_FILE))?,
        inventory: read_table::<InventoryRow>(&dir.join(INVENTORY_FILE))?,
        parameters: read_optional_table::<ParameterRow>(&dir.join(PARAMETERS_FILE))?,
    };

    info!(
        periods = input.time_periods.len(),
        items = input.items.len(),
        demand_rows = input.demand.len(),
        "输入数据加载完成"
    );
    Ok(input)
}

/// 读取一张必需的 CSV 表
fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, ImportError> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    parse_csv(path)
}

/// 读取一张可缺省的 CSV 表 (缺失视为空表)
fn read_optional_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, ImportError> {
    if !path.exists() {
        debug!(file = %path.display(), "可选输入表缺失, 按空表处理");
        return Ok(Vec::new());
    }
    parse_csv(path)
}

fn parse_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, ImportError> {
    let to_error = |source: csv::Error| ImportError::CsvParseError {
        file: path.display().to_string(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_path(path)
        .map_err(to_error)?;

    let mut rows = Vec::new();
    for result in reader.deserialize() {
        rows.push(result.map_err(to_error)?);
    }
    Ok(rows)
}
