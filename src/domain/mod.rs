// ==========================================
// 采购调拨计划系统 - 领域模型层
// ==========================================
// 职责: 定义输入/输出表结构、标量参数、领域类型与数据校验
// 红线: 不含求解逻辑, 不含文件访问逻辑
// ==========================================

pub mod error;
pub mod params;
pub mod report;
pub mod tables;
pub mod types;

// 重导出核心类型
pub use error::DataError;
pub use params::ScalarParams;
pub use report::{
    KpiRow, OrderRow, PlanningReports, ShipmentRow, SupplierFlowRow, TotalInventoryRow,
    WarehouseFlowRow,
};
pub use tables::{
    DemandRow, InventoryRow, ItemRow, ParameterRow, PlanningInput, ProcurementCostRow, SiteRow,
    TimePeriodRow,
};
pub use types::{ItemId, ItemPeriod, PeriodId, SiteId, SiteType, SolveStatus};
