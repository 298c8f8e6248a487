// ==========================================
// 采购调拨计划系统 - 核心库
// ==========================================
// 系统定位: 决策支持系统 (混合整数规划)
// 网络结构: 单供应商 → 单仓库, 多周期滚动计划
// 技术栈: Rust + HiGHS
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 输入/输出表结构与校验
pub mod domain;

// 引擎层 - 数据提取 / 建模 / 求解 / 解码
pub mod engine;

// 导入层 - 输入 CSV
pub mod importer;

// 导出层 - 结果 CSV
pub mod exporter;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    DataError, DemandRow, InventoryRow, ItemPeriod, ItemRow, KpiRow, OrderRow, ParameterRow,
    PlanningInput, PlanningReports, ProcurementCostRow, ScalarParams, ShipmentRow, SiteRow,
    SiteType, SolveStatus, SupplierFlowRow, TimePeriodRow, TotalInventoryRow, WarehouseFlowRow,
};

// 引擎
pub use engine::{
    decode_solution, solve_planning, EngineError, ModelData, PlanModel, SolutionValues,
    SolveOutcome, SolveSettings,
};

// 导入/导出
pub use exporter::{write_reports, ExportError};
pub use importer::{load_planning_input, ImportError};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "采购调拨计划系统";
