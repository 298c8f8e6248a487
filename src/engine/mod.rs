// ==========================================
// 采购调拨计划系统 - 引擎层
// ==========================================
// 职责: 数据提取 / 模型构建 / 求解 / 解码
// 红线: 引擎只读 ModelData, 所有致命条件立即终止流水线
// ==========================================

pub mod decode;
pub mod error;
pub mod model_data;
pub mod opt_model;
pub mod orchestrator;

// 重导出核心引擎
pub use decode::{decode_solution, NOISE_THRESHOLD};
pub use error::EngineError;
pub use model_data::ModelData;
pub use opt_model::{
    ModelVars, PlanModel, SolutionValues, SolveOutcome, SolveSettings,
    DIVERSITY_FREE_ALLOWANCE, DIVERSITY_PENALTY_RATE, RECEIVED_KINDS_CAP,
};
pub use orchestrator::solve_planning;
