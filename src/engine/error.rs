// ==========================================
// 采购调拨计划系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::domain::error::DataError;
use crate::domain::types::SolveStatus;
use thiserror::Error;

/// 引擎层错误类型
///
/// 建模前的输入形状错误与求解后的坏解错误都在这里,
/// 全部为致命错误, 流水线立即终止。
#[derive(Error, Debug)]
pub enum EngineError {
    // ===== 输入形状错误 (建模前) =====
    #[error("时间周期不连续: time_periods 表的 Period ID 必须为连续递增整数")]
    NonContiguousPeriods,

    #[error("站点数量超限: 供应商+仓库共 {count} 个站点, 多供应商/多仓库网络尚未实现")]
    SiteLimitExceeded { count: usize },

    // ===== 求解结果错误 (求解后) =====
    #[error("解不可用: 求解状态为 {status}, 不产出报表")]
    BadSolution { status: SolveStatus },

    // ===== 数据校验错误 =====
    #[error(transparent)]
    Data(#[from] DataError),
}
