// ==========================================
// 采购调拨计划系统 - 领域类型定义
// ==========================================
// 依据: Procure_Model_Specs_v0.2.md - 0.1 网络结构
// 红线: 单供应商 + 单仓库网络, 多站点未实现
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 物料编号
pub type ItemId = String;

/// 时间周期编号 (连续递增整数)
pub type PeriodId = i64;

/// 站点编号
pub type SiteId = String;

// ==========================================
// 站点类型 (Site Type)
// ==========================================
// 序列化格式: 与输入表 "Site Type" 列取值一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SiteType {
    Warehouse, // 仓库
    Supplier,  // 供应商
}

impl fmt::Display for SiteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteType::Warehouse => write!(f, "Warehouse"),
            SiteType::Supplier => write!(f, "Supplier"),
        }
    }
}

// ==========================================
// 求解状态 (Solve Status)
// ==========================================
// 非 Optimal 的终态一律视为坏解, 不产出任何报表
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveStatus {
    Optimal,       // 最优 (在给定 gap 容差内)
    Infeasible,    // 不可行
    Unbounded,     // 无界
    TimedOut,      // 超出时间预算
    Other(String), // 求解器返回的其他原始状态
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "OPTIMAL"),
            SolveStatus::Infeasible => write!(f, "INFEASIBLE"),
            SolveStatus::Unbounded => write!(f, "UNBOUNDED"),
            SolveStatus::TimedOut => write!(f, "TIMED_OUT"),
            SolveStatus::Other(raw) => write!(f, "OTHER({})", raw),
        }
    }
}

// ==========================================
// 物料×周期 复合键 (Item-Period Key)
// ==========================================
// 稀疏参数表与各决策变量族统一使用该键
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemPeriod {
    pub item_id: ItemId,
    pub period_id: PeriodId,
}

impl ItemPeriod {
    pub fn new(item_id: impl Into<ItemId>, period_id: PeriodId) -> Self {
        Self {
            item_id: item_id.into(),
            period_id,
        }
    }
}

impl fmt::Display for ItemPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.item_id, self.period_id)
    }
}
