// ==========================================
// 采购调拨计划系统 - 领域层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 输入数据错误类型
///
/// 输入表完成外键/类型/谓词校验之前, 不允许进入建模阶段。
#[derive(Error, Debug)]
pub enum DataError {
    // ===== 主键错误 =====
    #[error("主键重复 (表 {table}): {key}")]
    DuplicateKey { table: String, key: String },

    // ===== 引用完整性错误 =====
    #[error("外键约束违反 (表 {table}): {message}")]
    ForeignKeyViolation { table: String, message: String },

    // ===== 谓词错误 =====
    #[error("行级谓词违反 (表 {table}): {message}")]
    PredicateViolation { table: String, message: String },

    #[error("字段值错误 (表 {table}, 字段 {field}): {message}")]
    FieldValueError {
        table: String,
        field: String,
        message: String,
    },

    // ===== 数据完整性错误 =====
    // 采购单价不允许缺省为零, 缺行即报错
    #[error("采购成本缺失: 物料 {item_id} 在周期 {period_id} 无单价记录")]
    MissingProcurementCost { item_id: String, period_id: i64 },

    // ===== 标量参数错误 =====
    #[error("未知参数: {name}")]
    UnknownParameter { name: String },

    #[error("参数值格式错误 (参数 {name}): 无法解析 {value}")]
    ParameterValueError { name: String, value: String },
}
