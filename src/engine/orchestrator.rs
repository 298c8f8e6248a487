// ==========================================
// 采购调拨计划系统 - 求解流程编排器
// ==========================================
// 依据: Procure_Model_Specs_v0.2.md - 4. 计算主流程
// 用途: 串联 数据提取 → 模型构建 → 求解 → 解码 四个阶段
// ==========================================
// 流程单线程同步执行; 每次调用独立持有全部数据,
// 多次调用之间无共享状态, 可在独立线程中并行发起。
// ==========================================

use crate::domain::report::PlanningReports;
use crate::domain::tables::PlanningInput;
use crate::engine::decode::decode_solution;
use crate::engine::error::EngineError;
use crate::engine::model_data::ModelData;
use crate::engine::opt_model::{PlanModel, SolveSettings};
use tracing::info;

/// 一次完整的计划求解调用
///
/// 输入校验或求解失败立即终止并向调用方传播, 本层不做重试。
pub fn solve_planning(
    input: &PlanningInput,
    settings: &SolveSettings,
) -> Result<PlanningReports, EngineError> {
    info!("开始采购调拨计划求解");

    input.validate()?;

    let data = ModelData::from_input(input)?;

    let mut model = PlanModel::new(&data);
    model.build_base_model();
    let outcome = model.optimize(settings);

    let reports = decode_solution(&data, &outcome)?;

    info!(
        kpis = reports.kpis.len(),
        orders = reports.orders.len(),
        shipments = reports.shipments.len(),
        "计划求解完成"
    );
    Ok(reports)
}
