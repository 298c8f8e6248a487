// ==========================================
// 采购调拨计划系统 - 优化模型构建引擎
// ==========================================
// 依据: Procure_Model_Specs_v0.2.md - 3. 数学模型
// 职责: 声明决策变量/约束/目标, 提交 HiGHS 求解
// 红线: 目标函数在变量声明时一次组成, 不做事后改写
// ==========================================
// 状态机: 新建 → build_base_model → optimize (终态)
// 换参数重解必须新建模型实例
// ==========================================

use crate::domain::types::{ItemPeriod, PeriodId, SolveStatus};
use crate::engine::model_data::ModelData;
use highs::{Col, HighsModelStatus, RowProblem, Sense};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// 品类多样性惩罚单价 (每超出一次收货计 10000)
pub const DIVERSITY_PENALTY_RATE: f64 = 10_000.0;
/// 计划期内免罚的收货次数额度
pub const DIVERSITY_FREE_ALLOWANCE: f64 = 4.0;
/// 单周期接收品种数硬上限
pub const RECEIVED_KINDS_CAP: f64 = 30.0;

// ==========================================
// ModelVars - 决策变量族
// ==========================================

/// 决策变量句柄, 每个变量族一个命名字段
///
/// - `order_qty` x: 采购量; `order_flag` z: 下单标志
/// - `supplier_stock` ys / `warehouse_stock` y: 期末库存 (含期前槽)
/// - `transfer_qty` w: 调拨量; `transfer_flag` zs: 发运标志
/// - `received_kinds` r: 单周期接收品种数; `diversity_penalty` p: 惩罚变量
pub struct ModelVars {
    pub order_qty: HashMap<ItemPeriod, Col>,
    pub order_flag: HashMap<ItemPeriod, Col>,
    pub warehouse_stock: HashMap<ItemPeriod, Col>,
    pub supplier_stock: HashMap<ItemPeriod, Col>,
    pub transfer_qty: HashMap<ItemPeriod, Col>,
    pub transfer_flag: HashMap<ItemPeriod, Col>,
    pub received_kinds: HashMap<PeriodId, Col>,
    pub diversity_penalty: Col,
}

// ==========================================
// 求解设定与求解结果
// ==========================================

/// 求解预算: 墙钟时间上限与相对最优间隙容差
#[derive(Debug, Clone, PartialEq)]
pub struct SolveSettings {
    pub time_limit_secs: f64,
    pub relative_gap: f64,
}

impl Default for SolveSettings {
    fn default() -> Self {
        Self {
            time_limit_secs: 600.0,
            relative_gap: 0.01,
        }
    }
}

/// 原始解快照: 全精度变量取值, 噪声抑制留给解码器
#[derive(Debug, Clone)]
pub struct SolutionValues {
    pub order_qty: HashMap<ItemPeriod, f64>,
    pub order_flag: HashMap<ItemPeriod, f64>,
    pub warehouse_stock: HashMap<ItemPeriod, f64>,
    pub supplier_stock: HashMap<ItemPeriod, f64>,
    pub transfer_qty: HashMap<ItemPeriod, f64>,
    pub transfer_flag: HashMap<ItemPeriod, f64>,
    pub received_kinds: HashMap<PeriodId, f64>,
    pub diversity_penalty: f64,
}

/// 一次求解的终态输出
///
/// 非最优状态不携带变量取值; 超时返回的增量可行解不采信。
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub status: SolveStatus,
    pub objective_value: Option<f64>,
    pub values: Option<SolutionValues>,
}

// ==========================================
// PlanModel - 优化模型实例
// ==========================================

pub struct PlanModel<'a> {
    data: &'a ModelData,
    problem: RowProblem,
    vars: Option<ModelVars>,
    built: bool,
}

impl<'a> PlanModel<'a> {
    pub fn new(data: &'a ModelData) -> Self {
        Self {
            data,
            problem: RowProblem::new(),
            vars: None,
            built: false,
        }
    }

    /// 构建基础模型: 变量 → 约束 → (目标已随变量声明组成)
    ///
    /// 每个模型实例只构建一次。
    pub fn build_base_model(&mut self) {
        let vars = self.declare_decision_variables();
        self.vars = Some(vars);

        self.add_opening_stock_constraints();
        self.add_supplier_flow_constraints();
        self.add_warehouse_flow_constraints();
        self.add_order_lot_size_constraints();
        self.add_min_inventory_constraints();
        self.add_inventory_capacity_constraints();
        self.add_transfer_lot_size_constraints();
        self.add_expedition_capacity_constraints();
        self.add_receiving_capacity_constraints();
        self.add_aging_constraints();
        self.add_diversity_constraints();

        self.built = true;
        info!(
            items = self.data.items.len(),
            periods = self.data.periods.len(),
            "优化模型构建完成"
        );
    }

    // ==========================================
    // 决策变量声明
    // ==========================================
    // 目标系数在此一次性挂到变量上:
    //   min  Σ pc·x + Σ ci·y + Σ cis·ys + p
    // 期前库存槽为边界常量, 不计持有成本
    fn declare_decision_variables(&mut self) -> ModelVars {
        let data = self.data;
        let pre = data.pre_horizon();

        let mut order_qty = HashMap::new();
        let mut order_flag = HashMap::new();
        for key in &data.order_keys {
            let cost = data.unit_cost_of(&key.item_id, key.period_id);
            order_qty.insert(key.clone(), self.problem.add_column(cost, 0.0..));
            order_flag.insert(
                key.clone(),
                self.problem.add_integer_column(0.0, 0.0..=1.0),
            );
        }

        let mut warehouse_stock = HashMap::new();
        for key in &data.warehouse_stock_keys {
            let holding = if key.period_id == pre {
                0.0
            } else {
                data.warehouse_holding(&key.item_id)
            };
            warehouse_stock.insert(key.clone(), self.problem.add_column(holding, 0.0..));
        }

        let mut supplier_stock = HashMap::new();
        for key in &data.supplier_stock_keys {
            let holding = if key.period_id == pre {
                0.0
            } else {
                data.supplier_holding(&key.item_id)
            };
            supplier_stock.insert(key.clone(), self.problem.add_column(holding, 0.0..));
        }

        let mut transfer_qty = HashMap::new();
        let mut transfer_flag = HashMap::new();
        for key in &data.transfer_keys {
            transfer_qty.insert(key.clone(), self.problem.add_column(0.0, 0.0..));
            transfer_flag.insert(
                key.clone(),
                self.problem.add_integer_column(0.0, 0.0..=1.0),
            );
        }

        let mut received_kinds = HashMap::new();
        for &t in &data.periods {
            received_kinds.insert(
                t,
                self.problem
                    .add_integer_column(0.0, 0.0..=RECEIVED_KINDS_CAP),
            );
        }

        let diversity_penalty = self.problem.add_column(1.0, 0.0..);

        debug!(
            continuous = data.order_keys.len()
                + data.warehouse_stock_keys.len()
                + data.supplier_stock_keys.len()
                + data.transfer_keys.len()
                + 1,
            binary = data.order_keys.len() + data.transfer_keys.len(),
            integer = data.periods.len(),
            "决策变量声明完成"
        );

        ModelVars {
            order_qty,
            order_flag,
            warehouse_stock,
            supplier_stock,
            transfer_qty,
            transfer_flag,
            received_kinds,
            diversity_penalty,
        }
    }

    // ==========================================
    // 约束族
    // ==========================================

    /// 期初库存钉定: ys[i,t0-1] 与 y[i,t0-1] 固定为期初在库量
    fn add_opening_stock_constraints(&mut self) {
        let data = self.data;
        let vars = self.vars.as_ref().expect("变量已声明");
        let pre = data.pre_horizon();

        for item in &data.items {
            let key = ItemPeriod::new(item.clone(), pre);
            let ois = data.opening_supplier(item);
            let oi = data.opening_warehouse(item);
            self.problem
                .add_row(ois..=ois, [(vars.supplier_stock[&key], 1.0)]);
            self.problem
                .add_row(oi..=oi, [(vars.warehouse_stock[&key], 1.0)]);
        }
    }

    /// 供应商流量守恒: ys[i,t-1] + x[i,t] = w[i,t] + ys[i,t]
    fn add_supplier_flow_constraints(&mut self) {
        let vars = self.vars.as_ref().expect("变量已声明");
        for key in &self.data.order_keys {
            let prev = ItemPeriod::new(key.item_id.clone(), key.period_id - 1);
            self.problem.add_row(
                0.0..=0.0,
                [
                    (vars.supplier_stock[&prev], 1.0),
                    (vars.order_qty[key], 1.0),
                    (vars.transfer_qty[key], -1.0),
                    (vars.supplier_stock[key], -1.0),
                ],
            );
        }
    }

    /// 仓库流量守恒: y[i,t-1] + w[i,t] = d[i,t] + y[i,t] (需求缺省为 0)
    fn add_warehouse_flow_constraints(&mut self) {
        let data = self.data;
        let vars = self.vars.as_ref().expect("变量已声明");
        for key in &data.transfer_keys {
            let prev = ItemPeriod::new(key.item_id.clone(), key.period_id - 1);
            let demand = data.demand_or_zero(&key.item_id, key.period_id);
            self.problem.add_row(
                demand..=demand,
                [
                    (vars.warehouse_stock[&prev], 1.0),
                    (vars.transfer_qty[key], 1.0),
                    (vars.warehouse_stock[key], -1.0),
                ],
            );
        }
    }

    /// 采购批量联动: moq[i]·z ≤ x ≤ maxoq[i]·z
    fn add_order_lot_size_constraints(&mut self) {
        let data = self.data;
        let vars = self.vars.as_ref().expect("变量已声明");
        for key in &data.order_keys {
            let moq = data.min_order(&key.item_id);
            let maxoq = data.max_order(&key.item_id);
            self.problem.add_row(
                ..=0.0,
                [(vars.order_flag[key], moq), (vars.order_qty[key], -1.0)],
            );
            self.problem.add_row(
                ..=0.0,
                [(vars.order_qty[key], 1.0), (vars.order_flag[key], -maxoq)],
            );
        }
    }

    /// 仓库安全库存下限: 仅对定义了下限的 (物料, 周期) 生效
    fn add_min_inventory_constraints(&mut self) {
        let vars = self.vars.as_ref().expect("变量已声明");
        for (key, &floor) in &self.data.min_inventory {
            self.problem
                .add_row(floor.., [(vars.warehouse_stock[key], 1.0)]);
        }
    }

    /// 站点库存容量: 各周期总库存不超过站点容量
    fn add_inventory_capacity_constraints(&mut self) {
        let data = self.data;
        let vars = self.vars.as_ref().expect("变量已声明");
        for &t in &data.periods {
            let warehouse_terms: Vec<(Col, f64)> = data
                .items
                .iter()
                .map(|item| (vars.warehouse_stock[&ItemPeriod::new(item.clone(), t)], 1.0))
                .collect();
            self.problem
                .add_row(..=data.params.warehouse_inventory_capacity, warehouse_terms);

            let supplier_terms: Vec<(Col, f64)> = data
                .items
                .iter()
                .map(|item| (vars.supplier_stock[&ItemPeriod::new(item.clone(), t)], 1.0))
                .collect();
            self.problem
                .add_row(..=data.params.supplier_inventory_capacity, supplier_terms);
        }
    }

    /// 调拨批量联动: mtq[i]·zs ≤ w ≤ ec·zs
    fn add_transfer_lot_size_constraints(&mut self) {
        let data = self.data;
        let vars = self.vars.as_ref().expect("变量已声明");
        let ec = data.params.expedition_capacity;
        for key in &data.transfer_keys {
            let mtq = data.min_transfer(&key.item_id);
            self.problem.add_row(
                ..=0.0,
                [(vars.transfer_flag[key], mtq), (vars.transfer_qty[key], -1.0)],
            );
            self.problem.add_row(
                ..=0.0,
                [(vars.transfer_qty[key], 1.0), (vars.transfer_flag[key], -ec)],
            );
        }
    }

    /// 发运容量: 各周期跨物料总发运量 ≤ 发运容量
    fn add_expedition_capacity_constraints(&mut self) {
        let data = self.data;
        let vars = self.vars.as_ref().expect("变量已声明");
        for &t in &data.periods {
            let terms: Vec<(Col, f64)> = data
                .items
                .iter()
                .map(|item| (vars.transfer_qty[&ItemPeriod::new(item.clone(), t)], 1.0))
                .collect();
            self.problem
                .add_row(..=data.params.expedition_capacity, terms);
        }
    }

    /// 接收容量: 各周期发运标志计数 ≤ 仓库接收容量
    fn add_receiving_capacity_constraints(&mut self) {
        let data = self.data;
        let vars = self.vars.as_ref().expect("变量已声明");
        for &t in &data.periods {
            let terms: Vec<(Col, f64)> = data
                .items
                .iter()
                .map(|item| (vars.transfer_flag[&ItemPeriod::new(item.clone(), t)], 1.0))
                .collect();
            self.problem
                .add_row(..=data.params.receiving_capacity, terms);
        }
    }

    /// 库龄约束: ys[i,t] ≤ Σ_{t'=t+1}^{t+tu} w[i,t']
    ///
    /// 供应商在 t 期末的库存必须能在接下来 tu 个周期内发运出去,
    /// 防止陈化库存无限累积。tu 超过剩余周期数时约束区间为空。
    fn add_aging_constraints(&mut self) {
        let data = self.data;
        let vars = self.vars.as_ref().expect("变量已声明");
        let tu = data.params.max_aging_time;
        let last = data.last_period();

        for t in data.pre_horizon()..=(last - tu) {
            for item in &data.items {
                let mut terms: Vec<(Col, f64)> = vec![(
                    vars.supplier_stock[&ItemPeriod::new(item.clone(), t)],
                    1.0,
                )];
                for shipped_t in (t + 1)..=(t + tu) {
                    terms.push((
                        vars.transfer_qty[&ItemPeriod::new(item.clone(), shipped_t)],
                        -1.0,
                    ));
                }
                self.problem.add_row(..=0.0, terms);
            }
        }
    }

    /// 品类多样性: r[t] ≥ Σ_i zs[i,t] (计数联动),
    /// p ≥ 10000·(Σ_t r[t] - 4) (超出免罚额度的软惩罚)
    ///
    /// r 的硬上限 30 已由变量上界承载。
    fn add_diversity_constraints(&mut self) {
        let data = self.data;
        let vars = self.vars.as_ref().expect("变量已声明");

        for &t in &data.periods {
            let mut terms: Vec<(Col, f64)> = data
                .items
                .iter()
                .map(|item| (vars.transfer_flag[&ItemPeriod::new(item.clone(), t)], 1.0))
                .collect();
            terms.push((vars.received_kinds[&t], -1.0));
            self.problem.add_row(..=0.0, terms);
        }

        let mut penalty_terms: Vec<(Col, f64)> = data
            .periods
            .iter()
            .map(|t| (vars.received_kinds[t], DIVERSITY_PENALTY_RATE))
            .collect();
        penalty_terms.push((vars.diversity_penalty, -1.0));
        self.problem.add_row(
            ..=DIVERSITY_PENALTY_RATE * DIVERSITY_FREE_ALLOWANCE,
            penalty_terms,
        );
    }

    // ==========================================
    // 求解 (终态)
    // ==========================================

    /// 提交 HiGHS 求解并抽取原始解快照
    ///
    /// 阻塞调用, 由时间上限与相对间隙容差兜底返回。
    /// 消耗模型实例: 重解需要新建实例。
    ///
    /// # Panics
    /// 未先调用 `build_base_model()` 时为编程错误, 直接 panic。
    pub fn optimize(mut self, settings: &SolveSettings) -> SolveOutcome {
        assert!(
            self.built,
            "模型尚未构建: 必须先调用 build_base_model() 再求解"
        );
        let vars = self.vars.take().expect("built 状态下变量必定存在");

        info!(
            time_limit_secs = settings.time_limit_secs,
            relative_gap = settings.relative_gap,
            "提交优化模型求解"
        );

        let mut model = self.problem.optimise(Sense::Minimise);
        model.set_option("output_flag", false);
        model.set_option("time_limit", settings.time_limit_secs);
        model.set_option("mip_rel_gap", settings.relative_gap);

        let solved = model.solve();
        let status = map_status(solved.status());
        info!(%status, "求解结束");

        if status != SolveStatus::Optimal {
            warn!(%status, "未得到最优解, 不抽取变量取值");
            return SolveOutcome {
                status,
                objective_value: None,
                values: None,
            };
        }

        let sol = solved.get_solution();
        let values = SolutionValues {
            order_qty: snapshot(&vars.order_qty, &sol),
            order_flag: snapshot(&vars.order_flag, &sol),
            warehouse_stock: snapshot(&vars.warehouse_stock, &sol),
            supplier_stock: snapshot(&vars.supplier_stock, &sol),
            transfer_qty: snapshot(&vars.transfer_qty, &sol),
            transfer_flag: snapshot(&vars.transfer_flag, &sol),
            received_kinds: vars
                .received_kinds
                .iter()
                .map(|(&t, &col)| (t, sol[col]))
                .collect(),
            diversity_penalty: sol[vars.diversity_penalty],
        };

        SolveOutcome {
            status,
            objective_value: Some(solved.objective_value()),
            values: Some(values),
        }
    }
}

fn snapshot(
    vars: &HashMap<ItemPeriod, Col>,
    sol: &highs::Solution,
) -> HashMap<ItemPeriod, f64> {
    vars.iter().map(|(k, &col)| (k.clone(), sol[col])).collect()
}

fn map_status(raw: HighsModelStatus) -> SolveStatus {
    match raw {
        HighsModelStatus::Optimal => SolveStatus::Optimal,
        HighsModelStatus::Infeasible => SolveStatus::Infeasible,
        HighsModelStatus::Unbounded | HighsModelStatus::UnboundedOrInfeasible => {
            SolveStatus::Unbounded
        }
        HighsModelStatus::ReachedTimeLimit => SolveStatus::TimedOut,
        other => SolveStatus::Other(format!("{:?}", other)),
    }
}
