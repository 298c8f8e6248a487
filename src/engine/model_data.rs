// ==========================================
// 采购调拨计划系统 - 模型数据提取引擎
// ==========================================
// 依据: Procure_Model_Specs_v0.2.md - 2. 索引集与参数表
// 职责: 把校验后的输入表转换为数学模型的索引集/参数表/变量键空间
// 红线: 提取完成后数据视图只读, 建模与解码阶段不得修改
// ==========================================

use crate::domain::params::ScalarParams;
use crate::domain::tables::PlanningInput;
use crate::domain::types::{ItemId, ItemPeriod, PeriodId, SiteId, SiteType};
use crate::engine::error::EngineError;
use std::collections::HashMap;
use tracing::{debug, info};

// ==========================================
// ModelData - 模型数据视图
// ==========================================

/// 数学模型的数据视图
///
/// 每个索引集与参数表都对应公式中的一个符号, 使模型构建代码
/// 与数学公式一一对应。稀疏参数 (需求/安全库存/期初库存/持有成本)
/// 统一经过 `*_or_zero` 访问器取零默认值, 不在使用点各自兜底。
#[derive(Debug, Clone)]
pub struct ModelData {
    /// 物料索引集 (保持输入顺序, 报表按此排序)
    pub items: Vec<ItemId>,
    /// 周期索引集 (升序, 连续递增整数)
    pub periods: Vec<PeriodId>,
    /// 首周期
    pub t0: PeriodId,
    /// 供应商站点编号
    pub supplier_ids: Vec<SiteId>,
    /// 仓库站点编号
    pub warehouse_ids: Vec<SiteId>,

    // ===== 按物料索引的参数 =====
    pub opening_supplier_inventory: HashMap<ItemId, f64>,
    pub opening_warehouse_inventory: HashMap<ItemId, f64>,
    pub supplier_holding_cost: HashMap<ItemId, f64>,
    pub warehouse_holding_cost: HashMap<ItemId, f64>,
    pub min_order_qty: HashMap<ItemId, f64>,
    pub max_order_qty: HashMap<ItemId, f64>,
    pub min_transfer_qty: HashMap<ItemId, f64>,

    // ===== 按 (物料, 周期) 索引的稀疏参数 =====
    pub demand: HashMap<ItemPeriod, f64>,
    pub min_inventory: HashMap<ItemPeriod, f64>,
    pub unit_cost: HashMap<ItemPeriod, f64>,

    // ===== 标量参数 =====
    pub params: ScalarParams,

    // ===== 决策变量族的键空间 =====
    /// 采购量 x 与下单标志 z: 物料×周期
    pub order_keys: Vec<ItemPeriod>,
    /// 调拨量 w 与发运标志 zs: 物料×周期
    pub transfer_keys: Vec<ItemPeriod>,
    /// 仓库期末库存 y: 物料×({t0-1} ∪ 周期)
    pub warehouse_stock_keys: Vec<ItemPeriod>,
    /// 供应商期末库存 ys: 物料×({t0-1} ∪ 周期)
    pub supplier_stock_keys: Vec<ItemPeriod>,
}

impl ModelData {
    /// 从校验后的输入数据提取模型数据视图
    ///
    /// 此处执行两项致命形状检查: 周期连续性、站点数量上限。
    /// 每次求解调用各自提取一份, 调用之间不共享状态。
    pub fn from_input(input: &PlanningInput) -> Result<Self, EngineError> {
        let params = ScalarParams::from_rows(&input.parameters)?;

        // 索引集: 周期升序且必须连续
        let mut periods: Vec<PeriodId> =
            input.time_periods.iter().map(|r| r.period_id).collect();
        periods.sort_unstable();
        if !is_consecutive_increasing(&periods) {
            return Err(EngineError::NonContiguousPeriods);
        }
        let t0 = periods[0];

        // 索引集: 站点按类型拆分, 超过两个站点的网络未实现
        let supplier_ids: Vec<SiteId> = site_ids_of(input, SiteType::Supplier);
        let warehouse_ids: Vec<SiteId> = site_ids_of(input, SiteType::Warehouse);
        let site_count = supplier_ids.len() + warehouse_ids.len();
        if site_count >= 3 {
            return Err(EngineError::SiteLimitExceeded { count: site_count });
        }

        let items: Vec<ItemId> = input.items.iter().map(|r| r.item_id.clone()).collect();

        // 参数表: 期初库存与持有成本按站点类型拆分
        let supplier_set: Vec<&str> = supplier_ids.iter().map(String::as_str).collect();
        let mut opening_supplier_inventory = HashMap::new();
        let mut opening_warehouse_inventory = HashMap::new();
        let mut supplier_holding_cost = HashMap::new();
        let mut warehouse_holding_cost = HashMap::new();
        for row in &input.inventory {
            if supplier_set.contains(&row.site_id.as_str()) {
                opening_supplier_inventory.insert(row.item_id.clone(), row.opening_inventory);
                supplier_holding_cost.insert(row.item_id.clone(), row.unit_holding_cost);
            } else {
                opening_warehouse_inventory.insert(row.item_id.clone(), row.opening_inventory);
                warehouse_holding_cost.insert(row.item_id.clone(), row.unit_holding_cost);
            }
        }

        let mut demand = HashMap::new();
        let mut min_inventory = HashMap::new();
        for row in &input.demand {
            let key = ItemPeriod::new(row.item_id.clone(), row.period_id);
            demand.insert(key.clone(), row.demand_qty);
            min_inventory.insert(key, row.min_inventory);
        }

        let unit_cost: HashMap<ItemPeriod, f64> = input
            .procurement_costs
            .iter()
            .map(|r| (ItemPeriod::new(r.item_id.clone(), r.period_id), r.unit_cost))
            .collect();

        let mut min_order_qty = HashMap::new();
        let mut max_order_qty = HashMap::new();
        let mut min_transfer_qty = HashMap::new();
        for row in &input.items {
            min_order_qty.insert(row.item_id.clone(), row.min_order_qty);
            max_order_qty.insert(row.item_id.clone(), row.max_order_qty);
            min_transfer_qty.insert(row.item_id.clone(), row.min_transfer_qty);
        }

        // 变量键空间: 库存族额外包含期前周期 t0-1 以承载期初库存
        let order_keys = grid(&items, &periods);
        let transfer_keys = order_keys.clone();
        let mut stock_periods = Vec::with_capacity(periods.len() + 1);
        stock_periods.push(t0 - 1);
        stock_periods.extend_from_slice(&periods);
        let warehouse_stock_keys = grid(&items, &stock_periods);
        let supplier_stock_keys = warehouse_stock_keys.clone();

        let data = Self {
            items,
            periods,
            t0,
            supplier_ids,
            warehouse_ids,
            opening_supplier_inventory,
            opening_warehouse_inventory,
            supplier_holding_cost,
            warehouse_holding_cost,
            min_order_qty,
            max_order_qty,
            min_transfer_qty,
            demand,
            min_inventory,
            unit_cost,
            params,
            order_keys,
            transfer_keys,
            warehouse_stock_keys,
            supplier_stock_keys,
        };

        info!(
            items = data.items.len(),
            periods = data.periods.len(),
            demand_rows = data.demand.len(),
            "模型数据提取完成"
        );
        debug!(t0 = data.t0, aging = data.params.max_aging_time, "周期边界");

        Ok(data)
    }

    /// 期前周期 (承载期初库存的时间槽)
    pub fn pre_horizon(&self) -> PeriodId {
        self.t0 - 1
    }

    /// 末周期
    pub fn last_period(&self) -> PeriodId {
        *self.periods.last().expect("periods 非空已在提取时保证")
    }

    // ===== 零默认访问器 =====
    // 缺行是合法的 "无要求" 状态, 默认策略集中在此处

    pub fn demand_or_zero(&self, item: &str, period: PeriodId) -> f64 {
        self.demand
            .get(&ItemPeriod::new(item, period))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn min_inventory_or_zero(&self, item: &str, period: PeriodId) -> f64 {
        self.min_inventory
            .get(&ItemPeriod::new(item, period))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn opening_supplier(&self, item: &str) -> f64 {
        self.opening_supplier_inventory
            .get(item)
            .copied()
            .unwrap_or(0.0)
    }

    pub fn opening_warehouse(&self, item: &str) -> f64 {
        self.opening_warehouse_inventory
            .get(item)
            .copied()
            .unwrap_or(0.0)
    }

    pub fn supplier_holding(&self, item: &str) -> f64 {
        self.supplier_holding_cost.get(item).copied().unwrap_or(0.0)
    }

    pub fn warehouse_holding(&self, item: &str) -> f64 {
        self.warehouse_holding_cost.get(item).copied().unwrap_or(0.0)
    }

    /// 采购单价 (覆盖性已在输入校验阶段保证)
    pub fn unit_cost_of(&self, item: &str, period: PeriodId) -> f64 {
        self.unit_cost
            .get(&ItemPeriod::new(item, period))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn min_order(&self, item: &str) -> f64 {
        self.min_order_qty.get(item).copied().unwrap_or(0.0)
    }

    pub fn max_order(&self, item: &str) -> f64 {
        self.max_order_qty.get(item).copied().unwrap_or(0.0)
    }

    pub fn min_transfer(&self, item: &str) -> f64 {
        self.min_transfer_qty.get(item).copied().unwrap_or(0.0)
    }
}

fn site_ids_of(input: &PlanningInput, site_type: SiteType) -> Vec<SiteId> {
    input
        .sites
        .iter()
        .filter(|r| r.site_type == site_type)
        .map(|r| r.site_id.clone())
        .collect()
}

fn grid(items: &[ItemId], periods: &[PeriodId]) -> Vec<ItemPeriod> {
    let mut keys = Vec::with_capacity(items.len() * periods.len());
    for item in items {
        for &period in periods {
            keys.push(ItemPeriod::new(item.clone(), period));
        }
    }
    keys
}

/// 整数序列是否为连续递增 (空序列视为违规)
fn is_consecutive_increasing(values: &[PeriodId]) -> bool {
    if values.is_empty() {
        return false;
    }
    values.windows(2).all(|pair| pair[1] == pair[0] + 1)
}
