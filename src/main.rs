// ==========================================
// 采购调拨计划系统 - 命令行主入口
// ==========================================
// 用法: procure-aps <输入目录> <输出目录> [时间上限秒] [相对间隙]
// 流程: 加载 → 校验 → 求解 → 导出
// ==========================================

use anyhow::{bail, Context, Result};
use procure_aps::engine::SolveSettings;
use procure_aps::{exporter, importer, logging, solve_planning};
use std::env;
use std::path::PathBuf;

fn main() -> Result<()> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 决策支持系统", procure_aps::APP_NAME);
    tracing::info!("系统版本: {}", procure_aps::VERSION);
    tracing::info!("==================================================");

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 || args.len() > 5 {
        bail!(
            "用法: {} <输入目录> <输出目录> [时间上限秒] [相对间隙]",
            args[0]
        );
    }

    let input_dir = PathBuf::from(&args[1]);
    let output_dir = PathBuf::from(&args[2]);

    let mut settings = SolveSettings::default();
    if let Some(raw) = args.get(3) {
        settings.time_limit_secs = raw
            .parse()
            .with_context(|| format!("时间上限参数无法解析: {}", raw))?;
    }
    if let Some(raw) = args.get(4) {
        settings.relative_gap = raw
            .parse()
            .with_context(|| format!("相对间隙参数无法解析: {}", raw))?;
    }

    let input = importer::load_planning_input(&input_dir)
        .with_context(|| format!("加载输入目录失败: {}", input_dir.display()))?;

    let reports = solve_planning(&input, &settings).context("计划求解失败")?;

    // KPI 汇总打印到日志
    for kpi in &reports.kpis {
        tracing::info!("{}: {:.2}", kpi.kpi, kpi.value);
    }

    exporter::write_reports(&output_dir, &reports)
        .with_context(|| format!("导出结果目录失败: {}", output_dir.display()))?;

    tracing::info!("全部完成, 结果已写入 {}", output_dir.display());
    Ok(())
}
