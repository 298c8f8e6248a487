// ==========================================
// 演示数据生成器
// ==========================================
// 用途: 生成一套可直接求解的输入数据集 CSV 文件
// 用法: generate_demo_data [输出目录]  (默认 tests/fixtures/demo_data)
// ==========================================

use chrono::{Duration, NaiveDate};
use csv::Writer;
use std::error::Error;
use std::fs;
use std::path::Path;

// 演示物料: (编号, 名称, 最小订货量, 最大订货量, 最小调拨量)
const DEMO_ITEMS: &[(&str, &str, f64, f64, f64)] = &[
    ("A01", "罐装咖啡豆", 50.0, 5000.0, 20.0),
    ("A02", "滴滤咖啡包", 0.0, 8000.0, 0.0),
    ("B11", "马克杯", 100.0, 3000.0, 50.0),
];

const NUM_PERIODS: i64 = 6;

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().collect();
    let default_dir = "tests/fixtures/demo_data".to_string();
    let out_dir = args.get(1).unwrap_or(&default_dir);
    let out_dir = Path::new(out_dir);
    fs::create_dir_all(out_dir)?;

    write_time_periods(out_dir)?;
    write_sites(out_dir)?;
    write_items(out_dir)?;
    write_procurement_costs(out_dir)?;
    write_demand(out_dir)?;
    write_inventory(out_dir)?;
    write_parameters(out_dir)?;

    println!("演示数据已写入 {}", out_dir.display());
    Ok(())
}

fn write_time_periods(dir: &Path) -> Result<(), Box<dyn Error>> {
    let mut writer = Writer::from_path(dir.join("time_periods.csv"))?;
    writer.write_record(["Period ID", "Start Date", "End Date"])?;
    let horizon_start = NaiveDate::from_ymd_opt(2026, 9, 7).unwrap();
    for t in 1..=NUM_PERIODS {
        let start = horizon_start + Duration::weeks(t - 1);
        let end = start + Duration::days(6);
        writer.write_record([t.to_string(), start.to_string(), end.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_sites(dir: &Path) -> Result<(), Box<dyn Error>> {
    let mut writer = Writer::from_path(dir.join("sites.csv"))?;
    writer.write_record(["Site ID", "Site Name", "Site Type"])?;
    writer.write_record(["SUP-01", "华东供应商", "Supplier"])?;
    writer.write_record(["WH-01", "区域配送仓", "Warehouse"])?;
    writer.flush()?;
    Ok(())
}

fn write_items(dir: &Path) -> Result<(), Box<dyn Error>> {
    let mut writer = Writer::from_path(dir.join("items.csv"))?;
    writer.write_record([
        "Item ID",
        "Item Name",
        "Min Order Qty.",
        "Max Order Qty.",
        "Min Transfer Qty.",
    ])?;
    for (id, name, moq, maxoq, mtq) in DEMO_ITEMS {
        writer.write_record([
            id.to_string(),
            name.to_string(),
            moq.to_string(),
            maxoq.to_string(),
            mtq.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_procurement_costs(dir: &Path) -> Result<(), Box<dyn Error>> {
    let mut writer = Writer::from_path(dir.join("procurement_costs.csv"))?;
    writer.write_record(["Item ID", "Period ID", "Unit Cost"])?;
    for (index, (id, ..)) in DEMO_ITEMS.iter().enumerate() {
        let base_cost = 2.0 + index as f64 * 1.5;
        for t in 1..=NUM_PERIODS {
            // 周期越晚采购越贵, 促使模型提前囤货并权衡持有成本
            let cost = base_cost + 0.1 * (t - 1) as f64;
            writer.write_record([id.to_string(), t.to_string(), format!("{:.2}", cost)])?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn write_demand(dir: &Path) -> Result<(), Box<dyn Error>> {
    let mut writer = Writer::from_path(dir.join("demand.csv"))?;
    writer.write_record(["Item ID", "Period ID", "Demand Qty.", "Min Inventory"])?;
    for (index, (id, ..)) in DEMO_ITEMS.iter().enumerate() {
        for t in 1..=NUM_PERIODS {
            let base = 120.0 + 40.0 * index as f64;
            // 简单的周期性波动
            let demand = base + if t % 2 == 0 { 60.0 } else { 0.0 };
            let min_inventory = 30.0;
            writer.write_record([
                id.to_string(),
                t.to_string(),
                demand.to_string(),
                min_inventory.to_string(),
            ])?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn write_inventory(dir: &Path) -> Result<(), Box<dyn Error>> {
    let mut writer = Writer::from_path(dir.join("inventory.csv"))?;
    writer.write_record(["Item ID", "Site ID", "Opening Inventory", "Unit Holding Cost"])?;
    for (index, (id, ..)) in DEMO_ITEMS.iter().enumerate() {
        let supplier_opening = 200.0 + 100.0 * index as f64;
        writer.write_record([
            id.to_string(),
            "SUP-01".to_string(),
            supplier_opening.to_string(),
            "0.02".to_string(),
        ])?;
        writer.write_record([
            id.to_string(),
            "WH-01".to_string(),
            "150".to_string(),
            "0.05".to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parameters(dir: &Path) -> Result<(), Box<dyn Error>> {
    let mut writer = Writer::from_path(dir.join("parameters.csv"))?;
    writer.write_record(["Name", "Value"])?;
    writer.write_record(["Max Aging Time", "4"])?;
    writer.write_record(["Supplier Expedition Capacity", "2500"])?;
    writer.write_record(["Warehouse Receiving Capacity", "10"])?;
    writer.flush()?;
    Ok(())
}
