// ==========================================
// 采购调拨计划系统 - 结果报表导出层
// ==========================================
// 职责: 把六张结果报表写出为 CSV 文件
// ==========================================

use crate::domain::report::PlanningReports;
use csv::WriterBuilder;
use serde::Serialize;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

pub const KPIS_FILE: &str = "kpis.csv";
pub const FLOW_SUPPLIER_FILE: &str = "flow_supplier.csv";
pub const FLOW_WAREHOUSE_FILE: &str = "flow_warehouse.csv";
pub const ORDERS_FILE: &str = "orders.csv";
pub const SHIPMENTS_FILE: &str = "shipments.csv";
pub const TOTAL_INVENTORY_FILE: &str = "total_inventory.csv";

/// 导出层错误类型
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("输出目录创建失败 ({dir}): {source}")]
    CreateDirError {
        dir: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV 写出失败 ({file}): {source}")]
    CsvWriteError {
        file: String,
        #[source]
        source: csv::Error,
    },

    #[error("文件写出失败 ({file}): {source}")]
    IoError {
        file: String,
        #[source]
        source: std::io::Error,
    },
}

/// 把结果报表写出到目录 (不存在则创建)
///
/// 空表也写出表头, 保证下游读取方拿到稳定的列结构。
pub fn write_reports(dir: &Path, reports: &PlanningReports) -> Result<(), ExportError> {
    fs::create_dir_all(dir).map_err(|source| ExportError::CreateDirError {
        dir: dir.display().to_string(),
        source,
    })?;

    write_table(&dir.join(KPIS_FILE), &["KPI", "Value"], &reports.kpis)?;
    write_table(
        &dir.join(FLOW_SUPPLIER_FILE),
        &[
            "Item ID",
            "Period ID",
            "Initial Inventory",
            "Order Qty.",
            "Transferred Qty.",
            "Final Inventory",
            "Unit Holding Cost",
            "Holding Cost",
        ],
        &reports.flow_supplier,
    )?;
    write_table(
        &dir.join(FLOW_WAREHOUSE_FILE),
        &[
            "Item ID",
            "Period ID",
            "Initial Inventory",
            "Received Qty.",
            "Demand Qty.",
            "Final Inventory",
            "Min Inventory",
            "Unit Holding Cost",
            "Holding Cost",
        ],
        &reports.flow_warehouse,
    )?;
    write_table(
        &dir.join(ORDERS_FILE),
        &[
            "Order ID",
            "Item ID",
            "Period ID",
            "Order Qty.",
            "Min Order Qty.",
            "Max Order Qty.",
            "Unit Cost",
            "Order Cost",
        ],
        &reports.orders,
    )?;
    write_table(
        &dir.join(SHIPMENTS_FILE),
        &[
            "Shipment ID",
            "Item ID",
            "Period ID",
            "Transferred Qty.",
            "Min Transfer Qty.",
        ],
        &reports.shipments,
    )?;
    write_table(
        &dir.join(TOTAL_INVENTORY_FILE),
        &["Site ID", "Period ID", "Final Inventory", "Inventory Capacity"],
        &reports.total_inventory,
    )?;

    info!(dir = %dir.display(), "结果报表导出完成");
    Ok(())
}

fn write_table<T: Serialize>(
    path: &Path,
    headers: &[&str],
    rows: &[T],
) -> Result<(), ExportError> {
    let file = path.display().to_string();
    let csv_error = |source: csv::Error| ExportError::CsvWriteError {
        file: file.clone(),
        source,
    };

    // 表头显式写出, 关闭 serialize 的自动表头
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(csv_error)?;
    writer.write_record(headers).map_err(csv_error)?;
    for row in rows {
        writer.serialize(row).map_err(csv_error)?;
    }
    writer.flush().map_err(|source| ExportError::IoError {
        file: file.clone(),
        source,
    })?;
    Ok(())
}
