//! Snapshot, CSV and summary exports.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use csv::Writer;
use folio_types::{Etf, Holding, Property, Stock};
use serde::Serialize;
use tempfile::NamedTempFile;
use thiserror::Error;

use super::App;
use crate::report::summary_report;
use crate::status::StatusKind;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export is disabled")]
    Disabled,
    #[error("failed to write export to {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to serialize portfolio: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to encode CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// What an export writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// The whole snapshot as reloadable JSON.
    Snapshot,
    /// One CSV file per non-empty asset class, in a directory.
    Csv,
    /// Plain-text summary report.
    Summary,
}

impl ExportKind {
    const fn stem(self) -> &'static str {
        match self {
            ExportKind::Snapshot | ExportKind::Csv => "portfolio",
            ExportKind::Summary => "summary",
        }
    }

    const fn extension(self) -> Option<&'static str> {
        match self {
            ExportKind::Snapshot => Some("json"),
            ExportKind::Csv => None,
            ExportKind::Summary => Some("txt"),
        }
    }
}

/// `~/.folio/exports/<stem>-<timestamp>[.ext]`, or under the working
/// directory when there is no home. CSV exports get a directory.
fn default_export_path(kind: ExportKind) -> PathBuf {
    let mut file = format!("{}-{}", kind.stem(), Utc::now().format("%Y%m%d-%H%M%S"));
    if let Some(ext) = kind.extension() {
        file.push('.');
        file.push_str(ext);
    }
    dirs::home_dir()
        .map_or_else(|| PathBuf::from("."), |home| home.join(".folio"))
        .join("exports")
        .join(file)
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(io_err)?;
    let mut tmp = NamedTempFile::new_in(parent).map_err(io_err)?;
    tmp.write_all(bytes).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|err| io_err(err.error))?;
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StockRow<'a> {
    symbol: &'a str,
    name: &'a str,
    quantity: f64,
    purchase_price: f64,
    current_price: f64,
    total_value: f64,
    total_return: f64,
    return_percentage: Option<f64>,
    purchase_fees: f64,
    exchange: Option<&'a str>,
    sector: Option<&'a str>,
    tags: String,
}

impl<'a> From<&'a Stock> for StockRow<'a> {
    fn from(s: &'a Stock) -> Self {
        Self {
            symbol: &s.symbol,
            name: &s.name,
            quantity: s.quantity,
            purchase_price: s.purchase_price,
            current_price: s.current_price,
            total_value: s.total_value(),
            total_return: s.total_return(),
            return_percentage: s.return_percentage(),
            purchase_fees: s.purchase_fees,
            exchange: s.exchange.as_deref(),
            sector: s.sector.as_deref(),
            tags: s.tags.join(";"),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EtfRow<'a> {
    symbol: &'a str,
    name: &'a str,
    quantity: f64,
    purchase_price: f64,
    current_price: f64,
    total_value: f64,
    total_return: f64,
    return_percentage: Option<f64>,
    expense_ratio: f64,
    annual_expense_cost: f64,
    category: Option<&'a str>,
    exchange: Option<&'a str>,
    tags: String,
}

impl<'a> From<&'a Etf> for EtfRow<'a> {
    fn from(e: &'a Etf) -> Self {
        Self {
            symbol: &e.symbol,
            name: &e.name,
            quantity: e.quantity,
            purchase_price: e.purchase_price,
            current_price: e.current_price,
            total_value: e.total_value(),
            total_return: e.total_return(),
            return_percentage: e.return_percentage(),
            expense_ratio: e.expense_ratio,
            annual_expense_cost: e.annual_expense_cost(),
            category: e.category.as_deref(),
            exchange: e.exchange.as_deref(),
            tags: e.tags.join(";"),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PropertyRow<'a> {
    address: &'a str,
    property_type: &'static str,
    purchase_price: f64,
    current_value: f64,
    total_purchase_costs: f64,
    total_return: f64,
    return_percentage: Option<f64>,
    gross_rental_yield: Option<f64>,
    net_rental_yield: Option<f64>,
    capital_growth: f64,
    annual_cash_flow: f64,
    tags: String,
}

impl<'a> From<&'a Property> for PropertyRow<'a> {
    fn from(p: &'a Property) -> Self {
        Self {
            address: &p.address,
            property_type: p.kind.label(),
            purchase_price: p.purchase_price,
            current_value: p.current_value,
            total_purchase_costs: p.total_purchase_costs,
            total_return: p.total_return(),
            return_percentage: p.return_percentage(),
            gross_rental_yield: p.gross_rental_yield(),
            net_rental_yield: p.net_rental_yield(),
            capital_growth: p.capital_growth(),
            annual_cash_flow: p.annual_cash_flow(),
            tags: p.tags.join(";"),
        }
    }
}

/// Header plus one record per row. `None` when there are no rows.
fn encode_csv<T: Serialize>(
    rows: impl IntoIterator<Item = T>,
) -> Result<Option<Vec<u8>>, ExportError> {
    let mut writer = Writer::from_writer(Vec::new());
    let mut any = false;
    for row in rows {
        writer.serialize(row)?;
        any = true;
    }
    if !any {
        return Ok(None);
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Csv(err.into_error().into()))?;
    Ok(Some(bytes))
}

impl App {
    /// Write the current snapshot as JSON. The file is replaced atomically.
    pub fn export_snapshot(&mut self, path: &Path) -> Result<PathBuf, ExportError> {
        let result = self.write_snapshot(path).map(|()| path.to_path_buf());
        self.report_export(ExportKind::Snapshot, result.as_ref().map(|p| vec![p.clone()]));
        result
    }

    /// Write `stocks.csv`, `etfs.csv` and `properties.csv` into `dir`,
    /// skipping empty classes.
    pub fn export_csv(&mut self, dir: &Path) -> Result<Vec<PathBuf>, ExportError> {
        let result = self.write_csv(dir);
        self.report_export(ExportKind::Csv, result.as_ref().map(Clone::clone));
        result
    }

    /// Write the plain-text summary report.
    pub fn export_summary(&mut self, path: &Path) -> Result<PathBuf, ExportError> {
        let result = self.write_summary(path).map(|()| path.to_path_buf());
        self.report_export(ExportKind::Summary, result.as_ref().map(|p| vec![p.clone()]));
        result
    }

    /// Export to the default location for `kind`.
    pub fn export_default(&mut self, kind: ExportKind) -> Result<Vec<PathBuf>, ExportError> {
        let path = default_export_path(kind);
        match kind {
            ExportKind::Snapshot => self.export_snapshot(&path).map(|p| vec![p]),
            ExportKind::Csv => self.export_csv(&path),
            ExportKind::Summary => self.export_summary(&path).map(|p| vec![p]),
        }
    }

    fn report_export(&mut self, kind: ExportKind, result: Result<Vec<PathBuf>, &ExportError>) {
        match result {
            Ok(written) => {
                let Some(first) = written.first() else {
                    tracing::info!(?kind, "Nothing to export");
                    self.set_status(StatusKind::Info, "Nothing to export");
                    return;
                };
                let shown = match kind {
                    ExportKind::Csv => first.parent().unwrap_or(first.as_path()),
                    ExportKind::Snapshot | ExportKind::Summary => first,
                };
                tracing::info!(
                    ?kind,
                    files = written.len(),
                    path = %shown.display(),
                    "Portfolio exported"
                );
                self.set_status(
                    StatusKind::Success,
                    format!("Exported to {}", shown.display()),
                );
            }
            Err(err) => {
                tracing::warn!(?kind, "Export failed: {err}");
                self.set_status(StatusKind::Error, err.to_string());
            }
        }
    }

    fn ensure_export_enabled(&self) -> Result<(), ExportError> {
        if self.settings().features.export {
            Ok(())
        } else {
            Err(ExportError::Disabled)
        }
    }

    fn write_snapshot(&self, path: &Path) -> Result<(), ExportError> {
        self.ensure_export_enabled()?;
        let json = serde_json::to_string_pretty(self.snapshot())?;
        write_atomic(path, json.as_bytes())
    }

    fn write_csv(&self, dir: &Path) -> Result<Vec<PathBuf>, ExportError> {
        self.ensure_export_enabled()?;
        let portfolio = &self.snapshot().portfolio;
        let files = [
            ("stocks.csv", encode_csv(portfolio.stocks.iter().map(StockRow::from))?),
            ("etfs.csv", encode_csv(portfolio.etfs.iter().map(EtfRow::from))?),
            (
                "properties.csv",
                encode_csv(portfolio.properties.iter().map(PropertyRow::from))?,
            ),
        ];

        let mut written = Vec::new();
        for (name, bytes) in files {
            let Some(bytes) = bytes else { continue };
            let path = dir.join(name);
            write_atomic(&path, &bytes)?;
            written.push(path);
        }
        Ok(written)
    }

    fn write_summary(&self, path: &Path) -> Result<(), ExportError> {
        self.ensure_export_enabled()?;
        let report = summary_report(&self.snapshot().portfolio, Utc::now());
        write_atomic(path, report.as_bytes())
    }
}
