use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::model::{Dataset, LatencyStats, Record, Score, ServerEntry};

/// Structural problems in an otherwise readable file.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("duplicate server id '{0}'")]
    DuplicateServer(String),
    /// `row` is the CSV line number, or the 1-based Parquet row.
    #[error("row {row}: missing server id")]
    MissingServerId { row: usize },
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("column '{column}' has unsupported type {data_type}")]
    UnsupportedColumnType { column: String, data_type: String },
}

/// Column names shared by the CSV and Parquet layouts.
const COL_SERVER: &str = "server";
const COL_GEOCODE: &str = "geocode";
const COL_SCORE: &str = "score_total";
const COL_SUCCESS: &str = "success_rate";
const COL_LATENCY: &str = "latency_mean_ms";
const COL_QPS: &str = "qps";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a benchmark dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json`    – `{ "<server>": { "geocode": ..., "score": {...}, ... }, ... }`
/// * `.csv`     – one row per server, see [`read_csv`]
/// * `.parquet` – flat table with the CSV column names
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            parse_json(&text)?
        }
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            read_csv(file)?
        }
        "parquet" | "pq" => load_parquet(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    warn_negative_metrics(&dataset);
    Ok(dataset)
}

fn warn_negative_metrics(dataset: &Dataset) {
    for entry in dataset.iter() {
        let r = &entry.record;
        let negative = [
            r.score.total,
            r.score.success_rate,
            r.latency_stats.mean_ms,
            r.queries_per_second,
        ]
        .iter()
        .any(|v| *v < 0.0);
        if negative {
            log::warn!(
                "Server {} has negative metrics; they will not be charted",
                entry.id
            );
        }
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Parse the JSON layout: a top-level object keyed by server id.
///
/// ```json
/// {
///   "1.1.1.1": {
///     "geocode": "US",
///     "score": { "total": 80, "successRate": 99.5 },
///     "latencyStats": { "meanMs": 20.4 },
///     "queriesPerSecond": 310
///   }
/// }
/// ```
///
/// Key order in the file becomes the dataset order.
pub fn parse_json(text: &str) -> Result<Dataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let servers = root
        .as_object()
        .context("Expected top-level JSON object keyed by server id")?;

    let entries = servers
        .iter()
        .map(|(id, val)| {
            let record = Record::deserialize(val)
                .with_context(|| format!("Server '{id}': invalid record"))?;
            Ok(ServerEntry {
                id: id.clone(),
                record,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Dataset::from_entries(entries))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names.
/// `server` is required; `geocode`, `score_total`, `success_rate`,
/// `latency_mean_ms` and `qps` are optional. Empty numeric cells are `0`.
pub fn read_csv<R: Read>(input: R) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let position = |name: &str| headers.iter().position(|h| h == name);
    let server_idx = position(COL_SERVER).ok_or(DatasetError::MissingColumn(COL_SERVER))?;
    let geocode_idx = position(COL_GEOCODE);
    let score_idx = position(COL_SCORE);
    let success_idx = position(COL_SUCCESS);
    let latency_idx = position(COL_LATENCY);
    let qps_idx = position(COL_QPS);

    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        // Line 1 is the header.
        let line = row_no + 2;
        let row = result.with_context(|| format!("CSV line {line}"))?;
        let cell = |idx: Option<usize>| idx.and_then(|i| row.get(i)).unwrap_or("");
        let number = |idx: Option<usize>, col: &str| -> Result<f64> {
            let raw = cell(idx).trim();
            if raw.is_empty() {
                return Ok(0.0);
            }
            raw.parse::<f64>()
                .with_context(|| format!("Line {line}, {col}: '{raw}' is not a number"))
        };

        let id = cell(Some(server_idx)).trim().to_string();
        if id.is_empty() {
            return Err(DatasetError::MissingServerId { row: line }.into());
        }
        if !seen.insert(id.clone()) {
            return Err(DatasetError::DuplicateServer(id).into());
        }

        let record = Record {
            geocode: cell(geocode_idx).to_string(),
            score: Score {
                total: number(score_idx, COL_SCORE)?,
                success_rate: number(success_idx, COL_SUCCESS)?,
            },
            latency_stats: LatencyStats {
                mean_ms: number(latency_idx, COL_LATENCY)?,
            },
            queries_per_second: number(qps_idx, COL_QPS)?,
        };
        entries.push(ServerEntry { id, record });
    }

    Ok(Dataset::from_entries(entries))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one row per server.
///
/// Expected schema:
/// - `server`: Utf8 – server id (required)
/// - `geocode`: Utf8 – region code, nulls read as empty
/// - `score_total`, `success_rate`, `latency_mean_ms`, `qps`: any of
///   Float64 / Float32 / Int64 / Int32, nulls read as `0`
///
/// Absent optional columns read as `0` / empty.
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut seen = HashSet::new();
    let mut entries = Vec::new();
    let mut rows_before = 0;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();
        let column = |name: &str| schema.index_of(name).ok().map(|i| batch.column(i));

        let server_col = column(COL_SERVER).ok_or(DatasetError::MissingColumn(COL_SERVER))?;
        let geocode_col = column(COL_GEOCODE);
        let score_col = column(COL_SCORE);
        let success_col = column(COL_SUCCESS);
        let latency_col = column(COL_LATENCY);
        let qps_col = column(COL_QPS);

        for row in 0..batch.num_rows() {
            let id = extract_string(server_col, COL_SERVER, row)?.trim().to_string();
            if id.is_empty() {
                let row = rows_before + row + 1;
                return Err(DatasetError::MissingServerId { row }.into());
            }
            if !seen.insert(id.clone()) {
                return Err(DatasetError::DuplicateServer(id).into());
            }

            let geocode = match geocode_col {
                Some(col) => extract_string(col, COL_GEOCODE, row)?,
                None => String::new(),
            };
            let number = |col: Option<&Arc<dyn Array>>, name: &str| -> Result<f64> {
                col.map_or(Ok(0.0), |c| extract_f64(c, name, row))
            };

            let record = Record {
                geocode,
                score: Score {
                    total: number(score_col, COL_SCORE)?,
                    success_rate: number(success_col, COL_SUCCESS)?,
                },
                latency_stats: LatencyStats {
                    mean_ms: number(latency_col, COL_LATENCY)?,
                },
                queries_per_second: number(qps_col, COL_QPS)?,
            };
            entries.push(ServerEntry { id, record });
        }
        rows_before += batch.num_rows();
    }

    Ok(Dataset::from_entries(entries))
}

// -- Parquet / Arrow helpers --

fn unsupported(col: &Arc<dyn Array>, name: &str) -> anyhow::Error {
    DatasetError::UnsupportedColumnType {
        column: name.to_string(),
        data_type: format!("{:?}", col.data_type()),
    }
    .into()
}

/// Read a string cell; nulls become the empty string.
fn extract_string(col: &Arc<dyn Array>, name: &str, row: usize) -> Result<String> {
    if col.is_null(row) {
        return Ok(String::new());
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        _ => Err(unsupported(col, name)),
    }
}

/// Read a numeric cell as `f64`; nulls become `0`.
fn extract_f64(col: &Arc<dyn Array>, name: &str, row: usize) -> Result<f64> {
    if col.is_null(row) {
        return Ok(0.0);
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Float64 => any.downcast_ref::<Float64Array>().map(|a| a.value(row)),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(row) as f64),
        DataType::Int32 => any.downcast_ref::<Int32Array>().map(|a| a.value(row) as f64),
        _ => None,
    };
    value.ok_or_else(|| unsupported(col, name))
}
