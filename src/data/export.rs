use std::path::Path;

use anyhow::{Context, Result};

use super::series::ChartSeries;

/// Pretty JSON object keyed by series kind, each `{labels, values}`.
pub fn series_to_json(series: &ChartSeries) -> Result<String> {
    serde_json::to_string_pretty(series).context("serialising chart series")
}

pub fn write_series(path: &Path, series: &ChartSeries) -> Result<()> {
    let text = series_to_json(series)?;
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Exported chart series to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::series::{MetricKind, Series};
    use serde_json::Value;

    #[test]
    fn export_is_keyed_by_kind() {
        let series = ChartSeries {
            scores: Series {
                labels: vec!["s1".into()],
                values: vec![80.0],
            },
            ..Default::default()
        };
        let json: Value = serde_json::from_str(&series_to_json(&series).unwrap()).unwrap();
        for kind in MetricKind::ALL {
            assert!(json.get(kind.key()).is_some(), "missing {}", kind.key());
        }
        assert_eq!(json["scores"]["labels"][0], "s1");
        assert_eq!(json["scores"]["values"][0], 80.0);
        assert_eq!(json["qps"]["labels"].as_array().map(Vec::len), Some(0));
    }
}
