use serde::Serialize;

use super::model::{Record, ServerEntry};

// ---------------------------------------------------------------------------
// Metric kinds
// ---------------------------------------------------------------------------

/// The four charted metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Score,
    Latency,
    SuccessRate,
    Qps,
}

impl MetricKind {
    pub const ALL: [MetricKind; 4] = [
        MetricKind::Score,
        MetricKind::Latency,
        MetricKind::SuccessRate,
        MetricKind::Qps,
    ];

    /// Key of the series in exported output.
    pub fn key(self) -> &'static str {
        match self {
            MetricKind::Score => "scores",
            MetricKind::Latency => "latencies",
            MetricKind::SuccessRate => "successRates",
            MetricKind::Qps => "qps",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            MetricKind::Score => "Score",
            MetricKind::Latency => "Mean latency",
            MetricKind::SuccessRate => "Success rate",
            MetricKind::Qps => "Queries per second",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            MetricKind::Score => "pts",
            MetricKind::Latency => "ms",
            MetricKind::SuccessRate => "%",
            MetricKind::Qps => "q/s",
        }
    }

    pub fn value(self, record: &Record) -> f64 {
        match self {
            MetricKind::Score => record.score.total,
            MetricKind::Latency => record.latency_stats.mean_ms,
            MetricKind::SuccessRate => record.score.success_rate,
            MetricKind::Qps => record.queries_per_second,
        }
    }
}

// ---------------------------------------------------------------------------
// Series
// ---------------------------------------------------------------------------

/// Parallel label/value columns for one bar chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Series {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl Series {
    /// Project `servers` onto `kind`, keeping strictly positive values only.
    /// NaN and negative values are dropped like zero.
    pub fn project(servers: &[&ServerEntry], kind: MetricKind) -> Self {
        let (labels, values) = servers
            .iter()
            .map(|e| (e.id.clone(), kind.value(&e.record)))
            .filter(|(_, v)| *v > 0.0)
            .unzip();
        Series { labels, values }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// All four series of one recomputation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub scores: Series,
    pub latencies: Series,
    pub success_rates: Series,
    pub qps: Series,
}

impl ChartSeries {
    pub fn get(&self, kind: MetricKind) -> &Series {
        match kind {
            MetricKind::Score => &self.scores,
            MetricKind::Latency => &self.latencies,
            MetricKind::SuccessRate => &self.success_rates,
            MetricKind::Qps => &self.qps,
        }
    }

    pub fn is_empty(&self) -> bool {
        MetricKind::ALL.iter().all(|&k| self.get(k).is_empty())
    }
}

/// Build every metric series from the filtered servers. Each kind filters
/// its zeros on its own, so a server can be charted for one metric and
/// missing from another.
pub fn build_series(servers: &[&ServerEntry]) -> ChartSeries {
    ChartSeries {
        scores: Series::project(servers, MetricKind::Score),
        latencies: Series::project(servers, MetricKind::Latency),
        success_rates: Series::project(servers, MetricKind::SuccessRate),
        qps: Series::project(servers, MetricKind::Qps),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{entries_at, filtered_indices};
    use crate::data::model::tests::{dataset, record};
    use crate::data::model::Dataset;
    use crate::data::selection::Selection;

    fn series_for(ds: &Dataset, regions: &[&str]) -> ChartSeries {
        let sel = regions
            .iter()
            .fold(Selection::none(), |s, r| s.toggled(r, true));
        build_series(&entries_at(ds, &filtered_indices(ds, &sel)))
    }

    #[test]
    fn single_server_with_zero_qps() {
        let ds = dataset(&[("s1", record("US", 80.0, 20.0, 99.0, 0.0))]);
        let out = series_for(&ds, &["US"]);

        assert_eq!(out.scores.labels, ["s1"]);
        assert_eq!(out.scores.values, [80.0]);
        assert_eq!(out.latencies.values, [20.0]);
        assert_eq!(out.success_rates.values, [99.0]);
        assert_eq!(out.qps, Series::default());
    }

    #[test]
    fn empty_input_gives_four_empty_series() {
        let out = build_series(&[]);
        for kind in MetricKind::ALL {
            let s = out.get(kind);
            assert!(s.labels.is_empty() && s.values.is_empty(), "{}", kind.key());
        }
        assert!(out.is_empty());
    }

    #[test]
    fn each_kind_filters_independently() {
        let ds = dataset(&[
            ("a", record("US", 50.0, 0.0, 90.0, 0.0)),
            ("b", record("US", 40.0, 12.0, 0.0, 300.0)),
        ]);
        let out = series_for(&ds, &["US"]);
        assert_eq!(out.scores.labels, ["a", "b"]);
        assert_eq!(out.latencies.labels, ["b"]);
        assert_eq!(out.success_rates.labels, ["a"]);
        assert_eq!(out.qps.labels, ["b"]);
    }

    #[test]
    fn labels_follow_dataset_order() {
        let ds = dataset(&[
            ("A", record("US", 3.0, 5.0, 0.0, 9.0)),
            ("B", record("US", 2.0, 0.0, 7.0, 8.0)),
            ("C", record("US", 1.0, 4.0, 6.0, 0.0)),
        ]);
        let out = series_for(&ds, &["US"]);
        let order = ["A", "B", "C"];
        for kind in MetricKind::ALL {
            let s = out.get(kind);
            assert_eq!(s.labels.len(), s.values.len());
            let positions: Vec<usize> = s
                .labels
                .iter()
                .map(|l| order.iter().position(|o| *o == l.as_str()).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]), "{}", kind.key());
        }
    }

    #[test]
    fn negative_and_nan_values_are_dropped() {
        let ds = dataset(&[("a", record("US", 10.0, -3.0, f64::NAN, 1.0))]);
        let out = series_for(&ds, &["US"]);
        assert!(out.latencies.is_empty());
        assert!(out.success_rates.is_empty());
        assert_eq!(out.qps.iter().collect::<Vec<_>>(), [("a", 1.0)]);
    }

    #[test]
    fn unselected_or_unscored_servers_never_charted() {
        let ds = dataset(&[
            ("a", record("US", 0.0, 5.0, 5.0, 5.0)),
            ("b", record("DE", 9.0, 5.0, 5.0, 5.0)),
            ("c", record("", 9.0, 5.0, 5.0, 5.0)),
        ]);
        assert!(series_for(&ds, &["US", ""]).is_empty());
    }
}
