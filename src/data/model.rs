use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

// ---------------------------------------------------------------------------
// Record – measured metrics of one server
// ---------------------------------------------------------------------------

/// Aggregate score block of a benchmark record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub success_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatencyStats {
    #[serde(default, deserialize_with = "zero_if_null")]
    pub mean_ms: f64,
}

/// One benchmarked server. Missing or `null` numeric fields read as `0`,
/// a missing or `null` geocode reads as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[serde(default, deserialize_with = "empty_if_null")]
    pub geocode: String,
    #[serde(default, deserialize_with = "default_if_null")]
    pub score: Score,
    #[serde(default, deserialize_with = "default_if_null")]
    pub latency_stats: LatencyStats,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub queries_per_second: f64,
}

impl Record {
    /// The region code, or `None` when the geocode is blank.
    pub fn region(&self) -> Option<&str> {
        if self.geocode.trim().is_empty() {
            None
        } else {
            Some(&self.geocode)
        }
    }

    /// A record is valid when it has a region and a positive total score.
    pub fn is_valid(&self) -> bool {
        self.region().is_some() && self.score.total > 0.0
    }
}

fn zero_if_null<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(d)?.unwrap_or(0.0))
}

fn empty_if_null<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

fn default_if_null<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded benchmark
// ---------------------------------------------------------------------------

/// A server identifier together with its record.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerEntry {
    pub id: String,
    pub record: Record,
}

/// Ordered mapping server id → record. Enumeration order is the order the
/// servers were loaded in, and every downstream output keeps it.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    servers: Vec<ServerEntry>,
    index: HashMap<String, usize>,
}

impl Dataset {
    /// Build the dataset from entries in load order.
    ///
    /// A repeated id replaces the earlier record but keeps its position.
    pub fn from_entries(entries: impl IntoIterator<Item = ServerEntry>) -> Self {
        let mut ds = Dataset::default();
        for entry in entries {
            match ds.index.get(&entry.id) {
                Some(&pos) => ds.servers[pos] = entry,
                None => {
                    ds.index.insert(entry.id.clone(), ds.servers.len());
                    ds.servers.push(entry);
                }
            }
        }
        ds
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.index.get(id).map(|&i| &self.servers[i].record)
    }

    /// Entry at a position in enumeration order.
    pub fn entry(&self, idx: usize) -> Option<&ServerEntry> {
        self.servers.get(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ServerEntry> {
        self.servers.iter()
    }

    /// Number of servers.
    pub fn len(&self) -> usize {
        self.servers.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }
}
