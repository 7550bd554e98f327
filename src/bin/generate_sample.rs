use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use parquet::arrow::ArrowWriter;
use serde_json::{json, Map, Value};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

struct SampleServer {
    id: String,
    geocode: String,
    score_total: f64,
    success_rate: f64,
    latency_mean_ms: f64,
    qps: f64,
}

/// (server, geocode, base latency in ms)
const SERVERS: &[(&str, &str, f64)] = &[
    ("1.1.1.1", "CDN", 12.0),
    ("8.8.8.8", "GLOBAL", 18.0),
    ("9.9.9.9", "CH", 31.0),
    ("dns.google", "US", 20.0),
    ("dns.adguard.com", "CY", 45.0),
    ("223.5.5.5", "CN", 38.0),
    ("119.29.29.29", "CN", 41.0),
    ("dns.twnic.tw", "TW", 55.0),
    ("public.dns.iij.jp", "JP", 60.0),
    ("dns.sb", "US-EAST", 27.0),
    ("resolver1.opendns.com", "US-WEST", 24.0),
    ("dns.quad9.net", "DE", 33.0),
    ("anycast.censurfridns.dk", "DK", 48.0),
    ("dns.nextdns.io", "ANYCAST", 16.0),
    ("dns.sg.tiar.app", "SG", 70.0),
    ("ordns.he.net", "HK", 52.0),
    ("doh.dns.sb", "DE", 35.0),
    ("unreachable.example", "AU", 0.0),
    ("local-resolver", "", 3.0),
];

fn generate(rng: &mut SimpleRng) -> Vec<SampleServer> {
    SERVERS
        .iter()
        .enumerate()
        .map(|(i, &(id, geocode, base_latency))| {
            // A base latency of zero stands for a server that never answered.
            let (score_total, success_rate, latency_mean_ms, qps) = if base_latency == 0.0 {
                (0.0, 0.0, 0.0, 0.0)
            } else {
                let latency = base_latency * rng.range(0.85, 1.25);
                let success = rng.range(92.0, 100.0);
                // Every fifth server skips the throughput test.
                let qps = if i % 5 == 4 {
                    0.0
                } else {
                    (1000.0 / latency) * rng.range(8.0, 14.0)
                };
                let score = (success - latency * 0.3).clamp(1.0, 100.0);
                (score, success, latency, qps)
            };
            SampleServer {
                id: id.to_string(),
                geocode: geocode.to_string(),
                score_total: round2(score_total),
                success_rate: round2(success_rate),
                latency_mean_ms: round2(latency_mean_ms),
                qps: round2(qps),
            }
        })
        .collect()
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn to_json(servers: &[SampleServer]) -> Value {
    let map: Map<String, Value> = servers
        .iter()
        .map(|s| {
            let record = json!({
                "geocode": s.geocode,
                "score": { "total": s.score_total, "successRate": s.success_rate },
                "latencyStats": { "meanMs": s.latency_mean_ms },
                "queriesPerSecond": s.qps,
            });
            (s.id.clone(), record)
        })
        .collect();
    Value::Object(map)
}

fn to_batch(servers: &[SampleServer]) -> Result<RecordBatch> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("server", DataType::Utf8, false),
        Field::new("geocode", DataType::Utf8, false),
        Field::new("score_total", DataType::Float64, false),
        Field::new("success_rate", DataType::Float64, false),
        Field::new("latency_mean_ms", DataType::Float64, false),
        Field::new("qps", DataType::Float64, false),
    ]));

    let column = |f: fn(&SampleServer) -> f64| Float64Array::from_iter_values(servers.iter().map(f));
    RecordBatch::try_new(
        schema,
        vec![
            Arc::new(StringArray::from_iter_values(servers.iter().map(|s| s.id.as_str()))),
            Arc::new(StringArray::from_iter_values(servers.iter().map(|s| s.geocode.as_str()))),
            Arc::new(column(|s| s.score_total)),
            Arc::new(column(|s| s.success_rate)),
            Arc::new(column(|s| s.latency_mean_ms)),
            Arc::new(column(|s| s.qps)),
        ],
    )
    .context("building record batch")
}

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(42);
    let servers = generate(&mut rng);

    let json_path = out_dir.join("sample_bench.json");
    let text = serde_json::to_string_pretty(&to_json(&servers)).context("serialising JSON")?;
    std::fs::write(&json_path, text)
        .with_context(|| format!("writing {}", json_path.display()))?;

    let batch = to_batch(&servers)?;
    let parquet_path = out_dir.join("sample_bench.parquet");
    let file = std::fs::File::create(&parquet_path)
        .with_context(|| format!("creating {}", parquet_path.display()))?;
    let mut writer =
        ArrowWriter::try_new(file, batch.schema(), None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;

    log::debug!(
        "Sample table:\n{}",
        pretty_format_batches(std::slice::from_ref(&batch)).context("formatting batch")?
    );
    println!(
        "Wrote {} servers to {} and {}",
        servers.len(),
        json_path.display(),
        parquet_path.display()
    );
    Ok(())
}
