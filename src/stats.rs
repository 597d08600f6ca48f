use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::classify::LinkRow;

/// Summary counters over one analyzed batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub unique_domains: usize,
    pub with_query: usize,
    pub with_hash: usize,
    pub avg_length: f64,
}

/// Frequency distributions keyed by protocol, lowercase domain, and TLD.
///
/// Insertion order (first time a key was seen during aggregation) is
/// preserved and serves as the deterministic tie-break for `top_entries`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Distributions {
    pub protocols: IndexMap<String, u32>,
    pub domains: IndexMap<String, u32>,
    pub tlds: IndexMap<String, u32>,
}

/// Fold classified rows into metrics and distributions. Total over any row
/// sequence; an empty batch yields zeroed metrics with `avg_length` of 0.
pub fn aggregate(items: &[LinkRow]) -> (Metrics, Distributions) {
    let mut distributions = Distributions::default();
    let mut valid = 0;
    let mut with_query = 0;
    let mut with_hash = 0;
    let mut length_sum = 0usize;

    for row in items {
        if row.is_valid {
            valid += 1;
        }
        if row.query_params > 0 {
            with_query += 1;
        }
        if row.has_hash {
            with_hash += 1;
        }
        length_sum += row.length;

        if let Some(protocol) = &row.protocol {
            *distributions.protocols.entry(protocol.clone()).or_insert(0) += 1;
        }
        if let Some(domain) = &row.domain {
            *distributions.domains.entry(domain.to_lowercase()).or_insert(0) += 1;
        }
        if let Some(tld) = &row.tld {
            *distributions.tlds.entry(tld.clone()).or_insert(0) += 1;
        }
    }

    let total = items.len();
    let avg_length = if total == 0 {
        0.0
    } else {
        length_sum as f64 / total as f64
    };

    let metrics = Metrics {
        total,
        valid,
        invalid: total - valid,
        unique_domains: distributions.domains.len(),
        with_query,
        with_hash,
        avg_length,
    };

    (metrics, distributions)
}

/// The `limit` highest-count entries of a distribution, count descending.
/// Ties keep insertion order (stable sort over the map's iteration order).
pub fn top_entries(distribution: &IndexMap<String, u32>, limit: usize) -> Vec<(String, u32)> {
    let mut entries: Vec<(String, u32)> = distribution
        .iter()
        .map(|(key, count)| (key.clone(), *count))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.truncate(limit);
    entries
}
