use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;
use uuid::Uuid;

use crate::classify::{classify, LinkRow};
use crate::stats::{aggregate, Distributions, Metrics};
use crate::{dedupe, normalize};

/// Batch options supplied by the caller.
#[derive(Debug, Clone, Copy)]
pub struct AnalyzeOptions {
    /// Prepend `https://` to scheme-less lines before parsing.
    pub assume_https: bool,
    /// Collapse case-insensitive duplicates of the normalized form.
    pub dedupe: bool,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            assume_https: true,
            dedupe: false,
        }
    }
}

/// Row and report identifier supplier. Injectable so the pipeline stays a
/// pure function of explicit inputs; uniqueness within a process lifetime
/// is the only requirement.
pub trait IdSource {
    fn next_id(&mut self) -> String;
}

/// Production identifiers: random v4 UUIDs.
#[derive(Debug, Default)]
pub struct UuidSource;

impl IdSource for UuidSource {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Monotonic counter, for deterministic scenario tests.
#[derive(Debug, Default)]
pub struct SequentialIdSource {
    next: u64,
}

impl SequentialIdSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for SequentialIdSource {
    fn next_id(&mut self) -> String {
        let id = self.next;
        self.next += 1;
        id.to_string()
    }
}

/// Timestamp supplier for the report's `created_at`.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock: system time.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fixed instant, for deterministic scenario tests.
#[derive(Debug)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Immutable snapshot of one analysis run. Serializes losslessly so callers
/// can persist records in a bounded history and re-display them exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkAnalysis {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub input: String,
    pub items: Vec<LinkRow>,
    pub metrics: Metrics,
    pub distributions: Distributions,
}

/// Analyze a batch of candidate links with production id and clock sources.
pub fn analyze_links(input: &str, options: &AnalyzeOptions) -> LinkAnalysis {
    analyze_links_with(input, options, &mut UuidSource, &SystemClock)
}

/// Fully explicit form of `analyze_links`: a pure, synchronous function of
/// its inputs. Never fails; worst case every row is marked invalid.
pub fn analyze_links_with(
    input: &str,
    options: &AnalyzeOptions,
    ids: &mut dyn IdSource,
    clock: &dyn Clock,
) -> LinkAnalysis {
    let start_time = Instant::now();
    info!(
        action = "start",
        component = "analysis",
        assume_https = options.assume_https,
        dedupe = options.dedupe,
        "Starting link analysis"
    );

    let id = ids.next_id();

    let lines = normalize::split_lines(input);
    let pairs: Vec<(String, String)> = lines
        .iter()
        .map(|line| {
            (
                line.to_string(),
                normalize::normalize(line, options.assume_https),
            )
        })
        .collect();

    let pairs = dedupe::dedupe(pairs, options.dedupe);

    let items: Vec<LinkRow> = pairs
        .into_iter()
        .map(|(raw, normalized)| classify(ids.next_id(), raw, normalized))
        .collect();

    let (metrics, distributions) = aggregate(&items);

    let total_time = start_time.elapsed();
    info!(
        action = "complete",
        component = "analysis",
        total = metrics.total,
        valid = metrics.valid,
        invalid = metrics.invalid,
        unique_domains = metrics.unique_domains,
        duration_ms = total_time.as_millis(),
        "Link analysis completed"
    );

    LinkAnalysis {
        id,
        created_at: clock.now(),
        input: input.to_string(),
        items,
        metrics,
        distributions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
    }

    #[test]
    fn test_empty_input() {
        let options = AnalyzeOptions {
            assume_https: true,
            dedupe: true,
        };
        let analysis =
            analyze_links_with("", &options, &mut SequentialIdSource::new(), &fixed_clock());
        assert!(analysis.items.is_empty());
        assert_eq!(analysis.metrics.total, 0);
        assert_eq!(analysis.metrics.avg_length, 0.0);
        assert!(analysis.distributions.protocols.is_empty());
        assert!(analysis.distributions.domains.is_empty());
        assert!(analysis.distributions.tlds.is_empty());
    }

    #[test]
    fn test_totality_across_option_combinations() {
        let input = "https://a.com\nb.com\n::::\n//c.com/x\n\n  \n";
        for assume_https in [false, true] {
            for dedupe in [false, true] {
                let options = AnalyzeOptions {
                    assume_https,
                    dedupe,
                };
                let analysis = analyze_links(input, &options);
                assert_eq!(
                    analysis.metrics.valid + analysis.metrics.invalid,
                    analysis.metrics.total
                );
                assert_eq!(analysis.metrics.total, analysis.items.len());
            }
        }
    }

    #[test]
    fn test_input_echoed_verbatim() {
        let input = "  https://a.com  \r\njunk\r\n";
        let analysis = analyze_links(input, &AnalyzeOptions::default());
        assert_eq!(analysis.input, input);
        assert_eq!(analysis.items[0].raw, "https://a.com");
    }

    #[test]
    fn test_dedupe_collapses_case_insensitively() {
        let options = AnalyzeOptions {
            assume_https: true,
            dedupe: true,
        };
        let analysis = analyze_links("Example.com\nexample.com", &options);
        assert_eq!(analysis.items.len(), 1);
        assert_eq!(analysis.items[0].raw, "Example.com");
    }

    #[test]
    fn test_fixed_clock_and_sequential_ids() {
        let clock = fixed_clock();
        let mut ids = SequentialIdSource::new();
        let analysis = analyze_links_with(
            "https://a.com\nhttps://b.com",
            &AnalyzeOptions::default(),
            &mut ids,
            &clock,
        );
        assert_eq!(analysis.id, "0");
        assert_eq!(analysis.items[0].id, "1");
        assert_eq!(analysis.items[1].id, "2");
        assert_eq!(analysis.created_at, clock.0);
    }

    #[test]
    fn test_serialization_round_trip() {
        let analysis = analyze_links(
            "https://www.example.com/x?a=1#top\nbroken url",
            &AnalyzeOptions::default(),
        );
        let json = serde_json::to_string(&analysis).unwrap();
        let restored: LinkAnalysis = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.id, analysis.id);
        assert_eq!(restored.items.len(), analysis.items.len());
        assert_eq!(restored.metrics, analysis.metrics);
        assert_eq!(
            restored.distributions.domains.get_index(0),
            analysis.distributions.domains.get_index(0)
        );
    }
}
