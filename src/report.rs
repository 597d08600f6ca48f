use indexmap::IndexMap;

use crate::analysis::LinkAnalysis;
use crate::stats::top_entries;
use crate::utils::{format_number, redact_domain};

/// Print the human-readable text report for one analysis run.
pub fn print_report(analysis: &LinkAnalysis, top: usize, redact: bool) {
    let metrics = &analysis.metrics;

    println!("\n--- Link Analysis ---");
    println!("Analyzed at: {}", analysis.created_at.format("%B %-d, %Y %H:%M UTC"));
    println!("Total links: {}", format_number(metrics.total as u64));
    println!(
        "Valid: {} / Invalid: {}",
        format_number(metrics.valid as u64),
        format_number(metrics.invalid as u64)
    );
    println!(
        "Unique domains: {}",
        format_number(metrics.unique_domains as u64)
    );
    println!(
        "With query: {} / With fragment: {}",
        format_number(metrics.with_query as u64),
        format_number(metrics.with_hash as u64)
    );
    println!("Average length: {:.1}", metrics.avg_length);

    print_distribution("protocols", &analysis.distributions.protocols, top, false);
    print_distribution("domains", &analysis.distributions.domains, top, redact);
    print_distribution("TLDs", &analysis.distributions.tlds, top, false);

    let errors: Vec<_> = analysis
        .items
        .iter()
        .filter(|row| !row.is_valid)
        .collect();
    if !errors.is_empty() {
        println!("\nInvalid lines:");
        for row in errors {
            println!(
                "- {}: {}",
                row.raw,
                row.error.as_deref().unwrap_or("unknown parse failure")
            );
        }
    }
}

fn print_distribution(label: &str, distribution: &IndexMap<String, u32>, top: usize, redact: bool) {
    if distribution.is_empty() {
        return;
    }

    println!(
        "\nTop {} {}:",
        std::cmp::min(top, distribution.len()),
        label
    );
    for (key, count) in top_entries(distribution, top) {
        let display_key = if redact { redact_domain(&key) } else { key };
        println!("- {}: {}", display_key, format_number(count as u64));
    }
}

/// Render per-link rows as RFC 4180 CSV with a header line.
pub fn to_csv(analysis: &LinkAnalysis) -> String {
    let mut out = String::from(
        "id,raw,normalized,is_valid,error,protocol,hostname,domain,tld,pathname,query_params,has_hash,length\n",
    );

    for row in &analysis.items {
        let fields = [
            row.id.clone(),
            row.raw.clone(),
            row.normalized.clone(),
            row.is_valid.to_string(),
            row.error.clone().unwrap_or_default(),
            row.protocol.clone().unwrap_or_default(),
            row.hostname.clone().unwrap_or_default(),
            row.domain.clone().unwrap_or_default(),
            row.tld.clone().unwrap_or_default(),
            row.pathname.clone().unwrap_or_default(),
            row.query_params.to_string(),
            row.has_hash.to_string(),
            row.length.to_string(),
        ];
        let escaped: Vec<String> = fields.iter().map(|f| csv_field(f)).collect();
        out.push_str(&escaped.join(","));
        out.push('\n');
    }

    out
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{analyze_links, AnalyzeOptions};

    #[test]
    fn test_csv_has_header_and_one_row_per_item() {
        let analysis = analyze_links(
            "https://a.com\nhttps://b.org/x?k=1",
            &AnalyzeOptions::default(),
        );
        let csv = to_csv(&analysis);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("id,raw,normalized,is_valid"));
        assert!(lines[1].contains("a.com"));
        assert!(lines[2].contains("b.org"));
    }

    #[test]
    fn test_csv_field_escaping() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn test_invalid_row_exports_error_column() {
        let options = AnalyzeOptions {
            assume_https: false,
            dedupe: false,
        };
        let analysis = analyze_links("not-a-url", &options);
        let csv = to_csv(&analysis);
        assert!(csv.lines().nth(1).unwrap().contains("false"));
    }
}
