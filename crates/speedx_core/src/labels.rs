/// Known metric keys and their display labels.
pub const METRIC_LABELS: &[(&str, &str)] = &[
    ("performance", "Performance Score"),
    ("ttfb", "Time to First Byte (TTFB)"),
    ("lcp", "Largest Contentful Paint (LCP)"),
    ("cls", "Cumulative Layout Shift (CLS)"),
    ("fid", "First Input Delay (FID)"),
    ("fcp", "First Contentful Paint (FCP)"),
    ("speedIndex", "Speed Index"),
    ("tbt", "Total Blocking Time (TBT)"),
    ("tti", "Time to Interactive (TTI)"),
    ("inputLatency", "Estimated Input Latency"),
    ("totalPageSize", "Total Page Size"),
    ("numRequests", "Number of Requests"),
];

/// Human-readable label for a metric key. Unknown keys are returned unchanged
/// so a metric the backend adds later is still shown.
pub fn metric_label(key: &str) -> &str {
    METRIC_LABELS
        .iter()
        .find(|(known, _)| *known == key)
        .map(|(_, label)| *label)
        .unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_keys_are_unique() {
        for (i, (key, _)) in METRIC_LABELS.iter().enumerate() {
            assert!(
                METRIC_LABELS[i + 1..].iter().all(|(other, _)| other != key),
                "duplicate key {key}"
            );
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(metric_label("speedIndex"), "Speed Index");
        assert_eq!(metric_label("speedindex"), "speedindex");
        assert_eq!(metric_label("TTFB"), "TTFB");
    }
}
