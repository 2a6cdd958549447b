use speedx_core::{metric_label, METRIC_LABELS};

#[test]
fn every_known_key_maps_to_its_label() {
    let expected = [
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

    assert_eq!(METRIC_LABELS.len(), expected.len());
    for (key, label) in expected {
        assert_eq!(metric_label(key), label);
    }
}

#[test]
fn unknown_keys_fall_back_to_the_key() {
    for key in ["", "domSize", "performance ", "ttfb_ms", "Performance"] {
        assert_eq!(metric_label(key), key);
    }
}
