pub const TITLE: &str = "SpeedX";
pub const SUBTITLE: &str = "Website Performance Analyzer";
pub const INPUT_HINT: &str = "Enter website URL (:q to quit)";
pub const LOADING_TEXT: &str = "Analyzing...";
pub const METRICS_HEADER: &str = "Performance Metrics";
