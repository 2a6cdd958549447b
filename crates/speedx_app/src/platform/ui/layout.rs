use super::constants::*;

/// Lines printed once when an interactive session starts.
pub fn banner_lines() -> Vec<String> {
    vec![
        TITLE.to_string(),
        SUBTITLE.to_string(),
        String::new(),
        INPUT_HINT.to_string(),
    ]
}
