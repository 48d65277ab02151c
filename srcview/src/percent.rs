// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// Percentage of `covered` out of `total`, rounded to two decimal places.
/// An empty total is 0 percent.
pub fn percent(covered: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }

    let ratio = covered as f64 / total as f64 * 100.0;

    (ratio * 100.0).round() / 100.0
}

/// Formats a percentage with at least one decimal place, so whole numbers
/// read `25.0` rather than `25`.
pub fn format_percent(value: f64) -> String {
    let text = value.to_string();

    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}

/// `<title> : <covered> / <total> blocks covered : <percent> %`
pub fn coverage_title(title: &str, covered: usize, total: usize) -> String {
    format!(
        "{title} : {covered} / {total} blocks covered : {} %",
        format_percent(percent(covered, total))
    )
}
