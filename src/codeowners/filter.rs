/// Drops blank and `#` comment lines, keeping the trimmed form of every
/// remaining line in source order.
pub fn filter_content(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
