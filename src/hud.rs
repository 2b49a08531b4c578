//! Text overlays

/// Format elapsed time units as `M:SS` (whole units, truncated)
pub fn format_elapsed(elapsed: f64) -> String {
    let t = elapsed.max(0.0) as u64;
    format!("{}:{:02}", t / 60, t % 60)
}
