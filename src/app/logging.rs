/// Filter used when neither `--verbose` nor `RUST_LOG` asks for more.
pub const DEFAULT_FILTER: &str = "warn";

/// Picks the tracing filter directives. `--verbose` wins, then a non-blank
/// `RUST_LOG`, then [`DEFAULT_FILTER`].
pub fn filter_directives(verbose: bool, rust_log: Option<&str>) -> String {
    if verbose {
        return "debug".into();
    }
    match rust_log.map(str::trim) {
        Some(directives) if !directives.is_empty() => directives.to_string(),
        _ => DEFAULT_FILTER.into(),
    }
}
