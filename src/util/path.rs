/// Expand `~`, `$VAR` and `${VAR}` in a path string.
///
/// Falls back to the input when a variable is undefined.
pub fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
