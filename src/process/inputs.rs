use glob::glob;
use std::path::PathBuf;
use tracing::{debug, warn};

fn is_pattern(arg: &str) -> bool {
    arg.contains(['*', '?', '['])
}

/// Turn command-line arguments into file paths.
///
/// Arguments with glob metacharacters are expanded (sorted, files only).
/// Plain paths, and patterns that match nothing or fail to parse, are passed
/// through so the read error shows up against that file.
pub fn expand_inputs<I, S>(args: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut paths = Vec::new();
    for arg in args {
        let arg = arg.as_ref();
        if !is_pattern(arg) {
            paths.push(PathBuf::from(arg));
            continue;
        }

        let mut matched: Vec<PathBuf> = match glob(arg) {
            Ok(entries) => entries
                .filter_map(Result::ok)
                .filter(|p| p.is_file())
                .collect(),
            Err(e) => {
                warn!(pattern = arg, "invalid glob pattern: {}", e);
                Vec::new()
            }
        };

        if matched.is_empty() {
            paths.push(PathBuf::from(arg));
        } else {
            matched.sort();
            debug!(pattern = arg, matches = matched.len(), "expanded");
            paths.extend(matched);
        }
    }
    paths
}
