//! Scaffold markers and the pure halves of marker-based updates.
//!
//! A marker is an anchor comment left in a generated file, for example
//! `// +kubeforge:scaffold:imports`. Later runs insert code fragments right
//! above it. Both passes here are plain string transforms; reading and
//! writing the file is the updater's job.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::Path;

const MARKER_PREFIX: &str = "+kubeforge:scaffold:";

/// Well-known marker names used by the built-in templates.
pub mod names {
    pub const IMPORTS: &str = "imports";
    pub const SCHEME: &str = "scheme";
    pub const BUILDER: &str = "builder";
    pub const CRD_RESOURCES: &str = "crdkustomizeresource";
    pub const SAMPLES: &str = "manifestskustomizesamples";
    pub const RBAC: &str = "rbac";
}

/// Fragments to insert, keyed by the marker they go above.
pub type CodeFragments = BTreeMap<Marker, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Marker {
    comment: &'static str,
    name: String,
}

impl Marker {
    /// Marker for a file, picking `//` for Go sources and `#` for the rest.
    pub fn for_path(path: impl AsRef<Path>, name: impl Into<String>) -> Self {
        let is_go = path.as_ref().extension().is_some_and(|ext| ext == "go");
        Self {
            comment: if is_go { "//" } else { "#" },
            name: name.into(),
        }
    }

    pub fn go(name: impl Into<String>) -> Self {
        Self::for_path("x.go", name)
    }

    pub fn yaml(name: impl Into<String>) -> Self {
        Self::for_path("x.yaml", name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// True when the trimmed line is exactly this marker.
    pub fn matches_line(&self, line: &str) -> bool {
        line.trim() == self.to_string()
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}{}", self.comment, MARKER_PREFIX, self.name)
    }
}

/// Drop every fragment whose trimmed text already appears as a trimmed line
/// of `content`. Markers left with no fragments are removed.
///
/// Multi-line fragments never equal a single line, so they are never
/// dropped here.
pub fn filter_existing(content: &str, fragments: &CodeFragments) -> CodeFragments {
    let existing: HashSet<&str> = content.lines().map(str::trim).collect();

    fragments
        .iter()
        .filter_map(|(marker, values)| {
            let kept: Vec<String> = values
                .iter()
                .filter(|value| !existing.contains(value.trim()))
                .cloned()
                .collect();
            (!kept.is_empty()).then(|| (marker.clone(), kept))
        })
        .collect()
}

/// Emit `content` line by line, writing each matching marker's fragments
/// immediately before the marker line. Every emitted line ends with `\n`.
pub fn insert_fragments(content: &str, fragments: &CodeFragments) -> String {
    let extra: usize = fragments.values().flatten().map(|f| f.len() + 1).sum();
    let mut out = String::with_capacity(content.len() + extra + 1);

    for line in content.lines() {
        for (marker, values) in fragments {
            if !marker.matches_line(line) {
                continue;
            }
            for value in values {
                out.push_str(value);
                if !value.ends_with('\n') {
                    out.push('\n');
                }
            }
        }
        out.push_str(line);
        out.push('\n');
    }

    out
}
