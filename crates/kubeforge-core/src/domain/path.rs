//! Destination path resolution.
//!
//! Unit paths are patterns with `%[group]`, `%[version]`, `%[kind]` and
//! `%[plural]` tokens. Resolution is a pure string transform; nothing here
//! looks at the filesystem.

use crate::domain::error::DomainError;
use crate::domain::project::ProjectContext;
use crate::domain::resource::ResourceDescriptor;

pub const GROUP_TOKEN: &str = "%[group]";
pub const VERSION_TOKEN: &str = "%[version]";
pub const KIND_TOKEN: &str = "%[kind]";
pub const PLURAL_TOKEN: &str = "%[plural]";

/// Resolve a path pattern against a resource and the project layout.
///
/// A segment made only of `%[group]` survives only for multigroup projects
/// with a non-empty group; otherwise the whole segment is dropped. Embedded
/// group tokens are always substituted. Without a resource, any token left
/// in the pattern is an error.
pub fn resolve(
    pattern: &str,
    resource: Option<&ResourceDescriptor>,
    project: &ProjectContext,
) -> Result<String, DomainError> {
    let Some(resource) = resource else {
        return match find_token(pattern) {
            Some(token) => Err(DomainError::UnresolvedPathToken {
                pattern: pattern.to_string(),
                token: token.to_string(),
            }),
            None => Ok(pattern.to_string()),
        };
    };

    let segments: Vec<String> = pattern
        .split('/')
        .filter_map(|segment| {
            if segment == GROUP_TOKEN {
                (project.multigroup && !resource.group.is_empty()).then(|| resource.group.clone())
            } else {
                Some(substitute(segment, resource))
            }
        })
        .collect();

    Ok(segments.join("/"))
}

fn substitute(segment: &str, resource: &ResourceDescriptor) -> String {
    segment
        .replace(GROUP_TOKEN, &resource.group)
        .replace(VERSION_TOKEN, &resource.version)
        .replace(KIND_TOKEN, &resource.kind.to_lowercase())
        .replace(PLURAL_TOKEN, &resource.plural)
}

fn find_token(pattern: &str) -> Option<&str> {
    let start = pattern.find("%[")?;
    let end = pattern[start..].find(']')?;
    Some(&pattern[start..=start + end])
}
