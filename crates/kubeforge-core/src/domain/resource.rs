//! The resource descriptor: the group/version/kind an API is generated for.
//!
//! A descriptor is built from user input, validated once, and then read by
//! the path resolver and the template data builder. Validation is eager and
//! runs before any file is touched.

use std::fmt;
use std::sync::LazyLock;

use convert_case::{Case, Casing};
use regex::Regex;

use crate::domain::error::ValidationError;
use crate::domain::inflection::{EnglishPluralizer, Pluralizer};

const MAX_GROUP_LENGTH: usize = 253;

static GROUP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$")
        .expect("group pattern is a valid regex")
});

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v\d+(alpha\d+|beta\d+)?$").expect("version pattern is a valid regex")
});

/// Target API of a scaffold run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResourceDescriptor {
    pub group: String,
    pub version: String,
    /// UpperCamelCase kind, e.g. `FirstMate`.
    pub kind: String,
    /// Lower-case plural. Filled from the kind on first validation when empty.
    pub plural: String,
    pub namespaced: bool,
    pub short_names: Vec<String>,
}

impl ResourceDescriptor {
    pub fn new(
        group: impl Into<String>,
        version: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
            kind: kind.into(),
            plural: String::new(),
            namespaced: true,
            short_names: Vec::new(),
        }
    }

    pub fn with_plural(mut self, plural: impl Into<String>) -> Self {
        self.plural = plural.into();
        self
    }

    pub fn with_namespaced(mut self, namespaced: bool) -> Self {
        self.namespaced = namespaced;
        self
    }

    pub fn with_short_names(mut self, short_names: Vec<String>) -> Self {
        self.short_names = short_names;
        self
    }

    /// Validate with the default English pluralizer.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        self.validate_with(&EnglishPluralizer)
    }

    /// Validate every field, then default `plural` if it is still empty.
    pub fn validate_with(&mut self, pluralizer: &dyn Pluralizer) -> Result<(), ValidationError> {
        if is_missing(&self.group) {
            return Err(ValidationError::EmptyGroup);
        }
        if is_missing(&self.version) {
            return Err(ValidationError::EmptyVersion);
        }
        if is_missing(&self.kind) {
            return Err(ValidationError::EmptyKind);
        }

        if self.group.len() > MAX_GROUP_LENGTH || !GROUP_RE.is_match(&self.group) {
            return Err(ValidationError::InvalidGroupFormat {
                group: self.group.clone(),
            });
        }

        if !VERSION_RE.is_match(&self.version) {
            return Err(ValidationError::InvalidVersionFormat {
                version: self.version.clone(),
            });
        }

        let expected = self.kind.to_case(Case::Pascal);
        if expected != self.kind {
            return Err(ValidationError::KindNotPascalCase {
                kind: self.kind.clone(),
                expected,
            });
        }

        if self.plural.is_empty() {
            self.plural = pluralizer.pluralize(&self.kind.to_lowercase());
        }

        Ok(())
    }

    /// `<group>.<domain>`, or just the group when the domain is empty.
    pub fn qualified_group(&self, domain: &str) -> String {
        if domain.is_empty() {
            self.group.clone()
        } else {
            format!("{}.{}", self.group, domain)
        }
    }

    /// Go import alias: group and version with `-` and `.` stripped.
    pub fn import_alias(&self) -> String {
        let safe_group: String = self
            .group
            .chars()
            .filter(|c| *c != '-' && *c != '.')
            .collect();
        format!("{}{}", safe_group, self.version)
    }

    /// Identity string used in messages and the project file lookup.
    pub fn gvk(&self) -> String {
        format!("{}/{}, Kind={}", self.group, self.version, self.kind)
    }
}

impl fmt::Display for ResourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.gvk())
    }
}

// A value that starts with '-' is a flag the argument parser swallowed.
fn is_missing(value: &str) -> bool {
    value.is_empty() || value.starts_with('-')
}
