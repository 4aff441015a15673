//! Render units: one destination file and what to do with it.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::marker::{CodeFragments, Marker};

// ── Existing-file policy ─────────────────────────────────────────────────────

/// What to do when a unit's destination already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IfExistsAction {
    #[default]
    Error,
    Skip,
    Overwrite,
}

/// Outcome of consulting the policy for one destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteDecision {
    Proceed,
    Skip,
    Fail,
}

impl IfExistsAction {
    pub const fn decide(self, exists: bool) -> WriteDecision {
        match (self, exists) {
            (_, false) | (Self::Overwrite, true) => WriteDecision::Proceed,
            (Self::Skip, true) => WriteDecision::Skip,
            (Self::Error, true) => WriteDecision::Fail,
        }
    }
}

// ── Unit data ────────────────────────────────────────────────────────────────

/// Unit-specific template value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ExtraValue {
    Bool(bool),
    Text(String),
    List(Vec<String>),
}

impl From<bool> for ExtraValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for ExtraValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ExtraValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for ExtraValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

// ── RenderUnit ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitKind {
    /// Render `body` and write it, subject to `if_exists`.
    Template {
        body: String,
        if_exists: IfExistsAction,
        extra: BTreeMap<String, ExtraValue>,
    },
    /// Insert fragments at markers of an existing file.
    Inserter { fragments: CodeFragments },
}

/// One destination path pattern plus how to produce or patch it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderUnit {
    /// May contain `%[group]`, `%[version]`, `%[kind]` and `%[plural]`.
    pub path: String,
    pub kind: UnitKind,
}

impl RenderUnit {
    pub fn template(path: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: UnitKind::Template {
                body: body.into(),
                if_exists: IfExistsAction::default(),
                extra: BTreeMap::new(),
            },
        }
    }

    pub fn inserter(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: UnitKind::Inserter {
                fragments: CodeFragments::new(),
            },
        }
    }

    pub fn if_exists(mut self, action: IfExistsAction) -> Self {
        if let UnitKind::Template { if_exists, .. } = &mut self.kind {
            *if_exists = action;
        }
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<ExtraValue>) -> Self {
        if let UnitKind::Template { extra, .. } = &mut self.kind {
            extra.insert(key.into(), value.into());
        }
        self
    }

    /// Queue a fragment above the named marker of this unit's file.
    pub fn insert_at(mut self, marker: &str, fragment: impl Into<String>) -> Self {
        let marker = Marker::for_path(&self.path, marker);
        if let UnitKind::Inserter { fragments } = &mut self.kind {
            fragments.entry(marker).or_default().push(fragment.into());
        }
        self
    }

    pub fn is_update(&self) -> bool {
        matches!(self.kind, UnitKind::Inserter { .. })
    }

    /// Turn an `Error` policy into `Overwrite`. Used for forced regeneration.
    pub fn force_overwrite(&mut self) {
        if let UnitKind::Template { if_exists, .. } = &mut self.kind {
            if *if_exists == IfExistsAction::Error {
                *if_exists = IfExistsAction::Overwrite;
            }
        }
    }
}
