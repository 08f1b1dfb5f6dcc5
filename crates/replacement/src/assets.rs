//! Asset identifiers carried by template slots.
//!
//! Every asset reference carries an explicit [`AssetKind`] tag, so the kind
//! check that guards a replacement is a plain comparison.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The two kinds of decorative asset a slot can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AssetKind {
    Tree,
    Prop,
}

impl AssetKind {
    pub fn is_tree(self) -> bool {
        matches!(self, AssetKind::Tree)
    }

    pub fn from_is_tree(is_tree: bool) -> Self {
        if is_tree {
            AssetKind::Tree
        } else {
            AssetKind::Prop
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AssetKind::Tree => "tree",
            AssetKind::Prop => "prop",
        }
    }
}

/// A prop or tree asset, identified by kind and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetRef {
    pub kind: AssetKind,
    pub name: String,
}

impl AssetRef {
    pub fn new(kind: AssetKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    pub fn prop(name: impl Into<String>) -> Self {
        Self::new(AssetKind::Prop, name)
    }

    pub fn tree(name: impl Into<String>) -> Self {
        Self::new(AssetKind::Tree, name)
    }

    /// Replacements are only valid between assets of the same kind.
    pub fn same_kind(&self, other: &AssetRef) -> bool {
        self.kind == other.kind
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind.label(), self.name)
    }
}
