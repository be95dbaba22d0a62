//! Two-level classification taxonomy for to-do items.
//!
//! # Responsibility
//! - Define the closed `Category` set and its ordered `Subcategory` lists.
//! - Provide stable string ids for persistence.
//!
//! # Invariants
//! - Every category owns at least one subcategory, so the "first
//!   subcategory" default always exists.
//! - String ids are stable; renaming a variant must not change its id.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Top-level classification tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Professional,
    Domestic,
    Other,
}

/// Second-level classification tag, only valid under specific categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subcategory {
    OpenSource,
    Consulting,
    Education,
    Marketing,
    Shopping,
    Housework,
    Garden,
    Chores,
    Other,
}

const PROFESSIONAL_SUBCATEGORIES: &[Subcategory] = &[
    Subcategory::OpenSource,
    Subcategory::Consulting,
    Subcategory::Education,
    Subcategory::Marketing,
];

const DOMESTIC_SUBCATEGORIES: &[Subcategory] = &[
    Subcategory::Shopping,
    Subcategory::Housework,
    Subcategory::Garden,
    Subcategory::Chores,
];

const OTHER_SUBCATEGORIES: &[Subcategory] = &[Subcategory::Other, Subcategory::Chores];

impl Category {
    /// All categories in presentation order.
    pub const ALL: [Category; 3] = [Self::Professional, Self::Domestic, Self::Other];

    /// Ordered list of subcategories permitted under this category.
    pub fn subcategories(self) -> &'static [Subcategory] {
        match self {
            Self::Professional => PROFESSIONAL_SUBCATEGORIES,
            Self::Domestic => DOMESTIC_SUBCATEGORIES,
            Self::Other => OTHER_SUBCATEGORIES,
        }
    }

    /// First permitted subcategory, used as the creation default.
    pub fn first_subcategory(self) -> Subcategory {
        // Each list is a non-empty constant.
        self.subcategories()[0]
    }

    /// Returns whether `subcategory` is permitted under this category.
    pub fn permits(self, subcategory: Subcategory) -> bool {
        self.subcategories().contains(&subcategory)
    }

    /// Stable storage id.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Professional => "professional",
            Self::Domestic => "domestic",
            Self::Other => "other",
        }
    }

    /// Parses a storage id produced by [`Category::as_str`].
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "professional" => Some(Self::Professional),
            "domestic" => Some(Self::Domestic),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Professional => "Professional",
            Self::Domestic => "Domestic",
            Self::Other => "Other",
        };
        f.write_str(label)
    }
}

impl Subcategory {
    /// Choices for a category selector; empty when no category is chosen yet.
    pub fn list_for(category: Option<Category>) -> &'static [Subcategory] {
        match category {
            Some(category) => category.subcategories(),
            None => &[],
        }
    }

    /// Stable storage id.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenSource => "open_source",
            Self::Consulting => "consulting",
            Self::Education => "education",
            Self::Marketing => "marketing",
            Self::Shopping => "shopping",
            Self::Housework => "housework",
            Self::Garden => "garden",
            Self::Chores => "chores",
            Self::Other => "other",
        }
    }

    /// Parses a storage id produced by [`Subcategory::as_str`].
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "open_source" => Some(Self::OpenSource),
            "consulting" => Some(Self::Consulting),
            "education" => Some(Self::Education),
            "marketing" => Some(Self::Marketing),
            "shopping" => Some(Self::Shopping),
            "housework" => Some(Self::Housework),
            "garden" => Some(Self::Garden),
            "chores" => Some(Self::Chores),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl Display for Subcategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::OpenSource => "OpenSource",
            Self::Consulting => "Consulting",
            Self::Education => "Education",
            Self::Marketing => "Marketing",
            Self::Shopping => "Shopping",
            Self::Housework => "Housework",
            Self::Garden => "Garden",
            Self::Chores => "Chores",
            Self::Other => "Other",
        };
        f.write_str(label)
    }
}
