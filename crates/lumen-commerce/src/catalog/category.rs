//! Lighting categories.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Slug the storefront uses for "no category constraint".
pub const ALL_CATEGORIES_SLUG: &str = "all";

/// A product category.
///
/// The five well-known lighting categories are explicit variants; anything
/// else the listing service returns is carried as `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Chandeliers,
    Ceiling,
    Wall,
    Floor,
    Table,
    Custom(String),
}

/// The category facet. `None` means every category.
pub type CategoryFilter = Option<Category>;

impl Category {
    /// All well-known categories in navigation order.
    pub const KNOWN: [Category; 5] = [
        Category::Chandeliers,
        Category::Ceiling,
        Category::Wall,
        Category::Floor,
        Category::Table,
    ];

    /// Wire slug (e.g., "chandeliers").
    pub fn slug(&self) -> &str {
        match self {
            Category::Chandeliers => "chandeliers",
            Category::Ceiling => "ceiling",
            Category::Wall => "wall",
            Category::Floor => "floor",
            Category::Table => "table",
            Category::Custom(slug) => slug,
        }
    }

    /// Navigation label.
    pub fn label(&self) -> &str {
        match self {
            Category::Chandeliers => "Люстры",
            Category::Ceiling => "Потолочные",
            Category::Wall => "Настенные",
            Category::Floor => "Напольные",
            Category::Table => "Настольные",
            Category::Custom(slug) => slug,
        }
    }

    /// Parse a slug into a category.
    pub fn from_slug(slug: &str) -> Self {
        match slug {
            "chandeliers" => Category::Chandeliers,
            "ceiling" => Category::Ceiling,
            "wall" => Category::Wall,
            "floor" => Category::Floor,
            "table" => Category::Table,
            other => Category::Custom(other.to_string()),
        }
    }

    /// Parse a navigation selection; the "all" sentinel and blanks become `None`.
    pub fn parse_filter(slug: &str) -> CategoryFilter {
        let slug = slug.trim();
        if slug.is_empty() || slug == ALL_CATEGORIES_SLUG {
            None
        } else {
            Some(Self::from_slug(slug))
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.slug())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let slug = String::deserialize(deserializer)?;
        Ok(Category::from_slug(&slug))
    }
}
