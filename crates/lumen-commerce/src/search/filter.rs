//! Facet state for the catalog view.

use crate::catalog::CategoryFilter;
use crate::error::CommerceError;
use crate::search::SortOption;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Brands offered in the sidebar.
pub const BRAND_OPTIONS: &[&str] = &[
    "Favourite",
    "Maytoni",
    "Lumion",
    "Odeon Light",
    "Eglo",
    "Citilux",
    "ST Luce",
    "Lightstar",
    "Ideal Lux",
    "Mantra",
    "Arte Lamp",
    "Eurosvet",
    "MW-Light",
    "Lussole",
    "Ambiente",
    "Crystal Lux",
    "Newport",
    "Lucia Tucci",
    "Arti Lampadari",
    "Bohemia Ivele",
    "Chiaro",
    "Osgona",
    "Stilfort",
    "Toplight",
];

/// Colors offered in the sidebar.
pub const COLOR_OPTIONS: &[&str] = &[
    "Белый",
    "Черный",
    "Золотой",
    "Серебряный",
    "Хром",
    "Бронза",
    "Медь",
    "Латунь",
    "Никель",
    "Серый",
    "Коричневый",
    "Бежевый",
    "Прозрачный",
    "Цветной",
    "Дерево",
];

/// Styles offered in the sidebar.
pub const STYLE_OPTIONS: &[&str] = &[
    "Современный",
    "Классический",
    "Хай-тек",
    "Лофт",
    "Минимализм",
    "Прованс",
    "Скандинавский",
    "Барокко",
    "Арт-деко",
    "Модерн",
    "Кантри",
    "Эко",
    "Винтаж",
    "Фьюжн",
    "Индустриальный",
];

/// A closed interval `[lo, hi]` with `lo <= hi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NumericRange {
    lo: u32,
    hi: u32,
}

impl NumericRange {
    /// Default price slider bounds, in roubles.
    pub const PRICE: NumericRange = NumericRange { lo: 0, hi: 500_000 };
    /// Default height slider bounds, in centimetres.
    pub const HEIGHT: NumericRange = NumericRange { lo: 0, hi: 300 };
    /// Default width slider bounds, in centimetres.
    pub const WIDTH: NumericRange = NumericRange { lo: 0, hi: 200 };
    /// Default diameter slider bounds, in centimetres.
    pub const DIAMETER: NumericRange = NumericRange { lo: 0, hi: 200 };

    /// Create a range, rejecting `lo > hi`.
    pub fn new(lo: u32, hi: u32) -> Result<Self, CommerceError> {
        if lo > hi {
            return Err(CommerceError::InvalidRange { lo, hi });
        }
        Ok(Self { lo, hi })
    }

    pub fn lo(&self) -> u32 {
        self.lo
    }

    pub fn hi(&self) -> u32 {
        self.hi
    }

    /// Check whether a value lies inside the interval.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lo as f64 && value <= self.hi as f64
    }
}

/// Boolean facets. Each is either required (`true`) or unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FeatureFlag {
    HasRemote,
    IsDimmable,
    HasColorChange,
    IsSale,
    IsNew,
    HasPickup,
}

impl FeatureFlag {
    /// All flags in query order.
    pub const ALL: [FeatureFlag; 6] = [
        FeatureFlag::HasRemote,
        FeatureFlag::IsDimmable,
        FeatureFlag::HasColorChange,
        FeatureFlag::IsSale,
        FeatureFlag::IsNew,
        FeatureFlag::HasPickup,
    ];

    /// Query parameter name.
    pub fn query_key(&self) -> &'static str {
        match self {
            FeatureFlag::HasRemote => "has_remote",
            FeatureFlag::IsDimmable => "is_dimmable",
            FeatureFlag::HasColorChange => "has_color_change",
            FeatureFlag::IsSale => "is_sale",
            FeatureFlag::IsNew => "is_new",
            FeatureFlag::HasPickup => "has_pickup",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FeatureFlag::HasRemote => "С пультом",
            FeatureFlag::IsDimmable => "С диммером",
            FeatureFlag::HasColorChange => "Смена цвета",
            FeatureFlag::IsSale => "Распродажа",
            FeatureFlag::IsNew => "Новинки",
            FeatureFlag::HasPickup => "Самовывоз",
        }
    }
}

/// The six boolean facets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureFlags {
    pub has_remote: bool,
    pub is_dimmable: bool,
    pub has_color_change: bool,
    pub is_sale: bool,
    pub is_new: bool,
    pub has_pickup: bool,
}

impl FeatureFlags {
    pub fn get(&self, flag: FeatureFlag) -> bool {
        match flag {
            FeatureFlag::HasRemote => self.has_remote,
            FeatureFlag::IsDimmable => self.is_dimmable,
            FeatureFlag::HasColorChange => self.has_color_change,
            FeatureFlag::IsSale => self.is_sale,
            FeatureFlag::IsNew => self.is_new,
            FeatureFlag::HasPickup => self.has_pickup,
        }
    }

    pub fn set(&mut self, flag: FeatureFlag, value: bool) {
        let slot = match flag {
            FeatureFlag::HasRemote => &mut self.has_remote,
            FeatureFlag::IsDimmable => &mut self.is_dimmable,
            FeatureFlag::HasColorChange => &mut self.has_color_change,
            FeatureFlag::IsSale => &mut self.is_sale,
            FeatureFlag::IsNew => &mut self.is_new,
            FeatureFlag::HasPickup => &mut self.has_pickup,
        };
        *slot = value;
    }

    /// Flags currently set, in query order.
    pub fn enabled(&self) -> impl Iterator<Item = FeatureFlag> + '_ {
        FeatureFlag::ALL.into_iter().filter(|flag| self.get(*flag))
    }
}

/// A single facet mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum FacetChange {
    Category(CategoryFilter),
    Search(String),
    Sort(SortOption),
    ToggleBrand(String),
    ToggleColor(String),
    ToggleStyle(String),
    Brands(BTreeSet<String>),
    Colors(BTreeSet<String>),
    Styles(BTreeSet<String>),
    PriceRange(NumericRange),
    HeightRange(NumericRange),
    WidthRange(NumericRange),
    DiameterRange(NumericRange),
    Flag(FeatureFlag, bool),
    /// Move the pagination cursor. Leaves every other facet alone.
    Page(u32),
    /// Every facet back to its default, page 1.
    Reset,
}

/// The complete set of facet values plus the pagination cursor.
///
/// Built only through [`FilterState::default`] and [`FilterState::apply`],
/// so ranges stay ordered and the page stays at 1 or above.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterState {
    pub category: CategoryFilter,
    pub search: String,
    pub sort: SortOption,
    pub brands: BTreeSet<String>,
    pub colors: BTreeSet<String>,
    pub styles: BTreeSet<String>,
    pub price: NumericRange,
    pub height: NumericRange,
    pub width: NumericRange,
    pub diameter: NumericRange,
    pub flags: FeatureFlags,
    page: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            category: None,
            search: String::new(),
            sort: SortOption::default(),
            brands: BTreeSet::new(),
            colors: BTreeSet::new(),
            styles: BTreeSet::new(),
            price: NumericRange::PRICE,
            height: NumericRange::HEIGHT,
            width: NumericRange::WIDTH,
            diameter: NumericRange::DIAMETER,
            flags: FeatureFlags::default(),
            page: 1,
        }
    }
}

impl FilterState {
    /// Current 1-based page.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// True when every facet and the page are at their defaults.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Apply a facet change. Returns whether anything changed.
    ///
    /// A change that alters a facet moves the cursor back to page 1. Setting
    /// a facet to its current value changes nothing, page included.
    pub fn apply(&mut self, change: FacetChange) -> bool {
        let before = self.clone();
        match change {
            FacetChange::Page(page) => {
                self.page = page.max(1);
                return self.page != before.page;
            }
            FacetChange::Reset => {
                *self = Self::default();
                return *self != before;
            }
            FacetChange::Category(category) => self.category = category,
            FacetChange::Search(query) => self.search = query,
            FacetChange::Sort(sort) => self.sort = sort,
            FacetChange::ToggleBrand(brand) => toggle(&mut self.brands, brand),
            FacetChange::ToggleColor(color) => toggle(&mut self.colors, color),
            FacetChange::ToggleStyle(style) => toggle(&mut self.styles, style),
            FacetChange::Brands(brands) => self.brands = brands,
            FacetChange::Colors(colors) => self.colors = colors,
            FacetChange::Styles(styles) => self.styles = styles,
            FacetChange::PriceRange(range) => self.price = range,
            FacetChange::HeightRange(range) => self.height = range,
            FacetChange::WidthRange(range) => self.width = range,
            FacetChange::DiameterRange(range) => self.diameter = range,
            FacetChange::Flag(flag, value) => self.flags.set(flag, value),
        }
        if *self == before {
            return false;
        }
        self.page = 1;
        true
    }
}

fn toggle(set: &mut BTreeSet<String>, value: String) {
    if !set.remove(&value) {
        set.insert(value);
    }
}
