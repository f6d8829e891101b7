//! Core type definitions for the application

use std::time::Instant;

/// Which section of the UI is currently active/focused
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveSection {
    Search,
    Filters,
    Products,
}

impl ActiveSection {
    pub fn next(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::Filters,
            ActiveSection::Filters => ActiveSection::Products,
            ActiveSection::Products => ActiveSection::Search,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::Products,
            ActiveSection::Filters => ActiveSection::Search,
            ActiveSection::Products => ActiveSection::Filters,
        }
    }
}

/// Which filter control is focused inside the filter bar
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FilterField {
    #[default]
    Category,
    SortBy,
    SortOrder,
}

impl FilterField {
    pub fn next(self) -> Self {
        match self {
            Self::Category => Self::SortBy,
            Self::SortBy => Self::SortOrder,
            Self::SortOrder => Self::Category,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Category => Self::SortOrder,
            Self::SortBy => Self::Category,
            Self::SortOrder => Self::SortBy,
        }
    }
}

/// Categories offered by the filter bar. The empty value means "all".
pub const CATEGORY_OPTIONS: [&str; 7] = [
    "",
    "electronics",
    "jewelery",
    "men's clothing",
    "women's clothing",
    "game",
    "book",
];

/// Sort fields offered by the filter bar. The empty value means "unsorted".
pub const SORT_FIELD_OPTIONS: [&str; 3] = ["", "price", "rating"];

/// Step through a fixed option list, wrapping at both ends.
/// Unknown values restart from the first option.
pub fn cycle_option(options: &[&'static str], current: &str, forward: bool) -> &'static str {
    let len = options.len();
    match options.iter().position(|o| *o == current) {
        Some(i) if forward => options[(i + 1) % len],
        Some(i) => options[(i + len - 1) % len],
        None => options[0],
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Applied filter snapshot. Replaced wholesale on every apply action.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Filters {
    pub search_text: String,
    pub category: String,
    pub sort_field: String,
    pub sort_direction: SortDirection,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageState {
    pub current_page: u32,
    pub page_size: u32,
}

/// Named viewport-width bucket, used to pick how many products fit a page
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Breakpoint {
    #[default]
    Default,
    Sm,
    Md,
    Lg,
    Xl,
}

impl Breakpoint {
    pub const SM_MIN_WIDTH: u32 = 640;
    pub const MD_MIN_WIDTH: u32 = 768;
    pub const LG_MIN_WIDTH: u32 = 1024;
    pub const XL_MIN_WIDTH: u32 = 1280;

    /// Bucket a viewport width given in pixels
    pub fn from_width(width_px: u32) -> Self {
        if width_px >= Self::XL_MIN_WIDTH {
            Breakpoint::Xl
        } else if width_px >= Self::LG_MIN_WIDTH {
            Breakpoint::Lg
        } else if width_px >= Self::MD_MIN_WIDTH {
            Breakpoint::Md
        } else if width_px >= Self::SM_MIN_WIDTH {
            Breakpoint::Sm
        } else {
            Breakpoint::Default
        }
    }

    /// Terminals measure in cells, so the width is scaled by a nominal cell width first.
    pub fn from_columns(columns: u16, cell_width_px: u32) -> Self {
        Self::from_width(u32::from(columns).saturating_mul(cell_width_px))
    }

    pub fn page_size(self) -> u32 {
        match self {
            Breakpoint::Xl => 20,
            Breakpoint::Lg => 16,
            Breakpoint::Md => 12,
            Breakpoint::Sm => 8,
            Breakpoint::Default => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Breakpoint::Default => "default",
            Breakpoint::Sm => "sm",
            Breakpoint::Md => "md",
            Breakpoint::Lg => "lg",
            Breakpoint::Xl => "xl",
        }
    }
}

/// UI state for the application
#[derive(Clone)]
pub struct UiState {
    pub active_section: ActiveSection,
    pub search_draft: String,
    pub filter_field: FilterField,
    pub product_selected: usize,
    pub error_message: Option<String>,
    pub error_timestamp: Option<Instant>,
    pub show_help_popup: bool,
    pub show_product_detail: bool,
    pub show_cart: bool,
    pub cart_selected: usize,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            active_section: ActiveSection::Search,
            search_draft: String::new(),
            filter_field: FilterField::Category,
            product_selected: 0,
            error_message: None,
            error_timestamp: None,
            show_help_popup: false,
            show_product_detail: false,
            show_cart: false,
            cart_selected: 0,
        }
    }
}
