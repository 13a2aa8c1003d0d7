//! Filter Criteria
//!
//! Filter/sort/page criteria sent to the service, and the staged vs.
//! committed pair the filter panel edits.

use std::collections::BTreeSet;
use std::fmt;

/// Sortable columns (wire names match the service's field names)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Name,
    Category,
    UnitPrice,
    Stock,
    Expiration,
}

impl SortField {
    pub const ALL: [SortField; 5] = [
        SortField::Name,
        SortField::Category,
        SortField::UnitPrice,
        SortField::Stock,
        SortField::Expiration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Category => "category",
            SortField::UnitPrice => "unitPrice",
            SortField::Stock => "inStock",
            SortField::Expiration => "expirationDate",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == s)
    }

    /// Column header text
    pub fn label(&self) -> &'static str {
        match self {
            SortField::Name => "Name",
            SortField::Category => "Category",
            SortField::UnitPrice => "Unit Price",
            SortField::Stock => "Stock",
            SortField::Expiration => "Expiration",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(SortDirection::Ascending),
            "desc" => Some(SortDirection::Descending),
            _ => None,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(field: SortField) -> Self {
        Self { field, direction: SortDirection::Ascending }
    }

    /// Same field flips direction; a new field starts ascending
    pub fn toggled(self, field: SortField) -> Self {
        if self.field == field {
            Self { field, direction: self.direction.flipped() }
        } else {
            Self::ascending(field)
        }
    }

    /// Parse the `field,direction` wire format
    pub fn parse(s: &str) -> Option<Self> {
        let (field, direction) = s.split_once(',')?;
        Some(Self {
            field: SortField::parse(field.trim())?,
            direction: SortDirection::parse(direction.trim())?,
        })
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::ascending(SortField::Name)
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.field.as_str(), self.direction.as_str())
    }
}

/// Availability drop-down value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockSelection {
    All,
    In,
    Out,
}

impl StockSelection {
    pub const ALL: [StockSelection; 3] = [StockSelection::All, StockSelection::In, StockSelection::Out];

    /// Unknown values coerce to `All`
    pub fn parse(s: &str) -> Self {
        match s {
            "in" => StockSelection::In,
            "out" => StockSelection::Out,
            _ => StockSelection::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockSelection::All => "all",
            StockSelection::In => "in",
            StockSelection::Out => "out",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StockSelection::All => "All Stock",
            StockSelection::In => "In Stock",
            StockSelection::Out => "Out of Stock",
        }
    }

    pub fn to_filter(self) -> Option<bool> {
        match self {
            StockSelection::All => None,
            StockSelection::In => Some(true),
            StockSelection::Out => Some(false),
        }
    }

    pub fn from_filter(in_stock: Option<bool>) -> Self {
        match in_stock {
            None => StockSelection::All,
            Some(true) => StockSelection::In,
            Some(false) => StockSelection::Out,
        }
    }
}

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Criteria for one collection fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Name substring; empty means no constraint
    pub name: String,
    /// Category names, matched as a union
    pub categories: BTreeSet<String>,
    pub in_stock: Option<bool>,
    /// Zero-based server page
    pub page: u32,
    pub size: u32,
    pub sort: SortSpec,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            name: String::new(),
            categories: BTreeSet::new(),
            in_stock: None,
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: SortSpec::default(),
        }
    }
}

impl FilterCriteria {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_stock(mut self, selection: StockSelection) -> Self {
        self.in_stock = selection.to_filter();
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size.max(1);
        self
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    /// Add the category if absent, remove it if present
    pub fn toggle_category(&mut self, name: &str) {
        if !self.categories.remove(name) {
            self.categories.insert(name.to_string());
        }
    }

    pub fn remove_category(&mut self, name: &str) {
        self.categories.remove(name);
    }

    pub fn stock_selection(&self) -> StockSelection {
        StockSelection::from_filter(self.in_stock)
    }

    /// Query parameters; unset filters are omitted, categories repeat
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let name = self.name.trim();
        if !name.is_empty() {
            pairs.push(("name", name.to_string()));
        }
        for category in &self.categories {
            pairs.push(("categories", category.clone()));
        }
        if let Some(in_stock) = self.in_stock {
            pairs.push(("inStock", in_stock.to_string()));
        }
        pairs.push(("page", self.page.to_string()));
        pairs.push(("size", self.size.to_string()));
        pairs.push(("sort", self.sort.to_string()));
        pairs
    }
}

/// Staged draft plus the criteria last sent to the server
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    staged: FilterCriteria,
    committed: FilterCriteria,
}

impl FilterState {
    pub fn staged(&self) -> &FilterCriteria {
        &self.staged
    }

    pub fn committed(&self) -> &FilterCriteria {
        &self.committed
    }

    /// Replace the draft; never triggers a fetch
    pub fn stage(&mut self, draft: FilterCriteria) {
        self.staged = draft;
    }

    /// Record `criteria` as committed and return what must be fetched
    pub fn commit(&mut self, criteria: FilterCriteria) -> FilterCriteria {
        self.staged = criteria.clone();
        self.committed = criteria.clone();
        criteria
    }

    /// Move the committed query to another page or page size.
    ///
    /// The draft keeps its unsearched filter edits; only its page size
    /// follows so a later search does not undo the change.
    pub fn paginate(&mut self, page: u32, size: u32) -> FilterCriteria {
        self.committed = self.committed.clone().with_page(page).with_size(size);
        self.staged.size = self.committed.size;
        self.committed.clone()
    }

    /// Reset draft and committed criteria to the canonical default
    pub fn clear(&mut self) -> FilterCriteria {
        self.commit(FilterCriteria::default())
    }
}
