//! Filter, sort, and paginate the product list.
//!
//! Pure functions shared by the GUI and the CLI: state goes in, a page view
//! comes out, and nothing here touches the network or the store.

use crate::api::Product;
use std::cmp::Ordering;

/// Default number of products per page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Maximum number of page-number buttons shown at once.
pub const PAGE_WINDOW: usize = 5;

/// The active ordering selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    None,
    TitleAsc,
    TitleDesc,
    PriceAsc,
    PriceDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::None,
        SortKey::TitleAsc,
        SortKey::TitleDesc,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
    ];
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SortKey::None => "Default order",
            SortKey::TitleAsc => "Title (A-Z)",
            SortKey::TitleDesc => "Title (Z-A)",
            SortKey::PriceAsc => "Price (low to high)",
            SortKey::PriceDesc => "Price (high to low)",
        };
        f.write_str(label)
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(SortKey::None),
            "title" => Ok(SortKey::TitleAsc),
            "title-desc" => Ok(SortKey::TitleDesc),
            "price" => Ok(SortKey::PriceAsc),
            "price-desc" => Ok(SortKey::PriceDesc),
            other => Err(format!(
                "unknown sort order '{}' (expected none, title, title-desc, price, price-desc)",
                other
            )),
        }
    }
}

/// The active search/price/category constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    /// Case-insensitive substring matched against titles. Empty matches all.
    pub text: String,
    /// Restrict to one category, `None` for all.
    pub category_id: Option<u64>,
    pub min_price: f64,
    pub max_price: f64,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        FilterCriteria {
            text: String::new(),
            category_id: None,
            min_price: 0.0,
            max_price: f64::INFINITY,
        }
    }
}

impl FilterCriteria {
    /// Build criteria from raw form inputs. Non-numeric price bounds fall
    /// back to `[0, +inf)`.
    pub fn from_inputs(text: &str, category_id: Option<u64>, min: &str, max: &str) -> Self {
        FilterCriteria {
            text: text.trim().to_string(),
            category_id,
            min_price: min.trim().parse().unwrap_or(0.0),
            max_price: max.trim().parse().unwrap_or(f64::INFINITY),
        }
    }

    /// Predicate conjunction: text AND category AND price range.
    pub fn matches(&self, product: &Product) -> bool {
        let matches_text = self.text.is_empty()
            || product
                .title
                .to_lowercase()
                .contains(&self.text.to_lowercase());
        let matches_category = self
            .category_id
            .is_none_or(|id| product.category.id == id);
        let matches_price = product.price >= self.min_price && product.price <= self.max_price;

        matches_text && matches_category && matches_price
    }
}

/// One page of the filtered/sorted list, plus the totals the pagination
/// controls need.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub visible: Vec<Product>,
    pub total: usize,
    pub total_pages: usize,
    /// The requested page after clamping to `[1, total_pages]`.
    pub page: usize,
}

impl Default for PageView {
    fn default() -> Self {
        PageView {
            visible: Vec::new(),
            total: 0,
            total_pages: 1,
            page: 1,
        }
    }
}

/// Run the whole pipeline: filter, stable sort, clamp the page, slice.
///
/// The requested page is clamped before slicing, so a page left dangling by
/// a filter or page-size change falls back to the nearest valid page instead
/// of rendering empty.
pub fn apply(
    products: &[Product],
    criteria: &FilterCriteria,
    sort: SortKey,
    page: usize,
    page_size: usize,
) -> PageView {
    let page_size = page_size.max(1);

    let mut filtered: Vec<Product> = products
        .iter()
        .filter(|p| criteria.matches(p))
        .cloned()
        .collect();
    sort_products(&mut filtered, sort);

    let total = filtered.len();
    let total_pages = total.div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);

    let start = (page - 1) * page_size;
    let end = (start + page_size).min(total);
    let visible = if start < total {
        filtered[start..end].to_vec()
    } else {
        Vec::new()
    };

    PageView {
        visible,
        total,
        total_pages,
        page,
    }
}

/// Stable in-place sort. `None` preserves the filter order, which itself
/// preserves the original list order.
fn sort_products(products: &mut [Product], sort: SortKey) {
    match sort {
        SortKey::None => {}
        SortKey::TitleAsc => products.sort_by(title_order),
        SortKey::TitleDesc => products.sort_by(|a, b| title_order(b, a)),
        SortKey::PriceAsc => products.sort_by(price_order),
        SortKey::PriceDesc => products.sort_by(|a, b| price_order(b, a)),
    }
}

/// Case-folded title ordering, with the raw title as a tiebreak so equal
/// case-folds still order deterministically.
fn title_order(a: &Product, b: &Product) -> Ordering {
    a.title
        .to_lowercase()
        .cmp(&b.title.to_lowercase())
        .then_with(|| a.title.cmp(&b.title))
}

fn price_order(a: &Product, b: &Product) -> Ordering {
    a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal)
}

/// Window of page-number buttons: at most [`PAGE_WINDOW`] pages centered on
/// `page`, slid to stay within `[1, total_pages]`. Returns the inclusive
/// `(first, last)` pair.
pub fn page_window(page: usize, total_pages: usize) -> (usize, usize) {
    let mut first = page.saturating_sub(PAGE_WINDOW / 2).max(1);
    let last = (first + PAGE_WINDOW - 1).min(total_pages);
    if last + 1 - first < PAGE_WINDOW {
        first = last.saturating_sub(PAGE_WINDOW - 1).max(1);
    }
    (first, last)
}
