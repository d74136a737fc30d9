//! Catalog state.
//!
//! One owned value holding the full product and category lists plus the
//! active view parameters. The top-level controller (the GUI `App` or the
//! CLI) owns it; there are no ambient globals. Every mutation is expected to
//! be followed by a re-render that reads [`CatalogStore::current_view`].

use crate::api::{Category, Product};
use crate::pipeline::{self, FilterCriteria, PageView, SortKey, DEFAULT_PAGE_SIZE};

#[derive(Debug, Clone)]
pub struct CatalogStore {
    products: Vec<Product>,
    categories: Vec<Category>,
    criteria: FilterCriteria,
    sort: SortKey,
    page: usize,
    page_size: usize,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore {
    /// Empty store, as at startup before the initial fetches land.
    pub fn new() -> Self {
        CatalogStore {
            products: Vec::new(),
            categories: Vec::new(),
            criteria: FilterCriteria::default(),
            sort: SortKey::None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Install the results of the two startup fetches.
    pub fn load(&mut self, products: Vec<Product>, categories: Vec<Category>) {
        self.products = products;
        self.categories = categories;
        self.page = 1;
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn product(&self, id: u64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Run the pipeline over the current state. The clamped page is written
    /// back so later mutations start from a valid position.
    pub fn current_view(&mut self) -> PageView {
        let view = pipeline::apply(
            &self.products,
            &self.criteria,
            self.sort,
            self.page,
            self.page_size,
        );
        self.page = view.page;
        view
    }

    /// The full filtered/sorted list, for export.
    pub fn filtered(&self) -> Vec<Product> {
        pipeline::apply(
            &self.products,
            &self.criteria,
            self.sort,
            1,
            self.products.len().max(1),
        )
        .visible
    }

    /// Replace the active criteria and jump back to the first page.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.page = 1;
    }

    /// Change the ordering and jump back to the first page.
    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// The current page is left alone here; the pipeline clamps it into the
    /// new page count on the next view.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
    }

    /// Prepend a freshly created product and return to the first page, where
    /// it is visible under the default order.
    pub fn insert_created(&mut self, product: Product) {
        self.products.insert(0, product);
        self.page = 1;
    }

    /// Replace the record at the server product's id, merging server fields
    /// over local ones: an absent description or empty image list keeps the
    /// local value. Unknown ids are ignored.
    pub fn apply_update(&mut self, server: Product) {
        let Some(local) = self.products.iter_mut().find(|p| p.id == server.id) else {
            log::warn!("update response for unknown product id {}", server.id);
            return;
        };
        local.title = server.title;
        local.price = server.price;
        local.category = server.category;
        if server.description.is_some() {
            local.description = server.description;
        }
        if !server.images.is_empty() {
            local.images = server.images;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u64, title: &str, price: f64) -> Product {
        Product {
            id,
            title: title.to_string(),
            price,
            description: Some(format!("{} description", title)),
            category: Category {
                id: 1,
                name: "Clothes".to_string(),
            },
            images: vec![format!("https://example.com/{}.jpg", id)],
        }
    }

    fn loaded_store() -> CatalogStore {
        let mut store = CatalogStore::new();
        store.load(
            vec![product(1, "Shirt", 10.0), product(2, "Mug", 5.0)],
            vec![Category {
                id: 1,
                name: "Clothes".to_string(),
            }],
        );
        store
    }

    #[test]
    fn create_prepends_and_returns_to_first_page() {
        let mut store = loaded_store();
        store.set_page(7);
        store.insert_created(product(3, "Hat", 15.0));
        assert_eq!(store.page(), 1);
        assert_eq!(store.products()[0].id, 3);
        assert_eq!(store.products().len(), 3);
    }

    #[test]
    fn update_merges_server_fields_over_local() {
        let mut store = loaded_store();
        let server = Product {
            id: 1,
            title: "Linen Shirt".to_string(),
            price: 12.0,
            description: None,
            category: Category {
                id: 1,
                name: "Clothes".to_string(),
            },
            images: Vec::new(),
        };
        store.apply_update(server);

        let updated = store.product(1).unwrap();
        assert_eq!(updated.title, "Linen Shirt");
        assert_eq!(updated.price, 12.0);
        // Absent optional fields keep their local values.
        assert_eq!(updated.description.as_deref(), Some("Shirt description"));
        assert_eq!(updated.images, vec!["https://example.com/1.jpg"]);
    }

    #[test]
    fn update_for_unknown_id_changes_nothing() {
        let mut store = loaded_store();
        let before = store.products().to_vec();
        store.apply_update(product(99, "Ghost", 1.0));
        assert_eq!(store.products(), &before[..]);
    }

    #[test]
    fn update_is_visible_on_next_view_without_refetch() {
        let mut store = loaded_store();
        let mut server = product(2, "Enamel Mug", 6.0);
        server.description = Some("Blue enamel".to_string());
        store.apply_update(server);

        let view = store.current_view();
        assert!(view.visible.iter().any(|p| p.title == "Enamel Mug"));
    }

    #[test]
    fn filter_change_resets_the_page() {
        let mut store = loaded_store();
        store.set_page(3);
        store.set_criteria(FilterCriteria::from_inputs("mug", None, "", ""));
        assert_eq!(store.page(), 1);
        let view = store.current_view();
        assert_eq!(view.total, 1);
    }

    #[test]
    fn page_size_change_keeps_a_valid_page_via_clamp() {
        let mut store = CatalogStore::new();
        let products: Vec<Product> = (1..=45)
            .map(|i| product(i, &format!("Item {:02}", i), i as f64))
            .collect();
        store.load(products, Vec::new());

        store.set_page_size(10);
        store.set_page(5);
        assert_eq!(store.current_view().page, 5);

        // 45 items at 20 per page leaves only 3 pages; page 5 clamps to 3.
        store.set_page_size(20);
        let view = store.current_view();
        assert_eq!(view.total_pages, 3);
        assert_eq!(view.page, 3);
        assert_eq!(store.page(), 3);
    }

    #[test]
    fn filtered_returns_the_whole_matching_list() {
        let mut store = loaded_store();
        store.set_page_size(1);
        assert_eq!(store.filtered().len(), 2);
    }
}
