//! Integration tests for the filter/sort/paginate pipeline.
//!
//! These exercise the same library entry points both front-ends use, against
//! the documented pipeline properties: predicate conjunction, idempotence,
//! pagination arithmetic, ordering, and page clamping.

use catalog_toolkit::api::{Category, Product};
use catalog_toolkit::pipeline::{apply, FilterCriteria, SortKey};

fn product(id: u64, title: &str, price: f64, category_id: u64) -> Product {
    Product {
        id,
        title: title.to_string(),
        price,
        description: Some(format!("{} description", title)),
        category: Category {
            id: category_id,
            name: format!("Category {}", category_id),
        },
        images: Vec::new(),
    }
}

fn sample_catalog() -> Vec<Product> {
    vec![
        product(1, "Classic Shirt", 25.0, 1),
        product(2, "Running Shoes", 80.0, 2),
        product(3, "SHIRT, oversized", 40.0, 1),
        product(4, "Desk Lamp", 35.0, 3),
        product(5, "T-shirt pack", 15.0, 1),
        product(6, "Monitor", 220.0, 3),
    ]
}

#[test]
fn filter_returns_only_elements_satisfying_the_conjunction() {
    let products = sample_catalog();
    let criteria = FilterCriteria {
        text: "shirt".to_string(),
        category_id: Some(1),
        min_price: 20.0,
        max_price: 50.0,
    };

    let view = apply(&products, &criteria, SortKey::None, 1, 100);

    assert!(!view.visible.is_empty());
    for p in &view.visible {
        assert!(p.title.to_lowercase().contains("shirt"));
        assert_eq!(p.category.id, 1);
        assert!(p.price >= 20.0 && p.price <= 50.0);
        assert!(products.contains(p));
    }
}

#[test]
fn search_matches_titles_case_insensitively() {
    let products = sample_catalog();
    let criteria = FilterCriteria {
        text: "shirt".to_string(),
        ..FilterCriteria::default()
    };

    let view = apply(&products, &criteria, SortKey::None, 1, 100);
    let ids: Vec<u64> = view.visible.iter().map(|p| p.id).collect();

    // "Classic Shirt", "SHIRT, oversized", and "T-shirt pack" all match.
    assert_eq!(ids, vec![1, 3, 5]);
}

#[test]
fn apply_is_idempotent() {
    let products = sample_catalog();
    let criteria = FilterCriteria {
        text: "s".to_string(),
        ..FilterCriteria::default()
    };

    let first = apply(&products, &criteria, SortKey::PriceDesc, 1, 2);
    let second = apply(&products, &criteria, SortKey::PriceDesc, 1, 2);

    assert_eq!(first, second);
}

#[test]
fn forty_five_products_at_twenty_per_page_make_three_pages() {
    let products: Vec<Product> = (1..=45)
        .map(|i| product(i, &format!("Item {:02}", i), i as f64, 1))
        .collect();
    let criteria = FilterCriteria::default();

    let page1 = apply(&products, &criteria, SortKey::None, 1, 20);
    assert_eq!(page1.total, 45);
    assert_eq!(page1.total_pages, 3);
    assert_eq!(page1.visible.len(), 20);

    let page3 = apply(&products, &criteria, SortKey::None, 3, 20);
    assert_eq!(page3.visible.len(), 5);
    assert_eq!(page3.visible[0].id, 41);
}

#[test]
fn visible_slice_never_exceeds_the_page_size() {
    let products = sample_catalog();
    let criteria = FilterCriteria::default();

    for page_size in 1..=7 {
        for page in 1..=7 {
            let view = apply(&products, &criteria, SortKey::None, page, page_size);
            assert!(view.visible.len() <= page_size);
            assert_eq!(
                view.total_pages,
                products.len().div_ceil(page_size).max(1)
            );
        }
    }
}

#[test]
fn out_of_range_page_clamps_to_the_nearest_valid_page() {
    let products = sample_catalog();
    let criteria = FilterCriteria::default();

    let view = apply(&products, &criteria, SortKey::None, 99, 2);
    assert_eq!(view.total_pages, 3);
    assert_eq!(view.page, 3);
    assert!(!view.visible.is_empty());

    let view = apply(&products, &criteria, SortKey::None, 0, 2);
    assert_eq!(view.page, 1);
}

#[test]
fn empty_input_yields_one_empty_page() {
    let view = apply(&[], &FilterCriteria::default(), SortKey::None, 1, 20);
    assert!(view.visible.is_empty());
    assert_eq!(view.total, 0);
    assert_eq!(view.total_pages, 1);
    assert_eq!(view.page, 1);
}

#[test]
fn title_descending_reverses_title_ascending_for_distinct_titles() {
    let products = sample_catalog();
    let criteria = FilterCriteria::default();

    let asc = apply(&products, &criteria, SortKey::TitleAsc, 1, 100);
    let desc = apply(&products, &criteria, SortKey::TitleDesc, 1, 100);

    let mut reversed = desc.visible.clone();
    reversed.reverse();
    assert_eq!(asc.visible, reversed);
}

#[test]
fn title_sort_ignores_case() {
    let products = vec![
        product(1, "banana", 1.0, 1),
        product(2, "Apple", 1.0, 1),
        product(3, "cherry", 1.0, 1),
    ];
    let view = apply(
        &products,
        &FilterCriteria::default(),
        SortKey::TitleAsc,
        1,
        10,
    );
    let titles: Vec<&str> = view.visible.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Apple", "banana", "cherry"]);
}

#[test]
fn price_sort_is_stable_for_equal_prices() {
    let products = vec![
        product(1, "First", 10.0, 1),
        product(2, "Second", 10.0, 1),
        product(3, "Cheap", 5.0, 1),
    ];
    let view = apply(
        &products,
        &FilterCriteria::default(),
        SortKey::PriceAsc,
        1,
        10,
    );
    let ids: Vec<u64> = view.visible.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![3, 1, 2]);
}

#[test]
fn unsorted_view_preserves_original_order() {
    let products = sample_catalog();
    let criteria = FilterCriteria {
        min_price: 30.0,
        ..FilterCriteria::default()
    };

    let view = apply(&products, &criteria, SortKey::None, 1, 100);
    let ids: Vec<u64> = view.visible.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![2, 3, 4, 6]);
}
