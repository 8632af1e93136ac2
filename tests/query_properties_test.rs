use kaamkhoj::core::catalog::Catalog;
use kaamkhoj::domain::model::Category;
use kaamkhoj::domain::ports::Listing;
use kaamkhoj::{query, CatalogItem, CategoryFilter, QueryParams, SortMode};

fn item(id: &str, title: &str, description: &str, category: Category, price: u64) -> CatalogItem {
    CatalogItem {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        category,
        price,
    }
}

/// 含同價格與大小寫差異的測試目錄
fn fixture() -> Vec<CatalogItem> {
    vec![
        item("g1", "UI/UX design", "Figma prototypes", Category::Design, 8000),
        item("g2", "Django backend", "REST APIs", Category::Dev, 15000),
        item("g3", "Logo design", "Minimalist logos", Category::Design, 5000),
        item("g4", "SEO content", "Blog DESIGN tips", Category::Writing, 5000),
        item("g5", "Flutter app", "Cross-platform", Category::Mobile, 20000),
        item("g6", "Brand kit", "Logo and stationery", Category::Design, 8000),
        item("g7", "Pitch deck", "Investor design", Category::Business, 15000),
    ]
}

fn all_params() -> Vec<QueryParams> {
    let terms = ["", "design", "LOGO", "api", "zzz"];
    let categories = [
        CategoryFilter::All,
        CategoryFilter::Only(Category::Design),
        CategoryFilter::Only(Category::Dev),
        CategoryFilter::Only(Category::Ai),
    ];
    let ceilings = [1, 5000, 8000, 100_000];
    let sorts = [SortMode::Recommended, SortMode::PriceAsc, SortMode::PriceDesc];

    let mut out = Vec::new();
    for term in terms {
        for category in categories {
            for ceiling in ceilings {
                for sort in sorts {
                    out.push(
                        QueryParams::default()
                            .with_term(term)
                            .with_category(category)
                            .with_price_ceiling(ceiling)
                            .with_sort(sort),
                    );
                }
            }
        }
    }
    out
}

fn position(catalog: &[CatalogItem], id: &str) -> usize {
    catalog.iter().position(|i| i.id == id).unwrap()
}

#[test]
fn test_every_result_satisfies_all_filters() {
    let catalog = fixture();
    for params in all_params() {
        let results = query(&catalog, &params);
        for result in &results {
            assert!(params.matches(*result), "{:?} should not match {:?}", result.id, params);
            assert!(result.price <= params.price_ceiling);
        }
        // 沒被選中的紀錄一定有某個條件不符
        for candidate in &catalog {
            if !results.iter().any(|r| r.id == candidate.id) {
                assert!(!params.matches(candidate));
            }
        }
    }
}

#[test]
fn test_results_are_a_subset_without_duplicates() {
    let catalog = fixture();
    for params in all_params() {
        let results = query(&catalog, &params);
        assert!(results.len() <= catalog.len());
        for result in &results {
            assert!(catalog.iter().any(|c| std::ptr::eq(c, *result)));
        }
        let mut ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), results.len());
    }
}

#[test]
fn test_query_is_idempotent() {
    let catalog = fixture();
    for params in all_params() {
        let first: Vec<&str> = query(&catalog, &params).iter().map(|r| r.id.as_str()).collect();
        let second: Vec<&str> = query(&catalog, &params).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(first, second);
    }
}

#[test]
fn test_sort_order_and_stability() {
    let catalog = fixture();
    for params in all_params() {
        let results = query(&catalog, &params);
        for pair in results.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let (pa, pb) = (position(&catalog, &a.id), position(&catalog, &b.id));
            match params.sort {
                SortMode::Recommended => assert!(pa < pb),
                SortMode::PriceAsc => {
                    assert!(a.price <= b.price);
                    if a.price == b.price {
                        assert!(pa < pb, "tie {} / {} lost catalog order", a.id, b.id);
                    }
                }
                SortMode::PriceDesc => {
                    assert!(a.price >= b.price);
                    if a.price == b.price {
                        assert!(pa < pb, "tie {} / {} lost catalog order", a.id, b.id);
                    }
                }
            }
        }
    }
}

#[test]
fn test_neutral_filters_return_whole_catalog() {
    let catalog = fixture();
    let results = query(&catalog, &QueryParams::default().with_price_ceiling(u64::MAX));
    let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
    let expected: Vec<&str> = catalog.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_marketplace_example() {
    let catalog = vec![
        item("g1", "UI/UX design", "", Category::Design, 8000),
        item("g2", "Django backend", "", Category::Dev, 15000),
        item("g3", "Logo design", "", Category::Design, 5000),
    ];
    let params = QueryParams::default()
        .with_term("design")
        .with_price_ceiling(100_000)
        .with_sort(SortMode::PriceAsc);

    let results = query(&catalog, &params);
    let summary: Vec<(&str, u64)> = results.iter().map(|r| (r.id.as_str(), r.price)).collect();
    assert_eq!(summary, vec![("g3", 5000), ("g1", 8000)]);
}

#[test]
fn test_term_matches_description_case_insensitively() {
    let catalog = fixture();
    let results = query(&catalog, &QueryParams::default().with_term("design"));
    let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
    // g4 只在描述中有大寫 DESIGN
    assert_eq!(ids, vec!["g1", "g3", "g4", "g7"]);
}

#[test]
fn test_builtin_gigs_convert_to_flat_items() {
    let catalog = Catalog::builtin().unwrap();
    let items: Vec<CatalogItem> = catalog.gigs().iter().map(CatalogItem::from).collect();
    let params = QueryParams::default()
        .with_term("nepali")
        .with_sort(SortMode::PriceDesc);

    let flat: Vec<String> = query(&items, &params).iter().map(|i| i.id.clone()).collect();
    let rich: Vec<String> = catalog
        .search_gigs(&params)
        .iter()
        .map(|g| g.id().to_string())
        .collect();
    assert_eq!(flat, rich);
    assert!(!flat.is_empty());
}

#[test]
fn test_queries_can_run_concurrently() {
    let catalog = fixture();
    let params = QueryParams::default().with_sort(SortMode::PriceAsc);
    let expected: Vec<String> = query(&catalog, &params).iter().map(|i| i.id.clone()).collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| query(&catalog, &params).iter().map(|i| i.id.clone()).collect::<Vec<_>>()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
