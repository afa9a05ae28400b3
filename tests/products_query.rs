use std::{collections::HashSet, sync::Arc};

use catalog_query_api::{
    catalogue::demo_products,
    routes::params::{ProductQuery, ProductSort},
    services::product_service::{PAGE_SIZE, ProductQueryService},
    store::{DistinctField, InMemoryProductStore},
};

fn service() -> ProductQueryService {
    ProductQueryService::new(Arc::new(InMemoryProductStore::new(demo_products())))
}

#[tokio::test]
async fn no_filters_count_the_whole_catalogue() -> anyhow::Result<()> {
    let page = service().list_products(ProductQuery::default()).await?;
    assert_eq!(page.total_count, demo_products().len() as u64);
    assert_eq!(page.items.len() as u64, PAGE_SIZE);
    Ok(())
}

#[tokio::test]
async fn price_range_bounds_every_item() -> anyhow::Result<()> {
    let query = ProductQuery {
        min_price: Some(60.0),
        max_price: Some(120.0),
        ..Default::default()
    };
    let page = service().list_products(query).await?;
    assert!(page.total_count > 0);
    assert!(
        page.items
            .iter()
            .all(|p| (60.0..=120.0).contains(&p.price))
    );
    Ok(())
}

#[tokio::test]
async fn search_matches_names_case_insensitively() -> anyhow::Result<()> {
    let query = ProductQuery {
        search: Some("GALAXY".to_string()),
        ..Default::default()
    };
    let page = service().list_products(query).await?;
    assert_eq!(page.total_count, 2);
    assert!(
        page.items
            .iter()
            .all(|p| p.product_name.to_lowercase().contains("galaxy"))
    );
    Ok(())
}

#[tokio::test]
async fn search_text_is_not_a_pattern() -> anyhow::Result<()> {
    let query = ProductQuery {
        search: Some("Air.*".to_string()),
        ..Default::default()
    };
    let page = service().list_products(query).await?;
    assert_eq!(page.total_count, 0);
    Ok(())
}

#[tokio::test]
async fn consecutive_pages_are_disjoint() -> anyhow::Result<()> {
    let service = service();
    for sort in [None, Some(ProductSort::PriceAsc), Some(ProductSort::PriceDesc)] {
        let first = service
            .list_products(ProductQuery {
                page: 1,
                sort,
                ..Default::default()
            })
            .await?;
        let second = service
            .list_products(ProductQuery {
                page: 2,
                sort,
                ..Default::default()
            })
            .await?;

        assert_eq!(first.total_count, second.total_count);
        assert!(first.items.len() as u64 <= PAGE_SIZE);
        assert_eq!(first.items.len() + second.items.len(), demo_products().len());

        let first_ids: HashSet<_> = first.items.iter().map(|p| p.id.clone()).collect();
        assert!(second.items.iter().all(|p| !first_ids.contains(&p.id)));
    }
    Ok(())
}

#[tokio::test]
async fn pages_past_the_end_are_empty_but_keep_the_total() -> anyhow::Result<()> {
    let page = service()
        .list_products(ProductQuery {
            page: 10,
            ..Default::default()
        })
        .await?;
    assert!(page.items.is_empty());
    assert_eq!(page.total_count, demo_products().len() as u64);
    Ok(())
}

#[tokio::test]
async fn price_sorts_are_monotonic() -> anyhow::Result<()> {
    let service = service();

    let asc = service
        .list_products(ProductQuery {
            sort: Some(ProductSort::PriceAsc),
            ..Default::default()
        })
        .await?;
    assert!(asc.items.windows(2).all(|w| w[0].price <= w[1].price));

    let desc = service
        .list_products(ProductQuery {
            sort: Some(ProductSort::PriceDesc),
            ..Default::default()
        })
        .await?;
    assert!(desc.items.windows(2).all(|w| w[0].price >= w[1].price));
    assert_eq!(desc.items[0].product_name, "iPhone 15");
    Ok(())
}

#[tokio::test]
async fn date_added_lists_newest_first() -> anyhow::Result<()> {
    let page = service()
        .list_products(ProductQuery {
            sort: Some(ProductSort::DateAdded),
            ..Default::default()
        })
        .await?;
    assert_eq!(page.items[0].product_name, "Tiro Track Jacket");
    assert!(
        page.items
            .windows(2)
            .all(|w| w[0].created_at >= w[1].created_at)
    );
    Ok(())
}

#[tokio::test]
async fn brand_and_price_on_second_page() -> anyhow::Result<()> {
    let query = ProductQuery {
        page: 2,
        brand: Some("Nike".to_string()),
        min_price: Some(50.0),
        max_price: Some(100.0),
        ..Default::default()
    };
    let page = service().list_products(query).await?;
    // Air Zoom Pegasus and Club Fleece Joggers both fit on page one.
    assert_eq!(page.total_count, 2);
    assert!(page.items.is_empty());
    Ok(())
}

#[tokio::test]
async fn identical_requests_give_identical_pages() -> anyhow::Result<()> {
    let service = service();
    let query = ProductQuery {
        category: Some("Shoes".to_string()),
        sort: Some(ProductSort::PriceAsc),
        ..Default::default()
    };
    let first = service.list_products(query.clone()).await?;
    let second = service.list_products(query).await?;
    assert_eq!(first, second);
    Ok(())
}

#[tokio::test]
async fn distinct_names_are_unique_and_present() -> anyhow::Result<()> {
    let service = service();
    let products = demo_products();

    let brands = service
        .list_distinct_values(DistinctField::BrandName)
        .await?;
    let unique: HashSet<_> = brands.iter().collect();
    assert_eq!(unique.len(), brands.len());
    assert_eq!(brands, ["Nike", "Adidas", "Puma", "Apple", "Samsung"]);

    let categories = service
        .list_distinct_values(DistinctField::CategoryName)
        .await?;
    assert!(
        categories
            .iter()
            .all(|c| products.iter().any(|p| &p.category_name == c))
    );
    assert_eq!(categories.len(), 3);
    Ok(())
}
