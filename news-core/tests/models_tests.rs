use news_core::{FilterError, NewsFilters, NewsItem, NewsResponsePage, OptionalList};

#[test]
fn filters_reject_blank_query() {
    assert_eq!(NewsFilters::new("   ").unwrap_err(), FilterError::EmptyQuery);
    assert_eq!(NewsFilters::new("").unwrap_err(), FilterError::EmptyQuery);
}

#[test]
fn filters_trim_query_and_drop_blank_options() {
    let filters = NewsFilters::new("  rust lang ")
        .unwrap()
        .with_language(" ")
        .with_country("gb")
        .with_category("science");
    assert_eq!(filters.query, "rust lang");
    assert_eq!(filters.language, None);
    assert_eq!(
        filters.query_pairs(),
        vec![
            ("query", "rust lang"),
            ("country", "gb"),
            ("category", "science"),
        ]
    );
}

#[test]
fn latest_filters_are_the_default_search() {
    let filters = NewsFilters::latest();
    assert!(filters.is_latest());
    assert_eq!(filters.query_pairs(), vec![("query", "latest"), ("language", "en")]);
    assert!(!NewsFilters::new("other").unwrap().is_latest());
}

#[test]
fn optional_list_treats_missing_null_and_empty_alike() {
    let missing: NewsItem = serde_json::from_str(r#"{"title":"t"}"#).unwrap();
    let null: NewsItem = serde_json::from_str(r#"{"title":"t","creator":null}"#).unwrap();
    let empty: NewsItem = serde_json::from_str(r#"{"title":"t","creator":[]}"#).unwrap();
    assert_eq!(missing.creator, null.creator);
    assert_eq!(null.creator, empty.creator);
    assert!(missing.creator.is_empty());
    assert_eq!(missing.creator.first(), None);
}

#[test]
fn optional_list_accessors() {
    let list: OptionalList<String> = vec!["world".to_string(), "science".to_string()].into();
    assert_eq!(list.len(), 2);
    assert_eq!(list.first().map(String::as_str), Some("world"));
    assert_eq!(list.joined(", "), "world, science");
    assert_eq!(list.iter().count(), 2);
}

#[test]
fn news_item_tolerates_null_everywhere() {
    let item: NewsItem = serde_json::from_str(
        r#"{
            "article_id": null, "title": null, "link": null, "creator": null,
            "description": null, "pubDate": null, "image_url": null, "video_url": null,
            "source_id": null, "source_name": null, "source_url": null, "source_icon": null,
            "language": null, "country": null, "category": null
        }"#,
    )
    .unwrap();
    assert_eq!(item, NewsItem::default());
}

#[test]
fn page_without_next_page_field_has_no_cursor() {
    let page: NewsResponsePage =
        serde_json::from_str(r#"{"status":"success","totalResults":3,"results":[]}"#).unwrap();
    assert_eq!(page.next_page, None);
    assert_eq!(page.total_results, 3);

    let page: NewsResponsePage =
        serde_json::from_str(r#"{"status":"success","totalResults":3,"nextPage":null,"results":[]}"#)
            .unwrap();
    assert_eq!(page.next_page, None);
}

#[test]
fn page_requires_results_and_total() {
    let missing_results =
        serde_json::from_str::<NewsResponsePage>(r#"{"status":"success","totalResults":3}"#);
    assert!(missing_results.is_err());

    let missing_total = serde_json::from_str::<NewsResponsePage>(r#"{"results":[]}"#);
    assert!(missing_total.is_err());
}
