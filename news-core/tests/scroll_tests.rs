use news_core::InfiniteScroll;

#[test]
fn scroll_triggers_near_the_end_only_when_allowed() {
    let scroll = InfiniteScroll::new(3);
    assert!(!scroll.should_load_more(5, 20, true, false));
    assert!(scroll.should_load_more(17, 20, true, false));
    assert!(scroll.should_load_more(20, 20, true, false));
    assert!(!scroll.should_load_more(20, 20, false, false));
    assert!(!scroll.should_load_more(20, 20, true, true));
}

#[test]
fn default_threshold_is_small() {
    let scroll = InfiniteScroll::default();
    assert!(scroll.should_load_more(10, 12, true, false));
    assert!(!scroll.should_load_more(2, 12, true, false));
}
