use chrono::{DateTime, NaiveDateTime};
use news_core::{Connectivity, NewsFilters, NewsItem, SearchState};

const DESCRIPTION_WIDTH: usize = 160;

/// `2024-10-21 07:28:00` -> `Oct 21, 2024, 07:28 AM`. Unparseable input is
/// returned as-is.
pub fn format_pub_date(raw: &str) -> String {
    const OUTPUT: &str = "%b %-d, %Y, %I:%M %p";
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return naive.format(OUTPUT).to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(OUTPUT).to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return dt.format(OUTPUT).to_string();
    }
    raw.to_owned()
}

pub fn truncate(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

/// 1234567 -> "1,234,567"
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// One article as a block of text; `number` is 1-based.
pub fn card(number: usize, item: &NewsItem) -> String {
    let title = if item.title.trim().is_empty() {
        "(untitled)"
    } else {
        item.title.trim()
    };
    let mut lines = vec![format!("[{number}] {title}")];

    let mut meta = Vec::new();
    if !item.source_name.is_empty() {
        meta.push(item.source_name.clone());
    }
    if !item.pub_date.is_empty() {
        meta.push(format_pub_date(&item.pub_date));
    }
    if let Some(creator) = item.creator.first() {
        meta.push(format!("by {creator}"));
    }
    if let Some(country) = item.country.first() {
        meta.push(country.clone());
    }
    if !meta.is_empty() {
        lines.push(format!("    {}", meta.join(" · ")));
    }
    if !item.category.is_empty() {
        lines.push(format!("    #{}", item.category.joined(" #")));
    }
    if let Some(description) = item.description.as_deref().filter(|d| !d.trim().is_empty()) {
        lines.push(format!("    {}", truncate(description, DESCRIPTION_WIDTH)));
    }
    if !item.link.is_empty() {
        lines.push(format!("    {}", item.link));
    }
    lines.join("\n")
}

/// Shown once a fresh search has resolved.
pub fn results_header(state: &SearchState, filters: Option<&NewsFilters>) -> Option<String> {
    if !state.has_searched || state.loading {
        return None;
    }
    let mut header = if state.total_results > 0 {
        format!("Found {} articles", group_thousands(state.total_results))
    } else {
        "No articles found".to_owned()
    };
    match filters {
        Some(f) if f.is_latest() => header.push_str(" - Latest News"),
        Some(f) => header.push_str(&format!(" for \"{}\"", f.query)),
        None => {}
    }
    Some(header)
}

pub fn connectivity_notice(status: Connectivity) -> Option<&'static str> {
    match status {
        Connectivity::Offline => Some("You're offline. Some features may not work properly."),
        Connectivity::Online => Some("Back online."),
        Connectivity::Unknown => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_backend_dates() {
        assert_eq!(format_pub_date("2024-10-21 07:28:00"), "Oct 21, 2024, 07:28 AM");
        assert_eq!(format_pub_date("2024-10-21T19:05:00Z"), "Oct 21, 2024, 07:05 PM");
        assert_eq!(format_pub_date("yesterday"), "yesterday");
    }

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("héllo wörld", 6), "héllo…");
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn card_skips_missing_fields() {
        let item = NewsItem {
            title: "Hello".into(),
            link: "http://e/1".into(),
            creator: vec!["Ann".to_string()].into(),
            category: vec!["science".to_string(), "world".to_string()].into(),
            ..NewsItem::default()
        };
        let text = card(2, &item);
        assert_eq!(text, "[2] Hello\n    by Ann\n    #science #world\n    http://e/1");
    }

    #[test]
    fn header_distinguishes_latest_and_queries() {
        let state = SearchState {
            total_results: 1500,
            has_searched: true,
            ..SearchState::default()
        };
        assert_eq!(
            results_header(&state, Some(&NewsFilters::latest())).as_deref(),
            Some("Found 1,500 articles - Latest News")
        );
        let rust = NewsFilters::new("rust").unwrap();
        assert_eq!(
            results_header(&state, Some(&rust)).as_deref(),
            Some("Found 1,500 articles for \"rust\"")
        );
        assert_eq!(results_header(&SearchState::default(), None), None);
    }
}
