//! Crawl-priority policy for extracted links

use crate::annotate::lexicon::PRIORITY_ANCHOR_WORDS;

/// Computes the crawl priority for a link found on a page
///
/// Internal links start at 3, external at 1. Anchor text mentioning
/// article/news/blog content adds 2. At depth >= 2 the priority drops by one
/// (floor 1); the depth here is the linking page's depth, not the child's.
pub fn link_priority(internal: bool, anchor_text: &str, page_depth: u32) -> i32 {
    let mut priority = if internal { 3 } else { 1 };

    let lower = anchor_text.to_lowercase();
    if PRIORITY_ANCHOR_WORDS.iter().any(|w| lower.contains(w)) {
        priority += 2;
    }

    if page_depth >= 2 {
        priority = (priority - 1).max(1);
    }

    priority
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_links_outrank_external() {
        assert_eq!(link_priority(true, "about us", 0), 3);
        assert_eq!(link_priority(false, "partner site", 0), 1);
    }

    #[test]
    fn content_anchors_get_a_boost() {
        assert_eq!(link_priority(true, "Latest News", 0), 5);
        assert_eq!(link_priority(false, "read the blog", 0), 3);
        assert_eq!(link_priority(false, "Full Article", 0), 3);
    }

    #[test]
    fn deep_pages_reduce_priority() {
        assert_eq!(link_priority(true, "about", 2), 2);
        assert_eq!(link_priority(true, "about", 3), 2);
        assert_eq!(link_priority(true, "about", 1), 3);
    }

    #[test]
    fn reduction_floors_at_one() {
        assert_eq!(link_priority(false, "somewhere", 2), 1);
    }
}
