//! List-item extraction from description markup.
//!
//! Store descriptions are usually HTML (`<ul><li>...</li></ul>`); hand-written
//! ones are often Markdown lists. HTML is scanned directly, everything else
//! goes through pulldown-cmark.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

/// Extract list items as normalized spec candidates, in document order.
pub fn list_items(description: &str) -> Vec<String> {
    if description.trim().is_empty() {
        return Vec::new();
    }

    let raw = if description.to_ascii_lowercase().contains("<li") {
        html_list_items(description)
    } else {
        markdown_list_items(description)
    };

    raw.iter()
        .map(|item| normalize_spec_text(item))
        .filter(|item| !item.is_empty())
        .collect()
}

/// Collapse whitespace and force exactly one space after the first colon.
pub fn normalize_spec_text(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    match collapsed.split_once(':') {
        Some((label, value)) => {
            let label = label.trim();
            let value = value.trim();
            if label.is_empty() && value.is_empty() {
                String::new()
            } else if value.is_empty() {
                format!("{}:", label)
            } else {
                format!("{}: {}", label, value)
            }
        }
        None => collapsed,
    }
}

fn markdown_list_items(markdown: &str) -> Vec<String> {
    let mut items = Vec::new();
    // One buffer per open item so nested items stay separate.
    let mut open: Vec<String> = Vec::new();

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Item) => open.push(String::new()),
            Event::End(TagEnd::Item) => {
                if let Some(text) = open.pop() {
                    items.push(text);
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(buf) = open.last_mut() {
                    buf.push_str(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some(buf) = open.last_mut() {
                    buf.push(' ');
                }
            }
            Event::Start(Tag::List(_)) => {
                // A nested list ends the parent item's own text.
                if let Some(buf) = open.last_mut() {
                    buf.push(' ');
                }
            }
            _ => {}
        }
    }

    items
}

fn html_list_items(html: &str) -> Vec<String> {
    let lower = html.to_ascii_lowercase();
    let mut items = Vec::new();
    let mut pos = 0;

    while let Some(rel) = lower[pos..].find("<li") {
        let tag_start = pos + rel;
        // Skip tags like <link> that share the prefix.
        let after = lower[tag_start + 3..].chars().next();
        if !matches!(after, Some('>') | Some(' ') | Some('\t') | Some('\n') | Some('/')) {
            pos = tag_start + 3;
            continue;
        }
        let Some(open_end) = lower[tag_start..].find('>') else {
            break;
        };
        let content_start = tag_start + open_end + 1;
        let content_end = [lower[content_start..].find("</li"), lower[content_start..].find("<li")]
            .into_iter()
            .flatten()
            .min()
            .map(|i| content_start + i)
            .unwrap_or(html.len());

        items.push(decode_entities(&strip_tags(&html[content_start..content_end])));
        pos = content_end;
    }

    items
}

fn strip_tags(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len());
    let mut in_tag = false;
    for ch in fragment.chars() {
        match ch {
            '<' => {
                in_tag = true;
                out.push(' ');
            }
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_html_items() {
        let html = "<p>Great laptop</p><ul><li>CPU:Intel i5</li><li><strong>RAM:</strong>  16GB</li><li>Backlit keys</li></ul>";
        assert_eq!(
            list_items(html),
            vec!["CPU: Intel i5", "RAM: 16GB", "Backlit keys"]
        );
    }

    #[test]
    fn test_html_entities_and_unclosed_items() {
        let html = "<UL><LI class=\"x\">Size: 15&quot; &amp; up<LI>Weight: 2kg</UL>";
        assert_eq!(list_items(html), vec!["Size: 15\" & up", "Weight: 2kg"]);
    }

    #[test]
    fn test_markdown_items() {
        let md = "Intro paragraph.\n\n- Display: 15.6\"\n- Storage:512GB SSD\n* Weight : 1.8 kg\n";
        assert_eq!(
            list_items(md),
            vec!["Display: 15.6\"", "Storage: 512GB SSD", "Weight: 1.8 kg"]
        );
    }

    #[test]
    fn test_nested_markdown_items_stay_separate() {
        let md = "- Ports:\n  - USB-C\n  - HDMI\n";
        assert_eq!(list_items(md), vec!["USB-C", "HDMI", "Ports:"]);
    }

    #[test]
    fn test_empty_description() {
        assert!(list_items("").is_empty());
        assert!(list_items("   ").is_empty());
        assert!(list_items("Just prose, no list.").is_empty());
    }

    #[test]
    fn test_normalize_spec_text() {
        assert_eq!(normalize_spec_text("A:B"), "A: B");
        assert_eq!(normalize_spec_text("A :   B"), "A: B");
        assert_eq!(normalize_spec_text("Time: 10:30"), "Time: 10:30");
        assert_eq!(normalize_spec_text("bare   phrase"), "bare phrase");
        assert_eq!(normalize_spec_text(" : "), "");
    }
}
