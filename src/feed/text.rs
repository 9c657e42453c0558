//! Text helpers for feed content: markup stripping, price and image extraction.

use std::sync::OnceLock;

use regex::Regex;

/// Price written into a product title, e.g. `¥1,720`.
fn title_price_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[¥￥][\d,]+").expect("title price regex is valid"))
}

/// Price anywhere in free text: `¥1,720`, `￥ 980` or `1,600円`.
fn price_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[¥￥]\s?\d[\d,]*|\d[\d,]*\s?円").expect("price regex is valid")
    })
}

/// First `<img src="...">` in an HTML fragment.
fn image_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"<img[^>]+src\s*=\s*["']([^"']+)["']"#).expect("image regex is valid")
    })
}

/// Remove price substrings from a title and trim the result.
pub fn strip_price(title: &str) -> String {
    title_price_regex().replace_all(title, "").trim().to_string()
}

/// Find the first price in free text.
pub fn find_price(text: &str) -> Option<String> {
    price_regex()
        .find(text)
        .map(|m| m.as_str().trim().to_string())
}

/// Extract the first image URL from an HTML fragment.
pub fn first_image_url(html: &str) -> Option<String> {
    image_regex()
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Longest entity name looked for after `&`.
const MAX_ENTITY_LEN: usize = 10;

/// Strip HTML tags from text, decode common entities and collapse whitespace.
///
/// A `&` that does not start a terminated entity is kept as text.
pub fn strip_html(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    let mut entity: Option<String> = None;

    for ch in html.chars() {
        if let Some(name) = entity.as_mut() {
            match ch {
                ';' => {
                    push_entity(name, &mut result);
                    entity = None;
                    continue;
                }
                c if c.is_whitespace() || c == '<' || c == '&' || name.len() >= MAX_ENTITY_LEN => {
                    result.push('&');
                    result.push_str(name);
                    entity = None;
                }
                c => {
                    name.push(c);
                    continue;
                }
            }
        }

        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            '&' if !in_tag => entity = Some(String::new()),
            _ if !in_tag => result.push(ch),
            _ => {}
        }
    }

    if let Some(name) = entity {
        result.push('&');
        result.push_str(&name);
    }

    result.split_whitespace().collect::<Vec<&str>>().join(" ")
}

fn push_entity(name: &str, out: &mut String) {
    match name {
        "amp" => out.push('&'),
        "lt" => out.push('<'),
        "gt" => out.push('>'),
        "quot" => out.push('"'),
        "apos" => out.push('\''),
        "nbsp" => out.push(' '),
        _ if name.starts_with('#') => {
            if let Some(c) = parse_numeric_entity(name).and_then(char::from_u32) {
                out.push(c);
            }
        }
        _ => {
            // Unknown entity, keep as-is
            out.push('&');
            out.push_str(name);
            out.push(';');
        }
    }
}

/// Parse a numeric HTML entity (e.g., "#123" or "#x7B").
fn parse_numeric_entity(entity: &str) -> Option<u32> {
    if let Some(hex) = entity
        .strip_prefix("#x")
        .or_else(|| entity.strip_prefix("#X"))
    {
        u32::from_str_radix(hex, 16).ok()
    } else {
        entity.strip_prefix('#')?.parse().ok()
    }
}

/// Truncate to `max_chars` characters, appending `...` when text was cut.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut truncated: String = text.chars().take(max_chars).collect();
        truncated.push_str("...");
        truncated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_price_from_title() {
        assert_eq!(
            strip_price("【エチオピア】モカ ゲイシャ G1 Natural 150g ¥1,720"),
            "【エチオピア】モカ ゲイシャ G1 Natural 150g"
        );
        assert_eq!(strip_price("¥980 ペルー ¥1,200"), "ペルー");
        assert_eq!(strip_price("タンザニア ￥1,600"), "タンザニア");
        assert_eq!(strip_price("no price here"), "no price here");
    }

    #[test]
    fn test_find_price() {
        assert_eq!(find_price("今だけ ¥1,720 です"), Some("¥1,720".to_string()));
        assert_eq!(find_price("価格 1,600円(税込)"), Some("1,600円".to_string()));
        assert_eq!(find_price("￥ 980"), Some("￥ 980".to_string()));
        assert_eq!(find_price("150g"), None);
        assert_eq!(find_price("¥"), None);
    }

    #[test]
    fn test_first_image_url() {
        let html = r#"<p>beans</p><img class="x" src="https://img.example/a.jpg"><img src='b.jpg'>"#;
        assert_eq!(
            first_image_url(html),
            Some("https://img.example/a.jpg".to_string())
        );
        assert_eq!(first_image_url("<p>no image</p>"), None);
        assert_eq!(
            first_image_url("<IMG src='upper.jpg'>"),
            None,
            "tag match is case-sensitive"
        );
    }

    #[test]
    fn test_strip_html_basic() {
        assert_eq!(strip_html("<p>Hello</p>"), "Hello");
        assert_eq!(strip_html("<b>Bold</b> text"), "Bold text");
        assert_eq!(strip_html("<div><p>Nested</p></div>"), "Nested");
    }

    #[test]
    fn test_strip_html_entities() {
        assert_eq!(strip_html("&amp;"), "&");
        assert_eq!(strip_html("&lt;tag&gt;"), "<tag>");
        assert_eq!(strip_html("A&nbsp;B"), "A B");
        assert_eq!(strip_html("&#x3042;&#65;"), "あA");
        assert_eq!(strip_html("&copy;"), "&copy;");
    }

    #[test]
    fn test_strip_html_bare_ampersand() {
        assert_eq!(strip_html("A & B"), "A & B");
        assert_eq!(
            strip_html("<p>深煎り & 浅煎り の飲み比べ</p>"),
            "深煎り & 浅煎り の飲み比べ"
        );
        assert_eq!(strip_html("R&D<br>done"), "R&Ddone");
        assert_eq!(strip_html("A &&amp; B"), "A && B");
        assert_eq!(strip_html("tail &"), "tail &");
        assert_eq!(strip_html("a&verylongentityname;"), "a&verylongentityname;");
    }

    #[test]
    fn test_strip_html_whitespace() {
        assert_eq!(
            strip_html("<p>\n\t浅煎り\n\tの  豆\n</p>"),
            "浅煎り の 豆"
        );
    }

    #[test]
    fn test_parse_numeric_entity() {
        assert_eq!(parse_numeric_entity("#65"), Some(65));
        assert_eq!(parse_numeric_entity("#x41"), Some(65));
        assert_eq!(parse_numeric_entity("#X41"), Some(65));
        assert_eq!(parse_numeric_entity("invalid"), None);
    }

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("short", 10), "short");

        let exact = "あ".repeat(10);
        assert_eq!(truncate_with_ellipsis(&exact, 10), exact);

        let long = "あ".repeat(12);
        let truncated = truncate_with_ellipsis(&long, 10);
        assert_eq!(truncated, format!("{}...", "あ".repeat(10)));
    }
}
