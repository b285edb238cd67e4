use crate::importer::Bookmark;
use chrono::NaiveDate;
use std::io::Write;

/// Characters stripped from the title and URL lines; they would read as link syntax.
const LINK_SYNTAX: &[char] = &['[', ']', '(', ')'];

/// Markdown hard line break.
const BREAK: &str = "  ";

/// Append `extra` to a space-separated tag list. An empty `extra` is a no-op.
pub fn add_extra_tags(tags: &str, extra: &str) -> String {
    if extra.is_empty() {
        tags.to_string()
    } else {
        format!("{} {}", tags, extra)
    }
}

/// Prefix every whitespace-separated tag with `marker` (e.g. `#` for Obsidian).
///
/// Tags already carrying the marker get it again: `#a` becomes `##a`.
/// A tag string with no tokens always yields `""`.
pub fn prepend_marker(tags: &str, marker: &str) -> String {
    let mut tokens = tags.split_whitespace().peekable();
    if tokens.peek().is_none() {
        return String::new();
    }
    if marker.is_empty() {
        return tags.to_string();
    }
    tokens
        .map(|tag| format!("{}{}", marker, tag))
        .collect::<Vec<_>>()
        .join(" ")
}

fn strip_link_syntax(text: &str) -> String {
    text.chars().filter(|c| !LINK_SYNTAX.contains(c)).collect()
}

pub fn write_bookmark_markdown<W: Write>(
    writer: &mut W,
    bookmark: &Bookmark,
    date: &NaiveDate,
    prepend: &str,
) -> std::io::Result<()> {
    writeln!(writer, "{}{}", strip_link_syntax(&bookmark.description).trim(), BREAK)?;
    writeln!(writer, "{}{}", strip_link_syntax(&bookmark.href), BREAK)?;
    writeln!(writer, "{}{}", date.format("%Y-%m-%d"), BREAK)?;
    writeln!(writer, "{}{}", prepend_marker(&bookmark.tags, prepend), BREAK)?;
    writeln!(writer)?;
    write!(writer, "{}", bookmark.extended)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::parse_bookmark_date;

    fn render(bookmark: &Bookmark, prepend: &str) -> String {
        let date = parse_bookmark_date(&bookmark.time).unwrap();
        let mut buf = Vec::new();
        write_bookmark_markdown(&mut buf, bookmark, &date, prepend).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn sample() -> Bookmark {
        Bookmark {
            description: "Test [Site]".to_string(),
            href: "http://x.com/(a)".to_string(),
            time: "2020-01-02T10:00:00Z".to_string(),
            tags: "a b".to_string(),
            extended: "notes".to_string(),
        }
    }

    #[test]
    fn extra_tags() {
        assert_eq!(add_extra_tags("a b", "c d"), "a b c d");
        assert_eq!(add_extra_tags("a b", ""), "a b");
        assert_eq!(add_extra_tags("", "c"), " c");
    }

    #[test]
    fn prepend() {
        assert_eq!(prepend_marker("a b", "#"), "#a #b");
        assert_eq!(prepend_marker("  a\t b  ", "#"), "#a #b");
        assert_eq!(prepend_marker("a  b", ""), "a  b");
        assert_eq!(prepend_marker("a b", "@@"), "@@a @@b");
    }

    #[test]
    fn prepend_without_tokens() {
        assert_eq!(prepend_marker("", "#"), "");
        assert_eq!(prepend_marker("   ", "#"), "");
        assert_eq!(prepend_marker("   ", ""), "");
    }

    #[test]
    fn prepend_twice_double_prefixes() {
        let once = prepend_marker("a b", "#");
        assert_eq!(prepend_marker(&once, "#"), "##a ##b");
    }

    #[test]
    fn extra_tags_then_prepend() {
        let tags = add_extra_tags("a b", "c d");
        assert_eq!(prepend_marker(&tags, "#"), "#a #b #c #d");
    }

    #[test]
    fn formats_sample_record() {
        let body = render(&sample(), "#");
        assert_eq!(
            body,
            "Test Site  \nhttp://x.com/a  \n2020-01-02  \n#a #b  \n\nnotes"
        );
    }

    #[test]
    fn title_and_href_lines_have_no_brackets() {
        let mut bm = sample();
        bm.description = "[[(x)]] ([y]) z)(".to_string();
        bm.href = "https://en.wikipedia.org/wiki/Rust_(programming_language)[1]".to_string();
        let body = render(&bm, "");
        for line in body.lines().take(2) {
            assert!(!line.contains(LINK_SYNTAX), "{line:?}");
        }
        assert!(body.starts_with("x y z  \n"));
    }

    #[test]
    fn extended_is_written_raw() {
        let mut bm = sample();
        bm.extended = "line one\n\n[link](http://y.com)\n".to_string();
        bm.tags = String::new();
        let body = render(&bm, "#");
        assert!(body.ends_with("2020-01-02  \n  \n\nline one\n\n[link](http://y.com)\n"));

        bm.extended = String::new();
        assert!(render(&bm, "#").ends_with("  \n\n"));
    }
}
