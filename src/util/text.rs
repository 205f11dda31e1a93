use std::borrow::Cow;

use chrono::NaiveDate;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Calculates the display width of a string in terminal columns.
///
/// Wide characters (CJK, most emoji) count as two columns, combining marks
/// as zero.
///
/// # Examples
///
/// ```
/// use newsdesk::util::display_width;
///
/// assert_eq!(display_width("Hello"), 5);
/// assert_eq!(display_width("日本"), 4);
/// ```
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

const ELLIPSIS: &str = "...";
const ELLIPSIS_WIDTH: usize = 3;

/// Truncates a string to fit within `max_width` terminal columns.
///
/// When the string does not fit, it is cut on a character boundary and
/// `"..."` is appended so that the result (ellipsis included) still fits.
/// Widths of 3 or less leave no room for the ellipsis, so the result is just
/// as many characters as fit.
///
/// Returns `Cow::Borrowed` when no truncation is needed.
///
/// # Examples
///
/// ```
/// use newsdesk::util::truncate_to_width;
///
/// assert_eq!(truncate_to_width("Short", 10), "Short");
/// assert_eq!(truncate_to_width("Hello World", 8), "Hello...");
/// assert_eq!(truncate_to_width("Test", 2), "Te");
/// ```
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if max_width == 0 {
        return Cow::Borrowed("");
    }

    if max_width <= ELLIPSIS_WIDTH {
        let mut byte_end = 0;
        let mut current_width = 0;
        for (idx, c) in s.char_indices() {
            let char_width = UnicodeWidthChar::width(c).unwrap_or(0);
            if current_width + char_width > max_width {
                break;
            }
            current_width += char_width;
            byte_end = idx + c.len_utf8();
        }
        if byte_end == s.len() {
            return Cow::Borrowed(s);
        }
        return Cow::Owned(s[..byte_end].to_string());
    }

    let target_width = max_width - ELLIPSIS_WIDTH;
    let mut current_width = 0;
    let mut cut_point = None;

    for (idx, c) in s.char_indices() {
        let char_width = UnicodeWidthChar::width(c).unwrap_or(0);

        if cut_point.is_none() && current_width + char_width > target_width {
            cut_point = Some(idx);
        }

        if current_width + char_width > max_width {
            let cut = cut_point.unwrap_or(idx);
            return Cow::Owned(format!("{}{}", &s[..cut], ELLIPSIS));
        }

        current_width += char_width;
    }

    Cow::Borrowed(s)
}

fn is_stripped_byte(b: u8) -> bool {
    b == 0x1b || b == 0x7f || (b < 0x20 && b != b'\t' && b != b'\n' && b != b'\r')
}

/// Strip terminal control characters and ANSI escape sequences.
///
/// Used on anything that came from outside the binary (search input, URL
/// parameters, alternate data files) before it is stored in page state or
/// printed. Tab, newline and carriage return are kept. CSI (`ESC [`) and OSC
/// (`ESC ]`, terminated by BEL or `ESC \`) sequences are removed whole.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    let bytes = s.as_bytes();
    let len = bytes.len();

    if !bytes.iter().any(|&b| is_stripped_byte(b)) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(len);
    let mut i = 0;

    while i < len {
        let b = bytes[i];

        if b == 0x1b {
            match bytes.get(i + 1) {
                Some(b'[') => {
                    i += 2;
                    while i < len {
                        let c = bytes[i];
                        i += 1;
                        if (0x40..=0x7e).contains(&c) {
                            break;
                        }
                    }
                }
                Some(b']') => {
                    i += 2;
                    while i < len {
                        if bytes[i] == 0x07 {
                            i += 1;
                            break;
                        }
                        if bytes[i] == 0x1b && bytes.get(i + 1) == Some(&b'\\') {
                            i += 2;
                            break;
                        }
                        i += 1;
                    }
                }
                _ => i += 1,
            }
        } else if is_stripped_byte(b) {
            i += 1;
        } else {
            let start = i;
            i += 1;
            while i < len && !is_stripped_byte(bytes[i]) {
                i += 1;
            }
            // Only ASCII bytes end a run, so the slice is on a char boundary.
            out.push_str(&s[start..i]);
        }
    }

    Cow::Owned(out)
}

/// Format a calendar date the way article cards show it, e.g. `Jan 6, 2026`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Compact view counter: `5400` becomes `5.4K`, `12000` becomes `12K`.
/// Counts below one thousand are printed as-is.
pub fn format_views(count: u64) -> String {
    if count < 1000 {
        return count.to_string();
    }
    let thousands = format!("{:.1}", count as f64 / 1000.0);
    let trimmed = thousands.strip_suffix(".0").unwrap_or(&thousands);
    format!("{}K", trimmed)
}

/// Reduce an article's HTML fragment to plain text for the terminal.
///
/// Block-level closing tags (`</p>`, `</li>`, headings, quotes) become line
/// breaks, list items get a `- ` prefix, every other tag is dropped, and the
/// handful of entities the content uses are decoded. Blank lines are dropped.
pub fn html_to_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let Some(close) = rest[open..].find('>') else {
            // Unterminated tag: keep the remainder as text.
            out.push_str(&rest[open..]);
            rest = "";
            break;
        };
        let tag = rest[open + 1..open + close].trim().to_ascii_lowercase();
        let name = tag
            .split(|c: char| c.is_whitespace() || c == '/')
            .find(|part| !part.is_empty())
            .unwrap_or("");
        let closing = tag.starts_with('/');

        match name {
            "li" if !closing => out.push_str("\n- "),
            "p" | "div" | "blockquote" | "ul" | "ol" | "li" | "br" | "h1" | "h2" | "h3"
            | "h4" | "h5" | "h6" => out.push('\n'),
            _ => {}
        }

        rest = &rest[open + close + 1..];
    }
    out.push_str(rest);

    let decoded = out
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    decoded
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ascii_truncation() {
        assert_eq!(truncate_to_width("Hello World", 8), "Hello...");
        assert_eq!(truncate_to_width("Short", 10), "Short");
    }

    #[test]
    fn test_truncation_returns_borrowed_when_fitting() {
        let title = "Markets Rally";
        assert!(matches!(truncate_to_width(title, 40), Cow::Borrowed(_)));
        assert!(matches!(truncate_to_width(title, 13), Cow::Borrowed(_)));
    }

    #[test]
    fn test_wide_char_truncation() {
        // Each character is two columns wide.
        assert_eq!(truncate_to_width("日本語テキスト", 7), "日本...");
        assert_eq!(truncate_to_width("日本", 10), "日本");
        assert_eq!(truncate_to_width("日本語", 3), "日");
    }

    #[test]
    fn test_narrow_widths() {
        assert_eq!(truncate_to_width("Test", 0), "");
        assert_eq!(truncate_to_width("Test", 1), "T");
        assert_eq!(truncate_to_width("Test", 3), "Tes");
        assert_eq!(truncate_to_width("Testing", 4), "T...");
        assert_eq!(truncate_to_width("Test", 4), "Test");
    }

    #[test]
    fn test_display_width() {
        assert_eq!(display_width("Sports"), 6);
        assert_eq!(display_width("日本"), 4);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn test_strip_clean_text_returns_borrowed() {
        let input = "quantum computing";
        let result = strip_control_chars(input);
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result, input);
    }

    #[test]
    fn test_strip_removes_controls_and_ansi() {
        assert_eq!(strip_control_chars("he\x00ll\x07o"), "hello");
        assert_eq!(strip_control_chars("\x1b[31mRed\x1b[0m"), "Red");
        assert_eq!(strip_control_chars("\x1b]0;title\x07safe"), "safe");
        assert_eq!(strip_control_chars("\x1b]0;title\x1b\\safe"), "safe");
        assert_eq!(strip_control_chars("a\x1bb\x7fc"), "abc");
    }

    #[test]
    fn test_strip_preserves_whitespace_controls() {
        let input = "line1\nline2\tcol\r\n";
        assert_eq!(strip_control_chars(input), input);
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 6).unwrap();
        assert_eq!(format_date(date), "Jan 6, 2026");
        let date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert_eq!(format_date(date), "Dec 31, 2025");
    }

    #[test]
    fn test_format_views() {
        assert_eq!(format_views(0), "0");
        assert_eq!(format_views(999), "999");
        assert_eq!(format_views(1000), "1K");
        assert_eq!(format_views(5400), "5.4K");
        assert_eq!(format_views(12000), "12K");
        assert_eq!(format_views(8640), "8.6K");
    }

    #[test]
    fn test_html_to_text_paragraphs_and_lists() {
        let html = "<p>First paragraph.</p>\n<h3>Heading</h3>\n<ul>\n<li>One</li>\n<li>Two</li>\n</ul>";
        assert_eq!(
            html_to_text(html),
            "First paragraph.\nHeading\n- One\n- Two"
        );
    }

    #[test]
    fn test_html_to_text_drops_inline_markup_and_decodes() {
        let html = r#"<blockquote style="padding: 20px;"><p><em>"Quote" &amp; more</em></p></blockquote>"#;
        assert_eq!(html_to_text(html), "\"Quote\" & more");
    }

    #[test]
    fn test_html_to_text_unterminated_tag_kept() {
        assert_eq!(html_to_text("text <broken"), "text <broken");
    }
}
