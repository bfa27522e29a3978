// src/utils/html.rs

use std::collections::HashSet;

/// Reduces a CSV cell to plain text.
///
/// Tags are dropped (`<script>`/`<style>` together with their content) and the
/// result is returned unescaped: vocabulary text is compared verbatim against
/// submitted answers, so `salt & pepper` must stay `salt & pepper`. Clients
/// render it with `textContent`.
pub fn plain_text(input: &str) -> String {
    let cleaned = ammonia::Builder::default()
        .tags(HashSet::new())
        .clean(input)
        .to_string();
    unescape(&cleaned)
}

// Undoes the text-node escaping applied by the serializer. `&amp;` goes last
// so an escaped entity such as `&amp;lt;` decodes to `&lt;`, not `<`.
fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::plain_text;

    #[test]
    fn plain_words_are_untouched() {
        assert_eq!(plain_text("Wasser"), "Wasser");
        assert_eq!(plain_text("Straße"), "Straße");
    }

    #[test]
    fn special_characters_survive() {
        assert_eq!(plain_text("salt & pepper"), "salt & pepper");
        assert_eq!(plain_text("3 < 4"), "3 < 4");
        assert_eq!(plain_text("x > y"), "x > y");
        assert_eq!(plain_text("R&amp;B"), "R&B");
    }

    #[test]
    fn markup_is_removed() {
        assert_eq!(plain_text("<script>alert(1)</script>dog"), "dog");
        assert_eq!(plain_text("<b onclick=\"x()\">cat</b>"), "cat");
    }
}
