use std::{collections::HashSet, sync::LazyLock};

use regex::Regex;

static TAG_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[/!]?[A-Za-z]").expect("valid tag regex"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Extracts the visible text of an HTML document as a list of non-empty,
/// whitespace-normalized lines.
///
/// Every tag boundary starts a new line, so text from separate elements never
/// ends up on the same line. `<script>` and `<style>` are dropped together with
/// their content.
pub fn extract_lines(html: &str) -> Vec<String> {
    let text = strip_tags(html);

    text.lines()
        .map(clean_text)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Collapses whitespace runs (including non-breaking spaces) into one space and trims.
pub fn clean_text(line: &str) -> String {
    WHITESPACE.replace_all(line, " ").trim().to_string()
}

/// Removes all markup with ammonia's whitelist cleaner, configured with an empty
/// whitelist, then decodes the entities its serializer leaves behind.
fn strip_tags(html: &str) -> String {
    let separated = TAG_OPEN.replace_all(html, "\n$0");

    let cleaned = ammonia::Builder::empty()
        .clean_content_tags(HashSet::from(["script", "style"]))
        .clean(&separated)
        .to_string();

    decode_entities(&cleaned)
}

fn decode_entities(text: &str) -> String {
    // &amp; last, so "&amp;lt;" stays "&lt;".
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

    #[test]
    fn scripts_and_styles_are_dropped() {
        let html = r#"
            <html><head><style>p { color: red; }</style>
            <script>var q = "1) not a question";</script></head>
            <body><p>1) Qual o limite?</p></body></html>
        "#;

        assert_eq!(extract_lines(html), vec!["1) Qual o limite?"]);
    }

    #[test]
    fn adjacent_elements_become_separate_lines() {
        let html = "<div>2. Pergunta</div><div>a) Sim</div><span>b) Não</span>";

        assert_eq!(
            extract_lines(html),
            vec!["2. Pergunta", "a) Sim", "b) Não"]
        );
    }

    #[test]
    fn whitespace_and_entities_are_normalized() {
        let html = "<p>  3)&nbsp;Placas   de\tregulamenta&ccedil;&atilde;o &amp; advert&ecirc;ncia </p>";

        assert_eq!(
            extract_lines(html),
            vec!["3) Placas de regulamentação & advertência"]
        );
    }

    #[test]
    fn inline_markup_splits_lines() {
        let html = "<p>a) Paris <b>*</b></p>";

        assert_eq!(extract_lines(html), vec!["a) Paris", "*"]);
    }

    #[test]
    fn clean_text_collapses_runs() {
        assert_eq!(clean_text("  a)\u{a0}\u{a0}Lyon \r"), "a) Lyon");
    }
}
