//! Prose extraction from source code.
//!
//! Language detection should judge the natural language embedded in a file,
//! not its identifiers or syntax. Each corpus keeps its prose somewhere else:
//! Python in `#` comments and string literals, TeX in `%` comments, SVG in
//! `<!-- -->` comments and text nodes. Lottie JSON carries none.

use regex::Regex;
use std::sync::LazyLock;

use super::family::CorpusKind;

// Alternatives are tried left to right, so triple quotes win over single
// quotes at the same position. `(?s)` lets literals span lines, `(?m)` makes
// `$` end a `#` comment at the line break.
static PROSE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?ms)(#.*?$|""".*?"""|'''.*?'''|".*?"|'.*?')"#).unwrap()
});

// `%` not preceded by a backslash, up to the end of the line.
static TEX_COMMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)(?:^|[^\\])%(.*)$").unwrap());

static SVG_SKIPPED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<style\b.*?</style>|<script\b.*?</script>").unwrap());

// A comment body, or the text after a tag up to the next one.
static SVG_TEXT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--(.*?)-->|>([^<>]+)").unwrap());

/// Characters that delimit comments/literals and are blanked before splitting.
fn is_delimiter(c: char) -> bool {
    matches!(c, '\n' | '\'' | '#' | '"' | '\\')
}

/// Extract the words found inside comments and string literals.
///
/// Delimiters and backslashes are stripped, whitespace is collapsed, and the
/// result is split into words in source order. Returns an empty vector when
/// the code has no comments or strings.
///
/// # Examples
///
/// ```
/// use scenesift::core::segment::extract_prose_words;
///
/// let words = extract_prose_words("x = 1  # move the circle\nlabel = 'Hello'");
/// assert_eq!(words, vec!["move", "the", "circle", "Hello"]);
/// ```
pub fn extract_prose_words(code: &str) -> Vec<String> {
    let combined = PROSE_REGEX
        .find_iter(code)
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    let cleaned: String = combined
        .chars()
        .map(|c| if is_delimiter(c) { ' ' } else { c })
        .collect();

    cleaned.split_whitespace().map(str::to_string).collect()
}

/// Prose words of `code` read the way its corpus writes prose.
///
/// Returns `None` for corpora without a prose channel (Lottie JSON), where a
/// language check has nothing to judge.
pub fn prose_words(code: &str, corpus: CorpusKind) -> Option<Vec<String>> {
    match corpus {
        CorpusKind::Python => Some(extract_prose_words(code)),
        CorpusKind::Tex => Some(extract_tex_comment_words(code)),
        CorpusKind::Svg => Some(extract_svg_text_words(code)),
        CorpusKind::Json => None,
    }
}

/// Words of the `%` comments in a TeX document. Escaped `\%` is not a comment.
pub fn extract_tex_comment_words(code: &str) -> Vec<String> {
    TEX_COMMENT_REGEX
        .captures_iter(code)
        .filter_map(|caps| caps.get(1))
        .flat_map(|m| m.as_str().split_whitespace())
        .map(|w| w.trim_start_matches('%'))
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Words of the comments and text nodes of an SVG document.
///
/// Attribute values and the bodies of `<style>` and `<script>` are skipped.
pub fn extract_svg_text_words(code: &str) -> Vec<String> {
    let visible = SVG_SKIPPED_REGEX.replace_all(code, "><");
    SVG_TEXT_REGEX
        .captures_iter(&visible)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .flat_map(|m| m.as_str().split_whitespace())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_prose_yields_empty() {
        assert!(extract_prose_words("x = 1\ny = x + 2\n").is_empty());
        assert!(extract_prose_words("").is_empty());
    }

    #[test]
    fn test_line_comment() {
        let words = extract_prose_words("a = 1 # set the radius\nb = 2");
        assert_eq!(words, vec!["set", "the", "radius"]);
    }

    #[test]
    fn test_identifiers_are_ignored() {
        let words = extract_prose_words("circle = Circle(radius=2)\nself.play(Create(circle))");
        assert!(words.is_empty());
    }

    #[test]
    fn test_triple_quoted_docstring_spans_lines() {
        let code = "def f():\n    \"\"\"Draw a square.\n    Then rotate it.\"\"\"\n    pass\n";
        let words = extract_prose_words(code);
        assert_eq!(words, vec!["Draw", "a", "square.", "Then", "rotate", "it."]);
    }

    #[test]
    fn test_single_and_double_quotes() {
        let code = r#"title = "Hello world"
sub = 'second line'"#;
        let words = extract_prose_words(code);
        assert_eq!(words, vec!["Hello", "world", "second", "line"]);
    }

    #[test]
    fn test_backslashes_are_stripped() {
        let code = r#"tex = "\\frac{a}{b} is a fraction""#;
        let words = extract_prose_words(code);
        assert_eq!(words, vec!["frac{a}{b}", "is", "a", "fraction"]);
    }

    #[test]
    fn test_order_is_preserved() {
        let code = "# first\nx = 'second'\n# third\n";
        assert_eq!(extract_prose_words(code), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_tex_comments() {
        let code = "\\usepackage{tikz} % draw a dot\n% It moves to the right.\n\\fill (0,0) circle (2pt);\n";
        assert_eq!(
            extract_tex_comment_words(code),
            vec!["draw", "a", "dot", "It", "moves", "to", "the", "right."]
        );
    }

    #[test]
    fn test_tex_escaped_percent_is_not_a_comment() {
        let code = "\\node {50\\% done};\n\\draw (0,0) -- (1,1);\n";
        assert!(extract_tex_comment_words(code).is_empty());
    }

    #[test]
    fn test_svg_comments_and_text_nodes() {
        let code = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100">
<!-- A red ball bounces -->
<style>circle { fill: red; }</style>
<title>Bouncing ball</title>
<circle r="10" fill="red"><animate attributeName="cy" dur="2s" repeatCount="indefinite"/></circle>
</svg>"#;
        assert_eq!(
            extract_svg_text_words(code),
            vec!["A", "red", "ball", "bounces", "Bouncing", "ball"]
        );
    }

    #[test]
    fn test_prose_words_by_corpus() {
        let tex = "% first\n\\begin{tikzpicture}\\end{tikzpicture}";
        assert_eq!(prose_words(tex, CorpusKind::Tex), Some(vec!["first".to_string()]));
        assert_eq!(
            prose_words("x = 1 # first", CorpusKind::Python),
            Some(vec!["first".to_string()])
        );
        assert_eq!(prose_words(r#"{"nm": "hello", "layers": []}"#, CorpusKind::Json), None);
    }
}
