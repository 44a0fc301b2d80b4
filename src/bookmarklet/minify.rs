//! Whitespace and comment stripping for the bookmarklet source
//!
//! Deliberately naive: it does not tokenize, so the template must not put
//! `//` or `/*` inside string or regex literals.

use regex::Regex;

use super::BookmarkletError;

/// Collapse a script to one line and prefix it with `javascript:`
pub fn minify(source: &str) -> Result<String, BookmarkletError> {
    let block_comments = Regex::new(r"/\*[\s\S]*?\*/")?;
    let line_comments = Regex::new(r"(?m)//.*$")?;
    let whitespace = Regex::new(r"\s+")?;
    let around_punct = Regex::new(r"\s*([{};,()=+\-*/<>!&|?:])\s*")?;

    let code = block_comments.replace_all(source, "");
    let code = line_comments.replace_all(&code, "");
    let code = whitespace.replace_all(&code, " ");
    let code = around_punct.replace_all(&code, "$1");

    Ok(format!("javascript:{}", code.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comments_and_whitespace_are_removed() {
        let source = "/* header */\n(function() {\n    // note\n    var a = 1 + 2;\n    if (a > 2) { go(a); }\n})();\n";
        assert_eq!(
            minify(source).expect("minify"),
            "javascript:(function(){var a=1+2;if(a>2){go(a);}})();"
        );
    }

    #[test]
    fn test_spaces_inside_words_survive() {
        let source = "var s = 'one two';\nreturn typeof s;";
        assert_eq!(
            minify(source).expect("minify"),
            "javascript:var s='one two';return typeof s;"
        );
    }
}
