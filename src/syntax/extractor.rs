//! Regex-based extraction of translation-function calls.

use regex::Regex;

use crate::types::line_text;

/// Errors raised while building a [`KeyExtractor`].
#[derive(Debug, thiserror::Error)]
pub enum ExtractorError {
    #[error("Translation function name cannot be empty")]
    EmptyFunctionName,

    #[error("Failed to build call pattern for '{function_name}': {source}")]
    Pattern {
        function_name: String,
        #[source]
        source: regex::Error,
    },
}

/// One recognized call such as `__('menu.title')`.
///
/// `start` and `end` are byte offsets covering the whole call, from the function name through
/// the closing parenthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedCall {
    pub key: String,
    pub start: usize,
    pub end: usize,
}

/// Scanner for calls to one translation function.
///
/// Holds only compiled patterns; every scan starts from scratch.
#[derive(Debug, Clone)]
pub struct KeyExtractor {
    /// Function name as configured, before escaping.
    function_name: String,
    /// `fn ( 'key' )` or `fn ( "key" )`.
    call: Regex,
    /// `fn ( 'partial` anchored at the end of the input.
    partial_single: Regex,
    /// `fn ( "partial` anchored at the end of the input.
    partial_double: Regex,
}

impl KeyExtractor {
    /// Compiles the patterns for `function_name`, which is matched literally.
    pub fn new(function_name: &str) -> Result<Self, ExtractorError> {
        if function_name.is_empty() {
            return Err(ExtractorError::EmptyFunctionName);
        }

        let name = regex::escape(function_name);
        let compile = |pattern: String| {
            Regex::new(&pattern).map_err(|source| ExtractorError::Pattern {
                function_name: function_name.to_string(),
                source,
            })
        };

        Ok(Self {
            function_name: function_name.to_string(),
            call: compile(format!(r#"{name}\s*\(\s*(?:'([^']+)'|"([^"]+)")\s*\)"#))?,
            partial_single: compile(format!(r"{name}\s*\(\s*'([^']*)$"))?,
            partial_double: compile(format!(r#"{name}\s*\(\s*"([^"]*)$"#))?,
        })
    }

    #[must_use]
    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    /// Lazily yields every call in `text`, left to right, without overlaps.
    pub fn extract<'t>(&'t self, text: &'t str) -> impl Iterator<Item = ExtractedCall> + 't {
        self.call.captures_iter(text).filter_map(|captures| {
            let whole = captures.get(0)?;
            let key = captures.get(1).or_else(|| captures.get(2))?;
            Some(ExtractedCall { key: key.as_str().to_string(), start: whole.start(), end: whole.end() })
        })
    }

    /// Key of the first call on line `line` whose span contains byte column `column`.
    ///
    /// Both span boundaries count as inside.
    #[must_use]
    pub fn extract_at(&self, text: &str, line: u32, column: usize) -> Option<String> {
        self.extract(line_text(text, line)?)
            .find(|call| call.start <= column && column <= call.end)
            .map(|call| call.key)
    }

    /// Key typed so far inside an unclosed call ending at the end of `text_before_cursor`.
    ///
    /// The single-quoted form wins when both quote styles match.
    #[must_use]
    pub fn extract_partial<'t>(&self, text_before_cursor: &'t str) -> Option<&'t str> {
        self.partial_single
            .captures(text_before_cursor)
            .or_else(|| self.partial_double.captures(text_before_cursor))
            .and_then(|captures| captures.get(1))
            .map(|partial| partial.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[fixture]
    fn extractor() -> KeyExtractor {
        KeyExtractor::new("__").unwrap()
    }

    fn keys(extractor: &KeyExtractor, text: &str) -> Vec<String> {
        extractor.extract(text).map(|call| call.key).collect()
    }

    #[rstest]
    #[case::single_quotes("<%= __('menu.title') %>", "menu.title")]
    #[case::double_quotes(r#"<%= __("menu.title") %>"#, "menu.title")]
    #[case::inner_whitespace("__ ( 'menu.title' )", "menu.title")]
    #[case::other_quote_inside(r#"__("it's.key")"#, "it's.key")]
    #[case::newline_whitespace("__(\n  'menu.title'\n)", "menu.title")]
    fn extract_recognizes_calls(
        extractor: KeyExtractor,
        #[case] text: &str,
        #[case] expected: &str,
    ) {
        assert_that!(keys(&extractor, text), elements_are![eq(expected)]);
    }

    #[rstest]
    #[case::mixed_quotes(r#"__('menu.title")"#)]
    #[case::empty_key("__('')")]
    #[case::unclosed_paren("__('menu.title'")]
    #[case::extra_argument("__('menu.title', name)")]
    #[case::other_function("t('menu.title')")]
    fn extract_ignores_non_calls(extractor: KeyExtractor, #[case] text: &str) {
        assert_that!(keys(&extractor, text), is_empty());
    }

    #[rstest]
    fn extract_reports_offsets(extractor: KeyExtractor) {
        let text = "<p><%= __('a.b') %></p>";

        let calls: Vec<ExtractedCall> = extractor.extract(text).collect();

        assert_that!(calls, len(eq(1)));
        assert_that!(calls[0].start, eq(7));
        assert_that!(calls[0].end, eq(16));
        assert_eq!(&text[calls[0].start..calls[0].end], "__('a.b')");
    }

    #[rstest]
    fn extract_is_left_to_right(extractor: KeyExtractor) {
        let text = r#"__('first') + __("second") + __('third')"#;

        assert_that!(
            keys(&extractor, text),
            elements_are![eq("first"), eq("second"), eq("third")]
        );
    }

    #[rstest]
    fn extract_is_restartable(extractor: KeyExtractor) {
        let text = "__('a') __('b')";

        let first: Vec<ExtractedCall> = extractor.extract(text).collect();
        let second: Vec<ExtractedCall> = extractor.extract(text).collect();

        assert_that!(first, eq(&second));
    }

    #[rstest]
    fn function_name_is_literal() {
        let extractor = KeyExtractor::new("$t").unwrap();

        assert_that!(keys(&extractor, "{{ $t('home') }} t('other')"), elements_are![eq("home")]);
    }

    #[rstest]
    fn empty_function_name_is_rejected() {
        assert!(matches!(KeyExtractor::new(""), Err(ExtractorError::EmptyFunctionName)));
    }

    #[rstest]
    #[case::at_start(0, 4, Some("a.b"))]
    #[case::inside_key(0, 7, Some("a.b"))]
    #[case::at_end(0, 13, Some("a.b"))]
    #[case::before_call(0, 3, None)]
    #[case::after_call(0, 14, None)]
    #[case::second_line(1, 2, Some("c"))]
    #[case::line_out_of_range(5, 0, None)]
    fn extract_at_uses_inclusive_span(
        extractor: KeyExtractor,
        #[case] line: u32,
        #[case] column: usize,
        #[case] expected: Option<&str>,
    ) {
        let text = "<%= __('a.b') %>\r\n__('c')";

        let key = extractor.extract_at(text, line, column);

        assert_that!(key.as_deref(), eq(expected));
    }

    #[rstest]
    fn extract_at_picks_the_call_under_cursor(extractor: KeyExtractor) {
        let text = "__('one') __('two')";

        assert_that!(extractor.extract_at(text, 0, 12).as_deref(), some(eq("two")));
    }

    #[rstest]
    #[case::single_quote("<%= __('menu.", Some("menu."))]
    #[case::double_quote(r#"<%= __("menu.ti"#, Some("menu.ti"))]
    #[case::just_opened("__('", Some(""))]
    #[case::closed_call("__('menu.title')", None)]
    #[case::no_call("<p>hello", None)]
    #[case::earlier_closed_call("__('a') + __('b", Some("b"))]
    fn extract_partial_cases(
        extractor: KeyExtractor,
        #[case] text: &str,
        #[case] expected: Option<&str>,
    ) {
        assert_that!(extractor.extract_partial(text), eq(expected));
    }

    #[rstest]
    fn extract_partial_prefers_single_quotes(extractor: KeyExtractor) {
        // The double-quoted form also matches here, from the first call onwards.
        let text = r#"__("x') + __('y"#;

        assert_that!(extractor.extract_partial(text), some(eq("y")));
    }
}
