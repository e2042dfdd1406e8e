use crate::error::Error;
use regex::Regex;

/// Glob-style url filter: `*` matches any run of non-separator characters,
/// `**` matches any run including separators. Everything else is literal.
#[derive(Debug)]
pub struct UrlPatternMatcher {
    pattern: String,
    regex: Regex,
}

impl UrlPatternMatcher {
    pub fn new(pattern: &str) -> Result<Self, Error> {
        let regex = Regex::new(&Self::compile(pattern))
            .map_err(|_| Error::InvalidUrlPattern(pattern.into()))?;

        Ok(Self {
            pattern: pattern.into(),
            regex,
        })
    }

    fn compile(pattern: &str) -> String {
        let mut regex = String::with_capacity(pattern.len() * 2 + 2);
        regex.push('^');

        let mut chars = pattern.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '*' {
                if chars.peek() == Some(&'*') {
                    chars.next();
                    regex.push_str(".*");
                } else {
                    regex.push_str("[^/]*");
                }
            } else {
                regex.push_str(&regex::escape(&c.to_string()));
            }
        }

        regex.push('$');
        regex
    }

    pub fn matches(&self, url: &str) -> bool {
        self.regex.is_match(url)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}
