//! Glob matching with Redis `MATCH` semantics
//!
//! Backends that cannot push pattern matching down to the store (the
//! in-process cache, test doubles) compile patterns through [`GlobPattern`]
//! so that `delete_pattern` behaves the same everywhere. Cache keys embed
//! JSON, so every character outside the glob syntax is matched literally.

use regex::Regex;

use crate::domain::DomainError;

/// A compiled glob pattern supporting `*`, `?`, `[...]`, `[^...]` and `\` escapes
#[derive(Debug, Clone)]
pub struct GlobPattern {
    source: String,
    regex: Regex,
}

impl GlobPattern {
    /// Compiles a glob pattern
    pub fn new(pattern: &str) -> Result<Self, DomainError> {
        let regex = Regex::new(&glob_to_regex(pattern))
            .map_err(|e| DomainError::cache(format!("Invalid pattern '{}': {}", pattern, e)))?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// Returns true if the whole key matches
    pub fn matches(&self, key: &str) -> bool {
        self.regex.is_match(key)
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

fn glob_to_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2 + 2);
    out.push_str("(?s)^");

    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            '\\' => match chars.next() {
                Some(escaped) => push_literal(&mut out, escaped),
                None => push_literal(&mut out, '\\'),
            },
            '[' => {
                let mut class = String::new();
                let mut raw = vec!['['];
                let mut members = 0usize;
                let mut closed = false;

                if chars.peek() == Some(&'^') {
                    chars.next();
                    raw.push('^');
                    class.push('^');
                }

                while let Some(inner) = chars.next() {
                    raw.push(inner);

                    match inner {
                        ']' => {
                            closed = true;
                            break;
                        }
                        '\\' => {
                            if let Some(escaped) = chars.next() {
                                raw.push(escaped);
                                push_class_literal(&mut class, escaped);
                                members += 1;
                            }
                        }
                        '-' if members > 0 && chars.peek().is_some_and(|n| *n != ']') => {
                            class.push('-');
                        }
                        other => {
                            push_class_literal(&mut class, other);
                            members += 1;
                        }
                    }
                }

                if closed && members > 0 {
                    out.push('[');
                    out.push_str(&class);
                    out.push(']');
                } else {
                    // Unterminated or empty class: match the text literally
                    for literal in raw {
                        push_literal(&mut out, literal);
                    }
                }
            }
            other => push_literal(&mut out, other),
        }
    }

    out.push('$');
    out
}

fn push_literal(out: &mut String, c: char) {
    let mut buf = [0u8; 4];
    out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
}

fn push_class_literal(class: &mut String, c: char) {
    if matches!(c, '\\' | ']' | '[' | '^' | '-' | '&' | '~') {
        class.push('\\');
    }
    class.push(c);
}
