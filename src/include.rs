//! Include-directive recognition.
//!
//! A line is an include directive when it matches the matcher's regex. The
//! regex must define three named groups: `quoted_name` (the name with its
//! delimiters), `open` (the opening delimiter, `"` or `<`) and `name` (the
//! bare name).

use regex::Regex;

use crate::error::{Error, Result};

/// Pattern used when the configuration does not supply one.
pub const DEFAULT_INCLUDE_PATTERN: &str =
    r#"^ *# *include *(?P<quoted_name>(?P<open>["<])(?P<name>[^">]*)[">])"#;

const REQUIRED_GROUPS: [&str; 3] = ["quoted_name", "open", "name"];

/// How the included name was delimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quoting {
    /// `#include <name>`
    Angle,
    /// `#include "name"`
    Quoted,
}

/// An include directive pulled out of a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeDirective {
    /// The referenced name, delimiters stripped.
    pub name: String,
    pub quoting: Quoting,
}

impl IncludeDirective {
    pub fn new(name: impl Into<String>, quoting: Quoting) -> Self {
        Self {
            name: name.into(),
            quoting,
        }
    }

    pub fn is_angle(&self) -> bool {
        self.quoting == Quoting::Angle
    }

    /// Re-serialize as `#include <name>` / `#include "name"` without incidental
    /// whitespace, so equivalent directives compare equal.
    pub fn normalized(&self) -> String {
        render(&self.name, self.quoting)
    }
}

/// Render an include line for `name` with the given quoting.
pub fn render(name: &str, quoting: Quoting) -> String {
    match quoting {
        Quoting::Angle => format!("#include <{}>", name),
        Quoting::Quoted => format!("#include \"{}\"", name),
    }
}

/// Recognizes include directives in source lines.
#[derive(Debug, Clone)]
pub struct IncludeMatcher {
    regex: Regex,
}

impl IncludeMatcher {
    /// Build a matcher from a custom pattern, checking the required groups.
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)?;
        let names: Vec<&str> = regex.capture_names().flatten().collect();
        for group in REQUIRED_GROUPS {
            if !names.contains(&group) {
                return Err(Error::ConfigParse {
                    message: format!("include pattern is missing the named group '{}'", group),
                    hint: Some(format!(
                        "the pattern must define (?P<quoted_name>...), (?P<open>...) and (?P<name>...); default is {}",
                        DEFAULT_INCLUDE_PATTERN
                    )),
                });
            }
        }
        Ok(Self { regex })
    }

    /// Parse one line. Returns `None` when the line is not an include.
    pub fn parse_line(&self, line: &str) -> Option<IncludeDirective> {
        let caps = self.regex.captures(line)?;
        let name = caps.name("name")?.as_str();
        let quoting = match caps.name("open")?.as_str() {
            "<" => Quoting::Angle,
            _ => Quoting::Quoted,
        };
        Some(IncludeDirective::new(name, quoting))
    }
}

impl Default for IncludeMatcher {
    fn default() -> Self {
        Self {
            regex: Regex::new(DEFAULT_INCLUDE_PATTERN).expect("default include pattern is valid"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_angle_include() {
        let matcher = IncludeMatcher::default();
        let directive = matcher.parse_line("#include <stdio.h>").unwrap();
        assert_eq!(directive.name, "stdio.h");
        assert_eq!(directive.quoting, Quoting::Angle);
    }

    #[test]
    fn test_parse_quoted_include_with_whitespace() {
        let matcher = IncludeMatcher::default();
        let directive = matcher.parse_line("  #  include   \"loader/core.h\"").unwrap();
        assert_eq!(directive.name, "loader/core.h");
        assert_eq!(directive.quoting, Quoting::Quoted);
        assert_eq!(directive.normalized(), "#include \"loader/core.h\"");
    }

    #[test]
    fn test_trailing_comment_is_ignored() {
        let matcher = IncludeMatcher::default();
        let directive = matcher.parse_line("#include <vector>  // for std::vector").unwrap();
        assert_eq!(directive.normalized(), "#include <vector>");
    }

    #[test]
    fn test_non_include_lines() {
        let matcher = IncludeMatcher::default();
        assert!(matcher.parse_line("int x;").is_none());
        assert!(matcher.parse_line("// #include <stdio.h>").is_none());
        assert!(matcher.parse_line("#define INCLUDE 1").is_none());
        assert!(matcher.parse_line("#include MACRO_HEADER").is_none());
    }

    #[test]
    fn test_custom_pattern() {
        let matcher = IncludeMatcher::new(
            r#"^%include (?P<quoted_name>(?P<open>["<])(?P<name>[^">]*)[">])"#,
        )
        .unwrap();
        assert!(matcher.parse_line("%include \"a.inc\"").is_some());
        assert!(matcher.parse_line("#include \"a.inc\"").is_none());
    }

    #[test]
    fn test_custom_pattern_missing_group() {
        let err = IncludeMatcher::new(r#"^#include (?P<name>\S+)"#).unwrap_err();
        assert!(err.to_string().contains("quoted_name"));
    }
}
