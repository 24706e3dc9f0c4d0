//! Package-name formatting per target language.
//!
//! A [`LanguageFormatterRegistry`] maps each [`Language`] to the formatter that
//! turns a dotted API package (`google.example.library.v1`) into that
//! language's package or namespace string. Build it once and pass it to
//! whatever needs package names.

use std::{collections::HashMap, sync::LazyLock};

use regex::Regex;
use veneer_config::Language;

static VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v\d+((alpha|beta)\d*)?$").expect("Invalid regex")
});

/// Whether a package segment is an API version such as `v1` or `v2beta3`.
pub fn is_version(segment: &str) -> bool {
    VERSION.is_match(segment)
}

/// Rewrites a dotted package name into a language-specific one.
pub trait PackageFormatter: Send + Sync {
    fn format_package(&self, package: &str) -> String;
}

/// Replace a leading pattern, unless the text right after the match starts with `unless_followed_by`.
struct RewriteRule {
    pattern: Regex,
    replacement: &'static str,
    unless_followed_by: Option<&'static str>,
}

impl RewriteRule {
    fn new(pattern: &str, replacement: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("Invalid rewrite rule"),
            replacement,
            unless_followed_by: None,
        }
    }

    fn unless_followed_by(mut self, suffix: &'static str) -> Self {
        self.unless_followed_by = Some(suffix);
        self
    }

    fn rewrite(&self, input: &str) -> String {
        let Some(m) = self.pattern.find(input) else {
            return input.to_string();
        };
        if let Some(suffix) = self.unless_followed_by
            && input[m.end()..].starts_with(suffix)
        {
            return input.to_string();
        }
        format!("{}{}{}", &input[..m.start()], self.replacement, &input[m.end()..])
    }
}

fn java_rules() -> Vec<RewriteRule> {
    vec![RewriteRule::new(r"^google(\.cloud)?", "com.google.cloud")]
}

fn common_rules() -> Vec<RewriteRule> {
    vec![RewriteRule::new(r"^google", "google.cloud").unless_followed_by(".cloud")]
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Rewrite, split on `.`, optionally capitalize, join with a separator.
struct SimpleFormatter {
    separator: &'static str,
    rules: Vec<RewriteRule>,
    capitalize: bool,
}

impl PackageFormatter for SimpleFormatter {
    fn format_package(&self, package: &str) -> String {
        let rewritten = self
            .rules
            .iter()
            .fold(package.to_string(), |acc, rule| rule.rewrite(&acc));
        rewritten
            .split('.')
            .map(|segment| {
                if self.capitalize {
                    capitalize(segment)
                } else {
                    segment.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(self.separator)
    }
}

/// `google.cloud.<...>.gapic`, with a trailing version moved into a `_vN` suffix.
struct PythonFormatter {
    rules: Vec<RewriteRule>,
}

impl PackageFormatter for PythonFormatter {
    fn format_package(&self, package: &str) -> String {
        let rewritten = self
            .rules
            .iter()
            .fold(package.to_string(), |acc, rule| rule.rewrite(&acc));
        match rewritten.rsplit_once('.') {
            Some((rest, last)) if is_version(last) => format!("{}_{}.gapic", rest, last),
            _ => format!("{}.gapic", rewritten),
        }
    }
}

/// `google.logging.v2` becomes `cloud.google.com/go/logging/apiv2`.
struct GoFormatter;

impl PackageFormatter for GoFormatter {
    fn format_package(&self, package: &str) -> String {
        let parts: Vec<&str> = package.split('.').collect();
        let is_cloud = parts.len() >= 3
            && parts[0] == "google"
            && parts.last().is_some_and(|last| last.starts_with('v'));
        if !is_cloud {
            let mut components = vec!["google.golang.org"];
            components.extend(parts);
            return components.join("/");
        }
        let last = parts[parts.len() - 1];
        format!(
            "cloud.google.com/go/{}/api{}",
            parts[1..parts.len() - 1].join("/"),
            last
        )
    }
}

/// The last two segments, e.g. `library.v1`.
struct NodeJsFormatter;

impl PackageFormatter for NodeJsFormatter {
    fn format_package(&self, package: &str) -> String {
        let parts: Vec<&str> = package.split('.').collect();
        if parts.len() < 2 {
            return package.to_string();
        }
        format!("{}.{}", parts[parts.len() - 2], parts[parts.len() - 1])
    }
}

/// Language to formatter table.
pub struct LanguageFormatterRegistry {
    formatters: HashMap<Language, Box<dyn PackageFormatter>>,
}

impl LanguageFormatterRegistry {
    /// A registry with no formatters.
    pub fn empty() -> Self {
        Self {
            formatters: HashMap::new(),
        }
    }

    /// A registry with the formatters for every supported language.
    pub fn new() -> Self {
        Self::empty()
            .with(
                Language::Java,
                SimpleFormatter {
                    separator: ".",
                    rules: java_rules(),
                    capitalize: false,
                },
            )
            .with(
                Language::Python,
                PythonFormatter {
                    rules: common_rules(),
                },
            )
            .with(Language::Go, GoFormatter)
            .with(
                Language::CSharp,
                SimpleFormatter {
                    separator: ".",
                    rules: Vec::new(),
                    capitalize: true,
                },
            )
            .with(
                Language::Ruby,
                SimpleFormatter {
                    separator: "::",
                    rules: common_rules(),
                    capitalize: true,
                },
            )
            .with(
                Language::Php,
                SimpleFormatter {
                    separator: "\\",
                    rules: common_rules(),
                    capitalize: true,
                },
            )
            .with(Language::NodeJs, NodeJsFormatter)
    }

    /// Register or replace the formatter for a language.
    pub fn with(mut self, language: Language, formatter: impl PackageFormatter + 'static) -> Self {
        self.formatters.insert(language, Box::new(formatter));
        self
    }

    pub fn get(&self, language: Language) -> Option<&dyn PackageFormatter> {
        self.formatters.get(&language).map(|f| f.as_ref())
    }

    /// Format a package for a language, or return it unchanged if no formatter is registered.
    pub fn format_package(&self, language: Language, package: &str) -> String {
        match self.get(language) {
            Some(formatter) => formatter.format_package(package),
            None => package.to_string(),
        }
    }
}

impl std::fmt::Debug for LanguageFormatterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageFormatterRegistry")
            .field("languages", &self.formatters.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for LanguageFormatterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
