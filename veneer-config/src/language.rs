//! Language types for code generation.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Target languages a generation config can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Java,
    Python,
    Go,
    #[serde(rename = "csharp")]
    CSharp,
    Ruby,
    Php,
    #[serde(rename = "nodejs")]
    NodeJs,
}

impl Language {
    /// Every supported language, in a stable order.
    pub const ALL: [Language; 7] = [
        Language::Java,
        Language::Python,
        Language::Go,
        Language::CSharp,
        Language::Ruby,
        Language::Php,
        Language::NodeJs,
    ];

    /// Returns the language identifier as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Java => "java",
            Language::Python => "python",
            Language::Go => "go",
            Language::CSharp => "csharp",
            Language::Ruby => "ruby",
            Language::Php => "php",
            Language::NodeJs => "nodejs",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "java" => Ok(Language::Java),
            "python" | "py" => Ok(Language::Python),
            "go" | "golang" => Ok(Language::Go),
            "csharp" | "c#" | "cs" => Ok(Language::CSharp),
            "ruby" | "rb" => Ok(Language::Ruby),
            "php" => Ok(Language::Php),
            "nodejs" | "node" | "js" => Ok(Language::NodeJs),
            _ => Err(format!(
                "unknown language '{}', expected one of: java, python, go, csharp, ruby, php, nodejs",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(Language::from_str("java").unwrap(), Language::Java);
        assert_eq!(Language::from_str("C#").unwrap(), Language::CSharp);
        assert_eq!(Language::from_str("golang").unwrap(), Language::Go);
        assert_eq!(Language::from_str("Node").unwrap(), Language::NodeJs);
        assert!(Language::from_str("rust").is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for language in Language::ALL {
            assert_eq!(Language::from_str(&language.to_string()).unwrap(), language);
        }
    }

    #[test]
    fn test_deserialize() {
        let csharp: Language = serde_json::from_str(r#""csharp""#).unwrap();
        assert_eq!(csharp, Language::CSharp);

        let nodejs: Language = serde_json::from_str(r#""nodejs""#).unwrap();
        assert_eq!(nodejs, Language::NodeJs);
    }
}
