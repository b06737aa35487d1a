//! Translation options.
//!
//! Options are plain values handed to each pass; nothing here is global.
//! They can be read from the `[translate]` table of a `jtran.toml` file and
//! then overridden from the command line.

use std::path::Path;

use serde::Deserialize;

/// Memory-management idiom the generated Objective-C is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MemoryManagement {
    /// Manual retain/release. Objects created only to be thrown are
    /// autoreleased so the throw site does not own them.
    #[default]
    #[serde(alias = "rc")]
    ReferenceCounting,
    /// Automatic reference counting; no explicit release calls are emitted.
    Arc,
}

impl MemoryManagement {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "rc" | "reference-counting" => Some(Self::ReferenceCounting),
            "arc" => Some(Self::Arc),
            _ => None,
        }
    }

    pub fn is_reference_counting(self) -> bool {
        self == Self::ReferenceCounting
    }
}

/// Options consumed by the translation passes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TranslateOptions {
    /// Emit the extra ordinal-to-native-enum conversion (`toNSEnum`).
    pub swift_friendly: bool,
    /// Idiom used for the generated failure path of `valueOf`.
    pub memory: MemoryManagement,
    /// Spaces per indentation level in generated native text.
    pub indent_width: usize,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            swift_friendly: false,
            memory: MemoryManagement::default(),
            indent_width: 2,
        }
    }
}

/// On-disk shape of `jtran.toml`.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    translate: TranslateOptions,
}

impl TranslateOptions {
    /// Read options from a `jtran.toml` file.
    pub fn from_file(path: &Path) -> Result<TranslateOptions, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_str(&content)
    }

    /// Parse options from the contents of a `jtran.toml` file.
    pub fn from_str(content: &str) -> Result<TranslateOptions, String> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| format!("Failed to parse config: {}", e))?;
        Ok(file.translate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let toml = r#"
[translate]
swift-friendly = true
memory = "arc"
indent-width = 4
"#;
        let opts = TranslateOptions::from_str(toml).unwrap();
        assert!(opts.swift_friendly);
        assert_eq!(opts.memory, MemoryManagement::Arc);
        assert_eq!(opts.indent_width, 4);
    }

    #[test]
    fn missing_keys_take_defaults() {
        let opts = TranslateOptions::from_str("[translate]\nmemory = \"rc\"\n").unwrap();
        assert_eq!(opts, TranslateOptions::default());

        let empty = TranslateOptions::from_str("").unwrap();
        assert_eq!(empty, TranslateOptions::default());
    }

    #[test]
    fn rejects_unknown_memory_model() {
        let err = TranslateOptions::from_str("[translate]\nmemory = \"gc\"\n").unwrap_err();
        assert!(err.starts_with("Failed to parse config"), "got: {err}");
    }

    #[test]
    fn memory_management_parse() {
        assert_eq!(MemoryManagement::parse("RC"), Some(MemoryManagement::ReferenceCounting));
        assert_eq!(
            MemoryManagement::parse("reference-counting"),
            Some(MemoryManagement::ReferenceCounting)
        );
        assert_eq!(MemoryManagement::parse("arc"), Some(MemoryManagement::Arc));
        assert_eq!(MemoryManagement::parse("gc"), None);
        assert!(MemoryManagement::ReferenceCounting.is_reference_counting());
        assert!(!MemoryManagement::Arc.is_reference_counting());
    }
}
