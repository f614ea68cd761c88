// src/config/dump.rs

//! `apt-config dump` invocation and output parsing
//!
//! apt-config prints one `key value;` pair per line, with the value usually
//! wrapped in double quotes:
//!
//! ```text
//! Dir::Cache "var/cache/apt/";
//! Dir::Cache::pkgcache "pkgcache.bin";
//! ```

use crate::error::{Error, Result};
use crate::tools;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Raw `key -> value` pairs as reported by apt-config, quotes removed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawVariables(HashMap<String, String>);

impl RawVariables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a dotted key such as `Dir::Etc`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Insert a pair, replacing any earlier value for the same key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawVariables {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut vars = Self::new();
        for (k, v) in iter {
            vars.insert(k, v);
        }
        vars
    }
}

/// Something that can answer "what are the values of these apt keys?"
pub trait VariableSource {
    /// Return the values of `names`, or an error if the source is unavailable
    fn dump(&self, names: &[&str]) -> Result<RawVariables>;
}

/// A pre-computed map answers every query with itself
impl VariableSource for RawVariables {
    fn dump(&self, _names: &[&str]) -> Result<RawVariables> {
        Ok(self.clone())
    }
}

/// The real `apt-config` binary
#[derive(Debug, Clone)]
pub struct AptConfigCommand {
    program: PathBuf,
}

impl AptConfigCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Default for AptConfigCommand {
    fn default() -> Self {
        Self::new("apt-config")
    }
}

impl VariableSource for AptConfigCommand {
    fn dump(&self, names: &[&str]) -> Result<RawVariables> {
        let mut args = vec!["dump"];
        args.extend_from_slice(names);

        let stdout = tools::run_captured(&self.program, &args)?;
        let vars = parse_dump(&stdout)?;

        debug!("apt-config reported {} variables", vars.len());
        Ok(vars)
    }
}

/// Parse the full text printed by `apt-config dump`
///
/// Blank lines are skipped. A non-blank line without a space separator is
/// a parse error, which callers treat the same as apt-config being absent.
pub fn parse_dump(text: &str) -> Result<RawVariables> {
    let mut vars = RawVariables::new();

    for line in text.split_inclusive('\n') {
        if let Some((key, value)) = parse_dump_line(line)? {
            vars.insert(key, value);
        }
    }

    Ok(vars)
}

/// Parse a single `key value;` line, returning `None` for blank lines
pub fn parse_dump_line(line: &str) -> Result<Option<(String, String)>> {
    let line = line.strip_suffix('\n').unwrap_or(line);
    if line.is_empty() {
        return Ok(None);
    }
    let line = line.strip_suffix(';').unwrap_or(line);

    let (key, value) = line
        .split_once(' ')
        .ok_or_else(|| Error::ParseError(format!("Malformed apt-config line: {:?}", line)))?;

    Ok(Some((key.to_string(), unquote(value).to_string())))
}

/// Remove one pair of matching outer `'` or `"` characters
fn unquote(value: &str) -> &str {
    let mut chars = value.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) if first == last && (first == '"' || first == '\'') => {
            &value[1..value.len() - 1]
        }
        // A lone quote character is both the first and the last one
        (Some('"' | '\''), None) => "",
        _ => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quoted_line() {
        let (key, value) = parse_dump_line("Dir::Cache \"/var/cache/apt/\";\n")
            .unwrap()
            .unwrap();
        assert_eq!(key, "Dir::Cache");
        assert_eq!(value, "/var/cache/apt/");
    }

    #[test]
    fn test_parse_unquoted_line() {
        let (key, value) = parse_dump_line("Dir::Cache::pkgcache pkgcache.bin;")
            .unwrap()
            .unwrap();
        assert_eq!(key, "Dir::Cache::pkgcache");
        assert_eq!(value, "pkgcache.bin");
    }

    #[test]
    fn test_parse_single_quotes() {
        let (_, value) = parse_dump_line("APT::Architecture 'arm64';").unwrap().unwrap();
        assert_eq!(value, "arm64");
    }

    #[test]
    fn test_mismatched_quotes_are_kept() {
        let (_, value) = parse_dump_line("Key \"value';").unwrap().unwrap();
        assert_eq!(value, "\"value'");
    }

    #[test]
    fn test_value_splits_on_first_space_only() {
        let (key, value) = parse_dump_line("Apt::Comment \"two words\";").unwrap().unwrap();
        assert_eq!(key, "Apt::Comment");
        assert_eq!(value, "two words");
    }

    #[test]
    fn test_only_one_semicolon_stripped() {
        let (_, value) = parse_dump_line("Key a;;").unwrap().unwrap();
        assert_eq!(value, "a;");
    }

    #[test]
    fn test_lone_quote_becomes_empty() {
        let (_, value) = parse_dump_line("Key \";").unwrap().unwrap();
        assert_eq!(value, "");
    }

    #[test]
    fn test_blank_line_skipped() {
        assert!(parse_dump_line("\n").unwrap().is_none());
        assert!(parse_dump_line("").unwrap().is_none());
    }

    #[test]
    fn test_line_without_separator_is_error() {
        assert!(matches!(
            parse_dump_line("garbage;\n"),
            Err(Error::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_dump_multiple_lines() {
        let text = "Dir \"/\";\nDir::Etc \"etc/apt/\";\n\nAPT::Architecture \"amd64\";\n";
        let vars = parse_dump(text).unwrap();
        assert_eq!(vars.len(), 3);
        assert_eq!(vars.get("Dir"), Some("/"));
        assert_eq!(vars.get("Dir::Etc"), Some("etc/apt/"));
        assert_eq!(vars.get("APT::Architecture"), Some("amd64"));
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let text = "Dir::Log \"var/log/apt/\";\nDir::Log \"srv/log/apt/\";\n";
        let vars = parse_dump(text).unwrap();
        assert_eq!(vars.len(), 1);
        assert_eq!(vars.get("Dir::Log"), Some("srv/log/apt/"));
    }

    #[test]
    fn test_static_map_is_a_source() {
        let vars: RawVariables = [("Dir::State", "var/lib/apt/")].into_iter().collect();
        let dumped = vars.dump(&["Dir::State"]).unwrap();
        assert_eq!(dumped, vars);
    }

    #[test]
    fn test_missing_apt_config_is_unavailable() {
        let source = AptConfigCommand::new("/nonexistent/aptshim-test/apt-config");
        assert!(matches!(
            source.dump(&["Dir::Etc"]),
            Err(Error::CommandUnavailable { .. })
        ));
    }

    #[test]
    fn test_failing_apt_config_reports_exit_status() {
        let source = AptConfigCommand::new("false");
        match source.dump(&["Dir::Etc"]) {
            Err(Error::CommandFailed { command, .. }) => {
                assert_eq!(command, "false dump Dir::Etc");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_apt_config_output_is_parse_error() {
        // printf echoes its format argument, "dump", with no separator
        let source = AptConfigCommand::new("printf");
        assert!(matches!(
            source.dump(&["Dir::Etc"]),
            Err(Error::ParseError(_))
        ));
    }

    #[test]
    fn test_default_program() {
        assert_eq!(AptConfigCommand::default().program(), Path::new("apt-config"));
    }
}
