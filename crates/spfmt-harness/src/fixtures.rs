//! Fixture loading and management.
//!
//! Arguments are written as `kind:value` strings both in fixture JSON and on
//! the command line:
//!
//! | kind  | value                          |
//! |-------|--------------------------------|
//! | `i`   | signed 64-bit integer          |
//! | `u`   | unsigned 64-bit integer        |
//! | `f`   | `f64` (`nan`, `inf`, `-inf` ok) |
//! | `f32` | `f32`                          |
//! | `b`   | `true` / `false`               |
//! | `c`   | exactly one character          |
//! | `s`   | the rest of the string, verbatim |
//! | `p`   | address, decimal or `0x` hex   |

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use spfmt_core::Argument;

use crate::error::HarnessError;

/// One typed argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FixtureArg {
    Signed(i64),
    Unsigned(u64),
    F64(f64),
    F32(f32),
    Bool(bool),
    Char(char),
    Str(String),
    Pointer(usize),
}

impl FixtureArg {
    /// Borrow as an engine argument.
    #[must_use]
    pub fn as_argument(&self) -> Argument<'_> {
        match self {
            FixtureArg::Signed(v) => Argument::Signed(*v),
            FixtureArg::Unsigned(v) => Argument::Unsigned(*v),
            FixtureArg::F64(v) => Argument::F64(*v),
            FixtureArg::F32(v) => Argument::F32(*v),
            FixtureArg::Bool(v) => Argument::Bool(*v),
            FixtureArg::Char(v) => Argument::from(*v),
            FixtureArg::Str(v) => Argument::Str(v.as_bytes()),
            FixtureArg::Pointer(v) => Argument::Pointer(*v),
        }
    }
}

fn invalid(spec: &str, reason: impl Into<String>) -> HarnessError {
    HarnessError::InvalidArgument {
        spec: spec.to_string(),
        reason: reason.into(),
    }
}

impl FromStr for FixtureArg {
    type Err = HarnessError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let (kind, value) = spec
            .split_once(':')
            .ok_or_else(|| invalid(spec, "expected <kind>:<value>"))?;
        let parsed = match kind {
            "i" => value.trim().parse().map(FixtureArg::Signed).map_err(|e| e.to_string()),
            "u" => value.trim().parse().map(FixtureArg::Unsigned).map_err(|e| e.to_string()),
            "f" => value.trim().parse().map(FixtureArg::F64).map_err(|e| e.to_string()),
            "f32" => value.trim().parse().map(FixtureArg::F32).map_err(|e| e.to_string()),
            "b" => value.trim().parse().map(FixtureArg::Bool).map_err(|e| e.to_string()),
            "c" => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(FixtureArg::Char(c)),
                    _ => Err(String::from("expected exactly one character")),
                }
            }
            "s" => Ok(FixtureArg::Str(value.to_string())),
            "p" => parse_address(value.trim()).map(FixtureArg::Pointer),
            other => Err(format!("unknown kind '{other}'")),
        };
        parsed.map_err(|reason| invalid(spec, reason))
    }
}

fn parse_address(raw: &str) -> Result<usize, String> {
    let digits = raw.replace('_', "");
    let parsed = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        usize::from_str_radix(hex, 16)
    } else {
        digits.parse::<usize>()
    };
    parsed.map_err(|e| e.to_string())
}

impl fmt::Display for FixtureArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixtureArg::Signed(v) => write!(f, "i:{v}"),
            FixtureArg::Unsigned(v) => write!(f, "u:{v}"),
            FixtureArg::F64(v) => write!(f, "f:{v}"),
            FixtureArg::F32(v) => write!(f, "f32:{v}"),
            FixtureArg::Bool(v) => write!(f, "b:{v}"),
            FixtureArg::Char(v) => write!(f, "c:{v}"),
            FixtureArg::Str(v) => write!(f, "s:{v}"),
            FixtureArg::Pointer(v) => write!(f, "p:{v:#x}"),
        }
    }
}

impl TryFrom<String> for FixtureArg {
    type Error = HarnessError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FixtureArg> for String {
    fn from(arg: FixtureArg) -> Self {
        arg.to_string()
    }
}

/// A single fixture test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Case identifier.
    pub name: String,
    /// Behavior area the case covers (e.g. `integer`, `nested`).
    pub section: String,
    pub template: String,
    #[serde(default)]
    pub args: Vec<FixtureArg>,
    /// Expected output (the stored prefix when `buffer_size` is set).
    pub expected_output: String,
    /// Expected logical length; defaults to the length of `expected_output`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_len: Option<usize>,
    /// Format into a fixed buffer of this many bytes instead of a vector.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer_size: Option<usize>,
}

impl FixtureCase {
    /// Engine arguments borrowed from this case.
    #[must_use]
    pub fn arguments(&self) -> Vec<Argument<'_>> {
        self.args.iter().map(FixtureArg::as_argument).collect()
    }

    /// Logical length the case expects.
    #[must_use]
    pub fn expected_len(&self) -> usize {
        self.expected_len.unwrap_or(self.expected_output.len())
    }
}

/// A collection of fixture cases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Schema version.
    pub version: String,
    /// Area name.
    pub family: String,
    /// UTC timestamp of capture.
    pub captured_at: String,
    /// Individual test cases.
    pub cases: Vec<FixtureCase>,
}

impl FixtureSet {
    /// Load fixture set from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize fixture set to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load fixture set from a file path.
    pub fn from_file(path: &Path) -> Result<Self, HarnessError> {
        let content = std::fs::read_to_string(path)?;
        let set = Self::from_json(&content)?;
        Ok(set)
    }
}

/// `*.json` files in `dir`, sorted by name.
pub fn fixture_paths(dir: &Path) -> Result<Vec<PathBuf>, HarnessError> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    paths.sort();
    Ok(paths)
}
