//! Set reconciliation for set-valued attributes such as hostname lists

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// How a caller-supplied set combines with the current remote set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Discard the current set entirely
    #[default]
    Replace,
    /// Union of current and given
    Append,
    /// Current minus given
    Remove,
}

impl Mode {
    pub const VARIANTS: [&'static str; 3] = ["REPLACE", "APPEND", "REMOVE"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Replace => "REPLACE",
            Mode::Append => "APPEND",
            Mode::Remove => "REMOVE",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "REPLACE" => Ok(Mode::Replace),
            "APPEND" => Ok(Mode::Append),
            "REMOVE" => Ok(Mode::Remove),
            _ => Err(format!(
                "Invalid mode '{}', expected one of: {}",
                s,
                Mode::VARIANTS.join(", ")
            )),
        }
    }
}

/// Compute the set to write upstream
///
/// `current` must be freshly fetched from the remote object.
pub fn reconcile(current: &BTreeSet<String>, given: &BTreeSet<String>, mode: Mode) -> BTreeSet<String> {
    match mode {
        Mode::Replace => given.clone(),
        Mode::Append => current.union(given).cloned().collect(),
        Mode::Remove => current.difference(given).cloned().collect(),
    }
}
