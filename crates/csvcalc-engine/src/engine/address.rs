//! Cell addresses.
//!
//! An address is a column name followed by a row label (e.g. `A` + `1` →
//! `"A1"`, `AB` + `007` → `"AB007"`). The engine treats it as an opaque key;
//! the only structure it relies on is the concatenation rule used when a
//! table enumerates its grid.
//!
//! # Examples
//!
//! ```
//! use csvcalc_engine::CellAddress;
//!
//! let addr = CellAddress::new("B", "3");
//! assert_eq!(addr.as_str(), "B3");
//! assert_eq!("B3".parse::<CellAddress>().unwrap(), addr);
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::sync::OnceLock;

/// A cell address such as `A1`.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellAddress(String);

impl CellAddress {
    /// Build an address from a column name and a row label.
    pub fn new(column: &str, row: &str) -> CellAddress {
        let mut addr = String::with_capacity(column.len() + row.len());
        addr.push_str(column);
        addr.push_str(row);
        CellAddress(addr)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into `(column, row)`. Returns None if the text is not letters then digits.
    pub fn split(&self) -> Option<(&str, &str)> {
        let caps = address_re().captures(&self.0)?;
        let column = caps.name("column")?.as_str();
        let row = caps.name("row")?.as_str();
        Some((column, row))
    }
}

fn address_re() -> &'static Regex {
    static ADDRESS_RE: OnceLock<Regex> = OnceLock::new();
    ADDRESS_RE.get_or_init(|| {
        Regex::new(r"^(?<column>[A-Za-z]+)(?<row>[0-9]+)$").expect("cell address regex must compile")
    })
}

impl std::str::FromStr for CellAddress {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if address_re().is_match(s) {
            Ok(CellAddress(s.to_string()))
        } else {
            Err(format!("Invalid cell address: {}", s))
        }
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for CellAddress {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CellAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<CellAddress> for String {
    fn from(addr: CellAddress) -> String {
        addr.0
    }
}
