use crate::error::StoreError;

/// What [`NameTable::translate`] returns for a value outside the table.
pub const INVALID_NAME: &str = "INVALID_ENUM_VALUE";

/// A closed, immutable mapping from uppercased names to 1-based values.
///
/// Once built, a table cannot grow or change; it only answers lookups in
/// both directions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameTable {
    names: Vec<String>,
}

impl NameTable {
    pub fn new<S: AsRef<str>>(names: &[S]) -> Result<Self, StoreError> {
        if names.is_empty() {
            return Err(StoreError::EmptyNameList);
        }
        let mut out = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            if name.is_empty() {
                return Err(StoreError::EmptyName);
            }
            out.push(name.to_uppercase());
        }
        Ok(Self { names: out })
    }

    pub(crate) fn from_validated(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Smallest valid value; always 1.
    pub fn min(&self) -> i64 {
        1
    }

    /// Largest valid value; equals the number of names.
    pub fn max(&self) -> i64 {
        self.names.len() as i64
    }

    /// Name for a value, or [`INVALID_NAME`] when out of range.
    pub fn translate(&self, value: i64) -> &str {
        if value < self.min() || value > self.max() {
            return INVALID_NAME;
        }
        &self.names[(value - 1) as usize]
    }

    /// Value for a name as produced by [`Self::translate`]; -1 on a miss.
    pub fn lookup(&self, name: &str) -> i64 {
        if name.is_empty() {
            return -1;
        }
        match self.names.iter().position(|n| n == name) {
            Some(index) => (index + 1) as i64,
            None => -1,
        }
    }
}
