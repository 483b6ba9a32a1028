//! Ordered result tables keyed by [`Greek`].
//!
//! A table holds one column per Greek, each aligned row-for-row with the
//! spot vector that produced it. Column order is insertion order, which keeps
//! merged output deterministic when several instruments are combined.

use super::error::TableError;
use super::greek::Greek;

/// Point estimates per Greek.
///
/// Merging two tables with [`accumulate`](GreekTable::accumulate) sums
/// columns that share a key, so a straddle's price column is the call
/// column plus the put column.
///
/// # Examples
/// ```
/// use pricer_core::types::{Greek, GreekTable};
///
/// let mut call = GreekTable::new(2);
/// call.insert(Greek::Price, vec![1.0, 2.0]).unwrap();
/// let mut put = GreekTable::new(2);
/// put.insert(Greek::Price, vec![0.5, 0.25]).unwrap();
///
/// call.accumulate(&put).unwrap();
/// assert_eq!(call.get(Greek::Price), Some(&[1.5, 2.25][..]));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GreekTable {
    rows: usize,
    columns: Vec<(Greek, Vec<f64>)>,
}

impl GreekTable {
    /// Creates an empty table whose columns will hold `rows` values.
    pub fn new(rows: usize) -> Self {
        Self {
            rows,
            columns: Vec::new(),
        }
    }

    /// Number of values in each column.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True when no column has been inserted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Inserts a column, replacing an existing one with the same key in place.
    ///
    /// # Errors
    /// [`TableError::RowMismatch`] if `values` does not have [`rows`](Self::rows) entries.
    pub fn insert(&mut self, greek: Greek, values: Vec<f64>) -> Result<(), TableError> {
        check_rows(self.rows, values.len())?;
        match self.columns.iter_mut().find(|(g, _)| *g == greek) {
            Some((_, existing)) => *existing = values,
            None => self.columns.push((greek, values)),
        }
        Ok(())
    }

    /// Column for `greek`, if present.
    pub fn get(&self, greek: Greek) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(g, _)| *g == greek)
            .map(|(_, v)| v.as_slice())
    }

    /// True if a column for `greek` exists.
    pub fn contains(&self, greek: Greek) -> bool {
        self.columns.iter().any(|(g, _)| *g == greek)
    }

    /// Column keys in order.
    pub fn greeks(&self) -> impl Iterator<Item = Greek> + '_ {
        self.columns.iter().map(|(g, _)| *g)
    }

    /// Columns in order.
    pub fn columns(&self) -> impl Iterator<Item = (Greek, &[f64])> + '_ {
        self.columns.iter().map(|(g, v)| (*g, v.as_slice()))
    }

    /// Adds `other` into `self` column by column.
    ///
    /// Shared keys are summed element-wise; keys only present in `other` are
    /// appended after the existing columns.
    ///
    /// # Errors
    /// [`TableError::RowMismatch`] if the row counts differ. `self` is left
    /// untouched in that case.
    pub fn accumulate(&mut self, other: &GreekTable) -> Result<(), TableError> {
        check_rows(self.rows, other.rows)?;
        for (greek, values) in &other.columns {
            match self.columns.iter_mut().find(|(g, _)| g == greek) {
                Some((_, existing)) => {
                    for (acc, v) in existing.iter_mut().zip(values) {
                        *acc += v;
                    }
                }
                None => self.columns.push((*greek, values.clone())),
            }
        }
        Ok(())
    }
}

/// Standard deviations per Greek, labelled `<Name>STD`.
///
/// Dispersion of independently priced instruments cannot be combined by
/// addition, so [`absorb`](DispersionTable::absorb) marks any key seen twice
/// as undefined (`None`).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DispersionTable {
    rows: usize,
    columns: Vec<(Greek, Option<Vec<f64>>)>,
}

impl DispersionTable {
    /// Creates an empty table whose columns will hold `rows` values.
    pub fn new(rows: usize) -> Self {
        Self {
            rows,
            columns: Vec::new(),
        }
    }

    /// Number of values in each defined column.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns, defined or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True when no column has been inserted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Label of the column holding the dispersion of `greek`.
    pub fn column_name(greek: Greek) -> &'static str {
        greek.std_name()
    }

    /// Inserts a defined column, replacing an existing one in place.
    ///
    /// # Errors
    /// [`TableError::RowMismatch`] if `values` does not have [`rows`](Self::rows) entries.
    pub fn insert(&mut self, greek: Greek, values: Vec<f64>) -> Result<(), TableError> {
        check_rows(self.rows, values.len())?;
        match self.columns.iter_mut().find(|(g, _)| *g == greek) {
            Some((_, existing)) => *existing = Some(values),
            None => self.columns.push((greek, Some(values))),
        }
        Ok(())
    }

    /// Column for `greek`, or `None` if it is absent or undefined.
    pub fn get(&self, greek: Greek) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(g, _)| *g == greek)
            .and_then(|(_, v)| v.as_deref())
    }

    /// True if a column for `greek` exists, defined or not.
    pub fn contains(&self, greek: Greek) -> bool {
        self.columns.iter().any(|(g, _)| *g == greek)
    }

    /// True if a column for `greek` exists but holds no values.
    pub fn is_undefined(&self, greek: Greek) -> bool {
        self.columns
            .iter()
            .any(|(g, v)| *g == greek && v.is_none())
    }

    /// Column keys in order.
    pub fn greeks(&self) -> impl Iterator<Item = Greek> + '_ {
        self.columns.iter().map(|(g, _)| *g)
    }

    /// Columns in order; undefined columns yield `None`.
    pub fn columns(&self) -> impl Iterator<Item = (Greek, Option<&[f64]>)> + '_ {
        self.columns.iter().map(|(g, v)| (*g, v.as_deref()))
    }

    /// Merges `other` into `self`.
    ///
    /// A key already present in `self` becomes undefined; keys only present
    /// in `other` are appended as they are.
    ///
    /// # Errors
    /// [`TableError::RowMismatch`] if the row counts differ.
    pub fn absorb(&mut self, other: &DispersionTable) -> Result<(), TableError> {
        check_rows(self.rows, other.rows)?;
        for (greek, values) in &other.columns {
            match self.columns.iter_mut().find(|(g, _)| g == greek) {
                Some((_, existing)) => *existing = None,
                None => self.columns.push((*greek, values.clone())),
            }
        }
        Ok(())
    }
}

fn check_rows(expected: usize, found: usize) -> Result<(), TableError> {
    if expected == found {
        Ok(())
    } else {
        Err(TableError::RowMismatch { expected, found })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(cols: &[(Greek, [f64; 2])]) -> GreekTable {
        let mut t = GreekTable::new(2);
        for (g, v) in cols {
            t.insert(*g, v.to_vec()).unwrap();
        }
        t
    }

    #[test]
    fn test_insert_rejects_wrong_length() {
        let mut t = GreekTable::new(3);
        let err = t.insert(Greek::Price, vec![1.0]).unwrap_err();
        assert_eq!(err, TableError::RowMismatch { expected: 3, found: 1 });
        assert!(t.is_empty());
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut t = table(&[(Greek::Price, [1.0, 2.0]), (Greek::Delta, [0.1, 0.2])]);
        t.insert(Greek::Price, vec![3.0, 4.0]).unwrap();
        let order: Vec<_> = t.greeks().collect();
        assert_eq!(order, vec![Greek::Price, Greek::Delta]);
        assert_eq!(t.get(Greek::Price), Some(&[3.0, 4.0][..]));
    }

    #[test]
    fn test_accumulate_sums_shared_and_appends_new() {
        let mut a = table(&[(Greek::Price, [1.0, 2.0]), (Greek::Delta, [0.5, 0.5])]);
        let b = table(&[(Greek::Price, [10.0, 20.0]), (Greek::Vega, [0.3, 0.4])]);
        a.accumulate(&b).unwrap();

        assert_eq!(a.get(Greek::Price), Some(&[11.0, 22.0][..]));
        assert_eq!(a.get(Greek::Delta), Some(&[0.5, 0.5][..]));
        assert_eq!(a.get(Greek::Vega), Some(&[0.3, 0.4][..]));
        let order: Vec<_> = a.greeks().collect();
        assert_eq!(order, vec![Greek::Price, Greek::Delta, Greek::Vega]);
    }

    #[test]
    fn test_accumulate_into_empty_copies() {
        let mut acc = GreekTable::new(2);
        let b = table(&[(Greek::Gamma, [1.0, 1.5])]);
        acc.accumulate(&b).unwrap();
        assert_eq!(acc, b);
    }

    #[test]
    fn test_accumulate_row_mismatch_leaves_table_untouched() {
        let mut a = table(&[(Greek::Price, [1.0, 2.0])]);
        let before = a.clone();
        let b = GreekTable::new(5);
        assert!(a.accumulate(&b).is_err());
        assert_eq!(a, before);
    }

    #[test]
    fn test_absorb_marks_repeated_keys_undefined() {
        let mut a = DispersionTable::new(2);
        a.insert(Greek::Price, vec![0.1, 0.2]).unwrap();
        let mut b = DispersionTable::new(2);
        b.insert(Greek::Price, vec![0.3, 0.4]).unwrap();
        b.insert(Greek::Rho, vec![0.5, 0.6]).unwrap();

        a.absorb(&b).unwrap();
        assert!(a.contains(Greek::Price));
        assert!(a.is_undefined(Greek::Price));
        assert_eq!(a.get(Greek::Price), None);
        assert_eq!(a.get(Greek::Rho), Some(&[0.5, 0.6][..]));
        assert!(!a.is_undefined(Greek::Rho));
    }

    #[test]
    fn test_absorb_into_empty_keeps_values() {
        let mut acc = DispersionTable::new(2);
        let mut b = DispersionTable::new(2);
        b.insert(Greek::Delta, vec![1.0, 2.0]).unwrap();
        acc.absorb(&b).unwrap();
        assert_eq!(acc, b);
    }

    #[test]
    fn test_column_name() {
        assert_eq!(DispersionTable::column_name(Greek::Theta), "ThetaSTD");
    }
}
