//! Utility functions and traits for `ElasticTable`

use crate::error::Result;
use crate::ElasticTable;

/// Extension trait providing owned snapshots of table contents
pub trait TableExtensions {
    /// Returns the keys of the table as owned byte vectors
    fn keys(&self) -> Vec<Vec<u8>>;

    /// Returns the values of the table as owned byte vectors
    fn values(&self) -> Vec<Vec<u8>>;

    /// Returns the live entries as owned (key, value) pairs
    fn entries(&self) -> Vec<(Vec<u8>, Vec<u8>)>;
}

impl TableExtensions for ElasticTable {
    fn keys(&self) -> Vec<Vec<u8>> {
        self.iter().map(|(key, _)| key.to_vec()).collect()
    }

    fn values(&self) -> Vec<Vec<u8>> {
        self.iter().map(|(_, value)| value.to_vec()).collect()
    }

    fn entries(&self) -> Vec<(Vec<u8>, Vec<u8>)> {
        self.iter().map(|(key, value)| (key.to_vec(), value.to_vec())).collect()
    }
}

/// Creates an `ElasticTable` from an iterator of byte-slice pairs
pub fn from_pairs<'a, I>(pairs: I) -> Result<ElasticTable>
where
    I: IntoIterator<Item = (&'a [u8], &'a [u8])>,
{
    let mut table = ElasticTable::new()?;
    for (key, value) in pairs {
        table.insert(key, value)?;
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs() {
        let data = [(&b"a"[..], &b"1"[..]), (&b"b"[..], &b"2"[..]), (&b"c"[..], &b"3"[..])];

        let table = from_pairs(data).unwrap();

        assert_eq!(table.get(b"a"), Some(&b"1"[..]));
        assert_eq!(table.get(b"b"), Some(&b"2"[..]));
        assert_eq!(table.get(b"c"), Some(&b"3"[..]));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_keys_and_values() {
        let mut table = ElasticTable::new().unwrap();
        table.insert(b"a", b"1").unwrap();
        table.insert(b"b", b"2").unwrap();
        table.insert(b"c", b"3").unwrap();

        let mut keys = table.keys();
        keys.sort();
        let mut values = table.values();
        values.sort();

        assert_eq!(keys, vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]);
        assert_eq!(values, vec![b"1".to_vec(), b"2".to_vec(), b"3".to_vec()]);
    }

    #[test]
    fn test_entries_match_iteration() {
        let mut table = ElasticTable::new().unwrap();
        table.insert(b"x", b"10").unwrap();
        table.insert(b"y", b"20").unwrap();
        table.remove(b"x");

        let entries = table.entries();
        assert_eq!(entries, vec![(b"y".to_vec(), b"20".to_vec())]);
    }
}
