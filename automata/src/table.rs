use std::collections::BTreeMap;

/// A two-way lookup table with ordered keys, so iteration is reproducible.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Table<T, U, V>
where
    T: Ord,
    U: Ord,
{
    map: BTreeMap<T, BTreeMap<U, V>>,
}

impl<T, U, V> Table<T, U, V>
where
    T: Ord,
    U: Ord,
{
    /// Create an empty table.
    #[inline]
    pub fn new() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }

    /// Set the value in the table with the given keys.
    #[inline]
    pub fn set(&mut self, row: T, col: U, val: V) -> Option<V> {
        self.map.entry(row).or_insert_with(BTreeMap::new).insert(col, val)
    }

    /// Set the value in the table with the given keys, or if some value already exists for those
    /// keys, execute the given callback.
    #[inline]
    pub fn set_or<F>(&mut self, row: T, col: U, val: V, or: F)
    where
        F: FnOnce(&mut V),
    {
        match self.get_mut(&row, &col) {
            Some(v) => or(v),
            None => {
                self.set(row, col, val);
            }
        };
    }

    /// Retrieve a mutable reference to the value in the table with the given keys.
    #[inline]
    pub fn get_mut(&mut self, row: &T, col: &U) -> Option<&mut V> {
        self.map.get_mut(row).and_then(|c| c.get_mut(col))
    }

    /// Retrieve an immutable reference to the value in the table with the given keys.
    #[inline]
    pub fn get(&self, row: &T, col: &U) -> Option<&V> {
        self.map.get(row).and_then(|c| c.get(col))
    }

    /// Retrieve an immutable reference to a row of values. Rows that were never set are empty.
    #[inline]
    pub fn get_row(&self, row: &T) -> impl Iterator<Item = (&U, &V)> {
        self.map.get(row).into_iter().flat_map(|c| c.iter())
    }

    /// Remove the value stored under the given keys, dropping the row if it becomes empty.
    #[inline]
    pub fn remove(&mut self, row: &T, col: &U) -> Option<V> {
        let c = self.map.get_mut(row)?;
        let removed = c.remove(col);
        if c.is_empty() {
            self.map.remove(row);
        }
        removed
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<T, U, V> Default for Table<T, U, V>
where
    T: Ord,
    U: Ord,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T, U, V> IntoIterator for &'a Table<T, U, V>
where
    T: Ord,
    U: Ord,
{
    type Item = (&'a T, &'a U, &'a V);
    type IntoIter = TableIterator<'a, T, U, V>;

    /// Produce an iterator on all the values in the table, ordered by row then column. See
    /// [TableIterator].
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        let vec: Vec<_> = self
            .map
            .iter()
            .flat_map(|(row, c)| c.iter().map(move |(col, val)| (row, col, val)))
            .collect();
        TableIterator(vec.into_iter())
    }
}

/// An iterator on the the values stored in the table. Each item is a tuple consisting of each
/// set of keys and value.
pub struct TableIterator<'a, T, U, V>(std::vec::IntoIter<(&'a T, &'a U, &'a V)>);

impl<'a, T, U, V> Iterator for TableIterator<'a, T, U, V> {
    type Item = (&'a T, &'a U, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
}

#[cfg(test)]
mod tests {
    use super::Table;

    #[test]
    fn test_set_or() {
        let mut t: Table<u8, char, Vec<u8>> = Table::new();
        t.set_or(0, 'a', vec![1], |v| v.push(1));
        t.set_or(0, 'a', vec![2], |v| v.push(2));

        assert_eq!(Some(&vec![1, 2]), t.get(&0, &'a'));
        assert_eq!(None, t.get(&0, &'b'));
    }

    #[test]
    fn test_iter_ordered() {
        let mut t: Table<u8, char, u8> = Table::new();
        t.set(2, 'b', 0);
        t.set(1, 'z', 0);
        t.set(1, 'a', 0);

        let keys: Vec<_> = t.into_iter().map(|(r, c, _)| (*r, *c)).collect();
        assert_eq!(vec![(1, 'a'), (1, 'z'), (2, 'b')], keys);
    }

    #[test]
    fn test_remove_drops_row() {
        let mut t: Table<u8, char, u8> = Table::new();
        t.set(1, 'a', 0);
        assert_eq!(Some(0), t.remove(&1, &'a'));
        assert!(t.is_empty());
        assert_eq!(0, t.get_row(&1).count());
    }
}
