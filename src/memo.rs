/// Single-entry cache for a derived value
///
/// Holds the most recent value together with the key it was computed from,
/// and recomputes only when asked for a different key. A store revision plus
/// the derivation's parameters makes a good key.
///
/// # Example
///
/// ```
/// use finance_tracker::memo::Memo;
///
/// let mut memo = Memo::new();
/// let mut calls = 0;
///
/// for _ in 0..3 {
///     memo.get_or_compute(1u64, || {
///         calls += 1;
///         "derived"
///     });
/// }
///
/// assert_eq!(calls, 1);
/// ```
#[derive(Debug, Clone)]
pub struct Memo<K, V> {
    entry: Option<(K, V)>,
}

impl<K: PartialEq, V> Memo<K, V> {
    pub fn new() -> Self {
        Self { entry: None }
    }

    /// Return the cached value for `key`, computing it first if needed
    pub fn get_or_compute<F>(&mut self, key: K, compute: F) -> &V
    where
        F: FnOnce() -> V,
    {
        let entry = match self.entry.take() {
            Some((cached, value)) if cached == key => (cached, value),
            _ => (key, compute()),
        };

        &self.entry.insert(entry).1
    }

    /// Drop the cached value
    pub fn clear(&mut self) {
        self.entry = None;
    }
}

impl<K: PartialEq, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recomputes_on_new_key() {
        let mut memo = Memo::new();
        let mut calls = 0;

        assert_eq!(
            *memo.get_or_compute(1, || {
                calls += 1;
                10
            }),
            10
        );
        assert_eq!(
            *memo.get_or_compute(2, || {
                calls += 1;
                20
            }),
            20
        );
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_clear_forces_recompute() {
        let mut memo = Memo::new();
        memo.get_or_compute("k", || 1);
        memo.clear();
        assert_eq!(*memo.get_or_compute("k", || 2), 2);
    }
}
