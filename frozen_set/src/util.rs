/// Moves `items` into the order given by `permutation`, where `permutation[dest]` is the source
/// index of the item that ends up at `dest`.
pub fn permute<T>(items: Vec<T>, permutation: &[usize]) -> Vec<T> {
    debug_assert_eq!(items.len(), permutation.len());
    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    permutation
        .iter()
        .map(|&src| {
            slots[src]
                .take()
                .expect("permutation must visit every index exactly once")
        })
        .collect()
}

macro_rules! impl_iterator {
    () => {
        impl_iterator!(|x| x);
    };
    ($f: expr) => {
        fn next(&mut self) -> Option<Self::Item> {
            self.inner.next().map($f)
        }
        fn size_hint(&self) -> (usize, Option<usize>) {
            self.inner.size_hint()
        }
        fn count(self) -> usize {
            self.inner.count()
        }
        fn nth(&mut self, n: usize) -> Option<Self::Item> {
            self.inner.nth(n).map($f)
        }
        fn last(self) -> Option<Self::Item> {
            self.inner.last().map($f)
        }
    };
}
pub(crate) use impl_iterator;

#[cfg(test)]
mod tests {
    use super::permute;

    #[test]
    fn permute_moves_without_clone() {
        let items = vec![Box::new('a'), Box::new('b'), Box::new('c'), Box::new('d')];
        let permuted = permute(items, &[2, 0, 3, 1]);
        let chars: Vec<char> = permuted.into_iter().map(|b| *b).collect();
        assert_eq!(chars, ['c', 'a', 'd', 'b']);
    }

    #[test]
    #[should_panic]
    fn permute_rejects_repeated_index() {
        permute(vec![1, 2, 3], &[0, 0, 1]);
    }
}
