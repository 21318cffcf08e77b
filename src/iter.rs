//! Iterators over the zero-or-one values of an [`OptCell`].
//!
//! These behave like the iterators of [`Option`]: they yield exactly one item
//! if the cell holds a value and none otherwise, and they implement
//! [`DoubleEndedIterator`], [`ExactSizeIterator`], and [`FusedIterator`].

use core::iter::FusedIterator;

use crate::OptCell;

/// An iterator over the value of an [`OptCell`] by shared reference.
///
/// Produced by [`OptCell::iter`].
#[derive(Clone, Debug)]
pub struct Iter<'a, T> {
    inner: Option<&'a T>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(inner: Option<&'a T>) -> Self {
        Self { inner }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.take()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.take()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        if self.inner.is_some() {
            1
        } else {
            0
        }
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

/// An iterator over the value of an [`OptCell`] by mutable reference.
///
/// Produced by [`OptCell::iter_mut`].
#[derive(Debug)]
pub struct IterMut<'a, T> {
    inner: Option<&'a mut T>,
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(inner: Option<&'a mut T>) -> Self {
        Self { inner }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.take()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.take()
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {
    fn len(&self) -> usize {
        if self.inner.is_some() {
            1
        } else {
            0
        }
    }
}

impl<T> FusedIterator for IterMut<'_, T> {}

/// An iterator over the value of an [`OptCell`] by value.
///
/// Produced by the [`IntoIterator`] implementation of [`OptCell`].
#[derive(Debug)]
pub struct IntoIter<T> {
    inner: Option<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(inner: Option<T>) -> Self {
        Self { inner }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.take()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.take()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        if self.inner.is_some() {
            1
        } else {
            0
        }
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for OptCell<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.into_inner())
    }
}

impl<'a, T> IntoIterator for &'a OptCell<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut OptCell<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holding_cell_yields_once() {
        let cell = OptCell::new(5);
        let mut iter = cell.iter();
        assert_eq!(iter.len(), 1);
        assert_eq!(iter.next(), Some(&5));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.len(), 0);
    }

    #[test]
    fn empty_cell_yields_nothing() {
        let cell: OptCell<u32> = OptCell::empty();
        let mut iter = cell.iter();
        assert_eq!(iter.size_hint(), (0, Some(0)));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn iter_mut_allows_mutation() {
        let mut cell = OptCell::new(5);
        for value in &mut cell {
            *value += 1;
        }
        assert_eq!(cell.get(), Some(&6));
    }

    #[test]
    fn into_iter_moves_the_value() {
        let cell = OptCell::new(String::from("hello"));
        let collected: Vec<String> = cell.into_iter().collect();
        assert_eq!(collected, vec![String::from("hello")]);
    }

    #[test]
    fn back_and_front_agree() {
        let cell = OptCell::new(5);
        let mut iter = cell.iter();
        assert_eq!(iter.next_back(), Some(&5));
        assert_eq!(iter.next_back(), None);
        assert_eq!(iter.next(), None);
    }
}
