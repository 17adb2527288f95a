// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! 0/1 knapsack: choose a subset of items whose total weight fits the
//! capacity, maximizing the total value.

use crate::{error::ModelError, index::ItemIndex};
use bramble_core::num::{compare_ratios, SolverNumeric};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Parallel weight and value arrays plus a capacity.
///
/// Weights are strictly positive and values non-negative, so the
/// value-to-weight ratio of every item is well defined and the fractional
/// relaxation is a valid upper bound.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawKnapsackProblem<T>", into = "RawKnapsackProblem<T>")]
#[serde(bound(
    serialize = "T: SolverNumeric + Serialize",
    deserialize = "T: SolverNumeric + Deserialize<'de>"
))]
pub struct KnapsackProblem<T> {
    weights: Vec<T>,
    values: Vec<T>,
    capacity: T,
}

impl<T> KnapsackProblem<T>
where
    T: SolverNumeric,
{
    pub fn new(weights: Vec<T>, values: Vec<T>, capacity: T) -> Result<Self, ModelError> {
        if weights.len() != values.len() {
            return Err(ModelError::LengthMismatch {
                what: "values",
                expected: weights.len(),
                found: values.len(),
            });
        }
        if capacity < T::zero() {
            return Err(ModelError::NegativeCapacity);
        }
        if let Some(item) = weights.iter().position(|w| *w <= T::zero()) {
            return Err(ModelError::NonPositiveWeight { item });
        }
        if let Some(item) = values.iter().position(|v| *v < T::zero()) {
            return Err(ModelError::NegativeValue { item });
        }
        Ok(Self {
            weights,
            values,
            capacity,
        })
    }

    #[inline]
    pub fn num_items(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn capacity(&self) -> T {
        self.capacity
    }

    #[inline]
    pub fn weight(&self, item: ItemIndex) -> T {
        self.weights[item.get()]
    }

    #[inline]
    pub fn value(&self, item: ItemIndex) -> T {
        self.values[item.get()]
    }

    #[inline]
    pub fn weights(&self) -> &[T] {
        &self.weights
    }

    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Orders two items by value-to-weight ratio. The comparison is exact
    /// for every value range.
    #[inline]
    pub fn compare_ratio(&self, a: ItemIndex, b: ItemIndex) -> Ordering {
        compare_ratios(self.value(a), self.weight(a), self.value(b), self.weight(b))
    }

    /// Items sorted by value-to-weight ratio, best first. Items with equal
    /// ratio keep their index order.
    pub fn ratio_order(&self) -> Vec<ItemIndex> {
        let mut order: Vec<ItemIndex> = ItemIndex::range(self.num_items()).collect();
        order.sort_by(|a, b| self.compare_ratio(*b, *a));
        order
    }

    /// Sum of the weights of the given items.
    pub fn total_weight<'a, I>(&self, items: I) -> T
    where
        I: IntoIterator<Item = &'a ItemIndex>,
    {
        items
            .into_iter()
            .fold(T::zero(), |acc, i| acc.saturating_add(self.weight(*i)))
    }
}

#[derive(Clone, Serialize, Deserialize)]
struct RawKnapsackProblem<T> {
    weights: Vec<T>,
    values: Vec<T>,
    capacity: T,
}

impl<T> TryFrom<RawKnapsackProblem<T>> for KnapsackProblem<T>
where
    T: SolverNumeric,
{
    type Error = ModelError;

    fn try_from(raw: RawKnapsackProblem<T>) -> Result<Self, Self::Error> {
        Self::new(raw.weights, raw.values, raw.capacity)
    }
}

impl<T> From<KnapsackProblem<T>> for RawKnapsackProblem<T> {
    fn from(problem: KnapsackProblem<T>) -> Self {
        Self {
            weights: problem.weights,
            values: problem.values,
            capacity: problem.capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo() -> KnapsackProblem<i64> {
        KnapsackProblem::new(vec![10, 20, 30, 40], vec![60, 100, 120, 80], 50).unwrap()
    }

    #[test]
    fn test_accessors() {
        let p = demo();
        assert_eq!(p.num_items(), 4);
        assert_eq!(p.capacity(), 50);
        assert_eq!(p.weight(ItemIndex::new(2)), 30);
        assert_eq!(p.value(ItemIndex::new(3)), 80);
    }

    #[test]
    fn test_ratio_order_is_descending_and_stable() {
        let p = demo();
        let order: Vec<usize> = p.ratio_order().iter().map(|i| i.get()).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);

        let tied = KnapsackProblem::new(vec![2i64, 1, 4], vec![4, 1, 8], 5).unwrap();
        let order: Vec<usize> = tied.ratio_order().iter().map(|i| i.get()).collect();
        assert_eq!(order, vec![0, 2, 1]);
    }

    #[test]
    fn test_ratio_order_is_exact_for_large_values() {
        // 2^60 + 1 and 2^60 share one f64, the integer ratios differ.
        let big = (1i64 << 60) + 1;
        let p = KnapsackProblem::new(vec![8i64, 8], vec![big - 1, big], 8).unwrap();
        let order: Vec<usize> = p.ratio_order().iter().map(|i| i.get()).collect();
        assert_eq!(order, vec![1, 0]);
        assert_eq!(
            p.compare_ratio(ItemIndex::new(1), ItemIndex::new(0)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_validation_errors() {
        assert_eq!(
            KnapsackProblem::new(vec![1i64, 2], vec![1], 3).unwrap_err(),
            ModelError::LengthMismatch {
                what: "values",
                expected: 2,
                found: 1
            }
        );
        assert_eq!(
            KnapsackProblem::new(vec![1i64], vec![1], -1).unwrap_err(),
            ModelError::NegativeCapacity
        );
        assert_eq!(
            KnapsackProblem::new(vec![1i64, 0], vec![1, 1], 3).unwrap_err(),
            ModelError::NonPositiveWeight { item: 1 }
        );
        assert_eq!(
            KnapsackProblem::new(vec![1i64, 1], vec![-1, 1], 3).unwrap_err(),
            ModelError::NegativeValue { item: 0 }
        );
    }

    #[test]
    fn test_empty_instance_is_valid() {
        let p = KnapsackProblem::<i64>::new(Vec::new(), Vec::new(), 0).unwrap();
        assert_eq!(p.num_items(), 0);
        assert!(p.ratio_order().is_empty());
    }

    #[test]
    fn test_total_weight() {
        let p = demo();
        let items = [ItemIndex::new(1), ItemIndex::new(2)];
        assert_eq!(p.total_weight(&items), 50);
    }

    #[test]
    fn test_deserialize_validates() {
        let p: KnapsackProblem<i64> =
            toml::from_str("weights = [1, 2]\nvalues = [3, 4]\ncapacity = 2").unwrap();
        assert_eq!(p.num_items(), 2);
        assert!(
            toml::from_str::<KnapsackProblem<i64>>("weights = [1]\nvalues = [3]\ncapacity = -2")
                .is_err()
        );
    }
}
