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

//! Problem-specific solution records.
//!
//! A record is the projection of a search's best complete solution: the
//! decision vector in the shape the problem calls for plus the objective
//! value it achieves. How many solutions were examined is reported alongside
//! by the solvers, not stored here.

use crate::index::{CityIndex, ColumnIndex, ItemIndex, RowIndex};

/// Common view over every solution record.
pub trait SolutionRecord {
    type Value;

    /// The objective value the solution achieves.
    fn objective_value(&self) -> Self::Value;
}

/// A column for every row; `columns[r]` is the column given to row `r`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AssignmentSolution<T> {
    columns: Vec<ColumnIndex>,
    profit: T,
}

impl<T> AssignmentSolution<T>
where
    T: Copy,
{
    #[inline]
    pub fn new(columns: Vec<ColumnIndex>, profit: T) -> Self {
        Self { columns, profit }
    }

    #[inline]
    pub fn profit(&self) -> T {
        self.profit
    }

    #[inline]
    pub fn columns(&self) -> &[ColumnIndex] {
        &self.columns
    }

    #[inline]
    pub fn column_for(&self, row: RowIndex) -> ColumnIndex {
        self.columns[row.get()]
    }

    #[inline]
    pub fn num_rows(&self) -> usize {
        self.columns.len()
    }

    /// Whether every column in `0..num_rows` is used exactly once.
    pub fn is_permutation(&self) -> bool {
        let n = self.columns.len();
        let mut seen = vec![false; n];
        for c in &self.columns {
            let c = c.get();
            if c >= n || seen[c] {
                return false;
            }
            seen[c] = true;
        }
        true
    }
}

impl<T: Copy> SolutionRecord for AssignmentSolution<T> {
    type Value = T;

    #[inline]
    fn objective_value(&self) -> T {
        self.profit
    }
}

impl<T> std::fmt::Display for AssignmentSolution<T>
where
    T: Copy + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Assignment")?;
        writeln!(f, "   Total Profit: {}", self.profit)?;
        if self.columns.is_empty() {
            return writeln!(f, "   (No rows)");
        }
        writeln!(f, "   {:<10} | {:<10}", "Row", "Column")?;
        writeln!(f, "   {:-<10}-+-{:-<10}", "", "")?;
        for (r, c) in self.columns.iter().enumerate() {
            writeln!(f, "   {:<10} | {:<10}", r, c.get())?;
        }
        Ok(())
    }
}

/// The items put into the knapsack, in the order they were decided.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KnapsackSolution<T> {
    items: Vec<ItemIndex>,
    value: T,
    total_weight: T,
}

impl<T> KnapsackSolution<T>
where
    T: Copy,
{
    #[inline]
    pub fn new(items: Vec<ItemIndex>, value: T, total_weight: T) -> Self {
        Self {
            items,
            value,
            total_weight,
        }
    }

    #[inline]
    pub fn items(&self) -> &[ItemIndex] {
        &self.items
    }

    #[inline]
    pub fn value(&self) -> T {
        self.value
    }

    #[inline]
    pub fn total_weight(&self) -> T {
        self.total_weight
    }

    /// The selected items in ascending index order.
    pub fn sorted_items(&self) -> Vec<ItemIndex> {
        let mut items = self.items.clone();
        items.sort_unstable();
        items
    }
}

impl<T: Copy> SolutionRecord for KnapsackSolution<T> {
    type Value = T;

    #[inline]
    fn objective_value(&self) -> T {
        self.value
    }
}

impl<T> std::fmt::Display for KnapsackSolution<T>
where
    T: Copy + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Knapsack")?;
        writeln!(f, "   Total Value:  {}", self.value)?;
        writeln!(f, "   Total Weight: {}", self.total_weight)?;
        let items: Vec<String> = self.items.iter().map(|i| i.get().to_string()).collect();
        writeln!(f, "   Items:        [{}]", items.join(", "))
    }
}

/// A closed tour. The start city appears first and again last.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TourSolution<T> {
    cities: Vec<CityIndex>,
    cost: T,
}

impl<T> TourSolution<T>
where
    T: Copy,
{
    #[inline]
    pub fn new(cities: Vec<CityIndex>, cost: T) -> Self {
        debug_assert!(
            cities.len() >= 2 && cities.first() == cities.last(),
            "called `TourSolution::new` with a tour that is not closed"
        );
        Self { cities, cost }
    }

    #[inline]
    pub fn cities(&self) -> &[CityIndex] {
        &self.cities
    }

    #[inline]
    pub fn cost(&self) -> T {
        self.cost
    }

    /// The number of distinct cities on the tour.
    #[inline]
    pub fn num_cities(&self) -> usize {
        self.cities.len().saturating_sub(1)
    }

    /// Whether the tour starts and ends at `start` and visits each of the
    /// `num_cities` cities exactly once in between.
    pub fn is_hamiltonian_cycle(&self, num_cities: usize, start: CityIndex) -> bool {
        if self.cities.len() != num_cities + 1 {
            return false;
        }
        if self.cities.first() != Some(&start) || self.cities.last() != Some(&start) {
            return false;
        }
        let mut seen = vec![false; num_cities];
        for c in &self.cities[..num_cities] {
            let c = c.get();
            if c >= num_cities || seen[c] {
                return false;
            }
            seen[c] = true;
        }
        true
    }
}

impl<T: Copy> SolutionRecord for TourSolution<T> {
    type Value = T;

    #[inline]
    fn objective_value(&self) -> T {
        self.cost
    }
}

impl<T> std::fmt::Display for TourSolution<T>
where
    T: Copy + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Tour")?;
        writeln!(f, "   Total Cost: {}", self.cost)?;
        let path: Vec<String> = self.cities.iter().map(|c| c.get().to_string()).collect();
        writeln!(f, "   Path:       {}", path.join(" -> "))
    }
}

/// Units given to each column; `units[j]` belongs to column `j`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DistributionSolution<T> {
    units: Vec<usize>,
    gain: T,
}

impl<T> DistributionSolution<T>
where
    T: Copy,
{
    #[inline]
    pub fn new(units: Vec<usize>, gain: T) -> Self {
        Self { units, gain }
    }

    #[inline]
    pub fn units(&self) -> &[usize] {
        &self.units
    }

    #[inline]
    pub fn units_for(&self, column: ColumnIndex) -> usize {
        self.units[column.get()]
    }

    #[inline]
    pub fn gain(&self) -> T {
        self.gain
    }

    /// The number of units handed out in total.
    #[inline]
    pub fn total_units(&self) -> usize {
        self.units.iter().sum()
    }
}

impl<T: Copy> SolutionRecord for DistributionSolution<T> {
    type Value = T;

    #[inline]
    fn objective_value(&self) -> T {
        self.gain
    }
}

impl<T> std::fmt::Display for DistributionSolution<T>
where
    T: Copy + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Distribution")?;
        writeln!(f, "   Total Gain: {}", self.gain)?;
        if self.units.is_empty() {
            return writeln!(f, "   (No columns)");
        }
        writeln!(f, "   {:<10} | {:<10}", "Column", "Units")?;
        writeln!(f, "   {:-<10}-+-{:-<10}", "", "")?;
        for (j, u) in self.units.iter().enumerate() {
            writeln!(f, "   {:<10} | {:<10}", j, u)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(v: &[usize]) -> Vec<ColumnIndex> {
        v.iter().map(|&c| ColumnIndex::new(c)).collect()
    }

    fn cities(v: &[usize]) -> Vec<CityIndex> {
        v.iter().map(|&c| CityIndex::new(c)).collect()
    }

    #[test]
    fn test_assignment_permutation_check() {
        assert!(AssignmentSolution::new(cols(&[1, 2, 3, 0]), 310i64).is_permutation());
        assert!(!AssignmentSolution::new(cols(&[1, 1, 3, 0]), 0i64).is_permutation());
        assert!(!AssignmentSolution::new(cols(&[4, 1, 2, 0]), 0i64).is_permutation());
        assert!(AssignmentSolution::new(Vec::new(), 0i64).is_permutation());
    }

    #[test]
    fn test_assignment_display_contains_rows() {
        let s = AssignmentSolution::new(cols(&[1, 0]), 9i64);
        let out = format!("{}", s);
        assert!(out.contains("Total Profit: 9"));
        assert!(out.contains("Row"));
        assert_eq!(s.column_for(RowIndex::new(0)), ColumnIndex::new(1));
    }

    #[test]
    fn test_knapsack_sorted_items() {
        let s = KnapsackSolution::new(vec![ItemIndex::new(2), ItemIndex::new(1)], 220i64, 50);
        assert_eq!(s.sorted_items(), vec![ItemIndex::new(1), ItemIndex::new(2)]);
        assert_eq!(s.objective_value(), 220);
        assert!(format!("{}", s).contains("[2, 1]"));
    }

    #[test]
    fn test_tour_cycle_check() {
        let t = TourSolution::new(cities(&[0, 1, 3, 4, 2, 0]), 85i64);
        assert_eq!(t.num_cities(), 5);
        assert!(t.is_hamiltonian_cycle(5, CityIndex::new(0)));
        assert!(!t.is_hamiltonian_cycle(6, CityIndex::new(0)));

        let repeated = TourSolution::new(cities(&[0, 1, 1, 0]), 0i64);
        assert!(!repeated.is_hamiltonian_cycle(3, CityIndex::new(0)));

        let single = TourSolution::new(cities(&[0, 0]), 0i64);
        assert!(single.is_hamiltonian_cycle(1, CityIndex::new(0)));
        assert!(format!("{}", single).contains("0 -> 0"));
    }

    #[test]
    fn test_distribution_totals() {
        let d = DistributionSolution::new(vec![1, 2, 1], 170i64);
        assert_eq!(d.total_units(), 4);
        assert_eq!(d.units_for(ColumnIndex::new(1)), 2);
        assert_eq!(d.objective_value(), 170);
    }
}
