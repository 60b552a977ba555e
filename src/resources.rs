//! Resource vectors: the componentwise quantities carried and bounded along a path.
//!
//! Index `0` is always the critical resource (strictly monotone along any path); the rest are
//! ordinary resources only constrained to stay within `[min, max]`.

use std::ops::Index;

/// A fixed-length vector of resource quantities.
///
/// Cloning is `O(R)`; `R` (the resource dimension) is small in practice (time windows, load,
/// a handful of side constraints), so a plain `Vec<f64>` outperforms anything fancier.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceVector(Vec<f64>);

impl ResourceVector {
    /// Builds a vector from explicit component values.
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// A vector of `dims` zeros.
    pub fn zero(dims: usize) -> Self {
        Self(vec![0.0; dims])
    }

    pub fn dims(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// The critical (index `0`) component.
    pub fn critical(&self) -> f64 {
        self.0[0]
    }

    /// `self <= other` componentwise.
    pub fn le(&self, other: &Self) -> bool {
        debug_assert_eq!(self.0.len(), other.0.len());
        self.0.iter().zip(&other.0).all(|(a, b)| a <= b)
    }

    /// `self >= other` componentwise.
    pub fn ge(&self, other: &Self) -> bool {
        debug_assert_eq!(self.0.len(), other.0.len());
        self.0.iter().zip(&other.0).all(|(a, b)| a >= b)
    }

    /// `min <= self <= max` componentwise.
    pub fn within_bounds(&self, min: &Self, max: &Self) -> bool {
        self.ge(min) && self.le(max)
    }

    /// `self + other`, componentwise.
    pub fn add(&self, other: &Self) -> Self {
        debug_assert_eq!(self.0.len(), other.0.len());
        Self(
            self.0
                .iter()
                .zip(&other.0)
                .map(|(a, b)| a + b)
                .collect(),
        )
    }

    /// `self - other`, componentwise.
    pub fn sub(&self, other: &Self) -> Self {
        debug_assert_eq!(self.0.len(), other.0.len());
        Self(
            self.0
                .iter()
                .zip(&other.0)
                .map(|(a, b)| a - b)
                .collect(),
        )
    }

    /// Pareto dominance: `self` dominates `other` if it is no worse in every component and
    /// strictly better in at least one. Used only where a caller wants raw Pareto comparison
    /// outside the labeling dominance rule (which also folds in cost).
    pub fn dominates(&self, other: &Self) -> bool {
        self.le(other) && self.0 != other.0
    }
}

impl Index<usize> for ResourceVector {
    type Output = f64;

    fn index(&self, idx: usize) -> &f64 {
        &self.0[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::ResourceVector;

    #[test]
    fn bounds_are_inclusive() {
        let min = ResourceVector::new(vec![1.0, 0.0]);
        let max = ResourceVector::new(vec![4.0, 20.0]);
        assert!(min.within_bounds(&min, &max));
        assert!(max.within_bounds(&min, &max));
    }

    #[test]
    fn add_then_sub_is_identity() {
        let a = ResourceVector::new(vec![1.0, 2.0, 3.0]);
        let b = ResourceVector::new(vec![0.5, -1.0, 2.0]);
        assert_eq!(a.add(&b).sub(&b), a);
    }

    #[test]
    fn dominates_requires_strict_improvement() {
        let a = ResourceVector::new(vec![1.0, 2.0]);
        let b = ResourceVector::new(vec![1.0, 2.0]);
        assert!(!a.dominates(&b));
        let c = ResourceVector::new(vec![1.0, 1.0]);
        assert!(c.dominates(&a));
    }
}
