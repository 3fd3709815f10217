use graxx_core::{GraxxError, Result};
use serde::{Deserialize, Serialize};

/// Fixed-size circular window of recent values, e.g. for moving averages.
///
/// Position `0` is the oldest value and `capacity - 1` the most recent.
/// Every slot starts at zero, so the window always reads as full.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RollingWindowRepr")]
pub struct RollingWindow {
    values: Vec<f64>,
    cursor: usize,
}

impl RollingWindow {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(GraxxError::InvalidCapacity(capacity));
        }
        tracing::debug!(capacity, "created rolling window");
        Ok(Self {
            values: vec![0.0; capacity],
            cursor: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.values.len()
    }

    /// Push a new value, evicting the oldest one.
    pub fn push(&mut self, value: f64) {
        self.cursor = (self.cursor + 1) % self.values.len();
        let newest = self.slot(self.values.len() - 1);
        self.values[newest] = value;
    }

    /// Overwrite the value at a logical position without shifting the window.
    pub fn set(&mut self, position: usize, value: f64) -> Result<()> {
        self.check(position)?;
        let slot = self.slot(position);
        self.values[slot] = value;
        Ok(())
    }

    pub fn get(&self, position: usize) -> Result<f64> {
        self.check(position)?;
        Ok(self.values[self.slot(position)])
    }

    /// Most recently pushed value.
    pub fn latest(&self) -> f64 {
        self.values[self.slot(self.values.len() - 1)]
    }

    /// Values from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.values.len()).map(move |p| self.values[self.slot(p)])
    }

    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Average over every slot, including ones not yet written.
    pub fn mean(&self) -> f64 {
        self.sum() / self.values.len() as f64
    }

    fn slot(&self, position: usize) -> usize {
        (self.cursor + position) % self.values.len()
    }

    fn check(&self, position: usize) -> Result<()> {
        if position >= self.values.len() {
            return Err(GraxxError::OutOfBounds {
                index: position,
                size: self.values.len(),
            });
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct RollingWindowRepr {
    values: Vec<f64>,
    cursor: usize,
}

impl TryFrom<RollingWindowRepr> for RollingWindow {
    type Error = String;

    fn try_from(repr: RollingWindowRepr) -> std::result::Result<Self, Self::Error> {
        if repr.values.is_empty() {
            return Err("rolling window must have at least one slot".to_string());
        }
        Ok(Self {
            cursor: repr.cursor % repr.values.len(),
            values: repr.values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_of(capacity: usize, values: &[f64]) -> RollingWindow {
        let mut w = RollingWindow::new(capacity).unwrap();
        for &v in values {
            w.push(v);
        }
        w
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(matches!(
            RollingWindow::new(0),
            Err(GraxxError::InvalidCapacity(0))
        ));
    }

    #[test]
    fn starts_full_of_zeros() {
        let w = RollingWindow::new(4).unwrap();
        assert_eq!(w.iter().collect::<Vec<_>>(), vec![0.0; 4]);
        assert_eq!(w.mean(), 0.0);
    }

    #[test]
    fn slides_by_one_per_push() {
        let w = window_of(3, &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(w.get(0).unwrap(), 2.0);
        assert_eq!(w.get(1).unwrap(), 3.0);
        assert_eq!(w.get(2).unwrap(), 4.0);
        assert_eq!(w.latest(), 4.0);
    }

    #[test]
    fn partial_fill_keeps_leading_zeros() {
        let w = window_of(4, &[5.0, 6.0]);
        assert_eq!(w.iter().collect::<Vec<_>>(), vec![0.0, 0.0, 5.0, 6.0]);
        assert_eq!(w.mean(), 2.75);
    }

    #[test]
    fn set_patches_only_one_position() {
        let mut w = window_of(3, &[1.0, 2.0, 3.0]);
        w.set(1, 9.5).unwrap();
        assert_eq!(w.iter().collect::<Vec<_>>(), vec![1.0, 9.5, 3.0]);
    }

    #[test]
    fn values_are_not_narrowed() {
        let w = window_of(2, &[0.25, 1e12]);
        assert_eq!(w.get(0).unwrap(), 0.25);
        assert_eq!(w.get(1).unwrap(), 1e12);
    }

    #[test]
    fn out_of_bounds_reports_index_and_size() {
        let mut w = RollingWindow::new(3).unwrap();
        let err = w.get(3).unwrap_err();
        assert!(matches!(err, GraxxError::OutOfBounds { index: 3, size: 3 }));
        assert!(w.set(7, 1.0).is_err());
    }

    #[test]
    fn single_slot_window() {
        let w = window_of(1, &[1.0, 2.0]);
        assert_eq!(w.get(0).unwrap(), 2.0);
    }
}
