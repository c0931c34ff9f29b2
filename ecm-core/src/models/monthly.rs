use std::ops::{Add, AddAssign, Deref, Index};

/// The number of calendar months every monthly series carries.
pub const MONTHS: usize = 12;

/// One real value per calendar month, January first.
///
/// Volume shapes, price curves and valuations are all expressed this way. The
/// length is part of the type: any attempt to build one from a sequence of a
/// different length is rejected, including during deserialization.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<f64>", into = "Vec<f64>")
)]
pub struct Monthly([f64; MONTHS]);

impl Monthly {
    /// Wraps twelve values, January first
    pub const fn new(values: [f64; MONTHS]) -> Self {
        Self(values)
    }

    /// The same value in every month
    pub const fn splat(value: f64) -> Self {
        Self([value; MONTHS])
    }

    /// Builds the series by evaluating `f` on each month index (0 = January)
    pub fn from_fn(f: impl FnMut(usize) -> f64) -> Self {
        Self(std::array::from_fn(f))
    }

    /// The sum over all twelve months
    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Unwraps the underlying array
    pub fn into_inner(self) -> [f64; MONTHS] {
        self.0
    }
}

impl Default for Monthly {
    fn default() -> Self {
        Self::splat(0.0)
    }
}

impl Deref for Monthly {
    type Target = [f64; MONTHS];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Index<usize> for Monthly {
    type Output = f64;

    fn index(&self, month: usize) -> &Self::Output {
        &self.0[month]
    }
}

impl From<[f64; MONTHS]> for Monthly {
    fn from(value: [f64; MONTHS]) -> Self {
        Self(value)
    }
}

impl TryFrom<&[f64]> for Monthly {
    type Error = MonthlyError;

    fn try_from(value: &[f64]) -> Result<Self, Self::Error> {
        <[f64; MONTHS]>::try_from(value)
            .map(Self)
            .map_err(|_| MonthlyError::Length(value.len()))
    }
}

impl TryFrom<Vec<f64>> for Monthly {
    type Error = MonthlyError;

    fn try_from(value: Vec<f64>) -> Result<Self, Self::Error> {
        Self::try_from(value.as_slice())
    }
}

impl From<Monthly> for Vec<f64> {
    fn from(value: Monthly) -> Self {
        value.0.to_vec()
    }
}

impl Add for Monthly {
    type Output = Monthly;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign for Monthly {
    fn add_assign(&mut self, rhs: Self) {
        for (lhs, rhs) in self.0.iter_mut().zip(rhs.0) {
            *lhs += rhs;
        }
    }
}

impl std::iter::Sum for Monthly {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Errors that can occur when constructing a monthly series
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum MonthlyError {
    /// The source sequence did not hold exactly twelve values
    #[error("expected {MONTHS} monthly values, got {0}")]
    Length(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_length() {
        assert_eq!(
            Monthly::try_from(vec![1.0; 11]).unwrap_err(),
            MonthlyError::Length(11)
        );
        assert_eq!(
            Monthly::try_from(vec![1.0; 13]).unwrap_err(),
            MonthlyError::Length(13)
        );
    }

    #[test]
    fn test_deserialize_rejects_short_sequence() {
        let raw = "[8.33, 8.33, 8.33]";
        assert!(serde_json::from_str::<Monthly>(raw).is_err());
    }

    #[test]
    fn test_deserialize() {
        let raw = "[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]";
        let monthly = serde_json::from_str::<Monthly>(raw).unwrap();
        assert_eq!(monthly[0], 1.0);
        assert_eq!(monthly[11], 12.0);
        assert_eq!(monthly.sum(), 78.0);
    }

    #[test]
    fn test_elementwise_sum() {
        let total: Monthly = [Monthly::splat(1.0), Monthly::from_fn(|m| m as f64)]
            .into_iter()
            .sum();
        assert_eq!(total[0], 1.0);
        assert_eq!(total[11], 12.0);
    }
}
