use serde::Serialize;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// A signed count of delay minutes.
#[derive(Debug, Clone, Copy, Default, Ord, Eq, PartialEq, PartialOrd, Serialize)]
pub struct Minutes(pub i64);

impl Minutes {
    /// Renders the quantity as hours and minutes, e.g. `2h05m`.
    pub fn as_clock(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        format!("{}{}h{:02}m", sign, abs / 60, abs % 60)
    }
}

impl std::fmt::Display for Minutes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add<Minutes> for Minutes {
    type Output = Self;

    fn add(self, rhs: Minutes) -> Self::Output {
        Minutes(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign<i64> for Minutes {
    fn add_assign(&mut self, rhs: i64) {
        self.0 = self.0.saturating_add(rhs);
    }
}

impl AddAssign<Minutes> for Minutes {
    fn add_assign(&mut self, rhs: Minutes) {
        *self += rhs.0;
    }
}

impl Sum for Minutes {
    fn sum<I: Iterator<Item = Minutes>>(iter: I) -> Self {
        iter.fold(Minutes::default(), Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_format() {
        assert_eq!(Minutes(0).as_clock(), "0h00m");
        assert_eq!(Minutes(125).as_clock(), "2h05m");
        assert_eq!(Minutes(-30).as_clock(), "-0h30m");
        assert_eq!(Minutes(1440).as_clock(), "24h00m");
    }

    #[test]
    fn test_addition_saturates() {
        let mut m = Minutes(i64::MAX - 1);
        m += 10;
        assert_eq!(m, Minutes(i64::MAX));
        assert_eq!(Minutes(i64::MIN) + Minutes(-1), Minutes(i64::MIN));
    }

    #[test]
    fn test_sum() {
        let total: Minutes = [Minutes(10), Minutes(-3), Minutes(5)].into_iter().sum();
        assert_eq!(total, Minutes(12));
    }
}
