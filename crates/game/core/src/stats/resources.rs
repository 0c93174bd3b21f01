//! Resource pools (HP, SP).
//!
//! Both pools are stored as a current/maximum pair. Every mutation clamps the
//! current value into `[0, maximum]` so no caller can push a pool negative or
//! over its cap, whatever quantity it passes in.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: i32,
    pub maximum: i32,
}

impl ResourceMeter {
    /// Creates a meter, clamping `current` into range.
    pub fn new(current: i32, maximum: i32) -> Self {
        let maximum = maximum.max(0);
        Self {
            current: current.clamp(0, maximum),
            maximum,
        }
    }

    /// Creates a full meter.
    pub fn full(maximum: i32) -> Self {
        Self::new(maximum, maximum)
    }

    /// Removes up to `amount` and returns how much was actually removed.
    ///
    /// Negative amounts are treated as zero.
    pub fn drain(&mut self, amount: i32) -> i32 {
        let amount = amount.max(0).min(self.current);
        self.current -= amount;
        amount
    }

    /// Adds up to `amount` without exceeding the maximum and returns the gain.
    pub fn restore(&mut self, amount: i32) -> i32 {
        let amount = amount.max(0).min(self.maximum - self.current);
        self.current += amount;
        amount
    }

    pub fn is_empty(&self) -> bool {
        self.current <= 0
    }

    /// Current value as a fraction of the maximum (0.0 for an empty pool).
    pub fn ratio(&self) -> f64 {
        if self.maximum <= 0 {
            return 0.0;
        }
        f64::from(self.current) / f64::from(self.maximum)
    }
}

impl Default for ResourceMeter {
    fn default() -> Self {
        Self::full(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_clamps_at_zero() {
        let mut hp = ResourceMeter::full(30);

        assert_eq!(hp.drain(45), 30);
        assert_eq!(hp.current, 0);
        assert!(hp.is_empty());
    }

    #[test]
    fn restore_clamps_at_maximum() {
        let mut sp = ResourceMeter::new(10, 40);

        assert_eq!(sp.restore(100), 30);
        assert_eq!(sp.current, 40);
    }

    #[test]
    fn negative_quantities_are_ignored() {
        let mut hp = ResourceMeter::new(20, 40);

        assert_eq!(hp.drain(-5), 0);
        assert_eq!(hp.restore(-5), 0);
        assert_eq!(hp.current, 20);
    }

    #[test]
    fn constructor_clamps_out_of_range_current() {
        assert_eq!(ResourceMeter::new(999, 50).current, 50);
        assert_eq!(ResourceMeter::new(-3, 50).current, 0);
    }
}
