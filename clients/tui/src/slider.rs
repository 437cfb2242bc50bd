use std::ops::RangeInclusive;

/// Keyboard bet selector. The range comes from the table and is re-applied
/// every frame, since payouts and resets move the balance underneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BetSlider {
    value: u64,
    increment: u64,
}

impl BetSlider {
    pub fn new(initial: u64, increment: u64) -> Self {
        Self {
            value: initial,
            increment: increment.max(1),
        }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn increase(&mut self, range: &RangeInclusive<u64>) {
        self.value = self.value.saturating_add(self.increment);
        self.clamp(range);
    }

    pub fn decrease(&mut self, range: &RangeInclusive<u64>) {
        self.value = self.value.saturating_sub(self.increment);
        self.clamp(range);
    }

    pub fn clamp(&mut self, range: &RangeInclusive<u64>) {
        if range.is_empty() {
            return;
        }
        self.value = self.value.clamp(*range.start(), *range.end());
    }

    pub fn reset(&mut self, value: u64) {
        self.value = value;
    }

    /// Position of the handle within the range, 0.0 to 1.0.
    pub fn ratio(&self, range: &RangeInclusive<u64>) -> f64 {
        let (low, high) = (*range.start(), *range.end());
        if high <= low {
            return 0.0;
        }
        let offset = self.value.saturating_sub(low).min(high - low);
        offset as f64 / (high - low) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_by_increment_within_range() {
        let range = 100..=10_000;
        let mut slider = BetSlider::new(100, 500);
        slider.increase(&range);
        assert_eq!(slider.value(), 600);
        slider.decrease(&range);
        assert_eq!(slider.value(), 100);
        slider.decrease(&range);
        assert_eq!(slider.value(), 100);
    }

    #[test]
    fn test_increase_stops_at_balance() {
        let range = 100..=700;
        let mut slider = BetSlider::new(600, 500);
        slider.increase(&range);
        assert_eq!(slider.value(), 700);
    }

    #[test]
    fn test_clamp_after_balance_drops() {
        let mut slider = BetSlider::new(5_000, 500);
        slider.clamp(&(100..=1_200));
        assert_eq!(slider.value(), 1_200);
        slider.clamp(&(40..=40));
        assert_eq!(slider.value(), 40);
    }

    #[test]
    fn test_empty_range_leaves_value() {
        let mut slider = BetSlider::new(100, 500);
        #[allow(clippy::reversed_empty_ranges)]
        slider.clamp(&(1..=0));
        assert_eq!(slider.value(), 100);
    }

    #[test]
    fn test_ratio() {
        let slider = BetSlider::new(550, 500);
        assert!((slider.ratio(&(100..=1_000)) - 0.5).abs() < f64::EPSILON);
        assert_eq!(BetSlider::new(40, 500).ratio(&(40..=40)), 0.0);
    }
}
