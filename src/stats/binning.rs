//! Fixed-width numeric buckets for the distribution charts.

/// `count` half-open buckets `[start + i*width, start + (i+1)*width)`.
///
/// Values outside the declared range fall in no bucket. For ages that means
/// 100 and above are left out of the decade chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinSpec {
    pub start: f64,
    pub width: f64,
    pub count: usize,
}

/// Ages 0–99 in decades.
pub const AGE_BINS: BinSpec = BinSpec::new(0.0, 10.0, 10);
/// Length of stay 0–49 days in 5-day buckets.
pub const LENGTH_OF_STAY_BINS: BinSpec = BinSpec::new(0.0, 5.0, 10);
/// CCI score 0–19 in 2-point buckets.
pub const CCI_BINS: BinSpec = BinSpec::new(0.0, 2.0, 10);
/// LACE score 0–19 in 2-point buckets.
pub const LACE_BINS: BinSpec = BinSpec::new(0.0, 2.0, 10);

impl BinSpec {
    pub const fn new(start: f64, width: f64, count: usize) -> Self {
        Self {
            start,
            width,
            count,
        }
    }

    pub fn end(&self) -> f64 {
        self.start + self.width * self.count as f64
    }

    /// Bucket holding `value`, if any.
    pub fn index_of(&self, value: f64) -> Option<usize> {
        if !value.is_finite() || value < self.start || value >= self.end() {
            return None;
        }
        let idx = ((value - self.start) / self.width).floor() as usize;
        Some(idx.min(self.count - 1))
    }

    /// Inclusive integer label, e.g. `"10–19"`.
    pub fn label(&self, idx: usize) -> String {
        let lower = self.start + self.width * idx as f64;
        let upper = lower + self.width - 1.0;
        format!("{}–{}", lower as i64, upper as i64)
    }

    pub fn labels(&self) -> Vec<String> {
        (0..self.count).map(|i| self.label(i)).collect()
    }

    pub fn label_of(&self, value: f64) -> Option<String> {
        self.index_of(value).map(|i| self.label(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_seventeen_is_in_the_teens() {
        assert_eq!(AGE_BINS.label_of(17.0).as_deref(), Some("10–19"));
    }

    #[test]
    fn age_hundred_is_outside_every_bucket() {
        assert_eq!(AGE_BINS.index_of(99.9), Some(9));
        assert_eq!(AGE_BINS.index_of(100.0), None);
        assert_eq!(AGE_BINS.label_of(100.0), None);
    }

    #[test]
    fn lower_bounds_are_inclusive() {
        assert_eq!(AGE_BINS.index_of(0.0), Some(0));
        assert_eq!(AGE_BINS.index_of(10.0), Some(1));
        assert_eq!(LENGTH_OF_STAY_BINS.label_of(5.0).as_deref(), Some("5–9"));
        assert_eq!(CCI_BINS.label_of(1.5).as_deref(), Some("0–1"));
        assert_eq!(AGE_BINS.index_of(-1.0), None);
        assert_eq!(AGE_BINS.index_of(f64::NAN), None);
    }

    #[test]
    fn labels_cover_declared_range() {
        assert_eq!(
            LACE_BINS.labels(),
            vec!["0–1", "2–3", "4–5", "6–7", "8–9", "10–11", "12–13", "14–15", "16–17", "18–19"]
        );
        assert_eq!(LENGTH_OF_STAY_BINS.labels().last().map(String::as_str), Some("45–49"));
    }
}
