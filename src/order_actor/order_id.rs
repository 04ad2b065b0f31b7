use chrono::{Local, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::actor_framework::IdMint;
use crate::config::StoreConfig;

/// Mints `PREFIX-YYYYMMDD-NNN` order ids.
///
/// The first suffix is drawn at random so ids are not guessable in sequence.
/// Collisions are resolved by probing the following suffixes (wrapping) until
/// a free one is found or `max_attempts` probes have been made. The probe asks
/// the ledger directly, so uniqueness does not depend on luck.
pub struct OrderIdGenerator {
    prefix: String,
    suffix_digits: u32,
    max_attempts: u32,
    rng: StdRng,
}

impl OrderIdGenerator {
    pub fn new(prefix: impl Into<String>, suffix_digits: u32, max_attempts: u32) -> Self {
        Self {
            prefix: prefix.into(),
            // 10^9 still fits comfortably in u64 arithmetic below
            suffix_digits: suffix_digits.clamp(1, 9),
            max_attempts: max_attempts.max(1),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(
            config.order_id_prefix.clone(),
            config.order_id_suffix_digits,
            config.order_id_max_attempts,
        )
    }

    /// Deterministic suffix sequence, for tests.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    fn suffix_space(&self) -> u64 {
        10u64.pow(self.suffix_digits)
    }

    /// Generates an id for `date` that `is_taken` does not report as used.
    ///
    /// Returns the number of probes made when every candidate was taken.
    pub fn generate_on(
        &mut self,
        date: NaiveDate,
        is_taken: impl Fn(&String) -> bool,
    ) -> Result<String, u32> {
        let space = self.suffix_space();
        let attempts = u64::from(self.max_attempts).min(space);
        let start = self.rng.gen_range(0..space);
        let day = date.format("%Y%m%d").to_string();
        let width = self.suffix_digits as usize;

        for probe in 0..attempts {
            let suffix = (start + probe) % space;
            let candidate = format!("{}-{}-{:0width$}", self.prefix, day, suffix, width = width);
            if !is_taken(&candidate) {
                return Ok(candidate);
            }
        }
        Err(attempts as u32)
    }
}

impl IdMint<String> for OrderIdGenerator {
    fn mint(&mut self, is_taken: &dyn Fn(&String) -> bool) -> Result<String, u32> {
        let today = Local::now().date_naive();
        self.generate_on(today, is_taken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn test_format_is_prefix_date_suffix() {
        let mut generator = OrderIdGenerator::new("CC", 3, 10).with_seed(7);
        let id = generator.generate_on(day(9), |_| false).unwrap();

        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts.len(), 3, "{id}");
        assert_eq!(parts[0], "CC");
        assert_eq!(parts[1], "20250309");
        assert_eq!(parts[2].len(), 3);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_collision_probes_next_suffix() {
        let mut first = OrderIdGenerator::new("CC", 3, 10).with_seed(42);
        let taken_id = first.generate_on(day(1), |_| false).unwrap();

        let mut second = OrderIdGenerator::new("CC", 3, 10).with_seed(42);
        let id = second.generate_on(day(1), |c| *c == taken_id).unwrap();
        assert_ne!(id, taken_id);
    }

    #[test]
    fn test_ten_thousand_ids_are_distinct() {
        let mut generator = OrderIdGenerator::new("CC", 5, 1000).with_seed(1);
        let mut issued = HashSet::new();
        for _ in 0..10_000 {
            let id = generator
                .generate_on(day(15), |c| issued.contains(c))
                .expect("id space should not be exhausted");
            assert!(issued.insert(id));
        }
        assert_eq!(issued.len(), 10_000);
    }

    #[test]
    fn test_full_day_is_reported_exhausted() {
        let mut generator = OrderIdGenerator::new("CC", 3, 1000).with_seed(3);
        let mut issued = HashSet::new();
        for _ in 0..1000 {
            let id = generator.generate_on(day(20), |c| issued.contains(c)).unwrap();
            issued.insert(id);
        }

        assert_eq!(generator.generate_on(day(20), |c| issued.contains(c)), Err(1000));
        // the next day starts fresh
        assert!(generator.generate_on(day(21), |c| issued.contains(c)).is_ok());
    }

    #[test]
    fn test_attempts_are_bounded() {
        let mut generator = OrderIdGenerator::new("CC", 3, 5);
        assert_eq!(generator.generate_on(day(2), |_| true), Err(5));
    }
}
