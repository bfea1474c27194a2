//! Monthly factor generation by constrained rejection sampling
//!
//! Turns one annual growth factor into twelve monthly factors whose product
//! reproduces it. Candidate months are drawn around 1.0, then rescaled
//! geometrically so the product is exact; a candidate set is kept only when
//! most months stay inside a tight band and none leaves the wide band.

use crate::error::{ProjectionError, Result};
use log::{debug, trace};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Months compounded into one annual factor
pub const MONTHS_PER_YEAR: usize = 12;

/// Default maximum deviation of a "normal" month from 1.0
pub const DEFAULT_FACTOR_RATIO: f64 = 0.1;

/// Default attempt budget for the rejection search
pub const DEFAULT_MAX_ITER: u32 = 10_000;

/// Maximum deviation any month may have (crash or rally months)
pub const WIDE_BAND: f64 = 0.6;

/// Months that must fall inside the tight band
pub const MIN_NORMAL_MONTHS: usize = 9;

/// Twelve monthly returns for one projection year
///
/// Stored as return fractions (`factor - 1`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyFactorSet {
    returns: [f64; MONTHS_PER_YEAR],
}

impl MonthlyFactorSet {
    /// Wrap twelve monthly return fractions
    pub fn from_returns(returns: [f64; MONTHS_PER_YEAR]) -> Self {
        Self { returns }
    }

    /// Same return every month, e.g. for replaying a flat path
    pub fn constant(monthly_return: f64) -> Self {
        Self { returns: [monthly_return; MONTHS_PER_YEAR] }
    }

    pub fn returns(&self) -> &[f64; MONTHS_PER_YEAR] {
        &self.returns
    }

    /// Growth factor for month `j` (0-based)
    pub fn factor(&self, j: usize) -> f64 {
        1.0 + self.returns[j]
    }

    pub fn factors(&self) -> impl Iterator<Item = f64> + '_ {
        self.returns.iter().map(|r| 1.0 + r)
    }

    /// Compounded annual factor
    pub fn product(&self) -> f64 {
        self.factors().product()
    }
}

/// Rejection-sampling generator with its two tolerances
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyFactorGenerator {
    /// Tight band half-width for normal months
    pub ratio: f64,
    /// Attempt budget
    pub max_iter: u32,
}

impl Default for MonthlyFactorGenerator {
    fn default() -> Self {
        Self {
            ratio: DEFAULT_FACTOR_RATIO,
            max_iter: DEFAULT_MAX_ITER,
        }
    }
}

impl MonthlyFactorGenerator {
    pub fn new(ratio: f64, max_iter: u32) -> Self {
        Self { ratio, max_iter }
    }

    /// Generate monthly factors for an annual growth factor `target`
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R, target: f64) -> Result<MonthlyFactorSet> {
        generate_monthly_factors(rng, target, self.ratio, self.max_iter)
    }
}

/// Check that `ratio` can serve as a tight band half-width
pub fn validate_ratio(ratio: f64) -> Result<()> {
    if !ratio.is_finite() || ratio <= 0.0 || ratio >= 1.0 {
        return Err(ProjectionError::invalid(format!(
            "factor ratio must be in (0, 1), got {}",
            ratio
        )));
    }
    Ok(())
}

/// Synthesize twelve monthly returns compounding to `target`
///
/// # Arguments
/// * `rng` - caller-owned random source; seed it for reproducible runs
/// * `target` - annual growth factor (1.08 for 8% growth)
/// * `ratio` - tight band half-width; months are drawn with std `ratio / 2`
/// * `max_iter` - number of candidate sets to try
///
/// # Returns
/// Monthly return fractions, or `SearchExhausted` when no candidate within
/// the budget satisfies both bands.
pub fn generate_monthly_factors<R: Rng + ?Sized>(
    rng: &mut R,
    target: f64,
    ratio: f64,
    max_iter: u32,
) -> Result<MonthlyFactorSet> {
    if !target.is_finite() || target <= 0.0 {
        return Err(ProjectionError::invalid(format!(
            "target annual factor must be positive, got {}",
            target
        )));
    }
    validate_ratio(ratio)?;

    let normal = Normal::new(1.0, ratio / 2.0)
        .map_err(|e| ProjectionError::invalid(format!("monthly factor distribution: {}", e)))?;

    let mut candidate = [0.0; MONTHS_PER_YEAR];

    for attempt in 1..=max_iter {
        for slot in candidate.iter_mut() {
            *slot = normal.sample(rng);
        }

        let product: f64 = candidate.iter().product();
        if !product.is_finite() || product <= 0.0 {
            trace!("Attempt {}: degenerate candidate product {}", attempt, product);
            continue;
        }

        // Geometric correction keeps the draw's shape and makes the product exact
        let correction = (target / product).powf(1.0 / MONTHS_PER_YEAR as f64);
        for slot in candidate.iter_mut() {
            *slot *= correction;
        }

        if within_bands(&candidate, ratio) {
            debug!(
                "Accepted monthly factors for target {:.6} after {} attempts",
                target, attempt
            );
            let mut returns = [0.0; MONTHS_PER_YEAR];
            for (r, f) in returns.iter_mut().zip(candidate.iter()) {
                *r = f - 1.0;
            }
            return Ok(MonthlyFactorSet::from_returns(returns));
        }
    }

    Err(ProjectionError::SearchExhausted {
        target,
        ratio,
        attempts: max_iter,
    })
}

fn within_bands(factors: &[f64; MONTHS_PER_YEAR], ratio: f64) -> bool {
    let normal_months = factors
        .iter()
        .filter(|f| (1.0 - ratio..=1.0 + ratio).contains(*f))
        .count();
    let all_in_wide = factors
        .iter()
        .all(|f| (1.0 - WIDE_BAND..=1.0 + WIDE_BAND).contains(f));

    normal_months >= MIN_NORMAL_MONTHS && all_in_wide
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::{any, prop_assert, proptest};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn assert_invariants(set: &MonthlyFactorSet, target: f64, ratio: f64) {
        assert_relative_eq!(set.product(), target, max_relative = 1e-9);
        let normal = set.factors().filter(|f| (f - 1.0).abs() <= ratio).count();
        assert!(normal >= MIN_NORMAL_MONTHS, "only {} normal months", normal);
        assert!(set.factors().all(|f| (0.4..=1.6).contains(&f)));
    }

    #[test]
    fn test_product_matches_target() {
        let mut rng = StdRng::seed_from_u64(7);
        let set = generate_monthly_factors(&mut rng, 1.08, 0.1, DEFAULT_MAX_ITER).unwrap();
        assert_invariants(&set, 1.08, 0.1);
    }

    #[test]
    fn test_crash_year_still_conforms() {
        let mut rng = StdRng::seed_from_u64(2008);
        let set = generate_monthly_factors(&mut rng, 0.63, 0.1, DEFAULT_MAX_ITER).unwrap();
        assert_invariants(&set, 0.63, 0.1);
    }

    #[test]
    fn test_zero_budget_exhausts() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = generate_monthly_factors(&mut rng, 1.1, 0.1, 0).unwrap_err();
        match err {
            ProjectionError::SearchExhausted { target, ratio, attempts } => {
                assert_relative_eq!(target, 1.1);
                assert_relative_eq!(ratio, 0.1);
                assert_eq!(attempts, 0);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_impossible_band_exhausts() {
        // Doubling in a year needs ~5.9% a month; a 1e-6 band cannot hold nine such months
        let mut rng = StdRng::seed_from_u64(3);
        let err = generate_monthly_factors(&mut rng, 2.0, 1e-6, 200).unwrap_err();
        assert!(matches!(err, ProjectionError::SearchExhausted { attempts: 200, .. }));
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let mut rng = StdRng::seed_from_u64(5);
        assert!(matches!(
            generate_monthly_factors(&mut rng, 0.0, 0.1, 10),
            Err(ProjectionError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            generate_monthly_factors(&mut rng, 1.05, 1.5, 10),
            Err(ProjectionError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            generate_monthly_factors(&mut rng, 1.05, f64::NAN, 10),
            Err(ProjectionError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_same_seed_same_factors() {
        let generator = MonthlyFactorGenerator::default();
        let a = generator.generate(&mut StdRng::seed_from_u64(42), 1.12).unwrap();
        let b = generator.generate(&mut StdRng::seed_from_u64(42), 1.12).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_constant_set_product() {
        let set = MonthlyFactorSet::constant(0.01);
        assert_relative_eq!(set.product(), 1.01_f64.powi(12), max_relative = 1e-12);
        assert_relative_eq!(set.factor(11), 1.01);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_accepted_sets_satisfy_bands(
            seed in any::<u64>(),
            target in 0.7f64..1.4,
            ratio in 0.1f64..0.4,
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let set = generate_monthly_factors(&mut rng, target, ratio, DEFAULT_MAX_ITER).unwrap();

            prop_assert!(((set.product() - target) / target).abs() <= 1e-9);
            let normal = set.factors().filter(|f| (f - 1.0).abs() <= ratio).count();
            prop_assert!(normal >= MIN_NORMAL_MONTHS);
            prop_assert!(set.factors().all(|f| (0.4..=1.6).contains(&f)));
        }
    }
}
