use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::modules::helpers::math::Math;
use crate::modules::models::lap::LapRecord;

pub const DEFAULT_MIN_SAMPLES: usize = 10;

/// # Degradation of a single tyre compound
/// `slope` is the change in lap time in seconds per lap of tyre age.
/// a negative slope means the laps got faster as the tyres aged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundDegradation {
    pub compound: String,
    pub slope: f64,
    pub sample_size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegradationEstimator {
    pub min_samples: usize,
}

impl Default for DegradationEstimator {
    fn default() -> Self {
        DegradationEstimator { min_samples: DEFAULT_MIN_SAMPLES }
    }
}

impl DegradationEstimator {
    pub fn new(min_samples: usize) -> DegradationEstimator {
        DegradationEstimator { min_samples }
    }

    /// # estimate the degradation of every compound in the laps
    /// compounds with fewer valid laps than `min_samples` are left out.
    ///
    /// ## Arguments
    /// * `laps` - the laps to estimate from, usually all accurate laps of a session
    ///
    /// ## Returns
    /// * `Vec<CompoundDegradation>` - one entry per compound, in order of first appearance
    pub fn estimate(&self, laps: &[LapRecord]) -> Vec<CompoundDegradation> {
        DegradationEstimator::group_by_compound(laps)
            .into_iter()
            .filter_map(|(compound, samples)| self.estimate_compound(compound, &samples))
            .collect()
    }

    fn estimate_compound(&self, compound: &str, samples: &[(f64, f64)]) -> Option<CompoundDegradation> {
        if samples.len() < self.min_samples {
            debug!(target: "degradation:estimate", "skipping {}, only {} valid laps", compound, samples.len());
            return None;
        }

        let slope = match Math::linear_regression_slope(samples) {
            Some(slope) => slope,
            None => {
                debug!(target: "degradation:estimate", "skipping {}, no spread in tyre age", compound);
                return None;
            }
        };

        Some(CompoundDegradation {
            compound: compound.to_string(),
            slope,
            sample_size: samples.len(),
        })
    }

    /// group the valid samples per compound label in a single pass.
    /// a compound counts as seen from its first lap, even when that lap is invalid.
    fn group_by_compound(laps: &[LapRecord]) -> Vec<(&str, Vec<(f64, f64)>)> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut groups: Vec<(&str, Vec<(f64, f64)>)> = Vec::new();

        for lap in laps {
            let compound = match lap.compound_label() {
                Some(compound) => compound,
                None => continue,
            };

            let position = *index.entry(compound).or_insert_with(|| {
                groups.push((compound, Vec::new()));
                groups.len() - 1
            });

            if let Some(sample) = lap.sample() {
                groups[position].1.push(sample);
            }
        }

        groups
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    fn stint(compound: &str, ages: std::ops::RangeInclusive<u32>, base: f64, slope: f64) -> Vec<LapRecord> {
        ages.map(|age| LapRecord::new(compound, age, base + slope * age as f64)).collect()
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(DegradationEstimator::default().estimate(&[]).is_empty());
    }

    #[test]
    fn recovers_synthetic_slope() {
        let laps = stint("MEDIUM", 1..=20, 90.0, 0.05);
        let result = DegradationEstimator::default().estimate(&laps);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].compound, "MEDIUM");
        assert_eq!(result[0].sample_size, 20);
        assert!((result[0].slope - 0.05).abs() < 1e-6, "slope was {}", result[0].slope);
    }

    #[test]
    fn nine_laps_are_not_enough_ten_are() {
        let estimator = DegradationEstimator::default();

        let nine = stint("SOFT", 1..=9, 88.0, 0.1);
        assert!(estimator.estimate(&nine).is_empty());

        let ten = stint("SOFT", 1..=10, 88.0, 0.1);
        let result = estimator.estimate(&ten);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].sample_size, 10);
    }

    #[test]
    fn invalid_laps_do_not_count_towards_threshold() {
        let mut laps = stint("HARD", 1..=9, 92.0, 0.02);
        laps.push(LapRecord { lap_time: None, ..LapRecord::new("HARD", 10, 0.0) });
        laps.push(LapRecord { tyre_age: None, ..LapRecord::new("HARD", 0, 92.4) });
        laps.push(LapRecord::new("HARD", 11, f64::NAN));

        assert!(DegradationEstimator::default().estimate(&laps).is_empty());
    }

    #[test]
    fn invalid_laps_are_inert() {
        let clean = stint("HARD", 1..=15, 92.0, 0.03);
        let mut dirty = clean.clone();
        dirty.insert(3, LapRecord { lap_time: None, ..LapRecord::new("HARD", 40, 0.0) });
        dirty.push(LapRecord { tyre_age: None, ..LapRecord::new("HARD", 0, 150.0) });

        let estimator = DegradationEstimator::default();
        assert_eq!(estimator.estimate(&clean), estimator.estimate(&dirty));
    }

    #[test]
    fn flat_relationship_gives_zero_slope() {
        let laps = stint("MEDIUM", 1..=12, 91.0, 0.0);
        let result = DegradationEstimator::default().estimate(&laps);
        assert!(result[0].slope.abs() < 1e-9);
    }

    #[test]
    fn negative_slopes_are_kept() {
        let laps = stint("SOFT", 1..=12, 91.0, -0.08);
        let result = DegradationEstimator::default().estimate(&laps);
        assert!((result[0].slope + 0.08).abs() < 1e-6);
    }

    #[test]
    fn unlabelled_laps_are_skipped() {
        let mut laps = stint("", 1..=12, 91.0, 0.1);
        laps.extend(stint("MEDIUM", 1..=12, 91.0, 0.1).into_iter().map(|lap| LapRecord { compound: None, ..lap }));

        assert!(DegradationEstimator::default().estimate(&laps).is_empty());
    }

    #[test]
    fn identical_tyre_ages_are_skipped() {
        let laps: Vec<LapRecord> = (0..12).map(|i| LapRecord::new("WET", 5, 100.0 + i as f64)).collect();
        assert!(DegradationEstimator::default().estimate(&laps).is_empty());
    }

    #[test]
    fn output_follows_first_appearance() {
        let mut laps = Vec::new();
        laps.push(LapRecord { lap_time: None, ..LapRecord::new("HARD", 1, 0.0) });
        laps.extend(stint("SOFT", 1..=12, 89.0, 0.1));
        laps.extend(stint("HARD", 1..=12, 91.0, 0.02));
        laps.extend(stint("MEDIUM", 1..=12, 90.0, 0.05));

        let compounds: Vec<String> = DegradationEstimator::default()
            .estimate(&laps)
            .into_iter()
            .map(|deg| deg.compound)
            .collect();

        assert_eq!(compounds, vec!["HARD", "SOFT", "MEDIUM"]);
    }

    #[test]
    fn threshold_is_configurable() {
        let laps = stint("INTERMEDIATE", 1..=4, 99.0, 0.2);
        assert!(DegradationEstimator::default().estimate(&laps).is_empty());
        assert_eq!(DegradationEstimator::new(4).estimate(&laps).len(), 1);
    }

    #[test]
    fn serializes_for_the_frontend() {
        let degradation = CompoundDegradation { compound: "SOFT".to_string(), slope: 0.1, sample_size: 12 };
        assert_eq!(
            serde_json::to_value(&degradation).unwrap(),
            serde_json::json!({"compound": "SOFT", "slope": 0.1, "sampleSize": 12})
        );
    }

    fn arb_lap() -> impl Strategy<Value = LapRecord> {
        (
            prop::option::weighted(0.95, prop::sample::select(vec!["SOFT", "MEDIUM", "HARD", ""])),
            prop::option::weighted(0.9, 0u32..40),
            prop::option::weighted(0.9, 80.0f64..120.0),
        )
            .prop_map(|(compound, tyre_age, lap_time)| LapRecord {
                compound: compound.map(str::to_string),
                tyre_age,
                lap_time,
            })
    }

    proptest! {
        #[test]
        fn emitted_compounds_meet_threshold_and_are_unique(laps in prop::collection::vec(arb_lap(), 0..120)) {
            let result = DegradationEstimator::default().estimate(&laps);

            let mut seen = HashSet::new();
            for degradation in &result {
                prop_assert!(degradation.sample_size >= DEFAULT_MIN_SAMPLES);
                prop_assert!(seen.insert(degradation.compound.clone()));
                prop_assert!(!degradation.compound.is_empty());
            }
        }

        #[test]
        fn reordering_does_not_change_the_fit(
            laps in prop::collection::vec(arb_lap(), 0..80),
            seed in any::<u64>(),
        ) {
            let mut shuffled = laps.clone();
            // deterministic permutation from the seed
            let len = shuffled.len();
            let mut state = seed;
            for i in (1..len).rev() {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                shuffled.swap(i, (state % (i as u64 + 1)) as usize);
            }

            let estimator = DegradationEstimator::default();
            let mut original = estimator.estimate(&laps);
            let mut reordered = estimator.estimate(&shuffled);
            original.sort_by(|a, b| a.compound.cmp(&b.compound));
            reordered.sort_by(|a, b| a.compound.cmp(&b.compound));

            prop_assert_eq!(original.len(), reordered.len());
            for (a, b) in original.iter().zip(reordered.iter()) {
                prop_assert_eq!(&a.compound, &b.compound);
                prop_assert_eq!(a.sample_size, b.sample_size);
                prop_assert!((a.slope - b.slope).abs() < 1e-6, "{} != {}", a.slope, b.slope);
            }
        }
    }
}
