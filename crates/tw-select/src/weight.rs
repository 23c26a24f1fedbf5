//! Rarity weighting.
//!
//! Four rarity tiers are merged into one flat population in which each
//! item is repeated a computed number of times, so a plain uniform roll
//! over the population lands on each tier at roughly the intended rate:
//! rarer tiers get about 10% of the weight of themselves plus everything
//! commoner, very rare items about 1%. No weights are stored; the
//! duplication is the weighting.
//!
//! Multipliers are computed rarest first, each one the ceiling of the
//! largest ratio target (rounded half-to-even at three decimals, never
//! below 1):
//!
//! - rare: `9 * |very rare| / |rare|`
//! - uncommon: `3 * (R + V) / |uncommon|`, `9 * (R + V) / d / |uncommon|`,
//!   `(99 * V - R) / d / |uncommon|`
//! - common: `2 * U / |common|`, `(9 * (R + V) - U) / |common|`,
//!   `(99 * V - R - U) / |common|`
//!
//! where `V = |very rare|`, `R = rare multiplier * |rare|`,
//! `U = uncommon multiplier * |uncommon|`, and `d` is 3 when there are
//! common items and 1 otherwise. Ratios for an empty tier are skipped.

/// Items split by rarity. All tiers default to empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RarityTiers<T> {
    /// Items that should come up most of the time.
    pub common: Vec<T>,
    /// Items that should come up now and then.
    pub uncommon: Vec<T>,
    /// Items that should come up about one time in ten.
    pub rare: Vec<T>,
    /// Items that should come up about one time in a hundred.
    pub very_rare: Vec<T>,
}

impl<T> Default for RarityTiers<T> {
    fn default() -> Self {
        Self {
            common: Vec::new(),
            uncommon: Vec::new(),
            rare: Vec::new(),
            very_rare: Vec::new(),
        }
    }
}

impl<T> RarityTiers<T> {
    /// All four tiers empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the common tier.
    pub fn with_common(mut self, items: impl IntoIterator<Item = T>) -> Self {
        self.common = items.into_iter().collect();
        self
    }

    /// Set the uncommon tier.
    pub fn with_uncommon(mut self, items: impl IntoIterator<Item = T>) -> Self {
        self.uncommon = items.into_iter().collect();
        self
    }

    /// Set the rare tier.
    pub fn with_rare(mut self, items: impl IntoIterator<Item = T>) -> Self {
        self.rare = items.into_iter().collect();
        self
    }

    /// Set the very rare tier.
    pub fn with_very_rare(mut self, items: impl IntoIterator<Item = T>) -> Self {
        self.very_rare = items.into_iter().collect();
        self
    }

    /// True if every tier is empty.
    pub fn is_empty(&self) -> bool {
        self.common.is_empty()
            && self.uncommon.is_empty()
            && self.rare.is_empty()
            && self.very_rare.is_empty()
    }
}

/// How many times each tier's items are repeated. Very rare items are
/// always present exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Multipliers {
    /// Copies of the rare tier.
    pub rare: usize,
    /// Copies of the uncommon tier.
    pub uncommon: usize,
    /// Copies of the common tier.
    pub common: usize,
}

impl Multipliers {
    /// Multipliers for tiers of the given sizes.
    pub fn for_counts(common: usize, uncommon: usize, rare: usize, very_rare: usize) -> Self {
        let very_rare_amount = very_rare as f64;

        let mut rare_targets = Vec::new();
        if rare > 0 {
            rare_targets.push(9.0 * very_rare_amount / rare as f64);
        }
        let rare_multiplier = round_multiplier(&rare_targets);
        let rare_amount = (rare_multiplier * rare) as f64;

        let mut uncommon_targets = Vec::new();
        if uncommon > 0 {
            let count = uncommon as f64;
            let divisor = if common > 0 { 3.0 } else { 1.0 };
            uncommon_targets.push(3.0 * (rare_amount + very_rare_amount) / count);
            uncommon_targets.push(9.0 * (rare_amount + very_rare_amount) / divisor / count);
            uncommon_targets.push((99.0 * very_rare_amount - rare_amount) / divisor / count);
        }
        let uncommon_multiplier = round_multiplier(&uncommon_targets);
        let uncommon_amount = (uncommon_multiplier * uncommon) as f64;

        let mut common_targets = Vec::new();
        if common > 0 {
            let count = common as f64;
            common_targets.push(2.0 * uncommon_amount / count);
            common_targets.push((9.0 * (rare_amount + very_rare_amount) - uncommon_amount) / count);
            common_targets.push((99.0 * very_rare_amount - rare_amount - uncommon_amount) / count);
        }
        let common_multiplier = round_multiplier(&common_targets);

        Self {
            rare: rare_multiplier,
            uncommon: uncommon_multiplier,
            common: common_multiplier,
        }
    }

    /// Multipliers for the given tiers.
    pub fn for_tiers<T>(tiers: &RarityTiers<T>) -> Self {
        Self::for_counts(
            tiers.common.len(),
            tiers.uncommon.len(),
            tiers.rare.len(),
            tiers.very_rare.len(),
        )
    }

    /// Length of the population these multipliers produce for `tiers`.
    pub fn population_len<T>(&self, tiers: &RarityTiers<T>) -> usize {
        tiers.very_rare.len()
            + self.rare * tiers.rare.len()
            + self.uncommon * tiers.uncommon.len()
            + self.common * tiers.common.len()
    }
}

/// `ceil(round(max(1, targets...), 3))`, halves rounding to even.
fn round_multiplier(targets: &[f64]) -> usize {
    let raw = targets.iter().copied().fold(1.0_f64, f64::max);
    let rounded = (raw * 1000.0).round_ties_even() / 1000.0;
    rounded.ceil() as usize
}

/// Build the weighted population: very rare items once, then each rarer
/// tier repeated by its multiplier, rarest first. Every non-empty tier is
/// represented.
pub fn weighted<T: Clone>(tiers: &RarityTiers<T>) -> Vec<T> {
    let multipliers = Multipliers::for_tiers(tiers);
    let mut population = Vec::with_capacity(multipliers.population_len(tiers));

    population.extend_from_slice(&tiers.very_rare);
    repeat_into(&mut population, &tiers.rare, multipliers.rare);
    repeat_into(&mut population, &tiers.uncommon, multipliers.uncommon);
    repeat_into(&mut population, &tiers.common, multipliers.common);

    population
}

fn repeat_into<T: Clone>(population: &mut Vec<T>, items: &[T], times: usize) {
    for _ in 0..times {
        population.extend_from_slice(items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use proptest::prelude::*;

    fn count(population: &[&str], item: &str) -> usize {
        population.iter().filter(|i| **i == item).count()
    }

    fn tiers(
        common: &[&'static str],
        uncommon: &[&'static str],
        rare: &[&'static str],
        very_rare: &[&'static str],
    ) -> RarityTiers<&'static str> {
        RarityTiers::new()
            .with_common(common.iter().copied())
            .with_uncommon(uncommon.iter().copied())
            .with_rare(rare.iter().copied())
            .with_very_rare(very_rare.iter().copied())
    }

    #[test]
    fn one_of_each_makes_a_hundred() {
        let population = weighted(&tiers(
            &["common"],
            &["uncommon"],
            &["rare"],
            &["very rare"],
        ));
        assert_eq!(population.len(), 100);
        assert_eq!(count(&population, "very rare"), 1);
        assert_eq!(count(&population, "rare"), 9);
        assert_eq!(count(&population, "uncommon"), 30);
        assert_eq!(count(&population, "common"), 60);
    }

    #[test]
    fn rarest_first_ordering() {
        let population = weighted(&tiers(&["c"], &["u"], &["r"], &[]));
        assert_snapshot!(population.join(" "), @"r u u u c c c c c c");
    }

    #[test]
    fn missing_tiers() {
        let cases: [(RarityTiers<&str>, [usize; 4]); 10] = [
            (tiers(&[], &["uncommon"], &["rare"], &["very rare"]), [1, 9, 90, 0]),
            (tiers(&["common"], &[], &["rare"], &["very rare"]), [1, 9, 0, 90]),
            (tiers(&["common"], &["uncommon"], &[], &["very rare"]), [1, 0, 33, 66]),
            (tiers(&["common"], &["uncommon"], &["rare"], &[]), [0, 1, 3, 6]),
            (tiers(&["common"], &["uncommon"], &[], &[]), [0, 0, 1, 2]),
            (tiers(&["common"], &[], &["rare"], &[]), [0, 1, 0, 9]),
            (tiers(&["common"], &[], &[], &["very rare"]), [1, 0, 0, 99]),
            (tiers(&[], &["uncommon"], &["rare"], &[]), [0, 1, 9, 0]),
            (tiers(&[], &["uncommon"], &[], &["very rare"]), [1, 0, 99, 0]),
            (tiers(&[], &[], &["rare"], &["very rare"]), [1, 9, 0, 0]),
        ];

        for (tiers, [very_rare, rare, uncommon, common]) in cases {
            let population = weighted(&tiers);
            assert_eq!(count(&population, "very rare"), very_rare, "{tiers:?}");
            assert_eq!(count(&population, "rare"), rare, "{tiers:?}");
            assert_eq!(count(&population, "uncommon"), uncommon, "{tiers:?}");
            assert_eq!(count(&population, "common"), common, "{tiers:?}");
        }
    }

    #[test]
    fn single_tier_is_unweighted() {
        for single in [
            tiers(&["x"], &[], &[], &[]),
            tiers(&[], &["x"], &[], &[]),
            tiers(&[], &[], &["x"], &[]),
            tiers(&[], &[], &[], &["x"]),
        ] {
            assert_eq!(weighted(&single), vec!["x"]);
        }
    }

    #[test]
    fn empty_tiers_make_empty_population() {
        assert!(weighted(&RarityTiers::<u32>::new()).is_empty());
    }

    #[test]
    fn omitted_common_matches_explicit_empty() {
        let omitted = RarityTiers::new()
            .with_uncommon(["u"])
            .with_rare(["r"])
            .with_very_rare(["v"]);
        let explicit = omitted.clone().with_common(Vec::new());
        assert_eq!(Multipliers::for_tiers(&omitted), Multipliers::for_tiers(&explicit));
        assert_eq!(weighted(&omitted), weighted(&explicit));
    }

    #[test]
    fn rare_against_very_rare_uses_ceiling() {
        let m = Multipliers::for_counts(0, 0, 2, 1);
        assert_eq!(m.rare, 5);
        let m = Multipliers::for_counts(0, 0, 96, 11);
        assert_eq!(m.rare, 2);
    }

    #[test]
    fn rounding_absorbs_float_noise() {
        assert_eq!(round_multiplier(&[3.0000001]), 3);
        assert_eq!(round_multiplier(&[3.001]), 4);
        assert_eq!(round_multiplier(&[0.2, -5.0]), 1);
    }

    #[test]
    fn rounding_ties_go_to_even() {
        // 9 * 2889 / 2000 = 13.0005, exactly halfway at three decimals
        assert_eq!(Multipliers::for_counts(0, 0, 2000, 2889).rare, 13);
        assert_eq!(round_multiplier(&[2.5015]), 3);
    }

    const SIZES: [usize; 7] = [1, 2, 9, 10, 11, 42, 96];

    fn tier_size() -> impl Strategy<Value = usize> {
        prop::sample::select(std::iter::once(0).chain(SIZES).collect::<Vec<_>>())
    }

    proptest! {
        #[test]
        fn population_invariants(
            common in tier_size(),
            uncommon in tier_size(),
            rare in tier_size(),
            very_rare in tier_size(),
        ) {
            let tiers = RarityTiers::new()
                .with_common((0..common).map(|i| ("common", i)))
                .with_uncommon((0..uncommon).map(|i| ("uncommon", i)))
                .with_rare((0..rare).map(|i| ("rare", i)))
                .with_very_rare((0..very_rare).map(|i| ("very rare", i)));
            let m = Multipliers::for_tiers(&tiers);
            let population = weighted(&tiers);

            prop_assert!(m.rare >= 1 && m.uncommon >= 1 && m.common >= 1);
            prop_assert_eq!(population.len(), m.population_len(&tiers));

            for item in &tiers.very_rare {
                prop_assert_eq!(population.iter().filter(|p| *p == item).count(), 1);
            }

            let rare_amount = m.rare * rare;
            let uncommon_amount = m.uncommon * uncommon;
            let total = population.len();

            if rare > 0 {
                prop_assert!(rare_amount >= 9 * very_rare);
            }
            if common + uncommon > 0 {
                prop_assert!(total >= 10 * (rare_amount + very_rare));
                prop_assert!(total >= 100 * very_rare);
            }
            if common > 0 {
                prop_assert!(m.common * common >= 2 * uncommon_amount);
            }
        }
    }

    #[test]
    fn rare_share_against_very_rare() {
        for rare in SIZES {
            for very_rare in SIZES {
                let m = Multipliers::for_counts(0, 0, rare, very_rare);
                let expected = (9 * very_rare).div_ceil(rare);
                assert_eq!(m.rare, expected, "rare {rare}, very rare {very_rare}");
            }
        }
    }
}
