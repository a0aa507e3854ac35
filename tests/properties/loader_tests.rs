use proptest::prelude::*;

use rrr_skills::core::{LoadOutcome, load};
use rrr_skills::test_utils::fixtures::SkillsFixture;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn loads_respect_both_limits(
        sizes in prop::collection::vec(1usize..40, 0..8),
        max_skills in 0usize..6,
        max_lines in 0usize..120,
    ) {
        let mut fixture = SkillsFixture::new();
        let ids: Vec<String> = (0..sizes.len()).map(|n| format!("s{n}")).collect();
        for (id, lines) in ids.iter().zip(&sizes) {
            fixture.add_skill_with_lines(id, *lines);
        }
        fixture.set_limits(max_skills, max_lines);
        let store = fixture.store();

        let report = load(&ids, store.registry(), &store);

        prop_assert!(report.skills.len() <= max_skills);
        prop_assert!(report.total_lines <= max_lines);
        prop_assert_eq!(
            report.total_lines,
            report.skills.iter().map(|skill| skill.lines).sum::<usize>()
        );
        prop_assert_eq!(report.steps.len(), ids.len());

        // Loaded skills form a prefix of the candidates: first-fit stops for good.
        let loaded = report.loaded_ids();
        prop_assert_eq!(&loaded[..], &ids[..loaded.len()]);
        for step in &report.steps[loaded.len()..] {
            let is_limit_skip = matches!(
                step.outcome,
                LoadOutcome::SkippedLimitCount { .. } | LoadOutcome::SkippedLimitSize { .. }
            );
            prop_assert!(is_limit_skip);
        }
    }
}
