use std::collections::HashSet;

use proptest::prelude::*;

use rrr_skills::core::{PlanDescriptor, SelectionBasis, SkillsMode, plan_header, select};
use rrr_skills::registry::{InferenceRule, Registry};

fn arb_id() -> impl Strategy<Value = String> {
    "[a-e]{1,2}"
}

fn arb_mode() -> impl Strategy<Value = SkillsMode> {
    prop_oneof![Just(SkillsMode::Standard), Just(SkillsMode::Minimal)]
}

fn arb_registry() -> impl Strategy<Value = Registry> {
    (
        prop::collection::vec(arb_id(), 0..4),
        prop::collection::vec((arb_id(), prop::collection::vec("[a-z]{1,4}", 0..3)), 0..4),
    )
        .prop_map(|(defaults, rules)| {
            let mut registry = Registry::default();
            registry.defaults.always_load = defaults;
            registry.inference.rules = rules
                .into_iter()
                .map(|(skill, patterns)| InferenceRule { skill, patterns })
                .collect();
            registry
        })
}

proptest! {
    #[test]
    fn selection_has_no_duplicates(
        explicit in prop::collection::vec(arb_id(), 0..6),
        mode in arb_mode(),
        text in "[a-z ]{0,40}",
        registry in arb_registry(),
    ) {
        let descriptor = PlanDescriptor { explicit_skills: explicit, mode };
        let selection = select(&descriptor, &text, &registry);

        let unique: HashSet<&String> = selection.ids.iter().collect();
        prop_assert_eq!(unique.len(), selection.ids.len());
    }

    #[test]
    fn defaults_come_first_unless_minimal(
        explicit in prop::collection::vec(arb_id(), 0..6),
        mode in arb_mode(),
        registry in arb_registry(),
    ) {
        let descriptor = PlanDescriptor { explicit_skills: explicit.clone(), mode };
        let selection = select(&descriptor, "", &registry);

        let mut seen = HashSet::new();
        let defaults: Vec<&String> = registry
            .defaults
            .always_load
            .iter()
            .filter(|id| seen.insert(*id))
            .collect();

        if mode == SkillsMode::Minimal {
            for id in &selection.ids {
                prop_assert!(explicit.contains(id));
            }
        } else {
            prop_assert!(selection.ids.len() >= defaults.len());
            for (position, id) in defaults.iter().enumerate() {
                prop_assert_eq!(&selection.ids[position], *id);
            }
            for id in &explicit {
                prop_assert!(selection.ids.contains(id));
            }
        }
    }

    #[test]
    fn explicit_skills_never_use_inference(
        explicit in prop::collection::vec(arb_id(), 1..4),
        text in "[a-z ]{0,40}",
        registry in arb_registry(),
    ) {
        let descriptor = PlanDescriptor { explicit_skills: explicit, mode: SkillsMode::Minimal };

        let with_text = select(&descriptor, &text, &registry);
        let without_text = select(&descriptor, "", &registry);

        prop_assert_eq!(with_text.basis, SelectionBasis::Explicit);
        prop_assert_eq!(with_text.ids, without_text.ids);
    }

    #[test]
    fn header_parsing_never_panics(text in "\\PC{0,200}") {
        let _ = plan_header::parse(&text);
        let framed = format!("---\n{text}\n---\n");
        let _ = plan_header::parse(&framed);
    }
}
