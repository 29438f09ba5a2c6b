//! Synergy Matcher
//!
//! A synergy applies when both of its foods are in the stack. Matching only
//! looks at stack membership; resolving a match to display names needs the
//! catalog and quietly drops pairs whose foods it does not know.

use crate::catalog::{Catalog, Food, Synergy};
use crate::error::StackError;
use crate::stack::Stack;

/// A matched synergy with both foods resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct SynergyMatch<'a> {
    pub synergy: &'a Synergy,
    pub first: &'a Food,
    pub second: &'a Food,
}

impl SynergyMatch<'_> {
    /// "Turmeric + Black Pepper"
    pub fn title(&self) -> String {
        format!("{} + {}", self.first.name, self.second.name)
    }
}

/// Synergies whose two foods are both in the stack, in collection order.
pub fn matching<'a>(synergies: &'a [Synergy], stack: &Stack) -> Vec<&'a Synergy> {
    let ids = stack.id_set();
    synergies
        .iter()
        .filter(|s| s.foods.iter().all(|f| ids.contains(f.as_str())))
        .collect()
}

/// Attach catalog foods to matched synergies, skipping dangling references.
pub fn resolve<'a>(catalog: &'a Catalog, matches: &[&'a Synergy]) -> Vec<SynergyMatch<'a>> {
    matches
        .iter()
        .copied()
        .filter_map(|synergy| {
            let [a, b] = &synergy.foods;
            match (catalog.food(a), catalog.food(b)) {
                (Some(first), Some(second)) => Some(SynergyMatch {
                    synergy,
                    first,
                    second,
                }),
                (first, _) => {
                    let missing = StackError::MissingReference {
                        food_id: if first.is_none() { a.clone() } else { b.clone() },
                    };
                    tracing::debug!("Skipping synergy {} + {}: {}", a, b, missing);
                    None
                }
            }
        })
        .collect()
}

/// Matched and resolved synergies for the current stack.
pub fn synergies_for<'a>(catalog: &'a Catalog, stack: &Stack) -> Vec<SynergyMatch<'a>> {
    let matches = matching(catalog.synergies(), stack);
    resolve(catalog, &matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{parse_foods, parse_synergies};
    use proptest::prelude::*;

    fn catalog() -> Catalog {
        let foods = parse_foods(
            r#"[
                {"id": "turmeric", "name": "Turmeric", "category": "spices"},
                {"id": "black_pepper", "name": "Black Pepper", "category": "spices"},
                {"id": "ginger", "name": "Ginger", "category": "spices"}
            ]"#,
        )
        .unwrap();
        let synergies = parse_synergies(
            r#"[
                {"foods": ["turmeric", "black_pepper"], "strength": "strong", "description": "absorption boost"},
                {"foods": ["turmeric", "ginger"], "description": "..."},
                {"foods": ["ginger", "unicorn"], "description": "dangling"}
            ]"#,
        )
        .unwrap();
        Catalog::new(foods, synergies, vec![])
    }

    fn stack_of(ids: &[&str]) -> Stack {
        let mut stack = Stack::new();
        for id in ids {
            stack.add(id);
        }
        stack
    }

    #[test]
    fn test_matches_only_complete_pairs() {
        let catalog = catalog();
        let stack = stack_of(&["turmeric", "black_pepper"]);

        let matches = matching(catalog.synergies(), &stack);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].description, "absorption boost");
    }

    #[test]
    fn test_pair_order_does_not_matter() {
        let catalog = catalog();
        let stack = stack_of(&["black_pepper", "ginger", "turmeric"]);

        let descriptions: Vec<&str> = matching(catalog.synergies(), &stack)
            .iter()
            .map(|s| s.description.as_str())
            .collect();
        assert_eq!(descriptions, vec!["absorption boost", "..."]);
    }

    #[test]
    fn test_dangling_reference_matches_but_does_not_resolve() {
        let catalog = catalog();
        let stack = stack_of(&["ginger", "unicorn"]);

        let matches = matching(catalog.synergies(), &stack);
        assert_eq!(matches.len(), 1);
        assert!(resolve(&catalog, &matches).is_empty());
    }

    #[test]
    fn test_resolved_titles() {
        let catalog = catalog();
        let stack = stack_of(&["turmeric", "black_pepper"]);

        let resolved = synergies_for(&catalog, &stack);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].title(), "Turmeric + Black Pepper");
        assert_eq!(resolved[0].synergy.strength.as_deref(), Some("strong"));
    }

    #[test]
    fn test_empty_inputs() {
        let catalog = Catalog::default();
        assert!(synergies_for(&catalog, &stack_of(&["turmeric"])).is_empty());
        assert!(matching(catalog.synergies(), &Stack::new()).is_empty());
    }

    fn synergies_strategy() -> impl Strategy<Value = Vec<Synergy>> {
        prop::collection::vec(("[a-f]", "[a-f]"), 0..12).prop_map(|pairs| {
            pairs
                .into_iter()
                .enumerate()
                .map(|(index, (a, b))| Synergy {
                    foods: [a, b],
                    strength: None,
                    description: index.to_string(),
                    recommendation: None,
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn property_matches_exactly_pairs_inside_stack(
            synergies in synergies_strategy(),
            ids in prop::collection::vec("[a-f]", 0..6),
        ) {
            let stack = ids.iter().fold(Stack::new(), |mut stack, id| {
                stack.add(id);
                stack
            });

            let expected: Vec<&str> = synergies
                .iter()
                .filter(|s| stack.contains(&s.foods[0]) && stack.contains(&s.foods[1]))
                .map(|s| s.description.as_str())
                .collect();
            let actual: Vec<&str> = matching(&synergies, &stack)
                .iter()
                .map(|s| s.description.as_str())
                .collect();

            prop_assert_eq!(actual, expected);
        }
    }
}
