//! Burger builder slice.
//!
//! Entirely pure: every action mutates the draft in place and produces no
//! effects. Placement ids come from a counter inside the state, so reducing
//! the same action sequence always yields the same draft.

use crate::api::AppEnvironment;
use crate::ingredient::{Ingredient, PlacedIngredient, PlacementId};
use foodcart_core::reducer::Reducer;
use foodcart_core::{Effects, SmallVec};

/// The draft burger being composed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuilderState {
    /// The bun bracketing the burger. At most one; never appears in `items`.
    pub bun: Option<Ingredient>,
    /// Inner ingredients in display order.
    pub items: Vec<PlacedIngredient>,
    next_placement: u64,
}

impl BuilderState {
    /// Price of the draft: the bun twice plus every inner ingredient once.
    pub fn total_price(&self) -> u64 {
        let bun = self.bun.as_ref().map_or(0, |b| b.price * 2);
        bun + self
            .items
            .iter()
            .map(|p| p.ingredient.price)
            .sum::<u64>()
    }

    /// Whether the draft holds neither a bun nor inner ingredients.
    pub fn is_empty(&self) -> bool {
        self.bun.is_none() && self.items.is_empty()
    }

    fn place(&mut self, ingredient: Ingredient) {
        let placement = PlacementId(self.next_placement);
        self.next_placement += 1;
        self.items.push(PlacedIngredient {
            placement,
            ingredient,
        });
    }
}

/// Actions accepted by [`BuilderReducer`].
#[derive(Debug, Clone, PartialEq)]
pub enum BuilderAction {
    /// Put an ingredient into the bun slot, replacing any previous bun.
    SetBun(Ingredient),
    /// Append an ingredient to the draft. Buns are routed to the bun slot.
    Add(Ingredient),
    /// Remove one placement. Unknown ids are ignored.
    Remove(PlacementId),
    /// Move the item at `from` so it ends up at index `to`.
    Move {
        /// Current index of the item.
        from: usize,
        /// Target index after the move.
        to: usize,
    },
    /// Discard the whole draft.
    Reset,
}

/// Reducer for the burger builder.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuilderReducer;

impl Reducer for BuilderReducer {
    type State = BuilderState;
    type Action = BuilderAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> Effects<Self::Action> {
        match action {
            BuilderAction::SetBun(bun) => {
                state.bun = Some(bun);
            },
            BuilderAction::Add(ingredient) => {
                // A dropped bun replaces the slot instead of joining the stack.
                if ingredient.is_bun() {
                    state.bun = Some(ingredient);
                } else {
                    state.place(ingredient);
                }
            },
            BuilderAction::Remove(placement) => {
                state.items.retain(|p| p.placement != placement);
            },
            BuilderAction::Move { from, to } => {
                if from >= state.items.len() || to >= state.items.len() {
                    tracing::debug!(from, to, "move indices out of range, ignoring");
                } else {
                    let item = state.items.remove(from);
                    state.items.insert(to, item);
                }
            },
            BuilderAction::Reset => {
                *state = BuilderState::default();
            },
        }
        SmallVec::new()
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::ingredient::IngredientKind;
    use crate::mocks::{StubApi, ingredient_fixture, test_environment};
    use proptest::prelude::*;

    fn reduce(state: &mut BuilderState, action: BuilderAction) {
        let env = test_environment(StubApi::default());
        let effects = BuilderReducer.reduce(state, action, &env);
        assert!(effects.is_empty(), "builder actions must stay pure");
    }

    #[test]
    fn price_counts_bun_twice() {
        let mut state = BuilderState::default();
        reduce(
            &mut state,
            BuilderAction::SetBun(ingredient_fixture("bun", IngredientKind::Bun, 5)),
        );
        reduce(
            &mut state,
            BuilderAction::Add(ingredient_fixture("patty", IngredientKind::Filling, 4)),
        );
        reduce(
            &mut state,
            BuilderAction::Add(ingredient_fixture("sauce", IngredientKind::Sauce, 2)),
        );

        assert_eq!(state.total_price(), 16);

        // Swapping in a cheaper bun reprices both halves.
        reduce(
            &mut state,
            BuilderAction::SetBun(ingredient_fixture("lite-bun", IngredientKind::Bun, 3)),
        );
        assert_eq!(state.total_price(), 13);
    }

    #[test]
    fn adding_a_bun_replaces_the_slot() {
        let mut state = BuilderState::default();
        reduce(
            &mut state,
            BuilderAction::Add(ingredient_fixture("bun-a", IngredientKind::Bun, 5)),
        );
        reduce(
            &mut state,
            BuilderAction::Add(ingredient_fixture("bun-b", IngredientKind::Bun, 7)),
        );

        assert!(state.items.is_empty());
        assert_eq!(state.bun.as_ref().map(|b| b.price), Some(7));
    }

    #[test]
    fn same_catalog_entry_gets_distinct_placements() {
        let mut state = BuilderState::default();
        let patty = ingredient_fixture("patty", IngredientKind::Filling, 4);
        reduce(&mut state, BuilderAction::Add(patty.clone()));
        reduce(&mut state, BuilderAction::Add(patty));

        assert_ne!(state.items[0].placement, state.items[1].placement);

        // Removing one occurrence leaves the other.
        let first = state.items[0].placement;
        reduce(&mut state, BuilderAction::Remove(first));
        assert_eq!(state.items.len(), 1);
    }

    #[test]
    fn move_reorders_within_range() {
        let mut state = BuilderState::default();
        for name in ["a", "b", "c"] {
            reduce(
                &mut state,
                BuilderAction::Add(ingredient_fixture(name, IngredientKind::Filling, 1)),
            );
        }

        reduce(&mut state, BuilderAction::Move { from: 0, to: 2 });
        let names: Vec<_> = state.items.iter().map(|p| p.ingredient.name.as_str()).collect();
        assert_eq!(names, ["b", "c", "a"]);

        // Out-of-range indices leave the draft untouched.
        let before = state.clone();
        reduce(&mut state, BuilderAction::Move { from: 0, to: 3 });
        reduce(&mut state, BuilderAction::Move { from: 9, to: 0 });
        assert_eq!(state, before);
    }

    #[test]
    fn reset_discards_everything() {
        let mut state = BuilderState::default();
        reduce(
            &mut state,
            BuilderAction::SetBun(ingredient_fixture("bun", IngredientKind::Bun, 5)),
        );
        reduce(
            &mut state,
            BuilderAction::Add(ingredient_fixture("patty", IngredientKind::Filling, 4)),
        );

        reduce(&mut state, BuilderAction::Reset);
        assert!(state.is_empty());
        assert_eq!(state.total_price(), 0);
    }

    fn arb_ingredient() -> impl Strategy<Value = Ingredient> {
        (
            "[a-z]{1,8}",
            prop_oneof![
                Just(IngredientKind::Bun),
                Just(IngredientKind::Sauce),
                Just(IngredientKind::Filling),
            ],
            0u64..10_000,
        )
            .prop_map(|(id, kind, price)| ingredient_fixture(&id, kind, price))
    }

    fn arb_action() -> impl Strategy<Value = BuilderAction> {
        prop_oneof![
            arb_ingredient().prop_map(BuilderAction::SetBun),
            arb_ingredient().prop_map(BuilderAction::Add),
            (0u64..20).prop_map(|n| BuilderAction::Remove(PlacementId(n))),
            (0usize..8, 0usize..8).prop_map(|(from, to)| BuilderAction::Move { from, to }),
            Just(BuilderAction::Reset),
        ]
    }

    proptest! {
        #[test]
        fn draft_invariants_hold_under_any_action_sequence(
            actions in prop::collection::vec(arb_action(), 0..40)
        ) {
            let mut state = BuilderState::default();
            for action in actions {
                reduce(&mut state, action);

                // Buns live only in the bun slot.
                prop_assert!(state.items.iter().all(|p| !p.ingredient.is_bun()));

                // Placement ids never collide.
                let mut seen: Vec<_> = state.items.iter().map(|p| p.placement).collect();
                seen.sort_unstable();
                seen.dedup();
                prop_assert_eq!(seen.len(), state.items.len());

                // The price is always derivable from the draft contents.
                let expected = state.bun.as_ref().map_or(0, |b| b.price * 2)
                    + state.items.iter().map(|p| p.ingredient.price).sum::<u64>();
                prop_assert_eq!(state.total_price(), expected);
            }
        }
    }
}
