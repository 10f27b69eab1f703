//! Hypothesis generation integration tests.

use proptest::prelude::*;

use sleuth::{
    all_possible_solutions, all_possible_states, Card, CardSet, GameState, HiddenCardSet,
    MysteryCardSet, Player,
};

fn solveable_three_player() -> GameState {
    GameState::new(3)
        .with_player(
            0,
            Player::new(
                "Player 1",
                HiddenCardSet::new(Some(Card::Duke), Some(Card::Knife)),
                MysteryCardSet::default(),
                1,
            ),
        )
        .with_player(
            1,
            Player::new(
                "Player 2",
                HiddenCardSet::default(),
                MysteryCardSet::new(Some(Card::Nurse), Some(Card::Park), Some(Card::Sword)),
                1,
            ),
        )
        .with_player(
            2,
            Player::new(
                "Player 3",
                HiddenCardSet::default(),
                MysteryCardSet::new(Some(Card::Maid), Some(Card::Harbor), Some(Card::Rifle)),
                1,
            ),
        )
}

fn solveable_two_player() -> GameState {
    GameState::from_seed(
        r#"{
            "Avery": [{"name": "Duke"}, {"name": "Knife"}],
            "Blair": [{"name": "Nurse"}, {"name": "Park"}, {"name": "Sword"}]
        }"#,
    )
    .unwrap()
}

fn choose(n: usize, k: usize) -> usize {
    (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
}

// =============================================================================
// Enumeration Counts
// =============================================================================

#[test]
fn test_three_player_count_matches_combinatorics() {
    let state = solveable_three_player();
    let states = all_possible_states(&state, &|| true);

    let solutions = all_possible_solutions(&state).len();
    // Ten unknown cards remain per candidate solution: one disjoint pair
    // each for the two opponents, the rest informants.
    let pair_splits = choose(10, 2) * choose(8, 2);
    assert_eq!(states.len(), solutions * pair_splits);
}

#[test]
fn test_two_player_count_matches_combinatorics() {
    let state = solveable_two_player();
    let states = all_possible_states(&state, &|| true);

    let solutions = all_possible_solutions(&state).len();
    assert_eq!(states.len(), solutions * choose(10, 2));
}

#[test]
fn test_solution_candidates_are_unique() {
    let state = solveable_three_player();
    let solutions = all_possible_solutions(&state);
    let mut triples: Vec<_> = solutions.iter().map(|s| s.triple()).collect();
    triples.sort();
    triples.dedup();
    assert_eq!(triples.len(), solutions.len());
}

// =============================================================================
// Partition Invariant
// =============================================================================

#[test]
fn test_every_hypothesis_partitions_the_in_play_cards() {
    let state = solveable_three_player();
    let states = all_possible_states(&state, &|| true);
    assert!(!states.is_empty());

    for possible in &states {
        // Union covers the whole in-play set...
        assert_eq!(possible.all_cards(), state.cards());

        // ...and no card appears twice.
        let total: usize = possible
            .players
            .iter()
            .map(|player| player.mystery.cards().len() + player.hidden.cards().len())
            .sum::<usize>()
            + possible.informants.len();
        assert_eq!(total, state.cards().len());
    }
}

#[test]
fn test_informant_count_matches_game_size() {
    let state = solveable_three_player();
    let states = all_possible_states(&state, &|| true);
    for possible in &states {
        assert_eq!(possible.informants.len(), state.number_of_informants());
    }
}

// =============================================================================
// Consistency With Private Knowledge
// =============================================================================

#[test]
fn test_hypotheses_respect_my_hidden_cards() {
    let state = solveable_three_player();
    let states = all_possible_states(&state, &|| true);
    let my_hidden = CardSet::from_iter([Card::Duke, Card::Knife]);

    for possible in &states {
        assert_eq!(possible.players[0].hidden.cards(), my_hidden);
        assert!(possible.solution().cards().is_disjoint(my_hidden));
    }
}

#[test]
fn test_hypotheses_respect_known_mysteries() {
    let state = solveable_three_player();
    let states = all_possible_states(&state, &|| true);

    for possible in &states {
        assert_eq!(
            possible.players[1].mystery.cards(),
            CardSet::from_iter([Card::Nurse, Card::Park, Card::Sword])
        );
        assert_eq!(
            possible.players[2].mystery.cards(),
            CardSet::from_iter([Card::Maid, Card::Harbor, Card::Rifle])
        );
    }
}

#[test]
fn test_cancelled_generation_returns_nothing() {
    let state = solveable_three_player();
    assert!(all_possible_states(&state, &|| false).is_empty());
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    /// Pinning a solution component restricts every candidate and every
    /// hypothesis to it, and the partition invariant holds throughout.
    #[test]
    fn prop_pinned_components_and_partition(person_index in 0usize..4, location_index in 0usize..5) {
        let base = solveable_two_player();
        let pool = base.unallocated_cards();
        let person = pool.people().iter().nth(person_index).unwrap();
        let location = pool.locations().iter().nth(location_index).unwrap();

        let state = base.with_player(
            0,
            base.me()
                .with_mystery_person(Some(person))
                .with_mystery_location(Some(location)),
        );

        let states = all_possible_states(&state, &|| true);
        prop_assert!(!states.is_empty());
        for possible in &states {
            let solution = possible.solution();
            prop_assert_eq!(solution.person, person);
            prop_assert_eq!(solution.location, location);
            prop_assert_eq!(possible.all_cards(), state.cards());
        }
    }
}
