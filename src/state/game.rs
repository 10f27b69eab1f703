//! The immutable game snapshot.

use std::sync::atomic::{AtomicU64, Ordering};

use im::Vector;
use smallvec::SmallVec;

use crate::cards::{Card, CardSet, Color, Filter};

use super::action::Action;
use super::informant::SecretInformant;
use super::player::{HiddenCardSet, MysteryCardSet, Player};

/// Identity of a snapshot. Every derived snapshot gets a fresh id; clones
/// keep theirs, so the id names one particular value.
///
/// Tasks in the solver and evaluator are keyed by this identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StateId(u64);

impl StateId {
    fn next() -> StateId {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        StateId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// State of the game: players, informants, in-play cards, and the ordered
/// action log.
///
/// A `GameState` is immutable. Appending or removing an action, or
/// updating a player or informant, produces a new snapshot with a fresh
/// [`StateId`]. The action log is a persistent vector, so snapshots share
/// structure and cloning is cheap.
#[derive(Clone, Debug)]
pub struct GameState {
    id: StateId,
    players: SmallVec<[Player; 6]>,
    informants: SmallVec<[SecretInformant; 8]>,
    cards: CardSet,
    actions: Vector<Action>,
}

impl GameState {
    /// Create a fresh game with ordinal player names.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        let glasses = Player::base_magnifying_glasses(player_count);
        Self::from_parts(
            (1..=player_count)
                .map(|ordinal| Player::with_ordinal(ordinal, glasses))
                .collect(),
            Self::informants_for(player_count),
            Card::in_play_set(player_count),
            Vector::new(),
        )
    }

    /// Create a fresh game with the given player names. The first name is
    /// the acting player.
    #[must_use]
    pub fn with_player_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let count = names.len();
        let glasses = Player::base_magnifying_glasses(count);
        Self::from_parts(
            names
                .into_iter()
                .map(|name| {
                    Player::new(name, HiddenCardSet::default(), MysteryCardSet::default(), glasses)
                })
                .collect(),
            Self::informants_for(count),
            Card::in_play_set(count),
            Vector::new(),
        )
    }

    pub(crate) fn from_parts(
        players: SmallVec<[Player; 6]>,
        informants: SmallVec<[SecretInformant; 8]>,
        cards: CardSet,
        actions: Vector<Action>,
    ) -> Self {
        assert!(
            (2..=6).contains(&players.len()),
            "player count must be between 2 and 6"
        );
        Self {
            id: StateId::next(),
            players,
            informants,
            cards,
            actions,
        }
    }

    /// The unrevealed informants a game of this size starts with.
    #[must_use]
    pub fn informants_for(player_count: usize) -> SmallVec<[SecretInformant; 8]> {
        let count = 8usize.saturating_sub((player_count.saturating_sub(2)) * 2);
        ('A'..)
            .take(count)
            .map(|name| SecretInformant::new(name, None))
            .collect()
    }

    // === Identity and components ===

    /// Identity of this snapshot.
    #[must_use]
    pub const fn id(&self) -> StateId {
        self.id
    }

    /// Players, acting player first.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The acting player.
    #[must_use]
    pub fn me(&self) -> &Player {
        &self.players[0]
    }

    /// Look up a player by name.
    #[must_use]
    pub fn player_named(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|player| player.name() == name)
    }

    /// The secret informants.
    #[must_use]
    pub fn informants(&self) -> &[SecretInformant] {
        &self.informants
    }

    /// The in-play card set.
    #[must_use]
    pub const fn cards(&self) -> CardSet {
        self.cards
    }

    /// The ordered action log.
    #[must_use]
    pub const fn actions(&self) -> &Vector<Action> {
        &self.actions
    }

    /// Number of players in the game.
    #[must_use]
    pub fn number_of_players(&self) -> usize {
        self.players.len()
    }

    /// Number of informants in the game.
    #[must_use]
    pub fn number_of_informants(&self) -> usize {
        self.informants.len()
    }

    /// Number of informants nobody has examined yet.
    #[must_use]
    pub fn number_of_unknown_informants(&self) -> usize {
        self.informants
            .iter()
            .filter(|informant| informant.card.is_none())
            .count()
    }

    /// `true` if magnifying glasses are tracked (games of 3+).
    #[must_use]
    pub fn is_tracking_magnifying_glasses(&self) -> bool {
        self.number_of_players() > 2
    }

    /// `true` if enough is known to begin solving: my hidden pair and every
    /// opponent's mystery.
    #[must_use]
    pub fn is_solveable(&self) -> bool {
        self.players
            .iter()
            .enumerate()
            .all(|(index, player)| player.is_solveable(index == 0))
    }

    // === Snapshot mutations ===

    /// Replace the player at `index`.
    #[must_use]
    pub fn with_player(&self, index: usize, player: Player) -> GameState {
        let mut players = self.players.clone();
        players[index] = player;
        Self::from_parts(players, self.informants.clone(), self.cards, self.actions.clone())
    }

    /// Replace the informant with the same name, if present.
    #[must_use]
    pub fn with_informant(&self, informant: SecretInformant) -> GameState {
        let mut informants = self.informants.clone();
        match informants.iter_mut().find(|existing| existing.name == informant.name) {
            Some(existing) => *existing = informant,
            None => return self.clone(),
        }
        Self::from_parts(self.players.clone(), informants, self.cards, self.actions.clone())
    }

    /// Append an action, resolving its resource-counter bookkeeping.
    #[must_use]
    pub fn appending(&self, action: Action) -> GameState {
        let tracking = self.is_tracking_magnifying_glasses();
        let players = self
            .players
            .iter()
            .map(|player| player.resolving_action(&action, tracking))
            .collect();
        let mut actions = self.actions.clone();
        actions.push_back(action);
        Self::from_parts(players, self.informants.clone(), self.cards, actions)
    }

    /// Remove an action and replay the remaining log from scratch to
    /// recompute the players' resource counters.
    #[must_use]
    pub fn removing(&self, action: &Action) -> GameState {
        let Some(index) = self.actions.iter().position(|logged| logged == action) else {
            return self.clone();
        };
        let mut actions = self.actions.clone();
        actions.remove(index);

        let count = self.number_of_players();
        let tracking = self.is_tracking_magnifying_glasses();
        let mut players: SmallVec<[Player; 6]> = self
            .players
            .iter()
            .map(|player| player.with_base_magnifying_glasses(count))
            .collect();
        for replayed in &actions {
            players = players
                .iter()
                .map(|player| player.resolving_action(replayed, tracking))
                .collect();
        }

        Self::from_parts(players, self.informants.clone(), self.cards, actions)
    }

    /// Remove the actions at the given log offsets.
    #[must_use]
    pub fn removing_actions_at(&self, offsets: &[usize]) -> GameState {
        let mut actions = Vector::new();
        for (index, action) in self.actions.iter().enumerate() {
            if !offsets.contains(&index) {
                actions.push_back(action.clone());
            }
        }
        Self::from_parts(self.players.clone(), self.informants.clone(), self.cards, actions)
    }

    // === Relations ===

    /// `true` if this state is knowledge-identical to `next` and its action
    /// log is an exact, strictly shorter prefix of `next`'s.
    ///
    /// This is the relation that licenses reusing a computed hypothesis set
    /// for the extended state. Resource counters are ignored: replaying an
    /// action changes them but not the card knowledge hypotheses hang on.
    #[must_use]
    pub fn is_earlier_state(&self, next: &GameState) -> bool {
        self.players.len() == next.players.len()
            && self
                .players
                .iter()
                .zip(next.players.iter())
                .all(|(mine, theirs)| mine.same_knowledge(theirs))
            && self.informants == next.informants
            && self.cards == next.cards
            && self.actions.len() < next.actions.len()
            && self
                .actions
                .iter()
                .zip(next.actions.iter())
                .all(|(mine, theirs)| mine == theirs)
    }

    // === Derived card views ===

    /// Cards visible to the named player: their own hidden cards plus
    /// every other player's mystery cards.
    #[must_use]
    pub fn cards_visible_to(&self, player_name: &str) -> CardSet {
        self.players
            .iter()
            .map(|player| {
                if player.name() == player_name {
                    player.hidden().cards()
                } else {
                    player.mystery().cards()
                }
            })
            .fold(CardSet::EMPTY, |acc, cards| acc | cards)
    }

    /// Mystery cards the acting player can see, excluding one opponent:
    /// the overlap visible to both of you.
    #[must_use]
    pub fn mystery_cards_visible_to_me(&self, excluding_player: &str) -> CardSet {
        self.players
            .iter()
            .skip(1)
            .filter(|player| player.name() != excluding_player)
            .map(|player| player.mystery().cards())
            .fold(CardSet::EMPTY, |acc, cards| acc | cards)
    }

    /// In-play cards matching a filter.
    #[must_use]
    pub fn cards_matching(&self, filter: Filter) -> CardSet {
        self.cards.matching(filter)
    }

    /// In-play cards of a color.
    #[must_use]
    pub fn cards_of_color(&self, color: Color) -> CardSet {
        self.cards.of_color(color)
    }

    /// Cards not yet tied to any player's mystery or hidden cards, nor
    /// revealed by an informant.
    #[must_use]
    pub fn unallocated_cards(&self) -> CardSet {
        let mut cards = self.cards;
        for player in &self.players {
            cards -= player.mystery().cards();
            cards -= player.hidden().cards();
        }
        for informant in &self.informants {
            if let Some(card) = informant.card {
                cards.remove(card);
            }
        }
        cards
    }

    /// Cards that were not visible to the acting player at the start of
    /// the game: everything except my hidden pair and the opponents'
    /// mysteries.
    #[must_use]
    pub fn initial_unknown_cards(&self) -> CardSet {
        let mut cards = self.cards - self.me().hidden().cards();
        for player in self.players.iter().skip(1) {
            cards -= player.mystery().cards();
        }
        cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Category, Gender};
    use crate::state::action::{Accusation, Examination, Inquisition};

    fn man_filter() -> Filter {
        Filter::Category(Category::Person(Gender::Man))
    }

    #[test]
    fn test_new_game_shape() {
        let state = GameState::new(3);
        assert_eq!(state.number_of_players(), 3);
        assert_eq!(state.number_of_informants(), 6);
        assert_eq!(state.number_of_unknown_informants(), 6);
        assert_eq!(state.cards().len(), 21);
        assert!(state.is_tracking_magnifying_glasses());
        assert!(!state.is_solveable());
    }

    #[test]
    fn test_informant_counts_by_player_count() {
        assert_eq!(GameState::new(2).number_of_informants(), 8);
        assert_eq!(GameState::new(4).number_of_informants(), 4);
        assert_eq!(GameState::new(6).number_of_informants(), 0);
    }

    #[test]
    fn test_appending_keeps_original_untouched() {
        let state = GameState::new(3);
        let appended = state.appending(Action::Examination(Examination::new(0, "Player 1", 'A')));

        assert_eq!(state.actions().len(), 0);
        assert_eq!(appended.actions().len(), 1);
        assert_ne!(state.id(), appended.id());
    }

    #[test]
    fn test_magnifying_glass_bookkeeping() {
        let state = GameState::new(3);
        let asked = state.appending(Action::Inquisition(Inquisition::new(
            0,
            "Player 1",
            "Player 2",
            man_filter(),
            None,
            1,
        )));

        assert_eq!(asked.player_named("Player 1").unwrap().magnifying_glasses(), 0);
        assert_eq!(asked.player_named("Player 2").unwrap().magnifying_glasses(), 2);
        assert_eq!(asked.player_named("Player 3").unwrap().magnifying_glasses(), 1);
    }

    #[test]
    fn test_removing_replays_counters() {
        let state = GameState::new(3);
        let inquisition = Action::Inquisition(Inquisition::new(
            0,
            "Player 1",
            "Player 2",
            man_filter(),
            None,
            1,
        ));
        let examination = Action::Examination(Examination::new(1, "Player 3", 'B'));

        let grown = state.appending(inquisition.clone()).appending(examination);
        let shrunk = grown.removing(&inquisition);

        assert_eq!(shrunk.actions().len(), 1);
        assert_eq!(shrunk.player_named("Player 1").unwrap().magnifying_glasses(), 1);
        assert_eq!(shrunk.player_named("Player 2").unwrap().magnifying_glasses(), 1);
        assert_eq!(shrunk.player_named("Player 3").unwrap().magnifying_glasses(), 0);
    }

    #[test]
    fn test_is_earlier_state() {
        let state = GameState::new(3);
        let later = state.appending(Action::Examination(Examination::new(0, "Player 1", 'A')));

        assert!(state.is_earlier_state(&later));
        assert!(!later.is_earlier_state(&state));
        assert!(!state.is_earlier_state(&state));

        let unrelated = GameState::new(3).appending(Action::Examination(Examination::new(
            0, "Player 2", 'B',
        )));
        assert!(!unrelated.is_earlier_state(&later));
    }

    #[test]
    fn test_earlier_state_survives_counter_changes() {
        let state = GameState::new(3);
        let later = state.appending(Action::Inquisition(Inquisition::new(
            0,
            "Player 2",
            "Player 3",
            man_filter(),
            None,
            2,
        )));
        // The inquisition moved counters around; knowledge is unchanged.
        assert!(state.is_earlier_state(&later));
    }

    #[test]
    fn test_visible_cards() {
        let state = GameState::new(3)
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
            );

        let visible_to_me = state.cards_visible_to("Player 1");
        assert!(visible_to_me.contains(Card::Duke));
        assert!(visible_to_me.contains(Card::Knife));
        assert!(visible_to_me.contains(Card::Nurse));

        let visible_to_them = state.cards_visible_to("Player 2");
        assert!(!visible_to_them.contains(Card::Duke));
        assert!(!visible_to_them.contains(Card::Nurse));

        assert_eq!(
            state.mystery_cards_visible_to_me("Player 2"),
            CardSet::EMPTY
        );
        assert_eq!(state.mystery_cards_visible_to_me("Player 3").len(), 3);
    }

    #[test]
    fn test_unallocated_and_initial_unknown() {
        let state = GameState::new(3)
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
            );

        // 21 in play - 2 hidden - 6 mystery
        assert_eq!(state.unallocated_cards().len(), 13);
        assert_eq!(state.initial_unknown_cards().len(), 13);

        let informed = state.with_informant(SecretInformant::new('A', Some(Card::Gun)));
        assert_eq!(informed.unallocated_cards().len(), 12);
        assert_eq!(informed.initial_unknown_cards().len(), 13);
    }

    #[test]
    fn test_accusation_leaves_counters_alone() {
        let state = GameState::new(3);
        let accused = state.appending(Action::Accusation(Accusation::new(
            0,
            "Player 2",
            MysteryCardSet::new(Some(Card::Duke), Some(Card::Park), Some(Card::Knife)),
        )));
        for player in accused.players() {
            assert_eq!(player.magnifying_glasses(), 1);
        }
    }
}
