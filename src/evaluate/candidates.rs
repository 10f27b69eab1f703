//! Candidate next actions and their enumeration.

use std::cmp::Ordering;

use crate::cards::{Category, Filter};
use crate::state::{GameState, HiddenCardPosition};

/// A question to consider asking: a player and a filter, plus the
/// hidden-card side in two-player games.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Inquiry {
    /// Name of the player who would be asked.
    pub player: String,
    /// What the question would be about.
    pub filter: Filter,
    /// In two-player games, which of the answerer's hidden cards counts.
    pub including_card_on_side: Option<HiddenCardPosition>,
}

impl Inquiry {
    /// Create an inquiry candidate.
    #[must_use]
    pub fn new(
        player: impl Into<String>,
        filter: Filter,
        including_card_on_side: Option<HiddenCardPosition>,
    ) -> Self {
        Self {
            player: player.into(),
            filter,
            including_card_on_side,
        }
    }
}

impl PartialOrd for Inquiry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Inquiry {
    fn cmp(&self, other: &Self) -> Ordering {
        let side = |inquiry: &Inquiry| {
            inquiry
                .including_card_on_side
                .unwrap_or(HiddenCardPosition::Right)
        };
        (&self.player, self.filter, side(self)).cmp(&(&other.player, other.filter, side(other)))
    }
}

/// An informant to consider examining.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Informing {
    /// Identity of the informant.
    pub informant: char,
}

impl Informing {
    /// Create an informing candidate.
    #[must_use]
    pub const fn new(informant: char) -> Self {
        Self { informant }
    }
}

/// A candidate next action: ask a question or examine an informant.
///
/// Inquiries order before informings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CandidateAction {
    Inquiry(Inquiry),
    Informing(Informing),
}

impl PartialOrd for CandidateAction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CandidateAction {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CandidateAction::Inquiry(left), CandidateAction::Inquiry(right)) => left.cmp(right),
            (CandidateAction::Informing(left), CandidateAction::Informing(right)) => {
                left.cmp(right)
            }
            (CandidateAction::Inquiry(_), CandidateAction::Informing(_)) => Ordering::Less,
            (CandidateAction::Informing(_), CandidateAction::Inquiry(_)) => Ordering::Greater,
        }
    }
}

impl GameState {
    /// Every filter a question could be scoped to in this game: the six
    /// categories plus each color still in play.
    fn inquiry_filters(&self) -> Vec<Filter> {
        Category::ALL
            .into_iter()
            .map(Filter::Category)
            .chain(self.cards().colors().map(Filter::Color))
            .collect()
    }

    /// Every question worth considering: each opponent crossed with each
    /// filter, and with both hidden-card sides when exactly two players
    /// are in the game.
    #[must_use]
    pub fn all_possible_inquiries(&self) -> Vec<Inquiry> {
        let sides: &[Option<HiddenCardPosition>] = if self.number_of_players() == 2 {
            &[Some(HiddenCardPosition::Left), Some(HiddenCardPosition::Right)]
        } else {
            &[None]
        };

        let filters = self.inquiry_filters();
        self.players()
            .iter()
            .skip(1)
            .flat_map(|player| {
                filters.iter().flat_map(move |&filter| {
                    sides
                        .iter()
                        .map(move |&side| Inquiry::new(player.name(), filter, side))
                })
            })
            .collect()
    }

    /// Every informant that could be examined.
    #[must_use]
    pub fn all_possible_informings(&self) -> Vec<Informing> {
        self.informants()
            .iter()
            .map(|informant| Informing::new(informant.name))
            .collect()
    }

    /// Every candidate next action.
    #[must_use]
    pub fn all_possible_actions(&self) -> Vec<CandidateAction> {
        self.all_possible_inquiries()
            .into_iter()
            .map(CandidateAction::Inquiry)
            .chain(
                self.all_possible_informings()
                    .into_iter()
                    .map(CandidateAction::Informing),
            )
            .collect()
    }

    /// `true` if this exact question is already in the log.
    #[must_use]
    pub fn player_has_been_asked(&self, inquiry: &Inquiry) -> bool {
        self.actions().iter().any(|action| {
            action.as_inquisition().is_some_and(|inquisition| {
                inquisition.answering_player == inquiry.player
                    && inquisition.filter == inquiry.filter
                    && inquisition.including_card_on_side == inquiry.including_card_on_side
            })
        })
    }

    /// `true` if the informant has already been revealed.
    #[must_use]
    pub fn has_been_informed(&self, informant: char) -> bool {
        self.informants()
            .iter()
            .any(|existing| existing.name == informant && existing.card.is_some())
    }

    /// `true` if taking the candidate would repeat the log.
    #[must_use]
    pub fn action_has_been_taken(&self, action: &CandidateAction) -> bool {
        match action {
            CandidateAction::Inquiry(inquiry) => self.player_has_been_asked(inquiry),
            CandidateAction::Informing(informing) => self.has_been_informed(informing.informant),
        }
    }
}
