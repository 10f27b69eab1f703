//! Seed import: bootstrap a game from a keyed-list description.
//!
//! The format is a JSON object mapping each player's name to a list of
//! named cards. Exactly one player lists two cards (the acting player's
//! hidden pair); everyone else lists the three cards of their mystery.

use std::collections::BTreeMap;

use serde::Deserialize;
use smallvec::SmallVec;
use thiserror::Error;

use crate::cards::Card;

use super::game::GameState;
use super::player::{HiddenCardSet, MysteryCardSet, Player};

/// Why a seed could not be turned into a game state.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("seed is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown card name `{0}`")]
    UnknownCard(String),
    #[error("seed must name 2 to 6 players, got {0}")]
    PlayerCount(usize),
    #[error("exactly one player must list two hidden cards")]
    ActingPlayer,
    #[error("player `{0}` must list two or three cards")]
    CardCount(String),
    #[error("player `{0}` needs one person, one location, and one weapon")]
    IncompleteMystery(String),
}

#[derive(Deserialize)]
struct CardSeed {
    name: String,
}

type SeedState = BTreeMap<String, Vec<CardSeed>>;

impl GameState {
    /// Build a fresh game from a seed string.
    ///
    /// The acting player is the entry listing two cards; the remaining
    /// players are ordered by name.
    pub fn from_seed(seed: &str) -> Result<GameState, SeedError> {
        let seed: SeedState = serde_json::from_str(seed)?;
        let player_count = seed.len();
        if !(2..=6).contains(&player_count) {
            return Err(SeedError::PlayerCount(player_count));
        }

        let mut acting: Option<(String, Vec<Card>)> = None;
        let mut others: Vec<(String, Vec<Card>)> = Vec::new();
        for (name, card_seeds) in seed {
            let cards = card_seeds
                .iter()
                .map(|seed| {
                    seed.name
                        .parse::<Card>()
                        .map_err(|()| SeedError::UnknownCard(seed.name.clone()))
                })
                .collect::<Result<Vec<Card>, SeedError>>()?;
            match cards.len() {
                2 => {
                    if acting.replace((name, cards)).is_some() {
                        return Err(SeedError::ActingPlayer);
                    }
                }
                3 => others.push((name, cards)),
                _ => return Err(SeedError::CardCount(name)),
            }
        }
        let (my_name, my_cards) = acting.ok_or(SeedError::ActingPlayer)?;

        let glasses = Player::base_magnifying_glasses(player_count);
        let mut players: SmallVec<[Player; 6]> = SmallVec::new();
        players.push(Player::new(
            my_name,
            HiddenCardSet::new(Some(my_cards[0]), Some(my_cards[1])),
            MysteryCardSet::default(),
            glasses,
        ));
        for (name, cards) in others {
            let person = cards.iter().copied().find(|card| card.is_person());
            let location = cards.iter().copied().find(|card| card.is_location());
            let weapon = cards.iter().copied().find(|card| card.is_weapon());
            let (Some(person), Some(location), Some(weapon)) = (person, location, weapon) else {
                return Err(SeedError::IncompleteMystery(name));
            };
            players.push(Player::new(
                name,
                HiddenCardSet::default(),
                MysteryCardSet::new(Some(person), Some(location), Some(weapon)),
                glasses,
            ));
        }

        Ok(GameState::from_parts(
            players,
            GameState::informants_for(player_count),
            Card::in_play_set(player_count),
            im::Vector::new(),
        ))
    }
}
