//! Runs the configured plays against an in-memory game

use crate::config::{ChainKeys, Config, PlayConfig};
use crate::tx_builder::{build_play_instruction, PlayKeys};
use futures::future::join_all;
use serde::Serialize;
use solana_sdk::{hash::hash, instruction::Instruction, pubkey::Pubkey};
use std::collections::HashMap;
use throne_model::host::SharedGame;
use throne_model::memory::{FixedRate, MemoryCustody};
use throne_model::{Coronation, Denomination, GameController, GameError, Identity};

#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("play #{index} names unknown player {name:?}")]
    UnknownPlayer { index: usize, name: String },

    #[error("player {0:?} is listed twice")]
    DuplicatePlayer(String),

    #[error("play task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Stable identity for a player name
pub fn identity_of(name: &str) -> Identity {
    hash(name.as_bytes()).to_bytes()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayReport {
    pub player: String,
    pub denomination: Denomination,
    pub amount: u64,
    pub accepted: bool,
    /// Rejection reason
    pub error: Option<String>,
    pub canonical_value: Option<u128>,
    /// Player paid back by this play
    pub displaced: Option<String>,
    /// Equivalent on-chain play, for accepted plays
    pub instruction: Option<InstructionReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstructionReport {
    /// Base58 instruction data
    pub data: String,
    pub accounts: Vec<String>,
}

impl From<Instruction> for InstructionReport {
    fn from(instruction: Instruction) -> Self {
        Self {
            data: bs58::encode(&instruction.data).into_string(),
            accounts: instruction
                .accounts
                .iter()
                .map(|meta| meta.pubkey.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HolderReport {
    pub player: String,
    pub pubkey: String,
    pub denomination: Denomination,
    pub raw_amount: u64,
    pub canonical_value: u128,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub plays: Vec<PlayReport>,
    pub holder: Option<HolderReport>,
    pub reigns: u64,
    /// Native and token units still in custody
    pub held: (u64, u64),
    /// Signed UpdatePrice + Initialize transaction when an authority
    /// keypair is configured
    pub setup_transaction: Option<String>,
}

type Game = SharedGame<FixedRate, MemoryCustody>;

pub struct Scenario {
    config: Config,
    keys: ChainKeys,
    names: HashMap<Identity, String>,
}

impl Scenario {
    pub fn new(config: Config, keys: ChainKeys) -> Result<Self, ScenarioError> {
        let mut names = HashMap::new();
        for player in &config.players {
            if names
                .insert(identity_of(&player.name), player.name.clone())
                .is_some()
            {
                return Err(ScenarioError::DuplicatePlayer(player.name.clone()));
            }
        }
        for (index, play) in config.plays.iter().enumerate() {
            if !names.contains_key(&identity_of(&play.player)) {
                return Err(ScenarioError::UnknownPlayer {
                    index,
                    name: play.player.clone(),
                });
            }
        }
        Ok(Self {
            config,
            keys,
            names,
        })
    }

    fn setup(&self) -> Game {
        let mut custody = MemoryCustody::new();
        for player in &self.config.players {
            let id = identity_of(&player.name);
            custody.fund(Denomination::Primary, &id, player.primary);
            custody.fund(Denomination::Secondary, &id, player.secondary);
            custody.approve(&id, player.secondary);
        }
        let rate = FixedRate::new(
            i128::from(self.config.rate_price),
            self.config.rate_decimals,
        );
        SharedGame::new(GameController::new(rate, custody, self.config.scales))
    }

    fn name_of(&self, id: &Identity) -> String {
        self.names
            .get(id)
            .cloned()
            .unwrap_or_else(|| Pubkey::new_from_array(*id).to_string())
    }

    /// Play accounts for an accepted play; `prior` is the holder it displaced
    fn play_keys(&self, player: &Identity, prior: Option<Identity>) -> PlayKeys {
        let player = Pubkey::new_from_array(*player);
        let prior = prior.map_or(player, Pubkey::new_from_array);
        PlayKeys {
            player,
            player_token: token_account_of(&player),
            oracle_feed: self.keys.oracle_feed,
            vault: self.keys.vault,
            prior_holder: prior,
            prior_holder_token: token_account_of(&prior),
        }
    }

    fn play(&self, game: &Game, play: &PlayConfig) -> PlayReport {
        let caller = identity_of(&play.player);
        let result = game.deposit(&caller, play.denomination, play.amount);
        self.report(play, &caller, result)
    }

    fn report(
        &self,
        play: &PlayConfig,
        caller: &Identity,
        result: Result<Coronation, GameError>,
    ) -> PlayReport {
        let (accepted, error, canonical_value, displaced, instruction) = match result {
            Ok(coronation) => {
                // The coronation names the holder this play actually displaced
                let prior = coronation.displaced.map(|(who, _)| who);
                let instruction = build_play_instruction(
                    &self.keys.throne_program,
                    play.denomination,
                    &self.play_keys(caller, prior),
                    play.amount,
                );
                (
                    true,
                    None,
                    Some(coronation.deposit.canonical_value),
                    prior.map(|who| self.name_of(&who)),
                    Some(InstructionReport::from(instruction)),
                )
            }
            Err(e) => {
                log::info!("{} {:?} {} rejected: {}", play.player, play.denomination, play.amount, e);
                (false, Some(e.to_string()), None, None, None)
            }
        };
        PlayReport {
            player: play.player.clone(),
            denomination: play.denomination,
            amount: play.amount,
            accepted,
            error,
            canonical_value,
            displaced,
            instruction,
        }
    }

    fn finish(&self, game: &Game, plays: Vec<PlayReport>) -> Report {
        let holder = game.record().map(|record| HolderReport {
            player: self.name_of(&record.holder),
            pubkey: Pubkey::new_from_array(record.holder).to_string(),
            denomination: record.denomination,
            raw_amount: record.raw_amount,
            canonical_value: record.canonical_value,
        });
        let (reigns, held) = game.with(|g| {
            let custody = g.custody();
            (
                g.ledger().reigns(),
                (
                    custody.held(Denomination::Primary),
                    custody.held(Denomination::Secondary),
                ),
            )
        });
        Report {
            plays,
            holder,
            reigns,
            held,
            setup_transaction: None,
        }
    }

    /// One play after another, in configured order
    pub fn run_sequential(&self) -> Report {
        let game = self.setup();
        let plays = self
            .config
            .plays
            .iter()
            .map(|play| self.play(&game, play))
            .collect();
        self.finish(&game, plays)
    }

    /// Every play as its own task; the game's lock decides the order
    pub async fn run_concurrent(self: std::sync::Arc<Self>) -> Result<Report, ScenarioError> {
        let game = self.setup();
        let tasks = self.config.plays.iter().cloned().map(|play| {
            let game = game.clone();
            let scenario = std::sync::Arc::clone(&self);
            tokio::spawn(async move { scenario.play(&game, &play) })
        });

        let mut plays = Vec::with_capacity(self.config.plays.len());
        for joined in join_all(tasks).await {
            plays.push(joined?);
        }
        Ok(self.finish(&game, plays))
    }
}

/// Deterministic stand-in for a player's associated token account
fn token_account_of(owner: &Pubkey) -> Pubkey {
    let mut seed = owner.to_bytes().to_vec();
    seed.extend_from_slice(b"token");
    Pubkey::new_from_array(hash(&seed).to_bytes())
}
