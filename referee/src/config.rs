//! Referee configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;
use throne_model::{Denomination, DenominationScales};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Rate feed answer: one whole token in whole native units, scaled by
    /// `10^rate_decimals`
    pub rate_price: i64,

    pub rate_decimals: u8,

    /// Run all plays as concurrent tasks instead of one after another
    pub concurrent: bool,

    pub scales: DenominationScales,

    pub players: Vec<PlayerConfig>,

    /// Plays in submission order
    pub plays: Vec<PlayConfig>,

    /// Accounts used when encoding the plays as program instructions
    pub chain: ChainConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub name: String,

    /// Starting native balance, base units
    pub primary: u64,

    /// Starting token balance, base units; fully approved to the game
    pub secondary: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayConfig {
    pub player: String,
    pub denomination: Denomination,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainConfig {
    pub throne_program: String,
    pub oracle_feed: String,
    pub secondary_mint: String,
    pub vault: String,

    /// Keypair that operates the feed and signs the encoded setup transaction
    pub authority_keypair: Option<String>,
}

/// Parsed `ChainConfig` keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainKeys {
    pub throne_program: Pubkey,
    pub oracle_feed: Pubkey,
    pub secondary_mint: Pubkey,
    pub vault: Pubkey,
}

impl ChainConfig {
    pub fn keys(&self) -> Result<ChainKeys> {
        let parse = |name: &str, value: &str| {
            Pubkey::from_str(value).with_context(|| format!("Invalid {} pubkey: {}", name, value))
        };
        Ok(ChainKeys {
            throne_program: parse("throne_program", &self.throne_program)?,
            oracle_feed: parse("oracle_feed", &self.oracle_feed)?,
            secondary_mint: parse("secondary_mint", &self.secondary_mint)?,
            vault: parse("vault", &self.vault)?,
        })
    }
}

impl Config {
    /// Config file path: `REFEREE_CONFIG`, else `referee.toml`
    pub fn path() -> String {
        std::env::var("REFEREE_CONFIG").unwrap_or_else(|_| "referee.toml".to_string())
    }

    /// Load configuration from TOML file
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &str) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path))?;

        let config: Config = toml::from_str(&config_str).context("Failed to parse config TOML")?;

        Ok(config)
    }

    /// Native ETH-style asset (18 decimals) against a 6 decimal stablecoin,
    /// priced like an aggregator feed, with the classic escalation
    pub fn default_demo() -> Self {
        let player = |name: &str| PlayerConfig {
            name: name.to_string(),
            primary: 5_000_000_000_000_000_000,
            secondary: 100_000_000_000,
        };
        let play = |player: &str, denomination, amount| PlayConfig {
            player: player.to_string(),
            denomination,
            amount,
        };
        Self {
            rate_price: 758_361_423_347_072,
            rate_decimals: 18,
            concurrent: false,
            scales: DenominationScales::new(18, 6),
            players: vec![player("alice"), player("bob"), player("carol")],
            plays: vec![
                play("alice", Denomination::Primary, 1_000_000_000_000_000_000),
                play("bob", Denomination::Primary, 1_500_000_000_000_000_000),
                play("bob", Denomination::Secondary, 2_200_000_000),
                play("carol", Denomination::Primary, 2_600_000_000_000_000_000),
                play("alice", Denomination::Secondary, 5_200_000_000),
            ],
            chain: ChainConfig {
                throne_program: Pubkey::new_from_array(kingmaker_throne::ID).to_string(),
                oracle_feed: Pubkey::new_from_array([2; 32]).to_string(),
                secondary_mint: Pubkey::new_from_array([3; 32]).to_string(),
                vault: Pubkey::new_from_array([4; 32]).to_string(),
                authority_keypair: None,
            },
        }
    }

    /// Write default config to file
    pub fn write_default(path: &str) -> Result<()> {
        let config = Self::default_demo();
        let toml_str = toml::to_string_pretty(&config).context("Failed to serialize config")?;

        std::fs::write(path, toml_str).context(format!("Failed to write config to {}", path))?;

        log::info!("Created default config at {}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_creation() {
        let config = Config::default_demo();
        assert_eq!(config.rate_decimals, 18);
        assert_eq!(config.players.len(), 3);
        assert!(!config.concurrent);
        assert!(config.chain.keys().is_ok());
    }

    #[test]
    fn test_config_toml_roundtrip() {
        let config = Config::default_demo();
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("denomination = \"Secondary\""));
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_write_default_then_load() {
        let path = std::env::temp_dir().join(format!("referee-{}.toml", std::process::id()));
        let path = path.to_str().unwrap();

        Config::write_default(path).unwrap();
        let loaded = Config::load_from(path).unwrap();
        std::fs::remove_file(path).unwrap();

        assert_eq!(loaded, Config::default_demo());
    }

    #[test]
    fn test_bad_pubkey_is_reported() {
        let mut config = Config::default_demo();
        config.chain.vault = "not-a-key".to_string();
        let err = config.chain.keys().unwrap_err();
        assert!(err.to_string().contains("vault"));
    }
}
