// src/domain/config.rs

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::engine::errors::EngineError;

/// Уровень блайндов, действующий начиная с раунда `from_round`.
/// Пример: from_round = 11, small_blind = 10, ante = 1.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlindLevel {
    /// Номер раунда (с 1), с которого включается уровень.
    pub from_round: u32,
    pub small_blind: Chips,
    #[serde(default)]
    pub ante: Chips,
}

impl BlindLevel {
    pub fn new(from_round: u32, small_blind: Chips, ante: Chips) -> Self {
        Self {
            from_round,
            small_blind,
            ante,
        }
    }
}

/// Правила матча. Уходят игрокам как `rule` в game_information.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchConfig {
    pub initial_stack: Chips,
    pub max_round: u32,
    pub small_blind_amount: Chips,
    #[serde(default)]
    pub ante: Chips,
    /// Повышение блайндов по раундам. Пусто – блайнды фиксированы.
    #[serde(default)]
    pub blind_structure: Vec<BlindLevel>,
}

impl MatchConfig {
    pub fn new(initial_stack: Chips, max_round: u32, small_blind_amount: Chips) -> Self {
        Self {
            initial_stack,
            max_round,
            small_blind_amount,
            ante: Chips::ZERO,
            blind_structure: Vec::new(),
        }
    }

    pub fn with_ante(mut self, ante: Chips) -> Self {
        self.ante = ante;
        self
    }

    pub fn with_blind_structure(mut self, levels: Vec<BlindLevel>) -> Self {
        self.blind_structure = levels;
        self
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.initial_stack.is_zero() {
            return Err(EngineError::InvalidConfig("initial_stack = 0".into()));
        }
        if self.max_round == 0 {
            return Err(EngineError::InvalidConfig("max_round = 0".into()));
        }
        if self.small_blind_amount.is_zero() {
            return Err(EngineError::InvalidConfig("small_blind_amount = 0".into()));
        }

        let mut prev_round = 1u32;
        for lvl in &self.blind_structure {
            if lvl.small_blind.is_zero() {
                return Err(EngineError::InvalidConfig(format!(
                    "BlindLevel с раунда {}: small_blind = 0",
                    lvl.from_round
                )));
            }
            if lvl.from_round <= prev_round {
                return Err(EngineError::InvalidConfig(format!(
                    "BlindLevel: раунды должны строго расти после {}, получено {}",
                    prev_round, lvl.from_round
                )));
            }
            prev_round = lvl.from_round;
        }

        Ok(())
    }

    /// Блайнд и анте для раунда `round_count` (с учётом структуры).
    pub fn blinds_for_round(&self, round_count: u32) -> (Chips, Chips) {
        self.blind_structure
            .iter()
            .rev()
            .find(|lvl| lvl.from_round <= round_count)
            .map(|lvl| (lvl.small_blind, lvl.ante))
            .unwrap_or((self.small_blind_amount, self.ante))
    }

    pub fn from_json_str(raw: &str) -> Result<Self, EngineError> {
        let config: MatchConfig = serde_json::from_str(raw)
            .map_err(|e| EngineError::InvalidConfig(format!("битый JSON конфига: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            EngineError::InvalidConfig(format!("не удалось прочитать {}: {e}", path.display()))
        })?;
        Self::from_json_str(&raw)
    }
}
