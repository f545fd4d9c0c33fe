//! Health, score, and phase authority
//!
//! The single mutation point for both health pools. Every damage path
//! (melee, projectile, contact) funnels through here, which is what
//! makes the phase guards airtight: once a terminal phase is entered,
//! later damage in the same tick's drain is a no-op.

use bevy::prelude::*;
use serde::Serialize;

use crate::sim::constants::{AUTOMATON_MAX_HEALTH, PLAYER_MAX_HEALTH, VICTORY_BONUS};

/// Session phase. `PlayerDead` and `Victory` are terminal until a heal
/// or reset leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Phase {
    #[default]
    Playing,
    PlayerDead,
    Victory,
}

/// Authoritative health, score, and phase for the session.
#[derive(Resource, Debug, Clone)]
pub struct GameState {
    pub player_health: f32,
    pub player_max_health: f32,
    pub automaton_health: f32,
    pub automaton_max_health: f32,
    pub score: u32,
    pub phase: Phase,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(PLAYER_MAX_HEALTH, AUTOMATON_MAX_HEALTH)
    }
}

impl GameState {
    pub fn new(player_max_health: f32, automaton_max_health: f32) -> Self {
        Self {
            player_health: player_max_health,
            player_max_health,
            automaton_health: automaton_max_health,
            automaton_max_health,
            score: 0,
            phase: Phase::Playing,
        }
    }

    pub fn is_player_dead(&self) -> bool {
        self.phase == Phase::PlayerDead
    }

    pub fn is_victory(&self) -> bool {
        self.phase == Phase::Victory
    }

    /// Damage the player. Suppressed after victory. Health clamps at
    /// zero; reaching zero enters `PlayerDead`. Returns the health
    /// actually removed.
    pub fn damage_player(&mut self, amount: f32) -> f32 {
        if self.phase == Phase::Victory || amount <= 0.0 {
            return 0.0;
        }

        let applied = amount.min(self.player_health);
        self.player_health -= applied;
        if self.player_health <= 0.0 {
            self.player_health = 0.0;
            self.phase = Phase::PlayerDead;
        }
        applied
    }

    /// Damage the automaton. Suppressed after player death. Scores the
    /// full (un-clamped) amount, rounded up; the killing blow also
    /// awards the victory bonus and enters `Victory`. Returns the
    /// health actually removed.
    pub fn damage_automaton(&mut self, amount: f32) -> f32 {
        if self.phase == Phase::PlayerDead || amount <= 0.0 {
            return 0.0;
        }

        self.score += amount.ceil() as u32;

        let applied = amount.min(self.automaton_health);
        self.automaton_health -= applied;
        if applied > 0.0 && self.automaton_health <= 0.0 {
            self.automaton_health = 0.0;
            self.phase = Phase::Victory;
            self.score += VICTORY_BONUS;
        }
        applied
    }

    /// Heal the player, clamped to max. Healing out of zero leaves
    /// `PlayerDead`.
    pub fn heal_player(&mut self, amount: f32) {
        if amount <= 0.0 {
            return;
        }
        self.player_health = (self.player_health + amount).min(self.player_max_health);
        if self.phase == Phase::PlayerDead && self.player_health > 0.0 {
            self.phase = Phase::Playing;
        }
    }

    /// Heal the automaton, clamped to max. Healing out of zero leaves
    /// `Victory` (used for rematch-style flows).
    pub fn heal_automaton(&mut self, amount: f32) {
        if amount <= 0.0 {
            return;
        }
        self.automaton_health = (self.automaton_health + amount).min(self.automaton_max_health);
        if self.phase == Phase::Victory && self.automaton_health > 0.0 {
            self.phase = Phase::Playing;
        }
    }

    /// Restore both pools to max and resume play; the score carries over.
    pub fn reset_health(&mut self) {
        self.player_health = self.player_max_health;
        self.automaton_health = self.automaton_max_health;
        self.phase = Phase::Playing;
    }

    /// Full reset: health, phase, and score.
    pub fn reset_game_state(&mut self) {
        self.reset_health();
        self.score = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_dies_after_three_heavy_hits() {
        let mut state = GameState::new(100.0, 500.0);
        assert_eq!(state.damage_player(40.0), 40.0);
        assert_eq!(state.damage_player(40.0), 40.0);
        assert_eq!(state.phase, Phase::Playing);
        // Third hit over-kills; only the remaining 20 is applied.
        assert_eq!(state.damage_player(40.0), 20.0);
        assert_eq!(state.player_health, 0.0);
        assert_eq!(state.phase, Phase::PlayerDead);
    }

    #[test]
    fn test_automaton_death_awards_victory_bonus() {
        let mut state = GameState::new(100.0, 500.0);
        for _ in 0..10 {
            state.damage_automaton(50.0);
        }
        assert_eq!(state.automaton_health, 0.0);
        assert_eq!(state.phase, Phase::Victory);
        // 10 * 50 scored plus the bonus.
        assert_eq!(state.score, 500 + VICTORY_BONUS);
    }

    #[test]
    fn test_score_rounds_fractional_damage_up() {
        let mut state = GameState::new(100.0, 500.0);
        state.damage_automaton(20.4);
        assert_eq!(state.score, 21);
    }

    #[test]
    fn test_no_automaton_damage_after_player_death() {
        let mut state = GameState::new(100.0, 500.0);
        state.damage_player(200.0);
        assert_eq!(state.phase, Phase::PlayerDead);
        assert_eq!(state.damage_automaton(50.0), 0.0);
        assert_eq!(state.automaton_health, 500.0);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_no_player_damage_after_victory() {
        let mut state = GameState::new(100.0, 500.0);
        state.damage_automaton(500.0);
        assert_eq!(state.phase, Phase::Victory);
        assert_eq!(state.damage_player(50.0), 0.0);
        assert_eq!(state.player_health, 100.0);
    }

    #[test]
    fn test_non_positive_damage_is_ignored() {
        let mut state = GameState::new(100.0, 500.0);
        assert_eq!(state.damage_player(0.0), 0.0);
        assert_eq!(state.damage_player(-5.0), 0.0);
        assert_eq!(state.damage_automaton(-5.0), 0.0);
        assert_eq!(state.player_health, 100.0);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_overkill_does_not_double_victory_bonus() {
        let mut state = GameState::new(100.0, 500.0);
        state.damage_automaton(500.0);
        let score_after_kill = state.score;
        state.damage_automaton(50.0);
        // Post-kill hits still score but never re-award the bonus.
        assert_eq!(state.score, score_after_kill + 50);
        assert_eq!(state.automaton_health, 0.0);
        assert_eq!(state.phase, Phase::Victory);
    }

    #[test]
    fn test_heal_clamps_to_max() {
        let mut state = GameState::new(100.0, 500.0);
        state.damage_player(30.0);
        state.heal_player(1000.0);
        assert_eq!(state.player_health, 100.0);
    }

    #[test]
    fn test_heal_revives_dead_player() {
        let mut state = GameState::new(100.0, 500.0);
        state.damage_player(200.0);
        assert_eq!(state.phase, Phase::PlayerDead);
        state.heal_player(50.0);
        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(state.player_health, 50.0);
    }

    #[test]
    fn test_heal_reactivates_defeated_automaton() {
        let mut state = GameState::new(100.0, 500.0);
        state.damage_automaton(500.0);
        assert_eq!(state.phase, Phase::Victory);
        state.heal_automaton(100.0);
        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(state.automaton_health, 100.0);
    }

    #[test]
    fn test_reset_health_keeps_score() {
        let mut state = GameState::new(100.0, 500.0);
        state.damage_automaton(50.0);
        state.damage_player(200.0);
        state.reset_health();
        assert_eq!(state.player_health, 100.0);
        assert_eq!(state.automaton_health, 500.0);
        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(state.score, 50);
    }

    #[test]
    fn test_reset_game_state_clears_score() {
        let mut state = GameState::new(100.0, 500.0);
        state.damage_automaton(50.0);
        state.reset_game_state();
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, Phase::Playing);
    }

    #[test]
    fn test_custom_health_pools() {
        let state = GameState::new(150.0, 50.0);
        assert_eq!(state.player_health, 150.0);
        assert_eq!(state.automaton_health, 50.0);
        assert_eq!(state.player_max_health, 150.0);
        assert_eq!(state.automaton_max_health, 50.0);
    }
}
