//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result};

use eigenwalk_board::BoardSettings;
use eigenwalk_chain::ChainConfig;
use eigenwalk_ruin::RuinConfig;

use crate::config::{BoardToml, ChainToml, RuinToml};

/// Builds a validated `ChainConfig` from the `[chain]` section.
pub fn build_chain_config(t: &ChainToml) -> Result<ChainConfig> {
    let config = ChainConfig::new()
        .with_stochastic_tolerance(t.stochastic_tolerance)
        .with_stationary_tolerance(t.stationary_tolerance)
        .with_cluster_tolerance(t.cluster_tolerance)
        .with_max_iterations(t.max_iterations);
    config.validate().context("invalid [chain] config")?;
    Ok(config)
}

/// Builds a validated `RuinConfig` from the `[ruin]` section.
pub fn build_ruin_config(t: &RuinToml) -> Result<RuinConfig> {
    let config = RuinConfig::new()
        .with_limits(t.lower_limit, t.upper_limit)
        .with_initial_position(t.initial_position)
        .with_prob_up(t.prob_up);
    config.validate().context("invalid [ruin] config")?;
    Ok(config)
}

/// Builds validated `BoardSettings` from the `[board]` section.
pub fn build_board_settings(t: &BoardToml) -> Result<BoardSettings> {
    let settings = BoardSettings::new()
        .with_three_doubles_jail(t.three_doubles_jail)
        .with_n_chance(t.n_chance)
        .with_chance_locs(t.chance_locs.clone())
        .with_chance_advances(t.chance_advances.clone());
    settings.validate().context("invalid [board] config")?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sections_convert() {
        let chain = build_chain_config(&ChainToml::default()).unwrap();
        assert_eq!(chain.max_iterations(), 10_000);

        let ruin = build_ruin_config(&RuinToml::default()).unwrap();
        assert_eq!(ruin.n_states(), 201);

        let board = build_board_settings(&BoardToml::default()).unwrap();
        assert_eq!(board, BoardSettings::new());
    }

    #[test]
    fn invalid_sections_carry_context() {
        let chain = ChainToml {
            cluster_tolerance: -1.0,
            ..ChainToml::default()
        };
        let err = build_chain_config(&chain).unwrap_err();
        assert!(format!("{err:#}").contains("invalid [chain] config"));

        let ruin = RuinToml {
            initial_position: 500,
            ..RuinToml::default()
        };
        assert!(build_ruin_config(&ruin).is_err());

        let board = BoardToml {
            n_chance: 2,
            ..BoardToml::default()
        };
        let err = build_board_settings(&board).unwrap_err();
        assert!(format!("{err:#}").contains("4 advance targets"));
    }
}
