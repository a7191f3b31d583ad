//! Side-by-side occupancy from several simulators at one turn.

use eigenwalk_chain::StateEvolution;

use crate::error::BoardError;

/// Occupancy distributions from several simulators at the same turn.
#[derive(Debug, Clone)]
pub struct Comparison {
    /// Turn the distributions were taken at.
    pub step: u32,
    /// `(label, distribution)` in the order the simulators were given.
    pub series: Vec<(String, Vec<f64>)>,
}

impl Comparison {
    /// Largest absolute difference between the first series and any other.
    ///
    /// Returns `0.0` with fewer than two series.
    pub fn max_deviation(&self) -> f64 {
        let Some((_, reference)) = self.series.first() else {
            return 0.0;
        };
        self.series
            .iter()
            .skip(1)
            .flat_map(|(_, s)| s.iter().zip(reference).map(|(a, b)| (a - b).abs()))
            .fold(0.0, f64::max)
    }
}

/// Queries every simulator at `step`.
pub fn compare_at(
    step: u32,
    simulators: &mut [(&str, &mut dyn StateEvolution<Error = BoardError>)],
) -> Result<Comparison, BoardError> {
    let series = simulators
        .iter_mut()
        .map(|(label, sim)| {
            sim.state_at_time(step)
                .map(|state| (label.to_string(), state))
        })
        .collect::<Result<Vec<_>, BoardError>>()?;
    Ok(Comparison { step, series })
}
