//! Deterministic uniform draws with record and replay.
//!
//! A [`DrawProvider`] is always in exactly one of three modes:
//!
//! - **Live**: draws come straight from a seeded ChaCha8 generator
//! - **Recording**: draws come from the generator and are appended to a [`DrawLog`]
//! - **Replaying**: draws come back from a log, strictly in recorded order
//!
//! Replay is positional. The [`DrawKey`] passed on each request is kept in the
//! log for inspection but is not used to look values up.
//!
//! ```rust
//! use varlab_risk::draws::{DrawKey, DrawProvider};
//!
//! let mut recorder = DrawProvider::recording(7);
//! let a = recorder.next_uniform(DrawKey::new(0, 0, 0)).unwrap();
//! let b = recorder.next_uniform(DrawKey::new(0, 0, 1)).unwrap();
//!
//! let mut replay = recorder.into_replay().unwrap();
//! assert_eq!(replay.next_uniform(DrawKey::new(0, 0, 0)).unwrap(), a);
//! assert_eq!(replay.next_uniform(DrawKey::new(0, 0, 1)).unwrap(), b);
//! assert!(replay.next_uniform(DrawKey::new(0, 0, 2)).is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use varlab_config::SimulationConfig;

use crate::error::{RiskError, RiskResult};

// =============================================================================
// KEYS AND RECORDS
// =============================================================================

/// Logical coordinate of a draw: scenario, period and sub-step.
///
/// Text form is `s:t:dt`, e.g. `12:0:3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DrawKey {
    /// Scenario (path) index.
    pub scenario: usize,
    /// Period index within the horizon.
    pub period: u32,
    /// Sub-step index within the period.
    pub substep: u32,
}

impl DrawKey {
    /// Creates a key.
    #[must_use]
    pub const fn new(scenario: usize, period: u32, substep: u32) -> Self {
        Self {
            scenario,
            period,
            substep,
        }
    }
}

impl fmt::Display for DrawKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.scenario, self.period, self.substep)
    }
}

impl FromStr for DrawKey {
    type Err = RiskError;

    fn from_str(s: &str) -> RiskResult<Self> {
        let bad =
            || RiskError::invalid_parameter("draw_key", format!("expected s:t:dt, got {s:?}"));
        let mut parts = s.split(':');
        let (Some(scenario), Some(period), Some(substep), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(bad());
        };
        Ok(Self {
            scenario: scenario.trim().parse().map_err(|_| bad())?,
            period: period.trim().parse().map_err(|_| bad())?,
            substep: substep.trim().parse().map_err(|_| bad())?,
        })
    }
}

/// One recorded draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawRecord {
    /// Position in the recording, starting at zero.
    pub sequence: usize,
    /// Coordinate the draw was requested for.
    pub key: DrawKey,
    /// The uniform value in `[0, 1)`.
    pub value: f64,
}

/// Ordered list of recorded draws.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawLog {
    records: Vec<DrawRecord>,
}

impl DrawLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a log from exported records.
    ///
    /// # Errors
    ///
    /// Returns `Alignment` unless sequence numbers run 0, 1, 2, ... in order,
    /// and `InvalidParameter` for a value outside `[0, 1)`.
    pub fn from_records(records: Vec<DrawRecord>) -> RiskResult<Self> {
        for (expected, record) in records.iter().enumerate() {
            if record.sequence != expected {
                return Err(RiskError::alignment(format!(
                    "draw sequence {} found where {expected} was expected",
                    record.sequence
                )));
            }
            if !(0.0..1.0).contains(&record.value) {
                return Err(RiskError::invalid_parameter(
                    "draw",
                    format!("value {} at sequence {expected} is outside [0, 1)", record.value),
                ));
            }
        }
        Ok(Self { records })
    }

    /// Number of recorded draws.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The records in draw order.
    #[must_use]
    pub fn records(&self) -> &[DrawRecord] {
        &self.records
    }

    /// Iterates the records in draw order.
    pub fn iter(&self) -> std::slice::Iter<'_, DrawRecord> {
        self.records.iter()
    }

    /// Consumes the log, returning its records.
    #[must_use]
    pub fn into_records(self) -> Vec<DrawRecord> {
        self.records
    }

    fn push(&mut self, key: DrawKey, value: f64) {
        let sequence = self.records.len();
        self.records.push(DrawRecord {
            sequence,
            key,
            value,
        });
    }
}

impl<'a> IntoIterator for &'a DrawLog {
    type Item = &'a DrawRecord;
    type IntoIter = std::slice::Iter<'a, DrawRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// =============================================================================
// PROVIDER
// =============================================================================

/// Mode of a [`DrawProvider`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    /// Generator only.
    Live,
    /// Generator, with every draw logged.
    Recording,
    /// Logged draws, in order.
    Replaying,
}

#[derive(Clone)]
enum State {
    Live { rng: ChaCha8Rng },
    Recording { rng: ChaCha8Rng, log: DrawLog },
    Replaying { log: DrawLog, cursor: usize },
}

/// Source of uniform draws for a simulation.
///
/// Owned by exactly one simulation at a time; `Send` so batches can move
/// providers onto worker threads.
#[derive(Clone)]
pub struct DrawProvider {
    state: State,
}

impl DrawProvider {
    /// Live provider seeded with `seed`.
    #[must_use]
    pub fn live(seed: u64) -> Self {
        Self {
            state: State::Live {
                rng: ChaCha8Rng::seed_from_u64(seed),
            },
        }
    }

    /// Recording provider seeded with `seed`.
    #[must_use]
    pub fn recording(seed: u64) -> Self {
        Self {
            state: State::Recording {
                rng: ChaCha8Rng::seed_from_u64(seed),
                log: DrawLog::new(),
            },
        }
    }

    /// Replaying provider over `log`, cursor at the first draw.
    ///
    /// # Errors
    ///
    /// Returns `NoRecording` if the log is empty.
    pub fn replaying(log: DrawLog) -> RiskResult<Self> {
        if log.is_empty() {
            return Err(RiskError::NoRecording);
        }
        Ok(Self {
            state: State::Replaying { log, cursor: 0 },
        })
    }

    /// Live or recording provider per the run configuration.
    #[must_use]
    pub fn from_config(config: &SimulationConfig) -> Self {
        if config.record_draws {
            Self::recording(config.seed)
        } else {
            Self::live(config.seed)
        }
    }

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> DrawMode {
        match self.state {
            State::Live { .. } => DrawMode::Live,
            State::Recording { .. } => DrawMode::Recording,
            State::Replaying { .. } => DrawMode::Replaying,
        }
    }

    /// Next uniform value in `[0, 1)` for `key`.
    ///
    /// # Errors
    ///
    /// Returns `ReplayExhausted` when replaying past the end of the log.
    pub fn next_uniform(&mut self, key: DrawKey) -> RiskResult<f64> {
        match &mut self.state {
            State::Live { rng } => Ok(rng.gen::<f64>()),
            State::Recording { rng, log } => {
                let value = rng.gen::<f64>();
                log.push(key, value);
                Ok(value)
            }
            State::Replaying { log, cursor } => {
                let record = log.records.get(*cursor).ok_or(RiskError::ReplayExhausted {
                    recorded: log.len(),
                    key,
                })?;
                *cursor += 1;
                Ok(record.value)
            }
        }
    }

    /// Switches a recording provider to replay its own log from the start.
    ///
    /// # Errors
    ///
    /// Returns `NoRecording` from live mode or when nothing was recorded.
    pub fn into_replay(self) -> RiskResult<Self> {
        match self.state {
            State::Recording { log, .. } => Self::replaying(log),
            State::Replaying { log, .. } => Ok(Self {
                state: State::Replaying { log, cursor: 0 },
            }),
            State::Live { .. } => Err(RiskError::NoRecording),
        }
    }

    /// Moves the replay cursor back to the first draw.
    ///
    /// # Errors
    ///
    /// Returns `NoRecording` unless replaying.
    pub fn rewind(&mut self) -> RiskResult<()> {
        match &mut self.state {
            State::Replaying { cursor, .. } => {
                *cursor = 0;
                Ok(())
            }
            _ => Err(RiskError::NoRecording),
        }
    }

    /// Draws served so far in replay mode, or recorded so far in recording mode.
    #[must_use]
    pub fn position(&self) -> usize {
        match &self.state {
            State::Live { .. } => 0,
            State::Recording { log, .. } => log.len(),
            State::Replaying { cursor, .. } => *cursor,
        }
    }

    /// The log being recorded or replayed.
    #[must_use]
    pub fn log(&self) -> Option<&DrawLog> {
        match &self.state {
            State::Live { .. } => None,
            State::Recording { log, .. } | State::Replaying { log, .. } => Some(log),
        }
    }

    /// Takes the recorded log, leaving an empty one so recording can continue.
    ///
    /// Returns `None` unless recording.
    pub fn take_log(&mut self) -> Option<DrawLog> {
        match &mut self.state {
            State::Recording { log, .. } => Some(std::mem::take(log)),
            _ => None,
        }
    }
}

impl fmt::Debug for DrawProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawProvider")
            .field("mode", &self.mode())
            .field("position", &self.position())
            .field("logged", &self.log().map_or(0, DrawLog::len))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw_n(provider: &mut DrawProvider, n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| provider.next_uniform(DrawKey::new(i, 0, 0)).unwrap())
            .collect()
    }

    #[test]
    fn test_live_is_seeded() {
        let a = draw_n(&mut DrawProvider::live(42), 50);
        let b = draw_n(&mut DrawProvider::live(42), 50);
        let c = draw_n(&mut DrawProvider::live(43), 50);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.iter().all(|u| (0.0..1.0).contains(u)));
    }

    #[test]
    fn test_recording_matches_live() {
        let live = draw_n(&mut DrawProvider::live(9), 20);
        let mut recorder = DrawProvider::recording(9);
        let recorded = draw_n(&mut recorder, 20);
        assert_eq!(live, recorded);

        let log = recorder.log().unwrap();
        assert_eq!(log.len(), 20);
        assert_eq!(log.records()[3].sequence, 3);
        assert_eq!(log.records()[3].key, DrawKey::new(3, 0, 0));
    }

    #[test]
    fn test_replay_and_rewind() {
        let mut recorder = DrawProvider::recording(1);
        let original = draw_n(&mut recorder, 10);
        let mut replay = recorder.into_replay().unwrap();
        assert_eq!(replay.mode(), DrawMode::Replaying);

        assert_eq!(draw_n(&mut replay, 10), original);
        assert!(matches!(
            replay.next_uniform(DrawKey::new(10, 0, 0)),
            Err(RiskError::ReplayExhausted { recorded: 10, .. })
        ));

        replay.rewind().unwrap();
        assert_eq!(draw_n(&mut replay, 10), original);
    }

    #[test]
    fn test_replay_ignores_keys() {
        let mut recorder = DrawProvider::recording(3);
        let first = recorder.next_uniform(DrawKey::new(0, 0, 0)).unwrap();
        let mut replay = recorder.into_replay().unwrap();
        assert_eq!(replay.next_uniform(DrawKey::new(99, 5, 5)).unwrap(), first);
    }

    #[test]
    fn test_no_recording() {
        assert_eq!(
            DrawProvider::live(1).into_replay().unwrap_err(),
            RiskError::NoRecording
        );
        assert_eq!(
            DrawProvider::recording(1).into_replay().unwrap_err(),
            RiskError::NoRecording
        );
        assert_eq!(
            DrawProvider::replaying(DrawLog::new()).unwrap_err(),
            RiskError::NoRecording
        );
        assert!(DrawProvider::live(1).rewind().is_err());
    }

    #[test]
    fn test_take_log() {
        let mut recorder = DrawProvider::recording(5);
        draw_n(&mut recorder, 4);
        let log = recorder.take_log().unwrap();
        assert_eq!(log.len(), 4);
        assert_eq!(recorder.log().map(DrawLog::len), Some(0));
        assert!(DrawProvider::live(5).take_log().is_none());
    }

    #[test]
    fn test_key_text_form() {
        let key = DrawKey::new(12, 0, 3);
        assert_eq!(key.to_string(), "12:0:3");
        assert_eq!("12:0:3".parse::<DrawKey>().unwrap(), key);
        assert!("12:0".parse::<DrawKey>().is_err());
        assert!("1:2:3:4".parse::<DrawKey>().is_err());
        assert!("a:0:0".parse::<DrawKey>().is_err());
    }

    fn record(sequence: usize, value: f64) -> DrawRecord {
        DrawRecord {
            sequence,
            key: DrawKey::new(0, 0, sequence as u32),
            value,
        }
    }

    #[test]
    fn test_from_records_checks_sequence() {
        let good = vec![record(0, 0.1), record(1, 0.2)];
        assert_eq!(DrawLog::from_records(good).unwrap().len(), 2);

        let gap = vec![record(0, 0.1), record(2, 0.2)];
        assert!(matches!(
            DrawLog::from_records(gap),
            Err(RiskError::Alignment { .. })
        ));

        assert!(DrawLog::from_records(vec![record(0, 1.0)]).is_err());
    }

    #[test]
    fn test_from_config() {
        let config = SimulationConfig::quick().with_recording(true);
        assert_eq!(DrawProvider::from_config(&config).mode(), DrawMode::Recording);
        assert_eq!(
            DrawProvider::from_config(&SimulationConfig::quick()).mode(),
            DrawMode::Live
        );
    }
}
