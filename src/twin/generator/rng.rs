use rand::Rng;
use std::collections::VecDeque;

/// Randomness source for clause selection.
///
/// Injected so tests can pin every draw and assert exact output strings.
pub trait ReplyRng: Send {
    /// Uniform index in `0..len`; `0` when `len == 0`.
    fn pick(&mut self, len: usize) -> usize;

    /// Uniform sample in `[0, 1)`.
    fn roll(&mut self) -> f64;

    fn chance(&mut self, probability: f64) -> bool {
        self.roll() < probability
    }
}

/// Splitmix64 stream: identical seeds replay identical replies.
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed ^ 0x9E37_79B9_7F4A_7C15,
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

impl ReplyRng for SeededRng {
    fn pick(&mut self, len: usize) -> usize {
        let Ok(bound) = u64::try_from(len) else {
            return 0;
        };
        if bound == 0 {
            return 0;
        }
        usize::try_from(self.next_u64() % bound).unwrap_or(0)
    }

    #[allow(clippy::cast_precision_loss)]
    fn roll(&mut self) -> f64 {
        // 53 high bits -> [0, 1)
        (self.next_u64() >> 11) as f64 / (1_u64 << 53) as f64
    }
}

/// Thread-local OS-seeded generator for production replies.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadReplyRng;

impl ReplyRng for ThreadReplyRng {
    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        rand::rng().random_range(0..len)
    }

    fn roll(&mut self) -> f64 {
        rand::rng().random::<f64>()
    }
}

/// Replays fixed draws. Exhausted picks return `0`; exhausted rolls return
/// `1.0 - f64::EPSILON` so probabilistic steps stay off.
#[derive(Debug, Default, Clone)]
pub struct ScriptedRng {
    picks: VecDeque<usize>,
    rolls: VecDeque<f64>,
}

impl ScriptedRng {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.picks.extend(picks);
        self
    }

    pub fn with_rolls(mut self, rolls: impl IntoIterator<Item = f64>) -> Self {
        self.rolls.extend(rolls);
        self
    }
}

impl ReplyRng for ScriptedRng {
    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.picks.pop_front().unwrap_or(0) % len
    }

    fn roll(&mut self) -> f64 {
        self.rolls.pop_front().unwrap_or(1.0 - f64::EPSILON)
    }
}
