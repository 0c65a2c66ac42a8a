//! Random bracket notation generator.
//!
//! Produces bracket text directly, without building a tree first. Values are
//! integers drawn uniformly from `[min_value, max_value]`, so tokens never need
//! quoting.
//!
//! Shape rules:
//! - the actual height `h` is drawn uniformly from `[1, max_height]`
//!   (`0` when `max_height` is `0`), and no path from the root is longer than
//!   `h` edges;
//! - the root is never a bare leaf when `h > 0`;
//! - every other node gets independent, uniform has-left/has-right flags;
//! - when both children are present the smaller value goes left.

use std::fmt::Write as _;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use serde::Deserialize;
use tracing::debug;

use crate::errors::BracketError;

// Using a concrete, seedable PRNG for determinism.
type SmallRng = Xoshiro256StarStar;

/// Default upper bound accepted for `max_height`.
pub const DEFAULT_HEIGHT_LIMIT: u32 = 32;

/// Bounds on what a generator accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeneratorLimits {
    pub max_height: u32,
}

impl Default for GeneratorLimits {
    fn default() -> Self {
        Self {
            max_height: DEFAULT_HEIGHT_LIMIT,
        }
    }
}

/// Which children a generated node gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Branches {
    Leaf,
    LeftOnly,
    RightOnly,
    Both,
}

impl Branches {
    fn from_flags(has_left: bool, has_right: bool) -> Self {
        match (has_left, has_right) {
            (false, false) => Self::Leaf,
            (true, false) => Self::LeftOnly,
            (false, true) => Self::RightOnly,
            (true, true) => Self::Both,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RandomTreeGenerator {
    prng: SmallRng,
    limits: GeneratorLimits,
}

impl RandomTreeGenerator {
    /// Creates a generator seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_entropy())
    }

    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self::with_rng(SmallRng::from_seed(seed))
    }

    pub fn seed_from_u64(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    fn with_rng(prng: SmallRng) -> Self {
        Self {
            prng,
            limits: GeneratorLimits::default(),
        }
    }

    pub fn with_limits(self, limits: GeneratorLimits) -> Self {
        Self { limits, ..self }
    }

    /// Generates bracket text for a random tree.
    ///
    /// Fails with `InvalidArgument` when `min_value > max_value` or when
    /// `max_height` exceeds the configured limit.
    pub fn generate(
        &mut self,
        min_value: i64,
        max_value: i64,
        max_height: u32,
    ) -> Result<String, BracketError> {
        if min_value > max_value {
            return Err(BracketError::invalid_argument(format!(
                "min_value ({min_value}) must not exceed max_value ({max_value})"
            )));
        }
        if max_height > self.limits.max_height {
            return Err(BracketError::invalid_argument(format!(
                "max_height ({max_height}) exceeds the limit of {}",
                self.limits.max_height
            )));
        }

        let height = if max_height == 0 {
            0
        } else {
            self.prng.gen_range(1..=max_height)
        };

        let mut out = String::new();
        let values = ValueRange {
            min: min_value,
            max: max_value,
        };
        let root = self.draw(values);
        push_value(&mut out, root);
        if height > 0 {
            let branches = self.root_branches();
            self.expand(&mut out, values, branches, height);
        }

        debug!(height, len = out.len(), "generated bracket notation");
        Ok(out)
    }

    /// Uniform over the three shapes that have at least one child.
    fn root_branches(&mut self) -> Branches {
        match self.prng.gen_range(0..3) {
            0 => Branches::LeftOnly,
            1 => Branches::RightOnly,
            _ => Branches::Both,
        }
    }

    fn random_branches(&mut self) -> Branches {
        Branches::from_flags(self.prng.gen_bool(0.5), self.prng.gen_bool(0.5))
    }

    fn draw(&mut self, values: ValueRange) -> i64 {
        self.prng.gen_range(values.min..=values.max)
    }

    /// Writes the child group of a node that may still have `remaining`
    /// levels below it.
    fn expand(&mut self, out: &mut String, values: ValueRange, branches: Branches, remaining: u32) {
        if remaining == 0 {
            return;
        }
        match branches {
            Branches::Leaf => {}
            Branches::LeftOnly => {
                out.push('(');
                self.child(out, values, remaining - 1);
                out.push(')');
            }
            Branches::RightOnly => {
                out.push_str("(,");
                self.child(out, values, remaining - 1);
                out.push(')');
            }
            Branches::Both => {
                let first = self.draw(values);
                let second = self.draw(values);
                out.push('(');
                self.child_with(out, values, first.min(second), remaining - 1);
                out.push(',');
                self.child_with(out, values, first.max(second), remaining - 1);
                out.push(')');
            }
        }
    }

    fn child(&mut self, out: &mut String, values: ValueRange, remaining: u32) {
        let value = self.draw(values);
        self.child_with(out, values, value, remaining);
    }

    fn child_with(&mut self, out: &mut String, values: ValueRange, value: i64, remaining: u32) {
        push_value(out, value);
        let branches = self.random_branches();
        self.expand(out, values, branches, remaining);
    }
}

impl Default for RandomTreeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
struct ValueRange {
    min: i64,
    max: i64,
}

fn push_value(out: &mut String, value: i64) {
    // Writing into a String cannot fail.
    let _ = write!(out, "{value}");
}
