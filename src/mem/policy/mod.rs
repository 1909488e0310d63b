mod clock;
mod fifo;
mod lru;
mod optimal;
mod second_chance;

use std::fmt::{self, Display};

use super::state::{FrameSpec, FrameTable, validate_sequence};
use super::trace::ReplacementTrace;
use crate::error::SpecError;

/// The closed set of page replacement policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplacementPolicy {
    Fifo,
    Lru,
    /// Evicts the resident page used farthest in the future. The future
    /// scan walks the rest of the sequence on every fault, which is
    /// quadratic in the sequence length; fine at these problem sizes and
    /// kept simple on purpose.
    Optimal,
    SecondChance,
    Clock,
}

impl ReplacementPolicy {
    /// Plays the whole request sequence against the given frames and
    /// returns the per-access trace. The inputs are only read; identical
    /// calls return identical traces.
    pub fn run(
        &self,
        frames: &[FrameSpec],
        sequence: &[String],
    ) -> Result<ReplacementTrace, SpecError> {
        let table = FrameTable::new(frames)?;
        validate_sequence(sequence)?;

        Ok(match self {
            ReplacementPolicy::Fifo => fifo::run(table, sequence),
            ReplacementPolicy::Lru => lru::run(table, sequence),
            ReplacementPolicy::Optimal => optimal::run(table, sequence),
            ReplacementPolicy::SecondChance => second_chance::run(table, sequence),
            ReplacementPolicy::Clock => clock::run(table, sequence),
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            ReplacementPolicy::Fifo => "FIFO",
            ReplacementPolicy::Lru => "LRU",
            ReplacementPolicy::Optimal => "Optimal",
            ReplacementPolicy::SecondChance => "Second Chance",
            ReplacementPolicy::Clock => "Clock",
        }
    }
}

impl Display for ReplacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use crate::mem::state::FrameSpec;

    pub(crate) fn frames(specs: &[(&str, u64, &str)]) -> Vec<FrameSpec> {
        specs
            .iter()
            .map(|&(id, load_time, page)| {
                FrameSpec::new(id, load_time, if page.is_empty() { None } else { Some(page) })
            })
            .collect()
    }

    pub(crate) fn pages(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|&id| id.to_owned()).collect()
    }

    pub(crate) fn snapshot(frames: &[&str]) -> Vec<Option<String>> {
        frames
            .iter()
            .map(|&page| {
                if page.is_empty() {
                    None
                } else {
                    Some(page.to_owned())
                }
            })
            .collect()
    }
}
