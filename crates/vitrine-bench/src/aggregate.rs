//! Filename-to-program attribution.
//!
//! Telemetry files are named `telemetry_<program>_<suffix>.json`, with the
//! program id's hyphens written as underscores. Each filename is credited to
//! at most one program: the first known id whose token
//! `telemetry_<id>_` occurs in it.
//!
//! Tokens are not guaranteed disjoint. With ids `ecdsa` and `ecdsa-verify`,
//! `telemetry_ecdsa_verify_run1.json` contains both tokens, and whichever id
//! comes first in the list wins. [`Aggregator::ambiguities`] reports every
//! such pair so the list order can be checked.

use std::collections::BTreeMap;

use serde::Serialize;
use vitrine_core::underscore_id;

/// Program id → number of telemetry files credited to it.
///
/// Ids without files are absent and read as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BenchmarkIndex {
    counts: BTreeMap<String, usize>,
    unmatched: usize,
}

impl BenchmarkIndex {
    /// Files credited to `id` (0 when none).
    pub fn count(&self, id: &str) -> usize {
        self.counts.get(id).copied().unwrap_or(0)
    }

    /// Files credited to any program.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Files matching no known program.
    pub fn unmatched(&self) -> usize {
        self.unmatched
    }

    /// Ids with at least one file, with their counts.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(id, n)| (id.as_str(), *n))
    }

    /// True when no file was credited.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Two programs whose tokens can both occur in one filename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ambiguity {
    /// The id that wins (earlier in the list).
    pub winner: String,
    /// The id that can be shadowed.
    pub shadowed: String,
}

#[derive(Debug, Clone)]
struct ProgramToken {
    id: String,
    token: String,
}

/// Precomputed matcher for a fixed, ordered list of program ids.
#[derive(Debug, Clone)]
pub struct Aggregator {
    programs: Vec<ProgramToken>,
    ambiguities: Vec<Ambiguity>,
}

impl Aggregator {
    /// Build a matcher. Duplicate ids are kept once; overlapping tokens are
    /// logged as warnings.
    pub fn new<I, S>(known_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut programs: Vec<ProgramToken> = Vec::new();
        for id in known_ids {
            let id = id.as_ref();
            if programs.iter().any(|p| p.id == id) {
                continue;
            }
            programs.push(ProgramToken {
                id: id.to_string(),
                token: format!("telemetry_{}_", underscore_id(id)),
            });
        }

        let ambiguities = find_ambiguities(&programs);
        for ambiguity in &ambiguities {
            log::warn!(
                "Telemetry tokens overlap: files for '{}' may be counted as '{}'",
                ambiguity.shadowed,
                ambiguity.winner
            );
        }

        Self {
            programs,
            ambiguities,
        }
    }

    /// Known ids in match order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.programs.iter().map(|p| p.id.as_str())
    }

    /// Overlapping token pairs found at construction.
    pub fn ambiguities(&self) -> &[Ambiguity] {
        &self.ambiguities
    }

    /// The program a filename is credited to, if any.
    pub fn attribute(&self, filename: &str) -> Option<&str> {
        self.programs
            .iter()
            .find(|p| filename.contains(&p.token))
            .map(|p| p.id.as_str())
    }

    /// Count filenames per program.
    pub fn aggregate<I, S>(&self, filenames: I) -> BenchmarkIndex
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = BenchmarkIndex::default();
        for filename in filenames {
            let filename = filename.as_ref();
            match self.attribute(filename) {
                Some(id) => *index.counts.entry(id.to_string()).or_insert(0) += 1,
                None => {
                    log::debug!("No program matches telemetry file '{filename}'");
                    index.unmatched += 1;
                }
            }
        }
        index
    }
}

/// One-shot form of [`Aggregator::aggregate`].
pub fn aggregate<S: AsRef<str>>(filenames: &[S], known_ids: &[&str]) -> BenchmarkIndex {
    Aggregator::new(known_ids).aggregate(filenames)
}

// Either token containing the other makes some filenames fit both ids:
// `telemetry_ecdsa_verify_1.json` is an `ecdsa-verify` file, or an `ecdsa`
// file with suffix `verify_1`. The earlier id always takes it.
fn find_ambiguities(programs: &[ProgramToken]) -> Vec<Ambiguity> {
    let mut found = Vec::new();
    for (i, earlier) in programs.iter().enumerate() {
        for later in &programs[i + 1..] {
            if later.token.contains(&earlier.token) || earlier.token.contains(&later.token) {
                found.push(Ambiguity {
                    winner: earlier.id.clone(),
                    shadowed: later.id.clone(),
                });
            }
        }
    }
    found
}

// ============================================================================
// Tests
// ============================================================================
