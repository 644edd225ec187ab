use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::kernel::error::Error;
use crate::kernel::predicate::{Depth, Generation, Predicate, Stamp};

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

// The generation of depth 1, which is open in every scope.
const ROOT_GENERATION: Generation = 0;

// Stamped onto predicates for a depth that has no open frame. Never allocated.
const DETACHED_GENERATION: Generation = Generation::MAX;

/// A hypothesis that has been assumed and not yet discharged.
#[derive(Clone, Debug)]
struct Frame {
    assumption: Predicate,
    depth: Depth,
    generation: Generation,
}

/// The scope manager tracks hypothetical reasoning for a single proof.
///
/// Each open hypothesis is a frame on the stack. The current depth is one more than the
/// number of open frames, so a proof with nothing assumed is at depth 1.
/// A predicate is valid when it was stamped at most as deep as the current depth, and the
/// frame it was stamped under is still open. Closing a frame retires its generation, so
/// whatever was derived under it stays invalid even after a sibling frame reaches the same
/// depth.
///
/// Every proof owns its own Scope, so two proofs never see each other's hypotheses.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    frames: Vec<Frame>,
}

impl Scope {
    pub fn new() -> Scope {
        Scope { frames: vec![] }
    }

    pub fn current_depth(&self) -> Depth {
        self.frames.len() as Depth + 1
    }

    /// Whether any hypothesis is still open.
    pub fn is_open(&self) -> bool {
        !self.frames.is_empty()
    }

    // The generation open at a depth, if that depth is open at all.
    fn generation_at(&self, depth: Depth) -> Option<Generation> {
        match depth {
            0 => None,
            1 => Some(ROOT_GENERATION),
            _ => self
                .frames
                .get(depth as usize - 2)
                .map(|frame| frame.generation),
        }
    }

    fn stamp_at(&self, depth: Depth) -> Stamp {
        Stamp {
            depth,
            generation: self.generation_at(depth).unwrap_or(DETACHED_GENERATION),
        }
    }

    /// Whether the predicate may be used at `depth`, which must not be deeper than the
    /// current depth.
    pub fn is_valid_within(&self, predicate: &Predicate, depth: Depth) -> bool {
        let stamp = predicate.verified();
        stamp.depth <= depth && self.generation_at(stamp.depth) == Some(stamp.generation)
    }

    pub fn is_valid(&self, predicate: &Predicate) -> bool {
        self.is_valid_within(predicate, self.current_depth())
    }

    /// Sets a predicate's stamp outright, under whichever frame is open at `depth`.
    pub fn stamp(&self, predicate: &Predicate, depth: Depth) {
        predicate.stamp(self.stamp_at(depth));
    }

    /// Makes a predicate valid from `depth` inward.
    /// A predicate that is already valid there keeps its stamp, so a promotion never
    /// invalidates anything.
    pub(crate) fn promote(&self, predicate: &Predicate, depth: Depth) {
        if !self.is_valid_within(predicate, depth) {
            self.stamp(predicate, depth);
        }
    }

    /// Opens a scope for a new hypothesis and makes it valid at the new depth.
    /// Returns the new depth.
    pub fn open_scope(&mut self, assumption: &Predicate) -> Depth {
        let depth = self.current_depth() + 1;
        let generation = NEXT_GENERATION.fetch_add(1, Ordering::SeqCst);
        self.frames.push(Frame {
            assumption: assumption.clone(),
            depth,
            generation,
        });
        self.promote(assumption, depth);
        debug!(depth, generation, assumption = %assumption, "opened scope");
        depth
    }

    /// Closes the innermost scope, returning the hypothesis it discharged.
    pub fn close_scope(&mut self) -> Result<Predicate, Error> {
        match self.frames.pop() {
            Some(frame) => {
                debug!(
                    depth = self.current_depth(),
                    discharged = %frame.assumption,
                    "closed scope"
                );
                Ok(frame.assumption)
            }
            None => Err(Error::scope_underflow("no hypothesis is open")),
        }
    }

    /// The hypothesis that the next discharge will close.
    pub fn innermost_hypothesis(&self) -> Option<&Predicate> {
        self.frames.last().map(|frame| &frame.assumption)
    }

    /// Checks that `hypothesis` is the innermost open hypothesis.
    /// Discharging anything else would close the wrong scope.
    /// Returns the depth being discharged.
    pub fn check_discharge(&self, rule: &'static str, hypothesis: &Predicate) -> Result<Depth, Error> {
        let Some(frame) = self.frames.last() else {
            return Err(Error::scope_underflow(format!(
                "{}: no hypothesis is open to discharge {}",
                rule, hypothesis
            )));
        };
        if !frame.assumption.ptr_eq(hypothesis) && !frame.assumption.same_formula(hypothesis) {
            return Err(Error::scope_underflow(format!(
                "{}: {} is not the innermost hypothesis {}",
                rule, hypothesis, frame.assumption
            )));
        }
        Ok(frame.depth)
    }
}
