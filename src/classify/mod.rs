// Classification — the rule cascade and its two leaf heuristics.
//
// matcher and cooccurrence are pure functions; cascade orchestrates them
// plus the injected probabilistic fallback into a single Verdict.

pub mod cascade;
pub mod cooccurrence;
pub mod matcher;
