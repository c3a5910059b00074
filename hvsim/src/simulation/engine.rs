//! High-level runtime engine settings
//!
//! Selects threading and output cadence used when running a `Scenario`

#[derive(Debug, Clone)]
pub struct Engine {
    pub parallel: bool,      // false = single thread, true = rayon over samples
    pub output_every: usize, // snapshot every n steps, 0 = final state only
}
