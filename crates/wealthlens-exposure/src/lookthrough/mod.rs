//! Look-through exposure.
//!
//! - **Fund look-through**: equity / debt / other split per fund, from
//!   factsheet data or a policy heuristic
//! - **Combined view**: direct equity merged with fund exposure
//!
//! All functions are pure.

mod combined;
mod fund;

pub use combined::*;
pub use fund::*;
