//! Veilshare Threshold Sharing
//!
//! Shamir secret sharing over a prime field for a fixed, ordered roster of
//! parties.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Sharing Flow                               │
//! │                                                                 │
//! │  1. Dealer                 2. Parties              3. Combiner  │
//! │  ┌──────────┐             ┌──────────────┐        ┌──────────┐  │
//! │  │ Split to │──one share─▶│  Hold share  │──jar──▶│ Combine  │  │
//! │  │ degree t │  per party  │  f(i)        │        │ (t+1..n) │  │
//! │  └──────────┘             └──────────────┘        └──────────┘  │
//! │                                                                 │
//! │  • Party i (roster position i-1) evaluates at x = i             │
//! │  • Any t + 1 shares recover f(0)                                │
//! │  • Shares beyond t + 1 are checked against the same polynomial  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod jar;
pub mod roster;
pub mod shares;

pub use jar::PartyJar;
pub use roster::{PartyId, Roster};
pub use shares::{PartyShares, ShamirError, ShamirSharer};
