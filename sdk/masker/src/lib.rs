//! Veilshare Secret Masker
//!
//! Turns a collection of named, typed values into one bundle per party and
//! rebuilds the values from a jar of collected bundles.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Masking Flow                             │
//! │                                                                 │
//! │  1. Owner                  2. Transport            3. Owner     │
//! │  ┌──────────┐             ┌──────────────┐        ┌──────────┐  │
//! │  │  mask()  │──bundle────▶│  party i     │──────▶ │ unmask() │  │
//! │  │          │  per party  │  stores      │ jar    │          │  │
//! │  └──────────┘             └──────────────┘        └──────────┘  │
//! │                                                                 │
//! │  • Public values are copied to every party                      │
//! │  • Secret values are Shamir-shared over the safe prime          │
//! │  • Private keys are shared over their curve order by default    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
mod mask;
pub mod masker;
mod unmask;

pub use error::MaskerError;
pub use masker::{MaskedJar, MaskerOptions, SecretMasker};
pub use veilshare_config::KeyField;
