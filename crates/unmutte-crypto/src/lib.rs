//! Unmutte Crypto Library
//!
//! At-rest sealing for chat messages. Two sealers exist:
//! - `ReversePlaceholder`: the legacy `enc::` + reversed text marker. Not
//!   encryption; kept so existing stored messages and clients line up.
//! - `AesGcmSealer`: AES-256-GCM with a server-held key.

pub mod encrypt;
pub mod keys;
pub mod sealer;

pub use sealer::{AesGcmSealer, ReversePlaceholder, Sealed, Sealer};
