//! Bank-hosted card payments for Mellat, Sadad and Asanpardakht.
//!
//! Each provider gets an adapter implementing [`GatewayAdapter`]: `request`
//! obtains a session to redirect the user with, `verify` re-validates and
//! settles the transaction once the bank calls back.

pub mod application;
pub mod catalog;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use application::asanpardakht::AsanpardakhtAdapter;
pub use application::crypto_relay::CryptoRelay;
pub use application::mellat::MellatAdapter;
pub use application::sadad::SadadAdapter;
pub use domain::ports::GatewayAdapter;
pub use domain::provider::Provider;
pub use error::{GatewayError, PaymentError, Result, TransportError};
