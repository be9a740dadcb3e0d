//! Domain layer: value types exchanged with the banks and the ports the
//! adapters are written against.

pub mod callback;
pub mod credentials;
pub mod payment;
pub mod ports;
pub mod provider;
