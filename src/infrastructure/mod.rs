//! Concrete transports behind the `RemoteCall` port.

pub mod lazy;
pub mod scripted;
pub mod soap;
