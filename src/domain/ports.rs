use super::payment::{Amount, OrderId, PaymentSession, VerificationResult};
use super::provider::Provider;
use crate::error::{Result, TransportError};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// How argument elements relate to the operation's namespace on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Binding {
    /// document/literal: arguments are qualified by the service namespace.
    #[default]
    Document,
    /// rpc/literal: only the operation element is qualified.
    Rpc,
}

/// Arguments of a remote operation, kept in declaration order.
///
/// Order matters for providers whose interface is positional; names matter for
/// the ones whose interface is keyed. Carrying both serves either convention.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    pub namespace: Option<&'static str>,
    pub binding: Binding,
    pub params: Vec<(&'static str, Value)>,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn namespace(mut self, namespace: &'static str) -> Self {
        self.namespace = Some(namespace);
        self
    }

    pub fn binding(mut self, binding: Binding) -> Self {
        self.binding = binding;
        self
    }

    pub fn arg(mut self, name: &'static str, value: impl Into<Value>) -> Self {
        self.params.push((name, value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }
}

/// A synchronous-in-sequence remote procedure call channel to a bank.
#[async_trait]
pub trait RemoteCall: Send + Sync {
    async fn call(&self, operation: &str, args: CallArgs) -> std::result::Result<Value, TransportError>;
}

pub type TransportHandle = Arc<dyn RemoteCall>;
pub type TransportFactory =
    Box<dyn Fn() -> std::result::Result<TransportHandle, TransportError> + Send + Sync>;

/// The request → redirect → verify/settle capability every provider offers.
#[async_trait]
pub trait GatewayAdapter: Send + Sync {
    /// Provider-specific shape of the data handed back after the redirect.
    type Callback: Send + 'static;

    fn provider(&self) -> Provider;

    async fn request(
        &self,
        amount: Amount,
        callback_url: &str,
        order_id: Option<OrderId>,
    ) -> Result<PaymentSession>;

    async fn verify(&self, callback: Self::Callback) -> Result<VerificationResult>;

    /// Best-effort unique order id, used when the caller does not supply one.
    fn unique_number(&self) -> OrderId {
        crate::application::unique::unique_number()
    }
}
