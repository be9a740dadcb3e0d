use crate::domain::ports::{TransportFactory, TransportHandle};
use crate::error::TransportError;
use crate::infrastructure::soap::SoapTransport;
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// A transport slot owned by one adapter.
///
/// Either holds an injected handle from the start, or builds one on first use
/// and keeps it for the adapter's lifetime. A failed build is not cached, so
/// the next call tries again.
pub struct LazyTransport {
    factory: Option<TransportFactory>,
    cell: OnceCell<TransportHandle>,
}

impl LazyTransport {
    /// A slot already filled with `handle`; the factory is never consulted.
    pub fn ready(handle: TransportHandle) -> Self {
        let cell = OnceCell::new();
        let _ = cell.set(handle);
        Self {
            factory: None,
            cell,
        }
    }

    pub fn with_factory(factory: TransportFactory) -> Self {
        Self {
            factory: Some(factory),
            cell: OnceCell::new(),
        }
    }

    /// A slot that connects to a SOAP service at `endpoint` on first use.
    pub fn soap(endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        Self::with_factory(Box::new(move || {
            let transport = SoapTransport::new(&endpoint)?;
            Ok(Arc::new(transport) as TransportHandle)
        }))
    }

    pub fn get(&self) -> Result<&TransportHandle, TransportError> {
        self.cell.get_or_try_init(|| match &self.factory {
            Some(factory) => factory(),
            None => Err(TransportError::Unscripted("transport".to_string())),
        })
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}
