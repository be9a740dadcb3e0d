mod common;

use bankgate::domain::ports::TransportHandle;
use bankgate::infrastructure::lazy::LazyTransport;
use bankgate::infrastructure::scripted::ScriptedTransport;
use bankgate::{GatewayAdapter, MellatAdapter, PaymentError, TransportError};
use common::{amount, mellat_credentials, order};
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[tokio::test]
async fn test_factory_builds_transport_on_first_call_only() {
    let builds = Arc::new(AtomicUsize::new(0));
    let counter = builds.clone();
    let slot = LazyTransport::with_factory(Box::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        let transport = ScriptedTransport::new()
            .on("bpPayRequest", |_| Ok(json!({"return": "0,TOKEN"})));
        Ok(Arc::new(transport) as TransportHandle)
    }));
    let adapter = MellatAdapter::with_slot(mellat_credentials(), slot);
    assert_eq!(builds.load(Ordering::SeqCst), 0);

    adapter.request(amount(1000), "https://cb", order(1)).await.unwrap();
    adapter.request(amount(1000), "https://cb", order(2)).await.unwrap();
    assert_eq!(builds.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_bad_endpoint_surfaces_as_transport_error() {
    let adapter = MellatAdapter::with_slot(mellat_credentials(), LazyTransport::soap("nope"));
    let err = adapter
        .request(amount(1000), "https://cb", order(1))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PaymentError::Transport(TransportError::InvalidEndpoint { .. })
    ));
}
