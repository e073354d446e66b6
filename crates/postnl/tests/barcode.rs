mod common;

use common::{API_KEY, MockTransport};
use postnl::{
    Client, ClientConfig, ErrorKind,
    http::Transport,
    request,
    service_id::BARCODE,
};
use postnl_core::{
    cache::ResponseCache,
    collection::{CollectionKey, OrderedCollection},
    entity::Entity,
};
use std::sync::Arc;

fn client(transport: &Arc<MockTransport>) -> Client {
    let config = ClientConfig::new(API_KEY).with_customer("DEVC", "11223344");

    Client::new(config, Arc::clone(transport) as Arc<dyn Transport>)
        .with_cache(ResponseCache::in_memory())
}

fn barcode_request() -> Entity {
    request("GenerateBarcodeRequest", BARCODE)
        .unwrap()
        .with("Type", "3S")
        .unwrap()
        .with("Range", "DEVC")
        .unwrap()
        .with("Serie", "000000000-999999999")
        .unwrap()
}

#[test]
fn customer_defaults_come_from_config() {
    let transport = MockTransport::new();
    transport.respond(200, r#"{"Barcode":"3SDEVC201611210"}"#);

    let barcode = client(&transport)
        .barcode()
        .generate_barcode(&barcode_request())
        .unwrap();
    assert_eq!(barcode.text("Barcode"), Some("3SDEVC201611210"));

    let url = &transport.sent()[0].url;
    assert_eq!(
        url,
        "https://api.postnl.nl/shipment/v1_1/barcode\
         ?CustomerCode=DEVC&CustomerNumber=11223344&Type=3S&Serie=000000000-999999999&Range=DEVC"
    );
}

#[test]
fn explicit_customer_wins_over_config() {
    let transport = MockTransport::new();
    transport.respond(200, r#"{"Barcode":"3SABCD0001"}"#);

    let entity = barcode_request().with("CustomerCode", "ABCD").unwrap();
    client(&transport).barcode().generate_barcode(&entity).unwrap();

    assert!(transport.sent()[0].url.contains("CustomerCode=ABCD&"));
}

#[test]
fn missing_customer_is_a_validation_error() {
    let transport = MockTransport::new();
    let client = Client::new(
        ClientConfig::new(API_KEY),
        Arc::clone(&transport) as Arc<dyn Transport>,
    );

    let err = client.barcode().generate_barcode(&barcode_request()).unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
    assert!(err.message.contains("CustomerCode"));
    assert_eq!(transport.calls(), 0);
}

#[test]
fn barcodes_are_never_replayed() {
    let transport = MockTransport::new();
    transport.respond(200, r#"{"Barcode":"3SDEVC0001"}"#);
    transport.respond(200, r#"{"Barcode":"3SDEVC0002"}"#);
    let client = client(&transport);

    let a = client.barcode().generate_barcode(&barcode_request()).unwrap();
    let b = client.barcode().generate_barcode(&barcode_request()).unwrap();

    assert_ne!(a.text("Barcode"), b.text("Barcode"));
    assert_eq!(transport.calls(), 2);
}

#[test]
fn batch_keeps_input_keys_and_order() {
    let transport = MockTransport::new();
    transport.respond(200, r#"{"Barcode":"3SDEVC0001"}"#);
    transport.respond(200, r#"{"Barcode":"3SDEVC0002"}"#);

    let mut requests = OrderedCollection::new("GenerateBarcodeRequest");
    requests.set("parcel-b", barcode_request()).unwrap();
    requests.set("parcel-a", barcode_request()).unwrap();

    let barcodes = client(&transport)
        .barcode()
        .generate_barcodes(&requests)
        .unwrap();

    assert_eq!(barcodes.element_type(), "GenerateBarcodeResponse");
    let keys: Vec<&CollectionKey> = barcodes.keys().collect();
    assert_eq!(
        keys,
        [&CollectionKey::from("parcel-b"), &CollectionKey::from("parcel-a")]
    );
    assert_eq!(
        barcodes.get("parcel-a").and_then(|b| b.text("Barcode")),
        Some("3SDEVC0002")
    );
}

#[test]
fn batch_rejects_foreign_collections() {
    let transport = MockTransport::new();
    let requests = OrderedCollection::new("CutOffTime");

    let err = client(&transport)
        .barcode()
        .generate_barcodes(&requests)
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
}
