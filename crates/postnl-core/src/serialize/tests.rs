use super::*;
use crate::{
    collection::OrderedCollection,
    serialize::tree::{Element, NamespaceMap},
    test_fixtures::{self, NS, PARCEL},
    value::Value,
};
use proptest::prelude::*;
use serde_json::json;

static NAMESPACES: NamespaceMap = NamespaceMap::new(&[("p", NS)]);

fn entity(registry: &Registry, type_id: &str) -> Entity {
    Entity::new(registry, type_id, PARCEL, Direction::Request).unwrap()
}

fn sample_parcel(registry: &Registry) -> Entity {
    let address = entity(registry, "Address")
        .with("Street", "Siriusdreef")
        .unwrap()
        .with("HouseNr", "42")
        .unwrap()
        .with("PostalCode", "2132WT")
        .unwrap();

    let mut items = OrderedCollection::new("Item");
    items
        .append(entity(registry, "Item").with("Code", "A1").unwrap())
        .unwrap();
    items
        .append(
            entity(registry, "Item")
                .with("Code", "B2")
                .unwrap()
                .with("Quantity", 3)
                .unwrap(),
        )
        .unwrap();

    entity(registry, "Parcel")
        .with("Barcode", "3SDEVC201611210")
        .unwrap()
        .with("Insured", true)
        .unwrap()
        .with("Options", vec!["Daytime", "Evening"])
        .unwrap()
        .with("Address", address)
        .unwrap()
        .with("Items", items)
        .unwrap()
}

fn decode(registry: &Registry, payload: &WireValue) -> Result<Entity, SerializeError> {
    from_wire(
        registry,
        payload,
        payload.format(),
        "Parcel",
        PARCEL,
        Direction::Request,
    )
}

///
/// FLAT
///

#[test]
fn flat_emits_present_fields_in_declaration_order() {
    let registry = test_fixtures::registry();
    let wire = to_wire(&sample_parcel(&registry), WireFormat::Flat);

    let expected = json!({
        "Barcode": "3SDEVC201611210",
        "Insured": true,
        "Options": ["Daytime", "Evening"],
        "Address": { "Street": "Siriusdreef", "HouseNr": 42, "Zipcode": "2132WT" },
        "Items": [{ "Code": "A1" }, { "Code": "B2", "Quantity": 3 }],
    });
    assert_eq!(wire.as_flat(), Some(&expected));

    let keys: Vec<_> = wire.as_flat().unwrap().as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, ["Barcode", "Insured", "Options", "Address", "Items"]);
}

#[test]
fn flat_decode_ignores_unknown_fields_and_nulls() {
    let registry = test_fixtures::registry();
    let payload = WireValue::Flat(json!({
        "Barcode": "3S123",
        "Weight": "1200",
        "Insured": null,
        "Colour": "red",
    }));

    let parcel = decode(&registry, &payload).unwrap();
    assert_eq!(parcel.text("Barcode"), Some("3S123"));
    assert_eq!(parcel.int("Weight"), Some(1200));
    assert_eq!(parcel.get("Insured"), None);
}

#[test]
fn flat_shape_error_names_the_path() {
    let registry = test_fixtures::registry();
    let payload = WireValue::Flat(json!({
        "Items": [{ "Code": "A" }, { "Code": { "nested": true } }],
    }));

    let err = decode(&registry, &payload).unwrap_err();
    assert!(matches!(
        &err,
        SerializeError::Shape { path, expected: "scalar", found: "object" } if path == "Items[1].Code"
    ));
}

#[test]
fn flat_scalar_where_object_expected_is_a_shape_error() {
    let registry = test_fixtures::registry();
    let payload = WireValue::Flat(json!({ "Address": "Siriusdreef 42" }));

    let err = decode(&registry, &payload).unwrap_err();
    assert_eq!(
        err.to_string(),
        "unexpected shape at 'Address': expected object, found string"
    );
}

#[test]
fn flat_single_object_reads_as_one_element_collection() {
    let registry = test_fixtures::registry();
    let payload = WireValue::Flat(json!({ "Items": { "Code": "A" } }));

    let parcel = decode(&registry, &payload).unwrap();
    let items = parcel.collection("Items").unwrap();
    assert_eq!(items.count(), 1);
    assert_eq!(items.get(0_u64).and_then(|e| e.text("Code")), Some("A"));
}

#[test]
fn flat_coercion_error_carries_the_path() {
    let registry = test_fixtures::registry();
    let payload = WireValue::Flat(json!({ "Address": { "HouseNr": "forty-two" } }));

    let err = decode(&registry, &payload).unwrap_err();
    assert!(matches!(
        &err,
        SerializeError::Coercion { path, source: crate::value::CoercionError::TypeCoercion { .. } }
            if path == "Address.HouseNr"
    ));
}

#[test]
fn flat_bytes_round_trip() {
    let registry = test_fixtures::registry();
    let parcel = sample_parcel(&registry);

    let bytes = flat::to_bytes(&flat::encode(&parcel)).unwrap();
    let json = flat::from_bytes(&bytes).unwrap();

    assert_eq!(decode(&registry, &WireValue::Flat(json)).unwrap(), parcel);
    assert!(matches!(
        flat::from_bytes(b"{not json"),
        Err(SerializeError::Decode { format: WireFormat::Flat, .. })
    ));
}

///
/// TREE
///

#[test]
fn tree_nests_fields_under_the_type_element() {
    let registry = test_fixtures::registry();
    let wire = to_wire(&sample_parcel(&registry), WireFormat::Tree);
    let root = wire.as_tree().unwrap();

    assert_eq!(root.name, "Parcel");
    assert_eq!(root.namespace.as_deref(), Some(NS));

    let names: Vec<_> = root.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Barcode", "Insured", "Options", "Address", "Items"]);

    let options = root.child("Options").unwrap();
    assert_eq!(options.children.len(), 2);
    assert_eq!(options.children[0].name, tree::LIST_ITEM);

    let items = root.child("Items").unwrap();
    assert_eq!(items.children[1].name, "Item");
    assert_eq!(items.children[1].child("Quantity").unwrap().text(), "3");

    assert_eq!(root.child("Address").unwrap().child("Zipcode").unwrap().text(), "2132WT");
}

#[test]
fn tree_document_round_trip() {
    let registry = test_fixtures::registry();
    let parcel = sample_parcel(&registry);

    let bytes = tree::write(&tree::encode(&parcel), &NAMESPACES).unwrap();
    let text = std::str::from_utf8(&bytes).unwrap();
    assert!(text.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(text.contains("<p:Parcel xmlns:p=\"urn:test:parcel\">"));

    let root = tree::parse(&bytes).unwrap();
    assert_eq!(decode(&registry, &WireValue::Tree(root)).unwrap(), parcel);
}

#[test]
fn tree_write_rejects_unmapped_namespace() {
    let element = Element::new("urn:elsewhere", "Thing");
    let err = tree::write(&element, &NAMESPACES).unwrap_err();

    assert!(matches!(err, SerializeError::UnmappedNamespace(uri) if uri == "urn:elsewhere"));
}

#[test]
fn tree_parse_resolves_prefixes_and_escapes() {
    let doc = br#"<?xml version="1.0"?>
        <x:Parcel xmlns:x="urn:test:parcel">
            <x:Barcode>3S&amp;1</x:Barcode>
            <Colour>red</Colour>
        </x:Parcel>"#;

    let root = tree::parse(doc).unwrap();
    assert_eq!(root.namespace.as_deref(), Some(NS));
    assert_eq!(root.text, None);
    assert_eq!(root.child("Barcode").unwrap().text(), "3S&1");
    assert_eq!(root.child("Colour").unwrap().namespace, None);
}

#[test]
fn tree_parse_rejects_broken_documents() {
    assert!(matches!(
        tree::parse(b"<a><b></a>"),
        Err(SerializeError::Decode { format: WireFormat::Tree, .. })
    ));
    assert!(tree::parse(b"<a>").is_err());
    assert!(tree::parse(b"<u:a/>").is_err());
}

#[test]
fn tree_text_where_entity_expected_is_a_shape_error() {
    let registry = test_fixtures::registry();
    let root = Element::new(NS, "Parcel")
        .with_child(Element::new(NS, "Address").with_text("Siriusdreef 42"));

    let err = decode(&registry, &WireValue::Tree(root)).unwrap_err();
    assert!(matches!(
        err,
        SerializeError::Shape { path, expected: "element", found: "text" } if path == "Address"
    ));
}

#[test]
fn tree_empty_int_element_reads_as_absent() {
    let registry = test_fixtures::registry();
    let root = Element::new(NS, "Parcel")
        .with_child(Element::new(NS, "Weight"))
        .with_child(Element::new(NS, "Options").with_text("Daytime"));

    let parcel = decode(&registry, &WireValue::Tree(root)).unwrap();
    assert_eq!(parcel.get("Weight"), None);
    assert_eq!(parcel.text_list("Options"), Some(&["Daytime".to_string()][..]));
}

///
/// SHARED
///

#[test]
fn format_mismatch_is_rejected() {
    let registry = test_fixtures::registry();
    let payload = WireValue::Flat(json!({}));

    let err = from_wire(
        &registry,
        &payload,
        WireFormat::Tree,
        "Parcel",
        PARCEL,
        Direction::Request,
    )
    .unwrap_err();

    assert!(matches!(
        err,
        SerializeError::FormatMismatch {
            expected: WireFormat::Tree,
            found: WireFormat::Flat,
        }
    ));
}

#[test]
fn unknown_type_surfaces_registry_error() {
    let registry = test_fixtures::registry();
    let err = from_wire(
        &registry,
        &WireValue::Flat(json!({})),
        WireFormat::Flat,
        "Nope",
        PARCEL,
        Direction::Request,
    )
    .unwrap_err();

    assert!(matches!(err, SerializeError::Registry(RegistryError::UnknownType(_))));
}

#[test]
fn both_formats_carry_the_same_fields() {
    let registry = test_fixtures::registry();
    let parcel = sample_parcel(&registry);

    let flat_keys: Vec<String> = flat::encode(&parcel)
        .as_object()
        .unwrap()
        .keys()
        .cloned()
        .collect();
    let tree_keys: Vec<String> = tree::encode(&parcel)
        .children
        .iter()
        .map(|c| c.name.clone())
        .collect();

    assert_eq!(flat_keys, tree_keys);
}

#[test]
fn query_renders_scalars_only() {
    let registry = test_fixtures::registry();
    let parcel = sample_parcel(&registry).with("Weight", 1200).unwrap();

    assert_eq!(
        query::to_query(&parcel),
        [
            ("Barcode".to_string(), "3SDEVC201611210".to_string()),
            ("Weight".to_string(), "1200".to_string()),
            ("Insured".to_string(), "true".to_string()),
            ("Options".to_string(), "Daytime,Evening".to_string()),
        ]
    );
}

///
/// ROUND TRIP
///

const TEXT: &str = "[a-zA-Z0-9 &<>'\"]{0,10}";

#[derive(Clone, Debug)]
struct AddressInput {
    street: Option<String>,
    house: Option<i64>,
    postal: Option<String>,
}

#[derive(Clone, Debug)]
struct ParcelInput {
    barcode: Option<String>,
    weight: Option<i64>,
    insured: Option<bool>,
    options: Option<Vec<String>>,
    address: Option<AddressInput>,
    items: Option<Vec<(Option<String>, Option<i64>)>>,
}

fn address_input() -> impl Strategy<Value = AddressInput> {
    (
        prop::option::of(TEXT),
        prop::option::of(any::<i64>()),
        prop::option::of(TEXT),
    )
        .prop_map(|(street, house, postal)| AddressInput {
            street,
            house,
            postal,
        })
}

fn parcel_input() -> impl Strategy<Value = ParcelInput> {
    (
        prop::option::of(TEXT),
        prop::option::of(any::<i64>()),
        prop::option::of(any::<bool>()),
        prop::option::of(prop::collection::vec(TEXT, 0..4)),
        prop::option::of(address_input()),
        prop::option::of(prop::collection::vec(
            (prop::option::of(TEXT), prop::option::of(any::<i64>())),
            0..4,
        )),
    )
        .prop_map(
            |(barcode, weight, insured, options, address, items)| ParcelInput {
                barcode,
                weight,
                insured,
                options,
                address,
                items,
            },
        )
}

fn build(registry: &Registry, input: ParcelInput) -> Entity {
    let mut parcel = entity(registry, "Parcel");
    if let Some(v) = input.barcode {
        parcel.set("Barcode", v).unwrap();
    }
    if let Some(v) = input.weight {
        parcel.set("Weight", v).unwrap();
    }
    if let Some(v) = input.insured {
        parcel.set("Insured", v).unwrap();
    }
    if let Some(v) = input.options {
        parcel.set("Options", v).unwrap();
    }
    if let Some(a) = input.address {
        let mut address = entity(registry, "Address");
        if let Some(v) = a.street {
            address.set("Street", v).unwrap();
        }
        if let Some(v) = a.house {
            address.set("HouseNr", v).unwrap();
        }
        if let Some(v) = a.postal {
            address.set("PostalCode", v).unwrap();
        }
        parcel.set("Address", address).unwrap();
    }
    if let Some(rows) = input.items {
        let mut items = OrderedCollection::new("Item");
        for (code, quantity) in rows {
            let mut item = entity(registry, "Item");
            if let Some(v) = code {
                item.set("Code", v).unwrap();
            }
            if let Some(v) = quantity {
                item.set("Quantity", v).unwrap();
            }
            items.append(item).unwrap();
        }
        parcel.set("Items", Value::Collection(items)).unwrap();
    }

    parcel
}

proptest! {
    #[test]
    fn flat_round_trip_preserves_entity(input in parcel_input()) {
        let registry = test_fixtures::registry();
        let parcel = build(&registry, input);

        let wire = to_wire(&parcel, WireFormat::Flat);
        prop_assert_eq!(decode(&registry, &wire).unwrap(), parcel);
    }

    #[test]
    fn tree_document_round_trip_preserves_entity(input in parcel_input()) {
        let registry = test_fixtures::registry();
        let parcel = build(&registry, input);

        let WireValue::Tree(root) = to_wire(&parcel, WireFormat::Tree) else {
            unreachable!("tree format yields a tree");
        };
        let bytes = tree::write(&root, &NAMESPACES).unwrap();
        let parsed = tree::parse(&bytes).unwrap();

        prop_assert_eq!(decode(&registry, &WireValue::Tree(parsed)).unwrap(), parcel);
    }
}
