use crate::{entity::CONFIRMING_DOMAIN_NS as NS, service_id::CONFIRMING};
use postnl_core::model::{
    entity::EntityDecl,
    field::{FieldKind, FieldModel},
};

/// Per-shipment result of a confirm call.
pub static CONFIRMING_RESPONSE_SHIPMENT: EntityDecl = EntityDecl::new(
    "ConfirmingResponseShipment",
    "ConfirmingResponseShipment",
    NS,
    &[
        FieldModel::response("Barcode", FieldKind::TEXT).optional(&[CONFIRMING]),
        FieldModel::response("Warnings", FieldKind::TEXT_LIST).optional(&[CONFIRMING]),
    ],
);
