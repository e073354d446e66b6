use crate::{entity::BARCODE_DOMAIN_NS as NS, service_id::BARCODE};
use postnl_core::model::{
    ServiceId,
    entity::EntityDecl,
    field::{FieldKind, FieldModel},
};

const SVC: &[ServiceId] = &[BARCODE];

pub static GENERATE_BARCODE_REQUEST: EntityDecl = EntityDecl::new(
    "GenerateBarcodeRequest",
    "GenerateBarcode",
    NS,
    &[
        FieldModel::request("CustomerCode", FieldKind::TEXT).required(SVC),
        FieldModel::request("CustomerNumber", FieldKind::TEXT).required(SVC),
        FieldModel::request("Type", FieldKind::TEXT).required(SVC),
        FieldModel::request("Serie", FieldKind::TEXT).optional(SVC),
        FieldModel::request("Range", FieldKind::TEXT).required(SVC),
    ],
);

pub static GENERATE_BARCODE_RESPONSE: EntityDecl = EntityDecl::new(
    "GenerateBarcodeResponse",
    "GenerateBarcodeResponse",
    NS,
    &[FieldModel::response("Barcode", FieldKind::TEXT).required(SVC)],
);
