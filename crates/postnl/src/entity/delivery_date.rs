use crate::{entity::DELIVERY_DATE_DOMAIN_NS as NS, service_id::DELIVERY_DATE};
use postnl_core::model::{
    ServiceId,
    entity::EntityDecl,
    field::{FieldKind, FieldModel},
};

const SVC: &[ServiceId] = &[DELIVERY_DATE];

///
/// CutOffTime
///
/// `Day` is `00` for the default cut-off, `01`..`07` for Monday..Sunday.
///

pub static CUT_OFF_TIME: EntityDecl = EntityDecl::new(
    "CutOffTime",
    "CutOffTime",
    NS,
    &[
        FieldModel::request("Day", FieldKind::TEXT).required(SVC),
        FieldModel::request("Time", FieldKind::TEXT).required(SVC),
        FieldModel::request("Available", FieldKind::BOOL).optional(SVC),
    ],
);

pub static DELIVERY_DATE_REQUEST: EntityDecl = EntityDecl::new(
    "DeliveryDateRequest",
    "GetDeliveryDate",
    NS,
    &[
        FieldModel::request("ShippingDate", FieldKind::TEXT).required(SVC),
        FieldModel::request("ShippingDuration", FieldKind::INT).optional(SVC),
        FieldModel::request("CutOffTimes", FieldKind::Collection("CutOffTime")).optional(SVC),
        FieldModel::request("PostalCode", FieldKind::TEXT).required(SVC),
        FieldModel::request("CountryCode", FieldKind::TEXT).required(SVC),
        FieldModel::request("OriginCountryCode", FieldKind::TEXT).optional(SVC),
        FieldModel::request("City", FieldKind::TEXT).optional(SVC),
        FieldModel::request("Street", FieldKind::TEXT).optional(SVC),
        FieldModel::request("HouseNr", FieldKind::INT).optional(SVC),
        FieldModel::request("HouseNrExt", FieldKind::TEXT).optional(SVC),
        FieldModel::request("AllowSundaySorting", FieldKind::BOOL).optional(SVC),
        FieldModel::request("Options", FieldKind::TEXT_LIST).optional(SVC),
    ],
);

pub static DELIVERY_DATE_RESPONSE: EntityDecl = EntityDecl::new(
    "DeliveryDateResponse",
    "GetDeliveryDateResponse",
    NS,
    &[
        FieldModel::response("DeliveryDate", FieldKind::TEXT).required(SVC),
        FieldModel::response("Options", FieldKind::TEXT_LIST).optional(SVC),
    ],
);

///
/// ShippingDateRequest
///
/// Asks for the date a parcel must be handed over to arrive on `DeliveryDate`.
///

pub static SHIPPING_DATE_REQUEST: EntityDecl = EntityDecl::new(
    "ShippingDateRequest",
    "GetSentDate",
    NS,
    &[
        FieldModel::request("DeliveryDate", FieldKind::TEXT).required(SVC),
        FieldModel::request("ShippingDuration", FieldKind::INT).required(SVC),
        FieldModel::request("PostalCode", FieldKind::TEXT).required(SVC),
        FieldModel::request("CountryCode", FieldKind::TEXT).optional(SVC),
        FieldModel::request("OriginCountryCode", FieldKind::TEXT).optional(SVC),
        FieldModel::request("City", FieldKind::TEXT).optional(SVC),
        FieldModel::request("Street", FieldKind::TEXT).optional(SVC),
        FieldModel::request("HouseNumber", FieldKind::INT).optional(SVC),
        FieldModel::request("HouseNrExt", FieldKind::TEXT).optional(SVC),
    ],
);

pub static SHIPPING_DATE_RESPONSE: EntityDecl = EntityDecl::new(
    "ShippingDateResponse",
    "GetSentDateResponse",
    NS,
    &[FieldModel::response("SentDate", FieldKind::TEXT).required(SVC)],
);
