//! Small declaration set shared by the unit tests in this crate.
use crate::{
    model::{
        ServiceId,
        entity::EntityDecl,
        field::{FieldKind, FieldModel},
    },
    registry::Registry,
};

pub(crate) const NS: &str = "urn:test:parcel";

pub(crate) const PARCEL: ServiceId = ServiceId::new("ParcelService");
pub(crate) const TRACKING: ServiceId = ServiceId::new("TrackingService");

pub(crate) static ADDRESS: EntityDecl = EntityDecl::new(
    "Address",
    "Address",
    NS,
    &[
        FieldModel::request("Street", FieldKind::TEXT).required(&[PARCEL]),
        FieldModel::request("HouseNr", FieldKind::INT).required(&[PARCEL]),
        FieldModel::request("PostalCode", FieldKind::TEXT)
            .wire("Zipcode")
            .required(&[PARCEL, TRACKING]),
        FieldModel::request("HouseNrExt", FieldKind::TEXT).optional(&[PARCEL]),
        FieldModel::request("City", FieldKind::TEXT).optional(&[PARCEL]),
    ],
);

pub(crate) static PARCEL_DECL: EntityDecl = EntityDecl::new(
    "Parcel",
    "Parcel",
    NS,
    &[
        FieldModel::request("Barcode", FieldKind::TEXT).required(&[PARCEL, TRACKING]),
        FieldModel::request("Weight", FieldKind::INT).optional(&[PARCEL]),
        FieldModel::request("Insured", FieldKind::BOOL).optional(&[PARCEL]),
        FieldModel::request("Options", FieldKind::TEXT_LIST).optional(&[PARCEL]),
        FieldModel::request("Address", FieldKind::Entity("Address")).required(&[PARCEL]),
        FieldModel::request("Items", FieldKind::Collection("Item")).optional(&[PARCEL]),
    ],
);

pub(crate) static ITEM: EntityDecl = EntityDecl::new(
    "Item",
    "Item",
    NS,
    &[
        FieldModel::request("Code", FieldKind::TEXT).required(&[PARCEL]),
        FieldModel::request("Quantity", FieldKind::INT).optional(&[PARCEL]),
    ],
);

pub(crate) fn registry() -> Registry {
    Registry::new(&[&ADDRESS, &PARCEL_DECL, &ITEM])
}
