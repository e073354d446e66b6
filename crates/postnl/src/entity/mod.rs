//! Declaration tables for every carrier entity type.
//!
//! Field order matters: it is the validation order and the wire order.
pub mod barcode;
pub mod confirming;
pub mod delivery_date;
pub mod timeframe;

use postnl_core::model::entity::EntityDecl;

///
/// NAMESPACES
///

pub const BARCODE_DOMAIN_NS: &str = "http://postnl.nl/cif/domain/BarcodeWebService/";
pub const BARCODE_SERVICES_NS: &str = "http://postnl.nl/cif/services/BarcodeWebService/";
pub const CONFIRMING_DOMAIN_NS: &str = "http://postnl.nl/cif/domain/ConfirmingWebService/";
pub const DELIVERY_DATE_DOMAIN_NS: &str = "http://postnl.nl/cif/domain/DeliveryDateWebService/";
pub const DELIVERY_DATE_SERVICES_NS: &str =
    "http://postnl.nl/cif/services/DeliveryDateWebService/";
pub const TIMEFRAME_DOMAIN_NS: &str = "http://postnl.nl/cif/domain/TimeframeWebService/";
pub const TIMEFRAME_SERVICES_NS: &str = "http://postnl.nl/cif/services/TimeframeWebService/";

/// Every declaration known to the process-wide registry.
pub static DECLARATIONS: &[&EntityDecl] = &[
    &barcode::GENERATE_BARCODE_REQUEST,
    &barcode::GENERATE_BARCODE_RESPONSE,
    &confirming::CONFIRMING_RESPONSE_SHIPMENT,
    &delivery_date::CUT_OFF_TIME,
    &delivery_date::DELIVERY_DATE_REQUEST,
    &delivery_date::DELIVERY_DATE_RESPONSE,
    &delivery_date::SHIPPING_DATE_REQUEST,
    &delivery_date::SHIPPING_DATE_RESPONSE,
    &timeframe::CALCULATE_TIMEFRAMES_RESPONSE,
    &timeframe::REASON_NO_TIMEFRAME,
    &timeframe::TIMEFRAME,
    &timeframe::TIMEFRAME_REQUEST,
    &timeframe::TIMEFRAME_TIME_FRAME,
];
