use crate::{entity::TIMEFRAME_DOMAIN_NS as NS, service_id::TIMEFRAME as TIMEFRAME_SERVICE};
use postnl_core::model::{
    ServiceId,
    entity::EntityDecl,
    field::{FieldKind, FieldModel},
};

const SVC: &[ServiceId] = &[TIMEFRAME_SERVICE];

pub static TIMEFRAME_REQUEST: EntityDecl = EntityDecl::new(
    "TimeframeRequest",
    "Timeframe",
    NS,
    &[
        FieldModel::request("StartDate", FieldKind::TEXT).required(SVC),
        FieldModel::request("EndDate", FieldKind::TEXT).required(SVC),
        FieldModel::request("PostalCode", FieldKind::TEXT).required(SVC),
        FieldModel::request("HouseNumber", FieldKind::INT).required(SVC),
        FieldModel::request("HouseNrExt", FieldKind::TEXT).optional(SVC),
        FieldModel::request("City", FieldKind::TEXT).optional(SVC),
        FieldModel::request("Street", FieldKind::TEXT).optional(SVC),
        FieldModel::request("CountryCode", FieldKind::TEXT).required(SVC),
        FieldModel::request("Options", FieldKind::TEXT_LIST).required(SVC),
        FieldModel::request("AllowSundaySorting", FieldKind::BOOL).optional(SVC),
    ],
);

///
/// CalculateTimeframesResponse
///

pub static CALCULATE_TIMEFRAMES_RESPONSE: EntityDecl = EntityDecl::new(
    "CalculateTimeframesResponse",
    "ResponseTimeframes",
    NS,
    &[
        FieldModel::response("Timeframes", FieldKind::Collection("Timeframe")).required(SVC),
        FieldModel::response("ReasonNoTimeframes", FieldKind::Collection("ReasonNoTimeframe"))
            .optional(SVC),
    ],
);

/// One delivery day and its windows.
pub static TIMEFRAME: EntityDecl = EntityDecl::new(
    "Timeframe",
    "Timeframe",
    NS,
    &[
        FieldModel::response("Date", FieldKind::TEXT).required(SVC),
        FieldModel::response("Timeframes", FieldKind::Collection("TimeframeTimeFrame"))
            .required(SVC),
    ],
);

pub static TIMEFRAME_TIME_FRAME: EntityDecl = EntityDecl::new(
    "TimeframeTimeFrame",
    "TimeframeTimeFrame",
    NS,
    &[
        FieldModel::response("From", FieldKind::TEXT).required(SVC),
        FieldModel::response("To", FieldKind::TEXT).required(SVC),
        FieldModel::response("Options", FieldKind::TEXT_LIST).optional(SVC),
    ],
);

/// Why no window is offered on a given date.
pub static REASON_NO_TIMEFRAME: EntityDecl = EntityDecl::new(
    "ReasonNoTimeframe",
    "ReasonNoTimeframe",
    NS,
    &[
        FieldModel::response("Code", FieldKind::TEXT).required(SVC),
        FieldModel::response("Date", FieldKind::TEXT).required(SVC),
        FieldModel::response("Description", FieldKind::TEXT).required(SVC),
        FieldModel::response("Options", FieldKind::TEXT_LIST).required(SVC),
        FieldModel::response("From", FieldKind::TEXT).required(SVC),
        FieldModel::response("To", FieldKind::TEXT).required(SVC),
    ],
);
