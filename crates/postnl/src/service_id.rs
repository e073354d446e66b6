//! Remote operation families.
//!
//! Every property rule names one of these; the same entity type may be
//! required for one service and ignored by another.
use postnl_core::model::ServiceId;

pub const BARCODE: ServiceId = ServiceId::new("BarcodeService");
pub const CONFIRMING: ServiceId = ServiceId::new("ConfirmingService");
pub const DELIVERY_DATE: ServiceId = ServiceId::new("DeliveryDateService");
pub const TIMEFRAME: ServiceId = ServiceId::new("TimeframeService");
