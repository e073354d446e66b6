//! Carrier service handles.
//!
//! Each handle borrows the [`Client`](crate::Client) and runs its calls
//! through the shared pipeline: validate, render, cache, send, decode.
mod barcode;
mod delivery_date;
mod timeframe;

pub use barcode::BarcodeService;
pub use delivery_date::{DeliveryDateService, delivery_date_query};
pub use timeframe::TimeframeService;

use crate::{
    Error, ErrorKind, ErrorOrigin,
    http::HttpResponse,
    registry,
    soap,
};
use postnl_core::{
    entity::Entity,
    model::{Direction, ServiceId},
    serialize::{WireFormat, WireValue, flat, from_wire},
};

// guards against handing e.g. a timeframe request to the barcode service
fn expect_type(entity: &Entity, type_id: &str) -> Result<(), Error> {
    if entity.type_id() == type_id {
        Ok(())
    } else {
        Err(Error::new(
            ErrorKind::Validation,
            ErrorOrigin::Entity,
            format!("expected a '{type_id}' entity, got '{}'", entity.type_id()),
        ))
    }
}

// a decoded answer must also carry what the service promises to return
fn decode_json(
    response: &HttpResponse,
    type_id: &str,
    service: ServiceId,
) -> Result<Entity, Error> {
    let json = flat::from_bytes(&response.body)?;
    let entity = from_wire(
        registry(),
        &WireValue::Flat(json),
        WireFormat::Flat,
        type_id,
        service,
        Direction::Response,
    )?;
    entity.validate().map_err(|err| Error::incomplete_response(&err))?;

    Ok(entity)
}

fn decode_soap(
    response: &HttpResponse,
    type_id: &str,
    service: ServiceId,
) -> Result<Entity, Error> {
    let element = soap::unwrap_body(&response.body)?;
    let entity = from_wire(
        registry(),
        &WireValue::Tree(element),
        WireFormat::Tree,
        type_id,
        service,
        Direction::Response,
    )?;
    entity.validate().map_err(|err| Error::incomplete_response(&err))?;

    Ok(entity)
}
