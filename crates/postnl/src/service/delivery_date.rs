use crate::{
    Client, Error, ErrorKind, ErrorOrigin,
    client::Operation,
    config::ApiMode,
    entity::DELIVERY_DATE_SERVICES_NS,
    http::HttpRequest,
    service::{decode_json, decode_soap, expect_type},
    service_id::DELIVERY_DATE,
    soap::{DELIVERY_DATE_NAMESPACES, SoapAction},
};
use postnl_core::{entity::Entity, serialize::{query, tree}};
use time::{Time, format_description::BorrowedFormatItem, macros::format_description};

const REST_PATH: &str = "/shipment/v2_2/calculate/date";
const SOAP_PATH: &str = "/DeliveryDateWebService/2_1/DeliveryDateWebService.svc";

/// Option always requested first on the REST endpoint.
pub const DEFAULT_OPTION: &str = "Daytime";

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const DELIVERY_REST: Operation = Operation {
    service: DELIVERY_DATE,
    name: "rest:GetDeliveryDate",
    cacheable: true,
};
const DELIVERY_SOAP: Operation = Operation {
    service: DELIVERY_DATE,
    name: "soap:GetDeliveryDate",
    cacheable: true,
};
const SENT_REST: Operation = Operation {
    service: DELIVERY_DATE,
    name: "rest:GetSentDate",
    cacheable: true,
};
const SENT_SOAP: Operation = Operation {
    service: DELIVERY_DATE,
    name: "soap:GetSentDate",
    cacheable: true,
};

static DELIVERY_ACTION: SoapAction = SoapAction {
    services_ns: DELIVERY_DATE_SERVICES_NS,
    operation: "GetDeliveryDate",
    action: "http://postnl.nl/cif/services/DeliveryDateWebService/IDeliveryDateWebService/GetDeliveryDate",
    namespaces: &DELIVERY_DATE_NAMESPACES,
};
static SENT_ACTION: SoapAction = SoapAction {
    services_ns: DELIVERY_DATE_SERVICES_NS,
    operation: "GetSentDate",
    action: "http://postnl.nl/cif/services/DeliveryDateWebService/IDeliveryDateWebService/GetSentDate",
    namespaces: &DELIVERY_DATE_NAMESPACES,
};

const TIME_HMS: &[BorrowedFormatItem<'static>] =
    format_description!("[hour padding:none]:[minute]:[second]");
const TIME_HM: &[BorrowedFormatItem<'static>] = format_description!("[hour padding:none]:[minute]");
const TIME_OUT: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]:[second]");

///
/// DeliveryDateService
///
/// Delivery and shipping date calculations. Uses REST or SOAP depending on
/// the configured [`ApiMode`].
///

#[derive(Clone, Copy, Debug)]
pub struct DeliveryDateService<'a> {
    client: &'a Client,
}

impl<'a> DeliveryDateService<'a> {
    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Earliest delivery date for a `DeliveryDateRequest`.
    pub fn get_delivery_date(&self, request: &Entity) -> Result<Entity, Error> {
        expect_type(request, "DeliveryDateRequest")?;

        match self.client.config().mode {
            ApiMode::Rest => self.client.execute(
                DELIVERY_REST,
                request,
                |e| Ok(self.rest_request("/delivery", &delivery_date_query(e)?)),
                |response| decode_json(response, "DeliveryDateResponse", DELIVERY_DATE),
            ),
            ApiMode::Soap => self.client.execute(
                DELIVERY_SOAP,
                request,
                |e| self.soap_request(&DELIVERY_ACTION, e),
                |response| decode_soap(response, "DeliveryDateResponse", DELIVERY_DATE),
            ),
        }
    }

    /// Date a parcel must be handed over to arrive on the requested
    /// delivery date, for a `ShippingDateRequest`.
    pub fn calculate_shipping_date(&self, request: &Entity) -> Result<Entity, Error> {
        expect_type(request, "ShippingDateRequest")?;

        match self.client.config().mode {
            ApiMode::Rest => self.client.execute(
                SENT_REST,
                request,
                |e| Ok(self.rest_request("/shipping", &query::to_query(e))),
                |response| decode_json(response, "ShippingDateResponse", DELIVERY_DATE),
            ),
            ApiMode::Soap => self.client.execute(
                SENT_SOAP,
                request,
                |e| self.soap_request(&SENT_ACTION, e),
                |response| decode_soap(response, "ShippingDateResponse", DELIVERY_DATE),
            ),
        }
    }

    fn rest_request(&self, path: &str, pairs: &[(String, String)]) -> HttpRequest {
        let config = self.client.config();
        let url = config.rest_base().endpoint(&format!("{REST_PATH}{path}"), pairs);

        HttpRequest::get(url)
            .with_header("apikey", config.api_key.as_str())
            .with_header("Accept", "application/json")
    }

    fn soap_request(&self, action: &SoapAction, entity: &Entity) -> Result<HttpRequest, Error> {
        let config = self.client.config();
        let body = action.write(&config.api_key, tree::encode(entity))?;

        Ok(
            HttpRequest::post(config.soap_base().endpoint(SOAP_PATH, &[]), body)
                .with_header("SOAPAction", action.header_value())
                .with_header("Content-Type", "text/xml")
                .with_header("Accept", "text/xml"),
        )
    }
}

/// Query pairs for the REST delivery-date endpoint.
///
/// `Options` always starts with `Daytime`. Cut-off times become
/// `CutOffTime` (day `00`) or `CutOffTime<Weekday>` plus
/// `Available<Weekday>` (days `01`..`07`), times normalised to `HH:MM:SS`.
pub fn delivery_date_query(request: &Entity) -> Result<Vec<(String, String)>, Error> {
    let mut pairs: Vec<(String, String)> = query::to_query(request)
        .into_iter()
        .filter(|(name, _)| name != "Options")
        .collect();

    if let Some(cut_off_times) = request.collection("CutOffTimes") {
        for cut_off in cut_off_times.values() {
            push_cut_off(cut_off, &mut pairs)?;
        }
    }

    let mut options = vec![DEFAULT_OPTION.to_string()];
    if let Some(extra) = request.text_list("Options") {
        options.extend(extra.iter().filter(|o| *o != DEFAULT_OPTION).cloned());
    }
    pairs.push(("Options".to_string(), options.join(",")));

    Ok(pairs)
}

fn push_cut_off(cut_off: &Entity, pairs: &mut Vec<(String, String)>) -> Result<(), Error> {
    let day = cut_off.text("Day").unwrap_or_default();
    let time = normalize_time(cut_off.text("Time").unwrap_or_default())?;

    if day == "00" {
        pairs.push(("CutOffTime".to_string(), time));
        return Ok(());
    }

    let weekday = day
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=7).contains(n))
        .map(|n| WEEKDAYS[n - 1]);

    match weekday {
        Some(weekday) => {
            let available = cut_off.bool("Available").unwrap_or(false);
            pairs.push((format!("CutOffTime{weekday}"), time));
            pairs.push((format!("Available{weekday}"), available.to_string()));
        }
        None => tracing::warn!(day, "ignoring cut-off time with unknown day"),
    }

    Ok(())
}

fn normalize_time(raw: &str) -> Result<String, Error> {
    let invalid = || {
        Error::new(
            ErrorKind::Validation,
            ErrorOrigin::Entity,
            format!("invalid cut-off time '{raw}'"),
        )
    };

    let parsed = Time::parse(raw.trim(), TIME_HMS)
        .or_else(|_| Time::parse(raw.trim(), TIME_HM))
        .map_err(|_| invalid())?;

    parsed.format(TIME_OUT).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry;
    use postnl_core::{collection::OrderedCollection, model::Direction};

    fn entity(type_id: &str) -> Entity {
        Entity::new(registry(), type_id, DELIVERY_DATE, Direction::Request).unwrap()
    }

    fn cut_off(day: &str, time: &str, available: Option<bool>) -> Entity {
        let mut e = entity("CutOffTime").with("Day", day).unwrap().with("Time", time).unwrap();
        if let Some(a) = available {
            e.set("Available", a).unwrap();
        }
        e
    }

    #[test]
    fn query_starts_options_with_daytime() {
        let request = entity("DeliveryDateRequest")
            .with("ShippingDate", "29-06-2016 14:00:00")
            .unwrap()
            .with("PostalCode", "2132WT")
            .unwrap()
            .with("CountryCode", "NL")
            .unwrap()
            .with("Options", vec!["Evening", "Daytime"])
            .unwrap();

        let pairs = delivery_date_query(&request).unwrap();
        assert_eq!(
            pairs.last(),
            Some(&("Options".to_string(), "Daytime,Evening".to_string()))
        );
        assert_eq!(pairs[0], ("ShippingDate".to_string(), "29-06-2016 14:00:00".to_string()));
    }

    #[test]
    fn cut_off_times_expand_per_weekday() {
        let mut times = OrderedCollection::new("CutOffTime");
        times.append(cut_off("00", "14:00", None)).unwrap();
        times.append(cut_off("01", "9:30:00", Some(true))).unwrap();
        times.append(cut_off("07", "12:00", None)).unwrap();
        times.append(cut_off("09", "12:00", Some(true))).unwrap();

        let request = entity("DeliveryDateRequest").with("CutOffTimes", times).unwrap();
        let pairs = delivery_date_query(&request).unwrap();

        let expected = [
            ("CutOffTime", "14:00:00"),
            ("CutOffTimeMonday", "09:30:00"),
            ("AvailableMonday", "true"),
            ("CutOffTimeSunday", "12:00:00"),
            ("AvailableSunday", "false"),
            ("Options", "Daytime"),
        ];
        let got: Vec<(&str, &str)> = pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn unparsable_cut_off_time_is_rejected() {
        let mut times = OrderedCollection::new("CutOffTime");
        times.append(cut_off("00", "late", None)).unwrap();
        let request = entity("DeliveryDateRequest").with("CutOffTimes", times).unwrap();

        let err = delivery_date_query(&request).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains("'late'"));
    }
}
