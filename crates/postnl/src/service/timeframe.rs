use crate::{
    Client, Error,
    client::Operation,
    http::HttpRequest,
    service::{decode_json, expect_type},
    service_id::TIMEFRAME,
};
use postnl_core::{entity::Entity, serialize::query};

const REST_PATH: &str = "/shipment/v2_1/calculate/timeframes";

const TIMEFRAMES_REST: Operation = Operation {
    service: TIMEFRAME,
    name: "rest:CalculateTimeframes",
    cacheable: true,
};

///
/// TimeframeService
///
/// Delivery windows per day. REST only.
///

#[derive(Clone, Copy, Debug)]
pub struct TimeframeService<'a> {
    client: &'a Client,
}

impl<'a> TimeframeService<'a> {
    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Timeframes for a `TimeframeRequest`, answered as a
    /// `CalculateTimeframesResponse`.
    pub fn calculate_timeframes(&self, request: &Entity) -> Result<Entity, Error> {
        expect_type(request, "TimeframeRequest")?;

        self.client.execute(
            TIMEFRAMES_REST,
            request,
            |e| {
                let config = self.client.config();
                let url = config.rest_base().endpoint(REST_PATH, &query::to_query(e));

                Ok(HttpRequest::get(url)
                    .with_header("apikey", config.api_key.as_str())
                    .with_header("Accept", "application/json"))
            },
            |response| decode_json(response, "CalculateTimeframesResponse", TIMEFRAME),
        )
    }
}
