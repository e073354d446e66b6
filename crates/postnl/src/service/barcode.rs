use crate::{
    Client, Error, ErrorKind, ErrorOrigin,
    client::Operation,
    http::HttpRequest,
    service::{decode_json, expect_type},
    service_id::BARCODE,
};
use postnl_core::{collection::OrderedCollection, entity::Entity, serialize::query};

const REST_PATH: &str = "/shipment/v1_1/barcode";

// every call mints a new barcode, so answers are never replayed
const BARCODE_REST: Operation = Operation {
    service: BARCODE,
    name: "rest:GenerateBarcode",
    cacheable: false,
};

///
/// BarcodeService
///
/// Barcode generation. `CustomerCode` and `CustomerNumber` default to the
/// values in [`ClientConfig`](crate::ClientConfig) when the request leaves
/// them unset.
///

#[derive(Clone, Copy, Debug)]
pub struct BarcodeService<'a> {
    client: &'a Client,
}

impl<'a> BarcodeService<'a> {
    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// One barcode for a `GenerateBarcodeRequest`.
    pub fn generate_barcode(&self, request: &Entity) -> Result<Entity, Error> {
        expect_type(request, "GenerateBarcodeRequest")?;
        let request = self.with_customer(request)?;

        self.client.execute(
            BARCODE_REST,
            &request,
            |e| {
                let config = self.client.config();
                let url = config.rest_base().endpoint(REST_PATH, &query::to_query(e));

                Ok(HttpRequest::get(url)
                    .with_header("apikey", config.api_key.as_str())
                    .with_header("Accept", "application/json"))
            },
            |response| decode_json(response, "GenerateBarcodeResponse", BARCODE),
        )
    }

    /// One barcode per request, keyed like the input collection.
    ///
    /// Stops at the first failure; barcodes generated before it are lost.
    pub fn generate_barcodes(
        &self,
        requests: &OrderedCollection,
    ) -> Result<OrderedCollection, Error> {
        if requests.element_type() != "GenerateBarcodeRequest" {
            return Err(Error::new(
                ErrorKind::Validation,
                ErrorOrigin::Entity,
                format!(
                    "expected a collection of 'GenerateBarcodeRequest', got '{}'",
                    requests.element_type()
                ),
            ));
        }

        let mut barcodes = OrderedCollection::new("GenerateBarcodeResponse");
        for (key, request) in requests.iter() {
            let barcode = self.generate_barcode(request)?;
            barcodes.set(key.clone(), barcode)?;
        }

        Ok(barcodes)
    }

    fn with_customer(&self, request: &Entity) -> Result<Entity, Error> {
        let config = self.client.config();
        let mut request = request.clone();

        if request.text("CustomerCode").is_none()
            && let Some(code) = &config.customer_code
        {
            request.set("CustomerCode", code.as_str())?;
        }
        if request.text("CustomerNumber").is_none()
            && let Some(number) = &config.customer_number
        {
            request.set("CustomerNumber", number.as_str())?;
        }

        Ok(request)
    }
}
