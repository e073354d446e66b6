//! Client handle and the shared request pipeline.
use crate::{
    Error,
    config::ClientConfig,
    http::{HttpRequest, HttpResponse, Transport},
    service::{BarcodeService, DeliveryDateService, TimeframeService},
};
use postnl_core::{
    cache::{CacheLookup, ResponseCache},
    entity::Entity,
    fingerprint::Fingerprint,
    model::{Direction, ServiceId},
    validate,
};
use std::sync::Arc;

///
/// Operation
///
/// One remote call: the service whose rules apply, a stable operation name
/// for fingerprints and whether successful answers may be replayed.
///

#[derive(Clone, Copy, Debug)]
pub(crate) struct Operation {
    pub service: ServiceId,
    pub name: &'static str,
    pub cacheable: bool,
}

///
/// Client
///
/// Explicitly constructed; the transport and the optional cache are
/// injected and shared by every service handle.
///

#[derive(Clone)]
pub struct Client {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    cache: Option<ResponseCache>,
}

impl Client {
    #[must_use]
    pub fn new(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            transport,
            cache: None,
        }
    }

    #[must_use]
    pub fn with_cache(mut self, cache: ResponseCache) -> Self {
        self.cache = Some(cache);
        self
    }

    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub const fn cache(&self) -> Option<&ResponseCache> {
        self.cache.as_ref()
    }

    #[must_use]
    pub const fn delivery_date(&self) -> DeliveryDateService<'_> {
        DeliveryDateService::new(self)
    }

    #[must_use]
    pub const fn timeframe(&self) -> TimeframeService<'_> {
        TimeframeService::new(self)
    }

    #[must_use]
    pub const fn barcode(&self) -> BarcodeService<'_> {
        BarcodeService::new(self)
    }

    /// Validate, render, consult the cache, send, decode and store.
    ///
    /// Validation runs before anything is rendered or sent. Cache failures
    /// never fail the call: they are logged and the request goes out.
    /// A response is stored only once it has a success status and `decode`
    /// has accepted it, so a cached entry always replays into a result.
    pub(crate) fn execute<T>(
        &self,
        op: Operation,
        entity: &Entity,
        render: impl FnOnce(&Entity) -> Result<HttpRequest, Error>,
        decode: impl Fn(&HttpResponse) -> Result<T, Error>,
    ) -> Result<T, Error> {
        validate::validate(entity, op.service, Direction::Request)?;
        let request = render(entity)?;

        let cached = self
            .cache
            .as_ref()
            .filter(|_| op.cacheable)
            .map(|cache| (cache, Fingerprint::for_request(op.service, op.name, entity)));

        if let Some((cache, fingerprint)) = &cached
            && let Some(response) = lookup(cache, fingerprint, op)
        {
            match decode(&response) {
                Ok(decoded) => return Ok(decoded),
                Err(err) => {
                    tracing::warn!(operation = op.name, error = %err, "discarding undecodable cache entry");
                    if let Err(err) = cache.remove(fingerprint) {
                        tracing::warn!(operation = op.name, error = %err, "failed to remove cache entry");
                    }
                }
            }
        }

        tracing::info!(
            service = %op.service,
            operation = op.name,
            method = %request.method,
            url = %request.url,
            "sending request"
        );
        let response = self.transport.send(&request)?;

        if !response.is_success() {
            tracing::debug!(
                operation = op.name,
                status = response.status.as_u16(),
                "request failed"
            );
            return Err(Error::status(response.status, &response.body));
        }

        let decoded = decode(&response)?;

        if let Some((cache, fingerprint)) = &cached
            && let Err(err) = cache.put(fingerprint, response.to_bytes())
        {
            tracing::warn!(operation = op.name, error = %err, "failed to store response");
        }

        Ok(decoded)
    }
}

// misses, store errors and unreadable records all fall through to the network
fn lookup(cache: &ResponseCache, fingerprint: &Fingerprint, op: Operation) -> Option<HttpResponse> {
    match cache.get(fingerprint) {
        Ok(CacheLookup::Hit(entry)) => match HttpResponse::parse(&entry.raw) {
            Ok(response) => {
                tracing::debug!(operation = op.name, %fingerprint, "cache hit");
                Some(response)
            }
            Err(err) => {
                tracing::warn!(operation = op.name, error = %err, "discarding unreadable cache entry");
                None
            }
        },
        Ok(CacheLookup::Miss) => None,
        Err(err) => {
            tracing::warn!(operation = op.name, error = %err, "cache lookup failed");
            None
        }
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("sandbox", &self.config.sandbox)
            .field("mode", &self.config.mode)
            .field("cached", &self.cache.is_some())
            .finish_non_exhaustive()
    }
}
