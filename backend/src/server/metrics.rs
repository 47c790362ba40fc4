//! Optional Prometheus instrumentation for the whole app.
//!
//! [`MetricsLayer`] always boxes the wrapped service, so `create_server` can
//! call `App::wrap` unconditionally whether or not `/metrics` is exported.

use actix_service::boxed::{self, BoxService};
use actix_service::{Service, ServiceExt as _, Transform};
use actix_web::Error;
use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Compat;
use actix_web_prom::PrometheusMetrics;
use futures_util::future::LocalBoxFuture;

type Instrumented = BoxService<ServiceRequest, ServiceResponse<BoxBody>, Error>;

#[derive(Clone)]
pub(crate) struct MetricsLayer {
    prometheus: Option<PrometheusMetrics>,
}

impl MetricsLayer {
    pub(crate) fn from_option(prometheus: Option<PrometheusMetrics>) -> Self {
        Self { prometheus }
    }
}

impl<S, B> Transform<S, ServiceRequest> for MetricsLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = Instrumented;
    type Future = LocalBoxFuture<'static, Result<Instrumented, ()>>;

    fn new_transform(&self, service: S) -> Self::Future {
        match self.prometheus.clone() {
            Some(prometheus) => {
                let pending = Compat::new(prometheus).new_transform(service);
                Box::pin(async move { pending.await.map(boxed::service) })
            }
            None => {
                let untouched = service.map(|res: ServiceResponse<B>| res.map_into_boxed_body());
                Box::pin(async move { Ok(boxed::service(untouched)) })
            }
        }
    }
}
