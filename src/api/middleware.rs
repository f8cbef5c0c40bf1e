use actix_web::{
    Error, HttpMessage, HttpRequest,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderName, HeaderValue},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Id assigned to the current request, stored in request extensions.
#[derive(Clone, Debug)]
pub struct RequestIdValue(pub String);

/// Id of the request for log lines, `-` when the middleware is not mounted.
pub fn request_id(req: &HttpRequest) -> String {
    req.extensions()
        .get::<RequestIdValue>()
        .map(|value| value.0.clone())
        .unwrap_or_else(|| "-".to_string())
}

/// Middleware tagging every request with a fresh id for log correlation
pub struct RequestId;

impl<S, B> Transform<S, ServiceRequest> for RequestId
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestIdMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestIdMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequestIdMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequestIdMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let id = Uuid::new_v4().to_string();
        req.extensions_mut().insert(RequestIdValue(id.clone()));
        log::debug!("request_id={} {} {}", id, req.method(), req.path());
        let fut = self.service.call(req);
        Box::pin(async move {
            let mut resp = fut.await?;
            log::debug!("request_id={} status={}", id, resp.status());
            if let Ok(value) = HeaderValue::from_str(&id) {
                resp.headers_mut()
                    .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
            }
            Ok(resp)
        })
    }
}
