use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderValue, CONTENT_TYPE},
    Error,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

/// Garante `content-type: application/json` em toda resposta,
/// inclusive nos 404/405 padrão do roteador.
pub struct JsonContentType;

impl<S, B> Transform<S, ServiceRequest> for JsonContentType
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JsonContentTypeMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JsonContentTypeMiddleware { service }))
    }
}

pub struct JsonContentTypeMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for JsonContentTypeMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;

            let headers = res.headers_mut();
            if !headers.contains_key(CONTENT_TYPE) {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            }

            Ok(res)
        })
    }
}
