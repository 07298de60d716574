use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

/// Sink for the per-request counter. Implemented by each service's metrics
/// registry so the middleware does not depend on a global recorder.
pub trait RequestRecorder: Clone + Send + Sync + 'static {
    fn record_request(&self, method: &str, path: &str);
}

/// Counts every request by method and path once the handler has produced a
/// response.
pub async fn metrics_middleware<R: RequestRecorder>(
    State(recorder): State<R>,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    recorder.record_request(&method, &path);

    response
}
