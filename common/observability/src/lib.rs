use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

/// Content type for the text exposition format rendered by [`CatalogMetrics::render`].
pub const METRICS_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

#[derive(Clone)]
pub struct CatalogMetrics {
    pub registry: Registry,
    pub http_requests_total: IntCounterVec,
    pub http_errors_total: IntCounterVec,
}

impl CatalogMetrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();
        let http_requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Count of HTTP responses by method and status"),
            &["method", "status"],
        )?;
        let http_errors_total = IntCounterVec::new(
            Opts::new(
                "http_errors_total",
                "Count of HTTP error responses emitted (status >= 400)",
            ),
            &["service", "code", "status"],
        )?;
        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_errors_total.clone()))?;
        Ok(Self { registry, http_requests_total, http_errors_total })
    }

    /// Records one response; `error_code` is only counted when `status >= 400`.
    pub fn observe(&self, service: &str, method: &str, status: u16, error_code: Option<&str>) {
        let status_label = status.to_string();
        self.http_requests_total
            .with_label_values(&[method, &status_label])
            .inc();
        if status >= 400 {
            self.http_errors_total
                .with_label_values(&[service, error_code.unwrap_or("unknown"), &status_label])
                .inc();
        }
    }

    pub fn render(&self) -> prometheus::Result<String> {
        let encoder = TextEncoder::new();
        let families = self.registry.gather();
        let mut buf = Vec::new();
        encoder.encode(&families, &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
