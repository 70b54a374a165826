use hr_portal::api::HttpBackend;
use hr_portal::config::BackendConfig;
use hr_portal::error::AppError;
use hr_portal::gate::Role;
use hr_portal::portal::{Portal, TempFileUrls};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type OperatorPortal = Portal<HttpBackend, TempFileUrls>;

/// Portal wired to the live HR backend, with previews written under the
/// system temp directory.
pub(crate) fn operator_portal(
    backend: &BackendConfig,
    role: Role,
) -> Result<OperatorPortal, AppError> {
    let client = HttpBackend::new(backend)?;
    let urls = TempFileUrls::in_temp_dir()?;
    Ok(Portal::new(client, urls, role))
}
