use serde::Serialize;

pub const SERVICE_NAME: &str = "Wiki Quiz Generator API";

#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub version: &'static str,
    pub status: &'static str,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        ServiceInfo {
            message: SERVICE_NAME,
            version: env!("CARGO_PKG_VERSION"),
            status: "active",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}
