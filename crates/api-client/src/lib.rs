use crate::error::ApiError;
use crate::responses::{ResponseBody, error_message};
use async_trait::async_trait;
use configuration::ApiSettings;
use core_types::{
    ActualTariffsQuery, CompareRequest, CompareResponse, HealthResponse, PartnersResponse,
    RiskEngineResult, ScenarioRequest, SectorDetail, SectorsResponse, ServiceConfig,
    TariffRatesResponse,
};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub mod error;
pub mod paths;
pub mod responses;

/// The typed contract of the remote risk service.
///
/// The orchestration core only ever talks to this trait, which lets tests swap in
/// a scripted implementation and control when (and in which order) responses arrive.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// `GET /health`
    async fn health(&self) -> Result<HealthResponse, ApiError>;

    /// `GET /api/config`
    async fn config(&self) -> Result<ServiceConfig, ApiError>;

    /// `GET /api/partners`
    async fn partners(&self) -> Result<PartnersResponse, ApiError>;

    /// `GET /api/sectors`
    async fn sectors(&self) -> Result<SectorsResponse, ApiError>;

    /// `GET /api/sector/{id}`
    async fn sector(&self, sector_id: &str) -> Result<SectorDetail, ApiError>;

    /// `GET /api/baseline`, optionally scoped to some sectors.
    async fn baseline(&self, sectors: Option<&[String]>) -> Result<RiskEngineResult, ApiError>;

    /// `POST /api/scenario`
    async fn run_scenario(&self, request: &ScenarioRequest) -> Result<RiskEngineResult, ApiError>;

    /// `POST /api/compare`
    async fn compare(&self, request: &CompareRequest) -> Result<CompareResponse, ApiError>;

    /// `GET /api/actual-tariffs`
    async fn actual_tariffs(
        &self,
        query: &ActualTariffsQuery,
    ) -> Result<RiskEngineResult, ApiError>;

    /// `GET /api/tariff-rates`
    async fn tariff_rates(&self) -> Result<TariffRatesResponse, ApiError>;
}

/// The HTTP implementation of [`ApiClient`] for the TariffShock risk service.
#[derive(Clone)]
pub struct TariffShockClient {
    client: reqwest::Client,
    base_url: String,
}

impl TariffShockClient {
    /// Creates a client for the service at `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(Self {
            client: reqwest::Client::builder().default_headers(headers).build()?,
            base_url: base_url.into(),
        })
    }

    /// Creates a client from the loaded configuration.
    pub fn from_settings(settings: &ApiSettings) -> Result<Self, ApiError> {
        Self::new(settings.resolved_base_url()?)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let builder = self.client.get(self.url(path));
        self.execute(Method::GET, path, builder).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let builder = self.client.post(self.url(path)).json(body);
        self.execute(Method::POST, path, builder).await
    }

    /// Sends the request and normalizes every failure into one `ApiError`.
    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        tracing::debug!(%method, path, "Sending request to risk service.");

        let response = builder.send().await.inspect_err(|e| {
            tracing::warn!(%method, path, error = %e, "Risk service unreachable.");
        })?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let text = response.text().await?;
        let body = ResponseBody::from_raw(content_type.as_deref(), text);

        if !status.is_success() {
            let message = error_message(status, &body);
            tracing::warn!(%method, path, status = status.as_u16(), %message, "Risk service returned an error.");
            return Err(ApiError::Service {
                status: status.as_u16(),
                message,
            });
        }

        match body {
            ResponseBody::Json(Some(value)) => {
                serde_json::from_value(value).map_err(|e| ApiError::Deserialization(e.to_string()))
            }
            ResponseBody::Json(None) => Err(ApiError::Deserialization(format!(
                "{path} returned an unreadable JSON body"
            ))),
            ResponseBody::Text(text) => serde_json::from_str(&text).map_err(|e| {
                ApiError::Deserialization(format!("{e}. Original text: {text}"))
            }),
        }
    }
}

#[async_trait]
impl ApiClient for TariffShockClient {
    async fn health(&self) -> Result<HealthResponse, ApiError> {
        self.get("/health").await
    }

    async fn config(&self) -> Result<ServiceConfig, ApiError> {
        self.get("/api/config").await
    }

    async fn partners(&self) -> Result<PartnersResponse, ApiError> {
        self.get("/api/partners").await
    }

    async fn sectors(&self) -> Result<SectorsResponse, ApiError> {
        self.get("/api/sectors").await
    }

    async fn sector(&self, sector_id: &str) -> Result<SectorDetail, ApiError> {
        self.get(&paths::sector_path(sector_id)).await
    }

    async fn baseline(&self, sectors: Option<&[String]>) -> Result<RiskEngineResult, ApiError> {
        self.get(&paths::baseline_path(sectors)).await
    }

    async fn run_scenario(&self, request: &ScenarioRequest) -> Result<RiskEngineResult, ApiError> {
        self.post("/api/scenario", request).await
    }

    async fn compare(&self, request: &CompareRequest) -> Result<CompareResponse, ApiError> {
        self.post("/api/compare", request).await
    }

    async fn actual_tariffs(
        &self,
        query: &ActualTariffsQuery,
    ) -> Result<RiskEngineResult, ApiError> {
        self.get(&paths::actual_tariffs_path(query)?).await
    }

    async fn tariff_rates(&self) -> Result<TariffRatesResponse, ApiError> {
        self.get("/api/tariff-rates").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_are_joined_to_base() {
        let client = TariffShockClient::new("http://localhost:5001").unwrap();
        assert_eq!(client.url("/api/partners"), "http://localhost:5001/api/partners");
        assert_eq!(
            client.url("https://elsewhere.example/health"),
            "https://elsewhere.example/health"
        );
    }

    #[tokio::test]
    async fn unreachable_service_is_a_transport_error() {
        // Port 9 (discard) on loopback is closed on any sane test host.
        let client = TariffShockClient::new("http://127.0.0.1:9").unwrap();
        let err = client.health().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert_eq!(err.user_message("Network error"), "Network error");
    }
}
