//! A scripted, in-memory `ApiClient` for driving the dashboard in tests.
//!
//! Each endpoint has a queue of replies. A reply is either ready immediately,
//! released later through a oneshot channel (so a test decides arrival order),
//! never resolves, or panics inside the call.

#![allow(dead_code)]

use api_client::ApiClient;
use api_client::error::ApiError;
use async_trait::async_trait;
use core_types::{
    ActualTariffsQuery, CompareRequest, CompareResponse, HealthResponse, Partner,
    PartnersResponse, RiskEngineResult, ScenarioRequest, SectorDetail, SectorRiskOutput,
    SectorSummary, SectorsResponse, ServiceConfig, TariffRatesResponse,
};
use serde_json::Map;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use tokio::sync::oneshot;

pub type Reply<T> = Result<T, ApiError>;

pub enum Scripted<T> {
    Now(Reply<T>),
    Later(oneshot::Receiver<Reply<T>>),
    Never,
    Panic(&'static str),
}

/// Queues a reply that the test releases through the returned sender.
pub fn later<T>() -> (oneshot::Sender<Reply<T>>, Scripted<T>) {
    let (tx, rx) = oneshot::channel();
    (tx, Scripted::Later(rx))
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Health,
    Config,
    Partners,
    Sectors,
    Sector(String),
    Baseline(Option<Vec<String>>),
    Scenario(ScenarioRequest),
}

#[derive(Default)]
pub struct ScriptedClient {
    health: Mutex<VecDeque<Scripted<HealthResponse>>>,
    config: Mutex<VecDeque<Scripted<ServiceConfig>>>,
    partners: Mutex<VecDeque<Scripted<PartnersResponse>>>,
    sectors: Mutex<VecDeque<Scripted<SectorsResponse>>>,
    sector: Mutex<HashMap<String, VecDeque<Scripted<SectorDetail>>>>,
    baseline: Mutex<VecDeque<Scripted<RiskEngineResult>>>,
    scenario: Mutex<VecDeque<Scripted<RiskEngineResult>>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedClient {
    pub fn on_health(&self, reply: Scripted<HealthResponse>) {
        self.health.lock().unwrap().push_back(reply);
    }

    pub fn on_config(&self, reply: Scripted<ServiceConfig>) {
        self.config.lock().unwrap().push_back(reply);
    }

    pub fn on_partners(&self, reply: Scripted<PartnersResponse>) {
        self.partners.lock().unwrap().push_back(reply);
    }

    pub fn on_sectors(&self, reply: Scripted<SectorsResponse>) {
        self.sectors.lock().unwrap().push_back(reply);
    }

    pub fn on_sector(&self, id: &str, reply: Scripted<SectorDetail>) {
        self.sector
            .lock()
            .unwrap()
            .entry(id.to_string())
            .or_default()
            .push_back(reply);
    }

    pub fn on_baseline(&self, reply: Scripted<RiskEngineResult>) {
        self.baseline.lock().unwrap().push_back(reply);
    }

    pub fn on_scenario(&self, reply: Scripted<RiskEngineResult>) {
        self.scenario.lock().unwrap().push_back(reply);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

async fn answer<T>(next: Option<Scripted<T>>) -> Reply<T> {
    match next {
        Some(Scripted::Now(reply)) => reply,
        Some(Scripted::Later(rx)) => rx.await.unwrap_or_else(|_| Err(unscripted())),
        Some(Scripted::Never) => std::future::pending().await,
        Some(Scripted::Panic(message)) => panic!("{message}"),
        None => Err(unscripted()),
    }
}

fn unscripted() -> ApiError {
    ApiError::Service {
        status: 500,
        message: "unscripted call".to_string(),
    }
}

#[async_trait]
impl ApiClient for ScriptedClient {
    async fn health(&self) -> Result<HealthResponse, ApiError> {
        self.record(Call::Health);
        let next = self.health.lock().unwrap().pop_front();
        answer(next).await
    }

    async fn config(&self) -> Result<ServiceConfig, ApiError> {
        self.record(Call::Config);
        let next = self.config.lock().unwrap().pop_front();
        answer(next).await
    }

    async fn partners(&self) -> Result<PartnersResponse, ApiError> {
        self.record(Call::Partners);
        let next = self.partners.lock().unwrap().pop_front();
        answer(next).await
    }

    async fn sectors(&self) -> Result<SectorsResponse, ApiError> {
        self.record(Call::Sectors);
        let next = self.sectors.lock().unwrap().pop_front();
        answer(next).await
    }

    async fn sector(&self, sector_id: &str) -> Result<SectorDetail, ApiError> {
        self.record(Call::Sector(sector_id.to_string()));
        let next = self
            .sector
            .lock()
            .unwrap()
            .get_mut(sector_id)
            .and_then(VecDeque::pop_front);
        answer(next).await
    }

    async fn baseline(&self, sectors: Option<&[String]>) -> Result<RiskEngineResult, ApiError> {
        self.record(Call::Baseline(sectors.map(<[String]>::to_vec)));
        let next = self.baseline.lock().unwrap().pop_front();
        answer(next).await
    }

    async fn run_scenario(&self, request: &ScenarioRequest) -> Result<RiskEngineResult, ApiError> {
        self.record(Call::Scenario(request.clone()));
        let next = self.scenario.lock().unwrap().pop_front();
        answer(next).await
    }

    async fn compare(&self, _request: &CompareRequest) -> Result<CompareResponse, ApiError> {
        Err(unscripted())
    }

    async fn actual_tariffs(
        &self,
        _query: &ActualTariffsQuery,
    ) -> Result<RiskEngineResult, ApiError> {
        Err(unscripted())
    }

    async fn tariff_rates(&self) -> Result<TariffRatesResponse, ApiError> {
        Err(unscripted())
    }
}

// --- Fixtures ---

pub fn sector_row(id: &str, risk_delta: f64) -> SectorRiskOutput {
    SectorRiskOutput {
        sector_id: id.to_string(),
        sector_name: format!("Sector {id}"),
        risk_score: 0.5,
        risk_delta,
        exposure: 0.4,
        concentration: 0.3,
        shock: 0.2,
        top_partner: "US".to_string(),
        dependency_percent: 40.0,
        affected_export_value: Some(1_000_000.0),
        affected_export_value_note: None,
        explainability: None,
    }
}

/// A result whose single sector is tagged with `tag` so tests can tell results apart.
pub fn risk_result(tag: &str) -> RiskEngineResult {
    let mut scenario = Map::new();
    scenario.insert("tag".to_string(), tag.into());
    RiskEngineResult {
        scenario,
        sectors: vec![sector_row(tag, 1.0)],
        biggest_movers: Vec::new(),
        metadata: None,
    }
}

pub fn sector_detail(id: &str) -> SectorDetail {
    SectorDetail {
        sector_id: id.to_string(),
        sector_name: format!("Sector {id}"),
        total_exports: 1_000.0,
        partner_shares: vec![("US".to_string(), 0.7), ("EU".to_string(), 0.3)],
        top_partner: "US".to_string(),
        top_partner_share: 0.7,
    }
}

pub fn partners() -> PartnersResponse {
    PartnersResponse {
        partners: vec![Partner {
            id: "US".to_string(),
            name: "United States".to_string(),
        }],
        note: None,
    }
}

pub fn sector_summary(id: &str, total_exports: Option<f64>) -> SectorSummary {
    SectorSummary {
        sector_id: id.to_string(),
        sector_name: format!("Sector {id}"),
        total_exports,
        top_partner: None,
        top_partner_share: None,
    }
}

pub fn service_error(message: &str) -> ApiError {
    ApiError::Service {
        status: 400,
        message: message.to_string(),
    }
}

/// Yields to spawned tasks until the client has seen `n` calls.
pub async fn wait_for_calls(client: &ScriptedClient, n: usize) {
    while client.call_count() < n {
        tokio::task::yield_now().await;
    }
}
