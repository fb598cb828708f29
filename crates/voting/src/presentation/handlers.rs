//! HTTP Handlers

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, Path, State};
use axum::http::{HeaderMap, StatusCode};
use kernel::clock::Clock;
use kernel::id::{ContestantId, IdGenerator, PollingId};
use platform::client::extract_origin;
use platform::metrics;

use crate::application::create_polling::CreatePollingUseCase;
use crate::application::hourly_tally::HourlyTallyUseCase;
use crate::application::list_active::ListActivePollingsUseCase;
use crate::application::partial_tally::PartialTallyUseCase;
use crate::application::register_vote::{RegisterVoteInput, RegisterVoteUseCase};
use crate::domain::repository::{ContestantRepository, PollingRepository, VoteRepository};
use crate::error::{VotingError, VotingResult};
use crate::infra::redis_counter::RedisCounterStore;
use crate::infra::redis_limiter::AntiFraudStrategy;
use crate::infra::redis_queue::RedisVoteQueue;
use crate::presentation::dto::{
    CreatePollingRequest, HourlyCountResponse, PollingResponse, TallyRowResponse, VoteAccepted,
    VoteRequest,
};

/// Shared state for voting handlers
#[derive(Clone)]
pub struct VotingAppState<R>
where
    R: PollingRepository + ContestantRepository + VoteRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub queue: Option<Arc<RedisVoteQueue>>,
    pub counters: Option<Arc<RedisCounterStore>>,
    pub antifraud: Arc<AntiFraudStrategy>,
    pub clock: Arc<dyn Clock>,
    pub ids: Arc<IdGenerator>,
}

/// POST /votes
pub async fn register_vote<R>(
    State(state): State<VotingAppState<R>>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    payload: Result<Json<VoteRequest>, JsonRejection>,
) -> VotingResult<(StatusCode, Json<VoteAccepted>)>
where
    R: PollingRepository + ContestantRepository + VoteRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(|rejection| {
        metrics::observe_vote_request("invalid_payload");
        VotingError::InvalidPayload(rejection.body_text())
    })?;

    let origin = extract_origin(&headers, Some(addr.ip()));

    let use_case = RegisterVoteUseCase::new(
        state.repo.clone(),
        state.queue.clone(),
        state.antifraud.clone(),
        state.counters.clone(),
        state.clock.clone(),
        state.ids.clone(),
    );

    let input = RegisterVoteInput {
        polling_id: PollingId::from_string(req.polling_id),
        contestant_id: ContestantId::from_string(req.contestant_id),
        source_ip: origin.source_ip,
        user_agent: origin.user_agent,
    };

    match use_case.execute(input).await {
        Ok(vote) => {
            metrics::observe_vote_request("accepted");
            tracing::info!(vote_id = %vote.id, polling_id = %vote.polling_id, "Vote accepted");
            Ok((StatusCode::ACCEPTED, Json(VoteAccepted::new())))
        }
        Err(err) => {
            metrics::observe_vote_request(err.code());
            Err(err)
        }
    }
}

/// GET /pollings
pub async fn list_pollings<R>(
    State(state): State<VotingAppState<R>>,
) -> VotingResult<Json<Vec<PollingResponse>>>
where
    R: PollingRepository + ContestantRepository + VoteRepository + Clone + Send + Sync + 'static,
{
    let use_case = ListActivePollingsUseCase::new(state.repo.clone(), state.repo.clone());

    let pollings = use_case.execute().await?;

    Ok(Json(
        pollings.into_iter().map(PollingResponse::from).collect(),
    ))
}

/// POST /pollings
pub async fn create_polling<R>(
    State(state): State<VotingAppState<R>>,
    Json(req): Json<CreatePollingRequest>,
) -> VotingResult<(StatusCode, Json<PollingResponse>)>
where
    R: PollingRepository + ContestantRepository + VoteRepository + Clone + Send + Sync + 'static,
{
    let use_case = CreatePollingUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.clock.clone(),
        state.ids.clone(),
    );

    let polling = use_case.execute(req.into()).await?;

    Ok((StatusCode::CREATED, Json(polling.into())))
}

/// GET /pollings/{id}/tally
pub async fn partial_tally<R>(
    State(state): State<VotingAppState<R>>,
    Path(id): Path<String>,
) -> VotingResult<Json<Vec<TallyRowResponse>>>
where
    R: PollingRepository + ContestantRepository + VoteRepository + Clone + Send + Sync + 'static,
{
    let use_case = PartialTallyUseCase::new(state.repo.clone());

    let rows = use_case.execute(&PollingId::from_string(id)).await?;

    Ok(Json(rows.into_iter().map(TallyRowResponse::from).collect()))
}

/// GET /pollings/{id}/hourly
pub async fn hourly_tally<R>(
    State(state): State<VotingAppState<R>>,
    Path(id): Path<String>,
) -> VotingResult<Json<Vec<HourlyCountResponse>>>
where
    R: PollingRepository + ContestantRepository + VoteRepository + Clone + Send + Sync + 'static,
{
    let use_case = HourlyTallyUseCase::new(state.repo.clone());

    let rows = use_case.execute(&PollingId::from_string(id)).await?;

    Ok(Json(
        rows.into_iter().map(HourlyCountResponse::from).collect(),
    ))
}
