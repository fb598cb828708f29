//! Voting Router

use axum::routing::{get, post};
use axum::{Router, middleware};

use crate::domain::repository::{ContestantRepository, PollingRepository, VoteRepository};
use crate::presentation::handlers::{self, VotingAppState};
use crate::presentation::middleware::require_operator_token;

/// Create the voting router for any repository implementation
pub fn voting_router<R>(state: VotingAppState<R>, operator_token: Option<String>) -> Router
where
    R: PollingRepository + ContestantRepository + VoteRepository + Clone + Send + Sync + 'static,
{
    let operator = Router::new()
        .route("/pollings", post(handlers::create_polling::<R>))
        .layer(middleware::from_fn_with_state(
            operator_token,
            require_operator_token,
        ));

    Router::new()
        .route("/votes", post(handlers::register_vote::<R>))
        .route("/pollings", get(handlers::list_pollings::<R>))
        .route("/pollings/{id}/tally", get(handlers::partial_tally::<R>))
        .route("/pollings/{id}/hourly", get(handlers::hourly_tally::<R>))
        .merge(operator)
        .with_state(state)
}
