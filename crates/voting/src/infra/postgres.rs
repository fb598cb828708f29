//! PostgreSQL Repository Implementations

use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use kernel::id::{ContestantId, PollingId};
use sqlx::PgPool;

use crate::domain::entities::{Contestant, HourlyCount, Polling, Vote};
use crate::domain::repository::{ContestantRepository, PollingRepository, VoteRepository};
use crate::error::{VotingError, VotingResult};

/// PostgreSQL-backed authoritative store for pollings, contestants and
/// votes.
#[derive(Clone)]
pub struct PgVotingRepository {
    pool: PgPool,
}

impl PgVotingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Polling Repository Implementation
// ============================================================================

impl PollingRepository for PgVotingRepository {
    async fn create(&self, polling: &Polling) -> VotingResult<()> {
        sqlx::query(
            r#"
            INSERT INTO pollings (
                id,
                name,
                description,
                starts_at,
                ends_at,
                active,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(polling.id.as_str())
        .bind(&polling.name)
        .bind(&polling.description)
        .bind(polling.starts_at)
        .bind(polling.ends_at)
        .bind(polling.active)
        .bind(polling.created_at)
        .bind(polling.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, polling: &Polling) -> VotingResult<()> {
        sqlx::query(
            r#"
            UPDATE pollings SET
                name = $2,
                description = $3,
                starts_at = $4,
                ends_at = $5,
                active = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(polling.id.as_str())
        .bind(&polling.name)
        .bind(&polling.description)
        .bind(polling.starts_at)
        .bind(polling.ends_at)
        .bind(polling.active)
        .bind(polling.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &PollingId) -> VotingResult<Polling> {
        let row = sqlx::query_as::<_, PollingRow>(
            r#"
            SELECT
                id,
                name,
                description,
                starts_at,
                ends_at,
                active,
                created_at,
                updated_at
            FROM pollings
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(VotingError::PollingNotFound)?;

        let contestants = self.list_by_polling(id).await?;

        let mut polling = row.into_polling();
        polling.contestants = contestants;
        Ok(polling)
    }

    async fn list_active(&self) -> VotingResult<Vec<Polling>> {
        let rows = sqlx::query_as::<_, PollingRow>(
            r#"
            SELECT
                id,
                name,
                description,
                starts_at,
                ends_at,
                active,
                created_at,
                updated_at
            FROM pollings
            WHERE active = TRUE AND starts_at <= NOW() AND ends_at >= NOW()
            ORDER BY starts_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PollingRow::into_polling).collect())
    }
}

// ============================================================================
// Contestant Repository Implementation
// ============================================================================

impl ContestantRepository for PgVotingRepository {
    async fn bulk_create(
        &self,
        polling_id: &PollingId,
        contestants: &[Contestant],
    ) -> VotingResult<()> {
        if contestants.is_empty() {
            return Ok(());
        }

        let mut builder = sqlx::QueryBuilder::<sqlx::Postgres>::new(
            "INSERT INTO contestants (id, polling_id, name, photo_url, created_at, updated_at) ",
        );
        builder.push_values(contestants, |mut b, contestant| {
            b.push_bind(contestant.id.as_str())
                .push_bind(polling_id.as_str())
                .push_bind(&contestant.name)
                .push_bind(contestant.photo_url.as_deref())
                .push_bind(contestant.created_at)
                .push_bind(contestant.updated_at);
        });

        builder.build().execute(&self.pool).await?;

        Ok(())
    }

    async fn list_by_polling(&self, polling_id: &PollingId) -> VotingResult<Vec<Contestant>> {
        let rows = sqlx::query_as::<_, ContestantRow>(
            r#"
            SELECT
                id,
                polling_id,
                name,
                photo_url,
                created_at,
                updated_at
            FROM contestants
            WHERE polling_id = $1
            ORDER BY name ASC
            "#,
        )
        .bind(polling_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(ContestantRow::into_contestant)
            .collect())
    }
}

// ============================================================================
// Vote Repository Implementation
// ============================================================================

impl VoteRepository for PgVotingRepository {
    async fn register(&self, vote: &Vote) -> VotingResult<()> {
        sqlx::query(
            r#"
            INSERT INTO votes (
                id,
                polling_id,
                contestant_id,
                source_ip,
                user_agent,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(vote.id.as_str())
        .bind(vote.polling_id.as_str())
        .bind(vote.contestant_id.as_str())
        .bind(&vote.source_ip)
        .bind(&vote.user_agent)
        .bind(vote.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn count_by_polling(&self, polling_id: &PollingId) -> VotingResult<i64> {
        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM votes WHERE polling_id = $1")
                .bind(polling_id.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(total)
    }

    async fn count_by_contestant(
        &self,
        polling_id: &PollingId,
    ) -> VotingResult<HashMap<ContestantId, i64>> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT contestant_id, COUNT(*)
            FROM votes
            WHERE polling_id = $1
            GROUP BY contestant_id
            "#,
        )
        .bind(polling_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, total)| (ContestantId::from_string(id), total))
            .collect())
    }

    async fn count_by_hour(&self, polling_id: &PollingId) -> VotingResult<Vec<HourlyCount>> {
        // date_trunc over the UTC instant keeps bucket edges identical
        // regardless of the session time zone.
        let rows = sqlx::query_as::<_, (NaiveDateTime, i64)>(
            r#"
            SELECT date_trunc('hour', created_at AT TIME ZONE 'UTC') AS hour, COUNT(*) AS total
            FROM votes
            WHERE polling_id = $1
            GROUP BY hour
            ORDER BY hour ASC
            "#,
        )
        .bind(polling_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(hour, count)| HourlyCount {
                polling_id: polling_id.clone(),
                hour: DateTime::<Utc>::from_naive_utc_and_offset(hour, Utc),
                count,
            })
            .collect())
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct PollingRow {
    id: String,
    name: String,
    description: String,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PollingRow {
    fn into_polling(self) -> Polling {
        Polling {
            id: PollingId::from_string(self.id),
            name: self.name,
            description: self.description,
            starts_at: self.starts_at,
            ends_at: self.ends_at,
            active: self.active,
            created_at: self.created_at,
            updated_at: self.updated_at,
            contestants: Vec::new(),
        }
    }
}

#[derive(sqlx::FromRow)]
struct ContestantRow {
    id: String,
    polling_id: String,
    name: String,
    photo_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ContestantRow {
    fn into_contestant(self) -> Contestant {
        Contestant {
            id: ContestantId::from_string(self.id),
            polling_id: PollingId::from_string(self.polling_id),
            name: self.name,
            photo_url: self.photo_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
