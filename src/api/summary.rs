//! Landing summary endpoint

use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

/// Name of the per-client visit counter cookie
const VISITS_COOKIE: &str = "num_visits";

/// Landing summary context: catalog cardinalities plus the visit counter
#[derive(Serialize, ToSchema)]
pub struct SummaryResponse {
    /// Total books
    pub num_books: i64,
    /// Total copies
    pub num_instances: i64,
    /// Copies currently available
    pub num_instances_available: i64,
    /// Total authors
    pub num_authors: i64,
    /// Total genres
    pub num_genres: i64,
    /// Books whose title contains "the" (case-insensitive)
    pub num_word_the: i64,
    /// How many times this client has seen the landing page before
    pub num_visits: u64,
}

/// Landing summary with fresh counts
#[utoipa::path(
    get,
    path = "/summary",
    tag = "summary",
    responses(
        (status = 200, description = "Catalog summary counts", body = SummaryResponse)
    )
)]
pub async fn summary(
    State(state): State<crate::AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<SummaryResponse>)> {
    let counts = state.services.stats.summary().await?;

    let num_visits = jar
        .get(VISITS_COOKIE)
        .and_then(|c| c.value().parse::<u64>().ok())
        .unwrap_or(0);

    let mut cookie = Cookie::new(VISITS_COOKIE, (num_visits + 1).to_string());
    cookie.set_path("/");
    let jar = jar.add(cookie);

    Ok((
        jar,
        Json(SummaryResponse {
            num_books: counts.num_books,
            num_instances: counts.num_instances,
            num_instances_available: counts.num_instances_available,
            num_authors: counts.num_authors,
            num_genres: counts.num_genres,
            num_word_the: counts.num_word_the,
            num_visits,
        }),
    ))
}
