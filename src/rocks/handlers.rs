use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::auth::repo::User;
use crate::auth::AuthUser;
use crate::state::AppState;
use crate::types::repo::RockType;

use super::dto::{CreateRockRequest, RockBody};
use super::error::ApiError;
use super::repo::Rock;

pub fn rock_routes() -> Router<AppState> {
    Router::new()
        .route("/rocks", get(list_rocks).post(create_rock))
        .route("/rocks/:pk", delete(destroy_rock))
}

#[instrument(skip(state, payload))]
pub async fn create_rock(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateRockRequest>,
) -> Result<(StatusCode, Json<RockBody>), ApiError> {
    let new_rock = match payload.validate() {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, %user_id, "invalid create payload");
            return Err(e);
        }
    };

    let kind = RockType::find_by_id(&state.db, new_rock.type_id)
        .await?
        .ok_or(ApiError::TypeNotFound)?;

    let rock = Rock::create(
        &state.db,
        user_id,
        &new_rock.name,
        new_rock.weight,
        new_rock.type_id,
    )
    .await?;
    let user = User::get(&state.db, user_id).await?;

    info!(rock_id = rock.id, %user_id, "rock created");
    Ok((
        StatusCode::CREATED,
        Json(RockBody::from_parts(rock, user, kind)),
    ))
}

#[instrument(skip(state))]
pub async fn list_rocks(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
) -> Result<Json<Vec<RockBody>>, (StatusCode, String)> {
    // A failure here surfaces the raw error text instead of the structured
    // body the other endpoints use; existing clients expect that shape.
    let rows = Rock::list_expanded(&state.db).await.map_err(internal)?;
    Ok(Json(rows.into_iter().map(RockBody::from).collect()))
}

#[instrument(skip(state))]
pub async fn destroy_rock(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(pk): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let rock = Rock::find_by_id(&state.db, pk)
        .await?
        .ok_or(ApiError::RockNotFound)?;
    Rock::delete(&state.db, rock.id).await?;

    info!(rock_id = pk, "rock deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn internal<E: std::error::Error>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
