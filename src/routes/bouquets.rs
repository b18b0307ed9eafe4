//! Bouquet routes: registry create/fetch and URL-embedded links.

#[cfg(test)]
#[path = "bouquets_test.rs"]
mod tests;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use super::ApiError;
use crate::bouquet::{
    self, BouquetRecord, BouquetView, FlowerPlacement, SongClip, ValidationError, round_scale, round_to_i32,
    truncate_chars,
};
use crate::catalog;
use crate::codec::{self, CompactBouquet};
use crate::consts::{MAX_MESSAGE_CHARS, MAX_NAME_CHARS};
use crate::ids;
use crate::registry::RegistryError;
use crate::share;
use crate::song;
use crate::state::AppState;

/// Attempts at finding a free generated id before giving up.
const GENERATED_ID_ATTEMPTS: usize = 3;

// =============================================================================
// REQUEST / RESPONSE TYPES
// =============================================================================

/// A placed flower as submitted by a client. Geometry may be fractional and
/// is rounded on the way in.
///
/// The flower id is accepted flat (`flowerId` or `id`) or nested the way the
/// editor holds it (`flower: {id, ...}`); other catalog fields are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawSubmittedFlower")]
pub struct SubmittedFlower {
    pub flower_id: String,
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub rotation_deg: f64,
    pub z_index: i32,
}

#[derive(Debug, Deserialize)]
struct FlowerRef {
    id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSubmittedFlower {
    #[serde(default, alias = "id")]
    flower_id: Option<String>,
    #[serde(default)]
    flower: Option<FlowerRef>,
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
    #[serde(default = "default_scale")]
    scale: f64,
    #[serde(default, alias = "rotation")]
    rotation_deg: f64,
    #[serde(default)]
    z_index: i32,
}

impl TryFrom<RawSubmittedFlower> for SubmittedFlower {
    type Error = &'static str;

    fn try_from(raw: RawSubmittedFlower) -> Result<Self, Self::Error> {
        let flower_id = raw
            .flower_id
            .or_else(|| raw.flower.map(|f| f.id))
            .filter(|id| !id.trim().is_empty())
            .ok_or("flower id is required")?;
        Ok(Self {
            flower_id,
            x: raw.x,
            y: raw.y,
            scale: raw.scale,
            rotation_deg: raw.rotation_deg,
            z_index: raw.z_index,
        })
    }
}

fn default_scale() -> f64 {
    1.0
}

impl From<&SubmittedFlower> for FlowerPlacement {
    fn from(f: &SubmittedFlower) -> Self {
        Self {
            flower_id: f.flower_id.clone(),
            x: round_to_i32(f.x),
            y: round_to_i32(f.y),
            scale: round_scale(bouquet::clamp_scale(f.scale)),
            rotation_deg: round_to_i32(f.rotation_deg),
            z_index: f.z_index,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBouquetBody {
    #[serde(default, alias = "arrangedFlowers")]
    pub flowers: Vec<SubmittedFlower>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub song: Option<SongClip>,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub wrap: Option<String>,
    /// Creator-chosen id. Blank means "generate one".
    #[serde(default)]
    pub slug: Option<String>,
}

impl CreateBouquetBody {
    /// Validate and normalize into a record stored under `id`.
    fn into_record(self, id: String) -> Result<BouquetRecord, ValidationError> {
        bouquet::validate_submission(self.flowers.len(), &self.message)?;
        Ok(BouquetRecord {
            id,
            flowers: self.flowers.iter().map(FlowerPlacement::from).collect(),
            message: truncate_chars(&self.message, MAX_MESSAGE_CHARS),
            to: truncate_chars(self.to.as_deref().unwrap_or_default(), MAX_NAME_CHARS),
            from: truncate_chars(self.from.as_deref().unwrap_or_default(), MAX_NAME_CHARS),
            song: self.song.unwrap_or_default(),
            background: self
                .background
                .filter(|b| catalog::is_color_background(b.trim()))
                .unwrap_or_else(bouquet::default_background),
            wrap: self.wrap.filter(|w| catalog::find_wrap(w).is_some()).unwrap_or_else(bouquet::default_wrap),
            created_at: bouquet::now_rfc3339(),
        })
    }

    /// The custom slug, if one was given. Blank slugs count as absent.
    fn custom_id(&self) -> Result<Option<String>, ValidationError> {
        match self.slug.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => ids::normalize_slug(raw)
                .map(Some)
                .ok_or_else(|| ValidationError::InvalidSlug(raw.to_owned())),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: String,
    /// Recipient link for the stored bouquet, flagged as just created.
    pub url: String,
}

impl CreatedResponse {
    fn new(state: &AppState, id: String) -> Self {
        let url = share::registry_link(&state.config.public_url, &id, true);
        Self { id, url }
    }
}

#[derive(Debug, Deserialize)]
pub struct RecordQuery {
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ViewQuery {
    pub d: Option<String>,
    pub created: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewResponse {
    pub bouquet: BouquetView,
    /// Show the creator a "copy link" affordance.
    pub created: bool,
    /// Player URL for the song clip, when the song link names a track.
    pub embed_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LinkResponse {
    pub payload: String,
    pub url: String,
}

// =============================================================================
// ERROR MAPPING
// =============================================================================

pub(crate) fn validation_error_to_api(err: ValidationError) -> ApiError {
    let message = match &err {
        ValidationError::TooFewFlowers { min, .. } => format!("Please select at least {min} flowers."),
        ValidationError::EmptyMessage => "Message is required.".to_owned(),
        ValidationError::InvalidSlug(_) => {
            "Custom links may only use letters, numbers, '-' and '_' (up to 64 characters).".to_owned()
        }
    };
    ApiError::bad_request(message)
}

pub(crate) fn registry_error_to_status(err: &RegistryError) -> StatusCode {
    match err {
        RegistryError::Conflict(_) => StatusCode::CONFLICT,
        RegistryError::NotFound(_) => StatusCode::NOT_FOUND,
        RegistryError::Io(_) | RegistryError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn registry_error_to_api(err: RegistryError) -> ApiError {
    let status = registry_error_to_status(&err);
    match err {
        RegistryError::Conflict(_) => ApiError::new(status, "This custom link is already taken. Try another."),
        RegistryError::NotFound(_) => ApiError::not_found(),
        RegistryError::Io(_) | RegistryError::Json(_) => {
            error!(error = %err, "bouquet registry failure");
            ApiError::internal()
        }
    }
}

fn body_or_bad_request(payload: Result<Json<CreateBouquetBody>, JsonRejection>) -> Result<CreateBouquetBody, ApiError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        warn!(error = %rejection, "rejected bouquet body");
        ApiError::bad_request("Invalid bouquet data.")
    })
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/create`: store a bouquet in the registry.
pub async fn create_bouquet(
    State(state): State<AppState>,
    payload: Result<Json<CreateBouquetBody>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let body = body_or_bad_request(payload)?;
    let custom_id = body.custom_id().map_err(validation_error_to_api)?;

    if let Some(id) = custom_id {
        let record = body.into_record(id.clone()).map_err(validation_error_to_api)?;
        state.registry.put(&id, record).map_err(registry_error_to_api)?;
        info!(%id, custom = true, "bouquet created");
        return Ok((StatusCode::CREATED, Json(CreatedResponse::new(&state, id))));
    }

    // Validate once up front so a bad body never burns id attempts.
    let template = body.into_record(String::new()).map_err(validation_error_to_api)?;
    for _ in 0..GENERATED_ID_ATTEMPTS {
        let id = ids::generate_id();
        let record = BouquetRecord { id: id.clone(), ..template.clone() };
        match state.registry.put(&id, record) {
            Ok(()) => {
                info!(%id, custom = false, "bouquet created");
                return Ok((StatusCode::CREATED, Json(CreatedResponse::new(&state, id))));
            }
            Err(RegistryError::Conflict(_)) => warn!(%id, "generated bouquet id collided; retrying"),
            Err(e) => return Err(registry_error_to_api(e)),
        }
    }

    error!(attempts = GENERATED_ID_ATTEMPTS, "could not find a free bouquet id");
    Err(ApiError::internal())
}

/// `GET /api/create?id=`: fetch the stored record.
pub async fn get_record(
    State(state): State<AppState>,
    Query(query): Query<RecordQuery>,
) -> Result<Json<BouquetRecord>, ApiError> {
    let Some(id) = query.id.filter(|id| !id.trim().is_empty()) else {
        return Err(ApiError::bad_request("ID required"));
    };
    let record = state.registry.get(&id).map_err(registry_error_to_api)?;
    Ok(Json(record))
}

/// `GET /api/bouquets/:id`: fetch a stored bouquet resolved for viewing.
pub async fn get_bouquet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BouquetView>, ApiError> {
    let record = state.registry.get(&id).map_err(registry_error_to_api)?;
    Ok(Json(record.to_view()))
}

/// `GET /api/view?d=&created=`: decode a URL-embedded bouquet. A payload
/// that does not decode is reported exactly like a missing bouquet.
pub async fn view_payload(Query(query): Query<ViewQuery>) -> Result<Json<ViewResponse>, ApiError> {
    let bouquet = codec::decode(query.d.as_deref()).map_err(|e| {
        warn!(error = %e, "bouquet payload rejected");
        ApiError::not_found()
    })?;
    let embed_url = song::embed_url(&bouquet.song.url, bouquet.song.start_seconds);
    Ok(Json(ViewResponse { bouquet, created: share::created_flag(query.created.as_deref()), embed_url }))
}

/// `POST /api/link`: validate a bouquet and return a self-contained link.
pub async fn create_link(
    State(state): State<AppState>,
    payload: Result<Json<CreateBouquetBody>, JsonRejection>,
) -> Result<Json<LinkResponse>, ApiError> {
    let body = body_or_bad_request(payload)?;
    let record = body.into_record(String::new()).map_err(validation_error_to_api)?;

    let mut compact = CompactBouquet::from_record(&record);
    compact.c = None;
    let payload = codec::encode_compact(&compact).map_err(|e| {
        error!(error = %e, "bouquet encode failed");
        ApiError::internal()
    })?;
    let url = share::view_link(&state.config.public_url, &payload, true);
    Ok(Json(LinkResponse { payload, url }))
}
