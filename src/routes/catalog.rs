//! Catalog routes.

use axum::Json;
use axum::extract::Query;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ApiError;
use crate::catalog::{self, Background, FlowerDefinition, Tier, Wrap};

#[derive(Debug, Deserialize)]
pub struct FlowersQuery {
    pub tier: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub flowers: &'static [FlowerDefinition],
    pub backgrounds: &'static [Background],
    pub wraps: &'static [Wrap],
}

/// `GET /api/flowers?tier=`: list flowers, optionally for one tier.
pub async fn list_flowers(Query(query): Query<FlowersQuery>) -> Result<Json<Vec<FlowerDefinition>>, ApiError> {
    let flowers = match query.tier.as_deref() {
        None => catalog::all_flowers().to_vec(),
        Some(raw) => {
            let tier = Tier::parse(raw).ok_or_else(|| ApiError::bad_request(format!("unknown tier: {raw}")))?;
            let flowers: Vec<FlowerDefinition> = catalog::flowers_by_tier(tier).copied().collect();
            debug!(tier = tier.as_str(), count = flowers.len(), "listing flowers by tier");
            flowers
        }
    };
    Ok(Json(flowers))
}

/// `GET /api/catalog`: flowers, backgrounds and wraps in one response.
pub async fn full_catalog() -> Json<CatalogResponse> {
    Json(CatalogResponse {
        flowers: catalog::all_flowers(),
        backgrounds: catalog::BACKGROUNDS,
        wraps: catalog::WRAPS,
    })
}
