//! Tab and chart view handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState};
use spendboard_core::views::{self, BarView, DashboardView, PieView, ScatterView};
use spendboard_core::{tabs, Selection, Tab};

/// Query parameters shared by every view endpoint
#[derive(Debug, Deserialize)]
pub struct SelectionQuery {
    /// Tab value; the default tab when absent
    pub category: Option<String>,
}

impl SelectionQuery {
    fn selection(&self) -> Result<Selection, AppError> {
        match self.category.as_deref() {
            None | Some("") => Ok(Selection::DEFAULT),
            Some(value) => value
                .parse::<Selection>()
                .map_err(|e| AppError::bad_request(&e)),
        }
    }
}

/// Response for GET /api/categories
#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub tabs: Vec<Tab>,
    pub default: Selection,
}

/// GET /api/categories - Dashboard tabs in display order
pub async fn list_categories() -> Json<CategoriesResponse> {
    Json(CategoriesResponse {
        tabs: tabs(),
        default: Selection::DEFAULT,
    })
}

/// GET /api/dashboard - All three views for a tab
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SelectionQuery>,
) -> Result<Json<DashboardView>, AppError> {
    let selection = params.selection()?;
    Ok(Json(views::build_dashboard(&state.table, selection)))
}

/// GET /api/views/pie
pub async fn get_pie(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SelectionQuery>,
) -> Result<Json<PieView>, AppError> {
    let selection = params.selection()?;
    Ok(Json(views::pie_view(&state.table, selection)))
}

/// GET /api/views/bar
pub async fn get_bar(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SelectionQuery>,
) -> Result<Json<BarView>, AppError> {
    let selection = params.selection()?;
    Ok(Json(views::bar_view(&state.table, selection)))
}

/// GET /api/views/scatter
pub async fn get_scatter(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SelectionQuery>,
) -> Result<Json<ScatterView>, AppError> {
    let selection = params.selection()?;
    Ok(Json(views::scatter_view(&state.table, selection)))
}
