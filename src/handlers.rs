use crate::errors::{AppError, lookup_status};
use crate::garden::derive_summary;
use crate::models::{ActivitySummary, GardenResponse, PageQuery, ThemeQuery};
use crate::share::share_url;
use crate::source::LookupError;
use crate::state::AppState;
use crate::theme::{Theme, ThemeChoice, stage_name};
use crate::ui::{render_content, render_page};
use crate::view::{Command, Model, Msg, Phase, update};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use chrono::Local;
use tracing::{info, warn};

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    let theme = resolve_theme(&state, query.theme.as_deref())?;
    let model = run_lookup(&state, query.user.unwrap_or_default()).await;
    let share = share_for(&state, &model);
    Ok(Html(render_page(&model, theme, share.as_deref())))
}

pub async fn garden_fragment(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    Query(query): Query<ThemeQuery>,
) -> Result<(StatusCode, Html<String>), AppError> {
    let theme = resolve_theme(&state, query.theme.as_deref())?;
    let model = run_lookup(&state, handle).await;
    let status = match &model.phase {
        Phase::Loaded(_) => StatusCode::OK,
        Phase::Failed { error, .. } => lookup_status(error),
        Phase::Idle | Phase::Loading { .. } => StatusCode::BAD_REQUEST,
    };
    let share = share_for(&state, &model);
    Ok((status, Html(render_content(&model, theme, share.as_deref()))))
}

pub async fn get_garden(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    Query(query): Query<ThemeQuery>,
) -> Result<Json<GardenResponse>, AppError> {
    let handle = handle.trim();
    if handle.is_empty() {
        return Err(AppError::bad_request("username must not be empty"));
    }
    let theme = resolve_theme(&state, query.theme.as_deref())?;
    let summary = lookup(&state, handle).await?;
    Ok(Json(to_response(&state, summary, theme)))
}

/// One pass through the view cycle: submit, fetch if asked, deliver the result.
async fn run_lookup(state: &AppState, input: String) -> Model {
    let (model, command) = update(Model::default(), Msg::Submit(input));
    match command {
        Command::Fetch { generation, handle } => {
            let result = lookup(state, &handle).await;
            update(model, Msg::Loaded { generation, result }).0
        }
        Command::None => model,
    }
}

async fn lookup(state: &AppState, handle: &str) -> Result<ActivitySummary, LookupError> {
    match state.source.fetch(handle).await {
        Ok(history) => {
            let summary = derive_summary(handle, &history);
            info!(
                handle,
                today = summary.today,
                streak = summary.streak,
                stage = summary.stage,
                "derived garden"
            );
            Ok(summary)
        }
        Err(err) => {
            warn!(handle, error = %err, "lookup failed");
            Err(err)
        }
    }
}

fn resolve_theme(state: &AppState, requested: Option<&str>) -> Result<&'static Theme, AppError> {
    let choice = match requested {
        Some(raw) => raw
            .parse::<ThemeChoice>()
            .map_err(|err| AppError::bad_request(err.to_string()))?,
        None => state.config.theme,
    };
    Ok(choice.resolve(Local::now().date_naive()))
}

fn share_for(state: &AppState, model: &Model) -> Option<String> {
    model
        .summary()
        .map(|summary| share_url(summary, state.config.public_url.as_ref()))
}

fn to_response(state: &AppState, summary: ActivitySummary, theme: &'static Theme) -> GardenResponse {
    GardenResponse {
        stage_name: stage_name(summary.stage),
        message: theme.message(summary.stage),
        theme: theme.season.key(),
        chart: summary.chart(),
        share_url: share_url(&summary, state.config.public_url.as_ref()),
        summary,
    }
}
