use std::sync::Arc;

use axum::{
    extract::{Path, Query, State as AxumState},
    response::{Html, Redirect},
};
use serde::Deserialize;
use tracing::{error, info, span, Instrument, Level};

use crate::{
    archive::{self, SortOrder},
    issues::PreviewBoard,
    search,
};

use super::{
    error::AppError,
    state::State,
    templates::Page,
    views::{ArchiveView, HomeView, IssueCard, ResultCard, SearchView, LOAD_ERROR},
};

#[derive(Deserialize, Debug, Default)]
pub struct ArchiveParams {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub order: SortOrder,
    pub thumbnails: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

pub async fn home_handler(AxumState(state): AxumState<Arc<State>>) -> Result<Html<String>, AppError> {
    let span = span!(Level::INFO, "home", context = "home");

    async {
        info!("called");

        let latest = match state.issues.list().await {
            Ok(issues) => archive::latest(&issues),
            Err(err) => {
                error!(error_message=%err, error_group="list_issues");
                None
            }
        };

        let latest = match latest {
            Some(issue) => {
                let preview = state.issues.preview(&issue.name).await;
                Some(IssueCard::new(0, &issue, Some(preview)))
            }
            None => None,
        };

        let html = state.templates.render(Page::Home, &HomeView { latest })?;
        Ok::<_, AppError>(Html(html))
    }
    .instrument(span)
    .await
}

pub async fn archive_handler(
    AxumState(state): AxumState<Arc<State>>,
    Query(params): Query<ArchiveParams>,
) -> Result<Html<String>, AppError> {
    let span = span!(Level::INFO, "archive", context = "archive");

    async {
        info!(query = %params.q, order = ?params.order, thumbnails = ?params.thumbnails, "called");

        let thumbnails = params.thumbnails.unwrap_or(true);
        let order = ArchiveView::order_name(params.order);

        let issues = match state.issues.list().await {
            Ok(issues) => issues,
            Err(err) => {
                error!(error_message=%err, error_group="list_issues");
                let view = ArchiveView {
                    error: Some(LOAD_ERROR),
                    query: params.q.clone(),
                    order,
                    thumbnails,
                    total: 0,
                    issues: Vec::new(),
                };
                return Ok(Html(state.templates.render(Page::Archive, &view)?));
            }
        };

        let arranged = archive::arrange(&issues, &params.q, params.order);

        let mut board = PreviewBoard::new(thumbnails);
        board.load(&state.issues, &arranged).await;
        info!(shown = arranged.len(), previews = board.len(), "arranged");

        let cards = arranged
            .iter()
            .enumerate()
            .map(|(index, issue)| IssueCard::new(index, issue, board.state(&issue.name)))
            .collect();

        let view = ArchiveView {
            error: None,
            query: params.q.clone(),
            order,
            thumbnails: board.is_enabled(),
            total: arranged.len(),
            issues: cards,
        };

        Ok::<_, AppError>(Html(state.templates.render(Page::Archive, &view)?))
    }
    .instrument(span)
    .await
}

pub async fn search_handler(
    AxumState(state): AxumState<Arc<State>>,
    Query(params): Query<SearchParams>,
) -> Result<Html<String>, AppError> {
    let span = span!(Level::INFO, "search", context = "search");

    async {
        info!(term = %params.q, "called");

        let mut view = SearchView {
            term: params.q.clone(),
            searched: false,
            error: None,
            results: Vec::new(),
        };

        let issues = match state.issues.list().await {
            Ok(issues) => issues,
            Err(err) => {
                error!(error_message=%err, error_group="list_issues");
                view.error = Some(LOAD_ERROR);
                return Ok(Html(state.templates.render(Page::Search, &view)?));
            }
        };

        let results = {
            let mut rng = rand::thread_rng();
            search::simulate(&issues, &params.q, &mut rng)
        };
        view.searched = !params.q.trim().is_empty();

        let shown: Vec<_> = results.iter().map(|r| r.issue.clone()).collect();
        let mut board = PreviewBoard::new(true);
        board.load(&state.issues, &shown).await;

        view.results = results
            .into_iter()
            .enumerate()
            .map(|(index, result)| {
                let preview = board.state(&result.issue.name);
                ResultCard::new(index, result, preview)
            })
            .collect();

        Ok::<_, AppError>(Html(state.templates.render(Page::Search, &view)?))
    }
    .instrument(span)
    .await
}

/// Sends the browser to the thumbnail of issue `name`.
pub async fn preview_handler(
    AxumState(state): AxumState<Arc<State>>,
    Path(name): Path<String>,
) -> Result<Redirect, AppError> {
    let span = span!(Level::INFO, "preview", context = "preview");

    async {
        info!(issue = %name, "called");

        match state.issues.preview_url(&name).await {
            Ok(url) => Ok(Redirect::to(&url)),
            Err(err) if err.is_not_found() => Err(AppError::NotFound(name)),
            Err(err) => {
                error!(error_message=%err, error_group="preview_url");
                Err(AppError::from(err))
            }
        }
    }
    .instrument(span)
    .await
}

pub async fn refresh_handler(AxumState(state): AxumState<Arc<State>>) -> Redirect {
    state.issues.invalidate();
    Redirect::to("/archive")
}
