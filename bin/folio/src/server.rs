//! JSON API server with reload events

use std::{convert::Infallible, sync::Arc, time::Duration};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{
        IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
    routing::get,
};
use folio_catalog::{
    CatalogStats, ContentStore, EntryDocument, EntryQuery, FilterOptions, related_entries,
};
use folio_core::{Config, ContentKind, CoreError, Entry, GalleryImage};
use folio_parser::{MarkdownParser, TocEntry};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tokio_stream::{Stream, StreamExt, wrappers::BroadcastStream};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Content change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadMessage {
    /// Entries of one kind changed.
    Kind(ContentKind),
    /// Anything may have changed.
    All,
}

impl ReloadMessage {
    fn data(&self) -> &'static str {
        match self {
            Self::Kind(kind) => kind.dir_name(),
            Self::All => "all",
        }
    }
}

/// Shared server state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<ContentStore>,
    parser: MarkdownParser,
    reload_tx: broadcast::Sender<ReloadMessage>,
}

impl AppState {
    /// Create server state from configuration.
    pub fn new(config: Config) -> Self {
        let store = ContentStore::from_config(&config);
        Self::with_store(config, store)
    }

    /// Create server state around an existing store.
    pub fn with_store(config: Config, store: ContentStore) -> Self {
        let (reload_tx, _) = broadcast::channel(16);
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
            parser: MarkdownParser::new(),
            reload_tx,
        }
    }

    /// Drop cached entries and tell connected clients.
    pub fn notify_reload(&self, message: ReloadMessage) {
        match message {
            ReloadMessage::Kind(kind) => self.store.invalidate(kind),
            ReloadMessage::All => self.store.invalidate_all(),
        }
        let _ = self.reload_tx.send(message);
    }

    /// Subscribe to reload notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<ReloadMessage> {
        self.reload_tx.subscribe()
    }

    /// Build the detail view of one entry.
    pub fn detail(&self, kind: ContentKind, slug: &str) -> folio_core::Result<DetailResponse> {
        let EntryDocument { entry, body } = self.store.get(kind, slug)?;
        let rendered = self.parser.render(&body);

        let all = self.store.entries(kind)?;
        let related = related_entries(
            &all,
            &entry,
            self.config.related.limit,
            self.store.loader().current_year(),
        )
        .into_iter()
        .cloned()
        .collect();

        Ok(DetailResponse {
            gallery: entry.gallery(),
            entry,
            html: rendered.html,
            toc: rendered.toc,
            word_count: rendered.word_count,
            reading_time: rendered.reading_time,
            related,
        })
    }

    /// Run a listing query, using the configured order when none is given.
    pub fn list(&self, kind: ContentKind, query: EntryQuery) -> folio_core::Result<ListResponse> {
        let query = query.or_sort(self.store.default_order());
        let entries = query.apply(&self.store.entries(kind)?);
        Ok(ListResponse {
            count: entries.len(),
            entries,
        })
    }

    /// Facet values and statistics of one kind.
    pub fn facets(&self, kind: ContentKind) -> folio_core::Result<FacetsResponse> {
        let entries = self.store.entries(kind)?;
        Ok(FacetsResponse {
            options: FilterOptions::from_entries(&entries),
            stats: CatalogStats::from_entries(&entries),
        })
    }
}

/// Body of `GET /api/{kind}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse {
    pub count: usize,
    pub entries: Vec<Entry>,
}

/// Body of `GET /api/{kind}/facets`.
#[derive(Debug, Serialize, Deserialize)]
pub struct FacetsResponse {
    pub options: FilterOptions,
    pub stats: CatalogStats,
}

/// Body of `GET /api/{kind}/{slug}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct DetailResponse {
    pub entry: Entry,
    pub html: String,
    pub toc: Vec<TocEntry>,
    pub word_count: usize,
    pub reading_time: usize,
    pub gallery: Vec<GalleryImage>,
    pub related: Vec<Entry>,
}

#[derive(Debug, Serialize)]
struct IndexResponse<'a> {
    title: &'a str,
    base_url: &'a str,
    kinds: [ContentKind; 2],
}

/// API error mapped to a JSON response.
#[derive(Debug)]
pub enum ApiError {
    UnknownKind(String),
    Core(CoreError),
    Internal(String),
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self::Core(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::UnknownKind(kind) => (
                StatusCode::NOT_FOUND,
                format!("unknown content kind: {kind}"),
            ),
            Self::Core(err) if err.is_not_found() => (StatusCode::NOT_FOUND, err.to_string()),
            Self::Core(err) => {
                tracing::error!(error = %err, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            Self::Internal(message) => {
                tracing::error!(%message, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

fn parse_kind(kind: &str) -> Result<ContentKind, ApiError> {
    kind.parse()
        .map_err(|_| ApiError::UnknownKind(kind.to_string()))
}

/// Run blocking store work off the async runtime.
async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce() -> folio_core::Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .map_err(ApiError::from)
}

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api", get(index_handler))
        .route("/api/events", get(events_handler))
        .route("/api/{kind}", get(list_handler))
        .route("/api/{kind}/facets", get(facets_handler))
        .route("/api/{kind}/{slug}", get(detail_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn index_handler(State(state): State<AppState>) -> Response {
    Json(IndexResponse {
        title: &state.config.site.title,
        base_url: &state.config.site.base_url,
        kinds: ContentKind::ALL,
    })
    .into_response()
}

async fn list_handler(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<ListResponse>, ApiError> {
    let kind = parse_kind(&kind)?;
    let query = EntryQuery::from_pairs(params);
    tracing::debug!(%kind, ?query, "list");
    let response = blocking(move || state.list(kind, query)).await?;
    Ok(Json(response))
}

async fn facets_handler(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<Json<FacetsResponse>, ApiError> {
    let kind = parse_kind(&kind)?;
    let response = blocking(move || state.facets(kind)).await?;
    Ok(Json(response))
}

async fn detail_handler(
    State(state): State<AppState>,
    Path((kind, slug)): Path<(String, String)>,
) -> Result<Json<DetailResponse>, ApiError> {
    let kind = parse_kind(&kind)?;
    let response = blocking(move || state.detail(kind, &slug)).await?;
    Ok(Json(response))
}

/// Server-Sent Events handler for content reloads.
async fn events_handler(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = BroadcastStream::new(state.subscribe()).filter_map(|msg| {
        // Lagged receivers just miss intermediate reloads
        msg.ok()
            .map(|m| Ok(Event::default().event("reload").data(m.data())))
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(30))
            .text("ping"),
    )
}
