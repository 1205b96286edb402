use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::{auth::{AdminUser, DEV_BYPASS_USER_ID}, maybe_auth::MaybeAuthUser, query::QueryParams, validated::ValidatedJson};
use crate::api::dtos::requests::{patch_optional, CreateNewsRequest, NewsListQuery, PageQuery, UpdateNewsRequest};
use crate::api::dtos::responses::Paginated;
use crate::domain::models::news::{NewNewsParams, News, NewsFilter, NewsStatus};
use crate::domain::services::slug::{disambiguate, slugify};
use crate::error::AppError;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, debug};

const SLUG_HINT_LIMIT: i64 = 10;

/// An explicit slug must be free; one derived from the title gets a numeric suffix instead.
async fn allocate_slug(state: &AppState, explicit: Option<String>, title: &str, current_id: Option<&str>) -> Result<String, AppError> {
    if let Some(slug) = explicit.filter(|s| !s.trim().is_empty()) {
        let slug = slugify(&slug);
        if slug.is_empty() {
            return Err(AppError::Validation("Invalid slug".into()));
        }
        if let Some(existing) = state.news_repo.find_by_slug(&slug).await?
            && Some(existing.id.as_str()) != current_id {
            return Err(AppError::Conflict(format!("Slug '{}' is already in use", slug)));
        }
        return Ok(slug);
    }

    let base = slugify(title);
    if base.is_empty() {
        return Err(AppError::Validation("Could not derive a slug from the title".into()));
    }
    let taken = state.news_repo.slugs_with_prefix(&base).await?;
    Ok(disambiguate(&base, &taken))
}

// Public

pub async fn list_published_news(
    State(state): State<Arc<AppState>>,
    QueryParams(page): QueryParams<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (page, limit, offset) = page.window();
    let filter = NewsFilter { status: Some(NewsStatus::Published), limit, offset };
    let (items, total) = state.news_repo.list(&filter).await?;
    Ok(Json(Paginated { items, total, page, limit }))
}

pub async fn get_news_by_slug(
    State(state): State<Arc<AppState>>,
    viewer: MaybeAuthUser,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let found = state.news_repo.find_by_slug(&slug).await?;

    match found {
        Some(news) if news.is_published() || viewer.is_admin() => Ok(Json(news)),
        _ => {
            debug!("News slug not found: {}", slug);
            let available_slugs = state.news_repo.published_slugs(SLUG_HINT_LIMIT).await?;
            Err(AppError::NotFoundWithSlugs {
                message: format!("News article '{}' not found", slug),
                available_slugs,
            })
        }
    }
}

// Admin

pub async fn admin_list_news(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    QueryParams(query): QueryParams<NewsListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (page, limit, offset) = PageQuery { page: query.page, limit: query.limit }.window();
    let filter = NewsFilter { status: query.status, limit, offset };
    let (items, total) = state.news_repo.list(&filter).await?;
    Ok(Json(Paginated { items, total, page, limit }))
}

pub async fn admin_get_news(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(news_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let news = state.news_repo.find_by_id(&news_id).await?
        .ok_or(AppError::NotFound("News not found".into()))?;
    Ok(Json(news))
}

pub async fn create_news(
    State(state): State<Arc<AppState>>,
    admin: AdminUser,
    ValidatedJson(payload): ValidatedJson<CreateNewsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let slug = allocate_slug(&state, payload.slug, &payload.title, None).await?;
    let author_id = Some(admin.0.id).filter(|id| id != DEV_BYPASS_USER_ID);

    let news = News::new(NewNewsParams {
        slug,
        title: payload.title,
        content: payload.content,
        excerpt: payload.excerpt,
        featured_image: payload.featured_image,
        meta_title: payload.meta_title,
        meta_description: payload.meta_description,
        meta_keywords: payload.meta_keywords,
        status: payload.status.unwrap_or(NewsStatus::Draft),
        author_id,
    });

    let created = state.news_repo.create(&news).await?;
    info!("Created news {} ({}) as {}", created.id, created.slug, created.status);
    Ok(Json(created))
}

pub async fn update_news(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(news_id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateNewsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut news = state.news_repo.find_by_id(&news_id).await?
        .ok_or(AppError::NotFound("News not found".into()))?;

    if payload.slug.is_some() {
        news.slug = allocate_slug(&state, payload.slug, &news.title, Some(&news.id)).await?;
    }
    if let Some(title) = payload.title { news.title = title; }
    if let Some(content) = payload.content { news.content = content; }
    patch_optional(&mut news.excerpt, payload.excerpt);
    patch_optional(&mut news.featured_image, payload.featured_image);
    patch_optional(&mut news.meta_title, payload.meta_title);
    patch_optional(&mut news.meta_description, payload.meta_description);
    patch_optional(&mut news.meta_keywords, payload.meta_keywords);
    if let Some(status) = payload.status { news.set_status(status); }
    news.updated_at = Utc::now();

    let updated = state.news_repo.update(&news).await?;
    info!("Updated news {} ({})", updated.id, updated.status);
    Ok(Json(updated))
}

pub async fn delete_news(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(news_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.news_repo.delete(&news_id).await?;
    info!("Deleted news {}", news_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
