//! Post handlers.

use actix_web::{HttpResponse, http::header, web};
use uuid::Uuid;

use blog_core::domain::{NewPost, Post, Status, validate_post_fields};
use blog_core::specification::filter_by_keyword_and_status;
use blog_shared::dto::{CreatePostCommand, PostDetails, PostQuery, UpdatePostCommand};

use crate::middleware::error::AppResult;
use crate::observability::RequestId;
use crate::state::AppState;

fn to_details(post: Post) -> PostDetails {
    PostDetails {
        id: post.id,
        title: post.title,
        content: post.content,
        status: post.status.to_string(),
        created_at: post.created_at,
    }
}

/// GET /posts
///
/// Without query parameters every post is returned; `q` and `status`
/// narrow the result.
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<PostQuery>,
) -> AppResult<HttpResponse> {
    let PostQuery { q, status } = query.into_inner();

    let posts = if q.is_none() && status.is_none() {
        state.posts.find_all().await?
    } else {
        let status = status
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::parse::<Status>)
            .transpose()?;
        let filter = filter_by_keyword_and_status(q.as_deref(), status);
        state.posts.find_all_matching(&filter).await?
    };

    let body: Vec<PostDetails> = posts.into_iter().map(to_details).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /posts/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    match state.posts.find_by_id(id).await? {
        Some(post) => Ok(HttpResponse::Ok().json(to_details(post))),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// POST /posts
pub async fn create(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Json<CreatePostCommand>,
) -> AppResult<HttpResponse> {
    let cmd = body.into_inner();
    let new_post = NewPost::validated(&cmd.title, &cmd.content)?;

    let saved = state.posts.save(new_post).await?;
    tracing::info!(
        request_id = %request_id.as_str(),
        post_id = %saved.id,
        "Post created"
    );

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/posts/{}", saved.id)))
        .finish())
}

/// PUT /posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostCommand>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let cmd = body.into_inner();
    validate_post_fields(&cmd.title, &cmd.content)?;

    let Some(mut post) = state.posts.find_by_id(id).await? else {
        return Ok(HttpResponse::NotFound().finish());
    };
    post.edit(cmd.title, cmd.content);

    match state.posts.update(post).await? {
        Some(_) => Ok(HttpResponse::NoContent().finish()),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// DELETE /posts/{id}
pub async fn delete(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    if state.posts.delete_by_id(id).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Ok(HttpResponse::NotFound().finish())
    }
}
