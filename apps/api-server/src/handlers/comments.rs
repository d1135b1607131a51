//! Nested comment handlers under `/posts/{id}/comments`.

use actix_web::{HttpResponse, http::header, web};
use uuid::Uuid;

use blog_core::domain::{Comment, NewComment};
use blog_core::error::RepoError;
use blog_shared::dto::{CommentDetails, CreateCommentCommand};

use crate::middleware::error::AppResult;
use crate::state::AppState;

fn to_details(comment: Comment) -> CommentDetails {
    CommentDetails {
        id: comment.id,
        content: comment.content,
        created_at: comment.created_at,
    }
}

/// GET /posts/{id}/comments
pub async fn list(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    if state.posts.find_by_id(post_id).await?.is_none() {
        return Ok(HttpResponse::NotFound().finish());
    }

    let comments = state.comments.find_by_post(post_id).await?;
    let body: Vec<CommentDetails> = comments.into_iter().map(to_details).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /posts/{id}/comments
pub async fn create(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<CreateCommentCommand>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let new_comment = NewComment::validated(post_id, &body.content)?;

    if state.posts.find_by_id(post_id).await?.is_none() {
        return Ok(HttpResponse::NotFound().finish());
    }

    // The post may be removed between the lookup and the insert.
    let saved = match state.comments.save(new_comment).await {
        Ok(saved) => saved,
        Err(RepoError::NotFound | RepoError::Constraint(_)) => {
            return Ok(HttpResponse::NotFound().finish());
        }
        Err(e) => return Err(e.into()),
    };
    tracing::debug!(post_id = %post_id, comment_id = %saved.id, "Comment added");

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/comments/{}", saved.id)))
        .finish())
}
