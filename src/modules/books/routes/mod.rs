//! HTTP handlers for the books resource.
//!
//! Each handler decodes the request, makes exactly one repository call and
//! encodes the outcome. Store failures are logged with their cause and
//! reported to the client with a fixed message.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use bookshelf_http::error::AppError;

use super::models::{Book, BookCreated, Message};
use super::repository::{parse_id, RepoError, SharedRepository};

/// Routes for `/books` and `/books/{id}` bound to `repository`.
pub fn router(repository: SharedRepository) -> Router {
    Router::new()
        .route("/books", get(list_books).post(create_book))
        .route(
            "/books/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .with_state(repository)
}

fn reject(error: RepoError, failure: &'static str) -> AppError {
    match error {
        RepoError::InvalidId(_) => AppError::bad_request("Invalid ID format"),
        RepoError::NotFound(_) => AppError::not_found("Book not found"),
        RepoError::Store(cause) => AppError::internal(failure, cause),
    }
}

async fn create_book(
    State(repository): State<SharedRepository>,
    payload: Result<Json<Book>, JsonRejection>,
) -> Result<(StatusCode, Json<BookCreated>), AppError> {
    let Json(mut book) = payload?;

    let id = repository
        .insert(&book)
        .await
        .map_err(|e| reject(e, "Failed to add book"))?;
    tracing::info!(book_id = %id, "book created");

    book.id = Some(id);
    Ok((
        StatusCode::CREATED,
        Json(BookCreated {
            message: "Book added successfully",
            book,
        }),
    ))
}

async fn list_books(
    State(repository): State<SharedRepository>,
) -> Result<Json<Vec<Book>>, AppError> {
    let books = repository
        .find_all()
        .await
        .map_err(|e| reject(e, "Failed to fetch books"))?;

    Ok(Json(books))
}

async fn get_book(
    State(repository): State<SharedRepository>,
    Path(id): Path<String>,
) -> Result<Json<Book>, AppError> {
    let book = repository
        .find_by_id(&id)
        .await
        .map_err(|e| reject(e, "Failed to fetch book"))?;

    Ok(Json(book))
}

async fn update_book(
    State(repository): State<SharedRepository>,
    Path(id): Path<String>,
    payload: Result<Json<Book>, JsonRejection>,
) -> Result<Json<Message>, AppError> {
    // A bad id is reported ahead of a bad body.
    parse_id(&id).map_err(|e| reject(e, "Failed to update book"))?;
    let Json(book) = payload?;

    repository
        .replace_by_id(&id, &book)
        .await
        .map_err(|e| reject(e, "Failed to update book"))?;
    tracing::info!(book_id = %id, "book replaced");

    Ok(Json(Message {
        message: "Book updated successfully",
    }))
}

async fn delete_book(
    State(repository): State<SharedRepository>,
    Path(id): Path<String>,
) -> Result<Json<Message>, AppError> {
    repository
        .delete_by_id(&id)
        .await
        .map_err(|e| reject(e, "Failed to delete book"))?;
    tracing::info!(book_id = %id, "book deleted");

    Ok(Json(Message {
        message: "Book deleted successfully",
    }))
}
