//! Data access for the `books` collection.

use std::{future::IntoFuture, sync::Arc, time::Duration};

use async_trait::async_trait;
use bookshelf_db::Store;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    Collection,
};
use thiserror::Error;

use super::models::{Book, BookDocument};

#[derive(Error, Debug)]
pub enum RepoError {
    #[error("invalid id '{0}'")]
    InvalidId(String),

    #[error("no book with id {0}")]
    NotFound(String),

    #[error("store error: {0}")]
    Store(String),
}

pub type RepoResult<T> = Result<T, RepoError>;

/// Single-document operations on the book collection.
///
/// Every call is one store round trip bounded by the operation deadline.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Insert a new book and return the store-assigned id.
    async fn insert(&self, book: &Book) -> RepoResult<String>;

    /// Every book in the collection; empty when there are none.
    async fn find_all(&self) -> RepoResult<Vec<Book>>;

    async fn find_by_id(&self, id: &str) -> RepoResult<Book>;

    /// Overwrite every non-id field of the book with `id`.
    async fn replace_by_id(&self, id: &str, book: &Book) -> RepoResult<()>;

    async fn delete_by_id(&self, id: &str) -> RepoResult<()>;
}

pub type SharedRepository = Arc<dyn BookRepository>;

/// Parse the wire form of a book id.
pub fn parse_id(id: &str) -> RepoResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| RepoError::InvalidId(id.to_string()))
}

/// [`BookRepository`] backed by a MongoDB collection.
#[derive(Debug, Clone)]
pub struct MongoBookRepository {
    collection: Collection<BookDocument>,
    timeout: Duration,
}

impl MongoBookRepository {
    pub fn new(store: &Store, collection: &str) -> Self {
        Self {
            collection: store.collection(collection),
            timeout: store.operation_timeout(),
        }
    }

    #[cfg(test)]
    pub(crate) fn from_collection(collection: Collection<BookDocument>, timeout: Duration) -> Self {
        Self {
            collection,
            timeout,
        }
    }

    async fn bounded<T, F>(&self, operation: &'static str, call: F) -> RepoResult<T>
    where
        F: IntoFuture<Output = mongodb::error::Result<T>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result.map_err(|e| RepoError::Store(format!("{}: {}", operation, e))),
            Err(_) => Err(RepoError::Store(format!(
                "{}: timed out after {:?}",
                operation, self.timeout
            ))),
        }
    }
}

#[async_trait]
impl BookRepository for MongoBookRepository {
    async fn insert(&self, book: &Book) -> RepoResult<String> {
        let document = BookDocument::from(book);
        let result = self
            .bounded("insert", self.collection.insert_one(&document))
            .await?;

        result
            .inserted_id
            .as_object_id()
            .map(|oid| oid.to_hex())
            .ok_or_else(|| {
                RepoError::Store(format!(
                    "insert: unexpected inserted id {}",
                    result.inserted_id
                ))
            })
    }

    async fn find_all(&self) -> RepoResult<Vec<Book>> {
        let documents = self
            .bounded("find", async {
                self.collection
                    .find(doc! {})
                    .await?
                    .try_collect::<Vec<BookDocument>>()
                    .await
            })
            .await?;

        Ok(documents.into_iter().map(Book::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> RepoResult<Book> {
        let oid = parse_id(id)?;
        self.bounded("find_one", self.collection.find_one(doc! { "_id": oid }))
            .await?
            .map(Book::from)
            .ok_or_else(|| RepoError::NotFound(id.to_string()))
    }

    async fn replace_by_id(&self, id: &str, book: &Book) -> RepoResult<()> {
        let oid = parse_id(id)?;
        let document = BookDocument::from(book);
        let result = self
            .bounded(
                "replace_one",
                self.collection.replace_one(doc! { "_id": oid }, &document),
            )
            .await?;

        if result.matched_count == 0 {
            return Err(RepoError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> RepoResult<()> {
        let oid = parse_id(id)?;
        let result = self
            .bounded("delete_one", self.collection.delete_one(doc! { "_id": oid }))
            .await?;

        if result.deleted_count == 0 {
            return Err(RepoError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
