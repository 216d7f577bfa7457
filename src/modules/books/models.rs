use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A book as it travels over HTTP.
///
/// Every descriptive field is optional on input and decodes as `""` when
/// missing. `id` is assigned by the store and ignored on input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Store-assigned identifier, 24 hex characters
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub year: String,
}

/// Body returned by `POST /books`.
#[derive(Debug, Serialize)]
pub struct BookCreated {
    pub message: &'static str,
    pub book: Book,
}

/// Body returned by update and delete.
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: &'static str,
}

/// Persisted shape of a book in the `books` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub year: String,
}

impl From<&Book> for BookDocument {
    /// Drops any id on the book; ids are only ever assigned by the store.
    fn from(book: &Book) -> Self {
        Self {
            id: None,
            name: book.name.clone(),
            author: book.author.clone(),
            genre: book.genre.clone(),
            year: book.year.clone(),
        }
    }
}

impl From<BookDocument> for Book {
    fn from(document: BookDocument) -> Self {
        Self {
            id: document.id.map(|id| id.to_hex()),
            name: document.name,
            author: document.author,
            genre: document.genre,
            year: document.year,
        }
    }
}
