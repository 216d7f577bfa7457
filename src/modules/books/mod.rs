pub mod models;
pub mod repository;
pub mod routes;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use bookshelf_kernel::{InitCtx, Module};
use serde_json::json;

use repository::SharedRepository;

/// Books module: CRUD over the `books` collection.
pub struct BooksModule {
    repository: SharedRepository,
}

impl BooksModule {
    pub fn new(repository: SharedRepository) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            collection = %ctx.settings.database.collection,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.repository.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                    }
                }
            })
        };
        let body = |schema: &str| {
            json!({
                "required": true,
                "content": {
                    "application/json": {
                        "schema": { "$ref": format!("#/components/schemas/{}", schema) }
                    }
                }
            })
        };
        let message = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/Message" }
                    }
                }
            })
        };
        let id_param = json!([{
            "name": "id",
            "in": "path",
            "required": true,
            "schema": { "type": "string", "pattern": "^[0-9a-fA-F]{24}$" }
        }]);

        Some(json!({
            "paths": {
                "/books": {
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "All books, possibly empty",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Book" }
                                        }
                                    }
                                }
                            },
                            "500": error("Store failure")
                        }
                    },
                    "post": {
                        "summary": "Create a book",
                        "tags": ["Books"],
                        "requestBody": body("BookInput"),
                        "responses": {
                            "201": {
                                "description": "Book created",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/BookCreated" }
                                    }
                                }
                            },
                            "400": error("Malformed JSON"),
                            "500": error("Store failure")
                        }
                    }
                },
                "/books/{id}": {
                    "get": {
                        "summary": "Get a book by id",
                        "tags": ["Books"],
                        "parameters": id_param.clone(),
                        "responses": {
                            "200": {
                                "description": "The book",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Book" }
                                    }
                                }
                            },
                            "400": error("Malformed id"),
                            "404": error("No such book"),
                            "500": error("Store failure")
                        }
                    },
                    "put": {
                        "summary": "Replace every field of a book",
                        "tags": ["Books"],
                        "parameters": id_param.clone(),
                        "requestBody": body("BookInput"),
                        "responses": {
                            "200": message("Book replaced"),
                            "400": error("Malformed id or JSON"),
                            "404": error("No such book"),
                            "500": error("Store failure")
                        }
                    },
                    "delete": {
                        "summary": "Delete a book",
                        "tags": ["Books"],
                        "parameters": id_param.clone(),
                        "responses": {
                            "200": message("Book deleted"),
                            "400": error("Malformed id"),
                            "404": error("No such book"),
                            "500": error("Store failure")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string", "description": "Store-assigned identifier" },
                            "name": { "type": "string" },
                            "author": { "type": "string" },
                            "genre": { "type": "string" },
                            "year": { "type": "string" }
                        },
                        "required": ["id", "name", "author", "genre", "year"]
                    },
                    "BookInput": {
                        "type": "object",
                        "properties": {
                            "name": { "type": "string" },
                            "author": { "type": "string" },
                            "genre": { "type": "string" },
                            "year": { "type": "string" }
                        }
                    },
                    "BookCreated": {
                        "type": "object",
                        "properties": {
                            "message": { "type": "string" },
                            "book": { "$ref": "#/components/schemas/Book" }
                        },
                        "required": ["message", "book"]
                    },
                    "Message": {
                        "type": "object",
                        "properties": {
                            "message": { "type": "string" }
                        },
                        "required": ["message"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module(repository: SharedRepository) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(repository))
}
