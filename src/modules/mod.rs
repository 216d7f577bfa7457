pub mod books;

use std::sync::Arc;

use bookshelf_db::Store;
use bookshelf_kernel::{settings::Settings, ModuleRegistry};

use books::repository::MongoBookRepository;

/// Register all application modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, store: &Store, settings: &Settings) {
    let repository = MongoBookRepository::new(store, &settings.database.collection);
    registry.register(books::create_module(Arc::new(repository)));
}
