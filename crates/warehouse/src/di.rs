use crate::{
    abstract_trait::product::{
        repository::{DynProductCommandRepository, DynProductQueryRepository},
        service::{DynProductCommandService, DynProductQueryService},
    },
    repository::{InMemoryProductRepository, ProductCommandRepository, ProductQueryRepository},
    service::{ProductCommandService, ProductQueryService},
};
use prometheus_client::registry::Registry;
use shared::config::ConnectionPool;
use std::{fmt, sync::Arc};

/// Where products are kept.
#[derive(Clone)]
pub enum StorageBackend {
    Postgres(ConnectionPool),
    InMemory(Arc<InMemoryProductRepository>),
}

impl StorageBackend {
    pub fn in_memory() -> Self {
        StorageBackend::InMemory(Arc::new(InMemoryProductRepository::new()))
    }

    fn repositories(self) -> (DynProductQueryRepository, DynProductCommandRepository) {
        match self {
            StorageBackend::Postgres(pool) => {
                let query: DynProductQueryRepository =
                    Arc::new(ProductQueryRepository::new(pool.clone()));
                let command: DynProductCommandRepository =
                    Arc::new(ProductCommandRepository::new(pool));
                (query, command)
            }
            StorageBackend::InMemory(store) => {
                let query: DynProductQueryRepository = store.clone();
                let command: DynProductCommandRepository = store;
                (query, command)
            }
        }
    }
}

impl fmt::Debug for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Postgres(_) => f.write_str("Postgres"),
            StorageBackend::InMemory(_) => f.write_str("InMemory"),
        }
    }
}

#[derive(Clone)]
pub struct DependenciesInject {
    pub product_query: DynProductQueryService,
    pub product_command: DynProductCommandService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("product_query", &"ProductQueryService")
            .field("product_command", &"ProductCommandService")
            .finish()
    }
}

impl DependenciesInject {
    pub fn new(backend: StorageBackend, registry: &mut Registry) -> Self {
        let (query_repo, command_repo) = backend.repositories();

        let product_query: DynProductQueryService =
            Arc::new(ProductQueryService::new(query_repo.clone(), registry));

        let product_command: DynProductCommandService = Arc::new(ProductCommandService::new(
            query_repo,
            command_repo,
            registry,
        ));

        Self {
            product_query,
            product_command,
        }
    }
}
