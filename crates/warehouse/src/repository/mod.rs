mod command;
mod in_memory;
mod query;

pub use self::command::ProductCommandRepository;
pub use self::in_memory::InMemoryProductRepository;
pub use self::query::ProductQueryRepository;
