mod command;
pub mod naming;
mod query;
pub mod stock;

pub use self::command::ProductCommandService;
pub use self::query::ProductQueryService;
