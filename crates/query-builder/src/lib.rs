pub mod ast;
pub mod build;
pub mod dialect;
pub mod error;
pub mod mapping;
pub mod render;

pub use build::select::SelectBuilder;
pub use error::QueryError;
pub use mapping::{Col, Mapped, Projection, Ref};
pub use render::SqlQuery;
