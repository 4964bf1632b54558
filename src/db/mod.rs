mod repository;
mod schema;

pub use repository::{group_by_paper, AnnotationStore};
