pub mod constraint;
pub mod entity;
pub mod meta;
pub mod props;
pub mod relationship;
pub mod style;

pub use constraint::{BoundScope, Constraint, ConstraintRule, ConstraintWarning};
pub use entity::{Entity, ROOT_ID};
pub use meta::{Annotation, DocumentMeta};
pub use props::Props;
pub use relationship::{Cardinality, Relationship};
pub use style::StyleDocument;
