pub mod cardinality;
pub mod constraint_ops;
pub mod cycle_guard;
pub mod entity_ops;
pub mod meta_ops;
pub mod rel_ops;
pub mod style_ops;

pub use cycle_guard::would_create_cycle;
