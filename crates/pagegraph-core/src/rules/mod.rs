pub mod identifier;
pub mod invariants;
pub mod validation;
pub mod well_formed;
