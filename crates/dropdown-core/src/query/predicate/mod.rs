mod ast;
mod eval;


pub use ast::{CompareOp, ComparePredicate, Predicate};
pub use eval::eval;
