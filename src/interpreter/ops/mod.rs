pub mod access;
pub mod binary;
pub mod unary;

// Operator evaluation lives in `impl Evaluator` blocks inside these modules
