pub mod ast;
pub mod check;
