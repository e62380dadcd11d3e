pub mod assembler;
pub mod classify;
pub mod inline;
pub mod table;
