pub mod cli;
pub mod error;
pub mod evaluator;
pub mod format;
#[cfg(unix)]
pub mod interrupt;
pub mod parser;
pub mod repl;
pub mod tokenizer;
