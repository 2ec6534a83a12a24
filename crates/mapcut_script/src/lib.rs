mod ast;
mod emit;
mod errors;
mod lexer;
mod parser;
mod tokens;


pub use ast::*;
pub use emit::{emit_block, EmitOptions};
pub use errors::ParseError;
pub use parser::parse_text;
