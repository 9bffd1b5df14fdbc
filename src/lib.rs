pub mod ast;
pub mod error;
pub mod export;
pub mod lexer;
pub mod parser;
pub mod resolver;
pub mod utils;
pub mod config;
pub mod library;
pub mod lists;

pub use ast::{Node, NodeKind};
pub use error::VdfError;
pub use config::LocalConfig;
pub use export::{to_vdf_string, write_document};
pub use parser::{parse_reader, parse_str};
