#![deny(missing_docs)]
// This is an HTML parser. HTML can be untrusted input from the internet.
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod config;
mod default_emitter;
mod entity;
mod error;
mod machine;
mod reader;
mod state;
mod token;
mod tokenizer;

#[cfg(feature = "integration-tests")]
pub use state::State;

pub use config::Config;
pub use default_emitter::DefaultEmitter;
pub use error::Error;
pub use reader::{Readable, Reader, StringReader};
pub use token::{Attribute, Doctype, Emitter, Tag, TextKind, Token};
pub use tokenizer::Tokenizer;
