//! Parser for bridge metadata files (`.bridgesupport`), which describe the C and Objective-C
//! declarations of a framework: structs, functions, constants, enums and classes with the
//! signatures of their methods.
//!
//! Types are written in the Objective-C type encoding and decoded by [`Type::decode()`].
//! Elements are processed by a state machine, fed from either a streaming [`quick_xml`] reader
//! ([`parse_str()`]) or an already parsed [`roxmltree`] document ([`read_bridgesupport()`]).

mod class;
mod constant;
mod definition;
mod element;
mod encoding;
mod error;
mod function;
mod function_type;
mod parser;
mod reader;
mod state_machine;
mod struct_decl;
mod type_decl;
mod values;

pub use class::{Class, InformalProtocol, Method};
pub use constant::{Constant, Enum, StringConstant};
pub use definition::{Definition, Document};
pub use element::Element;
pub use encoding::{ArrayType, Bitness, Cursor, Field, StructType, Type, UnionType, MAX_DEPTH};
pub use error::{
    AttributeError, EncodingError, ErrorKind, GrammarError, ParseError, StructuralError,
};
pub use function::{Function, FunctionAlias};
pub use function_type::{Argument, FunctionType, ReturnValue, TypeModifier};
pub use parser::Parser;
pub use reader::{EventSource, Position, StreamingReader, TreeReader, XmlEvent};
pub use state_machine::StateMachine;
pub use struct_decl::{FieldDeclaration, Struct};
pub use type_decl::{CoreFoundationType, Opaque};
pub use values::{actual_value, ActualValue, Attributes};

/// Parses bridge metadata from XML text.
pub fn parse_str(text: &str) -> Result<Document, ParseError> {
    Parser::parse(StreamingReader::new(text))
}

/// Reads bridge metadata from a parsed XML document.
pub fn read_bridgesupport(document: &roxmltree::Document) -> Result<Document, ParseError> {
    Parser::parse(TreeReader::new(document))
}
