use std::fmt;

use thiserror::Error;

use super::{element::Element, reader::Position};

/// A fatal error while parsing a bridge metadata file, located at the XML token that caused it.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{position}: {kind}")]
pub struct ParseError {
    pub kind: ErrorKind,
    pub position: Position,
}

impl ParseError {
    pub fn new(kind: impl Into<ErrorKind>, position: Position) -> Self {
        Self {
            kind: kind.into(),
            position,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error(transparent)]
    Structural(#[from] StructuralError),
    #[error(transparent)]
    Attribute(#[from] AttributeError),
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error("malformed XML: {0}")]
    Xml(String),
}

/// Errors in the nesting of elements.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error(
        "unexpected element <{element}> {}{}",
        describe_container(.container),
        describe_expected(.expected)
    )]
    UnexpectedElement {
        element: String,
        expected: Vec<Element>,
        container: Option<Element>,
    },
    #[error("unexpected end of element <{element}>{}", describe_expected(.expected))]
    UnexpectedEndElement {
        element: String,
        expected: Vec<Element>,
    },
    #[error("second return value for the same function type")]
    SecondReturnValue,
    #[error("nested argument or return value in a declaration that is not a function pointer")]
    NonFunctionTypeParent,
    #[error("argument declared with index {found}, but it is at position {expected}")]
    ArgumentIndex { expected: usize, found: usize },
    #[error("unexpected end of document")]
    UnexpectedEndOfDocument,
}

fn describe_container(container: &Option<Element>) -> String {
    match container {
        Some(container) => format!("in {container}"),
        None => "at root".to_string(),
    }
}

fn describe_expected(expected: &[Element]) -> String {
    match expected {
        [] => String::new(),
        [expected] => format!(", expected {expected}"),
        expected => {
            let names = expected
                .iter()
                .map(Element::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            format!(", expected one of {names}")
        }
    }
}

/// Errors in the attributes of a single element.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AttributeError {
    #[error("missing {attribute} in {element} declaration")]
    Missing {
        element: Element,
        attribute: &'static str,
    },
    #[error("missing 32-bit or 64-bit type in {element} declaration")]
    MissingType { element: Element },
    #[error("missing value in {element} declaration")]
    MissingValue { element: Element },
    #[error("invalid boolean {value:?} for attribute {attribute}")]
    InvalidBoolean {
        attribute: &'static str,
        value: String,
    },
    #[error("invalid integer {value:?} for attribute {attribute}")]
    InvalidInteger {
        attribute: &'static str,
        value: String,
    },
    #[error("invalid 64-bit type for function pointer in {element} declaration")]
    FunctionPointerType64 { element: Element },
    #[error("function pointer field {field:?} is not part of the struct type")]
    UnknownField { field: String },
}

/// Errors in an encoded type, or in how a decoded type is used.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("invalid type encoding ({reason}) at {remainder:?}")]
    Grammar {
        reason: GrammarError,
        remainder: String,
    },
    #[error("invalid type modifier {0:?}")]
    TypeModifier(String),
    #[error("expected {expected} type, got {encoded:?}")]
    Mismatch {
        expected: &'static str,
        encoded: String,
    },
    #[error("conflicting 32-bit and 64-bit field names {name32:?} and {name64:?}")]
    FieldNameConflict { name32: String, name64: String },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GrammarError {
    MissingDigits,
    InvalidSize,
    MissingInnerType,
    UnterminatedString,
    UnterminatedAggregate,
    InvalidComplex,
    UnknownType,
    TrailingInput,
    TooDeep,
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self {
            Self::MissingDigits => "missing digits",
            Self::InvalidSize => "size out of range",
            Self::MissingInnerType => "missing inner type",
            Self::UnterminatedString => "unterminated quoted string",
            Self::UnterminatedAggregate => "unterminated struct, union or array",
            Self::InvalidComplex => "invalid complex number type",
            Self::UnknownType => "unknown type",
            Self::TrailingInput => "trailing input",
            Self::TooDeep => "nesting too deep",
        };
        f.write_str(description)
    }
}
