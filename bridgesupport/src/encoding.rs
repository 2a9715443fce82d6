//! Decoder for the runtime type-encoding grammar.
//!
//! https://developer.apple.com/library/archive/documentation/Cocoa/Conceptual/ObjCRuntimeGuide/Articles/ocrtTypeEncodings.html
use super::{
    error::{EncodingError, GrammarError},
    function_type::FunctionType,
};

/// Target word width an encoded type was declared for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Bitness {
    Bit32,
    Bit64,
}

impl Bitness {
    /// The attribute holding the encoded type for this bitness.
    pub const fn type_attribute(self) -> &'static str {
        match self {
            Bitness::Bit32 => "type",
            Bitness::Bit64 => "type64",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Type {
    // Signed
    Char,
    Int,
    Short,
    Long,
    LongLong,

    // Unsigned
    UnsignedChar,
    UnsignedInt,
    UnsignedShort,
    UnsignedLong,
    UnsignedLongLong,

    // Floating point
    Float,
    Double,
    ComplexFloat,
    ComplexDouble,

    // Other
    Bool,
    Void,
    Id,
    Class,
    Selector,
    Array(ArrayType),
    Struct(StructType),
    Union(UnionType),
    Bitfield(usize),
    Pointer(Box<Type>),
    Const(Box<Type>),
    Unknown,

    /// Never produced by the decoder; function pointer arguments and return values are
    /// declared with nested `arg` and `retval` elements instead.
    FunctionType(FunctionType),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayType {
    pub size: usize,
    pub element: Box<Type>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StructType {
    pub name: String,
    pub fields: Vec<Field>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnionType {
    pub name: String,
    pub fields: Vec<Field>,
}

/// A struct or union member. Only the side matching the bitness it was decoded with is set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub type32: Option<Type>,
    pub type64: Option<Type>,
}

impl Field {
    pub fn new(name: impl Into<String>, bitness: Bitness, type_: Type) -> Self {
        let mut field = Field {
            name: name.into(),
            ..Default::default()
        };
        match bitness {
            Bitness::Bit32 => field.type32 = Some(type_),
            Bitness::Bit64 => field.type64 = Some(type_),
        }
        field
    }

    pub fn type_for(&self, bitness: Bitness) -> Option<&Type> {
        match bitness {
            Bitness::Bit32 => self.type32.as_ref(),
            Bitness::Bit64 => self.type64.as_ref(),
        }
    }
}

/// Deepest nesting of pointers, qualifiers and aggregates accepted by the decoder.
pub const MAX_DEPTH: usize = 256;

/// Read position in an encoded type.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    encoded: &'a str,
    position: usize,
    /// Compound types currently being decoded.
    depth: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(encoded: &'a str) -> Self {
        Self {
            encoded,
            position: 0,
            depth: 0,
        }
    }

    /// The part of the input that has not been consumed yet.
    pub fn remainder(&self) -> &'a str {
        &self.encoded[self.position..]
    }

    pub fn is_empty(&self) -> bool {
        self.remainder().is_empty()
    }

    fn peek(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += c.len_utf8();
        Some(c)
    }

    fn take_while(&mut self, predicate: impl Fn(char) -> bool) -> &'a str {
        let remainder = self.remainder();
        let len = remainder
            .find(|c| !predicate(c))
            .unwrap_or(remainder.len());
        self.position += len;
        &remainder[..len]
    }

    fn error(&self, reason: GrammarError) -> EncodingError {
        EncodingError::Grammar {
            reason,
            remainder: self.remainder().to_string(),
        }
    }

    fn size(&mut self) -> Result<usize, EncodingError> {
        let digits = self.take_while(|c| c.is_ascii_digit());
        if digits.is_empty() {
            return Err(self.error(GrammarError::MissingDigits));
        }
        digits
            .parse()
            .map_err(|_| self.error(GrammarError::InvalidSize))
    }

    /// Reads `"<text>"`, the cursor being on the opening quote.
    fn quoted(&mut self) -> Result<&'a str, EncodingError> {
        self.bump();
        let text = self.take_while(|c| c != '"');
        if self.bump().is_none() {
            return Err(self.error(GrammarError::UnterminatedString));
        }
        Ok(text)
    }

    /// Consumes `end` if present. Running out of input instead is accepted, as some files elide
    /// trailing delimiters.
    fn close(&mut self, end: char) -> Result<(), EncodingError> {
        match self.peek() {
            None => Ok(()),
            Some(c) if c == end => {
                self.bump();
                Ok(())
            }
            Some(_) => Err(self.error(GrammarError::UnterminatedAggregate)),
        }
    }

    fn inner(&mut self, bitness: Bitness) -> Result<Type, EncodingError> {
        match Type::decode_next(self, bitness)? {
            Some(inner) => Ok(inner),
            None => Err(self.error(GrammarError::MissingInnerType)),
        }
    }

    fn name_and_fields(
        &mut self,
        end: char,
        bitness: Bitness,
    ) -> Result<(String, Vec<Field>), EncodingError> {
        self.bump();

        let name = self.take_while(|c| c != '=' && c != end).to_string();

        let mut fields = Vec::new();
        if self.peek() == Some('=') {
            self.bump();
            loop {
                if self.peek() == Some('"') {
                    let field_name = self.quoted()?;
                    let field_type = self.inner(bitness)?;
                    fields.push(Field::new(field_name, bitness, field_type));
                } else if let Some(field_type) = Type::decode_next(self, bitness)? {
                    fields.push(Field::new("", bitness, field_type));
                } else {
                    break;
                }
            }
        }

        self.close(end)?;
        Ok((name, fields))
    }

    /// After `@`: a quoted string is either the object's class name or the next field's name.
    /// It is a class name if it is followed by a delimiter, the end of input or another quote;
    /// otherwise the cursor is rolled back so the caller sees it as a field name.
    fn skip_class_name(&mut self) -> Result<(), EncodingError> {
        let checkpoint = self.position;
        self.quoted()?;
        match self.peek() {
            None | Some('}' | ')' | ']' | '"') => {}
            Some(_) => self.position = checkpoint,
        }
        Ok(())
    }
}

impl Type {
    /// Decodes a complete encoded type; the whole input must be consumed.
    pub fn decode(encoded: &str, bitness: Bitness) -> Result<Type, EncodingError> {
        let mut cursor = Cursor::new(encoded);
        let type_ = match Self::decode_next(&mut cursor, bitness)? {
            Some(type_) => type_,
            None => return Err(cursor.error(GrammarError::UnknownType)),
        };
        if !cursor.is_empty() {
            return Err(cursor.error(GrammarError::TrailingInput));
        }
        Ok(type_)
    }

    /// Decodes the type at the cursor. Returns `None` without consuming anything if the next
    /// character does not start a type.
    pub fn decode_next(
        cursor: &mut Cursor,
        bitness: Bitness,
    ) -> Result<Option<Type>, EncodingError> {
        let Some(first) = cursor.peek() else {
            return Ok(None);
        };

        let single = match first {
            // Signed
            'c' => Some(Type::Char),
            'i' => Some(Type::Int),
            's' => Some(Type::Short),
            'l' => Some(Type::Long),
            'q' => Some(Type::LongLong),

            // Unsigned
            'C' => Some(Type::UnsignedChar),
            'I' => Some(Type::UnsignedInt),
            'S' => Some(Type::UnsignedShort),
            'L' => Some(Type::UnsignedLong),
            'Q' => Some(Type::UnsignedLongLong),

            // Floating point
            'f' => Some(Type::Float),
            'd' => Some(Type::Double),

            // Other
            'B' => Some(Type::Bool),
            'v' => Some(Type::Void),
            '*' => Some(Type::Pointer(Box::new(Type::Char))),
            '#' => Some(Type::Class),
            ':' => Some(Type::Selector),
            '?' => Some(Type::Unknown),
            _ => None,
        };
        if let Some(type_) = single {
            cursor.bump();
            return Ok(Some(type_));
        }

        if cursor.depth >= MAX_DEPTH {
            return Err(cursor.error(GrammarError::TooDeep));
        }
        cursor.depth += 1;
        let type_ = Self::decode_compound(cursor, first, bitness);
        cursor.depth -= 1;
        type_
    }

    fn decode_compound(
        cursor: &mut Cursor,
        first: char,
        bitness: Bitness,
    ) -> Result<Option<Type>, EncodingError> {
        let type_ = match first {
            '@' => {
                cursor.bump();
                match cursor.peek() {
                    // Block
                    Some('?') => {
                        cursor.bump();
                    }
                    Some('"') => cursor.skip_class_name()?,
                    _ => {}
                }
                Type::Id
            }

            'j' => {
                cursor.bump();
                match cursor.peek() {
                    Some('f') => {
                        cursor.bump();
                        Type::ComplexFloat
                    }
                    Some('d') => {
                        cursor.bump();
                        Type::ComplexDouble
                    }
                    _ => return Err(cursor.error(GrammarError::InvalidComplex)),
                }
            }

            '[' => {
                cursor.bump();
                let size = cursor.size()?;
                let element = cursor.inner(bitness)?;
                // NOTE: The element name is not part of the type.
                if cursor.peek() == Some('"') {
                    cursor.quoted()?;
                }
                cursor.close(']')?;
                Type::Array(ArrayType {
                    size,
                    element: Box::new(element),
                })
            }

            '{' => {
                let (name, fields) = cursor.name_and_fields('}', bitness)?;
                Type::Struct(StructType { name, fields })
            }

            '(' => {
                let (name, fields) = cursor.name_and_fields(')', bitness)?;
                Type::Union(UnionType { name, fields })
            }

            'b' => {
                cursor.bump();
                Type::Bitfield(cursor.size()?)
            }

            '^' => {
                cursor.bump();
                Type::Pointer(Box::new(cursor.inner(bitness)?))
            }

            'r' => {
                cursor.bump();
                Type::Const(Box::new(cursor.inner(bitness)?))
            }

            _ => return Ok(None),
        };

        Ok(Some(type_))
    }
}
