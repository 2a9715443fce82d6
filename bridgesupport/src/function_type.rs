use super::{
    element::Element,
    encoding::{Bitness, Type},
    error::{AttributeError, ErrorKind, StructuralError},
    values::Attributes,
};

/// Arguments and return value of a method, function or function pointer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FunctionType {
    arguments: Vec<Argument>,
    return_value: Option<Box<ReturnValue>>,
}

impl FunctionType {
    pub fn new(arguments: Vec<Argument>, return_value: Option<ReturnValue>) -> Self {
        Self {
            arguments,
            return_value: return_value.map(Box::new),
        }
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    pub fn return_value(&self) -> Option<&ReturnValue> {
        self.return_value.as_deref()
    }

    /// Appends an argument. A declared index must match the argument's position.
    pub fn append_argument(&mut self, argument: Argument) -> Result<(), StructuralError> {
        if let Some(index) = argument.index {
            if index != self.arguments.len() {
                return Err(StructuralError::ArgumentIndex {
                    expected: self.arguments.len(),
                    found: index,
                });
            }
        }
        self.arguments.push(argument);
        Ok(())
    }

    pub fn set_return_value(&mut self, return_value: ReturnValue) -> Result<(), StructuralError> {
        if self.return_value.is_some() {
            return Err(StructuralError::SecondReturnValue);
        }
        self.return_value = Some(Box::new(return_value));
        Ok(())
    }
}

/// Parameter direction, encoded as `n`, `o` or `N`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TypeModifier {
    In,
    Out,
    InOut,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Argument {
    pub name: String,
    pub index: Option<usize>,
    pub type32: Option<Type>,
    pub type64: Option<Type>,
    pub declared_type: Option<String>,
    pub type_modifier: Option<TypeModifier>,
    pub is_const: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReturnValue {
    pub type32: Option<Type>,
    pub type64: Option<Type>,
    pub declared_type: Option<String>,
    pub is_const: bool,
}

/// Types of an `arg` or `retval` element. A function pointer gets an empty [`FunctionType`]
/// that is filled from the nested elements.
// NOTE: Neither type is required, arguments and return values of methods may be declared only
//       through the method's own type attributes.
fn types_from_attributes(
    element: Element,
    attributes: &Attributes,
) -> Result<(Option<Type>, Option<Type>), ErrorKind> {
    if attributes.flag("function_pointer")? {
        // Usually "^?", but the nested elements are authoritative
        attributes.encoded_type(Bitness::Bit32)?;
        if attributes.get(Bitness::Bit64.type_attribute()).is_some() {
            return Err(AttributeError::FunctionPointerType64 { element }.into());
        }
        return Ok((Some(Type::FunctionType(FunctionType::default())), None));
    }
    Ok((
        attributes.encoded_type(Bitness::Bit32)?,
        attributes.encoded_type(Bitness::Bit64)?,
    ))
}

impl Argument {
    pub const TAG_NAME: &'static str = "arg";

    pub fn from_attributes(attributes: &Attributes) -> Result<Self, ErrorKind> {
        let (type32, type64) = types_from_attributes(Element::Argument, attributes)?;
        Ok(Argument {
            name: attributes.value("name")?.unwrap_or_default(),
            index: attributes.value("index")?,
            type32,
            type64,
            declared_type: attributes.value("declared_type")?,
            type_modifier: attributes.value("type_modifier")?,
            is_const: attributes.flag("const")?,
        })
    }
}

impl ReturnValue {
    pub const TAG_NAME: &'static str = "retval";

    pub fn from_attributes(attributes: &Attributes) -> Result<Self, ErrorKind> {
        let (type32, type64) = types_from_attributes(Element::ReturnValue, attributes)?;
        Ok(ReturnValue {
            type32,
            type64,
            declared_type: attributes.value("declared_type")?,
            is_const: attributes.flag("const")?,
        })
    }
}
