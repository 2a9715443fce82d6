use super::{
    class::{Class, InformalProtocol},
    constant::{Constant, Enum, StringConstant},
    function::{Function, FunctionAlias},
    struct_decl::Struct,
    type_decl::{CoreFoundationType, Opaque},
};

/// A top-level declaration below `<signatures>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Definition {
    Class(Class),
    Struct(Struct),
    Function(Function),
    CoreFoundationType(CoreFoundationType),
    Constant(Constant),
    Enum(Enum),
    Opaque(Opaque),
    InformalProtocol(InformalProtocol),
    StringConstant(StringConstant),
    FunctionAlias(FunctionAlias),
}

impl Definition {
    pub fn name(&self) -> &str {
        match self {
            Self::Class(d) => &d.name,
            Self::Struct(d) => &d.name,
            Self::Function(d) => &d.name,
            Self::CoreFoundationType(d) => &d.name,
            Self::Constant(d) => &d.name,
            Self::Enum(d) => &d.name,
            Self::Opaque(d) => &d.name,
            Self::InformalProtocol(d) => &d.name,
            Self::StringConstant(d) => &d.name,
            Self::FunctionAlias(d) => &d.name,
        }
    }
}

/// All definitions of a bridge metadata file, in document order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    definitions: Vec<Definition>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, definition: Definition) {
        self.definitions.push(definition);
    }

    pub fn definitions(&self) -> &[Definition] {
        &self.definitions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Definition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn into_definitions(self) -> Vec<Definition> {
        self.definitions
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Definition;
    type IntoIter = std::slice::Iter<'a, Definition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Document {
    type Item = Definition;
    type IntoIter = std::vec::IntoIter<Definition>;

    fn into_iter(self) -> Self::IntoIter {
        self.definitions.into_iter()
    }
}
