use std::fmt;

use super::{
    class::{Class, InformalProtocol, Method},
    constant::{Constant, Enum, StringConstant},
    function::{Function, FunctionAlias},
    function_type::{Argument, ReturnValue},
    struct_decl::{FieldDeclaration, Struct},
    type_decl::{CoreFoundationType, Opaque},
};

/// The elements of a bridge metadata file (see BridgeSupport.dtd).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Element {
    Signatures,

    DependsOn,
    Struct,
    CoreFoundationType,
    Opaque,
    Constant,
    StringConstant,
    Enum,
    Function,
    FunctionAlias,
    InformalProtocol,
    Class,

    Method,
    Argument,
    ReturnValue,

    Field,
}

impl Element {
    /// Children allowed directly below `<signatures>`.
    pub const DEFINITIONS: &'static [Element] = &[
        Element::DependsOn,
        Element::Struct,
        Element::CoreFoundationType,
        Element::Opaque,
        Element::Constant,
        Element::StringConstant,
        Element::Enum,
        Element::Function,
        Element::FunctionAlias,
        Element::InformalProtocol,
        Element::Class,
    ];

    const ALL: &'static [Element] = &[
        Element::Signatures,
        Element::DependsOn,
        Element::Struct,
        Element::CoreFoundationType,
        Element::Opaque,
        Element::Constant,
        Element::StringConstant,
        Element::Enum,
        Element::Function,
        Element::FunctionAlias,
        Element::InformalProtocol,
        Element::Class,
        Element::Method,
        Element::Argument,
        Element::ReturnValue,
        Element::Field,
    ];

    pub const fn tag_name(self) -> &'static str {
        match self {
            Element::Signatures => "signatures",
            Element::DependsOn => "depends_on",
            Element::Struct => Struct::TAG_NAME,
            Element::CoreFoundationType => CoreFoundationType::TAG_NAME,
            Element::Opaque => Opaque::TAG_NAME,
            Element::Constant => Constant::TAG_NAME,
            Element::StringConstant => StringConstant::TAG_NAME,
            Element::Enum => Enum::TAG_NAME,
            Element::Function => Function::TAG_NAME,
            Element::FunctionAlias => FunctionAlias::TAG_NAME,
            Element::InformalProtocol => InformalProtocol::TAG_NAME,
            Element::Class => Class::TAG_NAME,
            Element::Method => Method::TAG_NAME,
            Element::Argument => Argument::TAG_NAME,
            Element::ReturnValue => ReturnValue::TAG_NAME,
            Element::Field => FieldDeclaration::TAG_NAME,
        }
    }

    pub fn from_tag_name(tag_name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|element| element.tag_name() == tag_name)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.tag_name())
    }
}
