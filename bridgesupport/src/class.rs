use super::{element::Element, error::ErrorKind, function_type::FunctionType, values::Attributes};

/// Declaration: Class (`class`)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Class {
    pub name: String,
    pub methods: Vec<Method>,
    pub ignore: bool,
    pub suggestion: Option<String>,
}

impl Class {
    pub const TAG_NAME: &'static str = "class";

    pub fn from_attributes(attributes: &Attributes) -> Result<Self, ErrorKind> {
        Ok(Class {
            name: attributes.required(Element::Class, "name")?,
            methods: Vec::new(),
            ignore: attributes.flag("ignore")?,
            suggestion: attributes.value("suggestion")?,
        })
    }
}

/// Declaration: Informal Protocol (`informal_protocol`), a named bundle of methods not tied to
/// a class
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InformalProtocol {
    pub name: String,
    pub methods: Vec<Method>,
}

impl InformalProtocol {
    pub const TAG_NAME: &'static str = "informal_protocol";

    pub fn from_attributes(attributes: &Attributes) -> Result<Self, ErrorKind> {
        Ok(InformalProtocol {
            name: attributes.required(Element::InformalProtocol, "name")?,
            methods: Vec::new(),
        })
    }
}

/// A `method` of a [`Class`] or [`InformalProtocol`]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Method {
    pub selector: String,
    pub is_class_method: bool,
    pub function_type: FunctionType,
    pub is_variadic: bool,
    pub ignore: bool,
    pub suggestion: Option<String>,
}

impl Method {
    pub const TAG_NAME: &'static str = "method";

    pub fn from_attributes(attributes: &Attributes) -> Result<Self, ErrorKind> {
        // TODO: decode the method's own type and type64 signatures, which use the method
        // signature grammar rather than a single encoded type
        Ok(Method {
            selector: attributes.required(Element::Method, "selector")?,
            is_class_method: attributes.flag("class_method")?,
            function_type: FunctionType::default(),
            is_variadic: attributes.flag("variadic")?,
            ignore: attributes.flag("ignore")?,
            suggestion: attributes.value("suggestion")?,
        })
    }
}
