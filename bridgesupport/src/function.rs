use super::{element::Element, error::ErrorKind, function_type::FunctionType, values::Attributes};

/// Declaration: Function (`function`)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Function {
    pub name: String,
    pub function_type: FunctionType,
    pub is_variadic: bool,
    pub ignore: bool,
    pub suggestion: Option<String>,
}

impl Function {
    pub const TAG_NAME: &'static str = "function";

    pub fn from_attributes(attributes: &Attributes) -> Result<Self, ErrorKind> {
        Ok(Function {
            name: attributes.required(Element::Function, "name")?,
            function_type: FunctionType::default(),
            is_variadic: attributes.flag("variadic")?,
            ignore: attributes.flag("ignore")?,
            suggestion: attributes.value("suggestion")?,
        })
    }
}

/// Declaration: Function Alias (`function_alias`), another name for the function `original`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FunctionAlias {
    pub name: String,
    pub original: String,
}

impl FunctionAlias {
    pub const TAG_NAME: &'static str = "function_alias";

    pub fn from_attributes(attributes: &Attributes) -> Result<Self, ErrorKind> {
        Ok(FunctionAlias {
            name: attributes.required(Element::FunctionAlias, "name")?,
            original: attributes.required(Element::FunctionAlias, "original")?,
        })
    }
}
