use super::{
    element::Element,
    encoding::Type,
    error::{AttributeError, ErrorKind},
    values::Attributes,
};

/// Declaration: Constant (`constant`)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Constant {
    pub name: String,
    pub type32: Option<Type>,
    pub type64: Option<Type>,
    pub declared_type: Option<String>,
    pub is_const: bool,
    pub ignore: bool,
    pub suggestion: Option<String>,
}

impl Constant {
    pub const TAG_NAME: &'static str = "constant";

    pub fn from_attributes(attributes: &Attributes) -> Result<Self, ErrorKind> {
        let name = attributes.required(Element::Constant, "name")?;
        let ignore = attributes.flag("ignore")?;
        let (type32, type64) = attributes.encoded_types(Element::Constant, ignore)?;
        Ok(Constant {
            name,
            type32,
            type64,
            declared_type: attributes.value("declared_type")?,
            is_const: attributes.flag("const")?,
            ignore,
            suggestion: attributes.value("suggestion")?,
        })
    }
}

/// Declaration: String Constant (`string_constant`)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StringConstant {
    pub name: String,
    pub value: Option<String>,
    pub is_ns_string: bool,
    pub ignore: bool,
    pub suggestion: Option<String>,
}

impl StringConstant {
    pub const TAG_NAME: &'static str = "string_constant";

    pub fn from_attributes(attributes: &Attributes) -> Result<Self, ErrorKind> {
        let name = attributes.required(Element::StringConstant, "name")?;
        let ignore = attributes.flag("ignore")?;
        let value = attributes.value("value")?;
        if value.is_none() && !ignore {
            return Err(AttributeError::MissingValue {
                element: Element::StringConstant,
            }
            .into());
        }
        Ok(StringConstant {
            name,
            value,
            is_ns_string: attributes.flag("nsstring")?,
            ignore,
            suggestion: attributes.value("suggestion")?,
        })
    }
}

/// Declaration: Enum (`enum`), a single named value
///
/// Values are kept in their lexical form; they may be integers or floating point numbers and
/// may differ per bitness or byte order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Enum {
    pub name: String,
    pub value32: Option<String>,
    pub value64: Option<String>,
    pub little_endian_value: Option<String>,
    pub big_endian_value: Option<String>,
    pub ignore: bool,
    pub suggestion: Option<String>,
}

impl Enum {
    pub const TAG_NAME: &'static str = "enum";

    pub fn from_attributes(attributes: &Attributes) -> Result<Self, ErrorKind> {
        let result = Enum {
            name: attributes.required(Element::Enum, "name")?,
            value32: attributes.value("value")?,
            value64: attributes.value("value64")?,
            little_endian_value: attributes.value("le_value")?,
            big_endian_value: attributes.value("be_value")?,
            ignore: attributes.flag("ignore")?,
            suggestion: attributes.value("suggestion")?,
        };
        let has_value = result.value32.is_some()
            || result.value64.is_some()
            || result.little_endian_value.is_some()
            || result.big_endian_value.is_some();
        if !has_value && !result.ignore {
            return Err(AttributeError::MissingValue {
                element: Element::Enum,
            }
            .into());
        }
        Ok(result)
    }
}
