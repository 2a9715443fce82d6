use super::{element::Element, encoding::Type, error::ErrorKind, values::Attributes};

/// Declaration: Core Foundation Type (`cftype`)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CoreFoundationType {
    pub name: String,
    pub type32: Option<Type>,
    pub type64: Option<Type>,
}

impl CoreFoundationType {
    pub const TAG_NAME: &'static str = "cftype";

    pub fn from_attributes(attributes: &Attributes) -> Result<Self, ErrorKind> {
        let name = attributes.required(Element::CoreFoundationType, "name")?;
        let (type32, type64) = attributes.encoded_types(Element::CoreFoundationType, false)?;
        Ok(CoreFoundationType {
            name,
            type32,
            type64,
        })
    }
}

/// Declaration: Opaque (`opaque`), a type whose layout is not exposed
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Opaque {
    pub name: String,
    pub type32: Option<Type>,
    pub type64: Option<Type>,
    pub ignore: bool,
    pub suggestion: Option<String>,
}

impl Opaque {
    pub const TAG_NAME: &'static str = "opaque";

    pub fn from_attributes(attributes: &Attributes) -> Result<Self, ErrorKind> {
        let name = attributes.required(Element::Opaque, "name")?;
        let ignore = attributes.flag("ignore")?;
        let (type32, type64) = attributes.encoded_types(Element::Opaque, ignore)?;
        Ok(Opaque {
            name,
            type32,
            type64,
            ignore,
            suggestion: attributes.value("suggestion")?,
        })
    }
}
