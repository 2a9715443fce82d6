use std::collections::HashMap;

use super::{
    element::Element,
    encoding::{Bitness, Type},
    error::{AttributeError, EncodingError, ErrorKind},
    function_type::TypeModifier,
};

/// The attributes of a single element, as delivered by the XML event source.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes {
    values: HashMap<String, String>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The ·actual value· of an optional attribute.
    pub(crate) fn value<T: ActualValue>(&self, name: &'static str) -> Result<Option<T>, ErrorKind> {
        self.get(name)
            .map(|value| actual_value(value, name))
            .transpose()
    }

    pub(crate) fn required<T: ActualValue>(
        &self,
        element: Element,
        name: &'static str,
    ) -> Result<T, ErrorKind> {
        self.value(name)?.ok_or_else(|| {
            AttributeError::Missing {
                element,
                attribute: name,
            }
            .into()
        })
    }

    /// A boolean attribute, `false` if absent.
    pub(crate) fn flag(&self, name: &'static str) -> Result<bool, ErrorKind> {
        Ok(self.value(name)?.unwrap_or(false))
    }

    pub(crate) fn encoded_type(&self, bitness: Bitness) -> Result<Option<Type>, ErrorKind> {
        self.get(bitness.type_attribute())
            .map(|encoded| Type::decode(encoded, bitness))
            .transpose()
            .map_err(Into::into)
    }

    /// Both encoded types; at least one of them must be present unless the declaration is
    /// ignored.
    pub(crate) fn encoded_types(
        &self,
        element: Element,
        ignore: bool,
    ) -> Result<(Option<Type>, Option<Type>), ErrorKind> {
        let type32 = self.encoded_type(Bitness::Bit32)?;
        let type64 = self.encoded_type(Bitness::Bit64)?;
        if type32.is_none() && type64.is_none() && !ignore {
            return Err(AttributeError::MissingType { element }.into());
        }
        Ok((type32, type64))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Attributes::new();
        for (name, value) in iter {
            attributes.insert(name, value);
        }
        attributes
    }
}

pub trait ActualValue: Sized {
    fn convert(src: &str, attribute: &'static str) -> Result<Self, ErrorKind>;
}

impl ActualValue for String {
    fn convert(src: &str, _attribute: &'static str) -> Result<Self, ErrorKind> {
        Ok(src.to_string())
    }
}

impl ActualValue for bool {
    fn convert(src: &str, attribute: &'static str) -> Result<Self, ErrorKind> {
        match src {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(AttributeError::InvalidBoolean {
                attribute,
                value: src.to_string(),
            }
            .into()),
        }
    }
}

impl ActualValue for usize {
    fn convert(src: &str, attribute: &'static str) -> Result<Self, ErrorKind> {
        src.parse().map_err(|_| {
            AttributeError::InvalidInteger {
                attribute,
                value: src.to_string(),
            }
            .into()
        })
    }
}

impl ActualValue for TypeModifier {
    fn convert(src: &str, _attribute: &'static str) -> Result<Self, ErrorKind> {
        match src {
            "n" => Ok(TypeModifier::In),
            "o" => Ok(TypeModifier::Out),
            "N" => Ok(TypeModifier::InOut),
            _ => Err(EncodingError::TypeModifier(src.to_string()).into()),
        }
    }
}

pub fn actual_value<T: ActualValue>(x: &str, attribute: &'static str) -> Result<T, ErrorKind> {
    T::convert(x, attribute)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booleans_are_strict() {
        assert_eq!(actual_value::<bool>("true", "const"), Ok(true));
        assert_eq!(actual_value::<bool>("false", "const"), Ok(false));
        assert_eq!(
            actual_value::<bool>("yes", "const"),
            Err(ErrorKind::Attribute(AttributeError::InvalidBoolean {
                attribute: "const",
                value: "yes".into(),
            }))
        );
    }

    #[test]
    fn absent_flag_is_false() {
        let attributes = Attributes::from_iter([("ignore", "true")]);
        assert_eq!(attributes.flag("ignore"), Ok(true));
        assert_eq!(attributes.flag("const"), Ok(false));
    }

    #[test]
    fn type_modifiers() {
        assert_eq!(actual_value("n", "type_modifier"), Ok(TypeModifier::In));
        assert_eq!(actual_value("o", "type_modifier"), Ok(TypeModifier::Out));
        assert_eq!(actual_value("N", "type_modifier"), Ok(TypeModifier::InOut));
        assert_eq!(
            actual_value::<TypeModifier>("x", "type_modifier"),
            Err(ErrorKind::Encoding(EncodingError::TypeModifier("x".into())))
        );
    }

    #[test]
    fn invalid_index() {
        assert_eq!(actual_value::<usize>("3", "index"), Ok(3));
        assert!(matches!(
            actual_value::<usize>("-1", "index"),
            Err(ErrorKind::Attribute(AttributeError::InvalidInteger { .. }))
        ));
    }

    #[test]
    fn required_attribute_names_the_element() {
        let attributes = Attributes::new();
        assert_eq!(
            attributes.required::<String>(Element::FunctionAlias, "original"),
            Err(ErrorKind::Attribute(AttributeError::Missing {
                element: Element::FunctionAlias,
                attribute: "original",
            }))
        );
    }

    #[test]
    fn encoded_types_per_bitness() {
        let attributes = Attributes::from_iter([("type", "i"), ("type64", "q")]);
        assert_eq!(
            attributes.encoded_types(Element::Constant, false),
            Ok((Some(Type::Int), Some(Type::LongLong)))
        );

        let attributes = Attributes::new();
        assert_eq!(
            attributes.encoded_types(Element::Constant, false),
            Err(ErrorKind::Attribute(AttributeError::MissingType {
                element: Element::Constant,
            }))
        );
        assert_eq!(attributes.encoded_types(Element::Constant, true), Ok((None, None)));
    }
}
