use super::{
    element::Element,
    encoding::{Bitness, Field, StructType, Type},
    error::{AttributeError, EncodingError, ErrorKind},
    function_type::FunctionType,
    values::Attributes,
};

/// Declaration: Struct (`struct`)
///
/// The layout is declared once per bitness; [`Struct::fields`] merges both layouts by position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Struct {
    pub name: String,
    pub fields: Vec<Field>,
    pub type32: Option<StructType>,
    pub type64: Option<StructType>,
    pub ignore: bool,
    pub suggestion: Option<String>,
}

impl Struct {
    pub const TAG_NAME: &'static str = "struct";

    pub fn from_attributes(attributes: &Attributes) -> Result<Self, ErrorKind> {
        let name = attributes.required(Element::Struct, "name")?;
        let ignore = attributes.flag("ignore")?;
        let type32 = struct_type(attributes, Bitness::Bit32)?;
        let type64 = struct_type(attributes, Bitness::Bit64)?;
        if type32.is_none() && type64.is_none() && !ignore {
            return Err(AttributeError::MissingType {
                element: Element::Struct,
            }
            .into());
        }
        let fields = merge_fields(type32.as_ref(), type64.as_ref())?;
        Ok(Struct {
            name,
            fields,
            type32,
            type64,
            ignore,
            suggestion: attributes.value("suggestion")?,
        })
    }

    /// Replaces the types of the field named like `declaration` with its function type, in the
    /// merged fields as well as in both layouts.
    pub(crate) fn apply_field(&mut self, declaration: FieldDeclaration) -> Result<(), ErrorKind> {
        let Some(function_type) = declaration.function_type else {
            return Ok(());
        };
        let index = self
            .fields
            .iter()
            .position(|field| field.name == declaration.name);
        let Some(index) = index else {
            // Ignored structs may come without a layout
            if self.ignore {
                return Ok(());
            }
            return Err(AttributeError::UnknownField {
                field: declaration.name,
            }
            .into());
        };

        let function_type = Type::FunctionType(function_type);
        let field = &mut self.fields[index];
        if field.type64.is_some() {
            field.type64 = Some(function_type.clone());
        }
        if field.type32.is_some() {
            field.type32 = Some(function_type.clone());
        }
        if let Some(field) = self.type32.as_mut().and_then(|t| t.fields.get_mut(index)) {
            field.type32 = Some(function_type.clone());
        }
        if let Some(field) = self.type64.as_mut().and_then(|t| t.fields.get_mut(index)) {
            field.type64 = Some(function_type);
        }
        Ok(())
    }
}

fn struct_type(attributes: &Attributes, bitness: Bitness) -> Result<Option<StructType>, ErrorKind> {
    match attributes.encoded_type(bitness)? {
        None => Ok(None),
        Some(Type::Struct(struct_type)) => Ok(Some(struct_type)),
        Some(_) => Err(EncodingError::Mismatch {
            expected: "struct",
            encoded: attributes
                .get(bitness.type_attribute())
                .unwrap_or_default()
                .to_string(),
        }
        .into()),
    }
}

/// Merges the 32-bit and 64-bit layouts field by field.
fn merge_fields(
    type32: Option<&StructType>,
    type64: Option<&StructType>,
) -> Result<Vec<Field>, EncodingError> {
    let fields32 = type32.map(|t| t.fields.as_slice()).unwrap_or_default();
    let fields64 = type64.map(|t| t.fields.as_slice()).unwrap_or_default();

    (0..fields32.len().max(fields64.len()))
        .map(|i| {
            let field32 = fields32.get(i);
            let field64 = fields64.get(i);
            let name32 = field32.map(|f| f.name.as_str()).unwrap_or_default();
            let name64 = field64.map(|f| f.name.as_str()).unwrap_or_default();
            let name = match (name32, name64) {
                ("", name) | (name, "") => name,
                (name32, name64) if name32 == name64 => name32,
                (name32, name64) => {
                    return Err(EncodingError::FieldNameConflict {
                        name32: name32.to_string(),
                        name64: name64.to_string(),
                    })
                }
            };
            Ok(Field {
                name: name.to_string(),
                type32: field32.and_then(|f| f.type32.clone()),
                type64: field64.and_then(|f| f.type64.clone()),
            })
        })
        .collect()
}

/// A `field` element of a [`Struct`]. Only function pointer fields carry information that is not
/// already part of the struct's encoded type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldDeclaration {
    pub name: String,
    pub function_type: Option<FunctionType>,
}

impl FieldDeclaration {
    pub const TAG_NAME: &'static str = "field";

    pub fn from_attributes(attributes: &Attributes) -> Result<Self, ErrorKind> {
        let function_type = attributes
            .flag("function_pointer")?
            .then(FunctionType::default);
        Ok(FieldDeclaration {
            name: attributes.required(Element::Field, "name")?,
            function_type,
        })
    }
}
