//! The element state machine, driven by enter/leave events of a bridge metadata file.
//!
//! `arg` and `retval` elements do not change the state. They are collected on a stack of pending
//! values instead, so that a function pointer argument or return value can itself contain
//! arguments and a return value, nested arbitrarily deep.
use std::mem;

use super::{
    class::{Class, InformalProtocol, Method},
    constant::{Constant, Enum, StringConstant},
    definition::Definition,
    element::Element,
    encoding::Type,
    error::{ErrorKind, StructuralError},
    function::{Function, FunctionAlias},
    function_type::{Argument, FunctionType, ReturnValue},
    struct_decl::{FieldDeclaration, Struct},
    type_decl::{CoreFoundationType, Opaque},
    values::Attributes,
};

#[derive(Debug)]
enum State {
    Root,
    Signatures,
    DependsOn,
    Struct(Struct),
    StructField(Struct, FieldDeclaration),
    Class(Class),
    ClassMethod(Class, Method),
    Function(Function),
    CoreFoundationType(CoreFoundationType),
    Constant(Constant),
    Enum(Enum),
    Opaque(Opaque),
    InformalProtocol(InformalProtocol),
    InformalProtocolMethod(InformalProtocol, Method),
    StringConstant(StringConstant),
    FunctionAlias(FunctionAlias),
    /// `</signatures>` has been seen.
    Finished,
    /// A transition failed; no further events are accepted.
    Failed,
}

impl State {
    /// The element this state is inside of.
    fn container(&self) -> Option<Element> {
        let element = match self {
            State::Root | State::Finished | State::Failed => return None,
            State::Signatures => Element::Signatures,
            State::DependsOn => Element::DependsOn,
            State::Struct(_) => Element::Struct,
            State::StructField(..) => Element::Field,
            State::Class(_) => Element::Class,
            State::ClassMethod(..) | State::InformalProtocolMethod(..) => Element::Method,
            State::Function(_) => Element::Function,
            State::CoreFoundationType(_) => Element::CoreFoundationType,
            State::Constant(_) => Element::Constant,
            State::Enum(_) => Element::Enum,
            State::Opaque(_) => Element::Opaque,
            State::InformalProtocol(_) => Element::InformalProtocol,
            State::StringConstant(_) => Element::StringConstant,
            State::FunctionAlias(_) => Element::FunctionAlias,
        };
        Some(element)
    }

    fn expected_children(&self) -> &'static [Element] {
        match self {
            State::Root => &[Element::Signatures],
            State::Signatures => Element::DEFINITIONS,
            State::Struct(_) => &[Element::Field],
            State::Class(_) | State::InformalProtocol(_) => &[Element::Method],
            State::ClassMethod(..)
            | State::InformalProtocolMethod(..)
            | State::Function(_)
            | State::StructField(..) => &[Element::Argument, Element::ReturnValue],
            _ => &[],
        }
    }

    /// Whether `arg` and `retval` elements may appear in this state.
    fn has_signature(&self) -> bool {
        matches!(
            self,
            State::ClassMethod(..)
                | State::InformalProtocolMethod(..)
                | State::Function(_)
                | State::StructField(..)
        )
    }

    /// The function type completed arguments and return values are added to.
    fn function_type_mut(&mut self) -> Option<&mut FunctionType> {
        match self {
            State::ClassMethod(_, method) | State::InformalProtocolMethod(_, method) => {
                Some(&mut method.function_type)
            }
            State::Function(function) => Some(&mut function.function_type),
            State::StructField(_, field) => field.function_type.as_mut(),
            _ => None,
        }
    }
}

#[derive(Debug)]
enum Pending {
    Argument(Argument),
    ReturnValue(ReturnValue),
}

impl Pending {
    fn element(&self) -> Element {
        match self {
            Pending::Argument(_) => Element::Argument,
            Pending::ReturnValue(_) => Element::ReturnValue,
        }
    }

    /// The nested signature, if this is a function pointer.
    fn function_type_mut(&mut self) -> Option<&mut FunctionType> {
        let type32 = match self {
            Pending::Argument(argument) => &mut argument.type32,
            Pending::ReturnValue(return_value) => &mut return_value.type32,
        };
        match type32 {
            Some(Type::FunctionType(function_type)) => Some(function_type),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct StateMachine {
    state: State,
    pending: Vec<Pending>,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl StateMachine {
    pub fn new() -> Self {
        Self {
            state: State::Root,
            pending: Vec::new(),
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, State::Finished)
    }

    /// The innermost open element.
    pub fn current_element(&self) -> Option<Element> {
        match self.pending.last() {
            Some(pending) => Some(pending.element()),
            None => self.state.container(),
        }
    }

    /// Handles the start of element `tag`.
    pub fn enter(&mut self, tag: &str, attributes: &Attributes) -> Result<(), ErrorKind> {
        let element = Element::from_tag_name(tag);
        let state = mem::replace(&mut self.state, State::Failed);

        self.state = match (state, element) {
            (State::Root, Some(Element::Signatures)) => State::Signatures,

            (State::Signatures, Some(Element::DependsOn)) => State::DependsOn,
            (State::Signatures, Some(Element::Struct)) => {
                State::Struct(Struct::from_attributes(attributes)?)
            }
            (State::Signatures, Some(Element::Class)) => {
                State::Class(Class::from_attributes(attributes)?)
            }
            (State::Signatures, Some(Element::Function)) => {
                State::Function(Function::from_attributes(attributes)?)
            }
            (State::Signatures, Some(Element::CoreFoundationType)) => {
                State::CoreFoundationType(CoreFoundationType::from_attributes(attributes)?)
            }
            (State::Signatures, Some(Element::Constant)) => {
                State::Constant(Constant::from_attributes(attributes)?)
            }
            (State::Signatures, Some(Element::Enum)) => {
                State::Enum(Enum::from_attributes(attributes)?)
            }
            (State::Signatures, Some(Element::Opaque)) => {
                State::Opaque(Opaque::from_attributes(attributes)?)
            }
            (State::Signatures, Some(Element::InformalProtocol)) => {
                State::InformalProtocol(InformalProtocol::from_attributes(attributes)?)
            }
            (State::Signatures, Some(Element::StringConstant)) => {
                State::StringConstant(StringConstant::from_attributes(attributes)?)
            }
            (State::Signatures, Some(Element::FunctionAlias)) => {
                State::FunctionAlias(FunctionAlias::from_attributes(attributes)?)
            }

            (State::Struct(struct_), Some(Element::Field)) => {
                State::StructField(struct_, FieldDeclaration::from_attributes(attributes)?)
            }
            (State::Class(class), Some(Element::Method)) => {
                State::ClassMethod(class, Method::from_attributes(attributes)?)
            }
            (State::InformalProtocol(protocol), Some(Element::Method)) => {
                State::InformalProtocolMethod(protocol, Method::from_attributes(attributes)?)
            }

            (state, Some(Element::Argument)) if state.has_signature() => {
                let argument = Argument::from_attributes(attributes)?;
                self.pending.push(Pending::Argument(argument));
                state
            }
            (state, Some(Element::ReturnValue)) if state.has_signature() => {
                let return_value = ReturnValue::from_attributes(attributes)?;
                self.pending.push(Pending::ReturnValue(return_value));
                state
            }

            (state, _) => {
                let container = match self.pending.last() {
                    Some(pending) => Some(pending.element()),
                    None => state.container(),
                };
                return Err(StructuralError::UnexpectedElement {
                    element: tag.to_string(),
                    expected: state.expected_children().to_vec(),
                    container,
                }
                .into());
            }
        };

        Ok(())
    }

    /// Handles the end of element `tag`. Returns the definition it completed, if any.
    pub fn leave(&mut self, tag: &str) -> Result<Option<Definition>, ErrorKind> {
        let element = Element::from_tag_name(tag);
        let state = mem::replace(&mut self.state, State::Failed);
        let nothing_pending = self.pending.is_empty();

        let (state, definition) = match (state, element) {
            (State::Signatures, Some(Element::Signatures)) => (State::Finished, None),
            (State::DependsOn, Some(Element::DependsOn)) => (State::Signatures, None),

            (State::Struct(struct_), Some(Element::Struct)) => {
                (State::Signatures, Some(Definition::Struct(struct_)))
            }
            (State::StructField(mut struct_, field), Some(Element::Field)) if nothing_pending => {
                struct_.apply_field(field)?;
                (State::Struct(struct_), None)
            }

            (State::Class(class), Some(Element::Class)) => {
                (State::Signatures, Some(Definition::Class(class)))
            }
            (State::ClassMethod(mut class, method), Some(Element::Method)) if nothing_pending => {
                class.methods.push(method);
                (State::Class(class), None)
            }

            (State::InformalProtocol(protocol), Some(Element::InformalProtocol)) => {
                (State::Signatures, Some(Definition::InformalProtocol(protocol)))
            }
            (State::InformalProtocolMethod(mut protocol, method), Some(Element::Method))
                if nothing_pending =>
            {
                protocol.methods.push(method);
                (State::InformalProtocol(protocol), None)
            }

            (State::Function(function), Some(Element::Function)) if nothing_pending => {
                (State::Signatures, Some(Definition::Function(function)))
            }

            (mut state, Some(Element::Argument)) if state.has_signature() => {
                if let Some(argument) = self.pop_argument()? {
                    state
                        .function_type_mut()
                        .ok_or(StructuralError::NonFunctionTypeParent)?
                        .append_argument(argument)?;
                }
                (state, None)
            }
            (mut state, Some(Element::ReturnValue)) if state.has_signature() => {
                if let Some(return_value) = self.pop_return_value()? {
                    state
                        .function_type_mut()
                        .ok_or(StructuralError::NonFunctionTypeParent)?
                        .set_return_value(return_value)?;
                }
                (state, None)
            }

            (State::CoreFoundationType(type_), Some(Element::CoreFoundationType)) => {
                (State::Signatures, Some(Definition::CoreFoundationType(type_)))
            }
            (State::Constant(constant), Some(Element::Constant)) => {
                (State::Signatures, Some(Definition::Constant(constant)))
            }
            (State::Enum(enum_), Some(Element::Enum)) => {
                (State::Signatures, Some(Definition::Enum(enum_)))
            }
            (State::Opaque(opaque), Some(Element::Opaque)) => {
                (State::Signatures, Some(Definition::Opaque(opaque)))
            }
            (State::StringConstant(constant), Some(Element::StringConstant)) => {
                (State::Signatures, Some(Definition::StringConstant(constant)))
            }
            (State::FunctionAlias(alias), Some(Element::FunctionAlias)) => {
                (State::Signatures, Some(Definition::FunctionAlias(alias)))
            }

            (state, _) => {
                let expected = match self.pending.last() {
                    Some(pending) => vec![pending.element()],
                    None => state.container().into_iter().collect(),
                };
                return Err(StructuralError::UnexpectedEndElement {
                    element: tag.to_string(),
                    expected,
                }
                .into());
            }
        };

        self.state = state;
        Ok(definition)
    }

    /// Checks that the document is complete.
    pub fn finish(&self) -> Result<(), ErrorKind> {
        if self.is_finished() {
            Ok(())
        } else {
            Err(StructuralError::UnexpectedEndOfDocument.into())
        }
    }

    /// Pops the argument that just ended. It is folded into the function pointer below it on the
    /// stack, or returned if the stack is now empty.
    fn pop_argument(&mut self) -> Result<Option<Argument>, ErrorKind> {
        let argument = match self.pending.pop() {
            Some(Pending::Argument(argument)) => argument,
            other => return Err(unbalanced(Element::Argument, other)),
        };
        match self.pending.last_mut() {
            None => Ok(Some(argument)),
            Some(parent) => {
                parent
                    .function_type_mut()
                    .ok_or(StructuralError::NonFunctionTypeParent)?
                    .append_argument(argument)?;
                Ok(None)
            }
        }
    }

    /// Like [`Self::pop_argument()`], for a return value.
    fn pop_return_value(&mut self) -> Result<Option<ReturnValue>, ErrorKind> {
        let return_value = match self.pending.pop() {
            Some(Pending::ReturnValue(return_value)) => return_value,
            other => return Err(unbalanced(Element::ReturnValue, other)),
        };
        match self.pending.last_mut() {
            None => Ok(Some(return_value)),
            Some(parent) => {
                parent
                    .function_type_mut()
                    .ok_or(StructuralError::NonFunctionTypeParent)?
                    .set_return_value(return_value)?;
                Ok(None)
            }
        }
    }
}

fn unbalanced(ended: Element, open: Option<Pending>) -> ErrorKind {
    StructuralError::UnexpectedEndElement {
        element: ended.tag_name().to_string(),
        expected: open.iter().map(Pending::element).collect(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{encoding::StructType, error::AttributeError, Field};
    use pretty_assertions::assert_eq;

    enum Event {
        Start(&'static str, Vec<(&'static str, &'static str)>),
        End(&'static str),
    }

    fn start(tag: &'static str, attributes: &[(&'static str, &'static str)]) -> Event {
        Event::Start(tag, attributes.to_vec())
    }

    fn end(tag: &'static str) -> Event {
        Event::End(tag)
    }

    /// `<tag attributes/>`
    fn empty(tag: &'static str, attributes: &[(&'static str, &'static str)]) -> [Event; 2] {
        [start(tag, attributes), end(tag)]
    }

    fn run(events: impl IntoIterator<Item = Event>) -> Result<Vec<Definition>, ErrorKind> {
        let mut machine = StateMachine::new();
        let mut definitions = Vec::new();
        for event in events {
            match event {
                Event::Start(tag, attributes) => {
                    machine.enter(tag, &Attributes::from_iter(attributes))?
                }
                Event::End(tag) => definitions.extend(machine.leave(tag)?),
            }
        }
        machine.finish()?;
        Ok(definitions)
    }

    /// Wraps `events` in `<signatures>`.
    fn signatures(events: impl IntoIterator<Item = Event>) -> Vec<Event> {
        let mut all = vec![start("signatures", &[])];
        all.extend(events);
        all.push(end("signatures"));
        all
    }

    fn argument(name: &str, index: Option<usize>, type32: Type) -> Argument {
        Argument {
            name: name.into(),
            index,
            type32: Some(type32),
            ..Default::default()
        }
    }

    fn return_value(type32: Type) -> ReturnValue {
        ReturnValue {
            type32: Some(type32),
            ..Default::default()
        }
    }

    fn method_events(
        selector: &'static str,
        class_method: &'static str,
    ) -> impl Iterator<Item = Event> {
        [start(
            "method",
            &[("selector", selector), ("class_method", class_method)],
        )]
        .into_iter()
        .chain(empty(
            "arg",
            &[("name", "bar"), ("index", "0"), ("type", "I")],
        ))
        .chain(empty("retval", &[("type", "i")]))
        .chain([end("method")])
    }

    #[test]
    fn class_with_instance_and_class_method() {
        let events = signatures(
            [start("class", &[("name", "Foo")])]
                .into_iter()
                .chain(method_events("initWithBar:", "false"))
                .chain(method_events("fooWithBar:", "true"))
                .chain([end("class")]),
        );

        let signature = FunctionType::new(
            vec![argument("bar", Some(0), Type::UnsignedInt)],
            Some(return_value(Type::Int)),
        );
        assert_eq!(
            run(events).unwrap(),
            vec![Definition::Class(Class {
                name: "Foo".into(),
                methods: vec![
                    Method {
                        selector: "initWithBar:".into(),
                        is_class_method: false,
                        function_type: signature.clone(),
                        ..Default::default()
                    },
                    Method {
                        selector: "fooWithBar:".into(),
                        is_class_method: true,
                        function_type: signature,
                        ..Default::default()
                    },
                ],
                ..Default::default()
            })]
        );
    }

    fn callback_events(function_pointer_element: &'static str) -> Vec<Event> {
        let mut events = vec![start(
            function_pointer_element,
            &[("name", "bar"), ("function_pointer", "true"), ("type", "^?")],
        )];
        events.extend(empty("arg", &[("type", "f")]));
        events.extend(empty("arg", &[("type", "d")]));
        events.extend(empty("retval", &[("type", "c")]));
        events.push(end(function_pointer_element));
        events
    }

    fn callback_type() -> Type {
        Type::FunctionType(FunctionType::new(
            vec![argument("", None, Type::Float), argument("", None, Type::Double)],
            Some(return_value(Type::Char)),
        ))
    }

    fn single_method(definitions: Vec<Definition>) -> Method {
        match definitions.as_slice() {
            [Definition::Class(class)] => class.methods[0].clone(),
            other => panic!("expected a single class, got {other:?}"),
        }
    }

    #[test]
    fn function_pointer_argument() {
        let mut events = vec![
            start("class", &[("name", "Foo")]),
            start("method", &[("selector", "foo:bar:baz:")]),
        ];
        events.extend(empty("arg", &[("name", "foo"), ("type", "i")]));
        events.extend(callback_events("arg"));
        events.extend(empty("arg", &[("name", "baz"), ("type", "I")]));
        events.extend(empty("retval", &[("type", "C")]));
        events.extend([end("method"), end("class")]);

        let method = single_method(run(signatures(events)).unwrap());
        assert_eq!(
            method.function_type,
            FunctionType::new(
                vec![
                    argument("foo", None, Type::Int),
                    argument("bar", None, callback_type()),
                    argument("baz", None, Type::UnsignedInt),
                ],
                Some(return_value(Type::UnsignedChar)),
            )
        );
    }

    #[test]
    fn function_pointer_return_value() {
        let mut events = vec![
            start("class", &[("name", "Foo")]),
            start("method", &[("selector", "foo:bar:")]),
        ];
        events.extend(empty("arg", &[("name", "foo"), ("type", "i")]));
        events.extend(empty("arg", &[("name", "bar"), ("type", "I")]));
        events.extend(callback_events("retval"));
        events.extend([end("method"), end("class")]);

        let method = single_method(run(signatures(events)).unwrap());
        assert_eq!(method.function_type.arguments().len(), 2);
        assert_eq!(
            method.function_type.return_value(),
            Some(&return_value(callback_type()))
        );
    }

    #[test]
    fn function_pointer_inside_function_pointer() {
        let mut events = vec![
            start("function", &[("name", "install")]),
            start("arg", &[("function_pointer", "true")]),
            start("arg", &[("function_pointer", "true")]),
        ];
        events.extend(empty("arg", &[("type", "i")]));
        events.extend([end("arg")]);
        events.extend(empty("retval", &[("type", "v")]));
        events.extend([end("arg"), end("function")]);

        let definitions = run(signatures(events)).unwrap();
        let [Definition::Function(function)] = definitions.as_slice() else {
            panic!("expected a single function");
        };
        let inner = Type::FunctionType(FunctionType::new(
            vec![argument("", None, Type::Int)],
            None,
        ));
        let outer = Type::FunctionType(FunctionType::new(
            vec![argument("", None, inner)],
            Some(return_value(Type::Void)),
        ));
        assert_eq!(
            function.function_type,
            FunctionType::new(vec![argument("", None, outer)], None)
        );
    }

    #[test]
    fn nested_argument_requires_function_pointer() {
        let mut events = vec![
            start("function", &[("name", "foo")]),
            start("arg", &[("type", "i")]),
        ];
        events.extend(empty("arg", &[("type", "f")]));
        events.extend([end("arg"), end("function")]);

        assert_eq!(
            run(signatures(events)),
            Err(ErrorKind::Structural(StructuralError::NonFunctionTypeParent))
        );
    }

    #[test]
    fn out_of_order_argument_index() {
        let mut events = vec![start("function", &[("name", "foo")])];
        events.extend(empty("arg", &[("index", "1"), ("type", "i")]));
        events.extend(empty("arg", &[("index", "0"), ("type", "i")]));
        events.push(end("function"));

        assert_eq!(
            run(signatures(events)),
            Err(ErrorKind::Structural(StructuralError::ArgumentIndex {
                expected: 0,
                found: 1,
            }))
        );
    }

    #[test]
    fn second_return_value() {
        for container in ["function", "method"] {
            let mut events = vec![start("class", &[("name", "Foo")])];
            if container == "function" {
                events = vec![start("function", &[("name", "foo")])];
            } else {
                events.push(start("method", &[("selector", "foo")]));
            }
            events.extend(empty("retval", &[("type", "i")]));
            events.extend(empty("retval", &[("type", "i")]));
            events.push(end(container));
            if container == "method" {
                events.push(end("class"));
            }

            assert_eq!(
                run(signatures(events)),
                Err(ErrorKind::Structural(StructuralError::SecondReturnValue)),
                "in {container}"
            );
        }
    }

    #[test]
    fn second_return_value_of_function_pointer() {
        let mut events = vec![
            start("function", &[("name", "foo")]),
            start("arg", &[("function_pointer", "true")]),
        ];
        events.extend(empty("retval", &[("type", "i")]));
        events.extend(empty("retval", &[("type", "i")]));
        events.extend([end("arg"), end("function")]);

        assert_eq!(
            run(signatures(events)),
            Err(ErrorKind::Structural(StructuralError::SecondReturnValue))
        );
    }

    #[test]
    fn enum_value_required_unless_ignored() {
        assert_eq!(
            run(signatures(empty("enum", &[("name", "TRUE")]))),
            Err(ErrorKind::Attribute(AttributeError::MissingValue {
                element: Element::Enum,
            }))
        );

        assert_eq!(
            run(signatures(empty("enum", &[("name", "TRUE"), ("ignore", "true")]))).unwrap(),
            vec![Definition::Enum(Enum {
                name: "TRUE".into(),
                ignore: true,
                ..Default::default()
            })]
        );
    }

    #[test]
    fn definitions_keep_document_order() {
        let mut events = Vec::new();
        events.extend(empty("depends_on", &[("path", "/System/Library/Frameworks/Foo")]));
        events.extend(empty("constant", &[("name", "kFoo"), ("type", "^i")]));
        events.extend(empty("cftype", &[("name", "FooRef"), ("type", "^{Foo=}")]));
        events.extend(empty("opaque", &[("name", "FooHandle"), ("type", "^{FooHandle=}")]));
        events.extend(empty(
            "string_constant",
            &[("name", "kBar"), ("value", "bar"), ("nsstring", "true")],
        ));
        events.extend(empty("function_alias", &[("name", "baz"), ("original", "qux")]));
        events.extend(empty("enum", &[("name", "TRUE"), ("value", "1")]));

        let names = run(signatures(events))
            .unwrap()
            .iter()
            .map(|d| d.name().to_string())
            .collect::<Vec<_>>();
        assert_eq!(names, ["kFoo", "FooRef", "FooHandle", "kBar", "baz", "TRUE"]);
    }

    #[test]
    fn informal_protocol_methods() {
        let mut events = vec![
            start("informal_protocol", &[("name", "NSFooDelegate")]),
            start("method", &[("selector", "fooDidFinish:")]),
        ];
        events.extend(empty("arg", &[("type", "@"), ("index", "0")]));
        events.extend(empty("retval", &[("type", "v")]));
        events.extend([end("method"), end("informal_protocol")]);

        let definitions = run(signatures(events)).unwrap();
        let [Definition::InformalProtocol(protocol)] = definitions.as_slice() else {
            panic!("expected a single informal protocol");
        };
        assert_eq!(protocol.name, "NSFooDelegate");
        assert_eq!(protocol.methods.len(), 1);
        assert_eq!(
            protocol.methods[0].function_type.arguments()[0].type32,
            Some(Type::Id)
        );
    }

    #[test]
    fn struct_with_function_pointer_field() {
        let mut events = vec![
            start(
                "struct",
                &[
                    ("name", "Callbacks"),
                    ("type", "{Callbacks=\"version\"i\"release\"^?}"),
                ],
            ),
            start(
                "field",
                &[("name", "release"), ("function_pointer", "true")],
            ),
        ];
        events.extend(empty("arg", &[("type", "^v")]));
        events.extend(empty("retval", &[("type", "v")]));
        events.extend([end("field"), end("struct")]);

        let definitions = run(signatures(events)).unwrap();
        let [Definition::Struct(struct_)] = definitions.as_slice() else {
            panic!("expected a single struct");
        };
        assert_eq!(
            struct_.fields,
            vec![
                Field {
                    name: "version".into(),
                    type32: Some(Type::Int),
                    type64: None,
                },
                Field {
                    name: "release".into(),
                    type32: Some(Type::FunctionType(FunctionType::new(
                        vec![argument("", None, Type::Pointer(Box::new(Type::Void)))],
                        Some(return_value(Type::Void)),
                    ))),
                    type64: None,
                },
            ]
        );
        let layout: &StructType = struct_.type32.as_ref().unwrap();
        assert_eq!(layout.fields, struct_.fields);
    }

    #[test]
    fn plain_field_takes_no_arguments() {
        let mut events = vec![
            start("struct", &[("name", "Point"), ("type", "{Point=\"x\"f}")]),
            start("field", &[("name", "x")]),
        ];
        events.extend(empty("arg", &[("type", "f")]));
        events.extend([end("field"), end("struct")]);

        assert_eq!(
            run(signatures(events)),
            Err(ErrorKind::Structural(StructuralError::NonFunctionTypeParent))
        );
    }

    #[test]
    fn unexpected_element_reports_context() {
        let events = signatures([start("method", &[("selector", "foo")])]);
        let Err(ErrorKind::Structural(StructuralError::UnexpectedElement {
            element,
            expected,
            container,
        })) = run(events)
        else {
            panic!("expected an unexpected element error");
        };
        assert_eq!(element, "method");
        assert_eq!(expected, Element::DEFINITIONS);
        assert_eq!(container, Some(Element::Signatures));
    }

    #[test]
    fn root_must_be_signatures() {
        assert_eq!(
            run([start("struct", &[("name", "Foo"), ("type", "{Foo=i}")])]),
            Err(ErrorKind::Structural(StructuralError::UnexpectedElement {
                element: "struct".into(),
                expected: vec![Element::Signatures],
                container: None,
            }))
        );
    }

    #[test]
    fn unknown_element() {
        let events = signatures([start("class", &[("name", "Foo")]), start("ivar", &[])]);
        assert_eq!(
            run(events),
            Err(ErrorKind::Structural(StructuralError::UnexpectedElement {
                element: "ivar".into(),
                expected: vec![Element::Method],
                container: Some(Element::Class),
            }))
        );
    }

    #[test]
    fn leaf_declarations_have_no_children() {
        let events = signatures([
            start("constant", &[("name", "kFoo"), ("type", "i")]),
            start("arg", &[]),
        ]);
        assert_eq!(
            run(events),
            Err(ErrorKind::Structural(StructuralError::UnexpectedElement {
                element: "arg".into(),
                expected: vec![],
                container: Some(Element::Constant),
            }))
        );
    }

    #[test]
    fn method_closed_with_open_argument() {
        let events = signatures([
            start("class", &[("name", "Foo")]),
            start("method", &[("selector", "foo:")]),
            start("arg", &[("type", "i")]),
            end("method"),
        ]);
        assert_eq!(
            run(events),
            Err(ErrorKind::Structural(StructuralError::UnexpectedEndElement {
                element: "method".into(),
                expected: vec![Element::Argument],
            }))
        );
    }

    #[test]
    fn incomplete_document() {
        let events = [
            start("signatures", &[]),
            start("class", &[("name", "Foo")]),
            end("class"),
        ];
        assert_eq!(
            run(events),
            Err(ErrorKind::Structural(StructuralError::UnexpectedEndOfDocument))
        );
    }

    #[test]
    fn current_element_follows_nesting() {
        let mut machine = StateMachine::new();
        assert_eq!(machine.current_element(), None);
        machine.enter("signatures", &Attributes::new()).unwrap();
        machine
            .enter("function", &Attributes::from_iter([("name", "foo")]))
            .unwrap();
        machine
            .enter("retval", &Attributes::from_iter([("type", "v")]))
            .unwrap();
        assert_eq!(machine.current_element(), Some(Element::ReturnValue));
        machine.leave("retval").unwrap();
        assert_eq!(machine.current_element(), Some(Element::Function));
        assert!(machine.leave("function").unwrap().is_some());
        machine.leave("signatures").unwrap();
        assert!(machine.is_finished());
    }

    #[test]
    fn failed_machine_rejects_further_events() {
        let mut machine = StateMachine::new();
        machine.enter("signatures", &Attributes::new()).unwrap();
        assert!(machine.enter("class", &Attributes::new()).is_err());
        assert!(machine
            .enter("class", &Attributes::from_iter([("name", "Foo")]))
            .is_err());
        assert!(machine.finish().is_err());
    }
}
