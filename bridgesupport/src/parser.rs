use super::{
    definition::Document,
    error::{ErrorKind, ParseError},
    reader::{EventSource, Position, XmlEvent},
    state_machine::StateMachine,
    values::Attributes,
};

/// Builds a [`Document`] from element events.
///
/// The first error is final: it is returned again for every later event and by
/// [`Parser::finish()`], so a partially parsed document is never handed out.
#[derive(Debug, Default)]
pub struct Parser {
    machine: StateMachine,
    document: Document,
    error: Option<ParseError>,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_element(
        &mut self,
        name: &str,
        attributes: &Attributes,
        position: Position,
    ) -> Result<(), ParseError> {
        self.check()?;
        let result = self.machine.enter(name, attributes);
        self.record(result, position)
    }

    pub fn end_element(&mut self, name: &str, position: Position) -> Result<(), ParseError> {
        self.check()?;
        let result = self.machine.leave(name).map(|definition| {
            if let Some(definition) = definition {
                self.document.push(definition);
            }
        });
        self.record(result, position)
    }

    /// Completes the document. `position` is the end of the input.
    pub fn finish(self, position: Position) -> Result<Document, ParseError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        self.machine
            .finish()
            .map_err(|kind| ParseError::new(kind, position))?;
        Ok(self.document)
    }

    /// Feeds every event of `source` through a new parser.
    pub fn parse(mut source: impl EventSource) -> Result<Document, ParseError> {
        let mut parser = Parser::new();
        while let Some((event, position)) = source.next_event()? {
            match event {
                XmlEvent::Start { name, attributes } => {
                    parser.start_element(&name, &attributes, position)?
                }
                XmlEvent::End { name } => parser.end_element(&name, position)?,
            }
        }
        parser.finish(source.end_position())
    }

    fn check(&self) -> Result<(), ParseError> {
        match &self.error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn record<T>(
        &mut self,
        result: Result<T, ErrorKind>,
        position: Position,
    ) -> Result<(), ParseError> {
        match result {
            Ok(_) => Ok(()),
            Err(kind) => {
                let error = ParseError::new(kind, position);
                self.error = Some(error.clone());
                Err(error)
            }
        }
    }
}
