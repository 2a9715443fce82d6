//! XML event sources feeding the parser.
//!
//! Two readers are provided: [`StreamingReader`] pulls events from [`quick_xml`] without building
//! a tree, [`TreeReader`] walks a document already parsed by [`roxmltree`].
use std::{fmt, str};

use quick_xml::events::{BytesStart, Event};

use super::{
    error::{ErrorKind, ParseError},
    values::Attributes,
};

/// A location in the source text. Both line and column start at 1; columns count characters.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Default for Position {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The events the parser reacts to. Text, comments, processing instructions and the document
/// type declaration carry no information for bridge metadata and are never produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum XmlEvent {
    Start { name: String, attributes: Attributes },
    End { name: String },
}

pub trait EventSource {
    /// The next element event, or `None` at the end of the document.
    fn next_event(&mut self) -> Result<Option<(XmlEvent, Position)>, ParseError>;

    /// Where the document ends.
    fn end_position(&self) -> Position;
}

/// Maps byte offsets to line and column.
#[derive(Clone, Debug)]
struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    fn new(text: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { text, line_starts }
    }

    fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.text.len());
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let line_start = self.line_starts[line - 1];
        let column = self
            .text
            .get(line_start..offset)
            .map_or(offset - line_start, |prefix| prefix.chars().count());
        Position {
            line,
            column: column + 1,
        }
    }

    /// Position of the first non-whitespace character at or after `offset`.
    fn token_position(&self, offset: usize) -> Position {
        let skipped = self
            .text
            .get(offset..)
            .map_or(0, |rest| rest.len() - rest.trim_start().len());
        self.position(offset + skipped)
    }
}

/// Pull reader over [`quick_xml`].
pub struct StreamingReader<'a> {
    reader: quick_xml::Reader<&'a [u8]>,
    lines: LineIndex<'a>,
    /// End of a self-closing element, reported right after its start.
    empty_end: Option<(XmlEvent, Position)>,
    finished: bool,
}

impl<'a> StreamingReader<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut reader = quick_xml::Reader::from_str(text);
        reader.config_mut().trim_text(true);
        Self {
            reader,
            lines: LineIndex::new(text),
            empty_end: None,
            finished: false,
        }
    }

    fn error(&self, message: impl fmt::Display) -> ParseError {
        let position = self.lines.position(self.reader.error_position() as usize);
        ParseError::new(ErrorKind::Xml(message.to_string()), position)
    }

    fn start_event(&self, start: &BytesStart<'_>) -> Result<XmlEvent, ParseError> {
        let name = utf8(start.name().as_ref()).map_err(|e| self.error(e))?;
        let mut attributes = Attributes::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|e| self.error(e))?;
            let key = utf8(attribute.key.as_ref()).map_err(|e| self.error(e))?;
            let value = attribute.unescape_value().map_err(|e| self.error(e))?;
            attributes.insert(key, value);
        }
        Ok(XmlEvent::Start { name, attributes })
    }
}

fn utf8(bytes: &[u8]) -> Result<String, str::Utf8Error> {
    str::from_utf8(bytes).map(str::to_string)
}

impl EventSource for StreamingReader<'_> {
    fn next_event(&mut self) -> Result<Option<(XmlEvent, Position)>, ParseError> {
        if let Some(end) = self.empty_end.take() {
            return Ok(Some(end));
        }
        if self.finished {
            return Ok(None);
        }

        loop {
            let position = self.lines.token_position(self.reader.buffer_position() as usize);
            let event = self.reader.read_event().map_err(|e| self.error(e))?;
            match event {
                Event::Start(start) => {
                    return Ok(Some((self.start_event(&start)?, position)));
                }
                Event::Empty(start) => {
                    let event = self.start_event(&start)?;
                    if let XmlEvent::Start { name, .. } = &event {
                        let end = XmlEvent::End { name: name.clone() };
                        self.empty_end = Some((end, position));
                    }
                    return Ok(Some((event, position)));
                }
                Event::End(end) => {
                    let name = utf8(end.name().as_ref()).map_err(|e| self.error(e))?;
                    return Ok(Some((XmlEvent::End { name }, position)));
                }
                Event::Eof => {
                    self.finished = true;
                    return Ok(None);
                }
                // Character data is not part of bridge metadata
                Event::Text(_)
                | Event::CData(_)
                | Event::Comment(_)
                | Event::Decl(_)
                | Event::PI(_)
                | Event::DocType(_) => {}
            }
        }
    }

    fn end_position(&self) -> Position {
        self.lines.position(self.lines.text.len())
    }
}

/// Walks the elements of a [`roxmltree::Document`] in document order.
pub struct TreeReader<'a, 'input> {
    document: &'a roxmltree::Document<'input>,
    /// Remaining steps, the next one last.
    steps: Vec<Step<'a, 'input>>,
}

enum Step<'a, 'input> {
    Enter(roxmltree::Node<'a, 'input>),
    Leave(roxmltree::Node<'a, 'input>),
}

impl<'a, 'input> TreeReader<'a, 'input> {
    pub fn new(document: &'a roxmltree::Document<'input>) -> Self {
        Self {
            document,
            steps: vec![Step::Enter(document.root_element())],
        }
    }

    fn position(&self, offset: usize) -> Position {
        let pos = self.document.text_pos_at(offset);
        Position {
            line: pos.row as usize,
            column: pos.col as usize,
        }
    }

    /// Start of the end tag of `node`, or of the whole element if it is self-closing.
    fn end_tag_offset(&self, node: roxmltree::Node<'_, '_>) -> usize {
        let range = node.range();
        self.document
            .input_text()
            .get(range.clone())
            .filter(|element| !element.ends_with("/>"))
            .and_then(|element| element.rfind("</"))
            .map_or(range.start, |offset| range.start + offset)
    }
}

impl EventSource for TreeReader<'_, '_> {
    fn next_event(&mut self) -> Result<Option<(XmlEvent, Position)>, ParseError> {
        while let Some(step) = self.steps.pop() {
            match step {
                Step::Enter(node) if node.is_element() => {
                    self.steps.push(Step::Leave(node));
                    self.steps
                        .extend(node.children().rev().map(Step::Enter));

                    let attributes = node
                        .attributes()
                        .map(|attribute| (attribute.name(), attribute.value()))
                        .collect();
                    let event = XmlEvent::Start {
                        name: node.tag_name().name().to_string(),
                        attributes,
                    };
                    return Ok(Some((event, self.position(node.range().start))));
                }
                Step::Enter(_) => {}
                Step::Leave(node) => {
                    let event = XmlEvent::End {
                        name: node.tag_name().name().to_string(),
                    };
                    let position = self.position(self.end_tag_offset(node));
                    return Ok(Some((event, position)));
                }
            }
        }
        Ok(None)
    }

    fn end_position(&self) -> Position {
        self.position(self.document.input_text().len())
    }
}
