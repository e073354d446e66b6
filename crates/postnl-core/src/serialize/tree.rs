//! Tree codec: a namespaced element tree, written and parsed with quick-xml.
use crate::{
    MAX_NESTING_DEPTH,
    collection::OrderedCollection,
    entity::Entity,
    model::field::{FieldKind, FieldModel, PrimitiveKind},
    serialize::{Decoder, SerializeError, WireFormat},
    value::Value,
};
use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
    name::{Namespace, ResolveResult},
    reader::NsReader,
};
use std::{fmt::Display, sync::Arc};

/// Element name used for the items of a text list.
pub const LIST_ITEM: &str = "string";

// envelopes add a handful of levels on top of the entity nesting
const MAX_ELEMENT_DEPTH: usize = MAX_NESTING_DEPTH * 4;

///
/// Element
///
/// One node of a tree payload. `namespace` holds the resolved URI, never a
/// prefix. Text is only kept on leaf elements.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Element {
    pub namespace: Option<String>,
    pub name: String,
    pub text: Option<String>,
    pub children: Vec<Self>,
}

impl Element {
    #[must_use]
    pub fn new(namespace: &str, name: &str) -> Self {
        Self {
            namespace: Some(namespace.to_string()),
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Element outside any namespace.
    #[must_use]
    pub fn unqualified(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    pub fn push(&mut self, child: Self) {
        self.children.push(child);
    }

    /// First child with local name `name`.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Text content, or `""` for an element without text.
    #[must_use]
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    /// Returns `true` if the element carries no children and no text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.text.as_deref().is_none_or(str::is_empty)
    }

    fn has_text_content(&self) -> bool {
        self.children.is_empty() && self.text.as_deref().is_some_and(|t| !t.trim().is_empty())
    }
}

///
/// NamespaceMap
///
/// Fixed, ordered `(prefix, uri)` table. Every entry is declared on the root
/// element when writing; an empty prefix declares the default namespace.
///

#[derive(Clone, Copy, Debug)]
pub struct NamespaceMap(&'static [(&'static str, &'static str)]);

impl NamespaceMap {
    #[must_use]
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self(entries)
    }

    #[must_use]
    pub fn prefix(&self, uri: &str) -> Option<&'static str> {
        self.0.iter().find(|(_, u)| *u == uri).map(|(p, _)| *p)
    }

    #[must_use]
    pub fn uri(&self, prefix: &str) -> Option<&'static str> {
        self.0.iter().find(|(p, _)| *p == prefix).map(|(_, u)| *u)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> {
        self.0.iter().copied()
    }

    fn qualify(&self, element: &Element) -> Result<String, SerializeError> {
        match element.namespace.as_deref() {
            None => Ok(element.name.clone()),
            Some(uri) => match self.prefix(uri) {
                Some("") => Ok(element.name.clone()),
                Some(prefix) => Ok(format!("{prefix}:{}", element.name)),
                None => Err(SerializeError::UnmappedNamespace(uri.to_string())),
            },
        }
    }
}

///
/// ENCODE
///

/// Render an entity as an element named after its type.
#[must_use]
pub fn encode(entity: &Entity) -> Element {
    encode_as(entity, entity.model().element)
}

fn encode_as(entity: &Entity, name: &str) -> Element {
    let namespace = entity.model().namespace;
    let mut element = Element::new(namespace, name);

    for (field, value) in entity.present() {
        element.push(encode_field(namespace, field.wire_name, value));
    }

    element
}

fn encode_field(namespace: &str, wire_name: &str, value: &Value) -> Element {
    match value {
        Value::Bool(v) => Element::new(namespace, wire_name).with_text(v.to_string()),
        Value::Collection(items) => {
            let mut element = Element::new(namespace, wire_name);
            for item in items.values() {
                element.push(encode(item));
            }
            element
        }
        Value::Entity(entity) => {
            let mut element = encode_as(entity, wire_name);
            element.namespace = Some(namespace.to_string());
            element
        }
        Value::Int(v) => Element::new(namespace, wire_name).with_text(v.to_string()),
        Value::Text(s) => Element::new(namespace, wire_name).with_text(s.as_str()),
        Value::TextList(items) => {
            let mut element = Element::new(namespace, wire_name);
            for item in items {
                element.push(Element::new(namespace, LIST_ITEM).with_text(item.as_str()));
            }
            element
        }
    }
}

/// Write `root` as an XML document, declaring every mapped namespace on it.
pub fn write(root: &Element, namespaces: &NamespaceMap) -> Result<Vec<u8>, SerializeError> {
    let mut writer = Writer::new(Vec::new());
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(encode_err)?;

    write_element(&mut writer, root, namespaces, true)?;

    Ok(writer.into_inner())
}

fn write_element(
    writer: &mut Writer<Vec<u8>>,
    element: &Element,
    namespaces: &NamespaceMap,
    root: bool,
) -> Result<(), SerializeError> {
    let qname = namespaces.qualify(element)?;
    let mut start = BytesStart::new(qname.clone());

    if root {
        for (prefix, uri) in namespaces.iter() {
            let attr = if prefix.is_empty() {
                "xmlns".to_string()
            } else {
                format!("xmlns:{prefix}")
            };
            start.push_attribute((attr.as_str(), uri));
        }
    }

    let text = element.text.as_deref().filter(|t| !t.is_empty());
    if element.children.is_empty() && text.is_none() {
        return writer.write_event(Event::Empty(start)).map_err(encode_err);
    }

    writer.write_event(Event::Start(start)).map_err(encode_err)?;
    if let Some(text) = text {
        writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(encode_err)?;
    }
    for child in &element.children {
        write_element(writer, child, namespaces, false)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new(qname)))
        .map_err(encode_err)
}

///
/// PARSE
///

/// Parse an XML document into its root element, resolving namespaces.
///
/// Whitespace between child elements is dropped; text on leaf elements is
/// kept as written.
pub fn parse(bytes: &[u8]) -> Result<Element, SerializeError> {
    let source = std::str::from_utf8(bytes).map_err(decode_err)?;
    let mut reader = NsReader::from_str(source);
    let mut stack: Vec<Element> = Vec::new();

    loop {
        let (ns, event) = reader.read_resolved_event().map_err(decode_err)?;

        match event {
            Event::Start(start) => {
                if stack.len() >= MAX_ELEMENT_DEPTH {
                    return Err(decode_err("element nesting too deep"));
                }
                stack.push(open(&ns, &start)?);
            }
            Event::Empty(start) => {
                let element = open(&ns, &start)?;
                if let Some(root) = attach(&mut stack, element) {
                    return Ok(root);
                }
            }
            Event::Text(text) => {
                if let Some(top) = stack.last_mut() {
                    let text = text.unescape().map_err(decode_err)?;
                    top.text.get_or_insert_with(String::new).push_str(&text);
                }
            }
            Event::CData(data) => {
                if let Some(top) = stack.last_mut() {
                    let data = data.into_inner();
                    let text = std::str::from_utf8(&data).map_err(decode_err)?;
                    top.text.get_or_insert_with(String::new).push_str(text);
                }
            }
            Event::End(_) => {
                let mut element = stack
                    .pop()
                    .ok_or_else(|| decode_err("unbalanced end tag"))?;
                if !element.children.is_empty() {
                    element.text = None;
                }
                if let Some(root) = attach(&mut stack, element) {
                    return Ok(root);
                }
            }
            Event::Eof => return Err(decode_err("document ended before the root element closed")),
            _ => {}
        }
    }
}

fn open(ns: &ResolveResult<'_>, start: &BytesStart<'_>) -> Result<Element, SerializeError> {
    let namespace = match ns {
        ResolveResult::Bound(Namespace(uri)) => {
            Some(std::str::from_utf8(uri).map_err(decode_err)?.to_string())
        }
        ResolveResult::Unbound => None,
        ResolveResult::Unknown(prefix) => {
            return Err(decode_err(format!(
                "unknown namespace prefix '{}'",
                String::from_utf8_lossy(prefix)
            )));
        }
    };
    let local = start.local_name();
    let name = std::str::from_utf8(local.as_ref())
        .map_err(decode_err)?
        .to_string();

    Ok(Element {
        namespace,
        name,
        ..Element::default()
    })
}

// returns the element back when it closes the root
fn attach(stack: &mut [Element], element: Element) -> Option<Element> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(element);
            None
        }
        None => Some(element),
    }
}

fn encode_err(err: impl Display) -> SerializeError {
    SerializeError::encode(WireFormat::Tree, err)
}

fn decode_err(err: impl Display) -> SerializeError {
    SerializeError::decode(WireFormat::Tree, err)
}

///
/// DECODE
///

pub(crate) fn decode(
    decoder: &mut Decoder<'_>,
    element: &Element,
    type_id: &str,
) -> Result<Entity, SerializeError> {
    if element.has_text_content() {
        return Err(decoder.shape("element", "text"));
    }

    let mut entity = decoder.open(type_id)?;
    let model = Arc::clone(entity.model());

    for child in &element.children {
        let Some(pos) = model.position_by_wire(&child.name) else {
            continue;
        };

        let field = &model.fields[pos];
        decoder.push(field.name);
        if let Some(value) = decode_field(decoder, field, child)? {
            decoder.assign(&mut entity, pos, value)?;
        }
        decoder.pop();
    }

    decoder.close();

    Ok(entity)
}

fn decode_field(
    decoder: &mut Decoder<'_>,
    field: &FieldModel,
    element: &Element,
) -> Result<Option<Value>, SerializeError> {
    match field.kind {
        FieldKind::Primitive(PrimitiveKind::TextList) => {
            if element.children.is_empty() {
                // bare text stands for a one-item list
                return Ok(Some(
                    element
                        .text
                        .clone()
                        .map_or_else(|| Value::TextList(Vec::new()), Value::Text),
                ));
            }

            let mut items = Vec::with_capacity(element.children.len());
            for (i, item) in element.children.iter().enumerate() {
                decoder.push(i);
                if !item.children.is_empty() {
                    return Err(decoder.shape("text", "element"));
                }
                items.push(item.text().to_string());
                decoder.pop();
            }

            Ok(Some(Value::TextList(items)))
        }

        FieldKind::Primitive(kind) => {
            if !element.children.is_empty() {
                return Err(decoder.shape("text", "element"));
            }

            Ok(match (&element.text, kind) {
                (Some(text), _) => Some(Value::Text(text.clone())),
                (None, PrimitiveKind::Text) => Some(Value::Text(String::new())),
                // an empty numeric or boolean element reads as absent
                (None, _) => None,
            })
        }

        FieldKind::Entity(type_id) => decode(decoder, element, type_id).map(|e| Some(e.into())),

        FieldKind::Collection(type_id) => {
            if element.has_text_content() {
                return Err(decoder.shape("element", "text"));
            }

            let mut items = OrderedCollection::new(type_id);
            for (i, item) in element.children.iter().enumerate() {
                decoder.push(i);
                items
                    .push_decoded(decode(decoder, item, type_id)?)
                    .map_err(|err| decoder.collection(err))?;
                decoder.pop();
            }

            Ok(Some(Value::Collection(items)))
        }
    }
}
