//! Plenary protocol XML reader built on `quick_xml`.
//!
//! The document is read into a small element tree first; speeches are then
//! located by element name and `klasse` attribute, the way the published
//! protocol markup nests them:
//! `sitzungsverlauf > tagesordnungspunkt > rede > p[klasse]`.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::ProtocolError;
use crate::models::{AgendaItem, Paragraph, ParagraphKind, Protocol, Speaker, Speech};

/// Parse a protocol XML string
pub fn parse_protocol(xml: &str) -> Result<Protocol, ProtocolError> {
    let document = parse_document(xml)?;

    let session = document
        .find("sitzungsverlauf")
        .ok_or(ProtocolError::MissingSessionBody)?;

    let mut agenda_items = Vec::new();

    for (item_index, item) in session.find_all("tagesordnungspunkt").into_iter().enumerate() {
        let mut speeches = Vec::new();

        for (speech_index, speech) in item.find_all("rede").into_iter().enumerate() {
            let speaker = read_speaker(speech).ok_or(ProtocolError::MissingSpeaker {
                agenda_item: item_index,
                speech: speech_index,
            })?;

            let paragraphs = speech
                .find_all("p")
                .into_iter()
                .map(|p| Paragraph {
                    kind: ParagraphKind::from_class(p.attr("klasse").unwrap_or_default()),
                    text: p.string(),
                })
                .collect();

            speeches.push(Speech {
                id: speech.attr("id").map(str::to_string),
                speaker,
                paragraphs,
            });
        }

        agenda_items.push(AgendaItem {
            id: item.attr("top-id").map(str::to_string),
            speeches,
        });
    }

    Ok(Protocol { agenda_items })
}

/// Locate `p[klasse=redner] > redner > name` and read its name fields
fn read_speaker(speech: &XmlElement) -> Option<Speaker> {
    let name = speech
        .find_all("p")
        .into_iter()
        .find(|p| p.attr("klasse") == Some("redner"))?
        .find("redner")?
        .find("name")?;

    let field = |tag: &str| {
        name.find(tag)
            .map(|el| el.text().trim().to_string())
            .filter(|value| !value.is_empty())
    };

    Some(Speaker {
        first_name: field("vorname"),
        last_name: field("nachname"),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum XmlNode {
    Element(XmlElement),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

impl XmlElement {
    fn from_start(start: &BytesStart<'_>) -> Result<Self, ProtocolError> {
        let mut attributes = Vec::new();
        for attribute in start.attributes() {
            let attribute = attribute?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let value = attribute.unescape_value()?.into_owned();
            attributes.push((key, value));
        }

        Ok(Self {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            attributes,
            children: Vec::new(),
        })
    }

    fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(el) => Some(el),
            XmlNode::Text(_) => None,
        })
    }

    /// First descendant with the given name, in document order
    fn find(&self, name: &str) -> Option<&XmlElement> {
        for child in self.child_elements() {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = child.find(name) {
                return Some(found);
            }
        }
        None
    }

    /// All descendants with the given name, in document order
    fn find_all(&self, name: &str) -> Vec<&XmlElement> {
        let mut found = Vec::new();
        self.collect_named(name, &mut found);
        found
    }

    fn collect_named<'a>(&'a self, name: &str, found: &mut Vec<&'a XmlElement>) {
        for child in self.child_elements() {
            if child.name == name {
                found.push(child);
            }
            child.collect_named(name, found);
        }
    }

    /// Text of an element whose content is exactly one text node
    ///
    /// A single child element is followed down; empty elements and elements
    /// with mixed or multiple children have no string.
    fn string(&self) -> Option<String> {
        match self.children.as_slice() {
            [XmlNode::Text(text)] => Some(text.clone()),
            [XmlNode::Element(child)] => child.string(),
            _ => None,
        }
    }

    /// All descendant text concatenated
    fn text(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                XmlNode::Text(text) => out.push_str(text),
                XmlNode::Element(el) => el.push_text(out),
            }
        }
    }
}

/// Read the whole document into a tree under a nameless root element
fn parse_document(xml: &str) -> Result<XmlElement, ProtocolError> {
    let mut reader = Reader::from_str(xml);
    let mut stack = vec![XmlElement {
        name: String::new(),
        attributes: Vec::new(),
        children: Vec::new(),
    }];

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(XmlElement::from_start(&start)?),
            Event::Empty(start) => {
                let element = XmlElement::from_start(&start)?;
                push_child(&mut stack, XmlNode::Element(element));
            }
            Event::End(_) => {
                if stack.len() > 1 {
                    if let Some(element) = stack.pop() {
                        push_child(&mut stack, XmlNode::Element(element));
                    }
                }
            }
            Event::Text(text) => {
                let text = text.unescape()?.into_owned();
                push_text(&mut stack, text);
            }
            Event::CData(data) => {
                let text = String::from_utf8_lossy(&data).into_owned();
                push_text(&mut stack, text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    // Unterminated elements are closed at end of input
    while stack.len() > 1 {
        if let Some(element) = stack.pop() {
            push_child(&mut stack, XmlNode::Element(element));
        }
    }

    Ok(stack.pop().unwrap_or_else(|| XmlElement {
        name: String::new(),
        attributes: Vec::new(),
        children: Vec::new(),
    }))
}

fn push_child(stack: &mut [XmlElement], node: XmlNode) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    }
}

/// Append text, merging with a directly preceding text node
fn push_text(stack: &mut [XmlElement], text: String) {
    if text.is_empty() {
        return;
    }
    if let Some(parent) = stack.last_mut() {
        if let Some(XmlNode::Text(previous)) = parent.children.last_mut() {
            previous.push_str(&text);
        } else {
            parent.children.push(XmlNode::Text(text));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PoliticianName;

    const PROTOCOL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<dbtplenarprotokoll wahlperiode="19" sitzung-nr="1">
  <vorspann><p klasse="T">Vorspann</p></vorspann>
  <sitzungsverlauf>
    <sitzungsbeginn>Beginn: 11.00 Uhr</sitzungsbeginn>
    <tagesordnungspunkt top-id="Tagesordnungspunkt 1">
      <p klasse="T_NaS">Beratung</p>
      <rede id="ID1900100100">
        <p klasse="redner"><redner id="11001478"><name><titel>Dr.</titel><vorname>Jane</vorname><nachname>Doe</nachname><fraktion>Partei</fraktion></name></redner>Dr. Jane Doe (Partei):</p>
        <p klasse="J_1">Sehr geehrte Damen und Herren!</p>
        <p klasse="O">Wir beginnen &amp; enden.</p>
        <kommentar>(Beifall)</kommentar>
        <p klasse="J">Danke.</p>
        <p klasse="O"></p>
        <p klasse="O">Mit <b>Auszeichnung</b> gesagt.</p>
      </rede>
      <rede id="ID1900100200">
        <p klasse="redner"><redner id="2"><name><vorname>John</vorname><nachname>Roe</nachname></name></redner>John Roe:</p>
        <p klasse="O">Gegenrede.</p>
      </rede>
    </tagesordnungspunkt>
    <tagesordnungspunkt top-id="Tagesordnungspunkt 2">
      <rede id="ID1900100300">
        <p klasse="redner"><redner id="1"><name><vorname>Jane</vorname><nachname>Doe</nachname></name></redner>Jane Doe:</p>
        <p klasse="O"><![CDATA[Zum Schluss.]]></p>
      </rede>
    </tagesordnungspunkt>
  </sitzungsverlauf>
  <anlagen/>
</dbtplenarprotokoll>"#;

    #[test]
    fn test_parse_protocol_structure() {
        let protocol = parse_protocol(PROTOCOL).unwrap();

        assert_eq!(protocol.agenda_items.len(), 2);
        assert_eq!(
            protocol.agenda_items[0].id.as_deref(),
            Some("Tagesordnungspunkt 1")
        );
        assert_eq!(protocol.agenda_items[0].speeches.len(), 2);

        let first = &protocol.agenda_items[0].speeches[0];
        assert_eq!(first.id.as_deref(), Some("ID1900100100"));
        assert_eq!(first.speaker.first_name.as_deref(), Some("Jane"));
        assert_eq!(first.speaker.last_name.as_deref(), Some("Doe"));
    }

    #[test]
    fn test_fragments_skip_absent_text() {
        let protocol = parse_protocol(PROTOCOL).unwrap();
        let first = &protocol.agenda_items[0].speeches[0];

        let fragments: Vec<&str> = first.fragments().collect();
        assert_eq!(fragments, vec!["Wir beginnen & enden.", "Danke."]);
    }

    #[test]
    fn test_collect_speech_across_agenda_items() {
        let protocol = parse_protocol(PROTOCOL).unwrap();
        let name = PoliticianName::parse("Jane Doe").unwrap();

        assert_eq!(
            protocol.collect_speech(&name).as_deref(),
            Some("Wir beginnen & enden. Danke. Zum Schluss.")
        );

        let absent = PoliticianName::parse("Erika Mustermann").unwrap();
        assert_eq!(protocol.collect_speech(&absent), None);
    }

    #[test]
    fn test_missing_session_body() {
        let err = parse_protocol("<dbtplenarprotokoll><vorspann/></dbtplenarprotokoll>")
            .unwrap_err();
        assert!(matches!(err, ProtocolError::MissingSessionBody));
    }

    #[test]
    fn test_speech_without_speaker_is_an_error() {
        let xml = r#"<sitzungsverlauf>
            <tagesordnungspunkt>
              <rede><p klasse="O">Anonym.</p></rede>
            </tagesordnungspunkt>
          </sitzungsverlauf>"#;

        let err = parse_protocol(xml).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::MissingSpeaker {
                agenda_item: 0,
                speech: 0
            }
        ));
    }

    #[test]
    fn test_missing_name_field_is_not_an_error() {
        let xml = r#"<sitzungsverlauf><tagesordnungspunkt>
              <rede><p klasse="redner"><redner><name><nachname>Doe</nachname></name></redner></p>
              <p klasse="O">Text.</p></rede>
            </tagesordnungspunkt></sitzungsverlauf>"#;

        let protocol = parse_protocol(xml).unwrap();
        let speaker = &protocol.agenda_items[0].speeches[0].speaker;
        assert_eq!(speaker.first_name, None);
        assert_eq!(speaker.last_name.as_deref(), Some("Doe"));
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        let err = parse_protocol("<sitzungsverlauf><rede></sitzungsverlauf>").unwrap_err();
        assert!(matches!(err, ProtocolError::Xml(_)));
    }

    #[test]
    fn test_element_string_semantics() {
        let root = parse_document("<a><b>x</b><c><d>y</d></c><e/><f>1<g/>2</f></a>").unwrap();
        let a = root.find("a").unwrap();
        assert_eq!(a.find("b").unwrap().string().as_deref(), Some("x"));
        assert_eq!(a.find("c").unwrap().string().as_deref(), Some("y"));
        assert_eq!(a.find("e").unwrap().string(), None);
        assert_eq!(a.find("f").unwrap().string(), None);
        assert_eq!(a.find("f").unwrap().text(), "12");
    }
}
