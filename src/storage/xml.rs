//! XML codec for session files.
//!
//! A session file is a single `<TestingSession>` element holding one child
//! element per field, indented by two spaces:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <TestingSession>
//!   <Start>2024-06-15 14:00:00</Start>
//!   ...
//!   <Area></Area>
//! </TestingSession>
//! ```
//!
//! Field text is escaped on write and unescaped on read, so any string
//! survives a round trip. Carriage returns are written as `&#13;` because XML
//! readers normalise literal line endings.

use std::borrow::Cow;
use std::collections::HashSet;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::escape::{escape, unescape};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::core::{Session, SessionField};
use crate::{SessionError, SessionResult};

/// Root element of every session file.
pub const ROOT_ELEMENT: &str = "TestingSession";

const INDENT_WIDTH: usize = 2;

fn serialize_error(e: impl std::fmt::Display) -> SessionError {
    SessionError::Serialize(e.to_string())
}

fn escape_text(value: &str) -> Cow<'_, str> {
    let escaped = escape(value);
    if escaped.contains('\r') {
        Cow::Owned(escaped.replace('\r', "&#13;"))
    } else {
        escaped
    }
}

/// Serialize a session to an indented XML document.
pub fn to_xml(session: &Session) -> SessionResult<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT_WIDTH);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(serialize_error)?;
    writer
        .write_event(Event::Start(BytesStart::new(ROOT_ELEMENT)))
        .map_err(serialize_error)?;

    for field in SessionField::STORAGE_ORDER {
        let value = escape_text(session.get(field));
        writer
            .write_event(Event::Start(BytesStart::new(field.tag())))
            .map_err(serialize_error)?;
        writer
            .write_event(Event::Text(BytesText::from_escaped(value)))
            .map_err(serialize_error)?;
        writer
            .write_event(Event::End(BytesEnd::new(field.tag())))
            .map_err(serialize_error)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new(ROOT_ELEMENT)))
        .map_err(serialize_error)?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes).map_err(serialize_error)
}

/// Parse a session document.
///
/// Fields are taken from the children of the `<TestingSession>` root by exact
/// tag name. A missing child leaves that field empty; if a tag repeats, the
/// first occurrence wins. Text of nested markup inside a field is kept, the
/// markup itself is dropped. `source` is only used in error messages.
pub fn from_xml(xml: &str, source: &Path) -> SessionResult<Session> {
    let mut reader = Reader::from_str(xml);
    let mut session = Session::default();
    let mut seen: HashSet<SessionField> = HashSet::new();
    let mut open: Vec<String> = Vec::new();
    let mut current: Option<(SessionField, String)> = None;
    let mut saw_root = false;

    loop {
        let event = reader.read_event().map_err(|e| {
            SessionError::parse(source, format!("at byte {}: {e}", reader.error_position()))
        })?;

        match event {
            Event::Start(e) => {
                check_attributes(&e, source)?;
                let name = decode(&reader, e.name().as_ref(), source)?.into_owned();
                if open.is_empty() {
                    if saw_root {
                        return Err(SessionError::parse(source, "more than one root element"));
                    }
                    saw_root = true;
                }
                if open.len() == 1 && open[0] == ROOT_ELEMENT {
                    current = SessionField::from_tag(&name)
                        .filter(|field| !seen.contains(field))
                        .map(|field| (field, String::new()));
                }
                open.push(name);
            }
            Event::Empty(e) => {
                check_attributes(&e, source)?;
                if open.is_empty() {
                    if saw_root {
                        return Err(SessionError::parse(source, "more than one root element"));
                    }
                    saw_root = true;
                } else if open.len() == 1 && open[0] == ROOT_ELEMENT {
                    let name = decode(&reader, e.name().as_ref(), source)?.into_owned();
                    if let Some(field) = SessionField::from_tag(&name) {
                        seen.insert(field);
                    }
                }
            }
            Event::End(_) => {
                open.pop();
                if open.len() == 1 {
                    if let Some((field, text)) = current.take() {
                        session.set(field, text);
                        seen.insert(field);
                    }
                }
            }
            Event::Text(e) => {
                let raw = decode(&reader, &e, source)?;
                if open.is_empty() {
                    if !raw.trim().is_empty() {
                        return Err(SessionError::parse(source, "text outside the root element"));
                    }
                } else if let Some((_, text)) = current.as_mut() {
                    let normalized = normalize_line_endings(&raw);
                    let unescaped = unescape(&normalized)
                        .map_err(|err| SessionError::parse(source, err.to_string()))?;
                    text.push_str(&unescaped);
                }
            }
            Event::CData(e) => {
                if open.is_empty() {
                    return Err(SessionError::parse(source, "CDATA outside the root element"));
                }
                if let Some((_, text)) = current.as_mut() {
                    let raw = decode(&reader, &e, source)?;
                    text.push_str(&normalize_line_endings(&raw));
                }
            }
            Event::GeneralRef(e) => {
                if open.is_empty() {
                    return Err(SessionError::parse(source, "reference outside the root element"));
                }
                if let Some((_, text)) = current.as_mut() {
                    let name = decode(&reader, &e, source)?;
                    let reference = format!("&{name};");
                    let resolved = unescape(&reference)
                        .map_err(|err| SessionError::parse(source, err.to_string()))?;
                    text.push_str(&resolved);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_root {
        return Err(SessionError::parse(source, "document has no root element"));
    }
    if let Some(unclosed) = open.last() {
        return Err(SessionError::parse(
            source,
            format!("unexpected end of document inside <{unclosed}>"),
        ));
    }

    Ok(session)
}

/// Attribute syntax is checked even though no attribute is used: a bare name
/// or a repeated attribute makes the document malformed.
fn check_attributes(start: &BytesStart<'_>, source: &Path) -> SessionResult<()> {
    for attr in start.attributes() {
        attr.map_err(|e| SessionError::parse(source, e.to_string()))?;
    }
    Ok(())
}

/// Literal `\r\n` and lone `\r` read as `\n`; a carriage return written as
/// `&#13;` arrives as a reference and is kept.
fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

fn decode<'b>(reader: &Reader<&[u8]>, bytes: &'b [u8], source: &Path) -> SessionResult<Cow<'b, str>> {
    reader
        .decoder()
        .decode(bytes)
        .map_err(|e| SessionError::parse(source, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_session() -> Session {
        Session {
            start: "2024-06-15 14:00:00".to_string(),
            end: "2024-06-15 15:03:00".to_string(),
            duration: "63 min(s)".to_string(),
            tester: "Some dude..".to_string(),
            mission: "Do stuff..".to_string(),
            tasks: "blah...".to_string(),
            data: "blah 2...".to_string(),
            notes: "blah 3...".to_string(),
            issues: "Issues..".to_string(),
            bugs: "blah 4...".to_string(),
            environment: "linux".to_string(),
            area: "checkout".to_string(),
        }
    }

    #[test]
    fn test_fields_written_in_storage_order() {
        let xml = to_xml(&sample_session()).unwrap();
        let mut last = 0;
        for field in SessionField::STORAGE_ORDER {
            let pos = xml
                .find(&format!("<{}>", field.tag()))
                .unwrap_or_else(|| panic!("missing <{}>", field.tag()));
            assert!(pos >= last, "<{}> out of order", field.tag());
            last = pos;
        }
    }

    #[test]
    fn test_output_is_indented() {
        let xml = to_xml(&sample_session()).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("\n<TestingSession>\n  <Start>2024-06-15 14:00:00</Start>\n"));
        assert!(xml.ends_with("</TestingSession>\n"));
    }

    #[test]
    fn test_markup_characters_are_escaped() {
        let session = Session {
            bugs: "<CPU is at 83%>".to_string(),
            ..Session::default()
        };
        let xml = to_xml(&session).unwrap();
        assert!(xml.contains("<Bugs>&lt;CPU is at 83%&gt;</Bugs>"));
    }

    #[test]
    fn test_round_trip_preserves_awkward_text() {
        let session = Session {
            notes: "a < b && c > d\n\"quoted\" and 'single'\n</Notes><Bugs>nope</Bugs>\n".to_string(),
            issues: "  leading and trailing spaces  ".to_string(),
            data: "windows\r\nline endings\r\n".to_string(),
            tasks: "tab\tseparated &amp; literal entity text".to_string(),
            tester: "Zoë Ünïcode 测试".to_string(),
            ..sample_session()
        };
        let xml = to_xml(&session).unwrap();
        let loaded = from_xml(&xml, Path::new("mem.xml")).unwrap();
        assert_eq!(loaded, session);
    }

    #[test]
    fn test_missing_fields_load_as_empty() {
        let xml = "<TestingSession><Tester>ann</Tester><Bugs>one</Bugs></TestingSession>";
        let session = from_xml(xml, Path::new("partial.xml")).unwrap();
        assert_eq!(session.tester, "ann");
        assert_eq!(session.bugs, "one");
        assert_eq!(session.mission, "");
        assert_eq!(session.area, "");
    }

    #[test]
    fn test_empty_elements_and_unknown_tags() {
        let xml = "<TestingSession><Start/><Colour>red</Colour><End>later</End></TestingSession>";
        let session = from_xml(xml, Path::new("extra.xml")).unwrap();
        assert_eq!(session.start, "");
        assert_eq!(session.end, "later");
    }

    #[test]
    fn test_first_duplicate_tag_wins() {
        let xml = "<TestingSession><Notes>first</Notes><Notes>second</Notes></TestingSession>";
        let session = from_xml(xml, Path::new("dup.xml")).unwrap();
        assert_eq!(session.notes, "first");
    }

    #[test]
    fn test_nested_markup_keeps_text() {
        let xml = "<TestingSession><Notes>see <b>this</b> now</Notes></TestingSession>";
        let session = from_xml(xml, Path::new("nested.xml")).unwrap();
        assert_eq!(session.notes, "see this now");
    }

    #[test]
    fn test_cdata_is_taken_literally() {
        let xml = "<TestingSession><Bugs><![CDATA[<raw & unescaped>]]></Bugs></TestingSession>";
        let session = from_xml(xml, Path::new("cdata.xml")).unwrap();
        assert_eq!(session.bugs, "<raw & unescaped>");
    }

    #[test]
    fn test_malformed_documents_are_parse_failures() {
        for xml in [
            "",
            "just text",
            "<TestingSession><Start>x</End></TestingSession>",
            "<TestingSession><Start>x</Start>",
            "<TestingSession/><TestingSession/>",
            "<TestingSession foo></TestingSession>",
            "<TestingSession/>junk text",
            "junk<TestingSession/>",
            "<TestingSession><Bugs a=\"1\" a=\"2\">x</Bugs></TestingSession>",
        ] {
            let err = from_xml(xml, Path::new("bad.xml")).unwrap_err();
            assert!(
                matches!(err, SessionError::Parse { .. }),
                "expected parse failure for {xml:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_literal_line_endings_are_normalized() {
        let xml = "<TestingSession>\r\n  <Notes>line1\r\nline2\rline3</Notes>\r\n</TestingSession>\r\n";
        let session = from_xml(xml, Path::new("crlf.xml")).unwrap();
        assert_eq!(session.notes, "line1\nline2\nline3");
    }

    #[test]
    fn test_character_reference_keeps_carriage_return() {
        let xml = "<TestingSession><Data>a&#13;\nb</Data></TestingSession>";
        let session = from_xml(xml, Path::new("cr.xml")).unwrap();
        assert_eq!(session.data, "a\r\nb");
    }

    #[test]
    fn test_whitespace_around_root_is_allowed() {
        let xml = "\n  <TestingSession><Tester>ann</Tester></TestingSession>\n\n";
        let session = from_xml(xml, Path::new("ws.xml")).unwrap();
        assert_eq!(session.tester, "ann");
    }
}
