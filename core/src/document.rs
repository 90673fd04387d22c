//! The **document loader**.
//!
//! Reads a scan report into an owned tree of [`Node`]s. The whole document is
//! held in memory; a load either yields a complete tree or an error, never a
//! partial one.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use scansheet_common::columns::HOST_TAG;
use scansheet_common::error::{Error, Result};
use tracing::debug;

/// One element of the document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
    /// Text placed directly inside this element, one run per gap between
    /// children. Each run carries the number of child elements before it.
    ///
    /// Whitespace that only separates child elements is not kept.
    pub text: Vec<(usize, String)>,
}

impl Node {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Text of this element and all of its descendants, in document order.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        let mut runs = self.text.iter().peekable();
        for (index, child) in self.children.iter().enumerate() {
            while let Some((_, text)) = runs.next_if(|(at, _)| *at <= index) {
                out.push_str(text);
            }
            child.collect_text(out);
        }
        for (_, text) in runs {
            out.push_str(text);
        }
    }

    /// Every element below this one, depth-first, in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// First descendant named `tag`.
    pub fn find(&self, tag: &str) -> Option<&Node> {
        self.descendants().find(|node| node.tag == tag)
    }
}

/// Pre-order iterator over the descendants of a [`Node`].
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// A parsed scan report.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Node,
}

impl Document {
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Every host element of the report, in document order.
    pub fn hosts(&self) -> impl Iterator<Item = &Node> {
        std::iter::once(&self.root)
            .chain(self.root.descendants())
            .filter(|node| node.tag == HOST_TAG)
    }
}

/// Reads and parses the document at `path`.
pub fn load(path: &Path) -> Result<Document> {
    let raw = fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::SourceNotFound {
            path: path.to_path_buf(),
        },
        _ => Error::SourceRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
    })?;

    debug!(bytes = raw.len(), path = %path.display(), "document read");
    parse_bytes(&raw, path)
}

/// Parses raw bytes. `origin` only names the document in errors.
pub fn parse_bytes(raw: &[u8], origin: &Path) -> Result<Document> {
    let content = std::str::from_utf8(raw).map_err(|e| Error::DocumentParse {
        path: origin.to_path_buf(),
        position: e.valid_up_to() as u64,
        reason: "document is not valid UTF-8".to_string(),
    })?;
    parse_str(content, origin)
}

pub fn parse_str(content: &str, origin: &Path) -> Result<Document> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    TreeBuilder::new(origin).build(content)
}

struct TreeBuilder<'p> {
    origin: &'p Path,
    stack: Vec<Node>,
    root: Option<Node>,
}

impl<'p> TreeBuilder<'p> {
    fn new(origin: &'p Path) -> Self {
        Self {
            origin,
            stack: Vec::new(),
            root: None,
        }
    }

    fn build(mut self, content: &str) -> Result<Document> {
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(false);

        loop {
            let position = reader.buffer_position() as u64;
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(e) => return Err(self.fail(reader.error_position() as u64, e)),
            };

            match event {
                Event::Start(start) => {
                    let node = self.open(&start, position)?;
                    self.stack.push(node);
                }
                Event::Empty(start) => {
                    let node = self.open(&start, position)?;
                    self.close(node, position)?;
                }
                Event::End(_) => {
                    let node = self.stack.pop().ok_or_else(|| {
                        self.fail(position, "closing tag without a matching opening tag")
                    })?;
                    self.close(node, position)?;
                }
                Event::Text(text) => {
                    let text = text.unescape().map_err(|e| self.fail(position, e))?;
                    self.push_text(&text, position)?;
                }
                Event::CData(data) => {
                    let text = String::from_utf8_lossy(&data.into_inner()).into_owned();
                    self.push_text(&text, position)?;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = self.stack.last() {
            let reason = format!("element <{}> is never closed", open.tag);
            return Err(self.fail(content.len() as u64, reason));
        }

        match self.root.take() {
            Some(root) => Ok(Document { root }),
            None => Err(self.fail(0, "document has no root element")),
        }
    }

    fn open(&self, start: &BytesStart<'_>, position: u64) -> Result<Node> {
        if self.stack.is_empty() && self.root.is_some() {
            return Err(self.fail(position, "document has more than one root element"));
        }

        let mut node = Node::new(String::from_utf8_lossy(start.name().as_ref()));
        for attr in start.attributes() {
            let attr = attr.map_err(|e| self.fail(position, e))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| self.fail(position, e))?
                .into_owned();
            node.attributes.push((key, value));
        }
        Ok(node)
    }

    fn close(&mut self, node: Node, position: u64) -> Result<()> {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None if self.root.is_some() => {
                return Err(self.fail(position, "document has more than one root element"));
            }
            None => self.root = Some(node),
        }
        Ok(())
    }

    fn push_text(&mut self, text: &str, position: u64) -> Result<()> {
        if text.trim().is_empty() {
            return Ok(());
        }
        match self.stack.last_mut() {
            Some(node) => {
                let at = node.children.len();
                match node.text.last_mut() {
                    Some((last, run)) if *last == at => run.push_str(text),
                    _ => node.text.push((at, text.to_string())),
                }
                Ok(())
            }
            None => Err(self.fail(position, "text outside of the root element")),
        }
    }

    fn fail(&self, position: u64, reason: impl ToString) -> Error {
        Error::DocumentParse {
            path: self.origin.to_path_buf(),
            position,
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<Document> {
        parse_str(content, Path::new("test.nessus"))
    }

    #[test]
    fn builds_nested_tree_with_attributes_and_text() {
        let doc = parse(
            r#"<?xml version="1.0"?>
            <NessusClientData_v2>
              <Report name="weekly">
                <ReportHost name="10.0.0.5">
                  <ReportItem port="22"><cvss_base_score>7.5</cvss_base_score></ReportItem>
                </ReportHost>
              </Report>
            </NessusClientData_v2>"#,
        )
        .unwrap();

        let root = doc.root();
        assert_eq!(root.tag, "NessusClientData_v2");
        assert_eq!(root.children.len(), 1);
        assert!(root.text.is_empty());

        let host = doc.hosts().next().unwrap();
        assert_eq!(host.attr("name"), Some("10.0.0.5"));
        assert_eq!(host.find("cvss_base_score").unwrap().text(), "7.5");
        assert_eq!(host.find("ReportItem").unwrap().attr("port"), Some("22"));
    }

    #[test]
    fn unescapes_entities_and_keeps_cdata() {
        let doc = parse("<a><b>x &amp; y</b><c><![CDATA[<raw>]]></c></a>").unwrap();
        assert_eq!(doc.root().find("b").unwrap().text(), "x & y");
        assert_eq!(doc.root().find("c").unwrap().text(), "<raw>");
    }

    #[test]
    fn text_concatenates_descendants_in_order() {
        let doc = parse("<a><b>one</b><c><d>two</d></c><e/></a>").unwrap();
        assert_eq!(doc.root().text(), "onetwo");
        assert_eq!(doc.root().find("e").unwrap().text(), "");
    }

    #[test]
    fn mixed_content_keeps_document_order() {
        let doc = parse("<description>before <b>bold</b> after</description>").unwrap();
        assert_eq!(doc.root().text(), "before bold after");
        assert_eq!(
            doc.root().text,
            [(0, "before ".to_string()), (1, " after".to_string())]
        );
    }

    #[test]
    fn text_between_siblings_stays_between_them() {
        let doc = parse("<p><a>1</a>-<b>2</b><![CDATA[+]]>3<c>4</c></p>").unwrap();
        assert_eq!(doc.root().text(), "1-2+34");
    }

    #[test]
    fn descendants_are_pre_order() {
        let doc = parse("<r><a><b/></a><c/></r>").unwrap();
        let tags: Vec<&str> = doc.root().descendants().map(|n| n.tag.as_str()).collect();
        assert_eq!(tags, ["a", "b", "c"]);
    }

    #[test]
    fn hosts_are_found_at_any_depth() {
        let doc = parse(
            "<r><ReportHost name='a'/><x><ReportHost name='b'/></x><ReportHost/></r>",
        )
        .unwrap();
        let names: Vec<Option<&str>> = doc.hosts().map(|h| h.attr("name")).collect();
        assert_eq!(names, [Some("a"), Some("b"), None]);
    }

    #[test]
    fn malformed_documents_are_rejected() {
        for broken in [
            "<a><b></a>",
            "<a><b>",
            "</a>",
            "",
            "just text",
            "<a/><b/>",
        ] {
            let err = parse(broken).unwrap_err();
            assert!(
                matches!(err, Error::DocumentParse { .. }),
                "{broken:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn rejects_invalid_utf8() {
        let err = parse_bytes(b"<a>\xff</a>", Path::new("bad.nessus")).unwrap_err();
        assert!(matches!(err, Error::DocumentParse { position: 3, .. }));
    }

    #[test]
    fn missing_file_is_source_not_found() {
        let err = load(Path::new("/definitely/not/here.nessus")).unwrap_err();
        assert!(matches!(err, Error::SourceNotFound { .. }));
    }
}
