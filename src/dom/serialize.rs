//! HTML fragment serialization for the arena DOM.
//!
//! Follows the browser `innerHTML` rules so a fragment that went through
//! parse and serialize reads the way an editor expects: void elements have no
//! end tag, raw-text elements are written verbatim, everything else is
//! escaped minimally.

use super::arena::{ArenaDom, NodeData, NodeId};

/// Serialize the children of `parent`.
pub fn inner_html(dom: &ArenaDom, parent: NodeId) -> String {
    let mut out = String::new();
    let raw = dom
        .element_name(parent)
        .is_some_and(|name| is_raw_text(name.as_ref()));
    for child in dom.children(parent) {
        write_node(dom, child, raw, &mut out);
    }
    out
}

/// Serialize `id` itself, including its own start and end tags.
pub fn outer_html(dom: &ArenaDom, id: NodeId) -> String {
    let mut out = String::new();
    write_node(dom, id, false, &mut out);
    out
}

fn write_node(dom: &ArenaDom, id: NodeId, raw_parent: bool, out: &mut String) {
    let Some(node) = dom.get(id) else {
        return;
    };
    match &node.data {
        NodeData::Element { name, attrs } => {
            let tag = name.local.as_ref();
            out.push('<');
            out.push_str(tag);
            for attr in attrs {
                out.push(' ');
                if let Some(prefix) = &attr.name.prefix {
                    out.push_str(prefix.as_ref());
                    out.push(':');
                }
                out.push_str(attr.name.local.as_ref());
                out.push_str("=\"");
                out.push_str(&escape_attr(&attr.value));
                out.push('"');
            }
            out.push('>');
            if is_void(tag) {
                return;
            }
            let raw = is_raw_text(tag);
            for child in dom.children(id) {
                write_node(dom, child, raw, out);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
        NodeData::Text(text) if raw_parent => out.push_str(text),
        NodeData::Text(text) => out.push_str(&escape_text(text)),
        NodeData::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        NodeData::Doctype { name } => {
            out.push_str("<!DOCTYPE ");
            out.push_str(name);
            out.push('>');
        }
        NodeData::Document => {
            for child in dom.children(id) {
                write_node(dom, child, false, out);
            }
        }
    }
}

/// Elements that never have an end tag.
fn is_void(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "basefont"
            | "bgsound"
            | "br"
            | "col"
            | "embed"
            | "frame"
            | "hr"
            | "img"
            | "input"
            | "keygen"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Elements whose text children are written without escaping.
fn is_raw_text(tag: &str) -> bool {
    matches!(
        tag,
        "style" | "script" | "xmp" | "iframe" | "noembed" | "noframes" | "plaintext"
    )
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('\u{a0}', "&nbsp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('\u{a0}', "&nbsp;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a < b & c > d"), "a &lt; b &amp; c &gt; d");
        assert_eq!(escape_text("x\u{a0}y"), "x&nbsp;y");
        assert_eq!(escape_text("\"quoted\""), "\"quoted\"");
    }

    #[test]
    fn test_escape_attr() {
        assert_eq!(escape_attr("say \"hi\" & go"), "say &quot;hi&quot; &amp; go");
        assert_eq!(escape_attr("<b>"), "<b>");
    }

    #[test]
    fn test_void_and_raw_sets() {
        assert!(is_void("br"));
        assert!(is_void("img"));
        assert!(!is_void("p"));
        assert!(is_raw_text("style"));
        assert!(!is_raw_text("h2"));
    }
}
