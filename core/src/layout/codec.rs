//! Layout codec: tmux layout text to `LayoutNode` and back.
//!
//! The grammar is the one tmux prints for `#{window_layout}`:
//!
//! ```text
//! LAYOUT := CHECKSUM "," NODE
//! NODE   := W "x" H "," X "," Y ( "," PANE | "{" NODE ("," NODE)* "}" | "[" NODE ("," NODE)* "]" )
//! ```
//!
//! The checksum is never validated on decode; `encode` always recomputes it
//! because tmux rejects a layout whose checksum does not match its body.

use std::fmt::Write;

use crate::error::{Result, ZoomError};
use crate::layout::node::{LayoutNode, NodeKind};


/// Parse a full layout string, checksum included.
pub fn decode(text: &str) -> Result<LayoutNode> {
    let text = text.trim();
    let comma = text
        .find(',')
        .ok_or_else(|| ZoomError::malformed(0, "no checksum separator"))?;
    let mut parser = Parser {
        src: text.as_bytes(),
        pos: comma + 1,
    };
    let node = parser.node()?;
    if parser.pos != parser.src.len() {
        return Err(parser.error("trailing characters after layout"));
    }
    Ok(node)
}


/// Serialize a tree, prefixed with the checksum of its body.
pub fn encode(node: &LayoutNode) -> String {
    let mut body = String::new();
    write_node(node, &mut body);
    format!("{},{}", checksum(&body), body)
}


/// tmux layout checksum: rotate a 16-bit accumulator right by one bit, then
/// add the next byte, for every byte of the body.
pub fn checksum(body: &str) -> String {
    let sum = body
        .bytes()
        .fold(0u16, |acc, b| acc.rotate_right(1).wrapping_add(u16::from(b)));
    format!("{:04x}", sum)
}


fn write_node(node: &LayoutNode, out: &mut String) {
    // Writing into a String cannot fail.
    let _ = write!(out, "{}x{},{},{}", node.width, node.height, node.x, node.y);
    match &node.kind {
        NodeKind::Leaf(pane) => {
            let _ = write!(out, ",{}", pane);
        }
        NodeKind::SplitWidth(children) => write_children(children, '{', '}', out),
        NodeKind::SplitHeight(children) => write_children(children, '[', ']', out),
    }
}


fn write_children(children: &[LayoutNode], open: char, close: char, out: &mut String) {
    out.push(open);
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_node(child, out);
    }
    out.push(close);
}


// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

struct Parser<'a> {
    src: &'a [u8],
    pos: usize,
}

impl Parser<'_> {
    fn node(&mut self) -> Result<LayoutNode> {
        let width = self.number("width")?;
        self.expect(b'x')?;
        let height = self.number("height")?;
        self.expect(b',')?;
        let x = self.number("x offset")?;
        self.expect(b',')?;
        let y = self.number("y offset")?;

        let kind = match self.peek() {
            Some(b',') => {
                self.pos += 1;
                NodeKind::Leaf(self.number("pane id")?)
            }
            Some(b'{') => NodeKind::SplitWidth(self.children(b'{', b'}')?),
            Some(b'[') => NodeKind::SplitHeight(self.children(b'[', b']')?),
            Some(c) => {
                return Err(self.error(format!(
                    "unexpected '{}' after node geometry",
                    c as char
                )))
            }
            None => return Err(self.error("layout ends after node geometry")),
        };

        Ok(LayoutNode {
            width,
            height,
            x,
            y,
            kind,
        })
    }

    /// Parse `open NODE ("," NODE)* close`, positioned on `open`.
    fn children(&mut self, open: u8, close: u8) -> Result<Vec<LayoutNode>> {
        let start = self.pos;
        self.pos += 1;
        let mut children = vec![self.node()?];
        loop {
            match self.peek() {
                Some(b',') => {
                    self.pos += 1;
                    children.push(self.node()?);
                }
                Some(c) if c == close => {
                    self.pos += 1;
                    return Ok(children);
                }
                Some(c) => {
                    return Err(self.error(format!(
                        "expected ',' or '{}', found '{}'",
                        close as char, c as char
                    )))
                }
                None => {
                    return Err(ZoomError::malformed(
                        start,
                        format!("unmatched '{}'", open as char),
                    ))
                }
            }
        }
    }

    fn number(&mut self, what: &str) -> Result<u32> {
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        std::str::from_utf8(&self.src[start..self.pos])
            .ok()
            .and_then(|digits| digits.parse::<u32>().ok())
            .ok_or_else(|| ZoomError::malformed(start, format!("invalid {}", what)))
    }

    fn expect(&mut self, byte: u8) -> Result<()> {
        match self.peek() {
            Some(c) if c == byte => {
                self.pos += 1;
                Ok(())
            }
            Some(c) => Err(self.error(format!(
                "expected '{}', found '{}'",
                byte as char, c as char
            ))),
            None => Err(self.error(format!("expected '{}', found end of layout", byte as char))),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn error(&self, reason: impl Into<String>) -> ZoomError {
        ZoomError::malformed(self.pos, reason)
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::node::Axis;

    const FOUR_PANES: &str =
        "b2d9,255x61,0,0{84x61,0,0[84x30,0,0,26,84x30,0,31,41],85x61,85,0,36,84x61,171,0,42}";

    fn is_malformed(text: &str) -> bool {
        matches!(decode(text), Err(ZoomError::MalformedLayout { .. }))
    }

    #[test]
    fn decodes_single_pane() {
        let node = decode("1234,100x50,0,0,1").unwrap();
        assert_eq!(node, LayoutNode::leaf(100, 50, 0, 0, 1));
    }

    #[test]
    fn decodes_nested_layout() {
        let root = decode(FOUR_PANES).unwrap();
        assert_eq!((root.width, root.height), (255, 61));
        assert_eq!(root.split_axis(), Some(Axis::Width));
        assert_eq!(root.children().len(), 3);

        let col0 = &root.children()[0];
        assert_eq!(col0.width, 84);
        assert_eq!(col0.split_axis(), Some(Axis::Height));
        assert_eq!(col0.children()[0].pane(), Some(26));
        assert_eq!(col0.children()[1].pane(), Some(41));
        assert_eq!(col0.children()[1].y, 31);

        let widths: Vec<u32> = root.children().iter().map(|c| c.width).collect();
        assert_eq!(widths, vec![84, 85, 84]);
        assert_eq!(root.children()[1].pane(), Some(36));
        assert_eq!(root.children()[2].pane(), Some(42));
        assert_eq!(root.children()[2].x, 171);
    }

    #[test]
    fn counts_panes_in_known_layouts() {
        assert_eq!(decode("1234,100x50,0,0,1").unwrap().count_leaves(), 1);
        assert_eq!(
            decode("1234,199x53,0,0{99x53,0,0,1,99x53,100,0,2}")
                .unwrap()
                .count_leaves(),
            2
        );
        assert_eq!(
            decode("1234,100x100,0,0[100x49,0,0,1,100x49,0,50,2]")
                .unwrap()
                .count_leaves(),
            2
        );
        assert_eq!(decode(FOUR_PANES).unwrap().count_leaves(), 4);
    }

    #[test]
    fn encode_reproduces_tmux_output() {
        // The checksum in FOUR_PANES was produced by tmux itself.
        let node = decode(FOUR_PANES).unwrap();
        assert_eq!(encode(&node), FOUR_PANES);
    }

    #[test]
    fn encode_recomputes_stale_checksum() {
        let node = decode("0000,199x53,0,0{99x53,0,0,1,99x53,100,0,2}").unwrap();
        let text = encode(&node);
        assert_eq!(text, "d751,199x53,0,0{99x53,0,0,1,99x53,100,0,2}");
        assert_eq!(decode(&text).unwrap(), node);
    }

    #[test]
    fn checksum_matches_tmux() {
        assert_eq!(checksum("100x50,0,0,1"), "ac7e");
        assert_eq!(checksum(""), "0000");
    }

    #[test]
    fn decode_trims_surrounding_whitespace() {
        assert!(decode("  1234,100x50,0,0,1\n").is_ok());
    }

    #[test]
    fn rejects_missing_checksum_separator() {
        assert!(is_malformed("100x50"));
        assert!(is_malformed(""));
    }

    #[test]
    fn rejects_bad_numbers() {
        assert!(is_malformed("1234,abcx50,0,0,1"));
        assert!(is_malformed("1234,100x,0,0,1"));
        assert!(is_malformed("1234,100x50,0,0,"));
        assert!(is_malformed("1234,100x50,0,0,99999999999"));
    }

    #[test]
    fn rejects_unmatched_brackets() {
        assert!(is_malformed("1234,199x53,0,0{99x53,0,0,1,99x53,100,0,2"));
        assert!(is_malformed("1234,199x53,0,0{99x53,0,0,1,99x53,100,0,2]"));
        assert!(is_malformed("1234,199x53,0,0[99x53,0,0,1}"));
    }

    #[test]
    fn rejects_unexpected_characters() {
        assert!(is_malformed("1234,100x50,0,0;1"));
        assert!(is_malformed("1234,100x50,0,0"));
        assert!(is_malformed("1234,100x50,0,0,1}"));
        assert!(is_malformed("1234,199x53,0,0{}"));
    }

    #[test]
    fn error_reports_offset() {
        match decode("1234,100x50,0,0;1") {
            Err(ZoomError::MalformedLayout { offset, .. }) => assert_eq!(offset, 15),
            other => panic!("expected MalformedLayout, got {:?}", other),
        }
    }
}
