//! # Artwork Documents
//!
//! A read-only element tree loaded from SVG-like markup, and the shape
//! collector that flattens it into polylines.
//!
//! Only four element kinds matter:
//!
//! | Markup | Kind | Geometry attribute |
//! |--------|------|--------------------|
//! | `<path>` | [`ElementKind::Path`] | `d` |
//! | `<polygon>` | [`ElementKind::Polygon`] | `points` |
//! | `<polyline>` | [`ElementKind::Polyline`] | `points` |
//! | `<g>`, `<svg>` | [`ElementKind::Group`] | children |
//!
//! Everything else is kept as [`ElementKind::Other`] and ignored by the
//! collector. `transform` attributes are not applied.
//!
//! ## Example
//!
//! ```
//! use plotline::document::{CollectOptions, parse_document};
//!
//! let svg = r#"<svg><g><path d="M0,0 L10,0 L10,10 Z"/></g></svg>"#;
//! let collected = parse_document(svg, &CollectOptions::default())?;
//! assert_eq!(collected.paths.len(), 1);
//! # Ok::<(), plotline::PlotlineError>(())
//! ```

pub mod collect;

pub use collect::{CollectOptions, Collected, Diagnostic, collect};

use crate::error::PlotlineError;

/// Element kinds the collector understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Path,
    Polygon,
    Polyline,
    Group,
    Other,
}

impl ElementKind {
    /// Classify a local tag name.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "path" => Self::Path,
            "polygon" => Self::Polygon,
            "polyline" => Self::Polyline,
            "g" | "svg" | "group" => Self::Group,
            _ => Self::Other,
        }
    }
}

/// Read-only view of a tree node.
///
/// The collector is written against this trait only, so any tree that
/// can report a kind, attributes and children can be collected.
pub trait DocNode: Sized {
    fn kind(&self) -> ElementKind;

    fn attribute(&self, name: &str) -> Option<&str>;

    fn children(&self) -> &[Self];

    /// Short label used in diagnostics.
    fn label(&self) -> String;
}

/// An owned element.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub kind: ElementKind,
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(name: &str) -> Self {
        Self {
            kind: ElementKind::from_tag(name),
            name: name.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }
}

impl DocNode for Element {
    fn kind(&self) -> ElementKind {
        self.kind
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn children(&self) -> &[Self] {
        &self.children
    }

    fn label(&self) -> String {
        match self.attribute("id") {
            Some(id) => format!("<{} id=\"{}\">", self.name, id),
            None => format!("<{}>", self.name),
        }
    }
}

/// A loaded document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub root: Element,
}

impl Document {
    /// Parse markup into an owned element tree.
    pub fn parse(markup: &str) -> Result<Self, PlotlineError> {
        let options = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        };
        let doc = roxmltree::Document::parse_with_options(markup, options)
            .map_err(|e| PlotlineError::Document(e.to_string()))?;
        Ok(Self {
            root: convert(doc.root_element()),
        })
    }
}

fn convert(node: roxmltree::Node<'_, '_>) -> Element {
    let name = node.tag_name().name();
    Element {
        kind: ElementKind::from_tag(name),
        name: name.to_string(),
        attributes: node
            .attributes()
            .map(|a| (a.name().to_string(), a.value().to_string()))
            .collect(),
        children: node
            .children()
            .filter(|n| n.is_element())
            .map(convert)
            .collect(),
    }
}

/// Load markup and collect every shape in it.
#[tracing::instrument(skip_all, fields(bytes = markup.len()))]
pub fn parse_document(markup: &str, options: &CollectOptions) -> Result<Collected, PlotlineError> {
    let doc = Document::parse(markup)?;
    Ok(collect(&doc.root, options))
}
