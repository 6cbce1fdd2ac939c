//! Layout documents: a view tree and its relations described in TOML
//!
//! ```toml
//! [[view]]
//! name = "root"
//! frame = [0, 0, 320, 480]
//!
//! [[view]]
//! name = "title"
//! parent = "root"
//! corner_radius = "half_height"
//! relations = [
//!   { attribute = "top", value = 20 },
//!   { attribute = "left", to = "root.left", offset = 16 },
//!   { attribute = "width", to = "root.width", multiplier = 0.5 },
//!   { attribute = "height", value = 30 },
//! ]
//! ```
//!
//! Views are configured in document order, so a view must come after every
//! view it relates to. A `container = true` view should be listed after its
//! subviews; `parent` may name a view declared later.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{DocumentError, Span};
use crate::layout::{
    Anchor, Attribute, Dimension, EdgeInsets, GeometryValue, LayoutConfig, LayoutError, Maker,
    Rect, Sides, ViewId, ViewTree,
};

/// A node with its byte range in the document
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

impl<T> From<toml::Spanned<T>> for Spanned<T> {
    fn from(value: toml::Spanned<T>) -> Self {
        let span = value.span();
        Self::new(value.into_inner(), span)
    }
}

/// Where a relation takes its value from
#[derive(Debug, Clone, PartialEq)]
pub enum RelationSource {
    Value(f64),
    Anchor {
        view: Spanned<String>,
        attribute: Attribute,
    },
}

/// One relation of a view
#[derive(Debug, Clone, PartialEq)]
pub struct RelationSpec {
    pub attribute: Attribute,
    pub source: RelationSource,
    pub multiplier: f64,
    pub offset: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CornerRadius {
    Value(f64),
    ByHalf(Dimension),
}

/// One view of a document
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSpec {
    pub name: Spanned<String>,
    pub parent: Option<Spanned<String>>,
    pub frame: Rect,
    pub relations: Vec<Spanned<RelationSpec>>,
    pub insets: Option<(EdgeInsets, Sides)>,
    pub container: bool,
    pub corner_radius: Option<CornerRadius>,
}

impl ViewSpec {
    fn is_configured(&self) -> bool {
        !self.relations.is_empty()
            || self.insets.is_some()
            || self.container
            || self.corner_radius.is_some()
    }
}

/// A parsed layout document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutDocument {
    pub views: Vec<ViewSpec>,
}

// TOML structure for deserializing documents

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlDocument {
    #[serde(default, rename = "view")]
    views: Vec<TomlView>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlView {
    name: toml::Spanned<String>,
    parent: Option<toml::Spanned<String>>,
    frame: Option<[f64; 4]>,
    #[serde(default)]
    relations: Vec<toml::Spanned<TomlRelation>>,
    insets: Option<TomlInsets>,
    sides: Option<Vec<toml::Spanned<String>>>,
    #[serde(default)]
    container: bool,
    corner_radius: Option<toml::Spanned<TomlRadius>>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlRelation {
    attribute: toml::Spanned<String>,
    value: Option<f64>,
    to: Option<toml::Spanned<String>>,
    multiplier: Option<f64>,
    offset: Option<f64>,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlInsets {
    #[serde(default)]
    top: f64,
    #[serde(default)]
    left: f64,
    #[serde(default)]
    bottom: f64,
    #[serde(default)]
    right: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TomlRadius {
    Value(f64),
    Keyword(String),
}

impl LayoutDocument {
    /// Load a document from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, DocumentError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a document from TOML text
    pub fn parse(content: &str) -> Result<Self, DocumentError> {
        let parsed: TomlDocument = toml::from_str(content)?;
        let views = parsed
            .views
            .into_iter()
            .map(convert_view)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { views })
    }

    /// Build the view tree and resolve every view in document order
    pub fn resolve(&self, config: &LayoutConfig) -> Result<ViewTree, DocumentError> {
        let (mut tree, ids) = self.build_tree()?;

        for (spec, id) in self.views.iter().zip(&ids) {
            if !spec.is_configured() {
                continue;
            }
            let mut maker = Maker::with_config(&mut tree, *id, config.clone());
            if spec.container {
                maker.container();
            }
            if let Some((insets, sides)) = spec.insets {
                maker.edges_with(insets, sides);
            }
            for relation in &spec.relations {
                let value = self.geometry_value(&relation.node, &ids)?;
                declare(&mut maker, relation.node.attribute, value);
            }
            match spec.corner_radius {
                Some(CornerRadius::Value(radius)) => {
                    maker.corner_radius(radius);
                }
                Some(CornerRadius::ByHalf(dimension)) => {
                    maker.corner_radius_by_half(dimension);
                }
                None => {}
            }
            maker.apply().map_err(|error| DocumentError::Layout {
                view: spec.name.node.clone(),
                span: spec.name.span.clone(),
                error,
            })?;
        }
        Ok(tree)
    }

    /// Create one view per spec, attached to its parent
    fn build_tree(&self) -> Result<(ViewTree, Vec<ViewId>), DocumentError> {
        let mut tree = ViewTree::new();
        let mut by_name = HashMap::new();
        let mut ids = Vec::with_capacity(self.views.len());
        for spec in &self.views {
            let id = tree.insert(spec.name.node.clone(), spec.frame);
            if by_name.insert(spec.name.node.as_str(), id).is_some() {
                return Err(DocumentError::DuplicateView {
                    name: spec.name.node.clone(),
                    span: spec.name.span.clone(),
                });
            }
            ids.push(id);
        }

        for (spec, id) in self.views.iter().zip(&ids) {
            let parent = match &spec.parent {
                Some(parent) => Some(self.lookup(parent, &ids)?),
                None => None,
            };
            tree.attach(*id, parent).map_err(|error| match (error, &spec.parent) {
                (LayoutError::CyclicHierarchy { .. }, Some(parent)) => DocumentError::invalid(
                    format!("'{}' would become its own ancestor", spec.name.node),
                    parent.span.clone(),
                ),
                (error, _) => DocumentError::Layout {
                    view: spec.name.node.clone(),
                    span: spec.name.span.clone(),
                    error,
                },
            })?;
        }
        debug!(views = tree.len(), "view tree built");
        Ok((tree, ids))
    }

    fn lookup(&self, name: &Spanned<String>, ids: &[ViewId]) -> Result<ViewId, DocumentError> {
        self.views
            .iter()
            .position(|spec| spec.name.node == name.node)
            .map(|index| ids[index])
            .ok_or_else(|| DocumentError::UnknownView {
                name: name.node.clone(),
                span: name.span.clone(),
                suggestions: find_similar(
                    self.views.iter().map(|spec| spec.name.node.as_str()),
                    &name.node,
                    2,
                ),
            })
    }

    fn geometry_value(
        &self,
        relation: &RelationSpec,
        ids: &[ViewId],
    ) -> Result<GeometryValue, DocumentError> {
        let value = match &relation.source {
            RelationSource::Value(value) => GeometryValue::Absolute(*value),
            RelationSource::Anchor { view, attribute } => {
                Anchor::new(self.lookup(view, ids)?, *attribute).into()
            }
        };
        Ok(value.multiplied(relation.multiplier).offset(relation.offset))
    }
}

fn declare(maker: &mut Maker<'_, ViewTree>, attribute: Attribute, value: GeometryValue) {
    match attribute {
        Attribute::Top => maker.top(value),
        Attribute::Left => maker.left(value),
        Attribute::Bottom => maker.bottom(value),
        Attribute::Right => maker.right(value),
        Attribute::Width => maker.width(value),
        Attribute::Height => maker.height(value),
        Attribute::CenterX => maker.center_x(value),
        Attribute::CenterY => maker.center_y(value),
    };
}

fn convert_view(view: TomlView) -> Result<ViewSpec, DocumentError> {
    let frame = view
        .frame
        .map(|[x, y, width, height]| Rect::new(x, y, width, height))
        .unwrap_or_default();

    let relations = view
        .relations
        .into_iter()
        .map(convert_relation)
        .collect::<Result<Vec<_>, _>>()?;

    let sides = match view.sides {
        Some(names) => names
            .into_iter()
            .map(|name| parse_side(name.into()))
            .collect::<Result<Sides, _>>()?,
        None => Sides::ALL,
    };
    let insets = view.insets.map(|i| {
        (
            EdgeInsets::new(i.top, i.left, i.bottom, i.right),
            sides,
        )
    });

    let corner_radius = view.corner_radius.map(convert_radius).transpose()?;

    Ok(ViewSpec {
        name: view.name.into(),
        parent: view.parent.map(Spanned::from),
        frame,
        relations,
        insets,
        container: view.container,
        corner_radius,
    })
}

fn convert_relation(
    relation: toml::Spanned<TomlRelation>,
) -> Result<Spanned<RelationSpec>, DocumentError> {
    let span = relation.span();
    let relation = relation.into_inner();

    let attribute_name: Spanned<String> = relation.attribute.into();
    let attribute = parse_attribute(&attribute_name)?;

    let source = match (relation.value, relation.to) {
        (Some(value), None) => RelationSource::Value(value),
        (None, Some(to)) => parse_anchor(to.into())?,
        (Some(_), Some(_)) => {
            return Err(DocumentError::invalid(
                "use either 'value' or 'to', not both",
                span,
            ))
        }
        (None, None) => {
            return Err(DocumentError::invalid(
                "relation needs a 'value' or a 'to'",
                span,
            ))
        }
    };

    Ok(Spanned::new(
        RelationSpec {
            attribute,
            source,
            multiplier: relation.multiplier.unwrap_or(1.0),
            offset: relation.offset.unwrap_or(0.0),
        },
        span,
    ))
}

/// Parse `"view.attribute"`
fn parse_anchor(to: Spanned<String>) -> Result<RelationSource, DocumentError> {
    let Some((view, attribute)) = to.node.rsplit_once('.') else {
        return Err(DocumentError::invalid(
            format!("'{}' is not of the form <view>.<attribute>", to.node),
            to.span,
        ));
    };
    let attribute = parse_attribute(&Spanned::new(attribute.to_string(), to.span.clone()))?;
    Ok(RelationSource::Anchor {
        view: Spanned::new(view.to_string(), to.span),
        attribute,
    })
}

fn parse_attribute(name: &Spanned<String>) -> Result<Attribute, DocumentError> {
    name.node
        .parse()
        .map_err(|unknown| DocumentError::UnknownAttribute {
            name: unknown,
            span: name.span.clone(),
        })
}

fn parse_side(name: Spanned<String>) -> Result<Sides, DocumentError> {
    match name.node.as_str() {
        "top" => Ok(Sides::TOP),
        "bottom" => Ok(Sides::BOTTOM),
        "left" => Ok(Sides::LEFT),
        "right" => Ok(Sides::RIGHT),
        "vertical" => Ok(Sides::VERTICAL),
        "horizontal" => Ok(Sides::HORIZONTAL),
        "all" => Ok(Sides::ALL),
        _ => Err(DocumentError::invalid(
            format!("unknown side '{}'", name.node),
            name.span,
        )),
    }
}

fn convert_radius(radius: toml::Spanned<TomlRadius>) -> Result<CornerRadius, DocumentError> {
    let span = radius.span();
    match radius.into_inner() {
        TomlRadius::Value(value) => Ok(CornerRadius::Value(value)),
        TomlRadius::Keyword(keyword) => match keyword.as_str() {
            "half_width" => Ok(CornerRadius::ByHalf(Dimension::Width)),
            "half_height" => Ok(CornerRadius::ByHalf(Dimension::Height)),
            _ => Err(DocumentError::invalid(
                format!("corner radius must be a number, 'half_width' or 'half_height', not '{}'", keyword),
                span,
            )),
        },
    }
}

/// Compute Levenshtein edit distance between two strings
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut row = vec![0usize; b.len() + 1];
    for i in 1..=a.len() {
        row[0] = i;
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            row[j] = (prev[j] + 1).min(row[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut row);
    }
    prev[b.len()]
}

/// Names within `max_distance` edits of `target`, closest first
fn find_similar<'a>(
    names: impl Iterator<Item = &'a str>,
    target: &str,
    max_distance: usize,
) -> Vec<String> {
    let mut candidates: Vec<(&str, usize)> = names
        .filter_map(|name| {
            let dist = levenshtein_distance(name, target);
            (dist > 0 && dist <= max_distance).then_some((name, dist))
        })
        .collect();

    candidates.sort_by_key(|(_, d)| *d);
    candidates
        .into_iter()
        .map(|(name, _)| name.to_string())
        .take(3)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::layout::ViewHierarchy;

    const CARD: &str = r#"
[[view]]
name = "root"
frame = [0, 0, 320, 480]

[[view]]
name = "avatar"
parent = "root"
corner_radius = "half_width"
relations = [
  { attribute = "top", value = 16 },
  { attribute = "left", value = 16 },
  { attribute = "width", value = 40 },
  { attribute = "height", to = "avatar.width" },
]

[[view]]
name = "title"
parent = "root"
relations = [
  { attribute = "left", to = "avatar.right", offset = 12 },
  { attribute = "right", value = 16 },
  { attribute = "center_y", to = "avatar.center_y" },
  { attribute = "height", value = 20 },
]
"#;

    fn frame(tree: &ViewTree, name: &str) -> Rect {
        tree.frame(tree.find(name).expect("view exists"))
    }

    #[test]
    fn test_parse_document() {
        let doc = LayoutDocument::parse(CARD).unwrap();
        assert_eq!(doc.views.len(), 3);
        assert_eq!(doc.views[0].frame, Rect::new(0.0, 0.0, 320.0, 480.0));
        assert_eq!(doc.views[1].relations.len(), 4);
        assert_eq!(
            doc.views[1].corner_radius,
            Some(CornerRadius::ByHalf(Dimension::Width))
        );
        match &doc.views[2].relations[0].node.source {
            RelationSource::Anchor { view, attribute } => {
                assert_eq!(view.node, "avatar");
                assert_eq!(*attribute, Attribute::Right);
            }
            other => panic!("unexpected source: {other:?}"),
        }
        assert_eq!(doc.views[2].relations[0].node.offset, 12.0);
    }

    #[test]
    fn test_resolve_document() {
        let doc = LayoutDocument::parse(CARD).unwrap();
        let tree = doc.resolve(&LayoutConfig::default()).unwrap();
        assert_eq!(frame(&tree, "avatar"), Rect::new(16.0, 16.0, 40.0, 40.0));
        assert_eq!(frame(&tree, "title"), Rect::new(68.0, 26.0, 236.0, 20.0));
        let avatar = tree.find("avatar").unwrap();
        assert_eq!(tree.corner_radius(avatar), Some(20.0));
    }

    #[test]
    fn test_unknown_view_has_suggestions() {
        let source = r#"
[[view]]
name = "header"
frame = [0, 0, 100, 100]

[[view]]
name = "body"
parent = "header"
relations = [{ attribute = "top", to = "heder.bottom" }]
"#;
        let doc = LayoutDocument::parse(source).unwrap();
        let err = doc.resolve(&LayoutConfig::default()).unwrap_err();
        match err {
            DocumentError::UnknownView {
                name,
                span,
                suggestions,
            } => {
                assert_eq!(name, "heder");
                assert!(source[span].contains("heder.bottom"));
                assert_eq!(suggestions, vec!["header".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_attribute() {
        let source = r#"
[[view]]
name = "a"
relations = [{ attribute = "middle", value = 1 }]
"#;
        let err = LayoutDocument::parse(source).unwrap_err();
        assert!(matches!(err, DocumentError::UnknownAttribute { ref name, .. } if name == "middle"));
    }

    #[test]
    fn test_relation_needs_one_source() {
        let source = r#"
[[view]]
name = "a"
relations = [{ attribute = "top" }]
"#;
        let err = LayoutDocument::parse(source).unwrap_err();
        assert!(matches!(err, DocumentError::InvalidRelation { .. }));
    }

    #[test]
    fn test_duplicate_view() {
        let source = r#"
[[view]]
name = "a"

[[view]]
name = "a"
"#;
        let doc = LayoutDocument::parse(source).unwrap();
        let err = doc.resolve(&LayoutConfig::default()).unwrap_err();
        assert!(matches!(err, DocumentError::DuplicateView { .. }));
    }

    #[test]
    fn test_parent_cycle() {
        let source = r#"
[[view]]
name = "a"
parent = "b"

[[view]]
name = "b"
parent = "a"
"#;
        let doc = LayoutDocument::parse(source).unwrap();
        let err = doc.resolve(&LayoutConfig::default()).unwrap_err();
        assert!(matches!(err, DocumentError::InvalidRelation { .. }));
    }

    #[test]
    fn test_layout_error_is_wrapped() {
        let source = r#"
[[view]]
name = "root"
frame = [0, 0, 100, 100]

[[view]]
name = "a"
parent = "root"
relations = [{ attribute = "top", to = "root.left" }]
"#;
        let doc = LayoutDocument::parse(source).unwrap();
        let err = doc.resolve(&LayoutConfig::default()).unwrap_err();
        match err {
            DocumentError::Layout { view, error, .. } => {
                assert_eq!(view, "a");
                assert_eq!(
                    error,
                    LayoutError::incompatible(Attribute::Top, Attribute::Left)
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_insets_with_sides() {
        let source = r#"
[[view]]
name = "root"
frame = [0, 0, 100, 100]

[[view]]
name = "a"
parent = "root"
frame = [50, 50, 10, 10]
insets = { top = 5, left = 6, bottom = 7, right = 8 }
sides = ["top", "left"]
"#;
        let doc = LayoutDocument::parse(source).unwrap();
        let tree = doc.resolve(&LayoutConfig::default()).unwrap();
        assert_eq!(frame(&tree, "a"), Rect::new(6.0, 5.0, 10.0, 10.0));
    }

    #[test]
    fn test_container_listed_after_subviews() {
        let source = r#"
[[view]]
name = "child"
parent = "box"
frame = [-4, 0, 10, 10]

[[view]]
name = "other"
parent = "box"
frame = [0, 20, 5, 5]

[[view]]
name = "box"
frame = [30, 30, 0, 0]
container = true
"#;
        let doc = LayoutDocument::parse(source).unwrap();
        let tree = doc.resolve(&LayoutConfig::default()).unwrap();
        assert_eq!(frame(&tree, "box"), Rect::new(30.0, 30.0, 10.0, 25.0));
        assert_eq!(frame(&tree, "child"), Rect::new(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein_distance("hello", "hello"), 0);
        assert_eq!(levenshtein_distance("server", "servr"), 1);
        assert_eq!(levenshtein_distance("cat", "dog"), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
    }

    #[test]
    fn test_find_similar() {
        let names = ["server", "client", "database"];
        let suggestions = find_similar(names.iter().copied(), "servr", 2);
        assert_eq!(suggestions, vec!["server".to_string()]);
    }
}
