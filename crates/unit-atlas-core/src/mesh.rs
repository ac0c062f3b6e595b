//! Mesh hierarchy model as handed over by the external mesh reader.

use crate::color_index::color_index_name;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Fixed-point scale of mesh coordinates (16.16).
pub const COORDINATE_SCALE: f64 = 65536.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Vertex {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// A face: vertex indices plus either a texture name or a raw palette colour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Primitive {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_index: Option<u32>,
    #[serde(default)]
    pub vertices: Vec<u32>,
}

impl Primitive {
    /// Atlas fragment this face samples: its texture if named, otherwise its colour swatch.
    pub fn fragment_name(&self) -> Option<String> {
        match (&self.texture_name, self.color_index) {
            (Some(t), _) => Some(t.clone()),
            (None, Some(c)) => Some(color_index_name(c)),
            (None, None) => None,
        }
    }
}

/// A node of the mesh tree. Each child is owned by exactly one parent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MeshObject {
    pub name: String,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(default)]
    pub z: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_primitive_index: Option<u32>,
    #[serde(default)]
    pub vertices: Vec<Vertex>,
    #[serde(default)]
    pub primitives: Vec<Primitive>,
    #[serde(default)]
    pub children: Vec<MeshObject>,
}

impl MeshObject {
    /// Every fragment name referenced by this node and its descendants.
    pub fn referenced_fragments(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        let mut stack: Vec<&MeshObject> = vec![self];
        while let Some(obj) = stack.pop() {
            names.extend(obj.primitives.iter().filter_map(Primitive::fragment_name));
            stack.extend(obj.children.iter());
        }
        names
    }

    /// Number of nodes in the subtree rooted here.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(MeshObject::node_count).sum::<usize>()
    }
}

/// Parses the root objects of a unit from JSON (a single object or an array of them).
pub fn units_from_json_str(s: &str) -> Result<Vec<MeshObject>> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Roots {
        Many(Vec<MeshObject>),
        One(Box<MeshObject>),
    }
    Ok(match serde_json::from_str(s)? {
        Roots::Many(v) => v,
        Roots::One(o) => vec![*o],
    })
}

/// Reads the root objects of a unit from a JSON file.
pub fn load_unit(path: impl AsRef<Path>) -> Result<Vec<MeshObject>> {
    let text = std::fs::read_to_string(path.as_ref())?;
    units_from_json_str(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_name_takes_precedence_over_colour() {
        let p = Primitive {
            texture_name: Some("gun".into()),
            color_index: Some(3),
            vertices: vec![],
        };
        assert_eq!(p.fragment_name().as_deref(), Some("gun"));
        let p = Primitive {
            color_index: Some(3),
            ..Default::default()
        };
        assert_eq!(p.fragment_name().as_deref(), Some("__colorIndex3"));
        assert_eq!(Primitive::default().fragment_name(), None);
    }

    #[test]
    fn single_object_or_array() {
        let one = units_from_json_str(r#"{"name":"base"}"#).unwrap();
        assert_eq!(one.len(), 1);
        let many = units_from_json_str(r#"[{"name":"a"},{"name":"b"}]"#).unwrap();
        assert_eq!(many.len(), 2);
    }
}
