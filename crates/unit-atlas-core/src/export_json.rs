use crate::atlas::CompositeAtlas;
use crate::color_index::color_index_name;
use crate::mesh::{COORDINATE_SCALE, MeshObject, Primitive, Vertex};
use crate::model::UvRect;
use serde_json::{Map, Value, json};

/// Fragment table keyed by name, plus canvas metadata.
/// Shape: `{ frames: { name: { frame, transparencyKey, logo, uv } }, meta }`.
pub fn to_json_hash(atlas: &CompositeAtlas) -> Value {
    let mut frames = Map::new();
    for (name, f) in atlas.fragments().iter().filter(|(_, f)| f.placed) {
        let frame = json!({"x": f.rect.x, "y": f.rect.y, "w": f.rect.w, "h": f.rect.h});
        let uv = UvRect::from_rect(&f.rect, atlas.width(), atlas.height());
        frames.insert(
            name.clone(),
            json!({
                "frame": frame,
                "transparencyKey": f.transparency_key,
                "logo": f.logo,
                "uv": uv,
            }),
        );
    }
    json!({
        "frames": frames,
        "meta": {
            "app": "unit-atlas",
            "version": env!("CARGO_PKG_VERSION"),
            "format": "I8",
            "width": atlas.width(),
            "height": atlas.height(),
        }
    })
}

fn vertex_to_json(v: &Vertex) -> Value {
    json!({
        "x": v.x as f64 / COORDINATE_SCALE,
        "y": v.y as f64 / COORDINATE_SCALE,
        "z": v.z as f64 / COORDINATE_SCALE,
    })
}

fn primitive_to_json(p: &Primitive, atlas: &CompositeAtlas) -> Value {
    let mut obj = Map::new();
    let mut uv = UvRect::zero();
    if let Some(ci) = p.color_index {
        let name = color_index_name(ci);
        obj.insert("colorIndex".into(), json!(ci));
        uv = atlas.uv(&name);
        obj.insert("colorIndexTextureName".into(), json!(name));
    }
    if let Some(tex) = &p.texture_name {
        uv = atlas.uv(tex);
        obj.insert("textureName".into(), json!(tex));
    }
    obj.insert("vertices".into(), json!(p.vertices));
    obj.insert("uvmin".into(), json!(uv.min()));
    obj.insert("uvmax".into(), json!(uv.max()));
    Value::Object(obj)
}

/// Serializes a mesh subtree with world-unit coordinates and per-face atlas UVs.
pub fn mesh_to_json(obj: &MeshObject, atlas: &CompositeAtlas) -> Value {
    let mut out = Map::new();
    out.insert("x".into(), json!(obj.x as f64 / COORDINATE_SCALE));
    out.insert("y".into(), json!(obj.y as f64 / COORDINATE_SCALE));
    out.insert("z".into(), json!(obj.z as f64 / COORDINATE_SCALE));
    out.insert("name".into(), json!(obj.name));
    if let Some(sel) = obj.selection_primitive_index {
        out.insert("selectionPrimitiveIndex".into(), json!(sel));
    }
    out.insert(
        "vertices".into(),
        Value::Array(obj.vertices.iter().map(vertex_to_json).collect()),
    );
    out.insert(
        "primitives".into(),
        Value::Array(
            obj.primitives
                .iter()
                .map(|p| primitive_to_json(p, atlas))
                .collect(),
        ),
    );
    out.insert(
        "children".into(),
        Value::Array(
            obj.children
                .iter()
                .map(|c| mesh_to_json(c, atlas))
                .collect(),
        ),
    );
    Value::Object(out)
}

/// `{ "<unit>": [root, ...] }` with each root serialized against its own atlas.
pub fn unit_to_json<'a>(
    unit: &str,
    roots: impl IntoIterator<Item = (&'a MeshObject, &'a CompositeAtlas)>,
) -> Value {
    let list: Vec<Value> = roots
        .into_iter()
        .map(|(obj, atlas)| mesh_to_json(obj, atlas))
        .collect();
    let mut out = Map::new();
    out.insert(unit.to_string(), Value::Array(list));
    Value::Object(out)
}
