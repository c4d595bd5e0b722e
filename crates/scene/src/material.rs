use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// 24-bit RGB colour written as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Color = Color(0xffffff);

    /// Linear components in `[0, 1]`.
    pub fn to_rgb(self) -> Vec3 {
        let r = (self.0 >> 16) & 0xff;
        let g = (self.0 >> 8) & 0xff;
        let b = self.0 & 0xff;
        Vec3::new(r as f32, g as f32, b as f32) / 255.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0 & 0xffffff)
    }
}

/// Image the backend loads by path when it first draws the material.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureSource {
    path: PathBuf,
}

impl TextureSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Unlit material: a flat colour, optionally modulated by a texture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicMaterial {
    pub name: String,
    pub color: Color,
    pub texture: Option<TextureSource>,
}

impl BasicMaterial {
    pub fn colored(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
            texture: None,
        }
    }

    /// White base colour so the texture shows unmodified.
    pub fn textured(name: impl Into<String>, texture: TextureSource) -> Self {
        Self {
            name: name.into(),
            color: Color::WHITE,
            texture: Some(texture),
        }
    }
}

/// Faces of a box, in the order per-face material arrays are indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubeFace {
    Right,
    Left,
    Top,
    Bottom,
    Front,
    Back,
}

impl CubeFace {
    pub const ALL: [CubeFace; 6] = [
        CubeFace::Right,
        CubeFace::Left,
        CubeFace::Top,
        CubeFace::Bottom,
        CubeFace::Front,
        CubeFace::Back,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Material assignment of a mesh. Materials are shared through `Rc`, so
/// several faces or meshes can reference one material.
#[derive(Debug, Clone)]
pub enum MeshMaterial {
    Single(Rc<BasicMaterial>),
    PerFace([Rc<BasicMaterial>; 6]),
}

impl MeshMaterial {
    /// Every face uses `base` except `face`, which uses `special`.
    pub fn with_face(
        base: &Rc<BasicMaterial>,
        face: CubeFace,
        special: Rc<BasicMaterial>,
    ) -> Self {
        let mut faces: [Rc<BasicMaterial>; 6] = std::array::from_fn(|_| Rc::clone(base));
        faces[face.index()] = special;
        Self::PerFace(faces)
    }

    /// Material drawn on the given face.
    pub fn for_face(&self, face: CubeFace) -> &Rc<BasicMaterial> {
        match self {
            Self::Single(m) => m,
            Self::PerFace(faces) => &faces[face.index()],
        }
    }

    /// Materials in face order with pointer duplicates removed.
    pub fn distinct(&self) -> Vec<&Rc<BasicMaterial>> {
        match self {
            Self::Single(m) => vec![m],
            Self::PerFace(faces) => {
                let mut seen: Vec<&Rc<BasicMaterial>> = Vec::new();
                for m in faces {
                    if !seen.iter().any(|s| Rc::ptr_eq(*s, m)) {
                        seen.push(m);
                    }
                }
                seen
            }
        }
    }

    pub fn distinct_count(&self) -> usize {
        self.distinct().len()
    }
}
