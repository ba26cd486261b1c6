//! Wavefront (`.obj`) export of meshes.

use crate::shape::Mesh;
use obj::{Group, IndexTuple, ObjData, ObjError, Object, SimplePolygon};
use std::fs::File;
use std::path::Path;

impl Mesh {
    /// Outputs a Wavefront (`.obj`) file at the given path.
    ///
    /// The mesh is written as a single object of triangles, positions only.
    ///
    /// This function is enabled by the `wavefront` feature flag.
    pub fn to_obj_file(&self, path: &Path) -> Result<(), ObjError> {
        let mut file = File::create(path).map_err(ObjError::Io)?;
        self.to_obj_data().write_to_buf(&mut file)
    }

    /// Converts this mesh into Wavefront data.
    ///
    /// This function is enabled by the `wavefront` feature flag.
    pub fn to_obj_data(&self) -> ObjData {
        ObjData {
            #[allow(clippy::unnecessary_cast)]
            position: self
                .vertices()
                .iter()
                .map(|v| [v.x as f32, v.y as f32, v.z as f32])
                .collect(),
            objects: vec![Object {
                groups: vec![Group {
                    polys: self
                        .indices()
                        .iter()
                        .map(|tri| {
                            SimplePolygon(vec![
                                IndexTuple(tri[0] as usize, None, None),
                                IndexTuple(tri[1] as usize, None, None),
                                IndexTuple(tri[2] as usize, None, None),
                            ])
                        })
                        .collect(),
                    name: "heightmap".to_string(),
                    index: 0,
                    material: None,
                }],
                name: "heightmap".to_string(),
            }],
            ..Default::default()
        }
    }
}
