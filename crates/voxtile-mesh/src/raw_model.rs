//! Parser for the `.rawmodel` text format.
//!
//! ```text
//! # comment
//! v x y z [w]      vertex position, w ignored
//! n x y z [w]      face normal, one per face in face order, normalised
//! f i j k [l]      0-based vertex indices, triangle or quad
//! ```
//!
//! Blank lines are skipped and unknown record types are ignored.

use std::path::Path;

use glam::Vec3;

use crate::error::{MeshError, Result};
use crate::mesh::{BasicMesh, Polygon};

/// File extension of block models.
pub const EXTENSION: &str = "rawmodel";

/// Parse raw model text into a basic mesh.
pub fn parse(text: &str) -> Result<BasicMesh> {
    let mut mesh = BasicMesh::default();

    for (number, line) in text.lines().enumerate() {
        let line_no = number + 1;
        let mut tokens = line.split_whitespace();
        let Some(kind) = tokens.next() else {
            continue;
        };
        if kind.starts_with('#') {
            continue;
        }

        match kind {
            "v" => mesh.vertices.push(parse_vec3(tokens, line_no)?),
            "n" => {
                let normal = parse_vec3(tokens, line_no)?;
                if normal.length_squared() == 0.0 {
                    return Err(MeshError::Parse {
                        line: line_no,
                        message: "zero-length normal".to_string(),
                    });
                }
                mesh.normals.push(normal.normalize());
            }
            "f" => {
                let indices = tokens
                    .map(|token| {
                        token.parse::<u32>().map_err(|_| MeshError::Parse {
                            line: line_no,
                            message: format!("invalid vertex index '{token}'"),
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                let face = Polygon::from_slice(&indices).ok_or_else(|| MeshError::Parse {
                    line: line_no,
                    message: format!("face needs 3 or 4 indices, got {}", indices.len()),
                })?;
                mesh.faces.push(face);
            }
            other => {
                tracing::debug!("rawmodel line {}: skipping record '{}'", line_no, other);
            }
        }
    }

    Ok(mesh)
}

/// Read and parse a raw model file.
pub fn load(path: &Path) -> Result<BasicMesh> {
    let text = std::fs::read_to_string(path).map_err(|source| MeshError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text)
}

fn parse_vec3<'a>(tokens: impl Iterator<Item = &'a str>, line: usize) -> Result<Vec3> {
    let values = tokens
        .take(4)
        .map(|token| {
            token.parse::<f32>().map_err(|_| MeshError::Parse {
                line,
                message: format!("invalid number '{token}'"),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    match values[..] {
        [x, y, z] | [x, y, z, _] => Ok(Vec3::new(x, y, z)),
        _ => Err(MeshError::Parse {
            line,
            message: format!("expected 3 or 4 components, got {}", values.len()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE: &str = "\
# single triangle
v 0 0 0
v 1 0 0 1

v 0 1 0
n 0 0 2
f 0 1 2
";

    #[test]
    fn parses_records() {
        let mesh = parse(TRIANGLE).unwrap();
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.vertices[1], Vec3::X);
        assert_eq!(mesh.normals, vec![Vec3::Z]);
        assert_eq!(mesh.faces, vec![Polygon::Triangle([0, 1, 2])]);
    }

    #[test]
    fn parses_quads() {
        let mesh = parse("f 0 1 2 3\n").unwrap();
        assert_eq!(mesh.faces, vec![Polygon::Quad([0, 1, 2, 3])]);
    }

    #[test]
    fn reports_line_of_bad_number() {
        let err = parse("v 0 0 0\nv 1 x 0\n").unwrap_err();
        assert!(matches!(err, MeshError::Parse { line: 2, .. }));
    }

    #[test]
    fn rejects_short_faces() {
        let err = parse("f 0 1\n").unwrap_err();
        assert!(matches!(err, MeshError::Parse { line: 1, .. }));
        assert!(parse("f 0 1 -2\n").is_err());
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = load(Path::new("does/not/exist.rawmodel")).unwrap_err();
        assert!(matches!(err, MeshError::Read { .. }));
    }
}
