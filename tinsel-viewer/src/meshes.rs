//! This module builds the meshes that Bevy doesn't have shapes for.

use bevy::{
    prelude::*,
    render::{
        mesh::{Indices, VertexAttributeValues},
        render_resource::PrimitiveTopology,
    },
};
use tinsel_animators::TextureFit;
use tinsel_frame::PointVertex;

/// Build an extruded star from its outline, centred on the origin with the faces pointing along
/// the z axis.
pub(crate) fn star_mesh(outline: &[glam::Vec2], depth: f32) -> Mesh {
    let half_depth = depth / 2.;
    let n = outline.len() as u32;

    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut normals: Vec<[f32; 3]> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    // The two faces are fans around their centres
    for (z, normal) in [(half_depth, 1.), (-half_depth, -1.)] {
        let centre = positions.len() as u32;
        positions.push([0., 0., z]);
        normals.push([0., 0., normal]);

        for point in outline {
            positions.push([point.x, point.y, z]);
            normals.push([0., 0., normal]);
        }

        for i in 0..n {
            let a = centre + 1 + i;
            let b = centre + 1 + (i + 1) % n;
            if normal > 0. {
                indices.extend([centre, a, b]);
            } else {
                indices.extend([centre, b, a]);
            }
        }
    }

    // Each side is its own quad so that it gets a flat normal
    for i in 0..outline.len() {
        let p = outline[i];
        let q = outline[(i + 1) % outline.len()];
        let edge = q - p;
        let normal = [edge.y, -edge.x, 0.];
        let length = edge.length().max(f32::EPSILON);
        let normal = normal.map(|x| x / length);

        let start = positions.len() as u32;
        positions.extend([
            [p.x, p.y, half_depth],
            [q.x, q.y, half_depth],
            [q.x, q.y, -half_depth],
            [p.x, p.y, -half_depth],
        ]);
        normals.extend([normal; 4]);
        indices.extend([start, start + 2, start + 1, start, start + 3, start + 2]);
    }

    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList);
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.set_indices(Some(Indices::U32(indices)));
    mesh
}

/// The corners of the little octahedron drawn for every point.
const POINT_CORNERS: [[f32; 3]; 6] = [
    [1., 0., 0.],
    [-1., 0., 0.],
    [0., 1., 0.],
    [0., -1., 0.],
    [0., 0., 1.],
    [0., 0., -1.],
];

/// The faces of the octahedron, as indices into [`POINT_CORNERS`].
const POINT_FACES: [[u32; 3]; 8] = [
    [0, 2, 4],
    [2, 1, 4],
    [1, 3, 4],
    [3, 0, 4],
    [2, 0, 5],
    [1, 2, 5],
    [3, 1, 5],
    [0, 3, 5],
];

/// Build a mesh for a point cloud, drawing each point as a tiny octahedron with a radius of
/// `size * radius_per_size`. The colour and opacity of each point go into the vertex colours.
pub(crate) fn point_cloud_mesh(points: &[PointVertex], radius_per_size: f32) -> Mesh {
    let mut positions = Vec::with_capacity(points.len() * POINT_CORNERS.len());
    let mut normals = Vec::with_capacity(points.len() * POINT_CORNERS.len());
    let mut colours = Vec::with_capacity(points.len() * POINT_CORNERS.len());
    let mut indices = Vec::with_capacity(points.len() * POINT_FACES.len() * 3);

    for point in points {
        let start = positions.len() as u32;
        let radius = point.size * radius_per_size;
        let [r, g, b] = point.colour.to_array();

        for corner in POINT_CORNERS {
            let [x, y, z] = (point.position + glam::Vec3::from_array(corner) * radius).to_array();
            positions.push([x, y, z]);
            normals.push(corner);
            colours.push([r, g, b, point.opacity]);
        }

        for face in POINT_FACES {
            indices.extend(face.map(|i| start + i));
        }
    }

    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList);
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colours);
    mesh.set_indices(Some(Indices::U32(indices)));
    mesh
}

/// Change the texture coordinates of the mesh so that it shows the part of the image given by
/// the fit.
pub(crate) fn apply_texture_fit(mesh: &mut Mesh, fit: TextureFit) {
    if let Some(VertexAttributeValues::Float32x2(uvs)) = mesh.attribute_mut(Mesh::ATTRIBUTE_UV_0)
    {
        for [u, v] in uvs.iter_mut() {
            *u = fit.offset.x + *u * fit.repeat.x;
            *v = fit.offset.y + *v * fit.repeat.y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinsel_animators::texture_fit;
    use tinsel_placement::star_outline;

    fn positions(mesh: &Mesh) -> &[[f32; 3]] {
        match mesh.attribute(Mesh::ATTRIBUTE_POSITION) {
            Some(VertexAttributeValues::Float32x3(positions)) => positions,
            other => panic!("Expected positions, got {other:?}"),
        }
    }

    fn index_count(mesh: &Mesh) -> usize {
        match mesh.indices() {
            Some(Indices::U32(indices)) => indices.len(),
            other => panic!("Expected u32 indices, got {other:?}"),
        }
    }

    #[test]
    fn star_mesh_test() {
        let mesh = star_mesh(&star_outline(0.7, 0.35), 0.3);

        // Two fans of 11 vertices and 10 side quads
        assert_eq!(positions(&mesh).len(), 2 * 11 + 10 * 4);
        assert_eq!(index_count(&mesh), (10 + 10 + 20) * 3);

        for &[x, y, z] in positions(&mesh) {
            assert!((x * x + y * y).sqrt() <= 0.7 + 1e-5);
            assert!(z.abs() <= 0.15 + 1e-6);
        }
    }

    #[test]
    fn point_cloud_mesh_test() {
        let points = [
            PointVertex {
                position: glam::Vec3::new(1., 2., 3.),
                size: 2.,
                colour: glam::Vec3::new(0.1, 0.2, 0.3),
                opacity: 0.5,
            },
            PointVertex {
                position: glam::Vec3::ZERO,
                size: 1.,
                colour: glam::Vec3::ONE,
                opacity: 1.,
            },
        ];
        let mesh = point_cloud_mesh(&points, 0.05);

        assert_eq!(positions(&mesh).len(), 12);
        assert_eq!(index_count(&mesh), 2 * 8 * 3);
        let [x, y, z] = positions(&mesh)[0];
        assert!((x - 1.1).abs() < 1e-6 && y == 2. && z == 3.);
        assert_eq!(positions(&mesh)[6], [0.05, 0., 0.]);

        match mesh.attribute(Mesh::ATTRIBUTE_COLOR) {
            Some(VertexAttributeValues::Float32x4(colours)) => {
                assert_eq!(colours[0], [0.1, 0.2, 0.3, 0.5]);
                assert_eq!(colours[11], [1., 1., 1., 1.]);
            }
            other => panic!("Expected colours, got {other:?}"),
        }
    }

    #[test]
    fn apply_texture_fit_test() {
        let mut mesh = Mesh::from(shape::Quad::new(Vec2::new(1.05, 1.15)));

        // A wide image gets its sides cropped
        apply_texture_fit(&mut mesh, texture_fit(1600, 900));

        match mesh.attribute(Mesh::ATTRIBUTE_UV_0) {
            Some(VertexAttributeValues::Float32x2(uvs)) => {
                let min_u = uvs.iter().map(|[u, _]| *u).fold(f32::INFINITY, f32::min);
                let max_u = uvs.iter().map(|[u, _]| *u).fold(f32::NEG_INFINITY, f32::max);
                assert!(min_u > 0.2 && max_u < 0.8);
                assert!((min_u + max_u - 1.).abs() < 1e-5);

                for [_, v] in uvs {
                    assert!(*v == 0. || *v == 1.);
                }
            }
            other => panic!("Expected UVs, got {other:?}"),
        }
    }
}
