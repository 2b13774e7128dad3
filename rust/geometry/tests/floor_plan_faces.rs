// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor plan shaped faces through the public mesh API.

use approx::assert_relative_eq;
use floorplan_glb_geometry::{
    triangle_area, triangulate_polygon, Mesh, Point3, TriangulationStatus, Vector3,
};

fn points(coords: &[[f64; 3]]) -> Vec<Point3<f64>> {
    coords.iter().map(|c| Point3::new(c[0], c[1], c[2])).collect()
}

fn mesh_area(mesh: &Mesh) -> f64 {
    let vertex = |i: u32| {
        let i = i as usize * 3;
        Point3::new(
            mesh.positions[i] as f64,
            mesh.positions[i + 1] as f64,
            mesh.positions[i + 2] as f64,
        )
    };
    mesh.indices
        .chunks_exact(3)
        .map(|t| triangle_area(&vertex(t[0]), &vertex(t[1]), &vertex(t[2])))
        .sum()
}

#[test]
fn square_slab() {
    let vertices = points(&[
        [0.0, 0.0, 0.0],
        [2.0, 0.0, 0.0],
        [2.0, 2.0, 0.0],
        [0.0, 2.0, 0.0],
    ]);

    let (mesh, report) = Mesh::from_polygons(&vertices, &[vec![0, 1, 2, 3]], false).unwrap();

    assert_eq!(mesh.triangle_count(), 2);
    assert_eq!(report.complete, 1);
    assert_relative_eq!(mesh_area(&mesh), 4.0, epsilon = 1e-6);
}

#[test]
fn t_shaped_room() {
    // Counter-clockwise outline; corners 3 and 6 are reflex
    let vertices = points(&[
        [0.0, 0.0, 0.0],
        [6.0, 0.0, 0.0],
        [6.0, 2.0, 0.0],
        [4.0, 2.0, 0.0],
        [4.0, 5.0, 0.0],
        [2.0, 5.0, 0.0],
        [2.0, 2.0, 0.0],
        [0.0, 2.0, 0.0],
    ]);
    let face: Vec<u32> = (0..8).collect();

    let (mesh, report) = Mesh::from_polygons(&vertices, &[face], false).unwrap();

    assert_eq!(report.complete, 1);
    assert_eq!(mesh.triangle_count(), 6);
    assert_relative_eq!(mesh_area(&mesh), 18.0, epsilon = 1e-6);
}

#[test]
fn clockwise_t_from_reflex_corner_stalls_with_bad_ears() {
    // Same T outline, clockwise, starting at a reflex corner. The reference
    // winding from the first three vertices is inverted for the whole ring,
    // so the two triangles clipped before the stall lie outside the room.
    let vertices = points(&[
        [0.0, 2.0, 0.0],
        [2.0, 2.0, 0.0],
        [2.0, 5.0, 0.0],
        [4.0, 5.0, 0.0],
        [4.0, 2.0, 0.0],
        [6.0, 2.0, 0.0],
        [6.0, 0.0, 0.0],
        [0.0, 0.0, 0.0],
    ]);
    let face: Vec<u32> = (0..8).collect();

    let result = triangulate_polygon(&vertices, &face).unwrap();

    assert_eq!(result.status, TriangulationStatus::Partial { remaining: 6 });
    assert_eq!(result.indices, vec![0, 1, 2, 3, 4, 5]);

    let inside_t = |x: f64, y: f64| {
        ((0.0..=6.0).contains(&x) && (0.0..=2.0).contains(&y))
            || ((2.0..=4.0).contains(&x) && (2.0..=5.0).contains(&y))
    };
    for t in result.indices.chunks_exact(3) {
        let centroid = t
            .iter()
            .map(|&i| vertices[i as usize].coords)
            .sum::<Vector3<f64>>()
            / 3.0;
        assert!(
            !inside_t(centroid.x, centroid.y),
            "triangle {:?} unexpectedly inside the outline",
            t
        );
    }
}

#[test]
fn window_pane_in_wall_plane() {
    // Vertical pane in the YZ plane, exported with inverted winding
    let vertices = points(&[
        [3.0, 1.0, 1.0],
        [3.0, 2.5, 1.0],
        [3.0, 2.5, 2.2],
        [3.0, 1.0, 2.2],
    ]);

    let (plain, _) = Mesh::from_polygons(&vertices, &[vec![0, 1, 2, 3]], false).unwrap();
    let (inverted, _) = Mesh::from_polygons(&vertices, &[vec![0, 1, 2, 3]], true).unwrap();

    assert_eq!(inverted.triangle_count(), 2);
    assert_eq!(
        inverted.indices,
        plain.indices.iter().rev().copied().collect::<Vec<_>>()
    );
    assert_relative_eq!(mesh_area(&inverted), 1.5 * 1.2, epsilon = 1e-5);
}
