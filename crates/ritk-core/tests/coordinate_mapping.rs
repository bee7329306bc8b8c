use nalgebra::Matrix3;
use proptest::prelude::*;
use ritk_core::image::{Coordinates, ImageGeometry};
use ritk_core::spatial::{Direction3, Point3, Spacing3};

fn make_rotation(angle_x: f64, angle_y: f64, angle_z: f64) -> Direction3 {
    let cx = angle_x.cos(); let sx = angle_x.sin();
    let cy = angle_y.cos(); let sy = angle_y.sin();
    let cz = angle_z.cos(); let sz = angle_z.sin();

    let rz = Matrix3::new(
        cz, -sz, 0.0,
        sz, cz, 0.0,
        0.0, 0.0, 1.0
    );
    let ry = Matrix3::new(
        cy, 0.0, sy,
        0.0, 1.0, 0.0,
        -sy, 0.0, cy
    );
    let rx = Matrix3::new(
        1.0, 0.0, 0.0,
        0.0, cx, -sx,
        0.0, sx, cx
    );

    rx * ry * rz
}

proptest! {
    #[test]
    fn test_coordinate_roundtrip(
        ox in -100.0f64..100.0, oy in -100.0f64..100.0, oz in -100.0f64..100.0,
        sx in 0.1f64..5.0, sy in 0.1f64..5.0, sz in 0.1f64..5.0,
        ax in -3.14f64..3.14, ay in -3.14f64..3.14, az in -3.14f64..3.14,
        px in -50.0f64..50.0, py in -50.0f64..50.0, pz in -50.0f64..50.0
    ) {
        let geometry = ImageGeometry::new(
            Point3::new(ox, oy, oz),
            Spacing3::new(sx, sy, sz),
            make_rotation(ax, ay, az),
        );
        let point = Point3::new(px, py, pz);

        let index = geometry.physical_point_to_continuous_index(&point).unwrap();
        let recovered = geometry.continuous_index_to_physical_point(&index);

        prop_assert!((point[0] - recovered[0]).abs() < 1e-6, "X mismatch: {} vs {}", point[0], recovered[0]);
        prop_assert!((point[1] - recovered[1]).abs() < 1e-6, "Y mismatch: {} vs {}", point[1], recovered[1]);
        prop_assert!((point[2] - recovered[2]).abs() < 1e-6, "Z mismatch: {} vs {}", point[2], recovered[2]);
    }

    #[test]
    fn test_coordinates_cover_grid_once(d0 in 1usize..5, d1 in 1usize..5, d2 in 1usize..5) {
        let coords: Vec<_> = Coordinates::new([d0, d1, d2]).collect();
        prop_assert_eq!(coords.len(), d0 * d1 * d2);
        // Row-major order makes the enumeration strictly increasing.
        prop_assert!(coords.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(coords.last().copied(), Some([d0 - 1, d1 - 1, d2 - 1]));
    }
}
