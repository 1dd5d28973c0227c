//! Flat-array matrix output
//!
//! Turns matrices into the float arrays a shader uniform or another tool
//! expects, in either storage order.

use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::Mat4;

/// Element order of a flattened matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatrixLayout {
    /// Columns one after another (OpenGL / Vulkan uniforms)
    ColumnMajor,
    /// Rows one after another
    RowMajor,
}

impl MatrixLayout {
    /// Flatten `m` in this order
    pub fn flatten(self, m: &Mat4) -> [f32; 16] {
        let mut out = [0.0; 16];
        match self {
            MatrixLayout::ColumnMajor => m.store(&mut out),
            MatrixLayout::RowMajor => m.store_row_major(&mut out),
        }
        out
    }
}

/// Render `m` as `name = [a, b, ...]` with fixed precision
pub fn format_matrix(name: &str, m: &Mat4, layout: MatrixLayout, precision: usize) -> String {
    let values = layout
        .flatten(m)
        .iter()
        .map(|v| format!("{:.*}", precision, v))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{} = [{}]", name, values)
}

/// View, projection and view-projection of `camera`, one matrix per line
pub fn export_camera(camera: &Camera, layout: MatrixLayout, precision: usize) -> String {
    let mut out = String::new();
    for (name, m) in [
        ("view", camera.view()),
        ("projection", camera.projection_matrix()),
        ("view_projection", camera.view_projection()),
    ] {
        out.push_str(&format_matrix(name, &m, layout, precision));
        out.push('\n');
    }
    log::debug!("Exported camera matrices as {:?}", layout);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vec3;

    #[test]
    fn test_flatten_orders() {
        let t = Mat4::translate(Vec3::new(1.0, 2.0, 3.0));
        let cols = MatrixLayout::ColumnMajor.flatten(&t);
        let rows = MatrixLayout::RowMajor.flatten(&t);
        assert_eq!(&cols[12..15], &[1.0, 2.0, 3.0]);
        assert_eq!([rows[3], rows[7], rows[11]], [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_format_matrix() {
        let s = format_matrix("id", &Mat4::IDENTITY, MatrixLayout::RowMajor, 1);
        assert_eq!(
            s,
            "id = [1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0]"
        );
    }

    #[test]
    fn test_export_camera_lines() {
        let camera = Camera::default();
        let text = export_camera(&camera, MatrixLayout::ColumnMajor, 3);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("view = ["));
        assert!(lines[1].starts_with("projection = ["));
        assert!(lines[2].starts_with("view_projection = ["));
    }
}
