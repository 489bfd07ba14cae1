//! Handing the camera transform to a renderer
//!
//! The camera never touches pixels. It either hands a composed affine to a
//! [`Canvas`] or exports a view-projection matrix for a GPU uniform

use glam::{Mat4, Vec4};
use kamera_math::DAffine2;

use crate::{camera::Camera, shake::NoiseSource};

/// A surface that can draw an image under an affine transform
pub trait Canvas {
    type Image: ?Sized;

    fn draw_image(&mut self, image: &Self::Image, transform: DAffine2);
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl<N: NoiseSource> Camera<N> {
    /// Draw `image` placed by `local` (its world transform) through the camera
    pub fn draw<C: Canvas>(&self, image: &C::Image, local: DAffine2, canvas: &mut C) {
        canvas.draw_image(image, self.transform() * local);
    }

    /// Camera transform as a 4x4 matrix, z untouched
    pub fn view(&self) -> Mat4 {
        let DAffine2 {
            matrix2: m,
            translation: t,
        } = self.transform();
        Mat4::from_cols(
            Vec4::new(m.x_axis.x as f32, m.x_axis.y as f32, 0.0, 0.0),
            Vec4::new(m.y_axis.x as f32, m.y_axis.y as f32, 0.0, 0.0),
            Vec4::Z,
            Vec4::new(t.x as f32, t.y as f32, 0.0, 1.0),
        )
    }

    /// Orthographic view-projection for the viewport, y pointing down
    pub fn view_proj(&self) -> Mat4 {
        let size = self.size().as_vec2();
        Mat4::orthographic_lh(0.0, size.x, size.y, 0.0, -1.0, 1.0) * self.view()
    }

    /// View-projection ready to upload to a uniform buffer
    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_proj().to_cols_array_2d(),
        }
    }
}
