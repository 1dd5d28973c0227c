//! First-person camera producing view and projection matrices
//!
//! The camera looks down its local -Z axis with +Y up. Orientation is kept
//! as yaw (around world +Y) and pitch (around the camera's X axis) and turned
//! into a quaternion on demand.

use crate::config::{AppConfig, ProjectionConfig, ProjectionMode};
use crate::{rad_to_deg, Mat4, Quat, Vec3, Vec4};

/// Projection parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// `fov` is the full vertical angle in degrees
    Perspective { fov: f32, aspect: f32, near: f32, far: f32 },
    /// View volume `height` units tall, centered on the view axis
    Orthographic { height: f32, aspect: f32, near: f32, far: f32 },
}

impl Default for Projection {
    fn default() -> Self {
        Self::from_config(&ProjectionConfig::default())
    }
}

impl Projection {
    pub fn from_config(config: &ProjectionConfig) -> Self {
        match config.mode {
            ProjectionMode::Perspective => Projection::Perspective {
                fov: config.fov,
                aspect: config.aspect,
                near: config.near,
                far: config.far,
            },
            ProjectionMode::Orthographic => Projection::Orthographic {
                height: config.ortho_height,
                aspect: config.aspect,
                near: config.near,
                far: config.far,
            },
        }
    }

    /// Clip-space projection matrix
    pub fn matrix(&self) -> Mat4 {
        match *self {
            Projection::Perspective { fov, aspect, near, far } => {
                Mat4::perspective(fov, aspect, near, far)
            }
            Projection::Orthographic { height, aspect, near, far } => {
                let half_h = height * 0.5;
                let half_w = half_h * aspect;
                Mat4::orthographic(-half_w, half_w, -half_h, half_h, near, far)
            }
        }
    }
}

/// Camera with a position, yaw/pitch orientation and a projection
#[derive(Debug, Clone)]
pub struct Camera {
    /// Eye position in world space
    pub position: Vec3,
    pub projection: Projection,
    /// Degrees
    yaw: f32,
    /// Degrees, kept within `pitch_limit`
    pitch: f32,
    pitch_limit: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 5.0), Projection::default())
    }
}

impl Camera {
    /// Camera at `position` looking down -Z
    pub fn new(position: Vec3, projection: Projection) -> Self {
        Self {
            position,
            projection,
            yaw: 0.0,
            pitch: 0.0,
            pitch_limit: 89.0,
        }
    }

    /// Build the camera described by the `camera` and `projection` sections
    pub fn from_config(config: &AppConfig) -> Self {
        let mut camera = Self::new(
            Vec3::from(config.camera.position),
            Projection::from_config(&config.projection),
        );
        camera.pitch_limit = config.camera.pitch_limit;
        camera.rotate(config.camera.yaw, config.camera.pitch);

        log::info!(
            "Camera at {:?}, yaw {:.1}, pitch {:.1}, {:?}",
            camera.position,
            camera.yaw,
            camera.pitch,
            config.projection.mode
        );
        camera
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Turn by the given yaw and pitch deltas in degrees
    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        // Clamp pitch so the view never flips over the pole
        self.pitch = (self.pitch + delta_pitch).clamp(-self.pitch_limit, self.pitch_limit);
    }

    /// Turn to face `target`
    pub fn look_at(&mut self, target: Vec3) {
        let dir = (target - self.position).normalize();
        if dir == Vec3::ZERO {
            log::warn!("look_at target coincides with camera position; orientation unchanged");
            return;
        }
        self.yaw = rad_to_deg((-dir.x).atan2(-dir.z));
        self.pitch = rad_to_deg(dir.y.clamp(-1.0, 1.0).asin())
            .clamp(-self.pitch_limit, self.pitch_limit);
    }

    /// Move in the camera's local frame
    pub fn move_local(&mut self, forward: f32, right: f32, up: f32) {
        self.position += self.forward() * forward + self.right() * right + self.up() * up;
    }

    /// World-space orientation
    pub fn orientation(&self) -> Quat {
        Quat::from_axis_angle(Vec3::Y, self.yaw) * Quat::from_axis_angle(Vec3::X, self.pitch)
    }

    fn direction(&self, local: Vec3) -> Vec3 {
        self.orientation().to_mat4().mul_vec4(local.extend(0.0)).truncate()
    }

    /// Unit vector the camera looks along
    pub fn forward(&self) -> Vec3 {
        self.direction(-Vec3::Z)
    }

    pub fn right(&self) -> Vec3 {
        self.direction(Vec3::X)
    }

    pub fn up(&self) -> Vec3 {
        self.direction(Vec3::Y)
    }

    /// World-to-camera matrix
    pub fn view(&self) -> Mat4 {
        self.orientation().conjugate().to_mat4() * Mat4::translate(-self.position)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection.matrix()
    }

    /// `projection * view`
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view()
    }

    /// Project a world-space point to normalized device coordinates
    pub fn project(&self, p: Vec3) -> Vec3 {
        let clip: Vec4 = self.view_projection() * p.extend(1.0);
        clip.truncate() / clip.w
    }
}
