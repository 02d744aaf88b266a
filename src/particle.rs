// Simple particle struct to keep track of individual position, velocity, size, and color

use crate::color::Color;
use crate::config::{BoundaryPolicy, FieldConfig};
use rand::Rng;
use vecmath::Vector2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub radius: f64,
    pub opacity: f64,
    pub color: Color,
}

impl Particle {
    // Per-axis speed bound, in pixels per frame
    pub const MAX_SPEED: f64 = 0.5;

    pub fn new(
        pos: Vector2<f64>,
        vel: Vector2<f64>,
        radius: f64,
        opacity: f64,
        color: Color,
    ) -> Particle {
        Particle {
            pos,
            vel,
            radius,
            opacity,
            color,
        }
    }

    pub fn random<R: Rng>(
        rng: &mut R,
        width: u32,
        height: u32,
        config: &FieldConfig,
        color: Color,
    ) -> Particle {
        let pos_x = rng.gen::<f64>() * width as f64;
        let pos_y = rng.gen::<f64>() * height as f64;
        let vel_x = rng.gen::<f64>() * 2.0 * Particle::MAX_SPEED - Particle::MAX_SPEED;
        let vel_y = rng.gen::<f64>() * 2.0 * Particle::MAX_SPEED - Particle::MAX_SPEED;
        let (min_radius, max_radius) = config.radius_range;
        let (min_opacity, max_opacity) = config.opacity_range;
        let radius = rng.gen::<f64>() * (max_radius - min_radius) + min_radius;
        let opacity = rng.gen::<f64>() * (max_opacity - min_opacity) + min_opacity;
        Particle::new([pos_x, pos_y], [vel_x, vel_y], radius, opacity, color)
    }

    pub fn step(&mut self, width: f64, height: f64, boundary: BoundaryPolicy) {
        self.pos = vecmath::vec2_add(self.pos, self.vel);
        let bounds = [width, height];
        for axis in 0..2 {
            let max = bounds[axis];
            let p = self.pos[axis];
            if p >= 0.0 && p <= max {
                continue;
            }
            match boundary {
                BoundaryPolicy::Reflect => {
                    self.vel[axis] *= -1.0;
                    self.pos[axis] = p.max(0.0).min(max);
                }
                BoundaryPolicy::Wrap => {
                    self.pos[axis] = if p < 0.0 { max } else { 0.0 };
                }
            }
        }
    }

    pub fn distance_squared(&self, other: &Particle) -> f64 {
        vecmath::vec2_square_len(vecmath::vec2_sub(self.pos, other.pos))
    }
}
