// Tunables for the particle field. Defaults reproduce the portfolio page
// background: up to 100 particles, one per 12000 px², linked within 100 px.

use crate::color::Color;
use wasm_bindgen::prelude::*;

// Upper bound on max_particles; the link pass is O(n²) and runs every frame
pub const PARTICLE_CEILING: u32 = 300;

// What happens when a particle crosses the surface edge
#[wasm_bindgen]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BoundaryPolicy {
    Reflect,
    Wrap,
}

// How link transparency relates to particle distance
#[wasm_bindgen]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LinkStyle {
    Constant,
    Fade,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub max_particles: u32,
    pub density_divisor: f64,
    pub connect_distance: f64,
    pub boundary: BoundaryPolicy,
    pub link_style: LinkStyle,
    pub link_alpha: f64,
    pub radius_range: (f64, f64),
    pub opacity_range: (f64, f64),
    pub accent: Color,
}

impl FieldConfig {
    pub const DEFAULT_MAX_PARTICLES: u32 = 100;
    pub const DEFAULT_DENSITY_DIVISOR: f64 = 12000.0;
    pub const DEFAULT_CONNECT_DISTANCE: f64 = 100.0;
    pub const DEFAULT_LINK_ALPHA: f64 = 0.15;

    pub fn with_max_particles(mut self, max_particles: u32) -> Self {
        self.max_particles = max_particles.min(PARTICLE_CEILING);
        self
    }

    pub fn with_density_divisor(mut self, divisor: f64) -> Self {
        self.density_divisor = if divisor.is_finite() && divisor > 0.0 {
            divisor
        } else {
            FieldConfig::DEFAULT_DENSITY_DIVISOR
        };
        self
    }

    pub fn with_connect_distance(mut self, distance: f64) -> Self {
        self.connect_distance = if distance.is_finite() {
            distance.max(0.0)
        } else {
            FieldConfig::DEFAULT_CONNECT_DISTANCE
        };
        self
    }

    pub fn with_boundary(mut self, boundary: BoundaryPolicy) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn with_links(mut self, style: LinkStyle, alpha: f64) -> Self {
        self.link_style = style;
        self.link_alpha = clamp_unit(alpha);
        self
    }

    pub fn with_radius_range(mut self, min: f64, max: f64) -> Self {
        self.radius_range = ordered(min.max(0.0), max.max(0.0));
        self
    }

    pub fn with_opacity_range(mut self, min: f64, max: f64) -> Self {
        self.opacity_range = ordered(clamp_unit(min), clamp_unit(max));
        self
    }

    pub fn with_accent(mut self, accent: Color) -> Self {
        self.accent = accent;
        self
    }

    // Number of particles a surface of this size holds, never above the ceiling
    // even when max_particles was set on the struct directly
    pub fn particle_count(&self, width: u32, height: u32) -> usize {
        let area = width as f64 * height as f64;
        let by_density = (area / self.density_divisor).floor() as usize;
        by_density.min(self.max_particles.min(PARTICLE_CEILING) as usize)
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            max_particles: FieldConfig::DEFAULT_MAX_PARTICLES,
            density_divisor: FieldConfig::DEFAULT_DENSITY_DIVISOR,
            connect_distance: FieldConfig::DEFAULT_CONNECT_DISTANCE,
            boundary: BoundaryPolicy::Reflect,
            link_style: LinkStyle::Constant,
            link_alpha: FieldConfig::DEFAULT_LINK_ALPHA,
            radius_range: (1.0, 3.0),
            opacity_range: (0.2, 0.6),
            accent: Color::DEFAULT_ACCENT,
        }
    }
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.max(0.0).min(1.0)
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_follows_density_then_cap() {
        let config = FieldConfig::default();
        assert_eq!(config.particle_count(800, 600), 40);
        assert_eq!(config.particle_count(400, 300), 10);
        assert_eq!(config.particle_count(1920, 1080), 100);
        assert_eq!(config.particle_count(0, 1080), 0);
        // 109 x 110 = 11990, just short of one particle
        assert_eq!(config.particle_count(109, 110), 0);
    }

    #[test]
    fn custom_divisor() {
        let config = FieldConfig::default().with_density_divisor(10000.0);
        assert_eq!(config.particle_count(800, 600), 48);
    }

    #[test]
    fn max_particles_is_capped() {
        let config = FieldConfig::default().with_max_particles(10_000);
        assert_eq!(config.max_particles, PARTICLE_CEILING);
        let config = config.with_density_divisor(1.0);
        assert_eq!(config.particle_count(4000, 4000), PARTICLE_CEILING as usize);
    }

    #[test]
    fn ceiling_applies_to_hand_built_config() {
        let mut config = FieldConfig::default();
        config.max_particles = 5000;
        config.density_divisor = 1.0;
        assert_eq!(config.particle_count(200, 200), PARTICLE_CEILING as usize);
    }

    #[test]
    fn bad_values_fall_back() {
        let config = FieldConfig::default()
            .with_density_divisor(0.0)
            .with_connect_distance(f64::NAN)
            .with_links(LinkStyle::Fade, 3.0)
            .with_opacity_range(0.9, -1.0);
        assert_eq!(config.density_divisor, FieldConfig::DEFAULT_DENSITY_DIVISOR);
        assert_eq!(config.connect_distance, FieldConfig::DEFAULT_CONNECT_DISTANCE);
        assert_eq!(config.link_alpha, 1.0);
        assert_eq!(config.opacity_range, (0.0, 0.9));
    }
}
