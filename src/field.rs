// The particle field: owns the particles for one surface, moves them every
// frame and draws them plus the links between close neighbours.

use crate::color::Color;
use crate::config::{FieldConfig, LinkStyle};
use crate::particle::Particle;
use crate::surface::Surface;
use rand::rngs::StdRng;
use rand::SeedableRng;

// Pair of particle indices closer than the connect distance
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub distance: f64,
}

pub struct ParticleField {
    width: u32,
    height: u32,
    accent: Color,
    config: FieldConfig,
    particles: Vec<Particle>,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(config: FieldConfig) -> ParticleField {
        ParticleField::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_seed(config: FieldConfig, seed: u64) -> ParticleField {
        ParticleField::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: FieldConfig, rng: StdRng) -> ParticleField {
        ParticleField {
            width: 0,
            height: 0,
            accent: config.accent,
            config,
            particles: Vec::new(),
            rng,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn accent(&self) -> Color {
        self.accent
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    // Sizes the field and replaces every particle with a freshly drawn set.
    pub fn initialize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        let count = self.config.particle_count(width, height);
        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            let p = Particle::random(&mut self.rng, width, height, &self.config, self.accent);
            self.particles.push(p);
        }
    }

    // Resizing never carries particles over; the collection is rebuilt.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.initialize(width, height);
    }

    // Swaps the tunables and rebuilds the particles for the current size.
    pub fn reconfigure(&mut self, config: FieldConfig) {
        self.accent = config.accent;
        self.config = config;
        self.initialize(self.width, self.height);
    }

    // New accent applies to existing particles immediately and to links.
    pub fn set_accent(&mut self, accent: Color) {
        self.accent = accent;
        self.config.accent = accent;
        for p in &mut self.particles {
            p.color = accent;
        }
    }

    pub fn advance(&mut self) {
        let width = self.width as f64;
        let height = self.height as f64;
        let boundary = self.config.boundary;
        for particle in &mut self.particles {
            particle.step(width, height, boundary);
        }
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear(self.width as f64, self.height as f64);
        for p in &self.particles {
            surface.fill_circle(p.pos[0], p.pos[1], p.radius, p.color, p.opacity);
        }
        self.for_each_link(|link| {
            let from = self.particles[link.a].pos;
            let to = self.particles[link.b].pos;
            surface.stroke_line(from, to, self.accent, self.link_opacity(link.distance));
        });
    }

    // One display tick: move everything, then draw it.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.advance();
        self.render(surface);
    }

    pub fn connections(&self) -> Vec<Link> {
        let mut links = Vec::new();
        self.for_each_link(|link| links.push(link));
        links
    }

    fn for_each_link<F: FnMut(Link)>(&self, mut f: F) {
        let threshold = self.config.connect_distance;
        let threshold_sq = threshold * threshold;
        for i in 0..self.particles.len() {
            for j in i + 1..self.particles.len() {
                let dist_sq = self.particles[i].distance_squared(&self.particles[j]);
                if dist_sq < threshold_sq {
                    f(Link {
                        a: i,
                        b: j,
                        distance: dist_sq.sqrt(),
                    });
                }
            }
        }
    }

    fn link_opacity(&self, distance: f64) -> f64 {
        match self.config.link_style {
            LinkStyle::Constant => self.config.link_alpha,
            LinkStyle::Fade => {
                self.config.link_alpha * (1.0 - distance / self.config.connect_distance)
            }
        }
    }

    // Test and host hook: place particles directly instead of drawing them
    pub fn set_particles(&mut self, particles: Vec<Particle>) {
        self.particles = particles;
    }
}
