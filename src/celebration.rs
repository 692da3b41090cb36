use rand::seq::SliceRandom;
use rand::Rng;

use crate::color::{hsv_to_rgb, Rgb};

const MESSAGES: [&str; 6] = [
    "EXCELLENT WORK!",
    "WELL DONE!",
    "GREAT JOB!",
    "CRUSHED IT!",
    "ON FIRE!",
    "KEEP IT UP!",
];

const SPARKS: [char; 6] = ['*', '+', '✦', '•', '★', '✓'];

/// How long the burst stays on screen, in seconds
pub const CELEBRATION_SECS: f64 = 3.0;

/// One glyph of the completion burst
#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub symbol: char,
    /// Degrees; rendered through [`hsv_to_rgb`]
    pub hue: f64,
    pub age: f64,
    pub max_age: f64,
    /// Letters of the message glide to a fixed target and stay there
    pub target: Option<(f64, f64)>,
}

impl Particle {
    fn spark<R: Rng>(x: f64, y: f64, rng: &mut R) -> Self {
        Self {
            x,
            y,
            vel_x: rng.gen_range(-3.0..3.0),
            vel_y: rng.gen_range(-4.0..-1.0),
            symbol: *SPARKS.choose(rng).unwrap_or(&'*'),
            hue: rng.gen_range(0.0..360.0),
            age: 0.0,
            max_age: rng.gen_range(2.0..4.0),
            target: None,
        }
    }

    fn letter<R: Rng>(from: (f64, f64), to: (f64, f64), symbol: char, hue: f64, rng: &mut R) -> Self {
        Self {
            x: from.0,
            y: from.1,
            vel_x: to.0 - from.0,
            vel_y: to.1 - from.1,
            symbol,
            hue,
            age: 0.0,
            max_age: rng.gen_range(3.0..5.0),
            target: Some(to),
        }
    }

    pub fn is_letter(&self) -> bool {
        self.target.is_some()
    }

    pub fn color(&self) -> Rgb {
        let fade = 1.0 - (self.age / self.max_age).min(1.0);
        hsv_to_rgb(self.hue, 0.8, 0.4 + 0.6 * fade)
    }

    /// Advance by `dt` seconds; false once the particle has expired
    fn update(&mut self, dt: f64) -> bool {
        match self.target {
            Some((tx, ty)) => {
                let dist = ((tx - self.x).powi(2) + (ty - self.y).powi(2)).sqrt();
                if dist > 1.0 {
                    self.x += self.vel_x * dt;
                    self.y += self.vel_y * dt;
                    self.vel_x *= 0.95;
                    self.vel_y *= 0.95;
                } else {
                    self.x = tx;
                    self.y = ty;
                    self.vel_x = 0.0;
                    self.vel_y = 0.0;
                }
            }
            None => {
                self.x += self.vel_x * dt;
                self.y += self.vel_y * dt;
                self.vel_y += 15.0 * dt;
            }
        }

        self.age += dt;
        self.age < self.max_age
    }
}

/// Burst of sparks spelling out a congratulation after a finished session
#[derive(Debug)]
pub struct Celebration {
    pub particles: Vec<Particle>,
    pub message: &'static str,
    pub elapsed: f64,
    pub is_active: bool,
    width: f64,
    height: f64,
}

impl Celebration {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
            message: MESSAGES[0],
            elapsed: 0.0,
            is_active: false,
            width: 80.0,
            height: 24.0,
        }
    }

    pub fn start(&mut self, width: u16, height: u16) {
        let mut rng = rand::thread_rng();

        self.particles.clear();
        self.elapsed = 0.0;
        self.is_active = true;
        self.width = width as f64;
        self.height = height as f64;
        self.message = MESSAGES.choose(&mut rng).copied().unwrap_or(MESSAGES[0]);

        let center = (self.width / 2.0, self.height / 2.0);
        self.spell(center, &mut rng);

        for _ in 0..25 {
            let x = center.0 + rng.gen_range(-15.0..15.0);
            let y = center.1 + rng.gen_range(-8.0..8.0);
            self.particles.push(Particle::spark(x, y, &mut rng));
        }
    }

    fn spell<R: Rng>(&mut self, center: (f64, f64), rng: &mut R) {
        let spacing = 2.0;
        let text_width = (self.message.chars().count() as f64 - 1.0) * spacing;
        let left = center.0 - text_width / 2.0;
        let base_hue = rng.gen_range(0.0..360.0);

        for (i, ch) in self.message.chars().enumerate() {
            if ch == ' ' {
                continue;
            }
            let to = (left + i as f64 * spacing, center.1 - 2.0);
            let from = (
                center.0 + rng.gen_range(-10.0..10.0),
                center.1 + rng.gen_range(-5.0..5.0),
            );
            let hue = (base_hue + i as f64 * 24.0) % 360.0;
            self.particles.push(Particle::letter(from, to, ch, hue, rng));
        }
    }

    /// Advance the animation by `dt` seconds
    pub fn update(&mut self, dt: f64) {
        if !self.is_active {
            return;
        }

        self.elapsed += dt;
        if self.elapsed >= CELEBRATION_SECS {
            self.is_active = false;
            self.particles.clear();
            return;
        }

        let (width, height) = (self.width, self.height);
        self.particles.retain_mut(|p| {
            let alive = p.update(dt);
            if p.is_letter() {
                return alive;
            }
            let margin = 5.0;
            let off_screen = p.y > height + margin || p.x < -margin || p.x > width + margin;
            alive && !off_screen
        });
    }
}

impl Default for Celebration {
    fn default() -> Self {
        Self::new()
    }
}
