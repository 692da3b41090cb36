//! Colour helpers behind the animated parts of the UI.
//!
//! Everything here is a pure function of its inputs; callers derive the phase
//! from a frame counter or from elapsed wall-clock time.

/// Phase step applied to the logo on every animation frame, in degrees
pub const LOGO_PHASE_STEP: f64 = 2.0;

/// Number of concentric rings drawn around the countdown
pub const RING_COUNT: usize = 3;

const ORBIT_RADIUS: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

fn channel(level: f64) -> u8 {
    (level.clamp(0.0, 1.0) * 255.0) as u8
}

/// Standard HSV to RGB conversion. Hue wraps modulo 360.
pub fn hsv_to_rgb(hue_degrees: f64, saturation: f64, value: f64) -> Rgb {
    if saturation <= 0.0 {
        let v = channel(value);
        return Rgb::new(v, v, v);
    }

    let sector = hue_degrees.rem_euclid(360.0) / 60.0;
    let i = sector.floor();
    let f = sector - i;
    let p = value * (1.0 - saturation);
    let q = value * (1.0 - saturation * f);
    let t = value * (1.0 - saturation * (1.0 - f));

    let (r, g, b) = match i as u8 {
        0 => (value, t, p),
        1 => (q, value, p),
        2 => (p, value, t),
        3 => (p, q, value),
        4 => (t, p, value),
        _ => (value, p, q),
    };
    Rgb::new(channel(r), channel(g), channel(b))
}

/// Logo colour for a phase in degrees: three sine waves 120° apart.
pub fn logo_cycle_phase(phase: f64) -> Rgb {
    let wave = |offset: f64| channel((phase + offset).to_radians().sin().abs());
    Rgb::new(wave(0.0), wave(120.0), wave(240.0))
}

/// Frame-driven phase counter for the sidebar logo
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LogoCycle {
    phase: f64,
}

impl LogoCycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self) {
        self.phase = (self.phase + LOGO_PHASE_STEP) % 360.0;
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn color(&self) -> Rgb {
        logo_cycle_phase(self.phase)
    }
}

/// Placement and tint of one animated ring at a moment in time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingPhase {
    /// Multiplier applied to the base radius
    pub radius_scale: f64,
    pub orbit_offset_x: f64,
    pub orbit_offset_y: f64,
    /// Hue in degrees, `[0, 360)`
    pub hue: f64,
}

impl RingPhase {
    pub fn color(&self) -> Rgb {
        hsv_to_rgb(self.hue, 1.0, 1.0)
    }
}

/// Ring `ring_index` breathes at its own speed while orbiting the centre;
/// outer rings are larger, slower to breathe and faster to orbit.
pub fn ring_phase(elapsed_seconds: f64, ring_index: usize) -> RingPhase {
    let i = ring_index as f64;

    let breath = elapsed_seconds * (2.0 - i * 0.5);
    let scale = 0.1 * (breath * 2.0).sin() + 1.0;

    let orbit_speed = 2.0 * (i + 1.0);
    let orbit_angle = elapsed_seconds * orbit_speed;

    RingPhase {
        radius_scale: (1.0 + i * 0.2) * scale,
        orbit_offset_x: orbit_angle.cos() * ORBIT_RADIUS,
        orbit_offset_y: orbit_angle.sin() * ORBIT_RADIUS,
        hue: (elapsed_seconds * 50.0 + i * 30.0).rem_euclid(360.0),
    }
}

/// Colour of the countdown digits
pub fn timer_pulse_color(elapsed_seconds: f64) -> Rgb {
    hsv_to_rgb((elapsed_seconds * 50.0).rem_euclid(360.0), 0.7, 1.0)
}

/// Rotation of the dotted ring pattern, in `[0, 20)`
pub fn dash_offset(elapsed_seconds: f64) -> usize {
    ((elapsed_seconds * 50.0) as i64).rem_euclid(20) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_hues() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), Rgb::new(255, 0, 0));
        assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0), Rgb::new(0, 255, 0));
        assert_eq!(hsv_to_rgb(240.0, 1.0, 1.0), Rgb::new(0, 0, 255));
    }

    #[test]
    fn secondary_hues() {
        assert_eq!(hsv_to_rgb(60.0, 1.0, 1.0), Rgb::new(255, 255, 0));
        assert_eq!(hsv_to_rgb(180.0, 1.0, 1.0), Rgb::new(0, 255, 255));
        assert_eq!(hsv_to_rgb(300.0, 1.0, 1.0), Rgb::new(255, 0, 255));
    }

    #[test]
    fn zero_saturation_is_gray() {
        for hue in [0.0, 45.0, 200.0, 359.0] {
            let c = hsv_to_rgb(hue, 0.0, 0.5);
            assert_eq!(c.r, c.g);
            assert_eq!(c.g, c.b);
            assert_eq!(c.r, 127);
        }
        assert_eq!(hsv_to_rgb(10.0, 0.0, 1.0), Rgb::new(255, 255, 255));
    }

    #[test]
    fn hue_wraps_around() {
        assert_eq!(hsv_to_rgb(360.0, 1.0, 1.0), hsv_to_rgb(0.0, 1.0, 1.0));
        assert_eq!(hsv_to_rgb(-120.0, 1.0, 1.0), hsv_to_rgb(240.0, 1.0, 1.0));
    }

    #[test]
    fn hex_formatting() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0).to_hex(), "#ff0000");
        assert_eq!(Rgb::new(0, 204, 255).to_hex(), "#00ccff");
    }

    #[test]
    fn logo_cycle_at_known_phases() {
        // sin(0)=0, |sin(120°)|=|sin(240°)|≈0.866
        let c = logo_cycle_phase(0.0);
        assert_eq!(c.r, 0);
        assert_eq!(c.g, 220);
        assert_eq!(c.b, 220);

        let c = logo_cycle_phase(90.0);
        assert_eq!(c.r, 255);
    }

    #[test]
    fn logo_cycle_is_deterministic_and_wraps() {
        let mut cycle = LogoCycle::new();
        for _ in 0..180 {
            cycle.advance();
        }
        assert!(cycle.phase() < 1e-9);
        assert_eq!(logo_cycle_phase(42.0), logo_cycle_phase(42.0));
    }

    #[test]
    fn rings_differ_and_stay_bounded() {
        for step in 0..200 {
            let t = step as f64 * 0.05;
            for i in 0..RING_COUNT {
                let ring = ring_phase(t, i);
                let base = 1.0 + i as f64 * 0.2;
                assert!(ring.radius_scale >= base * 0.9 - 1e-9);
                assert!(ring.radius_scale <= base * 1.1 + 1e-9);
                let orbit = (ring.orbit_offset_x.powi(2) + ring.orbit_offset_y.powi(2)).sqrt();
                assert!((orbit - ORBIT_RADIUS).abs() < 1e-9);
                assert!((0.0..360.0).contains(&ring.hue));
            }
        }
        assert_ne!(ring_phase(1.0, 0), ring_phase(1.0, 1));
    }

    #[test]
    fn ring_at_time_zero() {
        let ring = ring_phase(0.0, 2);
        assert!((ring.radius_scale - 1.4).abs() < 1e-12);
        assert!((ring.orbit_offset_x - ORBIT_RADIUS).abs() < 1e-12);
        assert_eq!(ring.orbit_offset_y, 0.0);
        assert_eq!(ring.hue, 60.0);
        assert_eq!(ring.color(), Rgb::new(255, 255, 0));
    }

    #[test]
    fn dash_offset_cycles() {
        assert_eq!(dash_offset(0.0), 0);
        assert_eq!(dash_offset(0.1), 5);
        assert_eq!(dash_offset(0.4), 0);
        assert!(dash_offset(123.456) < 20);
    }

    #[test]
    fn timer_pulse_is_desaturated() {
        let c = timer_pulse_color(0.0);
        assert_eq!(c.r, 255);
        assert!(c.g > 0 && c.b > 0);
    }
}
