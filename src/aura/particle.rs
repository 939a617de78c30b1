// src/aura/particle.rs
//! A single fading, growing radial-gradient particle.

use rand::Rng;

use super::surface::{Point, RadialGradient, Surface};
use crate::color::ColorRgb;

/// Opacity every particle is born with.
pub const INITIAL_ALPHA: f32 = 0.1;
/// Radius gained per update, in canvas units.
pub const RADIUS_GROWTH: f32 = 0.2;
/// Smallest initial radius; the random part scales with the canvas width.
pub const MIN_RADIUS: f32 = 400.0;

/// Fade direction. Flips once, from `FadingIn` to `FadingOut`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    FadingIn,
    FadingOut,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    position: Point,
    radius: f32,
    color: ColorRgb,
    alpha: f32,
    max_alpha: f32,
    fade_in: f32,
    fade_out: f32,
    phase: Phase,
}

impl Particle {
    /// Spawn a particle at `position` with randomized envelope parameters.
    ///
    /// Initial radius is `random * canvas_width + MIN_RADIUS`; the peak
    /// opacity is in `[0.8, 1.0)` and both fade rates in `[0.005, 0.015)`.
    pub fn spawn<R: Rng>(
        position: Point,
        color: ColorRgb,
        canvas_width: f32,
        rng: &mut R,
    ) -> Self {
        let radius = rng.random::<f32>() * canvas_width + MIN_RADIUS;
        let max_alpha = 0.8 + rng.random::<f32>() * 0.2;
        let fade_in = 0.005 + rng.random::<f32>() * 0.01;
        let fade_out = 0.005 + rng.random::<f32>() * 0.01;
        Self::with_envelope(position, radius, color, max_alpha, fade_in, fade_out)
    }

    /// Build a particle with explicit envelope parameters.
    pub fn with_envelope(
        position: Point,
        radius: f32,
        color: ColorRgb,
        max_alpha: f32,
        fade_in: f32,
        fade_out: f32,
    ) -> Self {
        Self {
            position,
            radius,
            color,
            alpha: INITIAL_ALPHA,
            max_alpha,
            fade_in,
            fade_out,
            phase: Phase::FadingIn,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn color(&self) -> ColorRgb {
        self.color
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn max_alpha(&self) -> f32 {
        self.max_alpha
    }

    pub fn fade_rates(&self) -> (f32, f32) {
        (self.fade_in, self.fade_out)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Faded out completely; removed on the next engine pass.
    pub fn is_spent(&self) -> bool {
        self.alpha <= 0.0
    }

    /// Paint the particle as a soft disc whose center opacity is its alpha.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let mut gradient = RadialGradient::new(self.position, 0.0, self.radius);
        gradient.add_color_stop(0.0, self.color.with_alpha(self.alpha));
        gradient.add_color_stop(1.0, self.color.with_alpha(0.0));

        surface.save();
        surface.set_global_alpha(self.alpha);
        surface.fill_disc(self.position, self.radius, &gradient);
        surface.restore();
    }

    /// Advance one frame of the fade envelope and grow the radius.
    pub fn advance(&mut self) {
        match self.phase {
            Phase::FadingIn => {
                self.alpha += self.fade_in;
                if self.alpha >= self.max_alpha {
                    self.alpha = self.max_alpha;
                    self.phase = Phase::FadingOut;
                }
            }
            Phase::FadingOut => {
                self.alpha -= self.fade_out;
            }
        }

        self.radius += RADIUS_GROWTH;

        if self.alpha <= 0.0 {
            self.alpha = 0.0;
        }
    }

    /// Draw, then advance.
    pub fn update<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.draw(surface);
        self.advance();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn particle(fade_in: f32, fade_out: f32) -> Particle {
        Particle::with_envelope(
            Point::new(10.0, 20.0),
            500.0,
            ColorRgb::new(200, 100, 50),
            0.9,
            fade_in,
            fade_out,
        )
    }

    #[test]
    fn spawn_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let p = Particle::spawn(Point::new(0.0, 0.0), ColorRgb::BLACK, 1920.0, &mut rng);
            assert_eq!(p.alpha(), INITIAL_ALPHA);
            assert_eq!(p.phase(), Phase::FadingIn);
            assert!((MIN_RADIUS..MIN_RADIUS + 1920.0).contains(&p.radius()));
            assert!((0.8..1.0).contains(&p.max_alpha()));
            let (fade_in, fade_out) = p.fade_rates();
            assert!((0.005..0.015).contains(&fade_in));
            assert!((0.005..0.015).contains(&fade_out));
        }
    }

    #[test]
    fn radius_range_follows_canvas_width() {
        let mut rng = StdRng::seed_from_u64(3);
        let narrow: f32 = (0..200)
            .map(|_| Particle::spawn(Point::default(), ColorRgb::BLACK, 100.0, &mut rng).radius())
            .fold(0.0, f32::max);
        assert!(narrow < MIN_RADIUS + 100.0);
    }

    #[test]
    fn envelope_flips_once_then_fades_to_zero() {
        let mut p = particle(0.1, 0.05);
        let mut flips = 0;
        let mut last_phase = p.phase();
        let mut last_alpha = p.alpha();
        let mut last_radius = p.radius();

        for _ in 0..100 {
            p.advance();
            if p.phase() != last_phase {
                flips += 1;
                assert_eq!(p.alpha(), p.max_alpha());
            }
            match p.phase() {
                Phase::FadingIn => assert!(p.alpha() >= last_alpha),
                Phase::FadingOut if last_phase == Phase::FadingOut => {
                    assert!(p.alpha() <= last_alpha)
                }
                Phase::FadingOut => {}
            }
            assert!((p.radius() - last_radius - RADIUS_GROWTH).abs() < 1e-3);
            assert!(p.alpha() >= 0.0);

            last_phase = p.phase();
            last_alpha = p.alpha();
            last_radius = p.radius();
        }

        assert_eq!(flips, 1);
        assert_eq!(p.phase(), Phase::FadingOut);
        assert!(p.is_spent());
        assert_eq!(p.alpha(), 0.0);
    }

    #[test]
    fn fade_in_reaches_peak_after_expected_steps() {
        let mut p = particle(0.25, 0.1);
        // 0.1 -> 0.35 -> 0.6 -> 0.85 -> clamped to 0.9
        for _ in 0..3 {
            p.advance();
            assert_eq!(p.phase(), Phase::FadingIn);
        }
        p.advance();
        assert_eq!(p.phase(), Phase::FadingOut);
        assert_eq!(p.alpha(), 0.9);
    }
}
