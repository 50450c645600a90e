//! Placement of the "No" button that runs away from the pointer.
//!
//! Offsets are relative to the centre of the proposal card. A new spot must
//! be at least `MIN_DISTANCE` away from the centre on one axis.

use rand::Rng;

const BUTTON_WIDTH: f64 = 150.0;
const BUTTON_HEIGHT: f64 = 60.0;
const EDGE_MARGIN: f64 = 100.0;
pub const MIN_DISTANCE: f64 = 200.0;

/// Rejection sampling gives up after this many misses and samples the valid band directly.
const MAX_SAMPLES: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Where the button starts, just right of "Yes".
    pub const INITIAL: Position = Position { x: 100.0, y: 0.0 };

    pub fn is_clear_of_centre(&self, min_distance: f64) -> bool {
        self.x.abs() >= min_distance || self.y.abs() >= min_distance
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Largest offsets that keep the button on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn contains(&self, p: Position) -> bool {
        p.x.abs() <= self.max_x && p.y.abs() <= self.max_y
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            max_x: ((self.width - BUTTON_WIDTH) / 2.0 - EDGE_MARGIN).max(0.0),
            max_y: ((self.height - BUTTON_HEIGHT) / 2.0 - EDGE_MARGIN).max(0.0),
        }
    }
}

/// Pick the next spot for the button inside `viewport`.
///
/// When the viewport is too small for either axis to reach `MIN_DISTANCE`,
/// the button goes to a random corner of the bounds instead.
pub fn next_position<R: Rng>(viewport: Viewport, rng: &mut R) -> Position {
    let Bounds { max_x, max_y } = viewport.bounds();
    let x_ok = max_x >= MIN_DISTANCE;
    let y_ok = max_y >= MIN_DISTANCE;

    if !x_ok && !y_ok {
        return Position {
            x: random_sign(rng) * max_x,
            y: random_sign(rng) * max_y,
        };
    }

    for _ in 0..MAX_SAMPLES {
        let candidate = Position {
            x: sample_axis(rng, max_x),
            y: sample_axis(rng, max_y),
        };
        if candidate.is_clear_of_centre(MIN_DISTANCE) {
            return candidate;
        }
    }

    // Narrow band: place one axis directly in [MIN_DISTANCE, max].
    let push_x = match (x_ok, y_ok) {
        (true, true) => rng.random_bool(0.5),
        (x_ok, _) => x_ok,
    };
    if push_x {
        Position {
            x: random_sign(rng) * rng.random_range(MIN_DISTANCE..=max_x),
            y: sample_axis(rng, max_y),
        }
    } else {
        Position {
            x: sample_axis(rng, max_x),
            y: random_sign(rng) * rng.random_range(MIN_DISTANCE..=max_y),
        }
    }
}

fn sample_axis<R: Rng>(rng: &mut R, max: f64) -> f64 {
    if max <= 0.0 {
        return 0.0;
    }
    rng.random_range(-max..=max)
}

fn random_sign<R: Rng>(rng: &mut R) -> f64 {
    if rng.random_bool(0.5) { 1.0 } else { -1.0 }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn bounds_follow_viewport() {
        let b = Viewport::new(1350.0, 860.0).bounds();
        assert_eq!(b, Bounds { max_x: 500.0, max_y: 300.0 });

        let tiny = Viewport::new(100.0, 50.0).bounds();
        assert_eq!(tiny, Bounds { max_x: 0.0, max_y: 0.0 });
    }

    #[test]
    fn positions_are_clear_and_on_screen() {
        let mut rng = StdRng::seed_from_u64(7);
        for viewport in [
            Viewport::new(1920.0, 1080.0),
            Viewport::new(1280.0, 720.0),
            Viewport::new(390.0, 844.0), // phone portrait: only y can escape
            Viewport::new(800.0, 400.0), // only x can escape
            Viewport::new(751.0, 300.0), // x band barely wider than the minimum
        ] {
            let bounds = viewport.bounds();
            for _ in 0..500 {
                let p = next_position(viewport, &mut rng);
                assert!(p.is_clear_of_centre(MIN_DISTANCE), "{p:?} too close in {viewport:?}");
                assert!(bounds.contains(p), "{p:?} outside {bounds:?}");
            }
        }
    }

    #[test]
    fn cramped_viewport_uses_a_corner() {
        let mut rng = StdRng::seed_from_u64(1);
        let viewport = Viewport::new(500.0, 400.0);
        let b = viewport.bounds();
        for _ in 0..20 {
            let p = next_position(viewport, &mut rng);
            assert_eq!(p.x.abs(), b.max_x);
            assert_eq!(p.y.abs(), b.max_y);
        }
    }
}
