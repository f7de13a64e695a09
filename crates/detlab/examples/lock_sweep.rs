//! Sweep a unit probe around the circle and report where each lock opens.
//!
//! Purpose
//! - Show, for every built-in lock, the probe angles that `detect_default`
//!   accepts, next to the closed-form eigen-directions.
//! - Make the effect of the 0.02 collinearity tolerance visible: each
//!   eigen-direction opens a small arc, not a single angle.

use detlab::eigen::{detect_default, real_eigenpairs};
use detlab::presets::Preset;
use detlab::vector::angle;
use nalgebra::Vector2;

const STEPS: usize = 3600;

fn main() {
    for preset in Preset::ALL {
        let m = preset.matrix();
        let mut arcs: Vec<(f64, f64, f64)> = Vec::new();
        let mut open: Option<(f64, f64)> = None;
        for k in 0..=STEPS {
            let deg = 360.0 * k as f64 / STEPS as f64;
            let v = Vector2::new(deg.to_radians().cos(), deg.to_radians().sin());
            let r = detect_default(&m, v);
            match (r.eigenvalue, open) {
                (Some(lambda), None) => open = Some((deg, lambda)),
                (None, Some((start, lambda))) => {
                    arcs.push((start, deg, lambda));
                    open = None;
                }
                _ => {}
            }
        }
        if let Some((start, lambda)) = open {
            arcs.push((start, 360.0, lambda));
        }

        println!("{preset}: {m}");
        for (lambda, dir) in real_eigenpairs(&m) {
            println!(
                "  eigen-direction {:7.2}°  λ = {lambda:.3}",
                angle(dir).to_degrees()
            );
        }
        if arcs.is_empty() {
            println!("  never opens");
        }
        for (start, end, lambda) in arcs {
            println!("  opens on [{start:6.1}°, {end:6.1}°)  λ ≈ {lambda:.3}");
        }
    }
}
