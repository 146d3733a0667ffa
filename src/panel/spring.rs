//! Spring settle for the capture sheet
//!
//! Uses time-based analytical solutions rather than frame-by-frame integration,
//! so the settle is independent of the host's frame rate.
//!
//! ## Key Algorithm
//!
//! Non-oscillating condition: `1.0 <= damping / (2.0 * sqrt(stiffness * mass))`
//!
//! ### Critically damped / overdamped formula
//! ```text
//! angular_frequency = -sqrt(stiffness / mass)
//! leftover = -angular_frequency * delta - velocity
//! position(t) = to - (delta + t * leftover) * e^(t * angular_frequency)
//! ```
//!
//! ### Underdamped formula
//! ```text
//! damping_frequency = sqrt(4 * mass * stiffness - damping^2)
//! leftover = (damping * delta - 2 * mass * velocity) / damping_frequency
//! dfm = 0.5 * damping_frequency / mass
//! dm = -0.5 * damping / mass
//! position(t) = to - (cos(t * dfm) * delta + sin(t * dfm) * leftover) * e^(t * dm)
//! ```

use std::f64::consts::E;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub type Num = f64;

/// Numerical derivative step size
const H: Num = 0.001;

/// Distance and speed below which the spring counts as settled
const REST_EPSILON: Num = 0.01;

/// Spring parameters for physics simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringParams {
    pub mass: Num,
    pub damping: Num,
    pub stiffness: Num,
}

impl SpringParams {
    /// Sheet settle: critically damped, `damping = 2 * sqrt(375)`
    pub const PANEL: Self = Self {
        mass: 1.0,
        damping: 38.729_833_462,
        stiffness: 375.0,
    };

    /// Damping ratio (1.0 = critical)
    pub fn damping_ratio(&self) -> Num {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Check if the spring settles without oscillating
    pub fn is_overdamped(&self) -> bool {
        // Tolerance keeps rounded critical constants on the non-oscillating branch
        self.damping_ratio() >= 1.0 - 1e-6
    }
}

impl Default for SpringParams {
    fn default() -> Self {
        Self::PANEL
    }
}

/// Solver function type
type SolverFn = Arc<dyn Fn(Num) -> Num + Send + Sync>;

/// Create solver function for spring animation
fn solve_spring(from: Num, velocity: Num, to: Num, params: &SpringParams) -> SolverFn {
    let stiffness = params.stiffness;
    let damping = params.damping;
    let mass = params.mass;
    let delta = to - from;

    if params.is_overdamped() {
        let angular_frequency = -(stiffness / mass).sqrt();
        let leftover = -angular_frequency * delta - velocity;

        Arc::new(move |t: Num| to - (delta + t * leftover) * E.powf(t * angular_frequency))
    } else {
        let damping_frequency = (4.0 * mass * stiffness - damping.powi(2)).sqrt();
        let leftover = (damping * delta - 2.0 * mass * velocity) / damping_frequency;
        let dfm = 0.5 * damping_frequency / mass;
        let dm = -0.5 * damping / mass;

        Arc::new(move |t: Num| {
            to - ((t * dfm).cos() * delta + (t * dfm).sin() * leftover) * E.powf(t * dm)
        })
    }
}

/// Create velocity function from position function (numerical derivative)
fn get_velocity(f: SolverFn) -> SolverFn {
    Arc::new(move |t: Num| (f(t + H) - f(t - H)) / (2.0 * H))
}

/// Spring animation with analytical solution
pub struct Spring {
    current_position: Num,
    target_position: Num,
    current_time: Num,
    params: SpringParams,
    /// Cached position solver
    current_solver: SolverFn,
    /// Cached velocity function (first derivative)
    get_v: SolverFn,
}

impl std::fmt::Debug for Spring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Spring")
            .field("current_position", &self.current_position)
            .field("target_position", &self.target_position)
            .field("current_time", &self.current_time)
            .field("params", &self.params)
            .finish()
    }
}

impl Spring {
    /// Create a spring resting at `position`
    pub fn new(position: Num, params: SpringParams) -> Self {
        Self {
            current_position: position,
            target_position: position,
            current_time: 0.0,
            params,
            current_solver: Arc::new(move |_| position),
            get_v: Arc::new(|_| 0.0),
        }
    }

    /// Restart the solver from the current position and velocity
    fn reset_solver(&mut self) {
        let cur_v = (self.get_v)(self.current_time);
        self.current_time = 0.0;
        self.current_solver = solve_spring(
            self.current_position,
            cur_v,
            self.target_position,
            &self.params,
        );
        self.get_v = get_velocity(Arc::clone(&self.current_solver));
    }

    /// Check if spring has arrived at target
    pub fn arrived(&self) -> bool {
        (self.target_position - self.current_position).abs() < REST_EPSILON
            && (self.get_v)(self.current_time).abs() < REST_EPSILON
    }

    /// Set position immediately without animation
    pub fn set_position(&mut self, position: Num) {
        self.target_position = position;
        self.current_position = position;
        self.current_solver = Arc::new(move |_| position);
        self.get_v = Arc::new(|_| 0.0);
    }

    /// Animate toward `target` from wherever the spring currently is
    pub fn set_target(&mut self, target: Num) {
        self.target_position = target;
        self.reset_solver();
    }

    /// Advance by `delta` seconds; snaps onto the target once arrived
    pub fn update(&mut self, delta: Num) {
        self.current_time += delta;
        self.current_position = (self.current_solver)(self.current_time);

        if self.arrived() {
            self.set_position(self.target_position);
        }
    }

    /// Get current position
    pub fn position(&self) -> Num {
        self.current_position
    }

    /// Get target position
    pub fn target(&self) -> Num {
        self.target_position
    }

    /// Get current velocity
    pub fn velocity(&self) -> Num {
        (self.get_v)(self.current_time)
    }

    /// Get current params
    pub fn params(&self) -> &SpringParams {
        &self.params
    }
}

impl Clone for Spring {
    fn clone(&self) -> Self {
        Self {
            current_position: self.current_position,
            target_position: self.target_position,
            current_time: self.current_time,
            params: self.params,
            current_solver: Arc::clone(&self.current_solver),
            get_v: Arc::clone(&self.get_v),
        }
    }
}

impl Default for Spring {
    fn default() -> Self {
        Self::new(0.0, SpringParams::PANEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spring_moves_toward_target() {
        let mut spring = Spring::new(0.0, SpringParams::PANEL);
        spring.set_target(100.0);

        for _ in 0..3 {
            spring.update(0.016);
        }

        let pos = spring.position();
        assert!(pos > 0.0, "Spring should move from 0");
        assert!(pos < 100.0, "Spring should not reach target yet");
    }

    #[test]
    fn test_panel_spring_is_critically_damped() {
        let ratio = SpringParams::PANEL.damping_ratio();
        assert!((ratio - 1.0).abs() < 1e-6, "ratio was {}", ratio);
        assert!(SpringParams::PANEL.is_overdamped());
    }

    #[test]
    fn test_critical_spring_never_overshoots() {
        let mut spring = Spring::new(0.0, SpringParams::PANEL);
        spring.set_target(-300.0);

        for _ in 0..200 {
            spring.update(0.016);
            assert!(spring.position() >= -300.0 - 1e-9);
        }
        assert!(spring.arrived());
        assert_eq!(spring.position(), -300.0);
    }

    #[test]
    fn test_underdamped_detection() {
        let params = SpringParams {
            mass: 1.0,
            damping: 5.0,
            stiffness: 100.0,
        };
        assert!(!params.is_overdamped());
    }

    #[test]
    fn test_set_position_rests_immediately() {
        let mut spring = Spring::new(10.0, SpringParams::PANEL);
        spring.set_position(42.0);
        assert!(spring.arrived());
        assert_eq!(spring.target(), 42.0);
        assert_eq!(spring.velocity(), 0.0);
    }
}
