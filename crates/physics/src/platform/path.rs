//! Waypoint traversal state machine.

use glam::Vec2;

use crate::movement::ConfigError;

/// Traversal state over an ordered sequence of world-space waypoints.
///
/// Tracks which segment the platform is on and how far along it is; the
/// linear percentage is remapped by an easing curve before interpolating.
/// Non-cyclic paths ping-pong by reversing the waypoint sequence at the
/// end; cyclic paths wrap around to the first waypoint.
#[derive(Debug, Clone)]
pub struct WaypointPath {
    /// World-space waypoints, converted from local offsets once at
    /// construction. Reversed in place at a ping-pong turnaround.
    waypoints: Vec<Vec2>,
    speed: f32,
    cyclic: bool,
    wait_time: f32,
    ease_amount: f32,

    from_index: usize,
    percent_between_waypoints: f32,
    next_move_time: f32,
}

impl WaypointPath {
    /// Build a path from local offsets anchored at `origin`.
    ///
    /// Rejects paths with fewer than two waypoints, coincident adjacent
    /// waypoints (traversal would divide by zero), and non-positive speed.
    pub fn new(
        origin: Vec2,
        local_waypoints: &[Vec2],
        speed: f32,
        cyclic: bool,
        wait_time: f32,
        ease_amount: f32,
    ) -> Result<Self, ConfigError> {
        if local_waypoints.len() < 2 {
            return Err(ConfigError::TooFewWaypoints(local_waypoints.len()));
        }
        if speed <= 0.0 {
            return Err(ConfigError::NonPositiveSpeed(speed));
        }

        let waypoints: Vec<Vec2> = local_waypoints.iter().map(|w| *w + origin).collect();

        // Only segments that traversal can actually reach need checking:
        // the wrap-around segment exists for cyclic paths alone.
        let segments = if cyclic {
            waypoints.len()
        } else {
            waypoints.len() - 1
        };
        for i in 0..segments {
            let j = (i + 1) % waypoints.len();
            if (waypoints[i] - waypoints[j]).length_squared() == 0.0 {
                return Err(ConfigError::ZeroLengthSegment(i, j));
            }
        }

        Ok(Self {
            waypoints,
            speed,
            cyclic,
            wait_time,
            ease_amount,
            from_index: 0,
            percent_between_waypoints: 0.0,
            next_move_time: f32::NEG_INFINITY,
        })
    }

    /// Advance traversal by one tick and return the displacement the
    /// platform should move by. `position` is the platform's current
    /// position, `now` the simulation clock.
    pub fn step(&mut self, position: Vec2, dt: f32, now: f32) -> Vec2 {
        if now < self.next_move_time {
            return Vec2::ZERO;
        }

        self.from_index %= self.waypoints.len();
        let to_index = (self.from_index + 1) % self.waypoints.len();
        let from = self.waypoints[self.from_index];
        let to = self.waypoints[to_index];

        let distance = from.distance(to);
        self.percent_between_waypoints += dt * self.speed / distance;
        self.percent_between_waypoints = self.percent_between_waypoints.clamp(0.0, 1.0);
        let eased = self.ease(self.percent_between_waypoints);

        let new_position = from.lerp(to, eased);

        if self.percent_between_waypoints >= 1.0 {
            self.percent_between_waypoints = 0.0;
            self.from_index += 1;

            if !self.cyclic && self.from_index >= self.waypoints.len() - 1 {
                // Ping-pong: start over with the order reversed.
                self.from_index = 0;
                self.waypoints.reverse();
            }
            self.next_move_time = now + self.wait_time;
        }

        new_position - position
    }

    /// Remap the linear traversal percentage. Identity at `ease_amount` 0;
    /// larger values slow the ends and speed up the middle.
    fn ease(&self, x: f32) -> f32 {
        let a = self.ease_amount + 1.0;
        let xa = x.powf(a);
        xa / (xa + (1.0 - x).powf(a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_path(cyclic: bool, wait_time: f32) -> WaypointPath {
        WaypointPath::new(
            Vec2::ZERO,
            &[Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(2.0, 0.0)],
            1.0,
            cyclic,
            wait_time,
            0.0,
        )
        .unwrap()
    }

    /// Run the path to completion of the current segment and return the
    /// accumulated position.
    fn run(path: &mut WaypointPath, position: &mut Vec2, now: &mut f32, ticks: usize) {
        let dt = 0.05;
        for _ in 0..ticks {
            *position += path.step(*position, dt, *now);
            *now += dt;
        }
    }

    #[test]
    fn test_rejects_degenerate_configs() {
        assert!(matches!(
            WaypointPath::new(Vec2::ZERO, &[Vec2::ZERO], 1.0, false, 0.0, 0.0),
            Err(ConfigError::TooFewWaypoints(1))
        ));
        assert!(matches!(
            WaypointPath::new(Vec2::ZERO, &[Vec2::ZERO, Vec2::ZERO], 1.0, false, 0.0, 0.0),
            Err(ConfigError::ZeroLengthSegment(0, 1))
        ));
        assert!(matches!(
            WaypointPath::new(
                Vec2::ZERO,
                &[Vec2::ZERO, Vec2::new(1.0, 0.0)],
                0.0,
                false,
                0.0,
                0.0
            ),
            Err(ConfigError::NonPositiveSpeed(_))
        ));
        // Non-cyclic paths never traverse the wrap-around segment, so a
        // shared first/last waypoint is fine there.
        assert!(WaypointPath::new(
            Vec2::ZERO,
            &[Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::ZERO],
            1.0,
            false,
            0.0,
            0.0
        )
        .is_ok());
    }

    #[test]
    fn test_ease_identity_at_zero() {
        let path = straight_path(false, 0.0);
        for x in [0.0, 0.25, 0.5, 0.75, 1.0] {
            assert!((path.ease(x) - x).abs() < 1e-6);
        }
    }

    #[test]
    fn test_ease_is_symmetric_and_clamped() {
        let mut path = straight_path(false, 0.0);
        path.ease_amount = 1.5;
        assert_eq!(path.ease(0.0), 0.0);
        assert_eq!(path.ease(1.0), 1.0);
        assert!((path.ease(0.5) - 0.5).abs() < 1e-6);
        // Slow near the ends
        assert!(path.ease(0.1) < 0.1);
        assert!(path.ease(0.9) > 0.9);
    }

    #[test]
    fn test_ping_pong_traversal_order() {
        let mut path = straight_path(false, 0.0);
        let mut position = Vec2::ZERO;
        let mut now = 0.0;

        let mut trace = vec![position.x];
        for _ in 0..200 {
            position += path.step(position, 0.05, now);
            now += 0.05;
            trace.push(position.x);
        }

        // Both ends are reached, and the platform never overshoots either.
        assert!(trace.iter().any(|x| (x - 2.0).abs() < 1e-2));
        assert!(trace.iter().skip(50).any(|x| x.abs() < 1e-2));
        assert!(trace.iter().all(|&x| (-1e-3..=2.0 + 1e-3).contains(&x)));

        // Direction only ever reverses at the endpoints: the middle
        // waypoint is passed through, never bounced off.
        for w in trace.windows(3) {
            let d0 = w[1] - w[0];
            let d1 = w[2] - w[1];
            if d0 != 0.0 && d1 != 0.0 && d0.signum() != d1.signum() {
                let turn = w[1];
                assert!(
                    turn.abs() < 1e-2 || (turn - 2.0).abs() < 1e-2,
                    "reversed mid-path at x={turn}"
                );
            }
        }
    }

    #[test]
    fn test_cyclic_wraps_through_last_segment() {
        let mut path = WaypointPath::new(
            Vec2::ZERO,
            &[Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)],
            1.0,
            true,
            0.0,
            0.0,
        )
        .unwrap();
        let mut position = Vec2::ZERO;
        let mut now = 0.0;

        // Total loop length is 1 + 1 + sqrt(2); somewhere past that much
        // travel the platform has come back through the start.
        let mut best = f32::MAX;
        for _ in 0..75 {
            position += path.step(position, 0.05, now);
            now += 0.05;
            if now > 3.0 {
                best = best.min(position.distance(Vec2::ZERO));
            }
        }
        assert!(best < 0.06, "closest return distance {best}");
    }

    #[test]
    fn test_wait_time_pauses_at_waypoint() {
        let mut path = straight_path(false, 0.5);
        let mut position = Vec2::ZERO;
        let mut now = 0.0;

        // Reach the first waypoint (1 unit at speed 1 = 1 second).
        run(&mut path, &mut position, &mut now, 21);
        assert!((position.x - 1.0).abs() < 1e-3);

        // The next ticks inside the wait window produce no movement.
        let before = position;
        run(&mut path, &mut position, &mut now, 8);
        assert_eq!(position, before);

        // Movement resumes after the wait.
        run(&mut path, &mut position, &mut now, 4);
        assert!(position.x > 1.0);
    }
}
