//! Small math helpers shared by the movement and AI systems.

use std::f32::consts::PI;

/// Wrap an angle to [-π, π].
pub fn wrap_angle(angle: f32) -> f32 {
    let mut a = angle % (2.0 * PI);
    if a > PI {
        a -= 2.0 * PI;
    } else if a < -PI {
        a += 2.0 * PI;
    }
    a
}

/// Interpolate `current` toward `target` by factor `t`, always taking
/// the shortest angular path.
pub fn lerp_angle(current: f32, target: f32, t: f32) -> f32 {
    let diff = wrap_angle(target - current);
    wrap_angle(current + diff * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_wrap_angle_bounds() {
        assert!(close(wrap_angle(3.0 * PI), PI));
        assert!(close(wrap_angle(-3.0 * PI), -PI));
        assert!(close(wrap_angle(0.5), 0.5));
    }

    #[test]
    fn test_lerp_angle_takes_shortest_path() {
        // From just below +π to just above -π the short way is across
        // the wrap, not back through zero.
        let current = PI - 0.1;
        let target = -PI + 0.1;
        let next = lerp_angle(current, target, 0.5);
        assert!(next > current || next < -PI + 0.2);
        assert!(close(lerp_angle(current, target, 1.0), wrap_angle(target)));
    }

    #[test]
    fn test_lerp_angle_identity() {
        assert!(close(lerp_angle(1.0, 1.0, 0.2), 1.0));
    }
}
