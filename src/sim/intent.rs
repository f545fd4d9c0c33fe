//! Player intent
//!
//! The core consumes abstracted intent signals only; input capture
//! (keyboard/touch) lives outside the simulation. The host samples its
//! devices and writes this resource once per tick.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::constants::JOYSTICK_DEADZONE;

/// Intent sampled once per tick from the input collaborator.
#[derive(Resource, Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayerIntent {
    #[serde(default)]
    pub forward: bool,
    #[serde(default)]
    pub backward: bool,
    #[serde(default)]
    pub left: bool,
    #[serde(default)]
    pub right: bool,
    #[serde(default)]
    pub sprint: bool,
    #[serde(default)]
    pub jump: bool,
    /// Held attack button; releasing resolves the swing.
    #[serde(default)]
    pub attack: bool,
    /// On-screen joystick, components in [-1, 1]. Overrides the four
    /// directional booleans when its magnitude exceeds the deadzone.
    #[serde(default)]
    pub joystick: [f32; 2],
}

impl PlayerIntent {
    /// Directional booleans after applying the joystick override.
    fn effective_directions(&self) -> (bool, bool, bool, bool) {
        let joystick = Vec2::from_array(self.joystick);
        if joystick.length() > JOYSTICK_DEADZONE {
            (
                joystick.y < 0.0, // forward
                joystick.y > 0.0, // backward
                joystick.x < 0.0, // left
                joystick.x > 0.0, // right
            )
        } else {
            (self.forward, self.backward, self.left, self.right)
        }
    }

    /// Normalized horizontal movement direction (x, z), or `None` when
    /// no direction is held.
    pub fn move_direction(&self) -> Option<Vec2> {
        let (forward, backward, left, right) = self.effective_directions();
        let mut dir = Vec2::ZERO;
        if forward {
            dir.y -= 1.0;
        }
        if backward {
            dir.y += 1.0;
        }
        if left {
            dir.x -= 1.0;
        }
        if right {
            dir.x += 1.0;
        }
        if dir == Vec2::ZERO {
            None
        } else {
            Some(dir.normalize())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_input_gives_no_direction() {
        assert!(PlayerIntent::default().move_direction().is_none());
    }

    #[test]
    fn test_diagonal_is_normalized() {
        let intent = PlayerIntent {
            forward: true,
            right: true,
            ..Default::default()
        };
        let dir = intent.move_direction().unwrap();
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!(dir.x > 0.0 && dir.y < 0.0);
    }

    #[test]
    fn test_opposed_keys_cancel() {
        let intent = PlayerIntent {
            forward: true,
            backward: true,
            ..Default::default()
        };
        assert!(intent.move_direction().is_none());
    }

    #[test]
    fn test_joystick_overrides_booleans() {
        let intent = PlayerIntent {
            forward: true, // keyboard says forward (-z)
            joystick: [0.0, 0.9], // joystick says backward (+z)
            ..Default::default()
        };
        let dir = intent.move_direction().unwrap();
        assert!(dir.y > 0.0);
    }

    #[test]
    fn test_joystick_inside_deadzone_is_ignored() {
        let intent = PlayerIntent {
            forward: true,
            joystick: [0.1, 0.1],
            ..Default::default()
        };
        let dir = intent.move_direction().unwrap();
        assert!(dir.y < 0.0);
    }
}
