//! Platforms and the solidity state machine
//!
//! Each frame every platform that is neither the ground nor already stood on
//! is re-evaluated against the active color. Standing on a platform latches
//! it solid for the rest of its life.

use serde::{Deserialize, Serialize};

use super::color::GameColor;
use crate::consts::PLATFORM_HEIGHT;

/// Axis-aligned box given by its center and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x - self.width / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width / 2.0
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y - self.height / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Strict overlap; touching edges do not count
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Open horizontal overlap
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.left() < other.right() && self.right() > other.left()
    }
}

/// A colored platform entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    /// Center x
    pub x: f32,
    /// Center y (grows downward)
    pub y: f32,
    pub width: f32,
    pub color: GameColor,
    /// Ground platform: solid forever, never evaluated
    pub always_solid: bool,
    /// Set once the player has stood on it; never cleared
    pub contacted: bool,
    /// Current collision state
    pub solid: bool,
}

impl Platform {
    /// A regular colored platform; starts non-solid until the first evaluation
    pub fn new(id: u32, x: f32, y: f32, width: f32, color: GameColor) -> Self {
        Self {
            id,
            x,
            y,
            width,
            color,
            always_solid: false,
            contacted: false,
            solid: false,
        }
    }

    /// The always-solid ground
    pub fn ground(id: u32, x: f32, y: f32, width: f32) -> Self {
        Self {
            always_solid: true,
            solid: true,
            ..Self::new(id, x, y, width, GameColor::NONE)
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.width, PLATFORM_HEIGHT)
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y - PLATFORM_HEIGHT / 2.0
    }

    /// Whether solidity is frozen (ground or latched)
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.always_solid || self.contacted
    }

    /// Apply a freshly computed solidity; ignored once locked
    pub fn set_solid(&mut self, solid: bool) {
        if self.is_locked() {
            return;
        }
        self.solid = solid;
    }

    /// Latch the platform solid. Returns true only on the first call.
    pub fn mark_contacted(&mut self) -> bool {
        if self.contacted {
            return false;
        }
        self.contacted = true;
        self.solid = true;
        true
    }
}

/// Solidity rule for an unlocked platform: its bits must all be held
#[inline]
pub fn solid_for(color: GameColor, active: GameColor) -> bool {
    active.contains(color)
}

/// Re-evaluate every unlocked platform against the active color
pub fn update_solidity(platforms: &mut [Platform], active: GameColor) {
    for platform in platforms.iter_mut().filter(|p| !p.is_locked()) {
        platform.set_solid(solid_for(platform.color, active));
    }
}

/// Whether `body` is resting on top of `platform`: moving down or still,
/// horizontally overlapping, bottom within `epsilon` of the platform top
pub fn is_resting_on(body: &Aabb, vel_y: f32, platform: &Platform, epsilon: f32) -> bool {
    vel_y >= 0.0
        && body.overlaps_x(&platform.bounds())
        && (body.bottom() - platform.top()).abs() <= epsilon
}

/// Latch every solid colored platform the body rests on. A body that the
/// physics step did not leave grounded latches nothing. Returns newly
/// latched ids; the ground is already locked and is skipped.
pub fn latch_contacts(
    platforms: &mut [Platform],
    body: &Aabb,
    vel_y: f32,
    grounded: bool,
    epsilon: f32,
) -> Vec<u32> {
    let mut latched = Vec::new();
    if !grounded {
        return latched;
    }
    for platform in platforms.iter_mut().filter(|p| !p.always_solid) {
        if platform.solid
            && is_resting_on(body, vel_y, platform, epsilon)
            && platform.mark_contacted()
        {
            latched.push(platform.id);
        }
    }
    latched
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn colored(color: GameColor) -> Platform {
        Platform::new(1, 100.0, 300.0, 100.0, color)
    }

    /// Body of the player standing exactly on a platform top
    fn standing_on(platform: &Platform) -> Aabb {
        Aabb::new(platform.x, platform.top() - 24.0, 24.0, 48.0)
    }

    #[test]
    fn test_solidity_table() {
        for p in 0..8u8 {
            for a in 0..8u8 {
                let mut platforms = [colored(GameColor::from_bits(p))];
                update_solidity(&mut platforms, GameColor::from_bits(a));
                assert_eq!(platforms[0].solid, (p & a) == p, "platform {p} active {a}");
            }
        }
    }

    #[test]
    fn test_named_rows() {
        let mut red = colored(GameColor::RED);
        let mut yellow = colored(GameColor::YELLOW);
        let mut white = colored(GameColor::WHITE);

        for a in 0..8u8 {
            let active = GameColor::from_bits(a);
            for p in [&mut red, &mut yellow, &mut white] {
                p.set_solid(solid_for(p.color, active));
            }
            assert_eq!(red.solid, a & 1 != 0);
            assert_eq!(yellow.solid, a & 3 == 3);
            assert_eq!(white.solid, a == 7);
        }
    }

    #[test]
    fn test_none_active_only_ground_solid() {
        let mut platforms = vec![Platform::ground(0, 240.0, 712.0, 480.0)];
        for (i, c) in [1u8, 2, 3, 4, 5, 6, 7].into_iter().enumerate() {
            platforms.push(Platform::new(i as u32 + 1, 100.0, 600.0 - i as f32 * 70.0, 100.0, GameColor::from_bits(c)));
        }
        update_solidity(&mut platforms, GameColor::NONE);
        assert!(platforms[0].solid);
        assert!(platforms[1..].iter().all(|p| !p.solid));
    }

    #[test]
    fn test_ground_is_never_evaluated() {
        let mut platforms = [Platform::ground(0, 240.0, 712.0, 480.0)];
        update_solidity(&mut platforms, GameColor::RED);
        assert!(platforms[0].solid);
        platforms[0].set_solid(false);
        assert!(platforms[0].solid);
    }

    #[test]
    fn test_contact_latch_is_idempotent() {
        let mut platform = colored(GameColor::BLUE);
        assert!(platform.mark_contacted());
        assert!(!platform.mark_contacted());
        assert!(platform.contacted);
    }

    #[test]
    fn test_latch_requires_resting_on_top() {
        let mut platforms = vec![colored(GameColor::RED)];
        update_solidity(&mut platforms, GameColor::RED);
        let body = standing_on(&platforms[0]);

        // Moving upward through it: no latch
        assert!(latch_contacts(&mut platforms, &body, -100.0, true, 5.0).is_empty());

        // Well above the top: no latch
        let floating = Aabb::new(body.x, body.y - 20.0, body.width, body.height);
        assert!(latch_contacts(&mut platforms, &floating, 0.0, true, 5.0).is_empty());

        // Beside it: no latch
        let beside = Aabb::new(body.x + 200.0, body.y, body.width, body.height);
        assert!(latch_contacts(&mut platforms, &beside, 0.0, true, 5.0).is_empty());

        // Resting within epsilon
        let near = Aabb::new(body.x, body.y - 3.0, body.width, body.height);
        assert_eq!(latch_contacts(&mut platforms, &near, 0.0, true, 5.0), vec![1]);
        // Second pass reports nothing new
        assert!(latch_contacts(&mut platforms, &near, 0.0, true, 5.0).is_empty());
    }

    #[test]
    fn test_feet_inside_platform_do_not_latch() {
        let mut platforms = vec![colored(GameColor::RED)];
        update_solidity(&mut platforms, GameColor::RED);
        let body = standing_on(&platforms[0]);
        let sunk = Aabb::new(body.x, body.y + 3.0, body.width, body.height);

        // Within epsilon of the top, but the step left the body airborne
        assert!(is_resting_on(&sunk, 0.0, &platforms[0], 5.0));
        assert!(latch_contacts(&mut platforms, &sunk, 0.0, false, 5.0).is_empty());
        assert!(!platforms[0].contacted);
    }

    #[test]
    fn test_non_solid_platforms_do_not_latch() {
        let mut platforms = vec![colored(GameColor::GREEN)];
        update_solidity(&mut platforms, GameColor::RED);
        let body = standing_on(&platforms[0]);
        assert!(latch_contacts(&mut platforms, &body, 0.0, true, 5.0).is_empty());
        assert!(!platforms[0].contacted);
    }

    proptest! {
        #[test]
        fn prop_contacted_stays_solid(color in 1u8..8, actives in proptest::collection::vec(0u8..8, 1..40)) {
            let mut platforms = vec![colored(GameColor::from_bits(color))];
            update_solidity(&mut platforms, GameColor::WHITE);
            let body = standing_on(&platforms[0]);
            latch_contacts(&mut platforms, &body, 0.0, true, 5.0);
            prop_assert!(platforms[0].contacted);

            for a in actives {
                update_solidity(&mut platforms, GameColor::from_bits(a));
                prop_assert!(platforms[0].solid);
            }
        }
    }
}
