/// All game entity types — pure data, no logic.
///
/// The weapon stat table and the cyclic upgrade order live in `compute`;
/// this module only defines the records they operate on.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Weapon {
    Pistol,
    Shotgun,
    Rifle,
}

/// Immutable per-weapon stats, looked up via `compute::weapon_spec`.
/// `color` is an RGB triple; the display layer turns it into a terminal
/// colour, tests compare it directly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeaponSpec {
    pub color: (u8, u8, u8),
    pub speed: f32,
    pub damage: i32,
    pub bullet_size: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    /// Permanently raises player movement speed by 2.
    Speed,
    /// Restores 20 health, capped at 100.
    Heal,
    /// Advances the weapon to the next tier in the cycle.
    Upgrade,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Movement speed; grows only through Speed pickups.
    pub speed: f32,
    /// Velocity intent per axis: -speed, 0 or +speed, set by key edges.
    pub dx: f32,
    pub dy: f32,
    pub weapon: Weapon,
    /// 0 ends the session.  Heals cap at 100; level-up overheal may exceed it.
    pub health: i32,
    pub experience: u32,
    pub level: u32,
    /// Raised by level-ups (max 50), overwritten on weapon upgrade.
    pub attack: i32,
    /// Threshold for the next level; grows by 50 each level.
    pub experience_to_level_up: u32,
}

// ── Projectiles, enemies, pickups ─────────────────────────────────────────────

/// Size, speed and colour are snapshotted from the weapon spec when fired;
/// a later weapon upgrade restyles bullets already in flight.
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Heading in radians, fixed for the bullet's lifetime.
    pub angle: f32,
    pub speed: f32,
    pub color: (u8, u8, u8),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Zombie {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub health: i32,
}

/// A pickup falling from the top edge of the playfield.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub kind: ItemKind,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire simulation state.  Cloneable so pure update functions can
/// return a new copy without mutating the original; comparable so tests
/// can assert whole-frame snapshots.
#[derive(Clone, Debug, PartialEq)]
pub struct World {
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub zombies: Vec<Zombie>,
    pub items: Vec<Item>,
    pub status: GameStatus,
    /// Playfield extent in pixels, read once at startup.
    pub width: f32,
    pub height: f32,
}
