/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `World` (and, where randomness is needed, an RNG handle) and returns a
/// brand-new `World`.  Side effects are limited to the injected RNG; the
/// per-frame `tick` itself is fully deterministic.

use rand::Rng;

use crate::entities::{
    Bullet, GameStatus, Item, ItemKind, Player, Weapon, WeaponSpec, World, Zombie,
};

// ── Tuning constants ─────────────────────────────────────────────────────────

pub const PLAYER_SIZE: f32 = 50.0;
pub const ZOMBIE_SIZE: f32 = 50.0;
pub const ITEM_SIZE: f32 = 30.0;
pub const ZOMBIE_SPEED: f32 = 2.0;
pub const ITEM_FALL_SPEED: f32 = 2.0;

// ── Weapon table ─────────────────────────────────────────────────────────────

/// Immutable stat lookup for each weapon tier.
pub fn weapon_spec(weapon: Weapon) -> WeaponSpec {
    match weapon {
        Weapon::Pistol => WeaponSpec {
            color: (255, 255, 0),
            speed: 7.0,
            damage: 15,
            bullet_size: 10.0,
        },
        Weapon::Shotgun => WeaponSpec {
            color: (255, 153, 0),
            speed: 5.0,
            damage: 25,
            bullet_size: 15.0,
        },
        Weapon::Rifle => WeaponSpec {
            color: (0, 255, 255),
            speed: 10.0,
            damage: 20,
            bullet_size: 12.0,
        },
    }
}

/// Successor in the fixed upgrade cycle pistol → shotgun → rifle → pistol.
pub fn next_weapon(weapon: Weapon) -> Weapon {
    match weapon {
        Weapon::Pistol => Weapon::Shotgun,
        Weapon::Shotgun => Weapon::Rifle,
        Weapon::Rifle => Weapon::Pistol,
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state for a playfield of the given pixel extent.
pub fn init_state(width: f32, height: f32) -> World {
    World {
        player: Player {
            x: width / 2.0,
            y: height / 2.0,
            width: PLAYER_SIZE,
            height: PLAYER_SIZE,
            speed: 5.0,
            dx: 0.0,
            dy: 0.0,
            weapon: Weapon::Pistol,
            health: 100,
            experience: 0,
            level: 1,
            attack: 15,
            experience_to_level_up: 100,
        },
        bullets: Vec::new(),
        zombies: Vec::new(),
        items: Vec::new(),
        status: GameStatus::Playing,
        width,
        height,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Set the horizontal velocity intent.  `dir` is -1, 0 or +1; each axis
/// holds a single magnitude, so the latest key edge always wins.
pub fn steer_player_x(state: &World, dir: i8) -> World {
    let player = Player {
        dx: dir as f32 * state.player.speed,
        ..state.player.clone()
    };
    World {
        player,
        ..state.clone()
    }
}

/// Vertical counterpart of `steer_player_x`.
pub fn steer_player_y(state: &World, dir: i8) -> World {
    let player = Player {
        dy: dir as f32 * state.player.speed,
        ..state.player.clone()
    };
    World {
        player,
        ..state.clone()
    }
}

/// Fire a bullet toward a target point.  The heading is measured from the
/// player's origin corner (matching how the cursor aim feels on screen);
/// the bullet itself spawns centred on the player's centre.  Size, speed
/// and colour are snapshotted from the current weapon spec.
pub fn fire_bullet(state: &World, target_x: f32, target_y: f32) -> World {
    let p = &state.player;
    let spec = weapon_spec(p.weapon);
    let angle = (target_y - p.y).atan2(target_x - p.x);
    let mut bullets = state.bullets.clone();
    bullets.push(Bullet {
        x: p.x + p.width / 2.0 - spec.bullet_size / 2.0,
        y: p.y + p.height / 2.0 - spec.bullet_size / 2.0,
        width: spec.bullet_size,
        height: spec.bullet_size,
        angle,
        speed: spec.speed,
        color: spec.color,
    });
    World {
        bullets,
        ..state.clone()
    }
}

// ── Spawner (RNG injected) ───────────────────────────────────────────────────

/// Spawn a zombie on a uniformly chosen playfield edge (25% each), at a
/// uniform coordinate along that edge and exactly on the boundary line.
pub fn spawn_zombie(state: &World, rng: &mut impl Rng) -> World {
    let (x, y) = match rng.gen_range(0..4) {
        0 => (rng.gen_range(0.0..state.width), 0.0),          // top
        1 => (rng.gen_range(0.0..state.width), state.height), // bottom
        2 => (0.0, rng.gen_range(0.0..state.height)),         // left
        _ => (state.width, rng.gen_range(0.0..state.height)), // right
    };
    let mut zombies = state.zombies.clone();
    zombies.push(Zombie {
        x,
        y,
        width: ZOMBIE_SIZE,
        height: ZOMBIE_SIZE,
        speed: ZOMBIE_SPEED,
        health: 100,
    });
    World {
        zombies,
        ..state.clone()
    }
}

/// Spawn an item at a uniform x on the top edge.  Type selection keeps the
/// two-draw scheme: the first draw takes Speed half the time, the second
/// splits the remainder, so Heal and Upgrade land at 25% each (not a
/// uniform three-way split).
pub fn spawn_item(state: &World, rng: &mut impl Rng) -> World {
    let x = rng.gen_range(0.0..state.width);
    let kind = if rng.gen_bool(0.5) {
        ItemKind::Speed
    } else if rng.gen_bool(0.5) {
        ItemKind::Heal
    } else {
        ItemKind::Upgrade
    };
    let mut items = state.items.clone();
    items.push(Item {
        x,
        y: 0.0,
        width: ITEM_SIZE,
        height: ITEM_SIZE,
        speed: ITEM_FALL_SPEED,
        kind,
    });
    World {
        items,
        ..state.clone()
    }
}

// ── Collision primitive ──────────────────────────────────────────────────────

/// Axis-aligned bounding-box overlap test.
#[allow(clippy::too_many_arguments)]
pub fn rects_overlap(
    ax: f32,
    ay: f32,
    aw: f32,
    ah: f32,
    bx: f32,
    by: f32,
    bw: f32,
    bh: f32,
) -> bool {
    ax < bx + bw && ax + aw > bx && ay < by + bh && ay + ah > by
}

// ── Motion integration ───────────────────────────────────────────────────────

/// Advance every entity by one frame: the player by its velocity intent
/// (clamped so its box stays inside the playfield), bullets along their
/// fixed heading (pruned once off-screen), zombies in pure pursuit of the
/// player's current position, items straight down (pruned past the bottom
/// edge).
pub fn integrate_motion(state: &World) -> World {
    let mut player = state.player.clone();
    player.x = (player.x + player.dx).clamp(0.0, state.width - player.width);
    player.y = (player.y + player.dy).clamp(0.0, state.height - player.height);

    let bullets: Vec<Bullet> = state
        .bullets
        .iter()
        .filter_map(|b| {
            let x = b.x + b.angle.cos() * b.speed;
            let y = b.y + b.angle.sin() * b.speed;
            if x < 0.0 || x > state.width || y < 0.0 || y > state.height {
                None
            } else {
                Some(Bullet { x, y, ..b.clone() })
            }
        })
        .collect();

    // Heading is recomputed toward the player every frame: steering, not
    // pathfinding.
    let zombies: Vec<Zombie> = state
        .zombies
        .iter()
        .map(|z| {
            let heading = (player.y - z.y).atan2(player.x - z.x);
            Zombie {
                x: z.x + heading.cos() * z.speed,
                y: z.y + heading.sin() * z.speed,
                ..z.clone()
            }
        })
        .collect();

    let items: Vec<Item> = state
        .items
        .iter()
        .filter_map(|i| {
            let y = i.y + i.speed;
            if y > state.height {
                None
            } else {
                Some(Item { y, ..i.clone() })
            }
        })
        .collect();

    World {
        player,
        bullets,
        zombies,
        items,
        ..state.clone()
    }
}

// ── Progression ──────────────────────────────────────────────────────────────

/// Level up once: residual experience carries over, the next threshold
/// grows by 50, health gains 10 (deliberately allowed past the usual 100
/// cap) and attack gains 5, capped at 50.
pub fn level_up(player: &Player) -> Player {
    Player {
        level: player.level + 1,
        experience: player.experience - player.experience_to_level_up,
        experience_to_level_up: player.experience_to_level_up + 50,
        health: player.health + 10,
        attack: (player.attack + 5).min(50),
        ..player.clone()
    }
}

fn apply_upgrade(player: &mut Player, bullets: &mut [Bullet]) {
    player.weapon = next_weapon(player.weapon);
    let spec = weapon_spec(player.weapon);
    player.attack = spec.damage;
    // Bullets already in flight take on the new size and colour immediately.
    for b in bullets.iter_mut() {
        b.width = spec.bullet_size;
        b.height = spec.bullet_size;
        b.color = spec.color;
    }
}

/// Advance to the next weapon tier.  Attack is overwritten with the new
/// weapon's damage, not added to.
pub fn upgrade_weapon(state: &World) -> World {
    let mut player = state.player.clone();
    let mut bullets = state.bullets.clone();
    apply_upgrade(&mut player, &mut bullets);
    World {
        player,
        bullets,
        ..state.clone()
    }
}

// ── Collision & resolution ───────────────────────────────────────────────────

/// Resolve all entity interactions for the frame, in a fixed order:
///
/// 1. zombie ↔ player — 1 contact damage per overlapping zombie; reaching
///    0 health ends the session (zombies are not removed by contact),
/// 2. bullet ↔ zombie — nested iteration order; a bullet is consumed by
///    the first live zombie it overlaps, whether or not the hit kills,
/// 3. item ↔ player — pickup effects, item consumed.
///
/// Destroyed entities are marked during the scans and compacted afterwards,
/// so removal can never skip or double-visit a neighbour.
pub fn resolve_collisions(state: &World) -> World {
    let mut player = state.player.clone();
    let mut status = state.status;

    // ── 1. Zombie contact damage ─────────────────────────────────────────────
    let touching = state
        .zombies
        .iter()
        .filter(|z| {
            rects_overlap(
                z.x, z.y, z.width, z.height, player.x, player.y, player.width, player.height,
            )
        })
        .count() as i32;
    if touching > 0 {
        player.health = (player.health - touching).max(0);
        if player.health <= 0 {
            status = GameStatus::GameOver;
        }
    }

    // ── 2. Player bullets ↔ zombies ──────────────────────────────────────────
    let mut zombies = state.zombies.clone();
    let mut killed_zombies: Vec<usize> = Vec::new();
    let mut used_bullets: Vec<usize> = Vec::new();

    for (bi, bullet) in state.bullets.iter().enumerate() {
        for (zi, zombie) in zombies.iter_mut().enumerate() {
            if killed_zombies.contains(&zi) {
                continue;
            }
            if rects_overlap(
                bullet.x,
                bullet.y,
                bullet.width,
                bullet.height,
                zombie.x,
                zombie.y,
                zombie.width,
                zombie.height,
            ) {
                zombie.health -= weapon_spec(player.weapon).damage;
                if zombie.health <= 0 {
                    player.experience += 10;
                    if player.experience >= player.experience_to_level_up {
                        player = level_up(&player);
                    }
                    killed_zombies.push(zi);
                }
                // First match consumes the bullet even if the zombie lives.
                used_bullets.push(bi);
                break;
            }
        }
    }

    let zombies: Vec<Zombie> = zombies
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !killed_zombies.contains(i))
        .map(|(_, z)| z)
        .collect();

    let mut bullets: Vec<Bullet> = state
        .bullets
        .iter()
        .enumerate()
        .filter(|(i, _)| !used_bullets.contains(i))
        .map(|(_, b)| b.clone())
        .collect();

    // ── 3. Items ↔ player ────────────────────────────────────────────────────
    let mut picked_items: Vec<usize> = Vec::new();
    for (ii, item) in state.items.iter().enumerate() {
        if rects_overlap(
            player.x,
            player.y,
            player.width,
            player.height,
            item.x,
            item.y,
            item.width,
            item.height,
        ) {
            match item.kind {
                ItemKind::Speed => player.speed += 2.0,
                ItemKind::Heal => player.health = (player.health + 20).min(100),
                ItemKind::Upgrade => apply_upgrade(&mut player, &mut bullets),
            }
            picked_items.push(ii);
        }
    }

    let items: Vec<Item> = state
        .items
        .iter()
        .enumerate()
        .filter(|(i, _)| !picked_items.contains(i))
        .map(|(_, it)| it.clone())
        .collect();

    World {
        player,
        bullets,
        zombies,
        items,
        status,
        ..state.clone()
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame: motion first, then collision
/// resolution.  Spawning is not part of the tick; it runs on its own
/// wall-clock schedule through `spawn_zombie` / `spawn_item`.
pub fn tick(state: &World) -> World {
    resolve_collisions(&integrate_motion(state))
}
