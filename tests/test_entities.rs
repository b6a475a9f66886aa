use zombie_arena::entities::*;

fn make_player() -> Player {
    Player {
        x: 400.0,
        y: 300.0,
        width: 50.0,
        height: 50.0,
        speed: 5.0,
        dx: 0.0,
        dy: 0.0,
        weapon: Weapon::Pistol,
        health: 100,
        experience: 0,
        level: 1,
        attack: 15,
        experience_to_level_up: 100,
    }
}

#[test]
fn entity_clone_and_eq() {
    // Enums derive PartialEq — equality comparisons must work
    assert_eq!(Weapon::Pistol, Weapon::Pistol);
    assert_ne!(Weapon::Pistol, Weapon::Rifle);
    assert_eq!(ItemKind::Speed, ItemKind::Speed);
    assert_ne!(ItemKind::Heal, ItemKind::Upgrade);
    assert_eq!(GameStatus::Playing, GameStatus::Playing);
    assert_ne!(GameStatus::Playing, GameStatus::GameOver);

    // Clone must produce an equal value
    let kind = ItemKind::Upgrade;
    assert_eq!(kind, ItemKind::Upgrade);
    let weapon = Weapon::Shotgun;
    assert_eq!(weapon, Weapon::Shotgun);
}

#[test]
fn world_clone_is_independent() {
    let original = World {
        player: make_player(),
        bullets: Vec::new(),
        zombies: Vec::new(),
        items: Vec::new(),
        status: GameStatus::Playing,
        width: 800.0,
        height: 640.0,
    };
    let mut cloned = original.clone();

    cloned.player.health = 1;
    cloned.zombies.push(Zombie {
        x: 0.0,
        y: 0.0,
        width: 50.0,
        height: 50.0,
        speed: 2.0,
        health: 100,
    });
    cloned.status = GameStatus::GameOver;

    assert_eq!(original.player.health, 100);
    assert!(original.zombies.is_empty());
    assert_eq!(original.status, GameStatus::Playing);
    assert_eq!(cloned.zombies.len(), 1);
}

#[test]
fn world_equality_covers_all_fields() {
    let a = World {
        player: make_player(),
        bullets: Vec::new(),
        zombies: Vec::new(),
        items: Vec::new(),
        status: GameStatus::Playing,
        width: 800.0,
        height: 640.0,
    };
    let b = a.clone();
    assert_eq!(a, b);

    let mut c = a.clone();
    c.player.experience = 10;
    assert_ne!(a, c);
}
