use std::cell::RefCell;
use std::rc::Rc;

use wizard_maze::constants::{LAST_KNOWN_RADIUS, MAX_AMMO, START_HEALTH, TEX_WALL};
use wizard_maze::*;

#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<Sound>>>);

impl Recorder {
    fn count(&self, sound: Sound) -> usize {
        self.0.borrow().iter().filter(|s| **s == sound).count()
    }
}

impl SoundPlayer for Recorder {
    fn play_sound(&mut self, sound: Sound) {
        self.0.borrow_mut().push(sound);
    }
}

const TICK: f32 = 16.0;

/// A 10x10 room with a solid border and the player at (2.5, 2.5) facing east.
fn room() -> LevelData {
    let mut grid = TileGrid::new(10, 10);
    for i in 0..10 {
        grid.set(i, 0, Tile::wall(TEX_WALL));
        grid.set(i, 9, Tile::wall(TEX_WALL));
        grid.set(0, i, Tile::wall(TEX_WALL));
        grid.set(9, i, Tile::wall(TEX_WALL));
    }
    LevelData::new(grid, Vector::new(2.5, 2.5), Compass::East)
}

fn make_world(level: LevelData, config: &Config) -> (World, Recorder) {
    let recorder = Recorder::default();
    let world = World::new(level, Box::new(recorder.clone()), config).unwrap();
    (world, recorder)
}

fn idle() -> Intents {
    Intents::default()
}

fn fire() -> Intents {
    Intents {
        fire: true,
        ..Intents::default()
    }
}

fn assert_no_dead(world: &World) {
    assert!(world.enemies.iter().all(|e| !e.entity.is_dead()));
    assert!(world.bullets.iter().all(|b| !b.entity.is_dead()));
    assert!(world.pickups.iter().all(|p| !p.entity.is_dead()));
    assert!(world.scenery.iter().all(|s| !s.entity.is_dead()));
    assert!(world.effects.iter().all(|e| !e.entity.is_dead()));
    assert!(world.portals.iter().all(|p| !p.entity.is_dead()));
    assert!(world.particles.iter().all(|p| p.is_alive()));
}

/// `room()` cut in two by a wall along y = 5, with a closed door at (6, 5).
fn split_room() -> LevelData {
    let mut level = room();
    for x in 1..9 {
        level.grid.set(x, 5, Tile::wall(TEX_WALL));
    }
    level
        .grid
        .set(6, 5, Tile::door(DoorOrientation::EastWest, TextureId(5), false));
    level
}

fn ball_at(x: f32, y: f32) -> Spawn {
    Spawn::new(SpawnKind::Enemy(EnemyKind::Ball), Vector::new(x, y))
}

#[test]
fn point_blank_shot_hurts_the_enemy() {
    let config = Config::default();
    let level = room().with_spawn(Spawn::new(SpawnKind::Enemy(EnemyKind::Ball), Vector::new(3.0, 2.5)));
    let (mut world, sounds) = make_world(level, &config);
    let health = world.enemies[0].entity.health;

    assert_eq!(world.update(&config, &fire(), TICK), None);
    assert_eq!(world.bullets.len(), 1);
    assert_eq!(sounds.count(Sound::Shoot), 1);

    world.update(&config, &idle(), TICK);
    assert!(world.bullets.is_empty());
    assert_eq!(world.enemies[0].entity.health, health - 1);
    assert_eq!(world.enemies[0].state, EnemyState::Hurt);
    assert_eq!(sounds.count(Sound::EnemyHurt), 1);
}

#[test]
fn empty_weapon_fires_nothing() {
    let config = Config::default();
    let (mut world, sounds) = make_world(room(), &config);
    world.player.weapon.ammo = 0;

    world.update(&config, &fire(), TICK);
    assert!(world.bullets.is_empty());
    assert_eq!(world.player.weapon.ammo, 0);
    assert_eq!(sounds.count(Sound::Shoot), 0);
}

#[test]
fn bullets_stop_at_walls() {
    let config = Config::default();
    let (mut world, sounds) = make_world(room(), &config);
    world.update(&config, &fire(), TICK);
    for _ in 0..100 {
        world.update(&config, &idle(), TICK);
    }
    assert!(world.bullets.is_empty());
    assert_eq!(sounds.count(Sound::BulletHit), 1);
}

#[test]
fn shooting_a_barrel_blows_it_up() {
    let config = Config::default();
    let level = room().with_spawn(Spawn::at_tile(SpawnKind::Scenery(SceneryKind::Barrel), 4, 2));
    let (mut world, sounds) = make_world(level, &config);

    world.update(&config, &fire(), TICK);
    for _ in 0..30 {
        world.update(&config, &idle(), TICK);
        if world.scenery.is_empty() {
            break;
        }
    }
    assert!(world.scenery.is_empty());
    assert!(world.effects.iter().any(|e| e.kind == EffectKind::Explosion));
    assert!(!world.particles.is_empty());
    assert_eq!(world.pickups.len(), 1);
    assert_eq!(world.pickups[0].kind, PickupKind::Ammo);
    assert_eq!(sounds.count(Sound::Explosion), 1);
}

#[test]
fn ranged_enemies_shoot_back() {
    let config = Config::default();
    let level = room().with_spawn(Spawn::at_tile(SpawnKind::Enemy(EnemyKind::Blue), 6, 2));
    let (mut world, sounds) = make_world(level, &config);

    for _ in 0..300 {
        world.update(&config, &idle(), TICK);
        if world.player.health < START_HEALTH {
            break;
        }
    }
    assert!(world.player.health < START_HEALTH);
    assert!(sounds.count(Sound::EnemyShoot) >= 1);
    assert!(sounds.count(Sound::PlayerHurt) >= 1);
}

#[test]
fn melee_enemies_hit_when_close() {
    let config = Config::default();
    let level = room().with_spawn(Spawn::new(SpawnKind::Enemy(EnemyKind::Ball), Vector::new(3.2, 2.5)));
    let (mut world, sounds) = make_world(level, &config);

    for _ in 0..100 {
        world.update(&config, &idle(), TICK);
    }
    assert!(world.player.health < START_HEALTH);
    assert!(sounds.count(Sound::EnemyAttack) >= 1);
}

#[test]
fn passive_enemies_ignore_the_player() {
    let config = Config {
        passive: true,
        ..Config::default()
    };
    let level = room().with_spawn(Spawn::new(SpawnKind::Enemy(EnemyKind::Ball), Vector::new(4.5, 2.5)));
    let (mut world, _) = make_world(level, &config);
    for _ in 0..50 {
        world.update(&config, &idle(), TICK);
    }
    assert!(!world.enemies[0].can_see_player);
    assert_eq!(world.player.health, START_HEALTH);
}

#[test]
fn enemies_chase_to_where_they_lost_sight_of_the_player() {
    let config = Config::default();
    let (mut world, _) = make_world(split_room().with_spawn(ball_at(6.5, 2.5)), &config);
    let last_seen = Vector::new(2.5, 2.5);

    world.update(&config, &idle(), TICK);
    assert!(world.enemies[0].can_see_player);
    assert_eq!(world.enemies[0].state, EnemyState::Move);
    assert_eq!(world.enemies[0].last_known_player, Some(last_seen));

    // Behind the wall, out of sight.
    world.player.position = Vector::new(2.5, 7.5);
    world.update(&config, &idle(), TICK);
    let enemy = &world.enemies[0];
    assert!(!enemy.can_see_player);
    assert_eq!(enemy.state, EnemyState::Move);
    assert_eq!(enemy.last_known_player, Some(last_seen));
    assert!(enemy.entity.facing.x < -0.99);

    let mut ticks = 0;
    while world.enemies[0].last_known_player.is_some() {
        world.update(&config, &idle(), TICK);
        ticks += 1;
        assert!(ticks < 500, "never reached the last known position");
    }
    let enemy = &world.enemies[0];
    assert!(enemy.entity.position.distance_squared(last_seen) < LAST_KNOWN_RADIUS * LAST_KNOWN_RADIUS);
    assert_eq!(enemy.entity.facing, Vector::ZERO);
    assert_eq!(enemy.state, EnemyState::Wander);
}

#[test]
fn doors_hide_the_player_and_reveal_them_again() {
    let config = Config::default();
    let (mut world, _) = make_world(split_room().with_spawn(ball_at(6.5, 7.5)), &config);
    let player = Vector::new(6.5, 2.5);
    world.player.position = player;

    world.update(&config, &idle(), TICK);
    assert!(!world.enemies[0].can_see_player);
    assert_eq!(world.enemies[0].state, EnemyState::Wander);

    assert_eq!(world.grid_mut().toggle_door(6, 5), DoorAction::Opened);
    world.update(&config, &idle(), TICK);
    assert!(world.enemies[0].can_see_player);
    assert_eq!(world.enemies[0].state, EnemyState::Move);

    assert_eq!(world.grid_mut().toggle_door(6, 5), DoorAction::Closed);
    world.update(&config, &idle(), TICK);
    let enemy = &world.enemies[0];
    assert!(!enemy.can_see_player);
    assert_eq!(enemy.state, EnemyState::Move);
    assert_eq!(enemy.last_known_player, Some(player));
    assert!(enemy.entity.facing.y < 0.0);

    assert_eq!(world.grid_mut().toggle_door(6, 5), DoorAction::Opened);
    world.update(&config, &idle(), TICK);
    assert!(world.enemies[0].can_see_player);
    assert_eq!(world.enemies[0].state, EnemyState::Move);
}

#[test]
fn hurt_enemies_stand_still_then_chase_again() {
    let config = Config::default();
    let (mut world, _) = make_world(room().with_spawn(ball_at(6.5, 6.5)), &config);
    world.update(&config, &idle(), TICK);
    assert_eq!(world.enemies[0].state, EnemyState::Move);

    world.enemies[0].take_damage(1, &mut Silence);
    let held = world.enemies[0].entity.position;
    let hurt_ticks = (world.enemies[0].stats().hurt_time / TICK).ceil() as usize;
    for _ in 0..hurt_ticks {
        world.update(&config, &idle(), TICK);
        let enemy = &world.enemies[0];
        assert_eq!(enemy.state, EnemyState::Hurt);
        assert_eq!(enemy.entity.lifecycle, Lifecycle::Stunned);
        assert_eq!(enemy.entity.position, held);
    }

    world.update(&config, &idle(), TICK);
    assert_eq!(world.enemies[0].state, EnemyState::Move);
    assert_eq!(world.enemies[0].entity.lifecycle, Lifecycle::Active);

    world.update(&config, &idle(), TICK);
    let player = world.player.position;
    assert!(world.enemies[0].entity.position.distance_squared(player) < held.distance_squared(player));
}

#[test]
fn wandering_follows_the_seed() {
    let config = Config {
        passive: true,
        seed: 1234,
        ..Config::default()
    };
    let (mut a, _) = make_world(room().with_spawn(ball_at(6.5, 6.5)), &config);
    let (mut b, _) = make_world(room().with_spawn(ball_at(6.5, 6.5)), &config);
    for _ in 0..120 {
        a.update(&config, &idle(), TICK);
        b.update(&config, &idle(), TICK);
        assert_eq!(a.enemies[0].entity.position, b.enemies[0].entity.position);
        assert_eq!(a.enemies[0].state, EnemyState::Wander);
    }
    assert_ne!(a.enemies[0].entity.position, Vector::new(6.5, 6.5));
}

#[test]
fn enemies_die_once_and_leave_a_soul() {
    let config = Config {
        passive: true,
        ..Config::default()
    };
    let level = room().with_spawn(Spawn::at_tile(SpawnKind::Enemy(EnemyKind::Ball), 7, 7));
    let (mut world, sounds) = make_world(level, &config);

    let mut silence = Silence;
    for _ in 0..3 {
        world.enemies[0].take_damage(1, &mut silence);
    }
    assert!(world.enemies[0].entity.health < 0);

    world.update(&config, &idle(), TICK);
    assert_eq!(world.enemies[0].state, EnemyState::Dying);
    assert_eq!(world.pickups.len(), 1);
    assert_eq!(world.pickups[0].kind, PickupKind::Soul);

    world.enemies[0].take_damage(1, &mut silence);
    assert_eq!(world.enemies[0].state, EnemyState::Dying);

    for _ in 0..100 {
        world.update(&config, &idle(), TICK);
    }
    assert!(world.enemies.is_empty());
    assert_eq!(world.pickups.len(), 1);
    assert_eq!(sounds.count(Sound::EnemyDie), 1);
}

#[test]
fn ammo_pickups_clamp_to_the_maximum() {
    let config = Config::default();
    let level = room().with_spawn(Spawn::new(
        SpawnKind::Pickup {
            kind: PickupKind::Ammo,
            amount: 20,
        },
        Vector::new(2.5, 2.5),
    ));
    let (mut world, sounds) = make_world(level, &config);
    world.player.weapon.ammo = MAX_AMMO - 5;

    world.update(&config, &idle(), TICK);
    assert_eq!(world.player.weapon.ammo, MAX_AMMO);
    assert!(world.pickups.is_empty());
    assert!(world.player.flash.is_some());
    assert_eq!(sounds.count(Sound::Pickup), 1);
}

#[test]
fn pickups_are_collected_once() {
    let config = Config::default();
    let level = room().with_spawn(Spawn::new(
        SpawnKind::Pickup {
            kind: PickupKind::Health,
            amount: 3,
        },
        Vector::new(2.5, 2.5),
    ));
    let (mut world, sounds) = make_world(level, &config);
    world.player.health = 2;

    for _ in 0..10 {
        world.update(&config, &idle(), TICK);
    }
    assert_eq!(world.player.health, 5);
    assert_eq!(sounds.count(Sound::Pickup), 1);
}

#[test]
fn dead_entities_are_gone_after_every_tick() {
    let config = Config::default();
    let level = room()
        .with_spawn(Spawn::at_tile(SpawnKind::Scenery(SceneryKind::Candlestick), 5, 2))
        .with_spawn(Spawn::at_tile(SpawnKind::Scenery(SceneryKind::Bush), 7, 2))
        .with_spawn(Spawn::at_tile(SpawnKind::Enemy(EnemyKind::Blob), 7, 6))
        .with_spawn(Spawn::at_tile(SpawnKind::Enemy(EnemyKind::Alien), 3, 7));
    let (mut world, _) = make_world(level, &config);

    for tick in 0..400 {
        let intents = if tick % 15 == 0 { fire() } else { idle() };
        world.update(&config, &intents, TICK);
        assert_no_dead(&world);
    }
}

#[test]
fn survivors_keep_their_order() {
    let config = Config::default();
    let mut level = room();
    for x in 5..8 {
        level = level.with_spawn(Spawn::at_tile(
            SpawnKind::Pickup {
                kind: PickupKind::Key,
                amount: 1,
            },
            x,
            7,
        ));
    }
    let (mut world, _) = make_world(level, &config);
    world.pickups[1].entity.lifecycle = Lifecycle::Dead;

    world.update(&config, &idle(), TICK);
    let xs: Vec<f32> = world.pickups.iter().map(|p| p.entity.position.x).collect();
    assert_eq!(xs, vec![5.5, 7.5]);
}

fn door_room(locked: bool) -> LevelData {
    let mut level = room();
    level
        .grid
        .set(3, 2, Tile::door(DoorOrientation::NorthSouth, TextureId(5), locked));
    level
}

fn interact() -> Intents {
    Intents {
        interact: true,
        ..Intents::default()
    }
}

#[test]
fn doors_open_and_close() {
    let config = Config::default();
    let (mut world, sounds) = make_world(door_room(false), &config);

    world.update(&config, &interact(), TICK);
    assert!(!world.grid().is_blocking(3, 2));
    world.update(&config, &interact(), TICK);
    assert!(world.grid().is_blocking(3, 2));
    assert_eq!(sounds.count(Sound::Door), 2);
}

#[test]
fn locked_doors_need_a_key() {
    let config = Config::default();
    let (mut world, sounds) = make_world(door_room(true), &config);

    world.update(&config, &interact(), TICK);
    assert!(world.grid().is_blocking(3, 2));
    assert_eq!(sounds.count(Sound::Locked), 1);

    world.player.keys = 1;
    world.update(&config, &interact(), TICK);
    assert!(!world.grid().is_blocking(3, 2));
    assert_eq!(world.player.keys, 0);
}

#[test]
fn open_doors_never_close_on_the_player() {
    let config = Config::default();
    let (mut world, _) = make_world(door_room(false), &config);
    world.update(&config, &interact(), TICK);
    world.player.position = Vector::new(2.9, 2.5);

    world.update(&config, &interact(), TICK);
    assert!(!world.grid().is_blocking(3, 2));
}

#[test]
fn reaching_the_portal_wins() {
    let config = Config::default();
    let level = room().with_spawn(Spawn::at_tile(SpawnKind::Portal, 2, 2));
    let (mut world, _) = make_world(level, &config);
    assert_eq!(world.update(&config, &idle(), TICK), Some(SessionEnd::Won));
}

#[test]
fn quitting_and_dying_end_the_session() {
    let config = Config::default();
    let (mut world, _) = make_world(room(), &config);
    let quit = Intents {
        quit: true,
        ..Intents::default()
    };
    assert_eq!(world.update(&config, &quit, TICK), Some(SessionEnd::Quit));

    world.player.health = 0;
    assert_eq!(world.update(&config, &idle(), TICK), Some(SessionEnd::Died));
}

#[test]
fn quitting_on_the_portal_leaves_no_win_behind() {
    let config = Config::default();
    let level = room().with_spawn(Spawn::at_tile(SpawnKind::Portal, 2, 2));
    let (mut world, _) = make_world(level, &config);
    let quit = Intents {
        quit: true,
        ..Intents::default()
    };
    assert_eq!(world.update(&config, &quit, TICK), Some(SessionEnd::Quit));

    world.player.position = Vector::new(6.5, 6.5);
    assert_eq!(world.update(&config, &idle(), TICK), None);
}

#[test]
fn the_player_walks_and_turns() {
    let config = Config::default();
    let (mut world, _) = make_world(room(), &config);
    let forward = Intents {
        forward: true,
        ..Intents::default()
    };
    world.update(&config, &forward, 100.0);
    assert!(world.player.position.x > 2.5);

    let turn = Intents {
        turn: 10.0,
        ..Intents::default()
    };
    world.update(&config, &turn, 100.0);
    assert!(world.player.facing.y > 0.0);
    assert!((world.player.facing.length() - 1.0).abs() < 1e-4);
}

#[test]
fn maze_levels_load() {
    let config = Config::default();
    let level = maze_level(6, 5, 3, TEX_WALL, None, None);
    let (mut world, _) = make_world(level, &config);
    assert_eq!(world.portals.len(), 1);
    assert_eq!(world.update(&config, &idle(), TICK), None);
}
