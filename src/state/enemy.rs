use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::constants::{
    BULLET_SPAWN_OFFSET, ENTITY_SPEED, LAST_KNOWN_RADIUS, MAX_WANDER_DISTANCE, TEX_ALIEN_ATTACK,
    TEX_ALIEN_DIE, TEX_ALIEN_HURT, TEX_ALIEN_MOVE, TEX_BALL_ATTACK, TEX_BALL_DIE, TEX_BALL_HURT,
    TEX_BALL_MOVE, TEX_BLOB_ATTACK, TEX_BLOB_DIE, TEX_BLOB_HURT, TEX_BLOB_MOVE, TEX_BLUE_ATTACK,
    TEX_BLUE_DIE, TEX_BLUE_HURT, TEX_BLUE_MOVE, WANDER_PROBE_DISTANCE,
};
use crate::entity::{Animation, Entity, Lifecycle, Sprite};
use crate::grid::TextureId;
use crate::ray::{has_line_of_sight, move_ray};
use crate::sound::{Sound, SoundPlayer};
use crate::state::arms::{Bullet, BulletOwner};
use crate::state::items::{Pickup, PickupKind};
use crate::state::World;
use crate::util::{within, Vector};

const MOVE_SPRITE: usize = 0;
const HURT_SPRITE: usize = 1;
const ATTACK_SPRITE: usize = 2;
const DIE_SPRITE: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Ball,
    Blue,
    Blob,
    Alien,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackStyle {
    Melee,
    Ranged,
}

/// Per-kind tuning, resolved once when the enemy is built.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemyStats {
    pub speed: f32,
    pub health: i32,
    pub style: AttackStyle,
    /// Squared distance at which an attack starts.
    pub attack_range: f32,
    pub hurt_time: f32,
    pub dying_time: f32,
    pub attack_time: f32,
    pub drop: Option<PickupKind>,
    /// Move, hurt, attack and die sheets, in that order.
    pub textures: [TextureId; 4],
    pub animations: [Animation; 4],
}

const MELEE_ANIMATIONS: [Animation; 4] = [
    Animation::looping(4, 200.0),
    Animation::looping(4, 150.0),
    Animation::looping(4, 150.0),
    Animation::once(4, 100.0),
];

const RANGED_ANIMATIONS: [Animation; 4] = [
    Animation::looping(4, 200.0),
    Animation::looping(4, 150.0),
    Animation::once(4, 150.0),
    Animation::once(4, 100.0),
];

const BALL: EnemyStats = EnemyStats {
    speed: ENTITY_SPEED,
    health: 2,
    style: AttackStyle::Melee,
    attack_range: 1.0,
    hurt_time: 600.0,
    dying_time: 400.0,
    attack_time: 600.0,
    drop: Some(PickupKind::Soul),
    textures: [TEX_BALL_MOVE, TEX_BALL_HURT, TEX_BALL_ATTACK, TEX_BALL_DIE],
    animations: MELEE_ANIMATIONS,
};

const BLOB: EnemyStats = EnemyStats {
    speed: ENTITY_SPEED * 0.75,
    health: 4,
    style: AttackStyle::Melee,
    attack_range: 1.0,
    hurt_time: 400.0,
    dying_time: 400.0,
    attack_time: 800.0,
    drop: Some(PickupKind::Soul),
    textures: [TEX_BLOB_MOVE, TEX_BLOB_HURT, TEX_BLOB_ATTACK, TEX_BLOB_DIE],
    animations: MELEE_ANIMATIONS,
};

const BLUE: EnemyStats = EnemyStats {
    speed: ENTITY_SPEED,
    health: 2,
    style: AttackStyle::Ranged,
    attack_range: 25.0,
    hurt_time: 600.0,
    dying_time: 400.0,
    attack_time: 600.0,
    drop: Some(PickupKind::Soul),
    textures: [TEX_BLUE_MOVE, TEX_BLUE_HURT, TEX_BLUE_ATTACK, TEX_BLUE_DIE],
    animations: RANGED_ANIMATIONS,
};

const ALIEN: EnemyStats = EnemyStats {
    speed: ENTITY_SPEED * 1.25,
    health: 3,
    style: AttackStyle::Ranged,
    attack_range: 36.0,
    hurt_time: 500.0,
    dying_time: 500.0,
    attack_time: 900.0,
    drop: Some(PickupKind::Soul),
    textures: [TEX_ALIEN_MOVE, TEX_ALIEN_HURT, TEX_ALIEN_ATTACK, TEX_ALIEN_DIE],
    animations: RANGED_ANIMATIONS,
};

impl EnemyKind {
    pub fn stats(self) -> &'static EnemyStats {
        match self {
            EnemyKind::Ball => &BALL,
            EnemyKind::Blue => &BLUE,
            EnemyKind::Blob => &BLOB,
            EnemyKind::Alien => &ALIEN,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyState {
    Wander,
    Move,
    Attack,
    Hurt,
    Dying,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub entity: Entity,
    pub kind: EnemyKind,
    pub state: EnemyState,
    pub can_see_player: bool,
    /// Where the player was last seen, while still being chased.
    pub last_known_player: Option<Vector>,
    timer: f32,
    wander_left: f32,
}

impl Enemy {
    pub fn new(kind: EnemyKind, position: Vector) -> Enemy {
        let stats = kind.stats();
        let [m, h, a, d] = stats.textures;
        let [ma, ha, aa, da] = stats.animations;
        let mut entity = Entity::with_sprites(
            position,
            [
                Sprite::animated(m, ma),
                Sprite::animated(h, ha),
                Sprite::animated(a, aa),
                Sprite::animated(d, da),
            ],
        );
        entity.speed = stats.speed;
        entity.health = stats.health;
        entity.drop_item = stats.drop;
        entity.physics = true;
        Enemy {
            entity,
            kind,
            state: EnemyState::Wander,
            can_see_player: false,
            last_known_player: None,
            timer: 0.0,
            wander_left: 0.0,
        }
    }

    pub fn stats(&self) -> &'static EnemyStats {
        self.kind.stats()
    }

    /// Ignored while dying. The death check waits for the next update.
    pub fn take_damage(&mut self, amount: i32, sound: &mut dyn SoundPlayer) {
        if self.state == EnemyState::Dying {
            return;
        }
        self.entity.health -= amount;
        self.timer = self.stats().hurt_time;
        self.entity.set_current_sprite(HURT_SPRITE);
        self.entity.lifecycle = Lifecycle::Stunned;
        self.state = EnemyState::Hurt;
        sound.play_sound(Sound::EnemyHurt);
    }

    pub(crate) fn update(&mut self, world: &mut World, config: &Config, delta: f32) {
        self.entity.update(delta, &world.grid);
        if self.entity.is_dead() {
            return;
        }

        if self.entity.health < 0 && self.state != EnemyState::Dying {
            self.start_dying(world);
        }

        match self.state {
            EnemyState::Hurt => {
                self.entity.lifecycle = Lifecycle::Stunned;
                if self.timer > 0.0 {
                    self.timer -= delta;
                } else {
                    self.entity.set_current_sprite(MOVE_SPRITE);
                    self.state = EnemyState::Move;
                    self.entity.lifecycle = Lifecycle::Active;
                }
            }
            EnemyState::Wander => {
                if self.wander_left > 0.0 {
                    self.wander_left -= delta * self.entity.speed;
                } else {
                    self.wander(world);
                }
            }
            EnemyState::Move => {
                if let Some(distance) = self.entity.distance_to_player() {
                    if distance < self.stats().attack_range {
                        self.entity.set_current_sprite(ATTACK_SPRITE);
                        self.state = EnemyState::Attack;
                        self.timer = self.stats().attack_time;
                    }
                }
            }
            EnemyState::Attack => {
                self.entity.lifecycle = Lifecycle::Stopped;
                if self.timer > 0.0 {
                    self.timer -= delta;
                } else {
                    self.strike(world);
                    self.entity.set_current_sprite(MOVE_SPRITE);
                    self.state = EnemyState::Move;
                    self.entity.lifecycle = Lifecycle::Active;
                }
            }
            EnemyState::Dying => {
                self.entity.lifecycle = Lifecycle::Stunned;
                if self.timer > 0.0 {
                    self.timer -= delta;
                } else {
                    self.entity.lifecycle = Lifecycle::Dead;
                    log::debug!("{:?} removed", self.kind);
                }
            }
        }

        if self.state != EnemyState::Dying && !config.passive {
            self.look(world);
        }
    }

    fn start_dying(&mut self, world: &mut World) {
        log::debug!("{:?} dying", self.kind);
        self.state = EnemyState::Dying;
        self.timer = self.stats().dying_time;
        self.entity.set_current_sprite(DIE_SPRITE);
        world.sound.play_sound(Sound::EnemyDie);
        if let Some(kind) = self.entity.drop_item {
            world.spawn_pickup(Pickup::new(kind, kind.default_amount(), self.entity.position));
        }
    }

    fn strike(&mut self, world: &mut World) {
        let position = self.entity.position;
        let player = world.player.position;
        match self.stats().style {
            AttackStyle::Melee => {
                if position.distance_squared(player) < self.stats().attack_range {
                    world.sound.play_sound(Sound::EnemyAttack);
                    world.player.take_damage(1, world.sound.as_mut());
                }
            }
            AttackStyle::Ranged => {
                if has_line_of_sight(&world.grid, position, player) {
                    let aim = (player - position).normalize();
                    let muzzle = position + aim * BULLET_SPAWN_OFFSET;
                    world.sound.play_sound(Sound::EnemyShoot);
                    world.spawn_bullet(Bullet::new(muzzle, aim, BulletOwner::Enemy));
                }
            }
        }
    }

    /// Heads off in a random direction, stopping short of whatever wall the
    /// probe ray finds.
    fn wander(&mut self, world: &mut World) {
        self.wander_left = 0.0;
        self.state = EnemyState::Wander;
        let direction = Vector::new(world.rng.gen_range(-1.0..1.0), world.rng.gen_range(-1.0..1.0));
        let probe = move_ray(&world.grid, self.entity.position, direction, WANDER_PROBE_DISTANCE);
        let distance = (probe.distance - self.entity.width).min(MAX_WANDER_DISTANCE);
        if distance <= 0.0 {
            self.entity.facing = Vector::ZERO;
            return;
        }
        self.entity.facing = probe.direction;
        self.wander_left = distance;
    }

    fn look(&mut self, world: &World) {
        let position = self.entity.position;
        let player = world.player.position;
        let visible = has_line_of_sight(&world.grid, position, player);

        if visible {
            if !self.can_see_player {
                log::debug!("{:?} spotted the player", self.kind);
            }
            self.can_see_player = true;
            self.last_known_player = Some(player);
            self.entity.facing = (player - position).normalize();
            if self.state == EnemyState::Wander {
                self.state = EnemyState::Move;
            }
            return;
        }

        self.can_see_player = false;
        match self.last_known_player {
            Some(target) if within(position, target, LAST_KNOWN_RADIUS) => {
                self.last_known_player = None;
                self.entity.facing = Vector::ZERO;
                if self.state == EnemyState::Move {
                    self.state = EnemyState::Wander;
                }
            }
            Some(target) => self.entity.facing = (target - position).normalize(),
            None => {
                if self.state == EnemyState::Move {
                    self.state = EnemyState::Wander;
                }
            }
        }
    }
}
