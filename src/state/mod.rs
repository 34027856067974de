use alloc::boxed::Box;
use core::mem;

use heapless::Vec;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::config::Config;
use crate::constants::{
    EXPLOSION_FORCE, MAX_BULLETS, MAX_EFFECTS, MAX_ENEMIES, MAX_PARTICLES, MAX_PICKUPS,
    MAX_PORTALS, MAX_SCENERY, SMOKE_PARTICLES,
};
use crate::entity::{Entity, Sprite};
use crate::error::LevelError;
use crate::grid::TileGrid;
use crate::level::{LevelData, SpawnKind};
use crate::ray::{has_line_of_sight, Camera};
use crate::sound::SoundPlayer;
use crate::util::{compact, Vector};

pub mod arms;
pub mod effects;
pub mod enemy;
pub mod items;
pub mod maze;
pub mod player;

pub use arms::{Bullet, BulletOwner, Trigger, Weapon};
pub use effects::{Effect, EffectKind, Particle};
pub use enemy::{AttackStyle, Enemy, EnemyKind, EnemyState, EnemyStats};
pub use items::{Pickup, PickupKind, Portal, Scenery, SceneryKind};
pub use player::{Intents, Player, ScreenFlash, SessionEnd};

/// The whole simulation: the map, the player and everything else that moves,
/// plus the sound sink and random source they share.
pub struct World {
    pub(crate) grid: TileGrid,
    pub player: Player,
    pub enemies: Vec<Enemy, MAX_ENEMIES>,
    pub bullets: Vec<Bullet, MAX_BULLETS>,
    pub pickups: Vec<Pickup, MAX_PICKUPS>,
    pub scenery: Vec<Scenery, MAX_SCENERY>,
    pub effects: Vec<Effect, MAX_EFFECTS>,
    pub portals: Vec<Portal, MAX_PORTALS>,
    pub particles: Vec<Particle, MAX_PARTICLES>,
    pub(crate) sound: Box<dyn SoundPlayer>,
    pub(crate) rng: SmallRng,
    pub(crate) ending: Option<SessionEnd>,
}

impl World {
    /// Checks the level and places the player and every spawn.
    pub fn new(level: LevelData, sound: Box<dyn SoundPlayer>, config: &Config) -> Result<World, LevelError> {
        let LevelData {
            grid,
            start,
            start_facing,
            spawns,
        } = level;

        let (x, y) = start.tile();
        if !grid.in_bounds(x, y) {
            return Err(LevelError::StartOutOfBounds { x, y });
        }
        if grid.is_blocking(x, y) {
            return Err(LevelError::StartBlocked { x, y });
        }

        let mut world = World {
            grid,
            player: Player::new(start, start_facing.facing(), config.plane_length()),
            enemies: Vec::new(),
            bullets: Vec::new(),
            pickups: Vec::new(),
            scenery: Vec::new(),
            effects: Vec::new(),
            portals: Vec::new(),
            particles: Vec::new(),
            sound,
            rng: SmallRng::seed_from_u64(config.seed),
            ending: None,
        };

        for spawn in spawns {
            let (x, y) = spawn.position.tile();
            if !world.grid.in_bounds(x, y) {
                return Err(LevelError::SpawnOutOfBounds { x, y });
            }
            let position = spawn.position;
            let placed = match spawn.kind {
                SpawnKind::Enemy(kind) => world
                    .enemies
                    .push(Enemy::new(kind, position))
                    .map_err(|_| LevelError::TooMany("enemies")),
                SpawnKind::Pickup { kind, amount } => world
                    .pickups
                    .push(Pickup::new(kind, amount, position))
                    .map_err(|_| LevelError::TooMany("pickups")),
                SpawnKind::Scenery(kind) => world
                    .scenery
                    .push(Scenery::new(kind, position))
                    .map_err(|_| LevelError::TooMany("scenery")),
                SpawnKind::Portal => world
                    .portals
                    .push(Portal::new(position))
                    .map_err(|_| LevelError::TooMany("portals")),
            };
            placed?;
        }

        log::debug!(
            "World ready: {}x{} tiles, {} enemies",
            world.grid.width(),
            world.grid.height(),
            world.enemies.len()
        );
        Ok(world)
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut TileGrid {
        &mut self.grid
    }

    pub fn camera(&self) -> Camera {
        self.player.camera()
    }

    /// Advances the simulation by `delta` milliseconds. Returns how the session
    /// ended, if it did.
    pub fn update(&mut self, config: &Config, intents: &Intents, delta: f32) -> Option<SessionEnd> {
        self.measure_distances();

        self.update_collection(
            |w| &mut w.enemies,
            |e: &mut Enemy, w: &mut World| e.update(w, config, delta),
            |e| !e.entity.is_dead(),
        );
        self.update_collection(
            |w| &mut w.bullets,
            |b: &mut Bullet, w: &mut World| b.update(w, delta),
            |b| !b.entity.is_dead(),
        );
        self.update_collection(
            |w| &mut w.pickups,
            |p: &mut Pickup, w: &mut World| p.update(w, delta),
            |p| !p.entity.is_dead(),
        );
        self.update_collection(
            |w| &mut w.scenery,
            |s: &mut Scenery, w: &mut World| s.update(w, delta),
            |s| !s.entity.is_dead(),
        );
        self.update_collection(
            |w| &mut w.effects,
            |e: &mut Effect, w: &mut World| e.update(w, delta),
            |e| !e.entity.is_dead(),
        );
        self.update_collection(
            |w| &mut w.portals,
            |p: &mut Portal, w: &mut World| p.update(w, delta),
            |p| !p.entity.is_dead(),
        );
        self.update_collection(
            |w| &mut w.particles,
            |p: &mut Particle, _: &mut World| p.update(delta),
            |p| p.is_alive(),
        );

        let mut player = mem::take(&mut self.player);
        let outcome = player.update(self, intents, delta);
        self.player = player;

        let reached = self.ending.take();
        let ending = outcome.or(reached);
        if let Some(ending) = ending {
            log::debug!("Session over: {:?}", ending);
        }
        ending
    }

    /// Runs `update` over one collection, then drops whatever it rejects.
    /// The collection is moved out while it updates so each item can reach the
    /// rest of the world; anything spawned into it meanwhile is kept.
    fn update_collection<T, const N: usize>(
        &mut self,
        collection: fn(&mut World) -> &mut Vec<T, N>,
        mut update: impl FnMut(&mut T, &mut World),
        keep: impl FnMut(&T) -> bool,
    ) {
        let mut items = mem::take(collection(self));
        for item in items.iter_mut() {
            update(item, self);
        }
        let spawned = mem::replace(collection(self), items);
        for item in spawned {
            push_or_warn(collection(self), item, "spawned");
        }
        compact(collection(self), keep);
    }

    fn measure_distances(&mut self) {
        let player = self.player.position;
        for entity in self.entities_mut() {
            entity.measure_distance(player);
        }
        for particle in self.particles.iter_mut() {
            particle.sprite.distance = particle.position.distance_squared(player);
        }
    }

    fn entities_mut(&mut self) -> impl Iterator<Item = &mut Entity> + '_ {
        self.enemies
            .iter_mut()
            .map(|e| &mut e.entity)
            .chain(self.bullets.iter_mut().map(|b| &mut b.entity))
            .chain(self.pickups.iter_mut().map(|p| &mut p.entity))
            .chain(self.scenery.iter_mut().map(|s| &mut s.entity))
            .chain(self.effects.iter_mut().map(|e| &mut e.entity))
            .chain(self.portals.iter_mut().map(|p| &mut p.entity))
    }

    /// Current sprite of every living object, in no particular order.
    pub fn sprites(&self) -> impl Iterator<Item = &Sprite> + '_ {
        self.enemies
            .iter()
            .map(|e| &e.entity)
            .chain(self.bullets.iter().map(|b| &b.entity))
            .chain(self.pickups.iter().map(|p| &p.entity))
            .chain(self.scenery.iter().map(|s| &s.entity))
            .chain(self.effects.iter().map(|e| &e.entity))
            .chain(self.portals.iter().map(|p| &p.entity))
            .filter(|e| !e.is_dead())
            .filter_map(|e| e.current_sprite())
            .chain(self.particles.iter().filter(|p| p.is_alive()).map(|p| &p.sprite))
    }

    pub fn spawn_bullet(&mut self, bullet: Bullet) {
        push_or_warn(&mut self.bullets, bullet, "bullets");
    }

    pub fn spawn_effect(&mut self, effect: Effect) {
        push_or_warn(&mut self.effects, effect, "effects");
    }

    pub fn spawn_pickup(&mut self, pickup: Pickup) {
        push_or_warn(&mut self.pickups, pickup, "pickups");
    }

    pub fn spawn_smoke(&mut self, position: Vector) {
        for _ in 0..SMOKE_PARTICLES {
            let particle = Particle::smoke(position, &mut self.rng);
            push_or_warn(&mut self.particles, particle, "particles");
        }
    }

    /// Damages scenery `index` and leaves behind its wreckage if it breaks.
    pub fn damage_scenery(&mut self, index: usize, amount: i32) {
        let debris = match self.scenery.get_mut(index) {
            Some(scenery) => scenery.take_damage(amount),
            None => return,
        };
        if let Some(debris) = debris {
            log::debug!("Scenery destroyed at ({}, {})", debris.position.x, debris.position.y);
            self.spawn_effect(Effect::new(debris.effect, debris.position));
            self.spawn_smoke(debris.position);
            self.sound.play_sound(debris.sound);
            if let Some(kind) = debris.drop {
                self.spawn_pickup(Pickup::new(kind, kind.default_amount(), debris.position));
            }
        }
    }

    /// Pushes physics entities away from `center`. Walls shield whatever is
    /// behind them; the push weakens with distance past one tile.
    pub fn explode(&mut self, center: Vector) {
        let grid = &self.grid;
        let targets = self
            .enemies
            .iter_mut()
            .map(|e| &mut e.entity)
            .chain(self.scenery.iter_mut().map(|s| &mut s.entity));
        for entity in targets {
            if !entity.physics || entity.is_dead() {
                continue;
            }
            let offset = entity.position - center;
            if offset == Vector::ZERO || !has_line_of_sight(grid, center, entity.position) {
                continue;
            }
            let force = EXPLOSION_FORCE / offset.length().max(1.0);
            entity.apply_impulse(offset.normalize() * force);
        }
    }
}

fn push_or_warn<T, const N: usize>(items: &mut Vec<T, N>, item: T, what: &str) {
    if items.push(item).is_err() {
        log::warn!("Reached max number of {what}, dropping one");
    }
}
