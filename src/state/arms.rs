use crate::constants::{
    BULLET_SPEED, BULLET_WIDTH, ENEMY_BULLET_SPEED, FIRE_RATE, MAX_AMMO, START_AMMO, TEX_BULLET,
};
use crate::entity::{collides, overlaps, Entity, Lifecycle, Sprite};
use crate::sound::Sound;
use crate::state::effects::{Effect, EffectKind};
use crate::state::World;
use crate::util::Vector;

/// Whether the weapon can fire right now.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Trigger {
    Ready,
    /// Milliseconds until the next shot.
    Cooling(f32),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Weapon {
    pub ammo: i32,
    pub max_ammo: i32,
    pub trigger: Trigger,
}

impl Default for Weapon {
    fn default() -> Weapon {
        Weapon {
            ammo: START_AMMO,
            max_ammo: MAX_AMMO,
            trigger: Trigger::Ready,
        }
    }
}

impl Weapon {
    /// Spends one round if the weapon is loaded and has ammo left.
    pub fn try_fire(&mut self) -> bool {
        if self.ammo <= 0 || self.trigger != Trigger::Ready {
            return false;
        }
        self.ammo -= 1;
        self.trigger = Trigger::Cooling(FIRE_RATE);
        true
    }

    pub fn cool_down(&mut self, delta: f32) {
        if let Trigger::Cooling(remaining) = self.trigger {
            self.trigger = if remaining - delta > 0.0 {
                Trigger::Cooling(remaining - delta)
            } else {
                Trigger::Ready
            };
        }
    }

    pub fn add_ammo(&mut self, amount: i32) {
        self.ammo = (self.ammo + amount).min(self.max_ammo);
    }
}

/// Who fired a bullet. Bullets never hit their own side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Enemy,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub entity: Entity,
    pub owner: BulletOwner,
}

impl Bullet {
    pub fn new(position: Vector, direction: Vector, owner: BulletOwner) -> Bullet {
        let mut entity = Entity::new(position, Sprite::new(TEX_BULLET));
        entity.facing = direction.normalize();
        entity.speed = match owner {
            BulletOwner::Player => BULLET_SPEED,
            BulletOwner::Enemy => ENEMY_BULLET_SPEED,
        };
        entity.width = BULLET_WIDTH;
        entity.solid = false;
        Bullet { entity, owner }
    }

    /// Flies one step, then stops at the first wall, enemy, scenery or player
    /// it meets.
    pub(crate) fn update(&mut self, world: &mut World, delta: f32) {
        self.entity.update(delta, &world.grid);
        if self.entity.is_dead() {
            return;
        }

        let blocked = match world.grid.tile_at_point(self.entity.position) {
            Some(tile) => tile.blocking,
            None => {
                // Left the map.
                self.entity.lifecycle = Lifecycle::Dead;
                log::trace!("Bullet done");
                return;
            }
        };
        if blocked {
            self.hit(world);
            return;
        }

        if self.owner == BulletOwner::Player {
            if let Some(i) = world
                .enemies
                .iter()
                .position(|e| collides(&self.entity, &e.entity))
            {
                self.hit(world);
                world.enemies[i].take_damage(1, world.sound.as_mut());
                return;
            }
        }

        if let Some(i) = world
            .scenery
            .iter()
            .position(|s| s.collidable() && collides(&self.entity, &s.entity))
        {
            self.hit(world);
            world.damage_scenery(i, 1);
            return;
        }

        if self.owner == BulletOwner::Enemy
            && overlaps(
                self.entity.position,
                self.entity.width,
                world.player.position,
                world.player.width,
            )
        {
            self.hit(world);
            world.player.take_damage(1, world.sound.as_mut());
        }
    }

    fn hit(&mut self, world: &mut World) {
        self.entity.lifecycle = Lifecycle::Dead;
        self.entity.undo_last_move();
        world.spawn_effect(Effect::new(EffectKind::BulletHit, self.entity.position));
        world.sound.play_sound(Sound::BulletHit);
        log::trace!("Bullet done");
    }
}
