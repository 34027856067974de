use rand::rngs::SmallRng;
use rand::Rng;

use crate::constants::{
    GRAVITY, PHYSICS_DAMPENING, TEX_BULLET_HIT, TEX_EXPLOSION, TEX_SCENERY_DESTROYED, TEX_SMOKE,
};
use crate::entity::{Animation, Entity, Lifecycle, Sprite};
use crate::grid::TextureId;
use crate::state::World;
use crate::util::Vector;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectKind {
    BulletHit,
    SceneryDestroyed,
    /// Also shoves nearby physics entities away from its centre.
    Explosion,
}

impl EffectKind {
    fn texture(self) -> TextureId {
        match self {
            EffectKind::BulletHit => TEX_BULLET_HIT,
            EffectKind::SceneryDestroyed => TEX_SCENERY_DESTROYED,
            EffectKind::Explosion => TEX_EXPLOSION,
        }
    }

    /// Frame count and milliseconds per frame.
    fn timing(self) -> (u16, f32) {
        match self {
            EffectKind::BulletHit => (4, 50.0),
            EffectKind::SceneryDestroyed => (4, 100.0),
            EffectKind::Explosion => (6, 80.0),
        }
    }
}

/// A one-shot animation that removes itself when it has played through.
#[derive(Clone, Debug, PartialEq)]
pub struct Effect {
    pub entity: Entity,
    pub kind: EffectKind,
    timer: f32,
    detonated: bool,
}

impl Effect {
    pub fn new(kind: EffectKind, position: Vector) -> Effect {
        let (frames, duration) = kind.timing();
        let animation = Animation::once(frames, duration);
        let mut entity = Entity::new(position, Sprite::animated(kind.texture(), animation));
        entity.solid = false;
        entity.speed = 0.0;
        Effect {
            entity,
            kind,
            timer: animation.total_duration(),
            detonated: false,
        }
    }

    pub(crate) fn update(&mut self, world: &mut World, delta: f32) {
        self.entity.update(delta, &world.grid);
        if self.kind == EffectKind::Explosion && !self.detonated {
            self.detonated = true;
            world.explode(self.entity.position);
        }
        if self.timer > 0.0 {
            self.timer -= delta;
            if self.timer <= 0.0 {
                self.entity.lifecycle = Lifecycle::Dead;
            }
        }
    }
}

/// Cheap drifting sprite with a lifetime, used for smoke.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub sprite: Sprite,
    pub position: Vector,
    pub velocity: Vector,
    pub height: f32,
    pub height_velocity: f32,
    pub speed: f32,
    /// Milliseconds left to live.
    pub ttl: f32,
}

impl Particle {
    pub fn new(
        position: Vector,
        velocity: Vector,
        height: f32,
        height_velocity: f32,
        speed: f32,
        ttl: f32,
        sprite: Sprite,
    ) -> Particle {
        let mut sprite = sprite;
        sprite.position = position;
        sprite.height_offset = height;
        Particle {
            sprite,
            position,
            velocity,
            height,
            height_velocity,
            speed,
            ttl,
        }
    }

    /// A puff that billows upward and then settles.
    pub fn smoke(position: Vector, rng: &mut SmallRng) -> Particle {
        let velocity = Vector::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
        Particle::new(
            position,
            velocity,
            0.0,
            rng.gen_range(-0.02..-0.005),
            rng.gen_range(0.0002..0.0006),
            rng.gen_range(600.0..1200.0),
            Sprite::animated(TEX_SMOKE, Animation::looping(4, 150.0)),
        )
    }

    pub fn is_alive(&self) -> bool {
        self.ttl > 0.0
    }

    pub fn update(&mut self, delta: f32) {
        self.ttl -= delta;
        if !self.is_alive() {
            return;
        }

        self.position = self.position + self.velocity * (delta * self.speed);
        self.height += self.height_velocity;

        self.height_velocity = (self.height_velocity + GRAVITY * delta).min(GRAVITY);
        self.velocity = self.velocity * PHYSICS_DAMPENING;

        self.sprite.position = self.position;
        self.sprite.height_offset = self.height;
        if let Some(animation) = self.sprite.animation.as_mut() {
            animation.update(delta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn particles_expire() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut p = Particle::smoke(Vector::new(2.0, 2.0), &mut rng);
        assert!(p.is_alive());
        let ttl = p.ttl;
        p.update(ttl / 2.0);
        assert!(p.is_alive());
        assert!(p.height < 0.0);
        p.update(ttl);
        assert!(!p.is_alive());
    }

    #[test]
    fn rising_smoke_is_pulled_back_down() {
        let mut p = Particle::new(
            Vector::ZERO,
            Vector::new(1.0, 0.0),
            0.0,
            -0.01,
            0.001,
            10_000.0,
            Sprite::new(TEX_SMOKE),
        );
        for _ in 0..100 {
            p.update(16.0);
        }
        assert!(p.height_velocity <= GRAVITY);
        assert!(p.height_velocity > 0.0);
        assert!(p.velocity.x < 1e-3);
    }

    #[test]
    fn effect_lasts_its_animation() {
        let effect = Effect::new(EffectKind::BulletHit, Vector::ZERO);
        let (frames, duration) = EffectKind::BulletHit.timing();
        assert_eq!(effect.timer, frames as f32 * duration);
    }
}
