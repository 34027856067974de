use serde::{Deserialize, Serialize};

use crate::color::{Rgba, AMMO_FLASH, HEALTH_FLASH, KEY_FLASH, SOUL_FLASH};
use crate::constants::{
    MAX_HEALTH, MAX_KEYS, MAX_SOULS, TEX_AMMO, TEX_BARREL, TEX_BUSH, TEX_CANDLESTICK, TEX_HEALTH,
    TEX_KEY, TEX_PORTAL, TEX_SOUL, TEX_TREE, TEX_WEB,
};
use crate::entity::{overlaps, Animation, Entity, Lifecycle, Sprite};
use crate::grid::TextureId;
use crate::sound::Sound;
use crate::state::effects::EffectKind;
use crate::state::player::SessionEnd;
use crate::state::World;
use crate::util::Vector;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    Ammo,
    Health,
    Soul,
    Key,
}

impl PickupKind {
    pub fn texture(self) -> TextureId {
        match self {
            PickupKind::Ammo => TEX_AMMO,
            PickupKind::Health => TEX_HEALTH,
            PickupKind::Soul => TEX_SOUL,
            PickupKind::Key => TEX_KEY,
        }
    }

    /// How much a dropped item of this kind is worth.
    pub fn default_amount(self) -> i32 {
        match self {
            PickupKind::Ammo => 20,
            PickupKind::Health => 5,
            PickupKind::Soul | PickupKind::Key => 1,
        }
    }

    pub fn flash_color(self) -> Rgba {
        match self {
            PickupKind::Ammo => AMMO_FLASH,
            PickupKind::Health => HEALTH_FLASH,
            PickupKind::Soul => SOUL_FLASH,
            PickupKind::Key => KEY_FLASH,
        }
    }

    /// Upper bound for the player's stock. Ammo is bounded by the weapon.
    pub fn maximum(self) -> Option<i32> {
        match self {
            PickupKind::Ammo => None,
            PickupKind::Health => Some(MAX_HEALTH),
            PickupKind::Soul => Some(MAX_SOULS),
            PickupKind::Key => Some(MAX_KEYS),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Pickup {
    pub entity: Entity,
    pub kind: PickupKind,
    pub amount: i32,
}

impl Pickup {
    pub fn new(kind: PickupKind, amount: i32, position: Vector) -> Pickup {
        let mut entity = Entity::new(position, Sprite::new(kind.texture()).with_height(0.25));
        entity.speed = 0.0;
        Pickup {
            entity,
            kind,
            amount,
        }
    }

    pub(crate) fn update(&mut self, world: &mut World, delta: f32) {
        self.entity.update(delta, &world.grid);
        if self.entity.is_dead() {
            return;
        }
        let player = &world.player;
        if overlaps(player.position, player.width, self.entity.position, self.entity.width) {
            world.player.collect(self.kind, self.amount);
            world.sound.play_sound(Sound::Pickup);
            self.entity.lifecycle = Lifecycle::Dead;
            log::debug!("Picked up {} {:?}", self.amount, self.kind);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneryKind {
    Candlestick,
    Barrel,
    Tree,
    Bush,
    Web,
}

struct SceneryStats {
    texture: TextureId,
    animation: Option<Animation>,
    effect: EffectKind,
    sound: Sound,
    collidable: bool,
    physics: bool,
    drop: Option<PickupKind>,
}

const CANDLESTICK: SceneryStats = SceneryStats {
    texture: TEX_CANDLESTICK,
    animation: Some(Animation::looping(4, 150.0)),
    effect: EffectKind::SceneryDestroyed,
    sound: Sound::Thud,
    collidable: true,
    physics: true,
    drop: None,
};

const BARREL: SceneryStats = SceneryStats {
    texture: TEX_BARREL,
    animation: None,
    effect: EffectKind::Explosion,
    sound: Sound::Explosion,
    collidable: true,
    physics: true,
    drop: Some(PickupKind::Ammo),
};

const TREE: SceneryStats = SceneryStats {
    texture: TEX_TREE,
    animation: None,
    effect: EffectKind::SceneryDestroyed,
    sound: Sound::Thud,
    collidable: true,
    physics: false,
    drop: None,
};

const BUSH: SceneryStats = SceneryStats {
    texture: TEX_BUSH,
    animation: None,
    effect: EffectKind::SceneryDestroyed,
    sound: Sound::Thud,
    collidable: true,
    physics: false,
    drop: Some(PickupKind::Health),
};

const WEB: SceneryStats = SceneryStats {
    texture: TEX_WEB,
    animation: None,
    effect: EffectKind::SceneryDestroyed,
    sound: Sound::Thud,
    collidable: false,
    physics: false,
    drop: None,
};

impl SceneryKind {
    fn stats(self) -> &'static SceneryStats {
        match self {
            SceneryKind::Candlestick => &CANDLESTICK,
            SceneryKind::Barrel => &BARREL,
            SceneryKind::Tree => &TREE,
            SceneryKind::Bush => &BUSH,
            SceneryKind::Web => &WEB,
        }
    }
}

/// Something destructible that mostly stands around.
#[derive(Clone, Debug, PartialEq)]
pub struct Scenery {
    pub entity: Entity,
    pub kind: SceneryKind,
}

/// What a destroyed piece of scenery leaves behind.
pub(crate) struct Debris {
    pub position: Vector,
    pub effect: EffectKind,
    pub sound: Sound,
    pub drop: Option<PickupKind>,
}

impl Scenery {
    pub fn new(kind: SceneryKind, position: Vector) -> Scenery {
        let stats = kind.stats();
        let sprite = match stats.animation {
            Some(animation) => Sprite::animated(stats.texture, animation),
            None => Sprite::new(stats.texture),
        };
        let mut entity = Entity::new(position, sprite);
        entity.health = 0;
        entity.speed = 0.0;
        entity.physics = stats.physics;
        entity.drop_item = stats.drop;
        Scenery { entity, kind }
    }

    pub fn collidable(&self) -> bool {
        self.kind.stats().collidable
    }

    pub(crate) fn update(&mut self, world: &mut World, delta: f32) {
        self.entity.update(delta, &world.grid);
    }

    /// Knocks off health and reports the wreckage once it drops below zero.
    pub(crate) fn take_damage(&mut self, amount: i32) -> Option<Debris> {
        if self.entity.is_dead() {
            return None;
        }
        self.entity.health -= amount;
        if self.entity.health >= 0 {
            return None;
        }
        self.entity.lifecycle = Lifecycle::Dead;
        let stats = self.kind.stats();
        Some(Debris {
            position: self.entity.position,
            effect: stats.effect,
            sound: stats.sound,
            drop: self.entity.drop_item,
        })
    }
}

/// Level exit.
#[derive(Clone, Debug, PartialEq)]
pub struct Portal {
    pub entity: Entity,
}

impl Portal {
    pub fn new(position: Vector) -> Portal {
        let sprite = Sprite::animated(TEX_PORTAL, Animation::looping(4, 200.0));
        let mut entity = Entity::new(position, sprite);
        entity.speed = 0.0;
        Portal { entity }
    }

    pub(crate) fn update(&mut self, world: &mut World, delta: f32) {
        self.entity.update(delta, &world.grid);
        let player = &world.player;
        if overlaps(player.position, player.width, self.entity.position, self.entity.width) {
            log::debug!("Player reached the portal");
            world.ending = Some(SessionEnd::Won);
        }
    }
}
