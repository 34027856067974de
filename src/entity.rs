use heapless::Vec;

use crate::constants::{
    ENTITY_SPEED, ENTITY_WIDTH, MAX_IMPULSES, MAX_SPRITES_PER_ENTITY, MIN_IMPULSE, PHYSICS_DAMPENING,
};
use crate::grid::{TextureId, TileGrid};
use crate::state::PickupKind;
use crate::util::{compact, Vector};

/// Coarse status of an entity. Only `Active` entities walk; `Dead` ones are
/// dropped by their collection at the end of the tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Active,
    Stunned,
    Stopped,
    Dead,
}

/// Frame timing for a horizontal strip of frames in one sprite sheet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Animation {
    pub frame_count: u16,
    pub frame_duration: f32,
    pub current_frame: u16,
    pub elapsed: f32,
    pub looping: bool,
    pub playing: bool,
    /// Return to frame 0 when a one-shot animation finishes.
    pub reset: bool,
}

impl Animation {
    pub const fn looping(frame_count: u16, frame_duration: f32) -> Animation {
        Animation {
            frame_count,
            frame_duration,
            current_frame: 0,
            elapsed: 0.0,
            looping: true,
            playing: true,
            reset: false,
        }
    }

    pub const fn once(frame_count: u16, frame_duration: f32) -> Animation {
        Animation {
            looping: false,
            ..Animation::looping(frame_count, frame_duration)
        }
    }

    pub fn total_duration(&self) -> f32 {
        self.frame_count as f32 * self.frame_duration
    }

    /// Restarts from the first frame unless already playing.
    pub fn play(&mut self) {
        if !self.playing {
            self.playing = true;
            self.current_frame = 0;
            self.elapsed = 0.0;
        }
    }

    pub fn update(&mut self, delta: f32) {
        if !self.playing || self.frame_count <= 1 {
            return;
        }
        self.elapsed += delta;
        while self.elapsed > self.frame_duration && self.playing {
            self.elapsed -= self.frame_duration;
            self.current_frame += 1;
            if self.current_frame == self.frame_count {
                if self.looping {
                    self.current_frame = 0;
                } else {
                    self.current_frame = if self.reset { 0 } else { self.frame_count - 1 };
                    self.playing = false;
                }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub texture: TextureId,
    pub position: Vector,
    /// Vertical shift in wall heights; positive sinks the sprite toward the floor.
    pub height_offset: f32,
    /// Squared distance to the player, refreshed every tick and every frame.
    /// Negative until first measured.
    pub distance: f32,
    pub animation: Option<Animation>,
}

impl Sprite {
    pub fn new(texture: TextureId) -> Sprite {
        Sprite {
            texture,
            position: Vector::ZERO,
            height_offset: 0.0,
            distance: -1.0,
            animation: None,
        }
    }

    pub fn animated(texture: TextureId, animation: Animation) -> Sprite {
        Sprite {
            animation: Some(animation),
            ..Sprite::new(texture)
        }
    }

    pub fn with_height(mut self, height_offset: f32) -> Sprite {
        self.height_offset = height_offset;
        self
    }

    pub fn frame(&self) -> u16 {
        self.animation.map_or(0, |a| a.current_frame)
    }
}

pub type SpriteSet = Vec<Sprite, MAX_SPRITES_PER_ENTITY>;

/// State every moving or static object in the world shares. Gameplay types
/// each own exactly one and call [`Entity::update`] themselves.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub position: Vector,
    pub facing: Vector,
    pub speed: f32,
    pub health: i32,
    pub lifecycle: Lifecycle,
    pub sprites: SpriteSet,
    pub current_sprite: usize,
    pub width: f32,
    pub drop_item: Option<PickupKind>,
    /// Pushed around by impulses.
    pub physics: bool,
    /// Stops at blocking tiles instead of passing into them.
    pub solid: bool,
    impulses: Vec<Vector, MAX_IMPULSES>,
    last_move: Vector,
}

impl Entity {
    pub fn new(position: Vector, sprite: Sprite) -> Entity {
        Entity::with_sprites(position, [sprite])
    }

    pub fn with_sprites<const K: usize>(position: Vector, sprites: [Sprite; K]) -> Entity {
        let mut set = SpriteSet::new();
        for mut sprite in sprites {
            sprite.position = position;
            if set.push(sprite).is_err() {
                log::warn!("Sprite set is full");
                break;
            }
        }
        Entity {
            position,
            facing: Vector::ZERO,
            speed: ENTITY_SPEED,
            health: 2,
            lifecycle: Lifecycle::Active,
            sprites: set,
            current_sprite: 0,
            width: ENTITY_WIDTH,
            drop_item: None,
            physics: false,
            solid: true,
            impulses: Vec::new(),
            last_move: Vector::ZERO,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.lifecycle == Lifecycle::Dead
    }

    pub fn current_sprite(&self) -> Option<&Sprite> {
        self.sprites.get(self.current_sprite)
    }

    pub fn current_sprite_mut(&mut self) -> Option<&mut Sprite> {
        self.sprites.get_mut(self.current_sprite)
    }

    /// Switches sprite, restarting its animation and carrying over the last
    /// measured distance to the player.
    pub fn set_current_sprite(&mut self, index: usize) {
        if index >= self.sprites.len() {
            return;
        }
        let distance = self.current_sprite().map_or(-1.0, |s| s.distance);
        self.current_sprite = index;
        if let Some(sprite) = self.current_sprite_mut() {
            sprite.distance = distance;
            if let Some(animation) = sprite.animation.as_mut() {
                animation.playing = false;
                animation.play();
            }
        }
    }

    /// Squared distance to the player as last measured, or `None` before the
    /// first measurement.
    pub fn distance_to_player(&self) -> Option<f32> {
        self.current_sprite()
            .map(|s| s.distance)
            .filter(|d| *d >= 0.0)
    }

    pub fn measure_distance(&mut self, player: Vector) {
        let distance = self.position.distance_squared(player);
        if let Some(sprite) = self.current_sprite_mut() {
            sprite.distance = distance;
        }
    }

    /// Queues a push. When the queue is full the push folds into the newest one.
    pub fn apply_impulse(&mut self, impulse: Vector) {
        if !self.physics {
            return;
        }
        if let Err(impulse) = self.impulses.push(impulse) {
            if let Some(last) = self.impulses.last_mut() {
                *last = *last + impulse;
            }
        }
    }

    pub fn is_being_pushed(&self) -> bool {
        !self.impulses.is_empty()
    }

    /// Walks along `facing` when active, drifts under any impulses and
    /// advances the current animation.
    pub fn update(&mut self, delta: f32, grid: &TileGrid) {
        if self.is_dead() {
            return;
        }

        self.last_move = Vector::ZERO;
        if self.lifecycle == Lifecycle::Active {
            let step = self.facing * (self.speed * delta);
            self.last_move = self.slide(step, grid);
        }

        if self.physics {
            for i in 0..self.impulses.len() {
                let push = self.impulses[i] * delta;
                self.slide(push, grid);
                self.impulses[i] = self.impulses[i] * PHYSICS_DAMPENING;
            }
            compact(&mut self.impulses, |i| i.length() > MIN_IMPULSE);
        }

        let position = self.position;
        for sprite in self.sprites.iter_mut() {
            sprite.position = position;
        }
        if let Some(animation) = self.current_sprite_mut().and_then(|s| s.animation.as_mut()) {
            animation.update(delta);
        }
    }

    /// Takes back the walking step of the last update.
    pub fn undo_last_move(&mut self) {
        self.position = self.position - self.last_move;
        self.last_move = Vector::ZERO;
        let position = self.position;
        for sprite in self.sprites.iter_mut() {
            sprite.position = position;
        }
    }

    fn slide(&mut self, step: Vector, grid: &TileGrid) -> Vector {
        if !self.solid {
            self.position = self.position + step;
            return step;
        }
        let mut moved = Vector::ZERO;
        let along_x = Vector::new(self.position.x + step.x, self.position.y);
        if !grid.point_blocked(along_x) {
            self.position.x = along_x.x;
            moved.x = step.x;
        }
        let along_y = Vector::new(self.position.x, self.position.y + step.y);
        if !grid.point_blocked(along_y) {
            self.position.y = along_y.y;
            moved.y = step.y;
        }
        moved
    }
}

/// Box overlap between two centred squares of the given widths.
pub fn overlaps(a: Vector, a_width: f32, b: Vector, b_width: f32) -> bool {
    let reach = (a_width + b_width) / 2.0;
    libm::fabsf(a.x - b.x) < reach && libm::fabsf(a.y - b.y) < reach
}

/// Box overlap between two living entities.
pub fn collides(a: &Entity, b: &Entity) -> bool {
    if a.is_dead() || b.is_dead() {
        return false;
    }
    overlaps(a.position, a.width, b.position, b.width)
}
