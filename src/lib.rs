// Initially based on [wasm4-raycaster](https://github.com/grantshandy/wasm4-raycaster)
// which carries an MIT License and is Copyright (c) 2023 Grant Handy.

//! A grid ray-casting engine with a small real-time world to go with it.
//!
//! The host loads a [`LevelData`], builds a [`World`] with a [`SoundPlayer`],
//! then every frame calls [`World::update`] with the player's [`Intents`] and
//! [`Renderer::render`] to fill an RGBA frame buffer. Nothing here touches a
//! window, a file or an audio device.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod color;
pub mod config;
pub mod constants;
pub mod entity;
pub mod error;
pub mod grid;
pub mod level;
pub mod ray;
pub mod sound;
pub mod state;
pub mod util;
pub mod view;

pub use color::Rgba;
pub use config::Config;
pub use entity::{collides, Animation, Entity, Lifecycle, Sprite};
pub use error::LevelError;
pub use grid::{DoorAction, DoorOrientation, TextureId, Tile, TileGrid};
pub use level::{Compass, LevelData, Spawn, SpawnKind};
pub use ray::{cast_ray, cast_wall_ray, has_line_of_sight, move_ray, Camera, RayHit, Side};
pub use sound::{Silence, Sound, SoundPlayer};
pub use state::maze::maze_level;
pub use state::{
    Bullet, BulletOwner, Effect, EffectKind, Enemy, EnemyKind, EnemyState, Intents, Particle,
    Pickup, PickupKind, Player, Portal, Scenery, SceneryKind, SessionEnd, World,
};
pub use util::Vector;
pub use view::{FrameBuffer, Renderer, Texture, TextureSource, TextureStore};
