use crate::color::{Rgba, HURT_FLASH};
use crate::constants::{
    BULLET_SPAWN_OFFSET, DOOR_REACH, MOVE_AMOUNT, MOVE_LOOKAHEAD, PLAYER_WIDTH, ROTATE_AMOUNT,
    SCREEN_FLASH_TIME, START_HEALTH,
};
use crate::grid::{DoorAction, TileGrid};
use crate::ray::Camera;
use crate::sound::{Sound, SoundPlayer};
use crate::state::arms::{Bullet, BulletOwner, Weapon};
use crate::state::items::PickupKind;
use crate::state::World;
use crate::util::Vector;

/// What the player wants to do this tick, already decoded from the input
/// device.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Intents {
    pub forward: bool,
    pub backward: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub fire: bool,
    /// Open or close the door in front. Should be set for one tick per press.
    pub interact: bool,
    pub quit: bool,
    /// Show or hide the mini-map. One tick per press, like `interact`.
    pub toggle_map: bool,
    /// Turn amount; positive turns right.
    pub turn: f32,
}

/// Ways a session can end. None of them are errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    Quit,
    Died,
    Won,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenFlash {
    pub color: Rgba,
    pub remaining: f32,
}

impl ScreenFlash {
    /// 1.0 right after the flash starts, fading to 0.0.
    pub fn strength(&self) -> f32 {
        (self.remaining / SCREEN_FLASH_TIME).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub position: Vector,
    pub facing: Vector,
    pub plane: Vector,
    pub width: f32,
    pub health: i32,
    pub souls: i32,
    pub keys: i32,
    pub weapon: Weapon,
    pub flash: Option<ScreenFlash>,
    pub show_map: bool,
}

impl Default for Player {
    fn default() -> Player {
        Player::new(Vector::new(0.5, 0.5), Vector::new(1.0, 0.0), 0.66)
    }
}

impl Player {
    pub fn new(position: Vector, facing: Vector, plane_length: f32) -> Player {
        let facing = facing.normalize();
        Player {
            position,
            facing,
            plane: facing.perpendicular() * plane_length,
            width: PLAYER_WIDTH,
            health: START_HEALTH,
            souls: 0,
            keys: 0,
            weapon: Weapon::default(),
            flash: None,
            show_map: false,
        }
    }

    pub fn camera(&self) -> Camera {
        Camera {
            position: self.position,
            facing: self.facing,
            plane: self.plane,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    pub fn take_damage(&mut self, amount: i32, sound: &mut dyn SoundPlayer) {
        self.health -= amount;
        self.start_flash(HURT_FLASH);
        sound.play_sound(Sound::PlayerHurt);
    }

    /// Adds a pickup's worth to the matching stock, never past its maximum.
    pub fn collect(&mut self, kind: PickupKind, amount: i32) {
        match kind {
            PickupKind::Ammo => self.weapon.add_ammo(amount),
            PickupKind::Health => self.health = add_clamped(self.health, amount, kind),
            PickupKind::Soul => self.souls = add_clamped(self.souls, amount, kind),
            PickupKind::Key => self.keys = add_clamped(self.keys, amount, kind),
        }
        self.start_flash(kind.flash_color());
    }

    pub fn start_flash(&mut self, color: Rgba) {
        self.flash = Some(ScreenFlash {
            color,
            remaining: SCREEN_FLASH_TIME,
        });
    }

    pub(crate) fn update(&mut self, world: &mut World, intents: &Intents, delta: f32) -> Option<SessionEnd> {
        if intents.quit {
            return Some(SessionEnd::Quit);
        }
        if intents.toggle_map {
            self.show_map = !self.show_map;
        }

        self.weapon.cool_down(delta);
        if let Some(flash) = self.flash.as_mut() {
            flash.remaining -= delta;
            if flash.remaining <= 0.0 {
                self.flash = None;
            }
        }

        if intents.turn != 0.0 {
            let angle = intents.turn * ROTATE_AMOUNT * delta;
            self.facing = self.facing.rotate(angle);
            self.plane = self.plane.rotate(angle);
        }

        let mut direction = Vector::ZERO;
        let strafe = self.facing.perpendicular();
        if intents.forward {
            direction = direction + self.facing;
        }
        if intents.backward {
            direction = direction - self.facing;
        }
        if intents.strafe_right {
            direction = direction + strafe;
        }
        if intents.strafe_left {
            direction = direction - strafe;
        }
        if direction != Vector::ZERO {
            self.walk(&world.grid, direction.normalize() * (MOVE_AMOUNT * delta));
        }

        if intents.fire && self.weapon.try_fire() {
            log::trace!("Shot bullet");
            world.sound.play_sound(Sound::Shoot);
            let muzzle = self.position + self.facing * BULLET_SPAWN_OFFSET;
            world.spawn_bullet(Bullet::new(muzzle, self.facing, BulletOwner::Player));
        }

        if intents.interact {
            self.use_door(world);
        }

        if self.is_dead() {
            return Some(SessionEnd::Died);
        }
        None
    }

    /// Moves one axis at a time so walls can be slid along.
    fn walk(&mut self, grid: &TileGrid, step: Vector) {
        let ahead = Vector::new(self.position.x + step.x * MOVE_LOOKAHEAD, self.position.y);
        if !grid.point_blocked(ahead) {
            self.position.x += step.x;
        }
        let ahead = Vector::new(self.position.x, self.position.y + step.y * MOVE_LOOKAHEAD);
        if !grid.point_blocked(ahead) {
            self.position.y += step.y;
        }
    }

    fn use_door(&mut self, world: &mut World) {
        let (x, y) = (self.position + self.facing * DOOR_REACH).tile();
        let (locked, open) = match world.grid.get(x, y) {
            Some(tile) if tile.door => (tile.locked, !tile.blocking),
            _ => return,
        };

        if open && self.overlaps_tile(x, y) {
            return;
        }

        if locked {
            if self.keys <= 0 {
                world.sound.play_sound(Sound::Locked);
                return;
            }
            self.keys -= 1;
            world.grid.unlock(x, y);
            log::debug!("Unlocked door at ({x}, {y})");
        }

        match world.grid.toggle_door(x, y) {
            DoorAction::Opened | DoorAction::Closed => world.sound.play_sound(Sound::Door),
            DoorAction::Locked => world.sound.play_sound(Sound::Locked),
            DoorAction::NotADoor => {}
        }
        log::debug!("Toggled door at ({x}, {y})");
    }

    fn overlaps_tile(&self, x: i32, y: i32) -> bool {
        let half = self.width / 2.0;
        let (px, py) = (self.position.x, self.position.y);
        px + half > x as f32 && px - half < (x + 1) as f32 && py + half > y as f32 && py - half < (y + 1) as f32
    }
}

fn add_clamped(current: i32, amount: i32, kind: PickupKind) -> i32 {
    let total = current + amount;
    kind.maximum().map_or(total, |max| total.min(max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MAX_AMMO, MAX_HEALTH};

    #[test]
    fn pickups_are_clamped_and_flash() {
        let mut player = Player::default();
        player.weapon.ammo = MAX_AMMO - 5;
        player.collect(PickupKind::Ammo, 20);
        assert_eq!(player.weapon.ammo, MAX_AMMO);
        assert!(player.flash.is_some());

        player.health = MAX_HEALTH - 1;
        player.collect(PickupKind::Health, 5);
        assert_eq!(player.health, MAX_HEALTH);

        player.collect(PickupKind::Key, 1);
        assert_eq!(player.keys, 1);
    }

    #[test]
    fn camera_plane_points_right() {
        let player = Player::new(Vector::new(1.0, 1.0), Vector::new(1.0, 0.0), 0.5);
        assert_eq!(player.plane, Vector::new(0.0, 0.5));
    }

    #[test]
    fn walking_stops_short_of_walls() {
        let mut grid = TileGrid::new(5, 5);
        grid.set(3, 2, crate::grid::Tile::wall(crate::grid::TextureId(1)));
        let mut player = Player::new(Vector::new(2.5, 2.5), Vector::new(1.0, 0.0), 0.66);
        for _ in 0..100 {
            player.walk(&grid, Vector::new(0.05, 0.0));
        }
        assert!(player.position.x < 3.0);
        assert!(player.position.x > 2.7);
    }

    #[test]
    fn walking_never_leaves_the_grid() {
        let grid = TileGrid::new(5, 5);
        let mut player = Player::new(Vector::new(0.5, 2.5), Vector::new(-1.0, 0.0), 0.66);
        for _ in 0..100 {
            player.walk(&grid, Vector::new(-0.05, 0.05));
        }
        assert!(player.position.x > 0.0);
        assert!(player.position.y < 5.0);
        assert!(grid.tile_at_point(player.position).is_some());
    }

    #[test]
    fn flashes_fade() {
        let flash = ScreenFlash {
            color: HURT_FLASH,
            remaining: SCREEN_FLASH_TIME / 2.0,
        };
        assert!((flash.strength() - 0.5).abs() < 1e-6);
    }
}
