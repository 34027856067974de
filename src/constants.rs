use crate::grid::TextureId;

// Ray casting
pub const MAX_RAY_DISTANCE: f32 = 256.0; // Sentinel distance for rays that never hit anything.
pub const HUGE_STEP: f32 = 1.0e30; // Stands in for 1/0 when a ray component is zero.
pub const DEFAULT_FOV_DEGREES: f32 = 70.0;
pub const SCREEN_WIDTH: usize = 256;
pub const SCREEN_HEIGHT: usize = 192;

// Mini-map
pub const MINI_MAP_TILES: usize = 32; // width and height of the window around the player
pub const MINI_MAP_PIXEL: usize = 2; // screen pixels per tile
pub const MINI_MAP_MARGIN: usize = 8; // gap to the bottom-left corner of the screen

// Player
pub const PLAYER_WIDTH: f32 = 0.4;
pub const MOVE_AMOUNT: f32 = 0.002; // tiles per millisecond
pub const MOVE_LOOKAHEAD: f32 = 4.0; // how far ahead (in move steps) walls are probed
pub const ROTATE_AMOUNT: f32 = 0.0005; // radians per millisecond per unit of turn
pub const FIRE_RATE: f32 = 200.0; // milliseconds between shots
pub const START_AMMO: i32 = 50;
pub const MAX_AMMO: i32 = 100;
pub const START_HEALTH: i32 = 10;
pub const MAX_HEALTH: i32 = 10;
pub const MAX_SOULS: i32 = 99;
pub const MAX_KEYS: i32 = 9;
pub const DOOR_REACH: f32 = 1.0;
pub const SCREEN_FLASH_TIME: f32 = 300.0;

// Entities
pub const ENTITY_SPEED: f32 = 0.002;
pub const ENTITY_WIDTH: f32 = 20.0 / 32.0;
pub const BULLET_WIDTH: f32 = 4.0 / 32.0;
pub const BULLET_SPEED: f32 = 0.01;
pub const ENEMY_BULLET_SPEED: f32 = BULLET_SPEED * 0.5;
pub const BULLET_SPAWN_OFFSET: f32 = 0.25; // bullets leave this far in front of the shooter
pub const PHYSICS_DAMPENING: f32 = 0.9;
pub const MIN_IMPULSE: f32 = 0.00001;
pub const GRAVITY: f32 = 0.0009;
pub const LAST_KNOWN_RADIUS: f32 = 0.25;
pub const WANDER_PROBE_DISTANCE: f32 = 3.0;
pub const MAX_WANDER_DISTANCE: f32 = 4.0;
pub const EXPLOSION_FORCE: f32 = 0.004;
pub const SMOKE_PARTICLES: usize = 8;

// Collection capacities
pub const MAX_BULLETS: usize = 64;
pub const MAX_ENEMIES: usize = 32;
pub const MAX_PICKUPS: usize = 64;
pub const MAX_SCENERY: usize = 64;
pub const MAX_EFFECTS: usize = 32;
pub const MAX_PORTALS: usize = 4;
pub const MAX_PARTICLES: usize = 128;
pub const MAX_SPRITES_PER_ENTITY: usize = 4;
pub const MAX_IMPULSES: usize = 4;

// Sprite sheets the host registers at these ids.
pub const TEX_BULLET: TextureId = TextureId(100);
pub const TEX_BULLET_HIT: TextureId = TextureId(101);
pub const TEX_EXPLOSION: TextureId = TextureId(102);
pub const TEX_SCENERY_DESTROYED: TextureId = TextureId(103);
pub const TEX_SMOKE: TextureId = TextureId(104);
pub const TEX_PORTAL: TextureId = TextureId(105);
pub const TEX_AMMO: TextureId = TextureId(110);
pub const TEX_HEALTH: TextureId = TextureId(111);
pub const TEX_SOUL: TextureId = TextureId(112);
pub const TEX_KEY: TextureId = TextureId(113);
pub const TEX_CANDLESTICK: TextureId = TextureId(120);
pub const TEX_BARREL: TextureId = TextureId(121);
pub const TEX_TREE: TextureId = TextureId(122);
pub const TEX_BUSH: TextureId = TextureId(123);
pub const TEX_WEB: TextureId = TextureId(124);
pub const TEX_BALL_MOVE: TextureId = TextureId(130);
pub const TEX_BALL_HURT: TextureId = TextureId(131);
pub const TEX_BALL_ATTACK: TextureId = TextureId(132);
pub const TEX_BALL_DIE: TextureId = TextureId(133);
pub const TEX_BLUE_MOVE: TextureId = TextureId(134);
pub const TEX_BLUE_HURT: TextureId = TextureId(135);
pub const TEX_BLUE_ATTACK: TextureId = TextureId(136);
pub const TEX_BLUE_DIE: TextureId = TextureId(137);
pub const TEX_BLOB_MOVE: TextureId = TextureId(138);
pub const TEX_BLOB_HURT: TextureId = TextureId(139);
pub const TEX_BLOB_ATTACK: TextureId = TextureId(140);
pub const TEX_BLOB_DIE: TextureId = TextureId(141);
pub const TEX_ALIEN_MOVE: TextureId = TextureId(142);
pub const TEX_ALIEN_HURT: TextureId = TextureId(143);
pub const TEX_ALIEN_ATTACK: TextureId = TextureId(144);
pub const TEX_ALIEN_DIE: TextureId = TextureId(145);
pub const TEX_WALL: TextureId = TextureId(1);
