/// Every sound the simulation can ask for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sound {
    Shoot,
    EnemyShoot,
    EnemyHurt,
    EnemyDie,
    EnemyAttack,
    PlayerHurt,
    Pickup,
    Door,
    Locked,
    Thud,
    Explosion,
    BulletHit,
}

/// Fire-and-forget audio sink. A sink that has no clip for a sound just
/// ignores it.
pub trait SoundPlayer {
    fn play_sound(&mut self, sound: Sound);
}

/// Plays nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silence;

impl SoundPlayer for Silence {
    fn play_sound(&mut self, _sound: Sound) {}
}
