//! The ninja: motion state machine, item tracks and shield
//!
//! The per-state data lives in [`Motion`], so a jump always carries its own
//! flight and a power-up its own timers. [`step`] is a pure transition: it
//! returns the next player together with the side effects (sounds, wall speed
//! changes) for the orchestrator to apply.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::animation::{Animation, Sheet};
use super::entity::Side;
use super::rect::Rect;
use crate::audio::SoundCue;
use crate::consts::{GEMS_PER_SHIELD, ITEMS_PER_POWER_UP};
use crate::projectile;
use crate::tuning::Tuning;

/// Plain enumerated view of the player's state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerState {
    RunLeft,
    RunRight,
    Jump,
    Idle,
    NinjaStarPowerUp,
    FlyingObjectPowerUp,
    HorizontalEnemyPowerUp,
    Hit,
}

impl PlayerState {
    pub fn is_running(self) -> bool {
        matches!(self, PlayerState::RunLeft | PlayerState::RunRight)
    }

    /// States in which hits are ignored and spawning is suspended
    pub fn is_invulnerable(self) -> bool {
        matches!(
            self,
            PlayerState::Idle | PlayerState::NinjaStarPowerUp | PlayerState::HorizontalEnemyPowerUp
        )
    }
}

/// Projectile flight from a fixed origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub origin: Vec2,
    pub heading: Side,
    /// Seconds since the flight started
    pub time: f32,
}

impl Flight {
    pub fn new(origin: Vec2, heading: Side) -> Self {
        Self {
            origin,
            heading,
            time: 0.0,
        }
    }

    /// Advance the clock and return the new position
    pub fn advance(&mut self, dt: f32, velocity: Vec2, gravity: f32) -> Vec2 {
        self.time += dt;
        projectile(self.origin, self.heading.sign(), velocity, gravity, self.time)
    }
}

/// State-specific data of the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    /// Running up the wall on the given side
    Run(Side),
    Jump(Flight),
    /// Holding still while the camera catches up after a rocket ride
    Idle,
    NinjaStarPowerUp {
        elapsed: f32,
        lift_off_played: bool,
    },
    /// Never entered by the game rules
    FlyingObjectPowerUp,
    HorizontalEnemyPowerUp {
        bounces: u32,
        moving: Side,
    },
    Hit {
        fall: Flight,
        elapsed: f32,
    },
}

impl Motion {
    pub fn state(&self) -> PlayerState {
        match self {
            Motion::Run(Side::Left) => PlayerState::RunLeft,
            Motion::Run(Side::Right) => PlayerState::RunRight,
            Motion::Jump(_) => PlayerState::Jump,
            Motion::Idle => PlayerState::Idle,
            Motion::NinjaStarPowerUp { .. } => PlayerState::NinjaStarPowerUp,
            Motion::FlyingObjectPowerUp => PlayerState::FlyingObjectPowerUp,
            Motion::HorizontalEnemyPowerUp { .. } => PlayerState::HorizontalEnemyPowerUp,
            Motion::Hit { .. } => PlayerState::Hit,
        }
    }
}

/// Item categories that charge a power-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpTrack {
    NinjaStars,
    FlyingObjects,
    HorizontalEnemies,
}

impl PowerUpTrack {
    pub const ALL: [PowerUpTrack; 3] = [
        PowerUpTrack::NinjaStars,
        PowerUpTrack::FlyingObjects,
        PowerUpTrack::HorizontalEnemies,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Per-track item counts. Collecting on one track clears the others.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCounters([u8; 3]);

impl ItemCounters {
    pub fn get(&self, track: PowerUpTrack) -> u8 {
        self.0[track.index()]
    }

    /// Count one item on `track` (capped) and zero every other track
    pub fn increment(&mut self, track: PowerUpTrack) -> u8 {
        for other in PowerUpTrack::ALL {
            if other != track {
                self.0[other.index()] = 0;
            }
        }
        let count = &mut self.0[track.index()];
        if *count < ITEMS_PER_POWER_UP {
            *count += 1;
        }
        *count
    }

    pub fn reset(&mut self, track: PowerUpTrack) {
        self.0[track.index()] = 0;
    }

    pub fn is_charged(&self, track: PowerUpTrack) -> bool {
        self.get(track) >= ITEMS_PER_POWER_UP
    }

    /// The track currently holding items, if any
    pub fn charging(&self) -> Option<(PowerUpTrack, u8)> {
        PowerUpTrack::ALL
            .into_iter()
            .map(|t| (t, self.get(t)))
            .find(|&(_, n)| n > 0)
    }
}

/// Totals over a whole session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lifetime {
    pub gems: u32,
    pub shields_used: u32,
    pub power_ups_used: u32,
}

/// Result of a lethal contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Power-up, idle or already falling
    Ignored,
    ShieldConsumed,
    Hit,
}

/// Side effects of one [`step`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerEffect {
    Sound(SoundCue),
    /// Drive both walls' tile scroll at this speed
    WallSpeed(f32),
}

/// What [`step`] reads besides the player itself
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    pub tuning: &'a Tuning,
    pub camera_y: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub motion: Motion,
    pub previous: PlayerState,
    /// Side the player is heading for (the "direction state")
    pub heading: Side,
    pub items: ItemCounters,
    /// Rolling gem count; every 50 buys a shield
    pub gems: u32,
    pub lifetime: Lifetime,
    pub shield_on: bool,
    /// Set once the camera starts following; taps are ignored before that
    pub finished_transition: bool,
    #[serde(skip, default = "run_animation")]
    pub anim: Animation,
    #[serde(skip, default = "shield_animation")]
    pub shield_anim: Animation,
}

fn run_animation() -> Animation {
    Animation::new(Sheet::PlayerRun)
}

fn shield_animation() -> Animation {
    Animation::new(Sheet::Shield)
}

impl Player {
    /// Fresh player at the bottom of the left lane
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.margin_left(), tuning.viewport_height),
            motion: Motion::Run(Side::Left),
            previous: PlayerState::RunLeft,
            heading: Side::Left,
            items: ItemCounters::default(),
            gems: 0,
            lifetime: Lifetime::default(),
            shield_on: false,
            finished_transition: false,
            anim: run_animation(),
            shield_anim: shield_animation(),
        }
    }

    pub fn state(&self) -> PlayerState {
        self.motion.state()
    }

    /// Shrunken box used for every collision test
    pub fn collision_box(&self, tuning: &Tuning) -> Rect {
        let spec = self.anim.spec();
        let shrink = -tuning.player_box_shrink;
        Rect::centered(self.pos, spec.scaled_width(), spec.scaled_height()).inflate(shrink, shrink)
    }

    /// Whether the sprite should be drawn mirrored (facing left-to-right travel)
    pub fn flipped(&self) -> bool {
        match self.motion {
            Motion::Run(side) => side == Side::Right,
            Motion::HorizontalEnemyPowerUp { moving, .. } => moving == Side::Right,
            _ => self.heading == Side::Right,
        }
    }

    /// Seconds spent falling, if hit
    pub fn hit_elapsed(&self) -> Option<f32> {
        match self.motion {
            Motion::Hit { elapsed, .. } => Some(elapsed),
            _ => None,
        }
    }

    /// Seconds into the rocket ride, if riding
    pub fn power_up_elapsed(&self) -> Option<f32> {
        match self.motion {
            Motion::NinjaStarPowerUp { elapsed, .. } => Some(elapsed),
            _ => None,
        }
    }

    /// Start a jump toward the opposite wall. Only allowed while running.
    pub fn try_jump(&mut self) -> bool {
        let Motion::Run(side) = self.motion else {
            return false;
        };
        self.previous = self.state();
        self.heading = side.opposite();
        self.motion = Motion::Jump(Flight::new(self.pos, self.heading));
        true
    }

    /// Apply a lethal contact
    pub fn hit(&mut self) -> HitOutcome {
        let state = self.state();
        if state.is_invulnerable() || state == PlayerState::Hit {
            return HitOutcome::Ignored;
        }
        if self.shield_on {
            self.shield_on = false;
            log::debug!("Shield absorbed a hit");
            return HitOutcome::ShieldConsumed;
        }
        self.previous = state;
        self.motion = Motion::Hit {
            fall: Flight::new(self.pos, self.heading.opposite()),
            elapsed: 0.0,
        };
        HitOutcome::Hit
    }

    /// Count a collected gem. Returns true if this raised a shield.
    pub fn collect_gem(&mut self) -> bool {
        self.gems += 1;
        self.lifetime.gems += 1;
        if self.gems >= GEMS_PER_SHIELD {
            self.gems -= GEMS_PER_SHIELD;
            self.shield_on = true;
            self.lifetime.shields_used += 1;
            return true;
        }
        false
    }

    pub fn increment_item(&mut self, track: PowerUpTrack) -> u8 {
        self.items.increment(track)
    }

    pub fn enter_ninja_star_power_up(&mut self) {
        self.previous = self.state();
        self.motion = Motion::NinjaStarPowerUp {
            elapsed: 0.0,
            lift_off_played: false,
        };
    }

    pub fn enter_horizontal_power_up(&mut self) {
        self.previous = self.state();
        self.motion = Motion::HorizontalEnemyPowerUp {
            bounces: 0,
            moving: self.heading,
        };
    }

    /// Play the lift-off cue once per rocket ride. Returns true the first time.
    pub fn mark_lift_off(&mut self) -> bool {
        match &mut self.motion {
            Motion::NinjaStarPowerUp {
                lift_off_played, ..
            } if !*lift_off_played => {
                *lift_off_played = true;
                true
            }
            _ => false,
        }
    }

    fn advance(&mut self, ctx: &StepContext<'_>, dt: f32, effects: &mut Vec<PlayerEffect>) {
        let t = ctx.tuning;
        let (margin_left, margin_right) = (t.margin_left(), t.margin_right());

        self.motion = match self.motion {
            Motion::Run(side) => {
                self.anim.play(Sheet::PlayerRun);
                self.pos.y -= t.run_speed * dt;
                Motion::Run(side)
            }

            Motion::Jump(mut flight) => {
                self.anim.play(Sheet::PlayerJump);
                self.heading = flight.heading;
                self.pos = flight.advance(dt, t.jump_velocity, t.jump_gravity);
                match flight.heading {
                    Side::Right if self.pos.x > margin_right => Motion::Run(Side::Right),
                    Side::Left if self.pos.x < margin_left => Motion::Run(Side::Left),
                    _ => Motion::Jump(flight),
                }
            }

            Motion::Idle => {
                self.anim.play(Sheet::PlayerJump);
                if self.pos.y - ctx.camera_y > t.margin_vertical {
                    self.items.reset(PowerUpTrack::NinjaStars);
                    self.lifetime.power_ups_used += 1;
                    log::debug!("Camera caught up, running on {:?} wall", self.heading);
                    Motion::Run(self.heading)
                } else {
                    Motion::Idle
                }
            }

            Motion::NinjaStarPowerUp {
                elapsed,
                lift_off_played,
            } => {
                self.anim.play(Sheet::Rocketship);
                self.pos.y -= t.ninja_star_speed * dt;
                let elapsed = elapsed + dt;
                let riding = Motion::NinjaStarPowerUp {
                    elapsed,
                    lift_off_played,
                };
                if elapsed < t.ninja_star_wall_secs {
                    effects.push(PlayerEffect::WallSpeed(t.ninja_star_speed));
                    riding
                } else if self.pos.x > margin_left && self.pos.x < margin_right {
                    self.pos.x += self.heading.sign() * t.ninja_star_drift_speed * dt;
                    self.pos.y += t.ninja_star_sink_speed * dt;
                    riding
                } else {
                    effects.push(PlayerEffect::WallSpeed(t.run_speed));
                    Motion::Idle
                }
            }

            Motion::FlyingObjectPowerUp => {
                self.anim.play(Sheet::PlayerRun);
                Motion::FlyingObjectPowerUp
            }

            Motion::HorizontalEnemyPowerUp { bounces, moving } => {
                self.anim.play(Sheet::PlayerJump);
                let max = t.horizontal_power_up_bounces;
                if bounces < max {
                    let speed = t.horizontal_power_up_speed;
                    self.pos.x += moving.sign() * speed.x * dt;
                    self.pos.y -= speed.y * dt;
                    if self.pos.x < margin_left || self.pos.x > margin_right {
                        if bounces + 1 != max {
                            effects.push(PlayerEffect::Sound(SoundCue::Swoosh));
                        }
                        Motion::HorizontalEnemyPowerUp {
                            bounces: bounces + 1,
                            moving: moving.opposite(),
                        }
                    } else {
                        Motion::HorizontalEnemyPowerUp { bounces, moving }
                    }
                } else {
                    self.items.reset(PowerUpTrack::HorizontalEnemies);
                    self.lifetime.power_ups_used += 1;
                    let exit = if bounces % 2 == 0 {
                        self.heading.opposite()
                    } else {
                        self.heading
                    };
                    // Heading follows the exit lane so the next jump leaves from it
                    self.heading = exit;
                    Motion::Run(exit)
                }
            }

            Motion::Hit { mut fall, elapsed } => {
                let elapsed = elapsed + dt;
                self.anim.play(if elapsed < t.idle_fall_secs {
                    Sheet::PlayerIdleFall
                } else {
                    Sheet::PlayerFall
                });
                self.pos = fall.advance(dt, t.fall_velocity, t.fall_gravity);
                Motion::Hit { fall, elapsed }
            }
        };
    }
}

/// Advance the player by one tick.
///
/// State update first, then the shield and sprite animations, then x is clamped
/// to the run lanes.
pub fn step(player: &Player, ctx: &StepContext<'_>, dt: f32) -> (Player, Vec<PlayerEffect>) {
    let mut next = player.clone();
    let mut effects = Vec::new();

    next.advance(ctx, dt, &mut effects);
    if next.shield_on {
        next.shield_anim.update(dt);
    }
    next.anim.update(dt);
    next.pos.x = next
        .pos
        .x
        .clamp(ctx.tuning.margin_left(), ctx.tuning.margin_right());

    (next, effects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use proptest::prelude::*;

    fn run(player: &mut Player, tuning: &Tuning, camera_y: f32, ticks: usize) -> Vec<PlayerEffect> {
        let mut all = Vec::new();
        for _ in 0..ticks {
            let ctx = StepContext { tuning, camera_y };
            let (next, effects) = step(player, &ctx, SIM_DT);
            *player = next;
            all.extend(effects);
        }
        all
    }

    #[test]
    fn test_initial_player() {
        let t = Tuning::default();
        let p = Player::new(&t);
        assert_eq!(p.state(), PlayerState::RunLeft);
        assert_eq!(p.pos, Vec2::new(t.margin_left(), 800.0));
        assert!(!p.shield_on);
    }

    #[test]
    fn test_run_climbs_at_run_speed() {
        let t = Tuning::default();
        let mut p = Player::new(&t);
        run(&mut p, &t, 0.0, 60);
        assert!((p.pos.y - 100.0).abs() < 0.5);
        assert_eq!(p.pos.x, t.margin_left());
    }

    #[test]
    fn test_jump_flight_after_one_second() {
        let t = Tuning::default();
        let mut flight = Flight::new(Vec2::new(96.0, 800.0), Side::Right);
        let pos = flight.advance(1.0, t.jump_velocity, t.jump_gravity);
        assert!((pos.x - (96.0 + 730.0)).abs() < 1e-3);
        assert!((pos.y - (800.0 - 460.0)).abs() < 1e-3);
    }

    #[test]
    fn test_jump_lands_on_opposite_wall() {
        let t = Tuning::default();
        let mut p = Player::new(&t);
        assert!(p.try_jump());
        assert_eq!(p.state(), PlayerState::Jump);
        assert_eq!(p.heading, Side::Right);
        assert_eq!(p.previous, PlayerState::RunLeft);
        // Can't jump mid-air
        assert!(!p.try_jump());

        let mut ticks = 0;
        while p.state() == PlayerState::Jump {
            run(&mut p, &t, 0.0, 1);
            ticks += 1;
            assert!(ticks < 120);
        }
        assert_eq!(p.state(), PlayerState::RunRight);
        assert_eq!(p.pos.x, t.margin_right());
        // 288 px at 730 px/s
        assert!((23..=25).contains(&ticks));
        assert!(p.flipped());
    }

    #[test]
    fn test_x_clamped_to_lanes() {
        let t = Tuning::default();
        let mut p = Player::new(&t);
        p.pos.x = -50.0;
        run(&mut p, &t, 0.0, 1);
        assert_eq!(p.pos.x, t.margin_left());
    }

    #[test]
    fn test_collision_box_shrunk() {
        let t = Tuning::default();
        let p = Player::new(&t);
        let b = p.collision_box(&t);
        assert_eq!(b.width, 92 - 40);
        assert_eq!(b.height, 92 - 40);
    }

    #[test]
    fn test_increment_zeroes_other_tracks_and_caps() {
        let mut items = ItemCounters::default();
        items.increment(PowerUpTrack::FlyingObjects);
        items.increment(PowerUpTrack::FlyingObjects);
        assert_eq!(items.increment(PowerUpTrack::NinjaStars), 1);
        assert_eq!(items.get(PowerUpTrack::FlyingObjects), 0);
        for _ in 0..5 {
            items.increment(PowerUpTrack::NinjaStars);
        }
        assert_eq!(items.get(PowerUpTrack::NinjaStars), 3);
        assert!(items.is_charged(PowerUpTrack::NinjaStars));
        assert_eq!(items.charging(), Some((PowerUpTrack::NinjaStars, 3)));
    }

    #[test]
    fn test_shield_from_fifty_gems_absorbs_one_hit() {
        let t = Tuning::default();
        let mut p = Player::new(&t);
        for _ in 0..49 {
            assert!(!p.collect_gem());
        }
        assert!(p.collect_gem());
        assert!(p.shield_on);
        assert_eq!(p.gems, 0);
        assert_eq!(p.lifetime.shields_used, 1);
        assert_eq!(p.lifetime.gems, 50);

        assert_eq!(p.hit(), HitOutcome::ShieldConsumed);
        assert!(!p.shield_on);
        assert_eq!(p.state(), PlayerState::RunLeft);

        assert_eq!(p.hit(), HitOutcome::Hit);
        assert_eq!(p.state(), PlayerState::Hit);
    }

    #[test]
    fn test_hit_ignored_during_power_ups() {
        let t = Tuning::default();
        let mut p = Player::new(&t);
        p.enter_ninja_star_power_up();
        assert_eq!(p.hit(), HitOutcome::Ignored);
        p.motion = Motion::Idle;
        assert_eq!(p.hit(), HitOutcome::Ignored);
        p.enter_horizontal_power_up();
        assert_eq!(p.hit(), HitOutcome::Ignored);
        // Shield untouched by ignored hits
        p.shield_on = true;
        assert_eq!(p.hit(), HitOutcome::Ignored);
        assert!(p.shield_on);
    }

    #[test]
    fn test_hit_falls_away_from_heading() {
        let t = Tuning::default();
        let mut p = Player::new(&t);
        p.pos = Vec2::new(200.0, 400.0);
        p.hit();
        run(&mut p, &t, 0.0, 20);
        assert!(p.pos.x > 200.0);
        assert!(p.pos.y > 400.0);
        assert_eq!(p.anim.sheet, Sheet::PlayerIdleFall);
        run(&mut p, &t, 0.0, 40);
        assert_eq!(p.anim.sheet, Sheet::PlayerFall);
        assert!((p.hit_elapsed().unwrap() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_ninja_star_ride_ends_idle_then_runs() {
        let t = Tuning::default();
        let mut p = Player::new(&t);
        p.pos = Vec2::new(240.0, 0.0);
        p.heading = Side::Left;
        p.items.increment(PowerUpTrack::NinjaStars);
        p.enter_ninja_star_power_up();

        let effects = run(&mut p, &t, 0.0, 60);
        assert!(effects.iter().all(|e| *e == PlayerEffect::WallSpeed(1050.0)));
        assert_eq!(effects.len(), 60);

        let mut ticks = 0;
        let mut effects = Vec::new();
        while p.state() == PlayerState::NinjaStarPowerUp {
            effects.extend(run(&mut p, &t, 0.0, 1));
            ticks += 1;
            assert!(ticks < 300);
        }
        assert_eq!(p.state(), PlayerState::Idle);
        assert_eq!(p.pos.x, t.margin_left());
        assert_eq!(effects.last(), Some(&PlayerEffect::WallSpeed(700.0)));

        // Camera still close: hold
        let camera_y = p.pos.y - 100.0;
        run(&mut p, &t, camera_y, 5);
        assert_eq!(p.state(), PlayerState::Idle);

        let camera_y = p.pos.y - 700.0;
        run(&mut p, &t, camera_y, 1);
        assert_eq!(p.state(), PlayerState::RunLeft);
        assert_eq!(p.items.get(PowerUpTrack::NinjaStars), 0);
        assert_eq!(p.lifetime.power_ups_used, 1);
    }

    #[test]
    fn test_horizontal_power_up_bounces_then_exits() {
        let t = Tuning::default();
        let mut p = Player::new(&t);
        p.pos = Vec2::new(240.0, 0.0);
        p.heading = Side::Right;
        for _ in 0..3 {
            p.increment_item(PowerUpTrack::HorizontalEnemies);
        }
        p.enter_horizontal_power_up();

        let mut ticks = 0;
        let mut effects = Vec::new();
        while p.state() == PlayerState::HorizontalEnemyPowerUp {
            effects.extend(run(&mut p, &t, 0.0, 1));
            ticks += 1;
            assert!(ticks < 1000);
        }
        let swooshes = effects
            .iter()
            .filter(|e| **e == PlayerEffect::Sound(SoundCue::Swoosh))
            .count();
        assert_eq!(swooshes, 9);
        // Ten bounces: exits on the wall opposite the starting heading
        assert_eq!(p.state(), PlayerState::RunLeft);
        assert_eq!(p.heading, Side::Left);
        assert_eq!(p.items.get(PowerUpTrack::HorizontalEnemies), 0);
        assert_eq!(p.lifetime.power_ups_used, 1);
    }

    #[test]
    fn test_flying_object_power_up_holds() {
        let t = Tuning::default();
        let mut p = Player::new(&t);
        p.motion = Motion::FlyingObjectPowerUp;
        let before = p.pos;
        run(&mut p, &t, 0.0, 10);
        assert_eq!(p.pos, before);
        assert!(!p.try_jump());
    }

    #[test]
    fn test_lift_off_marked_once() {
        let t = Tuning::default();
        let mut p = Player::new(&t);
        assert!(!p.mark_lift_off());
        p.enter_ninja_star_power_up();
        assert!(p.mark_lift_off());
        assert!(!p.mark_lift_off());
    }

    proptest! {
        #[test]
        fn prop_counters_never_exceed_cap(tracks in prop::collection::vec(0usize..3, 0..50)) {
            let mut items = ItemCounters::default();
            for i in tracks {
                let track = PowerUpTrack::ALL[i];
                items.increment(track);
                prop_assert!(items.get(track) >= 1);
                let nonzero = PowerUpTrack::ALL.iter().filter(|t| items.get(**t) > 0).count();
                prop_assert_eq!(nonzero, 1);
            }
            for t in PowerUpTrack::ALL {
                prop_assert!(items.get(t) <= ITEMS_PER_POWER_UP);
            }
        }

        #[test]
        fn prop_x_stays_in_lanes(jumps in prop::collection::vec(any::<bool>(), 1..200)) {
            let t = Tuning::default();
            let mut p = Player::new(&t);
            for jump in jumps {
                if jump {
                    p.try_jump();
                }
                let ctx = StepContext { tuning: &t, camera_y: 0.0 };
                p = step(&p, &ctx, SIM_DT).0;
                prop_assert!(p.pos.x >= t.margin_left() && p.pos.x <= t.margin_right());
            }
        }
    }
}
