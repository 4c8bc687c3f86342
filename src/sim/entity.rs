//! Spawnable entities and the pool that owns them
//!
//! Every hazard and pickup is a simple kinematic body with the same lifecycle:
//! spawned relative to the player, integrated once per tick, deactivated when it
//! falls far enough behind the player (or is consumed by a collision), and then
//! dropped from its pool on the same lifecycle pass. An entity never comes back
//! once inactive.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::animation::{Animation, Sheet};
use super::rect::Rect;
use super::state::GameEvent;
use crate::audio::SoundCue;
use crate::tuning::Tuning;

/// Which wall something belongs to, or which way it travels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// -1 for left, +1 for right
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }

    #[inline]
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Coin flip used for every left/right spawn choice: 1..=9, five of nine go left
pub fn draw_side<R: Rng + ?Sized>(rng: &mut R) -> Side {
    if rng.random_range(1..=9) <= 5 {
        Side::Left
    } else {
        Side::Right
    }
}

/// What an entity can see while it updates
pub struct EntityContext<'a> {
    pub player_y: f32,
    pub tuning: &'a Tuning,
    pub events: &'a mut Vec<GameEvent>,
}

/// Shared capability set of everything that lives in a [`Pool`]
pub trait Entity {
    fn update(&mut self, dt: f32, ctx: &mut EntityContext<'_>);
    fn bounds(&self) -> Rect;
    fn is_active(&self) -> bool;
    fn deactivate(&mut self);
}

/// Ordered collection of live entities of one kind
#[derive(Debug, Clone)]
pub struct Pool<T> {
    items: Vec<T>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Entity> Pool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, item: T) {
        self.items.push(item);
    }

    /// Update every entity, then drop the ones that went inactive
    pub fn update(&mut self, dt: f32, ctx: &mut EntityContext<'_>) {
        for item in &mut self.items {
            item.update(dt, ctx);
        }
        self.items.retain(|item| item.is_active());
    }

    /// Active entities overlapping `rect`
    pub fn overlapping<'a>(&'a mut self, rect: Rect) -> impl Iterator<Item = &'a mut T> + 'a {
        self.items
            .iter_mut()
            .filter(move |item| item.is_active() && item.bounds().intersects(&rect))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// True once the player has climbed `distance` past where the entity spawned
#[inline]
fn left_behind(origin_y: f32, player_y: f32, distance: f32) -> bool {
    origin_y - player_y > distance
}

// === Obstacle ===

/// A branch jutting out from one wall. Anchored at its top-left corner.
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub pos: Vec2,
    pub side: Side,
    pub size: Vec2,
    origin_y: f32,
    active: bool,
}

impl Obstacle {
    pub fn spawn(player_pos: Vec2, side: Side, tuning: &Tuning) -> Self {
        let y = player_pos.y - tuning.spawn_distance();
        let x = match side {
            Side::Left => 0.0,
            Side::Right => tuning.viewport_width - tuning.obstacle_size.x,
        };
        Self {
            pos: Vec2::new(x, y),
            side,
            size: tuning.obstacle_size,
            origin_y: player_pos.y,
            active: true,
        }
    }
}

impl Entity for Obstacle {
    fn update(&mut self, _dt: f32, ctx: &mut EntityContext<'_>) {
        let reach = ctx.tuning.viewport_height + ctx.tuning.obstacle_despawn_extra;
        if left_behind(self.origin_y, ctx.player_y, reach) {
            self.active = false;
        }
    }

    fn bounds(&self) -> Rect {
        Rect::from_top_left(self.pos, self.size.x as i32, self.size.y as i32)
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}

// === Enemy ===

/// A ninja standing on one run lane
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    pub side: Side,
    pub anim: Animation,
    origin_y: f32,
    active: bool,
}

impl Enemy {
    pub fn spawn<R: Rng + ?Sized>(player_pos: Vec2, tuning: &Tuning, rng: &mut R) -> Self {
        let side = draw_side(rng);
        let x = match side {
            Side::Left => tuning.margin_left(),
            Side::Right => tuning.margin_right(),
        };
        Self {
            pos: Vec2::new(x, player_pos.y - tuning.spawn_distance()),
            side,
            anim: Animation::new(Sheet::EnemyRun),
            origin_y: player_pos.y,
            active: true,
        }
    }
}

impl Entity for Enemy {
    fn update(&mut self, dt: f32, ctx: &mut EntityContext<'_>) {
        self.anim.update(dt);
        if left_behind(self.origin_y, ctx.player_y, ctx.tuning.despawn_distance()) {
            self.active = false;
        }
    }

    // Unscaled frame: the enemy's reach is deliberately generous
    fn bounds(&self) -> Rect {
        let spec = self.anim.spec();
        Rect::centered(self.pos, spec.frame_width, spec.frame_height)
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}

// === Thrown object (ninja star) ===

/// Star thrown horizontally by an [`EnemyWithObject`]
#[derive(Debug, Clone)]
pub struct ThrownObject {
    pub pos: Vec2,
    pub velocity: Vec2,
    pub heading: Side,
    pub anim: Animation,
    active: bool,
}

impl ThrownObject {
    fn new(pos: Vec2, velocity: Vec2, heading: Side) -> Self {
        Self {
            pos,
            velocity,
            heading,
            anim: Animation::new(Sheet::NinjaStar),
            active: true,
        }
    }

    fn fly(&mut self, dt: f32, viewport_width: f32) {
        self.anim.update(dt);
        self.pos.x += self.heading.sign() * self.velocity.x * dt;
        self.pos.y += self.velocity.y * dt;
        if self.pos.x > viewport_width || self.pos.x < 0.0 {
            self.active = false;
        }
    }

    pub fn bounds(&self) -> Rect {
        let spec = self.anim.spec();
        Rect::centered(self.pos, spec.scaled_width(), spec.scaled_height())
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }
}

/// How many stars an [`EnemyWithObject`] throws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThrowCount {
    One,
    Two,
}

// === Enemy with thrown object ===

/// An enemy that waits briefly, then throws one or two stars across the lanes.
///
/// The body is lethal on first contact only; `collided` keeps repeated overlap
/// from hitting the player again.
#[derive(Debug, Clone)]
pub struct EnemyWithObject {
    pub body: Enemy,
    pub thrown: Vec<ThrownObject>,
    pub collided: bool,
    elapsed: f32,
    throw_announced: bool,
}

impl EnemyWithObject {
    pub fn spawn<R: Rng + ?Sized>(
        player_pos: Vec2,
        count: ThrowCount,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Self {
        let body = Enemy::spawn(player_pos, tuning, rng);
        let heading = body.side.opposite();
        let mut thrown = vec![ThrownObject::new(body.pos, tuning.thrown_velocity, heading)];
        if count == ThrowCount::Two {
            thrown.push(ThrownObject::new(body.pos, tuning.second_thrown_velocity, heading));
        }
        Self {
            body,
            thrown,
            collided: false,
            elapsed: 0.0,
            throw_announced: false,
        }
    }

    /// Whether the stars have left the enemy's hand
    pub fn has_thrown(&self) -> bool {
        self.throw_announced
    }
}

impl Entity for EnemyWithObject {
    fn update(&mut self, dt: f32, ctx: &mut EntityContext<'_>) {
        self.elapsed += dt;
        if self.elapsed < ctx.tuning.throw_delay_secs {
            for star in &mut self.thrown {
                star.pos = self.body.pos;
            }
        } else {
            if !self.throw_announced {
                ctx.events.push(GameEvent::Sound(SoundCue::ShurikenThrow));
                self.throw_announced = true;
            }
            for star in self.thrown.iter_mut().filter(|s| s.active) {
                star.fly(dt, ctx.tuning.viewport_width);
            }
        }
        self.body.update(dt, ctx);
        self.thrown.retain(|star| star.active);
    }

    fn bounds(&self) -> Rect {
        self.body.bounds()
    }

    fn is_active(&self) -> bool {
        self.body.is_active()
    }

    fn deactivate(&mut self) {
        self.body.deactivate();
    }
}

// === Flying enemy (kunai) ===

/// A kunai crossing the screen from one edge to the other
#[derive(Debug, Clone)]
pub struct FlyingEnemy {
    pub pos: Vec2,
    pub heading: Side,
    pub speed: f32,
    pub anim: Animation,
    active: bool,
}

impl FlyingEnemy {
    pub fn spawn<R: Rng + ?Sized>(player_pos: Vec2, tuning: &Tuning, rng: &mut R) -> Self {
        let y = player_pos.y - tuning.flying_enemy_offset;
        let (x, heading) = match draw_side(rng) {
            Side::Left => (0.0, Side::Right),
            Side::Right => (tuning.viewport_width, Side::Left),
        };
        Self {
            pos: Vec2::new(x, y),
            heading,
            speed: tuning.flying_enemy_speed,
            anim: Animation::new(Sheet::Kunai),
            active: true,
        }
    }
}

impl Entity for FlyingEnemy {
    fn update(&mut self, dt: f32, ctx: &mut EntityContext<'_>) {
        self.anim.update(dt);
        self.pos.x += self.heading.sign() * self.speed * dt;
        if self.pos.x > ctx.tuning.viewport_width || self.pos.x < 0.0 {
            self.active = false;
        }
    }

    fn bounds(&self) -> Rect {
        let spec = self.anim.spec();
        Rect::centered(self.pos, spec.scaled_width(), spec.scaled_height())
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}

// === Gem ===

#[derive(Debug, Clone)]
pub struct Gem {
    pub pos: Vec2,
    pub anim: Animation,
    origin_y: f32,
    active: bool,
}

impl Gem {
    pub fn new(pos: Vec2, player_y: f32) -> Self {
        Self {
            pos,
            anim: Animation::new(Sheet::Gem),
            origin_y: player_y,
            active: true,
        }
    }
}

impl Entity for Gem {
    fn update(&mut self, dt: f32, ctx: &mut EntityContext<'_>) {
        self.anim.update(dt);
        if left_behind(self.origin_y, ctx.player_y, ctx.tuning.despawn_distance()) {
            self.active = false;
        }
    }

    fn bounds(&self) -> Rect {
        let spec = self.anim.spec();
        Rect::centered(self.pos, spec.frame_width, spec.frame_height)
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}

// === Horizontal enemy ===

/// An enemy pacing back and forth on a platform between the lanes
#[derive(Debug, Clone)]
pub struct HorizontalEnemy {
    pub pos: Vec2,
    pub heading: Side,
    pub speed: f32,
    pub min_x: f32,
    pub max_x: f32,
    pub anim: Animation,
    pub collided: bool,
    origin_y: f32,
    active: bool,
}

impl HorizontalEnemy {
    pub fn spawn<R: Rng + ?Sized>(player_pos: Vec2, tuning: &Tuning, rng: &mut R) -> Self {
        let min_x = tuning.margin_left() + tuning.horizontal_enemy_inset;
        let max_x = tuning.margin_right() - tuning.horizontal_enemy_inset;
        let (lo, hi) = (min_x as i32, max_x as i32);
        let x = if hi > lo { rng.random_range(lo..hi) } else { lo };
        Self {
            pos: Vec2::new(x as f32, player_pos.y - tuning.spawn_distance()),
            heading: draw_side(rng),
            speed: tuning.horizontal_enemy_speed,
            min_x,
            max_x,
            anim: Animation::new(Sheet::HorizontalEnemy),
            collided: false,
            origin_y: player_pos.y,
            active: true,
        }
    }
}

impl Entity for HorizontalEnemy {
    fn update(&mut self, dt: f32, ctx: &mut EntityContext<'_>) {
        self.anim.update(dt);
        self.pos.x += self.heading.sign() * self.speed * dt;
        if self.pos.x <= self.min_x {
            self.heading = Side::Right;
        } else if self.pos.x >= self.max_x {
            self.heading = Side::Left;
        }
        if left_behind(self.origin_y, ctx.player_y, ctx.tuning.despawn_distance()) {
            self.active = false;
        }
    }

    fn bounds(&self) -> Rect {
        let spec = self.anim.spec();
        Rect::centered(self.pos, spec.frame_width, spec.frame_height)
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}

// === Collision bursts ===

/// One-shot visual played where the player smashed into an obstacle
#[derive(Debug, Clone)]
pub struct Burst {
    pub pos: Vec2,
    pub anim: Animation,
}

impl Burst {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            anim: Animation::new(Sheet::ObstacleCollision),
        }
    }
}

/// Entity categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Obstacle,
    Enemy,
    EnemyWithObject,
    FlyingEnemy,
    Gem,
    HorizontalEnemy,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Obstacle,
        EntityKind::Enemy,
        EntityKind::EnemyWithObject,
        EntityKind::FlyingEnemy,
        EntityKind::Gem,
        EntityKind::HorizontalEnemy,
    ];
}

/// All live entities of a session, one pool per kind
#[derive(Debug, Clone, Default)]
pub struct Entities {
    pub obstacles: Pool<Obstacle>,
    pub enemies: Pool<Enemy>,
    pub enemies_with_object: Pool<EnemyWithObject>,
    pub flying_enemies: Pool<FlyingEnemy>,
    pub gems: Pool<Gem>,
    pub horizontal_enemies: Pool<HorizontalEnemy>,
    pub bursts: Vec<Burst>,
}

impl Entities {
    /// Lifecycle pass over every category, in the fixed game order
    pub fn update(&mut self, dt: f32, ctx: &mut EntityContext<'_>) {
        self.obstacles.update(dt, ctx);
        self.enemies.update(dt, ctx);
        self.enemies_with_object.update(dt, ctx);
        self.flying_enemies.update(dt, ctx);
        self.gems.update(dt, ctx);
        self.horizontal_enemies.update(dt, ctx);

        for burst in &mut self.bursts {
            burst.anim.update(dt);
        }
        self.bursts.retain(|b| b.anim.active);
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Obstacle => self.obstacles.len(),
            EntityKind::Enemy => self.enemies.len(),
            EntityKind::EnemyWithObject => self.enemies_with_object.len(),
            EntityKind::FlyingEnemy => self.flying_enemies.len(),
            EntityKind::Gem => self.gems.len(),
            EntityKind::HorizontalEnemy => self.horizontal_enemies.len(),
        }
    }

    pub fn total(&self) -> usize {
        EntityKind::ALL.iter().map(|&k| self.count(k)).sum()
    }
}
