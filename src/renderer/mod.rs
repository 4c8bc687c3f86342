//! Frame snapshot for whatever paints the screen
//!
//! The core never draws. Each frame the host captures a [`DrawList`] from the
//! session and hands it to a [`Canvas`]: a browser canvas, a test recorder, or
//! JSON over the wasm boundary.

use glam::Vec2;
use serde::Serialize;

use crate::sim::entity::{Entities, Entity, Side};
use crate::sim::{Animation, GamePhase, GameState, LayerKind, PowerUpTrack, Sheet};

/// What a sprite depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpriteKind {
    Layer(LayerKind),
    WallTile(Side),
    Obstacle(Side),
    Enemy,
    ThrowingEnemy,
    ThrownObject,
    FlyingEnemy,
    Gem,
    HorizontalEnemy,
    Burst,
    Player,
    Shield,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sprite {
    pub kind: SpriteKind,
    /// Sheet and frame, for animated sprites
    pub sheet: Option<Sheet>,
    pub frame: u32,
    pub world: Vec2,
    pub screen: Vec2,
    pub flip: bool,
}

/// Heads-up display values
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Hud {
    pub score: u32,
    /// Rolling gem count toward the next shield
    pub gems: u32,
    /// Power-up track currently charging and its item count
    pub charging: Option<(PowerUpTrack, u8)>,
    pub shield_on: bool,
    pub paused: bool,
}

/// Everything needed to paint one frame, back to front
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DrawList {
    pub camera_y: f32,
    pub sprites: Vec<Sprite>,
    pub hud: Hud,
}

/// Paints sprites
pub trait Canvas {
    fn draw(&mut self, sprite: &Sprite);

    fn hud(&mut self, _hud: &Hud) {}
}

impl DrawList {
    pub fn capture(state: &GameState) -> Self {
        let mut list = DrawList {
            camera_y: state.camera.y,
            sprites: Vec::with_capacity(16 + state.entities.total()),
            hud: Hud {
                score: state.score,
                gems: state.player.gems,
                charging: state.player.items.charging(),
                shield_on: state.player.shield_on,
                paused: state.phase == GamePhase::Paused,
            },
        };

        // Background and walls are already in screen space
        for layer in &state.layers {
            list.screen_space(SpriteKind::Layer(layer.kind), layer.pos);
        }
        for wall in &state.walls {
            for &y in &wall.tiles {
                list.screen_space(SpriteKind::WallTile(wall.side), Vec2::new(wall.x, y));
            }
        }

        list.entities(&state.entities);

        let player = &state.player;
        list.world(SpriteKind::Player, player.pos, Some(&player.anim), player.flipped());
        if player.shield_on {
            list.world(SpriteKind::Shield, player.pos, Some(&player.shield_anim), false);
        }
        list
    }

    fn entities(&mut self, entities: &Entities) {
        for o in entities.obstacles.iter().filter(|o| o.is_active()) {
            self.world(SpriteKind::Obstacle(o.side), o.pos, None, o.side == Side::Right);
        }
        for e in entities.enemies.iter().filter(|e| e.is_active()) {
            self.world(SpriteKind::Enemy, e.pos, Some(&e.anim), e.side == Side::Right);
        }
        for t in entities.enemies_with_object.iter().filter(|t| t.is_active()) {
            let body = &t.body;
            self.world(
                SpriteKind::ThrowingEnemy,
                body.pos,
                Some(&body.anim),
                body.side == Side::Right,
            );
            for star in t.thrown.iter().filter(|s| s.is_active()) {
                self.world(SpriteKind::ThrownObject, star.pos, Some(&star.anim), false);
            }
        }
        for k in entities.flying_enemies.iter().filter(|k| k.is_active()) {
            self.world(SpriteKind::FlyingEnemy, k.pos, Some(&k.anim), k.heading == Side::Left);
        }
        for g in entities.gems.iter().filter(|g| g.is_active()) {
            self.world(SpriteKind::Gem, g.pos, Some(&g.anim), false);
        }
        for h in entities.horizontal_enemies.iter().filter(|h| h.is_active()) {
            self.world(SpriteKind::HorizontalEnemy, h.pos, Some(&h.anim), h.heading == Side::Left);
        }
        for b in entities.bursts.iter().filter(|b| b.anim.active) {
            self.world(SpriteKind::Burst, b.pos, Some(&b.anim), false);
        }
    }

    fn world(&mut self, kind: SpriteKind, world: Vec2, anim: Option<&Animation>, flip: bool) {
        self.sprites.push(Sprite {
            kind,
            sheet: anim.map(|a| a.sheet),
            frame: anim.map_or(0, |a| a.frame),
            world,
            screen: Vec2::new(world.x, world.y - self.camera_y),
            flip,
        });
    }

    fn screen_space(&mut self, kind: SpriteKind, screen: Vec2) {
        self.sprites.push(Sprite {
            kind,
            sheet: None,
            frame: 0,
            world: Vec2::new(screen.x, screen.y + self.camera_y),
            screen,
            flip: false,
        });
    }

    /// Hand every sprite, then the HUD, to the canvas
    pub fn paint(&self, canvas: &mut impl Canvas) {
        for sprite in &self.sprites {
            canvas.draw(sprite);
        }
        canvas.hud(&self.hud);
    }

    pub fn count(&self, kind: SpriteKind) -> usize {
        self.sprites.iter().filter(|s| s.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Burst, Gem};
    use crate::tuning::Tuning;

    #[derive(Default)]
    struct Recorder {
        kinds: Vec<SpriteKind>,
        hud: Option<Hud>,
    }

    impl Canvas for Recorder {
        fn draw(&mut self, sprite: &Sprite) {
            self.kinds.push(sprite.kind);
        }

        fn hud(&mut self, hud: &Hud) {
            self.hud = Some(*hud);
        }
    }

    #[test]
    fn test_fresh_session_draw_order() {
        let state = GameState::new(1, Tuning::default());
        let list = DrawList::capture(&state);
        assert_eq!(list.sprites.len(), 6 + 4 + 1);
        assert_eq!(list.sprites[0].kind, SpriteKind::Layer(LayerKind::Static));
        assert_eq!(list.sprites.last().map(|s| s.kind), Some(SpriteKind::Player));
        assert_eq!(list.count(SpriteKind::Shield), 0);
        assert_eq!(list.hud, Hud::default());
    }

    #[test]
    fn test_screen_position_follows_camera() {
        let mut state = GameState::new(1, Tuning::default());
        state.camera.y = -500.0;
        let pos = Vec2::new(200.0, -300.0);
        state.entities.gems.spawn(Gem::new(pos, 0.0));
        let list = DrawList::capture(&state);
        let gem = list
            .sprites
            .iter()
            .find(|s| s.kind == SpriteKind::Gem)
            .unwrap();
        assert_eq!(gem.world, pos);
        assert_eq!(gem.screen, Vec2::new(200.0, 200.0));
        assert_eq!(gem.sheet, Some(Sheet::Gem));
    }

    #[test]
    fn test_inactive_and_finished_are_skipped() {
        let mut state = GameState::new(1, Tuning::default());
        let mut gem = Gem::new(Vec2::ZERO, 0.0);
        gem.deactivate();
        state.entities.gems.spawn(gem);
        let mut burst = Burst::new(Vec2::ZERO);
        burst.anim.active = false;
        state.entities.bursts.push(burst);
        let list = DrawList::capture(&state);
        assert_eq!(list.count(SpriteKind::Gem), 0);
        assert_eq!(list.count(SpriteKind::Burst), 0);
    }

    #[test]
    fn test_paint_hands_over_hud_and_shield() {
        let mut state = GameState::new(1, Tuning::default());
        state.score = 42;
        state.player.shield_on = true;
        state.player.items.increment(PowerUpTrack::FlyingObjects);
        let list = DrawList::capture(&state);

        let mut canvas = Recorder::default();
        list.paint(&mut canvas);
        assert_eq!(canvas.kinds.last(), Some(&SpriteKind::Shield));
        let hud = canvas.hud.unwrap();
        assert_eq!(hud.score, 42);
        assert!(hud.shield_on);
        assert_eq!(hud.charging, Some((PowerUpTrack::FlyingObjects, 1)));
    }
}
