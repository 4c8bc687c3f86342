//! Player-versus-entity collision resolution
//!
//! Categories are tested in a fixed order: obstacles, enemies, enemies with
//! thrown objects (body, then each star), flying enemies, gems, horizontal
//! enemies. Inactive entities are never tested. The player's state is re-read
//! for every contact, so a hit early in the pass changes how later contacts in
//! the same pass resolve.

use super::entity::{Burst, Entities, Entity};
use super::player::{HitOutcome, Player, PlayerState, PowerUpTrack};
use super::state::GameEvent;
use crate::audio::SoundCue;
use crate::tuning::Tuning;

/// Resolve every contact for this tick. No-op while the player is falling.
pub fn resolve(
    player: &mut Player,
    entities: &mut Entities,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) {
    if player.state() == PlayerState::Hit {
        return;
    }
    let hitbox = player.collision_box(tuning);

    for obstacle in entities.obstacles.overlapping(hitbox) {
        entities.bursts.push(Burst::new(obstacle.pos));
        lethal_contact(player, events);
        obstacle.deactivate();
    }

    for enemy in entities.enemies.overlapping(hitbox) {
        lethal_contact(player, events);
        enemy.deactivate();
    }

    for thrower in entities.enemies_with_object.iter_mut() {
        if !thrower.is_active() {
            continue;
        }
        if thrower.bounds().intersects(&hitbox) {
            if !thrower.collided {
                lethal_contact(player, events);
            }
            thrower.collided = true;
        }
        for star in thrower.thrown.iter_mut() {
            if !star.is_active() || !star.bounds().intersects(&hitbox) {
                continue;
            }
            star.deactivate();
            match player.state() {
                PlayerState::RunLeft | PlayerState::RunRight => lethal_contact(player, events),
                PlayerState::Jump => {
                    events.push(GameEvent::Sound(SoundCue::ShurikenMetalHit));
                    player.increment_item(PowerUpTrack::NinjaStars);
                    if player.items.is_charged(PowerUpTrack::NinjaStars) {
                        player.enter_ninja_star_power_up();
                        events.push(GameEvent::PowerUp(PowerUpTrack::NinjaStars));
                        log::info!("Ninja star power-up");
                    }
                }
                _ => {}
            }
        }
    }

    for kunai in entities.flying_enemies.overlapping(hitbox) {
        match player.state() {
            PlayerState::Jump => {
                events.push(GameEvent::Sound(SoundCue::ShurikenMetalHit));
                kunai.deactivate();
                player.increment_item(PowerUpTrack::FlyingObjects);
            }
            PlayerState::RunLeft | PlayerState::RunRight => {
                lethal_contact(player, events);
                kunai.deactivate();
            }
            _ => {}
        }
    }

    for gem in entities.gems.overlapping(hitbox) {
        events.push(GameEvent::Sound(SoundCue::GemCollected));
        gem.deactivate();
        if player.collect_gem() {
            events.push(GameEvent::Sound(SoundCue::ShieldOn));
            events.push(GameEvent::ShieldRaised);
        }
    }

    for walker in entities.horizontal_enemies.overlapping(hitbox) {
        if walker.collided {
            continue;
        }
        match player.state() {
            PlayerState::RunLeft | PlayerState::RunRight => {
                walker.collided = true;
                lethal_contact(player, events);
            }
            PlayerState::Jump => {
                walker.collided = true;
                events.push(GameEvent::Sound(SoundCue::HorizontalEnemyHit));
                player.increment_item(PowerUpTrack::HorizontalEnemies);
                if player.items.is_charged(PowerUpTrack::HorizontalEnemies) {
                    player.enter_horizontal_power_up();
                    events.push(GameEvent::PowerUp(PowerUpTrack::HorizontalEnemies));
                    log::info!("Horizontal enemy power-up");
                }
            }
            _ => {}
        }
    }
}

fn lethal_contact(player: &mut Player, events: &mut Vec<GameEvent>) {
    match player.hit() {
        HitOutcome::Hit => {
            log::info!("Player hit at ({:.0}, {:.0})", player.pos.x, player.pos.y);
            events.push(GameEvent::Sound(SoundCue::PlayerFall));
            events.push(GameEvent::PlayerHit);
        }
        HitOutcome::ShieldConsumed => events.push(GameEvent::ShieldConsumed),
        HitOutcome::Ignored => {}
    }
}
