//! Fixed timestep simulation tick
//!
//! Advances the game by exactly one frame. Drawing and audio happen outside,
//! driven by the returned events.

use super::collision::obstacle_damage_at;
use super::state::{GameEvent, GamePhase, GameState};

/// Advance the game state by one tick
pub fn tick(state: &mut GameState) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.phase == GamePhase::Ended {
        return events;
    }

    state.frame += 1;

    let arena = state.arena;
    for obstacle in &mut state.obstacles {
        obstacle.update(&arena);
    }
    state.player.update(&arena);

    if state.goal.is_hit_by(state.player.pos) {
        reach_goal(state);
        events.push(GameEvent::GoalReached { score: state.score });
    }

    let damage = obstacle_damage_at(&state.obstacles, state.player.pos);
    if damage == 0 {
        state.player_hit = false;
    } else if !state.player_hit {
        // Rising edge only: staying inside the same obstacle costs nothing more
        state.player_hit = true;
        state.player.reduce_health(damage);
        state
            .player
            .slow_down(state.tuning.speed_decrement, state.tuning.min_speed);
        log::debug!(
            "Hit for {} (health {}, speed {:.2})",
            damage,
            state.player.health(),
            state.player.speed()
        );
        events.push(GameEvent::Hit {
            damage,
            health: state.player.health(),
        });
    }

    if state.player.is_dead() {
        state.phase = GamePhase::Ended;
        state.player.keys.clear();
        log::info!("Ship destroyed at frame {} with score {}", state.frame, state.score);
        events.push(GameEvent::Died { score: state.score });
    }

    events
}

fn reach_goal(state: &mut GameState) {
    let tuning = state.tuning;
    state.player.increase_health(tuning.health_increment);
    state.spawn_obstacle();
    state.respawn_goal();
    state.player.speed_up(tuning.speed_increment, tuning.max_speed);
    state.score += tuning.score_increment;
    log::info!(
        "Goal reached: score {}, {} obstacles, speed {:.2}",
        state.score,
        state.obstacles.len(),
        state.player.speed()
    );
}
