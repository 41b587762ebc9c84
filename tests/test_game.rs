use alien_escape::game::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Session already launched (Menu -> Running via thrust).
fn running_session() -> GameSession {
    let mut s = GameSession::new();
    s.thrust();
    s
}

/// Obstacle placed fully below the board so it can never touch the ship.
fn harmless_obstacle(x: f32, end: PairEnd) -> Obstacle {
    let mut o = Obstacle::new(900.0, end);
    o.x = x;
    o
}

// ── state machine ─────────────────────────────────────────────────────────────

#[test]
fn new_session_starts_in_menu() {
    let s = GameSession::new();
    assert_eq!(s.phase, Phase::Menu);
    assert_eq!(s.score, 0.0);
    assert_eq!(s.time_left, ROUND_SECONDS);
    assert!(!s.time_up);
    assert!(s.obstacles.is_empty());
    assert_eq!(s.ship.x, SHIP_X);
    assert_eq!(s.ship.y, SHIP_START_Y);
}

#[test]
fn thrust_from_menu_starts_session() {
    let mut s = GameSession::new();
    assert_eq!(s.thrust(), Some(GameEvent::SessionStarted));
    assert_eq!(s.phase, Phase::Running);
    assert_eq!(s.velocity_y, THRUST_VELOCITY);
}

#[test]
fn thrust_while_running_overrides_velocity() {
    let mut s = running_session();
    s.velocity_y = 4.2; // falling fast
    assert_eq!(s.thrust(), None);
    assert_eq!(s.velocity_y, THRUST_VELOCITY); // override, not additive
}

#[test]
fn thrust_ignored_once_over() {
    let mut s = running_session();
    s.time_left = 1;
    s.on_second();
    assert_eq!(s.phase, Phase::Over);
    assert_eq!(s.thrust(), None);
    assert_eq!(s.phase, Phase::Over);
}

#[test]
fn reset_returns_to_menu_with_cleared_state() {
    let mut s = running_session();
    s.obstacles.push_back(harmless_obstacle(400.0, PairEnd::Top));
    s.score = 3.5;
    s.time_left = 12;
    s.ship.y = 700.0;
    s.time_up = true;
    s.phase = Phase::Over;

    s.reset();
    assert_eq!(s.phase, Phase::Menu);
    assert!(s.obstacles.is_empty());
    assert_eq!(s.score, 0.0);
    assert_eq!(s.time_left, ROUND_SECONDS);
    assert!(!s.time_up);
    assert_eq!(s.ship.y, SHIP_START_Y);
    assert_eq!(s.velocity_y, 0.0);
}

#[test]
fn frame_is_noop_outside_running() {
    let mut s = GameSession::new();
    let y = s.ship.y;
    assert!(s.on_frame().is_empty());
    assert_eq!(s.ship.y, y);

    s.phase = Phase::Over;
    assert!(s.on_frame().is_empty());
    assert_eq!(s.ship.y, y);
}

// ── physics ───────────────────────────────────────────────────────────────────

#[test]
fn ship_y_clamped_at_top_under_repeated_thrust() {
    let mut s = running_session();
    for _ in 0..200 {
        s.thrust();
        s.on_frame();
        assert!(s.ship.y >= 0.0);
    }
    // pinned against the top, still flying
    assert_eq!(s.ship.y, 0.0);
    assert_eq!(s.phase, Phase::Running);
}

#[test]
fn free_fall_off_the_bottom_ends_session() {
    let mut s = running_session();
    s.velocity_y = 0.0;
    let mut ended = false;
    for _ in 0..120 {
        if s.on_frame().contains(&GameEvent::SessionEnded) {
            ended = true;
            break;
        }
    }
    assert!(ended);
    assert_eq!(s.phase, Phase::Over);
    assert!(s.ship.y > BOARD_HEIGHT);
    assert!(!s.time_up); // fell, not timed out
}

#[test]
fn gravity_accumulates_each_frame() {
    let mut s = running_session();
    s.velocity_y = 0.0;
    s.on_frame();
    assert_eq!(s.velocity_y, GRAVITY);
    s.on_frame();
    assert_eq!(s.velocity_y, GRAVITY * 2.0);
}

// ── collision ─────────────────────────────────────────────────────────────────

#[test]
fn boxes_overlap_is_symmetric() {
    let a = Hitbox { x: 0.0, y: 0.0, width: 10.0, height: 10.0 };
    let b = Hitbox { x: 5.0, y: 5.0, width: 10.0, height: 10.0 };
    assert!(boxes_overlap(&a, &b));
    assert!(boxes_overlap(&b, &a));
}

#[test]
fn disjoint_boxes_do_not_overlap() {
    let a = Hitbox { x: 0.0, y: 0.0, width: 10.0, height: 10.0 };
    let b = Hitbox { x: 20.0, y: 20.0, width: 10.0, height: 10.0 };
    assert!(!boxes_overlap(&a, &b));
    assert!(!boxes_overlap(&b, &a));
}

#[test]
fn touching_edges_do_not_overlap() {
    let a = Hitbox { x: 0.0, y: 0.0, width: 10.0, height: 10.0 };
    let b = Hitbox { x: 10.0, y: 0.0, width: 10.0, height: 10.0 };
    assert!(!boxes_overlap(&a, &b));
}

#[test]
fn collision_with_obstacle_ends_session() {
    let mut s = running_session();
    // right on top of the ship's column, spanning its altitude
    let mut o = Obstacle::new(300.0, PairEnd::Top);
    o.x = 90.0;
    s.obstacles.push_back(o);

    let events = s.on_frame();
    assert!(events.contains(&GameEvent::SessionEnded));
    assert_eq!(s.phase, Phase::Over);
}

#[test]
fn collision_leaves_later_obstacles_unadvanced() {
    let mut s = running_session();
    let mut first = Obstacle::new(300.0, PairEnd::Top);
    first.x = 90.0;
    let mut second = Obstacle::new(300.0, PairEnd::Bottom);
    second.x = 500.0;
    s.obstacles.push_back(first);
    s.obstacles.push_back(second);

    s.on_frame();
    assert_eq!(s.phase, Phase::Over);
    assert_eq!(s.obstacles[0].x, 90.0 + SCROLL_VELOCITY); // advanced, then hit
    assert_eq!(s.obstacles[1].x, 500.0); // untouched this frame
}

// ── spawning ──────────────────────────────────────────────────────────────────

#[test]
fn spawn_pushes_one_pair_off_the_right_edge() {
    let mut s = running_session();
    s.on_spawn_due(&mut seeded_rng());

    assert_eq!(s.obstacles.len(), 2);
    let top = &s.obstacles[0];
    let bottom = &s.obstacles[1];
    assert_eq!(top.end, PairEnd::Top);
    assert_eq!(bottom.end, PairEnd::Bottom);
    assert_eq!(top.x, BOARD_WIDTH);
    assert_eq!(bottom.x, BOARD_WIDTH);
    assert!(!top.passed);
    assert!(!bottom.passed);
}

#[test]
fn spawn_gap_geometry_holds() {
    let mut s = running_session();
    s.on_spawn_due(&mut seeded_rng());

    let top = &s.obstacles[0];
    let bottom = &s.obstacles[1];
    assert!(top.y <= -OBSTACLE_HEIGHT / 5.0);
    assert!(top.y >= -OBSTACLE_HEIGHT / 5.0 - OBSTACLE_HEIGHT / 2.0);
    assert_eq!(bottom.y, top.y + OBSTACLE_HEIGHT + OPENING_SPACE);
}

#[test]
fn spawn_is_suppressed_outside_running() {
    let mut s = GameSession::new();
    s.on_spawn_due(&mut seeded_rng());
    assert!(s.obstacles.is_empty());

    let mut s = running_session();
    s.time_left = 1;
    s.on_second(); // time up -> Over
    s.on_spawn_due(&mut seeded_rng());
    assert!(s.obstacles.is_empty());
}

#[test]
fn obstacles_stay_ordered_by_spawn_time() {
    let mut s = running_session();
    let mut rng = seeded_rng();
    s.on_spawn_due(&mut rng);
    for _ in 0..10 {
        s.thrust();
        s.on_frame();
    }
    s.on_spawn_due(&mut rng);

    assert_eq!(s.obstacles.len(), 4);
    let xs: Vec<f32> = s.obstacles.iter().map(|o| o.x).collect();
    for pair in xs.windows(2) {
        assert!(pair[0] <= pair[1]); // front is oldest and leftmost
    }
}

// ── scoring and pruning ───────────────────────────────────────────────────────

#[test]
fn pass_scores_half_point_per_obstacle_exactly_once() {
    let mut s = running_session();
    // already behind the ship's leading edge, but not yet off-screen
    s.obstacles.push_back(harmless_obstacle(0.0, PairEnd::Top));

    let events = s.on_frame();
    assert_eq!(events, vec![GameEvent::ObstaclePassed]);
    assert_eq!(s.score, PASS_SCORE);
    assert!(s.obstacles[0].passed);

    // second frame without ship movement must not double-count
    let events = s.on_frame();
    assert!(events.is_empty());
    assert_eq!(s.score, PASS_SCORE);
}

#[test]
fn full_pair_is_worth_one_point() {
    let mut s = running_session();
    s.obstacles.push_back(harmless_obstacle(0.0, PairEnd::Top));
    s.obstacles.push_back(harmless_obstacle(0.0, PairEnd::Bottom));

    let events = s.on_frame();
    assert_eq!(
        events,
        vec![GameEvent::ObstaclePassed, GameEvent::ObstaclePassed]
    );
    assert_eq!(s.score, 1.0);
    assert_eq!(s.score_floor(), 1);
}

#[test]
fn score_floor_truncates_half_points() {
    let mut s = running_session();
    s.score = 5.5;
    assert_eq!(s.score_floor(), 5);
}

#[test]
fn scroll_and_prune_scenario() {
    let mut s = running_session();
    s.obstacles.push_back(harmless_obstacle(BOARD_WIDTH, PairEnd::Top));
    s.obstacles.push_back(harmless_obstacle(BOARD_WIDTH, PairEnd::Bottom));

    // x == 800 - 4N while on screen; the thrust keeps the ship flying
    for n in 1..=216u32 {
        s.thrust();
        s.on_frame();
        let expected = BOARD_WIDTH + SCROLL_VELOCITY * n as f32;
        if expected >= -OBSTACLE_WIDTH {
            assert_eq!(s.obstacles.front().unwrap().x, expected, "frame {n}");
        }
    }
    // at x == -width the pair is still (barely) alive
    assert_eq!(s.obstacles.len(), 2);
    assert_eq!(s.obstacles.front().unwrap().x, -OBSTACLE_WIDTH);

    // one more frame pushes it past -width and prunes the pair
    s.thrust();
    s.on_frame();
    assert!(s.obstacles.is_empty());
}

#[test]
fn prune_never_removes_visible_obstacles() {
    let mut s = running_session();
    s.obstacles.push_back(harmless_obstacle(-60.0, PairEnd::Top)); // partially visible
    s.obstacles.push_back(harmless_obstacle(200.0, PairEnd::Bottom));

    s.on_frame();
    for o in &s.obstacles {
        assert!(o.x >= -OBSTACLE_WIDTH);
    }
    assert_eq!(s.obstacles.len(), 2);
}

// ── countdown ─────────────────────────────────────────────────────────────────

#[test]
fn countdown_expires_after_round_seconds() {
    let mut s = running_session();
    for _ in 0..ROUND_SECONDS - 1 {
        assert_eq!(s.on_second(), None);
    }
    assert_eq!(s.time_left, 1);

    assert_eq!(s.on_second(), Some(GameEvent::SessionEnded));
    assert_eq!(s.time_left, 0);
    assert!(s.time_up);
    assert_eq!(s.phase, Phase::Over);
}

#[test]
fn countdown_does_not_tick_outside_running() {
    let mut s = GameSession::new();
    assert_eq!(s.on_second(), None);
    assert_eq!(s.time_left, ROUND_SECONDS);
}
