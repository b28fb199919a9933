use std::time::Duration;

use space_shooter::audio::AudioEvent;
use space_shooter::config::{BossStage, GameConfig};
use space_shooter::constants::*;
use space_shooter::entities::*;
use space_shooter::highscore::MemoryStore;
use space_shooter::session::GameSession;

const DT: Duration = Duration::from_millis(16);

fn quiet_config() -> GameConfig {
    GameConfig {
        powerup_drop_chance: 0.0,
        ..GameConfig::default()
    }
}

/// Seeded session with every enemy parked far above the playfield.
fn make_session() -> GameSession<MemoryStore> {
    make_session_with(quiet_config(), MemoryStore::new())
}

fn make_session_with(config: GameConfig, store: MemoryStore) -> GameSession<MemoryStore> {
    let mut s = GameSession::with_seed(config, store, 42);
    for e in s.state_mut().entities.enemies.iter_mut() {
        e.rect.x = 0.0;
        e.rect.y = -10_000.0;
        e.speed = 0.0;
    }
    s
}

fn idle() -> ControlState {
    ControlState::default()
}

fn stage_enemy(s: &mut GameSession<MemoryStore>, index: usize, x: f32, y: f32) {
    let e = s
        .state_mut()
        .entities
        .enemies
        .get_mut(index)
        .expect("enemy slot");
    e.rect.x = x;
    e.rect.y = y;
    e.speed = 0.0;
}

fn stage_boss(s: &mut GameSession<MemoryStore>, hp: i32) {
    let now = s.state().clock.now_ms();
    let state = s.state_mut();
    state.entities.boss = Some(Boss::new(state.config.width, hp, now));
    state.boss_active = true;
}

/// Boss parked on top of the player's spawn point.
fn stage_boss_on_player(s: &mut GameSession<MemoryStore>) {
    stage_boss(s, 60);
    let boss = s.state_mut().entities.boss.as_mut().expect("boss");
    boss.rect.x = 330.0;
    boss.rect.y = 480.0;
}

fn player(s: &GameSession<MemoryStore>) -> &Player {
    &s.state().entities.player
}

fn enemy_bullet_on_player() -> Bullet {
    // Falls 6 units into the player's centre during the movement pass.
    Bullet::enemy(400.0, 550.0, 0.0)
}

// ── Movement: player ──────────────────────────────────────────────────────────

#[test]
fn player_moves_at_fixed_speed() {
    let mut s = make_session();
    let start = player(&s).rect.x;
    s.tick(ControlState { move_left: true, ..idle() }, DT);
    assert_eq!(player(&s).rect.x, start - PLAYER_SPEED);
    s.tick(ControlState { move_right: true, ..idle() }, DT);
    s.tick(ControlState { move_right: true, ..idle() }, DT);
    assert_eq!(player(&s).rect.x, start + PLAYER_SPEED);
}

#[test]
fn player_clamped_to_playfield() {
    let mut s = make_session();
    s.state_mut().entities.player.rect.x = 2.0;
    s.tick(ControlState { move_left: true, ..idle() }, DT);
    assert_eq!(player(&s).rect.x, 0.0);

    s.state_mut().entities.player.rect.x = PLAYFIELD_WIDTH - PLAYER_WIDTH - 2.0;
    s.tick(ControlState { move_right: true, ..idle() }, DT);
    assert_eq!(player(&s).rect.x, PLAYFIELD_WIDTH - PLAYER_WIDTH);
}

#[test]
fn defeated_player_ignores_controls() {
    let mut s = make_session();
    s.state_mut().entities.player.defeated = true;
    let start = player(&s).rect.x;
    let all = ControlState {
        move_left: true,
        fire: true,
        ..idle()
    };
    s.tick(all, Duration::from_millis(500));
    assert_eq!(player(&s).rect.x, start);
    assert!(s.state().entities.player_bullets.is_empty());
}

#[test]
fn fire_respects_cooldown() {
    let mut s = make_session();
    let fire = ControlState { fire: true, ..idle() };

    let snap = s.tick(fire, Duration::from_millis(300));
    assert_eq!(s.state().entities.player_bullets.len(), 1);
    assert!(snap.events.contains(&AudioEvent::Shoot));
    let b = s.state().entities.player_bullets.get(0).expect("bullet");
    assert_eq!(b.rect.center_x(), player(&s).rect.center_x());
    assert_eq!(b.rect.bottom(), player(&s).rect.top());

    let snap = s.tick(fire, DT);
    assert_eq!(s.state().entities.player_bullets.len(), 1);
    assert!(!snap.events.contains(&AudioEvent::Shoot));

    s.tick(fire, Duration::from_millis(300));
    assert_eq!(s.state().entities.player_bullets.len(), 2);
}

#[test]
fn fire_at_exact_cooldown_is_rejected() {
    let mut s = make_session();
    s.tick(ControlState { fire: true, ..idle() }, Duration::from_millis(PLAYER_FIRE_COOLDOWN_MS));
    assert!(s.state().entities.player_bullets.is_empty());
}

#[test]
fn spread_buff_fires_three_way_fan() {
    let mut s = make_session();
    s.state_mut().entities.player.spread_until = Some(10_000);
    s.tick(ControlState { fire: true, ..idle() }, Duration::from_millis(300));

    let mut vx: Vec<f32> = s.state().entities.player_bullets.iter().map(|b| b.vx).collect();
    vx.sort_by(|a, b| a.partial_cmp(b).expect("finite"));
    assert_eq!(vx, FAN_VX.to_vec());
}

#[test]
fn expired_spread_fires_single_shot() {
    let mut s = make_session();
    s.state_mut().entities.player.spread_until = Some(100);
    s.tick(ControlState { fire: true, ..idle() }, Duration::from_millis(300));
    assert_eq!(s.state().entities.player_bullets.len(), 1);
}

#[test]
fn invincibility_decays_one_per_tick() {
    let mut s = make_session();
    s.state_mut().entities.player.invincible = 10;
    s.tick(idle(), DT);
    s.tick(idle(), DT);
    assert_eq!(player(&s).invincible, 8);
}

// ── Movement: projectiles, drops, enemies, boss ───────────────────────────────

#[test]
fn player_bullets_culled_off_the_top_and_sides() {
    let mut s = make_session();
    {
        let bullets = &mut s.state_mut().entities.player_bullets;
        bullets.push(Bullet::player(200.0, 5.0, 0.0)); // bottom -7 after move
        bullets.push(Bullet::player(200.0, 20.0, 0.0)); // bottom 8 after move
        bullets.push(Bullet::player(-10.0, 300.0, -3.0)); // right edge < 0
        bullets.push(Bullet::player(810.0, 300.0, 3.0)); // left edge > width
    }
    s.tick(idle(), DT);
    let kept: Vec<_> = s.state().entities.player_bullets.iter().collect();
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].rect.bottom(), 8.0);
}

#[test]
fn enemy_bullets_tolerate_side_margin() {
    let mut s = make_session();
    {
        let bullets = &mut s.state_mut().entities.enemy_bullets;
        bullets.push(Bullet::enemy(-15.0, 300.0, 0.0)); // left -18: inside margin
        bullets.push(Bullet::enemy(-30.0, 300.0, 0.0)); // left -33: culled
        bullets.push(Bullet::enemy(830.0, 300.0, 0.0)); // right 833: culled
        bullets.push(Bullet::enemy(200.0, 610.0, 0.0)); // top below bottom: culled
    }
    s.tick(idle(), DT);
    let kept: Vec<_> = s.state().entities.enemy_bullets.iter().collect();
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].rect.center_x(), -15.0);
    assert_eq!(kept[0].rect.center_y(), 306.0);
}

#[test]
fn enemy_wraps_to_top_instead_of_leaving() {
    let mut s = make_session();
    stage_enemy(&mut s, 0, 100.0, 599.0);
    s.state_mut().entities.enemies.get_mut(0).expect("enemy").speed = 2.0;
    s.tick(idle(), DT);

    let e = s.state().entities.enemies.get(0).expect("enemy");
    assert!((ENEMY_SPAWN_Y_MIN as f32..=ENEMY_SPAWN_Y_MAX as f32).contains(&e.rect.y));
    assert!((ENEMY_SPEED_MIN as f32..=ENEMY_SPEED_MAX as f32).contains(&e.speed));
    assert!(e.rect.x >= 0.0 && e.rect.right() <= PLAYFIELD_WIDTH);
    assert_eq!(s.state().entities.enemies.len(), ENEMY_COUNT);
}

#[test]
fn enemies_frozen_during_boss_encounter() {
    let mut s = make_session();
    stage_enemy(&mut s, 0, 100.0, 100.0);
    s.state_mut().entities.enemies.get_mut(0).expect("enemy").speed = 3.0;
    stage_boss(&mut s, 60);
    s.tick(idle(), DT);
    assert_eq!(s.state().entities.enemies.get(0).expect("enemy").rect.y, 100.0);
}

#[test]
fn powerups_fall_and_are_culled_below_bottom() {
    let mut s = make_session();
    {
        let powerups = &mut s.state_mut().entities.powerups;
        powerups.push(PowerUp::new(100.0, 100.0, PowerUpKind::Spread));
        powerups.push(PowerUp::new(100.0, 620.0, PowerUpKind::Shield));
    }
    s.tick(idle(), DT);
    let kept: Vec<_> = s.state().entities.powerups.iter().collect();
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].rect.center_y(), 102.5);
}

#[test]
fn boss_bounces_off_side_margin() {
    let mut s = make_session();
    stage_boss(&mut s, 60);
    {
        let boss = s.state_mut().entities.boss.as_mut().expect("boss");
        boss.rect.x = 12.0;
        boss.vx = -BOSS_SPEED;
    }
    s.tick(idle(), DT);
    let boss = s.state().entities.boss.as_ref().expect("boss");
    assert_eq!(boss.rect.x, 9.0);
    assert_eq!(boss.vx, BOSS_SPEED);
}

#[test]
fn boss_fires_fan_after_cooldown() {
    let mut s = make_session();
    stage_boss(&mut s, 60);
    s.tick(idle(), Duration::from_millis(BOSS_FIRE_COOLDOWN_MS));
    assert!(s.state().entities.enemy_bullets.is_empty());

    s.tick(idle(), DT);
    let boss = s.state().entities.boss.as_ref().expect("boss");
    let bullets: Vec<_> = s.state().entities.enemy_bullets.iter().collect();
    assert_eq!(bullets.len(), 3);
    for b in &bullets {
        assert_eq!(b.rect.center_x(), boss.rect.center_x());
        assert_eq!(b.rect.center_y(), boss.rect.bottom() - BOSS_MUZZLE_OFFSET);
        assert_eq!(b.vy, ENEMY_BULLET_SPEED);
    }
}

// ── Collision: bullets vs enemies ─────────────────────────────────────────────

#[test]
fn bullet_kill_scores_ten_and_replaces_enemy() {
    let mut s = make_session();
    stage_enemy(&mut s, 0, 100.0, 100.0);
    s.state_mut()
        .entities
        .player_bullets
        .push(Bullet::player(125.0, 150.0, 0.0));
    s.tick(idle(), DT);

    assert_eq!(s.score(), SCORE_ENEMY_KILL);
    assert_eq!(s.state().entities.enemies.len(), ENEMY_COUNT);
    assert!(s.state().entities.player_bullets.is_empty());
    assert!(!s
        .state()
        .entities
        .enemies
        .iter()
        .any(|e| e.rect.x == 100.0 && e.rect.y == 100.0));
}

#[test]
fn bullet_is_consumed_by_first_enemy_only() {
    let mut s = make_session();
    stage_enemy(&mut s, 0, 100.0, 100.0);
    stage_enemy(&mut s, 1, 110.0, 100.0);
    s.state_mut()
        .entities
        .player_bullets
        .push(Bullet::player(130.0, 150.0, 0.0));
    s.tick(idle(), DT);

    assert_eq!(s.score(), SCORE_ENEMY_KILL);
    let survivors = s
        .state()
        .entities
        .enemies
        .iter()
        .filter(|e| e.rect.y == 100.0)
        .count();
    assert_eq!(survivors, 1);
}

#[test]
fn two_bullets_on_one_enemy_score_once() {
    let mut s = make_session();
    stage_enemy(&mut s, 0, 100.0, 100.0);
    {
        let bullets = &mut s.state_mut().entities.player_bullets;
        bullets.push(Bullet::player(110.0, 150.0, 0.0));
        bullets.push(Bullet::player(140.0, 150.0, 0.0));
    }
    s.tick(idle(), DT);
    assert_eq!(s.score(), SCORE_ENEMY_KILL);
    assert!(s.state().entities.player_bullets.is_empty());
}

#[test]
fn kill_drops_powerup_on_enemy_centre() {
    let config = GameConfig {
        powerup_drop_chance: 1.0,
        ..GameConfig::default()
    };
    let mut s = make_session_with(config, MemoryStore::new());
    stage_enemy(&mut s, 0, 100.0, 100.0);
    s.state_mut()
        .entities
        .player_bullets
        .push(Bullet::player(125.0, 150.0, 0.0));
    s.tick(idle(), DT);

    let drops: Vec<_> = s.state().entities.powerups.iter().collect();
    assert_eq!(drops.len(), 1);
    assert_eq!(drops[0].rect.center_x(), 125.0);
    assert_eq!(drops[0].rect.center_y(), 120.0);
}

#[test]
fn small_enemies_immune_during_boss_encounter() {
    let mut s = make_session();
    stage_enemy(&mut s, 0, 100.0, 300.0);
    stage_boss(&mut s, 60);
    s.state_mut()
        .entities
        .player_bullets
        .push(Bullet::player(125.0, 350.0, 0.0));
    s.tick(idle(), DT);
    assert_eq!(s.score(), 0);
    assert_eq!(s.state().entities.player_bullets.len(), 1);
}

// ── Collision: bullets vs boss ────────────────────────────────────────────────

#[test]
fn boss_takes_chip_damage_per_bullet() {
    let mut s = make_session();
    stage_boss(&mut s, 10);
    {
        let bullets = &mut s.state_mut().entities.player_bullets;
        bullets.push(Bullet::player(400.0, 170.0, 0.0));
        bullets.push(Bullet::player(420.0, 170.0, 0.0));
    }
    s.tick(idle(), DT);
    let boss = s.state().entities.boss.as_ref().expect("boss");
    assert_eq!(boss.health, 8);
    assert_eq!(s.score(), 2 * SCORE_BOSS_CHIP);
    assert!(s.state().entities.player_bullets.is_empty());
}

#[test]
fn boss_kill_pays_bounty_plus_chip() {
    let mut s = make_session();
    s.state_mut().score = 600;
    s.state_mut().next_boss_stage = 1;
    stage_boss(&mut s, 60);
    s.state_mut().entities.boss.as_mut().expect("boss").health = 1;
    s.state_mut()
        .entities
        .player_bullets
        .push(Bullet::player(400.0, 170.0, 0.0));
    s.tick(idle(), DT);

    let state = s.state();
    assert_eq!(state.score, 600 + SCORE_BOSS_KILL + SCORE_BOSS_CHIP);
    assert!(state.entities.boss.is_none());
    assert!(!state.boss_active);
    assert!(state.boss_defeated);
}

// ── Collision: player hits ────────────────────────────────────────────────────

#[test]
fn enemy_bullet_costs_a_life_and_grants_iframes() {
    let mut s = make_session();
    s.state_mut().entities.player.rect.x = 100.0;
    s.state_mut()
        .entities
        .enemy_bullets
        .push(Bullet::enemy(130.0, 550.0, 0.0));
    let snap = s.tick(idle(), DT);

    let p = player(&s);
    assert_eq!(p.lives, 2);
    assert_eq!(p.invincible, INVINCIBILITY_TICKS);
    assert_eq!(p.rect.center_x(), 400.0);
    assert!(s.state().entities.enemy_bullets.is_empty());
    assert!(snap.events.contains(&AudioEvent::Hit));
}

#[test]
fn iframes_absorb_hit_but_bullet_is_still_consumed() {
    let mut s = make_session();
    s.state_mut().entities.player.invincible = 50;
    s.state_mut()
        .entities
        .enemy_bullets
        .push(enemy_bullet_on_player());
    s.tick(idle(), DT);
    assert_eq!(player(&s).lives, 3);
    assert!(s.state().entities.enemy_bullets.is_empty());
}

#[test]
fn enemy_contact_costs_a_life_and_resets_enemy() {
    let mut s = make_session();
    stage_enemy(&mut s, 0, 370.0, 532.0);
    s.tick(idle(), DT);

    assert_eq!(player(&s).lives, 2);
    let e = s.state().entities.enemies.get(0).expect("enemy");
    assert!(e.rect.y < 0.0);
    assert_eq!(s.state().entities.enemies.len(), ENEMY_COUNT);
    assert_eq!(s.score(), 0);
}

#[test]
fn enemy_passes_through_invincible_player() {
    let mut s = make_session();
    s.state_mut().entities.player.invincible = 50;
    stage_enemy(&mut s, 0, 370.0, 532.0);
    s.tick(idle(), DT);
    assert_eq!(player(&s).lives, 3);
    assert_eq!(s.state().entities.enemies.get(0).expect("enemy").rect.y, 532.0);
}

#[test]
fn boss_body_costs_two_lives() {
    let mut s = make_session();
    stage_boss_on_player(&mut s);
    s.tick(idle(), DT);
    let p = player(&s);
    assert_eq!(p.lives, 1);
    assert!(p.is_invincible());
    assert!(!s.is_over());
}

#[test]
fn shield_blocks_bullets_and_enemies() {
    let mut s = make_session();
    s.state_mut().entities.player.shield_until = Some(5_000);
    stage_enemy(&mut s, 0, 370.0, 532.0);
    s.state_mut()
        .entities
        .enemy_bullets
        .push(enemy_bullet_on_player());
    let snap = s.tick(idle(), DT);

    assert_eq!(player(&s).lives, 3);
    assert!(!snap.events.contains(&AudioEvent::Hit));
    assert_eq!(s.state().entities.enemies.get(0).expect("enemy").rect.y, 532.0);
}

#[test]
fn shield_blocks_boss_body() {
    let mut s = make_session();
    s.state_mut().entities.player.shield_until = Some(5_000);
    stage_boss_on_player(&mut s);
    s.tick(idle(), DT);
    assert_eq!(player(&s).lives, 3);
}

#[test]
fn heavy_hit_on_last_life_ends_game_and_persists_record() {
    let mut s = make_session_with(quiet_config(), MemoryStore::with_value(100));
    assert_eq!(s.high_score(), 100);
    s.state_mut().score = 300;
    s.state_mut().entities.player.lives = 1;
    stage_boss_on_player(&mut s);
    let snap = s.tick(idle(), DT);

    let p = player(&s);
    assert_eq!(p.lives, 0);
    assert!(p.defeated);
    assert!(s.is_over());
    assert!(snap.game_over);
    assert_eq!(s.high_score(), 300);
    assert_eq!(s.store().value(), Some(300));
    assert_eq!(s.store().saves(), 1);
    assert_eq!(snap.events, vec![AudioEvent::Hit, AudioEvent::GameOver]);
}

#[test]
fn game_over_without_record_writes_nothing() {
    let mut s = make_session_with(quiet_config(), MemoryStore::with_value(1_000));
    s.state_mut().score = 300;
    s.state_mut().entities.player.lives = 1;
    s.state_mut()
        .entities
        .enemy_bullets
        .push(enemy_bullet_on_player());
    s.tick(idle(), DT);
    assert!(s.is_over());
    assert_eq!(s.store().saves(), 0);
    assert_eq!(s.high_score(), 1_000);
}

#[test]
fn game_over_is_latched() {
    let mut s = make_session();
    s.state_mut().score = 50;
    s.state_mut().entities.player.lives = 1;
    s.state_mut()
        .entities
        .enemy_bullets
        .push(enemy_bullet_on_player());
    s.tick(idle(), DT);
    assert!(s.is_over());
    assert_eq!(s.store().saves(), 1);

    for _ in 0..5 {
        s.state_mut()
            .entities
            .enemy_bullets
            .push(enemy_bullet_on_player());
        let snap = s.tick(ControlState { fire: true, ..idle() }, DT);
        assert!(snap.events.is_empty());
    }
    assert_eq!(player(&s).lives, 0);
    assert_eq!(s.score(), 50);
    assert_eq!(s.store().saves(), 1);
}

// ── Collision: power-ups ──────────────────────────────────────────────────────

#[test]
fn pickup_starts_full_buff_window() {
    let mut s = make_session();
    s.state_mut()
        .entities
        .powerups
        .push(PowerUp::new(400.0, 550.0, PowerUpKind::Spread));
    let snap = s.tick(idle(), DT);

    let now = s.state().clock.now_ms();
    assert_eq!(player(&s).spread_until, Some(now + BUFF_DURATION_MS));
    assert!(player(&s).shield_until.is_none());
    assert!(s.state().entities.powerups.is_empty());
    assert!(snap.events.contains(&AudioEvent::PowerUp));
}

#[test]
fn recollecting_refreshes_rather_than_stacks() {
    let mut s = make_session();
    s.state_mut()
        .entities
        .powerups
        .push(PowerUp::new(400.0, 550.0, PowerUpKind::Shield));
    s.tick(idle(), DT);
    let first = player(&s).shield_until.expect("shield");

    s.state_mut()
        .entities
        .powerups
        .push(PowerUp::new(400.0, 550.0, PowerUpKind::Shield));
    s.tick(idle(), Duration::from_millis(1_000));
    let second = player(&s).shield_until.expect("shield");

    let now = s.state().clock.now_ms();
    assert_eq!(second, now + BUFF_DURATION_MS);
    assert_eq!(second - first, 1_000);
}

// ── Difficulty ────────────────────────────────────────────────────────────────

#[test]
fn fifty_kills_bring_the_first_boss() {
    let mut s = make_session();
    for i in 0..50u32 {
        assert!(s.state().entities.boss.is_none());
        stage_enemy(&mut s, 0, 100.0, 100.0);
        s.state_mut()
            .entities
            .player_bullets
            .push(Bullet::player(125.0, 150.0, 0.0));
        s.tick(idle(), DT);
        assert_eq!(s.score(), SCORE_ENEMY_KILL * (i + 1));
        assert_eq!(s.state().entities.enemies.len(), ENEMY_COUNT);
    }
    assert_eq!(s.score(), 500);
    let boss = s.state().entities.boss.as_ref().expect("boss");
    assert_eq!(boss.health, 60);
    assert_eq!(boss.max_health, 60);
    assert!(s.state().boss_active);
}

#[test]
fn no_boss_below_threshold() {
    let mut s = make_session();
    s.state_mut().score = 499;
    s.tick(idle(), DT);
    assert!(s.state().entities.boss.is_none());
}

#[test]
fn second_boss_needs_first_defeat() {
    let mut s = make_session();
    s.state_mut().score = 1_200;
    s.tick(idle(), DT);
    let boss = s.state().entities.boss.as_ref().expect("first boss");
    assert_eq!(boss.max_health, 60);

    // Defeat it by hand.
    let state = s.state_mut();
    state.entities.boss = None;
    state.boss_active = false;
    state.boss_defeated = true;

    s.tick(idle(), DT);
    let state = s.state();
    assert_eq!(state.entities.boss.as_ref().expect("second boss").max_health, 90);
    assert!(!state.boss_defeated);
}

#[test]
fn second_boss_waits_for_its_threshold() {
    let mut s = make_session();
    let state = s.state_mut();
    state.score = 999;
    state.next_boss_stage = 1;
    state.boss_defeated = true;
    s.tick(idle(), DT);
    assert!(s.state().entities.boss.is_none());
    assert!(s.state().boss_defeated);
}

#[test]
fn final_stage_repeats_after_every_defeat() {
    let mut s = make_session();
    {
        let state = s.state_mut();
        state.score = 1_000;
        state.next_boss_stage = 1;
        state.boss_defeated = true;
    }

    s.tick(idle(), DT);
    assert_eq!(s.state().entities.boss.as_ref().expect("second boss").max_health, 90);

    for round in 0..3 {
        // One bullet on a boss at 1 hp ends the encounter.
        s.state_mut().entities.boss.as_mut().expect("boss").health = 1;
        let cx = s.state().entities.boss.as_ref().expect("boss").rect.center_x();
        s.state_mut()
            .entities
            .player_bullets
            .push(Bullet::player(cx, 170.0, 0.0));
        let before = s.score();
        s.tick(idle(), DT);

        assert_eq!(s.score(), before + SCORE_BOSS_KILL + SCORE_BOSS_CHIP, "round {round}");
        let boss = s.state().entities.boss.as_ref().expect("final stage again");
        assert_eq!(boss.health, 90, "round {round}");
        assert!(s.state().boss_active);
        assert!(!s.state().boss_defeated);
        assert_eq!(s.state().next_boss_stage, 2);
    }
}

#[test]
fn final_stage_does_not_repeat_when_disabled() {
    let config = GameConfig {
        repeat_final_stage: false,
        ..quiet_config()
    };
    let mut s = make_session_with(config, MemoryStore::new());
    let state = s.state_mut();
    state.score = 50_000;
    state.next_boss_stage = 2;
    state.boss_defeated = true;
    for _ in 0..10 {
        s.tick(idle(), DT);
    }
    assert!(s.state().entities.boss.is_none());
    assert!(!s.state().boss_active);
    assert_eq!(s.snapshot().hud.next_boss_threshold, None);
}

#[test]
fn extra_configured_stage_fires() {
    let mut config = quiet_config();
    config.boss_stages.push(BossStage {
        threshold: 2_000,
        hp: 120,
    });
    let mut s = make_session_with(config, MemoryStore::new());
    let state = s.state_mut();
    state.score = 2_000;
    state.next_boss_stage = 2;
    state.boss_defeated = true;
    s.tick(idle(), DT);
    assert_eq!(
        s.state().entities.boss.as_ref().expect("third boss").max_health,
        120
    );
}
