#[cfg(test)]
mod tests {
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use gravwar_core::constants::*;
    use gravwar_core::enums::{SearchStrategy, StrafeDirection, TurnMode, VehicleState};
    use gravwar_core::types::AimParams;

    use crate::fsm::{evaluate, VehicleContext};
    use crate::profiles::get_profile;
    use crate::scoring::{score_landing, self_penalty};
    use crate::search::*;

    fn make_context(state: VehicleState) -> VehicleContext {
        VehicleContext {
            state,
            is_player: false,
            is_dead: false,
            in_control: true,
            turns_enabled: true,
            longitude: 90.0,
            turret_angle: 45.0,
            power: 400.0,
            desired: AimParams::new(45.0, 400.0, 90.0),
            gun_ready: true,
            projectiles_in_flight: false,
            post_fire_timer: None,
            dt: DT,
        }
    }

    /// Smooth bowl with its minimum at angle 60, power 500.
    fn bowl(aim: &AimParams) -> f32 {
        (aim.angle - 60.0).abs() + (aim.power - 500.0).abs() / 10.0
    }

    // ---- FSM ----

    #[test]
    fn test_wait_to_think_when_in_control() {
        let update = evaluate(&make_context(VehicleState::Wait));
        assert!(update.state_changed);
        assert_eq!(update.new_state, VehicleState::Think);
    }

    #[test]
    fn test_wait_holds_without_control_in_turn_mode() {
        let mut ctx = make_context(VehicleState::Wait);
        ctx.in_control = false;
        let update = evaluate(&ctx);
        assert!(!update.state_changed);
        assert_eq!(update.new_state, VehicleState::Wait);

        // Real-time vehicles think regardless.
        ctx.turns_enabled = false;
        assert_eq!(evaluate(&ctx).new_state, VehicleState::Think);
    }

    #[test]
    fn test_player_never_leaves_manual() {
        let mut ctx = make_context(VehicleState::Wait);
        ctx.is_player = true;
        assert_eq!(evaluate(&ctx).new_state, VehicleState::Manual);

        ctx.state = VehicleState::Manual;
        let update = evaluate(&ctx);
        assert_eq!(update.new_state, VehicleState::Manual);
        assert!(!update.begin_search && !update.fire);
    }

    #[test]
    fn test_think_requests_search_then_moves() {
        let update = evaluate(&make_context(VehicleState::Think));
        assert!(update.begin_search);
        assert_eq!(update.new_state, VehicleState::Move);
    }

    #[test]
    fn test_move_takes_short_way_across_zero() {
        let mut ctx = make_context(VehicleState::Move);
        ctx.longitude = 350.0;
        ctx.desired.longitude = 10.0;
        let update = evaluate(&ctx);
        assert_eq!(update.strafe, Some(StrafeDirection::Left));
        assert_eq!(update.new_state, VehicleState::Move);

        ctx.longitude = 10.0;
        ctx.desired.longitude = 350.0;
        assert_eq!(evaluate(&ctx).strafe, Some(StrafeDirection::Right));

        // Inside tolerance: move on to aiming.
        ctx.desired.longitude = 11.5;
        let update = evaluate(&ctx);
        assert_eq!(update.strafe, None);
        assert_eq!(update.new_state, VehicleState::Aim);
    }

    #[test]
    fn test_aim_rotates_toward_desired_then_stops() {
        let mut ctx = make_context(VehicleState::Aim);
        ctx.turret_angle = 10.0;
        ctx.desired.angle = 300.0;
        // Shorter to go clockwise through zero.
        assert_eq!(evaluate(&ctx).rot_speed, Some(-1.0));

        ctx.desired.angle = 40.0;
        assert_eq!(evaluate(&ctx).rot_speed, Some(1.0));

        ctx.desired.angle = 10.5;
        let update = evaluate(&ctx);
        assert_eq!(update.rot_speed, Some(0.0));
        assert_eq!(update.new_state, VehicleState::Power);
    }

    #[test]
    fn test_power_adjusts_within_tolerance() {
        let mut ctx = make_context(VehicleState::Power);
        ctx.desired.power = 600.0;
        assert_eq!(evaluate(&ctx).power_speed, Some(AI_POWER_SPEED));

        ctx.desired.power = 200.0;
        assert_eq!(evaluate(&ctx).power_speed, Some(-AI_POWER_SPEED));

        ctx.desired.power = 440.0;
        let update = evaluate(&ctx);
        assert_eq!(update.power_speed, Some(0.0));
        assert_eq!(update.new_state, VehicleState::Fire);
    }

    #[test]
    fn test_fire_waits_for_gun_and_clear_sky() {
        let mut ctx = make_context(VehicleState::Fire);
        ctx.gun_ready = false;
        assert!(!evaluate(&ctx).fire);

        ctx.gun_ready = true;
        ctx.projectiles_in_flight = true;
        assert!(!evaluate(&ctx).fire, "Turn mode must not fire over live projectiles");

        ctx.turns_enabled = false;
        let update = evaluate(&ctx);
        assert!(update.fire);
        assert_eq!(update.new_state, VehicleState::PostFire);
    }

    #[test]
    fn test_post_fire_realtime_returns_to_wait() {
        let mut ctx = make_context(VehicleState::PostFire);
        ctx.turns_enabled = false;
        let update = evaluate(&ctx);
        assert_eq!(update.new_state, VehicleState::Wait);
        assert!(!update.end_turn);
    }

    #[test]
    fn test_post_fire_pauses_then_ends_turn() {
        let mut ctx = make_context(VehicleState::PostFire);
        ctx.projectiles_in_flight = true;
        assert_eq!(evaluate(&ctx).post_fire_timer, None);

        ctx.projectiles_in_flight = false;
        let mut update = evaluate(&ctx);
        assert_eq!(update.post_fire_timer, Some(0.0));

        let mut ticks = 0;
        while !update.end_turn {
            ctx.post_fire_timer = update.post_fire_timer;
            update = evaluate(&ctx);
            ticks += 1;
            assert!(ticks < 1000, "turn never ended");
        }
        let expected = ((POST_FIRE_PAUSE_SECS + POST_FIRE_TRANSITION_SECS) / DT).round() as i32;
        assert!((ticks - expected).abs() <= 1, "ended after {ticks} ticks");
        assert_eq!(update.new_state, VehicleState::Wait);
        assert_eq!(update.post_fire_timer, None);
    }

    #[test]
    fn test_death_is_absorbing_and_passes_turn() {
        let mut ctx = make_context(VehicleState::Aim);
        ctx.is_dead = true;
        let update = evaluate(&ctx);
        assert_eq!(update.new_state, VehicleState::Dead);
        assert!(!update.fire);

        ctx.state = VehicleState::Dead;
        let update = evaluate(&ctx);
        assert_eq!(update.new_state, VehicleState::Dead);
        assert!(update.end_turn);

        ctx.in_control = false;
        assert!(!evaluate(&ctx).end_turn);
    }

    // ---- Scoring ----

    #[test]
    fn test_score_is_distance_to_nearest_target() {
        let shooter = Vec2::new(-1000.0, 0.0);
        let targets = [Vec2::new(100.0, 0.0), Vec2::new(30.0, 40.0)];
        let score = score_landing(Vec2::ZERO, shooter, targets, false);
        assert!((score - 50.0).abs() < 1e-3);

        let edge = score_landing(Vec2::ZERO, shooter, targets, true);
        assert!((edge - 50.0 * SCORE_EDGE_MULTIPLIER).abs() < 1e-2);
    }

    #[test]
    fn test_score_penalizes_landing_near_shooter() {
        let target = [Vec2::new(100.0, 0.0)];
        let far = score_landing(Vec2::new(50.0, 0.0), Vec2::new(-500.0, 0.0), target, false);
        let near = score_landing(Vec2::new(50.0, 0.0), Vec2::new(40.0, 0.0), target, false);
        assert!(near > far);
        assert!(self_penalty(Vec2::ZERO, Vec2::ZERO) == 0.0);
    }

    #[test]
    fn test_score_without_targets_is_worst() {
        assert_eq!(score_landing(Vec2::ZERO, Vec2::X, std::iter::empty(), false), f32::MAX);
        // Landing on the shooter divides by zero.
        assert_eq!(
            score_landing(Vec2::ZERO, Vec2::ZERO, [Vec2::ZERO], false),
            f32::MAX
        );
    }

    // ---- Profiles ----

    #[test]
    fn test_profile_budgets_scale_with_accuracy() {
        let random = get_profile(SearchStrategy::Random, TurnMode::TurnBased);
        assert_eq!(random.iterations(DEFAULT_ACCURACY_MULTIPLIER), 15_000);
        assert_eq!(random.longitude_step, 0.0);

        let realtime = get_profile(SearchStrategy::Gradient, TurnMode::Realtime);
        assert_eq!(realtime.iterations(1.0), GRADIENT_ITERATIONS_REALTIME);
        assert_eq!(realtime.iterations(0.0), 1);

        let turn = get_profile(SearchStrategy::Gradient, TurnMode::TurnBased);
        assert_eq!(turn.iterations(0.05), 5);
    }

    // ---- Search ----

    #[test]
    fn test_gradient_accepted_scores_decrease() {
        let profile = get_profile(SearchStrategy::Gradient, TurnMode::TurnBased);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let initial = AimParams::new(20.0, 300.0, 90.0);
        let mut evaluator = bowl;
        let outcome = gradient_search(
            &mut evaluator,
            initial,
            &profile,
            SearchBudget::iterations(40),
            &mut rng,
        );

        assert!(outcome.improved());
        assert!(outcome.best_score < bowl(&initial));
        for pair in outcome.accepted.windows(2) {
            assert!(pair[1] < pair[0], "accepted scores must decrease: {pair:?}");
        }
        assert_eq!(outcome.evaluations, 1 + 4 * 40);
        assert!(outcome.best.angle >= GRADIENT_ANGLE_MIN && outcome.best.angle <= GRADIENT_ANGLE_MAX);
        assert!(outcome.best.power >= GRADIENT_POWER_MIN && outcome.best.power <= GRADIENT_POWER_MAX);
    }

    #[test]
    fn test_gradient_keeps_initial_when_nothing_improves() {
        let profile = get_profile(SearchStrategy::Gradient, TurnMode::TurnBased);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let initial = AimParams::new(45.0, 400.0, 123.0);
        let mut flat = |_: &AimParams| 10.0f32;
        let outcome = gradient_search(
            &mut flat,
            initial,
            &profile,
            SearchBudget::iterations(10),
            &mut rng,
        );
        assert!(!outcome.improved());
        assert_eq!(outcome.best, initial);
        assert_eq!(outcome.best_score, 10.0);
    }

    #[test]
    fn test_random_search_improves_and_keeps_longitude() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let initial = AimParams::new(180.0, 50.0, 200.0);
        let mut evaluator = bowl;
        let outcome = random_search(
            &mut evaluator,
            initial,
            SearchBudget::iterations(500),
            &mut rng,
        );
        assert!(outcome.improved());
        assert_eq!(outcome.best.longitude, 200.0);
        assert!(outcome.best_score < 30.0, "best {}", outcome.best_score);
        for pair in outcome.accepted.windows(2) {
            assert!(pair[1] < pair[0]);
        }
        assert_eq!(outcome.evaluations, 501);
    }

    #[test]
    fn test_non_finite_scores_never_win() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let initial = AimParams::new(45.0, 400.0, 0.0);
        let mut broken = |_: &AimParams| -> f32 { f32::NAN };
        let outcome = random_search(
            &mut broken,
            initial,
            SearchBudget::iterations(50),
            &mut rng,
        );
        assert_eq!(outcome.best, initial);
        assert_eq!(outcome.best_score, f32::MAX);
    }

    #[test]
    fn test_search_is_seeded() {
        let run = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut evaluator = bowl;
            run_search(
                SearchStrategy::Gradient,
                TurnMode::TurnBased,
                0.2,
                None,
                &mut evaluator,
                AimParams::new(30.0, 250.0, 45.0),
                &mut rng,
            )
        };
        assert_eq!(run(42), run(42));
    }

    #[test]
    fn test_time_box_stops_search() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut evaluator = bowl;
        let outcome = random_search(
            &mut evaluator,
            AimParams::new(0.0, 50.0, 0.0),
            SearchBudget {
                iterations: u32::MAX,
                time_box: Some(std::time::Duration::from_millis(5)),
            },
            &mut rng,
        );
        assert!(outcome.evaluations < u32::MAX);
    }
}
