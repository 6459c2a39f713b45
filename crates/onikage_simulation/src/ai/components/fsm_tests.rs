//! Tests for Enemy FSM components.

#[cfg(test)]
mod tests {
    use super::super::fsm::{EnemyBrain, EnemyConfig, EnemyState};
    use bevy::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const DT: f32 = 1.0 / 60.0;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    #[test]
    fn test_enemy_state_default() {
        let brain = EnemyBrain::default();
        assert_eq!(brain.state, EnemyState::Patrol);
        assert_eq!(EnemyState::default(), EnemyState::Patrol);
        assert!(!brain.player_detected);
    }

    #[test]
    fn test_enemy_config_default() {
        let config = EnemyConfig::default();
        assert_eq!(config.max_health, 50);
        assert_eq!(config.damage, 15);
        assert_eq!(config.detection_range, 5.0);
        assert_eq!(config.attack_range, 1.5);
        assert_eq!(config.luz_on_defeat, 5);
    }

    #[test]
    fn test_patrol_picks_heading_at_half_speed() {
        let config = EnemyConfig::default();
        let mut brain = EnemyBrain::default();
        let mut rng = rng();

        let decision = brain.think(&config, None, false, DT, &mut rng);

        assert_eq!(brain.state, EnemyState::Patrol);
        assert!((brain.patrol_direction.length() - 1.0).abs() < 1e-4);
        assert!((decision.velocity.length() - config.move_speed * 0.5).abs() < 1e-4);
        assert!(brain.patrol_timer >= config.patrol_interval_min - DT);
        assert!(brain.patrol_timer <= config.patrol_interval_max);
    }

    #[test]
    fn test_idle_waits_then_patrols() {
        let config = EnemyConfig::default();
        let mut brain = EnemyBrain::idle(0.05);
        let mut rng = rng();

        let decision = brain.think(&config, None, false, DT, &mut rng);
        assert_eq!(brain.state, EnemyState::Idle);
        assert_eq!(decision.velocity, Vec2::ZERO);

        for _ in 0..3 {
            brain.think(&config, None, false, DT, &mut rng);
        }
        assert_eq!(brain.state, EnemyState::Patrol);
        assert_ne!(brain.patrol_direction, Vec2::ZERO);
    }

    #[test]
    fn test_detection_edge_reported_once() {
        let config = EnemyConfig::default();
        let mut brain = EnemyBrain::default();
        let mut rng = rng();

        let first = brain.think(&config, Some(Vec2::new(4.0, 0.0)), false, DT, &mut rng);
        assert_eq!(first.detection_changed, Some(true));
        assert_eq!(brain.state, EnemyState::Chase);

        let second = brain.think(&config, Some(Vec2::new(4.0, 0.0)), false, DT, &mut rng);
        assert_eq!(second.detection_changed, None);
    }

    #[test]
    fn test_chase_moves_toward_player() {
        let config = EnemyConfig::default();
        let mut brain = EnemyBrain {
            state: EnemyState::Chase,
            player_detected: true,
            ..EnemyBrain::default()
        };
        let mut rng = rng();

        let decision = brain.think(&config, Some(Vec2::new(0.0, 3.0)), false, DT, &mut rng);

        assert_eq!(brain.state, EnemyState::Chase);
        assert!((decision.velocity - Vec2::new(0.0, config.move_speed)).length() < 1e-4);
        assert_eq!(decision.facing, Some(Vec2::Y));
    }

    #[test]
    fn test_chase_lost_player_goes_to_patrol_not_idle() {
        let config = EnemyConfig::default();
        let mut brain = EnemyBrain {
            state: EnemyState::Chase,
            player_detected: true,
            ..EnemyBrain::default()
        };
        let mut rng = rng();

        let decision = brain.think(&config, Some(Vec2::new(10.0, 0.0)), false, DT, &mut rng);

        assert_eq!(decision.detection_changed, Some(false));
        assert_eq!(brain.state, EnemyState::Patrol);
        assert_ne!(brain.patrol_direction, Vec2::ZERO);
    }

    #[test]
    fn test_attack_starts_immediately_and_respects_duration() {
        let config = EnemyConfig::default();
        let mut brain = EnemyBrain {
            state: EnemyState::Chase,
            player_detected: true,
            ..EnemyBrain::default()
        };
        let mut rng = rng();
        let near = Some(Vec2::new(1.0, 0.0));

        // Chase → Attack (стоим на месте)
        let decision = brain.think(&config, near, false, DT, &mut rng);
        assert_eq!(brain.state, EnemyState::Attack);
        assert_eq!(decision.velocity, Vec2::ZERO);
        assert!(!decision.start_attack);

        // Первый тик в Attack: удар сразу
        let decision = brain.think(&config, near, false, DT, &mut rng);
        assert!(decision.start_attack);
        assert!(brain.is_attacking());

        // Повтор не раньше чем через attack_duration
        let mut started = 0;
        for _ in 0..50 {
            if brain.think(&config, near, false, DT, &mut rng).start_attack {
                started += 1;
            }
        }
        assert_eq!(started, 0);

        let mut started = 0;
        for _ in 0..15 {
            if brain.think(&config, near, false, DT, &mut rng).start_attack {
                started += 1;
            }
        }
        assert_eq!(started, 1);
    }

    #[test]
    fn test_attack_out_of_range_returns_to_chase() {
        let config = EnemyConfig::default();
        let mut brain = EnemyBrain {
            state: EnemyState::Attack,
            player_detected: true,
            ..EnemyBrain::default()
        };
        let mut rng = rng();

        let decision = brain.think(&config, Some(Vec2::new(3.0, 0.0)), false, DT, &mut rng);
        assert_eq!(brain.state, EnemyState::Chase);
        assert!(!decision.start_attack);

        brain.state = EnemyState::Attack;
        brain.think(&config, None, false, DT, &mut rng);
        assert_eq!(brain.state, EnemyState::Chase);
    }

    #[test]
    fn test_hurt_holds_then_resumes_chase() {
        let config = EnemyConfig::default();
        let mut brain = EnemyBrain {
            state: EnemyState::Hurt,
            ..EnemyBrain::default()
        };
        let mut rng = rng();

        let decision = brain.think(&config, None, true, DT, &mut rng);
        assert_eq!(brain.state, EnemyState::Hurt);
        assert_eq!(decision.velocity, Vec2::ZERO);

        // Выход всегда в Chase, даже без игрока рядом
        brain.think(&config, None, false, DT, &mut rng);
        assert_eq!(brain.state, EnemyState::Chase);
    }

    #[test]
    fn test_dead_is_terminal() {
        let config = EnemyConfig::default();
        let mut brain = EnemyBrain {
            state: EnemyState::Dead,
            ..EnemyBrain::default()
        };
        let mut rng = rng();

        let decision = brain.think(&config, Some(Vec2::new(1.0, 0.0)), false, DT, &mut rng);
        assert_eq!(brain.state, EnemyState::Dead);
        assert_eq!(decision.velocity, Vec2::ZERO);
        assert_eq!(decision.detection_changed, None);
        assert!(!decision.start_attack);
    }
}
