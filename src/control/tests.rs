use glam::Vec2;
use pollster::block_on;

use crate::control::{ActionState, JumpPhase, PlayerController};
use crate::coordinator::{run_tick, MovementCoordinator, PhysicsCoordinator};
use crate::scene::spawn_player;
use crate::tuning::Tuning;

const DT: f32 = 1.0 / 60.0;
const PLAYER_HEIGHT: f32 = 44.0;

struct Rig {
    physics: PhysicsCoordinator,
    movement: MovementCoordinator,
    controller: PlayerController,
    tuning: Tuning,
}

impl Rig {
    /// One platform, player standing on it (after [`settle`]).
    fn new(platform_pos: Vec2, platform_size: Vec2, player_x: f32) -> Self {
        Self::with_tuning(platform_pos, platform_size, player_x, Tuning::default())
    }

    fn with_tuning(
        platform_pos: Vec2,
        platform_size: Vec2,
        player_x: f32,
        tuning: Tuning,
    ) -> Self {
        let mut physics = PhysicsCoordinator::new(tuning.clone());
        physics
            .spawn_platform(platform_pos, platform_size, false)
            .unwrap();
        let player = spawn_player(
            &mut physics,
            Vec2::new(player_x, platform_pos.y - PLAYER_HEIGHT),
        )
        .unwrap();
        Self {
            physics,
            movement: MovementCoordinator::new(),
            controller: PlayerController::new(player),
            tuning,
        }
    }

    fn tick(&mut self, input: ActionState) {
        self.controller
            .update(&input, &mut self.physics, &mut self.movement, &self.tuning, DT)
            .unwrap();
        run_tick(&mut self.physics, &mut self.movement, DT);
    }

    /// Run a few idle ticks so the freshly spawned player registers ground
    /// contact and the controller reaches `Grounded`.
    fn settle(&mut self) {
        for _ in 0..3 {
            self.tick(ActionState::default());
        }
        assert!(self.grounded());
        assert!(matches!(self.controller.phase(), JumpPhase::Grounded));
    }

    fn grounded(&self) -> bool {
        block_on(self.physics.is_grounded(self.controller.entity())).unwrap()
    }

    fn velocity(&self) -> Vec2 {
        block_on(self.physics.velocity(self.controller.entity())).unwrap()
    }

    fn position(&self) -> Vec2 {
        block_on(self.physics.position(self.controller.entity())).unwrap()
    }
}

fn wide_ground() -> Rig {
    Rig::new(Vec2::new(-200.0, 100.0), Vec2::new(400.0, 40.0), 0.0)
}

fn press_jump() -> ActionState {
    ActionState {
        jump_pressed: true,
        jump_held: true,
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------

#[test]
fn grounded_jump_launches_upward() {
    let mut rig = wide_ground();
    rig.settle();

    rig.tick(press_jump());

    assert!(matches!(rig.controller.phase(), JumpPhase::Jumping { .. }));
    assert!(rig.velocity().y < -380.0, "got vy={}", rig.velocity().y);
    assert!(!rig.grounded());
}

#[test]
fn walk_input_moves_and_stop_brakes_to_rest() {
    let mut rig = wide_ground();
    rig.settle();

    let start_x = rig.position().x;
    let walk = ActionState { move_right: true, ..Default::default() };
    for _ in 0..30 {
        rig.tick(walk);
    }
    assert!(rig.position().x > start_x + 20.0);

    for _ in 0..10 {
        rig.tick(ActionState::default());
    }
    assert_eq!(rig.velocity().x, 0.0, "stop request plus friction halts the walk");
}

#[test]
fn coyote_jump_shortly_after_walking_off_succeeds() {
    // Small slab: walking right falls off its edge.
    let mut rig = Rig::new(Vec2::new(0.0, 100.0), Vec2::new(50.0, 20.0), 10.0);
    rig.settle();

    let walk = ActionState { move_right: true, ..Default::default() };
    let mut walked = 0;
    while rig.grounded() {
        rig.tick(walk);
        walked += 1;
        assert!(walked < 120, "never reached the edge");
    }

    // One more airborne tick, then jump — well inside the 0.1 s window.
    rig.tick(ActionState::default());
    rig.tick(press_jump());

    assert!(matches!(rig.controller.phase(), JumpPhase::Jumping { .. }));
    assert!(rig.velocity().y < 0.0);
}

#[test]
fn jump_after_coyote_window_expires_is_refused() {
    let mut rig = Rig::new(Vec2::new(0.0, 100.0), Vec2::new(50.0, 20.0), 10.0);
    rig.settle();

    let walk = ActionState { move_right: true, ..Default::default() };
    while rig.grounded() {
        rig.tick(walk);
    }

    // 0.5 s of falling, far past the window.
    for _ in 0..30 {
        rig.tick(ActionState::default());
    }
    rig.tick(press_jump());

    assert!(!matches!(rig.controller.phase(), JumpPhase::Jumping { .. }));
    assert!(rig.velocity().y > 0.0, "still falling");
}

#[test]
fn buffered_jump_fires_on_the_landing_tick() {
    // Player spawns 30 px above the slab and free-falls onto it.
    let tuning = Tuning::default();
    let mut physics = PhysicsCoordinator::new(tuning.clone());
    physics
        .spawn_platform(Vec2::new(-200.0, 100.0), Vec2::new(400.0, 40.0), false)
        .unwrap();
    let player = spawn_player(&mut physics, Vec2::new(0.0, 100.0 - PLAYER_HEIGHT - 30.0)).unwrap();
    let mut rig = Rig {
        physics,
        movement: MovementCoordinator::new(),
        controller: PlayerController::new(player),
        tuning,
    };

    let mut jumped_at = None;
    for tick in 0..40 {
        let input = if tick == 10 {
            // Pressed mid-air, shortly before touchdown.
            ActionState { jump_pressed: true, ..Default::default() }
        } else {
            ActionState::default()
        };
        rig.tick(input);
        if jumped_at.is_none() && matches!(rig.controller.phase(), JumpPhase::Jumping { .. }) {
            jumped_at = Some(tick);
        }
    }

    let jumped_at = jumped_at.expect("buffered jump executed");
    assert!(
        (14..=18).contains(&jumped_at),
        "fired at or right after landing, got tick {jumped_at}"
    );
}

#[test]
fn releasing_jump_early_cuts_the_hop_short() {
    fn peak_rise(hold_ticks: u32) -> f32 {
        let mut rig = wide_ground();
        rig.settle();
        let start_y = rig.position().y;

        let mut min_y = start_y;
        for tick in 0..60 {
            let input = ActionState {
                jump_pressed: tick == 0,
                jump_held: tick < hold_ticks,
                ..Default::default()
            };
            rig.tick(input);
            min_y = min_y.min(rig.position().y);
        }
        start_y - min_y
    }

    let full = peak_rise(30);
    let tap = peak_rise(1);
    assert!(
        full > tap + 30.0,
        "held jump should rise much higher: full={full}, tap={tap}"
    );
    // The cut clamps toward zero, it never reverses: the tap still rises.
    assert!(tap > 5.0);
}

#[test]
fn cooldown_refuses_an_immediate_second_jump_silently() {
    let tuning = Tuning {
        jump_speed: 100.0,
        jump_cooldown: 1.0,
        ..Tuning::default()
    };
    let mut rig = Rig::with_tuning(Vec2::new(-200.0, 100.0), Vec2::new(400.0, 40.0), 0.0, tuning);
    rig.settle();

    rig.tick(press_jump());
    assert!(matches!(rig.controller.phase(), JumpPhase::Jumping { .. }));

    // Back on the ground well before the cooldown expires.
    for _ in 0..19 {
        rig.tick(ActionState::default());
    }
    assert!(rig.grounded());

    rig.tick(press_jump());
    assert!(
        !matches!(rig.controller.phase(), JumpPhase::Jumping { .. }),
        "cooldown still running: refusal is silent, no error"
    );

    // Once the cooldown has elapsed the next press works again.
    for _ in 0..50 {
        rig.tick(ActionState::default());
    }
    rig.tick(press_jump());
    assert!(matches!(rig.controller.phase(), JumpPhase::Jumping { .. }));
}

#[test]
fn jump_cycle_passes_through_every_phase_in_order() {
    let mut rig = wide_ground();
    rig.settle();

    let mut phases: Vec<&'static str> = vec!["grounded"];
    for tick in 0..80 {
        let input = ActionState {
            jump_pressed: tick == 0,
            jump_held: tick < 3,
            ..Default::default()
        };
        rig.tick(input);
        let label = match rig.controller.phase() {
            JumpPhase::Grounded => "grounded",
            JumpPhase::Jumping { .. } => "jumping",
            JumpPhase::Falling => "falling",
            JumpPhase::Landing => "landing",
        };
        if phases.last() != Some(&label) {
            phases.push(label);
        }
    }

    assert_eq!(
        phases,
        vec!["grounded", "jumping", "falling", "landing", "grounded"]
    );
}
