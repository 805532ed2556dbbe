//! Translation of world state and events into presentation scenes.

use hidden_maze_core::{Event, HintKind, MalformedCommand, Pickup, RejectionReason};
use hidden_maze_rendering::{animations_for, Hud, Scene};
use hidden_maze_world::{query, World};

/// Captures the current world state into a fresh scene.
pub(crate) fn capture(world: &World) -> Scene {
    let mut scene = Scene::new(
        query::maze(world).clone(),
        query::player(world),
        query::end(world),
        query::phase(world),
    );
    sync(&mut scene, world);
    scene
}

/// Refreshes `scene` from the world and queues feedback for `events`.
pub(crate) fn refresh(scene: &mut Scene, world: &World, events: &[Event]) {
    for event in events {
        describe(scene, event);
    }
    sync(scene, world);
}

fn sync(scene: &mut Scene, world: &World) {
    if scene.maze != *query::maze(world) {
        scene.maze = query::maze(world).clone();
    }
    scene.walls_visible = query::walls_visible(world);
    scene.player = query::player(world);
    scene.end = query::end(world);
    scene.red_pickup = query::pickup(world, Pickup::Red);
    scene.green_pickup = query::pickup(world, Pickup::Green);
    scene.phase = query::phase(world);
    scene.hud = Hud {
        level: query::level(world),
        attempts: query::attempts_remaining(world),
        directional_hints: query::hints_remaining(world, HintKind::Directional),
        reveal_hints: query::hints_remaining(world, HintKind::Reveal),
    };
}

fn describe(scene: &mut Scene, event: &Event) {
    let message = match event {
        Event::LevelStarted {
            level,
            columns,
            rows,
            attempts,
        } => format!(
            "Level {level}: {columns}x{rows} maze, {attempts} attempts. Memorise the walls!"
        ),
        Event::WallsHidden => "The walls fade into darkness.".to_owned(),
        Event::WallsRevealed { duration } => {
            format!("Walls revealed for {} seconds.", duration.as_secs())
        }
        Event::CommandRejected {
            reason: RejectionReason::WallsVisible,
        } => "You cannot move while walls are visible!".to_owned(),
        Event::CommandRejected {
            reason: RejectionReason::Terminal,
        } => "The run is over.".to_owned(),
        Event::AttemptConsumed { .. } => return,
        Event::CommandMalformed {
            error: MalformedCommand::Empty,
        } => "No valid commands found in input.".to_owned(),
        Event::CommandMalformed {
            error: MalformedCommand::InvalidToken { token, index },
        } => format!("Invalid move '{token}' at position {}.", index + 1),
        Event::InstructionExecuted {
            instruction,
            from,
            to,
            blocked,
        } => {
            scene
                .animations
                .extend(animations_for(*from, *to, instruction.direction()));
            if !*blocked {
                return;
            }
            "Wall encountered!".to_owned()
        }
        Event::PickupCollected {
            pickup: Pickup::Green,
        } => "You collected the green circle! Arrow hints +1.".to_owned(),
        Event::PickupCollected {
            pickup: Pickup::Red,
        } => "You collected the red circle! Reveal hints +1.".to_owned(),
        Event::LevelWon { level } => format!("End achieved! Level {level} cleared."),
        Event::AttemptsExhausted { .. } => "Failure! No attempts left.".to_owned(),
        Event::GameComplete => "Game finished. You escaped every maze!".to_owned(),
        Event::ProbeAnswered { signal, .. } => {
            scene.cues.push((*signal).into());
            return;
        }
        Event::HintDeclined {
            hint: HintKind::Directional,
        } => "Out of arrow hints!".to_owned(),
        Event::HintDeclined {
            hint: HintKind::Reveal,
        } => "Out of reveal hints!".to_owned(),
        Event::SessionEnded => "Goodbye.".to_owned(),
    };
    scene.messages.push(message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use hidden_maze_core::{CellCoord, Command, Direction, Instruction, Rules};
    use hidden_maze_rendering::Cue;
    use hidden_maze_world as world;

    #[test]
    fn capture_mirrors_the_world() {
        let world = World::new(Rules::default(), 5).expect("valid rules");
        let scene = capture(&world);

        assert_eq!(scene.player, query::player(&world));
        assert!(scene.walls_visible);
        assert_eq!(scene.hud.level, 1);
        assert_eq!(scene.hud.attempts, 5);
        assert_eq!(scene.hud.directional_hints, 5);
        assert_eq!(scene.hud.reveal_hints, 3);
    }

    #[test]
    fn probe_answers_become_cues() {
        let mut world = World::new(Rules::default(), 5).expect("valid rules");
        let mut scene = capture(&world);
        let mut events = Vec::new();
        world::apply(
            &mut world,
            Command::ProbeDirection {
                direction: Direction::North,
            },
            &mut events,
        );

        refresh(&mut scene, &world, &events);

        assert_eq!(scene.cues.len(), 1);
        let cue = scene.cues.next_when_idle(false);
        assert!(matches!(cue, Some(Cue::Wall) | Some(Cue::Path)));
        assert_eq!(scene.hud.directional_hints, 4);
    }

    #[test]
    fn executed_instructions_queue_animations_and_wall_messages() {
        let world = World::new(Rules::default(), 5).expect("valid rules");
        let mut scene = capture(&world);
        let events = [
            Event::InstructionExecuted {
                instruction: Instruction::new(Direction::East, 3),
                from: CellCoord::new(0, 0),
                to: CellCoord::new(2, 0),
                blocked: true,
            },
            Event::InstructionExecuted {
                instruction: Instruction::new(Direction::South, 1),
                from: CellCoord::new(2, 0),
                to: CellCoord::new(2, 1),
                blocked: false,
            },
        ];

        refresh(&mut scene, &world, &events);

        assert_eq!(scene.animations.len(), 3);
        assert_eq!(scene.messages, vec!["Wall encountered!".to_owned()]);
    }
}
