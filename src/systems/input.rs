//! Input buffer aging, last in the fixed tick.

use bevy_ecs::prelude::*;

use crate::resources::input::InputBuffer;
use crate::resources::worldtime::WorldTime;

/// Clear the just-pressed set and decay the combo sequence. Runs after
/// every gameplay system has had its chance to read this tick's input.
pub fn age_input(time: Res<WorldTime>, mut input: ResMut<InputBuffer>) {
    input.age(time.delta);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_just_pressed_lasts_one_tick() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        world.insert_resource(InputBuffer::new());
        world.resource_mut::<WorldTime>().delta = 0.01;

        world.resource_mut::<InputBuffer>().key_down(29);
        assert!(world.resource::<InputBuffer>().is_key_just_pressed(29));

        let mut schedule = Schedule::default();
        schedule.add_systems(age_input);
        schedule.run(&mut world);
        assert!(!world.resource::<InputBuffer>().is_key_just_pressed(29));
    }
}
