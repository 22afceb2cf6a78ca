use super::transform::Placement;

const MAX_STEP_SECONDS: f32 = 1.0 / 120.0;
const REST_EPSILON: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl Default for Spring {
    fn default() -> Self {
        Self {
            stiffness: 300.0,
            damping: 30.0,
            mass: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringValue {
    pub position: f32,
    pub velocity: f32,
}

impl SpringValue {
    pub fn at(position: f32) -> Self {
        Self {
            position,
            velocity: 0.0,
        }
    }

    /// Advance toward `target` by `dt` seconds. Returns true once at rest.
    pub fn step(&mut self, spring: &Spring, target: f32, dt: f32) -> bool {
        let mass = spring.mass.max(f32::EPSILON);
        let mut remaining = dt.max(0.0);

        while remaining > 0.0 {
            let h = remaining.min(MAX_STEP_SECONDS);
            let displacement = self.position - target;
            let force = -spring.stiffness * displacement - spring.damping * self.velocity;
            self.velocity += force / mass * h;
            self.position += self.velocity * h;
            remaining -= h;
        }

        let settled = (self.position - target).abs() < REST_EPSILON
            && self.velocity.abs() < REST_EPSILON;
        if settled {
            self.position = target;
            self.velocity = 0.0;
        }
        settled
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedPlacement {
    offset: SpringValue,
    scale: SpringValue,
    opacity: SpringValue,
    stack_order: u8,
}

impl AnimatedPlacement {
    pub fn new(initial: Placement) -> Self {
        Self {
            offset: SpringValue::at(initial.offset),
            scale: SpringValue::at(initial.scale),
            opacity: SpringValue::at(initial.opacity),
            stack_order: initial.stack_order,
        }
    }

    pub fn current(&self) -> Placement {
        Placement {
            offset: self.offset.position,
            scale: self.scale.position,
            opacity: self.opacity.position,
            stack_order: self.stack_order,
        }
    }

    pub fn step(&mut self, spring: &Spring, target: Placement, dt: f32) -> bool {
        self.stack_order = target.stack_order;
        let offset = self.offset.step(spring, target.offset, dt);
        let scale = self.scale.step(spring, target.scale, dt);
        let opacity = self.opacity.step(spring, target.opacity, dt);
        offset && scale && opacity
    }

    pub fn snap(&mut self, target: Placement) {
        *self = Self::new(target);
    }

    pub fn shift(&mut self, delta: f32) {
        self.offset.position += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converges_to_target() {
        let spring = Spring::default();
        let mut value = SpringValue::at(0.0);

        let mut settled = false;
        for _ in 0..200 {
            if value.step(&spring, 80.0, 1.0 / 60.0) {
                settled = true;
                break;
            }
        }

        assert!(settled);
        assert_eq!(value.position, 80.0);
        assert_eq!(value.velocity, 0.0);
    }

    #[test]
    fn large_frame_is_substepped() {
        let spring = Spring::default();
        let mut value = SpringValue::at(0.0);
        value.step(&spring, 10.0, 2.0);
        assert!((value.position - 10.0).abs() < 0.5);
    }

    #[test]
    fn placement_moves_toward_target_and_snaps_stack_order() {
        let spring = Spring::default();
        let start = Placement {
            offset: 3.0,
            scale: 0.85,
            opacity: 0.8,
            stack_order: 1,
        };
        let mut animated = AnimatedPlacement::new(start);

        animated.step(&spring, Placement::CENTER, 1.0 / 60.0);
        let current = animated.current();
        assert!(current.offset < 3.0 && current.offset > 0.0);
        assert_eq!(current.stack_order, Placement::CENTER.stack_order);

        animated.snap(Placement::CENTER);
        assert_eq!(animated.current(), Placement::CENTER);
    }
}
