pub const ACTIVE_STACK_ORDER: u8 = 10;
pub const IDLE_STACK_ORDER: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Falloff {
    pub scale_step: f32,
    pub opacity_step: f32,
    pub clamp: bool,
}

impl Default for Falloff {
    fn default() -> Self {
        Self {
            scale_step: 0.15,
            opacity_step: 0.2,
            clamp: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub offset: f32,
    pub scale: f32,
    pub opacity: f32,
    pub stack_order: u8,
}

impl Placement {
    pub const CENTER: Placement = Placement {
        offset: 0.0,
        scale: 1.0,
        opacity: 1.0,
        stack_order: ACTIVE_STACK_ORDER,
    };
}

/// Circular distance from `active_index` to `index`, in `[-total/2, total/2)`.
pub fn wrapped_distance(index: usize, active_index: usize, total_items: usize) -> f32 {
    if total_items == 0 {
        return 0.0;
    }

    let total = total_items as f32;
    let half = total / 2.0;
    let diff = index as f32 - active_index as f32;

    (diff + half).rem_euclid(total) - half
}

pub fn item_transform(
    index: usize,
    active_index: usize,
    item_height: f32,
    total_items: usize,
    falloff: &Falloff,
) -> Placement {
    if total_items == 0 {
        return Placement::CENTER;
    }

    let wrapped = wrapped_distance(index, active_index, total_items);
    let distance = wrapped.abs();

    let mut scale = 1.0 - distance * falloff.scale_step;
    let mut opacity = 1.0 - distance * falloff.opacity_step;
    if falloff.clamp {
        scale = scale.max(0.0);
        opacity = opacity.max(0.0);
    }

    Placement {
        offset: wrapped * item_height,
        scale,
        opacity,
        stack_order: if wrapped == 0.0 {
            ACTIVE_STACK_ORDER
        } else {
            IDLE_STACK_ORDER
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_distance_treats_list_as_circular() {
        // Seven days: the last item sits directly above the first.
        assert_eq!(wrapped_distance(6, 0, 7), -1.0);
        assert_eq!(wrapped_distance(1, 0, 7), 1.0);
        assert_eq!(wrapped_distance(3, 0, 7), 3.0);
        assert_eq!(wrapped_distance(4, 0, 7), -3.0);
        assert_eq!(wrapped_distance(0, 6, 7), 1.0);
    }

    #[test]
    fn wrapped_distance_even_length_uses_half_open_range() {
        assert_eq!(wrapped_distance(4, 0, 8), -4.0);
        assert_eq!(wrapped_distance(3, 0, 8), 3.0);
    }

    #[test]
    fn wrapped_distance_never_exceeds_half_the_list() {
        for total in 2..=16 {
            for active in 0..total {
                for index in 0..total {
                    let wrapped = wrapped_distance(index, active, total);
                    assert!(
                        wrapped.abs() <= total as f32 / 2.0,
                        "total={total} active={active} index={index} wrapped={wrapped}"
                    );
                }
            }
        }
    }

    #[test]
    fn active_item_is_centered_and_on_top() {
        let placement = item_transform(2, 2, 80.0, 7, &Falloff::default());
        assert_eq!(placement, Placement::CENTER);
    }

    #[test]
    fn neighbours_shrink_and_fade() {
        let falloff = Falloff::default();

        let below = item_transform(1, 0, 80.0, 7, &falloff);
        assert_eq!(below.offset, 80.0);
        assert!((below.scale - 0.85).abs() < 1e-6);
        assert!((below.opacity - 0.8).abs() < 1e-6);
        assert_eq!(below.stack_order, IDLE_STACK_ORDER);

        let above = item_transform(6, 0, 80.0, 7, &falloff);
        assert_eq!(above.offset, -80.0);
        assert_eq!(above.scale, below.scale);
    }

    #[test]
    fn far_items_clamp_at_zero_when_enabled() {
        let clamped = item_transform(10, 0, 3.0, 21, &Falloff::default());
        assert_eq!(clamped.opacity, 0.0);
        assert_eq!(clamped.scale, 0.0);

        let raw = Falloff {
            clamp: false,
            ..Falloff::default()
        };
        let unclamped = item_transform(10, 0, 3.0, 21, &raw);
        assert!(unclamped.opacity < 0.0);
        assert!(unclamped.scale < 0.0);
    }

    #[test]
    fn empty_list_yields_identity_placement() {
        assert_eq!(wrapped_distance(0, 0, 0), 0.0);
        assert_eq!(
            item_transform(0, 0, 80.0, 0, &Falloff::default()),
            Placement::CENTER
        );
    }
}
