//! Sanity checks for motion tuning. Nothing here is fatal.

use super::loader::MotionConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigIssue {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

macro_rules! check {
    ($issues:expr, $cond:expr, $field:expr, $($arg:tt)*) => {
        if !$cond {
            $issues.push(ConfigIssue {
                field: $field,
                message: format!($($arg)*),
            });
        }
    };
}

/// Returns every problem found, empty when the tuning looks sane.
pub fn validate_config(config: &MotionConfig) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();
    let params = &config.parameters;
    let collider = &config.collider;

    check!(
        issues,
        params.time_to_jump_apex > 0.0,
        "parameters.time_to_jump_apex",
        "must be positive, got {}",
        params.time_to_jump_apex
    );
    check!(
        issues,
        params.max_jump_height > 0.0,
        "parameters.max_jump_height",
        "must be positive, got {}",
        params.max_jump_height
    );
    check!(
        issues,
        params.min_jump_height <= params.max_jump_height,
        "parameters.min_jump_height",
        "{} is above max_jump_height {}",
        params.min_jump_height,
        params.max_jump_height
    );
    check!(
        issues,
        !params.jump_sources.is_empty(),
        "parameters.jump_sources",
        "no jump source enabled, the actor can never jump"
    );
    check!(
        issues,
        params.min_gravity < 0.0,
        "parameters.min_gravity",
        "terminal fall speed should be negative, got {}",
        params.min_gravity
    );
    check!(
        issues,
        params.life_points > 0,
        "parameters.life_points",
        "must be at least 1"
    );
    check!(
        issues,
        collider.dst_between_rays > 0.0,
        "collider.dst_between_rays",
        "must be positive, got {}",
        collider.dst_between_rays
    );

    let half_min = config.actor_size.min_element() / 2.0;
    check!(
        issues,
        collider.skin_width < half_min,
        "collider.skin_width",
        "{} is not smaller than half the actor box ({})",
        collider.skin_width,
        half_min
    );
    check!(
        issues,
        (0.0..90.0).contains(&collider.max_slope_angle),
        "collider.max_slope_angle",
        "expected degrees in [0, 90), got {}",
        collider.max_slope_angle
    );

    issues
}
