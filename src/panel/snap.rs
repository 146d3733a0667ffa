//! Release snapping policy
//!
//! Decides where the sheet settles once the finger lifts. Rules are checked
//! in order and the first match wins; velocity dominates decisive flicks and
//! position breaks the tie for slow releases.
//!
//! | # | Rule | Condition | Target |
//! |---|------|-----------|--------|
//! | 1 | `dismiss` | `v > 1.2` or `y > D * 0.5` | Hidden |
//! | 2 | `flick_up` | `v < -0.5` | Expanded |
//! | 3 | `flick_down` | `v > 0.5` | Collapsed |
//! | 4 | `dragged_up` | `y < -D / 2` | Expanded |
//! | 5 | `dragged_down` | `y > D * 0.3` | Hidden |
//! | 6 | `rest` | always | Collapsed |
//!
//! Rules 4-6 only see slow releases (`-0.5 <= v <= 0.5`) because 1-3 claim
//! everything faster. The 0.3 / 0.5 asymmetry is kept as shipped.

use super::PanelState;

/// Downward velocity that always dismisses
pub const DISMISS_VELOCITY: f32 = 1.2;
/// Fraction of the drag distance past which any release dismisses
pub const DISMISS_RATIO: f32 = 0.5;
/// Upward velocity that expands
pub const FLICK_UP_VELOCITY: f32 = -0.5;
/// Downward velocity that collapses
pub const FLICK_DOWN_VELOCITY: f32 = 0.5;
/// Fraction of the drag distance a slow release must pass upward to expand
pub const SLOW_EXPAND_RATIO: f32 = 0.5;
/// Fraction of the drag distance a slow release must pass downward to hide
pub const SLOW_HIDE_RATIO: f32 = 0.3;

/// Release inputs seen by every rule
#[derive(Debug, Clone, Copy)]
pub struct Release {
    pub current_y: f32,
    pub velocity_y: f32,
    pub drag_distance: f32,
}

/// One row of the policy table
pub struct SnapRule {
    pub name: &'static str,
    pub matches: fn(&Release) -> bool,
    pub target: PanelState,
}

impl std::fmt::Debug for SnapRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapRule")
            .field("name", &self.name)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

/// Ordered policy table, first match wins
pub const RULES: &[SnapRule] = &[
    SnapRule {
        name: "dismiss",
        matches: |r| {
            r.velocity_y > DISMISS_VELOCITY || r.current_y > r.drag_distance * DISMISS_RATIO
        },
        target: PanelState::Hidden,
    },
    SnapRule {
        name: "flick_up",
        matches: |r| r.velocity_y < FLICK_UP_VELOCITY,
        target: PanelState::Expanded,
    },
    SnapRule {
        name: "flick_down",
        matches: |r| r.velocity_y > FLICK_DOWN_VELOCITY,
        target: PanelState::Collapsed,
    },
    SnapRule {
        name: "dragged_up",
        matches: |r| r.current_y < -(r.drag_distance * SLOW_EXPAND_RATIO),
        target: PanelState::Expanded,
    },
    SnapRule {
        name: "dragged_down",
        matches: |r| r.current_y > r.drag_distance * SLOW_HIDE_RATIO,
        target: PanelState::Hidden,
    },
    SnapRule {
        name: "rest",
        matches: |_| true,
        target: PanelState::Collapsed,
    },
];

/// Outcome of a release
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapDecision {
    pub target: PanelState,
    pub target_y: f32,
    pub will_be_expanded: bool,
    pub should_hide: bool,
    /// Name of the rule that fired
    pub rule: &'static str,
}

/// Pick the resting state for a release at `current_y` moving at `velocity_y`
pub fn decide(current_y: f32, velocity_y: f32, drag_distance: f32) -> SnapDecision {
    let release = Release {
        current_y,
        velocity_y,
        drag_distance,
    };

    // The last rule always matches
    let rule = RULES
        .iter()
        .find(|rule| (rule.matches)(&release))
        .unwrap_or(&RULES[RULES.len() - 1]);

    SnapDecision {
        target: rule.target,
        target_y: rule.target.offset(drag_distance),
        will_be_expanded: rule.target == PanelState::Expanded,
        should_hide: rule.target == PanelState::Hidden,
        rule: rule.name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fast_downward_flick_always_hides() {
        for d in [1.0_f32, 150.0, 300.0, 1200.0] {
            for v in [1.21_f32, 1.5, 3.0, 50.0] {
                for y in [-d, -d / 2.0, 0.0, d * 0.3, d] {
                    let decision = decide(y, v, d);
                    assert_eq!(decision.target, PanelState::Hidden, "y={} v={} d={}", y, v, d);
                    assert!(decision.should_hide);
                    assert!(!decision.will_be_expanded);
                    assert_eq!(decision.target_y, d);
                }
            }
        }
    }

    #[test]
    fn test_slow_release_scenarios() {
        let hide = decide(200.0, 0.0, 300.0);
        assert_eq!(hide.target, PanelState::Hidden);
        assert_eq!(hide.rule, "dismiss");

        let expand = decide(-160.0, 0.0, 300.0);
        assert_eq!(expand.target, PanelState::Expanded);
        assert_eq!(expand.target_y, -300.0);
        assert!(expand.will_be_expanded);

        let rest = decide(50.0, 0.0, 300.0);
        assert_eq!(rest.target, PanelState::Collapsed);
        assert_eq!(rest.target_y, 0.0);
        assert!(!rest.should_hide);
    }

    #[test]
    fn test_hide_line_is_exclusive() {
        let d = 300.0_f32;
        let on_line = d * SLOW_HIDE_RATIO;

        for v in [-0.5_f32, 0.0, 0.5] {
            assert_eq!(decide(on_line, v, d).target, PanelState::Collapsed);
        }
        assert_eq!(decide(on_line + 1.0, 0.0, d).target, PanelState::Hidden);
        assert_eq!(decide(on_line + 1.0, 0.0, d).rule, "dragged_down");
    }

    #[test]
    fn test_velocity_beats_position() {
        // Dragged far up, but flicked down
        let decision = decide(-250.0, 0.8, 300.0);
        assert_eq!(decision.target, PanelState::Collapsed);
        assert_eq!(decision.rule, "flick_down");

        // Dragged down past the hide line, but flicked up
        let decision = decide(120.0, -0.9, 300.0);
        assert_eq!(decision.target, PanelState::Expanded);
    }

    #[test]
    fn test_midpoint_dismisses_despite_upward_flick() {
        let decision = decide(151.0, -2.0, 300.0);
        assert_eq!(decision.target, PanelState::Hidden);
    }

    #[test]
    fn test_rule_table_ends_with_catch_all() {
        let last = RULES.last().unwrap();
        assert_eq!(last.target, PanelState::Collapsed);
        assert!((last.matches)(&Release {
            current_y: f32::NAN,
            velocity_y: f32::NAN,
            drag_distance: 0.0,
        }));
    }
}
