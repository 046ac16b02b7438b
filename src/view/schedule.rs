// src/view/schedule.rs

use crate::graph::node::Node;

/// Day gating for the free view.
///
/// No restriction set, or an empty one, means visible every day.
pub fn day_visible(node: &Node, weekday: u8) -> bool {
    match &node.visible_days {
        None => true,
        Some(days) if days.is_empty() => true,
        Some(days) => days.contains(&weekday),
    }
}

/// Time-of-day gating for the free view.
///
/// Both bounds set and `start <= end` is the normal same-day window.
/// `start > end` spans midnight: visible late in the evening *or* early in
/// the morning. Either bound unset means always visible.
pub fn time_visible(node: &Node, minutes: u16) -> bool {
    match (node.start_time, node.end_time) {
        (Some(start), Some(end)) => {
            if start <= end {
                start <= minutes && minutes <= end
            } else {
                minutes >= start || minutes <= end
            }
        }
        _ => true,
    }
}
