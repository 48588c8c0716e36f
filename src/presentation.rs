//! Display attributes for habits, kept apart from the model.

use crate::habit::Priority;

/// Shown next to recurring habits.
pub const RECURRING_ICON: &str = "🔁";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityStyle {
    pub label: &'static str,
    pub icon_name: &'static str,
    pub css_class: &'static str,
}

pub fn priority_style(priority: Priority) -> PriorityStyle {
    match priority {
        Priority::High => PriorityStyle {
            label: "High",
            icon_name: "dialog-warning-symbolic",
            css_class: "priority-high",
        },
        Priority::Medium => PriorityStyle {
            label: "Medium",
            icon_name: "dialog-information-symbolic",
            css_class: "priority-medium",
        },
        Priority::Low => PriorityStyle {
            label: "Low",
            icon_name: "list-remove-symbolic",
            css_class: "priority-low",
        },
    }
}

pub fn streak_badge(streak: u32) -> String {
    format!("🔥 {}", streak)
}
