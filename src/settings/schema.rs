//! Settings data shapes.
//!
//! Every struct here is serialized camelCase into the store; the field names
//! are the wire format of existing dashboard data files and must not change.
//! All shapes default field-by-field so partially-written documents from
//! older versions still decode.

use crate::ordering::{reindex, Ordered};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identity of a dashboard widget.
///
/// Serialized as the camelCase key used in the stored layout document.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum WidgetId {
    Clock,
    Weather,
    Todos,
    Pomodoro,
    Notes,
    GoogleApps,
    AiTools,
    Quote,
    QuickLinks,
    Search,
    Music,
}

impl WidgetId {
    /// Every widget, in the default grid order.
    pub const ALL: [WidgetId; 11] = [
        WidgetId::Clock,
        WidgetId::Weather,
        WidgetId::GoogleApps,
        WidgetId::Quote,
        WidgetId::Todos,
        WidgetId::Pomodoro,
        WidgetId::Notes,
        WidgetId::AiTools,
        WidgetId::QuickLinks,
        WidgetId::Search,
        WidgetId::Music,
    ];

    /// The stored camelCase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetId::Clock => "clock",
            WidgetId::Weather => "weather",
            WidgetId::Todos => "todos",
            WidgetId::Pomodoro => "pomodoro",
            WidgetId::Notes => "notes",
            WidgetId::GoogleApps => "googleApps",
            WidgetId::AiTools => "aiTools",
            WidgetId::Quote => "quote",
            WidgetId::QuickLinks => "quickLinks",
            WidgetId::Search => "search",
            WidgetId::Music => "music",
        }
    }

    /// Parses a stored camelCase name.
    pub fn parse(name: &str) -> Option<WidgetId> {
        WidgetId::ALL.into_iter().find(|id| id.as_str() == name)
    }
}

impl std::fmt::Display for WidgetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visibility and grid position of one widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetLayoutEntry {
    /// Whether the widget is rendered at all.
    pub visible: bool,
    /// Position in the grid; dense 0..N-1 across the whole layout.
    pub order: usize,
}

impl Default for WidgetLayoutEntry {
    fn default() -> Self {
        Self {
            visible: true,
            order: 0,
        }
    }
}

/// The whole widget grid: one entry per widget.
///
/// Stored under the `widgetLayout` key. Orders are expected to form a dense
/// 0..N-1 permutation; [`WidgetLayout::normalize`] repairs layouts where a
/// raw swap or an older writer left duplicates or gaps behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetLayout {
    entries: BTreeMap<WidgetId, WidgetLayoutEntry>,
}

impl Default for WidgetLayout {
    fn default() -> Self {
        let entries = WidgetId::ALL
            .into_iter()
            .enumerate()
            .map(|(order, id)| (id, WidgetLayoutEntry { visible: true, order }))
            .collect();
        Self { entries }
    }
}

/// Pair used when reordering layout entries through the shared splice.
struct LayoutSlot {
    id: WidgetId,
    name: &'static str,
    order: usize,
}

impl Ordered for LayoutSlot {
    fn id(&self) -> &str {
        self.name
    }
    fn order(&self) -> usize {
        self.order
    }
    fn set_order(&mut self, order: usize) {
        self.order = order;
    }
}

impl WidgetLayout {
    /// The entry for `id`, if the stored layout mentions it.
    pub fn entry(&self, id: WidgetId) -> Option<WidgetLayoutEntry> {
        self.entries.get(&id).copied()
    }

    /// Number of widgets the layout mentions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the layout mentions no widgets at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Widgets with `visible == true`, sorted by order (ties break by the
    /// widget's stored name so the result is deterministic).
    pub fn visible_in_order(&self) -> Vec<WidgetId> {
        let mut visible: Vec<(WidgetId, usize)> = self
            .entries
            .iter()
            .filter(|(_, e)| e.visible)
            .map(|(id, e)| (*id, e.order))
            .collect();
        visible.sort_by_key(|(id, order)| (*order, id.as_str()));
        visible.into_iter().map(|(id, _)| id).collect()
    }

    /// Shows or hides one widget. Orders are untouched, so hiding and
    /// re-showing a widget returns it to its old position.
    pub fn set_visible(&mut self, id: WidgetId, visible: bool) {
        self.entries.entry(id).or_default().visible = visible;
    }

    /// Exchanges the order values of exactly two widgets.
    ///
    /// This is the legacy drop gesture: no other entry is touched, and a
    /// layout whose orders were not a permutation stays un-repaired. Returns
    /// `false` when either widget is absent or `a == b`.
    pub fn swap_orders(&mut self, a: WidgetId, b: WidgetId) -> bool {
        if a == b || !self.entries.contains_key(&a) || !self.entries.contains_key(&b) {
            return false;
        }
        let order_a = self.entries[&a].order;
        let order_b = self.entries[&b].order;
        if let Some(entry) = self.entries.get_mut(&a) {
            entry.order = order_b;
        }
        if let Some(entry) = self.entries.get_mut(&b) {
            entry.order = order_a;
        }
        true
    }

    /// Moves `dragged` immediately before `target` and re-densifies every
    /// order, the same splice every item list uses. Returns `false` when
    /// either widget is absent or `dragged == target`.
    pub fn move_widget(&mut self, dragged: WidgetId, target: WidgetId) -> bool {
        let mut slots: Vec<LayoutSlot> = self
            .entries
            .iter()
            .map(|(id, e)| LayoutSlot {
                id: *id,
                name: id.as_str(),
                order: e.order,
            })
            .collect();
        slots.sort_by_key(|s| (s.order, s.name));
        reindex(&mut slots);

        let changed =
            crate::ordering::splice_reorder(&mut slots, dragged.as_str(), target.as_str());
        for slot in &slots {
            if let Some(entry) = self.entries.get_mut(&slot.id) {
                entry.order = slot.order;
            }
        }
        changed
    }

    /// Re-densifies the orders to exactly 0..N-1.
    ///
    /// Entries keep their relative order; duplicates break ties by the
    /// widget's stored name.
    pub fn normalize(&mut self) {
        let mut slots: Vec<LayoutSlot> = self
            .entries
            .iter()
            .map(|(id, e)| LayoutSlot {
                id: *id,
                name: id.as_str(),
                order: e.order,
            })
            .collect();
        slots.sort_by_key(|s| (s.order, s.name));
        reindex(&mut slots);
        for slot in slots {
            if let Some(entry) = self.entries.get_mut(&slot.id) {
                entry.order = slot.order;
            }
        }
    }
}

/// Clock face selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockFace {
    Digital,
    Analog,
}

/// Clock widget settings, stored under `clockSettings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClockSettings {
    pub use_24_hour: bool,
    pub clock_type: ClockFace,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            use_24_hour: true,
            clock_type: ClockFace::Digital,
        }
    }
}

/// Pomodoro durations and sound flag, stored under `pomodoroSettings`.
/// Durations are minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PomodoroSettings {
    pub work_duration: u32,
    pub break_duration: u32,
    pub long_break_duration: u32,
    pub sessions_until_long_break: u32,
    pub sound_enabled: bool,
}

impl Default for PomodoroSettings {
    fn default() -> Self {
        Self {
            work_duration: 25,
            break_duration: 5,
            long_break_duration: 15,
            sessions_until_long_break: 4,
            sound_enabled: true,
        }
    }
}

/// Pomodoro completion counters, stored under `pomodoroStats`.
///
/// `last_session_date` is a `%Y-%m-%d` day string; `today_sessions` resets
/// when a session completes on a different day.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PomodoroStats {
    pub total_sessions: u64,
    pub today_sessions: u64,
    pub last_session_date: Option<String>,
}

/// Background rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKind {
    Solid,
    Gradient,
    Unsplash,
}

/// Background settings, stored under `backgroundSettings`.
///
/// The image URL fields remember the last daily picture so it only rotates
/// once per day. No fetching happens in this crate; only the URL state is
/// managed here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackgroundSettings {
    #[serde(rename = "type")]
    pub kind: BackgroundKind,
    pub solid_color: String,
    pub gradient_start: String,
    pub gradient_end: String,
    pub gradient_angle: u16,
    pub blur: u32,
    pub opacity: u8,
    pub unsplash_query: String,
    pub last_unsplash_url: Option<String>,
    pub last_unsplash_date: Option<String>,
}

impl Default for BackgroundSettings {
    fn default() -> Self {
        Self {
            kind: BackgroundKind::Gradient,
            solid_color: String::from("#1a1a2e"),
            gradient_start: String::from("#0f0c29"),
            gradient_end: String::from("#302b63"),
            gradient_angle: 135,
            blur: 0,
            opacity: 100,
            unsplash_query: String::from("nature,landscape"),
            last_unsplash_url: None,
            last_unsplash_date: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_layout_is_dense_and_all_visible() {
        let layout = WidgetLayout::default();
        let visible = layout.visible_in_order();
        assert_eq!(visible.len(), WidgetId::ALL.len());
        assert_eq!(visible, WidgetId::ALL.to_vec());
    }

    #[test]
    fn swap_orders_touches_only_the_two_entries() {
        // Drag clock onto weather: the two order values exchange and nothing
        // else in the layout moves.
        let mut layout = WidgetLayout::default();
        let before_todos = layout.entry(WidgetId::Todos).unwrap();

        assert!(layout.swap_orders(WidgetId::Clock, WidgetId::Weather));

        assert_eq!(layout.entry(WidgetId::Clock).unwrap().order, 1);
        assert_eq!(layout.entry(WidgetId::Weather).unwrap().order, 0);
        assert_eq!(layout.entry(WidgetId::Todos).unwrap(), before_todos);
    }

    #[test]
    fn swap_orders_with_self_or_absent_widget_is_noop() {
        let mut layout: WidgetLayout = serde_json::from_value(json!({
            "clock": {"visible": true, "order": 0},
        }))
        .unwrap();
        assert!(!layout.swap_orders(WidgetId::Clock, WidgetId::Clock));
        assert!(!layout.swap_orders(WidgetId::Clock, WidgetId::Weather));
        assert_eq!(layout.entry(WidgetId::Clock).unwrap().order, 0);
    }

    #[test]
    fn move_widget_densifies_orders() {
        let mut layout = WidgetLayout::default();
        assert!(layout.move_widget(WidgetId::Pomodoro, WidgetId::Weather));

        let in_order = layout.visible_in_order();
        assert_eq!(in_order[0], WidgetId::Clock);
        assert_eq!(in_order[1], WidgetId::Pomodoro);
        assert_eq!(in_order[2], WidgetId::Weather);

        let mut orders: Vec<usize> = WidgetId::ALL
            .into_iter()
            .map(|id| layout.entry(id).unwrap().order)
            .collect();
        orders.sort();
        assert_eq!(orders, (0..WidgetId::ALL.len()).collect::<Vec<_>>());
    }

    #[test]
    fn hiding_keeps_order_for_later_reshow() {
        let mut layout = WidgetLayout::default();
        let order = layout.entry(WidgetId::Quote).unwrap().order;

        layout.set_visible(WidgetId::Quote, false);
        assert!(!layout.visible_in_order().contains(&WidgetId::Quote));

        layout.set_visible(WidgetId::Quote, true);
        assert_eq!(layout.entry(WidgetId::Quote).unwrap().order, order);
    }

    #[test]
    fn normalize_repairs_duplicate_orders() {
        let mut layout: WidgetLayout = serde_json::from_value(json!({
            "clock": {"visible": true, "order": 2},
            "weather": {"visible": true, "order": 2},
            "todos": {"visible": false, "order": 7},
        }))
        .unwrap();

        layout.normalize();

        // Duplicates break by stored name: "clock" < "weather".
        assert_eq!(layout.entry(WidgetId::Clock).unwrap().order, 0);
        assert_eq!(layout.entry(WidgetId::Weather).unwrap().order, 1);
        assert_eq!(layout.entry(WidgetId::Todos).unwrap().order, 2);
        assert!(!layout.entry(WidgetId::Todos).unwrap().visible);
    }

    #[test]
    fn layout_round_trips_through_stored_json() {
        let layout = WidgetLayout::default();
        let json = serde_json::to_value(&layout).unwrap();
        assert!(json.get("googleApps").is_some(), "camelCase keys expected");
        let back: WidgetLayout = serde_json::from_value(json).unwrap();
        assert_eq!(back, layout);
    }

    #[test]
    fn clock_settings_use_wire_field_names() {
        let json = serde_json::to_value(ClockSettings::default()).unwrap();
        assert_eq!(json, json!({"use24Hour": true, "clockType": "digital"}));
    }

    #[test]
    fn background_settings_default_decodes_from_empty_document() {
        let settings: BackgroundSettings = serde_json::from_value(json!({})).unwrap();
        assert_eq!(settings, BackgroundSettings::default());
        assert_eq!(
            serde_json::to_value(&settings).unwrap()["type"],
            json!("gradient")
        );
    }

    #[test]
    fn pomodoro_settings_defaults() {
        let settings = PomodoroSettings::default();
        assert_eq!(settings.work_duration, 25);
        assert_eq!(settings.break_duration, 5);
        assert_eq!(settings.long_break_duration, 15);
        assert_eq!(settings.sessions_until_long_break, 4);
    }
}
