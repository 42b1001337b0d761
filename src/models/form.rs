// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout input form state.

use crate::models::workout::KindTag;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Form inputs that can hold focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum FormField {
    Distance,
    Duration,
    Cadence,
    Elevation,
}

/// Raw values as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutSubmission {
    #[serde(default)]
    pub kind: KindTag,
    #[serde(default)]
    pub distance: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub cadence: String,
    #[serde(default)]
    pub elevation: String,
}

/// Visible state of the workout form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutForm {
    pub hidden: bool,
    pub selected_kind: KindTag,
    /// Which variant-specific row is shown (cadence or elevation).
    pub visible_field: FormField,
    pub focused: Option<FormField>,
    pub values: WorkoutSubmission,
}

impl Default for WorkoutForm {
    fn default() -> Self {
        Self {
            hidden: true,
            selected_kind: KindTag::Running,
            visible_field: FormField::Cadence,
            focused: None,
            values: WorkoutSubmission::default(),
        }
    }
}

impl WorkoutForm {
    /// Reveal the form with the distance input focused.
    pub fn show(&mut self) {
        self.hidden = false;
        self.focused = Some(FormField::Distance);
    }

    /// Clear all inputs and hide the form.
    pub fn hide(&mut self) {
        self.values = WorkoutSubmission {
            kind: self.selected_kind,
            ..WorkoutSubmission::default()
        };
        self.hidden = true;
        self.focused = None;
    }

    /// Swap between the cadence and elevation rows.
    pub fn toggle_variant_field(&mut self) {
        self.select_kind(self.selected_kind.toggled());
    }

    pub fn select_kind(&mut self, kind: KindTag) {
        self.selected_kind = kind;
        self.values.kind = kind;
        self.visible_field = match kind {
            KindTag::Running => FormField::Cadence,
            KindTag::Cycling => FormField::Elevation,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_starts_hidden() {
        let form = WorkoutForm::default();
        assert!(form.hidden);
        assert_eq!(form.visible_field, FormField::Cadence);
        assert_eq!(form.focused, None);
    }

    #[test]
    fn test_show_focuses_distance() {
        let mut form = WorkoutForm::default();
        form.show();
        assert!(!form.hidden);
        assert_eq!(form.focused, Some(FormField::Distance));
    }

    #[test]
    fn test_hide_clears_inputs_and_keeps_kind() {
        let mut form = WorkoutForm::default();
        form.select_kind(KindTag::Cycling);
        form.show();
        form.values.distance = "12".to_string();
        form.values.elevation = "300".to_string();

        form.hide();

        assert!(form.hidden);
        assert_eq!(form.values.distance, "");
        assert_eq!(form.values.elevation, "");
        assert_eq!(form.values.kind, KindTag::Cycling);
        assert_eq!(form.selected_kind, KindTag::Cycling);
    }

    #[test]
    fn test_toggle_swaps_rows() {
        let mut form = WorkoutForm::default();
        form.toggle_variant_field();
        assert_eq!(form.selected_kind, KindTag::Cycling);
        assert_eq!(form.visible_field, FormField::Elevation);

        form.toggle_variant_field();
        assert_eq!(form.selected_kind, KindTag::Running);
        assert_eq!(form.visible_field, FormField::Cadence);
    }
}
