//! Panel visual timeline
//!
//! The timeline mirrors the selection set with a per-panel animation phase.
//! Opening is a strict two-phase sequence: the container animates in, and
//! only on completion does the heavier embedded preview mount, so the
//! preview never competes with the entrance for the frame budget and never
//! pops in mid-animation. Closing runs the exit to completion before the
//! panel leaves the visual list, even though the id has already left the
//! selection set.

use bevy::prelude::*;

use crate::catalog::BodyId;
use crate::selection::SelectionSet;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PanelPhase {
    /// Container entrance animation in flight.
    Entering,
    /// Fully open; the preview content is mounted.
    Open,
    /// Exit animation in flight; the id has already left the selection set.
    Exiting,
}

/// One panel's visual state.
#[derive(Copy, Clone, Debug)]
pub struct PanelVisual {
    pub id: BodyId,
    pub anchor: Vec2,
    pub phase: PanelPhase,
    /// 0 = fully closed, 1 = fully open. Interpolated, never reset on
    /// cancellation.
    pub progress: f32,
    /// Set exactly once, when the entrance completes.
    pub preview_mounted: bool,
}

/// Visual rendering list for open (and still-exiting) panels.
#[derive(Resource, Default, Debug)]
pub struct PanelTimeline {
    panels: Vec<PanelVisual>,
}

impl PanelTimeline {
    /// Diff against current selection membership. New ids start entering at
    /// progress 0; ids that left flip to `Exiting` from their current
    /// progress (an in-flight entrance is cancelled, not queued behind).
    /// An id re-selected while exiting resumes entering from where it is,
    /// re-anchored at the new selection's coordinate.
    pub fn sync(&mut self, selection: &SelectionSet) {
        for panel in self.panels.iter_mut() {
            let entry = selection.iter().find(|e| e.id == panel.id);
            match panel.phase {
                PanelPhase::Entering | PanelPhase::Open if entry.is_none() => {
                    panel.phase = PanelPhase::Exiting;
                }
                PanelPhase::Exiting => {
                    if let Some(entry) = entry {
                        panel.phase = PanelPhase::Entering;
                        panel.anchor = entry.anchor;
                    }
                }
                _ => {}
            }
        }
        for entry in selection.iter() {
            if !self.panels.iter().any(|p| p.id == entry.id) {
                self.panels.push(PanelVisual {
                    id: entry.id,
                    anchor: entry.anchor,
                    phase: PanelPhase::Entering,
                    progress: 0.0,
                    preview_mounted: false,
                });
            }
        }
    }

    /// Advance animation progress by one frame and retire panels whose exit
    /// finished. Returns the retired ids.
    pub fn advance(&mut self, dt: f32, enter_rate: f32, exit_rate: f32) -> Vec<BodyId> {
        for panel in self.panels.iter_mut() {
            match panel.phase {
                PanelPhase::Entering => {
                    panel.progress = (panel.progress + enter_rate * dt).min(1.0);
                    if panel.progress >= 1.0 {
                        panel.phase = PanelPhase::Open;
                        panel.preview_mounted = true;
                    }
                }
                PanelPhase::Open => {}
                PanelPhase::Exiting => {
                    panel.progress = (panel.progress - exit_rate * dt).max(0.0);
                }
            }
        }

        let mut retired = Vec::new();
        self.panels.retain(|p| {
            let done = p.phase == PanelPhase::Exiting && p.progress <= 0.0;
            if done {
                retired.push(p.id);
            }
            !done
        });
        retired
    }

    pub fn get(&self, id: BodyId) -> Option<&PanelVisual> {
        self.panels.iter().find(|p| p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PanelVisual> {
        self.panels.iter()
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }
}
