//! Моральная система (Luz / Sombra)
//!
//! Глобальный ledger очков выравнивания. Победа над Espíritu Engañado даёт
//! обе стороны; alignment shift сообщается, когда сторона достигает порога.

use bevy::prelude::*;
use chrono::{DateTime, Local};

use crate::config::CombatTuning;
use crate::SimulationSet;

/// Текущее выравнивание Onikage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alignment {
    Luz,
    Sombra,
    Equilibrio,
}

impl Alignment {
    pub fn label(self) -> &'static str {
        match self {
            Alignment::Luz => "Luz",
            Alignment::Sombra => "Sombra",
            Alignment::Equilibrio => "Equilibrio",
        }
    }
}

/// Запись истории решений
#[derive(Debug, Clone, PartialEq)]
pub struct MoralEntry {
    pub kind: Alignment,
    pub points: i32,
    pub at: DateTime<Local>,
}

/// Resource: очки Luz/Sombra + история
#[derive(Resource, Debug, Clone)]
pub struct MoralLedger {
    pub luz: i32,
    pub sombra: i32,
    pub luz_threshold: i32,
    pub sombra_threshold: i32,
    history: Vec<MoralEntry>,
}

impl Default for MoralLedger {
    fn default() -> Self {
        Self::new(50, 50)
    }
}

impl MoralLedger {
    pub fn new(luz_threshold: i32, sombra_threshold: i32) -> Self {
        Self {
            luz: 0,
            sombra: 0,
            luz_threshold,
            sombra_threshold,
            history: Vec::new(),
        }
    }

    /// Добавляет Luz; Some(shift) если достигнут порог
    pub fn add_luz(&mut self, points: i32) -> Option<Alignment> {
        self.luz += points;
        crate::logger::log(&format!("⚡ Luz +{}. Total: {}", points, self.luz));
        self.record(Alignment::Luz, points);
        self.check_shift()
    }

    pub fn add_sombra(&mut self, points: i32) -> Option<Alignment> {
        self.sombra += points;
        crate::logger::log(&format!("🌑 Sombra +{}. Total: {}", points, self.sombra));
        self.record(Alignment::Sombra, points);
        self.check_shift()
    }

    fn record(&mut self, kind: Alignment, points: i32) {
        self.history.push(MoralEntry {
            kind,
            points,
            at: Local::now(),
        });
    }

    // Luz проверяется первой
    fn check_shift(&self) -> Option<Alignment> {
        let shift = if self.luz >= self.luz_threshold {
            Alignment::Luz
        } else if self.sombra >= self.sombra_threshold {
            Alignment::Sombra
        } else {
            return None;
        };
        crate::logger::log_info(&format!("☯️ Alignment shift → {}", shift.label()));
        Some(shift)
    }

    pub fn set_thresholds(&mut self, luz_threshold: i32, sombra_threshold: i32) {
        crate::logger::log(&format!(
            "⚖️ Alignment thresholds → Luz {} / Sombra {}",
            luz_threshold, sombra_threshold
        ));
        self.luz_threshold = luz_threshold;
        self.sombra_threshold = sombra_threshold;
    }

    pub fn alignment(&self) -> Alignment {
        use std::cmp::Ordering;
        match self.luz.cmp(&self.sombra) {
            Ordering::Greater => Alignment::Luz,
            Ordering::Less => Alignment::Sombra,
            Ordering::Equal => Alignment::Equilibrio,
        }
    }

    pub fn score(&self) -> i32 {
        self.luz - self.sombra
    }

    pub fn history(&self) -> &[MoralEntry] {
        &self.history
    }

    pub fn reset(&mut self) {
        self.luz = 0;
        self.sombra = 0;
        self.history.clear();
    }
}

/// System: пороги ledger следуют за `CombatTuning` (в т.ч. tuning, вставленный после сборки App)
pub fn sync_moral_thresholds(tuning: Res<CombatTuning>, mut ledger: ResMut<MoralLedger>) {
    if !tuning.is_changed() {
        return;
    }
    let moral = &tuning.moral;
    if ledger.luz_threshold != moral.luz_threshold || ledger.sombra_threshold != moral.sombra_threshold {
        ledger.set_thresholds(moral.luz_threshold, moral.sombra_threshold);
    }
}

/// Plugin: MoralLedger с порогами из CombatTuning
pub struct ProgressPlugin;

impl Plugin for ProgressPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MoralLedger>()
            .add_systems(Startup, sync_moral_thresholds)
            .add_systems(
                FixedUpdate,
                sync_moral_thresholds.in_set(SimulationSet::Timers),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_by_comparison() {
        let mut ledger = MoralLedger::default();
        assert_eq!(ledger.alignment(), Alignment::Equilibrio);

        ledger.add_luz(10);
        assert_eq!(ledger.alignment(), Alignment::Luz);
        assert_eq!(ledger.score(), 10);

        ledger.add_sombra(15);
        assert_eq!(ledger.alignment(), Alignment::Sombra);
        assert_eq!(ledger.score(), -5);
        assert_eq!(ledger.history().len(), 2);
    }

    #[test]
    fn test_shift_reported_at_threshold() {
        let mut ledger = MoralLedger::new(10, 20);
        assert_eq!(ledger.add_sombra(5), None);
        assert_eq!(ledger.add_luz(5), None);
        assert_eq!(ledger.add_luz(5), Some(Alignment::Luz));
        // Luz уже за порогом: имеет приоритет
        assert_eq!(ledger.add_sombra(20), Some(Alignment::Luz));
    }

    #[test]
    fn test_enemy_defeat_is_balanced() {
        let mut ledger = MoralLedger::default();
        for _ in 0..3 {
            ledger.add_luz(5);
            ledger.add_sombra(5);
        }
        assert_eq!((ledger.luz, ledger.sombra), (15, 15));
        assert_eq!(ledger.alignment(), Alignment::Equilibrio);
    }

    #[test]
    fn test_reset_clears_history() {
        let mut ledger = MoralLedger::default();
        ledger.add_luz(60);
        ledger.reset();
        assert_eq!(ledger.score(), 0);
        assert!(ledger.history().is_empty());
    }
}
