//! World компоненты: obstacle grid, разрушаемые препятствия, kill gates

use std::collections::HashSet;

use bevy::prelude::*;

/// Радиус пробы проходимости (player step / knockback)
pub const WALKABLE_PROBE_RADIUS: f32 = 0.2;

/// Сетка непроходимых клеток (стены, препятствия, закрытые ворота).
///
/// Клетка `c` занимает квадрат со стороной `cell_size` с центром в `c * cell_size`.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ObstacleMask {
    pub cell_size: f32,
    solid: HashSet<IVec2>,
}

impl Default for ObstacleMask {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl ObstacleMask {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            solid: HashSet::new(),
        }
    }

    pub fn cell_of(&self, position: Vec2) -> IVec2 {
        (position / self.cell_size).round().as_ivec2()
    }

    pub fn cell_center(&self, cell: IVec2) -> Vec2 {
        cell.as_vec2() * self.cell_size
    }

    pub fn block(&mut self, cell: IVec2) {
        self.solid.insert(cell);
    }

    pub fn unblock(&mut self, cell: IVec2) {
        self.solid.remove(&cell);
    }

    pub fn is_solid(&self, cell: IVec2) -> bool {
        self.solid.contains(&cell)
    }

    /// Свободна ли точка: проба радиуса 0.2 не пересекает ни одной solid клетки
    pub fn is_walkable(&self, position: Vec2) -> bool {
        let center_cell = self.cell_of(position);
        let half = self.cell_size * 0.5;

        for dx in -1..=1 {
            for dy in -1..=1 {
                let cell = center_cell + IVec2::new(dx, dy);
                if !self.solid.contains(&cell) {
                    continue;
                }
                let center = self.cell_center(cell);
                let closest = position.clamp(center - Vec2::splat(half), center + Vec2::splat(half));
                if closest.distance_squared(position) < WALKABLE_PROBE_RADIUS * WALKABLE_PROBE_RADIUS {
                    return false;
                }
            }
        }

        true
    }
}

/// Возможный дроп с разрушенного препятствия
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct ItemDrop {
    pub item: String,
    /// Вероятность 0..=1
    pub chance: f32,
}

/// Результат удара по препятствию
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakOutcome {
    /// Уже разрушено
    Ignored,
    Cracked,
    Broken,
}

/// Разрушаемое препятствие (бочки, ящики, бамбук)
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Breakable {
    pub hits_required: u32,
    pub hits: u32,
    pub broken: bool,
    /// None: не восстанавливается
    pub respawn_after: Option<f32>,
    pub respawn_timer: f32,
    pub drops: Vec<ItemDrop>,
    /// Клетки ObstacleMask, занятые препятствием пока оно целое
    pub cells: Vec<IVec2>,
}

impl Breakable {
    pub fn new(hits_required: u32, cells: Vec<IVec2>) -> Self {
        Self {
            hits_required: hits_required.max(1),
            hits: 0,
            broken: false,
            respawn_after: None,
            respawn_timer: 0.0,
            drops: Vec::new(),
            cells,
        }
    }

    pub fn with_respawn(mut self, seconds: f32) -> Self {
        self.respawn_after = Some(seconds);
        self
    }

    pub fn with_drop(mut self, item: impl Into<String>, chance: f32) -> Self {
        self.drops.push(ItemDrop {
            item: item.into(),
            chance: chance.clamp(0.0, 1.0),
        });
        self
    }

    pub fn hit(&mut self) -> BreakOutcome {
        if self.broken {
            return BreakOutcome::Ignored;
        }

        self.hits += 1;
        if self.hits >= self.hits_required {
            self.broken = true;
            self.respawn_timer = self.respawn_after.unwrap_or(0.0);
            BreakOutcome::Broken
        } else {
            BreakOutcome::Cracked
        }
    }

    /// Тик respawn таймера; true когда препятствие восстановилось
    pub fn tick_respawn(&mut self, delta: f32) -> bool {
        if !self.broken || self.respawn_after.is_none() {
            return false;
        }

        self.respawn_timer -= delta;
        if self.respawn_timer <= 0.0 {
            self.broken = false;
            self.hits = 0;
            self.respawn_timer = 0.0;
            return true;
        }
        false
    }
}

/// Ворота, которые открываются после N убийств игрока
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct KillGate {
    pub threshold: u32,
    pub open: bool,
    pub cells: Vec<IVec2>,
}

impl KillGate {
    pub fn new(threshold: u32, cells: Vec<IVec2>) -> Self {
        Self {
            threshold,
            open: false,
            cells,
        }
    }

    pub fn should_open(&self, kills: u32) -> bool {
        !self.open && kills >= self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_mask_is_walkable() {
        let mask = ObstacleMask::default();
        assert!(mask.is_walkable(Vec2::new(3.7, -12.2)));
    }

    #[test]
    fn test_probe_hits_neighbouring_cell() {
        let mut mask = ObstacleMask::default();
        mask.block(IVec2::new(1, 0));

        // Клетка (1,0) занимает x ∈ [0.5, 1.5]
        assert!(!mask.is_walkable(Vec2::new(1.0, 0.0)));
        assert!(!mask.is_walkable(Vec2::new(0.35, 0.0)));
        assert!(mask.is_walkable(Vec2::new(0.25, 0.0)));
        assert!(mask.is_walkable(Vec2::ZERO));
    }

    #[test]
    fn test_unblock_restores_walkability() {
        let mut mask = ObstacleMask::default();
        mask.block(IVec2::new(0, 2));
        assert!(!mask.is_walkable(Vec2::new(0.0, 2.0)));

        mask.unblock(IVec2::new(0, 2));
        assert!(mask.is_walkable(Vec2::new(0.0, 2.0)));
    }

    #[test]
    fn test_breakable_needs_all_hits() {
        let mut barrel = Breakable::new(2, vec![IVec2::ZERO]);
        assert_eq!(barrel.hit(), BreakOutcome::Cracked);
        assert_eq!(barrel.hit(), BreakOutcome::Broken);
        assert_eq!(barrel.hit(), BreakOutcome::Ignored);
        assert!(barrel.broken);
    }

    #[test]
    fn test_breakable_respawn() {
        let mut crate_ = Breakable::new(1, vec![]).with_respawn(1.0);
        crate_.hit();

        assert!(!crate_.tick_respawn(0.6));
        assert!(crate_.tick_respawn(0.6));
        assert!(!crate_.broken);
        assert_eq!(crate_.hits, 0);
    }

    #[test]
    fn test_breakable_without_respawn_stays_broken() {
        let mut bamboo = Breakable::new(1, vec![]);
        bamboo.hit();
        assert!(!bamboo.tick_respawn(100.0));
        assert!(bamboo.broken);
    }

    #[test]
    fn test_kill_gate_threshold() {
        let mut gate = KillGate::new(3, vec![IVec2::new(5, 0)]);
        assert!(!gate.should_open(2));
        assert!(gate.should_open(3));

        gate.open = true;
        assert!(!gate.should_open(10));
    }
}
