//! Per-peg hit report
//!
//! A serializable snapshot of the heat-map, printed by the native binary.

use serde::{Deserialize, Serialize};

use crate::sim::Board;

/// One peg's line in the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PegStat {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub hits: u32,
    /// Heat-map opacity (0.0 - 1.0)
    pub heat: f32,
}

/// Hit statistics after a run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HitReport {
    /// Frames simulated
    pub frames: u64,
    /// Balls spawned, including the live one
    pub balls: u64,
    pub total_hits: u64,
    pub pegs: Vec<PegStat>,
}

impl HitReport {
    pub fn from_board(board: &Board, frames: u64, balls: u64) -> Self {
        let pegs = board
            .pegs()
            .iter()
            .zip(board.opacities())
            .map(|(peg, heat)| PegStat {
                id: peg.id,
                x: peg.pos.x,
                y: peg.pos.y,
                hits: peg.num_hits,
                heat,
            })
            .collect();

        Self {
            frames,
            balls,
            total_hits: board.total_hits(),
            pegs,
        }
    }

    /// The `n` most-hit pegs, most hits first (ties by id)
    pub fn hottest(&self, n: usize) -> Vec<&PegStat> {
        let mut ranked: Vec<&PegStat> = self.pegs.iter().collect();
        ranked.sort_by(|a, b| b.hits.cmp(&a.hits).then(a.id.cmp(&b.id)));
        ranked.truncate(n);
        ranked
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Peg;
    use glam::Vec2;

    fn board_with_hits(hits: &[u32]) -> Board {
        let pegs = hits
            .iter()
            .enumerate()
            .map(|(i, &h)| {
                let mut peg = Peg::new(i as u32, Vec2::new(10.0 + 10.0 * i as f32, 50.0));
                peg.num_hits = h;
                peg
            })
            .collect();
        Board::from_pegs(Vec2::new(100.0, 100.0), 2, pegs)
    }

    #[test]
    fn test_report_from_board() {
        let report = HitReport::from_board(&board_with_hits(&[0, 4, 2]), 120, 3);
        assert_eq!(report.frames, 120);
        assert_eq!(report.balls, 3);
        assert_eq!(report.total_hits, 6);
        assert_eq!(report.pegs.len(), 3);
        assert_eq!(report.pegs[1].hits, 4);
        assert_eq!(report.pegs[1].heat, 1.0);
        assert_eq!(report.pegs[2].heat, 0.5);
        assert_eq!(report.pegs[0].x, 10.0);
    }

    #[test]
    fn test_hottest() {
        let report = HitReport::from_board(&board_with_hits(&[1, 5, 5, 0]), 0, 0);
        let ids: Vec<u32> = report.hottest(3).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 0]);
        assert_eq!(report.hottest(10).len(), 4);
    }

    #[test]
    fn test_json_has_pegs() {
        let report = HitReport::from_board(&board_with_hits(&[2]), 1, 1);
        let json = report.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total_hits"], 2);
        assert_eq!(value["pegs"][0]["hits"], 2);
    }
}
