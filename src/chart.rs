//! 13x13 range charts for a pattern.

use rayon::prelude::*;
use serde::Serialize;
use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::hand::{rank_char, HandClass, RANK_A};
use crate::range::RangeCache;
use crate::strategy::{ActionKey, Pattern};

/// Total number of two-card combos.
const TOTAL_COMBOS: f64 = 1326.0;

/// Answer and mix for a single hand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandStrategy {
    pub hand: HandClass,
    /// Index of the option the hand resolves to
    pub answer: usize,
    /// Probability per option
    pub probabilities: Vec<f64>,
}

/// Every hand of a pattern laid out as a 13x13 chart.
#[derive(Debug, Clone, Serialize)]
pub struct RangeChart {
    pub pattern: String,
    pub label: String,
    pub options: Vec<String>,
    /// Combo-weighted average probability per option
    pub frequencies: Vec<f64>,
    /// Share of combos whose answer is each option
    pub answer_shares: Vec<f64>,
    /// `grid[row][col]`, AA top-left, suited above the diagonal
    pub grid: Vec<Vec<HandStrategy>>,
}

impl RangeChart {
    /// Evaluate all 169 hands of `pattern`.
    pub fn build(pattern: &Pattern, cache: &RangeCache) -> Self {
        let grid: Vec<Vec<HandStrategy>> = (0..13usize)
            .into_par_iter()
            .map(|row| {
                (0..13usize)
                    .map(|col| evaluate(pattern, cache, HandClass::from_grid(row, col)))
                    .collect()
            })
            .collect();

        let n = pattern.options.len();
        let mut frequencies = vec![0.0; n];
        let mut answer_shares = vec![0.0; n];

        for h in grid.iter().flatten() {
            let combos = h.hand.num_combos() as f64;
            for (f, p) in frequencies.iter_mut().zip(&h.probabilities) {
                *f += combos * p / TOTAL_COMBOS;
            }
            if let Some(share) = answer_shares.get_mut(h.answer) {
                *share += combos / TOTAL_COMBOS;
            }
        }

        Self {
            pattern: pattern.id.clone(),
            label: pattern.label.clone(),
            options: pattern.options.clone(),
            frequencies,
            answer_shares,
            grid,
        }
    }

    /// Entry for a hand.
    pub fn get(&self, hand: HandClass) -> &HandStrategy {
        let (row, col) = hand.grid_position();
        &self.grid[row][col]
    }

    /// Save the chart as pretty-printed JSON.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Plain-text chart. Each cell shows the answer's initial and its
    /// probability in percent; hands answered by the first option show `-`.
    pub fn render_text(&self) -> String {
        let initials: Vec<char> = self
            .options
            .iter()
            .map(|o| {
                let key = ActionKey::new(o);
                key.verb().chars().next().unwrap_or('?').to_ascii_uppercase()
            })
            .collect();

        let mut out = String::new();
        let _ = writeln!(out, "=== {} ===", self.label);
        for (i, option) in self.options.iter().enumerate() {
            let _ = writeln!(
                out,
                "{} {:<12} mix {:>5.1}% | answer {:>5.1}%",
                initials[i],
                option,
                self.frequencies[i] * 100.0,
                self.answer_shares[i] * 100.0
            );
        }
        let _ = writeln!(out);

        out.push_str("    ");
        for col in 0..13u8 {
            let _ = write!(out, "{:>5}", rank_char(RANK_A - col));
        }
        out.push('\n');

        for (row, cells) in self.grid.iter().enumerate() {
            let _ = write!(out, "{:>2}  ", rank_char(RANK_A - row as u8));
            for cell in cells {
                if cell.answer == 0 {
                    let _ = write!(out, "{:>5}", "-");
                } else {
                    let pct = (cell.probabilities[cell.answer] * 100.0).round() as u32;
                    let _ = write!(out, "{:>5}", format!("{}{}", initials[cell.answer], pct));
                }
            }
            out.push('\n');
        }
        out
    }
}

fn evaluate(pattern: &Pattern, cache: &RangeCache, hand: HandClass) -> HandStrategy {
    HandStrategy {
        hand,
        answer: pattern.answer(cache, hand),
        probabilities: pattern.distribution(cache, hand).probabilities(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::Band;

    fn open_pattern() -> Pattern {
        Pattern {
            id: "btn-open".to_string(),
            label: "BTN Open".to_string(),
            position: "BTN".to_string(),
            effective_stack_bb: 40.0,
            facing: "Unopened".to_string(),
            options: vec!["Fold".to_string(), "Open 2.2x".to_string()],
            bands: vec![Band::new("open", "22+, A2s+, KTo+:0.5").with_min_weight(0.05)],
            fallback: "fold".to_string(),
            default_min_weight: 0.5,
        }
    }

    #[test]
    fn test_chart_layout() {
        let chart = RangeChart::build(&open_pattern(), &RangeCache::new());
        assert_eq!(chart.grid.len(), 13);
        assert!(chart.grid.iter().all(|row| row.len() == 13));
        assert_eq!(chart.grid[0][0].hand.to_string(), "AA");
        assert_eq!(chart.grid[1][0].hand.to_string(), "AKo");

        let kto: HandClass = "KTo".parse().unwrap();
        assert_eq!(chart.get(kto).answer, 1);
        assert!((chart.get(kto).probabilities[1] - 0.5).abs() < 1e-9);
        assert_eq!(chart.get("72o".parse().unwrap()).answer, 0);
    }

    #[test]
    fn test_chart_frequencies() {
        let chart = RangeChart::build(&open_pattern(), &RangeCache::new());
        // 78 pair combos + 48 suited aces + 0.5 * 36 offsuit K-broadways
        let open = (78.0 + 48.0 + 18.0) / 1326.0;
        assert!((chart.frequencies[1] - open).abs() < 1e-9);
        assert!((chart.frequencies.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!((chart.answer_shares.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_render_text() {
        let text = RangeChart::build(&open_pattern(), &RangeCache::new()).render_text();
        assert!(text.starts_with("=== BTN Open ==="));
        assert!(text.contains("O100"));
        assert!(text.contains("O50"));
        // header + 2 options + blank + rank header + 13 rows
        assert_eq!(text.lines().count(), 1 + 2 + 1 + 1 + 13);
    }

    #[test]
    fn test_save_json() {
        let chart = RangeChart::build(&open_pattern(), &RangeCache::new());
        let path = std::env::temp_dir().join("preflop_ranges_chart_test.json");
        chart.save_json(&path).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["pattern"], "btn-open");
        assert_eq!(json["grid"][0][1]["hand"], "AKs");
        let _ = std::fs::remove_file(&path);
    }
}
