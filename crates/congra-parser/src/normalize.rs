//! Color-stop position resolution (CSS Images 4, "color stop fixup") and
//! hint-pair derivation.
//!
//! The input [`StopList`] is never modified: positions are resolved into a
//! fresh working sequence owned by the call, then folded into the output.
//!
//! ```text
//!   red 0.1turn, 0.3turn, blue 0.68turn 1turn
//!
//!   0.1           0.3                      0.68             1.0
//!    |------------>|------------------------>|--------------->|
//!    red       50/50 blend                blue reached    blue stop
//!
//!   hint pair for the red→blue segment: (0.3, 0.68)
//! ```

use crate::color::ColorValue;
use crate::descriptor::{HintPair, ResolvedStop};
use crate::stops::{ColorStopToken, StopList};

/// Resolved stops plus one hint pair per adjacent stop pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub stops: Vec<ResolvedStop>,
    pub hints: Vec<HintPair>,
}

/// Resolves every position in `list`. Never fails: both ends have defaults
/// and clamping keeps the sequence monotonic.
pub fn normalize(list: &StopList) -> Normalized {
    let resolved = resolve_positions(list.tokens());
    derive_hint_pairs(&resolved)
}

// ── Step 1 + 2: positions ─────────────────────────────────────────────────

#[derive(Debug, Copy, Clone)]
struct Slot {
    color: Option<ColorValue>,
    hint: Option<f64>,
    offset: Option<f64>,
}

impl From<&ColorStopToken> for Slot {
    fn from(t: &ColorStopToken) -> Self {
        Self { color: t.color, hint: t.hint, offset: t.offset }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
enum Resolved {
    Stop { color: ColorValue, hint: Option<f64>, offset: f64 },
    LoneHint(f64),
}

/// Clamps `value` up to `max`, or advances `max` to it.
fn clamp_or_advance(value: f64, max: &mut f64) -> f64 {
    if value <= *max {
        *max
    } else {
        *max = value;
        value
    }
}

/// Spreads the queued unresolved stops evenly over `(anchor, max]`:
/// the k-th of M gets `anchor + k / (M + 1) * (max - anchor)`.
fn spread_pending(slots: &mut [Slot], pending: &mut Vec<usize>, anchor: f64, max: f64) {
    if pending.is_empty() {
        return;
    }
    let run = pending.len() as f64 + 1.0;
    for (k, &idx) in pending.iter().enumerate() {
        let offset = anchor + (k as f64 + 1.0) / run * (max - anchor);
        log::trace!("stop {} unresolved, spread to {}", idx, offset);
        slots[idx].offset = Some(offset);
    }
    pending.clear();
}

fn resolve_positions(tokens: &[ColorStopToken]) -> Vec<Resolved> {
    let mut slots: Vec<Slot> = tokens.iter().map(Slot::from).collect();
    let Some(last) = slots.len().checked_sub(1) else {
        return Vec::new();
    };

    let mut running_max = *slots[0].offset.get_or_insert(0.0);
    let mut pending: Vec<usize> = Vec::new();

    for i in 1..=last {
        if slots[i].hint.is_none() && slots[i].offset.is_none() {
            if i < last {
                pending.push(i);
                continue;
            }
            slots[i].offset = Some(1.0);
        }

        let anchor = running_max;
        if let Some(hint) = slots[i].hint {
            slots[i].hint = Some(clamp_or_advance(hint, &mut running_max));
            spread_pending(&mut slots, &mut pending, anchor, running_max);
        }
        if let Some(offset) = slots[i].offset {
            slots[i].offset = Some(clamp_or_advance(offset, &mut running_max));
            spread_pending(&mut slots, &mut pending, anchor, running_max);
        }
    }

    slots
        .iter()
        .map(|s| match s.color {
            Some(color) => Resolved::Stop {
                color,
                hint: s.hint,
                offset: s.offset.unwrap_or(running_max),
            },
            None => Resolved::LoneHint(s.hint.unwrap_or(running_max)),
        })
        .collect()
}

// ── Step 3: hint pairs ────────────────────────────────────────────────────

fn derive_hint_pairs(resolved: &[Resolved]) -> Normalized {
    let mut stops = Vec::with_capacity(resolved.len());
    let mut hints = Vec::with_capacity(resolved.len().saturating_sub(1));

    let mut i = 0;
    while let Some(&Resolved::Stop { color, offset, .. }) = resolved.get(i) {
        stops.push(ResolvedStop { color, offset });

        match resolved.get(i + 1) {
            Some(&Resolved::Stop { hint: None, offset: next, .. }) => {
                hints.push(HintPair::linear(offset, next));
                i += 1;
            }
            Some(&Resolved::Stop { hint: Some(hint), offset: next, .. }) => {
                hints.push(HintPair::new(hint, next));
                i += 1;
            }
            Some(&Resolved::LoneHint(lone)) => {
                // Lone hints never end the list, so a colored stop follows.
                if let Some(&Resolved::Stop { hint, offset: next, .. }) = resolved.get(i + 2) {
                    hints.push(HintPair::new(lone, hint.unwrap_or(next)));
                }
                i += 2;
            }
            None => break,
        }
    }

    Normalized { stops, hints }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stops::parse_stop_list;

    fn run(src: &str) -> (Vec<f64>, Vec<(f64, f64)>) {
        let n = normalize(&parse_stop_list(src).unwrap());
        (
            n.stops.iter().map(|s| s.offset).collect(),
            n.hints.iter().map(|h| (h.midpoint, h.end)).collect(),
        )
    }

    fn close(got: &[f64], want: &[f64]) {
        assert_eq!(got.len(), want.len(), "got {:?}, want {:?}", got, want);
        for (g, w) in got.iter().zip(want) {
            assert!((g - w).abs() < 1e-9, "got {:?}, want {:?}", got, want);
        }
    }

    // ── boundary defaults ─────────────────────────────────────────────────

    #[test]
    fn two_bare_stops_span_the_turn() {
        let (offsets, hints) = run("red, blue");
        assert_eq!(offsets, vec![0.0, 1.0]);
        assert_eq!(hints, vec![(0.5, 1.0)]);
    }

    #[test]
    fn explicit_first_offset_seeds_the_running_max() {
        let (offsets, _) = run("red 20%, blue 10%");
        assert_eq!(offsets, vec![0.2, 0.2]);
    }

    #[test]
    fn last_stop_defaults_to_one_even_after_large_offsets() {
        let (offsets, _) = run("red, lime 150%, blue");
        assert_eq!(offsets, vec![0.0, 1.5, 1.5]);
    }

    // ── unresolved runs ───────────────────────────────────────────────────

    #[test]
    fn single_unresolved_takes_the_midpoint() {
        let (offsets, _) = run("red 10%, green, blue 90%");
        close(&offsets, &[0.1, 0.5, 0.9]);
    }

    #[test]
    fn unresolved_run_is_evenly_spaced() {
        let (offsets, _) = run("red, lime, navy, teal, blue");
        close(&offsets, &[0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn unresolved_run_spreads_up_to_a_clamped_anchor() {
        // `blue 10%` clamps to 40%, so the run between has nowhere to go.
        let (offsets, _) = run("red 40%, green, blue 10%, white");
        close(&offsets, &[0.4, 0.4, 0.4, 1.0]);
    }

    #[test]
    fn lone_hint_resolves_a_pending_run() {
        let (offsets, hints) = run("red, green, 50%, blue");
        close(&offsets, &[0.0, 0.25, 1.0]);
        assert_eq!(hints[1], (0.5, 1.0));
    }

    // ── clamping ──────────────────────────────────────────────────────────

    #[test]
    fn out_of_order_offsets_clamp_to_running_max() {
        let (offsets, _) = run("red 50%, lime 20%, blue 70%, white 60%");
        close(&offsets, &[0.5, 0.5, 0.7, 0.7]);
    }

    #[test]
    fn hint_below_running_max_is_clamped() {
        let (_, hints) = run("red 50%, blue 30% 80%");
        assert_eq!(hints, vec![(0.5, 0.8)]);
    }

    #[test]
    fn lone_hint_is_clamped() {
        let (_, hints) = run("red 40%, 20%, blue");
        assert_eq!(hints, vec![(0.4, 1.0)]);
    }

    // ── hint pairs ────────────────────────────────────────────────────────

    #[test]
    fn default_pairs_use_the_arithmetic_mean() {
        let (_, hints) = run("red 0%, lime 50%, blue");
        assert_eq!(hints, vec![(0.25, 0.5), (0.75, 1.0)]);
    }

    #[test]
    fn explicit_hint_on_a_stop() {
        let (offsets, hints) = run("red, blue 30% 60%");
        assert_eq!(offsets, vec![0.0, 0.6]);
        assert_eq!(hints, vec![(0.3, 0.6)]);
    }

    #[test]
    fn lone_hint_pairs_with_next_offset() {
        let (offsets, hints) = run("red 10%, 30%, blue 70%");
        assert_eq!(offsets, vec![0.1, 0.7]);
        assert_eq!(hints, vec![(0.3, 0.7)]);
    }

    #[test]
    fn lone_hint_chains_to_next_stops_own_hint() {
        let (offsets, hints) = run("red 0.1turn, 0.3turn, blue 0.68turn 1turn");
        close(&offsets, &[0.1, 1.0]);
        assert_eq!(hints.len(), 1);
        assert!((hints[0].0 - 0.3).abs() < 1e-9 && (hints[0].1 - 0.68).abs() < 1e-9);
    }

    #[test]
    fn mixed_list_keeps_pair_count() {
        let n = normalize(&parse_stop_list("red, 20%, lime, blue 50% 60%, 80%, white").unwrap());
        assert_eq!(n.stops.len(), 4);
        assert_eq!(n.hints.len(), 3);
    }

    // ── invariants ────────────────────────────────────────────────────────

    #[test]
    fn offsets_are_monotonic_and_pairs_ordered() {
        let cases = [
            "red 90%, blue 10%, lime, white 50%",
            "red, 10%, blue 5%, 2%, lime",
            "red -20%, lime, navy 300%, teal, 10%, white",
            "red 1turn, blue 0deg 0deg, lime",
        ];
        for src in cases {
            let n = normalize(&parse_stop_list(src).unwrap());
            assert!(n.stops.windows(2).all(|w| w[0].offset <= w[1].offset), "{src}");
            assert!(n.hints.iter().all(|h| h.midpoint <= h.end), "{src}");
            assert_eq!(n.hints.len() + 1, n.stops.len(), "{src}");
        }
    }

    #[test]
    fn input_list_is_not_modified() {
        let list = parse_stop_list("red, green, blue").unwrap();
        let before = list.clone();
        let _ = normalize(&list);
        assert_eq!(list, before);
        assert_eq!(list.tokens()[1].offset, None);
    }
}
