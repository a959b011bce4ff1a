/*
 * Copyright (c) 2026 Mohamad Al-Zawahreh (dba Sovereign Systems).
 *
 * This file is part of the Playground pattern interpreter.
 *
 * LICENSE: DUAL-LICENSED (AGPLv3 or COMMERCIAL).
 *
 * 1. OPEN SOURCE: You may use this file under the terms of the GNU Affero
 * General Public License v3.0. If you link to this code, your ENTIRE
 * application must be open-sourced under AGPLv3.
 *
 * 2. COMMERCIAL: For proprietary use, you must obtain a Commercial License
 * from Sovereign Systems.
 *
 * NO IMPLIED LICENSE to rights of Mohamad Al-Zawahreh or Sovereign Systems.
 */

//! Paced replay of a finished interpretation.
//!
//! Visualizers animate a result list after the fact. [`Replay`] walks the
//! successful lines and their steps in order, attaching the delay that
//! should elapse before each frame is shown. It never touches the
//! interpreter or the state.

use crate::effect::Step;
use crate::result::LineResult;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplayTiming {
    pub compare: Duration,
    pub swap: Duration,
    pub settle: Duration,
    pub accumulate: Duration,
    pub other: Duration,
    pub between_lines: Duration,
}

impl Default for ReplayTiming {
    fn default() -> Self {
        ReplayTiming {
            compare: Duration::from_millis(800),
            swap: Duration::from_millis(400),
            settle: Duration::from_millis(400),
            accumulate: Duration::from_millis(500),
            other: Duration::from_millis(300),
            between_lines: Duration::from_millis(500),
        }
    }
}

impl ReplayTiming {
    /// Default timing played at `speed` times normal pace. Non-positive
    /// speeds play at normal pace.
    pub fn scaled(speed: f64) -> Self {
        let base = ReplayTiming::default();
        if !(speed.is_finite() && speed > 0.0) {
            return base;
        }
        let scale = |d: Duration| d.div_f64(speed);
        ReplayTiming {
            compare: scale(base.compare),
            swap: scale(base.swap),
            settle: scale(base.settle),
            accumulate: scale(base.accumulate),
            other: scale(base.other),
            between_lines: scale(base.between_lines),
        }
    }

    pub fn delay_for(&self, step: &Step) -> Duration {
        match step {
            Step::Compare { .. } | Step::Inspect { .. } => self.compare,
            Step::Swap { .. } | Step::HeapSwap { .. } => self.swap,
            Step::Settle { .. } | Step::Found { .. } => self.settle,
            Step::Accumulate { .. } => self.accumulate,
            Step::Visit { .. } | Step::Move { .. } | Step::Collect { .. } => self.other,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame<'a> {
    /// Index into the result list.
    pub line_index: usize,
    pub source_line: &'a str,
    /// `None` for the frame that introduces a line.
    pub step: Option<&'a Step>,
    pub delay: Duration,
}

pub struct Replay<'a> {
    results: &'a [LineResult],
    timing: ReplayTiming,
    line: usize,
    step: Option<usize>,
    cancelled: bool,
}

impl<'a> Replay<'a> {
    pub fn new(results: &'a [LineResult], timing: ReplayTiming) -> Self {
        Replay {
            results,
            timing,
            line: 0,
            step: None,
            cancelled: false,
        }
    }

    /// Stops the replay; every later `next` returns `None`.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

impl<'a> Iterator for Replay<'a> {
    type Item = Frame<'a>;

    fn next(&mut self) -> Option<Frame<'a>> {
        if self.cancelled {
            return None;
        }
        loop {
            let result = self.results.get(self.line)?;
            if !result.is_success() {
                self.line += 1;
                continue;
            }
            match self.step {
                None => {
                    self.step = Some(0);
                    let delay = if self.line == 0 {
                        Duration::ZERO
                    } else {
                        self.timing.between_lines
                    };
                    return Some(Frame {
                        line_index: self.line,
                        source_line: &result.source_line,
                        step: None,
                        delay,
                    });
                }
                Some(i) => match result.steps().get(i) {
                    Some(step) => {
                        self.step = Some(i + 1);
                        return Some(Frame {
                            line_index: self.line,
                            source_line: &result.source_line,
                            step: Some(step),
                            delay: self.timing.delay_for(step),
                        });
                    }
                    None => {
                        self.line += 1;
                        self.step = None;
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::scenario::ScenarioId;
    use crate::session::Session;

    fn sorted_run() -> Vec<LineResult> {
        let mut session = Session::open(ScenarioId::Algorithm, Config::default());
        session.run("array nums = [2, 1]\nsort nums\nsort missing")
    }

    #[test]
    fn test_frames_follow_lines_and_steps() {
        let results = sorted_run();
        let frames: Vec<_> = Replay::new(&results, ReplayTiming::default()).collect();
        // declare intro, sort intro, compare, swap, settle, settle
        assert_eq!(frames.len(), 6);
        assert_eq!(frames[0].delay, Duration::ZERO);
        assert_eq!(frames[1].line_index, 1);
        assert_eq!(frames[1].delay, Duration::from_millis(500));
        assert_eq!(frames[2].step, Some(&Step::Compare { left: 0, right: 1 }));
        assert_eq!(frames[2].delay, Duration::from_millis(800));
        assert_eq!(frames[3].delay, Duration::from_millis(400));
        assert!(frames.iter().all(|f| f.line_index != 2));
    }

    #[test]
    fn test_speed_scales_delays() {
        let timing = ReplayTiming::scaled(2.0);
        assert_eq!(timing.compare, Duration::from_millis(400));
        assert_eq!(ReplayTiming::scaled(0.0), ReplayTiming::default());
    }

    #[test]
    fn test_cancel_stops_replay() {
        let results = sorted_run();
        let mut replay = Replay::new(&results, ReplayTiming::default());
        assert!(replay.next().is_some());
        replay.cancel();
        assert!(replay.is_cancelled());
        assert!(replay.next().is_none());
    }
}
