//! On-screen frame statistics
//!
//! One small panel per counter, laid out left to right along the top edge.
//! `begin`/`end` bracket the measured part of a frame. Every call on a
//! [`PerformanceOverlay::disabled`] overlay is a no-op.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::gfx::rendering::RenderStats;

const PANEL_WIDTH: f32 = 80.0;
const PANEL_HEIGHT: f32 = 48.0;
const HISTORY_LEN: usize = 74;
const SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    /// Frames per second, sampled once a second
    Fps,
    /// Milliseconds between `begin` and `end`
    Ms,
    /// Resident memory in megabytes, sampled once a second
    Mb,
}

impl StatKind {
    pub fn label(self) -> &'static str {
        match self {
            StatKind::Fps => "FPS",
            StatKind::Ms => "MS",
            StatKind::Mb => "MB",
        }
    }
}

/// Source of the process's resident memory.
pub trait MemorySource {
    fn resident_bytes(&self) -> Option<u64>;
}

/// Reads `VmRSS` from `/proc/self/status`. The kernel reports it in kB, so
/// the result does not depend on the page size.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcStatus;

impl ProcStatus {
    fn parse_rss(status: &str) -> Option<u64> {
        let line = status.lines().find(|l| l.starts_with("VmRSS:"))?;
        let kb: u64 = line.split_whitespace().nth(1)?.parse().ok()?;
        Some(kb * 1024)
    }
}

impl MemorySource for ProcStatus {
    fn resident_bytes(&self) -> Option<u64> {
        let status = std::fs::read_to_string("/proc/self/status").ok()?;
        Self::parse_rss(&status)
    }
}

/// Rolling history of one counter.
#[derive(Debug, Clone)]
pub struct StatPanel {
    kind: StatKind,
    value: f32,
    min: f32,
    max: f32,
    history: VecDeque<f32>,
}

impl StatPanel {
    fn new(kind: StatKind) -> Self {
        Self {
            kind,
            value: 0.0,
            min: f32::INFINITY,
            max: 0.0,
            history: VecDeque::with_capacity(HISTORY_LEN),
        }
    }

    fn record(&mut self, value: f32) {
        self.value = value;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        if self.history.len() == HISTORY_LEN {
            self.history.pop_front();
        }
        self.history.push_back(value);
    }

    pub fn kind(&self) -> StatKind {
        self.kind
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn samples(&self) -> usize {
        self.history.len()
    }
}

struct OverlayState {
    panels: Vec<StatPanel>,
    memory: Box<dyn MemorySource>,
    frame_start: Option<Instant>,
    window_start: Instant,
    frames: u32,
    render_stats: RenderStats,
}

impl OverlayState {
    fn panel_mut(&mut self, kind: StatKind) -> Option<&mut StatPanel> {
        self.panels.iter_mut().find(|p| p.kind == kind)
    }
}

pub struct PerformanceOverlay {
    state: Option<OverlayState>,
}

impl PerformanceOverlay {
    /// Creates an overlay with a panel for each of `kinds`. The MB panel is
    /// left out when `memory` has nothing to report on this platform.
    pub fn new(kinds: &[StatKind], memory: Box<dyn MemorySource>) -> Self {
        let has_memory = memory.resident_bytes().is_some();
        let mut panels = Vec::with_capacity(kinds.len());
        for &kind in kinds {
            if kind == StatKind::Mb && !has_memory {
                log::warn!("performance overlay: no memory counter, MB panel dropped");
                continue;
            }
            panels.push(StatPanel::new(kind));
        }
        log::info!(
            "performance overlay: {}",
            panels.iter().map(|p| p.kind.label()).collect::<Vec<_>>().join(", ")
        );
        Self {
            state: Some(OverlayState {
                panels,
                memory,
                frame_start: None,
                window_start: Instant::now(),
                frames: 0,
                render_stats: RenderStats::default(),
            }),
        }
    }

    /// FPS, MS and MB panels, memory read from `/proc/self/status`.
    pub fn standard() -> Self {
        Self::new(&[StatKind::Fps, StatKind::Ms, StatKind::Mb], Box::new(ProcStatus))
    }

    /// An overlay whose calls all do nothing.
    pub fn disabled() -> Self {
        Self { state: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.state.is_some()
    }

    pub fn panels(&self) -> &[StatPanel] {
        match &self.state {
            Some(state) => &state.panels,
            None => &[],
        }
    }

    pub fn begin(&mut self) {
        self.begin_at(Instant::now());
    }

    pub fn end(&mut self) {
        self.end_at(Instant::now());
    }

    pub fn begin_at(&mut self, now: Instant) {
        if let Some(state) = &mut self.state {
            state.frame_start = Some(now);
        }
    }

    /// Closes the frame opened by `begin_at`. An `end` without a matching
    /// `begin` records nothing for the MS panel.
    pub fn end_at(&mut self, now: Instant) {
        let Some(state) = &mut self.state else {
            return;
        };

        if let Some(start) = state.frame_start.take() {
            let ms = now.saturating_duration_since(start).as_secs_f32() * 1000.0;
            if let Some(panel) = state.panel_mut(StatKind::Ms) {
                panel.record(ms);
            }
        }

        state.frames += 1;
        let window = now.saturating_duration_since(state.window_start);
        if window >= SAMPLE_INTERVAL {
            let fps = state.frames as f32 / window.as_secs_f32();
            if let Some(panel) = state.panel_mut(StatKind::Fps) {
                panel.record(fps);
            }
            if let Some(bytes) = state.memory.resident_bytes() {
                if let Some(panel) = state.panel_mut(StatKind::Mb) {
                    panel.record(bytes as f32 / 1_048_576.0);
                }
            }
            log::trace!("overlay: {:.1} fps", fps);
            state.window_start = now;
            state.frames = 0;
        }
    }

    pub fn set_render_stats(&mut self, stats: RenderStats) {
        if let Some(state) = &mut self.state {
            state.render_stats = stats;
        }
    }

    /// Draws the panels at x = i * 80, y = 0, with the renderer's counters
    /// underneath.
    pub fn draw(&self, ui: &imgui::Ui) {
        let Some(state) = &self.state else {
            return;
        };

        for (i, panel) in state.panels.iter().enumerate() {
            let label = panel.kind.label();
            ui.window(format!("##stat_{}", label))
                .position([i as f32 * PANEL_WIDTH, 0.0], imgui::Condition::Always)
                .size([PANEL_WIDTH, PANEL_HEIGHT], imgui::Condition::Always)
                .no_decoration()
                .no_inputs()
                .bg_alpha(0.6)
                .build(|| {
                    ui.text(format!("{:.0} {}", panel.value, label));
                    let history: Vec<f32> = panel.history.iter().copied().collect();
                    ui.plot_lines("##history", &history)
                        .graph_size([PANEL_WIDTH - 16.0, 16.0])
                        .scale_min(0.0)
                        .scale_max(panel.max.max(1.0))
                        .build();
                });
        }

        let stats = state.render_stats;
        ui.window("##render_stats")
            .position([0.0, PANEL_HEIGHT], imgui::Condition::Always)
            .always_auto_resize(true)
            .no_decoration()
            .no_inputs()
            .bg_alpha(0.3)
            .build(|| {
                ui.text(format!(
                    "draws {}  tris {}  lines {}",
                    stats.draw_calls, stats.triangles, stats.line_segments
                ));
            });
    }
}
