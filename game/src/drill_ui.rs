use std::time::Duration;

use engine::graphics::{Color, Renderer2d, text_width};
use engine::surface::SurfaceSize;
use engine::ui::{Anchor, Insets, Rect, Size};

use crate::direction::Direction;
use crate::drill_core::{DrillEvent, StepOutcome};
use crate::library::IconRef;
use crate::settings::GameplaySettings;

pub const COLOR_BACKGROUND: Color = [10, 10, 14, 255];
pub const COLOR_PANEL: Color = [28, 28, 38, 255];
pub const COLOR_TEXT: Color = [235, 235, 235, 255];
pub const COLOR_TEXT_DIM: Color = [130, 130, 150, 255];
pub const COLOR_PENDING: Color = [235, 235, 235, 255];
pub const COLOR_CORRECT: Color = [60, 200, 90, 255];
pub const COLOR_INCORRECT: Color = [220, 45, 55, 255];
pub const COLOR_GAUGE_TRACK: Color = [40, 40, 52, 255];
pub const COLOR_GAUGE_FILL: Color = [250, 200, 40, 255];

const PADDING: u32 = 12;
const GAP: u32 = 8;
const TITLE_H: u32 = 14;
const ICON_SIDE: u32 = 48;
const GAUGE_H: u32 = 10;
const FOOTER_H: u32 = 12;
const SLOT_CELL: u32 = 44;
const SLOT_GAP: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    Pending,
    Correct,
    Incorrect,
}

impl SlotStatus {
    pub fn color(self) -> Color {
        match self {
            SlotStatus::Pending => COLOR_PENDING,
            SlotStatus::Correct => COLOR_CORRECT,
            SlotStatus::Incorrect => COLOR_INCORRECT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub direction: Direction,
    pub status: SlotStatus,
}

/// What the drill screen shows, rebuilt purely from engine events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrillBoard {
    round: u32,
    name: String,
    icon: Option<IconRef>,
    slots: Vec<Slot>,
    remaining: Duration,
    budget: Duration,
    timed_out: bool,
    completed: u32,
    missed: u32,
}

impl DrillBoard {
    pub fn apply(&mut self, event: &DrillEvent) {
        match event {
            DrillEvent::RoundStarted {
                round,
                name,
                sequence,
                icon,
                budget,
                ..
            } => {
                self.round = *round;
                self.name = name.clone();
                self.icon = Some(icon.clone());
                self.slots = sequence
                    .iter()
                    .map(|&direction| Slot {
                        direction,
                        status: SlotStatus::Pending,
                    })
                    .collect();
                self.budget = *budget;
                self.remaining = *budget;
                self.timed_out = false;
            }
            DrillEvent::StepResult { index, outcome } => {
                if let Some(slot) = self.slots.get_mut(*index) {
                    slot.status = match outcome {
                        StepOutcome::Correct => SlotStatus::Correct,
                        StepOutcome::Incorrect => SlotStatus::Incorrect,
                    };
                }
            }
            DrillEvent::RoundComplete { .. } => self.completed += 1,
            DrillEvent::RoundTimedOut { .. } => {
                self.timed_out = true;
                self.missed += 1;
                for slot in &mut self.slots {
                    slot.status = SlotStatus::Incorrect;
                }
            }
            DrillEvent::Tick { remaining } => self.remaining = *remaining,
        }
    }

    pub fn apply_all<'a>(&mut self, events: impl IntoIterator<Item = &'a DrillEvent>) {
        for event in events {
            self.apply(event);
        }
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn icon(&self) -> Option<&IconRef> {
        self.icon.as_ref()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    pub fn completed(&self) -> u32 {
        self.completed
    }

    pub fn missed(&self) -> u32 {
        self.missed
    }

    /// Filled part of a gauge `width` pixels wide.
    pub fn gauge_fill(&self, width: u32) -> u32 {
        let budget = self.budget.as_millis();
        if budget == 0 {
            return 0;
        }
        let remaining = self.remaining.as_millis().min(budget);
        (u128::from(width) * remaining / budget) as u32
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrillLayout {
    pub title: Rect,
    pub icon: Rect,
    pub gauge: Rect,
    pub slots: Vec<Rect>,
    pub footer: Rect,
}

impl DrillLayout {
    pub fn compute(size: SurfaceSize, slot_count: usize) -> Self {
        let content = Rect::from_size(size.width, size.height).inset(Insets::all(PADDING));
        let (title, rest) = content.split_top(TITLE_H + GAP);
        let (icon_row, rest) = rest.split_top(ICON_SIDE + GAP);
        let (gauge_row, rest) = rest.split_top(GAUGE_H + GAP);
        let slot_area = Rect::new(rest.x, rest.y, rest.w, rest.h.saturating_sub(FOOTER_H));

        Self {
            title: Rect::new(title.x, title.y, title.w, TITLE_H.min(title.h)),
            icon: icon_row.place(Size::new(ICON_SIDE, ICON_SIDE), Anchor::TopCenter),
            gauge: Rect::new(gauge_row.x, gauge_row.y, gauge_row.w, GAUGE_H.min(gauge_row.h)),
            slots: slot_area.centered_row(slot_count, SLOT_CELL, SLOT_GAP),
            footer: Rect::new(rest.x, slot_area.bottom(), rest.w, rest.h - slot_area.h),
        }
    }
}

fn arrow_rows(direction: Direction) -> [u8; 5] {
    match direction {
        Direction::Up => [0b00100, 0b01110, 0b10101, 0b00100, 0b00100],
        Direction::Down => [0b00100, 0b00100, 0b10101, 0b01110, 0b00100],
        Direction::Left => [0b00100, 0b01000, 0b11111, 0b01000, 0b00100],
        Direction::Right => [0b00100, 0b00010, 0b11111, 0b00010, 0b00100],
    }
}

/// Square the arrow bitmap occupies inside `slot`.
pub fn arrow_rect(slot: Rect) -> Rect {
    let scale = (slot.w.min(slot.h) / 7).max(1);
    slot.place(Size::new(5 * scale, 5 * scale), Anchor::Center)
}

fn draw_arrow(gfx: &mut dyn Renderer2d, slot: Rect, direction: Direction, color: Color) {
    let area = arrow_rect(slot);
    let scale = area.w / 5;
    for (row, bits) in arrow_rows(direction).into_iter().enumerate() {
        for col in 0..5u32 {
            if bits & (1 << (4 - col)) != 0 {
                let px = Rect::new(area.x + col * scale, area.y + row as u32 * scale, scale, scale);
                gfx.fill_rect(px, color);
            }
        }
    }
}

fn draw_text_centered(gfx: &mut dyn Renderer2d, area: Rect, text: &str, color: Color, scale: u32) {
    let w = text_width(text, scale);
    let h = 5 * scale;
    let at = area.place(Size::new(w, h), Anchor::Center);
    gfx.draw_text_scaled(at.x, at.y, text, color, scale);
}

fn initials(label: &str) -> String {
    label
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(3)
        .collect::<String>()
        .to_uppercase()
}

pub fn draw_drill(
    gfx: &mut dyn Renderer2d,
    board: &DrillBoard,
    layout: &DrillLayout,
    gameplay: &GameplaySettings,
) {
    gfx.clear(COLOR_BACKGROUND);

    gfx.draw_text_scaled(
        layout.title.x,
        layout.title.y,
        &format!("ROUND {}", board.round()),
        COLOR_TEXT_DIM,
        2,
    );
    if gameplay.show_icon_label {
        draw_text_centered(gfx, layout.title, &board.name().to_uppercase(), COLOR_TEXT, 2);
    }

    gfx.fill_rect(layout.icon, COLOR_PANEL);
    gfx.rect_outline(layout.icon, 2, COLOR_TEXT_DIM);
    if let Some(icon) = board.icon() {
        draw_text_centered(gfx, layout.icon, &initials(icon.label()), COLOR_TEXT, 3);
    }

    if gameplay.show_gauge {
        gfx.fill_rect(layout.gauge, COLOR_GAUGE_TRACK);
        let fill = board.gauge_fill(layout.gauge.w);
        let color = if board.timed_out() {
            COLOR_INCORRECT
        } else {
            COLOR_GAUGE_FILL
        };
        gfx.fill_rect(
            Rect::new(layout.gauge.x, layout.gauge.y, fill, layout.gauge.h),
            color,
        );
    }

    for (slot, rect) in board.slots().iter().zip(&layout.slots) {
        gfx.fill_rect(*rect, COLOR_PANEL);
        if slot.status == SlotStatus::Incorrect {
            gfx.rect_outline(*rect, 2, COLOR_INCORRECT);
        }
        draw_arrow(gfx, *rect, slot.direction, slot.status.color());
    }

    gfx.draw_text_scaled(
        layout.footer.x,
        layout.footer.y.saturating_add(2),
        &format!("DONE {}  MISSED {}", board.completed(), board.missed()),
        COLOR_TEXT_DIM,
        1,
    );
}

pub fn draw_main_menu(gfx: &mut dyn Renderer2d) {
    let size = gfx.size();
    gfx.clear(COLOR_BACKGROUND);
    let area = Rect::from_size(size.width, size.height);
    let (top, rest) = area.split_top(size.height / 2);
    draw_text_centered(gfx, top, "STRATAGEM DRILL", COLOR_TEXT, 3);
    let (line1, line2) = rest.split_top(rest.h / 3);
    draw_text_centered(gfx, line1, "ENTER TO START", COLOR_GAUGE_FILL, 2);
    draw_text_centered(gfx, line2, "ARROWS OR WASD. ESC PAUSES. Q QUITS.", COLOR_TEXT_DIM, 1);
}

pub fn draw_pause_overlay(gfx: &mut dyn Renderer2d) {
    let size = gfx.size();
    let area = Rect::from_size(size.width, size.height);
    gfx.blend_rect(area, COLOR_BACKGROUND, 200);
    let (top, bottom) = area.split_top(size.height / 2);
    draw_text_centered(gfx, top, "PAUSED", COLOR_TEXT, 3);
    draw_text_centered(gfx, bottom.split_top(24).0, "ESC RESUMES. BACKSPACE FOR MENU.", COLOR_TEXT_DIM, 1);
}
