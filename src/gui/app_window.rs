//! Bridges the coordinator's pixel-based commands to egui viewport commands

use super::app::BridgironApp;
use crate::coordinator::{Geometry, Position, Size, WindowCommand};
use eframe::egui::{self, ViewportCommand, WindowLevel};
use tracing::debug;

/// Upper bound for the full window once the compact size pin is lifted
const MAX_FULL_SIZE: f32 = 10_000.0;

fn to_pixels(points: f32, scale: f32) -> i32 {
    (points * scale).round() as i32
}

fn to_points(size: Size, scale: f32) -> egui::Vec2 {
    egui::vec2(size.width as f32 / scale, size.height as f32 / scale)
}

fn to_point(position: Position, scale: f32) -> egui::Pos2 {
    egui::pos2(position.x as f32 / scale, position.y as f32 / scale)
}

impl BridgironApp {
    /// Advance the coordinator by one tick
    pub(super) fn tick_coordinator(&mut self, ctx: &egui::Context) -> Vec<WindowCommand> {
        let scale = ctx.pixels_per_point();
        self.coordinator.set_scale(scale);

        let (focused, outer, inner) = ctx.input(|i| {
            let viewport = i.viewport();
            (
                viewport.focused.unwrap_or(false),
                viewport.outer_rect,
                viewport.inner_rect,
            )
        });

        if focused && !self.history_popups.any_open() {
            self.coordinator.adopt_own_window(self.probe.as_ref());
        }

        let own = outer.zip(inner).map(|(outer, inner)| Geometry {
            position: Position::new(to_pixels(outer.min.x, scale), to_pixels(outer.min.y, scale)),
            size: Size::new(
                to_pixels(inner.width(), scale),
                to_pixels(inner.height(), scale),
            ),
        });

        self.coordinator
            .tick(self.probe.as_ref(), &mut *self.focus_signal, own)
    }

    /// Perform coordinator commands on the main viewport
    pub(super) fn apply_window_commands(
        &mut self,
        ctx: &egui::Context,
        commands: Vec<WindowCommand>,
    ) {
        let scale = ctx.pixels_per_point();

        for command in commands {
            debug!("Window command: {:?}", command);
            match command {
                WindowCommand::ShowCompact { size } => {
                    let size = to_points(size, scale);
                    ctx.send_viewport_cmd(ViewportCommand::Resizable(false));
                    ctx.send_viewport_cmd(ViewportCommand::MinInnerSize(size));
                    ctx.send_viewport_cmd(ViewportCommand::MaxInnerSize(size));
                    ctx.send_viewport_cmd(ViewportCommand::InnerSize(size));
                }
                WindowCommand::MoveTo(position) => {
                    ctx.send_viewport_cmd(ViewportCommand::OuterPosition(to_point(
                        position, scale,
                    )));
                }
                WindowCommand::ShowFull {
                    position,
                    size,
                    min_size,
                } => {
                    ctx.send_viewport_cmd(ViewportCommand::MaxInnerSize(egui::Vec2::splat(
                        MAX_FULL_SIZE,
                    )));
                    ctx.send_viewport_cmd(ViewportCommand::MinInnerSize(to_points(
                        min_size, scale,
                    )));
                    ctx.send_viewport_cmd(ViewportCommand::InnerSize(to_points(size, scale)));
                    ctx.send_viewport_cmd(ViewportCommand::Resizable(true));
                    if let Some(position) = position {
                        ctx.send_viewport_cmd(ViewportCommand::OuterPosition(to_point(
                            position, scale,
                        )));
                    }
                }
                WindowCommand::SetAlwaysOnTop(on_top) => {
                    let level = if on_top {
                        WindowLevel::AlwaysOnTop
                    } else {
                        WindowLevel::Normal
                    };
                    ctx.send_viewport_cmd(ViewportCommand::WindowLevel(level));
                }
                WindowCommand::Lower => match self.coordinator.own_handle() {
                    Some(handle) => {
                        if !self.probe.lower(handle) {
                            debug!("Could not lower window {:?}", handle);
                        }
                    }
                    None => debug!("Own window handle unknown, not lowering"),
                },
                WindowCommand::Focus => ctx.send_viewport_cmd(ViewportCommand::Focus),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_conversion_at_150_percent() {
        assert_eq!(to_pixels(220.0, 1.5), 330);
        assert_eq!(to_points(Size::new(330, 90), 1.5), egui::vec2(220.0, 60.0));
        assert_eq!(to_point(Position::new(15, 30), 1.5), egui::pos2(10.0, 20.0));
    }
}
