use egui::{Color32, FontId, Pos2, RichText, Sense, Vec2};
use egui_plot::{Line, Plot, PlotBounds, PlotPoint, PlotPoints};
use std::collections::VecDeque;

use crate::config::{LabelAlign, PlotConfig};
use crate::types::Axis;
use crate::window::SampleWindow;

const TITLE_HEIGHT: f32 = 20.0;
const PANEL_SPACING: f32 = 6.0;
const MIN_PLOT_HEIGHT: f32 = 40.0;
const LABEL_FONT_SIZE: f32 = 11.0;

/// How a panel shows its horizontal tick labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickLabels {
    Hidden,
    Rotated { degrees: f32, align: LabelAlign },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelStyle {
    pub axis: Axis,
    pub title: &'static str,
    pub color: Color32,
    pub tick_labels: TickLabels,
}

/// Styles for the X, Y and Z panels. Only the bottom one shows time labels.
pub fn panel_styles(config: &PlotConfig) -> [PanelStyle; 3] {
    let rgb = |c: [u8; 3]| Color32::from_rgb(c[0], c[1], c[2]);
    let style = |axis: Axis, color: [u8; 3], tick_labels: TickLabels| PanelStyle {
        axis,
        title: axis.title(),
        color: rgb(color),
        tick_labels,
    };
    [
        style(Axis::X, config.colors.x_axis, TickLabels::Hidden),
        style(Axis::Y, config.colors.y_axis, TickLabels::Hidden),
        style(
            Axis::Z,
            config.colors.z_axis,
            TickLabels::Rotated {
                degrees: config.label_rotation_degrees,
                align: config.label_align,
            },
        ),
    ]
}

/// Horizontal range for `len` samples at positions `0..len`, padded by half a slot.
pub fn x_bounds(len: usize) -> (f64, f64) {
    let last = len.saturating_sub(1).max(1) as f64;
    (-0.5, last + 0.5)
}

fn series(values: &VecDeque<f64>) -> Vec<[f64; 2]> {
    values.iter().enumerate().map(|(i, &v)| [i as f64, v]).collect()
}

/// Everything needed to draw one panel, derived only from the window contents.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelFrame {
    pub style: PanelStyle,
    pub points: Vec<[f64; 2]>,
    pub x_bounds: (f64, f64),
    pub y_bounds: (f64, f64),
    pub labels: Vec<String>,
}

/// Vertical space split between the three panels and the label band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelLayout {
    pub plot_height: f32,
    pub label_band: f32,
}

impl PanelLayout {
    pub fn compute(available_height: f32, config: &PlotConfig) -> Self {
        let available_height = available_height.max(0.0);
        let label_band = available_height * config.bottom_margin;
        let chrome = Axis::ALL.len() as f32 * (TITLE_HEIGHT + PANEL_SPACING);
        let plot_height = ((available_height - label_band - chrome) / Axis::ALL.len() as f32).max(MIN_PLOT_HEIGHT);
        Self { plot_height, label_band }
    }
}

/// Top-left corner for a label rotated by `angle` (radians, screen space)
/// whose far end sits on `anchor`.
pub fn rotated_label_origin(anchor: Pos2, text_width: f32, angle: f32, align: LabelAlign) -> Pos2 {
    match align {
        LabelAlign::Left => anchor,
        LabelAlign::Right => anchor - text_width * Vec2::angled(angle),
    }
}

/// Draws the three stacked axis panels.
#[derive(Debug, Clone)]
pub struct AccelPlot {
    styles: [PanelStyle; 3],
    y_bounds: (f64, f64),
    line_width: f32,
}

impl AccelPlot {
    pub fn new(config: &PlotConfig) -> Self {
        Self {
            styles: panel_styles(config),
            y_bounds: (config.y_min, config.y_max),
            line_width: config.line_width,
        }
    }

    pub fn frame(&self, window: &SampleWindow) -> [PanelFrame; 3] {
        let x_bounds = x_bounds(window.len());
        self.styles.clone().map(|style| {
            let labels = match style.tick_labels {
                TickLabels::Hidden => Vec::new(),
                TickLabels::Rotated { .. } => window.timestamps().iter().cloned().collect(),
            };
            PanelFrame {
                points: series(window.values(style.axis)),
                x_bounds,
                y_bounds: self.y_bounds,
                labels,
                style,
            }
        })
    }

    pub fn ui(&self, ui: &mut egui::Ui, window: &SampleWindow, config: &PlotConfig) {
        let layout = PanelLayout::compute(ui.available_height(), config);
        for panel in self.frame(window) {
            self.plot_axis(ui, &panel, &layout);
            ui.add_space(PANEL_SPACING);
        }
    }

    fn plot_axis(&self, ui: &mut egui::Ui, panel: &PanelFrame, layout: &PanelLayout) {
        ui.label(RichText::new(panel.style.title).strong());

        let (x_min, x_max) = panel.x_bounds;
        let (y_min, y_max) = panel.y_bounds;
        let response = Plot::new(panel.style.title)
            .height(layout.plot_height)
            .show_axes([false, true])
            .y_axis_formatter(|mark, _| format!("{:.0}", mark.value))
            .show_x(false)
            .show_y(false)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .show(ui, |plot_ui| {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max([x_min, y_min], [x_max, y_max]));
                if !panel.points.is_empty() {
                    plot_ui.line(
                        Line::new(panel.style.title, PlotPoints::from(panel.points.clone()))
                            .color(panel.style.color)
                            .width(self.line_width),
                    );
                }
            });

        if let TickLabels::Rotated { degrees, align } = panel.style.tick_labels {
            let (band, _) = ui.allocate_exact_size(Vec2::new(ui.available_width(), layout.label_band), Sense::hover());
            let painter = ui.painter();
            let color = ui.visuals().text_color();
            let angle = -degrees.to_radians();
            for (i, label) in panel.labels.iter().enumerate() {
                let tick = response.transform.position_from_point(&PlotPoint::new(i as f64, y_min));
                let anchor = Pos2::new(tick.x, band.top() + 4.0);
                let galley = painter.layout_no_wrap(label.clone(), FontId::proportional(LABEL_FONT_SIZE), color);
                let origin = rotated_label_origin(anchor, galley.size().x, angle, align);
                painter.add(egui::Shape::Text(
                    egui::epaint::TextShape::new(origin, galley, color).with_angle(angle),
                ));
            }
        }
    }
}
