//! Integration tests for the egui frontend, run against a headless context.

use egui::{CentralPanel, Context, Pos2, RawInput, Shape};
use jetlime::{
    EventPosition, EventStyle, FixedContent, HorizontalAlignment, JetLimeColumn, JetLimeRow, JetLimeStyle,
    LayoutDirection, PointAnimation, TimelineNode,
};
use jetlime_egui::{timeline_column, timeline_row, EventWidget, TimelineView};

use crate::init_tracing;

// ── Helpers ────────────────────────────────────────────────────

fn input(width: f32, height: f32) -> RawInput {
    RawInput {
        screen_rect: Some(egui::Rect::from_min_size(Pos2::ZERO, egui::vec2(width, height))),
        ..Default::default()
    }
}

fn count_circles(shape: &Shape) -> usize {
    match shape {
        Shape::Circle(_) => 1,
        Shape::Vec(shapes) => shapes.iter().map(count_circles).sum(),
        _ => 0,
    }
}

fn circle_centers(shape: &Shape, out: &mut Vec<Pos2>) {
    match shape {
        Shape::Circle(circle) => out.push(circle.center),
        Shape::Vec(shapes) => shapes.iter().for_each(|s| circle_centers(s, out)),
        _ => {}
    }
}

fn circles(output: &egui::FullOutput) -> usize {
    output.shapes.iter().map(|clipped| count_circles(&clipped.shape)).sum()
}

// ── Retained view ──────────────────────────────────────────────

#[test]
fn view_paints_every_visible_event() {
    init_tracing();
    let ctx = Context::default();
    let mut column = JetLimeColumn::new(
        vec![1u32, 2, 3],
        JetLimeStyle::column(),
        |v: &u32| *v,
        |_, _, position| TimelineNode::event(EventStyle::new(position), FixedContent::new(200.0, 40.0)),
    );

    let mut painted = 0;
    let output = ctx.run(input(400.0, 600.0), |ctx| {
        CentralPanel::default().show(ctx, |ui| {
            let response = TimelineView::new().show(ui, &mut column).unwrap();
            painted = response.painted;
            assert!(!response.animating);
        });
    });
    assert_eq!(painted, 3);
    // Each default point is a base disc, an inner disc and a ring.
    assert_eq!(circles(&output), 9);
}

#[test]
fn view_keeps_animated_rows_repainting() {
    let ctx = Context::default();
    let mut row = JetLimeRow::new(
        vec!['x', 'y'],
        JetLimeStyle::row(),
        |c: &char| *c,
        |_, _, position| {
            let style = EventStyle::builder(position)
                .point_animation(PointAnimation::new(1.0, 1.3))
                .build()
                .unwrap();
            TimelineNode::event(style, FixedContent::new(80.0, 30.0))
        },
    );

    let mut animating = false;
    ctx.run(input(400.0, 200.0), |ctx| {
        CentralPanel::default().show(ctx, |ui| {
            let response = TimelineView::new()
                .direction(LayoutDirection::Rtl)
                .show(ui, &mut row)
                .unwrap();
            animating = response.animating;
        });
    });
    assert!(animating);
    assert!(row.pulse(0).is_some_and(|p| p.is_running()));
}

#[test]
fn view_reports_layout_errors() {
    let ctx = Context::default();
    let mut column = JetLimeColumn::new(
        vec![1u32, 1],
        JetLimeStyle::column(),
        |v: &u32| *v,
        |_, _, position| TimelineNode::event(EventStyle::new(position), FixedContent::new(20.0, 20.0)),
    );

    let mut failed = false;
    ctx.run(input(400.0, 600.0), |ctx| {
        CentralPanel::default().show(ctx, |ui| {
            failed = TimelineView::new().show(ui, &mut column).is_err();
        });
    });
    assert!(failed);
}

// ── Immediate mode ─────────────────────────────────────────────

#[test]
fn event_widget_wraps_measured_content() {
    let ctx = Context::default();
    let style = JetLimeStyle::column();
    let event = EventStyle::new(EventPosition::Start);

    let mut size = egui::Vec2::ZERO;
    ctx.run(input(400.0, 600.0), |ctx| {
        CentralPanel::default().show(ctx, |ui| {
            let response = EventWidget::new(&style, &event).show(ui, |ui| {
                ui.allocate_space(egui::vec2(100.0, 40.0));
            });
            size = response.response.rect.size();
        });
    });
    // Point column (24) + distance (16) beside the content; spacing below.
    assert_eq!(size, egui::vec2(140.0, 48.0));
}

#[test]
fn immediate_column_draws_a_point_per_item() {
    let ctx = Context::default();
    let style = JetLimeStyle::column();
    let items = ["Ordered", "Shipped", "Delivered"];

    let output = ctx.run(input(400.0, 600.0), |ctx| {
        CentralPanel::default().show(ctx, |ui| {
            timeline_column(
                ui,
                &style,
                &items,
                |_, _, position| EventStyle::new(position),
                |ui, _, item| {
                    ui.label(*item);
                },
            );
        });
    });
    assert!(circles(&output) >= items.len());
}

#[test]
fn immediate_row_keeps_bottom_points_level() {
    let ctx = Context::default();
    let style = JetLimeStyle::builder()
        .horizontal_alignment(HorizontalAlignment::Bottom)
        .build()
        .unwrap();
    let heights = [30.0f32, 60.0, 45.0];

    let output = ctx.run(input(600.0, 300.0), |ctx| {
        CentralPanel::default().show(ctx, |ui| {
            timeline_row(
                ui,
                &style,
                &heights,
                LayoutDirection::Ltr,
                |_, _, position| EventStyle::new(position),
                |ui, _, height| {
                    ui.allocate_space(egui::vec2(80.0, *height));
                },
            );
        });
    });

    let mut centers = Vec::new();
    for clipped in &output.shapes {
        circle_centers(&clipped.shape, &mut centers);
    }
    assert!(centers.len() >= heights.len());
    assert!(centers.iter().all(|c| (c.y - centers[0].y).abs() < 1e-3), "centers {centers:?}");
}
