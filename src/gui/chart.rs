// src/gui/chart.rs
//
// Line chart of stored counts over date. Reads history only; growth numbers
// are never recomputed here.

use std::collections::BTreeMap;

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke, StrokeKind};
use time::Date;

use crate::history::{BaselinePolicy, History};
use crate::model::fmt_date;

const PALETTE: [Color32; 8] = [
    Color32::from_rgb(0x64, 0xB4, 0xFF),
    Color32::from_rgb(0xF0, 0xD2, 0x3C),
    Color32::from_rgb(0xDC, 0x61, 0x49),
    Color32::from_rgb(0x6C, 0xC6, 0x7A),
    Color32::from_rgb(0xFF, 0xA5, 0x00),
    Color32::from_rgb(0xB0, 0x82, 0xE0),
    Color32::from_rgb(0x4E, 0xD1, 0xC4),
    Color32::from_rgb(0xE0, 0x7A, 0xB5),
];

#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub keyword: String,
    /// Ascending by date, one point per date.
    pub points: Vec<(Date, u64)>,
}

/// Per-keyword series for `keywords`, in the given order. Only "ok" rows are
/// plotted; a keyword with no usable rows is left out.
pub fn series(history: &History, keywords: &[String], policy: BaselinePolicy) -> Vec<Series> {
    let idx = history.index(policy);

    let mut by_kw: BTreeMap<&str, BTreeMap<Date, u64>> = BTreeMap::new();
    for ((kw, date), obs) in &idx {
        if obs.is_ok() {
            by_kw.entry(*kw).or_default().insert(*date, obs.count);
        }
    }

    keywords.iter()
        .filter_map(|kw| {
            let pts = by_kw.get(kw.as_str())?;
            Some(Series {
                keyword: kw.clone(),
                points: pts.iter().map(|(d, c)| (*d, *c)).collect(),
            })
        })
        .collect()
}

/// (first date, last date, max count) over all series.
pub fn bounds(series: &[Series]) -> Option<(Date, Date, u64)> {
    let mut it = series.iter().flat_map(|s| s.points.iter());
    let &(d0, c0) = it.next()?;
    Some(it.fold((d0, d0, c0), |(lo, hi, max), &(d, c)| (lo.min(d), hi.max(d), max.max(c))))
}

pub fn draw(ui: &mut egui::Ui, series: &[Series]) {
    let Some((first, last, max_count)) = bounds(series) else {
        ui.label("No stored counts for the selected keywords.");
        return;
    };

    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
    let frame = response.rect;
    let plot = Rect::from_min_max(
        Pos2::new(frame.left() + 70.0, frame.top() + 12.0),
        Pos2::new(frame.right() - 150.0, frame.bottom() - 28.0),
    );
    if plot.width() < 20.0 || plot.height() < 20.0 {
        return;
    }

    let text_color = ui.visuals().text_color();
    let weak = ui.visuals().weak_text_color();
    let font = FontId::proportional(12.0);

    let day0 = first.to_julian_day();
    let span_days = (last.to_julian_day() - day0).max(1) as f32;
    let top = max_count.max(1) as f32;
    let to_screen = |d: Date, c: u64| -> Pos2 {
        let x = plot.left() + (d.to_julian_day() - day0) as f32 / span_days * plot.width();
        let y = plot.bottom() - c as f32 / top * plot.height();
        Pos2::new(x, y)
    };

    painter.rect_stroke(plot, 0.0, Stroke::new(1.0, weak), StrokeKind::Inside);
    painter.text(Pos2::new(plot.left() - 6.0, plot.top()), Align2::RIGHT_TOP, max_count.to_string(), font.clone(), weak);
    painter.text(Pos2::new(plot.left() - 6.0, plot.bottom()), Align2::RIGHT_BOTTOM, "0", font.clone(), weak);
    painter.text(Pos2::new(plot.left(), plot.bottom() + 4.0), Align2::LEFT_TOP, fmt_date(first), font.clone(), weak);
    if last != first {
        painter.text(Pos2::new(plot.right(), plot.bottom() + 4.0), Align2::RIGHT_TOP, fmt_date(last), font.clone(), weak);
    }

    let mut nearest: Option<(f32, Pos2, &str, Date, u64)> = None;
    let hover = response.hover_pos();

    for (i, s) in series.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        let pts: Vec<Pos2> = s.points.iter().map(|&(d, c)| to_screen(d, c)).collect();

        if pts.len() == 1 {
            painter.circle_filled(pts[0], 3.0, color);
        } else {
            painter.add(Shape::line(pts.clone(), Stroke::new(2.0, color)));
        }

        if let Some(h) = hover {
            for (p, &(d, c)) in pts.iter().zip(&s.points) {
                let dist = p.distance(h);
                if dist < 12.0 && nearest.is_none_or(|n| dist < n.0) {
                    nearest = Some((dist, *p, s.keyword.as_str(), d, c));
                }
            }
        }

        // legend
        let y = plot.top() + i as f32 * 18.0;
        let x = plot.right() + 14.0;
        painter.line_segment([Pos2::new(x, y + 7.0), Pos2::new(x + 16.0, y + 7.0)], Stroke::new(2.0, color));
        painter.text(Pos2::new(x + 22.0, y), Align2::LEFT_TOP, &s.keyword, font.clone(), text_color);
    }

    if let Some((_, p, kw, d, c)) = nearest {
        painter.circle_stroke(p, 5.0, Stroke::new(1.5, text_color));
        painter.text(
            p + egui::vec2(8.0, -8.0),
            Align2::LEFT_BOTTOM,
            format!("{kw} {} : {c}", fmt_date(d)),
            font,
            text_color,
        );
    }
}
