//! Plain-text page rendering for terminals.

use tickview_core::{format_currency, ChartDomain, ChartPoint, NumberLocale, Page, Widget};

use crate::commands::PeriodRow;

const PAGE_WIDTH: usize = 78;
const CHART_HEIGHT: usize = 12;
const CHART_WIDTH: usize = 60;
const COLUMN_GAP: usize = 4;

pub fn render_page(page: &Page) -> String {
    let mut lines = Vec::new();
    for widget in &page.widgets {
        render_widget(widget, &mut lines);
    }
    lines.join("\n")
}

pub fn render_periods(rows: &[PeriodRow]) -> String {
    rows.iter()
        .map(|row| format!("{:<4} {:<8} ~{} trading days", row.code, row.label, row.trading_days))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_widget(widget: &Widget, lines: &mut Vec<String>) {
    match widget {
        Widget::Heading { text } => {
            lines.push(center(text));
            lines.push(center(&"=".repeat(text.chars().count())));
        }
        Widget::Header { text } => {
            lines.push(String::new());
            lines.push(format!("## {text}"));
        }
        Widget::Divider => lines.push("-".repeat(PAGE_WIDTH)),
        Widget::TextInput { label, value, .. } => lines.push(format!("{label} {value}")),
        Widget::Selector {
            label,
            options,
            selected,
            ..
        } => {
            let choices: Vec<String> = options
                .iter()
                .map(|option| {
                    if &option.value == selected {
                        format!("[{}]", option.label)
                    } else {
                        option.label.clone()
                    }
                })
                .collect();
            lines.push(format!("{label} {}", choices.join("  ")));
        }
        Widget::Metric { label, value } => lines.push(format!("{label}: {value}")),
        Widget::Columns { columns } => lines.extend(side_by_side(columns)),
        Widget::LineChart { domain, points, .. } => lines.extend(ascii_chart(domain, points)),
        Widget::Text { text } => lines.extend(wrap(text, PAGE_WIDTH)),
    }
}

fn center(text: &str) -> String {
    let pad = PAGE_WIDTH.saturating_sub(text.chars().count()) / 2;
    format!("{}{text}", " ".repeat(pad))
}

/// Lay columns out left to right, one metric per row.
fn side_by_side(columns: &[Vec<Widget>]) -> Vec<String> {
    let rendered: Vec<Vec<String>> = columns
        .iter()
        .map(|column| {
            let mut lines = Vec::new();
            for widget in column {
                render_widget(widget, &mut lines);
            }
            lines
        })
        .collect();

    let width = rendered
        .iter()
        .flatten()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0)
        + COLUMN_GAP;
    let rows = rendered.iter().map(Vec::len).max().unwrap_or(0);

    (0..rows)
        .map(|row| {
            let mut line = String::new();
            for column in &rendered {
                let cell = column.get(row).map(String::as_str).unwrap_or("");
                line.push_str(&format!("{cell:<width$}"));
            }
            line.trim_end().to_owned()
        })
        .collect()
}

fn ascii_chart(domain: &ChartDomain, points: &[ChartPoint]) -> Vec<String> {
    if points.is_empty() {
        return Vec::new();
    }

    let width = points.len().min(CHART_WIDTH);
    let mut grid = vec![vec![' '; width]; CHART_HEIGHT];
    for x in 0..width {
        let index = x * (points.len() - 1) / (width - 1).max(1);
        let level = domain.normalize(points[index].value).clamp(0.0, 1.0);
        let y = ((1.0 - level) * (CHART_HEIGHT - 1) as f64).round() as usize;
        grid[y][x] = '*';
    }

    let upper = format_currency(domain.upper, 2, NumberLocale::EN_US);
    let lower = format_currency(domain.lower, 2, NumberLocale::EN_US);
    let axis_width = upper.len().max(lower.len());

    let mut lines: Vec<String> = grid
        .into_iter()
        .enumerate()
        .map(|(row, cells)| {
            let label = match row {
                0 => upper.as_str(),
                r if r == CHART_HEIGHT - 1 => lower.as_str(),
                _ => "",
            };
            let plot: String = cells.into_iter().collect();
            format!("{label:>axis_width$} |{}", plot.trim_end())
        })
        .collect();

    lines.push(format!("{} +{}", " ".repeat(axis_width), "-".repeat(width)));
    let first = points[0].date.format_date();
    let last = points[points.len() - 1].date.format_date();
    let gap = width.saturating_sub(first.len() + last.len());
    lines.push(format!(
        "{}  {first}{}{last}",
        " ".repeat(axis_width),
        " ".repeat(gap)
    ));
    lines
}

/// Word-wrap each line of `text` on its own; blank lines stay blank.
fn wrap(text: &str, width: usize) -> Vec<String> {
    text.lines()
        .flat_map(|line| wrap_line(line, width))
        .collect()
}

fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let indent: String = line.chars().take_while(|c| c.is_whitespace()).collect();
    let mut lines = Vec::new();
    let mut current = indent.clone();
    for word in line.split_whitespace() {
        if current.len() > indent.len()
            && current.chars().count() + 1 + word.chars().count() > width
        {
            lines.push(std::mem::replace(&mut current, indent.clone()));
        }
        if current.len() > indent.len() {
            current.push(' ');
        }
        current.push_str(word);
    }
    lines.push(current);
    lines
}
