use ratatui::prelude::*;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Clear, Paragraph, Tabs};

use crate::dashboard::view::{
    BREAKDOWN_HEADING, COMPARISON_BLURB, COMPARISON_HEADING, COMPARISON_TITLE, DASHBOARD_TITLE,
    SCORE_AXIS_LABEL, SCORE_AXIS_MAX,
};
use crate::dashboard::{comparison_by_category, CategoryBar, DashboardView};
use crate::dataset::Category;
use crate::output::format_score;
use crate::rating::Grade;
use crate::tui::app::{App, ComparisonMode, InputMode};
use crate::tui::theme::ThemeColors;

const METRICS_WIDTH: u16 = 34;
const MAX_BAR_WIDTH: u16 = 9;
const BAR_GAP: u16 = 1;
const GROUP_GAP: u16 = 3;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 20 || area.width < 60 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Company tabs(1) + Breakdown row + Comparison + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),      // Title bar
        Constraint::Length(1),      // Company selector
        Constraint::Percentage(45), // Metrics + breakdown chart
        Constraint::Fill(1),        // Comparison chart
        Constraint::Length(1),      // Status bar
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    render_company_tabs(frame, chunks[1], app);

    match &app.view {
        Some(view) => {
            render_breakdown_row(frame, chunks[2], view, &app.colors);
            render_comparison(frame, chunks[3], app);
        }
        None => {
            let body = chunks[2].union(chunks[3]);
            let empty_msg = Paragraph::new("No ESG data to display")
                .alignment(Alignment::Center)
                .style(Style::default().fg(app.colors.muted))
                .block(Block::bordered().border_style(Style::default().fg(app.colors.border)));
            frame.render_widget(empty_msg, body);
        }
    }

    render_status_bar(frame, chunks[4], app);

    if app.input_mode == InputMode::Help {
        render_help_popup(frame, &app.colors);
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let colors = &app.colors;
    let mut spans = vec![Span::styled(
        DASHBOARD_TITLE,
        Style::default().fg(colors.title_color).bold(),
    )];

    // Category legend on the right
    let legend = legend_spans(colors);
    let legend_len: usize = legend.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize).saturating_sub(DASHBOARD_TITLE.len() + legend_len);
    if padding_len > 0 {
        spans.push(Span::raw(" ".repeat(padding_len)));
        spans.extend(legend);
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn legend_spans(colors: &ThemeColors) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for category in Category::ALL {
        spans.push(Span::styled(
            "■ ",
            Style::default().fg(colors.categories.color(category)),
        ));
        spans.push(Span::styled(
            format!("{} ", category),
            Style::default().fg(colors.muted),
        ));
    }
    spans
}

fn render_company_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<String> = app
        .companies
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{} {}", i + 1, name))
        .collect();

    let label = "Select a Company: ";
    let chunks = Layout::horizontal([
        Constraint::Length(label.len() as u16),
        Constraint::Fill(1),
    ])
    .split(area);

    frame.render_widget(
        Paragraph::new(label).style(Style::default().fg(app.colors.muted)),
        chunks[0],
    );

    let tabs = Tabs::new(titles)
        .select(app.selected)
        .style(app.colors.tab_inactive_style)
        .highlight_style(app.colors.tab_active_style)
        .divider(" | ");

    frame.render_widget(tabs, chunks[1]);
}

fn render_breakdown_row(frame: &mut Frame, area: Rect, view: &DashboardView, colors: &ThemeColors) {
    let chunks =
        Layout::horizontal([Constraint::Length(METRICS_WIDTH), Constraint::Fill(1)]).split(area);

    render_metrics(frame, chunks[0], view, colors);
    render_breakdown_chart(frame, chunks[1], view, colors);
}

fn render_metrics(frame: &mut Frame, area: Rect, view: &DashboardView, colors: &ThemeColors) {
    let block = Block::bordered()
        .title(format!(" {} ", BREAKDOWN_HEADING))
        .title_style(colors.header_style)
        .border_style(Style::default().fg(colors.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let metrics = &view.metrics;
    let grade_style = Style::default().fg(colors.grade_color(metrics.rating)).bold();

    let mut lines = vec![
        Line::from(Span::styled("Total ESG Score", Style::default().fg(colors.muted))),
        Line::from(Span::styled(
            format_score(metrics.total_score),
            Style::default().bold(),
        )),
        Line::from(""),
        Line::from(Span::styled("ESG Rating", Style::default().fg(colors.muted))),
        Line::from(Span::styled(metrics.rating.to_string(), grade_style)),
        Line::from(""),
    ];

    // Grade bands, current one highlighted
    for grade in Grade::ALL {
        let marker = if grade == metrics.rating { "» " } else { "  " };
        let style = if grade == metrics.rating {
            grade_style
        } else {
            Style::default().fg(colors.muted)
        };
        lines.push(Line::from(Span::styled(
            format!("{}{:<3}{}", marker, grade.as_str(), grade.band_label()),
            style,
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Bar width that fits `total_bars` bars in `groups` groups into `width` columns
fn fit_bar_width(width: u16, groups: u16, total_bars: u16) -> u16 {
    if total_bars == 0 {
        return 1;
    }
    let bars_per_group = total_bars.div_ceil(groups.max(1));
    let gaps = groups.saturating_sub(1) * GROUP_GAP
        + groups * bars_per_group.saturating_sub(1) * BAR_GAP;
    (width.saturating_sub(gaps) / total_bars).clamp(1, MAX_BAR_WIDTH)
}

/// Clamp a score into the chart's 0-100 axis
fn bar_value(score: f64) -> u64 {
    if score.is_nan() {
        return 0;
    }
    score.round().clamp(0.0, SCORE_AXIS_MAX as f64) as u64
}

fn category_bar(bar: &CategoryBar, label: Line<'static>, colors: &ThemeColors) -> Bar<'static> {
    let color = colors.categories.color(bar.category);
    Bar::default()
        .value(bar_value(bar.score))
        .text_value(format!("{:.0}", bar.score))
        .label(label)
        .style(Style::default().fg(color))
        .value_style(Style::default().fg(colors.bar_value).bg(color))
}

fn render_breakdown_chart(
    frame: &mut Frame,
    area: Rect,
    view: &DashboardView,
    colors: &ThemeColors,
) {
    let block = Block::bordered()
        .title(format!(" {} ", view.breakdown_title))
        .title_style(colors.header_style)
        .title_bottom(Line::from(format!(" {} ", SCORE_AXIS_LABEL)).right_aligned())
        .border_style(Style::default().fg(colors.border));
    let inner_width = block.inner(area).width;

    // A single group gets wider bars than the comparison chart
    let n = view.breakdown.len().max(1) as u16;
    let gaps = n.saturating_sub(1) * BAR_GAP * 2;
    let bar_width = (inner_width.saturating_sub(gaps) / n).clamp(1, MAX_BAR_WIDTH * 2);

    let bars: Vec<Bar> = view
        .breakdown
        .iter()
        .map(|bar| {
            let label = if bar_width as usize >= bar.category.as_str().len() {
                bar.category.to_string()
            } else {
                bar.category.short_label().to_string()
            };
            category_bar(bar, Line::from(label), colors)
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .bar_width(bar_width)
        .bar_gap(BAR_GAP * 2)
        .max(SCORE_AXIS_MAX)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}

fn render_comparison(frame: &mut Frame, area: Rect, app: &App) {
    let colors = &app.colors;
    let Some(view) = &app.view else {
        return;
    };

    let outer = Block::bordered()
        .title(format!(" {} ", COMPARISON_HEADING))
        .title_style(colors.header_style)
        .border_style(Style::default().fg(colors.border));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let chunks = Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).split(inner);
    frame.render_widget(
        Paragraph::new(COMPARISON_BLURB).style(Style::default().fg(colors.muted)),
        chunks[0],
    );

    let selected = app.selected_company().unwrap_or_default();
    let company_style = |company: &str| {
        if company == selected {
            Style::default().fg(colors.title_color).bold()
        } else {
            Style::default()
        }
    };

    let mode_hint = match app.comparison_mode {
        ComparisonMode::ByCompany => "by company",
        ComparisonMode::ByCategory => "by category",
    };
    let block = Block::default()
        .title(format!("{} ({})", COMPARISON_TITLE, mode_hint))
        .title_style(Style::default().bold());
    let by_category = comparison_by_category(&app.dataset);
    let (group_count, total_bars) = match app.comparison_mode {
        ComparisonMode::ByCompany => (
            view.comparison.len(),
            view.comparison.iter().map(|g| g.bars.len()).sum::<usize>(),
        ),
        ComparisonMode::ByCategory => (
            by_category.len(),
            by_category.iter().map(|(_, bars)| bars.len()).sum::<usize>(),
        ),
    };
    let bar_width = fit_bar_width(chunks[1].width, group_count as u16, total_bars as u16);

    let groups: Vec<BarGroup> = match app.comparison_mode {
        ComparisonMode::ByCompany => view
            .comparison
            .iter()
            .map(|group| {
                let bars: Vec<Bar> = group
                    .bars
                    .iter()
                    .map(|bar| {
                        let label = if bar_width >= 3 {
                            bar.category.short_label()
                        } else {
                            ""
                        };
                        category_bar(bar, Line::from(label), colors)
                    })
                    .collect();
                BarGroup::default()
                    .label(Line::styled(
                        group.company.clone(),
                        company_style(&group.company),
                    ))
                    .bars(&bars)
            })
            .collect(),
        ComparisonMode::ByCategory => by_category
            .into_iter()
            .map(|(category, entries)| {
                let bars: Vec<Bar> = entries
                    .iter()
                    .map(|(company, score)| {
                        let bar = CategoryBar {
                            category,
                            score: *score,
                        };
                        let abbreviation: String = company.chars().take(3).collect();
                        let label = Line::styled(abbreviation, company_style(company));
                        category_bar(&bar, label, colors)
                    })
                    .collect();
                BarGroup::default()
                    .label(Line::from(category.to_string()))
                    .bars(&bars)
            })
            .collect(),
    };

    let mut chart = BarChart::default()
        .block(block)
        .bar_width(bar_width)
        .bar_gap(BAR_GAP)
        .group_gap(GROUP_GAP)
        .max(SCORE_AXIS_MAX);
    for group in groups {
        chart = chart.data(group);
    }

    frame.render_widget(chart, chunks[1]);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let colors = &app.colors;
    let text = if let Some((ref msg, _)) = app.flash_message {
        let msg_color = if msg.starts_with("Error") {
            colors.flash_error
        } else {
            colors.flash_success
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let count = format!("{} companies", app.companies.len());
        let hints = [
            ("←/→", ":company "),
            ("1-9", ":jump "),
            ("c", ":compare "),
            ("?", ":help "),
            ("q", ":quit"),
        ];

        let mut spans = vec![
            Span::styled(count, Style::default().fg(colors.muted)),
            Span::raw("  "),
        ];
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(*key, Style::default().fg(colors.status_key_color)));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(colors.status_bar_bg)),
        area,
    );
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

fn render_help_popup(frame: &mut Frame, colors: &ThemeColors) {
    let popup_area = centered_rect_fixed(46, 11, frame.area());

    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(" Keyboard Shortcuts ")
        .title_style(colors.popup_title)
        .border_style(Style::default().fg(colors.popup_border));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::default().fg(colors.popup_border).bold();
    let entries = [
        ("l / Right     ", "Next company"),
        ("h / Left      ", "Previous company"),
        ("1-9           ", "Jump to company"),
        ("c             ", "Toggle comparison grouping"),
        ("?             ", "Show/hide this help"),
        ("q / Ctrl-c    ", "Quit"),
    ];

    let mut help_lines: Vec<Line> = entries
        .iter()
        .map(|(key, action)| {
            Line::from(vec![Span::styled(*key, key_style), Span::raw(*action)])
        })
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(colors.muted),
    )));

    frame.render_widget(Paragraph::new(help_lines), inner);
}
