use crate::grade::Grade;
use crate::snapshot::FinancialSnapshot;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Overview,
    Metrics,
    ActionPlan,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Overview => Page::Metrics,
            Page::Metrics => Page::ActionPlan,
            Page::ActionPlan => Page::Overview,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Overview => Page::ActionPlan,
            Page::Metrics => Page::Overview,
            Page::ActionPlan => Page::Metrics,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Overview => "Overview",
            Page::Metrics => "Metrics",
            Page::ActionPlan => "Action Plan",
        }
    }
}

pub struct App {
    pub snapshot: FinancialSnapshot,
    pub current_page: Page,
}

impl App {
    pub fn new(snapshot: FinancialSnapshot) -> Self {
        Self {
            snapshot,
            current_page: Page::Overview,
        }
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
    }
}

/// Run the dashboard. `refresh` recomputes the snapshot from the store so
/// the user can re-diagnose after editing records (key: r).
pub fn run_ui<F>(app: &mut App, mut refresh: F) -> Result<()>
where
    F: FnMut() -> FinancialSnapshot,
{
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, app, &mut refresh);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop<B: ratatui::backend::Backend, F>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    refresh: &mut F,
) -> Result<()>
where
    F: FnMut() -> FinancialSnapshot,
{
    loop {
        terminal.draw(|f| draw(f, app))?;

        if event::poll(Duration::from_millis(200))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Tab | KeyCode::Right => app.next_page(),
                    KeyCode::BackTab | KeyCode::Left => app.previous_page(),
                    KeyCode::Char('r') => app.snapshot = refresh(),
                    _ => {}
                }
            }
        }
    }
}

fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.size());

    draw_header(f, app, chunks[0]);

    match app.current_page {
        Page::Overview => draw_overview(f, app, chunks[1]),
        Page::Metrics => draw_metrics(f, app, chunks[1]),
        Page::ActionPlan => draw_plan(f, app, chunks[1]),
    }

    let help = Paragraph::new(" Tab/←→: 페이지  r: 재진단  q: 종료")
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[2]);
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let snapshot = &app.snapshot;
    let title = Line::from(vec![
        Span::styled(
            format!(" 💰 {} 님 ", snapshot.model.profile.name),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "│ {} {}단계 {} ",
            snapshot.stage.icon, snapshot.stage.number, snapshot.stage.name
        )),
        Span::styled(
            format!(
                "│ 종합 {} ({})",
                snapshot.grades.overall.code(),
                snapshot.grades.overall.label()
            ),
            grade_style(snapshot.grades.overall),
        ),
    ]);

    let header = Paragraph::new(title).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", app.current_page.title())),
    );
    f.render_widget(header, area);
}

fn grade_style(grade: Grade) -> Style {
    let color = match grade {
        Grade::Best => Color::Green,
        Grade::Good => Color::LightGreen,
        Grade::Caution => Color::Yellow,
        Grade::Risk => Color::Red,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn draw_overview(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    let stage = &app.snapshot.stage;
    let stage_text = vec![
        Line::from(Span::styled(
            format!("{} {}단계 · {}", stage.icon, stage.number, stage.name),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(stage.description.clone()),
    ];
    let stage_block = Paragraph::new(stage_text)
        .block(Block::default().borders(Borders::ALL).title(" 현재 단계 "));
    f.render_widget(stage_block, chunks[0]);

    let g = &app.snapshot.grades;
    let m = &app.snapshot.metrics;
    let rows = vec![
        grade_row("부채", g.debt, format!("부채비율 {:.0}%", m.debt_ratio)),
        grade_row("저축", g.savings, format!("저축률 {:.0}%", m.savings_rate)),
        grade_row(
            "비상자금",
            g.emergency,
            format!(
                "{:.1}개월 / 목표 {:.0}개월",
                m.emergency_months, m.emergency_target_months
            ),
        ),
        grade_row(
            "은퇴준비",
            g.retirement,
            format!("준비율 {:.0}%", m.retirement.readiness_rate),
        ),
        grade_row(
            "보장",
            g.insurance,
            format!(
                "충족률 {:.0}% · 부족 {}건",
                m.insurance.coverage_rate, m.insurance.lack_count
            ),
        ),
        grade_row("종합", g.overall, format!("점수 {:.0}", g.overall_score)),
    ];

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Min(20),
        ],
    )
    .header(
        Row::new(vec!["영역", "등급", "근거"]).style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().borders(Borders::ALL).title(" 영역별 등급 "));
    f.render_widget(table, chunks[1]);
}

fn grade_row(label: &str, grade: Grade, basis: String) -> Row<'static> {
    Row::new(vec![
        Cell::from(label.to_string()),
        Cell::from(format!("{} ({})", grade.code(), grade.label())).style(grade_style(grade)),
        Cell::from(basis),
    ])
}

fn draw_metrics(f: &mut Frame, app: &App, area: Rect) {
    let m = &app.snapshot.metrics;
    let tax = &app.snapshot.inheritance_tax;

    let rows = vec![
        metric_row("순자산", format!("{:.0} 만원", m.net_worth)),
        metric_row("월 소득", format!("{:.0} 만원", m.monthly_income)),
        metric_row("필수 월 지출", format!("{:.0} 만원", m.monthly_required_expense)),
        metric_row("DSR", format!("{:.0} %", m.dsr)),
        metric_row("웰스인덱스", format!("{:.0}", m.wealth_index)),
        metric_row("부동산 비중", format!("{:.0} %", m.real_estate_concentration)),
        metric_row(
            "은퇴 준비/필요",
            format!(
                "{:.0} / {:.0} 만원·월",
                m.retirement.prepared_monthly, m.retirement.required_monthly
            ),
        ),
        metric_row(
            "은퇴 추가 저축",
            format!("{:.0} 만원·월", m.retirement.additional_monthly_saving),
        ),
        metric_row(
            "부채 구성",
            format!(
                "담보 {:.0}% · 신용 {:.0}% · 기타 {:.0}%",
                m.debt_mix.mortgage_pct, m.debt_mix.credit_pct, m.debt_mix.other_pct
            ),
        ),
        metric_row(
            "상속세 추정",
            format!(
                "{:.0} 만원 ({})",
                tax.assessment.tax, tax.assessment.bracket_label
            ),
        ),
        metric_row(
            "연말정산",
            format!("{:+.0} 만원", app.snapshot.income_tax.balance),
        ),
    ];

    let table = Table::new(rows, [Constraint::Length(16), Constraint::Min(24)])
        .block(Block::default().borders(Borders::ALL).title(" 주요 지표 "));
    f.render_widget(table, area);
}

fn metric_row(label: &str, value: String) -> Row<'static> {
    Row::new(vec![Cell::from(label.to_string()), Cell::from(value)])
}

fn draw_plan(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();
    for item in &app.snapshot.plan {
        lines.push(Line::from(Span::styled(
            format!("{}. [{}] {}", item.priority, item.domain, item.action),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(format!("   {}", item.detail)));
        lines.push(Line::from(""));
    }

    let plan = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" 실행 계획 "));
    f.render_widget(plan, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_cycle_is_closed() {
        let mut page = Page::Overview;
        for _ in 0..3 {
            page = page.next();
        }
        assert_eq!(page, Page::Overview);

        assert_eq!(Page::Overview.previous(), Page::ActionPlan);
    }
}
