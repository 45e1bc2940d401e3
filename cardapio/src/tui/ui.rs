//! Screen layout

use super::app::{App, Focus};
use ratatui::{prelude::*, widgets::*};
use shared::money::format_brl;
use shared::{ClientOrder, NoticeLevel};
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget};

const EMPTY_HISTORY_TEXT: &str = "Nenhum pedido registrado no histórico.";

fn panel(title: &str, focused: bool) -> Block<'_> {
    let color = if focused { Color::Yellow } else { Color::Cyan };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}

/// Lines of a saved order: "label - Total: R$ x.xx" then its items
fn order_lines(order: &ClientOrder) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Span::styled(
            order.client_label.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" - Total: {}", format_brl(order.total))),
    ])];
    lines.extend(order.lines.iter().map(|line| {
        Line::from(format!(
            "  {} (x{}) - {}",
            line.name,
            line.quantity,
            format_brl(line.line_total())
        ))
    }));
    lines
}

pub fn draw<S>(f: &mut Frame, app: &mut App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Client label
            Constraint::Min(6),    // Orders
            Constraint::Length(3), // Notice
            Constraint::Length(6), // Logs
        ])
        .split(f.area());

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(chunks[2]);

    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(main_chunks[1]);

    let top_right = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(right_chunks[0]);

    draw_header(f, chunks[0]);
    draw_label_input(f, app, chunks[1]);
    draw_menu(f, app, main_chunks[0]);
    draw_current_order(f, app, top_right[0]);
    draw_open_orders(f, app, top_right[1]);
    draw_history(f, app, right_chunks[1]);
    draw_notice(f, app, chunks[3]);

    let logs = TuiLoggerWidget::default()
        .block(
            Block::default()
                .title(" Logs ")
                .border_style(Style::default().fg(Color::White).add_modifier(Modifier::DIM))
                .borders(Borders::ALL),
        )
        .output_separator('|')
        .output_timestamp(Some("%H:%M:%S".to_string()))
        .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
        .output_target(false)
        .output_file(false)
        .output_line(false)
        .style(Style::default().fg(Color::White))
        .state(&app.logger_state);
    f.render_widget(logs, chunks[4]);
}

fn draw_header(f: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            " Cardapio Rapido ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled(
            "Tab foco  Enter confirmar  s salvar  x exportar  z zerar  r limpar  q sair  PgUp/PgDn logs",
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(title, area);
}

fn draw_label_input<S>(f: &mut Frame, app: &App<S>, area: Rect) {
    let editing = app.focus == Focus::Label;
    let style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };

    let width = area.width.max(3) - 3;
    let scroll = app.input.visual_scroll(width as usize);
    let input = Paragraph::new(app.input.value())
        .style(style)
        .scroll((0, scroll as u16))
        .block(panel(" Mesa ou Cliente ", editing));
    f.render_widget(input, area);

    if editing {
        f.set_cursor_position((
            area.x + ((app.input.visual_cursor().max(scroll) - scroll) as u16) + 1,
            area.y + 1,
        ));
    }
}

fn draw_menu<S>(f: &mut Frame, app: &mut App<S>, area: Rect) {
    let items: Vec<ListItem> = app
        .ledger
        .menu()
        .items()
        .iter()
        .map(|item| ListItem::new(format!("{} - {}", item.name, format_brl(item.price))))
        .collect();

    let list = List::new(items)
        .block(panel(" Cardápio ", app.focus == Focus::Menu))
        .highlight_style(Style::default().fg(Color::Black).bg(Color::Yellow))
        .highlight_symbol("> ");
    f.render_stateful_widget(list, area, &mut app.menu_state);
}

fn draw_current_order<S>(f: &mut Frame, app: &App<S>, area: Rect) {
    let current = app.ledger.current_order();
    let block = panel(" Pedido Atual ", false);
    let inner = block.inner(area);
    f.render_widget(block, area);

    // Total keeps its own row; lines scroll so the newest stays visible
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let lines: Vec<Line> = current
        .lines()
        .iter()
        .map(|line| {
            Line::from(format!(
                "{} (x{}) - {}",
                line.name,
                line.quantity,
                format_brl(line.line_total())
            ))
        })
        .collect();
    let scroll = lines.len().saturating_sub(parts[0].height as usize);
    let paragraph = Paragraph::new(lines).scroll((scroll as u16, 0));
    f.render_widget(paragraph, parts[0]);

    let total = Paragraph::new(Line::from(Span::styled(
        format!("Total: {}", format_brl(current.total())),
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    )));
    f.render_widget(total, parts[1]);
}

fn draw_open_orders<S>(f: &mut Frame, app: &mut App<S>, area: Rect) {
    let items: Vec<ListItem> = app
        .ledger
        .open_orders()
        .iter()
        .map(|order| ListItem::new(order_lines(order)))
        .collect();

    let title = format!(" Pedidos por Cliente ({}) ", items.len());
    let list = List::new(items)
        .block(panel(&title, app.focus == Focus::Orders))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    f.render_stateful_widget(list, area, &mut app.orders_state);
}

fn draw_history<S>(f: &mut Frame, app: &mut App<S>, area: Rect) {
    let focused = app.focus == Focus::History;
    let history = app.ledger.history();
    let title = format!(" Histórico Diário ({}) ", history.len());
    let block = panel(&title, focused);

    if history.is_empty() {
        let empty = Paragraph::new(EMPTY_HISTORY_TEXT)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = history
        .iter()
        .map(|record| ListItem::new(order_lines(record)))
        .collect();
    let highlight = if focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    };
    let list = List::new(items).block(block).highlight_style(highlight);
    f.render_stateful_widget(list, area, &mut app.history_state);
}

fn draw_notice<S>(f: &mut Frame, app: &App<S>, area: Rect) {
    let Some(notice) = &app.notice else {
        f.render_widget(Block::default().borders(Borders::ALL), area);
        return;
    };

    let color = match notice.level() {
        NoticeLevel::Info => Color::Green,
        NoticeLevel::Warning => Color::Yellow,
        NoticeLevel::Error => Color::Red,
    };
    let text = Line::from(vec![
        Span::styled(
            format!("{}: ", notice.title()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(notice.message()),
    ]);
    let paragraph = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );
    f.render_widget(paragraph, area);
}
