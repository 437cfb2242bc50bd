use blackjack::{CardView, GamePhase, HandOutcome, Suit, TableView};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::app::App;

fn suit_color(suit: Option<Suit>) -> Color {
    match suit {
        Some(Suit::Hearts) => Color::Red,
        Some(Suit::Diamonds) => Color::from_u32(0xFF_A5_00), // Orange
        Some(Suit::Clubs) => Color::Magenta,                 // Purple
        Some(Suit::Spades) => Color::Black,
        None => Color::White,
    }
}

fn card_spans(cards: &[CardView]) -> Vec<Span<'static>> {
    cards
        .iter()
        .map(|card| {
            Span::styled(
                format!("{} ", card.label()),
                Style::default().fg(suit_color(card.suit())).bg(Color::Gray),
            )
        })
        .collect()
}

/// Cards wrapped to the block width and centred vertically.
fn hand_lines(cards: &[CardView], area: Rect) -> Vec<Line<'static>> {
    let width = area.width.saturating_sub(2);
    let card_width = 4; // "10♦ " is the widest
    let cards_per_line = (width / card_width).max(1) as usize;

    let wrapped: Vec<Line> = card_spans(cards)
        .chunks(cards_per_line)
        .map(|chunk| Line::from(chunk.to_vec()))
        .collect();

    let height = area.height.saturating_sub(2);
    let padding_top = height.saturating_sub(wrapped.len() as u16) / 2;
    let mut lines = vec![Line::from(""); padding_top as usize];
    lines.extend(wrapped);
    lines
}

fn outcome_style(view: &TableView) -> Style {
    match view.outcome {
        Some(HandOutcome::Win) => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        Some(HandOutcome::Loss) => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        Some(HandOutcome::Push) => Style::default().fg(Color::DarkGray),
        None => Style::default(),
    }
}

fn render_table_info(f: &mut Frame, app: &App, view: &TableView, area: Rect) {
    let block = Block::default().borders(Borders::ALL);

    match view.phase {
        GamePhase::Betting => {
            let range = view.min_bet..=view.max_bet;
            let title = if view.reshuffled {
                " Shuffling... ".to_string()
            } else {
                format!(" Balance: ${} ", view.balance)
            };
            let gauge = Gauge::default()
                .block(block.title(title))
                .gauge_style(Style::default().fg(Color::Yellow).bg(Color::DarkGray))
                .ratio(app.slider.ratio(&range))
                .label(format!("Bet ${}  (${} - ${})", app.slider.value(), view.min_bet, view.max_bet));
            f.render_widget(gauge, area);
        }
        GamePhase::GameEnded => {
            let lines = vec![
                Line::from(Span::styled(
                    "Game Over!",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::from("You have run out of cash money."),
                Line::from("Press 'R' to restart or Q to exit."),
            ];
            let paragraph = Paragraph::new(lines).block(block).alignment(Alignment::Center);
            f.render_widget(paragraph, area);
        }
        _ => {
            let mut lines = vec![Line::from(format!(
                "Balance: ${}   Bet: ${}",
                view.balance, view.bet
            ))];
            if let Some(text) = &view.outcome_text {
                lines.push(Line::from(Span::styled(text.clone(), outcome_style(view))));
                lines.push(Line::from(app.status()));
            } else if view.phase == GamePhase::PlayerTurn {
                lines.push(Line::from(vec![
                    Span::styled("↑", Style::default().fg(Color::Yellow)),
                    Span::raw(" Hit  "),
                    Span::styled("↓", Style::default().fg(Color::Yellow)),
                    Span::raw(" Stand"),
                ]));
            }
            let paragraph = Paragraph::new(lines).block(block).alignment(Alignment::Center);
            f.render_widget(paragraph, area);
        }
    }
}

pub fn draw(f: &mut Frame, app: &App) {
    let view = app.game.view();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(3), // Title bar
                Constraint::Min(12),   // Table
                Constraint::Length(3), // Status bar
            ]
            .as_ref(),
        )
        .split(f.area());

    let title = Paragraph::new(format!(
        "Blackjack - {} cards in shoe, round {} of {}",
        view.shoe_remaining,
        view.rounds_since_shuffle + 1,
        app.game.rules().rounds_per_shoe
    ))
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, main_chunks[0]);

    let (game_container, log_area) = if app.log_visible {
        let main_horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)].as_ref())
            .split(main_chunks[1]);
        (main_horizontal[0], Some(main_horizontal[1]))
    } else {
        (main_chunks[1], None)
    };

    let game_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage(40),
                Constraint::Min(5),
                Constraint::Percentage(40),
            ]
            .as_ref(),
        )
        .split(game_container);

    let dealer_title = match view.dealer_total {
        Some(total) => format!(" Dealer's Total: {total} "),
        None => " Dealer ".to_string(),
    };
    let dealer_block = Paragraph::new(hand_lines(&view.dealer_cards, game_area[0]))
        .block(Block::default().title(dealer_title).borders(Borders::ALL))
        .alignment(Alignment::Center);
    f.render_widget(dealer_block, game_area[0]);

    render_table_info(f, app, &view, game_area[1]);

    let player_title = match view.player_total {
        Some(total) => format!(" Your Total: {total} "),
        None => " You ".to_string(),
    };
    let border_style = match view.phase {
        GamePhase::PlayerTurn => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        GamePhase::GameOver => outcome_style(&view),
        _ => Style::default(),
    };
    let player_block = Paragraph::new(hand_lines(&view.player_cards, game_area[2]))
        .block(
            Block::default()
                .title(player_title)
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .alignment(Alignment::Center);
    f.render_widget(player_block, game_area[2]);

    if let Some(log_area) = log_area {
        let log_frame_height = log_area.height.saturating_sub(2) as usize;
        let log_start_idx = app.logs.len().saturating_sub(log_frame_height);

        let log_lines: Vec<Line> = app
            .logs
            .iter()
            .skip(log_start_idx)
            .map(|log| {
                Line::from(vec![
                    Span::styled("• ", Style::default().fg(Color::DarkGray)),
                    Span::raw(log.clone()),
                ])
            })
            .collect();

        let logs_widget = Paragraph::new(log_lines)
            .block(
                Block::default()
                    .title(" Game Log ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Green)),
            )
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true });
        f.render_widget(logs_widget, log_area);
    }

    let status_bar = Paragraph::new(app.status())
        .style(Style::default().fg(Color::White))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status_bar, main_chunks[2]);
}
